use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::FitnessLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutCategory {
    Cardio,
    Strength,
    Yoga,
    #[serde(rename = "HIIT")]
    Hiit,
    Stretching,
    #[serde(rename = "Full Body")]
    FullBody,
}

impl WorkoutCategory {
    pub const ALL: [WorkoutCategory; 6] = [
        WorkoutCategory::Cardio,
        WorkoutCategory::Strength,
        WorkoutCategory::Yoga,
        WorkoutCategory::Hiit,
        WorkoutCategory::Stretching,
        WorkoutCategory::FullBody,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutCategory::Cardio => "Cardio",
            WorkoutCategory::Strength => "Strength",
            WorkoutCategory::Yoga => "Yoga",
            WorkoutCategory::Hiit => "HIIT",
            WorkoutCategory::Stretching => "Stretching",
            WorkoutCategory::FullBody => "Full Body",
        }
    }
}

/// One timed step of a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: u32,
    #[serde(default)]
    pub reps: Option<u32>,
    #[serde(default)]
    pub sets: Option<u32>,
    /// Rest before this exercise, in seconds.
    #[serde(default)]
    pub rest_time: Option<u32>,
    #[serde(default, rename = "videoURL")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub target_muscles: Vec<String>,
    #[serde(default)]
    pub is_completed: bool,
}

impl Exercise {
    pub fn new(name: &str, description: &str, duration: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: description.into(),
            duration,
            reps: None,
            sets: None,
            rest_time: None,
            video_url: None,
            instructions: Vec::new(),
            target_muscles: Vec::new(),
            is_completed: false,
        }
    }

    pub fn reps(mut self, reps: u32) -> Self {
        self.reps = Some(reps);
        self
    }

    pub fn sets(mut self, sets: u32) -> Self {
        self.sets = Some(sets);
        self
    }

    pub fn rest(mut self, secs: u32) -> Self {
        self.rest_time = Some(secs);
        self
    }

    pub fn steps(mut self, instructions: &[&str]) -> Self {
        self.instructions = instructions.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn targets(mut self, muscles: &[&str]) -> Self {
        self.target_muscles = muscles.iter().map(|s| s.to_string()).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    /// Nominal duration in seconds, as advertised in the catalog.
    pub duration: u32,
    pub difficulty: FitnessLevel,
    pub category: WorkoutCategory,
    pub exercises: Vec<Exercise>,
    pub calories_burned: u32,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub rating: Option<u8>,
    /// Session score in [0,1], set when the workout is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub performance: Option<f64>,
}

impl Workout {
    /// Sum of the exercise durations in seconds. This is what the player
    /// runs against, not the nominal `duration`.
    pub fn exercise_duration(&self) -> u32 {
        self.exercises.iter().map(|e| e.duration).sum()
    }

    /// "12m" or "12m 30s".
    pub fn formatted_duration(&self) -> String {
        let minutes = self.duration / 60;
        let seconds = self.duration % 60;
        if seconds == 0 {
            format!("{minutes}m")
        } else {
            format!("{minutes}m {seconds}s")
        }
    }

    pub fn completed_exercises(&self) -> usize {
        self.exercises.iter().filter(|e| e.is_completed).count()
    }
}
