use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FitnessGoal {
    #[serde(rename = "Weight Loss")]
    WeightLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    Endurance,
    Flexibility,
    #[default]
    #[serde(rename = "General Fitness")]
    General,
    #[serde(rename = "Stress Relief")]
    StressRelief,
}

impl FitnessGoal {
    pub const ALL: [FitnessGoal; 6] = [
        FitnessGoal::WeightLoss,
        FitnessGoal::MuscleGain,
        FitnessGoal::Endurance,
        FitnessGoal::Flexibility,
        FitnessGoal::General,
        FitnessGoal::StressRelief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessGoal::WeightLoss => "Weight Loss",
            FitnessGoal::MuscleGain => "Muscle Gain",
            FitnessGoal::Endurance => "Endurance",
            FitnessGoal::Flexibility => "Flexibility",
            FitnessGoal::General => "General Fitness",
            FitnessGoal::StressRelief => "Stress Relief",
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum FitnessLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl FitnessLevel {
    pub const ALL: [FitnessLevel; 3] = [
        FitnessLevel::Beginner,
        FitnessLevel::Intermediate,
        FitnessLevel::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FitnessLevel::Beginner => "Beginner",
            FitnessLevel::Intermediate => "Intermediate",
            FitnessLevel::Advanced => "Advanced",
        }
    }

    /// Nominal session length for generated workouts, in seconds.
    pub fn base_duration_secs(&self) -> u32 {
        match self {
            FitnessLevel::Beginner => 900,
            FitnessLevel::Intermediate => 1800,
            FitnessLevel::Advanced => 2700,
        }
    }

    /// Scales reps, exercise durations and calories.
    pub fn multiplier(&self) -> u32 {
        match self {
            FitnessLevel::Beginner => 1,
            FitnessLevel::Intermediate => 2,
            FitnessLevel::Advanced => 3,
        }
    }
}

/// Parse either the display name ("Weight Loss") or a kebab/snake form
/// ("weight-loss").
fn normalize(s: &str) -> String {
    s.trim()
        .to_ascii_lowercase()
        .replace(['-', '_'], " ")
}

impl std::str::FromStr for FitnessGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        FitnessGoal::ALL
            .into_iter()
            .find(|g| normalize(g.as_str()) == wanted || (wanted == "general" && *g == FitnessGoal::General))
            .ok_or_else(|| format!("unknown fitness goal: {s}"))
    }
}

impl std::str::FromStr for FitnessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize(s);
        FitnessLevel::ALL
            .into_iter()
            .find(|l| normalize(l.as_str()) == wanted)
            .ok_or_else(|| format!("unknown fitness level: {s}"))
    }
}

/// Persisted user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub fitness_goal: FitnessGoal,
    pub fitness_level: FitnessLevel,
    #[serde(default)]
    pub age: Option<u32>,
    /// Kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    pub is_guest: bool,
    pub created_at: DateTime<Utc>,
    pub total_workouts: u32,
    pub total_meditation_minutes: u32,
    pub streak: u32,
    /// Minutes.
    pub preferred_workout_duration: u32,
    /// Minutes.
    pub preferred_meditation_duration: u32,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: "Guest".into(),
            email: String::new(),
            fitness_goal: FitnessGoal::default(),
            fitness_level: FitnessLevel::default(),
            age: None,
            weight: None,
            height: None,
            is_guest: false,
            created_at: Utc::now(),
            total_workouts: 0,
            total_meditation_minutes: 0,
            streak: 0,
            preferred_workout_duration: 30,
            preferred_meditation_duration: 10,
        }
    }
}

impl UserProfile {
    pub fn guest() -> Self {
        Self {
            is_guest: true,
            ..Self::default()
        }
    }

    /// Body mass index, when both weight and a positive height are known.
    pub fn bmi(&self) -> Option<f64> {
        let weight = self.weight?;
        let height = self.height.filter(|h| *h > 0.0)?;
        let meters = height / 100.0;
        Some(weight / (meters * meters))
    }

    pub fn bmi_category(&self) -> &'static str {
        match self.bmi() {
            None => "N/A",
            Some(bmi) if bmi < 18.5 => "Underweight",
            Some(bmi) if bmi < 25.0 => "Normal",
            Some(bmi) if bmi < 30.0 => "Overweight",
            Some(_) => "Obese",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_new_user() {
        let p = UserProfile::default();
        assert_eq!(p.name, "Guest");
        assert_eq!(p.fitness_goal, FitnessGoal::General);
        assert_eq!(p.preferred_workout_duration, 30);
        assert_eq!(p.preferred_meditation_duration, 10);
        assert!(!p.is_guest);
        assert!(UserProfile::guest().is_guest);
    }

    #[test]
    fn profile_json_roundtrip_is_identical() {
        let p = UserProfile {
            age: Some(31),
            weight: Some(72.5),
            height: Some(180.0),
            streak: 4,
            ..UserProfile::default()
        };
        let json = serde_json::to_string(&p).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(json.contains("\"fitnessGoal\":\"General Fitness\""));
    }

    #[test]
    fn bmi_categories() {
        let mut p = UserProfile {
            weight: Some(70.0),
            height: Some(175.0),
            ..UserProfile::default()
        };
        let bmi = p.bmi().unwrap();
        assert!((bmi - 22.857).abs() < 0.01);
        assert_eq!(p.bmi_category(), "Normal");

        p.weight = Some(50.0);
        assert_eq!(p.bmi_category(), "Underweight");
        p.weight = Some(80.0);
        assert_eq!(p.bmi_category(), "Overweight");
        p.weight = Some(100.0);
        assert_eq!(p.bmi_category(), "Obese");

        p.height = Some(0.0);
        assert!(p.bmi().is_none());
        assert_eq!(p.bmi_category(), "N/A");
    }

    #[test]
    fn goal_and_level_parse_loosely() {
        assert_eq!("weight-loss".parse::<FitnessGoal>().unwrap(), FitnessGoal::WeightLoss);
        assert_eq!("General Fitness".parse::<FitnessGoal>().unwrap(), FitnessGoal::General);
        assert_eq!("general".parse::<FitnessGoal>().unwrap(), FitnessGoal::General);
        assert_eq!("ADVANCED".parse::<FitnessLevel>().unwrap(), FitnessLevel::Advanced);
        assert!("couch".parse::<FitnessLevel>().is_err());
    }
}
