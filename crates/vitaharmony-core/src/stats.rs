//! Summary statistics over workout and meditation history.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::content::{MeditationSession, Workout};

/// Window for the "this week" counters.
pub const RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutStats {
    pub total_workouts: usize,
    pub total_calories: u64,
    /// Mean nominal duration in seconds, truncated.
    pub average_duration_secs: u32,
    pub workouts_last_7_days: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeditationStats {
    pub total_sessions: usize,
    pub total_minutes: u32,
    /// Mean over sessions that have a score; 0 when none do.
    pub average_focus_score: f64,
    pub sessions_last_7_days: usize,
}

fn within_window(completed_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    let cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    completed_at.is_some_and(|t| t > cutoff)
}

impl WorkoutStats {
    pub fn compute(history: &[Workout], now: DateTime<Utc>) -> Self {
        let total_workouts = history.len();
        let total_calories = history.iter().map(|w| u64::from(w.calories_burned)).sum();
        let average_duration_secs = if history.is_empty() {
            0
        } else {
            let total: u64 = history.iter().map(|w| u64::from(w.duration)).sum();
            (total / history.len() as u64) as u32
        };
        let workouts_last_7_days = history
            .iter()
            .filter(|w| within_window(w.completed_at, now))
            .count();

        Self {
            total_workouts,
            total_calories,
            average_duration_secs,
            workouts_last_7_days,
        }
    }
}

impl MeditationStats {
    pub fn compute(history: &[MeditationSession], now: DateTime<Utc>) -> Self {
        let scores: Vec<f64> = history.iter().filter_map(|s| s.focus_score).collect();
        let average_focus_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            total_sessions: history.len(),
            total_minutes: history.iter().map(MeditationSession::minutes).sum(),
            average_focus_score,
            sessions_last_7_days: history
                .iter()
                .filter(|s| within_window(s.completed_at, now))
                .count(),
        }
    }
}
