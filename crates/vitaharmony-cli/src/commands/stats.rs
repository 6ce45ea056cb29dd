use chrono::Utc;
use vitaharmony_core::feedback;
use vitaharmony_core::profile::ProfileStore;
use vitaharmony_core::stats::{MeditationStats, WorkoutStats};
use vitaharmony_core::storage::HistoryStore;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let history = HistoryStore::new(super::open_store()?);
    let now = Utc::now();
    let workouts = history.workouts();

    let recent_performance = workouts.iter().rev().find_map(|w| w.performance);
    super::print_json(&serde_json::json!({
        "workouts": WorkoutStats::compute(&workouts, now),
        "meditation": MeditationStats::compute(&history.meditations(), now),
        "recommendation": recent_performance.map(feedback::next_workout_recommendation),
    }))
}

pub fn run_streak() -> Result<(), Box<dyn std::error::Error>> {
    let store = ProfileStore::load(super::open_store()?);
    let streak = store.profile().streak;
    super::print_json(&serde_json::json!({
        "streak": streak,
        "lastActivity": store.last_activity(),
        "message": feedback::streak_message(streak),
    }))
}
