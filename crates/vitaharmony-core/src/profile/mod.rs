pub mod settings;
pub mod store;
pub mod streak;
mod types;

pub use settings::{AppSettings, Toggle};
pub use store::{ProfileStore, ProfileUpdate};
pub use streak::{local_today, next_streak, StreakChange, StreakUpdate};
pub use types::{FitnessGoal, FitnessLevel, UserProfile};
