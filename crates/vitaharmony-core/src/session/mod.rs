pub mod driver;
pub mod meditation;
mod state;
pub mod workout;

pub use driver::{SessionDriver, SessionHandle};
pub use meditation::{focus_score, MeditationPlayer};
pub use state::{
    progress, CompletedRecord, PlayerAction, PlayerState, SessionKind, SessionPlayer,
    SessionSnapshot,
};
pub use workout::WorkoutPlayer;
