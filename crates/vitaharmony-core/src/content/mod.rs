pub mod catalog;
pub mod meditation;
pub mod workout;

pub use meditation::{
    BackgroundSound, BreathingPhase, InteractionType, MeditationCategory, MeditationDifficulty,
    MeditationInstruction, MeditationSession,
};
pub use workout::{Exercise, Workout, WorkoutCategory};
