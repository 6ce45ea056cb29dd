//! # VitaHarmony Core Library
//!
//! Core logic for the VitaHarmony fitness and meditation companion. Every
//! operation is available through the `vitaharmony` terminal front-end, which
//! is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Content**: static workout and meditation catalogs, filtered and
//!   adapted to the user's profile
//! - **Session players**: tick-driven state machines for workout and
//!   meditation playback, each owned by a single tokio driver task
//! - **Profile**: user profile, settings, streak tracking and onboarding
//! - **Storage**: JSON records in a key-value store backed by SQLite, plus
//!   TOML configuration
//! - **Gate**: one best-effort HTTP check deciding native app or web view
//!
//! ## Key Components
//!
//! - [`WorkoutPlayer`] and [`MeditationPlayer`]: session state machines
//! - [`SessionDriver`]: owns a player and ticks it once per second
//! - [`ProfileStore`]: profile, settings and streak persistence
//! - [`Database`]: SQLite key-value backend
//! - [`Config`]: application configuration

pub mod content;
pub mod error;
pub mod events;
pub mod feedback;
pub mod gate;
pub mod onboarding;
pub mod profile;
pub mod session;
pub mod stats;
pub mod storage;

pub use content::{MeditationSession, Workout};
pub use error::{ConfigError, CoreError, GateError, StorageError, ValidationError};
pub use events::Event;
pub use gate::DisplayMode;
pub use onboarding::{OnboardingFlow, OnboardingStep};
pub use profile::{AppSettings, ProfileStore, UserProfile};
pub use session::{
    MeditationPlayer, PlayerAction, PlayerState, SessionDriver, SessionHandle, SessionPlayer,
    WorkoutPlayer,
};
pub use stats::{MeditationStats, WorkoutStats};
pub use storage::{Config, Database, HistoryStore};
