use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::BreathingPhase;
use crate::gate::DisplayMode;
use crate::session::{SessionKind, SessionSnapshot};

/// Every state change in the system produces an Event.
/// Players return them from each operation; the driver broadcasts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SessionStarted {
        kind: SessionKind,
        title: String,
        step_count: usize,
        total_secs: u32,
        at: DateTime<Utc>,
    },
    SessionPaused {
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    SessionResumed {
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    /// Emitted on every tick while running.
    Progress {
        elapsed_secs: u32,
        total_secs: u32,
        progress: f64,
        at: DateTime<Utc>,
    },
    /// A workout exercise ran its full duration.
    StepAdvanced {
        from_step: usize,
        to_step: usize,
        /// Name of the new current exercise, `None` past the last one.
        next: Option<String>,
        at: DateTime<Utc>,
    },
    ExerciseSkipped {
        from_step: usize,
        to_step: usize,
        at: DateTime<Utc>,
    },
    PerformanceChanged {
        performance: f64,
        at: DateTime<Utc>,
    },
    InstructionDelivered {
        index: usize,
        text: String,
        interactive: bool,
        breathing_phase: BreathingPhase,
        at: DateTime<Utc>,
    },
    InteractionRecorded {
        success: bool,
        responses: usize,
        at: DateTime<Utc>,
    },
    CoachMessage {
        message: String,
        at: DateTime<Utc>,
    },
    SessionCompleted {
        kind: SessionKind,
        title: String,
        /// Performance (workout) or focus score (meditation), in [0,1].
        score: f64,
        elapsed_secs: u32,
        /// Nominal content duration in seconds.
        duration_secs: u32,
        message: String,
        analysis: String,
        at: DateTime<Utc>,
    },
    SessionCancelled {
        kind: SessionKind,
        elapsed_secs: u32,
        at: DateTime<Utc>,
    },
    /// Player returned to idle after the post-completion delay.
    SessionReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: SessionSnapshot,
        at: DateTime<Utc>,
    },
    StreakUpdated {
        streak: u32,
        message: String,
        at: DateTime<Utc>,
    },
    DisplayModeResolved {
        mode: DisplayMode,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Per-tick noise that front-ends usually skip when logging.
    pub fn is_progress(&self) -> bool {
        matches!(self, Event::Progress { .. })
    }
}
