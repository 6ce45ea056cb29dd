use serde::{Deserialize, Serialize};

use crate::content::{BreathingPhase, MeditationSession, Workout};
use crate::events::Event;

/// Player lifecycle.
///
/// ```text
/// Idle -> Running <-> Paused -> Completed -> Idle
///            \__________\_____ cancel ____/
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerState {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

impl PlayerState {
    /// A session exists and has not finished.
    pub fn is_active(self) -> bool {
        matches!(self, PlayerState::Running | PlayerState::Paused)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionKind {
    Workout,
    Meditation,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Workout => "workout",
            SessionKind::Meditation => "meditation",
        }
    }
}

/// User input during a running session. Actions that do not apply to a
/// player's kind are ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlayerAction {
    /// Workout: abandon the current exercise.
    Skip,
    /// Workout: the user reports good form.
    GoodForm,
    /// Workout: the user reports struggling.
    PoorForm,
    /// Meditation: response to an interactive prompt.
    Respond(bool),
}

/// A finished session, ready to be appended to history.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletedRecord {
    Workout(Workout),
    Meditation(MeditationSession),
}

/// Point-in-time view of a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub kind: SessionKind,
    pub state: PlayerState,
    pub title: Option<String>,
    pub step_index: usize,
    pub step_count: usize,
    pub current_step: Option<String>,
    pub elapsed_secs: u32,
    pub total_secs: u32,
    pub progress: f64,
    /// Performance (workout) or running focus score (meditation).
    pub score: Option<f64>,
    pub breathing_phase: BreathingPhase,
    pub message: Option<String>,
}

/// A session state machine advanced one second per [`tick`](Self::tick).
///
/// Every operation returns the events it caused, in order. Operations that
/// are not valid in the current state return no events.
pub trait SessionPlayer: Send + 'static {
    /// Content the player runs.
    type Item: Send + 'static;

    fn kind(&self) -> SessionKind;
    fn state(&self) -> PlayerState;

    /// Begin a new session, replacing any current one.
    fn start(&mut self, item: Self::Item) -> Vec<Event>;
    fn pause(&mut self) -> Vec<Event>;
    fn resume(&mut self) -> Vec<Event>;
    fn cancel(&mut self) -> Vec<Event>;
    fn act(&mut self, action: PlayerAction) -> Vec<Event>;
    fn tick(&mut self) -> Vec<Event>;
    fn snapshot(&self) -> SessionSnapshot;

    /// The record produced by the last completion, once.
    fn take_completed(&mut self) -> Option<CompletedRecord>;
}

/// `elapsed / total` clamped to [0,1]. An empty session is complete.
pub fn progress(elapsed: u32, total: u32) -> f64 {
    if total == 0 {
        return 1.0;
    }
    (f64::from(elapsed) / f64::from(total)).clamp(0.0, 1.0)
}

pub(crate) fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(0, 0), 1.0);
        assert_eq!(progress(5, 10), 0.5);
        assert_eq!(progress(15, 10), 1.0);
    }

    #[test]
    fn active_states() {
        assert!(PlayerState::Running.is_active());
        assert!(PlayerState::Paused.is_active());
        assert!(!PlayerState::Completed.is_active());
        assert!(!PlayerState::Idle.is_active());
    }
}
