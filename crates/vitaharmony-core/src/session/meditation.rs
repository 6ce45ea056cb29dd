//! Guided meditation player.
//!
//! Instructions are delivered through a cursor: each one exactly once, in
//! timestamp order, on the first tick whose elapsed time reaches it. The
//! focus score is the share of positive responses to interactive prompts.

use chrono::{DateTime, Utc};

use super::state::{
    progress, CompletedRecord, PlayerAction, PlayerState, SessionKind, SessionPlayer,
    SessionSnapshot,
};
use crate::content::{BreathingPhase, MeditationSession};
use crate::events::Event;
use crate::feedback;
use crate::storage::SessionConfig;

/// Shown until the first instruction is delivered.
pub const OPENING_LINE: &str = "Beginning your meditation session...";

struct ActiveMeditation {
    session: MeditationSession,
    started_at: DateTime<Utc>,
    elapsed: u32,
    /// Index of the next instruction to deliver.
    cursor: usize,
    current: Option<usize>,
    responses: Vec<bool>,
}

impl ActiveMeditation {
    fn progress(&self) -> f64 {
        progress(self.elapsed, self.session.duration)
    }

    fn focus_score(&self) -> f64 {
        focus_score(&self.responses)
    }
}

/// Fraction of `true` responses; 0 when there are none.
pub fn focus_score(responses: &[bool]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }
    let positive = responses.iter().filter(|r| **r).count();
    positive as f64 / responses.len() as f64
}

pub struct MeditationPlayer {
    config: SessionConfig,
    state: PlayerState,
    active: Option<ActiveMeditation>,
    message: Option<String>,
    phase: BreathingPhase,
    reset_in: u32,
    completed: Option<MeditationSession>,
}

impl MeditationPlayer {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            state: PlayerState::Idle,
            active: None,
            message: None,
            phase: BreathingPhase::Neutral,
            reset_in: 0,
            completed: None,
        }
    }

    pub fn breathing_phase(&self) -> BreathingPhase {
        self.phase
    }

    pub fn current_text(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.active.as_ref().map_or(0, |a| a.elapsed)
    }

    /// Number of instructions delivered so far.
    pub fn delivered(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.cursor)
    }

    pub fn focus_score(&self) -> Option<f64> {
        self.active.as_ref().map(ActiveMeditation::focus_score)
    }

    fn record(&mut self, success: bool) -> Vec<Event> {
        if !self.state.is_active() {
            return Vec::new();
        }
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        active.responses.push(success);
        tracing::debug!(success, responses = active.responses.len(), "interaction recorded");
        vec![Event::InteractionRecorded {
            success,
            responses: active.responses.len(),
            at: Utc::now(),
        }]
    }

    fn complete(&mut self, now: DateTime<Utc>, events: &mut Vec<Event>) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let focus = active.focus_score();
        let mut session = active.session.clone();
        session.completed_at = Some(now);
        session.focus_score = Some(focus);

        let message = feedback::meditation_completion_message(focus);
        let analysis = feedback::analyze_meditation(focus, session.duration);
        tracing::info!(
            title = %session.title,
            focus,
            elapsed = active.elapsed,
            started_at = %active.started_at,
            "meditation completed"
        );

        events.push(Event::SessionCompleted {
            kind: SessionKind::Meditation,
            title: session.title.clone(),
            score: focus,
            elapsed_secs: active.elapsed,
            duration_secs: session.duration,
            message: message.to_string(),
            analysis,
            at: now,
        });
        self.message = Some(message.to_string());
        self.completed = Some(session);
        self.state = PlayerState::Completed;
        self.reset_in = self.config.meditation_reset_delay_secs;
        if self.reset_in == 0 {
            self.reset(now, events);
        }
    }

    fn reset(&mut self, now: DateTime<Utc>, events: &mut Vec<Event>) {
        self.state = PlayerState::Idle;
        self.active = None;
        self.message = None;
        self.phase = BreathingPhase::Neutral;
        self.reset_in = 0;
        tracing::debug!("meditation player reset");
        events.push(Event::SessionReset { at: now });
    }
}

impl SessionPlayer for MeditationPlayer {
    type Item = MeditationSession;

    fn kind(&self) -> SessionKind {
        SessionKind::Meditation
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn start(&mut self, mut session: MeditationSession) -> Vec<Event> {
        let now = Utc::now();
        session.instructions.sort_by_key(|i| i.timestamp);
        session.completed_at = None;
        session.focus_score = None;
        tracing::debug!(
            title = %session.title,
            instructions = session.instructions.len(),
            duration = session.duration,
            "meditation started"
        );

        let events = vec![Event::SessionStarted {
            kind: SessionKind::Meditation,
            title: session.title.clone(),
            step_count: session.instructions.len(),
            total_secs: session.duration,
            at: now,
        }];
        self.active = Some(ActiveMeditation {
            session,
            started_at: now,
            elapsed: 0,
            cursor: 0,
            current: None,
            responses: Vec::new(),
        });
        self.state = PlayerState::Running;
        self.message = Some(OPENING_LINE.to_string());
        self.phase = BreathingPhase::Neutral;
        self.reset_in = 0;
        self.completed = None;
        events
    }

    fn pause(&mut self) -> Vec<Event> {
        if self.state != PlayerState::Running {
            return Vec::new();
        }
        self.state = PlayerState::Paused;
        tracing::debug!("meditation paused");
        vec![Event::SessionPaused {
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        }]
    }

    fn resume(&mut self) -> Vec<Event> {
        if self.state != PlayerState::Paused {
            return Vec::new();
        }
        self.state = PlayerState::Running;
        tracing::debug!("meditation resumed");
        vec![Event::SessionResumed {
            elapsed_secs: self.elapsed_secs(),
            at: Utc::now(),
        }]
    }

    fn cancel(&mut self) -> Vec<Event> {
        let now = Utc::now();
        match self.state {
            PlayerState::Running | PlayerState::Paused => {
                let elapsed_secs = self.elapsed_secs();
                self.state = PlayerState::Idle;
                self.active = None;
                self.message = None;
                self.phase = BreathingPhase::Neutral;
                tracing::debug!(elapsed_secs, "meditation cancelled");
                vec![Event::SessionCancelled {
                    kind: SessionKind::Meditation,
                    elapsed_secs,
                    at: now,
                }]
            }
            PlayerState::Completed => {
                let mut events = Vec::new();
                self.reset(now, &mut events);
                events
            }
            PlayerState::Idle => Vec::new(),
        }
    }

    fn act(&mut self, action: PlayerAction) -> Vec<Event> {
        match action {
            PlayerAction::Respond(success) => self.record(success),
            _ => Vec::new(),
        }
    }

    fn tick(&mut self) -> Vec<Event> {
        let now = Utc::now();
        let mut events = Vec::new();
        match self.state {
            PlayerState::Running => {}
            PlayerState::Completed => {
                self.reset_in = self.reset_in.saturating_sub(1);
                if self.reset_in == 0 {
                    self.reset(now, &mut events);
                }
                return events;
            }
            PlayerState::Idle | PlayerState::Paused => return events,
        }

        let guidance_interval = self.config.guidance_interval_secs;
        let Some(active) = self.active.as_mut() else {
            return events;
        };

        active.elapsed += 1;
        events.push(Event::Progress {
            elapsed_secs: active.elapsed,
            total_secs: active.session.duration,
            progress: active.progress(),
            at: now,
        });

        while let Some(instruction) = active.session.instructions.get(active.cursor) {
            if instruction.timestamp > active.elapsed {
                break;
            }
            let phase = instruction.breathing_phase();
            events.push(Event::InstructionDelivered {
                index: active.cursor,
                text: instruction.text.clone(),
                interactive: instruction.is_interactive,
                breathing_phase: phase,
                at: now,
            });
            self.message = Some(instruction.text.clone());
            self.phase = phase;
            active.current = Some(active.cursor);
            active.cursor += 1;
        }

        if guidance_interval > 0 && active.elapsed % guidance_interval == 0 {
            if let Some(guidance) = feedback::meditation_guidance(active.session.category, active.elapsed) {
                self.message = Some(guidance.to_string());
                events.push(Event::CoachMessage {
                    message: guidance.to_string(),
                    at: now,
                });
            }
        }

        if active.elapsed >= active.session.duration {
            self.complete(now, &mut events);
        }
        events
    }

    fn snapshot(&self) -> SessionSnapshot {
        let active = self.active.as_ref();
        SessionSnapshot {
            kind: SessionKind::Meditation,
            state: self.state,
            title: active.map(|a| a.session.title.clone()),
            step_index: active.and_then(|a| a.current).unwrap_or(0),
            step_count: active.map_or(0, |a| a.session.instructions.len()),
            current_step: active
                .and_then(|a| a.current.and_then(|i| a.session.instructions.get(i)))
                .map(|i| i.text.clone()),
            elapsed_secs: active.map_or(0, |a| a.elapsed),
            total_secs: active.map_or(0, |a| a.session.duration),
            progress: active.map_or(0.0, ActiveMeditation::progress),
            score: active.map(ActiveMeditation::focus_score),
            breathing_phase: self.phase,
            message: self.message.clone(),
        }
    }

    fn take_completed(&mut self) -> Option<CompletedRecord> {
        self.completed.take().map(CompletedRecord::Meditation)
    }
}
