//! Workout session player.
//!
//! One tick is one second of session time. The current exercise advances
//! once it has been current for its full duration; skipped exercises are
//! not marked completed and cost performance.

use chrono::{DateTime, Utc};

use super::state::{
    clamp_unit, progress, CompletedRecord, PlayerAction, PlayerState, SessionKind,
    SessionPlayer, SessionSnapshot,
};
use crate::content::catalog::calculate_calories;
use crate::content::{BreathingPhase, Workout};
use crate::events::Event;
use crate::feedback;
use crate::storage::SessionConfig;

struct ActiveWorkout {
    workout: Workout,
    started_at: DateTime<Utc>,
    step: usize,
    elapsed: u32,
    /// Seconds the current exercise has been current.
    step_elapsed: u32,
    performance: f64,
}

impl ActiveWorkout {
    fn total(&self) -> u32 {
        self.workout.exercise_duration()
    }

    fn progress(&self) -> f64 {
        progress(self.elapsed, self.total())
    }

    fn is_done(&self) -> bool {
        self.step >= self.workout.exercises.len()
    }

    fn current_name(&self) -> Option<String> {
        self.workout.exercises.get(self.step).map(|e| e.name.clone())
    }
}

pub struct WorkoutPlayer {
    config: SessionConfig,
    weight_kg: Option<f64>,
    state: PlayerState,
    active: Option<ActiveWorkout>,
    coach_message: Option<String>,
    reset_in: u32,
    completed: Option<Workout>,
}

impl WorkoutPlayer {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            weight_kg: None,
            state: PlayerState::Idle,
            active: None,
            coach_message: None,
            reset_in: 0,
            completed: None,
        }
    }

    /// Body weight used for the calorie estimate on completion.
    pub fn with_weight(mut self, weight_kg: Option<f64>) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn performance(&self) -> Option<f64> {
        self.active.as_ref().map(|a| a.performance)
    }

    pub fn step_index(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.step)
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.active.as_ref().map_or(0, |a| a.elapsed)
    }

    pub fn coach_message(&self) -> Option<&str> {
        self.coach_message.as_deref()
    }

    fn coach(&mut self, message: &str, now: DateTime<Utc>, events: &mut Vec<Event>) {
        self.coach_message = Some(message.to_string());
        events.push(Event::CoachMessage {
            message: message.to_string(),
            at: now,
        });
    }

    fn adjust_performance(&mut self, delta: f64, now: DateTime<Utc>) -> Vec<Event> {
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        active.performance = clamp_unit(active.performance + delta);
        tracing::debug!(performance = active.performance, "performance adjusted");
        vec![Event::PerformanceChanged {
            performance: active.performance,
            at: now,
        }]
    }

    /// Coach line after moving to a new exercise.
    fn announce_next(&mut self, now: DateTime<Utc>, events: &mut Vec<Event>) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let rests = active
            .workout
            .exercises
            .get(active.step)
            .and_then(|e| e.rest_time)
            .is_some_and(|r| r > 0);
        let message = if rests {
            feedback::rest_message()
        } else {
            feedback::workout_encouragement(active.progress())
        };
        self.coach(message, now, events);
    }

    fn skip(&mut self, now: DateTime<Utc>) -> Vec<Event> {
        if !self.state.is_active() {
            return Vec::new();
        }
        let penalty = self.config.skip_penalty;
        let Some(active) = self.active.as_mut() else {
            return Vec::new();
        };
        if active.is_done() {
            return Vec::new();
        }

        let from = active.step;
        active.step += 1;
        active.step_elapsed = 0;
        tracing::debug!(from, to = active.step, "exercise skipped");

        let mut events = vec![Event::ExerciseSkipped {
            from_step: from,
            to_step: from + 1,
            at: now,
        }];
        events.extend(self.adjust_performance(-penalty, now));

        if self.active.as_ref().is_some_and(ActiveWorkout::is_done) {
            self.complete(now, &mut events);
        } else {
            self.announce_next(now, &mut events);
        }
        events
    }

    fn complete(&mut self, now: DateTime<Utc>, events: &mut Vec<Event>) {
        let Some(active) = self.active.as_ref() else {
            return;
        };
        let performance = active.performance;
        let mut workout = active.workout.clone();
        workout.completed_at = Some(now);
        workout.performance = Some(performance);
        workout.calories_burned = calculate_calories(active.elapsed, self.weight_kg, performance);

        let message = feedback::workout_completion_message(performance);
        let analysis = feedback::analyze_workout(
            workout.completed_exercises(),
            workout.exercises.len(),
            performance,
        );
        tracing::info!(
            name = %workout.name,
            performance,
            elapsed = active.elapsed,
            calories = workout.calories_burned,
            started_at = %active.started_at,
            "workout completed"
        );

        events.push(Event::SessionCompleted {
            kind: SessionKind::Workout,
            title: workout.name.clone(),
            score: performance,
            elapsed_secs: active.elapsed,
            duration_secs: workout.duration,
            message: message.to_string(),
            analysis,
            at: now,
        });
        self.coach_message = Some(message.to_string());
        self.completed = Some(workout);
        self.state = PlayerState::Completed;
        self.reset_in = self.config.workout_reset_delay_secs;
        if self.reset_in == 0 {
            self.reset(now, events);
        }
    }

    fn reset(&mut self, now: DateTime<Utc>, events: &mut Vec<Event>) {
        self.state = PlayerState::Idle;
        self.active = None;
        self.coach_message = None;
        self.reset_in = 0;
        tracing::debug!("workout player reset");
        events.push(Event::SessionReset { at: now });
    }
}

impl SessionPlayer for WorkoutPlayer {
    type Item = Workout;

    fn kind(&self) -> SessionKind {
        SessionKind::Workout
    }

    fn state(&self) -> PlayerState {
        self.state
    }

    fn start(&mut self, mut workout: Workout) -> Vec<Event> {
        let now = Utc::now();
        for exercise in &mut workout.exercises {
            exercise.is_completed = false;
        }
        workout.completed_at = None;
        workout.performance = None;

        let step_count = workout.exercises.len();
        let total_secs = workout.exercise_duration();
        tracing::debug!(name = %workout.name, step_count, total_secs, "workout started");

        let mut events = vec![Event::SessionStarted {
            kind: SessionKind::Workout,
            title: workout.name.clone(),
            step_count,
            total_secs,
            at: now,
        }];
        self.active = Some(ActiveWorkout {
            workout,
            started_at: now,
            step: 0,
            elapsed: 0,
            step_elapsed: 0,
            performance: clamp_unit(self.config.initial_performance),
        });
        self.state = PlayerState::Running;
        self.reset_in = 0;
        self.completed = None;
        self.coach(feedback::workout_encouragement(0.0), now, &mut events);
        events
    }

    fn pause(&mut self) -> Vec<Event> {
        if self.state != PlayerState::Running {
            return Vec::new();
        }
        self.state = PlayerState::Paused;
        tracing::debug!("workout paused");
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
        tracing::debug!("workout resumed");
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
                self.coach_message = None;
                tracing::debug!(elapsed_secs, "workout cancelled");
                vec![Event::SessionCancelled {
                    kind: SessionKind::Workout,
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
        let now = Utc::now();
        match action {
            PlayerAction::Skip => self.skip(now),
            PlayerAction::GoodForm if self.state.is_active() => {
                self.adjust_performance(self.config.performance_step, now)
            }
            PlayerAction::PoorForm if self.state.is_active() => {
                self.adjust_performance(-self.config.performance_step, now)
            }
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

        let coach_interval = self.config.coach_interval_secs;
        let Some(active) = self.active.as_mut() else {
            return events;
        };

        active.elapsed += 1;
        active.step_elapsed += 1;
        events.push(Event::Progress {
            elapsed_secs: active.elapsed,
            total_secs: active.total(),
            progress: active.progress(),
            at: now,
        });

        let mut advanced = false;
        while let Some(exercise) = active.workout.exercises.get_mut(active.step) {
            if active.step_elapsed < exercise.duration {
                break;
            }
            exercise.is_completed = true;
            let from = active.step;
            active.step += 1;
            // Time past a zero-length exercise belongs to the next one.
            active.step_elapsed -= exercise.duration;
            advanced = true;
            events.push(Event::StepAdvanced {
                from_step: from,
                to_step: active.step,
                next: active.current_name(),
                at: now,
            });
        }

        let done = active.is_done();
        let elapsed = active.elapsed;
        let progress = active.progress();

        if done {
            self.complete(now, &mut events);
        } else if advanced {
            self.announce_next(now, &mut events);
        } else if coach_interval > 0 && elapsed % coach_interval == 0 {
            self.coach(feedback::workout_encouragement(progress), now, &mut events);
        }
        events
    }

    fn snapshot(&self) -> SessionSnapshot {
        let active = self.active.as_ref();
        SessionSnapshot {
            kind: SessionKind::Workout,
            state: self.state,
            title: active.map(|a| a.workout.name.clone()),
            step_index: active.map_or(0, |a| a.step),
            step_count: active.map_or(0, |a| a.workout.exercises.len()),
            current_step: active.and_then(ActiveWorkout::current_name),
            elapsed_secs: active.map_or(0, |a| a.elapsed),
            total_secs: active.map_or(0, ActiveWorkout::total),
            progress: active.map_or(0.0, ActiveWorkout::progress),
            score: active.map(|a| a.performance),
            breathing_phase: BreathingPhase::Neutral,
            message: self.coach_message.clone(),
        }
    }

    fn take_completed(&mut self) -> Option<CompletedRecord> {
        self.completed.take().map(CompletedRecord::Workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Exercise, WorkoutCategory};
    use crate::profile::FitnessLevel;

    fn workout(durations: &[u32]) -> Workout {
        Workout {
            id: uuid::Uuid::new_v4(),
            name: "Test".into(),
            description: String::new(),
            duration: durations.iter().sum(),
            difficulty: FitnessLevel::Beginner,
            category: WorkoutCategory::Hiit,
            exercises: durations
                .iter()
                .enumerate()
                .map(|(i, d)| Exercise::new(&format!("Ex{i}"), "", *d))
                .collect(),
            calories_burned: 0,
            completed_at: None,
            rating: None,
            performance: None,
        }
    }

    fn player() -> WorkoutPlayer {
        WorkoutPlayer::new(SessionConfig::default())
    }

    fn run(p: &mut WorkoutPlayer, ticks: u32) -> Vec<Event> {
        (0..ticks).flat_map(|_| p.tick()).collect()
    }

    #[test]
    fn start_resets_state() {
        let mut p = player();
        let mut w = workout(&[3, 3]);
        w.exercises[0].is_completed = true;
        let events = p.start(w);
        assert!(matches!(events[0], Event::SessionStarted { step_count: 2, total_secs: 6, .. }));
        assert_eq!(p.state(), PlayerState::Running);
        assert_eq!(p.performance(), Some(0.75));
        assert_eq!(p.step_index(), 0);
        assert_eq!(p.snapshot().progress, 0.0);
    }

    #[test]
    fn advances_after_each_exercise_and_completes() {
        let mut p = player();
        p.start(workout(&[3, 2]));

        run(&mut p, 2);
        assert_eq!(p.step_index(), 0);
        let events = p.tick();
        assert!(events
            .iter()
            .any(|e| matches!(e, Event::StepAdvanced { from_step: 0, to_step: 1, .. })));
        assert_eq!(p.step_index(), 1);

        let events = run(&mut p, 2);
        assert_eq!(p.state(), PlayerState::Completed);
        let score = events.iter().find_map(|e| match e {
            Event::SessionCompleted { score, .. } => Some(*score),
            _ => None,
        });
        assert_eq!(score, Some(0.75));

        let Some(CompletedRecord::Workout(done)) = p.take_completed() else {
            panic!("expected a completed workout");
        };
        assert_eq!(done.completed_exercises(), 2);
        assert_eq!(done.performance, Some(0.75));
        assert!(done.completed_at.is_some());
        assert!(p.take_completed().is_none());
    }

    #[test]
    fn returns_to_idle_after_reset_delay() {
        let mut p = player();
        p.start(workout(&[1]));
        p.tick();
        assert_eq!(p.state(), PlayerState::Completed);
        assert!(p.tick().is_empty());
        assert_eq!(p.state(), PlayerState::Completed);
        let events = p.tick();
        assert!(matches!(events[..], [Event::SessionReset { .. }]));
        assert_eq!(p.state(), PlayerState::Idle);
    }

    #[test]
    fn pause_freezes_elapsed() {
        let mut p = player();
        p.start(workout(&[10]));
        run(&mut p, 3);
        assert_eq!(p.pause().len(), 1);
        assert!(p.pause().is_empty());
        assert!(run(&mut p, 5).is_empty());
        assert_eq!(p.elapsed_secs(), 3);
        p.resume();
        p.tick();
        assert_eq!(p.elapsed_secs(), 4);
    }

    #[test]
    fn skip_advances_once_and_costs_performance() {
        let mut p = player();
        p.start(workout(&[10, 10, 10]));
        p.act(PlayerAction::Skip);
        assert_eq!(p.step_index(), 1);
        assert!((p.performance().unwrap() - 0.65).abs() < 1e-9);

        let snapshot = p.snapshot();
        assert_eq!(snapshot.current_step.as_deref(), Some("Ex1"));

        p.act(PlayerAction::Skip);
        let events = p.act(PlayerAction::Skip);
        assert_eq!(p.state(), PlayerState::Completed);
        assert!(events.iter().any(|e| matches!(e, Event::SessionCompleted { .. })));

        let Some(CompletedRecord::Workout(done)) = p.take_completed() else {
            panic!("expected a completed workout");
        };
        assert_eq!(done.completed_exercises(), 0);
        assert!((done.performance.unwrap() - 0.45).abs() < 1e-9);
    }

    #[test]
    fn form_feedback_is_clamped() {
        let mut p = player();
        p.start(workout(&[60]));
        for _ in 0..10 {
            p.act(PlayerAction::GoodForm);
        }
        assert_eq!(p.performance(), Some(1.0));
        for _ in 0..30 {
            p.act(PlayerAction::PoorForm);
        }
        assert_eq!(p.performance(), Some(0.0));
        assert!(p.act(PlayerAction::Respond(true)).is_empty());
    }

    #[test]
    fn zero_length_exercises_pass_through() {
        let mut p = player();
        p.start(workout(&[0, 2, 0]));
        p.tick();
        assert_eq!(p.step_index(), 1);
        p.tick();
        assert_eq!(p.state(), PlayerState::Completed);
    }

    #[test]
    fn empty_workout_completes_on_first_tick() {
        let mut p = player();
        p.start(workout(&[]));
        assert_eq!(p.snapshot().progress, 1.0);
        let events = p.tick();
        assert!(events.iter().any(|e| matches!(e, Event::SessionCompleted { .. })));
    }

    #[test]
    fn rest_message_before_resting_exercise() {
        let mut p = player();
        let mut w = workout(&[1, 5]);
        w.exercises[1].rest_time = Some(30);
        p.start(w);
        p.tick();
        assert_eq!(p.coach_message(), Some(feedback::rest_message()));
    }

    #[test]
    fn coach_speaks_every_interval() {
        let mut p = player();
        p.start(workout(&[100]));
        let events = run(&mut p, 30);
        let coach = events
            .iter()
            .filter(|e| matches!(e, Event::CoachMessage { .. }))
            .count();
        assert_eq!(coach, 2);
    }

    #[test]
    fn cancel_discards_without_record() {
        let mut p = player();
        p.start(workout(&[5]));
        p.tick();
        let events = p.cancel();
        assert!(matches!(events[..], [Event::SessionCancelled { elapsed_secs: 1, .. }]));
        assert_eq!(p.state(), PlayerState::Idle);
        assert!(p.take_completed().is_none());
        assert!(p.cancel().is_empty());
    }
}
