//! Owner of the user profile and device settings.
//!
//! Every mutation is written through to the key-value store immediately.
//! Writes are best-effort: a failing store logs a warning and the in-memory
//! copy stays authoritative for the rest of the process.

use chrono::{NaiveDate, NaiveTime};

use super::settings::{AppSettings, Toggle};
use super::streak::{next_streak, StreakUpdate};
use super::types::{FitnessGoal, FitnessLevel, UserProfile};
use crate::error::ValidationError;
use crate::storage::kv::{self, keys, SharedStore};

/// Accepted preferred workout lengths, in minutes.
pub const WORKOUT_DURATION_RANGE: (u32, u32, u32) = (15, 60, 5);
/// Accepted preferred meditation lengths, in minutes.
pub const MEDITATION_DURATION_RANGE: (u32, u32, u32) = (5, 30, 5);

/// Partial profile edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub fitness_goal: Option<FitnessGoal>,
    pub fitness_level: Option<FitnessLevel>,
    pub age: Option<u32>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

pub struct ProfileStore {
    store: SharedStore,
    profile: UserProfile,
    settings: AppSettings,
}

impl ProfileStore {
    /// Load profile and settings, falling back to a guest profile and
    /// default settings when records are missing or corrupt.
    pub fn load(store: SharedStore) -> Self {
        let profile = kv::load(store.as_ref(), keys::USER_PROFILE).unwrap_or_else(UserProfile::guest);
        let settings = kv::load_or_default(store.as_ref(), keys::SETTINGS);
        Self {
            store,
            profile,
            settings,
        }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    // ── Onboarding ───────────────────────────────────────────────────

    pub fn has_completed_onboarding(&self) -> bool {
        kv::load(self.store.as_ref(), keys::HAS_COMPLETED_ONBOARDING).unwrap_or(false)
    }

    /// Replace the profile with the one built during onboarding and mark
    /// onboarding as done.
    pub fn complete_onboarding(&mut self, profile: UserProfile) {
        self.profile = profile;
        self.save_profile();
        kv::save_best_effort(self.store.as_ref(), keys::HAS_COMPLETED_ONBOARDING, &true);
        tracing::info!(guest = self.profile.is_guest, "onboarding completed");
    }

    // ── Profile edits ────────────────────────────────────────────────

    /// Apply the provided fields and persist.
    pub fn update(&mut self, update: ProfileUpdate) -> Result<&UserProfile, ValidationError> {
        if let Some(weight) = update.weight {
            ensure_positive("weight", weight)?;
        }
        if let Some(height) = update.height {
            ensure_positive("height", height)?;
        }

        let p = &mut self.profile;
        if let Some(name) = update.name {
            p.name = name;
        }
        if let Some(email) = update.email {
            p.email = email;
        }
        if let Some(goal) = update.fitness_goal {
            p.fitness_goal = goal;
        }
        if let Some(level) = update.fitness_level {
            p.fitness_level = level;
        }
        if update.age.is_some() {
            p.age = update.age;
        }
        if update.weight.is_some() {
            p.weight = update.weight;
        }
        if update.height.is_some() {
            p.height = update.height;
        }
        self.save_profile();
        Ok(&self.profile)
    }

    pub fn set_workout_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        check_step("preferred_workout_duration", minutes, WORKOUT_DURATION_RANGE)?;
        self.profile.preferred_workout_duration = minutes;
        self.save_profile();
        Ok(())
    }

    pub fn set_meditation_duration(&mut self, minutes: u32) -> Result<(), ValidationError> {
        check_step("preferred_meditation_duration", minutes, MEDITATION_DURATION_RANGE)?;
        self.profile.preferred_meditation_duration = minutes;
        self.save_profile();
        Ok(())
    }

    // ── Activity ─────────────────────────────────────────────────────

    pub fn record_workout(&mut self, today: NaiveDate) -> StreakUpdate {
        self.profile.total_workouts = self.profile.total_workouts.saturating_add(1);
        self.bump_streak(today)
    }

    pub fn record_meditation(&mut self, minutes: u32, today: NaiveDate) -> StreakUpdate {
        self.profile.total_meditation_minutes =
            self.profile.total_meditation_minutes.saturating_add(minutes);
        self.bump_streak(today)
    }

    /// Day of the most recent recorded activity.
    pub fn last_activity(&self) -> Option<NaiveDate> {
        kv::load(self.store.as_ref(), keys::LAST_WORKOUT_DATE)
    }

    fn bump_streak(&mut self, today: NaiveDate) -> StreakUpdate {
        let update = next_streak(self.profile.streak, self.last_activity(), today);
        tracing::debug!(
            from = self.profile.streak,
            to = update.streak,
            change = ?update.change,
            "streak updated"
        );
        self.profile.streak = update.streak;
        kv::save_best_effort(self.store.as_ref(), keys::LAST_WORKOUT_DATE, &update.last_activity);
        self.save_profile();
        update
    }

    // ── Settings ─────────────────────────────────────────────────────

    pub fn toggle(&mut self, which: Toggle) -> bool {
        let value = self.settings.toggle(which);
        self.save_settings();
        value
    }

    pub fn set_reminder_time(&mut self, time: NaiveTime) {
        self.settings.reminder_time = time;
        self.save_settings();
    }

    // ── Account ──────────────────────────────────────────────────────

    /// Switch to a fresh guest profile. History and settings are kept.
    pub fn logout(&mut self) {
        self.profile = UserProfile::guest();
        self.save_profile();
        kv::save_best_effort(self.store.as_ref(), keys::HAS_COMPLETED_ONBOARDING, &false);
        tracing::info!("logged out");
    }

    /// Wipe every stored record and start over as a guest.
    pub fn delete_account(&mut self) {
        for key in keys::ALL {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to remove record");
            }
        }
        self.profile = UserProfile::guest();
        self.settings = AppSettings::default();
        kv::save_best_effort(self.store.as_ref(), keys::HAS_COMPLETED_ONBOARDING, &false);
        tracing::info!("account data deleted");
    }

    fn save_profile(&self) {
        kv::save_best_effort(self.store.as_ref(), keys::USER_PROFILE, &self.profile);
    }

    fn save_settings(&self) {
        kv::save_best_effort(self.store.as_ref(), keys::SETTINGS, &self.settings);
    }
}

/// Validate `value` against an inclusive `(min, max, step)` range.
pub fn check_step(field: &str, value: u32, (min, max, step): (u32, u32, u32)) -> Result<(), ValidationError> {
    if value < min || value > max || (value - min) % step != 0 {
        return Err(ValidationError::OutOfRange {
            field: field.into(),
            value,
            min,
            max,
            step,
        });
    }
    Ok(())
}

fn ensure_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidValue {
            field: field.into(),
            message: format!("must be a positive number, got {value}"),
        })
    }
}
