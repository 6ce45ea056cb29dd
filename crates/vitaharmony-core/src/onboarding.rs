//! First-run onboarding flow.
//!
//! Welcome → Personalization → AppTour → Account → QuickStart → Complete.
//! The flow builds a [`UserProfile`] in memory; nothing is persisted until
//! [`OnboardingFlow::finish`].

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::profile::store::{check_step, MEDITATION_DURATION_RANGE, WORKOUT_DURATION_RANGE};
use crate::profile::{FitnessGoal, FitnessLevel, ProfileStore, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OnboardingStep {
    Welcome,
    Personalization,
    AppTour,
    Account,
    QuickStart,
    Complete,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 6] = [
        OnboardingStep::Welcome,
        OnboardingStep::Personalization,
        OnboardingStep::AppTour,
        OnboardingStep::Account,
        OnboardingStep::QuickStart,
        OnboardingStep::Complete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OnboardingStep::Welcome => "welcome",
            OnboardingStep::Personalization => "personalization",
            OnboardingStep::AppTour => "app_tour",
            OnboardingStep::Account => "account",
            OnboardingStep::QuickStart => "quick_start",
            OnboardingStep::Complete => "complete",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL.get(self.index() + 1).copied().unwrap_or(self)
    }

    fn previous(self) -> Self {
        self.index()
            .checked_sub(1)
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(self)
    }
}

/// Answers collected on the personalization screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Personalization {
    pub goal: FitnessGoal,
    pub level: FitnessLevel,
    /// Minutes.
    pub workout_minutes: u32,
    /// Minutes.
    pub meditation_minutes: u32,
    pub age: Option<u32>,
}

impl Default for Personalization {
    fn default() -> Self {
        let profile = UserProfile::default();
        Self {
            goal: profile.fitness_goal,
            level: profile.fitness_level,
            workout_minutes: profile.preferred_workout_duration,
            meditation_minutes: profile.preferred_meditation_duration,
            age: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountChoice {
    Create { name: String, email: String },
    Guest,
}

#[derive(Debug, Clone)]
pub struct OnboardingFlow {
    step: OnboardingStep,
    profile: UserProfile,
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self {
            step: OnboardingStep::Welcome,
            profile: UserProfile::default(),
        }
    }

    pub fn step(&self) -> OnboardingStep {
        self.step
    }

    /// Profile as built so far.
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Fraction of the flow behind the user, 0 at Welcome and 1 at Complete.
    pub fn progress(&self) -> f64 {
        self.step.index() as f64 / (OnboardingStep::ALL.len() - 1) as f64
    }

    fn require_step(&self, expected: OnboardingStep) -> Result<(), ValidationError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(ValidationError::InvalidStep {
                expected: expected.as_str().into(),
                actual: self.step.as_str().into(),
            })
        }
    }

    /// Move past a screen that needs no input. Personalization keeps its
    /// defaults when advanced this way.
    pub fn advance(&mut self) -> Result<OnboardingStep, ValidationError> {
        match self.step {
            OnboardingStep::Welcome | OnboardingStep::Personalization | OnboardingStep::AppTour => {
                self.step = self.step.next();
                Ok(self.step)
            }
            OnboardingStep::Account => Err(ValidationError::MissingField("account choice".into())),
            other => Err(ValidationError::InvalidStep {
                expected: OnboardingStep::AppTour.as_str().into(),
                actual: other.as_str().into(),
            }),
        }
    }

    pub fn back(&mut self) -> Result<OnboardingStep, ValidationError> {
        if self.step == OnboardingStep::Complete {
            return Err(ValidationError::InvalidStep {
                expected: OnboardingStep::QuickStart.as_str().into(),
                actual: self.step.as_str().into(),
            });
        }
        self.step = self.step.previous();
        Ok(self.step)
    }

    pub fn personalize(&mut self, answers: Personalization) -> Result<OnboardingStep, ValidationError> {
        self.require_step(OnboardingStep::Personalization)?;
        check_step("preferred_workout_duration", answers.workout_minutes, WORKOUT_DURATION_RANGE)?;
        check_step(
            "preferred_meditation_duration",
            answers.meditation_minutes,
            MEDITATION_DURATION_RANGE,
        )?;

        self.profile.fitness_goal = answers.goal;
        self.profile.fitness_level = answers.level;
        self.profile.preferred_workout_duration = answers.workout_minutes;
        self.profile.preferred_meditation_duration = answers.meditation_minutes;
        self.profile.age = answers.age;
        self.step = self.step.next();
        Ok(self.step)
    }

    pub fn choose_account(&mut self, choice: AccountChoice) -> Result<OnboardingStep, ValidationError> {
        self.require_step(OnboardingStep::Account)?;
        match choice {
            AccountChoice::Create { name, email } => {
                let name = name.trim();
                let email = email.trim();
                if name.is_empty() {
                    return Err(ValidationError::MissingField("name".into()));
                }
                if email.is_empty() {
                    return Err(ValidationError::MissingField("email".into()));
                }
                self.profile.name = name.to_string();
                self.profile.email = email.to_string();
                self.profile.is_guest = false;
            }
            AccountChoice::Guest => {
                self.profile.name = "Guest".into();
                self.profile.email = String::new();
                self.profile.is_guest = true;
            }
        }
        self.step = self.step.next();
        Ok(self.step)
    }

    /// Persist the profile and mark onboarding done.
    pub fn finish(&mut self, store: &mut ProfileStore) -> Result<&UserProfile, ValidationError> {
        self.require_step(OnboardingStep::QuickStart)?;
        self.step = OnboardingStep::Complete;
        store.complete_onboarding(self.profile.clone());
        Ok(&self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn to_account(flow: &mut OnboardingFlow) {
        flow.advance().unwrap();
        flow.personalize(Personalization {
            goal: FitnessGoal::Endurance,
            level: FitnessLevel::Advanced,
            workout_minutes: 45,
            meditation_minutes: 15,
            age: Some(31),
        })
        .unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.step(), OnboardingStep::Account);
    }

    #[test]
    fn full_flow_persists_profile() {
        let mut store = ProfileStore::load(MemoryStore::shared());
        let mut flow = OnboardingFlow::new();
        to_account(&mut flow);
        flow.choose_account(AccountChoice::Create {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
        })
        .unwrap();
        assert_eq!(flow.step(), OnboardingStep::QuickStart);

        flow.finish(&mut store).unwrap();
        assert_eq!(flow.step(), OnboardingStep::Complete);
        assert_eq!(flow.progress(), 1.0);
        assert!(store.has_completed_onboarding());

        let profile = store.profile();
        assert_eq!(profile.name, "Ada");
        assert!(!profile.is_guest);
        assert_eq!(profile.fitness_level, FitnessLevel::Advanced);
        assert_eq!(profile.preferred_workout_duration, 45);
        assert_eq!(profile.age, Some(31));
    }

    #[test]
    fn guest_account() {
        let mut flow = OnboardingFlow::new();
        to_account(&mut flow);
        flow.choose_account(AccountChoice::Guest).unwrap();
        assert!(flow.profile().is_guest);
        assert_eq!(flow.profile().name, "Guest");
        assert!(flow.profile().email.is_empty());
    }

    #[test]
    fn account_requires_name_and_email() {
        let mut flow = OnboardingFlow::new();
        to_account(&mut flow);
        let err = flow
            .choose_account(AccountChoice::Create {
                name: "Ada".into(),
                email: "  ".into(),
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::MissingField("email".into()));
        assert_eq!(flow.step(), OnboardingStep::Account);
        assert!(flow.advance().is_err());
    }

    #[test]
    fn personalization_validates_durations() {
        let mut flow = OnboardingFlow::new();
        flow.advance().unwrap();
        let err = flow
            .personalize(Personalization {
                workout_minutes: 17,
                ..Personalization::default()
            })
            .unwrap_err();
        assert!(matches!(err, ValidationError::OutOfRange { .. }));
        assert_eq!(flow.step(), OnboardingStep::Personalization);
    }

    #[test]
    fn wrong_step_is_rejected() {
        let mut flow = OnboardingFlow::new();
        let err = flow.choose_account(AccountChoice::Guest).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidStep { .. }));
        let mut store = ProfileStore::load(MemoryStore::shared());
        assert!(flow.finish(&mut store).is_err());
        assert!(!store.has_completed_onboarding());
    }

    #[test]
    fn back_navigation() {
        let mut flow = OnboardingFlow::new();
        assert_eq!(flow.back().unwrap(), OnboardingStep::Welcome);
        flow.advance().unwrap();
        flow.advance().unwrap();
        assert_eq!(flow.back().unwrap(), OnboardingStep::Personalization);

        let mut store = ProfileStore::load(MemoryStore::shared());
        flow.advance().unwrap();
        flow.advance().unwrap();
        flow.choose_account(AccountChoice::Guest).unwrap();
        flow.finish(&mut store).unwrap();
        assert!(flow.back().is_err());
        assert_eq!(flow.step(), OnboardingStep::Complete);
    }
}
