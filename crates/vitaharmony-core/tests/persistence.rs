//! Profile, settings and history persistence through the SQLite store.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use tempfile::TempDir;
use vitaharmony_core::content::catalog;
use vitaharmony_core::onboarding::{AccountChoice, OnboardingFlow, Personalization};
use vitaharmony_core::profile::{FitnessLevel, ProfileStore, ProfileUpdate, StreakChange, Toggle};
use vitaharmony_core::stats::{MeditationStats, WorkoutStats};
use vitaharmony_core::storage::{keys, Database, HistoryStore, KvStore, SharedStore};

fn open(dir: &TempDir) -> SharedStore {
    Arc::new(Database::open_at(&dir.path().join("vitaharmony.db")).unwrap())
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
}

#[test]
fn onboarding_survives_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = ProfileStore::load(open(&dir));
        assert!(!store.has_completed_onboarding());

        let mut flow = OnboardingFlow::new();
        flow.advance().unwrap();
        flow.personalize(Personalization {
            level: FitnessLevel::Intermediate,
            workout_minutes: 20,
            ..Personalization::default()
        })
        .unwrap();
        flow.advance().unwrap();
        flow.choose_account(AccountChoice::Create {
            name: "Sam".into(),
            email: "sam@example.com".into(),
        })
        .unwrap();
        flow.finish(&mut store).unwrap();
    }

    let store = ProfileStore::load(open(&dir));
    assert!(store.has_completed_onboarding());
    assert_eq!(store.profile().name, "Sam");
    assert_eq!(store.profile().fitness_level, FitnessLevel::Intermediate);
    assert_eq!(store.profile().preferred_workout_duration, 20);
}

#[test]
fn streak_and_settings_persist() {
    let dir = TempDir::new().unwrap();
    {
        let mut store = ProfileStore::load(open(&dir));
        assert_eq!(store.record_workout(day(1)).streak, 1);
        assert_eq!(store.record_meditation(10, day(2)).change, StreakChange::Extended);
        assert!(!store.toggle(Toggle::Sound));
        store.set_reminder_time(NaiveTime::from_hms_opt(7, 30, 0).unwrap());
    }

    let raw = open(&dir).get(keys::LAST_WORKOUT_DATE).unwrap();
    assert_eq!(raw.as_deref(), Some("\"2024-03-02\""));

    let mut store = ProfileStore::load(open(&dir));
    assert_eq!(store.profile().streak, 2);
    assert_eq!(store.profile().total_workouts, 1);
    assert_eq!(store.profile().total_meditation_minutes, 10);
    assert!(!store.settings().sound_enabled);
    assert_eq!(store.settings().reminder_time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());

    // Missing a day resets to one.
    let update = store.record_workout(day(5));
    assert_eq!(update.streak, 1);
    assert_eq!(update.change, StreakChange::Reset);
}

#[test]
fn corrupt_records_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);
    db.set(keys::USER_PROFILE, "{not json").unwrap();
    db.set(keys::SETTINGS, "42").unwrap();
    db.set(keys::WORKOUT_HISTORY, "[{\"oops\":true}]").unwrap();

    let store = ProfileStore::load(db.clone());
    assert!(store.profile().is_guest);
    assert!(store.settings().notifications_enabled);
    assert!(HistoryStore::new(db).workouts().is_empty());
}

#[test]
fn history_feeds_stats() {
    let dir = TempDir::new().unwrap();
    let history = HistoryStore::new(open(&dir));

    let mut workout = catalog::generate_workouts(&Default::default()).remove(0);
    workout.completed_at = Some(Utc::now());
    workout.calories_burned = 150;
    history.append_workout(workout.clone());
    history.append_workout(workout);

    let mut session = catalog::all_meditation_sessions().remove(0);
    session.completed_at = Some(Utc::now());
    session.focus_score = Some(0.8);
    history.append_meditation(session);

    let reopened = HistoryStore::new(open(&dir));
    let w = WorkoutStats::compute(&reopened.workouts(), Utc::now());
    assert_eq!(w.total_workouts, 2);
    assert_eq!(w.total_calories, 300);
    assert_eq!(w.workouts_last_7_days, 2);

    let m = MeditationStats::compute(&reopened.meditations(), Utc::now());
    assert_eq!(m.total_sessions, 1);
    assert_eq!(m.total_minutes, 10);
    assert!((m.average_focus_score - 0.8).abs() < 1e-9);
}

#[test]
fn logout_and_delete_account() {
    let dir = TempDir::new().unwrap();
    let db = open(&dir);
    let mut store = ProfileStore::load(db.clone());
    store.complete_onboarding(Default::default());
    store
        .update(ProfileUpdate {
            name: Some("Kai".into()),
            weight: Some(70.0),
            ..ProfileUpdate::default()
        })
        .unwrap();
    HistoryStore::new(db.clone()).append_workout(catalog::generate_workouts(&Default::default()).remove(0));

    store.logout();
    assert!(store.profile().is_guest);
    assert!(!store.has_completed_onboarding());
    assert_eq!(HistoryStore::new(db.clone()).workouts().len(), 1);

    store.delete_account();
    assert!(HistoryStore::new(db.clone()).workouts().is_empty());
    assert_eq!(db.get(keys::USER_PROFILE).unwrap(), None);
    assert!(!ProfileStore::load(db).has_completed_onboarding());
}
