//! Completed workout and meditation records.
//!
//! Each history is one JSON array under its own key. Appends rewrite the
//! whole array; histories are small (one entry per finished session).

use crate::content::{MeditationSession, Workout};

use super::kv::{self, keys, SharedStore};

#[derive(Clone)]
pub struct HistoryStore {
    store: SharedStore,
}

impl HistoryStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Completed workouts, oldest first.
    pub fn workouts(&self) -> Vec<Workout> {
        kv::load_or_default(self.store.as_ref(), keys::WORKOUT_HISTORY)
    }

    /// Completed meditation sessions, oldest first.
    pub fn meditations(&self) -> Vec<MeditationSession> {
        kv::load_or_default(self.store.as_ref(), keys::MEDITATION_HISTORY)
    }

    pub fn append_workout(&self, workout: Workout) {
        let mut all = self.workouts();
        tracing::debug!(name = %workout.name, count = all.len() + 1, "appending workout");
        all.push(workout);
        kv::save_best_effort(self.store.as_ref(), keys::WORKOUT_HISTORY, &all);
    }

    pub fn append_meditation(&self, session: MeditationSession) {
        let mut all = self.meditations();
        tracing::debug!(title = %session.title, count = all.len() + 1, "appending meditation");
        all.push(session);
        kv::save_best_effort(self.store.as_ref(), keys::MEDITATION_HISTORY, &all);
    }

    pub fn clear(&self) {
        for key in [keys::WORKOUT_HISTORY, keys::MEDITATION_HISTORY] {
            if let Err(e) = self.store.remove(key) {
                tracing::warn!(key, error = %e, "failed to clear history");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::catalog;
    use crate::profile::UserProfile;
    use crate::storage::kv::{KvStore, MemoryStore};
    use std::sync::Arc;

    #[test]
    fn append_and_read_back_in_order() {
        let history = HistoryStore::new(MemoryStore::shared());
        let workouts = catalog::generate_workouts(&UserProfile::default());
        let sessions = catalog::all_meditation_sessions();

        history.append_workout(workouts[0].clone());
        history.append_meditation(sessions[0].clone());
        history.append_meditation(sessions[1].clone());

        assert_eq!(history.workouts(), vec![workouts[0].clone()]);
        let titles: Vec<_> = history.meditations().into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Box Breathing", "4-7-8 Breathing"]);

        history.clear();
        assert!(history.workouts().is_empty());
        assert!(history.meditations().is_empty());
    }

    #[test]
    fn corrupt_history_reads_as_empty_and_is_overwritten() {
        let mem = Arc::new(MemoryStore::new());
        mem.set(keys::WORKOUT_HISTORY, "{\"oops\":").unwrap();
        let history = HistoryStore::new(mem.clone());
        assert!(history.workouts().is_empty());

        let w = catalog::generate_workouts(&UserProfile::default()).remove(0);
        history.append_workout(w);
        assert_eq!(history.workouts().len(), 1);
    }
}
