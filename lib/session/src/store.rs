//! In-memory session store
//!
//! Shared mutable state keyed by session id, with TTL-based expiry checked
//! lazily on every access. All mutations are whole-record replace-in-map
//! under one write lock, so a single read-modify-write operation is atomic;
//! racing calls on the same id are last-writer-wins, which callers accept
//! by sequencing one in-flight round per session.

use ahash::AHashMap;
use chrono::Duration;
use parking_lot::RwLock;
use std::sync::Arc;
use uuid::Uuid;

use curata_core::{ArtworkCandidate, Clock, Error, PairChoice, PreferenceVectors, Result, Style};

use crate::record::{SessionRecord, SessionTelemetry};

pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 30;

/// Manages onboarding sessions.
pub struct SessionStore {
    sessions: RwLock<AHashMap<String, SessionRecord>>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl SessionStore {
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_ttl(clock, Duration::minutes(DEFAULT_SESSION_TTL_MINUTES))
    }

    #[must_use]
    pub fn with_ttl(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(AHashMap::new()),
            clock,
            ttl,
        }
    }

    /// Create a new session with empty history and TTL-based expiry. The id
    /// is a v4 UUID, unguessable by construction.
    pub fn create(
        &self,
        user_id: &str,
        candidate_ids: Vec<String>,
        preferences: PreferenceVectors,
    ) -> SessionRecord {
        let now = self.clock.now();
        let record = SessionRecord {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
            candidate_ids,
            preferences,
            history: Vec::new(),
            active_styles: None,
            candidates: None,
            telemetry: None,
        };

        self.sessions
            .write()
            .insert(record.id.clone(), record.clone());
        record
    }

    /// Fetch a session. Access past expiry is identical to non-existence,
    /// and the record is evicted on the spot.
    pub fn get(&self, id: &str) -> Option<SessionRecord> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        match sessions.get(id) {
            Some(record) if record.is_expired(now) => {
                sessions.remove(id);
                None
            }
            Some(record) => Some(record.clone()),
            None => None,
        }
    }

    /// Overwrite the choice history with the caller's authoritative copy.
    pub fn replace_history(&self, id: &str, choices: Vec<PairChoice>) -> Result<SessionRecord> {
        self.mutate(id, |record| {
            record.history = choices;
        })
    }

    /// Replace the candidate pool, remembering which style filter produced
    /// it.
    pub fn set_candidates(
        &self,
        id: &str,
        candidates: Vec<ArtworkCandidate>,
        active_styles: Vec<Style>,
    ) -> Result<SessionRecord> {
        self.mutate(id, |record| {
            record.candidate_ids = candidates.iter().map(|c| c.id.clone()).collect();
            record.candidates = Some(candidates);
            record.active_styles = Some(active_styles);
        })
    }

    /// Attach terminal telemetry. The session becomes absorbing: any later
    /// mutation attempt reports not-found.
    pub fn mark_complete(&self, id: &str, telemetry: SessionTelemetry) -> Result<SessionRecord> {
        self.mutate(id, |record| {
            record.telemetry = Some(telemetry);
        })
    }

    /// Drop every expired session. Expiry is already enforced lazily on
    /// access; this exists for memory hygiene on long-lived processes.
    pub fn purge_expired(&self) -> usize {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, record| !record.is_expired(now));
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    fn mutate(
        &self,
        id: &str,
        apply: impl FnOnce(&mut SessionRecord),
    ) -> Result<SessionRecord> {
        let now = self.clock.now();
        let mut sessions = self.sessions.write();

        let Some(record) = sessions.get(id) else {
            return Err(Error::SessionNotFound(id.to_string()));
        };
        if record.is_expired(now) {
            sessions.remove(id);
            return Err(Error::SessionNotFound(id.to_string()));
        }
        if record.is_complete() {
            return Err(Error::SessionNotFound(id.to_string()));
        }

        let mut updated = record.clone();
        apply(&mut updated);
        sessions.insert(id.to_string(), updated.clone());
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use curata_core::ManualClock;

    fn store_with_clock() -> (SessionStore, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let store = SessionStore::new(clock.clone());
        (store, clock)
    }

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("art_{:03}", i + 1)).collect()
    }

    #[test]
    fn test_create_and_get() {
        let (store, _clock) = store_with_clock();
        let record = store.create("user_1", ids(12), PreferenceVectors::empty());
        assert_eq!(record.candidate_ids.len(), 12);
        assert!(record.history.is_empty());

        let fetched = store.get(&record.id).unwrap();
        assert_eq!(fetched, record);
        assert!(store.get("nope").is_none());
    }

    #[test]
    fn test_expired_session_is_gone() {
        let (store, clock) = store_with_clock();
        let record = store.create("user_1", ids(2), PreferenceVectors::empty());

        clock.advance(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES + 1));
        assert!(store.get(&record.id).is_none());
        // Lazy eviction removed the record entirely.
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_session_rejects_mutation() {
        let (store, clock) = store_with_clock();
        let record = store.create("user_1", ids(2), PreferenceVectors::empty());
        clock.advance(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES + 1));

        let result = store.replace_history(&record.id, vec![PairChoice::new("a", "b", 1)]);
        assert!(matches!(result, Err(Error::SessionNotFound(_))));
    }

    #[test]
    fn test_replace_history_overwrites() {
        let (store, _clock) = store_with_clock();
        let record = store.create("user_1", ids(4), PreferenceVectors::empty());

        store
            .replace_history(&record.id, vec![PairChoice::new("a", "b", 1)])
            .unwrap();
        let updated = store
            .replace_history(
                &record.id,
                vec![PairChoice::new("a", "b", 1), PairChoice::new("c", "d", 2)],
            )
            .unwrap();
        assert_eq!(updated.history.len(), 2);
        assert_eq!(store.get(&record.id).unwrap().history.len(), 2);
    }

    #[test]
    fn test_set_candidates_tracks_style_filter() {
        let (store, _clock) = store_with_clock();
        let record = store.create("user_1", ids(2), PreferenceVectors::empty());

        let pool = ArtworkCandidate::synthetic_pool(&ids(6));
        let updated = store
            .set_candidates(&record.id, pool, vec![Style::Cubist])
            .unwrap();
        assert_eq!(updated.candidate_ids.len(), 6);
        assert_eq!(updated.active_styles, Some(vec![Style::Cubist]));
        assert!(!updated.styles_changed(&[Style::Cubist]));
    }

    #[test]
    fn test_completed_session_is_absorbing() {
        let (store, clock) = store_with_clock();
        let record = store.create("user_1", ids(2), PreferenceVectors::empty());

        let telemetry = SessionTelemetry {
            skips: 0,
            duration_sec: 42.0,
            completed_at: clock.now(),
        };
        store.mark_complete(&record.id, telemetry.clone()).unwrap();

        let again = store.mark_complete(&record.id, telemetry);
        assert!(matches!(again, Err(Error::SessionNotFound(_))));
        let history = store.replace_history(&record.id, Vec::new());
        assert!(matches!(history, Err(Error::SessionNotFound(_))));
    }

    #[test]
    fn test_purge_expired() {
        let (store, clock) = store_with_clock();
        store.create("user_1", ids(2), PreferenceVectors::empty());
        clock.advance(Duration::minutes(10));
        store.create("user_2", ids(2), PreferenceVectors::empty());

        clock.advance(Duration::minutes(DEFAULT_SESSION_TTL_MINUTES - 5));
        assert_eq!(store.purge_expired(), 1);
        assert_eq!(store.len(), 1);
    }
}
