use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use curata_core::{ArtworkCandidate, PairChoice, PreferenceVectors, Style};

/// Terminal metadata attached when a session completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionTelemetry {
    pub skips: u32,
    pub duration_sec: f64,
    pub completed_at: DateTime<Utc>,
}

/// One onboarding session.
///
/// The id doubles as a capability token: sessions are unreachable except
/// through it, and have no relationship to other sessions. The record is
/// replaced wholesale in the store on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub candidate_ids: Vec<String>,
    pub preferences: PreferenceVectors,
    pub history: Vec<PairChoice>,
    /// Style filter that produced the cached candidate pool, used to detect
    /// when the pool must be refreshed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_styles: Option<Vec<Style>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<ArtworkCandidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telemetry: Option<SessionTelemetry>,
}

impl SessionRecord {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Completed sessions are absorbing: telemetry is only ever attached
    /// once, at the terminal transition.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.telemetry.is_some()
    }

    /// Whether an incoming style filter differs from the one that produced
    /// the current candidate pool. An empty incoming filter keeps the pool.
    #[must_use]
    pub fn styles_changed(&self, incoming: &[Style]) -> bool {
        if incoming.is_empty() {
            return false;
        }
        let Some(existing) = &self.active_styles else {
            return true;
        };
        if existing.len() != incoming.len() {
            return true;
        }
        let existing: ahash::AHashSet<Style> = existing.iter().copied().collect();
        incoming.iter().any(|style| !existing.contains(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            id: "s1".into(),
            user_id: "u1".into(),
            created_at: now,
            expires_at: now + chrono::Duration::minutes(30),
            candidate_ids: Vec::new(),
            preferences: PreferenceVectors::empty(),
            history: Vec::new(),
            active_styles: None,
            candidates: None,
            telemetry: None,
        }
    }

    #[test]
    fn test_styles_changed_empty_incoming_keeps_pool() {
        let mut session = record();
        session.active_styles = Some(vec![Style::Modern]);
        assert!(!session.styles_changed(&[]));
    }

    #[test]
    fn test_styles_changed_detects_difference() {
        let mut session = record();
        assert!(session.styles_changed(&[Style::Modern]));

        session.active_styles = Some(vec![Style::Modern]);
        assert!(!session.styles_changed(&[Style::Modern]));
        assert!(session.styles_changed(&[Style::Pop]));
        assert!(session.styles_changed(&[Style::Modern, Style::Pop]));
    }

    #[test]
    fn test_styles_changed_ignores_order() {
        let mut session = record();
        session.active_styles = Some(vec![Style::Modern, Style::Pop]);
        assert!(!session.styles_changed(&[Style::Pop, Style::Modern]));
    }
}
