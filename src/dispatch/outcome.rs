//! Dispatch results.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ResolvedIntent;

/// Result of one outbound call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    /// Human-readable failure message
    Failed(String),
}

impl Outcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, Outcome::Ok)
    }
}

/// Completion message for a background dispatch
#[derive(Debug, Clone)]
pub struct DispatchOutcome {
    pub id: Uuid,
    /// Session epoch the dispatch was issued in
    pub epoch: u64,
    pub intent: ResolvedIntent,
    pub outcome: Outcome,
    pub issued_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}
