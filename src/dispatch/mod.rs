//! Goal dispatch - one outbound robot call per resolved intent
//!
//! The dispatcher never retries. A failed call is reported back as a failed
//! [`DispatchOutcome`]; the operator has to speak or click again.

mod outcome;
mod target;

use std::sync::Arc;
use std::thread;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::ResolvedIntent;

pub use outcome::{DispatchOutcome, Outcome};
pub use target::{DispatchError, DispatchTarget};

/// Maps resolved intents to calls on a [`DispatchTarget`]
#[derive(Clone)]
pub struct GoalDispatcher {
    target: Arc<dyn DispatchTarget>,
}

impl GoalDispatcher {
    pub fn new(target: Arc<dyn DispatchTarget>) -> Self {
        Self { target }
    }

    /// Issue exactly one call for the intent and wait for its result
    pub fn dispatch(&self, intent: &ResolvedIntent) -> Outcome {
        match self.call(intent) {
            Ok(()) => {
                tracing::info!("Dispatched: {}", intent.describe());
                Outcome::Ok
            }
            Err(e) => {
                tracing::warn!("Dispatch of {:?} failed: {}", intent, e);
                Outcome::Failed(format!("Failed to {}: {}", intent.action_phrase(), e))
            }
        }
    }

    /// Dispatch on a worker thread; `on_complete` receives the outcome
    ///
    /// Returns the id the outcome will carry. Several dispatches may be in
    /// flight at once and complete in any order.
    pub fn dispatch_in_background<F>(&self, intent: ResolvedIntent, epoch: u64, on_complete: F) -> Uuid
    where
        F: FnOnce(DispatchOutcome) + Send + 'static,
    {
        let id = Uuid::new_v4();
        let dispatcher = self.clone();

        thread::spawn(move || {
            let issued_at = Utc::now();
            let outcome = dispatcher.dispatch(&intent);
            on_complete(DispatchOutcome {
                id,
                epoch,
                intent,
                outcome,
                issued_at,
                completed_at: Utc::now(),
            });
        });

        id
    }

    fn call(&self, intent: &ResolvedIntent) -> Result<(), DispatchError> {
        match intent {
            ResolvedIntent::NavigateToEntity { entity_id, .. } => {
                self.target.navigate_to_entity(*entity_id)
            }
            ResolvedIntent::NavigateToCoordinate { x, y } => {
                self.target.navigate_to_coordinate(*x, *y)
            }
            ResolvedIntent::Advance => self.target.advance(),
            ResolvedIntent::TurnAround => self.target.turn_around(),
            ResolvedIntent::MoveBack => self.target.move_back(),
            ResolvedIntent::PatrolStart => self.target.set_patrol(true),
            ResolvedIntent::PatrolStop => self.target.set_patrol(false),
            ResolvedIntent::ResolutionFailure(failure) => {
                Err(DispatchError::NotDispatchable(failure.message()))
            }
        }
    }
}

impl std::fmt::Debug for GoalDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoalDispatcher").finish_non_exhaustive()
    }
}
