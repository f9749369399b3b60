//! The robot backend as seen by the dispatcher.

use thiserror::Error;

use crate::domain::EntityId;

/// Why an outbound call did not succeed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("backend responded with status {status}")]
    Rejected { status: u16 },

    #[error("backend unreachable: {0}")]
    Transport(String),

    #[error("{0} is not supported by the robot backend")]
    Unsupported(&'static str),

    #[error("nothing to dispatch: {0}")]
    NotDispatchable(String),
}

/// Outbound robot actions; each returns success or failure, no payload
pub trait DispatchTarget: Send + Sync {
    fn navigate_to_entity(&self, entity_id: EntityId) -> Result<(), DispatchError>;

    fn navigate_to_coordinate(&self, x: f64, y: f64) -> Result<(), DispatchError>;

    fn move_back(&self) -> Result<(), DispatchError>;

    fn set_patrol(&self, active: bool) -> Result<(), DispatchError>;

    fn advance(&self) -> Result<(), DispatchError> {
        Err(DispatchError::Unsupported("advance"))
    }

    fn turn_around(&self) -> Result<(), DispatchError> {
        Err(DispatchError::Unsupported("turn around"))
    }
}
