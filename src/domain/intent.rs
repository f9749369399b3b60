//! Intents produced by the command pipeline.
//!
//! A transcript is first matched into a [`RawIntent`] (what the operator
//! said), then resolved against the entity catalog into a [`ResolvedIntent`]
//! (what the robot should do).

use serde::{Deserialize, Serialize};

use super::EntityId;

/// Parsed command before it has been checked against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RawIntent {
    /// Navigate to an object by label, optionally qualified by room name
    NavigateToLabel {
        label: String,
        room_name: Option<String>,
    },
    /// Drive forward a short distance
    Advance,
    /// Rotate in place to look around
    TurnAround,
    /// Back up a short distance
    MoveBack,
    PatrolStart,
    PatrolStop,
    /// No rule matched; carries the transcript as heard
    Unrecognized { transcript: String },
}

impl RawIntent {
    /// Intents that never consult the entity catalog
    pub fn is_catalog_independent(&self) -> bool {
        matches!(
            self,
            RawIntent::Advance
                | RawIntent::TurnAround
                | RawIntent::MoveBack
                | RawIntent::PatrolStart
                | RawIntent::PatrolStop
        )
    }
}

/// Concrete robot action, or the reason no action could be derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedIntent {
    NavigateToEntity {
        entity_id: EntityId,
        /// Label and room as spoken, used for status messages
        target: String,
    },
    /// Navigate to raw world coordinates (map click path)
    NavigateToCoordinate { x: f64, y: f64 },
    Advance,
    TurnAround,
    MoveBack,
    PatrolStart,
    PatrolStop,
    ResolutionFailure(ResolutionFailure),
}

impl ResolvedIntent {
    pub fn is_failure(&self) -> bool {
        matches!(self, ResolvedIntent::ResolutionFailure(_))
    }

    /// Status line shown while the action is underway
    pub fn describe(&self) -> String {
        match self {
            ResolvedIntent::NavigateToEntity { target, .. } => format!("Navigating to {}", target),
            ResolvedIntent::NavigateToCoordinate { x, y } => {
                format!("Navigating to ({:.2}, {:.2})", x, y)
            }
            ResolvedIntent::Advance => "Advancing".to_string(),
            ResolvedIntent::TurnAround => "Turning around".to_string(),
            ResolvedIntent::MoveBack => "Moving back".to_string(),
            ResolvedIntent::PatrolStart => "Starting patrol".to_string(),
            ResolvedIntent::PatrolStop => "Stopping patrol".to_string(),
            ResolvedIntent::ResolutionFailure(failure) => failure.message(),
        }
    }

    /// Verb phrase used in dispatch failure messages ("Failed to move back")
    pub fn action_phrase(&self) -> &'static str {
        match self {
            ResolvedIntent::NavigateToEntity { .. } => "navigate to the object",
            ResolvedIntent::NavigateToCoordinate { .. } => "send the goal",
            ResolvedIntent::Advance => "advance",
            ResolvedIntent::TurnAround => "turn around",
            ResolvedIntent::MoveBack => "move back",
            ResolvedIntent::PatrolStart => "start patrol",
            ResolvedIntent::PatrolStop => "stop patrol",
            ResolvedIntent::ResolutionFailure(_) => "resolve the command",
        }
    }
}

/// Every way processing a command can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Transcript matched no rule
    NoMatch,
    RoomNotFound,
    EntityNotFound,
    EntityNotFoundInRoom,
    /// Backend rejected or errored on the outbound call
    DispatchFailed,
    /// Environment has no speech capture
    CaptureUnsupported,
    /// Stream-level fault; logged and ignored
    CaptureError,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::NoMatch => write!(f, "no_match"),
            FailureKind::RoomNotFound => write!(f, "room_not_found"),
            FailureKind::EntityNotFound => write!(f, "entity_not_found"),
            FailureKind::EntityNotFoundInRoom => write!(f, "entity_not_found_in_room"),
            FailureKind::DispatchFailed => write!(f, "dispatch_failed"),
            FailureKind::CaptureUnsupported => write!(f, "capture_unsupported"),
            FailureKind::CaptureError => write!(f, "capture_error"),
        }
    }
}

/// A local, recoverable failure with its user-facing detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionFailure {
    pub kind: FailureKind,
    /// Human-readable explanation naming the label/room/transcript involved
    pub detail: String,
    /// Closest known catalog label, if one is a near miss
    #[serde(default)]
    pub suggestion: Option<String>,
}

impl ResolutionFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
            suggestion: None,
        }
    }

    pub fn no_match(transcript: &str) -> Self {
        Self::new(
            FailureKind::NoMatch,
            format!("Command not understood: \"{}\"", transcript),
        )
    }

    pub fn room_not_found(room_name: &str) -> Self {
        Self::new(
            FailureKind::RoomNotFound,
            format!("Room \"{}\" not found", room_name),
        )
    }

    pub fn entity_not_found(label: &str) -> Self {
        Self::new(
            FailureKind::EntityNotFound,
            format!("Object \"{}\" not found", label),
        )
    }

    pub fn entity_not_found_in_room(label: &str, room_name: &str) -> Self {
        Self::new(
            FailureKind::EntityNotFoundInRoom,
            format!("Object \"{}\" not found in room \"{}\"", label, room_name),
        )
    }

    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    /// Message shown to the operator
    pub fn message(&self) -> String {
        match &self.suggestion {
            Some(suggestion) => format!("{} (did you mean \"{}\"?)", self.detail, suggestion),
            None => self.detail.clone(),
        }
    }
}

impl std::fmt::Display for ResolutionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
