//! Voice session types.

use crate::catalog::CatalogSnapshot;
use crate::dispatch::DispatchOutcome;
use crate::domain::ResolvedIntent;

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VoiceState {
    /// Capture stream closed
    #[default]
    Idle,
    /// Capture stream open, transcripts are acted upon
    Listening,
}

impl VoiceState {
    pub fn is_listening(&self) -> bool {
        matches!(self, VoiceState::Listening)
    }
}

impl std::fmt::Display for VoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoiceState::Idle => write!(f, "Idle"),
            VoiceState::Listening => write!(f, "Listening"),
        }
    }
}

/// What the operator sees
///
/// After any transcript has been processed exactly one of `last_success`
/// and `last_failure` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub listening: bool,
    /// Last finalized transcript, as heard
    pub last_transcript: String,
    /// Live, not yet finalized transcript
    pub interim_transcript: String,
    pub last_failure: Option<String>,
    pub last_success: Option<String>,
}

/// Events emitted by a capture stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A finished utterance
    Final(String),
    /// Partial text while the utterance is still in progress
    Interim(String),
    /// Stream-level fault; the stream keeps running
    Error(String),
    /// The stream ended on its own
    Closed,
}

/// Things that happened while draining the session's channel
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A final transcript went through matching and resolution
    TranscriptHandled {
        transcript: String,
        rule: Option<&'static str>,
        intent: ResolvedIntent,
    },
    InterimUpdated(String),
    /// A dispatch finished and its outcome was applied
    DispatchCompleted(DispatchOutcome),
    /// A dispatch from an earlier listening period finished and was ignored
    DispatchDiscarded(DispatchOutcome),
    CatalogRefreshed { generation: u64 },
    CatalogRefreshFailed { message: String },
    CaptureError { message: String },
    /// Capture stream closed by itself; the session is now idle
    CaptureClosed,
}

/// Internal message funnel
#[derive(Debug)]
pub(crate) enum WorkerMessage {
    Capture { epoch: u64, event: CaptureEvent },
    Dispatched(DispatchOutcome),
    /// Refresh result tagged with the request sequence number
    Catalog {
        seq: u64,
        result: Result<CatalogSnapshot, String>,
    },
}
