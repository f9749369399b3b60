//! Voice command session
//!
//! This module provides:
//! 1. The capture stream contract (`CaptureStream`) and two implementations:
//!    a line reader (stdin or any `BufRead`) and an always-unsupported stub
//! 2. `ListeningSession`, the Idle/Listening state machine that turns
//!    finalized transcripts into dispatched robot goals
//!
//! Architecture:
//! - Capture streams push `CaptureEvent`s through a `CaptureSink`
//! - Dispatch and catalog refresh run on worker threads
//! - Everything funnels into one channel that the owner drains with
//!   `poll_events` (non-blocking) or `wait_events` (blocking with timeout)
//! - Each `start()`/`stop()` bumps the session epoch; messages tagged with an
//!   older epoch are dropped, so a late transcript never leaks into a later
//!   listening period

mod capture;
mod session;
mod types;


pub use capture::{CaptureError, CaptureSink, CaptureStream, LineCapture, UnsupportedCapture};
pub use session::{ListeningSession, NOT_SUPPORTED_MESSAGE};
pub use types::{CaptureEvent, SessionEvent, SessionState, VoiceState};
