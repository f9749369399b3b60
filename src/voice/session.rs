//! ListeningSession - the Idle/Listening state machine.

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::capture::{CaptureError, CaptureSink, CaptureStream};
use super::types::{CaptureEvent, SessionEvent, SessionState, VoiceState, WorkerMessage};
use crate::catalog::{CatalogSnapshot, CatalogSource, EntityCatalog};
use crate::command::CommandMatcher;
use crate::dispatch::{DispatchOutcome, GoalDispatcher, Outcome};
use crate::domain::{RawIntent, ResolvedIntent};
use crate::resolve::IntentResolver;

/// Shown when the environment cannot capture speech
pub const NOT_SUPPORTED_MESSAGE: &str = "Speech recognition is not supported in this environment";

/// Voice command session
///
/// Owns the catalog snapshot, the display state and the capture stream.
/// All mutation happens on the owner's thread, inside the public methods.
pub struct ListeningSession {
    state: SessionState,
    epoch: u64,
    capture: Box<dyn CaptureStream>,
    matcher: CommandMatcher,
    resolver: IntentResolver,
    catalog: EntityCatalog,
    catalog_source: Arc<dyn CatalogSource>,
    dispatcher: GoalDispatcher,
    pending: HashSet<Uuid>,
    /// Sequence number of the most recent refresh request
    refresh_requested: u64,
    /// Sequence number of the newest refresh applied so far
    refresh_applied: u64,
    event_tx: Sender<WorkerMessage>,
    event_rx: Receiver<WorkerMessage>,
}

impl ListeningSession {
    /// Create an idle session
    pub fn new(
        capture: Box<dyn CaptureStream>,
        catalog_source: Arc<dyn CatalogSource>,
        dispatcher: GoalDispatcher,
    ) -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            state: SessionState::default(),
            epoch: 0,
            capture,
            matcher: CommandMatcher::default(),
            resolver: IntentResolver::default(),
            catalog: EntityCatalog::new(),
            catalog_source,
            dispatcher,
            pending: HashSet::new(),
            refresh_requested: 0,
            refresh_applied: 0,
            event_tx,
            event_rx,
        }
    }

    /// Use a custom command matcher
    pub fn with_matcher(mut self, matcher: CommandMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    /// Use a custom resolver
    pub fn with_resolver(mut self, resolver: IntentResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn voice_state(&self) -> VoiceState {
        if self.state.listening {
            VoiceState::Listening
        } else {
            VoiceState::Idle
        }
    }

    pub fn is_listening(&self) -> bool {
        self.state.listening
    }

    pub fn catalog(&self) -> &EntityCatalog {
        &self.catalog
    }

    /// Install a snapshot directly, bypassing the catalog source
    ///
    /// Refreshes requested before this call are ignored when they complete.
    pub fn set_catalog(&mut self, snapshot: CatalogSnapshot) {
        self.refresh_applied = self.refresh_requested;
        self.catalog.replace(snapshot);
    }

    /// Number of dispatches issued in this listening period still awaiting a response
    pub fn pending_dispatches(&self) -> usize {
        self.pending.len()
    }

    /// Open the capture stream and begin acting on transcripts
    ///
    /// No-op while already listening. If the stream cannot be opened the
    /// session stays idle and `last_failure` explains why.
    pub fn start(&mut self) -> Result<(), CaptureError> {
        if self.state.listening {
            return Ok(());
        }

        let epoch = self.epoch + 1;
        let sink = CaptureSink::new(epoch, self.event_tx.clone());
        if let Err(e) = self.capture.open(sink) {
            tracing::warn!("Failed to start listening: {}", e);
            self.state.last_success = None;
            self.state.last_failure = Some(match e {
                CaptureError::Unsupported => NOT_SUPPORTED_MESSAGE.to_string(),
                CaptureError::Open(_) => e.to_string(),
            });
            return Err(e);
        }

        self.epoch = epoch;
        self.pending.clear();
        self.state.listening = true;
        self.state.last_failure = None;
        self.state.last_success = None;
        tracing::info!("Voice session listening (epoch {})", self.epoch);

        self.refresh_catalog();
        Ok(())
    }

    /// Close the capture stream and clear the display state
    ///
    /// No-op while idle. Transcripts and dispatch outcomes from the closed
    /// listening period are ignored from here on.
    pub fn stop(&mut self) {
        if !self.state.listening {
            return;
        }

        self.capture.close();
        self.epoch += 1;
        self.pending.clear();
        self.state = SessionState::default();
        tracing::info!("Voice session stopped");
    }

    /// Block until every dispatch still in flight has reported, or `timeout` passes
    ///
    /// Returns the events drained meanwhile. After [`stop`](Self::stop)
    /// nothing is pending, so this returns at once.
    pub fn drain_pending(&mut self, timeout: Duration) -> Vec<SessionEvent> {
        let deadline = Instant::now() + timeout;
        let mut events = Vec::new();
        while !self.pending.is_empty() {
            let now = Instant::now();
            if now >= deadline {
                tracing::warn!(
                    "Gave up waiting for {} dispatch outcome(s)",
                    self.pending.len()
                );
                break;
            }
            events.extend(self.wait_events(deadline - now));
        }
        events
    }

    /// Flip between idle and listening
    pub fn toggle(&mut self) -> Result<(), CaptureError> {
        if self.state.listening {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Request a fresh catalog snapshot in the background
    ///
    /// Refreshes may complete out of order; a result older than the newest
    /// one already applied is dropped.
    pub fn refresh_catalog(&mut self) {
        self.refresh_requested += 1;
        let seq = self.refresh_requested;
        let source = self.catalog_source.clone();
        let tx = self.event_tx.clone();
        thread::spawn(move || {
            let result = source.fetch_snapshot().map_err(|e| format!("{:#}", e));
            let _ = tx.send(WorkerMessage::Catalog { seq, result });
        });
    }

    /// Process a finalized transcript
    ///
    /// Returns `None` (and touches nothing) when the session is idle.
    pub fn handle_final_transcript(&mut self, transcript: &str) -> Option<SessionEvent> {
        if !self.state.listening {
            tracing::debug!("Ignoring transcript while idle: {:?}", transcript);
            return None;
        }

        let heard = transcript.trim().to_string();
        tracing::info!("Heard: {:?}", heard);
        self.state.last_transcript = heard.clone();
        self.state.interim_transcript.clear();

        let matched = self.matcher.match_transcript(&heard);
        let rule = matched.as_ref().map(|m| m.rule);
        let intent = match matched {
            Some(m) => self.resolver.resolve(&m.intent, &self.catalog),
            None => self.resolver.resolve(
                &RawIntent::Unrecognized {
                    transcript: heard.clone(),
                },
                &self.catalog,
            ),
        };

        match &intent {
            ResolvedIntent::ResolutionFailure(failure) => {
                tracing::info!("Command failed ({}): {}", failure.kind, failure.message());
                self.set_failure(failure.message());
            }
            resolved => {
                self.set_success(resolved.describe());
                self.issue(resolved.clone());
            }
        }

        Some(SessionEvent::TranscriptHandled {
            transcript: heard,
            rule,
            intent,
        })
    }

    /// Update the live transcript display; never triggers matching
    pub fn handle_interim_transcript(&mut self, transcript: &str) -> Option<SessionEvent> {
        if !self.state.listening {
            return None;
        }
        self.state.interim_transcript = transcript.trim().to_string();
        Some(SessionEvent::InterimUpdated(
            self.state.interim_transcript.clone(),
        ))
    }

    /// Drain everything that is ready without blocking
    pub fn poll_events(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        while let Ok(message) = self.event_rx.try_recv() {
            events.extend(self.apply(message));
        }
        events
    }

    /// Block up to `timeout` for the next message, then drain the rest
    pub fn wait_events(&mut self, timeout: Duration) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        match self.event_rx.recv_timeout(timeout) {
            Ok(message) => events.extend(self.apply(message)),
            // The session holds its own sender, so this is always a timeout
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return events,
        }
        events.extend(self.poll_events());
        events
    }

    fn issue(&mut self, intent: ResolvedIntent) {
        let tx = self.event_tx.clone();
        let id = self
            .dispatcher
            .dispatch_in_background(intent, self.epoch, move |outcome| {
                let _ = tx.send(WorkerMessage::Dispatched(outcome));
            });
        self.pending.insert(id);
    }

    fn apply(&mut self, message: WorkerMessage) -> Option<SessionEvent> {
        match message {
            WorkerMessage::Capture { epoch, event } => {
                if epoch != self.epoch || !self.state.listening {
                    tracing::debug!("Dropping capture event from a closed stream: {:?}", event);
                    return None;
                }
                self.apply_capture(event)
            }
            WorkerMessage::Dispatched(outcome) => Some(self.apply_outcome(outcome)),
            WorkerMessage::Catalog { seq, .. } if seq <= self.refresh_applied => {
                tracing::debug!("Dropping superseded catalog refresh #{}", seq);
                None
            }
            WorkerMessage::Catalog {
                seq,
                result: Ok(snapshot),
            } => {
                self.refresh_applied = seq;
                self.catalog.replace(snapshot);
                Some(SessionEvent::CatalogRefreshed {
                    generation: self.catalog.generation(),
                })
            }
            WorkerMessage::Catalog {
                result: Err(message),
                ..
            } => {
                tracing::warn!("Catalog refresh failed: {}", message);
                Some(SessionEvent::CatalogRefreshFailed { message })
            }
        }
    }

    fn apply_capture(&mut self, event: CaptureEvent) -> Option<SessionEvent> {
        match event {
            CaptureEvent::Final(text) => self.handle_final_transcript(&text),
            CaptureEvent::Interim(text) => self.handle_interim_transcript(&text),
            CaptureEvent::Error(message) => {
                tracing::warn!("Speech capture error: {}", message);
                Some(SessionEvent::CaptureError { message })
            }
            CaptureEvent::Closed => {
                tracing::warn!("Speech capture stream closed");
                self.end_capture();
                Some(SessionEvent::CaptureClosed)
            }
        }
    }

    fn apply_outcome(&mut self, outcome: DispatchOutcome) -> SessionEvent {
        let current = self.pending.remove(&outcome.id);
        if !current || outcome.epoch != self.epoch {
            tracing::debug!("Discarding outcome of an earlier session: {:?}", outcome.outcome);
            return SessionEvent::DispatchDiscarded(outcome);
        }

        match &outcome.outcome {
            Outcome::Ok => self.set_success(outcome.intent.describe()),
            Outcome::Failed(message) => self.set_failure(message.clone()),
        }

        // Later commands should see the state after this action
        self.refresh_catalog();
        SessionEvent::DispatchCompleted(outcome)
    }

    /// The stream ended by itself: go idle, but keep the outcomes of
    /// dispatches already issued so they are still reported
    fn end_capture(&mut self) {
        self.capture.close();
        self.state.listening = false;
        self.state.interim_transcript.clear();
        tracing::info!("Voice session idle, {} dispatch(es) pending", self.pending.len());
    }

    fn set_success(&mut self, message: String) {
        self.state.last_failure = None;
        self.state.last_success = Some(message);
    }

    fn set_failure(&mut self, message: String) {
        self.state.last_success = None;
        self.state.last_failure = Some(message);
    }
}

impl Drop for ListeningSession {
    fn drop(&mut self) {
        if self.state.listening {
            self.capture.close();
        }
    }
}
