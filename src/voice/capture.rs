//! Speech capture streams.

use std::io::{BufRead, BufReader};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;

use thiserror::Error;

use super::types::{CaptureEvent, WorkerMessage};

/// Errors opening a capture stream
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    #[error("speech capture is not supported in this environment")]
    Unsupported,

    #[error("failed to open speech capture: {0}")]
    Open(String),
}

/// Handle a capture stream uses to deliver events to its session
///
/// Every sink is bound to the listening period it was created for. Events
/// sent after that period ended are dropped by the session.
#[derive(Debug, Clone)]
pub struct CaptureSink {
    epoch: u64,
    tx: Sender<WorkerMessage>,
}

impl CaptureSink {
    pub(crate) fn new(epoch: u64, tx: Sender<WorkerMessage>) -> Self {
        Self { epoch, tx }
    }

    /// Deliver an event; returns false once the session is gone
    pub fn send(&self, event: CaptureEvent) -> bool {
        self.tx
            .send(WorkerMessage::Capture {
                epoch: self.epoch,
                event,
            })
            .is_ok()
    }

    pub fn final_transcript(&self, text: impl Into<String>) -> bool {
        self.send(CaptureEvent::Final(text.into()))
    }

    pub fn interim_transcript(&self, text: impl Into<String>) -> bool {
        self.send(CaptureEvent::Interim(text.into()))
    }
}

/// A continuous speech-capture stream
pub trait CaptureStream: Send {
    /// Begin delivering events to `sink`
    fn open(&mut self, sink: CaptureSink) -> Result<(), CaptureError>;

    /// Stop delivering events; must return promptly
    fn close(&mut self);
}

/// Capture for environments without speech recognition
#[derive(Debug, Default)]
pub struct UnsupportedCapture;

impl CaptureStream for UnsupportedCapture {
    fn open(&mut self, _sink: CaptureSink) -> Result<(), CaptureError> {
        Err(CaptureError::Unsupported)
    }

    fn close(&mut self) {}
}

/// Treats each line of text as one utterance
///
/// Lines starting with `~` are interim transcripts; blank lines are
/// skipped. End of input closes the stream.
///
/// One reader thread is started on the first `open()` and lives until end
/// of input. Later opens only swap the sink it forwards to, and lines read
/// while closed are dropped, like speech while the microphone is off.
pub struct LineCapture {
    reader: Option<Box<dyn BufRead + Send>>,
    sink: Arc<Mutex<Option<CaptureSink>>>,
    exhausted: Arc<AtomicBool>,
}

impl LineCapture {
    /// Read utterances from standard input
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()))
    }

    /// Read utterances from any reader
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Some(Box::new(reader)),
            sink: Arc::new(Mutex::new(None)),
            exhausted: Arc::new(AtomicBool::new(false)),
        }
    }

    fn forward_lines(
        reader: Box<dyn BufRead + Send>,
        sink: Arc<Mutex<Option<CaptureSink>>>,
        exhausted: Arc<AtomicBool>,
    ) {
        for line in reader.lines() {
            let event = match line {
                Ok(line) => {
                    let text = line.trim();
                    if text.is_empty() {
                        continue;
                    }
                    match text.strip_prefix('~') {
                        Some(interim) => CaptureEvent::Interim(interim.trim().to_string()),
                        None => CaptureEvent::Final(text.to_string()),
                    }
                }
                Err(e) => CaptureEvent::Error(e.to_string()),
            };
            Self::deliver(&sink, event);
        }
        exhausted.store(true, Ordering::SeqCst);
        Self::deliver(&sink, CaptureEvent::Closed);
    }

    /// Send to the current sink, forgetting it once its session is gone
    fn deliver(sink: &Mutex<Option<CaptureSink>>, event: CaptureEvent) {
        let Ok(mut slot) = sink.lock() else {
            return;
        };
        if let Some(current) = slot.as_ref() {
            if !current.send(event) {
                *slot = None;
            }
        }
    }

    fn set_sink(&self, sink: Option<CaptureSink>) {
        if let Ok(mut slot) = self.sink.lock() {
            *slot = sink;
        }
    }
}

impl CaptureStream for LineCapture {
    fn open(&mut self, sink: CaptureSink) -> Result<(), CaptureError> {
        if self.exhausted.load(Ordering::SeqCst) {
            return Err(CaptureError::Open("input already ended".to_string()));
        }
        self.set_sink(Some(sink));

        if let Some(reader) = self.reader.take() {
            let sink = self.sink.clone();
            let exhausted = self.exhausted.clone();
            thread::spawn(move || Self::forward_lines(reader, sink, exhausted));
        }
        Ok(())
    }

    fn close(&mut self) {
        self.set_sink(None);
    }
}

impl Drop for LineCapture {
    fn drop(&mut self) {
        self.close();
    }
}
