//! Shared fakes for session and dispatch integration tests

#![allow(dead_code)]

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;

use robonav::catalog::{CatalogSnapshot, CatalogSource};
use robonav::dispatch::{DispatchError, DispatchTarget};
use robonav::voice::{CaptureError, CaptureSink, CaptureStream, ListeningSession, SessionEvent};
use robonav::{Entity, EntityId, Position, Room};

/// Kitchen (1) and living room (2), a chair in each, and a table without a room
pub fn sample_snapshot() -> CatalogSnapshot {
    CatalogSnapshot {
        entities: vec![
            Entity::new(10, "chair", Position::new(1.0, 2.0, 0.0)).in_room(1),
            Entity::new(11, "chair", Position::new(-3.0, 0.5, 0.0)).in_room(2),
            Entity::new(12, "table", Position::new(4.0, -1.0, 0.0)),
        ],
        rooms: vec![Room::new(1, "kitchen"), Room::new(2, "living room")],
    }
}

/// Catalog source that always returns the same snapshot
pub struct StaticSource(pub CatalogSnapshot);

impl CatalogSource for StaticSource {
    fn fetch_entities(&self) -> Result<Vec<Entity>> {
        Ok(self.0.entities.clone())
    }

    fn fetch_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.0.rooms.clone())
    }
}

/// One call received by [`RecordingTarget`]
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Entity(EntityId),
    Coordinate(f64, f64),
    MoveBack,
    Patrol(bool),
}

/// Dispatch target that records every call and optionally rejects them
#[derive(Default)]
pub struct RecordingTarget {
    pub calls: Mutex<Vec<Call>>,
    pub reject_with: Option<u16>,
    /// Simulated network latency per call
    pub delay: Option<Duration>,
}

impl RecordingTarget {
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), DispatchError> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.calls.lock().unwrap().push(call);
        match self.reject_with {
            Some(status) => Err(DispatchError::Rejected { status }),
            None => Ok(()),
        }
    }
}

impl DispatchTarget for RecordingTarget {
    fn navigate_to_entity(&self, entity_id: EntityId) -> Result<(), DispatchError> {
        self.record(Call::Entity(entity_id))
    }

    fn navigate_to_coordinate(&self, x: f64, y: f64) -> Result<(), DispatchError> {
        self.record(Call::Coordinate(x, y))
    }

    fn move_back(&self) -> Result<(), DispatchError> {
        self.record(Call::MoveBack)
    }

    fn set_patrol(&self, active: bool) -> Result<(), DispatchError> {
        self.record(Call::Patrol(active))
    }
}

/// Capture stream driven by the test through the sink it was opened with
#[derive(Clone, Default)]
pub struct ManualCapture {
    sink: Arc<Mutex<Option<CaptureSink>>>,
}

impl ManualCapture {
    pub fn sink(&self) -> CaptureSink {
        self.sink
            .lock()
            .unwrap()
            .clone()
            .expect("capture stream was opened")
    }
}

impl CaptureStream for ManualCapture {
    fn open(&mut self, sink: CaptureSink) -> Result<(), CaptureError> {
        *self.sink.lock().unwrap() = Some(sink);
        Ok(())
    }

    fn close(&mut self) {}
}

/// Drain session events until `done` matches one, or panic after a few seconds
pub fn wait_for(
    session: &mut ListeningSession,
    mut done: impl FnMut(&SessionEvent) -> bool,
) -> Vec<SessionEvent> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut seen = Vec::new();
    while Instant::now() < deadline {
        for event in session.wait_events(Duration::from_millis(50)) {
            let finished = done(&event);
            seen.push(event);
            if finished {
                return seen;
            }
        }
    }
    panic!("timed out waiting for session event; saw {:?}", seen);
}

/// Block on a gate channel, used to hold a dispatch open
pub fn hold(gate: &Mutex<Receiver<()>>) {
    let _ = gate.lock().unwrap().recv();
}
