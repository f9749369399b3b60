//! Catalog entries as reported by the dashboard backend.

use serde::{Deserialize, Serialize};

/// Backend identifier of a detected object
pub type EntityId = i64;

/// Backend identifier of a room
pub type RoomId = i64;

/// A point in robot world coordinates (map frame, meters)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// A labeled, located object known to the system
///
/// Entities are immutable per catalog snapshot. Several entities may share
/// a label; the room is what tells them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub label: String,
    /// Where the robot should drive to reach the object
    #[serde(rename = "position_nav", alias = "position")]
    pub world_position: Position,
    #[serde(default)]
    pub room_id: Option<RoomId>,
}

impl Entity {
    pub fn new(id: EntityId, label: impl Into<String>, world_position: Position) -> Self {
        Self {
            id,
            label: label.into(),
            world_position,
            room_id: None,
        }
    }

    /// Place the entity in a room
    pub fn in_room(mut self, room_id: RoomId) -> Self {
        self.room_id = Some(room_id);
        self
    }

    /// Case-insensitive label comparison
    pub fn has_label(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }
}

/// A named room of the mapped area
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    #[serde(rename = "position_start", default)]
    pub bounds_start: Position,
    #[serde(rename = "position_end", default)]
    pub bounds_end: Position,
    #[serde(rename = "position_ref", default)]
    pub ref_position: Position,
}

impl Room {
    pub fn new(id: RoomId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            bounds_start: Position::default(),
            bounds_end: Position::default(),
            ref_position: Position::default(),
        }
    }

    /// Case-insensitive exact name comparison
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}
