//! Core domain types for robonav

mod entity;
mod intent;

pub use entity::{Entity, EntityId, Position, Room, RoomId};
pub use intent::{FailureKind, RawIntent, ResolutionFailure, ResolvedIntent};
