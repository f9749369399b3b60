//! RoboNav - voice and map control for a mobile robot
//!
//! RoboNav turns spoken phrases into navigation goals. A transcript is
//! matched against a small rule table, the extracted intent is resolved
//! against the catalog of objects and rooms the robot has detected, and the
//! resulting goal is sent to the dashboard backend.
//!
//! ## Input Methods
//!
//! 1. **Voice**: a [`voice::ListeningSession`] consumes transcripts from a
//!    capture stream and dispatches every command it understands.
//!
//! 2. **Map clicks**: a [`map::MapViewport`] converts a pixel on the
//!    rendered map into a world coordinate goal.

pub mod backend;
pub mod catalog;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod domain;
pub mod map;
pub mod resolve;
pub mod voice;

pub use domain::*;
