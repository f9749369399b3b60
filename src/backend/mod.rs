//! HTTP client for the robot dashboard API.
//!
//! Implements both collaborator contracts of the engine: [`CatalogSource`]
//! (detections and rooms) and [`DispatchTarget`] (navigation, move-back and
//! patrol endpoints). All requests carry the bearer token from the config.
//!
//! [`CatalogSource`]: crate::catalog::CatalogSource
//! [`DispatchTarget`]: crate::dispatch::DispatchTarget

mod client;

pub use client::DashboardClient;
