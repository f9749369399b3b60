//! Blocking dashboard client built on ureq.

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::catalog::CatalogSource;
use crate::config::BackendSettings;
use crate::dispatch::{DispatchError, DispatchTarget};
use crate::domain::{Entity, EntityId, Room};

/// Client for the dashboard REST API
#[derive(Clone)]
pub struct DashboardClient {
    base_url: String,
    token: Option<String>,
    robot_id: Option<i64>,
    client: ureq::Agent,
}

impl DashboardClient {
    /// Create a client from backend settings
    pub fn from_settings(settings: &BackendSettings) -> Self {
        let client = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(5))
            .timeout_read(Duration::from_secs(settings.timeout_secs))
            .build();

        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            robot_id: settings.robot_id,
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: ureq::Request) -> ureq::Request {
        match &self.token {
            Some(token) => request.set("Authorization", &format!("Bearer {}", token)),
            None => request,
        }
    }

    fn get(&self, path: &str) -> ureq::Request {
        self.authorize(self.client.get(&self.url(path)))
    }

    fn post(&self, path: &str) -> ureq::Request {
        self.authorize(self.client.post(&self.url(path)))
    }

    /// Send a POST and map the response onto the dispatch error taxonomy
    fn send_action(&self, path: &str, body: Option<&CoordinateGoal>) -> Result<(), DispatchError> {
        tracing::debug!("POST {}", path);
        let request = self.post(path);
        let result = match body {
            Some(body) => request.send_json(body),
            None => request.call(),
        };

        match result {
            Ok(_) => Ok(()),
            Err(ureq::Error::Status(status, _)) => Err(DispatchError::Rejected { status }),
            Err(ureq::Error::Transport(e)) => Err(DispatchError::Transport(e.to_string())),
        }
    }
}

#[derive(Debug, Serialize)]
struct CoordinateGoal {
    x: f64,
    y: f64,
}

impl CatalogSource for DashboardClient {
    fn fetch_entities(&self) -> Result<Vec<Entity>> {
        let path = match self.robot_id {
            Some(robot_id) => format!("/detections?robot_id={}", robot_id),
            None => "/detections".to_string(),
        };
        let entities: Vec<Entity> = self
            .get(&path)
            .call()
            .context("Failed to load detections")?
            .into_json()
            .context("Failed to parse detections response")?;
        Ok(entities)
    }

    fn fetch_rooms(&self) -> Result<Vec<Room>> {
        let rooms: Vec<Room> = self
            .get("/detections/rooms")
            .call()
            .context("Failed to load rooms")?
            .into_json()
            .context("Failed to parse rooms response")?;
        Ok(rooms)
    }
}

impl DispatchTarget for DashboardClient {
    fn navigate_to_entity(&self, entity_id: EntityId) -> Result<(), DispatchError> {
        self.send_action(&format!("/ros/{}/navigate", entity_id), None)
    }

    fn navigate_to_coordinate(&self, x: f64, y: f64) -> Result<(), DispatchError> {
        self.send_action("/ros/navigate", Some(&CoordinateGoal { x, y }))
    }

    fn move_back(&self) -> Result<(), DispatchError> {
        self.send_action("/ros/move-back", None)
    }

    fn set_patrol(&self, active: bool) -> Result<(), DispatchError> {
        let path = if active {
            "/ros/patrol/start"
        } else {
            "/ros/patrol/stop"
        };
        self.send_action(path, None)
    }
}

impl std::fmt::Debug for DashboardClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardClient")
            .field("base_url", &self.base_url)
            .field("robot_id", &self.robot_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
