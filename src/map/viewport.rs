//! The map currently on screen, plus click capture and marker overlay.

use serde::Serialize;

use super::frame::{FrameError, MapFrame, WorldPoint};
use crate::catalog::EntityCatalog;
use crate::domain::{EntityId, ResolvedIntent};

/// A click captured against a specific displayed frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapClick {
    pub px: f64,
    pub py: f64,
    /// Frame generation the click was made on
    pub generation: u64,
}

/// A catalog entity projected onto the map image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayMarker {
    pub entity_id: EntityId,
    pub label: String,
    pub px: f64,
    pub py: f64,
}

/// Holds the frame of the displayed map image
///
/// Replacing the frame bumps the generation, which invalidates every click
/// captured on the previous image.
#[derive(Debug, Clone)]
pub struct MapViewport {
    frame: MapFrame,
    generation: u64,
}

impl MapViewport {
    pub fn new(frame: MapFrame) -> Self {
        Self {
            frame,
            generation: 1,
        }
    }

    pub fn frame(&self) -> &MapFrame {
        &self.frame
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Swap the displayed map geometry
    pub fn replace_frame(&mut self, frame: MapFrame) {
        self.frame = frame;
        self.generation += 1;
        tracing::debug!("Map frame replaced (generation {})", self.generation);
    }

    /// Record a click on the current image
    pub fn click(&self, px: f64, py: f64) -> MapClick {
        MapClick {
            px,
            py,
            generation: self.generation,
        }
    }

    /// World position of a click, if it is still valid for the current frame
    pub fn click_to_world(&self, click: &MapClick) -> Result<WorldPoint, FrameError> {
        if click.generation != self.generation {
            return Err(FrameError::StaleFrame {
                clicked: click.generation,
                current: self.generation,
            });
        }
        self.frame.checked_pixel_to_world(click.px, click.py)
    }

    /// Navigation intent for a click, bypassing transcript matching entirely
    pub fn click_to_intent(&self, click: &MapClick) -> Result<ResolvedIntent, FrameError> {
        let world = self.click_to_world(click)?;
        Ok(ResolvedIntent::NavigateToCoordinate {
            x: world.x,
            y: world.y,
        })
    }

    /// Project every catalog entity that falls on the image
    pub fn overlay(&self, catalog: &EntityCatalog) -> Vec<OverlayMarker> {
        catalog
            .entities()
            .iter()
            .filter_map(|entity| {
                let pos = entity.world_position;
                let pixel = self.frame.world_to_pixel(pos.x, pos.y);
                if !self.frame.contains(pixel.px, pixel.py) {
                    return None;
                }
                Some(OverlayMarker {
                    entity_id: entity.id,
                    label: entity.label.clone(),
                    px: pixel.px,
                    py: pixel.py,
                })
            })
            .collect()
    }
}
