//! Map image geometry settings

use serde::{Deserialize, Serialize};

use crate::map::{FrameError, MapFrame};

/// Geometry of the map image served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSettings {
    /// World X of the bottom-left pixel
    #[serde(default = "default_origin_x")]
    pub origin_x: f64,

    /// World Y of the bottom-left pixel
    #[serde(default = "default_origin_y")]
    pub origin_y: f64,

    /// Meters per pixel
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_origin_x() -> f64 {
    -13.0
}

fn default_origin_y() -> f64 {
    -7.5
}

fn default_resolution() -> f64 {
    0.05
}

fn default_width() -> u32 {
    600
}

fn default_height() -> u32 {
    400
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            origin_x: default_origin_x(),
            origin_y: default_origin_y(),
            resolution: default_resolution(),
            width: default_width(),
            height: default_height(),
        }
    }
}

impl MapSettings {
    /// Validated frame for these settings
    pub fn frame(&self) -> Result<MapFrame, FrameError> {
        MapFrame::new(
            self.origin_x,
            self.origin_y,
            self.resolution,
            self.width,
            self.height,
        )
    }
}
