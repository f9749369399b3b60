//! Affine frame binding one map image to world coordinates.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by map geometry
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("Map resolution must be a positive number of world units per pixel, got {0}")]
    InvalidResolution(f64),

    #[error("Map dimensions must be non-zero, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Map origin must be finite, got ({x}, {y})")]
    InvalidOrigin { x: f64, y: f64 },

    #[error("Pixel ({px}, {py}) lies outside the {width}x{height} map")]
    OutOfBounds {
        px: f64,
        py: f64,
        width: u32,
        height: u32,
    },

    #[error("Click was captured on map frame {clicked}, but the current frame is {current}")]
    StaleFrame { clicked: u64, current: u64 },
}

/// A point in map-image pixel space (origin top-left)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub px: f64,
    pub py: f64,
}

/// A point in robot world space (Y up)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldPoint {
    pub x: f64,
    pub y: f64,
}

/// Geometry of one rendered map image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapFrame {
    origin_x: f64,
    origin_y: f64,
    resolution: f64,
    pixel_width: u32,
    pixel_height: u32,
}

impl MapFrame {
    /// Build a frame, rejecting geometry that cannot be inverted
    pub fn new(
        origin_x: f64,
        origin_y: f64,
        resolution: f64,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, FrameError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(FrameError::InvalidResolution(resolution));
        }
        if pixel_width == 0 || pixel_height == 0 {
            return Err(FrameError::InvalidDimensions {
                width: pixel_width,
                height: pixel_height,
            });
        }
        if !origin_x.is_finite() || !origin_y.is_finite() {
            return Err(FrameError::InvalidOrigin {
                x: origin_x,
                y: origin_y,
            });
        }

        Ok(Self {
            origin_x,
            origin_y,
            resolution,
            pixel_width,
            pixel_height,
        })
    }

    pub fn origin(&self) -> WorldPoint {
        WorldPoint {
            x: self.origin_x,
            y: self.origin_y,
        }
    }

    /// World units per pixel
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Convert an image pixel to world coordinates
    pub fn pixel_to_world(&self, px: f64, py: f64) -> WorldPoint {
        WorldPoint {
            x: self.origin_x + px * self.resolution,
            y: self.origin_y + (f64::from(self.pixel_height) - py) * self.resolution,
        }
    }

    /// Convert world coordinates to an image pixel (exact inverse of `pixel_to_world`)
    pub fn world_to_pixel(&self, x: f64, y: f64) -> PixelPoint {
        PixelPoint {
            px: (x - self.origin_x) / self.resolution,
            py: f64::from(self.pixel_height) - (y - self.origin_y) / self.resolution,
        }
    }

    /// Whether the pixel lies on the image (edges inclusive)
    pub fn contains(&self, px: f64, py: f64) -> bool {
        (0.0..=f64::from(self.pixel_width)).contains(&px)
            && (0.0..=f64::from(self.pixel_height)).contains(&py)
    }

    /// Like `pixel_to_world`, but refuses pixels outside the image
    pub fn checked_pixel_to_world(&self, px: f64, py: f64) -> Result<WorldPoint, FrameError> {
        if !self.contains(px, py) {
            return Err(FrameError::OutOfBounds {
                px,
                py,
                width: self.pixel_width,
                height: self.pixel_height,
            });
        }
        Ok(self.pixel_to_world(px, py))
    }
}
