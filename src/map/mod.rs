//! Map geometry: pixel/world conversion for the rendered occupancy map.
//!
//! Pixel space has its origin at the top-left corner of the image with Y
//! growing downwards. World space is the robot map frame with Y growing
//! upwards, so every conversion flips the vertical axis.

mod frame;
mod viewport;

pub use frame::{FrameError, MapFrame, PixelPoint, WorldPoint};
pub use viewport::{MapClick, MapViewport, OverlayMarker};
