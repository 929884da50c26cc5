//! Pure 2D geometry used by the editor core.
//!
//! - [`rect`] - min/max and origin/extent rectangle representations
//! - [`transform`] - surface, NDC, world and pixel coordinate conversions

pub mod rect;
pub mod transform;

pub use rect::{MinMax, OriginExtent};
pub use transform::{CameraState, SurfaceSize, world_to_pixel_snap};
