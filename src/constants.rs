//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

use bevy::math::Vec2;

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1600.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 900.0;

/// Fraction of the current zoom added per wheel unit
pub const ZOOM_STEP: f32 = 0.05;

pub const MIN_ZOOM: f32 = 0.02;
pub const MAX_ZOOM: f32 = 64.0;

/// Zoom delta per scroll line; scrolling down zooms in
pub const WHEEL_LINE_DELTA: f32 = 1.0;

/// Pixel-scroll devices report many small steps; scale them down to line units
pub const WHEEL_PIXEL_SCALE: f32 = 0.05;

/// Screen-space thickness of the gizmo edge handles in pixels
pub const HANDLE_THICKNESS: f32 = 16.0;

/// Plane handle side as a fraction of the shorter quad side
pub const PLANE_HANDLE_FRACTION: f32 = 0.25;

/// Arrow handle length as a multiple of the longer quad side
pub const ARROW_HANDLE_FACTOR: f32 = 1.1;

pub const DEFAULT_QUAD_NAME: &str = "texture";

pub const DEFAULT_PIVOT: Vec2 = Vec2::splat(0.5);

/// Suggested file name in the export dialog
pub const EXPORT_FILENAME: &str = "spritesheet.json";

/// Length of the world axis reference lines
pub const AXIS_LENGTH: f32 = 1000.0;

/// Image extensions offered in the background picker
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp", "tiff"];
