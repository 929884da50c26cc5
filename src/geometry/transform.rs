//! Coordinate pipeline between the pointer surface and world space.
//!
//! The surface has its origin at the top-left with +Y pointing down. World space
//! uses +Y up; the visible area at zoom 1 spans `x in [0, width]` and
//! `y in [-height, 0]`, shifted by the camera pan. Zoom scales about the
//! center of that area.

use bevy::math::Vec2;

use crate::constants::{MAX_ZOOM, MIN_ZOOM, ZOOM_STEP};

/// Size of the drawing surface in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

/// Camera pan offset and zoom factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    pub pan: Vec2,
    pub zoom: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl CameraState {
    /// Apply one wheel step: `zoom += zoom * ZOOM_STEP * delta`, kept inside
    /// `[MIN_ZOOM, MAX_ZOOM]`.
    pub fn apply_wheel(&mut self, delta: f32) {
        let zoom = self.zoom + self.zoom * ZOOM_STEP * delta;
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            self.zoom
        };
    }

    /// Shift the pan so that the world point under `anchor` moves to `current`.
    pub fn drag_pan(&mut self, anchor: Vec2, current: Vec2) {
        self.pan += anchor - current;
    }

    /// World-space center of the visible area (the render camera's translation).
    pub fn view_center(&self, surface: SurfaceSize) -> Vec2 {
        Vec2::new(surface.width / 2.0, -surface.height / 2.0) + self.pan
    }

    /// Orthographic scale of the render camera (world units per surface pixel).
    pub fn view_scale(&self) -> f32 {
        1.0 / self.zoom
    }
}

/// Surface pixel position to normalized device coordinates (Y flipped).
pub fn surface_to_ndc(point: Vec2, surface: SurfaceSize) -> Vec2 {
    Vec2::new(
        point.x / surface.width * 2.0 - 1.0,
        -(point.y / surface.height * 2.0 - 1.0),
    )
}

/// Un-project normalized device coordinates through the orthographic camera.
pub fn ndc_to_world(ndc: Vec2, camera: &CameraState, surface: SurfaceSize) -> Vec2 {
    let half_span = surface.as_vec2() / (2.0 * camera.zoom);
    camera.view_center(surface) + ndc * half_span
}

pub fn world_to_ndc(world: Vec2, camera: &CameraState, surface: SurfaceSize) -> Vec2 {
    let half_span = surface.as_vec2() / (2.0 * camera.zoom);
    (world - camera.view_center(surface)) / half_span
}

pub fn surface_to_world(point: Vec2, camera: &CameraState, surface: SurfaceSize) -> Vec2 {
    ndc_to_world(surface_to_ndc(point, surface), camera, surface)
}

pub fn world_to_surface(world: Vec2, camera: &CameraState, surface: SurfaceSize) -> Vec2 {
    let ndc = world_to_ndc(world, camera, surface);
    Vec2::new(
        (ndc.x + 1.0) / 2.0 * surface.width,
        (1.0 - ndc.y) / 2.0 * surface.height,
    )
}

/// Snap to the center of the unit pixel containing `world`.
///
/// Equivalent to `round_half_up(v - 0.5) + 0.5` per axis.
pub fn world_to_pixel_snap(world: Vec2) -> Vec2 {
    world.floor() + Vec2::splat(0.5)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec2, b: Vec2) -> bool {
        (a - b).abs().max_element() < 1e-4
    }

    const SURFACE: SurfaceSize = SurfaceSize {
        width: 800.0,
        height: 600.0,
    };

    #[test]
    fn test_surface_to_ndc_corners() {
        assert_eq!(surface_to_ndc(Vec2::ZERO, SURFACE), Vec2::new(-1.0, 1.0));
        assert_eq!(
            surface_to_ndc(Vec2::new(800.0, 600.0), SURFACE),
            Vec2::new(1.0, -1.0)
        );
        assert_eq!(
            surface_to_ndc(Vec2::new(400.0, 300.0), SURFACE),
            Vec2::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_surface_to_world_at_unit_zoom() {
        let camera = CameraState::default();
        let world = surface_to_world(Vec2::new(120.0, 45.0), &camera, SURFACE);
        assert!(approx(world, Vec2::new(120.0, -45.0)));
    }

    #[test]
    fn test_pan_shifts_world() {
        let camera = CameraState {
            pan: Vec2::new(10.0, -20.0),
            zoom: 1.0,
        };
        let world = surface_to_world(Vec2::new(0.0, 0.0), &camera, SURFACE);
        assert!(approx(world, Vec2::new(10.0, -20.0)));
    }

    #[test]
    fn test_zoom_scales_about_view_center() {
        let camera = CameraState {
            pan: Vec2::ZERO,
            zoom: 2.0,
        };
        // Center of the surface stays fixed
        let center = surface_to_world(Vec2::new(400.0, 300.0), &camera, SURFACE);
        assert!(approx(center, Vec2::new(400.0, -300.0)));

        // Top-left corner moves halfway toward the center
        let corner = surface_to_world(Vec2::ZERO, &camera, SURFACE);
        assert!(approx(corner, Vec2::new(200.0, -150.0)));
    }

    #[test]
    fn test_world_to_surface_inverts_surface_to_world() {
        let camera = CameraState {
            pan: Vec2::new(-37.0, 12.5),
            zoom: 3.5,
        };
        let point = Vec2::new(123.0, 456.0);
        let world = surface_to_world(point, &camera, SURFACE);
        assert!(approx(world_to_surface(world, &camera, SURFACE), point));
    }

    #[test]
    fn test_zero_surface_does_not_panic() {
        let camera = CameraState::default();
        let world = surface_to_world(Vec2::new(5.0, 5.0), &camera, SurfaceSize::new(0.0, 0.0));
        assert!(!world.is_finite());
    }

    #[test]
    fn test_pixel_snap() {
        assert_eq!(
            world_to_pixel_snap(Vec2::new(2.3, 5.9)),
            Vec2::new(2.5, 5.5)
        );
        assert_eq!(
            world_to_pixel_snap(Vec2::new(-0.2, -3.0)),
            Vec2::new(-0.5, -2.5)
        );
    }

    #[test]
    fn test_pixel_snap_is_idempotent() {
        for v in [
            Vec2::new(2.3, 5.9),
            Vec2::new(-7.8, 0.0),
            Vec2::new(100.49, -100.51),
        ] {
            let once = world_to_pixel_snap(v);
            assert_eq!(world_to_pixel_snap(once), once);
        }
    }

    #[test]
    fn test_wheel_zoom_rule() {
        let mut camera = CameraState::default();
        camera.apply_wheel(2.0);
        assert!((camera.zoom - 1.1).abs() < 1e-6);
        camera.apply_wheel(-2.0);
        assert!((camera.zoom - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_wheel_zoom_is_clamped() {
        let mut camera = CameraState::default();
        camera.apply_wheel(-100.0);
        assert_eq!(camera.zoom, MIN_ZOOM);

        let mut camera = CameraState::default();
        for _ in 0..500 {
            camera.apply_wheel(10.0);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);

        let mut camera = CameraState::default();
        camera.apply_wheel(f32::NAN);
        assert_eq!(camera.zoom, 1.0);
    }

    #[test]
    fn test_drag_pan_keeps_anchor_under_cursor() {
        let mut camera = CameraState::default();
        let anchor = surface_to_world(Vec2::new(100.0, 100.0), &camera, SURFACE);
        // Pointer moved 30px right: the world under it is now anchor + 30
        let current = surface_to_world(Vec2::new(130.0, 100.0), &camera, SURFACE);
        camera.drag_pan(anchor, current);

        let under_pointer = surface_to_world(Vec2::new(130.0, 100.0), &camera, SURFACE);
        assert!(approx(under_pointer, anchor));
    }

    #[test]
    fn test_view_center_and_scale() {
        let camera = CameraState {
            pan: Vec2::new(5.0, 5.0),
            zoom: 4.0,
        };
        assert_eq!(camera.view_center(SURFACE), Vec2::new(405.0, -295.0));
        assert_eq!(camera.view_scale(), 0.25);
    }
}
