//! The quad region entity and its store.

mod store;

pub use store::{ImportOutcome, QuadStore};

use bevy::math::{BVec2, Vec2};

use crate::constants::{DEFAULT_PIVOT, DEFAULT_QUAD_NAME};
use crate::geometry::{MinMax, OriginExtent};

/// Stable handle to a quad inside a [`QuadStore`].
///
/// Handles are never reused, so a handle to a deleted quad simply resolves to `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuadId(u64);

impl QuadId {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// An axis-aligned rectangular region with a name and a fractional pivot.
///
/// `corners` are the authoring bounds. The rendered rectangle is centered on the
/// same origin but grows by `padding`, which is `(1, 1)` for quads drawn by drag so
/// that the pixel-center corners cover their pixels completely.
#[derive(Debug, Clone, PartialEq)]
pub struct Quad {
    corners: MinMax,
    origin: Vec2,
    extent: Vec2,
    padding: Vec2,
    pivot: Vec2,
    name: String,
    selected: bool,
    label_revision: u32,
}

/// Read-only snapshot handed to selection observers.
#[derive(Debug, Clone, PartialEq)]
pub struct QuadView {
    pub id: QuadId,
    pub name: String,
    pub extent: Vec2,
    pub pivot: Vec2,
    pub min: Vec2,
    pub max: Vec2,
}

impl Quad {
    pub fn new(a: Vec2, b: Vec2, apply_padding: bool) -> Self {
        let padding = if apply_padding { Vec2::ONE } else { Vec2::ZERO };
        let mut quad = Self {
            corners: MinMax::from_corners(a, b),
            origin: Vec2::ZERO,
            extent: Vec2::ZERO,
            padding,
            pivot: DEFAULT_PIVOT,
            name: DEFAULT_QUAD_NAME.to_string(),
            selected: false,
            label_revision: 0,
        };
        quad.redraw(a, b);
        quad
    }

    /// Replace the bounds with exact, unpadded corners.
    pub fn set_corners(&mut self, a: Vec2, b: Vec2) {
        self.padding = Vec2::ZERO;
        self.redraw(a, b);
    }

    /// Replace the bounds, keeping the current padding.
    pub fn redraw(&mut self, a: Vec2, b: Vec2) {
        self.corners = MinMax::from_corners(a, b);
        let OriginExtent { origin, extent } = self.corners.to_origin_extent();
        self.origin = origin;
        self.extent = extent + self.padding;
    }

    /// Returns false when the name is unchanged.
    pub fn rename(&mut self, name: &str) -> bool {
        if self.name == name {
            return false;
        }
        self.name = name.to_string();
        self.label_revision = self.label_revision.wrapping_add(1);
        true
    }

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_pivot(&mut self, pivot: Vec2) {
        self.pivot = pivot;
    }

    /// Move the whole rectangle.
    pub fn translate(&mut self, delta: Vec2) {
        self.origin += delta;
        self.sync_corners();
    }

    /// Move one edge by a barrier-masked delta while the opposite edge stays put.
    ///
    /// Returns the axes on which the drag pushed the edge through the opposite one.
    /// The quad is normalized in that case so its extent stays non-negative.
    pub fn scale_edge(&mut self, delta: Vec2, barrier: Vec2) -> BVec2 {
        self.extent += delta;
        self.origin += barrier * 0.5 * delta;

        // Padding stays outside the authoring bounds, so flip on the unpadded span
        let unpadded = self.extent - self.padding;
        let flipped = unpadded.cmplt(Vec2::ZERO);
        if flipped.any() {
            let normalized = OriginExtent::new(self.origin, unpadded).normalized();
            self.origin = normalized.origin;
            self.extent = normalized.extent + self.padding;
        }
        self.sync_corners();
        flipped
    }

    /// Shift the pivot by a world-space delta, expressed as a fraction of the extent.
    pub fn shift_pivot(&mut self, delta: Vec2) {
        if self.extent.x != 0.0 {
            self.pivot.x += delta.x / self.extent.x;
        }
        if self.extent.y != 0.0 {
            self.pivot.y += delta.y / self.extent.y;
        }
    }

    fn sync_corners(&mut self) {
        let half = (self.extent - self.padding) / 2.0;
        self.corners = MinMax::from_corners(self.origin - half, self.origin + half);
    }

    /// Rendered rectangle, padding included.
    pub fn render_rect(&self) -> MinMax {
        OriginExtent::new(self.origin, self.extent).to_min_max()
    }

    /// Bounds written to the atlas document.
    pub fn export_min_max(&self) -> MinMax {
        self.corners
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.render_rect().contains(point)
    }

    pub fn view(&self, id: QuadId) -> QuadView {
        let bounds = self.export_min_max();
        QuadView {
            id,
            name: self.name.clone(),
            extent: self.extent,
            pivot: self.pivot,
            min: bounds.min,
            max: bounds.max,
        }
    }

    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    pub fn pivot(&self) -> Vec2 {
        self.pivot
    }

    /// World position of the pivot marker (pixel-center aligned).
    pub fn pivot_world(&self) -> Vec2 {
        self.origin - self.extent / 2.0 + Vec2::splat(0.5) + self.extent * self.pivot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Bumped on every effective rename.
    pub fn label_revision(&self) -> u32 {
        self.label_revision
    }
}
