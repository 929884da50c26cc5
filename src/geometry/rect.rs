//! Axis-aligned rectangle representations and the normalization pass between them.

use bevy::math::Vec2;

/// Rectangle stored as its two extreme corners.
///
/// Values built through [`MinMax::from_corners`] always satisfy `min <= max`
/// componentwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinMax {
    pub min: Vec2,
    pub max: Vec2,
}

/// Rectangle stored as its geometric center and full width/height.
///
/// `extent` may be negative on an axis until it is converted back through
/// [`OriginExtent::to_min_max`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginExtent {
    pub origin: Vec2,
    pub extent: Vec2,
}

impl MinMax {
    /// Build a normalized rectangle from any two opposite corners.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn to_origin_extent(self) -> OriginExtent {
        let extent = self.max - self.min;
        OriginExtent {
            origin: self.min + extent / 2.0,
            extent,
        }
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Closed-interval containment test.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl OriginExtent {
    pub fn new(origin: Vec2, extent: Vec2) -> Self {
        Self { origin, extent }
    }

    /// Convert back to corners, swapping them on any axis with a negative extent.
    pub fn to_min_max(self) -> MinMax {
        let half = self.extent / 2.0;
        MinMax::from_corners(self.origin - half, self.origin + half)
    }

    /// Round-trip through [`MinMax`] so the extent is non-negative on both axes.
    pub fn normalized(self) -> Self {
        self.to_min_max().to_origin_extent()
    }
}
