//! Transform gizmo: the on-canvas handle set that scales, moves and re-pivots the
//! active quad.
//!
//! The gizmo never owns a quad. It holds a [`QuadId`] and borrows the
//! [`QuadStore`] for every call, so deleting the attached quad can at worst leave
//! a handle that resolves to nothing; the next call falls back to `Idle`.

use bevy::math::Vec2;

use crate::common::HoverCursor;
use crate::constants::{ARROW_HANDLE_FACTOR, HANDLE_THICKNESS, PLANE_HANDLE_FRACTION};
use crate::geometry::OriginExtent;
use crate::quad::{Quad, QuadId, QuadStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GizmoMode {
    Scale,
    Translate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoHandle {
    Bottom,
    Left,
    Top,
    Right,
    Plane,
    ArrowX,
    ArrowY,
}

impl GizmoHandle {
    /// Hit-test priority: the first handle containing the pointer wins.
    pub const HIT_ORDER: [GizmoHandle; 7] = [
        GizmoHandle::Bottom,
        GizmoHandle::Left,
        GizmoHandle::Top,
        GizmoHandle::Right,
        GizmoHandle::Plane,
        GizmoHandle::ArrowX,
        GizmoHandle::ArrowY,
    ];

    pub fn mode(&self) -> GizmoMode {
        match self {
            GizmoHandle::Bottom | GizmoHandle::Left | GizmoHandle::Top | GizmoHandle::Right => {
                GizmoMode::Scale
            }
            GizmoHandle::Plane | GizmoHandle::ArrowX | GizmoHandle::ArrowY => {
                GizmoMode::Translate
            }
        }
    }

    /// Per-axis mask applied to drag deltas. Edge handles carry the direction of
    /// the edge so that dragging outward grows the quad.
    pub fn barrier(&self) -> Vec2 {
        match self {
            GizmoHandle::Bottom => Vec2::new(0.0, -1.0),
            GizmoHandle::Left => Vec2::new(-1.0, 0.0),
            GizmoHandle::Top => Vec2::new(0.0, 1.0),
            GizmoHandle::Right => Vec2::new(1.0, 0.0),
            GizmoHandle::Plane => Vec2::new(1.0, 1.0),
            GizmoHandle::ArrowX => Vec2::new(1.0, 0.0),
            GizmoHandle::ArrowY => Vec2::new(0.0, 1.0),
        }
    }

    /// The edge that ends up under the pointer after the quad flipped on `axis`.
    fn flipped(self, flipped_x: bool, flipped_y: bool) -> Self {
        match self {
            GizmoHandle::Left if flipped_x => GizmoHandle::Right,
            GizmoHandle::Right if flipped_x => GizmoHandle::Left,
            GizmoHandle::Bottom if flipped_y => GizmoHandle::Top,
            GizmoHandle::Top if flipped_y => GizmoHandle::Bottom,
            other => other,
        }
    }

    fn index(&self) -> usize {
        match self {
            GizmoHandle::Bottom => 0,
            GizmoHandle::Left => 1,
            GizmoHandle::Top => 2,
            GizmoHandle::Right => 3,
            GizmoHandle::Plane => 4,
            GizmoHandle::ArrowX => 5,
            GizmoHandle::ArrowY => 6,
        }
    }
}

/// Pointer position in world space, raw and snapped to the pixel grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub world: Vec2,
    pub pixel: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GizmoState {
    Idle,
    Hovering {
        quad: QuadId,
        handle: Option<GizmoHandle>,
    },
    Dragging {
        quad: QuadId,
        handle: GizmoHandle,
        drag_start: Vec2,
    },
}

/// World-space handle rectangles for the attached quad.
#[derive(Debug, Clone, PartialEq)]
pub struct HandleLayout {
    rects: [OriginExtent; 7],
    /// World position of the pivot marker.
    pub pivot: Vec2,
    /// Side of the square outline drawn around the pivot marker.
    pub pivot_outline: f32,
}

impl HandleLayout {
    pub fn compute(quad: &Quad, zoom: f32) -> Self {
        let origin = quad.origin();
        let extent = quad.extent();
        let thickness = HANDLE_THICKNESS / zoom;
        let plane = extent.min_element() * PLANE_HANDLE_FRACTION;
        let arrows = extent.max_element() * ARROW_HANDLE_FACTOR;
        let half = extent / 2.0;

        let rect = |offset: Vec2, size: Vec2| OriginExtent::new(origin + offset, size);

        Self {
            rects: [
                rect(Vec2::new(0.0, -half.y), Vec2::new(extent.x, thickness)),
                rect(Vec2::new(-half.x, 0.0), Vec2::new(thickness, extent.y)),
                rect(Vec2::new(0.0, half.y), Vec2::new(extent.x, thickness)),
                rect(Vec2::new(half.x, 0.0), Vec2::new(thickness, extent.y)),
                rect(Vec2::ZERO, Vec2::splat(plane)),
                rect(Vec2::ZERO, Vec2::new(arrows, plane / zoom)),
                rect(Vec2::ZERO, Vec2::new(plane / zoom, arrows)),
            ],
            pivot: quad.pivot_world(),
            pivot_outline: plane * 0.5,
        }
    }

    pub fn rect(&self, handle: GizmoHandle) -> OriginExtent {
        self.rects[handle.index()]
    }

    pub fn hit(&self, point: Vec2) -> Option<GizmoHandle> {
        GizmoHandle::HIT_ORDER
            .into_iter()
            .find(|handle| self.rect(*handle).to_min_max().contains(point))
    }
}

#[derive(Debug, Clone)]
pub struct Gizmo {
    state: GizmoState,
    layout: Option<HandleLayout>,
    zoom: f32,
}

impl Default for Gizmo {
    fn default() -> Self {
        Self {
            state: GizmoState::Idle,
            layout: None,
            zoom: 1.0,
        }
    }
}

impl Gizmo {
    pub fn state(&self) -> GizmoState {
        self.state
    }

    pub fn layout(&self) -> Option<&HandleLayout> {
        self.layout.as_ref()
    }

    pub fn attached(&self) -> Option<QuadId> {
        match self.state {
            GizmoState::Idle => None,
            GizmoState::Hovering { quad, .. } | GizmoState::Dragging { quad, .. } => Some(quad),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, GizmoState::Dragging { .. })
    }

    /// Handle currently hovered or dragged.
    pub fn active_handle(&self) -> Option<GizmoHandle> {
        match self.state {
            GizmoState::Idle => None,
            GizmoState::Hovering { handle, .. } => handle,
            GizmoState::Dragging { handle, .. } => Some(handle),
        }
    }

    pub fn attach(&mut self, quad: QuadId, store: &QuadStore, zoom: f32) {
        self.state = GizmoState::Hovering { quad, handle: None };
        self.refresh(store, zoom);
    }

    pub fn detach(&mut self) {
        self.state = GizmoState::Idle;
        self.layout = None;
    }

    /// Recompute the handle layout for the current zoom.
    pub fn refresh(&mut self, store: &QuadStore, zoom: f32) {
        self.zoom = zoom;
        let Some(id) = self.attached() else {
            self.layout = None;
            return;
        };
        match store.get(id) {
            Some(quad) => self.layout = Some(HandleLayout::compute(quad, zoom)),
            None => self.detach(),
        }
    }

    pub fn on_pointer_move(
        &mut self,
        sample: PointerSample,
        pivot_modifier: bool,
        store: &mut QuadStore,
    ) -> HoverCursor {
        let Some(id) = self.attached() else {
            return HoverCursor::Default;
        };
        let Some(quad) = store.get_mut(id) else {
            self.detach();
            return HoverCursor::Default;
        };

        match self.state {
            GizmoState::Idle => HoverCursor::Default,
            GizmoState::Hovering { quad: id, .. } => {
                let handle = self
                    .layout
                    .as_ref()
                    .and_then(|layout| layout.hit(sample.world));
                self.state = GizmoState::Hovering { quad: id, handle };
                if handle.is_some() {
                    HoverCursor::Pointer
                } else {
                    HoverCursor::Default
                }
            }
            GizmoState::Dragging {
                quad: id,
                handle,
                drag_start,
            } => {
                let barrier = handle.barrier();
                let delta = (sample.pixel - drag_start) * barrier;
                if delta == Vec2::ZERO {
                    return HoverCursor::Pointer;
                }

                let mut handle = handle;
                match handle.mode() {
                    GizmoMode::Scale => {
                        let flipped = quad.scale_edge(delta, barrier);
                        handle = handle.flipped(flipped.x, flipped.y);
                    }
                    GizmoMode::Translate if pivot_modifier => quad.shift_pivot(delta),
                    GizmoMode::Translate => quad.translate(delta),
                }

                self.layout = Some(HandleLayout::compute(quad, self.zoom));
                self.state = GizmoState::Dragging {
                    quad: id,
                    handle,
                    drag_start: sample.pixel,
                };
                HoverCursor::Pointer
            }
        }
    }

    /// Start a drag if a handle is hovered. Returns whether a drag started.
    pub fn on_pointer_down(&mut self, sample: PointerSample) -> bool {
        match self.state {
            GizmoState::Hovering {
                quad,
                handle: Some(handle),
            } => {
                self.state = GizmoState::Dragging {
                    quad,
                    handle,
                    drag_start: sample.pixel,
                };
                true
            }
            _ => false,
        }
    }

    /// End any drag and clear the hovered handle. Returns whether a drag was in
    /// progress.
    pub fn on_pointer_up(&mut self) -> bool {
        match self.state {
            GizmoState::Idle => false,
            GizmoState::Hovering { quad, .. } => {
                self.state = GizmoState::Hovering { quad, handle: None };
                false
            }
            GizmoState::Dragging { quad, .. } => {
                self.state = GizmoState::Hovering { quad, handle: None };
                true
            }
        }
    }
}
