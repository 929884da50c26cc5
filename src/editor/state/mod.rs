//! Editor controller: routes pointer, wheel and key input to the quad store and
//! the gizmo, and owns the camera, tool mode and active selection.
//!
//! Nothing here touches the ECS. The Bevy systems in `editor::input` translate
//! window input into calls on [`EditorState`] and the drawing systems read it back.

#[cfg(test)]
mod tests;

use std::path::PathBuf;

use bevy::prelude::*;

use crate::atlas::ExportedQuad;
use crate::common::HoverCursor;
use crate::editor::gizmo::{Gizmo, PointerSample};
use crate::geometry::{CameraState, MinMax, SurfaceSize, transform, world_to_pixel_snap};
use crate::quad::{ImportOutcome, Quad, QuadId, QuadStore, QuadView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Drag on the canvas to draw a new quad.
    #[default]
    Create,
    /// Click quads to select them and edit the active one with the gizmo.
    Select,
}

impl Tool {
    pub fn display_name(&self) -> &'static str {
        match self {
            Tool::Create => "Create",
            Tool::Select => "Select",
        }
    }

    pub fn shortcut(&self) -> &'static str {
        match self {
            Tool::Create => "C",
            Tool::Select => "S",
        }
    }

    pub fn all() -> &'static [Tool] {
        &[Tool::Create, Tool::Select]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    /// Pans the view.
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    /// Redirects translate drags to the pivot.
    pub ctrl: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    SelectTool,
    CreateTool,
    Delete,
    Escape,
}

/// Background image currently shown behind the quads.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    pub path: PathBuf,
    pub size: Vec2,
}

impl BackgroundImage {
    /// World rectangle with the top-left corner at the origin.
    pub fn world_rect(&self) -> MinMax {
        MinMax::from_corners(Vec2::ZERO, Vec2::new(self.size.x, -self.size.y))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundOutcome {
    Applied,
    Failed(String),
    /// A newer request was issued after this one.
    Stale,
}

#[derive(Resource, Debug)]
pub struct EditorState {
    pub camera: CameraState,
    surface: SurfaceSize,
    tool: Tool,
    store: QuadStore,
    gizmo: Gizmo,
    active: Option<QuadId>,
    pan_anchor: Option<Vec2>,
    draw_anchor: Option<Vec2>,
    cursor_pixel: Vec2,
    hover_cursor: HoverCursor,
    background: Option<BackgroundImage>,
    background_generation: u64,
    selection_changes: Vec<Option<QuadView>>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(SurfaceSize::new(
            crate::constants::DEFAULT_WINDOW_WIDTH,
            crate::constants::DEFAULT_WINDOW_HEIGHT,
        ))
    }
}

impl EditorState {
    pub fn new(surface: SurfaceSize) -> Self {
        Self {
            camera: CameraState::default(),
            surface,
            tool: Tool::default(),
            store: QuadStore::new(),
            gizmo: Gizmo::default(),
            active: None,
            pan_anchor: None,
            draw_anchor: None,
            cursor_pixel: Vec2::splat(0.5),
            hover_cursor: HoverCursor::Crosshair,
            background: None,
            background_generation: 0,
            selection_changes: Vec::new(),
        }
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    pub fn set_surface_size(&mut self, surface: SurfaceSize) {
        self.surface = surface;
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn store(&self) -> &QuadStore {
        &self.store
    }

    pub fn gizmo(&self) -> &Gizmo {
        &self.gizmo
    }

    pub fn active(&self) -> Option<QuadId> {
        self.active
    }

    pub fn active_quad(&self) -> Option<&Quad> {
        self.active.and_then(|id| self.store.get(id))
    }

    pub fn hover_cursor(&self) -> HoverCursor {
        self.hover_cursor
    }

    pub fn is_panning(&self) -> bool {
        self.pan_anchor.is_some()
    }

    /// True while a pan, a create drag or a gizmo drag is in progress.
    pub fn is_interacting(&self) -> bool {
        self.pan_anchor.is_some() || self.draw_anchor.is_some() || self.gizmo.is_dragging()
    }

    fn idle_cursor(&self) -> HoverCursor {
        match self.tool {
            Tool::Create => HoverCursor::Crosshair,
            Tool::Select => HoverCursor::Default,
        }
    }

    /// Snapped pointer position, shown only while drawing is possible.
    pub fn cursor_marker(&self) -> Option<Vec2> {
        (self.tool == Tool::Create).then_some(self.cursor_pixel)
    }

    pub fn background(&self) -> Option<&BackgroundImage> {
        self.background.as_ref()
    }

    pub fn surface_to_world(&self, point: Vec2) -> Vec2 {
        transform::surface_to_world(point, &self.camera, self.surface)
    }

    pub fn world_to_surface(&self, world: Vec2) -> Vec2 {
        transform::world_to_surface(world, &self.camera, self.surface)
    }

    fn sample(&self, surface_pos: Vec2) -> PointerSample {
        let world = self.surface_to_world(surface_pos);
        PointerSample {
            world,
            pixel: world_to_pixel_snap(world),
        }
    }

    /// Make `id` the only selected quad, or clear the selection.
    pub fn select(&mut self, id: Option<QuadId>) {
        if let Some(previous) = self.active.and_then(|prev| self.store.get_mut(prev)) {
            previous.set_selected(false);
        }

        let id = id.filter(|id| self.store.get(*id).is_some());
        self.active = id;

        match id {
            Some(id) => {
                if let Some(quad) = self.store.get_mut(id) {
                    quad.set_selected(true);
                }
                if self.tool == Tool::Select {
                    self.gizmo.attach(id, &self.store, self.camera.zoom);
                }
            }
            None => self.gizmo.detach(),
        }

        let view = id.and_then(|id| self.store.get(id).map(|quad| quad.view(id)));
        debug!("Selection changed to {:?}", view.as_ref().map(|v| &v.name));
        self.selection_changes.push(view);
    }

    pub fn set_tool(&mut self, tool: Tool) {
        if self.tool != tool {
            info!("Switched to {} tool", tool.display_name());
        }
        self.tool = tool;
        self.draw_anchor = None;

        match tool {
            Tool::Select => {
                if let Some(id) = self.active {
                    self.gizmo.attach(id, &self.store, self.camera.zoom);
                }
            }
            Tool::Create => self.gizmo.detach(),
        }
        if !self.is_panning() {
            self.hover_cursor = self.idle_cursor();
        }
    }

    pub fn pointer_down(&mut self, button: PointerButton, surface_pos: Vec2) {
        let sample = self.sample(surface_pos);
        match (button, self.tool) {
            (PointerButton::Secondary, _) => {
                self.pan_anchor = Some(sample.world);
                self.hover_cursor = HoverCursor::Grab;
            }
            (PointerButton::Primary, Tool::Create) => {
                self.select(None);
                self.draw_anchor = Some(sample.pixel);
            }
            (PointerButton::Primary, Tool::Select) => {
                self.gizmo.on_pointer_down(sample);
            }
        }
    }

    pub fn pointer_move(&mut self, surface_pos: Vec2, modifiers: Modifiers) {
        let sample = self.sample(surface_pos);

        if let Some(anchor) = self.pan_anchor {
            self.camera.drag_pan(anchor, sample.world);
        }

        if let Some(anchor) = self.draw_anchor {
            if self.active.is_none() {
                let id = self.store.create(sample.pixel, anchor, true);
                debug!("Created quad {:?}", id);
                self.select(Some(id));
            }
            if let Some(quad) = self.active.and_then(|id| self.store.get_mut(id)) {
                quad.redraw(sample.pixel, anchor);
            }
        }

        if self.tool == Tool::Select {
            let cursor = self
                .gizmo
                .on_pointer_move(sample, modifiers.ctrl, &mut self.store);
            if !self.is_panning() {
                self.hover_cursor = cursor;
            }
        }

        self.cursor_pixel = sample.pixel;
    }

    pub fn pointer_up(&mut self, button: PointerButton, surface_pos: Vec2) {
        match (button, self.tool) {
            (PointerButton::Secondary, _) => {
                self.pan_anchor = None;
                self.hover_cursor = self.idle_cursor();
            }
            (PointerButton::Primary, Tool::Create) => {
                self.draw_anchor = None;
            }
            (PointerButton::Primary, Tool::Select) => {
                let was_dragging = self.gizmo.on_pointer_up();
                if !was_dragging {
                    let world = self.surface_to_world(surface_pos);
                    if let Some(hit) = self.store.hit_test(world) {
                        self.select(Some(hit));
                    }
                }
            }
        }
    }

    pub fn wheel(&mut self, delta: f32) {
        self.camera.apply_wheel(delta);
    }

    pub fn key(&mut self, key: EditorKey) {
        match key {
            EditorKey::SelectTool => self.set_tool(Tool::Select),
            EditorKey::CreateTool => self.set_tool(Tool::Create),
            EditorKey::Delete => {
                if self.tool == Tool::Select {
                    self.delete_active();
                }
            }
            EditorKey::Escape => {
                if self.active.is_some() {
                    self.select(None);
                }
            }
        }
    }

    pub fn delete_active(&mut self) -> Option<Quad> {
        let id = self.active?;
        self.delete(id)
    }

    /// Remove a quad, detaching the gizmo from it first.
    pub fn delete(&mut self, id: QuadId) -> Option<Quad> {
        if self.gizmo.attached() == Some(id) {
            self.gizmo.detach();
        }
        let removed = self.store.delete(id)?;
        info!("Deleted quad '{}'", removed.name());

        if self.active == Some(id) {
            self.active = None;
            self.selection_changes.push(None);
        }
        Some(removed)
    }

    pub fn rename_active(&mut self, name: &str) -> bool {
        self.active
            .and_then(|id| self.store.get_mut(id))
            .is_some_and(|quad| quad.rename(name))
    }

    /// Replace the active quad's bounds with exact pixel corners.
    /// Returns false when nothing changed; a drawn quad then keeps its padding.
    pub fn set_active_bounds(&mut self, min: Vec2, max: Vec2) -> bool {
        let Some(quad) = self.active.and_then(|id| self.store.get_mut(id)) else {
            return false;
        };
        if quad.export_min_max() == MinMax::from_corners(min, max) {
            return false;
        }
        quad.set_corners(min, max);
        self.gizmo.refresh(&self.store, self.camera.zoom);
        true
    }

    pub fn set_active_pivot(&mut self, pivot: Vec2) {
        if let Some(quad) = self.active.and_then(|id| self.store.get_mut(id)) {
            quad.set_pivot(pivot);
            self.gizmo.refresh(&self.store, self.camera.zoom);
        }
    }

    /// Replace all quads with the entries of an atlas document.
    ///
    /// `confirm` is asked only when quads would be discarded; declining leaves
    /// everything as it was.
    pub fn import_document(
        &mut self,
        entries: &[ExportedQuad],
        confirm: impl FnOnce(usize) -> bool,
    ) -> ImportOutcome {
        if !self.store.is_empty() && !confirm(self.store.len()) {
            return ImportOutcome::Declined;
        }

        self.select(None);
        self.gizmo.detach();
        self.draw_anchor = None;
        self.store.import_all(entries, |_| true)
    }

    pub fn export_document(&self) -> Vec<ExportedQuad> {
        self.store.export_all()
    }

    /// Start a background load; the returned generation must accompany its result.
    pub fn request_background(&mut self) -> u64 {
        self.background_generation += 1;
        self.background_generation
    }

    pub fn resolve_background(
        &mut self,
        generation: u64,
        result: Result<BackgroundImage, String>,
    ) -> BackgroundOutcome {
        if generation != self.background_generation {
            debug!(
                "Ignoring background result {} (latest is {})",
                generation, self.background_generation
            );
            return BackgroundOutcome::Stale;
        }

        match result {
            Ok(image) => {
                info!(
                    "Background set to {:?} ({}x{})",
                    image.path, image.size.x, image.size.y
                );
                self.background = Some(image);
                BackgroundOutcome::Applied
            }
            Err(message) => BackgroundOutcome::Failed(message),
        }
    }

    /// Per-frame tick.
    pub fn refresh(&mut self) {
        self.gizmo.refresh(&self.store, self.camera.zoom);
    }

    pub fn drain_selection_changes(&mut self) -> Vec<Option<QuadView>> {
        std::mem::take(&mut self.selection_changes)
    }
}
