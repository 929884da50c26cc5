//! SystemParam bundles and input-gating helpers shared by the editor systems.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::geometry::SurfaceSize;

/// Primary window access for pointer position and drawing-surface size
#[derive(SystemParam)]
pub struct SurfaceParams<'w, 's> {
    pub window: Query<'w, 's, (Entity, &'static Window), With<PrimaryWindow>>,
}

impl SurfaceParams<'_, '_> {
    pub fn entity(&self) -> Option<Entity> {
        self.window.single().ok().map(|(entity, _)| entity)
    }

    /// Cursor position in logical pixels, origin top-left
    pub fn cursor_position(&self) -> Option<Vec2> {
        let (_, window) = self.window.single().ok()?;
        window.cursor_position()
    }

    pub fn surface_size(&self) -> Option<SurfaceSize> {
        let (_, window) = self.window.single().ok()?;
        Some(SurfaceSize::new(window.width(), window.height()))
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}

/// Check if a text field has keyboard focus
pub fn ui_wants_keyboard(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_keyboard_input())
        .unwrap_or(false)
}
