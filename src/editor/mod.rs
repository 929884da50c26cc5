mod background;
mod camera;
pub mod gizmo;
mod input;
pub mod params;
mod rendering;
pub mod state;

pub use background::{BackgroundError, BackgroundPicker, LoadBackgroundRequest};
pub use state::{EditorState, Tool};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::quad::QuadView;

/// Sent whenever the active quad changes or is deleted.
#[derive(Message, Debug, Clone)]
pub struct SelectionChanged(pub Option<QuadView>);

/// Frame tick: refresh the gizmo layout and publish selection changes.
fn tick_editor(mut editor: ResMut<EditorState>, mut selection: MessageWriter<SelectionChanged>) {
    editor.refresh();
    for change in editor.drain_selection_changes() {
        selection.write(SelectionChanged(change));
    }
}

pub struct EditorPlugin;

impl Plugin for EditorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorState>()
            .init_resource::<BackgroundError>()
            .init_resource::<BackgroundPicker>()
            .add_message::<SelectionChanged>()
            .add_message::<LoadBackgroundRequest>()
            .init_gizmo_group::<rendering::EditorGizmoGroup>()
            .insert_resource(ClearColor(crate::theme::CANVAS_CLEAR))
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    background::spawn_background,
                    rendering::configure_editor_gizmos,
                ),
            )
            .add_systems(
                Update,
                (
                    input::track_surface_size,
                    input::handle_pointer,
                    input::handle_wheel,
                    input::handle_editor_keys,
                    tick_editor,
                    camera::sync_camera,
                    input::update_cursor_icon,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    background::poll_background_pick,
                    background::start_background_load,
                    background::poll_background_tasks,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    rendering::draw_axes,
                    rendering::draw_background_outline,
                    rendering::draw_quads,
                    rendering::draw_gizmo,
                    rendering::draw_cursor_marker,
                )
                    .after(tick_editor),
            )
            .add_systems(EguiPrimaryContextPass, rendering::render_quad_labels);
    }
}
