//! Translate window input into [`EditorState`] calls.
//!
//! Presses and wheel steps are dropped while the pointer is over egui or a
//! modal dialog is open. Moves and releases still reach an interaction that
//! started on the canvas so a drag can end over a panel.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::common::HoverCursor;
use crate::constants::{WHEEL_LINE_DELTA, WHEEL_PIXEL_SCALE};
use crate::ui::DialogState;

use super::params::{SurfaceParams, is_cursor_over_ui, ui_wants_keyboard};
use super::state::{EditorKey, Modifiers, PointerButton};
use super::EditorState;

const BUTTONS: [(MouseButton, PointerButton); 3] = [
    (MouseButton::Left, PointerButton::Primary),
    (MouseButton::Right, PointerButton::Secondary),
    (MouseButton::Middle, PointerButton::Secondary),
];

const KEYS: [(KeyCode, EditorKey); 5] = [
    (KeyCode::KeyS, EditorKey::SelectTool),
    (KeyCode::KeyC, EditorKey::CreateTool),
    (KeyCode::Delete, EditorKey::Delete),
    (KeyCode::Backspace, EditorKey::Delete),
    (KeyCode::Escape, EditorKey::Escape),
];

pub fn track_surface_size(surface: SurfaceParams, mut editor: ResMut<EditorState>) {
    let Some(size) = surface.surface_size() else {
        return;
    };
    if editor.surface() != size {
        debug!("Surface resized to {}x{}", size.width, size.height);
        editor.set_surface_size(size);
    }
}

pub fn handle_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    keyboard: Res<ButtonInput<KeyCode>>,
    surface: SurfaceParams,
    dialog_state: Res<DialogState>,
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    let blocked = dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts);
    let modifiers = Modifiers {
        ctrl: keyboard.any_pressed([KeyCode::ControlLeft, KeyCode::ControlRight]),
    };

    let cursor = surface.cursor_position();
    if let Some(pos) = cursor
        && *last_cursor != Some(pos)
    {
        if !blocked || editor.is_interacting() {
            editor.pointer_move(pos, modifiers);
        }
        *last_cursor = Some(pos);
    }

    // Releases outside the window still end the interaction at the last known position
    let Some(pos) = cursor.or(*last_cursor) else {
        return;
    };

    if !blocked {
        for (button, pointer) in BUTTONS {
            if mouse_button.just_pressed(button) {
                editor.pointer_down(pointer, pos);
            }
        }
    }

    for (button, pointer) in BUTTONS {
        if mouse_button.just_released(button) && (!blocked || editor.is_interacting()) {
            editor.pointer_up(pointer, pos);
        }
    }
}

pub fn handle_wheel(
    mut scroll_events: MessageReader<MouseWheel>,
    dialog_state: Res<DialogState>,
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
) {
    if dialog_state.any_modal_open || is_cursor_over_ui(&mut contexts) {
        scroll_events.clear();
        return;
    }

    for event in scroll_events.read() {
        editor.wheel(wheel_delta(event.unit, event.y));
    }
}

/// Zoom delta for one wheel event. Scrolling down zooms in.
fn wheel_delta(unit: MouseScrollUnit, y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * WHEEL_LINE_DELTA,
        MouseScrollUnit::Pixel => -y * WHEEL_PIXEL_SCALE,
    }
}

pub fn handle_editor_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    dialog_state: Res<DialogState>,
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
) {
    // Don't steal keys from text fields
    if dialog_state.any_modal_open || ui_wants_keyboard(&mut contexts) {
        return;
    }

    for (code, key) in KEYS {
        if keyboard.just_pressed(code) {
            editor.key(key);
        }
    }
}

pub fn update_cursor_icon(
    editor: Res<EditorState>,
    surface: SurfaceParams,
    mut commands: Commands,
    mut contexts: EguiContexts,
    mut current: Local<Option<HoverCursor>>,
) {
    let Some(entity) = surface.entity() else {
        return;
    };

    // Use default cursor over UI
    let wanted = if is_cursor_over_ui(&mut contexts) && !editor.is_interacting() {
        HoverCursor::Default
    } else {
        editor.hover_cursor()
    };

    if *current != Some(wanted) {
        commands.entity(entity).insert(wanted.cursor_icon());
        *current = Some(wanted);
    }
}
