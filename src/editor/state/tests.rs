//! Unit tests for the editor controller.
//!
//! The surface is 800x600 at zoom 1 without pan, so surface `(x, y)` maps to
//! world `(x, -y)`.

use bevy::math::Vec2;

use super::*;
use crate::editor::gizmo::{GizmoHandle, GizmoState};
use crate::geometry::SurfaceSize;

fn editor() -> EditorState {
    EditorState::new(SurfaceSize::new(800.0, 600.0))
}

/// Draw a quad with the Create tool between two surface points.
fn draw(state: &mut EditorState, from: Vec2, to: Vec2) -> QuadId {
    state.pointer_down(PointerButton::Primary, from);
    state.pointer_move(to, Modifiers::default());
    state.pointer_up(PointerButton::Primary, to);
    state.active().unwrap()
}

/// Import one unpadded 64x64 quad spanning world (0,-64)..(64,0) and select it.
fn import_square(state: &mut EditorState) -> QuadId {
    let entries = vec![ExportedQuad {
        name: "square".to_string(),
        center: Vec2::splat(0.5),
        pixel_min: Vec2::new(0.0, -64.0),
        pixel_max: Vec2::new(64.0, 0.0),
    }];
    state.import_document(&entries, |_| true);
    let (id, _) = state.store().iter().next().unwrap();
    state.select(Some(id));
    id
}

fn click(state: &mut EditorState, at: Vec2) {
    state.pointer_move(at, Modifiers::default());
    state.pointer_down(PointerButton::Primary, at);
    state.pointer_up(PointerButton::Primary, at);
}

#[test]
fn test_defaults() {
    let state = editor();
    assert_eq!(state.tool(), Tool::Create);
    assert_eq!(state.camera.zoom, 1.0);
    assert!(state.store().is_empty());
    assert!(state.active().is_none());
}

#[test]
fn test_drawn_quad_is_padded_and_exports_unpadded() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.2, 0.2), Vec2::new(2.2, 3.2));

    let quad = state.store().get(id).unwrap();
    assert_eq!(quad.extent(), Vec2::new(3.0, 4.0));
    assert!(quad.is_selected());

    let exported = state.export_document();
    assert_eq!(exported[0].pixel_min, Vec2::new(0.5, -3.5));
    assert_eq!(exported[0].pixel_max, Vec2::new(2.5, -0.5));

    let mut reloaded = editor();
    reloaded.import_document(&exported, |_| true);
    let (_, imported) = reloaded.store().iter().next().unwrap();
    assert_eq!(imported.extent(), Vec2::new(2.0, 3.0));
}

#[test]
fn test_create_drag_stays_padded_while_resizing() {
    let mut state = editor();
    state.pointer_down(PointerButton::Primary, Vec2::new(10.2, 10.2));
    state.pointer_move(Vec2::new(12.2, 12.2), Modifiers::default());
    state.pointer_move(Vec2::new(20.2, 15.2), Modifiers::default());

    let quad = state.active_quad().unwrap();
    assert_eq!(quad.extent(), Vec2::new(11.0, 6.0));
    assert_eq!(state.store().len(), 1);

    // Dragging back past the anchor normalizes the corners
    state.pointer_move(Vec2::new(5.2, 5.2), Modifiers::default());
    let quad = state.active_quad().unwrap();
    assert_eq!(quad.export_min_max().min, Vec2::new(5.5, -10.5));
    assert_eq!(quad.export_min_max().max, Vec2::new(10.5, -5.5));
}

#[test]
fn test_pointer_down_without_movement_creates_nothing() {
    let mut state = editor();
    state.pointer_down(PointerButton::Primary, Vec2::new(10.0, 10.0));
    state.pointer_up(PointerButton::Primary, Vec2::new(10.0, 10.0));
    assert!(state.store().is_empty());
}

#[test]
fn test_new_draw_deselects_previous_quad() {
    let mut state = editor();
    let first = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let second = draw(&mut state, Vec2::new(50.0, 50.0), Vec2::new(60.0, 60.0));

    assert_ne!(first, second);
    assert!(!state.store().get(first).unwrap().is_selected());
    assert!(state.store().get(second).unwrap().is_selected());
}

#[test]
fn test_selection_is_exclusive() {
    let mut state = editor();
    let a = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = draw(&mut state, Vec2::new(50.0, 50.0), Vec2::new(60.0, 60.0));
    let c = draw(&mut state, Vec2::new(100.0, 100.0), Vec2::new(110.0, 110.0));

    state.set_tool(Tool::Select);
    for id in [a, b, c, b, a] {
        state.select(Some(id));
        let selected: Vec<_> = state
            .store()
            .iter()
            .filter(|(_, quad)| quad.is_selected())
            .map(|(id, _)| id)
            .collect();
        assert_eq!(selected, vec![id]);
        assert_eq!(state.gizmo().attached(), Some(id));
    }

    state.select(None);
    assert!(state.store().iter().all(|(_, quad)| !quad.is_selected()));
    assert_eq!(state.gizmo().state(), GizmoState::Idle);
}

#[test]
fn test_gizmo_attaches_only_in_select_tool() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    assert!(state.gizmo().attached().is_none());

    state.set_tool(Tool::Select);
    assert_eq!(state.gizmo().attached(), Some(id));
    assert!(state.cursor_marker().is_none());

    state.set_tool(Tool::Create);
    assert!(state.gizmo().attached().is_none());
    assert!(state.cursor_marker().is_some());
    assert_eq!(state.active(), Some(id));
}

#[test]
fn test_delete_while_attached_detaches_first() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    state.set_tool(Tool::Select);
    state.drain_selection_changes();

    state.key(EditorKey::Delete);

    assert!(state.store().get(id).is_none());
    assert!(state.active().is_none());
    assert_eq!(state.gizmo().state(), GizmoState::Idle);
    assert_eq!(state.drain_selection_changes(), vec![None]);

    // Later input must not resurrect the handle
    state.pointer_move(Vec2::new(5.0, 5.0), Modifiers::default());
    state.pointer_down(PointerButton::Primary, Vec2::new(5.0, 5.0));
    state.refresh();
    assert_eq!(state.gizmo().state(), GizmoState::Idle);
}

#[test]
fn test_delete_key_ignored_in_create_tool() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    state.key(EditorKey::Delete);
    assert!(state.store().get(id).is_some());
}

#[test]
fn test_click_selects_first_hit_and_empty_click_keeps_selection() {
    let mut state = editor();
    let a = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
    let b = draw(&mut state, Vec2::new(300.0, 300.0), Vec2::new(320.0, 320.0));
    state.set_tool(Tool::Select);
    assert_eq!(state.active(), Some(b));

    click(&mut state, Vec2::new(50.0, 50.0));
    assert_eq!(state.active(), Some(a));

    click(&mut state, Vec2::new(700.0, 500.0));
    assert_eq!(state.active(), Some(a));
}

#[test]
fn test_gizmo_drag_in_select_tool() {
    let mut state = editor();
    let id = import_square(&mut state);
    state.set_tool(Tool::Select);

    // Hover and press on the right edge handle
    let start = Vec2::new(64.2, 32.2);
    state.pointer_move(start, Modifiers::default());
    assert_eq!(state.gizmo().active_handle(), Some(GizmoHandle::Right));
    assert_eq!(state.hover_cursor(), HoverCursor::Pointer);
    state.pointer_down(PointerButton::Primary, start);

    let end = Vec2::new(74.2, 40.2);
    state.pointer_move(end, Modifiers::default());
    state.pointer_up(PointerButton::Primary, end);

    let quad = state.store().get(id).unwrap();
    assert_eq!(quad.extent(), Vec2::new(74.0, 64.0));
    assert_eq!(quad.export_min_max().min.x, 0.0);
    assert_eq!(state.active(), Some(id));
}

#[test]
fn test_ctrl_drag_moves_pivot() {
    let mut state = editor();
    let id = import_square(&mut state);
    state.set_tool(Tool::Select);

    let ctrl = Modifiers { ctrl: true };
    let start = Vec2::new(32.2, 32.2);
    state.pointer_move(start, ctrl);
    assert_eq!(state.gizmo().active_handle(), Some(GizmoHandle::Plane));
    state.pointer_down(PointerButton::Primary, start);
    state.pointer_move(Vec2::new(48.2, 32.2), ctrl);

    let quad = state.store().get(id).unwrap();
    assert_eq!(quad.pivot(), Vec2::new(0.75, 0.5));
    assert_eq!(quad.origin(), Vec2::new(32.0, -32.0));
}

#[test]
fn test_applying_unchanged_bounds_keeps_drawn_quad() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.2, 0.2), Vec2::new(2.2, 3.2));
    let before = state.store().get(id).cloned().unwrap();
    let view = before.view(id);

    assert!(!state.set_active_bounds(view.min, view.max));
    assert!(!state.set_active_bounds(view.max, view.min));

    let after = state.store().get(id).unwrap();
    assert_eq!(after.render_rect(), before.render_rect());
    assert_eq!(after.extent(), Vec2::new(3.0, 4.0));
    assert_eq!(after.export_min_max(), before.export_min_max());
}

#[test]
fn test_typed_bounds_are_exact() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.2, 0.2), Vec2::new(2.2, 3.2));

    assert!(state.set_active_bounds(Vec2::new(0.5, -9.5), Vec2::new(4.5, -0.5)));

    let quad = state.store().get(id).unwrap();
    assert_eq!(quad.extent(), Vec2::new(4.0, 9.0));
    assert_eq!(quad.render_rect(), quad.export_min_max());
    let exported = state.export_document();
    assert_eq!(exported[0].pixel_min, Vec2::new(0.5, -9.5));
    assert_eq!(exported[0].pixel_max, Vec2::new(4.5, -0.5));
}

#[test]
fn test_secondary_drag_pans() {
    let mut state = editor();
    let anchor_world = state.surface_to_world(Vec2::new(100.0, 100.0));
    state.pointer_down(PointerButton::Secondary, Vec2::new(100.0, 100.0));
    assert!(state.is_panning());
    assert_eq!(state.hover_cursor(), HoverCursor::Grab);

    state.pointer_move(Vec2::new(140.0, 80.0), Modifiers::default());
    assert!((state.camera.pan - Vec2::new(-40.0, -20.0)).length() < 1e-4);

    // The world point grabbed at press time stays under the pointer
    let under = state.surface_to_world(Vec2::new(140.0, 80.0));
    assert!((under - anchor_world).length() < 1e-4);

    state.pointer_up(PointerButton::Secondary, Vec2::new(140.0, 80.0));
    assert!(!state.is_panning());
    assert!(state.store().is_empty());
}

#[test]
fn test_wheel_zoom() {
    let mut state = editor();
    state.wheel(4.0);
    assert!((state.camera.zoom - 1.2).abs() < 1e-6);
    state.wheel(-1000.0);
    assert_eq!(state.camera.zoom, crate::constants::MIN_ZOOM);
}

#[test]
fn test_tool_keys() {
    let mut state = editor();
    state.key(EditorKey::SelectTool);
    assert_eq!(state.tool(), Tool::Select);
    state.key(EditorKey::CreateTool);
    assert_eq!(state.tool(), Tool::Create);
}

#[test]
fn test_escape_clears_selection() {
    let mut state = editor();
    draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    state.key(EditorKey::Escape);
    assert!(state.active().is_none());
}

#[test]
fn test_declined_import_keeps_existing_quad() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let before = state.store().get(id).cloned();

    let entries = vec![ExportedQuad {
        name: "other".to_string(),
        center: Vec2::splat(0.5),
        pixel_min: Vec2::new(100.0, 100.0),
        pixel_max: Vec2::new(200.0, 200.0),
    }];
    let outcome = state.import_document(&entries, |_| false);

    assert_eq!(outcome, ImportOutcome::Declined);
    assert_eq!(state.store().len(), 1);
    assert_eq!(state.store().get(id).cloned(), before);
    assert_eq!(state.active(), Some(id));
}

#[test]
fn test_confirmed_import_clears_selection() {
    let mut state = editor();
    draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    state.set_tool(Tool::Select);
    state.drain_selection_changes();

    let entries = vec![ExportedQuad {
        name: "walk".to_string(),
        center: Vec2::new(0.5, 0.0),
        pixel_min: Vec2::new(0.5, -15.5),
        pixel_max: Vec2::new(15.5, -0.5),
    }];
    let outcome = state.import_document(&entries, |existing| existing == 1);

    assert_eq!(outcome, ImportOutcome::Imported(1));
    assert!(state.active().is_none());
    assert_eq!(state.gizmo().state(), GizmoState::Idle);
    assert_eq!(state.drain_selection_changes(), vec![None]);
    let (_, quad) = state.store().iter().next().unwrap();
    assert_eq!(quad.name(), "walk");
    assert_eq!(quad.pivot(), Vec2::new(0.5, 0.0));
}

#[test]
fn test_selection_changes_are_reported() {
    let mut state = editor();
    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let changes = state.drain_selection_changes();

    // Pressing clears the (empty) selection, the first move selects the new quad
    assert_eq!(changes.len(), 2);
    assert!(changes[0].is_none());
    assert_eq!(changes[1].as_ref().map(|view| view.id), Some(id));
    assert!(state.drain_selection_changes().is_empty());
}

#[test]
fn test_rename_active() {
    let mut state = editor();
    assert!(!state.rename_active("nothing"));

    let id = draw(&mut state, Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    assert!(state.rename_active("coin"));
    assert!(!state.rename_active("coin"));
    assert_eq!(state.store().get(id).unwrap().name(), "coin");
}

#[test]
fn test_stale_background_results_are_ignored() {
    let mut state = editor();
    let first = state.request_background();
    let second = state.request_background();

    let image = |name: &str, w: f32, h: f32| BackgroundImage {
        path: PathBuf::from(name),
        size: Vec2::new(w, h),
    };

    assert_eq!(
        state.resolve_background(second, Ok(image("new.png", 64.0, 32.0))),
        BackgroundOutcome::Applied
    );
    assert_eq!(
        state.resolve_background(first, Ok(image("old.png", 8.0, 8.0))),
        BackgroundOutcome::Stale
    );
    assert_eq!(state.background().unwrap().path, PathBuf::from("new.png"));

    let rect = state.background().unwrap().world_rect();
    assert_eq!(rect.min, Vec2::new(0.0, -32.0));
    assert_eq!(rect.max, Vec2::new(64.0, 0.0));
}

#[test]
fn test_failed_background_keeps_previous() {
    let mut state = editor();
    let first = state.request_background();
    state.resolve_background(
        first,
        Ok(BackgroundImage {
            path: PathBuf::from("sheet.png"),
            size: Vec2::new(16.0, 16.0),
        }),
    );

    let second = state.request_background();
    let outcome = state.resolve_background(second, Err("unsupported format".to_string()));
    assert_eq!(
        outcome,
        BackgroundOutcome::Failed("unsupported format".to_string())
    );
    assert_eq!(state.background().unwrap().path, PathBuf::from("sheet.png"));
}
