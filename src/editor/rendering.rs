//! Immediate-mode drawing of the editor state: axes, background outline, quads,
//! the transform gizmo and the cursor marker. Quad names are egui labels.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::EditorState;
use super::gizmo::GizmoHandle;
use crate::config::AppConfig;
use crate::constants::AXIS_LENGTH;
use crate::geometry::{MinMax, OriginExtent};
use crate::theme;

/// Most hatch lines drawn inside one quad
const MAX_FILL_LINES: u32 = 24;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct EditorGizmoGroup;

pub fn configure_editor_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<EditorGizmoGroup>();
    config.line.width = 1.5;
}

fn draw_rect(gizmos: &mut Gizmos<EditorGizmoGroup>, rect: OriginExtent, color: Color) {
    gizmos.rect_2d(Isometry2d::from_translation(rect.origin), rect.extent, color);
}

pub fn draw_axes(mut gizmos: Gizmos<EditorGizmoGroup>) {
    gizmos.line_2d(Vec2::ZERO, Vec2::new(AXIS_LENGTH, 0.0), theme::AXIS_X);
    gizmos.line_2d(Vec2::ZERO, Vec2::new(0.0, -AXIS_LENGTH), theme::AXIS_Y);
}

pub fn draw_background_outline(
    mut gizmos: Gizmos<EditorGizmoGroup>,
    editor: Res<EditorState>,
    config: Res<AppConfig>,
) {
    if !config.data.show_background_outline {
        return;
    }
    let Some(background) = editor.background() else {
        return;
    };
    draw_rect(
        &mut gizmos,
        background.world_rect().to_origin_extent(),
        theme::OUTLINE_BLACK,
    );
}

pub fn draw_quads(mut gizmos: Gizmos<EditorGizmoGroup>, editor: Res<EditorState>) {
    for (_, quad) in editor.store().iter() {
        let rect = quad.render_rect();
        draw_fill(&mut gizmos, rect);

        let color = if quad.is_selected() {
            theme::QUAD_SELECTED
        } else {
            theme::QUAD_OUTLINE
        };
        draw_rect(&mut gizmos, rect.to_origin_extent(), color);
    }
}

/// Gizmos have no filled rectangles, so shade with horizontal lines
fn draw_fill(gizmos: &mut Gizmos<EditorGizmoGroup>, rect: MinMax) {
    let height = rect.size().y;
    if height <= 0.0 {
        return;
    }
    let lines = (height.ceil() as u32).min(MAX_FILL_LINES);
    let step = height / (lines + 1) as f32;
    for i in 1..=lines {
        let y = rect.min.y + step * i as f32;
        gizmos.line_2d(
            Vec2::new(rect.min.x, y),
            Vec2::new(rect.max.x, y),
            theme::QUAD_FILL,
        );
    }
}

fn handle_color(handle: GizmoHandle) -> Color {
    match handle {
        GizmoHandle::Bottom | GizmoHandle::Left | GizmoHandle::Top | GizmoHandle::Right => {
            theme::HANDLE_EDGE
        }
        GizmoHandle::Plane => theme::HANDLE_PLANE,
        GizmoHandle::ArrowX => theme::HANDLE_X,
        GizmoHandle::ArrowY => theme::HANDLE_Y,
    }
}

pub fn draw_gizmo(mut gizmos: Gizmos<EditorGizmoGroup>, editor: Res<EditorState>) {
    let gizmo = editor.gizmo();
    let Some(layout) = gizmo.layout() else {
        return;
    };
    let active = gizmo.active_handle();

    // Drawn back to front so the arrows end up over the plane
    for handle in GizmoHandle::HIT_ORDER.into_iter().rev() {
        let color = if active == Some(handle) {
            theme::HANDLE_ACTIVE
        } else {
            handle_color(handle)
        };
        draw_rect(&mut gizmos, layout.rect(handle), color);
    }

    draw_rect(
        &mut gizmos,
        OriginExtent::new(layout.pivot, Vec2::ONE),
        theme::PIVOT,
    );
    draw_rect(
        &mut gizmos,
        OriginExtent::new(layout.pivot, Vec2::splat(layout.pivot_outline)),
        theme::OUTLINE_BLACK,
    );
}

pub fn draw_cursor_marker(mut gizmos: Gizmos<EditorGizmoGroup>, editor: Res<EditorState>) {
    if editor.is_panning() {
        return;
    }
    if let Some(pixel) = editor.cursor_marker() {
        draw_rect(
            &mut gizmos,
            OriginExtent::new(pixel, Vec2::ONE),
            theme::CURSOR,
        );
    }
}

/// Draw each quad's name at its origin
pub fn render_quad_labels(
    mut contexts: EguiContexts,
    editor: Res<EditorState>,
    config: Res<AppConfig>,
) -> Result {
    if !config.data.show_labels {
        return Ok(());
    }
    let ctx = contexts.ctx_mut()?;

    for (id, quad) in editor.store().iter() {
        let screen_pos = editor.world_to_surface(quad.origin());
        if !screen_pos.is_finite() {
            continue;
        }

        egui::Area::new(egui::Id::new((
            "quad_label",
            id.raw(),
            quad.label_revision(),
        )))
        .fixed_pos(egui::pos2(screen_pos.x, screen_pos.y))
        .pivot(egui::Align2::CENTER_CENTER)
        .order(egui::Order::Background)
        .interactable(false)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(quad.name())
                    .color(theme::ui::QUAD_LABEL)
                    .size(12.0),
            );
        });
    }

    Ok(())
}
