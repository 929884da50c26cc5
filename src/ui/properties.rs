use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::DialogState;
use crate::editor::{EditorState, SelectionChanged};
use crate::quad::{QuadId, QuadView};
use crate::theme;

/// Edit buffers for the properties panel
#[derive(Resource, Default)]
pub struct PropertiesPanelState {
    quad: Option<QuadId>,
    name: String,
    min: Vec2,
    max: Vec2,
    /// Bounds were edited but not applied yet
    bounds_dirty: bool,
}

impl PropertiesPanelState {
    fn load(&mut self, view: Option<&QuadView>) {
        self.quad = view.map(|v| v.id);
        self.name = view.map(|v| v.name.clone()).unwrap_or_default();
        self.min = view.map(|v| v.min).unwrap_or_default();
        self.max = view.map(|v| v.max).unwrap_or_default();
        self.bounds_dirty = false;
    }
}

fn vec2_row(ui: &mut egui::Ui, label: &str, value: &mut Vec2, speed: f64) -> bool {
    ui.horizontal(|ui| {
        ui.label(label);
        let x = ui.add(egui::DragValue::new(&mut value.x).speed(speed).prefix("x: "));
        let y = ui.add(egui::DragValue::new(&mut value.y).speed(speed).prefix("y: "));
        x.changed() || y.changed()
    })
    .inner
}

pub fn properties_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<PropertiesPanelState>,
    mut editor: ResMut<EditorState>,
    mut selection_events: MessageReader<SelectionChanged>,
    dialog_state: Res<DialogState>,
) -> Result {
    for SelectionChanged(view) in selection_events.read() {
        panel.load(view.as_ref());
    }

    egui::SidePanel::right("properties_panel")
        .default_width(240.0)
        .resizable(false)
        .show(contexts.ctx_mut()?, |ui| {
            ui.heading("Properties");
            ui.separator();

            // Edits would race the open dialog
            if dialog_state.any_modal_open {
                ui.disable();
            }

            let Some(id) = editor.active() else {
                ui.label(egui::RichText::new("No quad selected").color(theme::ui::HINT_TEXT));
                return;
            };
            let Some(view) = editor.active_quad().map(|quad| quad.view(id)) else {
                return;
            };
            if panel.quad != Some(id) {
                panel.load(Some(&view));
            }
            // Follow gizmo drags until the user starts typing
            if !panel.bounds_dirty {
                panel.min = view.min;
                panel.max = view.max;
            }

            ui.horizontal(|ui| {
                ui.label("Name:");
                if ui.text_edit_singleline(&mut panel.name).changed() {
                    let name = panel.name.clone();
                    editor.rename_active(&name);
                }
            });

            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("Extent: {} × {}", view.extent.x, view.extent.y))
                    .color(theme::bevy_to_egui(theme::QUAD_SELECTED)),
            );

            let mut pivot = view.pivot;
            if vec2_row(ui, "Pivot:", &mut pivot, 0.01) {
                editor.set_active_pivot(pivot);
            }

            ui.separator();
            ui.label("Pixel bounds");
            let mut min = panel.min;
            let mut max = panel.max;
            let min_changed = vec2_row(ui, "Min:", &mut min, 1.0);
            let max_changed = vec2_row(ui, "Max:", &mut max, 1.0);
            if min_changed || max_changed {
                panel.min = min;
                panel.max = max;
                panel.bounds_dirty = true;
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(panel.bounds_dirty, egui::Button::new("Apply"))
                    .clicked()
                {
                    editor.set_active_bounds(panel.min, panel.max);
                    panel.bounds_dirty = false;
                }
                if ui
                    .add_enabled(panel.bounds_dirty, egui::Button::new("Revert"))
                    .clicked()
                {
                    panel.bounds_dirty = false;
                }
            });

            ui.separator();
            if ui.button("Delete Quad").clicked() {
                editor.delete_active();
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> QuadView {
        QuadView {
            id: crate::quad::QuadStore::new().create(Vec2::ZERO, Vec2::ONE, false),
            name: "hero".to_string(),
            extent: Vec2::new(4.0, 2.0),
            pivot: Vec2::splat(0.5),
            min: Vec2::new(0.5, 0.5),
            max: Vec2::new(4.5, 2.5),
        }
    }

    #[test]
    fn test_load_fills_buffers() {
        let mut panel = PropertiesPanelState {
            bounds_dirty: true,
            ..default()
        };
        panel.load(Some(&view()));
        assert_eq!(panel.name, "hero");
        assert_eq!(panel.max, Vec2::new(4.5, 2.5));
        assert!(panel.quad.is_some());
        assert!(!panel.bounds_dirty);
    }

    #[test]
    fn test_load_none_clears_buffers() {
        let mut panel = PropertiesPanelState::default();
        panel.load(Some(&view()));
        panel.load(None);
        assert!(panel.quad.is_none());
        assert!(panel.name.is_empty());
        assert_eq!(panel.min, Vec2::ZERO);
    }
}
