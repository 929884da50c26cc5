use bevy::prelude::*;
use bevy::tasks::AsyncComputeTaskPool;
use bevy_egui::{EguiContexts, egui};

use super::file_menu::FileMenuState;
use crate::atlas::AtlasIoState;
use crate::config::{AppConfig, SaveConfigRequest};
use crate::constants::{EXPORT_FILENAME, IMAGE_EXTENSIONS};
use crate::editor::{BackgroundPicker, EditorState, Tool};
use crate::paths::dialog_start_dir;

fn tool_button_label(tool: &Tool) -> String {
    format!("{} [{}]", tool.display_name(), tool.shortcut())
}

/// Main toolbar showing tools, file actions and view toggles
pub fn toolbar_ui(
    mut contexts: EguiContexts,
    mut editor: ResMut<EditorState>,
    mut config: ResMut<AppConfig>,
    mut picker: ResMut<BackgroundPicker>,
    mut menu_state: ResMut<FileMenuState>,
    atlas_state: Res<AtlasIoState>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let mut pick_image = false;
    let mut pick_import = false;
    let mut pick_export = false;
    let mut view_changed = false;

    egui::TopBottomPanel::top("main_toolbar")
        .frame(
            egui::Frame::side_top_panel(&contexts.ctx_mut()?.style())
                .inner_margin(egui::Margin::symmetric(12, 8)),
        )
        .show(contexts.ctx_mut()?, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 4.0;

                // Tool buttons with keyboard shortcuts
                for tool in Tool::all() {
                    let selected = editor.tool() == *tool;
                    let button = egui::Button::new(
                        egui::RichText::new(tool_button_label(tool))
                            .size(14.0)
                            .strong(),
                    )
                    .min_size(egui::vec2(0.0, 28.0))
                    .selected(selected);

                    if ui.add(button).clicked() && !selected {
                        editor.set_tool(*tool);
                    }
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                let idle = !atlas_state.is_busy()
                    && atlas_state.pending_import.is_none()
                    && !menu_state.any_pick_pending();
                if ui
                    .add_enabled(picker.pending.is_none(), egui::Button::new("Image…"))
                    .on_hover_text("Choose the sprite sheet shown behind the quads")
                    .clicked()
                {
                    pick_image = true;
                }
                if ui.add_enabled(idle, egui::Button::new("Import…")).clicked() {
                    pick_import = true;
                }
                if ui.add_enabled(idle, egui::Button::new("Export…")).clicked() {
                    pick_export = true;
                }

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                view_changed |= ui.checkbox(&mut config.data.show_labels, "Labels").changed();
                view_changed |= ui
                    .checkbox(&mut config.data.show_background_outline, "Outline")
                    .changed();

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{:.0}%", editor.camera.zoom * 100.0));
                    ui.separator();
                    ui.label(format!("{} quads", editor.store().len()));
                    if let Some(ref description) = atlas_state.operation_description {
                        ui.separator();
                        ui.spinner();
                        ui.label(description);
                    }
                });
            });
        });

    if view_changed {
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }

    let task_pool = AsyncComputeTaskPool::get();

    if pick_image && picker.pending.is_none() {
        let start_dir = dialog_start_dir(config.data.last_image_path.as_deref());
        picker.pending = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Choose Background Image")
                .add_filter("Images", IMAGE_EXTENSIONS);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    let atlas_dir = dialog_start_dir(config.data.last_atlas_dir.as_deref());

    if pick_import && menu_state.pending_import_pick.is_none() {
        let start_dir = atlas_dir.clone();
        menu_state.pending_import_pick = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Import Atlas")
                .add_filter("Atlas JSON", &["json"]);
            if let Some(dir) = start_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.pick_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    if pick_export && menu_state.pending_export_pick.is_none() {
        menu_state.pending_export_pick = Some(task_pool.spawn(async move {
            let mut dialog = rfd::AsyncFileDialog::new()
                .set_title("Export Atlas")
                .add_filter("Atlas JSON", &["json"])
                .set_file_name(EXPORT_FILENAME);
            if let Some(dir) = atlas_dir {
                dialog = dialog.set_directory(dir);
            }
            dialog.save_file().await.map(|h| h.path().to_path_buf())
        }));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_button_label_includes_shortcut() {
        assert_eq!(tool_button_label(&Tool::Create), "Create [C]");
        assert_eq!(tool_button_label(&Tool::Select), "Select [S]");
    }
}
