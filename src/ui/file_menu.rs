//! File dialogs for the atlas, the overwrite confirmation and the error windows.

use bevy::prelude::*;
use bevy::tasks::Task;
use bevy_egui::{EguiContexts, egui};
use futures_lite::future;
use std::path::PathBuf;

use crate::atlas::{AtlasIoState, ExportAtlasRequest, ImportAtlasRequest};
use crate::config::ConfigResetNotification;
use crate::editor::{BackgroundError, EditorState};
use crate::theme;

/// Pending native file dialogs opened from the toolbar
#[derive(Resource, Default)]
pub struct FileMenuState {
    pub pending_import_pick: Option<Task<Option<PathBuf>>>,
    pub pending_export_pick: Option<Task<Option<PathBuf>>>,
}

impl FileMenuState {
    pub fn any_pick_pending(&self) -> bool {
        self.pending_import_pick.is_some() || self.pending_export_pick.is_some()
    }
}

/// Turns finished file dialogs into atlas requests
pub fn poll_file_picks(
    mut menu_state: ResMut<FileMenuState>,
    mut import_events: MessageWriter<ImportAtlasRequest>,
    mut export_events: MessageWriter<ExportAtlasRequest>,
) {
    if let Some(ref mut task) = menu_state.pending_import_pick
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_import_pick = None;
        if let Some(path) = result {
            import_events.write(ImportAtlasRequest { path });
        }
    }

    if let Some(ref mut task) = menu_state.pending_export_pick
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        menu_state.pending_export_pick = None;
        if let Some(path) = result {
            export_events.write(ExportAtlasRequest { path });
        }
    }
}

/// Asks before an import discards the current quads
pub fn overwrite_confirmation_ui(
    mut contexts: EguiContexts,
    mut atlas_state: ResMut<AtlasIoState>,
    mut editor: ResMut<EditorState>,
) -> Result {
    let Some(ref pending) = atlas_state.pending_import else {
        return Ok(());
    };

    let existing = editor.store().len();
    let incoming = pending.entries.len();
    let file_name = pending
        .path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let mut answer = None;

    egui::Window::new("Replace Quads?")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label(format!(
                "Importing {} will replace the {} existing quad{} with {}.",
                file_name,
                existing,
                if existing == 1 { "" } else { "s" },
                incoming
            ));
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Overwrite").clicked() {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });

    if let Some(overwrite) = answer {
        atlas_state.resolve_pending_import(&mut editor, overwrite);
    }

    Ok(())
}

fn error_window(ctx: &egui::Context, title: &str, message: &str) -> bool {
    let mut dismissed = false;
    egui::Window::new(title)
        .collapsible(false)
        .resizable(true)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().max_height(200.0).show(ui, |ui| {
                ui.colored_label(theme::ui::ERROR_TEXT, message);
            });
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    dismissed
}

pub fn atlas_error_dialog_ui(
    mut contexts: EguiContexts,
    mut atlas_state: ResMut<AtlasIoState>,
) -> Result {
    let Some(ref message) = atlas_state.error else {
        return Ok(());
    };
    if error_window(contexts.ctx_mut()?, "Atlas Error", message) {
        atlas_state.error = None;
    }
    Ok(())
}

pub fn background_error_dialog_ui(
    mut contexts: EguiContexts,
    mut background_error: ResMut<BackgroundError>,
) -> Result {
    let Some(ref message) = background_error.message else {
        return Ok(());
    };
    if error_window(contexts.ctx_mut()?, "Image Error", message) {
        background_error.message = None;
    }
    Ok(())
}

/// Tells the user their configuration file was replaced with defaults
pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    egui::Window::new("Settings Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(ref reason) = notification.reason {
                ui.add_space(5.0);
                ui.label(egui::RichText::new(reason).weak());
            }
            ui.add_space(10.0);
            if ui.button("OK").clicked() {
                notification.show = false;
                notification.reason = None;
            }
        });

    Ok(())
}
