pub mod file_menu;
mod properties;
mod toolbar;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::atlas::AtlasIoState;
use crate::config::ConfigResetNotification;
use crate::editor::{BackgroundError, BackgroundPicker};

/// Resource that tracks whether any modal dialog is currently open.
/// Editor input handlers should check this to avoid processing input
/// when the user is interacting with a dialog.
#[derive(Resource, Default)]
pub struct DialogState {
    /// True when any modal dialog is open that should block editor input
    pub any_modal_open: bool,
}

/// System to aggregate all dialog open states into a single resource.
/// Runs in First schedule before input handlers.
fn update_dialog_state(
    file_menu: Res<file_menu::FileMenuState>,
    atlas_state: Res<AtlasIoState>,
    background_error: Res<BackgroundError>,
    picker: Res<BackgroundPicker>,
    config_reset: Res<ConfigResetNotification>,
    mut dialog_state: ResMut<DialogState>,
) {
    dialog_state.any_modal_open = file_menu.any_pick_pending()
        || atlas_state.pending_import.is_some()
        || atlas_state.error.is_some()
        || atlas_state.is_busy()
        || background_error.message.is_some()
        || picker.pending.is_some()
        || config_reset.show;
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DialogState>()
            .init_resource::<file_menu::FileMenuState>()
            .init_resource::<properties::PropertiesPanelState>()
            .add_systems(Update, file_menu::poll_file_picks)
            // Side panel renders first so the toolbar fits beside it
            .add_systems(
                EguiPrimaryContextPass,
                (properties::properties_panel_ui, toolbar::toolbar_ui).chain(),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    file_menu::overwrite_confirmation_ui,
                    file_menu::atlas_error_dialog_ui,
                    file_menu::background_error_dialog_ui,
                    file_menu::config_reset_notification_ui,
                )
                    .after(toolbar::toolbar_ui),
            )
            // Update dialog state at the start of each frame
            .add_systems(First, update_dialog_state);
    }
}
