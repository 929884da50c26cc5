//! Async atlas import/export and the overwrite confirmation handoff to the UI.

use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, Task};
use futures_lite::future;
use std::path::{Path, PathBuf};

use super::{AtlasError, ExportedQuad, read_document, write_document};
use crate::config::UpdateLastAtlasDirRequest;
use crate::editor::EditorState;
use crate::quad::ImportOutcome;

/// Message to read an atlas document and replace the quads with it
#[derive(Message)]
pub struct ImportAtlasRequest {
    pub path: PathBuf,
}

/// Message to write all quads to an atlas document
#[derive(Message)]
pub struct ExportAtlasRequest {
    pub path: PathBuf,
}

/// A parsed document waiting for the user to confirm discarding existing quads
pub struct PendingImport {
    pub path: PathBuf,
    pub entries: Vec<ExportedQuad>,
}

/// Resource tracking async atlas I/O for the dialogs
#[derive(Resource, Default)]
pub struct AtlasIoState {
    pub pending_import: Option<PendingImport>,
    /// Error message shown in the atlas error window
    pub error: Option<String>,
    /// Description of the running operation
    pub operation_description: Option<String>,
}

impl AtlasIoState {
    pub fn is_busy(&self) -> bool {
        self.operation_description.is_some()
    }

    /// Answer the overwrite confirmation. Declining drops the parsed document.
    pub fn resolve_pending_import(
        &mut self,
        editor: &mut EditorState,
        overwrite: bool,
    ) -> Option<ImportOutcome> {
        let pending = self.pending_import.take()?;
        // The store may have been emptied while the dialog was open
        let outcome = if overwrite {
            editor.import_document(&pending.entries, |_| true)
        } else {
            ImportOutcome::Declined
        };
        log_import(&pending.path, outcome);
        Some(outcome)
    }
}

fn log_import(path: &Path, outcome: ImportOutcome) {
    match outcome {
        ImportOutcome::Imported(count) => info!("Imported {} quads from {:?}", count, path),
        ImportOutcome::Declined => info!("Import of {:?} cancelled", path),
    }
}

/// Component for import task
#[derive(Component)]
pub struct ImportAtlasTask(Task<(PathBuf, Result<Vec<ExportedQuad>, AtlasError>)>);

/// Component for export task
#[derive(Component)]
pub struct ExportAtlasTask(Task<(PathBuf, Result<usize, AtlasError>)>);

fn remember_dir(path: &Path, config_events: &mut MessageWriter<UpdateLastAtlasDirRequest>) {
    if let Some(dir) = path.parent() {
        config_events.write(UpdateLastAtlasDirRequest {
            dir: dir.to_path_buf(),
        });
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("atlas")
        .to_string()
}

/// Starts an async read for each import request
pub fn start_import_system(
    mut commands: Commands,
    mut events: MessageReader<ImportAtlasRequest>,
    mut state: ResMut<AtlasIoState>,
) {
    for event in events.read() {
        if state.is_busy() {
            warn!("Atlas operation already in progress");
            continue;
        }

        let path = event.path.clone();
        state.operation_description = Some(format!("Importing {}...", file_label(&path)));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = read_document(&path);
            (path, result)
        });
        commands.spawn(ImportAtlasTask(task));
    }
}

/// Polls import tasks; imports straight away into an empty store, otherwise asks first
pub fn poll_import_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ImportAtlasTask)>,
    mut state: ResMut<AtlasIoState>,
    mut editor: ResMut<EditorState>,
    mut config_events: MessageWriter<UpdateLastAtlasDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some((path, result)) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        state.operation_description = None;

        match result {
            Ok(entries) => {
                state.error = None;
                remember_dir(&path, &mut config_events);
                if editor.store().is_empty() {
                    let outcome = editor.import_document(&entries, |_| true);
                    log_import(&path, outcome);
                } else {
                    debug!(
                        "Import of {:?} would replace {} quads, asking first",
                        path,
                        editor.store().len()
                    );
                    state.pending_import = Some(PendingImport { path, entries });
                }
            }
            Err(e) => {
                error!("Atlas import failed: {}", e);
                state.error = Some(e.to_string());
            }
        }
    }
}

/// Snapshots the quads and writes them off the main thread
pub fn start_export_system(
    mut commands: Commands,
    mut events: MessageReader<ExportAtlasRequest>,
    mut state: ResMut<AtlasIoState>,
    editor: Res<EditorState>,
) {
    for event in events.read() {
        if state.is_busy() {
            warn!("Atlas operation already in progress");
            continue;
        }

        let path = event.path.clone();
        let entries = editor.export_document();
        state.operation_description = Some(format!("Exporting {}...", file_label(&path)));

        let task_pool = IoTaskPool::get();
        let task = task_pool.spawn(async move {
            let result = write_document(&path, &entries).map(|_| entries.len());
            (path, result)
        });
        commands.spawn(ExportAtlasTask(task));
    }
}

pub fn poll_export_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut ExportAtlasTask)>,
    mut state: ResMut<AtlasIoState>,
    mut config_events: MessageWriter<UpdateLastAtlasDirRequest>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some((path, result)) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();
        state.operation_description = None;

        match result {
            Ok(count) => {
                info!("Exported {} quads to {:?}", count, path);
                state.error = None;
                remember_dir(&path, &mut config_events);
            }
            Err(e) => {
                error!("Atlas export failed: {}", e);
                state.error = Some(e.to_string());
            }
        }
    }
}

pub struct AtlasPlugin;

impl Plugin for AtlasPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AtlasIoState>()
            .add_message::<ImportAtlasRequest>()
            .add_message::<ExportAtlasRequest>()
            .add_systems(
                Update,
                (
                    start_import_system,
                    poll_import_tasks,
                    start_export_system,
                    poll_export_tasks,
                )
                    .chain(),
            );
    }
}
