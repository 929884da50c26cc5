//! Background image: picked through a file dialog, displayed by the asset server
//! and sized from dimensions decoded off the main thread.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use std::path::{Path, PathBuf};

use super::EditorState;
use super::state::{BackgroundImage, BackgroundOutcome};
use crate::config::UpdateLastImagePathRequest;

/// Marker for the sprite that shows the background image
#[derive(Component)]
pub struct BackgroundSprite;

/// Pending image picker dialog
#[derive(Resource, Default)]
pub struct BackgroundPicker {
    pub pending: Option<Task<Option<PathBuf>>>,
}

/// Resource for the background load error dialog
#[derive(Resource, Default)]
pub struct BackgroundError {
    pub message: Option<String>,
}

/// Message to load a new background image
#[derive(Message)]
pub struct LoadBackgroundRequest {
    pub path: PathBuf,
}

/// Component for an in-flight dimension decode
#[derive(Component)]
pub struct LoadBackgroundTask {
    generation: u64,
    task: Task<Result<BackgroundImage, String>>,
}

fn read_background(path: &Path) -> Result<BackgroundImage, String> {
    let (width, height) = image::image_dimensions(path)
        .map_err(|e| format!("Could not open {}: {}", path.display(), e))?;
    if width == 0 || height == 0 {
        return Err(format!("{} has no pixels", path.display()));
    }
    Ok(BackgroundImage {
        path: path.to_path_buf(),
        size: Vec2::new(width as f32, height as f32),
    })
}

pub fn spawn_background(mut commands: Commands) {
    commands.spawn((
        BackgroundSprite,
        Sprite::default(),
        Transform::from_xyz(0.0, 0.0, -1.0),
        Visibility::Hidden,
    ));
}

/// Turn a finished picker dialog into a load request
pub fn poll_background_pick(
    mut picker: ResMut<BackgroundPicker>,
    mut load_events: MessageWriter<LoadBackgroundRequest>,
) {
    if let Some(ref mut task) = picker.pending
        && let Some(result) = future::block_on(future::poll_once(task))
    {
        picker.pending = None;
        if let Some(path) = result {
            load_events.write(LoadBackgroundRequest { path });
        }
    }
}

/// Starts decoding the image header for each request
pub fn start_background_load(
    mut commands: Commands,
    mut events: MessageReader<LoadBackgroundRequest>,
    mut editor: ResMut<EditorState>,
) {
    for event in events.read() {
        let generation = editor.request_background();
        let path = event.path.clone();
        info!("Loading background {:?} (request {})", path, generation);

        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move { read_background(&path) });
        commands.spawn(LoadBackgroundTask { generation, task });
    }
}

/// Polls decode tasks and applies the newest successful one
pub fn poll_background_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadBackgroundTask)>,
    mut editor: ResMut<EditorState>,
    mut background_error: ResMut<BackgroundError>,
    asset_server: Res<AssetServer>,
    mut sprites: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<BackgroundSprite>>,
    mut config_events: MessageWriter<UpdateLastImagePathRequest>,
) {
    for (entity, mut load) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut load.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match editor.resolve_background(load.generation, result) {
            BackgroundOutcome::Applied => {
                let Some(image) = editor.background().cloned() else {
                    continue;
                };
                background_error.message = None;

                if let Ok((mut sprite, mut transform, mut visibility)) = sprites.single_mut() {
                    sprite.image = asset_server.load(image.path.clone());
                    sprite.custom_size = Some(image.size);
                    transform.translation =
                        Vec3::new(image.size.x / 2.0, -image.size.y / 2.0, -1.0);
                    *visibility = Visibility::Visible;
                }

                config_events.write(UpdateLastImagePathRequest { path: image.path });
            }
            BackgroundOutcome::Failed(message) => {
                error!("{}", message);
                background_error.message = Some(message);
            }
            BackgroundOutcome::Stale => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_background_missing_file() {
        let path = std::env::temp_dir().join("quadforge_missing_background.png");
        let err = read_background(&path).unwrap_err();
        assert!(err.contains("quadforge_missing_background.png"));
    }

    #[test]
    fn test_read_background_dimensions() {
        let path = std::env::temp_dir().join(format!(
            "quadforge_background_{}.png",
            std::process::id()
        ));
        image::RgbaImage::new(7, 3).save(&path).unwrap();

        let background = read_background(&path).unwrap();
        assert_eq!(background.size, Vec2::new(7.0, 3.0));
        assert_eq!(background.path, path);
        assert_eq!(
            background.world_rect().to_origin_extent().origin,
            Vec2::new(3.5, -1.5)
        );

        let _ = std::fs::remove_file(&path);
    }
}
