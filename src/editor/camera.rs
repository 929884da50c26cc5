use bevy::prelude::*;

use super::EditorState;

#[derive(Component)]
pub struct EditorCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        EditorCamera,
        Transform::from_translation(Vec3::new(0.0, 0.0, 1000.0)),
    ));
}

/// Mirror the editor's pan and zoom onto the render camera so the picture agrees
/// with the pointer-to-world mapping used for hit-testing.
pub fn sync_camera(
    editor: Res<EditorState>,
    mut camera_query: Query<(&mut Transform, &mut Projection), With<EditorCamera>>,
) {
    if !editor.is_changed() {
        return;
    }

    let Ok((mut transform, mut projection)) = camera_query.single_mut() else {
        return;
    };

    let center = editor.camera.view_center(editor.surface());
    if !center.is_finite() {
        return;
    }
    transform.translation.x = center.x;
    transform.translation.y = center.y;

    if let Projection::Orthographic(ref mut ortho) = *projection {
        ortho.scale = editor.camera.view_scale();
    }
}
