use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use ts_core::EditorSettings;

/// Zoom state of the editor camera.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraRig {
    /// Half of the visible height, in tiles.
    pub zoom: f32,
}

impl FromWorld for CameraRig {
    fn from_world(world: &mut World) -> Self {
        let settings = world.get_resource::<EditorSettings>().cloned().unwrap_or_default();
        Self {
            zoom: settings.clamp_zoom(settings.initial_zoom),
        }
    }
}

/// Projection scale (world units per pixel) that shows `zoom` tiles above and below center.
pub fn projection_scale(zoom: f32, tile_size: f32, viewport_height: f32) -> f32 {
    if viewport_height <= 0.0 {
        return 1.0;
    }
    2.0 * zoom * tile_size / viewport_height
}

/// Pan direction from WASD / arrow keys, each axis in [-1, 1].
pub fn pan_axes(keyboard: &ButtonInput<KeyCode>) -> Vec2 {
    let mut axes = Vec2::ZERO;
    if keyboard.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axes.x -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axes.x += 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axes.y -= 1.0;
    }
    if keyboard.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axes.y += 1.0;
    }
    axes
}

/// Zoom direction: E zooms out, Q zooms in. E wins if both are held.
pub fn zoom_direction(keyboard: &ButtonInput<KeyCode>) -> f32 {
    if keyboard.pressed(KeyCode::KeyE) {
        1.0
    } else if keyboard.pressed(KeyCode::KeyQ) {
        -1.0
    } else {
        0.0
    }
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Pan the camera at `camera_speed` tiles per second.
pub fn camera_pan(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<EditorSettings>,
    mut camera_query: Query<&mut Transform, With<Camera2d>>,
) {
    let axes = pan_axes(&keyboard);
    if axes == Vec2::ZERO {
        return;
    }

    let Ok(mut transform) = camera_query.get_single_mut() else { return };
    let delta = axes * settings.camera_speed * settings.tile_size * time.delta_secs();
    transform.translation += delta.extend(0.0);
}

/// Apply Q/E zoom and keep the projection in sync with the window height.
pub fn camera_zoom(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    settings: Res<EditorSettings>,
    mut rig: ResMut<CameraRig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut camera_query: Query<&mut OrthographicProjection, With<Camera2d>>,
) {
    let direction = zoom_direction(&keyboard);
    if direction != 0.0 {
        rig.zoom = settings.clamp_zoom(rig.zoom + direction * settings.zoom_speed * time.delta_secs());
    }

    let Ok(window) = windows.get_single() else { return };
    let Ok(mut projection) = camera_query.get_single_mut() else { return };

    let scale = projection_scale(rig.zoom, settings.tile_size, window.height());
    if projection.scale != scale {
        projection.scale = scale;
    }
}
