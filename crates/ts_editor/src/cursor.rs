use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;
use ts_core::{EditorSettings, TileCoord};
use ts_tilemap::{CameraPointer, PointerMapper};

/// Where the pointer is this frame.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    /// Cell under the pointer, if the pointer is inside the window.
    pub cell: Option<TileCoord>,
    /// The pointer is over an egui panel.
    pub over_ui: bool,
}

impl PointerState {
    /// Cell the brush may act on: under the pointer and not over UI.
    pub fn brush_cell(&self) -> Option<TileCoord> {
        if self.over_ui {
            None
        } else {
            self.cell
        }
    }
}

/// System to resolve the pointer cell through the editor camera.
pub fn update_pointer_state(
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<Camera2d>>,
    settings: Res<EditorSettings>,
    mut contexts: EguiContexts,
    mut pointer: ResMut<PointerState>,
) {
    pointer.over_ui = contexts.ctx_mut().is_pointer_over_area();
    pointer.cell = None;

    let Ok(window) = windows.get_single() else { return };
    let Some(screen) = window.cursor_position() else { return };
    let Ok((camera, transform)) = camera_query.get_single() else { return };

    let mapper = CameraPointer {
        camera,
        transform,
        tile_size: settings.tile_size,
    };
    pointer.cell = mapper.screen_to_cell(screen);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ui_blocks_brush_cell() {
        let mut pointer = PointerState {
            cell: Some(TileCoord::new(1, 2)),
            over_ui: true,
        };
        assert_eq!(pointer.brush_cell(), None);
        pointer.over_ui = false;
        assert_eq!(pointer.brush_cell(), Some(TileCoord::new(1, 2)));
    }
}
