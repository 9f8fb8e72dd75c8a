use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub mod brush;
pub mod camera;
pub mod cursor;
pub mod highlight;
pub mod palette;

pub use camera::CameraRig;
pub use cursor::PointerState;
pub use highlight::CursorHighlight;
pub use palette::{PaletteStatus, SelectedTile};

/// Editor plugin for Tilestack.
/// Wires input, camera, cursor highlight and the egui palette to the layer stack.
pub struct TsEditorPlugin;

impl Plugin for TsEditorPlugin {
    fn build(&self, app: &mut App) {
        // Only add EguiPlugin if not already added
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }

        app.init_resource::<PointerState>()
            .init_resource::<SelectedTile>()
            .init_resource::<PaletteStatus>()
            .init_resource::<CameraRig>()
            .init_resource::<CursorHighlight>()
            .add_systems(Startup, (
                camera::setup_camera,
                palette::select_initial_tile,
                highlight::start_cursor_highlight,
            ))
            .add_systems(Update, (
                cursor::update_pointer_state,
                brush::handle_layer_actions,
                highlight::toggle_cursor_highlight,
                brush::brush_system,
                highlight::tick_cursor_highlight,
                camera::camera_pan,
                camera::camera_zoom,
                palette::palette_ui_system,
            ).chain());
    }
}
