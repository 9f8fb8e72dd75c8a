use bevy::prelude::*;

pub mod action;
pub mod coords;
pub mod error;
pub mod settings;
pub mod tile;

pub use action::{EditorAction, EditorActionEvent, handle_action_shortcuts};
pub use coords::TileCoord;
pub use error::EditorError;
pub use settings::{EditorSettings, SETTINGS_PATH};
pub use tile::{TileDef, TileId, TileRegistry};

/// Core plugin providing foundational types for Tilestack.
/// Registers editor action events and the keyboard shortcut system.
pub struct TsCorePlugin;

impl Plugin for TsCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditorSettings>()
            .init_resource::<TileRegistry>()
            .add_event::<EditorActionEvent>()
            .add_systems(PreUpdate, handle_action_shortcuts.after(bevy::input::InputSystem));
    }
}
