use std::path::Path;

use bevy::prelude::*;
use ts_core::{EditorSettings, TileRegistry, SETTINGS_PATH};

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Tilestack - Tile Editor".into(),
            resolution: (1280.0, 720.0).into(),
            ..default()
        }),
        ..default()
    }));

    // LogPlugin is live from here on.
    let settings = EditorSettings::load_or_default(Path::new(SETTINGS_PATH));
    let registry = load_palette(&settings);

    app.insert_resource(ClearColor(Color::srgb_u8(30, 30, 30)))
        // Inserted before the plugins so their init_resource calls keep these values.
        .insert_resource(settings)
        .insert_resource(registry)
        .add_plugins((
            ts_core::TsCorePlugin,
            ts_tilemap::TsTilemapPlugin,
            ts_editor::TsEditorPlugin,
        ))
        .run();
}

/// Load the tile palette named in the settings, falling back to the built-in one.
fn load_palette(settings: &EditorSettings) -> TileRegistry {
    match TileRegistry::load(&settings.palette_path) {
        Ok(registry) => {
            info!(
                "Loaded {} tiles from {}",
                registry.len(),
                settings.palette_path.display()
            );
            registry
        }
        Err(e) => {
            warn!(
                "Using built-in palette ({}): {}",
                settings.palette_path.display(),
                e
            );
            TileRegistry::default()
        }
    }
}
