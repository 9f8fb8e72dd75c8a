use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Default location of the settings file.
pub const SETTINGS_PATH: &str = "assets/editor_settings.ron";

/// Tunable values for the editor.
/// Camera values are measured in tiles, so they hold at any tile size.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Pan speed in tiles per second.
    pub camera_speed: f32,
    /// Zoom change in tiles per second while Q/E is held.
    pub zoom_speed: f32,
    /// Smallest half-height of the view, in tiles.
    pub min_zoom: f32,
    /// Largest half-height of the view, in tiles.
    pub max_zoom: f32,
    pub initial_zoom: f32,
    /// Edge length of one cell in world units.
    pub tile_size: f32,
    /// How long the cursor marker stays on screen each highlight cycle.
    pub highlight_interval_secs: f32,
    /// RON file with the tile palette.
    pub palette_path: PathBuf,
    /// Palette entry selected at startup.
    pub initial_tile: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            camera_speed: 5.0,
            zoom_speed: 2.5,
            min_zoom: 3.0,
            max_zoom: 30.0,
            initial_zoom: 5.0,
            tile_size: 32.0,
            highlight_interval_secs: 0.01,
            palette_path: PathBuf::from("assets/tiles/blocks.ron"),
            initial_tile: "grass".to_string(),
        }
    }
}

impl EditorSettings {
    /// Load settings from a RON file. Fields missing from the file keep their defaults.
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let contents = fs::read_to_string(path)?;
        let settings: EditorSettings = ron::from_str(&contents)?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults when the file is missing or invalid.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                info!("Loaded editor settings from {}", path.display());
                settings
            }
            Err(e) => {
                warn!("Using default editor settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Serialize to pretty RON.
    pub fn to_ron(&self) -> Result<String, EditorError> {
        let pretty_config = ron::ser::PrettyConfig::new().depth_limit(2);
        Ok(ron::ser::to_string_pretty(self, pretty_config)?)
    }

    /// Clamp a zoom value into the configured bounds.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    // f32::clamp panics on NaN bounds or min > max; tile_size is used as a divisor
    // and the highlight interval becomes a Duration.
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        for (name, value, default) in [
            ("camera_speed", &mut self.camera_speed, defaults.camera_speed),
            ("zoom_speed", &mut self.zoom_speed, defaults.zoom_speed),
            ("min_zoom", &mut self.min_zoom, defaults.min_zoom),
            ("max_zoom", &mut self.max_zoom, defaults.max_zoom),
            ("initial_zoom", &mut self.initial_zoom, defaults.initial_zoom),
            ("tile_size", &mut self.tile_size, defaults.tile_size),
            (
                "highlight_interval_secs",
                &mut self.highlight_interval_secs,
                defaults.highlight_interval_secs,
            ),
        ] {
            if !value.is_finite() {
                warn!("{} must be finite, got {}; using {}", name, value, default);
                *value = default;
            }
        }

        if self.min_zoom > self.max_zoom {
            warn!("min_zoom {} > max_zoom {}; swapping", self.min_zoom, self.max_zoom);
            std::mem::swap(&mut self.min_zoom, &mut self.max_zoom);
        }
        if self.tile_size <= 0.0 {
            warn!("tile_size must be positive, got {}", self.tile_size);
            self.tile_size = defaults.tile_size;
        }
        if self.highlight_interval_secs < 0.0 {
            warn!(
                "highlight_interval_secs must not be negative, got {}",
                self.highlight_interval_secs
            );
            self.highlight_interval_secs = defaults.highlight_interval_secs;
        }
        self.initial_zoom = self.clamp_zoom(self.initial_zoom);
        self
    }
}
