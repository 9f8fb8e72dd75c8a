use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::EditorError;

/// Identifier of a tile type: an index into the [`TileRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileId(pub u32);

impl TileId {
    /// Marker tile drawn on the cursor highlight overlay. Never shown in the palette.
    pub const CURSOR: TileId = TileId(u32::MAX);
}

/// A paintable tile type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TileDef {
    /// Asset name the palette selects by.
    pub name: String,
    /// RGBA color used to draw the tile.
    pub color: [u8; 4],
}

impl TileDef {
    pub fn new(name: impl Into<String>, color: [u8; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// All tile types available to the palette, loaded from a RON file.
#[derive(Resource, Clone, Debug, Serialize, Deserialize)]
pub struct TileRegistry {
    #[serde(default = "default_cursor_color")]
    pub cursor_color: [u8; 4],
    pub tiles: Vec<TileDef>,
}

fn default_cursor_color() -> [u8; 4] {
    [255, 255, 255, 96]
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self {
            cursor_color: default_cursor_color(),
            tiles: vec![
                TileDef::new("grass", [50, 205, 50, 255]),
                TileDef::new("stone", [105, 105, 105, 255]),
                TileDef::new("sand", [222, 184, 135, 255]),
                TileDef::new("water", [0, 191, 255, 255]),
                TileDef::new("brick", [178, 34, 34, 255]),
            ],
        }
    }
}

impl TileRegistry {
    /// Parse a registry from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, EditorError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a registry from a RON file.
    pub fn load(path: &Path) -> Result<Self, EditorError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Resolve a tile by its asset name.
    pub fn lookup(&self, name: &str) -> Result<TileId, EditorError> {
        self.tiles
            .iter()
            .position(|def| def.name == name)
            .map(|index| TileId(index as u32))
            .ok_or_else(|| EditorError::TileNotFound(name.to_string()))
    }

    pub fn get(&self, id: TileId) -> Option<&TileDef> {
        self.tiles.get(id.0 as usize)
    }

    /// Draw color for a tile, including the cursor marker.
    pub fn color(&self, id: TileId) -> Option<[u8; 4]> {
        if id == TileId::CURSOR {
            return Some(self.cursor_color);
        }
        self.get(id).map(|def| def.color)
    }

    /// Palette entries in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &TileDef)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(index, def)| (TileId(index as u32), def))
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
