use bevy::prelude::*;
use ts_core::TileCoord;

/// Converts a screen-space pointer position into a grid cell.
pub trait PointerMapper {
    /// `screen` is in logical pixels relative to the viewport's top-left corner.
    fn screen_to_cell(&self, screen: Vec2) -> Option<TileCoord>;
}

/// Snapshot of an orthographic 2D camera.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoView {
    /// Camera position in world space.
    pub translation: Vec2,
    /// World units per logical pixel.
    pub scale: f32,
    pub viewport_size: Vec2,
    pub tile_size: f32,
}

impl OrthoView {
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        let offset = screen - self.viewport_size / 2.0;
        // Screen y grows downwards, world y upwards.
        self.translation + Vec2::new(offset.x, -offset.y) * self.scale
    }
}

impl PointerMapper for OrthoView {
    fn screen_to_cell(&self, screen: Vec2) -> Option<TileCoord> {
        Some(TileCoord::from_world(self.screen_to_world(screen), self.tile_size))
    }
}

/// Maps through a live Bevy camera.
pub struct CameraPointer<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
    pub tile_size: f32,
}

impl PointerMapper for CameraPointer<'_> {
    fn screen_to_cell(&self, screen: Vec2) -> Option<TileCoord> {
        let world = self.camera.viewport_to_world_2d(self.transform, screen).ok()?;
        Some(TileCoord::from_world(world, self.tile_size))
    }
}
