use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod layers;
pub mod pointer;
pub mod render;
pub mod surface;

pub use layers::{Layer, LayerManager};
pub use pointer::{CameraPointer, OrthoView, PointerMapper};
pub use render::{SurfaceSprites, TileSprite, LAYER_Z_STEP};
pub use surface::{GridSurface, SurfaceChange, SurfaceId, TileGrid, TileSurfaces};

/// The editor's layer stack over the in-memory surface store.
#[derive(Resource, Deref, DerefMut)]
pub struct TileLayers(pub LayerManager<TileSurfaces>);

impl Default for TileLayers {
    fn default() -> Self {
        Self(LayerManager::new(TileSurfaces::default()))
    }
}

/// Tilemap plugin for Tilestack.
/// Owns the layer stack and draws every surface as sprites.
pub struct TsTilemapPlugin;

impl Plugin for TsTilemapPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TileLayers>()
            .init_resource::<SurfaceSprites>()
            .add_systems(
                PostUpdate,
                render::sync_tile_sprites.before(TransformSystem::TransformPropagate),
            );
    }
}
