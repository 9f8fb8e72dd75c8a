use std::collections::HashMap;

use bevy::prelude::*;
use ts_core::{EditorSettings, TileCoord, TileId, TileRegistry};

use crate::surface::{GridSurface, SurfaceChange, SurfaceId};
use crate::TileLayers;

/// Z distance between consecutive draw orders.
pub const LAYER_Z_STEP: f32 = 1.0;

/// Extra z for the cursor marker so it sits above tiles of the same layer.
const CURSOR_Z_OFFSET: f32 = 0.5;

/// Sprite drawing one cell of a surface.
#[derive(Component, Clone, Copy, Debug)]
pub struct TileSprite {
    pub surface: SurfaceId,
    pub coord: TileCoord,
    pub tile: TileId,
}

/// Spawned sprite entities per surface and cell.
#[derive(Resource, Default)]
pub struct SurfaceSprites {
    sprites: HashMap<SurfaceId, HashMap<TileCoord, (Entity, TileId)>>,
}

impl SurfaceSprites {
    /// Number of cells with a live sprite on `surface`.
    pub fn count(&self, surface: SurfaceId) -> usize {
        self.sprites.get(&surface).map_or(0, HashMap::len)
    }

    pub fn total(&self) -> usize {
        self.sprites.values().map(HashMap::len).sum()
    }
}

/// World z for a tile at the given draw order.
pub fn tile_z(draw_order: i32, tile: TileId) -> f32 {
    let offset = if tile == TileId::CURSOR { CURSOR_Z_OFFSET } else { 0.0 };
    draw_order as f32 * LAYER_Z_STEP + offset
}

fn tile_bundle(
    coord: TileCoord,
    tile: TileId,
    draw_order: i32,
    registry: &TileRegistry,
    tile_size: f32,
) -> (Sprite, Transform) {
    let [r, g, b, a] = registry.color(tile).unwrap_or([255, 0, 255, 255]);
    (
        Sprite {
            color: Color::srgba_u8(r, g, b, a),
            custom_size: Some(Vec2::splat(tile_size)),
            ..default()
        },
        Transform::from_translation(coord.center(tile_size).extend(tile_z(draw_order, tile))),
    )
}

/// Mirror surface changes into sprite entities.
///
/// Sprites removed by a `Cleared` change are held until the end of the batch,
/// so a cell that is cleared and set again in the same frame keeps its entity.
pub fn sync_tile_sprites(
    mut commands: Commands,
    mut layers: ResMut<TileLayers>,
    mut sprites: ResMut<SurfaceSprites>,
    registry: Res<TileRegistry>,
    settings: Res<EditorSettings>,
) {
    if !layers.surfaces().has_pending_changes() {
        return;
    }

    let changes = layers.surfaces_mut().drain_changes();
    let surfaces = layers.surfaces();
    let tile_size = settings.tile_size;
    let mut cleared: HashMap<(SurfaceId, TileCoord), Entity> = HashMap::new();

    for change in changes {
        match change {
            SurfaceChange::CellSet { surface, coord, tile } => {
                let draw_order = surfaces.draw_order(surface).unwrap_or(0);
                let bundle = tile_bundle(coord, tile, draw_order, &registry, tile_size);
                let cells = sprites.sprites.entry(surface).or_default();
                let existing = cells
                    .get(&coord)
                    .map(|(entity, _)| *entity)
                    .or_else(|| cleared.remove(&(surface, coord)));
                let entity = match existing {
                    Some(entity) => {
                        commands
                            .entity(entity)
                            .insert((bundle, TileSprite { surface, coord, tile }));
                        entity
                    }
                    None => commands
                        .spawn((bundle, TileSprite { surface, coord, tile }))
                        .id(),
                };
                cells.insert(coord, (entity, tile));
            }
            SurfaceChange::CellCleared { surface, coord } => {
                let removed = sprites
                    .sprites
                    .get_mut(&surface)
                    .and_then(|cells| cells.remove(&coord));
                if let Some((entity, _)) = removed {
                    commands.entity(entity).despawn();
                }
            }
            SurfaceChange::Cleared(surface) => {
                if let Some(cells) = sprites.sprites.get_mut(&surface) {
                    for (coord, (entity, _)) in cells.drain() {
                        cleared.insert((surface, coord), entity);
                    }
                }
            }
            SurfaceChange::DrawOrder { surface, order } => {
                let Some(cells) = sprites.sprites.get(&surface) else { continue };
                for (coord, (entity, tile)) in cells {
                    let translation = coord.center(tile_size).extend(tile_z(order, *tile));
                    commands.entity(*entity).insert(Transform::from_translation(translation));
                }
            }
            SurfaceChange::Destroyed(surface) => {
                if let Some(cells) = sprites.sprites.remove(&surface) {
                    for (entity, _) in cells.into_values() {
                        commands.entity(entity).despawn();
                    }
                }
            }
        }
    }

    for entity in cleared.into_values() {
        commands.entity(entity).despawn();
    }
}
