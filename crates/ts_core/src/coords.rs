use bevy::prelude::*;

/// Cell position on a tile grid.
/// Grids are unbounded, so negative coordinates are valid.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug, Default, Component)]
pub struct TileCoord {
    pub x: i32,
    pub y: i32,
}

impl TileCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing the given world-space point.
    /// Cell (0, 0) spans `[0, tile_size)` on both axes.
    pub fn from_world(world: Vec2, tile_size: f32) -> Self {
        Self {
            x: (world.x / tile_size).floor() as i32,
            y: (world.y / tile_size).floor() as i32,
        }
    }

    /// World-space center of this cell.
    pub fn center(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            (self.x as f32 + 0.5) * tile_size,
            (self.y as f32 + 0.5) * tile_size,
        )
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_to_cell_floors_negative_positions() {
        assert_eq!(TileCoord::from_world(Vec2::new(-0.1, -31.9), 32.0), TileCoord::new(-1, -1));
        assert_eq!(TileCoord::from_world(Vec2::new(-32.0, 0.0), 32.0), TileCoord::new(-1, 0));
    }

    #[test]
    fn cell_edges_belong_to_the_upper_cell() {
        assert_eq!(TileCoord::from_world(Vec2::new(0.0, 0.0), 32.0), TileCoord::new(0, 0));
        assert_eq!(TileCoord::from_world(Vec2::new(32.0, 63.9), 32.0), TileCoord::new(1, 1));
    }

    #[test]
    fn center_maps_back_to_same_cell() {
        let cell = TileCoord::new(-4, 7);
        assert_eq!(TileCoord::from_world(cell.center(16.0), 16.0), cell);
    }
}
