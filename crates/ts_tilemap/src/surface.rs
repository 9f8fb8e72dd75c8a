use std::collections::HashMap;

use bevy::prelude::*;
use ts_core::{TileCoord, TileId};

/// Storage backend for tile grids.
///
/// The layer stack only talks to grids through this trait, so it can run
/// against the in-memory [`TileSurfaces`] store or any other backend.
pub trait GridSurface {
    type Handle: Copy + Eq + std::fmt::Debug;

    /// Create a new, empty surface.
    fn create_surface(&mut self) -> Self::Handle;

    fn set_draw_order(&mut self, surface: Self::Handle, order: i32);

    /// Set a cell. `None` erases it.
    fn set_cell(&mut self, surface: Self::Handle, coord: TileCoord, tile: Option<TileId>);

    fn clear_all_cells(&mut self, surface: Self::Handle);

    /// Destroy a surface. The handle must not be used afterwards.
    fn destroy(&mut self, surface: Self::Handle);

    fn cell(&self, surface: Self::Handle, coord: TileCoord) -> Option<TileId>;

    fn draw_order(&self, surface: Self::Handle) -> Option<i32>;
}

/// Handle to a grid in [`TileSurfaces`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(pub u32);

/// Sparse grid of tiles. Empty cells are not stored.
#[derive(Clone, Debug, Default)]
pub struct TileGrid {
    cells: HashMap<TileCoord, TileId>,
    draw_order: i32,
}

impl TileGrid {
    pub fn get(&self, coord: TileCoord) -> Option<TileId> {
        self.cells.get(&coord).copied()
    }

    /// Returns true if the cell content changed.
    pub fn set(&mut self, coord: TileCoord, tile: Option<TileId>) -> bool {
        match tile {
            Some(tile) => self.cells.insert(coord, tile) != Some(tile),
            None => self.cells.remove(&coord).is_some(),
        }
    }

    /// Returns true if any cell was removed.
    pub fn clear(&mut self) -> bool {
        let had_cells = !self.cells.is_empty();
        self.cells.clear();
        had_cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn draw_order(&self) -> i32 {
        self.draw_order
    }
}

/// A mutation applied to [`TileSurfaces`], recorded for the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceChange {
    CellSet {
        surface: SurfaceId,
        coord: TileCoord,
        tile: TileId,
    },
    CellCleared {
        surface: SurfaceId,
        coord: TileCoord,
    },
    Cleared(SurfaceId),
    DrawOrder {
        surface: SurfaceId,
        order: i32,
    },
    Destroyed(SurfaceId),
}

/// In-memory grid store.
/// Every effective mutation is journaled until [`TileSurfaces::drain_changes`] is called.
#[derive(Debug, Default)]
pub struct TileSurfaces {
    grids: HashMap<SurfaceId, TileGrid>,
    next_id: u32,
    changes: Vec<SurfaceChange>,
}

impl TileSurfaces {
    pub fn grid(&self, surface: SurfaceId) -> Option<&TileGrid> {
        self.grids.get(&surface)
    }

    pub fn contains(&self, surface: SurfaceId) -> bool {
        self.grids.contains_key(&surface)
    }

    /// Number of live surfaces.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Take all changes recorded since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<SurfaceChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    fn grid_mut(&mut self, surface: SurfaceId) -> Option<&mut TileGrid> {
        let grid = self.grids.get_mut(&surface);
        if grid.is_none() {
            warn!("Ignoring operation on unknown surface {:?}", surface);
        }
        grid
    }
}

impl GridSurface for TileSurfaces {
    type Handle = SurfaceId;

    fn create_surface(&mut self) -> SurfaceId {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        self.grids.insert(id, TileGrid::default());
        id
    }

    fn set_draw_order(&mut self, surface: SurfaceId, order: i32) {
        let Some(grid) = self.grid_mut(surface) else { return };
        if grid.draw_order != order {
            grid.draw_order = order;
            self.changes.push(SurfaceChange::DrawOrder { surface, order });
        }
    }

    fn set_cell(&mut self, surface: SurfaceId, coord: TileCoord, tile: Option<TileId>) {
        let Some(grid) = self.grid_mut(surface) else { return };
        if !grid.set(coord, tile) {
            return;
        }
        self.changes.push(match tile {
            Some(tile) => SurfaceChange::CellSet { surface, coord, tile },
            None => SurfaceChange::CellCleared { surface, coord },
        });
    }

    fn clear_all_cells(&mut self, surface: SurfaceId) {
        let Some(grid) = self.grid_mut(surface) else { return };
        if grid.clear() {
            self.changes.push(SurfaceChange::Cleared(surface));
        }
    }

    fn destroy(&mut self, surface: SurfaceId) {
        if self.grids.remove(&surface).is_some() {
            self.changes.push(SurfaceChange::Destroyed(surface));
        } else {
            warn!("Surface {:?} already destroyed", surface);
        }
    }

    fn cell(&self, surface: SurfaceId, coord: TileCoord) -> Option<TileId> {
        self.grids.get(&surface).and_then(|grid| grid.get(coord))
    }

    fn draw_order(&self, surface: SurfaceId) -> Option<i32> {
        self.grids.get(&surface).map(TileGrid::draw_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STONE: TileId = TileId(1);

    #[test]
    fn handles_are_never_reused() {
        let mut surfaces = TileSurfaces::default();
        let a = surfaces.create_surface();
        surfaces.destroy(a);
        let b = surfaces.create_surface();
        assert_ne!(a, b);
        assert!(!surfaces.contains(a));
        assert_eq!(surfaces.len(), 1);
    }

    #[test]
    fn rewriting_same_tile_records_nothing() {
        let mut surfaces = TileSurfaces::default();
        let s = surfaces.create_surface();
        let coord = TileCoord::new(2, 3);

        surfaces.set_cell(s, coord, Some(STONE));
        surfaces.set_cell(s, coord, Some(STONE));
        assert_eq!(surfaces.grid(s).unwrap().len(), 1);
        assert_eq!(
            surfaces.drain_changes(),
            vec![SurfaceChange::CellSet { surface: s, coord, tile: STONE }]
        );
        assert!(!surfaces.has_pending_changes());
    }

    #[test]
    fn erasing_empty_cell_records_nothing() {
        let mut surfaces = TileSurfaces::default();
        let s = surfaces.create_surface();
        surfaces.set_cell(s, TileCoord::new(0, 0), None);
        surfaces.clear_all_cells(s);
        assert!(surfaces.drain_changes().is_empty());
    }

    #[test]
    fn journal_keeps_mutation_order() {
        let mut surfaces = TileSurfaces::default();
        let s = surfaces.create_surface();
        let coord = TileCoord::new(-1, 4);

        surfaces.set_draw_order(s, 2);
        surfaces.set_cell(s, coord, Some(STONE));
        surfaces.set_cell(s, coord, None);
        surfaces.destroy(s);

        assert_eq!(
            surfaces.drain_changes(),
            vec![
                SurfaceChange::DrawOrder { surface: s, order: 2 },
                SurfaceChange::CellSet { surface: s, coord, tile: STONE },
                SurfaceChange::CellCleared { surface: s, coord },
                SurfaceChange::Destroyed(s),
            ]
        );
    }

    #[test]
    fn unknown_surface_is_ignored() {
        let mut surfaces = TileSurfaces::default();
        let ghost = SurfaceId(99);
        surfaces.set_cell(ghost, TileCoord::new(0, 0), Some(STONE));
        surfaces.set_draw_order(ghost, 3);
        surfaces.destroy(ghost);
        assert_eq!(surfaces.cell(ghost, TileCoord::new(0, 0)), None);
        assert_eq!(surfaces.draw_order(ghost), None);
        assert!(surfaces.drain_changes().is_empty());
    }
}
