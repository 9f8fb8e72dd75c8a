use bevy::prelude::*;
use ts_core::{TileCoord, TileId};

use crate::surface::GridSurface;

/// One grid in the layer stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layer<H> {
    pub surface: H,
    /// Position in the draw order; always equal to the layer's stack index.
    pub draw_order: i32,
}

/// Ordered stack of tile layers with one active layer.
///
/// Invariants:
/// - the stack always holds layer 0, which is never destroyed
/// - the layer at index `i` has draw order `i`
/// - the active index is in `0..len()`
///
/// Overlays are extra surfaces outside the stack. They survive `clear_all` and
/// can only be written through the `*_overlay` methods.
pub struct LayerManager<S: GridSurface> {
    surfaces: S,
    layers: Vec<Layer<S::Handle>>,
    active_index: usize,
    active: Layer<S::Handle>,
    overlays: Vec<S::Handle>,
}

impl<S: GridSurface> LayerManager<S> {
    /// Build the stack around an existing surface, which becomes layer 0.
    pub fn initialize(mut surfaces: S, default_surface: S::Handle) -> Self {
        surfaces.set_draw_order(default_surface, 0);
        let base = Layer {
            surface: default_surface,
            draw_order: 0,
        };

        Self {
            surfaces,
            layers: vec![base],
            active_index: 0,
            active: base,
            overlays: Vec::new(),
        }
    }

    /// Build the stack with a freshly created layer 0.
    pub fn new(mut surfaces: S) -> Self {
        let default_surface = surfaces.create_surface();
        Self::initialize(surfaces, default_surface)
    }

    /// Move to the layer above, creating it when moving past the top.
    pub fn move_layer_up(&mut self) {
        self.active_index += 1;

        if self.active_index >= self.layers.len() {
            let draw_order = self.active_index as i32;
            let surface = self.surfaces.create_surface();
            self.surfaces.set_draw_order(surface, draw_order);
            self.layers.push(Layer { surface, draw_order });
            info!("Created layer {}", self.active_index);
        }

        self.sync_active();
    }

    /// Move to the layer below. Does nothing on layer 0.
    pub fn move_layer_down(&mut self) {
        if self.active_index == 0 {
            return;
        }

        self.active_index -= 1;
        self.sync_active();
    }

    /// Destroy every layer above 0 and erase layer 0 in place.
    pub fn clear_all(&mut self) {
        self.active_index = 0;

        let removed = self.layers.len() - 1;
        for layer in self.layers.drain(1..) {
            self.surfaces.destroy(layer.surface);
        }
        self.surfaces.clear_all_cells(self.layers[0].surface);

        self.sync_active();
        info!("Cleared all layers ({} removed)", removed);
    }

    /// Set a cell on the active layer. `None` erases.
    pub fn paint_at(&mut self, coord: TileCoord, tile: Option<TileId>) {
        self.surfaces.set_cell(self.active.surface, coord, tile);
    }

    pub fn erase_at(&mut self, coord: TileCoord) {
        self.paint_at(coord, None);
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn active_layer(&self) -> Layer<S::Handle> {
        self.active
    }

    pub fn layer(&self, index: usize) -> Option<Layer<S::Handle>> {
        self.layers.get(index).copied()
    }

    pub fn layers(&self) -> &[Layer<S::Handle>] {
        &self.layers
    }

    /// Number of layers; never zero.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Tile at `coord` on the layer at `index`.
    pub fn tile_at(&self, index: usize, coord: TileCoord) -> Option<TileId> {
        self.layers
            .get(index)
            .and_then(|layer| self.surfaces.cell(layer.surface, coord))
    }

    /// Label shown for the active layer.
    pub fn layer_label(&self) -> String {
        format!("Layer: {}", self.active_index)
    }

    pub fn surfaces(&self) -> &S {
        &self.surfaces
    }

    pub(crate) fn surfaces_mut(&mut self) -> &mut S {
        &mut self.surfaces
    }

    /// Create a surface outside the stack, drawn with the active layer.
    pub fn create_overlay(&mut self) -> S::Handle {
        let overlay = self.surfaces.create_surface();
        self.surfaces.set_draw_order(overlay, self.active.draw_order);
        self.overlays.push(overlay);
        overlay
    }

    pub fn is_overlay(&self, surface: S::Handle) -> bool {
        self.overlays.contains(&surface)
    }

    /// Set a cell on an overlay. `None` erases.
    pub fn set_overlay_cell(&mut self, overlay: S::Handle, coord: TileCoord, tile: Option<TileId>) {
        if self.check_overlay(overlay) {
            self.surfaces.set_cell(overlay, coord, tile);
        }
    }

    pub fn clear_overlay(&mut self, overlay: S::Handle) {
        if self.check_overlay(overlay) {
            self.surfaces.clear_all_cells(overlay);
        }
    }

    /// Give an overlay the draw order of the active layer.
    pub fn follow_active_layer(&mut self, overlay: S::Handle) {
        if self.check_overlay(overlay) {
            self.surfaces.set_draw_order(overlay, self.active.draw_order);
        }
    }

    fn check_overlay(&self, surface: S::Handle) -> bool {
        let known = self.is_overlay(surface);
        if !known {
            warn!("Surface {:?} is not an overlay", surface);
        }
        known
    }

    fn sync_active(&mut self) {
        self.active = self.layers[self.active_index];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{SurfaceChange, TileSurfaces};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const STONE: TileId = TileId(0);
    const GRASS: TileId = TileId(1);

    fn manager() -> LayerManager<TileSurfaces> {
        LayerManager::new(TileSurfaces::default())
    }

    fn assert_invariants(layers: &LayerManager<TileSurfaces>) {
        assert!(layers.len() >= 1);
        assert!(layers.active_index() < layers.len());
        assert_eq!(layers.active_layer(), layers.layers()[layers.active_index()]);
        for (i, layer) in layers.layers().iter().enumerate() {
            assert_eq!(layer.draw_order, i as i32);
            assert_eq!(layers.surfaces().draw_order(layer.surface), Some(i as i32));
        }
    }

    #[test]
    fn starts_with_single_layer() {
        let layers = manager();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.active_index(), 0);
        assert_eq!(layers.layer_label(), "Layer: 0");
        assert_invariants(&layers);
    }

    #[test]
    fn initialize_wraps_existing_surface() {
        let mut surfaces = TileSurfaces::default();
        let existing = surfaces.create_surface();
        surfaces.set_draw_order(existing, 7);

        let layers = LayerManager::initialize(surfaces, existing);
        assert_eq!(layers.active_layer().surface, existing);
        assert_invariants(&layers);
    }

    #[test]
    fn layer_up_at_top_appends_one_layer() {
        let mut layers = manager();
        layers.move_layer_up();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers.active_index(), 1);
        assert_eq!(layers.active_layer().draw_order, 1);
        assert_eq!(layers.layer_label(), "Layer: 1");
        assert_invariants(&layers);
    }

    #[test]
    fn layer_up_below_top_reuses_layer() {
        let mut layers = manager();
        layers.move_layer_up();
        let first_up = layers.active_layer();
        layers.move_layer_down();
        layers.move_layer_up();

        assert_eq!(layers.len(), 2);
        assert_eq!(layers.active_layer(), first_up);
    }

    #[test]
    fn layer_down_at_bottom_is_noop() {
        let mut layers = manager();
        layers.paint_at(TileCoord::new(0, 0), Some(STONE));
        let before = layers.active_layer();
        layers.surfaces_mut().drain_changes();

        layers.move_layer_down();
        layers.move_layer_down();

        assert_eq!(layers.active_index(), 0);
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.active_layer(), before);
        assert!(layers.surfaces_mut().drain_changes().is_empty());
    }

    #[test]
    fn layer_down_keeps_upper_content() {
        let mut layers = manager();
        layers.move_layer_up();
        layers.paint_at(TileCoord::new(5, 5), Some(GRASS));
        layers.move_layer_down();
        layers.move_layer_up();
        assert_eq!(layers.tile_at(1, TileCoord::new(5, 5)), Some(GRASS));
    }

    #[test]
    fn paint_then_erase_restores_empty() {
        let mut layers = manager();
        let coord = TileCoord::new(-3, 8);
        layers.paint_at(coord, Some(STONE));
        assert_eq!(layers.tile_at(0, coord), Some(STONE));
        layers.erase_at(coord);
        assert_eq!(layers.tile_at(0, coord), None);
    }

    #[test]
    fn navigate_then_clear_scenario() {
        let mut layers = manager();
        layers.paint_at(TileCoord::new(1, 1), Some(STONE));

        layers.move_layer_up();
        layers.move_layer_up();
        assert_eq!((layers.len(), layers.active_index()), (3, 2));
        layers.paint_at(TileCoord::new(1, 1), Some(GRASS));

        layers.move_layer_down();
        assert_eq!((layers.len(), layers.active_index()), (3, 1));

        let upper: Vec<_> = layers.layers()[1..].iter().map(|l| l.surface).collect();
        layers.clear_all();

        assert_eq!((layers.len(), layers.active_index()), (1, 0));
        assert_eq!(layers.tile_at(0, TileCoord::new(1, 1)), None);
        assert!(layers.surfaces().grid(layers.active_layer().surface).unwrap().is_empty());
        for surface in upper {
            assert!(!layers.surfaces().contains(surface));
        }
        assert_invariants(&layers);
    }

    #[test]
    fn clear_all_keeps_layer_zero_surface() {
        let mut layers = manager();
        let base = layers.active_layer().surface;
        layers.move_layer_up();
        layers.clear_all();

        assert_eq!(layers.active_layer().surface, base);
        assert_eq!(layers.surfaces().len(), 1);
    }

    #[test]
    fn clear_all_destroys_upper_surfaces_once() {
        let mut layers = manager();
        layers.move_layer_up();
        layers.move_layer_up();
        layers.surfaces_mut().drain_changes();

        layers.clear_all();
        let destroyed = layers
            .surfaces_mut()
            .drain_changes()
            .into_iter()
            .filter(|c| matches!(c, SurfaceChange::Destroyed(_)))
            .count();
        assert_eq!(destroyed, 2);
    }

    #[test]
    fn layers_are_independent() {
        let mut layers = manager();
        let coord = TileCoord::new(2, 3);

        layers.paint_at(coord, Some(STONE));
        layers.move_layer_up();
        layers.paint_at(coord, Some(GRASS));

        assert_eq!(layers.tile_at(0, coord), Some(STONE));
        assert_eq!(layers.tile_at(1, coord), Some(GRASS));
    }

    #[test]
    fn overlay_stays_outside_the_stack() {
        let mut layers = manager();
        layers.move_layer_up();
        let overlay = layers.create_overlay();
        assert_eq!(layers.surfaces().draw_order(overlay), Some(1));

        layers.set_overlay_cell(overlay, TileCoord::new(0, 0), Some(TileId::CURSOR));
        layers.clear_all();
        layers.follow_active_layer(overlay);

        assert_eq!(layers.len(), 1);
        assert_eq!(layers.surfaces().draw_order(overlay), Some(0));
        assert_eq!(layers.surfaces().cell(overlay, TileCoord::new(0, 0)), Some(TileId::CURSOR));
        assert_invariants(&layers);
    }

    #[test]
    fn overlay_methods_ignore_stack_layers() {
        let mut layers = manager();
        layers.paint_at(TileCoord::new(1, 1), Some(STONE));
        layers.move_layer_up();
        let base = layers.layer(0).unwrap().surface;

        layers.clear_overlay(base);
        layers.set_overlay_cell(base, TileCoord::new(2, 2), Some(GRASS));
        layers.follow_active_layer(base);

        assert!(!layers.is_overlay(base));
        assert_eq!(layers.tile_at(0, TileCoord::new(1, 1)), Some(STONE));
        assert_eq!(layers.tile_at(0, TileCoord::new(2, 2)), None);
        assert_invariants(&layers);
    }

    #[test]
    fn random_navigation_keeps_invariants() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut layers = manager();

        for _ in 0..2_000 {
            let before = (layers.len(), layers.active_index());
            match rng.gen_range(0..10) {
                0 => {
                    layers.clear_all();
                    assert_eq!((layers.len(), layers.active_index()), (1, 0));
                }
                1..=5 => {
                    layers.move_layer_up();
                    let grew = before.1 + 1 == before.0;
                    assert_eq!(layers.len(), before.0 + grew as usize);
                    assert_eq!(layers.active_index(), before.1 + 1);
                }
                _ => {
                    layers.move_layer_down();
                    assert_eq!(layers.len(), before.0);
                    assert_eq!(layers.active_index(), before.1.saturating_sub(1));
                }
            }
            assert_invariants(&layers);
        }
    }
}
