//! Cursor highlight: a periodic task that marks the cell under the pointer
//! on an overlay surface drawn with the active layer.
//!
//! Each cycle marks the cell, keeps the mark for one interval, then clears the
//! overlay and marks again. Cancelling clears the overlay; the task can be
//! started again later.

use std::time::Duration;

use bevy::prelude::*;
use ts_core::{EditorAction, EditorActionEvent, EditorSettings, TileCoord, TileId};
use ts_tilemap::{LayerManager, SurfaceId, TileLayers, TileSurfaces};

use crate::cursor::PointerState;

#[derive(Resource, Debug)]
pub struct CursorHighlight {
    overlay: Option<SurfaceId>,
    timer: Timer,
    running: bool,
    marked: Option<TileCoord>,
}

impl FromWorld for CursorHighlight {
    fn from_world(world: &mut World) -> Self {
        let interval = world
            .get_resource::<EditorSettings>()
            .map_or(EditorSettings::default().highlight_interval_secs, |s| {
                s.highlight_interval_secs
            });
        Self::new(interval)
    }
}

impl CursorHighlight {
    pub fn new(interval_secs: f32) -> Self {
        let interval = Duration::try_from_secs_f32(interval_secs).unwrap_or_else(|e| {
            warn!("Invalid highlight interval {}: {}", interval_secs, e);
            Duration::from_secs_f32(EditorSettings::default().highlight_interval_secs)
        });
        Self {
            overlay: None,
            timer: Timer::new(interval, TimerMode::Once),
            running: false,
            marked: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Cell currently marked on the overlay.
    pub fn marked(&self) -> Option<TileCoord> {
        self.marked
    }

    pub fn overlay(&self) -> Option<SurfaceId> {
        self.overlay
    }

    /// Start the task, creating the overlay surface on first use.
    pub fn start(&mut self, layers: &mut LayerManager<TileSurfaces>) {
        if self.running {
            return;
        }
        if self.overlay.is_none() {
            self.overlay = Some(layers.create_overlay());
        }
        self.running = true;
        self.marked = None;
        self.timer.reset();
        info!("Cursor highlight started");
    }

    /// Stop the task and clear the overlay.
    pub fn cancel(&mut self, layers: &mut LayerManager<TileSurfaces>) {
        if !self.running {
            return;
        }
        self.running = false;
        self.marked = None;
        if let Some(overlay) = self.overlay {
            layers.clear_overlay(overlay);
        }
        info!("Cursor highlight cancelled");
    }

    pub fn toggle(&mut self, layers: &mut LayerManager<TileSurfaces>) {
        if self.running {
            self.cancel(layers);
        } else {
            self.start(layers);
        }
    }

    /// Advance one frame.
    pub fn tick(
        &mut self,
        delta: Duration,
        pointer_cell: Option<TileCoord>,
        layers: &mut LayerManager<TileSurfaces>,
    ) {
        if !self.running {
            return;
        }
        let Some(overlay) = self.overlay else { return };

        if self.marked.is_some() {
            self.timer.tick(delta);
            if !self.timer.finished() {
                return;
            }
            layers.clear_overlay(overlay);
            self.marked = None;
        }

        layers.follow_active_layer(overlay);

        if let Some(cell) = pointer_cell {
            layers.set_overlay_cell(overlay, cell, Some(TileId::CURSOR));
            self.marked = Some(cell);
            self.timer.reset();
        }
    }
}

pub fn start_cursor_highlight(
    mut highlight: ResMut<CursorHighlight>,
    mut layers: ResMut<TileLayers>,
) {
    highlight.start(&mut layers);
}

pub fn toggle_cursor_highlight(
    mut events: EventReader<EditorActionEvent>,
    mut highlight: ResMut<CursorHighlight>,
    mut layers: ResMut<TileLayers>,
) {
    for event in events.read() {
        if event.0 == EditorAction::ToggleHighlight {
            highlight.toggle(&mut layers);
        }
    }
}

pub fn tick_cursor_highlight(
    time: Res<Time>,
    pointer: Res<PointerState>,
    mut highlight: ResMut<CursorHighlight>,
    mut layers: ResMut<TileLayers>,
) {
    highlight.tick(time.delta(), pointer.cell, &mut layers);
}
