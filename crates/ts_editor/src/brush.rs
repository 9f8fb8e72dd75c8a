use bevy::prelude::*;
use ts_core::{EditorAction, EditorActionEvent};
use ts_tilemap::TileLayers;

use crate::cursor::PointerState;
use crate::palette::SelectedTile;

/// Paint with the left button, erase with the right, while held.
pub fn brush_system(
    mouse: Res<ButtonInput<MouseButton>>,
    pointer: Res<PointerState>,
    selected: Res<SelectedTile>,
    mut layers: ResMut<TileLayers>,
) {
    let Some(cell) = pointer.brush_cell() else { return };

    if mouse.pressed(MouseButton::Left) {
        match selected.tile {
            Some(tile) => layers.paint_at(cell, Some(tile)),
            None if mouse.just_pressed(MouseButton::Left) => {
                warn!("No tile selected; pick one from the palette");
            }
            None => {}
        }
    } else if mouse.pressed(MouseButton::Right) {
        layers.erase_at(cell);
    }
}

/// Apply layer navigation and reset actions to the layer stack.
pub fn handle_layer_actions(
    mut events: EventReader<EditorActionEvent>,
    mut layers: ResMut<TileLayers>,
) {
    for EditorActionEvent(action) in events.read() {
        match action {
            EditorAction::LayerUp => layers.move_layer_up(),
            EditorAction::LayerDown => layers.move_layer_down(),
            EditorAction::ClearAll => layers.clear_all(),
            EditorAction::ToggleHighlight => continue,
        }
        debug!("{} -> {}", action.name(), layers.layer_label());
    }
}
