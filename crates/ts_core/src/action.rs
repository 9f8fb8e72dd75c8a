use bevy::prelude::*;

/// Discrete editor commands triggered from the keyboard.
///
/// Each action fires once when one of its keys is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorAction {
    /// Move to the layer above, creating it if needed.
    LayerUp,
    /// Move to the layer below. Does nothing on layer 0.
    LayerDown,
    /// Drop every layer but the first and erase all tiles.
    ClearAll,
    /// Start or cancel the cursor highlight.
    ToggleHighlight,
}

impl EditorAction {
    /// Get the display name for UI.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LayerUp => "Layer up",
            Self::LayerDown => "Layer down",
            Self::ClearAll => "Clear all",
            Self::ToggleHighlight => "Toggle highlight",
        }
    }

    /// Keys bound to this action.
    pub fn shortcuts(&self) -> &'static [KeyCode] {
        match self {
            Self::LayerUp => &[KeyCode::ShiftLeft, KeyCode::ShiftRight],
            Self::LayerDown => &[KeyCode::ControlLeft, KeyCode::ControlRight],
            Self::ClearAll => &[KeyCode::Backspace],
            Self::ToggleHighlight => &[KeyCode::KeyH],
        }
    }

    /// Short key hint for UI.
    pub fn hint(&self) -> &'static str {
        match self {
            Self::LayerUp => "Shift",
            Self::LayerDown => "Ctrl",
            Self::ClearAll => "Backspace",
            Self::ToggleHighlight => "H",
        }
    }

    /// Get all actions in dispatch order.
    pub fn all() -> &'static [EditorAction] {
        &[
            Self::ClearAll,
            Self::LayerUp,
            Self::LayerDown,
            Self::ToggleHighlight,
        ]
    }
}

/// Event fired when an editor action is requested.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct EditorActionEvent(pub EditorAction);

/// System that turns released shortcut keys into [`EditorActionEvent`]s.
///
/// Layer up wins over layer down when both are released in the same frame.
pub fn handle_action_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut events: EventWriter<EditorActionEvent>,
) {
    let mut layer_moved = false;
    for action in EditorAction::all() {
        if !keyboard.any_just_released(action.shortcuts().iter().copied()) {
            continue;
        }
        match action {
            EditorAction::LayerUp | EditorAction::LayerDown if layer_moved => continue,
            EditorAction::LayerUp | EditorAction::LayerDown => layer_moved = true,
            _ => {}
        }
        events.send(EditorActionEvent(*action));
    }
}
