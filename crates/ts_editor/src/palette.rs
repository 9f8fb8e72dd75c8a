use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};
use ts_core::{EditorAction, EditorActionEvent, EditorError, EditorSettings, TileId, TileRegistry};
use ts_tilemap::TileLayers;

use crate::highlight::CursorHighlight;

/// Tile written by the brush.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq)]
pub struct SelectedTile {
    /// `None` until a valid palette entry is chosen.
    pub tile: Option<TileId>,
}

impl SelectedTile {
    /// Select a tile by asset name. Unknown names leave the current selection untouched.
    pub fn select(&mut self, registry: &TileRegistry, name: &str) -> Result<TileId, EditorError> {
        let tile = registry.lookup(name)?;
        self.tile = Some(tile);
        debug!("Selected tile '{}'", name);
        Ok(tile)
    }
}

/// Last status line shown under the palette.
#[derive(Resource, Default)]
pub struct PaletteStatus {
    pub message: Option<String>,
}

/// Startup system selecting the configured initial tile.
pub fn select_initial_tile(
    registry: Res<TileRegistry>,
    settings: Res<EditorSettings>,
    mut selected: ResMut<SelectedTile>,
    mut status: ResMut<PaletteStatus>,
) {
    if let Err(e) = selected.select(&registry, &settings.initial_tile) {
        warn!("Initial tile rejected: {}", e);
        status.message = Some(e.to_string());
    }
}

fn swatch(ui: &mut egui::Ui, color: [u8; 4]) {
    let [r, g, b, a] = color;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 2.0, egui::Color32::from_rgba_unmultiplied(r, g, b, a));
}

/// System to render the layer and palette panel.
pub fn palette_ui_system(
    mut contexts: EguiContexts,
    registry: Res<TileRegistry>,
    layers: Res<TileLayers>,
    highlight: Res<CursorHighlight>,
    mut selected: ResMut<SelectedTile>,
    mut status: ResMut<PaletteStatus>,
    mut actions: EventWriter<EditorActionEvent>,
) {
    egui::SidePanel::left("palette_panel")
        .default_width(180.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Tilestack");
            ui.separator();

            ui.label(layers.layer_label());
            ui.label(format!("Layers: {}", layers.len()));
            ui.add_space(8.0);

            for action in EditorAction::all() {
                let text = match action {
                    EditorAction::ToggleHighlight if highlight.is_running() => "Hide cursor",
                    EditorAction::ToggleHighlight => "Show cursor",
                    _ => action.name(),
                };
                if ui.button(format!("{} ({})", text, action.hint())).clicked() {
                    actions.send(EditorActionEvent(*action));
                }
            }

            ui.add_space(16.0);
            ui.separator();

            ui.label("Tile Palette:");
            ui.add_space(4.0);

            if registry.is_empty() {
                ui.label("(palette is empty)");
            }

            let mut clicked = None;
            for (id, def) in registry.iter() {
                ui.horizontal(|ui| {
                    swatch(ui, def.color);
                    if ui.selectable_label(selected.tile == Some(id), def.name.as_str()).clicked() {
                        clicked = Some(def.name.clone());
                    }
                });
            }

            if let Some(name) = clicked {
                status.message = match selected.select(&registry, &name) {
                    Ok(_) => None,
                    Err(e) => {
                        warn!("{}", e);
                        Some(e.to_string())
                    }
                };
            }

            if let Some(message) = &status.message {
                ui.add_space(8.0);
                ui.colored_label(egui::Color32::LIGHT_RED, message.as_str());
            }

            ui.add_space(16.0);
            ui.separator();
            ui.label("LMB paint, RMB erase");
            ui.label("WASD pan, Q/E zoom");
        });
}
