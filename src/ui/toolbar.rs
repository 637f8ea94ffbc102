// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Toolbar with the caption and download controls.

/// Result of toolbar interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    AddCaption,
    Download,
}

/// Display the toolbar.
///
/// `can_edit` is false until a template is selected; `can_export` is false
/// until its image has loaded.
pub fn show(ui: &mut egui::Ui, can_edit: bool, can_export: bool) -> ToolbarAction {
    let mut action = ToolbarAction::None;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 8.0;

        let add = egui::Button::new("➕ Add Text").fill(egui::Color32::from_rgb(22, 101, 52));
        if ui.add_enabled(can_edit, add).clicked() {
            action = ToolbarAction::AddCaption;
        }

        let download = egui::Button::new("⬇ Download Meme").fill(egui::Color32::from_rgb(37, 99, 235));
        let response = ui
            .add_enabled(can_export, download)
            .on_disabled_hover_text("Select a template and wait for it to load");
        if response.clicked() {
            action = ToolbarAction::Download;
        }

        ui.separator();

        let hint = if !can_edit {
            "Choose a template from the gallery"
        } else {
            "Drag captions on the image to move them"
        };
        ui.label(egui::RichText::new(hint).italics().weak());
    });

    action
}
