// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption properties panel.
//!
//! This module lists the captions with their Show/Hide toggles and
//! provides the editor for the active caption: text, size, color, font
//! family, visibility and removal.

use crate::models::caption::{CaptionField, CaptionId, CaptionModel, FontFamily};
use crate::util::color;

/// Largest size offered by the size slider.
const MAX_SIZE: u32 = 100;

/// Result of properties panel interaction.
pub enum PropertiesAction {
    None,
    ToggleCaption(CaptionId),
    UpdateCaption(CaptionId, CaptionField),
    RemoveLast,
}

/// Display the caption list and the active caption editor.
pub fn show(ui: &mut egui::Ui, captions: &CaptionModel) -> PropertiesAction {
    let mut action = PropertiesAction::None;

    ui.heading("Captions");
    ui.separator();

    if captions.is_empty() {
        ui.label(egui::RichText::new("No captions yet. Use \"Add Text\".").weak());
    }

    for (index, caption) in captions.iter().enumerate() {
        let is_active = captions.active() == Some(caption.id);
        let (label, fill) = if is_active {
            (format!("Hide Text {}", index + 1), egui::Color32::from_rgb(185, 28, 28))
        } else {
            (format!("Show Text {}", index + 1), egui::Color32::from_gray(75))
        };
        let button = egui::Button::new(label).fill(fill);
        if ui.add_sized([ui.available_width(), 24.0], button).clicked() {
            action = PropertiesAction::ToggleCaption(caption.id);
        }
    }

    let Some(active) = captions.active_box() else {
        return action;
    };
    let id = active.id;
    let number = captions.position_of(id).map_or(0, |index| index + 1);

    ui.add_space(12.0);
    ui.separator();
    ui.label(egui::RichText::new(format!("Text {}", number)).strong());

    let mut text = active.text.clone();
    let response = ui.add(
        egui::TextEdit::multiline(&mut text)
            .id_source(("caption-text", id))
            .hint_text("Enter your text here...")
            .desired_rows(3)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        action = PropertiesAction::UpdateCaption(id, CaptionField::Text(text));
    }

    ui.add_space(8.0);
    egui::Grid::new("caption_style")
        .num_columns(2)
        .spacing([12.0, 8.0])
        .show(ui, |ui| {
            ui.label("Size");
            let mut size = active.size;
            if ui.add(egui::Slider::new(&mut size, 0..=MAX_SIZE).suffix(" px")).changed() {
                action = PropertiesAction::UpdateCaption(id, CaptionField::Size(size));
            }
            ui.end_row();

            ui.label("Color");
            let mut rgba = color::to_color32(&active.color);
            if egui::color_picker::color_edit_button_srgba(ui, &mut rgba, egui::color_picker::Alpha::Opaque)
                .changed()
            {
                let hex = color::to_hex(rgba.to_array());
                action = PropertiesAction::UpdateCaption(id, CaptionField::Color(hex));
            }
            ui.end_row();

            ui.label("Font Family");
            let mut family = active.font_family;
            egui::ComboBox::from_id_source(("caption-font", id))
                .selected_text(family.as_str())
                .show_ui(ui, |ui| {
                    for option in FontFamily::ALL {
                        ui.selectable_value(&mut family, option, option.as_str());
                    }
                });
            if family != active.font_family {
                action = PropertiesAction::UpdateCaption(id, CaptionField::FontFamily(family));
            }
            ui.end_row();

            ui.label("Show on image");
            let mut visible = active.visible;
            if ui.checkbox(&mut visible, "").changed() {
                action = PropertiesAction::UpdateCaption(id, CaptionField::Visible(visible));
            }
            ui.end_row();
        });

    ui.add_space(12.0);
    let remove = egui::Button::new("Remove").fill(egui::Color32::from_rgb(153, 27, 27));
    if ui
        .add(remove)
        .on_hover_text("Removes the most recently added caption")
        .clicked()
    {
        action = PropertiesAction::RemoveLast;
    }

    action
}
