// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Preview canvas for the selected template.
//!
//! This module draws the selected template at preview size with its
//! captions on top, and lets the user drag captions around the image.

use crate::io::fonts;
use crate::models::caption::{CaptionId, CaptionModel, Point};
use crate::models::template::Template;
use crate::util::{color, geometry};

/// Result of canvas interaction.
pub enum CanvasAction {
    None,
    MoveCaption(CaptionId, Point),
}

/// Display the preview and handle caption dragging.
pub fn show(
    ui: &mut egui::Ui,
    selected: Option<&Template>,
    texture: Option<&egui::TextureHandle>,
    captions: &CaptionModel,
    preview_width: f32,
) -> CanvasAction {
    let mut action = CanvasAction::None;

    let Some(template) = selected else {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.heading(
                    egui::RichText::new("Meme Generator")
                        .size(32.0)
                        .color(egui::Color32::from_gray(200)),
                );
                ui.label(
                    egui::RichText::new("Create custom memes with an easy-to-use generator.")
                        .size(14.0)
                        .color(egui::Color32::from_gray(150)),
                );
                ui.add_space(20.0);
                ui.label(
                    egui::RichText::new("Pick a template above to begin")
                        .color(egui::Color32::from_gray(180)),
                );
            });
        });
        return action;
    };

    let Some(texture) = texture else {
        ui.centered_and_justified(|ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.spinner();
                ui.label(
                    egui::RichText::new(format!("Loading {}...", template.name))
                        .color(egui::Color32::from_gray(200)),
                );
            });
        });
        return action;
    };

    egui::ScrollArea::both().show(ui, |ui| {
        ui.label(egui::RichText::new(&template.name).strong());

        let [img_w, img_h] = texture.size();
        let (width, height) = geometry::preview_size(img_w as u32, img_h as u32, preview_width);
        let (image_rect, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());

        let painter = ui.painter_at(image_rect);
        painter.image(
            texture.id(),
            image_rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );

        for caption in captions.iter().filter(|caption| caption.visible) {
            let font_id = egui::FontId::new(caption.size as f32, fonts::egui_family(caption.font_family));
            let galley = painter.layout_no_wrap(
                caption.text.clone(),
                font_id,
                color::to_color32(&caption.color),
            );
            let text_size = galley.size();

            let origin = image_rect.min + egui::vec2(caption.position.x, caption.position.y);
            painter.galley(origin, galley, egui::Color32::BLACK);

            // Empty captions still need something to grab
            let grab_size = text_size.max(egui::vec2(16.0, caption.size.max(8) as f32));
            let grab_rect = egui::Rect::from_min_size(origin, grab_size);
            let response = ui.interact(
                grab_rect,
                ui.id().with(("caption", caption.id)),
                egui::Sense::drag(),
            );

            if captions.active() == Some(caption.id) {
                painter.rect_stroke(
                    grab_rect.expand(2.0),
                    2.0,
                    egui::Stroke::new(1.0, egui::Color32::LIGHT_BLUE),
                );
            }

            if response.dragged() {
                let delta = response.drag_delta();
                let moved = Point::new(caption.position.x + delta.x, caption.position.y + delta.y);
                let clamped = geometry::clamp_to_bounds(
                    moved,
                    (text_size.x, text_size.y),
                    (width, height),
                );
                if clamped != caption.position {
                    action = CanvasAction::MoveCaption(caption.id, clamped);
                }
            }

            let cursor = if response.dragged() {
                egui::CursorIcon::Grabbing
            } else {
                egui::CursorIcon::Grab
            };
            response.on_hover_cursor(cursor);
        }
    });

    action
}
