// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template gallery carousel.
//!
//! Shows the visible page of templates as clickable cards, a "Load More"
//! control while more templates remain, and a retry affordance when the
//! catalog could not be fetched.

use crate::models::gallery::{Gallery, GalleryStatus};
use crate::models::template::Template;
use crate::util::geometry;
use std::collections::HashMap;

const CARD_SIZE: f32 = 150.0;

/// Load state of a gallery thumbnail.
pub enum Thumbnail {
    Pending,
    Ready(egui::TextureHandle),
    Failed,
}

/// Result of gallery interaction.
pub enum GalleryAction {
    None,
    Select(Template),
    LoadMore,
    Retry,
}

/// Display the gallery and report what the user did.
pub fn show(
    ui: &mut egui::Ui,
    gallery: &Gallery,
    thumbnails: &HashMap<String, Thumbnail>,
    selected_id: Option<&str>,
) -> GalleryAction {
    let mut action = GalleryAction::None;

    match gallery.status() {
        GalleryStatus::Loading => {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.spinner();
                ui.label(egui::RichText::new("Loading templates...").weak());
                ui.add_space(10.0);
            });
        }
        GalleryStatus::Failed(message) => {
            ui.vertical_centered(|ui| {
                ui.add_space(10.0);
                ui.label(
                    egui::RichText::new(format!("Could not load templates: {}", message))
                        .color(egui::Color32::LIGHT_RED),
                );
                if ui.button("Retry").clicked() {
                    action = GalleryAction::Retry;
                }
                ui.add_space(10.0);
            });
        }
        GalleryStatus::Ready => {
            egui::ScrollArea::horizontal().show(ui, |ui| {
                ui.horizontal(|ui| {
                    for template in gallery.visible() {
                        let is_selected = selected_id == Some(template.id.as_str());
                        if card(ui, template, thumbnails.get(&template.id), is_selected) {
                            action = GalleryAction::Select(template.clone());
                        }
                    }
                });
            });

            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(
                        "Showing {} of {} templates",
                        gallery.visible().len(),
                        gallery.all().len()
                    ))
                    .weak(),
                );
                if gallery.has_more()
                    && ui
                        .button("Load More")
                        .on_hover_text(format!("Show up to {} more", gallery.page_size()))
                        .clicked()
                {
                    action = GalleryAction::LoadMore;
                }
            });
        }
    }

    action
}

/// Draw one template card. Returns `true` when it was clicked.
fn card(
    ui: &mut egui::Ui,
    template: &Template,
    thumbnail: Option<&Thumbnail>,
    is_selected: bool,
) -> bool {
    let stroke = if is_selected {
        egui::Stroke::new(2.0, egui::Color32::LIGHT_BLUE)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(70))
    };

    egui::Frame::group(ui.style())
        .stroke(stroke)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                let (rect, response) =
                    ui.allocate_exact_size(egui::vec2(CARD_SIZE, CARD_SIZE), egui::Sense::click());
                let painter = ui.painter_at(rect);
                painter.rect_filled(rect, 4.0, egui::Color32::from_gray(40));

                match thumbnail {
                    Some(Thumbnail::Ready(texture)) => {
                        let [w, h] = texture.size();
                        let (fit_w, fit_h) = geometry::fit_within(w as u32, h as u32, (CARD_SIZE, CARD_SIZE));
                        let image_rect = egui::Rect::from_center_size(rect.center(), egui::vec2(fit_w, fit_h));
                        painter.image(
                            texture.id(),
                            image_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    Some(Thumbnail::Failed) => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "image unavailable",
                            egui::FontId::proportional(12.0),
                            egui::Color32::from_gray(150),
                        );
                    }
                    Some(Thumbnail::Pending) | None => {
                        painter.text(
                            rect.center(),
                            egui::Align2::CENTER_CENTER,
                            "loading...",
                            egui::FontId::proportional(12.0),
                            egui::Color32::from_gray(150),
                        );
                    }
                }

                ui.set_max_width(CARD_SIZE);
                ui.add(egui::Label::new(template.name.as_str()).truncate());

                response
                    .on_hover_cursor(egui::CursorIcon::PointingHand)
                    .on_hover_text(template.name.as_str())
                    .clicked()
            })
            .inner
        })
        .inner
}
