// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Main application state and egui App implementation.
//!
//! This module contains the main application structure that implements
//! the eframe::App trait. It owns the gallery and composition state, runs
//! catalog and image loading on background threads, and routes the actions
//! reported by the UI components back into the data model.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::io::catalog::{HttpCatalog, TemplateSource};
use crate::io::fonts::FontLibrary;
use crate::io::{export, media};
use crate::models::{
    caption::CaptionField,
    composition::Composition,
    gallery::Gallery,
    template::Template,
};
use crate::ui::{canvas, gallery, properties, toolbar};
use image::RgbaImage;
use reqwest::blocking::Client;
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

/// An image decoded on a worker thread, tagged with its template id.
type ImageResult = (String, Result<media::LoadedImage>);

/// Preview texture of the selected template's image.
struct TemplateImage {
    template_id: String,
    texture: egui::TextureHandle,
}

/// Message shown in the status bar.
enum Status {
    Info(String),
    Error(String),
}

/// Main application state.
pub struct MemeApp {
    config: Config,

    /// HTTP client shared by all image downloads
    client: Client,

    /// Where the template catalog comes from
    source: Arc<dyn TemplateSource>,

    /// Caption fonts, shared with the exporter
    fonts: FontLibrary,

    gallery: Gallery,
    composition: Composition,

    /// Receiver for the in-flight catalog fetch
    catalog_loader: Option<Receiver<Result<Vec<Template>>>>,

    /// Decoded template images, shared by the gallery and the preview
    images: media::ImageCache,
    image_sender: Sender<ImageResult>,
    image_receiver: Receiver<ImageResult>,

    /// Gallery thumbnails by template id
    thumbnails: HashMap<String, gallery::Thumbnail>,

    /// Preview of the selected template
    template_image: Option<TemplateImage>,

    status: Option<Status>,
}

impl MemeApp {
    /// Create the application and start fetching the catalog.
    pub fn new(config: Config, client: Client, fonts: FontLibrary) -> Self {
        let source: Arc<dyn TemplateSource> =
            Arc::new(HttpCatalog::new(client.clone(), config.catalog_url.clone()));
        let (image_sender, image_receiver) = channel();
        let mut app = Self {
            gallery: Gallery::new(config.page_size),
            composition: Composition::new(config.caption_policy),
            config,
            client,
            source,
            fonts,
            catalog_loader: None,
            images: media::ImageCache::new(),
            image_sender,
            image_receiver,
            thumbnails: HashMap::new(),
            template_image: None,
            status: None,
        };
        app.fetch_catalog();
        app
    }

    /// Fetch the full catalog on a background thread.
    fn fetch_catalog(&mut self) {
        let (sender, receiver) = channel();
        self.catalog_loader = Some(receiver);
        self.gallery.begin_loading();

        let source = Arc::clone(&self.source);
        std::thread::spawn(move || {
            let _ = sender.send(source.fetch_templates());
        });
    }

    /// Fetch a template's image unless it is decoded or already on its way.
    fn request_image(&mut self, template: &Template) {
        if !self.images.begin(&template.id) {
            return;
        }

        let sender = self.image_sender.clone();
        let client = self.client.clone();
        let template = template.clone();
        std::thread::spawn(move || {
            let result = media::load_template_image(&client, &template);
            let _ = sender.send((template.id, result));
        });
    }

    /// Request thumbnails for visible templates that have none yet.
    fn request_thumbnails(&mut self, ctx: &egui::Context) {
        let missing: Vec<Template> = self
            .gallery
            .visible()
            .iter()
            .filter(|template| !self.thumbnails.contains_key(&template.id))
            .cloned()
            .collect();

        for template in missing {
            let thumbnail = match self.images.get(&template.id) {
                Some(image) => gallery::Thumbnail::Ready(thumbnail_texture(ctx, &template.id, image)),
                None => gallery::Thumbnail::Pending,
            };
            self.thumbnails.insert(template.id.clone(), thumbnail);
            self.request_image(&template);
        }
    }

    fn select_template(&mut self, template: Template) {
        log::info!("Selected template '{}' ({})", template.name, template.id);
        self.composition.select(template.clone());

        // Re-selecting retries a template whose image failed to load
        if self.images.has_failed(&template.id) {
            if let Some(thumbnail) = self.thumbnails.get_mut(&template.id) {
                *thumbnail = gallery::Thumbnail::Pending;
            }
        }
        self.request_image(&template);
    }

    fn poll_catalog(&mut self) {
        let Some(receiver) = &self.catalog_loader else {
            return;
        };
        let Ok(result) = receiver.try_recv() else {
            return;
        };
        self.catalog_loader = None;

        match result {
            Ok(templates) => {
                log::info!("Loaded {} templates", templates.len());
                self.gallery.populate(templates);
            }
            Err(e) => {
                log::error!("Failed to load catalog: {}", e);
                self.gallery.fail(e.to_string());
            }
        }
    }

    fn poll_images(&mut self, ctx: &egui::Context) {
        while let Ok((id, result)) = self.image_receiver.try_recv() {
            match self.images.finish(id.clone(), result) {
                Ok(image) => {
                    let texture = thumbnail_texture(ctx, &id, image);
                    self.thumbnails.insert(id, gallery::Thumbnail::Ready(texture));
                }
                Err(e) => {
                    log::error!("Failed to load image for {}: {}", id, e);
                    let selected = self.composition.selected().is_some_and(|t| t.id == id);
                    self.thumbnails.insert(id, gallery::Thumbnail::Failed);
                    if selected {
                        self.report_error(&e);
                    }
                }
            }
        }
    }

    /// Build the preview texture once the selected template's image is decoded.
    fn sync_selection(&mut self, ctx: &egui::Context) {
        if self.loaded_selection().is_some() {
            return;
        }
        let Some(selected) = self.composition.selected() else {
            return;
        };
        let Some(image) = self.images.get(&selected.id) else {
            return;
        };

        log::info!("Template image ready ({}x{})", image.width(), image.height());
        self.template_image = Some(TemplateImage {
            template_id: selected.id.clone(),
            texture: load_texture(ctx, &format!("template-{}", selected.id), image),
        });
    }

    fn is_busy(&self) -> bool {
        self.catalog_loader.is_some() || self.images.has_pending()
    }

    /// The selected template's image, if it has finished loading.
    fn loaded_selection(&self) -> Option<&TemplateImage> {
        let selected = self.composition.selected()?;
        self.template_image
            .as_ref()
            .filter(|loaded| loaded.template_id == selected.id)
    }

    fn export_target(&self) -> Option<&RgbaImage> {
        let loaded = self.loaded_selection()?;
        self.images.get(&loaded.template_id)
    }

    fn download(&mut self) {
        let result = export::export(
            self.export_target(),
            self.config.preview_width,
            self.composition.captions(),
            &self.fonts,
            &self.config.resolved_export_dir(),
        );
        match result {
            Ok(path) => self.status = Some(Status::Info(format!("Saved {}", path.display()))),
            Err(e) => {
                log::error!("Failed to export meme: {}", e);
                self.report_error(&e);
            }
        }
    }

    fn add_caption(&mut self) {
        let id = self.composition.captions_mut().add(self.config.default_font);
        log::info!(
            "Added caption {}, total: {}",
            id.raw(),
            self.composition.captions().len()
        );
    }

    fn remove_last_caption(&mut self) {
        if let Some(removed) = self.composition.captions_mut().remove_last() {
            log::info!(
                "Removed caption {}, total: {}",
                removed.id.raw(),
                self.composition.captions().len()
            );
        }
    }

    fn report_error(&mut self, error: &Error) {
        self.status = Some(Status::Error(error.to_string()));
    }

    fn open_local_image(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["jpg", "jpeg", "png", "gif", "bmp", "webp"])
            .pick_file()
        {
            self.select_template(Template::from_path(&path));
        }
    }
}

/// Upload decoded pixels as an egui texture.
fn load_texture(ctx: &egui::Context, name: &str, image: &RgbaImage) -> egui::TextureHandle {
    let size = [image.width() as usize, image.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, image.as_raw());
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

fn thumbnail_texture(ctx: &egui::Context, id: &str, image: &RgbaImage) -> egui::TextureHandle {
    let thumbnail = media::thumbnail(image, media::THUMBNAIL_EDGE);
    load_texture(ctx, &format!("thumb-{}", id), &thumbnail)
}

impl eframe::App for MemeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_catalog();
        self.poll_images(ctx);
        self.request_thumbnails(ctx);
        self.sync_selection(ctx);

        // Keep polling while background work is running
        if self.is_busy() {
            ctx.request_repaint();
        }

        let can_edit = self.composition.selected().is_some();
        let can_export = self.export_target().is_some();

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open Local Image...").clicked() {
                        self.open_local_image();
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(can_export, egui::Button::new("Download Meme"))
                        .clicked()
                    {
                        self.download();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Captions", |ui| {
                    if ui.add_enabled(can_edit, egui::Button::new("Add Text")).clicked() {
                        self.add_caption();
                        ui.close_menu();
                    }
                    let has_captions = !self.composition.captions().is_empty();
                    if ui
                        .add_enabled(has_captions, egui::Button::new("Remove Last"))
                        .clicked()
                    {
                        self.remove_last_caption();
                        ui.close_menu();
                    }
                });
            });
        });

        // Template gallery
        let gallery_action = egui::TopBottomPanel::top("gallery")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                gallery::show(
                    ui,
                    &self.gallery,
                    &self.thumbnails,
                    self.composition.selected().map(|t| t.id.as_str()),
                )
            })
            .inner;

        match gallery_action {
            gallery::GalleryAction::Select(template) => self.select_template(template),
            gallery::GalleryAction::LoadMore => {
                let revealed = self.gallery.load_more();
                log::info!("Revealed {} more templates", revealed);
            }
            gallery::GalleryAction::Retry if !self.gallery.is_loading() => {
                log::info!("Retrying catalog fetch");
                self.fetch_catalog();
            }
            gallery::GalleryAction::Retry => {}
            gallery::GalleryAction::None => {}
        }

        // Toolbar
        let toolbar_action = egui::TopBottomPanel::top("toolbar")
            .show(ctx, |ui| toolbar::show(ui, can_edit, can_export))
            .inner;

        match toolbar_action {
            toolbar::ToolbarAction::AddCaption => self.add_caption(),
            toolbar::ToolbarAction::Download => self.download(),
            toolbar::ToolbarAction::None => {}
        }

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.status {
                    Some(Status::Info(message)) => {
                        ui.label(message.as_str());
                    }
                    Some(Status::Error(message)) => {
                        ui.label(egui::RichText::new(message).color(egui::Color32::LIGHT_RED));
                    }
                    None => {
                        ui.label("Ready");
                    }
                }
                ui.separator();
                ui.label(format!("Captions: {}", self.composition.captions().len()));
            });
        });

        // Properties panel (right side)
        let properties_action = egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| properties::show(ui, self.composition.captions()))
                    .inner
            })
            .inner;

        match properties_action {
            properties::PropertiesAction::ToggleCaption(id) => {
                self.composition.captions_mut().toggle_active(id);
            }
            properties::PropertiesAction::UpdateCaption(id, field) => {
                self.composition.captions_mut().update(id, field);
            }
            properties::PropertiesAction::RemoveLast => self.remove_last_caption(),
            properties::PropertiesAction::None => {}
        }

        // Escape drops the editing focus unless a text field has it
        if !ctx.wants_keyboard_input() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.composition.captions_mut().deactivate();
        }

        // Preview canvas (center)
        let canvas_action = egui::CentralPanel::default()
            .show(ctx, |ui| {
                let texture = self.loaded_selection().map(|loaded| &loaded.texture);
                canvas::show(
                    ui,
                    self.composition.selected(),
                    texture,
                    self.composition.captions(),
                    self.config.preview_width,
                )
            })
            .inner;

        if let canvas::CanvasAction::MoveCaption(id, position) = canvas_action {
            self.composition
                .captions_mut()
                .update(id, CaptionField::Position(position));
        }
    }
}
