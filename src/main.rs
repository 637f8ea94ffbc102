// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme Generator
//!
//! A cross-platform desktop application for browsing meme templates,
//! overlaying draggable text captions and exporting the result as PNG.

mod app;
mod config;
mod error;
mod io;
mod models;
mod ui;
mod util;

use anyhow::Result;
use app::MemeApp;
use io::{catalog, fonts::FontLibrary};

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let config = config::load_or_default();

    let fonts = match FontLibrary::load(&config.font_dirs) {
        Ok(fonts) => fonts,
        Err(e) => {
            log::warn!("Font discovery failed ({}), using bundled fonts", e);
            FontLibrary::bundled()?
        }
    };

    for family in models::caption::FontFamily::ALL {
        log::debug!("{} glyphs from {:?}", family, fonts.source(family));
    }

    let client = catalog::build_client(&config)?;

    // Configure egui options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Meme Generator"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Meme Generator",
        options,
        Box::new(move |cc| {
            fonts.install(&cc.egui_ctx);
            Ok(Box::new(MemeApp::new(config, client, fonts)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Application error: {}", e))?;

    Ok(())
}
