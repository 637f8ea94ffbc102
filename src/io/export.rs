// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme rasterization and PNG export.
//!
//! The template is scaled to the preview size the captions were placed
//! against, then every visible caption is drawn on top with its own font,
//! size and color.

use crate::error::{Error, Result};
use crate::io::fonts::FontLibrary;
use crate::models::caption::{CaptionBox, CaptionModel};
use crate::util::{color, geometry};
use ab_glyph::{Font, PxScale, ScaleFont};
use image::{imageops::FilterType, ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::path::{Path, PathBuf};

/// Name of the exported file.
pub const EXPORT_FILE_NAME: &str = "meme.png";

/// Compose the template and captions into a new image `preview_width` pixels wide.
pub fn render(
    template: &RgbaImage,
    preview_width: f32,
    captions: &CaptionModel,
    fonts: &FontLibrary,
) -> RgbaImage {
    let (width, height) = geometry::preview_size(template.width(), template.height(), preview_width);
    let (width, height) = ((width.round() as u32).max(1), (height.round() as u32).max(1));

    let mut canvas = if (width, height) == template.dimensions() {
        template.clone()
    } else {
        image::imageops::resize(template, width, height, FilterType::Triangle)
    };

    for caption in captions.iter().filter(|caption| caption.visible) {
        draw_caption(&mut canvas, caption, fonts);
    }

    canvas
}

fn draw_caption(canvas: &mut RgbaImage, caption: &CaptionBox, fonts: &FontLibrary) {
    if caption.size == 0 || caption.text.trim().is_empty() {
        return;
    }

    let rgba = color::parse_color(&caption.color).unwrap_or_else(|| {
        log::warn!("Unrecognized caption color '{}', using black", caption.color);
        [0, 0, 0, 255]
    });
    let font = fonts.font(caption.font_family);
    let scale = PxScale::from(caption.size as f32);
    let scaled = font.as_scaled(scale);
    let line_height = scaled.height() + scaled.line_gap();

    for (index, line) in caption.text.lines().enumerate() {
        let x = caption.position.x.round() as i32;
        let y = (caption.position.y + index as f32 * line_height).round() as i32;
        draw_text_mut(canvas, Rgba(rgba), x, y, scale, font, line);
    }
}

/// Write an image as PNG.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// First path in `dir` named `file_name`, `stem (1).ext`, `stem (2).ext` ...
/// that does not exist yet.
pub fn available_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let file = Path::new(file_name);
    let stem = file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = file
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    (1..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Render the composition and write it to `dir/meme.png`, or to
/// `dir/meme (n).png` when earlier exports are already there.
///
/// `template` is the selected template's image, or `None` if nothing is
/// selected or the image has not finished loading.
pub fn export(
    template: Option<&RgbaImage>,
    preview_width: f32,
    captions: &CaptionModel,
    fonts: &FontLibrary,
    dir: &Path,
) -> Result<PathBuf> {
    let template = template.ok_or(Error::ExportTargetMissing)?;
    let image = render(template, preview_width, captions, fonts);

    std::fs::create_dir_all(dir)?;
    let path = available_path(dir, EXPORT_FILE_NAME);
    save_png(&image, &path)?;

    log::info!(
        "Exported {}x{} meme with {} captions to {}",
        image.width(),
        image.height(),
        captions.len(),
        path.display()
    );
    Ok(path)
}
