// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template image loading.
//!
//! This module downloads or reads template images, decodes them to RGBA
//! and produces thumbnails suitable for display in egui.

use crate::error::{Error, Result};
use crate::models::template::Template;
use image::RgbaImage;
use reqwest::blocking::Client;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Longest edge of gallery thumbnails, in pixels.
pub const THUMBNAIL_EDGE: u32 = 300;

/// A decoded RGBA image.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl LoadedImage {
    pub fn from_rgba(image: RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            pixels: image.into_raw(),
        }
    }

    pub fn into_rgba(self) -> Option<RgbaImage> {
        RgbaImage::from_raw(self.width, self.height, self.pixels)
    }
}

/// Down-scale so the longest edge is at most `max_edge`, keeping aspect ratio.
pub fn thumbnail(image: &RgbaImage, max_edge: u32) -> RgbaImage {
    let (width, height) = image.dimensions();
    if width <= max_edge && height <= max_edge {
        return image.clone();
    }
    let scale = max_edge as f32 / width.max(height) as f32;
    let thumb_width = ((width as f32 * scale).round() as u32).max(1);
    let thumb_height = ((height as f32 * scale).round() as u32).max(1);
    image::imageops::thumbnail(image, thumb_width, thumb_height)
}

/// Decoded template images by template id, plus the requests still in flight.
///
/// Each id is requested at most once while it is pending or decoded; only a
/// failed id may be requested again.
#[derive(Debug, Default)]
pub struct ImageCache {
    decoded: HashMap<String, RgbaImage>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `id` as requested. Returns `false` if it is already decoded or in flight.
    pub fn begin(&mut self, id: &str) -> bool {
        if self.decoded.contains_key(id) || self.pending.contains(id) {
            return false;
        }
        self.failed.remove(id);
        self.pending.insert(id.to_string());
        true
    }

    /// Record the outcome of a request started with [`ImageCache::begin`].
    pub fn finish(&mut self, id: String, result: Result<LoadedImage>) -> Result<&RgbaImage> {
        self.pending.remove(&id);
        let image = result.and_then(|loaded| {
            loaded
                .into_rgba()
                .ok_or_else(|| Error::ImageLoad(format!("{}: bad pixel buffer", id)))
        });
        match image {
            Ok(image) => Ok(self.decoded.entry(id).or_insert(image)),
            Err(e) => {
                self.failed.insert(id);
                Err(e)
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&RgbaImage> {
        self.decoded.get(id)
    }

    pub fn has_failed(&self, id: &str) -> bool {
        self.failed.contains(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Decode image bytes in any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<LoadedImage> {
    let image = image::load_from_memory(bytes)?;
    Ok(LoadedImage::from_rgba(image.to_rgba8()))
}

/// Load an image from disk.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path)?;
    Ok(LoadedImage::from_rgba(image.to_rgba8()))
}

/// Download and decode an image.
pub fn fetch_image(client: &Client, url: &str) -> Result<LoadedImage> {
    let response = client
        .get(url)
        .send()
        .map_err(|e| Error::ImageLoad(format!("{}: {}", url, e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::ImageLoad(format!("{}: HTTP {}", url, status)));
    }

    let bytes = response
        .bytes()
        .map_err(|e| Error::ImageLoad(format!("{}: {}", url, e)))?;
    decode_image(&bytes)
}

/// Load a template's image from wherever it lives.
pub fn load_template_image(client: &Client, template: &Template) -> Result<LoadedImage> {
    if template.is_remote() {
        fetch_image(client, &template.url)
    } else {
        load_image(Path::new(&template.url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    fn solid(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let thumb = thumbnail(&solid(1200, 600), 300);
        assert_eq!(thumb.dimensions(), (300, 150));
        assert_eq!(thumb.as_raw().len(), (300 * 150 * 4) as usize);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let thumb = thumbnail(&solid(120, 80), 300);
        assert_eq!(thumb.dimensions(), (120, 80));
    }

    #[test]
    fn test_local_template_loads_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("template.png");
        solid(8, 4).save(&path).unwrap();

        let client = Client::new();
        let loaded = load_template_image(&client, &Template::from_path(&path)).unwrap();
        assert_eq!((loaded.width, loaded.height), (8, 4));
        assert_eq!(&loaded.pixels[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_image_cache_requests_each_id_once() {
        let mut cache = ImageCache::new();
        assert!(cache.begin("drake"));
        assert!(!cache.begin("drake"));
        assert!(cache.has_pending());

        let loaded = cache
            .finish("drake".to_string(), Ok(LoadedImage::from_rgba(solid(4, 2))))
            .unwrap();
        assert_eq!(loaded.dimensions(), (4, 2));
        assert!(!cache.has_pending());

        // Selecting the template again later must reuse the decoded image
        assert!(!cache.begin("drake"));
        assert_eq!(cache.get("drake").map(|image| image.width()), Some(4));
    }

    #[test]
    fn test_image_cache_allows_retry_after_failure() {
        let mut cache = ImageCache::new();
        assert!(cache.begin("broken"));
        let result = cache.finish("broken".to_string(), Err(Error::ImageLoad("HTTP 404".to_string())));
        assert!(matches!(result, Err(Error::ImageLoad(_))));
        assert!(cache.has_failed("broken"));
        assert!(cache.get("broken").is_none());

        assert!(cache.begin("broken"));
        assert!(!cache.has_failed("broken"));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(decode_image(b"not an image"), Err(Error::Image(_))));
    }
}
