// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility functions.
//!
//! This module sizes the preview area and keeps dragged captions inside
//! the template image.

use crate::models::caption::Point;

/// Size of the preview for an image of `width` x `height` shown `preview_width` wide.
pub fn preview_size(width: u32, height: u32, preview_width: f32) -> (f32, f32) {
    if width == 0 || height == 0 {
        return (preview_width, preview_width);
    }
    let aspect = height as f32 / width as f32;
    (preview_width, preview_width * aspect)
}

/// Largest size with the image's aspect ratio that fits in `bounds`.
pub fn fit_within(width: u32, height: u32, bounds: (f32, f32)) -> (f32, f32) {
    if width == 0 || height == 0 {
        return bounds;
    }
    let scale = (bounds.0 / width as f32).min(bounds.1 / height as f32);
    (width as f32 * scale, height as f32 * scale)
}

/// Clamp a caption's top-left corner so a caption of `caption_size` stays within `bounds`.
///
/// A caption larger than the bounds is pinned to the top-left edge.
pub fn clamp_to_bounds(position: Point, caption_size: (f32, f32), bounds: (f32, f32)) -> Point {
    let max_x = (bounds.0 - caption_size.0).max(0.0);
    let max_y = (bounds.1 - caption_size.1).max(0.0);
    Point {
        x: position.x.clamp(0.0, max_x),
        y: position.y.clamp(0.0, max_y),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_size_keeps_aspect() {
        let (w, h) = preview_size(1200, 600, 400.0);
        assert_eq!(w, 400.0);
        assert!((h - 200.0).abs() < 0.0001);

        let (w, h) = preview_size(600, 908, 300.0);
        assert_eq!(w, 300.0);
        assert!((h - 454.0).abs() < 0.0001);
    }

    #[test]
    fn test_preview_size_degenerate_image() {
        assert_eq!(preview_size(0, 10, 400.0), (400.0, 400.0));
    }

    #[test]
    fn test_fit_within_box() {
        // Wide image fits to width
        assert_eq!(fit_within(600, 300, (150.0, 150.0)), (150.0, 75.0));
        // Tall image fits to height
        assert_eq!(fit_within(300, 600, (150.0, 150.0)), (75.0, 150.0));
    }

    #[test]
    fn test_clamp_inside_is_unchanged() {
        let p = clamp_to_bounds(Point::new(10.0, 20.0), (50.0, 24.0), (400.0, 300.0));
        assert_eq!(p, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_clamp_corners() {
        // Dragged past the top-left corner
        let tl = clamp_to_bounds(Point::new(-30.0, -5.0), (50.0, 24.0), (400.0, 300.0));
        assert_eq!(tl, Point::new(0.0, 0.0));

        // Dragged past the bottom-right corner
        let br = clamp_to_bounds(Point::new(390.0, 299.0), (50.0, 24.0), (400.0, 300.0));
        assert_eq!(br, Point::new(350.0, 276.0));
    }

    #[test]
    fn test_clamp_oversized_caption() {
        let p = clamp_to_bounds(Point::new(15.0, 15.0), (500.0, 24.0), (400.0, 300.0));
        assert_eq!(p, Point::new(0.0, 15.0));
    }
}
