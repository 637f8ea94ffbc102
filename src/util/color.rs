// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! CSS color strings used by captions.
//!
//! Supports the named colors offered by a typical color picker plus
//! `#RGB`, `#RRGGBB` and `#RRGGBBAA` hex notation.

/// Parse a color string into RGBA. Case-insensitive, trims whitespace.
pub fn parse_color(s: &str) -> Option<[u8; 4]> {
    let s = s.trim();
    if s.starts_with('#') {
        parse_hex(s)
    } else {
        parse_named(s)
    }
}

fn parse_hex(s: &str) -> Option<[u8; 4]> {
    let hex = s.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            let r = channel(0..1)?;
            let g = channel(1..2)?;
            let b = channel(2..3)?;
            Some([r * 17, g * 17, b * 17, 255])
        }
        6 => Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]),
        8 => Some([channel(0..2)?, channel(2..4)?, channel(4..6)?, channel(6..8)?]),
        _ => None,
    }
}

fn parse_named(s: &str) -> Option<[u8; 4]> {
    let rgb = match s.to_lowercase().as_str() {
        "black"         => [0, 0, 0],
        "white"         => [255, 255, 255],
        "red"           => [255, 0, 0],
        "green"         => [0, 128, 0],
        "lime"          => [0, 255, 0],
        "blue"          => [0, 0, 255],
        "yellow"        => [255, 255, 0],
        "cyan"          => [0, 255, 255],
        "magenta"       => [255, 0, 255],
        "gray" | "grey" => [128, 128, 128],
        "orange"        => [255, 165, 0],
        "purple"        => [128, 0, 128],
        "pink"          => [255, 192, 203],
        "brown"         => [165, 42, 42],
        "transparent"   => return Some([0, 0, 0, 0]),
        _               => return None,
    };
    Some([rgb[0], rgb[1], rgb[2], 255])
}

/// Format RGB as `#rrggbb`, the form produced by the color picker.
pub fn to_hex(rgba: [u8; 4]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgba[0], rgba[1], rgba[2])
}

/// Parse a caption color for display, falling back to black.
pub fn to_color32(s: &str) -> egui::Color32 {
    let [r, g, b, a] = parse_color(s).unwrap_or([0, 0, 0, 255]);
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors() {
        assert_eq!(parse_color("black"), Some([0, 0, 0, 255]));
        assert_eq!(parse_color("  White "), Some([255, 255, 255, 255]));
        assert_eq!(parse_color("GREY"), Some([128, 128, 128, 255]));
        assert_eq!(parse_color("chartreuse-ish"), None);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(parse_color("#ff0000"), Some([255, 0, 0, 255]));
        assert_eq!(parse_color("#0F0"), Some([0, 255, 0, 255]));
        assert_eq!(parse_color("#11223380"), Some([0x11, 0x22, 0x33, 0x80]));
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("#éé"), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex([255, 0, 16, 255]), "#ff0010");
        assert_eq!(parse_color(&to_hex([1, 2, 3, 255])), Some([1, 2, 3, 255]));
    }

    #[test]
    fn test_to_color32_falls_back_to_black() {
        assert_eq!(to_color32("nonsense"), egui::Color32::BLACK);
        assert_eq!(to_color32("red"), egui::Color32::from_rgb(255, 0, 0));
    }
}
