// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption font discovery.
//!
//! Each selectable font family is resolved to a TrueType file on disk. When
//! none is installed the font bundled with egui is used instead, so the
//! preview and the exported image always draw with the same glyphs.

use crate::error::{Error, Result};
use crate::models::caption::FontFamily;
use ab_glyph::FontVec;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a family's glyphs came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    File(PathBuf),
    Bundled(String),
}

struct LoadedFont {
    bytes: Vec<u8>,
    font: FontVec,
    source: FontSource,
}

/// Font data for every [`FontFamily`].
pub struct FontLibrary {
    fonts: HashMap<FontFamily, LoadedFont>,
}

/// File names tried for a family, bold faces first.
fn candidate_files(family: FontFamily) -> &'static [&'static str] {
    match family {
        FontFamily::Arial => &[
            "arialbd.ttf",
            "Arial Bold.ttf",
            "Arial_Bold.ttf",
            "arial.ttf",
            "Arial.ttf",
            "LiberationSans-Bold.ttf",
            "LiberationSans-Regular.ttf",
        ],
        FontFamily::TimesNewRoman => &[
            "timesbd.ttf",
            "Times New Roman Bold.ttf",
            "Times_New_Roman_Bold.ttf",
            "times.ttf",
            "Times New Roman.ttf",
            "LiberationSerif-Bold.ttf",
            "LiberationSerif-Regular.ttf",
        ],
        FontFamily::CourierNew => &[
            "courbd.ttf",
            "Courier New Bold.ttf",
            "Courier_New_Bold.ttf",
            "cour.ttf",
            "Courier New.ttf",
            "LiberationMono-Bold.ttf",
            "LiberationMono-Regular.ttf",
        ],
        FontFamily::ComicSansMs => &[
            "comicbd.ttf",
            "Comic Sans MS Bold.ttf",
            "Comic_Sans_MS_Bold.ttf",
            "comic.ttf",
            "Comic Sans MS.ttf",
        ],
    }
}

/// Platform font directories, searched after the configured ones.
pub fn system_font_dirs() -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = dirs::font_dir().into_iter().collect();
    found.extend(
        [
            "C:\\Windows\\Fonts",
            "/Library/Fonts",
            "/System/Library/Fonts/Supplemental",
            "/usr/share/fonts/truetype/msttcorefonts",
            "/usr/share/fonts/truetype/liberation",
            "/usr/share/fonts/truetype/liberation2",
            "/usr/share/fonts/TTF",
        ]
        .iter()
        .map(PathBuf::from),
    );
    found
}

/// Find the first candidate file for `family` in `dirs`.
pub fn find_font_file(family: FontFamily, dirs: &[PathBuf]) -> Option<PathBuf> {
    dirs.iter()
        .flat_map(|dir| candidate_files(family).iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

/// Name and bytes of the egui-bundled font used when a family is missing.
fn bundled_fallback(family: FontFamily) -> Option<(String, Vec<u8>)> {
    let definitions = egui::FontDefinitions::default();
    let generic = if family.is_monospace() {
        egui::FontFamily::Monospace
    } else {
        egui::FontFamily::Proportional
    };
    let name = definitions.families.get(&generic)?.first()?.clone();
    let data = definitions.font_data.get(&name)?;
    Some((name, data.font.to_vec()))
}

fn parse_font(bytes: Vec<u8>, origin: &str) -> Result<(FontVec, Vec<u8>)> {
    let font = FontVec::try_from_vec(bytes.clone())
        .map_err(|e| Error::Font(format!("{}: {}", origin, e)))?;
    Ok((font, bytes))
}

fn load_family(family: FontFamily, dirs: &[PathBuf]) -> Result<LoadedFont> {
    if let Some(path) = find_font_file(family, dirs) {
        match read_font_file(&path) {
            Ok((font, bytes)) => {
                log::info!("Using {} for {}", path.display(), family);
                return Ok(LoadedFont {
                    bytes,
                    font,
                    source: FontSource::File(path),
                });
            }
            Err(e) => log::warn!("Skipping font file: {}", e),
        }
    }

    let (name, bytes) = bundled_fallback(family)
        .ok_or_else(|| Error::Font(format!("no font available for {}", family)))?;
    log::warn!("{} not installed, falling back to bundled {}", family, name);
    let (font, bytes) = parse_font(bytes, &name)?;
    Ok(LoadedFont {
        bytes,
        font,
        source: FontSource::Bundled(name),
    })
}

fn read_font_file(path: &Path) -> Result<(FontVec, Vec<u8>)> {
    let bytes = std::fs::read(path)?;
    parse_font(bytes, &path.display().to_string())
}

impl FontLibrary {
    /// Resolve every family, searching `extra_dirs` before the system directories.
    pub fn load(extra_dirs: &[PathBuf]) -> Result<Self> {
        let mut dirs = extra_dirs.to_vec();
        dirs.extend(system_font_dirs());

        let mut fonts = HashMap::new();
        for family in FontFamily::ALL {
            fonts.insert(family, load_family(family, &dirs)?);
        }
        Ok(Self { fonts })
    }

    /// Library made only of the egui-bundled fonts.
    pub fn bundled() -> Result<Self> {
        let mut fonts = HashMap::new();
        for family in FontFamily::ALL {
            fonts.insert(family, load_family(family, &[])?);
        }
        Ok(Self { fonts })
    }

    pub fn font(&self, family: FontFamily) -> &FontVec {
        &self.fonts[&family].font
    }

    pub fn source(&self, family: FontFamily) -> &FontSource {
        &self.fonts[&family].source
    }

    /// Register every family with egui under its display name.
    pub fn install(&self, ctx: &egui::Context) {
        let mut definitions = egui::FontDefinitions::default();
        let proportional = definitions
            .families
            .get(&egui::FontFamily::Proportional)
            .cloned()
            .unwrap_or_default();

        for family in FontFamily::ALL {
            let loaded = &self.fonts[&family];
            let mut stack = match &loaded.source {
                FontSource::File(_) => {
                    let key = format!("caption-{}", family.as_str());
                    definitions
                        .font_data
                        .insert(key.clone(), egui::FontData::from_owned(loaded.bytes.clone()));
                    vec![key]
                }
                FontSource::Bundled(name) => vec![name.clone()],
            };
            // Keep egui's fallbacks (emoji, symbols) behind the caption font
            let fallbacks: Vec<String> = proportional
                .iter()
                .filter(|name| !stack.contains(*name))
                .cloned()
                .collect();
            stack.extend(fallbacks);
            definitions
                .families
                .insert(egui::FontFamily::Name(family.as_str().into()), stack);
        }

        ctx.set_fonts(definitions);
    }
}

/// egui font family for a caption font.
pub fn egui_family(family: FontFamily) -> egui::FontFamily {
    egui::FontFamily::Name(family.as_str().into())
}
