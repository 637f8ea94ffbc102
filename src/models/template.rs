// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Meme template records supplied by the catalog.

use serde::Deserialize;
use std::path::Path;

/// A meme template: an image that captions are placed on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    /// Remote image URL, or a filesystem path for local templates
    pub url: String,
}

impl Template {
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }

    /// Build a template from a local image file. The path doubles as the id.
    pub fn from_path(path: &Path) -> Self {
        let location = path.to_string_lossy().to_string();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| location.clone());
        Self::new(location.clone(), name, location)
    }

    /// Whether the image lives behind an HTTP(S) URL.
    pub fn is_remote(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }
}
