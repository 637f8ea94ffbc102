// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application settings.
//!
//! Settings are read once at startup from `config.yaml` in the platform
//! configuration directory. Every field is optional; a missing file means
//! defaults.

use crate::error::{Error, Result};
use crate::models::{caption::FontFamily, composition::CaptionPolicy, gallery::DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_NAME: &str = "memer";
const CONFIG_FILE: &str = "config.yaml";

pub const DEFAULT_CATALOG_URL: &str = "https://api.imgflip.com/get_memes";
pub const DEFAULT_PREVIEW_WIDTH: f32 = 400.0;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint returning the template catalog
    pub catalog_url: String,
    /// Templates revealed per "Load More"
    pub page_size: usize,
    /// Font given to newly added captions
    pub default_font: FontFamily,
    /// Width of the editable preview, which is also the export width
    pub preview_width: f32,
    /// What happens to captions when another template is selected
    pub caption_policy: CaptionPolicy,
    /// Directory `meme.png` is written to (defaults to the download directory)
    pub export_dir: Option<PathBuf>,
    /// Extra directories searched for caption fonts
    pub font_dirs: Vec<PathBuf>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            default_font: FontFamily::Arial,
            preview_width: DEFAULT_PREVIEW_WIDTH,
            caption_policy: CaptionPolicy::Keep,
            export_dir: None,
            font_dirs: Vec::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: format!("{}/{}", APP_NAME, env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Reject values the application cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(Error::Config("page_size must be greater than zero".to_string()));
        }
        if !(self.preview_width.is_finite() && self.preview_width >= 50.0) {
            return Err(Error::Config(format!(
                "preview_width must be at least 50, got {}",
                self.preview_width
            )));
        }
        if self.catalog_url.trim().is_empty() {
            return Err(Error::Config("catalog_url must not be empty".to_string()));
        }
        Ok(())
    }

    /// Directory the exported image is written to.
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Default location of the settings file.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

/// Load settings from an explicit path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let yaml = std::fs::read_to_string(path)?;
    let config: Config = serde_yaml::from_str(&yaml)?;
    config.validate()?;
    Ok(config)
}

/// Load settings from the default location, falling back to defaults.
///
/// Problems with the file are logged rather than returned so the app can
/// always start.
pub fn load_or_default() -> Config {
    let Some(path) = default_config_path() else {
        return Config::default();
    };
    if !path.exists() {
        log::debug!("No config file at {}, using defaults", path.display());
        return Config::default();
    }
    match load_from_path(&path) {
        Ok(config) => {
            log::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            log::warn!("Ignoring config file {}: {}", path.display(), e);
            Config::default()
        }
    }
}
