// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for catalog access, image loading, fonts and export.

use thiserror::Error;

/// Result type alias for meme generator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or exporting a meme.
#[derive(Error, Debug)]
pub enum Error {
    /// The template catalog could not be fetched or parsed
    #[error("Template catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// A template image could not be downloaded or decoded
    #[error("Failed to load template image: {0}")]
    ImageLoad(String),

    /// Export was requested without a selected, loaded template
    #[error("Nothing to export: select a template and wait for it to load")]
    ExportTargetMissing,

    /// Font bytes could not be parsed
    #[error("Invalid font: {0}")]
    Font(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}
