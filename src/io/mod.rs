// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! I/O operations: catalog, template images, fonts and export.

pub mod catalog;
pub mod export;
pub mod fonts;
pub mod media;
