// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory state: gallery, selection and captions.

pub mod caption;
pub mod composition;
pub mod gallery;
pub mod template;
