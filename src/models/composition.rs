// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Composition state management.
//!
//! This module ties the selected template to the captions placed on it and
//! decides what happens to those captions when the template changes.

use super::caption::CaptionModel;
use super::template::Template;
use serde::{Deserialize, Serialize};

/// What to do with existing captions when a different template is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptionPolicy {
    /// Captions stay where they are on the new template
    #[default]
    Keep,
    /// Captions are removed
    Clear,
}

/// The selected template and its captions.
#[derive(Debug, Clone, Default)]
pub struct Composition {
    selected: Option<Template>,
    captions: CaptionModel,
    policy: CaptionPolicy,
}

impl Composition {
    pub fn new(policy: CaptionPolicy) -> Self {
        Self {
            selected: None,
            captions: CaptionModel::new(),
            policy,
        }
    }

    /// Replace the selection. Returns `true` if a different template is now selected.
    pub fn select(&mut self, template: Template) -> bool {
        let changed = self
            .selected
            .as_ref()
            .map_or(true, |current| current.id != template.id);

        if changed && self.policy == CaptionPolicy::Clear && !self.captions.is_empty() {
            log::info!("Clearing {} captions for new template", self.captions.len());
            self.captions.clear();
        }

        self.selected = Some(template);
        changed
    }

    pub fn selected(&self) -> Option<&Template> {
        self.selected.as_ref()
    }

    pub fn captions(&self) -> &CaptionModel {
        &self.captions
    }

    pub fn captions_mut(&mut self) -> &mut CaptionModel {
        &mut self.captions
    }
}
