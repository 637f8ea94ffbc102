// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Caption data structures.
//!
//! This module defines the caption boxes overlaid on a template and the
//! ordered collection that owns them, including the single "active"
//! caption selected for editing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Default caption size in pixels.
pub const DEFAULT_SIZE: u32 = 24;

/// Default caption color.
pub const DEFAULT_COLOR: &str = "black";

/// A 2D point in preview pixels, relative to the top-left of the template.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Font families a caption can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FontFamily {
    #[default]
    Arial,
    TimesNewRoman,
    CourierNew,
    ComicSansMs,
}

impl FontFamily {
    pub const ALL: [FontFamily; 4] = [
        FontFamily::Arial,
        FontFamily::TimesNewRoman,
        FontFamily::CourierNew,
        FontFamily::ComicSansMs,
    ];

    /// Display name, also used as the egui font family name.
    pub fn as_str(self) -> &'static str {
        match self {
            FontFamily::Arial => "Arial",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::CourierNew => "Courier New",
            FontFamily::ComicSansMs => "Comic Sans MS",
        }
    }

    pub fn is_monospace(self) -> bool {
        matches!(self, FontFamily::CourierNew)
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FontFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FontFamily::ALL
            .into_iter()
            .find(|family| family.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown font family '{}'", s))
    }
}

impl TryFrom<String> for FontFamily {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FontFamily> for String {
    fn from(family: FontFamily) -> Self {
        family.as_str().to_string()
    }
}

/// Stable caption handle, never reused within one [`CaptionModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CaptionId(u64);

impl CaptionId {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// A text caption positioned over the template.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionBox {
    pub id: CaptionId,
    pub text: String,
    pub position: Point,
    /// Font size in pixels
    pub size: u32,
    /// CSS color value (named color or hex)
    pub color: String,
    pub font_family: FontFamily,
    /// Whether the caption is drawn on the image
    pub visible: bool,
}

impl CaptionBox {
    fn new(id: CaptionId, font_family: FontFamily) -> Self {
        Self {
            id,
            text: String::new(),
            position: Point::default(),
            size: DEFAULT_SIZE,
            color: DEFAULT_COLOR.to_string(),
            font_family,
            visible: true,
        }
    }

    fn apply(&mut self, field: CaptionField) {
        match field {
            CaptionField::Text(text) => self.text = text,
            CaptionField::Position(position) => self.position = position,
            CaptionField::Size(size) => self.size = size,
            CaptionField::Color(color) => self.color = color,
            CaptionField::FontFamily(family) => self.font_family = family,
            CaptionField::Visible(visible) => self.visible = visible,
        }
    }
}

/// A typed update for a single caption field.
#[derive(Debug, Clone, PartialEq)]
pub enum CaptionField {
    Text(String),
    Position(Point),
    Size(u32),
    Color(String),
    FontFamily(FontFamily),
    Visible(bool),
}

/// Ordered caption collection with a single active caption.
///
/// Captions are only appended or truncated from the end. Ids come from a
/// monotonically increasing counter, so map order is creation order.
#[derive(Debug, Clone, Default)]
pub struct CaptionModel {
    boxes: BTreeMap<CaptionId, CaptionBox>,
    active: Option<CaptionId>,
    next_id: u64,
}

impl CaptionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a caption with default attributes and make it active.
    pub fn add(&mut self, font_family: FontFamily) -> CaptionId {
        let id = CaptionId(self.next_id);
        self.next_id += 1;
        self.boxes.insert(id, CaptionBox::new(id, font_family));
        self.active = Some(id);
        id
    }

    /// Update one field of the caption with the given id.
    ///
    /// Returns `false` without touching anything if no caption matches.
    pub fn update(&mut self, id: CaptionId, field: CaptionField) -> bool {
        match self.boxes.get_mut(&id) {
            Some(caption) => {
                caption.apply(field);
                true
            }
            None => false,
        }
    }

    /// Deactivate `id` if it is active, otherwise make it active.
    pub fn toggle_active(&mut self, id: CaptionId) {
        if self.active == Some(id) {
            self.active = None;
        } else if self.boxes.contains_key(&id) {
            self.active = Some(id);
        }
    }

    /// Clear the active caption.
    pub fn deactivate(&mut self) {
        self.active = None;
    }

    /// Remove the most recently added caption, whichever one is active.
    ///
    /// If the removed caption was active, the new last caption becomes active.
    pub fn remove_last(&mut self) -> Option<CaptionBox> {
        let (id, removed) = self.boxes.pop_last()?;
        if self.active == Some(id) {
            self.active = self.boxes.last_key_value().map(|(last, _)| *last);
        }
        Some(removed)
    }

    /// Remove every caption.
    pub fn clear(&mut self) {
        self.boxes.clear();
        self.active = None;
    }

    pub fn get(&self, id: CaptionId) -> Option<&CaptionBox> {
        self.boxes.get(&id)
    }

    pub fn active(&self) -> Option<CaptionId> {
        self.active
    }

    pub fn active_box(&self) -> Option<&CaptionBox> {
        self.active.and_then(|id| self.get(id))
    }

    /// Captions in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &CaptionBox> {
        self.boxes.values()
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    /// Zero-based ordinal of a caption, used for "Text n" labels.
    pub fn position_of(&self, id: CaptionId) -> Option<usize> {
        self.boxes.keys().position(|key| *key == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(model: &CaptionModel) -> Vec<CaptionId> {
        model.iter().map(|caption| caption.id).collect()
    }

    #[test]
    fn test_add_uses_defaults_and_activates() {
        let mut model = CaptionModel::new();
        let id = model.add(FontFamily::ComicSansMs);

        let caption = model.get(id).unwrap();
        assert_eq!(caption.text, "");
        assert_eq!(caption.position, Point::new(0.0, 0.0));
        assert_eq!(caption.size, 24);
        assert_eq!(caption.color, "black");
        assert_eq!(caption.font_family, FontFamily::ComicSansMs);
        assert!(caption.visible);
        assert_eq!(model.active(), Some(id));
    }

    #[test]
    fn test_add_three_then_remove_all() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        let second = model.add(FontFamily::Arial);
        let third = model.add(FontFamily::Arial);

        assert_eq!(ids(&model), vec![first, second, third]);
        assert_eq!(model.position_of(third), Some(2));
        assert_eq!(model.active(), Some(third));

        let removed = model.remove_last().unwrap();
        assert_eq!(removed.id, third);
        assert_eq!(ids(&model), vec![first, second]);
        assert_eq!(model.active(), Some(second));

        model.remove_last();
        model.remove_last();
        assert!(model.is_empty());
        assert_eq!(model.active(), None);
        assert!(model.remove_last().is_none());
    }

    #[test]
    fn test_ids_are_not_reused_after_removal() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        let second = model.add(FontFamily::Arial);
        model.remove_last();
        let third = model.add(FontFamily::Arial);

        assert_ne!(third, second);
        assert_eq!(ids(&model), vec![first, third]);
        assert_eq!(model.position_of(third), Some(1));
    }

    #[test]
    fn test_remove_last_ignores_active_caption() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        let second = model.add(FontFamily::Arial);
        model.toggle_active(first);

        let removed = model.remove_last().unwrap();
        assert_eq!(removed.id, second);
        // The active caption survived, so it stays active
        assert_eq!(model.active(), Some(first));
    }

    #[test]
    fn test_add_remove_pairs_restore_state() {
        let mut model = CaptionModel::new();
        let base = model.add(FontFamily::Arial);
        model.add(FontFamily::Arial);
        let before_len = model.len();
        let before_active = model.active();

        for n in 0..5 {
            for _ in 0..n {
                model.add(FontFamily::TimesNewRoman);
            }
            for _ in 0..n {
                model.remove_last();
            }
            assert_eq!(model.len(), before_len);
            assert_eq!(model.active(), before_active);
        }
        assert!(model.get(base).is_some());

        let mut empty = CaptionModel::new();
        for _ in 0..3 {
            empty.add(FontFamily::Arial);
        }
        for _ in 0..3 {
            empty.remove_last();
        }
        assert_eq!(empty.len(), 0);
        assert_eq!(empty.active(), None);
    }

    #[test]
    fn test_toggle_active_is_its_own_inverse() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        let second = model.add(FontFamily::Arial);

        model.toggle_active(second);
        assert_eq!(model.active(), None);
        model.toggle_active(second);
        assert_eq!(model.active(), Some(second));

        model.toggle_active(first);
        assert_eq!(model.active(), Some(first));
        model.toggle_active(first);
        assert_eq!(model.active(), None);
    }

    #[test]
    fn test_toggle_unknown_id_keeps_active() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        model.add(FontFamily::Arial);
        let gone = model.remove_last().unwrap().id;
        assert_eq!(model.active(), Some(first));

        model.toggle_active(gone);
        assert_eq!(model.active(), Some(first));
        assert!(model.get(gone).is_none());

        model.toggle_active(first);
        model.toggle_active(gone);
        assert_eq!(model.active(), None);
    }

    #[test]
    fn test_update_changes_only_target_caption() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        let second = model.add(FontFamily::Arial);
        let before_first = model.get(first).unwrap().clone();

        assert!(model.update(second, CaptionField::Color("#ff0000".to_string())));
        assert_eq!(model.get(second).unwrap().color, "#ff0000");
        assert_eq!(model.get(second).unwrap().size, DEFAULT_SIZE);
        assert_eq!(model.get(first).unwrap(), &before_first);
    }

    #[test]
    fn test_update_missing_caption_is_noop() {
        let mut model = CaptionModel::new();
        let first = model.add(FontFamily::Arial);
        model.add(FontFamily::Arial);
        let missing = model.remove_last().unwrap().id;
        let snapshot: Vec<CaptionBox> = model.iter().cloned().collect();

        assert!(!model.update(missing, CaptionField::Color("#ff0000".to_string())));
        let after: Vec<CaptionBox> = model.iter().cloned().collect();
        assert_eq!(snapshot, after);
        assert_eq!(model.get(first).unwrap().color, "black");
    }

    #[test]
    fn test_update_each_field() {
        let mut model = CaptionModel::new();
        let id = model.add(FontFamily::Arial);

        model.update(id, CaptionField::Text("one does not simply".to_string()));
        model.update(id, CaptionField::Position(Point::new(12.0, 30.5)));
        model.update(id, CaptionField::Size(48));
        model.update(id, CaptionField::FontFamily(FontFamily::CourierNew));
        model.update(id, CaptionField::Visible(false));

        let caption = model.get(id).unwrap();
        assert_eq!(caption.text, "one does not simply");
        assert_eq!(caption.position, Point::new(12.0, 30.5));
        assert_eq!(caption.size, 48);
        assert_eq!(caption.font_family, FontFamily::CourierNew);
        assert!(!caption.visible);
    }

    #[test]
    fn test_clear_resets_active() {
        let mut model = CaptionModel::new();
        model.add(FontFamily::Arial);
        model.add(FontFamily::Arial);
        model.clear();

        assert!(model.is_empty());
        assert_eq!(model.active(), None);
        assert!(model.active_box().is_none());
    }

    #[test]
    fn test_font_family_parse_and_display() {
        assert_eq!("Times New Roman".parse::<FontFamily>(), Ok(FontFamily::TimesNewRoman));
        assert_eq!("comic sans ms".parse::<FontFamily>(), Ok(FontFamily::ComicSansMs));
        assert!("Helvetica".parse::<FontFamily>().is_err());
        assert_eq!(FontFamily::CourierNew.to_string(), "Courier New");
        assert!(FontFamily::CourierNew.is_monospace());
        assert!(!FontFamily::Arial.is_monospace());
    }
}
