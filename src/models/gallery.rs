// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Template gallery state.
//!
//! Holds the full catalog and the visible prefix shown in the carousel.
//! Paging is done client-side over the full list.

use super::template::Template;

/// Number of templates revealed per page.
pub const DEFAULT_PAGE_SIZE: usize = 4;

/// Catalog load status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GalleryStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Full template catalog plus the visible window over it.
#[derive(Debug, Clone)]
pub struct Gallery {
    templates: Vec<Template>,
    visible_len: usize,
    page_size: usize,
    status: GalleryStatus,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Gallery {
    /// Create an empty gallery waiting for the catalog.
    pub fn new(page_size: usize) -> Self {
        Self {
            templates: Vec::new(),
            visible_len: 0,
            page_size: page_size.max(1),
            status: GalleryStatus::Loading,
        }
    }

    /// Mark the gallery as loading again (catalog retry).
    pub fn begin_loading(&mut self) {
        self.status = GalleryStatus::Loading;
    }

    /// Store the fetched catalog and show its first page.
    pub fn populate(&mut self, templates: Vec<Template>) {
        self.visible_len = templates.len().min(self.page_size);
        self.templates = templates;
        self.status = GalleryStatus::Ready;
    }

    /// Record a failed catalog fetch.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.status = GalleryStatus::Failed(message.into());
    }

    /// Reveal the next page. Returns how many templates became visible.
    pub fn load_more(&mut self) -> usize {
        let previous = self.visible_len;
        self.visible_len = self.templates.len().min(previous + self.page_size);
        self.visible_len - previous
    }

    pub fn visible(&self) -> &[Template] {
        &self.templates[..self.visible_len]
    }

    pub fn all(&self) -> &[Template] {
        &self.templates
    }

    pub fn has_more(&self) -> bool {
        self.visible_len < self.templates.len()
    }

    pub fn status(&self) -> &GalleryStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == GalleryStatus::Loading
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(count: usize) -> Vec<Template> {
        (0..count)
            .map(|i| Template::new(i.to_string(), format!("meme {}", i), format!("https://example.com/{}.jpg", i)))
            .collect()
    }

    #[test]
    fn test_new_gallery_is_loading_and_empty() {
        let gallery = Gallery::default();
        assert!(gallery.is_loading());
        assert!(gallery.visible().is_empty());
        assert!(!gallery.has_more());
    }

    #[test]
    fn test_populate_shows_first_page() {
        for len in [0, 1, 3, 4, 5, 100] {
            let mut gallery = Gallery::default();
            gallery.populate(catalog(len));
            assert_eq!(gallery.visible().len(), len.min(4));
            assert_eq!(gallery.status(), &GalleryStatus::Ready);
        }
    }

    #[test]
    fn test_load_more_pages_through_ten_templates() {
        let mut gallery = Gallery::default();
        gallery.populate(catalog(10));
        assert_eq!(gallery.visible().len(), 4);

        assert_eq!(gallery.load_more(), 4);
        assert_eq!(gallery.visible().len(), 8);

        assert_eq!(gallery.load_more(), 2);
        assert_eq!(gallery.visible().len(), 10);
        assert!(!gallery.has_more());

        assert_eq!(gallery.load_more(), 0);
        assert_eq!(gallery.visible().len(), 10);
    }

    #[test]
    fn test_visible_is_prefix_of_catalog() {
        let mut gallery = Gallery::default();
        gallery.populate(catalog(13));
        while gallery.has_more() {
            let len = gallery.visible().len();
            assert_eq!(gallery.visible(), &gallery.all()[..len]);
            assert!(len % gallery.page_size() == 0 || len == gallery.all().len());
            gallery.load_more();
        }
        assert_eq!(gallery.visible(), gallery.all());
    }

    #[test]
    fn test_load_more_is_idempotent_when_expanded() {
        let mut gallery = Gallery::default();
        gallery.populate(catalog(3));
        let before = gallery.visible().to_vec();
        for _ in 0..3 {
            gallery.load_more();
            assert_eq!(gallery.visible(), before.as_slice());
        }
    }

    #[test]
    fn test_fail_then_retry() {
        let mut gallery = Gallery::default();
        gallery.fail("connection refused");
        assert_eq!(gallery.status(), &GalleryStatus::Failed("connection refused".to_string()));

        gallery.begin_loading();
        assert!(gallery.is_loading());
        gallery.populate(catalog(2));
        assert_eq!(gallery.visible().len(), 2);
    }

    #[test]
    fn test_custom_page_size() {
        let mut gallery = Gallery::new(3);
        gallery.populate(catalog(7));
        assert_eq!(gallery.visible().len(), 3);
        gallery.load_more();
        assert_eq!(gallery.visible().len(), 6);
    }
}
