//! Page registration.
//!
//! The host owns the page collection; generators only hand pages over.

use crate::page::{PageDescriptor, SitePage};

/// Receives generated pages, one call per page, in generation order.
pub trait PageSink {
    /// Register a page with the host.
    fn register(&mut self, page: PageDescriptor);
}

impl PageSink for Vec<PageDescriptor> {
    fn register(&mut self, page: PageDescriptor) {
        self.push(page);
    }
}

/// In-memory page collection that keeps registration order.
#[derive(Debug, Clone, Default)]
pub struct SitePages {
    pages: Vec<PageDescriptor>,
}

impl SitePages {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Registered pages in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &PageDescriptor> {
        self.pages.iter()
    }

    /// Find a page by directory.
    #[must_use]
    pub fn find(&self, directory: &str) -> Option<&PageDescriptor> {
        self.pages.iter().find(|p| p.directory() == directory)
    }

    /// Consume the collection, returning its pages.
    #[must_use]
    pub fn into_pages(self) -> Vec<PageDescriptor> {
        self.pages
    }
}

impl PageSink for SitePages {
    fn register(&mut self, page: PageDescriptor) {
        self.pages.push(page);
    }
}
