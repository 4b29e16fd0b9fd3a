//! URL placeholders and permalink rendering.
//!
//! Permalink patterns name slots with a leading colon, e.g. `/:path/` or
//! `/:category/:basename:output_ext`. A slot name is a run of lowercase
//! letters and underscores.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use crate::page::SitePage;

/// Slot for the page directory.
pub const PATH_SLOT: &str = "path";

/// Slot for the page category, which is also its directory.
pub const CATEGORY_SLOT: &str = "category";

/// Slot for the page basename.
pub const BASENAME_SLOT: &str = "basename";

/// Slot for the page output extension.
///
/// This is the `outputExtension` placeholder, spelled as permalink patterns use it.
pub const OUTPUT_EXT_SLOT: &str = "output_ext";

/// The values a page offers to permalink patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPlaceholders {
    /// Page directory.
    pub path: String,
    /// Category, equal to the directory.
    pub category: String,
    /// Filename without extension.
    pub basename: String,
    /// Output extension with its leading dot.
    pub output_ext: String,
}

impl UrlPlaceholders {
    /// Build the placeholders of a page living in `directory`.
    pub fn new(directory: &str, basename: &str, extension: &str) -> Self {
        Self {
            path: directory.to_string(),
            category: directory.to_string(),
            basename: basename.to_string(),
            output_ext: extension.to_string(),
        }
    }

    /// The placeholders as a map from slot name to value.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            (PATH_SLOT, self.path.clone()),
            (CATEGORY_SLOT, self.category.clone()),
            (BASENAME_SLOT, self.basename.clone()),
            (OUTPUT_EXT_SLOT, self.output_ext.clone()),
        ])
    }
}

/// Resolve the URL placeholders of a page into a slot map.
pub fn resolve_url_placeholders(page: &impl SitePage) -> BTreeMap<&'static str, String> {
    page.url_placeholders().to_map()
}

/// A permalink pattern such as `/:path/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    pattern: String,
}

impl UrlTemplate {
    /// Create a template from a pattern.
    #[must_use]
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// The raw pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Substitute placeholders and sanitize the result.
    ///
    /// The pattern is scanned once from left to right: every `:name` token
    /// naming a known slot is replaced by its value, copied in literally.
    /// Unknown slots are left untouched.
    pub fn render(&self, placeholders: &UrlPlaceholders) -> String {
        let slots = placeholders.to_map();
        let mut url = String::with_capacity(self.pattern.len());
        let mut rest = self.pattern.as_str();

        while let Some(colon) = rest.find(':') {
            url.push_str(&rest[..colon]);
            let after = &rest[colon + 1..];
            let name_len = after
                .find(|c: char| !(c.is_ascii_lowercase() || c == '_'))
                .unwrap_or(after.len());
            let name = &after[..name_len];

            match slots.get(name) {
                Some(value) if !name.is_empty() => url.push_str(value),
                _ => {
                    url.push(':');
                    url.push_str(name);
                }
            }
            rest = &after[name_len..];
        }
        url.push_str(rest);

        sanitize_url(&url)
    }
}

impl Default for UrlTemplate {
    fn default() -> Self {
        Self::new("/:path/")
    }
}

/// Whether a URL names a directory rather than a file.
fn is_directory_url(url: &str) -> bool {
    url.rsplit('/')
        .next()
        .is_none_or(|last| matches!(last, "" | "." | ".."))
}

/// Path segments of a URL, without empty, `.` and `..` segments.
fn url_segments(url: &str) -> impl Iterator<Item = &str> {
    url.split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
}

/// Ensure a leading slash, collapse repeated slashes, and drop dot segments.
fn sanitize_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len() + 1);
    for segment in url_segments(url) {
        result.push('/');
        result.push_str(segment);
    }

    if result.is_empty() || is_directory_url(url) {
        result.push('/');
    }

    result
}

/// Map a page URL to a file under `destination`.
///
/// URLs ending in `/` are written as `index.html` inside that directory.
/// Dot segments are dropped, so the result never leaves `destination`.
pub fn output_path(url: &str, destination: &Path) -> PathBuf {
    let mut path = destination.to_path_buf();
    for segment in url_segments(url) {
        path.push(segment);
    }

    if is_directory_url(url) {
        path.push("index.html");
    }

    path
}
