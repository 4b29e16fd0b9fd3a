//! Page descriptors for generated program pages.

use std::{fmt, sync::Arc};

use progpages_core::{DefaultsResolver, ProgramRecord};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::url::{UrlPlaceholders, UrlTemplate};

/// Basename shared by every program page.
pub const PAGE_BASENAME: &str = "index";

/// Output extension shared by every program page.
pub const PAGE_EXTENSION: &str = ".html";

/// Context key pointing at the program a page documents.
///
/// This is the `linkedRecord` entry of the page context.
pub const LINKED_DOCS_KEY: &str = "linked_docs";

/// Context key holding the layout name.
pub const LAYOUT_KEY: &str = "layout";

/// Context key holding the program record itself.
///
/// This is the `record` entry of the page context.
pub const PROGRAM_KEY: &str = "program";

/// Context key holding the page title.
pub const TITLE_KEY: &str = "title";

/// What the host needs from a page to route and render it.
pub trait SitePage {
    /// Directory the page lives in, relative to the site root.
    fn directory(&self) -> &str;

    /// Filename without extension.
    fn basename(&self) -> &str;

    /// Output extension, including the leading dot.
    fn extension(&self) -> &str;

    /// Full filename.
    fn filename(&self) -> String {
        format!("{}{}", self.basename(), self.extension())
    }

    /// Data handed to the templating layer.
    fn context(&self) -> &Map<String, Value>;

    /// Named slots used to build the page URL.
    fn url_placeholders(&self) -> UrlPlaceholders {
        UrlPlaceholders::new(self.directory(), self.basename(), self.extension())
    }
}

/// Fallback lookup attached to a descriptor.
#[derive(Clone)]
pub(crate) struct Fallback {
    pub(crate) resolver: Arc<dyn DefaultsResolver>,
    pub(crate) scope: String,
}

impl fmt::Debug for Fallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fallback")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

/// A page to be rendered for one program record.
#[derive(Debug, Clone, Serialize)]
pub struct PageDescriptor {
    directory: String,
    title: String,
    context: Map<String, Value>,
    #[serde(skip)]
    record: ProgramRecord,
    #[serde(skip)]
    fallback: Option<Fallback>,
}

impl PageDescriptor {
    /// Create a descriptor for a record that has already been validated.
    pub(crate) fn new(
        directory: String,
        title: String,
        layout: &str,
        record: ProgramRecord,
        fallback: Option<Fallback>,
    ) -> Self {
        let value = record.to_value();
        let mut context = Map::new();
        context.insert(LINKED_DOCS_KEY.to_string(), value.clone());
        context.insert(LAYOUT_KEY.to_string(), Value::String(layout.to_string()));
        context.insert(PROGRAM_KEY.to_string(), value);
        context.insert(TITLE_KEY.to_string(), Value::String(title.clone()));

        Self {
            directory,
            title,
            context,
            record,
            fallback,
        }
    }

    /// Page title, taken from the program name.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The program this page was built from.
    #[must_use]
    pub fn record(&self) -> &ProgramRecord {
        &self.record
    }

    /// Path of the page relative to the site root.
    #[must_use]
    pub fn relative_path(&self) -> String {
        format!("{}/{}", self.directory, self.filename())
    }

    /// Look up a context value, falling back to front-matter defaults.
    ///
    /// Every miss asks the resolver again; nothing is cached.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.context.get(key) {
            return Some(value.clone());
        }

        let fallback = self.fallback.as_ref()?;
        fallback
            .resolver
            .find(&self.relative_path(), &fallback.scope, key)
    }

    /// Render the page URL with a permalink template.
    #[must_use]
    pub fn url(&self, template: &UrlTemplate) -> String {
        template.render(&self.url_placeholders())
    }
}

impl SitePage for PageDescriptor {
    fn directory(&self) -> &str {
        &self.directory
    }

    fn basename(&self) -> &str {
        PAGE_BASENAME
    }

    fn extension(&self) -> &str {
        PAGE_EXTENSION
    }

    fn context(&self) -> &Map<String, Value> {
        &self.context
    }
}
