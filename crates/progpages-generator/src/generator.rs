//! Program page generator.
//!
//! Reads the configured library collection from site data, expands it into
//! pages, and registers them with the host.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use progpages_core::{Config, CoreError, SiteData};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    expander::{ExpanderOptions, MissingFieldError, PageExpander},
    page::PageDescriptor,
    registry::PageSink,
    url::{UrlTemplate, output_path},
};

/// Page generation errors.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// Core error while reading site data.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// A program record lacks a required field.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),

    /// The configured collection is not in the site data.
    #[error("data collection not found: {0}")]
    MissingCollection(String),

    /// The configured collection is not a list of records.
    #[error("data collection is not a list: {0}")]
    InvalidCollection(String),
}

/// Result type for generator operations.
pub type Result<T> = std::result::Result<T, GenerateError>;

/// Generates one page per program in the library collection.
#[derive(Debug, Clone)]
pub struct ProgramPageGenerator {
    collection: String,
    expander: PageExpander,
    permalink: UrlTemplate,
}

impl ProgramPageGenerator {
    /// Create a generator from site configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let expander = PageExpander::new(ExpanderOptions::from(&config.programs))
            .with_defaults(Arc::new(config.frontmatter_defaults()));

        Self {
            collection: config.programs.collection.clone(),
            expander,
            permalink: UrlTemplate::new(config.programs.permalink.clone()),
        }
    }

    /// Name of the collection pages are generated from.
    #[must_use]
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Permalink template for generated pages.
    #[must_use]
    pub fn permalink(&self) -> &UrlTemplate {
        &self.permalink
    }

    /// Expand the library collection without registering anything.
    pub fn pages(&self, data: &SiteData) -> Result<Vec<PageDescriptor>> {
        match data.get(&self.collection) {
            None => return Err(GenerateError::MissingCollection(self.collection.clone())),
            Some(value) if !value.is_array() => {
                return Err(GenerateError::InvalidCollection(self.collection.clone()));
            }
            Some(_) => {}
        }

        let records = data.records(&self.collection)?;
        Ok(self.expander.expand(&records)?)
    }

    /// Generate and register all program pages, returning how many there were.
    pub fn generate(&self, data: &SiteData, sink: &mut impl PageSink) -> Result<usize> {
        info!(collection = %self.collection, "generating program pages");

        let pages = self.pages(data)?;
        let count = pages.len();

        for page in pages {
            debug!(title = page.title(), "registering page");
            sink.register(page);
        }

        info!(pages = count, "program pages generated");
        Ok(count)
    }

    /// Where a page is written under `destination`.
    #[must_use]
    pub fn destination(&self, page: &PageDescriptor, destination: &Path) -> PathBuf {
        output_path(&page.url(&self.permalink), destination)
    }
}

#[cfg(test)]
mod tests {
    use progpages_core::config::{ProgramsConfig, SiteConfig};
    use serde_json::json;

    use super::*;
    use crate::{page::SitePage, registry::SitePages};

    fn test_config() -> Config {
        Config {
            site: SiteConfig {
                title: "Test Site".to_string(),
                base_url: "https://example.com".to_string(),
                data_dir: "_data".to_string(),
                output_dir: "_site".to_string(),
            },
            programs: ProgramsConfig::default(),
            defaults: Vec::new(),
        }
    }

    fn test_data() -> SiteData {
        let mut data = SiteData::new();
        data.insert(
            "library",
            json!([
                { "uid": "0x10000168", "name": "Jumpy Plus", "tags": ["game"] },
                { "uid": "0x100001a0", "name": "Alpha Program" }
            ]),
        );
        data
    }

    #[test]
    fn test_generate_registers_in_order() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut site = SitePages::new();

        let count = generator.generate(&test_data(), &mut site).expect("generate");

        assert_eq!(count, 2);
        let titles: Vec<_> = site.iter().map(|p| p.title().to_string()).collect();
        assert_eq!(titles, vec!["Jumpy Plus", "Alpha Program"]);
        assert_eq!(
            site.iter().next().map(|p| p.directory().to_string()),
            Some("programs/0x10000168".to_string())
        );
    }

    #[test]
    fn test_generate_missing_collection() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut site = SitePages::new();

        let err = generator
            .generate(&SiteData::new(), &mut site)
            .unwrap_err();

        assert!(matches!(err, GenerateError::MissingCollection(ref name) if name == "library"));
        assert!(site.is_empty());
    }

    #[test]
    fn test_generate_empty_collection() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut data = SiteData::new();
        data.insert("library", json!([]));
        let mut site = SitePages::new();

        assert_eq!(generator.generate(&data, &mut site).expect("generate"), 0);
    }

    #[test]
    fn test_generate_missing_field_registers_nothing() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut data = SiteData::new();
        data.insert(
            "library",
            json!([{ "uid": "alpha", "name": "Alpha" }, { "uid": "beta" }]),
        );
        let mut site = SitePages::new();

        let err = generator.generate(&data, &mut site).unwrap_err();

        assert!(matches!(
            err,
            GenerateError::MissingField(MissingFieldError { index: 1, field: "name" })
        ));
        assert!(site.is_empty());
    }

    #[test]
    fn test_generate_collection_not_a_list() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut data = SiteData::new();
        data.insert("library", json!({ "uid": "alpha", "name": "Alpha" }));
        let mut site = SitePages::new();

        let err = generator.generate(&data, &mut site).unwrap_err();

        assert!(matches!(err, GenerateError::InvalidCollection(ref name) if name == "library"));
        assert!(err.to_string().contains("not a list"));
        assert!(site.is_empty());
    }

    #[test]
    fn test_destination_ignores_dot_segments_in_uid() {
        let generator = ProgramPageGenerator::new(&test_config());
        let mut data = SiteData::new();
        data.insert(
            "library",
            json!([
                { "uid": "../../../etc", "name": "Escape" },
                { "uid": "x:path", "name": "Colon" }
            ]),
        );
        let pages = generator.pages(&data).expect("pages");
        let dest = Path::new("/srv/_site");

        let escape = generator.destination(&pages[0], dest);
        assert_eq!(escape, Path::new("/srv/_site/programs/etc/index.html"));
        assert!(escape.starts_with(dest));

        assert_eq!(pages[1].url(generator.permalink()), "/programs/x:path/");
    }

    #[test]
    fn test_destination_uses_permalink() {
        let generator = ProgramPageGenerator::new(&test_config());
        let pages = generator.pages(&test_data()).expect("pages");

        assert_eq!(pages[1].url(generator.permalink()), "/programs/0x100001a0/");
        assert_eq!(
            generator.destination(&pages[1], Path::new("_site")),
            Path::new("_site/programs/0x100001a0/index.html")
        );
    }

    #[test]
    fn test_configured_defaults_reach_pages() {
        let mut config = test_config();
        config.defaults = vec![
            progpages_core::DefaultRule::new("programs", Some("categories"))
                .with_value("sidebar", true),
        ];
        let generator = ProgramPageGenerator::new(&config);

        let pages = generator.pages(&test_data()).expect("pages");

        assert_eq!(pages[0].get("sidebar"), Some(json!(true)));
        assert_eq!(pages[0].get("missing"), None);
    }
}
