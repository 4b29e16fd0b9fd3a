//! Site configuration management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    defaults::{DefaultRule, FrontmatterDefaults},
    error::{CoreError, Result},
};

/// Main configuration structure for progpages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,

    /// Program page generation settings.
    #[serde(default)]
    pub programs: ProgramsConfig,

    /// Front-matter default rules.
    #[serde(default)]
    pub defaults: Vec<DefaultRule>,
}

/// Site-wide configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,

    /// Base URL for the site (e.g., "https://example.com").
    #[serde(default)]
    pub base_url: String,

    /// Directory holding structured data files, relative to the site root.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Output directory for the generated site.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

/// Settings for the program page generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramsConfig {
    /// Name of the data collection holding program records.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Directory every program page is nested under.
    #[serde(default = "default_directory_prefix")]
    pub directory_prefix: String,

    /// Layout name handed to the templating layer.
    #[serde(default = "default_layout")]
    pub layout: String,

    /// Scope type used when looking up front-matter defaults.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Permalink pattern for program pages.
    #[serde(default = "default_permalink")]
    pub permalink: String,
}

// Default value functions
fn default_data_dir() -> String {
    "_data".to_string()
}

fn default_output_dir() -> String {
    "_site".to_string()
}

fn default_collection() -> String {
    "library".to_string()
}

fn default_directory_prefix() -> String {
    "programs".to_string()
}

fn default_layout() -> String {
    "program".to_string()
}

fn default_scope() -> String {
    "categories".to_string()
}

fn default_permalink() -> String {
    "/:path/".to_string()
}

impl Default for ProgramsConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            directory_prefix: default_directory_prefix(),
            layout: default_layout(),
            scope: default_scope(),
            permalink: default_permalink(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            CoreError::config_with_source(
                format!("Failed to parse config file: {}", path.display()),
                e,
            )
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `PROGPAGES__*` environment overrides.
    pub fn load_with_env(path: &Path) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from(path))
            .add_source(config::Environment::with_prefix("PROGPAGES").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.site.title.is_empty() {
            return Err(CoreError::config("site.title cannot be empty"));
        }

        if self.programs.collection.is_empty() {
            return Err(CoreError::config("programs.collection cannot be empty"));
        }

        let prefix = &self.programs.directory_prefix;
        if prefix.is_empty() {
            return Err(CoreError::config(
                "programs.directory_prefix cannot be empty",
            ));
        }
        if prefix.starts_with('/') || prefix.ends_with('/') {
            return Err(CoreError::config(
                "programs.directory_prefix must not start or end with '/'",
            ));
        }

        if self.site.base_url.ends_with('/') {
            tracing::warn!("site.base_url should not have a trailing slash");
        }

        Ok(())
    }

    /// Resolve the data directory against the site root.
    pub fn data_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.site.data_dir)
    }

    /// Resolve the output directory against the site root.
    pub fn output_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.site.output_dir)
    }

    /// Build the front-matter defaults resolver from the configured rules.
    pub fn frontmatter_defaults(&self) -> FrontmatterDefaults {
        FrontmatterDefaults::new(self.defaults.clone())
    }

    /// Get the full URL for a path.
    pub fn url_for(&self, path: &str) -> String {
        let base = self.site.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}
