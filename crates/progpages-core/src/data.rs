//! Structured site data.
//!
//! Loads the files of the site's data directory into named collections, one
//! per file stem, the way templates see them.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    error::{CoreError, Result},
    record::ProgramRecord,
};

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    /// `.json` files.
    Json,
    /// `.yml` and `.yaml` files.
    Yaml,
}

impl DataFormat {
    /// Determine the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yml" | "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct DataEntry {
    source: PathBuf,
    value: Value,
}

/// Named data collections loaded from the data directory.
#[derive(Debug, Clone, Default)]
pub struct SiteData {
    entries: BTreeMap<String, DataEntry>,
}

impl SiteData {
    /// Create an empty data set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every data file directly under `dir`.
    ///
    /// A missing directory yields an empty data set.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut data = Self::new();
        if !dir.exists() {
            debug!(dir = %dir.display(), "data directory does not exist");
            return Ok(data);
        }

        info!(dir = %dir.display(), "loading site data");

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if path
                .file_name()
                .is_some_and(|n| n.to_string_lossy().starts_with('.'))
            {
                continue;
            }
            if let Some(ext) = path.extension()
                && let Some(format) = DataFormat::from_extension(&ext.to_string_lossy())
            {
                files.push((path, format));
            }
        }
        files.sort_by(|a, b| a.0.cmp(&b.0));

        for (path, format) in files {
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let value = parse_file(&path, format)?;
            if let Some(previous) = data.entries.get(&name) {
                warn!(
                    collection = %name,
                    replaced = %previous.source.display(),
                    by = %path.display(),
                    "duplicate data collection"
                );
            }
            debug!(collection = %name, path = %path.display(), "loaded data file");
            data.entries.insert(name, DataEntry {
                source: path,
                value,
            });
        }

        info!(collections = data.entries.len(), "site data loaded");
        Ok(data)
    }

    /// Insert a collection, replacing any existing one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        let source = PathBuf::from(&name);
        self.entries.insert(name, DataEntry { source, value });
    }

    /// Check whether a collection exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Get a collection's raw value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Names of all loaded collections.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Interpret a collection as an ordered list of program records.
    pub fn records(&self, name: &str) -> Result<Vec<ProgramRecord>> {
        let entry = self
            .entries
            .get(name)
            .ok_or_else(|| CoreError::data(name, "no such data collection"))?;

        let Value::Array(items) = &entry.value else {
            return Err(CoreError::data(
                &entry.source,
                format!("collection '{name}' is not a list"),
            ));
        };

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                ProgramRecord::from_value(item.clone()).ok_or_else(|| {
                    CoreError::data(
                        &entry.source,
                        format!("entry {index} of '{name}' is not a mapping"),
                    )
                })
            })
            .collect()
    }
}

/// Parse a single data file into a JSON value.
fn parse_file(path: &Path, format: DataFormat) -> Result<Value> {
    let content = fs::read_to_string(path)?;
    let value = match format {
        DataFormat::Json => serde_json::from_str(&content)
            .map_err(|e| CoreError::data(path, e.to_string()))?,
        DataFormat::Yaml => serde_yaml::from_str(&content)
            .map_err(|e| CoreError::data(path, e.to_string()))?,
    };
    Ok(value)
}
