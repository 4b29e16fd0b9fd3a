//! Check command - validate configuration and library data

use std::{collections::HashMap, path::Path};

use color_eyre::eyre::{Result, bail};
use progpages_core::{
    Config, SiteData,
    record::{NAME_FIELD, UID_FIELD},
};

use crate::site_root;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Problems that stop page generation.
    pub errors: Vec<String>,
    /// Problems that do not.
    pub warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates configuration and every record of the library collection.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration and data");

    let result = validate(config_path);

    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Collect every problem with the site at `config_path`.
pub fn validate(config_path: &Path) -> ValidationResult {
    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            c
        }
        Err(e) => {
            println!("  ✗ Configuration invalid: {e}");
            result.add_error(format!("Configuration error: {e}"));
            return result;
        }
    };

    if config.site.base_url.is_empty() {
        result.add_warning("site.base_url is empty");
    } else if !config.site.base_url.starts_with("http") {
        result.add_warning("site.base_url should start with http:// or https://");
    }

    println!("\nChecking library data...");
    let data_dir = config.data_dir(site_root(config_path));
    if !data_dir.is_dir() {
        result.add_error(format!("Data directory missing: {}", data_dir.display()));
        return result;
    }

    let data = match SiteData::load(&data_dir) {
        Ok(d) => d,
        Err(e) => {
            result.add_error(format!("Data error: {e}"));
            return result;
        }
    };

    validate_records(&data, &config.programs.collection, &mut result);
    result
}

/// Check every record for required fields and unique identifiers.
fn validate_records(data: &SiteData, collection: &str, result: &mut ValidationResult) {
    if !data.contains(collection) {
        result.add_error(format!("Data collection '{collection}' not found"));
        return;
    }

    let records = match data.records(collection) {
        Ok(r) => r,
        Err(e) => {
            result.add_error(e.to_string());
            return;
        }
    };

    if records.is_empty() {
        result.add_warning(format!("Data collection '{collection}' is empty"));
    }

    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut failed = 0;

    for (index, record) in records.iter().enumerate() {
        let mut ok = true;
        match record.uid() {
            Some(uid) => {
                if let Some(first) = seen.get(&uid) {
                    result.add_warning(format!(
                        "{collection}[{index}]: uid '{uid}' already used by {collection}[{first}]"
                    ));
                } else {
                    seen.insert(uid, index);
                }
            }
            None => {
                result.add_error(format!("{collection}[{index}]: missing '{UID_FIELD}'"));
                ok = false;
            }
        }

        if record.name().is_none() {
            result.add_error(format!("{collection}[{index}]: missing '{NAME_FIELD}'"));
            ok = false;
        }

        if !ok {
            failed += 1;
        }
    }

    if failed == 0 {
        println!("  ✓ All {} program records valid", records.len());
    } else {
        println!("  ✗ {failed}/{} program records have errors", records.len());
    }
}
