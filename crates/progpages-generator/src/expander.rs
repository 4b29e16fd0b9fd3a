//! Expansion of program records into page descriptors.
//!
//! Every record yields exactly one page under `<prefix>/<uid>`, in input
//! order. Records without a `uid` or `name` stop the whole expansion.

use std::sync::Arc;

use progpages_core::{
    DefaultsResolver, ProgramRecord,
    config::ProgramsConfig,
    record::{NAME_FIELD, UID_FIELD},
};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::page::{Fallback, PageDescriptor};

/// A record lacks a field every page needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("program record {index} is missing required field '{field}'")]
pub struct MissingFieldError {
    /// Zero-based position of the record in the input.
    pub index: usize,
    /// Name of the missing field.
    pub field: &'static str,
}

/// Options controlling how pages are laid out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpanderOptions {
    /// Directory every page is nested under.
    pub directory_prefix: String,
    /// Layout name placed in each page context.
    pub layout: String,
    /// Scope type for front-matter default lookups.
    pub scope: String,
}

impl Default for ExpanderOptions {
    fn default() -> Self {
        Self::from(&ProgramsConfig::default())
    }
}

impl From<&ProgramsConfig> for ExpanderOptions {
    fn from(config: &ProgramsConfig) -> Self {
        Self {
            directory_prefix: config.directory_prefix.clone(),
            layout: config.layout.clone(),
            scope: config.scope.clone(),
        }
    }
}

/// Turns program records into page descriptors.
#[derive(Debug, Clone, Default)]
pub struct PageExpander {
    options: ExpanderOptions,
    defaults: Option<Arc<dyn DefaultsResolver>>,
}

impl PageExpander {
    /// Create an expander with the given options.
    #[must_use]
    pub fn new(options: ExpanderOptions) -> Self {
        Self {
            options,
            defaults: None,
        }
    }

    /// Attach a front-matter defaults resolver for context misses.
    #[must_use]
    pub fn with_defaults(mut self, resolver: Arc<dyn DefaultsResolver>) -> Self {
        self.defaults = Some(resolver);
        self
    }

    /// The expander's options.
    #[must_use]
    pub fn options(&self) -> &ExpanderOptions {
        &self.options
    }

    /// Expand records into one descriptor each, preserving order.
    ///
    /// Fails without returning any descriptors if a record lacks `uid` or
    /// `name`. When several records are invalid, the first one is reported.
    pub fn expand(
        &self,
        records: &[ProgramRecord],
    ) -> Result<Vec<PageDescriptor>, MissingFieldError> {
        info!(count = records.len(), "expanding program records");

        // Collecting per-record results keeps input order and lets the
        // lowest failing index win.
        let results: Vec<_> = records
            .par_iter()
            .enumerate()
            .map(|(index, record)| self.expand_one(index, record))
            .collect();

        let pages = results.into_iter().collect::<Result<Vec<_>, _>>()?;

        info!(pages = pages.len(), "expansion complete");
        Ok(pages)
    }

    /// Build the descriptor for a single record.
    fn expand_one(
        &self,
        index: usize,
        record: &ProgramRecord,
    ) -> Result<PageDescriptor, MissingFieldError> {
        let uid = record.uid().ok_or(MissingFieldError {
            index,
            field: UID_FIELD,
        })?;
        let name = record.name().ok_or(MissingFieldError {
            index,
            field: NAME_FIELD,
        })?;

        let directory = format!("{}/{uid}", self.options.directory_prefix);
        debug!(index, directory = %directory, "expanded program record");

        let fallback = self.defaults.as_ref().map(|resolver| Fallback {
            resolver: Arc::clone(resolver),
            scope: self.options.scope.clone(),
        });

        Ok(PageDescriptor::new(
            directory,
            name,
            &self.options.layout,
            record.clone(),
            fallback,
        ))
    }
}
