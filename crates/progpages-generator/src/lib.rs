//! progpages Generator Library
//!
//! Turns entries of a site's library data into one page each.
//!
//! # Modules
//!
//! - [`expander`] - Record to page descriptor expansion
//! - [`page`] - Page descriptors and the host page interface
//! - [`url`] - URL placeholders and permalink rendering
//! - [`registry`] - Page registration with the host
//! - [`generator`] - Generation from site data

pub mod expander;
pub mod generator;
pub mod page;
pub mod registry;
pub mod url;

pub use expander::{ExpanderOptions, MissingFieldError, PageExpander};
pub use generator::{GenerateError, ProgramPageGenerator};
pub use page::{PageDescriptor, SitePage};
pub use registry::{PageSink, SitePages};
pub use url::{UrlPlaceholders, UrlTemplate, output_path, resolve_url_placeholders};
