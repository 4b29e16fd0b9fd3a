//! progpages Core Library
//!
//! Core types, configuration, site data, and front-matter defaults for the
//! progpages page generator.

pub mod config;
pub mod data;
pub mod defaults;
pub mod error;
pub mod record;

pub use config::Config;
pub use data::SiteData;
pub use defaults::{DefaultRule, DefaultsResolver, FrontmatterDefaults};
pub use error::{CoreError, Result};
pub use record::ProgramRecord;
