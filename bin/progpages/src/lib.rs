//! progpages CLI Library
//!
//! Command implementations for the progpages binary.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (list, check)

pub mod cmd;

use std::path::Path;

// Re-export core types for convenience
pub use progpages_core::{Config, SiteData};
pub use progpages_generator::{PageDescriptor, ProgramPageGenerator, SitePages};

/// Initialize tracing with the specified verbosity level.
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Directory the site lives in: the one holding its configuration file.
pub fn site_root(config_path: &Path) -> &Path {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}
