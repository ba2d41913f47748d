//! Shared utilities for the demos.
//!
//! Provides:
//! - Command-line argument parsing
//! - Logging initialization

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use tracing_subscriber::EnvFilter;

// ============================================================================
// Args
// ============================================================================

/// Command-line arguments for the demos.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// `--debug`: crate logs at debug level.
    pub debug: bool,
    /// `--port N`: bridge port (0 picks a free one).
    pub port: u16,
    /// `--upload PATH`: file for the upload check.
    pub upload: Option<String>,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .and_then(|i| args.get(i + 1))
                .cloned()
        };

        Self {
            debug: args.iter().any(|a| a == "--debug"),
            port: value_of("--port")
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            upload: value_of("--upload"),
        }
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Installs a `tracing` subscriber for this crate's logs.
pub fn init_logging(debug: bool) {
    let filter = if debug {
        "widget_verify=debug"
    } else {
        "widget_verify=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}
