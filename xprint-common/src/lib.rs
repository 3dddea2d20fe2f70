//! Common types and utilities shared across xprint crates.
//!
//! This crate holds the shared error type, the output format switch used by
//! the binary and the drivers, and the observability helpers. It stays
//! dependency-light so every crate in the workspace can pull it in.
//!
//! # Overview
//!
//! - [`observability`]: Log settings and subscriber setup
//! - [`XprintError`] and [`Result`]: Shared error handling
//! - [`OutputFormat`]: What the pipeline writes at the end of a run
//!
//! # Examples
//!
//! ```rust
//! use xprint_common::OutputFormat;
//!
//! assert_eq!(OutputFormat::Pdf.extension(), "pdf");
//! assert_eq!(OutputFormat::default(), OutputFormat::Pdf);
//! ```
use std::path::PathBuf;

pub mod observability;

/// Artifact produced at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Print the assembled document through a headless browser.
    #[default]
    Pdf,
    /// Write the assembled HTML document as-is.
    Html,
}

impl OutputFormat {
    /// File extension used when deriving default output names.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Html => "html",
        }
    }
}

/// Error types used across the xprint workspace.
#[derive(thiserror::Error, Debug)]
pub enum XprintError {
    /// The browser used for printing could not be located or started.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Printing ran but did not produce a usable document.
    #[error("Print failed: {0}")]
    Print(String),

    /// Printing exceeded the configured timeout.
    #[error("Timeout occurred after {0} seconds")]
    Timeout(u64),

    /// A filesystem operation failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl XprintError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenient alias for results that use [`XprintError`].
pub type Result<T> = std::result::Result<T, XprintError>;
