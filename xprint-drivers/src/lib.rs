//! Output drivers: turning an assembled HTML document into a printed artifact.
//!
//! - [`PdfPrinter`]: the printing seam used by the binary
//! - [`chromium::ChromiumPrinter`]: headless Chromium/Chrome via `--print-to-pdf`
use async_trait::async_trait;
use std::path::Path;
use xprint_common::Result;

#[cfg(feature = "chromium")]
pub mod chromium;

#[cfg(feature = "chromium")]
pub use chromium::{find_browser, ChromiumPrinter};

/// Renders a complete HTML document to a PDF file at `output`.
#[async_trait]
pub trait PdfPrinter: Send + Sync {
    async fn print(&self, html: &str, output: &Path) -> Result<()>;
}
