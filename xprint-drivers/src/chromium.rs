use crate::PdfPrinter;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use url::Url;
use xprint_common::{Result, XprintError};

/// Executable names searched for on `PATH`, in order.
pub const BROWSER_CANDIDATES: [&str; 4] = [
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
];

const STDERR_SNIPPET: usize = 400;

/// Prints documents with a headless Chromium-family browser.
///
/// Every run gets a throwaway profile directory so a browser already open on
/// the desktop never holds the profile lock.
#[derive(Debug, Clone)]
pub struct ChromiumPrinter {
    binary: PathBuf,
    timeout: Duration,
    virtual_time_budget: Duration,
}

impl ChromiumPrinter {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: Duration::from_secs(60),
            virtual_time_budget: Duration::from_secs(10),
        }
    }

    /// Use `configured` when given, else the first browser found on `PATH`.
    pub fn discover(configured: Option<&Path>) -> Result<Self> {
        if let Some(path) = configured {
            return Ok(Self::new(path));
        }
        find_browser().map(Self::new).ok_or_else(|| {
            XprintError::Browser(format!(
                "no browser found on PATH (tried {}); set pdf.browser or pass --browser",
                BROWSER_CANDIDATES.join(", ")
            ))
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Virtual time the page gets to load images before printing.
    pub fn with_virtual_time_budget(mut self, budget: Duration) -> Self {
        self.virtual_time_budget = budget;
        self
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

#[async_trait]
impl PdfPrinter for ChromiumPrinter {
    async fn print(&self, html: &str, output: &Path) -> Result<()> {
        let output = std::path::absolute(output).map_err(|e| XprintError::io(output, e))?;
        let workdir = tempfile::Builder::new()
            .prefix("xprint-")
            .tempdir()
            .map_err(|e| XprintError::io(std::env::temp_dir(), e))?;

        let page_path = workdir.path().join("document.html");
        std::fs::File::create(&page_path)
            .and_then(|mut file| file.write_all(html.as_bytes()))
            .map_err(|e| XprintError::io(&page_path, e))?;
        let page_url = Url::from_file_path(&page_path).map_err(|_| {
            XprintError::Print(format!("cannot build file URL for {}", page_path.display()))
        })?;

        match tokio::fs::remove_file(&output).await {
            Ok(()) => tracing::debug!(path = %output.display(), "pdf.output.replaced"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(XprintError::io(&output, e)),
        }

        let profile = workdir.path().join("profile");
        let args = print_args(&page_url, &output, &profile, self.virtual_time_budget);
        tracing::info!(
            browser = %self.binary.display(),
            output = %output.display(),
            timeout_secs = self.timeout.as_secs(),
            "pdf.print.start"
        );

        let run = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output();
        let result = tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| XprintError::Timeout(self.timeout.as_secs()))?
            .map_err(|e| {
                XprintError::Browser(format!("failed to launch {}: {e}", self.binary.display()))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            let snippet: String = stderr.trim().chars().take(STDERR_SNIPPET).collect();
            tracing::warn!(status = %result.status, stderr = %snippet, "pdf.print.failed");
            return Err(XprintError::Print(format!(
                "browser exited with {}: {snippet}",
                result.status
            )));
        }

        match tokio::fs::metadata(&output).await {
            Ok(meta) if meta.len() > 0 => {
                tracing::info!(output = %output.display(), bytes = meta.len(), "pdf.print.done");
                Ok(())
            }
            _ => Err(XprintError::Print(format!(
                "browser finished but {} was not written",
                output.display()
            ))),
        }
    }
}

/// Command-line arguments for one headless print run.
pub fn print_args(page: &Url, output: &Path, profile_dir: &Path, budget: Duration) -> Vec<String> {
    vec![
        "--headless".to_string(),
        "--disable-gpu".to_string(),
        "--no-first-run".to_string(),
        "--no-default-browser-check".to_string(),
        "--no-pdf-header-footer".to_string(),
        "--run-all-compositor-stages-before-draw".to_string(),
        format!("--virtual-time-budget={}", budget.as_millis()),
        format!("--user-data-dir={}", profile_dir.display()),
        format!("--print-to-pdf={}", output.display()),
        page.to_string(),
    ]
}

/// First of [`BROWSER_CANDIDATES`] found on `PATH`.
pub fn find_browser() -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    find_in_path(&BROWSER_CANDIDATES, &path)
}

fn find_in_path(names: &[&str], path: &OsStr) -> Option<PathBuf> {
    names.iter().find_map(|name| {
        std::env::split_paths(path)
            .map(|dir| dir.join(name))
            .find(|candidate| is_executable(candidate))
    })
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_carry_output_budget_and_page() {
        let page = Url::parse("file:///tmp/x/document.html").unwrap();
        let args = print_args(
            &page,
            Path::new("/out/x-1.pdf"),
            Path::new("/tmp/x/profile"),
            Duration::from_secs(10),
        );
        assert_eq!(args.first().map(String::as_str), Some("--headless"));
        assert!(args.contains(&"--print-to-pdf=/out/x-1.pdf".to_string()));
        assert!(args.contains(&"--virtual-time-budget=10000".to_string()));
        assert!(args.contains(&"--no-pdf-header-footer".to_string()));
        assert!(args.contains(&"--user-data-dir=/tmp/x/profile".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("file:///tmp/x/document.html"));
    }

    #[test]
    fn configured_binary_wins_over_discovery() {
        let printer = ChromiumPrinter::discover(Some(Path::new("/opt/chrome/chrome"))).unwrap();
        assert_eq!(printer.binary(), Path::new("/opt/chrome/chrome"));
    }

    #[cfg(unix)]
    #[test]
    fn finds_first_executable_candidate_in_path_order() {
        use std::os::unix::fs::PermissionsExt;

        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let make = |dir: &Path, name: &str, mode: u32| {
            let path = dir.join(name);
            std::fs::write(&path, "#!/bin/sh\n").unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode)).unwrap();
            path
        };
        make(first.path(), "chromium", 0o644);
        let expected = make(second.path(), "chromium", 0o755);
        make(first.path(), "google-chrome", 0o755);

        let path = std::env::join_paths([first.path(), second.path()]).unwrap();
        assert_eq!(find_in_path(&BROWSER_CANDIDATES, &path), Some(expected));
    }

    #[test]
    fn empty_path_finds_nothing() {
        assert_eq!(find_in_path(&BROWSER_CANDIDATES, OsStr::new("")), None);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn failing_browser_is_reported() {
        let out = tempfile::tempdir().unwrap();
        let printer = ChromiumPrinter::new("false").with_timeout(Duration::from_secs(5));
        let err = printer
            .print("<p>x</p>", &out.path().join("x.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, XprintError::Print(_)), "{err}");
    }

    #[tokio::test]
    async fn missing_binary_is_a_browser_error() {
        let out = tempfile::tempdir().unwrap();
        let printer = ChromiumPrinter::new("/definitely/not/a/browser");
        let err = printer
            .print("<p>x</p>", &out.path().join("x.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, XprintError::Browser(_)), "{err}");
    }
}
