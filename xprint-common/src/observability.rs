//! Logging setup for the `xprint` binary and the integration tests.
//!
//! Events go to a daily-rolling file under the configured log directory and,
//! when `stderr` is set, to the terminal as well. The `logging` section of
//! the config file deserializes straight into [`LogSettings`], so an unknown
//! `format` is rejected while the config is loaded.

use std::path::PathBuf;
use std::sync::OnceLock;

use anyhow::Context;
use chrono::Local;
use serde::Deserialize;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Overrides `logging.dir` when that is unset.
pub const LOG_DIR_ENV: &str = "XPRINT_LOG_DIR";

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
static LOG_PATH: OnceLock<PathBuf> = OnceLock::new();

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    #[serde(alias = "plain")]
    Text,
    Json,
}

/// The `logging` section of `xprint.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Log directory; `~` is expanded.
    pub dir: Option<PathBuf>,
    pub format: LogFormat,
    /// Mirror events to stderr.
    pub stderr: bool,
    /// Filter used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            dir: None,
            format: LogFormat::Text,
            stderr: false,
            filter: "info".into(),
        }
    }
}

impl LogSettings {
    /// `dir`, then `$XPRINT_LOG_DIR`, then the platform data directory.
    pub fn resolve_dir(&self) -> PathBuf {
        let configured = self
            .dir
            .clone()
            .or_else(|| std::env::var_os(LOG_DIR_ENV).map(PathBuf::from));
        match configured {
            Some(dir) => match dir.to_str() {
                Some(raw) => PathBuf::from(shellexpand::tilde(raw).into_owned()),
                None => dir,
            },
            None => dirs::data_local_dir()
                .map(|d| d.join("xprint"))
                .unwrap_or_else(|| PathBuf::from("xprint-logs")),
        }
    }
}

/// Install the global subscriber writing `<dir>/<log_name>.log.<date>`.
///
/// Only the first call installs anything; later calls return the path chosen
/// by the first.
pub fn init_logging(log_name: &str, settings: &LogSettings) -> anyhow::Result<PathBuf> {
    if let Some(path) = LOG_PATH.get() {
        return Ok(path.clone());
    }

    let dir = settings.resolve_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create log directory: {}", dir.display()))?;

    let file_name = format!("{log_name}.log");
    let path = dir.join(format!("{file_name}.{}", Local::now().format("%Y-%m-%d")));
    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(&dir, &file_name));
    let _ = LOG_GUARD.set(guard);

    let mut layers = vec![file_layer(settings.format, writer)];
    if settings.stderr {
        layers.push(stderr_layer(settings.format));
    }
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::registry()
        .with(layers)
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing setup failed: {e}"))?;

    let _ = LOG_PATH.set(path.clone());
    tracing::debug!(path = %path.display(), format = ?settings.format, "logging.initialized");
    Ok(path)
}

fn file_layer(format: LogFormat, writer: NonBlocking) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_writer(writer).with_ansi(false).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(writer).boxed(),
    }
}

fn stderr_layer(format: LogFormat) -> BoxedLayer {
    match format {
        LogFormat::Text => fmt::layer().with_writer(std::io::stderr).boxed(),
        LogFormat::Json => fmt::layer().json().with_writer(std::io::stderr).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_dir_wins_over_env() {
        let tmp = tempfile::TempDir::new().unwrap();
        let settings = LogSettings {
            dir: Some(tmp.path().to_path_buf()),
            ..LogSettings::default()
        };
        temp_env::with_var(LOG_DIR_ENV, Some("/var/log/elsewhere"), || {
            assert_eq!(settings.resolve_dir(), tmp.path());
        });
    }

    #[test]
    fn env_dir_applies_when_unconfigured() {
        temp_env::with_var(LOG_DIR_ENV, Some("/var/log/xprint"), || {
            assert_eq!(
                LogSettings::default().resolve_dir(),
                PathBuf::from("/var/log/xprint")
            );
        });
    }

    #[test]
    fn tilde_expands_to_home() {
        temp_env::with_vars([("HOME", Some("/home/jane")), (LOG_DIR_ENV, None)], || {
            let settings = LogSettings {
                dir: Some(PathBuf::from("~/logs/xprint")),
                ..LogSettings::default()
            };
            assert_eq!(settings.resolve_dir(), PathBuf::from("/home/jane/logs/xprint"));
        });
    }
}
