//! Loader for xprint configuration with YAML + environment overlays.
//!
//! Every section is optional; a missing file and an empty environment yield
//! [`XprintConfig::default`]. Environment variables use the `XPRINT_` prefix
//! and `__` to descend into sections, e.g. `XPRINT_HTTP__RETRIES=4`.
//! Endpoint URLs, the user agent and both path settings may reference
//! variables as `${VAR}`; paths also expand a leading `~`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use xprint_common::observability::LogSettings;
use xprint_social::DocumentOptions;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct XprintConfig {
    pub version: Option<String>,
    pub http: HttpSettings,
    pub sources: SourceSettings,
    pub document: DocumentOptions,
    pub pdf: PdfSettings,
    pub logging: LogSettings,
}

/// Retrieval knobs shared by every source.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    pub timeout_secs: u64,
    pub retries: usize,
    pub backoff_ms: u64,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 20,
            retries: 2,
            backoff_ms: 400,
            user_agent: "xprint/0.1".into(),
        }
    }
}

/// Base URLs of the three post sources, tried in priority order.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub fxtwitter: String,
    pub vxtwitter: String,
    pub oembed: String,
    /// Fetch all sources at once; acceptance still follows priority order.
    pub concurrent: bool,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            fxtwitter: "https://api.fxtwitter.com".into(),
            vxtwitter: "https://api.vxtwitter.com".into(),
            oembed: "https://publish.twitter.com".into(),
            concurrent: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PdfSettings {
    /// Explicit browser binary; discovered on `PATH` when unset.
    pub browser: Option<PathBuf>,
    pub timeout_secs: u64,
    pub virtual_time_budget_ms: u64,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self {
            browser: None,
            timeout_secs: 60,
            virtual_time_budget_ms: 10_000,
        }
    }
}

/// `<config dir>/xprint/xprint.yaml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("xprint").join("xprint.yaml"))
}

impl XprintConfig {
    /// Substitute `${VAR}` references in the settings that hold endpoints,
    /// the user agent and filesystem paths. An unset variable is an error
    /// naming the setting.
    fn expand_env(&mut self) -> Result<(), ConfigError> {
        expand_in("http.user_agent", &mut self.http.user_agent)?;
        expand_in("sources.fxtwitter", &mut self.sources.fxtwitter)?;
        expand_in("sources.vxtwitter", &mut self.sources.vxtwitter)?;
        expand_in("sources.oembed", &mut self.sources.oembed)?;
        expand_path_in("pdf.browser", &mut self.pdf.browser)?;
        expand_path_in("logging.dir", &mut self.logging.dir)?;
        Ok(())
    }
}

fn expand_in(key: &str, value: &mut String) -> Result<(), ConfigError> {
    if value.contains('$') {
        *value = shellexpand::env(value.as_str())
            .map_err(|e| ConfigError::Message(format!("{key}: {e}")))?
            .into_owned();
    }
    Ok(())
}

fn expand_path_in(key: &str, path: &mut Option<PathBuf>) -> Result<(), ConfigError> {
    let Some(raw) = path.as_deref().and_then(Path::to_str) else {
        return Ok(());
    };
    let expanded = shellexpand::full(raw)
        .map_err(|e| ConfigError::Message(format!("{key}: {e}")))?
        .into_owned();
    *path = Some(PathBuf::from(expanded));
    Ok(())
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct XprintConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env: Environment,
}

impl Default for XprintConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl XprintConfigLoader {
    /// Start with defaults plus `XPRINT_` env overrides.
    ///
    /// ```
    /// use xprint_config::XprintConfigLoader;
    ///
    /// let config = XprintConfigLoader::new()
    ///     .with_yaml_str("version: '1'")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert_eq!(config.http.retries, 2);
    /// ```
    pub fn new() -> Self {
        let env = Environment::with_prefix("XPRINT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true);
        Self {
            builder: Config::builder(),
            env,
        }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use xprint_config::XprintConfigLoader;
    ///
    /// let cfg = XprintConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// sources:
    ///   fxtwitter: "http://localhost:8080"
    ///   concurrent: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.sources.fxtwitter, "http://localhost:8080");
    /// assert_eq!(cfg.sources.vxtwitter, "https://api.vxtwitter.com");
    /// assert!(cfg.sources.concurrent);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// Files are merged in the order they were added; environment variables
    /// are applied last so they always win.
    pub fn load(self) -> Result<XprintConfig, ConfigError> {
        let mut typed: XprintConfig = self
            .builder
            .add_source(self.env)
            .build()?
            .try_deserialize()?;
        typed.expand_env()?;
        Ok(typed)
    }
}
