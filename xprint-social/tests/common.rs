use std::path::PathBuf;
use std::sync::OnceLock;

use xprint_common::observability::{LogFormat, LogSettings, init_logging};

static INIT_PATH: OnceLock<PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let json = std::env::var("XPRINT_LOG_FORMAT")
            .map(|raw| raw.trim().eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let settings = LogSettings {
            dir: Some(std::env::temp_dir().join("xprint-tests")),
            format: if json { LogFormat::Json } else { LogFormat::Text },
            stderr: true,
            filter: "debug".to_string(),
        };

        init_logging("xprint-tests", &settings).unwrap_or_default()
    });
}
