//! Report inputs, optionally loaded from `report.json`
//!
//! Without a config file the report covers the built-in user list in
//! `ap-south-1` and writes `combined_user_logs_<date>.xlsx` to the working
//! directory.
//!
//! # report.json Format
//!
//! ```json
//! {
//!   "identities": ["alice", "bob"],
//!   "region": "us-east-1",
//!   "output_path": "reports/daily.xlsx"
//! }
//! ```
//!
//! Every field is optional. Set `TRAIL_REPORT_CONFIG` to read a different file.

#![warn(clippy::all, rust_2018_idioms)]

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::app::user_activity_report::TimeWindow;

pub const CONFIG_PATH_ENV: &str = "TRAIL_REPORT_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "report.json";
pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_IDENTITIES: [&str; 3] =
    ["Ajith_datautics", "sandru_datautics", "sarath_datautics"];

/// The three report inputs
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// IAM user names, in sheet order
    pub identities: Vec<String>,

    pub region: String,

    /// Defaults to `combined_user_logs_<YYYY-MM-DD>.xlsx` for the reported day
    pub output_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            identities: DEFAULT_IDENTITIES.iter().map(|s| s.to_string()).collect(),
            region: DEFAULT_REGION.to_string(),
            output_path: None,
        }
    }
}

impl ReportConfig {
    /// Load from `$TRAIL_REPORT_CONFIG` or `report.json`, else defaults
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from_path(path)
    }

    /// Load from `path`; a missing or invalid file yields the defaults
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            debug!("No report config at {:?}, using defaults", path);
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str::<ReportConfig>(&contents) {
                Ok(config) => {
                    debug!(
                        "Loaded report config: {} users, region={}, output={:?}",
                        config.identities.len(),
                        config.region,
                        config.output_path
                    );
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {:?}: {}", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Configured output path, or the dated default for `window`
    pub fn output_path_for(&self, window: &TimeWindow) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| window.default_output_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ReportConfig::load_from_path(dir.path().join("report.json"));

        assert_eq!(config, ReportConfig::default());
        assert_eq!(config.region, "ap-south-1");
        assert_eq!(
            config.identities,
            vec!["Ajith_datautics", "sandru_datautics", "sarath_datautics"]
        );
    }

    #[test]
    fn test_full_config() {
        let file = write_config(
            r#"{"identities": ["alice", "bob"], "region": "us-east-1", "output_path": "out/r.xlsx"}"#,
        );
        let config = ReportConfig::load_from_path(file.path());

        assert_eq!(config.identities, vec!["alice", "bob"]);
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.output_path, Some(PathBuf::from("out/r.xlsx")));
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let file = write_config(r#"{"region": "eu-west-1"}"#);
        let config = ReportConfig::load_from_path(file.path());

        assert_eq!(config.region, "eu-west-1");
        assert_eq!(config.identities.len(), 3);
        assert_eq!(config.output_path, None);
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let file = write_config("{ identities: nope");
        assert_eq!(
            ReportConfig::load_from_path(file.path()),
            ReportConfig::default()
        );
    }

    #[test]
    fn test_output_path_defaults_to_dated_name() {
        let window = TimeWindow::day_before(Utc.with_ymd_and_hms(2024, 5, 2, 3, 0, 0).unwrap());

        assert_eq!(
            ReportConfig::default().output_path_for(&window),
            PathBuf::from("combined_user_logs_2024-05-01.xlsx")
        );

        let configured = ReportConfig {
            output_path: Some(PathBuf::from("custom.xlsx")),
            ..Default::default()
        };
        assert_eq!(
            configured.output_path_for(&window),
            PathBuf::from("custom.xlsx")
        );
    }
}
