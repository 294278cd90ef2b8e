use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_REPORT_SIZE: usize = 1000;

/// Runtime configuration
///
/// Every key is optional in the config file; missing keys fall back to the
/// built-in defaults, keys present in the file win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Maximum number of endpoints in a report
    #[serde(rename = "REPORT_SIZE")]
    pub report_size: usize,

    /// Where rendered reports are written
    #[serde(rename = "REPORT_DIR", alias = "reports")]
    pub reports_dir: PathBuf,

    /// Where access logs are looked up
    #[serde(rename = "LOG_DIR", alias = "log")]
    pub log_dir: PathBuf,

    /// Log file for the tool's own output; stderr when unset
    #[serde(rename = "LOGGING", alias = "logging")]
    pub logging: Option<PathBuf>,

    /// HTML template holding the `$table_json` placeholder
    #[serde(rename = "TEMPLATE", alias = "template")]
    pub template: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: DEFAULT_REPORT_SIZE,
            reports_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            logging: None,
            template: PathBuf::from("./report_template.html"),
        }
    }
}

impl Config {
    /// Load a config file and merge it over the defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| match e {
            Error::Config(msg) => Error::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    /// Parse config JSON and merge it over the defaults
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("malformed config: {e}")))?;

        tracing::debug!("Loaded configuration: {:?}", config);

        Ok(config)
    }
}
