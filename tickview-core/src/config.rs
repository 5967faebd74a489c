//! Explorer configuration, read from TOML.
//!
//! ```toml
//! [data]
//! path = "data.csv"
//! date_format = "%d/%m/%Y"
//!
//! [data.columns]
//! instrument = "Ticker"
//!
//! [view]
//! window_weeks = 12
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::{ColumnNames, CsvOptions};
use crate::domain::DEFAULT_WINDOW_WEEKS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub data: DataConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// CSV file to load. The CLI's `--data` flag takes precedence.
    pub path: Option<PathBuf>,
    pub date_format: String,
    pub columns: ColumnNames,
}

impl Default for DataConfig {
    fn default() -> Self {
        let csv = CsvOptions::default();
        Self {
            path: None,
            date_format: csv.date_format,
            columns: csv.columns,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Length of the initial date window, ending at the latest date.
    pub window_weeks: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            window_weeks: DEFAULT_WINDOW_WEEKS,
        }
    }
}

impl ExplorerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn csv_options(&self) -> CsvOptions {
        CsvOptions {
            date_format: self.data.date_format.clone(),
            columns: self.data.columns.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = ExplorerConfig::from_toml("").unwrap();
        assert_eq!(cfg, ExplorerConfig::default());
        assert_eq!(cfg.view.window_weeks, 12);
        assert_eq!(cfg.csv_options(), CsvOptions::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = ExplorerConfig::from_toml(
            r#"
            [data]
            path = "prices.csv"
            date_format = "%Y-%m-%d"

            [data.columns]
            instrument = "Symbol"

            [view]
            window_weeks = 4
            "#,
        )
        .unwrap();

        assert_eq!(cfg.data.path, Some(PathBuf::from("prices.csv")));
        assert_eq!(cfg.data.columns.instrument, "Symbol");
        assert_eq!(cfg.data.columns.close, "Close");
        assert_eq!(cfg.view.window_weeks, 4);
        assert_eq!(cfg.csv_options().date_format, "%Y-%m-%d");
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = ExplorerConfig::from_toml("[view]\nwindow_weeks = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = ExplorerConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(ExplorerConfig::from_toml(&text).unwrap(), cfg);
    }
}
