//! TOML-based runtime configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::tariff::{DEFAULT_TARIFF, Tariff};

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults. Load from TOML with
/// [`AppConfig::from_toml_file`] or use [`AppConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Pricing parameters.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Where exported tables are written.
    #[serde(default)]
    pub export: ExportConfig,
}

/// Pricing parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Standard price per kWh (must be >= 0).
    pub rate: f64,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            rate: DEFAULT_TARIFF,
        }
    }
}

/// Export destinations. Unset paths mean "don't write".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportConfig {
    /// Annotated table as an XLSX workbook.
    pub xlsx_path: Option<PathBuf>,
    /// Annotated table as CSV.
    pub csv_path: Option<PathBuf>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"tariff.rate"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl AppConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "config".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = Tariff::new(self.tariff.rate) {
            errors.push(e);
        }

        let ex = &self.export;
        if let Some(path) = &ex.xlsx_path {
            if !has_extension(path, "xlsx") {
                errors.push(ConfigError {
                    field: "export.xlsx_path".into(),
                    message: format!("must end in .xlsx, got \"{}\"", path.display()),
                });
            }
        }
        if let Some(path) = &ex.csv_path {
            if !has_extension(path, "csv") {
                errors.push(ConfigError {
                    field: "export.csv_path".into(),
                    message: format!("must end in .csv, got \"{}\"", path.display()),
                });
            }
        }

        errors
    }

    /// The configured tariff, once [`validate`](Self::validate) has passed.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the rate is negative or not finite.
    pub fn tariff(&self) -> Result<Tariff, ConfigError> {
        Tariff::new(self.tariff.rate)
    }
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}
