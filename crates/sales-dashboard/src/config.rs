//! Configuration for the sales dashboard

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants;
use crate::dashboard::DisplaySettings;

// =============================================================================
// File-based Configuration (dashboard.toml)
// =============================================================================

/// Configuration loaded from dashboard.toml
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the sales export is read from and reports are written to
#[derive(Debug, Default, Deserialize)]
pub struct DataConfig {
    /// Sales CSV export
    #[serde(default)]
    pub sales_csv: Option<String>,
    /// Directory for generated reports
    #[serde(default)]
    pub output_dir: Option<String>,
}

/// Presentation overrides
#[derive(Debug, Default, Deserialize)]
pub struct DisplayConfig {
    #[serde(default)]
    pub currency_symbol: Option<String>,
    #[serde(default)]
    pub top_products: Option<usize>,
    #[serde(default)]
    pub top_customers: Option<usize>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content).with_context(|| {
            format!(
                "Failed to parse {}. Check for:\n\
                 - Invalid TOML syntax (missing quotes, brackets, etc.)\n\
                 - Incorrect data types (top_products must be a number)\n\n\
                 See dashboard.toml.example for the expected format.",
                path.display()
            )
        })
    }

    /// Load configuration, falling back to defaults when the file does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Resolved configuration: file values, then command-line overrides, then defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Sales CSV export
    pub sales_csv: PathBuf,
    /// Directory for generated reports
    pub output_dir: PathBuf,
    /// Currency symbol and ranking sizes
    pub display: DisplaySettings,
}

impl Config {
    /// Create config from file config and optional command-line overrides
    pub fn from_file(
        file_config: &FileConfig,
        sales_csv: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let display = &file_config.display;
        let defaults = DisplaySettings::default();

        let top_products = display.top_products.unwrap_or(defaults.top_products);
        let top_customers = display.top_customers.unwrap_or(defaults.top_customers);
        if top_products == 0 || top_customers == 0 {
            bail!("display.top_products and display.top_customers must be at least 1");
        }

        let currency_symbol = display
            .currency_symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map_or(defaults.currency_symbol, str::to_string);

        Ok(Self {
            sales_csv: sales_csv
                .or_else(|| file_config.data.sales_csv.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_SALES_CSV)),

            output_dir: output_dir
                .or_else(|| file_config.data.output_dir.as_ref().map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(constants::DEFAULT_OUTPUT_DIR)),

            display: DisplaySettings {
                currency_symbol,
                top_products,
                top_customers,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let file_config = FileConfig::parse("").unwrap();
        let config = Config::from_file(&file_config, None, None).unwrap();

        assert_eq!(config.sales_csv, PathBuf::from("./data/vendas.csv"));
        assert_eq!(config.output_dir, PathBuf::from("./output"));
        assert_eq!(config.display, DisplaySettings::default());
    }

    #[test]
    fn test_file_values() {
        let file_config = FileConfig::parse(
            r#"
            [data]
            sales_csv = "exports/2024.csv"
            output_dir = "reports"

            [display]
            currency_symbol = "US$"
            top_products = 5
            top_customers = 15
            "#,
        )
        .unwrap();
        let config = Config::from_file(&file_config, None, None).unwrap();

        assert_eq!(config.sales_csv, PathBuf::from("exports/2024.csv"));
        assert_eq!(config.output_dir, PathBuf::from("reports"));
        assert_eq!(config.display.currency_symbol, "US$");
        assert_eq!(config.display.top_products, 5);
        assert_eq!(config.display.top_customers, 15);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file_config = FileConfig::parse("[data]\nsales_csv = \"a.csv\"\n").unwrap();
        let config = Config::from_file(
            &file_config,
            Some(PathBuf::from("b.csv")),
            Some(PathBuf::from("out")),
        )
        .unwrap();

        assert_eq!(config.sales_csv, PathBuf::from("b.csv"));
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_zero_top_n_rejected() {
        let file_config = FileConfig::parse("[display]\ntop_customers = 0\n").unwrap();
        assert!(Config::from_file(&file_config, None, None).is_err());
    }

    #[test]
    fn test_blank_symbol_falls_back() {
        let file_config = FileConfig::parse("[display]\ncurrency_symbol = \"  \"\n").unwrap();
        let config = Config::from_file(&file_config, None, None).unwrap();
        assert_eq!(config.display.currency_symbol, "R$");
    }

    #[test]
    fn test_invalid_types_rejected() {
        assert!(FileConfig::parse("[display]\ntop_products = \"ten\"\n").is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let file_config = FileConfig::load_or_default(Path::new("/nonexistent/dashboard.toml")).unwrap();
        assert!(file_config.data.sales_csv.is_none());
    }
}
