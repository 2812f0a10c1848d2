//! Configuration system for the chat chart adapter
//! Holds the per-kind directive table, the default palette and the normalizer settings

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod directives;
pub mod parser;
pub mod validation;

pub use directives::{directive_for, AxisPolicy, ColorRule, FanOut, KindDirective};
pub use parser::{ConfigFormat, ConfigParser, ConfigSerializer, TemplateExpander};
pub use validation::ConfigValidator;

/// Built-in palette used when the backend supplies no colors
pub const DEFAULT_PALETTE: [&str; 8] = [
    "#8884d8", "#82ca9d", "#ffc658", "#ff7300", "#0088FE", "#00C49F", "#FFBB28", "#FF8042",
];

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(String),

    #[error("Config validation error: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Settings for the chart normalizer
///
/// Every field has a default, so a partial file only overrides what it names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizerConfig {
    /// Palette used when a visualization supplies none
    pub default_palette: Vec<String>,
    /// Prefix for synthesized series names, `"{prefix} {n}"`
    pub series_name_prefix: String,
    /// Placeholder for unsupported chart kinds
    pub unsupported_fallback: String,
    /// Placeholder when a visualization has nothing to plot
    pub empty_fallback: String,
    /// Placeholder when the payload cannot be read at all
    pub malformed_fallback: String,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            default_palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
            series_name_prefix: "Series".to_string(),
            unsupported_fallback: "chart type not supported".to_string(),
            empty_fallback: "no chart data available".to_string(),
            malformed_fallback: "chart data could not be read".to_string(),
        }
    }
}

impl NormalizerConfig {
    /// Load, expand `${VAR}` references, and validate a config file
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ConfigParser::parse_file(path)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Synthesized name for series `index`, 1-indexed
    pub fn synthesized_name(&self, index: usize) -> String {
        format!("{} {}", self.series_name_prefix, index + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = NormalizerConfig::default();
        assert_eq!(config.default_palette.len(), 8);
        assert_eq!(config.synthesized_name(0), "Series 1");
        assert_eq!(config.synthesized_name(1), "Series 2");
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
