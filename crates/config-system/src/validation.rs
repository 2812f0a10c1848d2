//! Configuration validation utilities

use crate::{ConfigError, NormalizerConfig, Result};
use std::collections::HashSet;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration
    pub fn validate(config: &NormalizerConfig) -> Result<()> {
        Self::validate_palette(&config.default_palette)?;

        if config.series_name_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Series name prefix cannot be empty".to_string(),
            ));
        }

        for (field, text) in [
            ("unsupported_fallback", &config.unsupported_fallback),
            ("empty_fallback", &config.empty_fallback),
            ("malformed_fallback", &config.malformed_fallback),
        ] {
            if text.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "Fallback text '{}' cannot be empty",
                    field
                )));
            }
        }

        Ok(())
    }

    /// Validate the default palette
    fn validate_palette(palette: &[String]) -> Result<()> {
        if palette.is_empty() {
            return Err(ConfigError::Validation(
                "Default palette cannot be empty".to_string(),
            ));
        }

        if let Some(index) = palette.iter().position(|token| token.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "Default palette entry {} is blank",
                index
            )));
        }

        let distinct: HashSet<&str> = palette.iter().map(|token| token.as_str()).collect();
        if distinct.len() < palette.len() {
            log::warn!(
                "Default palette repeats colors; series {} and later may share a color with earlier ones",
                distinct.len()
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_palette_rejected() {
        let config = NormalizerConfig {
            default_palette: vec![],
            ..NormalizerConfig::default()
        };
        assert!(matches!(
            ConfigValidator::validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_blank_palette_token_rejected() {
        let config = NormalizerConfig {
            default_palette: vec!["#000".to_string(), " ".to_string()],
            ..NormalizerConfig::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_blank_prefix_and_fallbacks_rejected() {
        let config = NormalizerConfig {
            series_name_prefix: "".to_string(),
            ..NormalizerConfig::default()
        };
        assert!(ConfigValidator::validate(&config).is_err());

        let config = NormalizerConfig {
            empty_fallback: "  ".to_string(),
            ..NormalizerConfig::default()
        };
        let err = ConfigValidator::validate(&config).unwrap_err();
        assert!(err.to_string().contains("empty_fallback"));
    }

    #[test]
    fn test_duplicate_colors_only_warn() {
        let _ = env_logger::builder().is_test(true).try_init();

        let config = NormalizerConfig {
            default_palette: vec!["red".to_string(), "red".to_string()],
            ..NormalizerConfig::default()
        };
        assert!(ConfigValidator::validate(&config).is_ok());
    }
}
