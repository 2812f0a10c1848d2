//! Error taxonomy for chart normalization
//! Every variant is recoverable: callers degrade to a placeholder, never abort the message

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a chart kind cannot be drawn
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason")]
pub enum UnsupportedKind {
    #[error("unknown chart kind '{kind}'")]
    Unknown { kind: String },

    #[error("pie charts take a single series, got {series}")]
    PieMultiSeries { series: usize },
}

/// Base error type for visualization normalization
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum NormalizationError {
    #[error("Unsupported chart: {0}")]
    UnsupportedKind(UnsupportedKind),

    #[error("Visualization carries no labels or values")]
    EmptySeries,

    /// Informational: the series was padded or clipped to the label count
    #[error("Series {series} has {actual} values for {expected} labels")]
    LengthMismatch {
        series: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Malformed visualization payload: {message}")]
    MalformedPayload { message: String },
}

impl NormalizationError {
    pub fn unknown_kind(kind: impl Into<String>) -> Self {
        NormalizationError::UnsupportedKind(UnsupportedKind::Unknown { kind: kind.into() })
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        NormalizationError::MalformedPayload {
            message: message.into(),
        }
    }

    /// Whether this error prevents the chart from being drawn at all
    pub fn is_fatal(&self) -> bool {
        !matches!(self, NormalizationError::LengthMismatch { .. })
    }

    /// Default placeholder text shown in place of the chart
    pub fn fallback_message(&self) -> &'static str {
        match self {
            NormalizationError::UnsupportedKind(_) => "chart type not supported",
            NormalizationError::EmptySeries => "no chart data available",
            NormalizationError::LengthMismatch { .. } => "chart data is incomplete",
            NormalizationError::MalformedPayload { .. } => "chart data could not be read",
        }
    }

    /// Convert to JSON string for JavaScript
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"type":"MalformedPayload","details":{"message":"Failed to serialize error"}}"#
                .to_string()
        })
    }
}

impl From<serde_json::Error> for NormalizationError {
    fn from(err: serde_json::Error) -> Self {
        NormalizationError::MalformedPayload {
            message: err.to_string(),
        }
    }
}

/// Result type alias for normalization operations
pub type NormalizationResult<T> = Result<T, NormalizationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = NormalizationError::UnsupportedKind(UnsupportedKind::PieMultiSeries { series: 2 });

        let json = error.to_json();
        assert!(json.contains("UnsupportedKind"));
        assert!(json.contains("PieMultiSeries"));

        let back: NormalizationError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, error);
    }

    #[test]
    fn test_length_mismatch_is_not_fatal() {
        let warning = NormalizationError::LengthMismatch {
            series: 1,
            expected: 3,
            actual: 2,
        };
        assert!(!warning.is_fatal());
        assert!(NormalizationError::EmptySeries.is_fatal());
        assert!(NormalizationError::unknown_kind("foo").is_fatal());
    }

    #[test]
    fn test_fallback_messages() {
        assert_eq!(
            NormalizationError::unknown_kind("radar").fallback_message(),
            "chart type not supported"
        );
        assert_eq!(
            NormalizationError::EmptySeries.fallback_message(),
            "no chart data available"
        );
    }

    #[test]
    fn test_error_conversion() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: NormalizationError = parse_err.into();

        match err {
            NormalizationError::MalformedPayload { message } => {
                assert!(!message.is_empty());
            }
            _ => panic!("Wrong error variant"),
        }
    }
}
