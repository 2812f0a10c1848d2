//! Workflow backend chat response
//!
//! The backend answers with `{text, tables, columns, query|sql_query,
//! visualization}`. `visualization` may be an object, a JSON-encoded string,
//! null or missing; an unreadable string is dropped so the text still renders.

use crate::ChartSpecNormalizer;
use chat_charts_shared::{NormalizationError, NormalizedSeries};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Structured assistant message as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub text: String,
    pub tables: Vec<Value>,
    pub columns: Vec<Value>,
    pub sql_query: String,
    pub visualization: Option<Value>,
}

/// What the message renderer should draw below the text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ChartOutcome {
    /// No visualization attached, draw nothing
    None,
    /// Chart ready for the renderer
    Chart { chart: NormalizedSeries },
    /// Visible placeholder in place of the chart
    Fallback {
        message: String,
        error: NormalizationError,
    },
}

impl ChartOutcome {
    pub fn chart(&self) -> Option<&NormalizedSeries> {
        match self {
            ChartOutcome::Chart { chart } => Some(chart),
            _ => None,
        }
    }
}

impl ChatResponse {
    /// Decode a raw response body; a body that is not JSON becomes plain text
    pub fn from_json_str(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                log::warn!("Backend response is not JSON ({}), using it as text", e);
                Self {
                    text: body.to_string(),
                    ..Self::default()
                }
            }
        }
    }

    /// Decode a parsed response body
    pub fn from_value(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return Self {
                text: match value {
                    Value::String(s) => s.clone(),
                    Value::Null => String::new(),
                    other => other.to_string(),
                },
                ..Self::default()
            };
        };

        let text_field = |key: &str| fields.get(key).and_then(Value::as_str).map(str::to_string);
        let list_field = |key: &str| match fields.get(key) {
            Some(Value::Array(items)) => items.clone(),
            _ => Vec::new(),
        };

        Self {
            text: text_field("text").unwrap_or_default(),
            tables: list_field("tables"),
            columns: list_field("columns"),
            sql_query: text_field("query")
                .or_else(|| text_field("sql_query"))
                .unwrap_or_default(),
            visualization: fields.get("visualization").and_then(decode_visualization),
        }
    }

    pub fn has_visualization(&self) -> bool {
        self.visualization.is_some()
    }

    /// Chart to draw for this message
    pub fn chart(&self, normalizer: &ChartSpecNormalizer) -> ChartOutcome {
        normalizer.outcome(self.visualization.as_ref())
    }
}

fn decode_visualization(value: &Value) -> Option<Value> {
    match value {
        Value::Object(_) => Some(value.clone()),
        Value::String(encoded) => match serde_json::from_str::<Value>(encoded) {
            Ok(decoded @ Value::Object(_)) => Some(decoded),
            Ok(Value::Null) => None,
            Ok(other) => {
                log::warn!("Ignoring visualization: decoded to {}, not an object", other);
                None
            }
            Err(e) => {
                log::warn!("Ignoring visualization: {}", e);
                None
            }
        },
        Value::Null => None,
        other => {
            log::warn!("Ignoring visualization of unexpected shape: {}", other);
            None
        }
    }
}
