//! Shared types for the chat chart adapter
//!
//! This crate contains the types passed between the config system, the
//! normalizer and the browser bridge: the loosely-typed visualization payload
//! the workflow backend sends, its decoded form, and the renderer-ready
//! series structure produced from it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod errors;
pub mod normalized;
pub mod spec;

pub use errors::{NormalizationError, NormalizationResult, UnsupportedKind};
pub use normalized::{AxisLabels, ChartPoint, NormalizedSeries, PointField, RenderDirectives, SeriesLayout};
pub use spec::{numeric_cell, Presentation, RawPresentation, RawVisualization, SeriesData, VisualizationSpec};

/// Chart kinds the renderer knows how to draw
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Boxplot,
    Scatter,
    Histogram,
    Timeseries,
}

impl ChartKind {
    pub const ALL: [ChartKind; 7] = [
        ChartKind::Line,
        ChartKind::Bar,
        ChartKind::Pie,
        ChartKind::Boxplot,
        ChartKind::Scatter,
        ChartKind::Histogram,
        ChartKind::Timeseries,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Line => "line",
            ChartKind::Bar => "bar",
            ChartKind::Pie => "pie",
            ChartKind::Boxplot => "boxplot",
            ChartKind::Scatter => "scatter",
            ChartKind::Histogram => "histogram",
            ChartKind::Timeseries => "timeseries",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = NormalizationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartKind::Line),
            "bar" => Ok(ChartKind::Bar),
            "pie" => Ok(ChartKind::Pie),
            "boxplot" | "box" | "box_plot" => Ok(ChartKind::Boxplot),
            "scatter" => Ok(ChartKind::Scatter),
            "histogram" => Ok(ChartKind::Histogram),
            "timeseries" | "time_series" => Ok(ChartKind::Timeseries),
            _ => Err(NormalizationError::unknown_kind(s)),
        }
    }
}

/// Category label, either text or a number as sent by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Label {
    Number(f64),
    Text(String),
}

impl Label {
    /// Lenient conversion from an arbitrary JSON cell
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Number(n) => match n.as_f64() {
                Some(v) => Label::Number(v),
                None => Label::Text(n.to_string()),
            },
            serde_json::Value::String(s) => Label::Text(s.clone()),
            serde_json::Value::Null => Label::Text(String::new()),
            other => Label::Text(other.to_string()),
        }
    }

    /// Numeric view of the label, used for the scatter x axis
    pub fn numeric(&self) -> Option<f64> {
        match self {
            Label::Number(v) => Some(*v),
            Label::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Key used when quartiles are keyed by category
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Number(v) => write!(f, "{}", v),
            Label::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Label::Text(s.to_string())
    }
}

impl From<f64> for Label {
    fn from(v: f64) -> Self {
        Label::Number(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_kind_parsing() {
        assert_eq!("line".parse::<ChartKind>().unwrap(), ChartKind::Line);
        assert_eq!(" Pie ".parse::<ChartKind>().unwrap(), ChartKind::Pie);
        assert_eq!("box_plot".parse::<ChartKind>().unwrap(), ChartKind::Boxplot);
        assert_eq!("TIME_SERIES".parse::<ChartKind>().unwrap(), ChartKind::Timeseries);

        let err = "foo".parse::<ChartKind>().unwrap_err();
        assert_eq!(
            err,
            NormalizationError::UnsupportedKind(UnsupportedKind::Unknown {
                kind: "foo".to_string()
            })
        );
    }

    #[test]
    fn test_chart_kind_round_trips_through_display() {
        for kind in ChartKind::ALL {
            assert_eq!(kind.to_string().parse::<ChartKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_label_numeric_view() {
        assert_eq!(Label::from("Jan").numeric(), None);
        assert_eq!(Label::from(" 2020 ").numeric(), Some(2020.0));
        assert_eq!(Label::Number(3.5).numeric(), Some(3.5));
        assert_eq!(Label::from("NaN").numeric(), None);
    }

    #[test]
    fn test_label_from_json() {
        assert_eq!(Label::from_json(&serde_json::json!("t1")), Label::from("t1"));
        assert_eq!(Label::from_json(&serde_json::json!(7)), Label::Number(7.0));
        assert_eq!(Label::from_json(&serde_json::json!(null)), Label::from(""));
        assert_eq!(Label::from_json(&serde_json::json!(true)), Label::from("true"));
    }
}
