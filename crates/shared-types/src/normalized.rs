//! Renderer-ready series structure

use crate::{ChartKind, Label, NormalizationError};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One numeric field on a point; `None` means absent, the renderer handles the gap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointField {
    pub key: String,
    pub value: Option<f64>,
}

impl PointField {
    pub fn new(key: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A category record: the label plus one field per series (or per view)
///
/// Serializes flat, e.g. `{"category":"t1","Wind":1.0,"Solar":3.0}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub category: Label,
    pub fields: Vec<PointField>,
    /// Inline slice color, only set for pie charts
    pub color: Option<String>,
}

impl ChartPoint {
    pub fn new(category: Label) -> Self {
        Self {
            category,
            fields: Vec::new(),
            color: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Option<f64>) -> Self {
        self.push(key, value);
        self
    }

    /// Set a field, replacing an existing one with the same key
    pub fn push(&mut self, key: impl Into<String>, value: Option<f64>) {
        let key = key.into();
        match self.fields.iter_mut().find(|f| f.key == key) {
            Some(field) => field.value = value,
            None => self.fields.push(PointField { key, value }),
        }
    }

    /// Value of a field, `None` when missing or absent
    pub fn get(&self, key: &str) -> Option<f64> {
        self.fields
            .iter()
            .find(|f| f.key == key)
            .and_then(|f| f.value)
    }

    pub fn has_field(&self, key: &str) -> bool {
        self.fields.iter().any(|f| f.key == key)
    }
}

impl Serialize for ChartPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("category", &self.category)?;
        for field in &self.fields {
            if let Some(value) = field.value {
                map.serialize_entry(&field.key, &value)?;
            }
        }
        if let Some(color) = &self.color {
            map.serialize_entry("color", color)?;
        }
        map.end()
    }
}

/// Axis captions; `None` hides the caption
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisLabels {
    pub x: Option<String>,
    pub y: Option<String>,
}

/// How points carry their values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesLayout {
    /// `value`, `x` and `y` fields on every point
    Single,
    /// One field per series, keyed by series name
    Multi,
    /// Fields passed through from boxplot quartiles
    Quartiles,
}

/// Per-kind instructions for the rendering collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderDirectives {
    pub layout: SeriesLayout,
    /// Bars touch, no inter-bar gap (histograms)
    pub contiguous: bool,
    /// Plot against the numeric `x`/`y` view, labels are tooltip-only (scatter)
    pub numeric_axes: bool,
    /// Color is keyed by slice, read it from each point (pie)
    pub inline_point_colors: bool,
    /// Draw the `max` range overlay (boxplot with ranges)
    pub overlay: bool,
}

impl Default for RenderDirectives {
    fn default() -> Self {
        Self {
            layout: SeriesLayout::Single,
            contiguous: false,
            numeric_axes: false,
            inline_point_colors: false,
            overlay: false,
        }
    }
}

/// Normalized chart ready for the rendering collaborator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedSeries {
    pub kind: ChartKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub points: Vec<ChartPoint>,
    pub series_names: Vec<String>,
    pub colors: Vec<String>,
    pub axis_labels: AxisLabels,
    pub legend_required: bool,
    pub directives: RenderDirectives,
    /// Non-fatal findings such as padded or clipped series
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<NormalizationError>,
}

impl NormalizedSeries {
    pub fn series_count(&self) -> usize {
        self.series_names.len()
    }

    /// Color for series `index`, reusing the list cyclically
    pub fn series_color(&self, index: usize) -> Option<&str> {
        if self.colors.is_empty() {
            return None;
        }
        Some(self.colors[index % self.colors.len()].as_str())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_point_serializes_flat_and_skips_absent() {
        let point = ChartPoint::new(Label::from("t1"))
            .with_field("Wind", Some(1.0))
            .with_field("Solar", None);

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value, json!({ "category": "t1", "Wind": 1.0 }));
    }

    #[test]
    fn test_point_push_replaces_existing_key() {
        let mut point = ChartPoint::new(Label::Number(2.0)).with_field("max", Some(1.0));
        point.push("max", Some(4.0));

        assert_eq!(point.fields.len(), 1);
        assert_eq!(point.get("max"), Some(4.0));
        assert!(point.has_field("max"));
        assert_eq!(point.get("min"), None);
    }

    #[test]
    fn test_pie_point_carries_color() {
        let mut point = ChartPoint::new(Label::from("Hydro")).with_field("value", Some(60.0));
        point.color = Some("#0088FE".to_string());

        let value = serde_json::to_value(&point).unwrap();
        assert_eq!(value["color"], "#0088FE");
    }

    #[test]
    fn test_series_color_cycles() {
        let series = NormalizedSeries {
            kind: ChartKind::Line,
            title: None,
            points: vec![],
            series_names: vec!["a".into(), "b".into(), "c".into()],
            colors: vec!["red".into(), "blue".into()],
            axis_labels: AxisLabels::default(),
            legend_required: true,
            directives: RenderDirectives::default(),
            diagnostics: vec![],
        };

        assert_eq!(series.series_color(2), Some("red"));
        assert_eq!(series.series_count(), 3);

        let json = series.to_json().unwrap();
        assert!(json.contains("\"legendRequired\":true"));
        assert!(!json.contains("diagnostics"));
    }
}
