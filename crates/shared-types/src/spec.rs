//! Visualization payload as sent by the workflow backend, and its decoded form
//!
//! The raw structs accept whatever the backend emits. `VisualizationSpec::decode`
//! runs once at the boundary and settles the series shape into `SeriesData`, so
//! downstream code dispatches on a tag instead of sniffing JSON.

use crate::{ChartKind, Label, NormalizationError, NormalizationResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Untrusted visualization payload
///
/// Every field is kept as raw JSON so that a field of unexpected shape
/// degrades during decoding instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawVisualization {
    #[serde(default)]
    pub kind: Option<Value>,
    #[serde(default)]
    pub labels: Option<Value>,
    #[serde(default)]
    pub values: Option<Value>,
    #[serde(default)]
    pub presentation: Option<Value>,
}

impl RawVisualization {
    /// Pick each field from the first of its accepted keys that is present
    pub fn from_map(fields: &Map<String, Value>) -> Self {
        Self {
            kind: first_present(fields, &["kind", "type", "chartType", "chart_type"]),
            labels: first_present(fields, &["labels"]),
            values: first_present(fields, &["values", "data"]),
            presentation: first_present(fields, &["presentation"]),
        }
    }
}

/// Untrusted presentation hints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPresentation {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub x_label: Option<Value>,
    #[serde(default)]
    pub y_label: Option<Value>,
    #[serde(default)]
    pub color_palette: Option<Value>,
    #[serde(default)]
    pub series_names: Option<Value>,
    #[serde(default)]
    pub quartiles: Option<Value>,
    #[serde(default)]
    pub ranges: Option<Value>,
}

impl RawPresentation {
    /// Lenient decode; anything but an object yields no hints
    pub fn from_value(value: &Value) -> Self {
        let Value::Object(fields) = value else {
            log::warn!(
                "Ignoring presentation hints: expected an object, got {}",
                json_type_name(value)
            );
            return Self::default();
        };

        Self {
            title: first_present(fields, &["title"]),
            x_label: first_present(fields, &["xLabel", "x_label"]),
            y_label: first_present(fields, &["yLabel", "y_label"]),
            color_palette: first_present(fields, &["colorPalette", "colors", "color_palette"]),
            series_names: first_present(fields, &["seriesNames", "series_names"]),
            quartiles: first_present(fields, &["quartiles"]),
            ranges: first_present(fields, &["ranges"]),
        }
    }
}

/// First non-null value among `keys`, in order; redundant spellings never conflict
fn first_present(fields: &Map<String, Value>, keys: &[&str]) -> Option<Value> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find(|value| !value.is_null())
        .cloned()
}

/// Presentation hints with every field resolved to its documented default
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    /// Chart title, none by default
    pub title: Option<String>,
    /// X axis caption, none by default
    pub x_label: Option<String>,
    /// Y axis caption, none by default (histograms substitute their own)
    pub y_label: Option<String>,
    /// Color tokens, blank entries removed; empty means the built-in palette
    pub color_palette: Vec<String>,
    /// Series names by index; blank entries fall back to synthesized names
    pub series_names: Vec<String>,
    /// Boxplot point source, passed through untouched
    pub quartiles: Option<Value>,
    /// Boxplot overlay source, passed through untouched
    pub ranges: Option<Value>,
}

impl Presentation {
    /// Explicit name for series `index`, if one was supplied
    pub fn series_name(&self, index: usize) -> Option<&str> {
        self.series_names
            .get(index)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
    }

    /// Whether any usable series name was supplied
    pub fn has_series_names(&self) -> bool {
        self.series_names.iter().any(|name| !name.trim().is_empty())
    }

    /// Quartiles count as present only when they hold at least one entry
    pub fn has_quartiles(&self) -> bool {
        match &self.quartiles {
            Some(Value::Array(entries)) => !entries.is_empty(),
            Some(Value::Object(entries)) => !entries.is_empty(),
            _ => false,
        }
    }
}

impl From<RawPresentation> for Presentation {
    fn from(raw: RawPresentation) -> Self {
        Self {
            title: raw.title.as_ref().and_then(text_cell),
            x_label: raw.x_label.as_ref().and_then(text_cell),
            y_label: raw.y_label.as_ref().and_then(text_cell),
            color_palette: match raw.color_palette {
                Some(Value::Array(tokens)) => tokens.iter().filter_map(text_cell).collect(),
                _ => Vec::new(),
            },
            // Blank slots are kept so names stay aligned with series indices
            series_names: match raw.series_names {
                Some(Value::Array(names)) => names
                    .iter()
                    .map(|name| text_cell(name).unwrap_or_default())
                    .collect(),
                _ => Vec::new(),
            },
            quartiles: raw.quartiles.filter(|v| !v.is_null()),
            ranges: raw.ranges.filter(|v| !v.is_null()),
        }
    }
}

/// Series values after shape detection; absent cells are `None`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "values", rename_all = "lowercase")]
pub enum SeriesData {
    Single(Vec<Option<f64>>),
    Multi(Vec<Vec<Option<f64>>>),
}

impl SeriesData {
    pub fn series_count(&self) -> usize {
        match self {
            SeriesData::Single(_) => 1,
            SeriesData::Multi(series) => series.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SeriesData::Single(values) => values.is_empty(),
            SeriesData::Multi(series) => series.iter().all(|s| s.is_empty()),
        }
    }
}

/// Decoded, trusted visualization description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationSpec {
    pub kind: ChartKind,
    pub labels: Vec<Label>,
    pub data: SeriesData,
    pub presentation: Presentation,
}

impl VisualizationSpec {
    /// Parse and decode a JSON payload
    pub fn from_json_str(json: &str) -> NormalizationResult<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Decode an already-parsed JSON payload
    pub fn from_value(value: &Value) -> NormalizationResult<Self> {
        let Value::Object(fields) = value else {
            return Err(NormalizationError::malformed(format!(
                "expected an object, got {}",
                json_type_name(value)
            )));
        };
        Self::decode(RawVisualization::from_map(fields))
    }

    /// Settle the raw payload into a tagged spec
    pub fn decode(raw: RawVisualization) -> NormalizationResult<Self> {
        let kind: ChartKind = match &raw.kind {
            Some(Value::String(s)) => s.parse()?,
            None | Some(Value::Null) => return Err(NormalizationError::unknown_kind("")),
            Some(other) => return Err(NormalizationError::unknown_kind(other.to_string())),
        };

        let presentation: Presentation = raw
            .presentation
            .as_ref()
            .filter(|v| !v.is_null())
            .map(|v| RawPresentation::from_value(v).into())
            .unwrap_or_default();

        let labels: Vec<Label> = match &raw.labels {
            Some(Value::Array(cells)) => cells.iter().map(Label::from_json).collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(other) => {
                log::warn!("Ignoring labels: expected an array, got {}", json_type_name(other));
                Vec::new()
            }
        };

        let data = match raw.values {
            None | Some(Value::Null) => SeriesData::Single(Vec::new()),
            Some(Value::Array(cells)) => decode_series(&cells),
            Some(other) => {
                return Err(NormalizationError::malformed(format!(
                    "values must be an array, got {}",
                    json_type_name(&other)
                )))
            }
        };

        let quartile_source = kind == ChartKind::Boxplot && presentation.has_quartiles();
        if data.is_empty() && !quartile_source {
            return Err(NormalizationError::EmptySeries);
        }

        log::debug!(
            "Decoded {} visualization: {} labels, {} series",
            kind,
            labels.len(),
            data.series_count()
        );

        Ok(Self {
            kind,
            labels,
            data,
            presentation,
        })
    }

    pub fn series_count(&self) -> usize {
        self.data.series_count()
    }
}

/// Shape is fixed by the first cell: an array there means one series per entry
fn decode_series(cells: &[Value]) -> SeriesData {
    match cells.first() {
        Some(Value::Array(_)) => SeriesData::Multi(
            cells
                .iter()
                .enumerate()
                .map(|(index, cell)| match cell {
                    Value::Array(inner) => inner.iter().map(numeric_cell).collect(),
                    other => {
                        log::warn!(
                            "Series {} is {} in a multi-series payload, treating it as empty",
                            index,
                            json_type_name(other)
                        );
                        Vec::new()
                    }
                })
                .collect(),
        ),
        _ => SeriesData::Single(cells.iter().map(numeric_cell).collect()),
    }
}

/// Numbers and numeric strings survive, anything else is an absent cell
pub fn numeric_cell(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Non-blank text, numbers rendered as text
fn text_cell(cell: &Value) -> Option<String> {
    match cell {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
