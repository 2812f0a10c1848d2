//! Chart spec normalizer
//!
//! Turns the visualization payload attached to an assistant message into a
//! renderer-ready [`NormalizedSeries`]: points, series names, colors, axis
//! captions and per-kind directives. Normalization is pure; calling it twice on
//! the same spec yields the same output.

use chat_charts_config::{directive_for, AxisPolicy, ColorRule, FanOut, KindDirective, NormalizerConfig};
use chat_charts_shared::{
    AxisLabels, ChartPoint, NormalizationError, NormalizationResult, NormalizedSeries, Presentation,
    RenderDirectives, SeriesData, SeriesLayout, UnsupportedKind, VisualizationSpec,
};
use serde_json::Value;

pub mod boxplot;
pub mod envelope;
pub mod fan_out;
pub mod palette;

pub use envelope::{ChartOutcome, ChatResponse};

/// Series shape after the kind's fan-out rule has been applied
#[derive(Clone, Copy)]
enum Plan<'a> {
    Single(&'a [Option<f64>]),
    Multi(&'a [Vec<Option<f64>>]),
}

impl<'a> Plan<'a> {
    fn series_count(&self) -> usize {
        match self {
            Plan::Single(_) => 1,
            Plan::Multi(series) => series.len(),
        }
    }

    fn series(&self) -> Box<dyn Iterator<Item = &'a [Option<f64>]> + 'a> {
        match *self {
            Plan::Single(values) => Box::new(std::iter::once(values)),
            Plan::Multi(series) => Box::new(series.iter().map(Vec::as_slice)),
        }
    }

    fn max_len(&self) -> usize {
        self.series().map(<[Option<f64>]>::len).max().unwrap_or(0)
    }
}

/// Normalizes visualization specs under a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct ChartSpecNormalizer {
    config: NormalizerConfig,
}

impl ChartSpecNormalizer {
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize a decoded spec
    pub fn normalize(&self, spec: &VisualizationSpec) -> NormalizationResult<NormalizedSeries> {
        let directive = directive_for(spec.kind);
        let presentation = &spec.presentation;

        let quartiles = presentation
            .quartiles
            .as_ref()
            .filter(|_| directive.quartile_source && presentation.has_quartiles());

        // Specs built by hand skip decoding, so emptiness is checked here too
        if quartiles.is_none() && spec.data.is_empty() {
            return Err(NormalizationError::EmptySeries);
        }

        let plan = Self::plan(directive, &spec.data)?;

        // The kept series of a collapsed multi payload may itself be empty
        if quartiles.is_none() && plan.max_len() == 0 {
            return Err(NormalizationError::EmptySeries);
        }

        let series_count = if quartiles.is_some() { 1 } else { plan.series_count() };
        let series_names = palette::resolve_series_names(presentation, &self.config, series_count);

        let (labels, mut points, layout, diagnostics) = match (quartiles, plan) {
            (Some(quartiles), _) => {
                let points = boxplot::quartile_points(quartiles, &spec.labels);
                let labels: Vec<_> = points.iter().map(|p| p.category.clone()).collect();
                let entries = boxplot::quartile_count(quartiles);
                let diagnostics = if spec.labels.is_empty() || entries == spec.labels.len() {
                    Vec::new()
                } else {
                    vec![NormalizationError::LengthMismatch {
                        series: 0,
                        expected: spec.labels.len(),
                        actual: entries,
                    }]
                };
                (labels, points, SeriesLayout::Quartiles, diagnostics)
            }
            (None, Plan::Single(values)) => {
                let labels = fan_out::resolve_labels(&spec.labels, plan.max_len());
                let diagnostics = fan_out::length_diagnostics(plan.series(), labels.len());
                let points = fan_out::single_points(&labels, values);
                (labels, points, SeriesLayout::Single, diagnostics)
            }
            (None, Plan::Multi(series)) => {
                let labels = fan_out::resolve_labels(&spec.labels, plan.max_len());
                let diagnostics = fan_out::length_diagnostics(plan.series(), labels.len());
                let points = fan_out::multi_points(&labels, series, &series_names);
                (labels, points, SeriesLayout::Multi, diagnostics)
            }
        };

        let overlay = match presentation.ranges.as_ref().filter(|_| directive.range_overlay) {
            Some(ranges) => {
                // A missing range entry leaves the point's own max alone
                for (i, (point, label)) in points.iter_mut().zip(&labels).enumerate() {
                    if let Some(max) = boxplot::range_max(ranges, i, label) {
                        point.push("max", Some(max));
                    }
                }
                true
            }
            None => false,
        };

        let tokens = palette::effective_palette(presentation, &self.config);
        let colors = palette::resolve_colors(tokens, directive.colors.slots(series_count, points.len()));
        if directive.colors == ColorRule::PerCategory {
            assign_point_colors(&mut points, &colors);
        }

        log::debug!(
            "Normalized {} chart: {} points, {} series",
            spec.kind,
            points.len(),
            series_count
        );

        Ok(NormalizedSeries {
            kind: spec.kind,
            title: presentation.title.clone(),
            points,
            legend_required: series_count > 1 || presentation.has_series_names(),
            series_names,
            colors,
            axis_labels: axis_labels(directive.axes, presentation),
            directives: RenderDirectives {
                layout,
                contiguous: directive.contiguous,
                numeric_axes: directive.numeric_axes,
                inline_point_colors: directive.colors == ColorRule::PerCategory,
                overlay,
            },
            diagnostics,
        })
    }

    /// Decode and normalize a parsed JSON payload
    pub fn normalize_value(&self, payload: &Value) -> NormalizationResult<NormalizedSeries> {
        let spec = VisualizationSpec::from_value(payload)?;
        self.normalize(&spec)
    }

    /// Decode and normalize a JSON string payload
    pub fn normalize_json(&self, payload: &str) -> NormalizationResult<NormalizedSeries> {
        let spec = VisualizationSpec::from_json_str(payload)?;
        self.normalize(&spec)
    }

    /// Outcome for an optional payload, as the message pipeline consumes it
    pub fn outcome(&self, payload: Option<&Value>) -> ChartOutcome {
        let Some(payload) = payload.filter(|v| !v.is_null()) else {
            return ChartOutcome::None;
        };

        match self.normalize_value(payload) {
            Ok(chart) => ChartOutcome::Chart { chart },
            Err(error) => {
                log::warn!("Visualization replaced by placeholder: {}", error);
                ChartOutcome::Fallback {
                    message: self.fallback_text(&error).to_string(),
                    error,
                }
            }
        }
    }

    /// Placeholder text for a failed chart, taken from the configuration
    pub fn fallback_text(&self, error: &NormalizationError) -> &str {
        match error {
            NormalizationError::UnsupportedKind(_) => self.config.unsupported_fallback.as_str(),
            NormalizationError::EmptySeries => self.config.empty_fallback.as_str(),
            NormalizationError::MalformedPayload { .. } => self.config.malformed_fallback.as_str(),
            NormalizationError::LengthMismatch { .. } => error.fallback_message(),
        }
    }

    /// Apply the kind's fan-out rule to the decoded series
    fn plan<'a>(directive: &KindDirective, data: &'a SeriesData) -> NormalizationResult<Plan<'a>> {
        match (data, directive.fan_out) {
            (SeriesData::Single(values), _) => Ok(Plan::Single(values)),
            (SeriesData::Multi(series), FanOut::MultiOrSingle) => Ok(Plan::Multi(series)),
            (SeriesData::Multi(series), FanOut::RejectMulti) if series.len() > 1 => Err(
                NormalizationError::UnsupportedKind(UnsupportedKind::PieMultiSeries {
                    series: series.len(),
                }),
            ),
            (SeriesData::Multi(series), fan_out) => {
                if fan_out == FanOut::SingleOnly && series.len() > 1 {
                    log::warn!(
                        "{} charts plot a single series, dropping {} extra",
                        directive.kind,
                        series.len() - 1
                    );
                }
                Ok(Plan::Single(series.first().map(Vec::as_slice).unwrap_or(&[])))
            }
        }
    }
}

/// Normalize with the default configuration
pub fn normalize(spec: &VisualizationSpec) -> NormalizationResult<NormalizedSeries> {
    ChartSpecNormalizer::default().normalize(spec)
}

fn axis_labels(policy: AxisPolicy, presentation: &Presentation) -> AxisLabels {
    match policy {
        AxisPolicy::Presentation => AxisLabels {
            x: presentation.x_label.clone(),
            y: presentation.y_label.clone(),
        },
        AxisPolicy::PresentationWithYDefault(y_default) => AxisLabels {
            x: presentation.x_label.clone(),
            y: presentation
                .y_label
                .clone()
                .or_else(|| Some(y_default.to_string())),
        },
        AxisPolicy::Hidden => AxisLabels::default(),
    }
}

/// Pie slices carry their own color
fn assign_point_colors(points: &mut [ChartPoint], colors: &[String]) {
    for (point, color) in points.iter_mut().zip(colors) {
        point.color = Some(color.clone());
    }
}
