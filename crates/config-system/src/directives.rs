//! Per-kind rendering directives
//!
//! One declarative record per chart kind: how series fan out, how colors are
//! assigned, which axis captions apply and which special flags the renderer
//! gets. The normalizer looks the record up and runs the same code for every kind.

use chat_charts_shared::ChartKind;
use serde::Serialize;

/// How a kind treats multi-series payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FanOut {
    /// One field per series when the payload is multi-series
    MultiOrSingle,
    /// Only the first series is plotted
    SingleOnly,
    /// More than one series is an error
    RejectMulti,
}

/// How colors are assigned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorRule {
    /// One color per series
    PerSeries,
    /// First palette color only
    First,
    /// One color per point, carried inline
    PerCategory,
    /// Body and range overlay
    BodyAndOverlay,
}

impl ColorRule {
    /// Number of palette slots the rule consumes
    pub fn slots(&self, series_count: usize, point_count: usize) -> usize {
        match self {
            ColorRule::PerSeries => series_count.max(1),
            ColorRule::First => 1,
            ColorRule::PerCategory => point_count.max(1),
            ColorRule::BodyAndOverlay => 2,
        }
    }
}

/// Where axis captions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AxisPolicy {
    /// Presentation `xLabel`/`yLabel`, absent when unset
    Presentation,
    /// Presentation captions with a fallback for the y axis
    PresentationWithYDefault(&'static str),
    /// No axes are drawn
    Hidden,
}

/// Directive record for one chart kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KindDirective {
    pub kind: ChartKind,
    pub fan_out: FanOut,
    pub colors: ColorRule,
    pub axes: AxisPolicy,
    /// Zero gap between bars
    pub contiguous: bool,
    /// Plot the numeric `x`/`y` view
    pub numeric_axes: bool,
    /// `presentation.quartiles` replaces the value points when present
    pub quartile_source: bool,
    /// `presentation.ranges` adds a `max` overlay when present
    pub range_overlay: bool,
}

static DIRECTIVES: [KindDirective; 7] = [
    KindDirective {
        kind: ChartKind::Line,
        fan_out: FanOut::MultiOrSingle,
        colors: ColorRule::PerSeries,
        axes: AxisPolicy::Presentation,
        contiguous: false,
        numeric_axes: false,
        quartile_source: false,
        range_overlay: false,
    },
    KindDirective {
        kind: ChartKind::Bar,
        fan_out: FanOut::MultiOrSingle,
        colors: ColorRule::PerSeries,
        axes: AxisPolicy::Presentation,
        contiguous: false,
        numeric_axes: false,
        quartile_source: false,
        range_overlay: false,
    },
    KindDirective {
        kind: ChartKind::Pie,
        fan_out: FanOut::RejectMulti,
        colors: ColorRule::PerCategory,
        axes: AxisPolicy::Hidden,
        contiguous: false,
        numeric_axes: false,
        quartile_source: false,
        range_overlay: false,
    },
    KindDirective {
        kind: ChartKind::Boxplot,
        fan_out: FanOut::SingleOnly,
        colors: ColorRule::BodyAndOverlay,
        axes: AxisPolicy::Presentation,
        contiguous: false,
        numeric_axes: false,
        quartile_source: true,
        range_overlay: true,
    },
    KindDirective {
        kind: ChartKind::Scatter,
        fan_out: FanOut::SingleOnly,
        colors: ColorRule::First,
        axes: AxisPolicy::Presentation,
        contiguous: false,
        numeric_axes: true,
        quartile_source: false,
        range_overlay: false,
    },
    KindDirective {
        kind: ChartKind::Histogram,
        fan_out: FanOut::SingleOnly,
        colors: ColorRule::First,
        axes: AxisPolicy::PresentationWithYDefault("Frequency"),
        contiguous: true,
        numeric_axes: false,
        quartile_source: false,
        range_overlay: false,
    },
    KindDirective {
        kind: ChartKind::Timeseries,
        fan_out: FanOut::MultiOrSingle,
        colors: ColorRule::PerSeries,
        axes: AxisPolicy::Presentation,
        contiguous: false,
        numeric_axes: false,
        quartile_source: false,
        range_overlay: false,
    },
];

/// Directive record for `kind`
pub fn directive_for(kind: ChartKind) -> &'static KindDirective {
    let slot = match kind {
        ChartKind::Line => 0,
        ChartKind::Bar => 1,
        ChartKind::Pie => 2,
        ChartKind::Boxplot => 3,
        ChartKind::Scatter => 4,
        ChartKind::Histogram => 5,
        ChartKind::Timeseries => 6,
    };
    &DIRECTIVES[slot]
}

/// All directive records, in declaration order
pub fn all_directives() -> &'static [KindDirective] {
    &DIRECTIVES
}
