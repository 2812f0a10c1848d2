//! Point construction for single- and multi-series data

use chat_charts_shared::{ChartPoint, Label, NormalizationError};

/// Labels to plot against; synthesized as `0..len` when the payload had none
pub fn resolve_labels(labels: &[Label], len: usize) -> Vec<Label> {
    if !labels.is_empty() {
        return labels.to_vec();
    }
    log::debug!("No labels supplied, synthesizing {} index labels", len);
    (0..len).map(|i| Label::Number(i as f64)).collect()
}

/// One `LengthMismatch` per series whose length differs from the label count
pub fn length_diagnostics<'a>(
    series: impl Iterator<Item = &'a [Option<f64>]>,
    expected: usize,
) -> Vec<NormalizationError> {
    series
        .enumerate()
        .filter(|(_, values)| values.len() != expected)
        .map(|(index, values)| {
            log::debug!(
                "Series {} has {} values for {} labels",
                index,
                values.len(),
                expected
            );
            NormalizationError::LengthMismatch {
                series: index,
                expected,
                actual: values.len(),
            }
        })
        .collect()
}

/// `{category, value, x, y}` per label
///
/// `x` is the numeric label when it has one, the index otherwise, so both the
/// categorical and the numeric view are always present.
pub fn single_points(labels: &[Label], values: &[Option<f64>]) -> Vec<ChartPoint> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let value = values.get(i).copied().flatten();
            let x = label.numeric().unwrap_or(i as f64);
            ChartPoint::new(label.clone())
                .with_field("value", value)
                .with_field("x", Some(x))
                .with_field("y", value)
        })
        .collect()
}

/// `{category, <name>: values[s][i], ...}` per label, short series leave gaps
pub fn multi_points(labels: &[Label], series: &[Vec<Option<f64>>], names: &[String]) -> Vec<ChartPoint> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut point = ChartPoint::new(label.clone());
            for (values, name) in series.iter().zip(names) {
                point.push(name.as_str(), values.get(i).copied().flatten());
            }
            point
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|n| Label::from(*n)).collect()
    }

    #[test]
    fn test_single_points_carry_both_views() {
        let points = single_points(&labels(&["Jan", "2021"]), &[Some(10.0), Some(20.0)]);

        assert_eq!(points[0].get("value"), Some(10.0));
        assert_eq!(points[0].get("x"), Some(0.0));
        assert_eq!(points[0].get("y"), Some(10.0));
        assert_eq!(points[1].get("x"), Some(2021.0));
    }

    #[test]
    fn test_short_series_leaves_gaps() {
        let names = vec!["A".to_string(), "B".to_string()];
        let series = vec![vec![Some(1.0), Some(2.0)], vec![Some(3.0)]];
        let points = multi_points(&labels(&["t1", "t2"]), &series, &names);

        assert_eq!(points[1].get("A"), Some(2.0));
        assert_eq!(points[1].get("B"), None);
        assert!(points[1].has_field("B"));
        assert_eq!(points[1].fields.len(), 2);
    }

    #[test]
    fn test_length_diagnostics() {
        let series = vec![vec![Some(1.0)], vec![Some(1.0), Some(2.0), Some(3.0)], vec![None, None]];
        let found = length_diagnostics(series.iter().map(Vec::as_slice), 2);

        assert_eq!(
            found,
            vec![
                NormalizationError::LengthMismatch { series: 0, expected: 2, actual: 1 },
                NormalizationError::LengthMismatch { series: 1, expected: 2, actual: 3 },
            ]
        );
    }

    #[test]
    fn test_labels_synthesized_when_missing() {
        assert_eq!(resolve_labels(&[], 2), vec![Label::Number(0.0), Label::Number(1.0)]);
        assert_eq!(resolve_labels(&labels(&["a"]), 5), labels(&["a"]));
    }
}
