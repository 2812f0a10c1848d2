//! Boxplot quartile and range passthrough
//!
//! Boxplots are drawn as an area approximation: quartile entries become point
//! fields as-is and `ranges` feeds a `max` overlay. No statistics are derived
//! here.

use chat_charts_shared::{numeric_cell, ChartPoint, Label, PointField};
use serde_json::Value;

const FIVE_NUMBER: [&str; 5] = ["min", "q1", "median", "q3", "max"];
const THREE_NUMBER: [&str; 3] = ["q1", "median", "q3"];

/// Points built from `presentation.quartiles`
///
/// An array is aligned with `labels` by index; an object is keyed by label.
/// With no labels, an array yields index categories and an object yields its keys.
pub fn quartile_points(quartiles: &Value, labels: &[Label]) -> Vec<ChartPoint> {
    match quartiles {
        Value::Array(entries) if labels.is_empty() => entries
            .iter()
            .enumerate()
            .map(|(i, entry)| point_from_entry(Label::Number(i as f64), Some(entry), i))
            .collect(),
        Value::Array(entries) => labels
            .iter()
            .enumerate()
            .map(|(i, label)| point_from_entry(label.clone(), entries.get(i), i))
            .collect(),
        Value::Object(entries) if labels.is_empty() => entries
            .iter()
            .enumerate()
            .map(|(i, (key, entry))| point_from_entry(Label::Text(key.clone()), Some(entry), i))
            .collect(),
        Value::Object(entries) => labels
            .iter()
            .enumerate()
            .map(|(i, label)| point_from_entry(label.clone(), entries.get(&label.key()), i))
            .collect(),
        _ => Vec::new(),
    }
}

/// Number of quartile entries, for length diagnostics
pub fn quartile_count(quartiles: &Value) -> usize {
    match quartiles {
        Value::Array(entries) => entries.len(),
        Value::Object(entries) => entries.len(),
        _ => 0,
    }
}

fn point_from_entry(category: Label, entry: Option<&Value>, index: usize) -> ChartPoint {
    let mut point = ChartPoint::new(category);
    if let Some(entry) = entry {
        point.fields = quartile_fields(entry, index);
    }
    point
}

fn quartile_fields(entry: &Value, index: usize) -> Vec<PointField> {
    match entry {
        Value::Object(members) => members
            .iter()
            .filter_map(|(key, value)| {
                numeric_cell(value).map(|v| PointField::new(key.as_str(), Some(v)))
            })
            .collect(),
        Value::Array(cells) if cells.len() == FIVE_NUMBER.len() => positional(&FIVE_NUMBER, cells),
        Value::Array(cells) if cells.len() == THREE_NUMBER.len() => positional(&THREE_NUMBER, cells),
        Value::Null => Vec::new(),
        other => {
            log::warn!("Skipping quartile entry {}: unrecognized shape {}", index, other);
            Vec::new()
        }
    }
}

fn positional(keys: &[&str], cells: &[Value]) -> Vec<PointField> {
    keys.iter()
        .zip(cells)
        .map(|(key, cell)| PointField::new(*key, numeric_cell(cell)))
        .collect()
}

/// Overlay `max` for point `index` from `presentation.ranges`
///
/// A range entry may be a bare number, a `[min, max]` array or an object with
/// a `max` member; ranges are aligned by index or keyed by label.
pub fn range_max(ranges: &Value, index: usize, label: &Label) -> Option<f64> {
    let entry = match ranges {
        Value::Array(entries) => entries.get(index),
        Value::Object(entries) => entries.get(&label.key()),
        _ => None,
    }?;

    match entry {
        Value::Array(bounds) => bounds.last().and_then(numeric_cell),
        Value::Object(members) => members.get("max").and_then(numeric_cell),
        other => numeric_cell(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_positional_quartiles() {
        let labels = vec![Label::from("A"), Label::from("B")];
        let points = quartile_points(&json!([[1, 2, 3, 4, 5], [2, 3, 4]]), &labels);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].get("min"), Some(1.0));
        assert_eq!(points[0].get("median"), Some(3.0));
        assert_eq!(points[1].get("q1"), Some(2.0));
        assert_eq!(points[1].get("q3"), Some(4.0));
        assert!(!points[1].has_field("min"));
    }

    #[test]
    fn test_object_quartiles_pass_through() {
        let labels = vec![Label::from("North")];
        let points = quartile_points(
            &json!([{ "q1": 10, "median": 12.5, "q3": 15, "note": "skip me" }]),
            &labels,
        );

        assert_eq!(points[0].fields.len(), 3);
        assert_eq!(points[0].get("median"), Some(12.5));
    }

    #[test]
    fn test_quartiles_keyed_by_label() {
        let labels = vec![Label::from("South"), Label::from("North")];
        let points = quartile_points(
            &json!({ "North": [1, 2, 3], "South": [4, 5, 6] }),
            &labels,
        );

        assert_eq!(points[0].category, Label::from("South"));
        assert_eq!(points[0].get("q1"), Some(4.0));
        assert_eq!(points[1].get("q1"), Some(1.0));
    }

    #[test]
    fn test_quartiles_without_labels() {
        let points = quartile_points(&json!([[1, 2, 3]]), &[]);
        assert_eq!(points[0].category, Label::Number(0.0));

        let points = quartile_points(&json!({ "A": [1, 2, 3] }), &[]);
        assert_eq!(points[0].category, Label::from("A"));
    }

    #[test]
    fn test_unrecognized_entry_is_skipped() {
        let labels = vec![Label::from("A"), Label::from("B")];
        let points = quartile_points(&json!([[1, 2], "x"]), &labels);

        assert_eq!(points.len(), 2);
        assert!(points[0].fields.is_empty());
        assert!(points[1].fields.is_empty());
    }

    #[test]
    fn test_range_shapes() {
        let label = Label::from("A");
        assert_eq!(range_max(&json!([7]), 0, &label), Some(7.0));
        assert_eq!(range_max(&json!([[1, 9]]), 0, &label), Some(9.0));
        assert_eq!(range_max(&json!([{ "min": 1, "max": 8 }]), 0, &label), Some(8.0));
        assert_eq!(range_max(&json!({ "A": [0, 4] }), 0, &label), Some(4.0));
        assert_eq!(range_max(&json!([7]), 3, &label), None);
        assert_eq!(range_max(&json!("wide"), 0, &label), None);
    }
}
