//! Benchmarks for chart normalization

use chat_charts_normalizer::ChartSpecNormalizer;
use chat_charts_shared::VisualizationSpec;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

fn multi_series_payload(series: usize, points: usize) -> serde_json::Value {
    let labels: Vec<String> = (0..points).map(|i| format!("t{}", i)).collect();
    let values: Vec<Vec<f64>> = (0..series)
        .map(|s| (0..points).map(|i| (s * points + i) as f64).collect())
        .collect();

    json!({
        "kind": "line",
        "labels": labels,
        "values": values,
        "presentation": { "seriesNames": ["Wind", "Solar"] }
    })
}

fn bench_decode(c: &mut Criterion) {
    let payload = multi_series_payload(4, 1_000);

    c.bench_function("decode_4x1000", |b| {
        b.iter(|| {
            let spec = VisualizationSpec::from_value(black_box(&payload));
            black_box(spec);
        });
    });
}

fn bench_normalize(c: &mut Criterion) {
    let normalizer = ChartSpecNormalizer::default();

    let mut group = c.benchmark_group("normalize_line");
    for points in [100usize, 1_000, 10_000] {
        let spec = VisualizationSpec::from_value(&multi_series_payload(4, points)).unwrap();
        group.throughput(Throughput::Elements(points as u64));
        group.bench_with_input(BenchmarkId::from_parameter(points), &spec, |b, spec| {
            b.iter(|| {
                let result = normalizer.normalize(black_box(spec));
                black_box(result);
            });
        });
    }
    group.finish();
}

fn bench_pie(c: &mut Criterion) {
    let normalizer = ChartSpecNormalizer::default();
    let spec = VisualizationSpec::from_value(&json!({
        "kind": "pie",
        "labels": ["Hydro", "Wind", "Solar", "Gas", "Nuclear", "Coal"],
        "values": [60, 12, 8, 10, 2, 8]
    }))
    .unwrap();

    c.bench_function("normalize_pie", |b| {
        b.iter(|| black_box(normalizer.normalize(black_box(&spec))));
    });
}

criterion_group!(benches, bench_decode, bench_normalize, bench_pie);
criterion_main!(benches);
