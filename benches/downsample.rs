//! Benchmarks for 24h history downsampling

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use price_tracker::price::PriceSample;
use price_tracker::store::{downsample, HISTORY_TARGET_POINTS};
use rust_decimal::Decimal;

/// One sample per minute, oldest first
fn minute_series(len: usize) -> Vec<PriceSample> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    (0..len)
        .map(|i| PriceSample {
            timestamp: start + Duration::minutes(i as i64),
            symbol: "BTC".to_string(),
            currency: "USDT".to_string(),
            price: Decimal::new(6_400_000 + i as i64, 2),
        })
        .collect()
}

fn benchmark_downsample(c: &mut Criterion) {
    let mut group = c.benchmark_group("downsample");

    // 1440 is a full day at the default fetch interval
    for len in [30usize, 1440, 86_400] {
        let series = minute_series(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &series, |b, series| {
            b.iter(|| downsample(black_box(series.clone()), HISTORY_TARGET_POINTS))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_downsample);
criterion_main!(benches);
