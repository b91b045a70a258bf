use criterion::{black_box, criterion_group, criterion_main, Criterion};

use airindex_core::{pollutant::ids, AqiCalculator, DayJob, HourlySample};
use chrono::NaiveDate;

const PM10_DAY: [f64; 24] = [
    160.8, 171.7, 180.1, 170.1, 192.2, 191.8, 208.0, 180.8, 159.9, 177.5, 183.6, 194.5,
    209.0, 209.2, 163.0, 170.5, 182.9, 167.0, 165.3, 168.9, 182.6, 187.6, 205.0, 180.2,
];

fn day_batch(c: &mut Criterion) {
    let calc = AqiCalculator::standard();
    c.bench_function("day_batch_pm10", |b| {
        b.iter(|| calc.calculate_aqi_for_day(ids::PM10, black_box(&PM10_DAY), "µg/m3"))
    });
    c.bench_function("day_batch_o3_dual", |b| {
        b.iter(|| calc.calculate_aqi_for_day(ids::O3, black_box(&PM10_DAY), "µg/m3"))
    });

    let jobs: Vec<_> = (0..256)
        .map(|i| DayJob::new(if i % 2 == 0 { ids::PM10 } else { ids::CO }, &PM10_DAY, "µg/m3"))
        .collect();
    c.bench_function("parallel_batch_256", |b| {
        b.iter(|| calc.calculate_day_batch(black_box(&jobs)))
    });
}

fn series(c: &mut Criterion) {
    let calc = AqiCalculator::standard();
    let start = NaiveDate::from_ymd_opt(2022, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("valid start");
    let samples: Vec<_> = (0..24 * 365)
        .map(|h| HourlySample::new(start + chrono::Duration::hours(h), PM10_DAY[h as usize % 24]))
        .collect();

    c.bench_function("series_year_co_rolling", |b| {
        b.iter(|| calc.calculate_aqi_for_series(ids::CO, black_box(&samples), "µg/m3"))
    });
}

criterion_group!(benches, day_batch, series);
criterion_main!(benches);
