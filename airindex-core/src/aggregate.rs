//! Interval Aggregation
//!
//! Reduces hourly concentrations to the one or two statistics a
//! pollutant's breakpoint tables are written for, then converts them to
//! the pollutant's native unit.
//!
//! ## Call Shapes
//!
//! ### Day batch
//! Exactly 24 hourly values. For an `h`-hour interval the day is cut into
//! `24 / h` non-overlapping chunks; each chunk mean is rounded to the
//! pollutant's precision and the largest one is the day's statistic.
//!
//! ```text
//! CO (8h): |-- 0..8 --|-- 8..16 --|-- 16..24 --|
//!              0.5         0.6          0.6       → 0.6 mg/m3
//! ```
//!
//! ### Continuous series
//! Any number of timestamped samples spanning any number of days:
//! - `24h` → mean of the calendar day
//! - `1h`  → worst hour of the calendar day
//! - other → trailing rolling mean over `(t - h, t]` (one sample is enough),
//!   worst rolling value of the calendar day
//!
//! Series values are not rounded.
//!
//! ### Pre-aggregated values
//! One already-computed statistic per entry; it is only converted and
//! stands in for every interval of the pollutant.
//!
//! No gap filling happens here. Upstream cleaning guarantees complete
//! hourly coverage.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use heapless::Vec as FixedVec;

use crate::{
    constants::{DAY_BATCH_LEN, INTERVAL_1H, INTERVAL_24H, MAX_INTERVALS},
    errors::{AqiCalcResult, AqiError},
    formula::RoundingMode,
    pollutant::PollutantDefinition,
    traits::{ConcentrationSeries, HourlySample, Validatable},
    units::{self, MeasurementUnit},
};

/// Per-interval statistics for one day, in native units
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IntervalAggregates {
    /// `(hours, concentration)` in the pollutant's interval order
    entries: FixedVec<(u32, f64), MAX_INTERVALS>,
}

impl IntervalAggregates {
    fn push(&mut self, hours: u32, value: f64) {
        // Definitions never carry more than MAX_INTERVALS intervals
        let _ = self.entries.push((hours, value));
    }

    /// Statistic for an interval
    pub fn get(&self, hours: u32) -> Option<f64> {
        self.entries.iter().find(|(h, _)| *h == hours).map(|(_, v)| *v)
    }

    /// Concentrations in interval order, as the resolver expects them
    pub fn concentrations(&self) -> FixedVec<f64, MAX_INTERVALS> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    /// `(hours, concentration)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Aggregate one day of exactly 24 hourly values
pub fn aggregate_day(
    definition: &PollutantDefinition,
    hourly: &[f64],
    source: MeasurementUnit,
    rounding: RoundingMode,
) -> AqiCalcResult<IntervalAggregates> {
    if hourly.len() != DAY_BATCH_LEN {
        return Err(AqiError::malformed(format!(
            "day batch needs {DAY_BATCH_LEN} hourly values, got {}",
            hourly.len()
        )));
    }
    check_finite(hourly.iter())?;

    let mut aggregates = IntervalAggregates::default();
    for &hours in definition.intervals() {
        let chunk_len = hours as usize;
        let worst_chunk = hourly
            .chunks(chunk_len)
            .map(|chunk| {
                let mean = chunk.iter().sum::<f64>() / chunk_len as f64;
                let rounded = definition.round_concentration(mean, rounding);
                log_trace!("{} {}h chunk mean {} -> {}", definition.code(), hours, mean, rounded);
                rounded
            })
            .fold(f64::NEG_INFINITY, f64::max);

        let native = to_native(definition, worst_chunk, source);
        log_debug!(
            "{} day batch {}h: {} {} -> {} {}",
            definition.code(), hours, worst_chunk, source, native, definition.native_unit()
        );
        aggregates.push(hours, native);
    }
    Ok(aggregates)
}

/// Aggregate a multi-day series into per-calendar-day statistics
pub fn aggregate_series<S>(
    definition: &PollutantDefinition,
    series: &S,
    source: MeasurementUnit,
) -> AqiCalcResult<BTreeMap<NaiveDate, IntervalAggregates>>
where
    S: ConcentrationSeries + ?Sized,
{
    let mut samples = series.to_samples();
    if let Some(position) = samples.iter().position(|s| !s.is_valid()) {
        return Err(AqiError::malformed(format!(
            "non-finite concentration at {}",
            samples[position].timestamp
        )));
    }
    samples.sort_by_key(|s| s.timestamp);

    let mut per_interval = FixedVec::<BTreeMap<NaiveDate, f64>, MAX_INTERVALS>::new();
    for &hours in definition.intervals() {
        let daily = match hours {
            INTERVAL_24H => daily_mean(&samples),
            INTERVAL_1H => daily_max(samples.iter().map(|s| (s.timestamp.date(), s.value))),
            window => daily_max(rolling_mean(&samples, window)),
        };
        let _ = per_interval.push(daily);
    }

    let mut result = BTreeMap::new();
    for day in samples.iter().map(|s| s.timestamp.date()) {
        if result.contains_key(&day) {
            continue;
        }
        let mut aggregates = IntervalAggregates::default();
        for (&hours, daily) in definition.intervals().iter().zip(per_interval.iter()) {
            // Every day with a sample has a value for every interval
            if let Some(&value) = daily.get(&day) {
                aggregates.push(hours, to_native(definition, value, source));
            }
        }
        result.insert(day, aggregates);
    }

    log_debug!(
        "{} series: {} samples over {} day(s)",
        definition.code(), samples.len(), result.len()
    );
    Ok(result)
}

/// Convert pre-aggregated statistics, one result per input value
pub fn aggregate_values(
    definition: &PollutantDefinition,
    values: &[f64],
    source: MeasurementUnit,
) -> AqiCalcResult<Vec<IntervalAggregates>> {
    check_finite(values.iter())?;

    Ok(values
        .iter()
        .map(|&value| {
            let native = to_native(definition, value, source);
            let mut aggregates = IntervalAggregates::default();
            for &hours in definition.intervals() {
                aggregates.push(hours, native);
            }
            aggregates
        })
        .collect())
}

fn to_native(definition: &PollutantDefinition, value: f64, source: MeasurementUnit) -> f64 {
    units::convert(value, source, definition.native_unit(), definition.id())
}

fn check_finite<'a>(values: impl Iterator<Item = &'a f64>) -> AqiCalcResult<()> {
    for (position, value) in values.enumerate() {
        if !value.is_valid() {
            return Err(AqiError::malformed(format!(
                "non-finite concentration at position {position}"
            )));
        }
    }
    Ok(())
}

fn daily_mean(samples: &[HourlySample]) -> BTreeMap<NaiveDate, f64> {
    let mut sums: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for s in samples {
        let entry = sums.entry(s.timestamp.date()).or_insert((0.0, 0));
        entry.0 += s.value;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(day, (sum, count))| (day, sum / count as f64))
        .collect()
}

fn daily_max(values: impl Iterator<Item = (NaiveDate, f64)>) -> BTreeMap<NaiveDate, f64> {
    let mut maxima: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for (day, value) in values {
        maxima
            .entry(day)
            .and_modify(|m| *m = m.max(value))
            .or_insert(value);
    }
    maxima
}

/// Trailing mean over `(t - hours, t]` for every sample; `samples` sorted
fn rolling_mean(
    samples: &[HourlySample],
    hours: u32,
) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
    let window = Duration::hours(i64::from(hours));
    let mut start = 0;
    samples.iter().enumerate().map(move |(i, s)| {
        while samples[start].timestamp <= s.timestamp - window {
            start += 1;
        }
        let in_window = &samples[start..=i];
        let mean = in_window.iter().map(|w| w.value).sum::<f64>() / in_window.len() as f64;
        (s.timestamp.date(), mean)
    })
}
