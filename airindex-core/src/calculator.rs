//! AQI Calculator
//!
//! Entry points for the surrounding pipeline. The calculator holds shared
//! handles to the two registries and a small config; it keeps no other
//! state, so one instance can serve any number of threads.
//!
//! ## Data Flow
//!
//! ```text
//! pollutant id + hourly values + unit label
//!        │
//!        ▼
//! PollutantRegistry ──► aggregate (day batch | series | values)
//!                               │  converted to native unit
//!                               ▼
//!                       breakpoints::resolve
//!                               │
//!                               ▼
//!                       formula (max over intervals)
//!                               │
//!                               ▼
//!                       CategoryRegistry ──► AqiResult
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use airindex_core::AqiCalculator;
//!
//! let calculator = AqiCalculator::standard();
//! let hourly = [30.8, 11.7, 10.1, 10.1, 12.2, 9.8, 8.0, 10.8, 5.9, 7.5, 13.6, 14.5,
//!               9.0, 9.2, 13.0, 10.5, 8.9, 6.0, 6.3, 6.9, 8.6, 8.6, 5.0, 8.2];
//!
//! let result = calculator.assess_day(5, &hourly, "µg/m3")?;
//! assert_eq!(result.value, 9);
//! assert_eq!(result.category.name, "Good");
//! # Ok::<(), airindex_core::AqiError>(())
//! ```

use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    aggregate::{self, IntervalAggregates},
    breakpoints,
    category::{AqiCategory, CategoryRegistry},
    errors::{AqiCalcResult, AqiError},
    formula::{self, RoundingMode},
    pollutant::PollutantDefinition,
    registry::PollutantRegistry,
    traits::ConcentrationSeries,
    units::MeasurementUnit,
};

/// Calculator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorConfig {
    /// Tie-break for the index formula and day-batch chunk means
    pub rounding: RoundingMode,
}

/// Index value with its category
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AqiResult<'a> {
    /// Index value
    pub value: u16,
    /// Row the value falls in
    pub category: &'a AqiCategory,
}

impl AqiResult<'_> {
    /// Owned copy for consumers that outlive the calculator
    pub fn to_report(&self) -> AqiReport {
        AqiReport { value: self.value, category: self.category.clone() }
    }
}

/// Owned, serializable form of [`AqiResult`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AqiReport {
    /// Index value
    pub value: u16,
    /// Copy of the matching row
    pub category: AqiCategory,
}

/// One pollutant-day of work
#[derive(Debug, Clone, Copy)]
pub struct DayJob<'a> {
    /// Registered pollutant id
    pub pollutant_id: u32,
    /// Exactly 24 hourly concentrations
    pub hourly: &'a [f64],
    /// Unit label of `hourly`
    pub source_unit: &'a str,
}

impl<'a> DayJob<'a> {
    /// Job for one pollutant-day
    pub fn new(pollutant_id: u32, hourly: &'a [f64], source_unit: &'a str) -> Self {
        Self { pollutant_id, hourly, source_unit }
    }
}

/// Combined index over several pollutants for one day
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OverallAqi {
    /// Largest per-pollutant value
    pub value: u16,
    /// Pollutant that produced it (first one on ties)
    pub dominant_pollutant: u32,
    /// `(pollutant id, value)` in input order
    pub per_pollutant: Vec<(u32, u16)>,
}

/// Stateless AQI engine over shared registries
#[derive(Debug, Clone)]
pub struct AqiCalculator {
    pollutants: Arc<PollutantRegistry>,
    categories: Arc<CategoryRegistry>,
    config: CalculatorConfig,
}

impl AqiCalculator {
    /// Calculator over caller-supplied registries with default config
    pub fn new(pollutants: Arc<PollutantRegistry>, categories: Arc<CategoryRegistry>) -> Self {
        Self { pollutants, categories, config: CalculatorConfig::default() }
    }

    /// Built-in EPA tables and categories
    pub fn standard() -> Self {
        Self::new(
            Arc::new(PollutantRegistry::standard()),
            Arc::new(CategoryRegistry::standard()),
        )
    }

    /// Replace the config
    pub fn with_config(mut self, config: CalculatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Current config
    pub fn config(&self) -> CalculatorConfig {
        self.config
    }

    /// Pollutant registry in use
    pub fn pollutants(&self) -> &PollutantRegistry {
        &self.pollutants
    }

    /// Category registry in use
    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Daily index from exactly 24 hourly concentrations
    pub fn calculate_aqi_for_day(
        &self,
        pollutant_id: u32,
        hourly: &[f64],
        source_unit: &str,
    ) -> AqiCalcResult<u16> {
        let definition = self.pollutants.get(pollutant_id)?;
        let source: MeasurementUnit = source_unit.parse()?;
        let aggregates = aggregate::aggregate_day(definition, hourly, source, self.config.rounding)?;
        let value = self.evaluate_aggregates(definition, &aggregates)?;
        log_debug!("{} day batch AQI {}", definition.code(), value);
        Ok(value)
    }

    /// One index per calendar day present in the series
    pub fn calculate_aqi_for_series<S>(
        &self,
        pollutant_id: u32,
        series: &S,
        source_unit: &str,
    ) -> AqiCalcResult<BTreeMap<NaiveDate, u16>>
    where
        S: ConcentrationSeries + ?Sized,
    {
        let definition = self.pollutants.get(pollutant_id)?;
        let source: MeasurementUnit = source_unit.parse()?;
        aggregate::aggregate_series(definition, series, source)?
            .into_iter()
            .map(|(day, aggregates)| Ok((day, self.evaluate_aggregates(definition, &aggregates)?)))
            .collect()
    }

    /// One index per already-aggregated concentration
    pub fn calculate_aqi_for_values(
        &self,
        pollutant_id: u32,
        values: &[f64],
        source_unit: &str,
    ) -> AqiCalcResult<Vec<u16>> {
        let definition = self.pollutants.get(pollutant_id)?;
        let source: MeasurementUnit = source_unit.parse()?;
        aggregate::aggregate_values(definition, values, source)?
            .iter()
            .map(|aggregates| self.evaluate_aggregates(definition, aggregates))
            .collect()
    }

    /// Category row for an index value
    pub fn category_for(&self, value: f64) -> &AqiCategory {
        self.categories.category_for(value)
    }

    /// Daily index together with its category
    pub fn assess_day(
        &self,
        pollutant_id: u32,
        hourly: &[f64],
        source_unit: &str,
    ) -> AqiCalcResult<AqiResult<'_>> {
        let value = self.calculate_aqi_for_day(pollutant_id, hourly, source_unit)?;
        Ok(AqiResult { value, category: self.category_for(f64::from(value)) })
    }

    /// Resolve and evaluate aggregated, native-unit concentrations
    pub fn evaluate_aggregates(
        &self,
        definition: &PollutantDefinition,
        aggregates: &IntervalAggregates,
    ) -> AqiCalcResult<u16> {
        let resolution = breakpoints::resolve(definition, &aggregates.concentrations())?;
        Ok(formula::evaluate_resolution(&resolution, self.config.rounding))
    }

    /// Day-batch jobs evaluated in parallel; results keep input order
    pub fn calculate_day_batch(&self, jobs: &[DayJob<'_>]) -> Vec<AqiCalcResult<u16>> {
        let workers = thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
            .clamp(1, jobs.len().max(1));
        let chunk_len = jobs.len().div_ceil(workers).max(1);

        thread::scope(|scope| {
            let handles: Vec<_> = jobs
                .chunks(chunk_len)
                .map(|part| {
                    scope.spawn(move || {
                        part.iter()
                            .map(|job| {
                                self.calculate_aqi_for_day(job.pollutant_id, job.hourly, job.source_unit)
                            })
                            .collect::<Vec<_>>()
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    /// Overall index for a day: the worst pollutant wins
    pub fn overall_for_day(&self, jobs: &[DayJob<'_>]) -> AqiCalcResult<OverallAqi> {
        if jobs.is_empty() {
            return Err(AqiError::malformed("overall AQI needs at least one pollutant"));
        }

        let per_pollutant = jobs
            .iter()
            .zip(self.calculate_day_batch(jobs))
            .map(|(job, result)| result.map(|value| (job.pollutant_id, value)))
            .collect::<AqiCalcResult<Vec<_>>>()?;

        let (dominant_pollutant, value) = per_pollutant
            .iter()
            .copied()
            .fold((per_pollutant[0].0, 0), |best, candidate| {
                if candidate.1 > best.1 { candidate } else { best }
            });

        Ok(OverallAqi { value, dominant_pollutant, per_pollutant })
    }
}

impl Default for AqiCalculator {
    fn default() -> Self {
        Self::standard()
    }
}
