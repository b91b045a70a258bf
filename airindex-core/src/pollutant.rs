//! Pollutant Definitions
//!
//! A [`PollutantDefinition`] carries everything the engine needs to turn
//! hourly concentrations of one pollutant into an index value: the
//! averaging intervals it is reported on, the precision concentrations are
//! rounded to, one breakpoint table per interval, the unit the tables are
//! written in, and the bracket-resolution strategy.
//!
//! ## Breakpoint Tables
//!
//! Every table has exactly seven slots, one per AQI bracket. A slot holds
//! the concentration at the *top* of its bracket, or
//! [`BreakpointSlot::NotApplicable`] when the interval does not define that
//! bracket:
//!
//! ```text
//! O3  8h: 0.054 0.070 0.085 0.105 0.200  n/a   n/a
//! O3  1h:  n/a  0.125 0.164 0.204 0.404 0.504 0.604
//! ```
//!
//! The bottom of bracket `i` is the top of bracket `i - 1` plus one step
//! of the pollutant's decimal precision (`10^-decimals`), so adjacent
//! brackets never overlap.
//!
//! ## Strategies
//!
//! The strategy is derived from the pollutant code once, when the
//! definition is built:
//!
//! | Code  | Strategy                 | Intervals |
//! |-------|--------------------------|-----------|
//! | `O3`  | `OzoneDual`              | 8h, 1h    |
//! | `SO2` | `SulfurDioxideCascade`   | 1h, 24h   |
//! | other | `Default`                | one       |

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{BREAKPOINT_COUNT, HOURS_PER_DAY, MAX_INTERVALS},
    errors::{AqiCalcResult, AqiError},
    formula::RoundingMode,
    units::MeasurementUnit,
};

/// EU standard pollutant identifiers
pub mod ids {
    /// Sulfur dioxide
    pub const SO2: u32 = 1;
    /// Particulate matter ≤ 10 µm
    pub const PM10: u32 = 5;
    /// Ozone
    pub const O3: u32 = 7;
    /// Nitrogen dioxide
    pub const NO2: u32 = 8;
    /// Carbon monoxide
    pub const CO: u32 = 10;
    /// Particulate matter ≤ 2.5 µm
    pub const PM25: u32 = 6001;
}

/// Largest supported decimal precision
const MAX_DECIMALS: u8 = 6;

/// One bracket threshold in a breakpoint table
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BreakpointSlot {
    /// Concentration at the top of the bracket
    Applicable(f64),
    /// The interval does not define this bracket
    NotApplicable,
}

impl BreakpointSlot {
    /// Threshold value, if any
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Applicable(v) => Some(*v),
            Self::NotApplicable => None,
        }
    }

    /// Build a table from optional thresholds (`None` = not applicable)
    pub fn table(values: [Option<f64>; BREAKPOINT_COUNT]) -> BreakpointTable {
        values.map(|v| v.map_or(Self::NotApplicable, Self::Applicable))
    }
}

/// Seven bracket-high thresholds
pub type BreakpointTable = [BreakpointSlot; BREAKPOINT_COUNT];

/// How brackets are resolved for a pollutant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ResolutionStrategy {
    /// Single table, single interval
    Default,
    /// O₃: resolve 8h and 1h independently, report the larger index
    OzoneDual,
    /// SO₂: 1h table that hands over to the 24h table part way up
    SulfurDioxideCascade,
}

impl ResolutionStrategy {
    /// Strategy for a pollutant code
    pub fn for_code(code: &str) -> Self {
        match code {
            "O3" => Self::OzoneDual,
            "SO2" => Self::SulfurDioxideCascade,
            _ => Self::Default,
        }
    }

    /// Number of averaging intervals the strategy consumes
    pub fn interval_count(&self) -> usize {
        match self {
            Self::Default => 1,
            Self::OzoneDual | Self::SulfurDioxideCascade => 2,
        }
    }
}

/// Immutable description of one pollutant
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantDefinition {
    id: u32,
    code: String,
    /// Averaging intervals in hours, primary first
    intervals: Vec<u32, MAX_INTERVALS>,
    decimal_precision: u8,
    breakpoint_step: f64,
    /// Tables in the same order as `intervals`
    tables: Vec<BreakpointTable, MAX_INTERVALS>,
    native_unit: MeasurementUnit,
    strategy: ResolutionStrategy,
}

impl PollutantDefinition {
    /// Start building a definition
    pub fn builder(id: u32, code: impl Into<String>) -> PollutantDefinitionBuilder {
        PollutantDefinitionBuilder::new(id, code.into())
    }

    /// Numeric pollutant id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Short code such as `PM2.5`
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Averaging intervals in hours, primary first
    pub fn intervals(&self) -> &[u32] {
        &self.intervals
    }

    /// The interval that drives the default strategy
    pub fn primary_interval(&self) -> u32 {
        // build() guarantees at least one interval
        self.intervals[0]
    }

    /// Decimals kept when rounding chunk means
    pub fn decimal_precision(&self) -> u8 {
        self.decimal_precision
    }

    /// Gap between the top of one bracket and the bottom of the next
    pub fn breakpoint_step(&self) -> f64 {
        self.breakpoint_step
    }

    /// Unit the breakpoint tables are written in
    pub fn native_unit(&self) -> MeasurementUnit {
        self.native_unit
    }

    /// Bracket resolution strategy
    pub fn strategy(&self) -> ResolutionStrategy {
        self.strategy
    }

    /// Breakpoint table for an averaging interval
    pub fn table(&self, hours: u32) -> AqiCalcResult<&BreakpointTable> {
        self.intervals
            .iter()
            .position(|&h| h == hours)
            .map(|idx| &self.tables[idx])
            .ok_or_else(|| {
                AqiError::configuration(format!(
                    "{} has no {}h breakpoint table",
                    self.code, hours
                ))
            })
    }

    /// Definition from tables known to be valid; the registry tests run
    /// every built-in table through [`PollutantDefinitionBuilder::build`]
    pub(crate) fn trusted(
        id: u32,
        code: &str,
        intervals: &[(u32, BreakpointTable)],
        decimal_precision: u8,
        native_unit: MeasurementUnit,
    ) -> Self {
        Self {
            id,
            code: code.to_string(),
            intervals: intervals.iter().map(|(h, _)| *h).take(MAX_INTERVALS).collect(),
            decimal_precision,
            breakpoint_step: 1.0 / 10f64.powi(i32::from(decimal_precision)),
            tables: intervals.iter().map(|(_, t)| *t).take(MAX_INTERVALS).collect(),
            native_unit,
            strategy: ResolutionStrategy::for_code(code),
        }
    }

    /// Builder seeded with this definition's values
    pub fn to_builder(&self) -> PollutantDefinitionBuilder {
        let mut builder = PollutantDefinition::builder(self.id, self.code.clone())
            .decimals(self.decimal_precision)
            .native_unit(self.native_unit);
        for (hours, table) in self.intervals.iter().zip(self.tables.iter()) {
            builder = builder.interval(*hours, *table);
        }
        builder
    }

    /// Table of the n-th interval (0 = primary)
    pub(crate) fn table_at(&self, position: usize) -> &BreakpointTable {
        &self.tables[position]
    }

    /// Round a concentration to this pollutant's decimal precision
    pub fn round_concentration(&self, value: f64, rounding: RoundingMode) -> f64 {
        rounding.round_to(value, self.decimal_precision)
    }
}

/// Builder for [`PollutantDefinition`]
///
/// Validation happens in [`build`](Self::build); a definition that exists
/// is always evaluable.
#[derive(Debug, Clone)]
pub struct PollutantDefinitionBuilder {
    id: u32,
    code: String,
    intervals: std::vec::Vec<(u32, BreakpointTable)>,
    decimal_precision: u8,
    native_unit: MeasurementUnit,
}

impl PollutantDefinitionBuilder {
    fn new(id: u32, code: String) -> Self {
        Self {
            id,
            code,
            intervals: std::vec::Vec::new(),
            decimal_precision: 0,
            native_unit: MeasurementUnit::MicrogramsPerCubicMeter,
        }
    }

    /// Add an averaging interval and its table (call order = priority)
    pub fn interval(mut self, hours: u32, table: BreakpointTable) -> Self {
        self.intervals.push((hours, table));
        self
    }

    /// Decimals concentrations are rounded to in day-batch mode
    pub fn decimals(mut self, decimals: u8) -> Self {
        self.decimal_precision = decimals;
        self
    }

    /// Unit the breakpoint tables are written in
    pub fn native_unit(mut self, unit: MeasurementUnit) -> Self {
        self.native_unit = unit;
        self
    }

    /// Validate and freeze the definition
    pub fn build(self) -> AqiCalcResult<PollutantDefinition> {
        let code = self.code;
        let strategy = ResolutionStrategy::for_code(&code);

        if self.intervals.len() != strategy.interval_count() {
            return Err(AqiError::configuration(format!(
                "{code}: {strategy:?} needs {} interval(s), got {}",
                strategy.interval_count(),
                self.intervals.len()
            )));
        }
        if self.decimal_precision > MAX_DECIMALS {
            return Err(AqiError::configuration(format!(
                "{code}: decimal precision {} exceeds {MAX_DECIMALS}",
                self.decimal_precision
            )));
        }

        let step = 1.0 / 10f64.powi(i32::from(self.decimal_precision));
        let mut intervals = Vec::new();
        let mut tables = Vec::new();
        for (hours, table) in self.intervals {
            if hours == 0 || HOURS_PER_DAY % hours != 0 {
                return Err(AqiError::configuration(format!(
                    "{code}: {hours}h interval does not divide a day"
                )));
            }
            if intervals.contains(&hours) {
                return Err(AqiError::configuration(format!(
                    "{code}: {hours}h interval listed twice"
                )));
            }
            check_increasing(&code, hours, &table, step)?;
            // Capacity matches interval_count(), checked above
            let _ = intervals.push(hours);
            let _ = tables.push(table);
        }

        check_strategy_shape(&code, strategy, &tables, step)?;

        Ok(PollutantDefinition {
            id: self.id,
            code,
            intervals,
            decimal_precision: self.decimal_precision,
            breakpoint_step: step,
            tables,
            native_unit: self.native_unit,
            strategy,
        })
    }
}

/// Bracket `i` spans `(high[i-1] + step, high[i])`, which must not be empty
fn widens(previous: Option<f64>, value: f64, step: f64) -> bool {
    match previous {
        Some(p) => value > p + step,
        None => value > 0.0,
    }
}

/// Applicable thresholds must be finite, positive and strictly increasing
fn check_increasing(
    code: &str,
    hours: u32,
    table: &BreakpointTable,
    step: f64,
) -> AqiCalcResult<()> {
    let mut previous = None;
    for value in table.iter().filter_map(BreakpointSlot::value) {
        if !value.is_finite() || !widens(previous, value, step) {
            return Err(AqiError::configuration(format!(
                "{code}: {hours}h thresholds must be positive and increasing"
            )));
        }
        previous = Some(value);
    }
    Ok(())
}

fn is_na(slot: &BreakpointSlot) -> bool {
    matches!(slot, BreakpointSlot::NotApplicable)
}

/// Not-applicable slots may only form a trailing run
fn na_only_trailing(table: &BreakpointTable) -> bool {
    match table.iter().position(is_na) {
        Some(first) => table[first..].iter().all(is_na),
        None => true,
    }
}

/// Not-applicable slots may only form a leading run
fn na_only_leading(table: &BreakpointTable) -> bool {
    match table.iter().position(|s| !is_na(s)) {
        Some(first) => table[first..].iter().all(|s| !is_na(s)),
        None => false,
    }
}

fn check_strategy_shape(
    code: &str,
    strategy: ResolutionStrategy,
    tables: &[BreakpointTable],
    step: f64,
) -> AqiCalcResult<()> {
    let fail = |what: &str| -> AqiCalcResult<()> {
        Err(AqiError::configuration(format!("{code}: {what}")))
    };

    match strategy {
        ResolutionStrategy::Default => {
            if tables[0].iter().any(is_na) {
                return fail("single-interval table cannot contain n/a slots");
            }
        }
        ResolutionStrategy::OzoneDual => {
            if is_na(&tables[0][0]) || !na_only_trailing(&tables[0]) {
                return fail("primary table must start applicable and end in n/a only");
            }
            if !na_only_leading(&tables[1]) {
                return fail("secondary table may only start with n/a slots");
            }
        }
        ResolutionStrategy::SulfurDioxideCascade => {
            if !na_only_trailing(&tables[0]) {
                return fail("cascade table may only end with n/a slots");
            }
            let handover = tables[0].iter().position(is_na).unwrap_or(BREAKPOINT_COUNT);
            if tables[1][handover..].iter().any(is_na) {
                return fail("24h table must cover every bracket after the handover");
            }
            let mut previous = None;
            for i in 0..BREAKPOINT_COUNT {
                let slot = if i < handover { tables[0][i] } else { tables[1][i] };
                if let BreakpointSlot::Applicable(v) = slot {
                    if !widens(previous, v, step) {
                        return fail("cascaded thresholds must keep increasing");
                    }
                    previous = Some(v);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pm10_table() -> BreakpointTable {
        BreakpointSlot::table([
            Some(54.0), Some(154.0), Some(254.0), Some(354.0),
            Some(424.0), Some(504.0), Some(604.0),
        ])
    }

    #[test]
    fn strategy_from_code() {
        assert_eq!(ResolutionStrategy::for_code("O3"), ResolutionStrategy::OzoneDual);
        assert_eq!(ResolutionStrategy::for_code("SO2"), ResolutionStrategy::SulfurDioxideCascade);
        assert_eq!(ResolutionStrategy::for_code("PM10"), ResolutionStrategy::Default);
    }

    #[test]
    fn builds_single_interval_definition() {
        let def = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(24, pm10_table())
            .decimals(0)
            .build()
            .unwrap();

        assert_eq!(def.primary_interval(), 24);
        assert_eq!(def.breakpoint_step(), 1.0);
        assert_eq!(def.strategy(), ResolutionStrategy::Default);
        assert!(def.table(24).is_ok());
        assert!(matches!(def.table(8), Err(AqiError::Configuration { .. })));
    }

    #[test]
    fn step_follows_precision() {
        let def = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(24, pm10_table())
            .decimals(3)
            .build()
            .unwrap();
        assert!((def.breakpoint_step() - 0.001).abs() < 1e-12);
    }

    #[test]
    fn rejects_wrong_interval_count() {
        let result = PollutantDefinition::builder(ids::O3, "O3")
            .interval(8, pm10_table())
            .build();
        assert!(matches!(result, Err(AqiError::Configuration { .. })));
    }

    #[test]
    fn rejects_interval_not_dividing_day() {
        let result = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(5, pm10_table())
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_decreasing_thresholds() {
        let mut table = pm10_table();
        table[3] = BreakpointSlot::Applicable(100.0);
        let result = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(24, table)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_na_in_default_table() {
        let mut table = pm10_table();
        table[6] = BreakpointSlot::NotApplicable;
        let result = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(24, table)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rejects_cascade_without_24h_cover() {
        let one_hour = BreakpointSlot::table([
            Some(35.0), Some(75.0), Some(185.0), Some(304.0), None, None, None,
        ]);
        let day = BreakpointSlot::table([None, None, None, None, Some(604.0), None, Some(1004.0)]);
        let result = PollutantDefinition::builder(ids::SO2, "SO2")
            .interval(1, one_hour)
            .interval(24, day)
            .decimals(0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn rounding_uses_precision() {
        let def = PollutantDefinition::builder(ids::PM10, "PM10")
            .interval(24, pm10_table())
            .decimals(1)
            .build()
            .unwrap();
        assert_eq!(def.round_concentration(0.46995, RoundingMode::HalfAwayFromZero), 0.5);
    }
}
