//! Breakpoint Resolution
//!
//! Finds the bracket a concentration falls into. The scan is the same for
//! every strategy: walk the table in order keeping a running `low`
//! (starting at 0); the first slot whose threshold is strictly above the
//! concentration is the bracket, otherwise `low` moves to `threshold +
//! step`.
//!
//! ```text
//! PM10, step 1, c = 182
//!   i=0  high 54    182 < 54 ?  no  → low = 55
//!   i=1  high 154   182 < 154?  no  → low = 155
//!   i=2  high 254   182 < 254?  yes → bracket 2 [155, 254]
//! ```
//!
//! A concentration above every threshold is left unresolved and the
//! formula maps it to 0. This mirrors the reference pipeline and
//! under-reports extreme events; callers that care should check
//! [`Bracket::is_resolved`] before trusting a 0.
//!
//! ## Pollutant Variants
//!
//! - **Ozone** resolves the 8h and 1h statistics independently. The 8h scan
//!   stops at the first n/a slot. The 1h scan skips n/a slots and treats the
//!   first real threshold as a floor: below it the 1h statistic says nothing.
//! - **Sulfur dioxide** scans the 1h table with the 1h concentration and,
//!   at the first n/a slot, switches for good to the 24h table and the 24h
//!   concentration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::BREAKPOINT_COUNT,
    errors::{AqiCalcResult, AqiError},
    pollutant::{BreakpointSlot, BreakpointTable, PollutantDefinition, ResolutionStrategy},
};

/// Bracket a concentration was classified into
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bracket {
    /// Matched bracket (0..=6), `None` when unresolved
    pub index: Option<usize>,
    /// Concentration at the bottom of the bracket
    pub low_bound: f64,
    /// Concentration at the top of the bracket
    pub high_bound: f64,
    /// The value that was classified
    pub concentration: f64,
}

impl Bracket {
    fn unresolved(low_bound: f64, high_bound: f64, concentration: f64) -> Self {
        Self { index: None, low_bound, high_bound, concentration }
    }

    /// Whether a bracket matched
    pub fn is_resolved(&self) -> bool {
        self.index.is_some()
    }
}

/// Outcome of resolving one pollutant
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// One bracket (default strategy, SO₂ cascade)
    Single(Bracket),
    /// Independent 8h and 1h brackets (O₃)
    Dual {
        /// 8-hour bracket
        primary: Bracket,
        /// 1-hour bracket
        secondary: Bracket,
    },
}

impl Resolution {
    /// All brackets, primary first
    pub fn brackets(&self) -> impl Iterator<Item = &Bracket> {
        let (first, second) = match self {
            Self::Single(b) => (b, None),
            Self::Dual { primary, secondary } => (primary, Some(secondary)),
        };
        core::iter::once(first).chain(second)
    }
}

/// Resolve aggregated concentrations for a pollutant.
///
/// `concentrations` follows `definition.intervals()` order and must already
/// be in the pollutant's native unit.
pub fn resolve(
    definition: &PollutantDefinition,
    concentrations: &[f64],
) -> AqiCalcResult<Resolution> {
    if concentrations.len() != definition.intervals().len() {
        return Err(AqiError::malformed(format!(
            "{} needs {} interval concentration(s), got {}",
            definition.code(),
            definition.intervals().len(),
            concentrations.len()
        )));
    }

    let step = definition.breakpoint_step();
    let resolution = match definition.strategy() {
        ResolutionStrategy::Default => {
            Resolution::Single(resolve_default(definition.table_at(0), concentrations[0], step))
        }
        ResolutionStrategy::OzoneDual => Resolution::Dual {
            primary: resolve_stop_at_na(definition.table_at(0), concentrations[0], step),
            secondary: resolve_with_floor(definition.table_at(1), concentrations[1], step),
        },
        ResolutionStrategy::SulfurDioxideCascade => Resolution::Single(resolve_cascade(
            definition.table_at(0),
            definition.table_at(1),
            concentrations[0],
            concentrations[1],
            step,
        )),
    };

    for bracket in resolution.brackets() {
        if bracket.is_resolved() {
            log_trace!("{}: {:?}", definition.code(), bracket);
        } else if bracket.concentration >= bracket.high_bound && bracket.high_bound > 0.0 {
            log_warn!(
                "{}: concentration {} is beyond the top bracket, contributes AQI 0",
                definition.code(),
                bracket.concentration
            );
        }
    }

    Ok(resolution)
}

/// Single-table scan. Tables for this strategy have no n/a slots; one that
/// slips through ends the scan like the top of the table.
pub fn resolve_default(table: &BreakpointTable, concentration: f64, step: f64) -> Bracket {
    resolve_stop_at_na(table, concentration, step)
}

/// Scan that gives up at the first n/a slot (O₃ 8h)
pub fn resolve_stop_at_na(table: &BreakpointTable, concentration: f64, step: f64) -> Bracket {
    let mut low = 0.0;
    let mut high = 0.0;
    for (i, slot) in table.iter().enumerate() {
        let BreakpointSlot::Applicable(threshold) = *slot else {
            break;
        };
        high = threshold;
        if concentration < high {
            return Bracket { index: Some(i), low_bound: low, high_bound: high, concentration };
        }
        low = high + step;
    }
    Bracket::unresolved(low, high, concentration)
}

/// Scan that skips n/a slots and uses the first threshold as a floor (O₃ 1h)
pub fn resolve_with_floor(table: &BreakpointTable, concentration: f64, step: f64) -> Bracket {
    let mut low: Option<f64> = None;
    let mut high = 0.0;
    for (i, slot) in table.iter().enumerate() {
        let BreakpointSlot::Applicable(threshold) = *slot else {
            continue;
        };
        high = threshold;
        if concentration < high {
            return match low {
                Some(low) => Bracket {
                    index: Some(i),
                    low_bound: low,
                    high_bound: high,
                    concentration,
                },
                None => Bracket::unresolved(0.0, high, concentration),
            };
        }
        low = Some(high + step);
    }
    Bracket::unresolved(low.unwrap_or(0.0), high, concentration)
}

/// 1h scan handing over to the 24h table at the first n/a slot (SO₂)
pub fn resolve_cascade(
    hourly: &BreakpointTable,
    daily: &BreakpointTable,
    concentration_1h: f64,
    concentration_24h: f64,
    step: f64,
) -> Bracket {
    let mut low = 0.0;
    let mut high = 0.0;
    let mut concentration = concentration_1h;
    let mut handed_over = false;

    for i in 0..BREAKPOINT_COUNT {
        let mut slot = if handed_over { daily[i] } else { hourly[i] };
        if !handed_over && slot == BreakpointSlot::NotApplicable {
            handed_over = true;
            concentration = concentration_24h;
            slot = daily[i];
        }
        // Registry validation keeps the 24h side applicable after handover
        let BreakpointSlot::Applicable(threshold) = slot else {
            break;
        };
        high = threshold;
        if concentration < high {
            return Bracket { index: Some(i), low_bound: low, high_bound: high, concentration };
        }
        low = high + step;
    }
    Bracket::unresolved(low, high, concentration)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: [Option<f64>; BREAKPOINT_COUNT]) -> BreakpointTable {
        BreakpointSlot::table(values)
    }

    fn pm10() -> BreakpointTable {
        table([Some(54.0), Some(154.0), Some(254.0), Some(354.0), Some(424.0), Some(504.0), Some(604.0)])
    }

    fn o3_8h() -> BreakpointTable {
        table([Some(0.054), Some(0.07), Some(0.085), Some(0.105), Some(0.2), None, None])
    }

    fn o3_1h() -> BreakpointTable {
        table([None, Some(0.125), Some(0.164), Some(0.204), Some(0.404), Some(0.504), Some(0.604)])
    }

    fn so2_1h() -> BreakpointTable {
        table([Some(35.0), Some(75.0), Some(185.0), Some(304.0), None, None, None])
    }

    fn so2_24h() -> BreakpointTable {
        table([None, None, None, None, Some(604.0), Some(804.0), Some(1004.0)])
    }

    #[test]
    fn default_first_bracket_starts_at_zero() {
        let b = resolve_default(&pm10(), 10.0, 1.0);
        assert_eq!(b.index, Some(0));
        assert_eq!(b.low_bound, 0.0);
        assert_eq!(b.high_bound, 54.0);
    }

    #[test]
    fn default_low_bound_adds_step() {
        let b = resolve_default(&pm10(), 182.0, 1.0);
        assert_eq!(b.index, Some(2));
        assert_eq!(b.low_bound, 155.0);
        assert_eq!(b.high_bound, 254.0);
    }

    #[test]
    fn default_threshold_itself_belongs_to_next_bracket() {
        // concentration < high is strict
        let b = resolve_default(&pm10(), 54.0, 1.0);
        assert_eq!(b.index, Some(1));
    }

    #[test]
    fn default_beyond_table_is_unresolved() {
        let b = resolve_default(&pm10(), 700.0, 1.0);
        assert_eq!(b.index, None);
        assert!(!b.is_resolved());
    }

    #[test]
    fn ozone_8h_stops_at_na() {
        let b = resolve_stop_at_na(&o3_8h(), 0.3, 0.001);
        assert_eq!(b.index, None);

        let b = resolve_stop_at_na(&o3_8h(), 0.09, 0.001);
        assert_eq!(b.index, Some(3));
        assert!((b.low_bound - 0.086).abs() < 1e-12);
    }

    #[test]
    fn ozone_1h_below_floor_is_unresolved() {
        let b = resolve_with_floor(&o3_1h(), 0.02, 0.001);
        assert_eq!(b.index, None);
    }

    #[test]
    fn ozone_1h_above_floor_matches_from_bracket_two() {
        let b = resolve_with_floor(&o3_1h(), 0.15, 0.001);
        assert_eq!(b.index, Some(2));
        assert!((b.low_bound - 0.126).abs() < 1e-12);
        assert_eq!(b.high_bound, 0.164);
    }

    #[test]
    fn ozone_1h_beyond_table() {
        let b = resolve_with_floor(&o3_1h(), 0.7, 0.001);
        assert_eq!(b.index, None);
    }

    #[test]
    fn cascade_stays_on_hourly_table() {
        let b = resolve_cascade(&so2_1h(), &so2_24h(), 50.0, 900.0, 1.0);
        assert_eq!(b.index, Some(1));
        assert_eq!(b.concentration, 50.0);
        assert_eq!(b.low_bound, 36.0);
    }

    #[test]
    fn cascade_hands_over_to_daily() {
        let b = resolve_cascade(&so2_1h(), &so2_24h(), 400.0, 500.0, 1.0);
        assert_eq!(b.index, Some(4));
        assert_eq!(b.concentration, 500.0);
        assert_eq!(b.low_bound, 305.0);
        assert_eq!(b.high_bound, 604.0);
    }

    #[test]
    fn cascade_never_reverts() {
        // The 24h value is low but the 1h value already exhausted the hourly table
        let b = resolve_cascade(&so2_1h(), &so2_24h(), 400.0, 10.0, 1.0);
        assert_eq!(b.index, Some(4));
        assert_eq!(b.concentration, 10.0);
    }

    #[test]
    fn resolution_lists_brackets_in_order() {
        let primary = resolve_default(&pm10(), 1.0, 1.0);
        let secondary = resolve_default(&pm10(), 100.0, 1.0);
        let r = Resolution::Dual { primary, secondary };
        let indices: Vec<_> = r.brackets().map(|b| b.index).collect();
        assert_eq!(indices, vec![Some(0), Some(1)]);
    }
}
