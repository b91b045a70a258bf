//! AQI Formula Evaluation
//!
//! Linear interpolation of a concentration inside its bracket onto the
//! fixed index range of that bracket:
//!
//! ```text
//!         (I_hi - I_lo)
//! AQI = ----------------- × (C - BP_lo) + I_lo
//!        (BP_hi - BP_lo)
//! ```
//!
//! `I_hi` comes from [`AQI_BRACKET_HIGHS`]; `I_lo` is the previous
//! bracket's high (0 for the first bracket). An unresolved bracket never
//! reaches the formula and yields 0.
//!
//! ## Rounding
//!
//! The reference calculators disagree on `.5` ties. The engine rounds half
//! away from zero by default and offers half-to-even for parity with
//! tooling that uses banker's rounding. The same mode rounds day-batch
//! chunk means to the pollutant's precision.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    breakpoints::{Bracket, Resolution},
    constants::AQI_BRACKET_HIGHS,
};

/// Tie-break rule for rounding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RoundingMode {
    /// 2.5 → 3, -2.5 → -3
    #[default]
    HalfAwayFromZero,
    /// 2.5 → 2, 3.5 → 4
    HalfToEven,
}

impl RoundingMode {
    /// Round to an integer value
    pub fn round(&self, value: f64) -> f64 {
        match self {
            Self::HalfAwayFromZero => value.round(),
            Self::HalfToEven => value.round_ties_even(),
        }
    }

    /// Round to a number of decimals
    pub fn round_to(&self, value: f64, decimals: u8) -> f64 {
        let factor = 10f64.powi(i32::from(decimals));
        self.round(value * factor) / factor
    }
}

/// Index range `(I_lo, I_hi)` of a bracket; `(0, 0)` when unresolved
pub fn aqi_bounds(index: Option<usize>) -> (u16, u16) {
    match index {
        Some(i) if i < AQI_BRACKET_HIGHS.len() => {
            let high = AQI_BRACKET_HIGHS[i];
            let low = if i > 0 { AQI_BRACKET_HIGHS[i - 1] } else { 0 };
            (low, high)
        }
        _ => (0, 0),
    }
}

/// Index value for one bracket
pub fn evaluate(bracket: &Bracket, rounding: RoundingMode) -> u16 {
    if !bracket.is_resolved() {
        return 0;
    }
    let (aqi_low, aqi_high) = aqi_bounds(bracket.index);
    let aqi = f64::from(aqi_high - aqi_low) * (bracket.concentration - bracket.low_bound)
        / (bracket.high_bound - bracket.low_bound)
        + f64::from(aqi_low);

    // Float-to-int casts saturate: below-zero concentrations land on 0
    rounding.round(aqi) as u16
}

/// Index value for a pollutant: the largest candidate across its brackets
pub fn evaluate_resolution(resolution: &Resolution, rounding: RoundingMode) -> u16 {
    resolution
        .brackets()
        .map(|b| evaluate(b, rounding))
        .max()
        .unwrap_or(0)
}
