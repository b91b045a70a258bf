//! Core traits
//!
//! Seams between the engine and the data it is fed. Keep them small: the
//! cleaning stages upstream own the real data structures.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

/// One hourly concentration reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlySample {
    /// End of the measurement hour
    pub timestamp: NaiveDateTime,
    /// Concentration in the caller's unit
    pub value: f64,
}

impl HourlySample {
    /// Sample at `timestamp`
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// A time-indexed concentration series
///
/// Implemented for the shapes upstream stages already hold, so the caller
/// never has to copy into an engine-specific container first.
pub trait ConcentrationSeries {
    /// Samples in any order; the aggregator sorts them
    fn to_samples(&self) -> Vec<HourlySample>;
}

impl ConcentrationSeries for [HourlySample] {
    fn to_samples(&self) -> Vec<HourlySample> {
        self.to_vec()
    }
}

impl ConcentrationSeries for Vec<HourlySample> {
    fn to_samples(&self) -> Vec<HourlySample> {
        self.clone()
    }
}

impl ConcentrationSeries for [(NaiveDateTime, f64)] {
    fn to_samples(&self) -> Vec<HourlySample> {
        self.iter().map(|&(t, v)| HourlySample::new(t, v)).collect()
    }
}

impl ConcentrationSeries for BTreeMap<NaiveDateTime, f64> {
    fn to_samples(&self) -> Vec<HourlySample> {
        self.iter().map(|(&t, &v)| HourlySample::new(t, v)).collect()
    }
}

/// Trait for values that can be fed to the aggregator
pub trait Validatable {
    /// Check if the value is usable (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f64 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}

impl Validatable for HourlySample {
    fn is_valid(&self) -> bool {
        self.value.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2022, 3, 1).unwrap().and_hms_opt(hour, 0, 0).unwrap()
    }

    #[test]
    fn map_and_pairs_produce_same_samples() {
        let pairs = [(at(1), 2.0), (at(0), 1.0)];
        let map: BTreeMap<_, _> = pairs.iter().copied().collect();

        let from_pairs = pairs[..].to_samples();
        let from_map = map.to_samples();
        assert_eq!(from_pairs.len(), 2);
        // BTreeMap iterates in timestamp order
        assert_eq!(from_map[0], HourlySample::new(at(0), 1.0));
    }

    #[test]
    fn nan_is_not_valid() {
        assert!(!f64::NAN.is_valid());
        assert!(!f64::INFINITY.is_valid());
        assert!(12.5_f64.is_valid());
    }
}
