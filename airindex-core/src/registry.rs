//! Pollutant Registry
//!
//! Read-only lookup from EU pollutant id to [`PollutantDefinition`]. The
//! registry is built once at startup and handed to the calculator by
//! reference; it is never mutated afterwards, so any number of threads can
//! share it without locking.
//!
//! ## Built-in Tables
//!
//! ```text
//! Id    Code   Intervals  Decimals  Unit    Tables (bracket highs)
//! 7     O3     8h, 1h     3         ppm     8h: .054 .070 .085 .105 .200 n/a n/a
//!                                           1h: n/a .125 .164 .204 .404 .504 .604
//! 6001  PM2.5  24h        1         µg/m3   12 35.4 55.4 150.4 250.4 350.4 500.4
//! 5     PM10   24h        0         µg/m3   54 154 254 354 424 504 604
//! 10    CO     8h         1         ppm     4.4 9.4 12.4 15.4 30.4 40.4 50.4
//! 1     SO2    1h, 24h    3         ppb     1h: 35 75 185 304 n/a n/a n/a
//!                                           24h: n/a n/a n/a n/a 604 804 1004
//! 8     NO2    1h         1         ppb     53 100 360 649 1249 1649 2049
//! ```
//!
//! ## Custom Registries
//!
//! ```rust
//! use airindex_core::{PollutantRegistry, PollutantDefinition, BreakpointSlot};
//!
//! let pm10_strict = PollutantDefinition::builder(5, "PM10")
//!     .interval(24, BreakpointSlot::table([
//!         Some(45.0), Some(154.0), Some(254.0), Some(354.0),
//!         Some(424.0), Some(504.0), Some(604.0),
//!     ]))
//!     .build()?;
//!
//! let registry = PollutantRegistry::builder()
//!     .with_standard()
//!     .replace(pm10_strict)
//!     .build()?;
//! assert_eq!(registry.len(), 6);
//! # Ok::<(), airindex_core::AqiError>(())
//! ```

use std::collections::BTreeMap;

use crate::{
    constants::{INTERVAL_1H, INTERVAL_24H, INTERVAL_8H},
    errors::{AqiCalcResult, AqiError},
    pollutant::{ids, BreakpointSlot, PollutantDefinition},
    units::MeasurementUnit,
};

/// Immutable id → definition table
#[derive(Debug, Clone, PartialEq)]
pub struct PollutantRegistry {
    definitions: BTreeMap<u32, PollutantDefinition>,
}

impl PollutantRegistry {
    /// The six EPA pollutants
    pub fn standard() -> Self {
        let definitions = standard_definitions()
            .into_iter()
            .map(|def| (def.id(), def))
            .collect();
        Self { definitions }
    }

    /// Empty builder
    pub fn builder() -> PollutantRegistryBuilder {
        PollutantRegistryBuilder::default()
    }

    /// Definition for a pollutant id
    pub fn get(&self, id: u32) -> AqiCalcResult<&PollutantDefinition> {
        self.definitions
            .get(&id)
            .ok_or(AqiError::UnknownPollutant { id })
    }

    /// Definition for a formula code such as `"PM2.5"`
    pub fn by_code(&self, code: &str) -> Option<&PollutantDefinition> {
        self.definitions.values().find(|d| d.code() == code)
    }

    /// Registered ids in ascending order
    pub fn ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.definitions.keys().copied()
    }

    /// Definitions ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &PollutantDefinition> {
        self.definitions.values()
    }

    /// Number of definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// True when nothing is registered
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for PollutantRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Collects definitions and checks them as a set
#[derive(Debug, Clone, Default)]
pub struct PollutantRegistryBuilder {
    definitions: Vec<PollutantDefinition>,
}

impl PollutantRegistryBuilder {
    /// Add the built-in EPA definitions
    pub fn with_standard(mut self) -> Self {
        self.definitions.extend(standard_definitions());
        self
    }

    /// Add a definition; ids must be unique
    pub fn register(mut self, definition: PollutantDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Add a definition, dropping any earlier one with the same id
    pub fn replace(mut self, definition: PollutantDefinition) -> Self {
        self.definitions.retain(|d| d.id() != definition.id());
        self.definitions.push(definition);
        self
    }

    /// Finish, rejecting duplicate ids or codes
    pub fn build(self) -> AqiCalcResult<PollutantRegistry> {
        let mut definitions = BTreeMap::new();
        for def in self.definitions {
            if definitions.values().any(|d: &PollutantDefinition| d.code() == def.code()) {
                return Err(AqiError::configuration(format!(
                    "pollutant code {} registered twice",
                    def.code()
                )));
            }
            let id = def.id();
            if definitions.insert(id, def).is_some() {
                return Err(AqiError::configuration(format!(
                    "pollutant id {id} registered twice"
                )));
            }
        }
        log_debug!("Pollutant registry built with {} definitions", definitions.len());
        Ok(PollutantRegistry { definitions })
    }
}

fn standard_definitions() -> Vec<PollutantDefinition> {
    use MeasurementUnit::{MicrogramsPerCubicMeter, Ppb, Ppm};
    let t = BreakpointSlot::table;

    vec![
        PollutantDefinition::trusted(
            ids::O3,
            "O3",
            &[
                (INTERVAL_8H, t([Some(0.054), Some(0.07), Some(0.085), Some(0.105), Some(0.2), None, None])),
                (INTERVAL_1H, t([None, Some(0.125), Some(0.164), Some(0.204), Some(0.404), Some(0.504), Some(0.604)])),
            ],
            3,
            Ppm,
        ),
        PollutantDefinition::trusted(
            ids::PM25,
            "PM2.5",
            &[(INTERVAL_24H, t([Some(12.0), Some(35.4), Some(55.4), Some(150.4), Some(250.4), Some(350.4), Some(500.4)]))],
            1,
            MicrogramsPerCubicMeter,
        ),
        PollutantDefinition::trusted(
            ids::PM10,
            "PM10",
            &[(INTERVAL_24H, t([Some(54.0), Some(154.0), Some(254.0), Some(354.0), Some(424.0), Some(504.0), Some(604.0)]))],
            0,
            MicrogramsPerCubicMeter,
        ),
        PollutantDefinition::trusted(
            ids::CO,
            "CO",
            &[(INTERVAL_8H, t([Some(4.4), Some(9.4), Some(12.4), Some(15.4), Some(30.4), Some(40.4), Some(50.4)]))],
            1,
            Ppm,
        ),
        PollutantDefinition::trusted(
            ids::SO2,
            "SO2",
            &[
                (INTERVAL_1H, t([Some(35.0), Some(75.0), Some(185.0), Some(304.0), None, None, None])),
                (INTERVAL_24H, t([None, None, None, None, Some(604.0), Some(804.0), Some(1004.0)])),
            ],
            3,
            Ppb,
        ),
        PollutantDefinition::trusted(
            ids::NO2,
            "NO2",
            &[(INTERVAL_1H, t([Some(53.0), Some(100.0), Some(360.0), Some(649.0), Some(1249.0), Some(1649.0), Some(2049.0)]))],
            1,
            Ppb,
        ),
    ]
}
