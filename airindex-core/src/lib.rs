//! EPA Air Quality Index engine
//!
//! Turns hourly pollutant concentrations into the 0-500 AQI scale and its
//! health categories. Pollutant tables and category rows live in
//! registries that are built once and shared read-only.
//!
//! Key properties:
//! - Piecewise-linear EPA formula with configurable rounding
//! - Dual-table resolution for ozone, cascaded tables for SO2
//! - Day-batch, continuous-series and per-value aggregation
//! - No shared mutable state; one calculator serves every thread
//!
//! ```
//! use airindex_core::{AqiCalculator, pollutant::ids};
//!
//! let calculator = AqiCalculator::standard();
//! let aqi = calculator.calculate_aqi_for_day(ids::PM10, &[182.0; 24], "µg/m3")?;
//! assert_eq!(aqi, 114);
//! assert_eq!(calculator.category_for(aqi.into()).name, "Unhealthy for Sensitive Groups");
//! # Ok::<(), airindex_core::AqiError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

// Logging shims; compiled out without the `log` feature
#[cfg(feature = "log")]
macro_rules! log_warn {
    ($($arg:tt)*) => { log::warn!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "log"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod aggregate;
pub mod breakpoints;
pub mod calculator;
pub mod category;
pub mod constants;
pub mod errors;
pub mod formula;
pub mod pollutant;
pub mod registry;
pub mod traits;
pub mod units;

// Public API
pub use calculator::{AqiCalculator, AqiReport, AqiResult, CalculatorConfig, DayJob, OverallAqi};
pub use category::{AqiCategory, CategoryRegistry, Rgb};
pub use errors::{AqiCalcResult, AqiError};
pub use formula::RoundingMode;
pub use pollutant::{
    BreakpointSlot, BreakpointTable, PollutantDefinition, PollutantDefinitionBuilder,
    ResolutionStrategy,
};
pub use registry::{PollutantRegistry, PollutantRegistryBuilder};
pub use traits::{ConcentrationSeries, HourlySample, Validatable};
pub use units::MeasurementUnit;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
