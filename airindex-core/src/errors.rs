//! Error Types for AQI Computation
//!
//! ## Error Categories
//!
//! ### Lookup Failures
//! - `UnknownPollutant`: the pollutant id is not in the registry
//! - `InvalidUnit`: a unit label outside the closed set
//!   {"ppm", "ppb", "µg/m3", "mg/m3"}
//!
//! ### Input Failures
//! - `MalformedInput`: a day batch without exactly 24 values, or a NaN /
//!   infinite concentration that upstream cleaning should have removed
//!
//! ### Setup Failures
//! - `Configuration`: a pollutant definition that cannot be evaluated
//!   (missing table, non-increasing thresholds, broken cascade)
//!
//! A concentration that falls outside every bracket is **not** an error.
//! It resolves to an unresolved bracket and contributes an index of 0.
//!
//! ## Error Handling Strategy
//!
//! Nothing here is transient, so the engine never retries. Errors surface
//! synchronously and the caller decides whether to skip the record or
//! abort the batch:
//!
//! ```rust
//! use airindex_core::{AqiCalculator, AqiError};
//!
//! let calculator = AqiCalculator::standard();
//! match calculator.calculate_aqi_for_day(42, &[0.0; 24], "ppm") {
//!     Ok(aqi) => println!("AQI {aqi}"),
//!     Err(AqiError::UnknownPollutant { id }) => println!("skip pollutant {id}"),
//!     Err(other) => println!("abort batch: {other}"),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for engine operations
pub type AqiCalcResult<T> = Result<T, AqiError>;

/// Errors raised by the AQI engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AqiError {
    /// Pollutant id is not registered
    #[error("Unknown pollutant id {id}")]
    UnknownPollutant {
        /// The EU standard identifier that was requested
        id: u32,
    },

    /// Unit label outside the supported set
    #[error("Invalid measurement unit '{unit}'")]
    InvalidUnit {
        /// The label as supplied by the caller
        unit: String,
    },

    /// Concentration input the aggregator cannot use
    #[error("Malformed input: {reason}")]
    MalformedInput {
        /// What was wrong with the input
        reason: String,
    },

    /// Pollutant or category tables that cannot be evaluated
    #[error("Configuration error: {reason}")]
    Configuration {
        /// Which rule the table broke
        reason: String,
    },
}

impl AqiError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedInput { reason: reason.into() }
    }

    pub(crate) fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration { reason: reason.into() }
    }
}
