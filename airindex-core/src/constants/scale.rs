//! AQI Scale Constants
//!
//! The EPA index is split into seven brackets. Each pollutant table lists
//! the concentration at the top of every bracket; the index values at the
//! top of the brackets are fixed and shared by all pollutants.
//!
//! ```text
//! Bracket | AQI range | Meaning
//! --------|-----------|--------------------------------
//!    0    |   0-50    | Good
//!    1    |  51-100   | Moderate
//!    2    | 101-150   | Unhealthy for Sensitive Groups
//!    3    | 151-200   | Unhealthy
//!    4    | 201-300   | Very unhealthy
//!    5    | 301-400   | Hazardous
//!    6    | 401-500   | Hazardous
//! ```
//!
//! Source: EPA Technical Assistance Document for the Reporting of Daily
//! Air Quality (EPA-454/B-18-007)

/// Number of brackets in every breakpoint table.
pub const BREAKPOINT_COUNT: usize = 7;

/// Index value at the top of each bracket.
pub const AQI_BRACKET_HIGHS: [u16; BREAKPOINT_COUNT] = [50, 100, 150, 200, 300, 400, 500];

/// Highest value on the reportable scale.
pub const AQI_SCALE_MAX: u16 = 500;

/// Upper end of the "Beyond the AQI" category.
pub const AQI_BEYOND_MAX: u16 = 1000;

/// Number of rows in the category table (seven brackets plus "beyond").
pub const CATEGORY_COUNT: usize = BREAKPOINT_COUNT + 1;

/// Maximum averaging intervals a single pollutant combines (O₃, SO₂).
pub const MAX_INTERVALS: usize = 2;
