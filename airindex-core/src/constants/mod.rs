//! Constants for AirIndex Core
//!
//! Every numeric value the engine depends on lives here, documented with
//! its unit and source.
//!
//! ## Organization
//!
//! - **Physics**: molar volume and pollutant molar masses
//! - **Scale**: AQI bracket geometry
//! - **Time**: averaging intervals and day-batch size
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Reference the regulatory source when adding a new one
//! 3. Use descriptive names that include units

/// Physical constants used by unit conversion.
pub mod physics;

/// AQI scale geometry shared by every pollutant.
pub mod scale;

/// Averaging intervals and day-batch geometry.
pub mod time;

// Re-export commonly used constants for convenience
pub use physics::{MOLAR_VOLUME_25C_L_PER_MOL, MILLI_PER_MICRO};

pub use scale::{
    AQI_BRACKET_HIGHS, AQI_SCALE_MAX, AQI_BEYOND_MAX,
    BREAKPOINT_COUNT, CATEGORY_COUNT, MAX_INTERVALS,
};

pub use time::{
    HOURS_PER_DAY, DAY_BATCH_LEN,
    INTERVAL_1H, INTERVAL_8H, INTERVAL_24H,
};
