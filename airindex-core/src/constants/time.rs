//! Time-Related Constants
//!
//! Averaging intervals and day-batch geometry.

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Number of hourly samples a day-batch call expects.
pub const DAY_BATCH_LEN: usize = HOURS_PER_DAY as usize;

/// One-hour averaging interval.
///
/// In series mode the 1-hour statistic of a day is its worst hour.
pub const INTERVAL_1H: u32 = 1;

/// Eight-hour averaging interval (CO, O₃).
pub const INTERVAL_8H: u32 = 8;

/// Twenty-four-hour averaging interval (PM, SO₂ upper brackets).
pub const INTERVAL_24H: u32 = 24;
