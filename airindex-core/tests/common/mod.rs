//! Shared fixtures for integration tests
//!
//! Hourly data comes from real monitoring-station days (CO, O3, PM10) and
//! a week of daily PM2.5 means. Each fixture carries its expected index.

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};

use airindex_core::{pollutant::ids, AqiCalculator, HourlySample};

/// One day of hourly input with its expected outcome
pub struct DayFixture {
    pub name: &'static str,
    pub pollutant_id: u32,
    pub unit: &'static str,
    pub hourly: [f64; 24],
    pub expected_aqi: u16,
    pub expected_category: &'static str,
}

pub const CO_GOOD: DayFixture = DayFixture {
    name: "co_good",
    pollutant_id: ids::CO,
    unit: "mg/m3",
    hourly: [
        0.40861201, 0.43800252, 0.49664002, 0.49141851, 0.5072295, 0.48276847,
        0.45546349, 0.47943699, 0.517641, 0.55236554, 0.61161899, 0.608967,
        0.59491753, 0.57926702, 0.56780552, 0.56874346, 0.64490449, 0.578799,
        0.56269752, 0.55784749, 0.55327248, 0.51070499, 0.52470409, 0.539514,
    ],
    expected_aqi: 6,
    expected_category: "Good",
};

pub const CO_SPIKE: DayFixture = DayFixture {
    name: "co_spike",
    pollutant_id: ids::CO,
    unit: "mg/m3",
    hourly: [
        5.40861201, 5.43800252, 5.49664002, 5.49141851, 5.5072295, 5.48276847,
        5.45546349, 5.47943699, 5.517641, 4.55236554, 5.61161899, 3.608967,
        4.59491753, 5.57926702, 4.76780552, 5.76874346, 5.64490449, 5.578799,
        53.56269752, 4.55784749, 5.55327248, 3.71070499, 4.72470409, 3.739514,
    ],
    expected_aqi: 100,
    expected_category: "Moderate",
};

pub const O3_GOOD: DayFixture = DayFixture {
    name: "o3_good",
    pollutant_id: ids::O3,
    unit: "µg/m3",
    hourly: [
        20.46, 15.67, 14.9, 14.76, 18.24, 20.5, 15.49, 17.57, 16.14, 20.82, 25.48, 28.57,
        32.22, 34.8, 38.36, 34.54, 23.65, 23.77, 24.53, 20.58, 20.98, 22.32, 21.54, 20.74,
    ],
    expected_aqi: 14,
    expected_category: "Good",
};

pub const PM10_GOOD: DayFixture = DayFixture {
    name: "pm10_good",
    pollutant_id: ids::PM10,
    unit: "µg/m3",
    hourly: [
        30.8, 11.7, 10.1, 10.1, 12.2, 9.8, 8.0, 10.8, 5.9, 7.5, 13.6, 14.5,
        9.0, 9.2, 13.0, 10.5, 8.9, 6.0, 6.3, 6.9, 8.6, 8.6, 5.0, 8.2,
    ],
    expected_aqi: 9,
    expected_category: "Good",
};

pub const PM10_UNHEALTHY: DayFixture = DayFixture {
    name: "pm10_unhealthy",
    pollutant_id: ids::PM10,
    unit: "µg/m3",
    hourly: [
        160.8, 171.7, 180.1, 170.1, 192.2, 191.8, 208.0, 180.8, 159.9, 177.5, 183.6, 194.5,
        209.0, 209.2, 163.0, 170.5, 182.9, 167.0, 165.3, 168.9, 182.6, 187.6, 205.0, 180.2,
    ],
    expected_aqi: 114,
    expected_category: "Unhealthy for Sensitive Groups",
};

pub const DAY_FIXTURES: [DayFixture; 5] = [CO_GOOD, CO_SPIKE, O3_GOOD, PM10_GOOD, PM10_UNHEALTHY];

/// A week of daily PM2.5 means in µg/m3
pub const PM25_DAILY_MEANS: [f64; 7] = [
    23.835134, 33.95706016, 33.15522659, 21.98010993, 20.41169521, 16.04986439, 18.85318373,
];

pub const PM25_DAILY_AQI: [u16; 7] = [75, 97, 95, 71, 68, 58, 64];

pub fn calculator() -> AqiCalculator {
    AqiCalculator::standard()
}

pub fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2022, 3, day)
        .and_then(|d| d.and_hms_opt(hour, 0, 0))
        .expect("valid fixture timestamp")
}

/// Hourly samples for consecutive days starting on March `first_day`
pub fn hourly_series(first_day: u32, days: &[&[f64; 24]]) -> Vec<HourlySample> {
    days.iter()
        .enumerate()
        .flat_map(|(offset, values)| {
            values
                .iter()
                .enumerate()
                .map(move |(h, &v)| HourlySample::new(at(first_day + offset as u32, h as u32), v))
        })
        .collect()
}
