//! AQI Categories
//!
//! Ordered table from index ranges to a human-readable category and the
//! EPA display color. Lookup is a linear scan over eight rows; a value no
//! row contains (above 1000, or negative) falls back to the last row
//! instead of failing.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{AQI_BEYOND_MAX, AQI_BRACKET_HIGHS, CATEGORY_COUNT},
    errors::{AqiCalcResult, AqiError},
};

/// Display color as an RGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// One row of the category table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AqiCategory {
    /// Display name
    pub name: String,
    /// Lowest index in the category (inclusive)
    pub range_low: u16,
    /// Highest index in the category (inclusive)
    pub range_high: u16,
    /// Display color
    pub color: Rgb,
}

impl AqiCategory {
    /// Row covering `range_low..=range_high`
    pub fn new(name: impl Into<String>, range_low: u16, range_high: u16, color: Rgb) -> Self {
        Self { name: name.into(), range_low, range_high, color }
    }

    /// Inclusive on both ends
    pub fn contains(&self, value: f64) -> bool {
        f64::from(self.range_low) <= value && value <= f64::from(self.range_high)
    }
}

/// Immutable, ordered category table
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryRegistry {
    categories: Vec<AqiCategory>,
}

impl CategoryRegistry {
    /// EPA categories plus "Beyond the AQI" up to 1000
    pub fn standard() -> Self {
        let rows = [
            ("Good", Rgb(0, 228, 0)),
            ("Moderate", Rgb(255, 255, 0)),
            ("Unhealthy for Sensitive Groups", Rgb(255, 126, 0)),
            ("Unhealthy", Rgb(255, 0, 0)),
            ("Very unhealthy", Rgb(143, 63, 151)),
            ("Hazardous", Rgb(126, 0, 35)),
            ("Hazardous", Rgb(126, 0, 35)),
        ];

        let mut categories = Vec::with_capacity(CATEGORY_COUNT);
        let mut low = 0;
        for ((name, color), high) in rows.into_iter().zip(AQI_BRACKET_HIGHS) {
            categories.push(AqiCategory::new(name, low, high, color));
            low = high + 1;
        }
        categories.push(AqiCategory::new("Beyond the AQI", low, AQI_BEYOND_MAX, Rgb(0, 0, 0)));

        Self { categories }
    }

    /// Custom table; rows must be non-empty, ordered and contiguous
    pub fn new(categories: Vec<AqiCategory>) -> AqiCalcResult<Self> {
        if categories.is_empty() {
            return Err(AqiError::configuration("category table is empty"));
        }
        for row in &categories {
            if row.range_low > row.range_high {
                return Err(AqiError::configuration(format!(
                    "category '{}' has an inverted range",
                    row.name
                )));
            }
        }
        for pair in categories.windows(2) {
            if u32::from(pair[0].range_high) + 1 != u32::from(pair[1].range_low) {
                return Err(AqiError::configuration(format!(
                    "categories '{}' and '{}' are not contiguous",
                    pair[0].name, pair[1].name
                )));
            }
        }
        Ok(Self { categories })
    }

    /// Category for an index value, falling back to the last row
    pub fn category_for(&self, value: f64) -> &AqiCategory {
        match self.categories.iter().find(|c| c.contains(value)) {
            Some(category) => category,
            // new() and standard() never produce an empty table
            None => &self.categories[self.categories.len() - 1],
        }
    }

    /// Rows in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &AqiCategory> {
        self.categories.iter()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// True when there are no rows
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
