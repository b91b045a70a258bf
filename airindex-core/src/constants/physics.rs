//! Physical Constants for Unit Conversion
//!
//! Mass concentrations (µg/m³, mg/m³) and mixing ratios (ppm, ppb) are
//! related through the molar volume of an ideal gas and the molar mass of
//! the pollutant:
//!
//! ```text
//! ppm = mg/m³ × Vm / M
//!
//! Where:
//! - Vm = molar volume at 25°C and 1 atm (24.45 L/mol)
//! - M  = molar mass of the pollutant (g/mol)
//! ```

// ===== GAS LAWS =====

/// Molar volume of an ideal gas at 25°C and 101.325 kPa (L/mol).
///
/// The reference condition used by US EPA for ambient air reporting.
///
/// Source: 40 CFR Part 50, EPA conversion guidance
pub const MOLAR_VOLUME_25C_L_PER_MOL: f64 = 24.45;

/// Mass-unit scaling between µg and mg, and between ppm and ppb.
pub const MILLI_PER_MICRO: f64 = 1000.0;

// ===== MOLAR MASSES (g/mol) =====

/// Ozone (O₃).
pub const MOLAR_MASS_O3: f64 = 48.0;

/// Carbon monoxide (CO).
pub const MOLAR_MASS_CO: f64 = 28.01;

/// Sulfur dioxide (SO₂).
pub const MOLAR_MASS_SO2: f64 = 64.06;

/// Nitrogen dioxide (NO₂).
pub const MOLAR_MASS_NO2: f64 = 46.01;
