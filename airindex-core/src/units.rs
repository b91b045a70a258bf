//! Concentration Unit Conversion
//!
//! Pollutant feeds report concentrations either as mass per volume
//! (µg/m³, mg/m³) or as mixing ratios (ppm, ppb). Breakpoint tables are
//! defined in one native unit per pollutant, so every aggregated value is
//! converted before bracket lookup.
//!
//! ## Conversion Path
//!
//! ```text
//! source µg/m³ ──÷1000──┐
//!                       ├─► × 24.45 / M ─► ppm ─► ×1000 ─► ppb
//! source mg/m³ ─────────┘
//! ```
//!
//! Only the mass → mixing-ratio direction applies the molar factor. A
//! µg/m³ target returns the value as it stands after the µg → mg step, and
//! an mg/m³ target falls through to the unconverted input. Particulate
//! pollutants are never converted to a mixing ratio: their tables are
//! native µg/m³.
//!
//! The molar factor is applied whenever the target is a mixing ratio,
//! including when the source already is one. A ppm → ppb conversion is
//! therefore scaled by `24.45 / M` before the ×1000, and ppb → ppm the
//! same way. Those paths log a warning. No pair involving a mixing ratio
//! round-trips; µg/m³ ↔ mg/m³ only does because neither direction scales.
//!
//! ## Micro Sign
//!
//! Labels arrive with either U+00B5 MICRO SIGN (`µ`) or U+03BC GREEK SMALL
//! LETTER MU (`μ`). Both parse to [`MeasurementUnit::MicrogramsPerCubicMeter`]
//! here, so nothing downstream compares strings.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::physics::{
        MILLI_PER_MICRO, MOLAR_MASS_CO, MOLAR_MASS_NO2, MOLAR_MASS_O3, MOLAR_MASS_SO2,
        MOLAR_VOLUME_25C_L_PER_MOL,
    },
    errors::{AqiCalcResult, AqiError},
    pollutant::ids,
};

/// Measurement units accepted by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasurementUnit {
    /// Parts per million
    Ppm,
    /// Parts per billion
    Ppb,
    /// Micrograms per cubic meter
    MicrogramsPerCubicMeter,
    /// Milligrams per cubic meter
    MilligramsPerCubicMeter,
}

impl MeasurementUnit {
    /// Every supported unit
    pub const ALL: [MeasurementUnit; 4] = [
        MeasurementUnit::Ppm,
        MeasurementUnit::Ppb,
        MeasurementUnit::MicrogramsPerCubicMeter,
        MeasurementUnit::MilligramsPerCubicMeter,
    ];

    /// Canonical label, always with the micro sign U+00B5
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ppm => "ppm",
            Self::Ppb => "ppb",
            Self::MicrogramsPerCubicMeter => "µg/m3",
            Self::MilligramsPerCubicMeter => "mg/m3",
        }
    }

    /// True for ppm and ppb
    pub fn is_mixing_ratio(&self) -> bool {
        matches!(self, Self::Ppm | Self::Ppb)
    }
}

impl fmt::Display for MeasurementUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MeasurementUnit {
    type Err = AqiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ppm" => Ok(Self::Ppm),
            "ppb" => Ok(Self::Ppb),
            // U+00B5 and U+03BC
            "\u{b5}g/m3" | "\u{3bc}g/m3" => Ok(Self::MicrogramsPerCubicMeter),
            "mg/m3" => Ok(Self::MilligramsPerCubicMeter),
            other => Err(AqiError::InvalidUnit { unit: other.to_string() }),
        }
    }
}

/// Molar mass in g/mol for pollutants that have a mixing-ratio form.
///
/// Returns `None` for particulate matter.
pub fn molar_mass(pollutant_id: u32) -> Option<f64> {
    match pollutant_id {
        ids::O3 => Some(MOLAR_MASS_O3),
        ids::CO => Some(MOLAR_MASS_CO),
        ids::SO2 => Some(MOLAR_MASS_SO2),
        ids::NO2 => Some(MOLAR_MASS_NO2),
        _ => None,
    }
}

/// Convert a concentration between units for the given pollutant.
///
/// Same-unit conversion is the identity for every pollutant.
pub fn convert(
    value: f64,
    source: MeasurementUnit,
    target: MeasurementUnit,
    pollutant_id: u32,
) -> f64 {
    use MeasurementUnit::*;

    if source == target {
        return value;
    }

    let mut converted = value;
    if source == MicrogramsPerCubicMeter {
        converted /= MILLI_PER_MICRO;
    }

    if target.is_mixing_ratio() {
        if let Some(mass) = molar_mass(pollutant_id) {
            if source.is_mixing_ratio() {
                log_warn!(
                    "Molar factor applied to mixing ratio {} -> {} for pollutant {}",
                    source, target, pollutant_id
                );
            }
            converted = converted * MOLAR_VOLUME_25C_L_PER_MOL / mass;
        }
    }

    match target {
        Ppm => converted,
        Ppb => converted * MILLI_PER_MICRO,
        MicrogramsPerCubicMeter => converted,
        MilligramsPerCubicMeter => {
            log_warn!(
                "No conversion path {} -> {} for pollutant {}, value kept",
                source, target, pollutant_id
            );
            value
        }
    }
}

/// Convert using raw unit labels, validating both first
pub fn convert_labels(
    value: f64,
    source: &str,
    target: &str,
    pollutant_id: u32,
) -> AqiCalcResult<f64> {
    let source: MeasurementUnit = source.parse()?;
    let target: MeasurementUnit = target.parse()?;
    Ok(convert(value, source, target, pollutant_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use MeasurementUnit::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn parses_both_micro_glyphs() {
        assert_eq!("µg/m3".parse::<MeasurementUnit>(), Ok(MicrogramsPerCubicMeter));
        assert_eq!("μg/m3".parse::<MeasurementUnit>(), Ok(MicrogramsPerCubicMeter));
        assert_eq!(" ppb ".parse::<MeasurementUnit>(), Ok(Ppb));
    }

    #[test]
    fn rejects_unknown_labels() {
        let err = "ug/m3".parse::<MeasurementUnit>().unwrap_err();
        assert_eq!(err, AqiError::InvalidUnit { unit: "ug/m3".to_string() });
    }

    #[test]
    fn identity_short_circuit() {
        for unit in MeasurementUnit::ALL {
            assert_eq!(convert(12.5, unit, unit, ids::CO), 12.5);
        }
    }

    #[test]
    fn micrograms_to_ppm_for_ozone() {
        // 100 µg/m3 O3 = 0.1 mg/m3 * 24.45 / 48
        let ppm = convert(100.0, MicrogramsPerCubicMeter, Ppm, ids::O3);
        assert!(close(ppm, 0.1 * 24.45 / 48.0));
    }

    #[test]
    fn milligrams_to_ppm_for_carbon_monoxide() {
        let ppm = convert(0.6, MilligramsPerCubicMeter, Ppm, ids::CO);
        assert!(close(ppm, 0.6 * 24.45 / 28.01));
    }

    #[test]
    fn micrograms_to_ppb_for_nitrogen_dioxide() {
        let ppb = convert(40.0, MicrogramsPerCubicMeter, Ppb, ids::NO2);
        assert!(close(ppb, 40.0 * 24.45 / 46.01));
    }

    #[test]
    fn particulates_keep_mass_value() {
        // No molar mass: only the µg -> mg step applies
        let value = convert(35.0, MicrogramsPerCubicMeter, Ppm, ids::PM25);
        assert!(close(value, 0.035));
    }

    #[test]
    fn milligram_target_falls_through() {
        assert_eq!(convert(7.0, Ppm, MilligramsPerCubicMeter, ids::CO), 7.0);
        assert_eq!(convert(7.0, MicrogramsPerCubicMeter, MilligramsPerCubicMeter, ids::CO), 7.0);
    }

    #[test]
    fn mixing_ratio_pairs_keep_molar_factor() {
        let ppb = convert(7.0, Ppm, Ppb, ids::CO);
        assert!(close(ppb, 7.0 * 24.45 / 28.01 * 1000.0));
        let ppm = convert(1000.0, Ppb, Ppm, ids::NO2);
        assert!(close(ppm, 1000.0 * 24.45 / 46.01));
    }

    #[test]
    fn mixing_ratio_round_trips_drift() {
        let back = convert(convert(7.0, Ppm, Ppb, ids::CO), Ppb, Ppm, ids::CO);
        assert!((back - 5333.711846931802).abs() < 1e-6);

        let back = convert(convert(7.0, MilligramsPerCubicMeter, Ppm, ids::CO), Ppm, MilligramsPerCubicMeter, ids::CO);
        assert!((back - 6.110317743662978).abs() < 1e-9);

        for source in MeasurementUnit::ALL {
            for target in MeasurementUnit::ALL {
                if source == target || !(source.is_mixing_ratio() || target.is_mixing_ratio()) {
                    continue;
                }
                let back = convert(convert(7.0, source, target, ids::CO), target, source, ids::CO);
                assert!(!close(back, 7.0), "{source} -> {target} -> {source}");
            }
        }

        // Mass to mass passes the value through unscaled both ways
        let back = convert(convert(7.0, MicrogramsPerCubicMeter, MilligramsPerCubicMeter, ids::CO), MilligramsPerCubicMeter, MicrogramsPerCubicMeter, ids::CO);
        assert_eq!(back, 7.0);
    }

    #[test]
    fn labels_are_validated() {
        assert!(convert_labels(1.0, "ppm", "furlongs", ids::CO).is_err());
        assert_eq!(convert_labels(1.0, "μg/m3", "µg/m3", ids::O3), Ok(1.0));
    }
}
