//! Metric prefixes and the two rescalable axes of a sweep.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

/// Metric prefix applied to volts or amps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitPrefix {
    Pico,
    Nano,
    Micro,
    Milli,
    /// No prefix: values are in base units.
    #[default]
    Base,
    Kilo,
    Mega,
    Giga,
}

impl UnitPrefix {
    /// All prefixes, smallest factor first.
    pub const ALL: [UnitPrefix; 8] = [
        UnitPrefix::Pico,
        UnitPrefix::Nano,
        UnitPrefix::Micro,
        UnitPrefix::Milli,
        UnitPrefix::Base,
        UnitPrefix::Kilo,
        UnitPrefix::Mega,
        UnitPrefix::Giga,
    ];

    /// Multiplier relative to the base unit.
    pub fn factor(self) -> f64 {
        match self {
            UnitPrefix::Pico => 1e-12,
            UnitPrefix::Nano => 1e-9,
            UnitPrefix::Micro => 1e-6,
            UnitPrefix::Milli => 1e-3,
            UnitPrefix::Base => 1.0,
            UnitPrefix::Kilo => 1e3,
            UnitPrefix::Mega => 1e6,
            UnitPrefix::Giga => 1e9,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            UnitPrefix::Pico => "p",
            UnitPrefix::Nano => "n",
            UnitPrefix::Micro => "u",
            UnitPrefix::Milli => "m",
            UnitPrefix::Base => "",
            UnitPrefix::Kilo => "k",
            UnitPrefix::Mega => "M",
            UnitPrefix::Giga => "G",
        }
    }

    /// Largest prefix whose factor does not exceed `|value|`.
    ///
    /// Used for human-readable output; zero and non-finite values map to `Base`.
    pub fn for_magnitude(value: f64) -> UnitPrefix {
        let abs = value.abs();
        if !abs.is_finite() || abs == 0.0 {
            return UnitPrefix::Base;
        }
        UnitPrefix::ALL
            .iter()
            .rev()
            .copied()
            .find(|p| abs >= p.factor())
            .unwrap_or(UnitPrefix::Pico)
    }
}

impl FromStr for UnitPrefix {
    type Err = AnalysisError;

    /// Prefix symbols are case-sensitive (`m` is milli, `M` is mega).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "p" => Ok(UnitPrefix::Pico),
            "n" => Ok(UnitPrefix::Nano),
            "u" | "\u{b5}" | "\u{3bc}" => Ok(UnitPrefix::Micro),
            "m" => Ok(UnitPrefix::Milli),
            "" => Ok(UnitPrefix::Base),
            "k" => Ok(UnitPrefix::Kilo),
            "M" => Ok(UnitPrefix::Mega),
            "G" => Ok(UnitPrefix::Giga),
            other => Err(AnalysisError::UnknownUnit(other.to_string())),
        }
    }
}

impl std::fmt::Display for UnitPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Which series of a sweep a rescale applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Voltage,
    Current,
}

impl Axis {
    /// Base unit symbol.
    pub fn unit(self) -> &'static str {
        match self {
            Axis::Voltage => "V",
            Axis::Current => "A",
        }
    }
}

impl FromStr for Axis {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v" | "voltage" | "volts" => Ok(Axis::Voltage),
            "i" | "current" => Ok(Axis::Current),
            _ => Err(AnalysisError::InvalidAxis(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_parse_case_sensitively() {
        assert_eq!("m".parse::<UnitPrefix>().unwrap(), UnitPrefix::Milli);
        assert_eq!("M".parse::<UnitPrefix>().unwrap(), UnitPrefix::Mega);
        assert_eq!("".parse::<UnitPrefix>().unwrap(), UnitPrefix::Base);
        assert!(matches!("x".parse::<UnitPrefix>(), Err(AnalysisError::UnknownUnit(_))));
    }

    #[test]
    fn symbols_round_trip() {
        for p in UnitPrefix::ALL {
            assert_eq!(p.symbol().parse::<UnitPrefix>().unwrap(), p);
        }
    }

    #[test]
    fn factors_are_ordered() {
        for pair in UnitPrefix::ALL.windows(2) {
            assert!(pair[0].factor() < pair[1].factor());
        }
    }

    #[test]
    fn magnitude_picks_engineering_prefix() {
        assert_eq!(UnitPrefix::for_magnitude(2.5e-6), UnitPrefix::Micro);
        assert_eq!(UnitPrefix::for_magnitude(-4.7e3), UnitPrefix::Kilo);
        assert_eq!(UnitPrefix::for_magnitude(0.5), UnitPrefix::Milli);
        assert_eq!(UnitPrefix::for_magnitude(f64::INFINITY), UnitPrefix::Base);
    }

    #[test]
    fn axis_parse_accepts_short_and_long_names() {
        assert_eq!("V".parse::<Axis>().unwrap(), Axis::Voltage);
        assert_eq!("current".parse::<Axis>().unwrap(), Axis::Current);
        assert!(matches!("R".parse::<Axis>(), Err(AnalysisError::InvalidAxis(_))));
    }
}
