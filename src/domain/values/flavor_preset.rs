use crate::domain::values::flavor_vector::FlavorVector;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named starting points for the flavor editor. Values are independent per
/// axis and are not normalized to any total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlavorPreset {
    Balanced,
    Rich,
    Light,
    Dry,
    Sweet,
    Sparkling,
}

const BALANCED: FlavorVector = FlavorVector::from_const([0.4, 0.4, 0.4, 0.4, 0.4, 0.4]);
const RICH: FlavorVector = FlavorVector::from_const([0.5, 0.8, 0.7, 0.5, 0.2, 0.2]);
const LIGHT: FlavorVector = FlavorVector::from_const([0.3, 0.3, 0.2, 0.5, 0.4, 0.8]);
const DRY: FlavorVector = FlavorVector::from_const([0.3, 0.5, 0.5, 0.3, 0.8, 0.6]);
const SWEET: FlavorVector = FlavorVector::from_const([0.7, 0.6, 0.3, 0.7, 0.1, 0.5]);
const SPARKLING: FlavorVector = FlavorVector::from_const([0.5, 0.4, 0.3, 0.4, 0.6, 0.7]);

impl FlavorPreset {
    pub const ALL: [FlavorPreset; 6] = [
        FlavorPreset::Balanced,
        FlavorPreset::Rich,
        FlavorPreset::Light,
        FlavorPreset::Dry,
        FlavorPreset::Sweet,
        FlavorPreset::Sparkling,
    ];

    pub fn vector(self) -> FlavorVector {
        match self {
            FlavorPreset::Balanced => BALANCED,
            FlavorPreset::Rich => RICH,
            FlavorPreset::Light => LIGHT,
            FlavorPreset::Dry => DRY,
            FlavorPreset::Sweet => SWEET,
            FlavorPreset::Sparkling => SPARKLING,
        }
    }
}

impl fmt::Display for FlavorPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlavorPreset::Balanced => write!(f, "balanced"),
            FlavorPreset::Rich => write!(f, "rich"),
            FlavorPreset::Light => write!(f, "light"),
            FlavorPreset::Dry => write!(f, "dry"),
            FlavorPreset::Sweet => write!(f, "sweet"),
            FlavorPreset::Sparkling => write!(f, "sparkling"),
        }
    }
}

impl FromStr for FlavorPreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "balanced" => Ok(FlavorPreset::Balanced),
            "rich" => Ok(FlavorPreset::Rich),
            "light" => Ok(FlavorPreset::Light),
            "dry" => Ok(FlavorPreset::Dry),
            "sweet" => Ok(FlavorPreset::Sweet),
            "sparkling" => Ok(FlavorPreset::Sparkling),
            _ => Err(format!("Unknown flavor preset: {s}")),
        }
    }
}
