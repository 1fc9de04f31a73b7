use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The six fixed axes of a flavor profile, in wire order f1..f6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FlavorDimension {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
}

impl FlavorDimension {
    pub const ALL: [FlavorDimension; 6] = [
        FlavorDimension::F1,
        FlavorDimension::F2,
        FlavorDimension::F3,
        FlavorDimension::F4,
        FlavorDimension::F5,
        FlavorDimension::F6,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn key(self) -> &'static str {
        match self {
            FlavorDimension::F1 => "f1",
            FlavorDimension::F2 => "f2",
            FlavorDimension::F3 => "f3",
            FlavorDimension::F4 => "f4",
            FlavorDimension::F5 => "f5",
            FlavorDimension::F6 => "f6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlavorDimension::F1 => "Floral",
            FlavorDimension::F2 => "Rich",
            FlavorDimension::F3 => "Full-bodied",
            FlavorDimension::F4 => "Gentle",
            FlavorDimension::F5 => "Dry",
            FlavorDimension::F6 => "Light",
        }
    }

    /// Label as printed on Sakenowa-style flavor charts.
    pub fn japanese_label(self) -> &'static str {
        match self {
            FlavorDimension::F1 => "華やか",
            FlavorDimension::F2 => "芳醇",
            FlavorDimension::F3 => "重厚",
            FlavorDimension::F4 => "穏やか",
            FlavorDimension::F5 => "ドライ",
            FlavorDimension::F6 => "軽快",
        }
    }
}

impl fmt::Display for FlavorDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl Serialize for FlavorDimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.key())
    }
}

impl FromStr for FlavorDimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "f1" => Ok(FlavorDimension::F1),
            "f2" => Ok(FlavorDimension::F2),
            "f3" => Ok(FlavorDimension::F3),
            "f4" => Ok(FlavorDimension::F4),
            "f5" => Ok(FlavorDimension::F5),
            "f6" => Ok(FlavorDimension::F6),
            _ => Err(format!("Unknown flavor dimension: {s}")),
        }
    }
}

/// A six-dimensional flavor profile with every value in `[0, 1]`.
///
/// The type is a plain `Copy` value: edits produce a new vector, and a
/// request always carries its own snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlavorVector([f64; 6]);

impl FlavorVector {
    pub const DEFAULT_VALUE: f64 = 0.5;

    /// Builds a vector, rejecting any value that is NaN or outside `[0, 1]`.
    pub fn new(values: [f64; 6]) -> Result<Self, String> {
        for (dim, value) in FlavorDimension::ALL.iter().zip(values.iter()) {
            if !is_in_range(*value) {
                return Err(format!(
                    "Flavor value for {dim} must be between 0.0 and 1.0, got {value}"
                ));
            }
        }
        Ok(FlavorVector(values))
    }

    /// Builds a vector from possibly dirty data, clamping into range.
    /// NaN becomes 0.
    pub fn clamped(values: [f64; 6]) -> Self {
        let mut out = [0.0; 6];
        for (slot, value) in out.iter_mut().zip(values.iter()) {
            *slot = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        }
        FlavorVector(out)
    }

    pub(crate) const fn from_const(values: [f64; 6]) -> Self {
        FlavorVector(values)
    }

    pub fn get(&self, dim: FlavorDimension) -> f64 {
        self.0[dim.index()]
    }

    /// Returns a copy with one dimension replaced; all others untouched.
    pub fn with_dimension(&self, dim: FlavorDimension, value: f64) -> Result<Self, String> {
        if !is_in_range(value) {
            return Err(format!(
                "Flavor value for {dim} must be between 0.0 and 1.0, got {value}"
            ));
        }
        let mut values = self.0;
        values[dim.index()] = value;
        Ok(FlavorVector(values))
    }

    pub fn values(&self) -> [f64; 6] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (FlavorDimension, f64)> + '_ {
        FlavorDimension::ALL.iter().map(move |d| (*d, self.get(*d)))
    }
}

fn is_in_range(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

impl Default for FlavorVector {
    fn default() -> Self {
        FlavorVector([Self::DEFAULT_VALUE; 6])
    }
}

impl fmt::Display for FlavorVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(d, v)| format!("{d}={v:.2}")).collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl Serialize for FlavorVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (dim, value) in self.iter() {
            map.serialize_entry(dim.key(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FlavorVector {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: BTreeMap<String, f64> = BTreeMap::deserialize(deserializer)?;
        let mut values = [0.0; 6];
        for dim in FlavorDimension::ALL {
            values[dim.index()] = *raw
                .get(dim.key())
                .ok_or_else(|| serde::de::Error::missing_field(dim.key()))?;
        }
        FlavorVector::new(values).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_half() {
        let v = FlavorVector::default();
        for (_, value) in v.iter() {
            assert_eq!(value, 0.5);
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(FlavorVector::new([0.1, 0.2, 0.3, 0.4, 0.5, 1.2]).is_err());
        assert!(FlavorVector::new([-0.1, 0.2, 0.3, 0.4, 0.5, 0.6]).is_err());
        assert!(FlavorVector::new([f64::NAN, 0.2, 0.3, 0.4, 0.5, 0.6]).is_err());
        assert!(FlavorVector::new([0.0, 0.2, 0.3, 0.4, 0.5, 1.0]).is_ok());
    }

    #[test]
    fn test_clamped_pulls_into_range() {
        let v = FlavorVector::clamped([1.5, -0.3, f64::NAN, 0.25, 0.0, 1.0]);
        assert_eq!(v.values(), [1.0, 0.0, 0.0, 0.25, 0.0, 1.0]);
    }

    #[test]
    fn test_with_dimension_only_touches_one_axis() {
        let v = FlavorVector::default()
            .with_dimension(FlavorDimension::F3, 0.9)
            .unwrap();
        assert_eq!(v.values(), [0.5, 0.5, 0.9, 0.5, 0.5, 0.5]);
        assert!(v.with_dimension(FlavorDimension::F3, 1.01).is_err());
    }

    #[test]
    fn test_serializes_as_keyed_map() {
        let v = FlavorVector::new([0.8, 0.2, 0.2, 0.2, 0.2, 0.2]).unwrap();
        let json = serde_json::to_value(v).unwrap();
        assert_eq!(json["f1"], 0.8);
        assert_eq!(json["f6"], 0.2);
        let back: FlavorVector = serde_json::from_value(json).unwrap();
        assert_eq!(back, v);
    }

    #[test]
    fn test_dimension_labels() {
        assert_eq!(FlavorDimension::F1.label(), "Floral");
        assert_eq!(FlavorDimension::F5.japanese_label(), "ドライ");
        assert_eq!(FlavorDimension::F6.to_string(), "f6");
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!("F4".parse::<FlavorDimension>().unwrap(), FlavorDimension::F4);
        assert!("f7".parse::<FlavorDimension>().is_err());
    }
}
