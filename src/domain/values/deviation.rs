use crate::domain::values::flavor_vector::{FlavorDimension, FlavorVector};
use serde::{Deserialize, Serialize};

/// Qualitative closeness of one axis, used only for display emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationBand {
    Close,
    Moderate,
    Far,
}

/// Upper bounds (exclusive) for the close and moderate bands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BandThresholds {
    pub close: f64,
    pub moderate: f64,
}

impl BandThresholds {
    pub fn new(close: f64, moderate: f64) -> Result<Self, String> {
        if !(close > 0.0 && close <= moderate && moderate <= 1.0) {
            return Err(format!(
                "Band thresholds must satisfy 0 < close <= moderate <= 1, got close={close} moderate={moderate}"
            ));
        }
        Ok(Self { close, moderate })
    }

    pub fn classify(&self, delta: f64) -> DeviationBand {
        if delta < self.close {
            DeviationBand::Close
        } else if delta < self.moderate {
            DeviationBand::Moderate
        } else {
            DeviationBand::Far
        }
    }
}

impl Default for BandThresholds {
    fn default() -> Self {
        Self {
            close: 0.1,
            moderate: 0.3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DimensionDelta {
    pub dimension: FlavorDimension,
    pub label: &'static str,
    pub query: f64,
    pub product: f64,
    pub delta: f64,
    pub band: DeviationBand,
}

/// Per-axis `|query - product|`, in f1..f6 order.
pub fn dimension_deltas(
    query: &FlavorVector,
    product: &FlavorVector,
    thresholds: &BandThresholds,
) -> Vec<DimensionDelta> {
    FlavorDimension::ALL
        .iter()
        .map(|dim| {
            let q = query.get(*dim);
            let p = product.get(*dim);
            let delta = (q - p).abs();
            DimensionDelta {
                dimension: *dim,
                label: dim.label(),
                query: q,
                product: p,
                delta,
                band: thresholds.classify(delta),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges_are_exclusive() {
        let t = BandThresholds::default();
        assert_eq!(t.classify(0.0), DeviationBand::Close);
        assert_eq!(t.classify(0.099), DeviationBand::Close);
        assert_eq!(t.classify(0.1), DeviationBand::Moderate);
        assert_eq!(t.classify(0.29), DeviationBand::Moderate);
        assert_eq!(t.classify(0.3), DeviationBand::Far);
        assert_eq!(t.classify(1.0), DeviationBand::Far);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = BandThresholds::new(0.05, 0.5).unwrap();
        assert_eq!(t.classify(0.07), DeviationBand::Moderate);
        assert_eq!(t.classify(0.45), DeviationBand::Moderate);
        assert!(BandThresholds::new(0.4, 0.2).is_err());
        assert!(BandThresholds::new(0.0, 0.2).is_err());
    }

    #[test]
    fn test_deltas_cover_every_axis() {
        let query = FlavorVector::new([0.8, 0.2, 0.2, 0.2, 0.2, 0.2]).unwrap();
        let product = FlavorVector::new([0.75, 0.4, 0.2, 0.9, 0.0, 0.2]).unwrap();
        let deltas = dimension_deltas(&query, &product, &BandThresholds::default());

        assert_eq!(deltas.len(), 6);
        assert_eq!(deltas[0].label, "Floral");
        assert_eq!(deltas[0].band, DeviationBand::Close);
        assert_eq!(deltas[1].band, DeviationBand::Moderate);
        assert_eq!(deltas[3].band, DeviationBand::Far);
        assert!((deltas[3].delta - 0.7).abs() < 1e-9);
        let total: f64 = deltas.iter().map(|d| d.delta).sum();
        assert!(total <= 6.0);
    }
}
