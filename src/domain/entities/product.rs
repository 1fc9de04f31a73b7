use crate::domain::values::flavor_vector::FlavorVector;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Opaque product identifier. The catalog uses integers, but nothing here
/// depends on that beyond presence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Product id must not be empty".into());
        }
        Ok(ProductId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        ProductId(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Text(String),
        }
        match RawId::deserialize(deserializer)? {
            RawId::Int(n) => Ok(ProductId::from(n)),
            RawId::Text(s) => ProductId::new(s).map_err(serde::de::Error::custom),
        }
    }
}

/// A catalog product as returned by listing, search and detail calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub intl_name: Option<String>,
    #[serde(default)]
    pub brand_name: Option<String>,
    #[serde(default)]
    pub brand_intl_name: Option<String>,
    #[serde(default)]
    pub year_month: Option<String>,
    #[serde(default)]
    pub rank: Option<u32>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub f1: Option<f64>,
    #[serde(default)]
    pub f2: Option<f64>,
    #[serde(default)]
    pub f3: Option<f64>,
    #[serde(default)]
    pub f4: Option<f64>,
    #[serde(default)]
    pub f5: Option<f64>,
    #[serde(default)]
    pub f6: Option<f64>,
    #[serde(default)]
    pub flavour_tags: Vec<String>,
    #[serde(default)]
    pub checkin_count: Option<u32>,
    #[serde(default)]
    pub pictures: Vec<String>,
    #[serde(default)]
    pub similar_brands: Vec<String>,
}

impl Product {
    pub fn new(id: ProductId) -> Self {
        Self {
            id,
            name: None,
            intl_name: None,
            brand_name: None,
            brand_intl_name: None,
            year_month: None,
            rank: None,
            score: None,
            f1: None,
            f2: None,
            f3: None,
            f4: None,
            f5: None,
            f6: None,
            flavour_tags: Vec::new(),
            checkin_count: None,
            pictures: Vec::new(),
            similar_brands: Vec::new(),
        }
    }

    /// Flavor profile for comparison. A missing axis counts as 0.
    pub fn flavor_vector(&self) -> FlavorVector {
        FlavorVector::clamped([
            self.f1.unwrap_or(0.0),
            self.f2.unwrap_or(0.0),
            self.f3.unwrap_or(0.0),
            self.f4.unwrap_or(0.0),
            self.f5.unwrap_or(0.0),
            self.f6.unwrap_or(0.0),
        ])
    }

    pub fn set_flavors(&mut self, flavors: [Option<f64>; 6]) {
        let [f1, f2, f3, f4, f5, f6] = flavors;
        self.f1 = f1;
        self.f2 = f2;
        self.f3 = f3;
        self.f4 = f4;
        self.f5 = f5;
        self.f6 = f6;
    }

    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.intl_name.as_deref())
            .unwrap_or("(unnamed)")
    }
}

/// A product paired with an externally computed similarity in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub similarity: f64,
}

impl ScoredProduct {
    /// Similarity as a percentage with one decimal, e.g. `"87.5"`.
    pub fn similarity_percent(&self) -> String {
        format!("{:.1}", self.similarity * 100.0)
    }
}

/// A related product for a detail view; `rank` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub rank: u32,
    pub product: Product,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_accepts_numbers_and_strings() {
        let a: ProductId = serde_json::from_str("42").unwrap();
        let b: ProductId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(a, b);
        assert!(serde_json::from_str::<ProductId>("\"  \"").is_err());
    }

    #[test]
    fn test_missing_flavors_count_as_zero() {
        let mut p = Product::new(ProductId::from(1));
        p.set_flavors([Some(0.7), None, Some(0.2), None, Some(1.3), Some(0.4)]);
        assert_eq!(p.flavor_vector().values(), [0.7, 0.0, 0.2, 0.0, 1.0, 0.4]);
    }

    #[test]
    fn test_decodes_catalog_payload() {
        let json = r#"{
            "id": 7, "name": "獺祭", "brandName": "旭酒造", "score": 4.12,
            "f1": 0.61, "f2": 0.33, "flavourTags": ["華やか", "フルーティ"],
            "checkinCount": 1200, "pictures": []
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.id.as_str(), "7");
        assert_eq!(p.brand_name.as_deref(), Some("旭酒造"));
        assert_eq!(p.f3, None);
        assert_eq!(p.flavour_tags.len(), 2);
        assert_eq!(p.display_name(), "獺祭");
    }

    #[test]
    fn test_similarity_percent_formatting() {
        let scored = ScoredProduct {
            product: Product::new(ProductId::from(1)),
            similarity: 0.87456,
        };
        assert_eq!(scored.similarity_percent(), "87.5");
    }
}
