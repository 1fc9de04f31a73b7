use super::{build_client, ensure_success, is_not_found, trim_base_url};
use crate::domain::entities::product::{Product, ProductId, Recommendation, ScoredProduct};
use crate::domain::error::DomainError;
use crate::domain::ports::recommendation_port::RecommendationService;
use crate::domain::ports::similarity_port::TextSimilarity;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Recommendation service: item-to-item recommendations and semantic text
/// search over product descriptions.
pub struct HttpRecommendationClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct TextQueryRequest<'a> {
    query: &'a str,
    top_k: usize,
}

#[derive(Deserialize)]
struct TextQueryResponse {
    #[serde(default)]
    results: Vec<RecommendedItem>,
}

#[derive(Debug, Default, Deserialize)]
struct FlavorScores {
    f1: Option<f64>,
    f2: Option<f64>,
    f3: Option<f64>,
    f4: Option<f64>,
    f5: Option<f64>,
    f6: Option<f64>,
}

/// Product shape used by the recommendation service; differs from the
/// catalog's (`brand` instead of `brandName`, nested `flavors`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecommendedItem {
    #[serde(default)]
    rank: Option<u32>,
    #[serde(default)]
    similarity_score: Option<f64>,
    id: ProductId,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    brand_intl_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    intl_name: Option<String>,
    #[serde(default)]
    score: Option<f64>,
    #[serde(default)]
    checkin_count: Option<u32>,
    #[serde(default)]
    flavors: Option<FlavorScores>,
    #[serde(default)]
    flavour_tags: Vec<String>,
    #[serde(default)]
    pictures: Vec<String>,
    #[serde(default)]
    similar_brands: Vec<String>,
    #[serde(default)]
    year_month: Option<String>,
}

impl RecommendedItem {
    fn into_product(self) -> Product {
        let flavors = self.flavors.unwrap_or_default();
        let mut product = Product::new(self.id);
        product.name = self.name;
        product.intl_name = self.intl_name;
        product.brand_name = self.brand;
        product.brand_intl_name = self.brand_intl_name;
        product.year_month = self.year_month;
        product.score = self.score;
        product.checkin_count = self.checkin_count;
        product.flavour_tags = self.flavour_tags;
        product.pictures = self.pictures;
        product.similar_brands = self.similar_brands;
        product.set_flavors([
            flavors.f1, flavors.f2, flavors.f3, flavors.f4, flavors.f5, flavors.f6,
        ]);
        product
    }
}

impl HttpRecommendationClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base_url(base_url),
        })
    }
}

/// Position in the list wins when the service omits `rank`.
fn into_recommendations(items: Vec<RecommendedItem>) -> Vec<Recommendation> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| Recommendation {
            rank: item.rank.unwrap_or(i as u32 + 1),
            product: item.into_product(),
        })
        .collect()
}

fn into_scored(items: Vec<RecommendedItem>) -> Vec<ScoredProduct> {
    items
        .into_iter()
        .map(|item| ScoredProduct {
            similarity: item.similarity_score.unwrap_or(0.0),
            product: item.into_product(),
        })
        .collect()
}

#[async_trait]
impl RecommendationService for HttpRecommendationClient {
    async fn recommend_for(&self, id: &ProductId) -> Result<Vec<Recommendation>, DomainError> {
        let resp = self
            .client
            .get(format!("{}/recommend/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Recommendation API error: {e}")))?;
        if is_not_found(&resp) {
            return Err(DomainError::NotFound(format!("product {id}")));
        }
        let resp = ensure_success(resp, "Recommendation API").await?;
        let items: Vec<RecommendedItem> = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Recommendation response: {e}")))?;
        Ok(into_recommendations(items))
    }
}

#[async_trait]
impl TextSimilarity for HttpRecommendationClient {
    async fn search_by_text(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError> {
        let resp = self
            .client
            .post(format!("{}/recommend-by-text", self.base_url))
            .json(&TextQueryRequest { query, top_k })
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Recommendation API error: {e}")))?;
        let resp = ensure_success(resp, "Recommendation API").await?;
        let body: TextQueryResponse = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Text search response: {e}")))?;
        Ok(into_scored(body.results))
    }
}
