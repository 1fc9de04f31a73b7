use super::{build_client, ensure_success, is_not_found, trim_base_url};
use crate::domain::entities::page::Page;
use crate::domain::entities::product::{Product, ProductId, ScoredProduct};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_port::{CatalogService, PageRequest, TopRatedBy};
use crate::domain::ports::similarity_port::ProfileSimilarity;
use crate::domain::values::flavor_vector::{FlavorDimension, FlavorVector};
use crate::domain::values::query_parameters::{SortDirection, SortKey};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog REST backend (`/products/...`). Also serves flavor-profile
/// similarity, which the catalog computes server-side.
pub struct HttpCatalogClient {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlavorProfileRequest {
    f1: f64,
    f2: f64,
    f3: f64,
    f4: f64,
    f5: f64,
    f6: f64,
    top_k: usize,
}

impl FlavorProfileRequest {
    fn new(profile: &FlavorVector, top_k: usize) -> Self {
        Self {
            f1: profile.get(FlavorDimension::F1),
            f2: profile.get(FlavorDimension::F2),
            f3: profile.get(FlavorDimension::F3),
            f4: profile.get(FlavorDimension::F4),
            f5: profile.get(FlavorDimension::F5),
            f6: profile.get(FlavorDimension::F6),
            top_k,
        }
    }
}

#[derive(Deserialize)]
struct FlavorSearchHit {
    product: Product,
    #[serde(default)]
    similarity: f64,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DomainError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: trim_base_url(base_url),
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, DomainError> {
        let resp = self
            .client
            .get(format!("{}{path}", self.base_url))
            .query(query)
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Catalog API error: {e}")))?;
        let resp = ensure_success(resp, "Catalog API").await?;
        resp.json()
            .await
            .map_err(|e| DomainError::Parse(format!("Catalog response: {e}")))
    }
}

fn page_query(page: PageRequest) -> Vec<(&'static str, String)> {
    vec![("page", page.page.to_string()), ("size", page.size.to_string())]
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    async fn list_products(
        &self,
        page: PageRequest,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Page<Product>, DomainError> {
        let mut query = page_query(page);
        query.push(("sortBy", sort.as_param().to_string()));
        query.push(("direction", direction.as_param().to_string()));
        self.get_json("/products", &query).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let mut query = vec![("keyword", keyword.to_string())];
        query.extend(page_query(page));
        self.get_json("/products/search", &query).await
    }

    async fn search_by_flavour_tag(
        &self,
        tag: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        let mut query = vec![("tag", tag.to_string())];
        query.extend(page_query(page));
        self.get_json("/products/search/flavour", &query).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        let resp = self
            .client
            .get(format!("{}/products/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Catalog API error: {e}")))?;
        if is_not_found(&resp) {
            return Ok(None);
        }
        let resp = ensure_success(resp, "Catalog API").await?;
        let product = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Catalog response: {e}")))?;
        Ok(Some(product))
    }

    async fn top_rated(&self, by: TopRatedBy) -> Result<Vec<Product>, DomainError> {
        let path = match by {
            TopRatedBy::Rank => "/products/top/rank",
            TopRatedBy::Score => "/products/top/score",
        };
        self.get_json(path, &[]).await
    }
}

#[async_trait]
impl ProfileSimilarity for HttpCatalogClient {
    async fn search_by_profile(
        &self,
        profile: &FlavorVector,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError> {
        let resp = self
            .client
            .post(format!("{}/products/search/flavor-profile", self.base_url))
            .json(&FlavorProfileRequest::new(profile, top_k))
            .send()
            .await
            .map_err(|e| DomainError::Transport(format!("Catalog API error: {e}")))?;
        let resp = ensure_success(resp, "Catalog API").await?;
        let hits: Vec<FlavorSearchHit> = resp
            .json()
            .await
            .map_err(|e| DomainError::Parse(format!("Flavor search response: {e}")))?;
        Ok(hits
            .into_iter()
            .map(|h| ScoredProduct {
                product: h.product,
                similarity: h.similarity,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flavor_profile_request_shape() {
        let profile = FlavorVector::new([0.8, 0.2, 0.2, 0.2, 0.2, 0.2]).unwrap();
        let json = serde_json::to_value(FlavorProfileRequest::new(&profile, 15)).unwrap();
        assert_eq!(json["f1"], 0.8);
        assert_eq!(json["f6"], 0.2);
        assert_eq!(json["topK"], 15);
    }

    #[test]
    fn test_decodes_paged_body() {
        let body = r#"{
            "content": [{"id": 1, "name": "十四代"}, {"id": 2, "name": "而今"}],
            "pageNumber": 0, "pageSize": 20, "totalElements": 42,
            "totalPages": 3, "last": false, "first": true
        }"#;
        let page: Page<Product> = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_elements, 42);
    }

    #[test]
    fn test_decodes_flavor_search_hits() {
        let body = r#"[{"product": {"id": 9, "f1": 0.7}, "similarity": 0.93, "similarityPercent": "93.0"}]"#;
        let hits: Vec<FlavorSearchHit> = serde_json::from_str(body).unwrap();
        assert_eq!(hits[0].product.id.as_str(), "9");
        assert_eq!(hits[0].similarity, 0.93);
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = HttpCatalogClient::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
    }
}
