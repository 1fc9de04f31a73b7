pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::catalog_query::CatalogQueryController;
use crate::application::product_detail::{ProductDetailController, ProductDetailView};
use crate::application::recommendation_lookup::{
    RecommendationLookupController, RecommendationView,
};
use crate::application::similarity_search::SimilaritySearchController;
use crate::config::BrowserConfig;
use crate::domain::entities::product::{Product, ProductId};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_port::{CatalogService, TopRatedBy};
use crate::domain::ports::recommendation_port::RecommendationService;
use crate::domain::ports::similarity_port::{ProfileSimilarity, TextSimilarity};
use crate::domain::values::query_parameters::QueryParameters;
use crate::infrastructure::http::catalog_client::HttpCatalogClient;
use crate::infrastructure::http::recommendation_client::HttpRecommendationClient;
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

/// The remote collaborators every controller is built from.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub profiles: Arc<dyn ProfileSimilarity>,
    pub texts: Arc<dyn TextSimilarity>,
    pub recommender: Arc<dyn RecommendationService>,
}

/// Detail page: the product record plus its related products.
#[derive(Debug, Clone, Serialize)]
pub struct ProductOverview {
    pub detail: ProductDetailView,
    pub recommendations: RecommendationView,
}

pub struct SakeBrowser {
    catalog: Arc<dyn CatalogService>,
    listing: CatalogQueryController,
    similarity: SimilaritySearchController,
    detail: ProductDetailController,
    recommendations: RecommendationLookupController,
}

impl SakeBrowser {
    pub fn new(config: &BrowserConfig) -> Result<Self, DomainError> {
        let catalog = Arc::new(HttpCatalogClient::new(&config.catalog_url, config.timeout)?);
        let recommender = Arc::new(HttpRecommendationClient::new(
            &config.recommend_url,
            config.timeout,
        )?);

        let services = Services {
            catalog: catalog.clone(),
            profiles: catalog,
            texts: recommender.clone(),
            recommender,
        };
        Self::with_services(services, config)
    }

    pub fn with_services(services: Services, config: &BrowserConfig) -> Result<Self, DomainError> {
        let params =
            QueryParameters::with_page_size(config.page_size).map_err(DomainError::Config)?;

        Ok(Self {
            listing: CatalogQueryController::with_parameters(services.catalog.clone(), params),
            similarity: SimilaritySearchController::with_thresholds(
                services.profiles,
                services.texts,
                config.bands,
            ),
            detail: ProductDetailController::new(services.catalog.clone()),
            recommendations: RecommendationLookupController::new(services.recommender),
            catalog: services.catalog,
        })
    }

    pub fn listing(&self) -> &CatalogQueryController {
        &self.listing
    }

    pub fn similarity(&self) -> &SimilaritySearchController {
        &self.similarity
    }

    pub fn detail(&self) -> &ProductDetailController {
        &self.detail
    }

    pub fn recommendations(&self) -> &RecommendationLookupController {
        &self.recommendations
    }

    /// Loads a product and its recommendations side by side. A failed
    /// recommendation lookup does not fail the page.
    pub async fn open_product(&self, id: &ProductId) -> Result<ProductOverview, DomainError> {
        let (detail, recommendations) =
            tokio::join!(self.detail.open(id), self.recommendations.lookup(id));
        detail?;
        if let Err(e) = recommendations {
            warn!(product_id = %id, error = %e, "recommendations unavailable");
        }
        Ok(ProductOverview {
            detail: self.detail.view(),
            recommendations: self.recommendations.view(),
        })
    }

    pub async fn top_rated(&self, by: TopRatedBy) -> Result<Vec<Product>, DomainError> {
        self.catalog.top_rated(by).await
    }
}
