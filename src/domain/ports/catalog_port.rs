use crate::domain::entities::page::Page;
use crate::domain::entities::product::{Product, ProductId};
use crate::domain::error::DomainError;
use crate::domain::values::query_parameters::{SortDirection, SortKey};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }
}

/// Ordering used by the catalog's fixed top-10 lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopRatedBy {
    Rank,
    Score,
}

impl std::str::FromStr for TopRatedBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rank" => Ok(TopRatedBy::Rank),
            "score" => Ok(TopRatedBy::Score),
            _ => Err(format!("Unknown top-rated ordering: {s}")),
        }
    }
}

/// Remote product catalog: paginated listing, keyword and flavour-tag search,
/// detail lookup.
#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    async fn list_products(
        &self,
        page: PageRequest,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Page<Product>, DomainError>;

    async fn search_by_keyword(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError>;

    async fn search_by_flavour_tag(
        &self,
        tag: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError>;

    /// `Ok(None)` when the catalog has no such product.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError>;

    async fn top_rated(&self, by: TopRatedBy) -> Result<Vec<Product>, DomainError>;
}
