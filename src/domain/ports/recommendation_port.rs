use crate::domain::entities::product::{ProductId, Recommendation};
use crate::domain::error::DomainError;

#[async_trait::async_trait]
pub trait RecommendationService: Send + Sync {
    /// Related products for a detail view, best first.
    async fn recommend_for(&self, id: &ProductId) -> Result<Vec<Recommendation>, DomainError>;
}
