use crate::domain::entities::product::ScoredProduct;
use crate::domain::error::DomainError;
use crate::domain::values::flavor_vector::FlavorVector;

/// Scores catalog products against a flavor profile. Ranking is owned by
/// the implementation; callers must keep the returned order.
#[async_trait::async_trait]
pub trait ProfileSimilarity: Send + Sync {
    async fn search_by_profile(
        &self,
        profile: &FlavorVector,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError>;
}

/// Semantic (embedding) search over product descriptions.
#[async_trait::async_trait]
pub trait TextSimilarity: Send + Sync {
    async fn search_by_text(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError>;
}
