use crate::application::request_sequence::{FetchOutcome, RequestSequencer, RequestToken};
use crate::domain::entities::product::{Product, ScoredProduct};
use crate::domain::error::DomainError;
use crate::domain::ports::similarity_port::{ProfileSimilarity, TextSimilarity};
use crate::domain::values::deviation::{dimension_deltas, BandThresholds, DimensionDelta};
use crate::domain::values::flavor_vector::FlavorVector;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SimilarityQuery {
    Profile { vector: FlavorVector, top_k: usize },
    Text { query: String, top_k: usize },
}

impl SimilarityQuery {
    fn top_k(&self) -> usize {
        match self {
            SimilarityQuery::Profile { top_k, .. } | SimilarityQuery::Text { top_k, .. } => *top_k,
        }
    }
}

/// One ranked hit. `deltas` is only present for profile searches, where
/// there is a query vector to compare against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimilarityMatch {
    pub rank: usize,
    pub product: Product,
    pub similarity: f64,
    pub similarity_percent: String,
    pub deltas: Option<Vec<DimensionDelta>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimilarityView {
    Idle,
    Loading {
        query: SimilarityQuery,
    },
    /// An empty `results` is a valid answer, not an error.
    Ready {
        query: SimilarityQuery,
        results: Vec<SimilarityMatch>,
    },
    Failed {
        query: SimilarityQuery,
        message: String,
    },
}

struct SimilarityState {
    view: SimilarityView,
    sequencer: RequestSequencer,
}

/// Runs flavor-profile and free-text similarity searches. Every submission
/// replaces the previous result set outright; only the newest submission
/// is ever displayed.
pub struct SimilaritySearchController {
    profiles: Arc<dyn ProfileSimilarity>,
    texts: Arc<dyn TextSimilarity>,
    thresholds: BandThresholds,
    state: Mutex<SimilarityState>,
}

impl SimilaritySearchController {
    pub const DEFAULT_PROFILE_TOP_K: usize = 15;
    pub const DEFAULT_TEXT_TOP_K: usize = 6;

    pub fn new(profiles: Arc<dyn ProfileSimilarity>, texts: Arc<dyn TextSimilarity>) -> Self {
        Self::with_thresholds(profiles, texts, BandThresholds::default())
    }

    pub fn with_thresholds(
        profiles: Arc<dyn ProfileSimilarity>,
        texts: Arc<dyn TextSimilarity>,
        thresholds: BandThresholds,
    ) -> Self {
        Self {
            profiles,
            texts,
            thresholds,
            state: Mutex::new(SimilarityState {
                view: SimilarityView::Idle,
                sequencer: RequestSequencer::default(),
            }),
        }
    }

    pub fn view(&self) -> SimilarityView {
        self.lock().view.clone()
    }

    /// Results currently on screen; empty unless the view is `Ready`.
    pub fn results(&self) -> Vec<SimilarityMatch> {
        match &self.lock().view {
            SimilarityView::Ready { results, .. } => results.clone(),
            _ => Vec::new(),
        }
    }

    pub async fn search_by_profile(
        &self,
        vector: FlavorVector,
        top_k: usize,
    ) -> Result<FetchOutcome, DomainError> {
        validate_top_k(top_k)?;
        let query = SimilarityQuery::Profile { vector, top_k };
        let token = self.issue(&query);
        debug!(token = %token, profile = %vector, top_k, "profile similarity request issued");

        let result = self.profiles.search_by_profile(&vector, top_k).await;
        self.apply(token, query, result)
    }

    pub async fn search_by_text(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<FetchOutcome, DomainError> {
        let text = query.trim();
        if text.is_empty() {
            return Err(DomainError::Validation(
                "Describe what you are looking for before searching".into(),
            ));
        }
        validate_top_k(top_k)?;
        let query = SimilarityQuery::Text {
            query: text.to_string(),
            top_k,
        };
        let token = self.issue(&query);
        debug!(token = %token, query = text, top_k, "text similarity request issued");

        let result = self.texts.search_by_text(text, top_k).await;
        self.apply(token, query, result)
    }

    fn issue(&self, query: &SimilarityQuery) -> RequestToken {
        let mut state = self.lock();
        state.view = SimilarityView::Loading {
            query: query.clone(),
        };
        state.sequencer.issue()
    }

    fn apply(
        &self,
        token: RequestToken,
        query: SimilarityQuery,
        result: Result<Vec<ScoredProduct>, DomainError>,
    ) -> Result<FetchOutcome, DomainError> {
        let mut state = self.lock();
        if !state.sequencer.is_current(token) {
            debug!(token = %token, "discarding superseded similarity response");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(scored) => {
                let results = self.annotate(&query, scored);
                debug!(token = %token, results = results.len(), "similarity response applied");
                state.view = SimilarityView::Ready { query, results };
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                warn!(token = %token, error = %e, "similarity request failed");
                state.view = SimilarityView::Failed {
                    query,
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// Keeps server order, caps at `top_k`, and adds per-axis deltas for
    /// profile queries. Server similarity is clamped into `[0, 1]`.
    fn annotate(&self, query: &SimilarityQuery, scored: Vec<ScoredProduct>) -> Vec<SimilarityMatch> {
        scored
            .into_iter()
            .take(query.top_k())
            .enumerate()
            .map(|(i, mut hit)| {
                hit.similarity = clamp_unit(hit.similarity);
                let deltas = match query {
                    SimilarityQuery::Profile { vector, .. } => Some(dimension_deltas(
                        vector,
                        &hit.product.flavor_vector(),
                        &self.thresholds,
                    )),
                    SimilarityQuery::Text { .. } => None,
                };
                SimilarityMatch {
                    rank: i + 1,
                    similarity_percent: hit.similarity_percent(),
                    similarity: hit.similarity,
                    product: hit.product,
                    deltas,
                }
            })
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, SimilarityState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn validate_top_k(top_k: usize) -> Result<(), DomainError> {
    if top_k == 0 {
        return Err(DomainError::Validation("top_k must be at least 1".into()));
    }
    Ok(())
}
