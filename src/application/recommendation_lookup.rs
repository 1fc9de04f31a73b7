use crate::application::request_sequence::{FetchOutcome, RequestSequencer};
use crate::domain::entities::product::{ProductId, Recommendation};
use crate::domain::error::DomainError;
use crate::domain::ports::recommendation_port::RecommendationService;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecommendationView {
    Idle,
    Loading {
        product_id: ProductId,
    },
    Ready {
        product_id: ProductId,
        items: Vec<Recommendation>,
    },
    Failed {
        product_id: ProductId,
        message: String,
    },
}

struct LookupState {
    view: RecommendationView,
    sequencer: RequestSequencer,
}

/// Related products for whichever product the detail view shows right now.
/// Moving to another product supersedes any lookup still in flight.
pub struct RecommendationLookupController {
    recommender: Arc<dyn RecommendationService>,
    state: Mutex<LookupState>,
}

impl RecommendationLookupController {
    pub fn new(recommender: Arc<dyn RecommendationService>) -> Self {
        Self {
            recommender,
            state: Mutex::new(LookupState {
                view: RecommendationView::Idle,
                sequencer: RequestSequencer::default(),
            }),
        }
    }

    pub fn view(&self) -> RecommendationView {
        self.lock().view.clone()
    }

    pub async fn lookup(&self, id: &ProductId) -> Result<FetchOutcome, DomainError> {
        let token = {
            let mut state = self.lock();
            state.view = RecommendationView::Loading {
                product_id: id.clone(),
            };
            state.sequencer.issue()
        };
        debug!(token = %token, product_id = %id, "recommendation lookup issued");

        let result = self.recommender.recommend_for(id).await;

        let mut state = self.lock();
        if !state.sequencer.is_current(token) {
            debug!(token = %token, product_id = %id, "discarding superseded recommendations");
            return Ok(FetchOutcome::Superseded);
        }
        match result {
            Ok(items) => {
                state.view = RecommendationView::Ready {
                    product_id: id.clone(),
                    items,
                };
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                warn!(token = %token, product_id = %id, error = %e, "recommendation lookup failed");
                state.view = RecommendationView::Failed {
                    product_id: id.clone(),
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, LookupState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
