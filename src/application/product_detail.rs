use crate::application::request_sequence::{FetchOutcome, RequestSequencer};
use crate::domain::entities::product::{Product, ProductId};
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_port::CatalogService;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ProductDetailView {
    Idle,
    Loading { product_id: ProductId },
    Ready { product: Box<Product> },
    NotFound { product_id: ProductId },
    Failed { product_id: ProductId, message: String },
}

struct DetailState {
    view: ProductDetailView,
    sequencer: RequestSequencer,
}

/// Detail record for the product currently open.
pub struct ProductDetailController {
    catalog: Arc<dyn CatalogService>,
    state: Mutex<DetailState>,
}

impl ProductDetailController {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog,
            state: Mutex::new(DetailState {
                view: ProductDetailView::Idle,
                sequencer: RequestSequencer::default(),
            }),
        }
    }

    pub fn view(&self) -> ProductDetailView {
        self.lock().view.clone()
    }

    pub fn product(&self) -> Option<Product> {
        match &self.lock().view {
            ProductDetailView::Ready { product } => Some(product.as_ref().clone()),
            _ => None,
        }
    }

    /// Opens `id`. A missing product yields `DomainError::NotFound` and a
    /// `NotFound` view, distinct from a transport failure.
    pub async fn open(&self, id: &ProductId) -> Result<FetchOutcome, DomainError> {
        let token = {
            let mut state = self.lock();
            state.view = ProductDetailView::Loading {
                product_id: id.clone(),
            };
            state.sequencer.issue()
        };
        debug!(token = %token, product_id = %id, "product detail request issued");

        let result = self.catalog.get_product(id).await;

        let mut state = self.lock();
        if !state.sequencer.is_current(token) {
            debug!(token = %token, product_id = %id, "discarding superseded product detail");
            return Ok(FetchOutcome::Superseded);
        }
        match result {
            Ok(Some(product)) => {
                state.view = ProductDetailView::Ready {
                    product: Box::new(product),
                };
                Ok(FetchOutcome::Applied)
            }
            Ok(None) => {
                state.view = ProductDetailView::NotFound {
                    product_id: id.clone(),
                };
                Err(DomainError::NotFound(format!("product {id}")))
            }
            Err(e) => {
                warn!(token = %token, product_id = %id, error = %e, "product detail request failed");
                state.view = ProductDetailView::Failed {
                    product_id: id.clone(),
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, DetailState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
