use crate::application::request_sequence::{FetchOutcome, RequestSequencer, RequestToken};
use crate::domain::entities::page::Page;
use crate::domain::entities::product::Product;
use crate::domain::error::DomainError;
use crate::domain::ports::catalog_port::{CatalogService, PageRequest};
use crate::domain::values::query_parameters::{
    QueryParameters, RetrievalMode, SortDirection, SortKey,
};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Request status for the parameters currently on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LoadStatus {
    Idle,
    Loading,
    Ready,
    Failed { message: String },
}

/// Snapshot of everything the listing view renders.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogView {
    pub params: QueryParameters,
    pub mode: RetrievalMode,
    pub items: Vec<Product>,
    pub total_pages: u32,
    pub status: LoadStatus,
}

struct CatalogState {
    params: QueryParameters,
    items: Vec<Product>,
    total_pages: u32,
    /// Mode of the response `items` and `total_pages` came from.
    applied_mode: Option<RetrievalMode>,
    status: LoadStatus,
    sequencer: RequestSequencer,
}

impl CatalogState {
    /// Pages known to exist for the current parameters. Zero until a
    /// response for the current mode has been applied.
    fn known_pages(&self) -> u32 {
        if self.applied_mode.as_ref() == Some(&self.params.retrieval_mode()) {
            self.total_pages
        } else {
            0
        }
    }
}

struct PendingFetch {
    token: RequestToken,
    params: QueryParameters,
}

/// Single source of truth for the product listing: owns the query
/// parameters, picks the retrieval mode and applies only the newest
/// response.
///
/// Operations take `&self` so a new interaction can start while an older
/// request is still in flight. The state lock is never held across an
/// `.await`.
pub struct CatalogQueryController {
    catalog: Arc<dyn CatalogService>,
    state: Mutex<CatalogState>,
}

impl CatalogQueryController {
    pub fn new(catalog: Arc<dyn CatalogService>) -> Self {
        Self::with_parameters(catalog, QueryParameters::default())
    }

    pub fn with_parameters(catalog: Arc<dyn CatalogService>, params: QueryParameters) -> Self {
        Self {
            catalog,
            state: Mutex::new(CatalogState {
                params,
                items: Vec::new(),
                total_pages: 0,
                applied_mode: None,
                status: LoadStatus::Idle,
                sequencer: RequestSequencer::default(),
            }),
        }
    }

    pub fn view(&self) -> CatalogView {
        let state = self.lock();
        CatalogView {
            params: state.params.clone(),
            mode: state.params.retrieval_mode(),
            items: state.items.clone(),
            total_pages: state.total_pages,
            status: state.status.clone(),
        }
    }

    pub fn parameters(&self) -> QueryParameters {
        self.lock().params.clone()
    }

    pub fn retrieval_mode(&self) -> RetrievalMode {
        self.lock().params.retrieval_mode()
    }

    /// Re-issues the current parameters. Used for the first load and for a
    /// manual retry after a failure.
    pub async fn refresh(&self) -> Result<FetchOutcome, DomainError> {
        let pending = {
            let mut state = self.lock();
            let params = state.params.clone();
            Self::issue(&mut state, params)
        };
        self.execute(pending).await
    }

    /// Toggles the flavour-tag filter. Selecting the active tag again (or a
    /// blank tag) clears it and returns to sorted browsing.
    pub async fn set_filter(&self, tag: &str) -> Result<FetchOutcome, DomainError> {
        let tag = tag.trim();
        let pending = {
            let mut state = self.lock();
            if tag.is_empty() || state.params.flavor_tag_filter.as_deref() == Some(tag) {
                state.params.flavor_tag_filter = None;
            } else {
                state.params.flavor_tag_filter = Some(tag.to_string());
                state.params.free_text_term = None;
            }
            state.params.page = 0;
            let params = state.params.clone();
            Self::issue(&mut state, params)
        };
        self.execute(pending).await
    }

    /// Stores the sort. Only visible in sorted-browse mode; in the other
    /// modes it waits until that mode is left.
    pub async fn set_sort(
        &self,
        key: SortKey,
        direction: SortDirection,
    ) -> Result<FetchOutcome, DomainError> {
        let pending = {
            let mut state = self.lock();
            state.params.sort_key = key;
            state.params.sort_direction = direction;
            state.params.page = 0;
            let params = state.params.clone();
            Self::issue(&mut state, params)
        };
        self.execute(pending).await
    }

    /// A blank term clears both the search and any tag filter, restoring the
    /// default sorted browse. A non-blank term replaces an active tag filter.
    pub async fn submit_keyword(&self, term: &str) -> Result<FetchOutcome, DomainError> {
        let term = term.trim();
        let pending = {
            let mut state = self.lock();
            state.params.flavor_tag_filter = None;
            state.params.free_text_term = (!term.is_empty()).then(|| term.to_string());
            state.params.page = 0;
            let params = state.params.clone();
            Self::issue(&mut state, params)
        };
        self.execute(pending).await
    }

    /// Moves to page `page` of the current result set. The page is only
    /// committed once the response for it is applied. While the first page
    /// of a newly entered mode is pending (or failed) no page is valid.
    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, DomainError> {
        let pending = {
            let mut state = self.lock();
            let known = state.known_pages();
            if page >= known {
                return Err(DomainError::Validation(format!(
                    "Page {page} is out of range (total pages: {known})"
                )));
            }
            let params = QueryParameters {
                page,
                ..state.params.clone()
            };
            Self::issue(&mut state, params)
        };
        self.execute(pending).await
    }

    fn issue(state: &mut CatalogState, params: QueryParameters) -> PendingFetch {
        let token = state.sequencer.issue();
        state.status = LoadStatus::Loading;
        PendingFetch { token, params }
    }

    async fn execute(&self, pending: PendingFetch) -> Result<FetchOutcome, DomainError> {
        let mode = pending.params.retrieval_mode();
        let page = PageRequest::new(pending.params.page, pending.params.page_size);
        debug!(token = %pending.token, ?mode, page = page.page, "catalog request issued");

        let result = match &mode {
            RetrievalMode::SortedBrowse { sort, direction } => {
                self.catalog.list_products(page, *sort, *direction).await
            }
            RetrievalMode::TagFilter { tag } => self.catalog.search_by_flavour_tag(tag, page).await,
            RetrievalMode::KeywordSearch { keyword } => {
                self.catalog.search_by_keyword(keyword, page).await
            }
        };

        self.apply(pending, result)
    }

    fn apply(
        &self,
        pending: PendingFetch,
        result: Result<Page<Product>, DomainError>,
    ) -> Result<FetchOutcome, DomainError> {
        let mut state = self.lock();
        if !state.sequencer.is_current(pending.token) {
            debug!(token = %pending.token, "discarding superseded catalog response");
            return Ok(FetchOutcome::Superseded);
        }

        match result {
            Ok(page) => {
                state.items = page.items;
                state.total_pages = page.total_pages;
                state.applied_mode = Some(pending.params.retrieval_mode());
                state.params.page = pending.params.page;
                state.status = LoadStatus::Ready;
                debug!(
                    token = %pending.token,
                    items = state.items.len(),
                    total_pages = state.total_pages,
                    "catalog response applied"
                );
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                warn!(token = %pending.token, error = %e, "catalog request failed");
                state.status = LoadStatus::Failed {
                    message: e.to_string(),
                };
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
