//! Shared test helpers: scripted in-memory collaborators.
//!
//! Each fake records the calls it receives and answers from a queue of
//! scripted replies. A deferred reply hands the test a `oneshot::Sender`, so
//! the test decides when (and in which order) responses arrive.

#![allow(dead_code)]

use async_trait::async_trait;
use sakebrowse::config::BrowserConfig;
use sakebrowse::domain::entities::page::Page;
use sakebrowse::domain::entities::product::{Product, ProductId, Recommendation, ScoredProduct};
use sakebrowse::domain::error::DomainError;
use sakebrowse::domain::ports::catalog_port::{CatalogService, PageRequest, TopRatedBy};
use sakebrowse::domain::ports::recommendation_port::RecommendationService;
use sakebrowse::domain::ports::similarity_port::{ProfileSimilarity, TextSimilarity};
use sakebrowse::domain::values::flavor_vector::FlavorVector;
use sakebrowse::domain::values::query_parameters::{SortDirection, SortKey};
use sakebrowse::{SakeBrowser, Services};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;

pub type Reply<T> = Result<T, DomainError>;

enum Scripted<T> {
    Ready(Reply<T>),
    Deferred(oneshot::Receiver<Reply<T>>),
}

pub struct Script<T> {
    queue: Mutex<VecDeque<Scripted<T>>>,
}

impl<T> Default for Script<T> {
    fn default() -> Self {
        Self {
            queue: Mutex::new(VecDeque::new()),
        }
    }
}

impl<T> Script<T> {
    pub fn push(&self, reply: Reply<T>) {
        self.queue.lock().unwrap().push_back(Scripted::Ready(reply));
    }

    /// Queues a reply that is only delivered once the returned sender fires.
    pub fn defer(&self) -> oneshot::Sender<Reply<T>> {
        let (tx, rx) = oneshot::channel();
        self.queue.lock().unwrap().push_back(Scripted::Deferred(rx));
        tx
    }

    async fn next(&self, fallback: impl FnOnce() -> Reply<T>) -> Reply<T> {
        let scripted = self.queue.lock().unwrap().pop_front();
        match scripted {
            None => fallback(),
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx
                .await
                .unwrap_or_else(|_| Err(DomainError::Transport("reply dropped".into()))),
        }
    }
}

pub fn product(id: i64, name: &str) -> Product {
    let mut p = Product::new(ProductId::from(id));
    p.name = Some(name.to_string());
    p
}

pub fn product_with_flavors(id: i64, name: &str, flavors: [f64; 6]) -> Product {
    let mut p = product(id, name);
    p.set_flavors(flavors.map(Some));
    p
}

pub fn page_of(names: &[&str], total_pages: u32) -> Page<Product> {
    let items: Vec<Product> = names
        .iter()
        .enumerate()
        .map(|(i, n)| product(i as i64 + 1, n))
        .collect();
    Page {
        total_elements: items.len() as u64 * u64::from(total_pages),
        items,
        total_pages,
    }
}

pub fn names(items: &[Product]) -> Vec<String> {
    items.iter().map(|p| p.display_name().to_string()).collect()
}

/// Yields until `count()` reaches `n`; lets spawned tasks reach their
/// collaborator call.
pub async fn wait_until(n: usize, count: impl Fn() -> usize) {
    for _ in 0..1000 {
        if count() >= n {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("expected {n} calls, saw {}", count());
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogCall {
    List {
        page: u32,
        size: u32,
        sort: SortKey,
        direction: SortDirection,
    },
    Keyword {
        keyword: String,
        page: u32,
        size: u32,
    },
    Tag {
        tag: String,
        page: u32,
        size: u32,
    },
    Get(ProductId),
    Top(TopRatedBy),
}

/// Unscripted page calls answer with one product whose name describes the
/// request (e.g. `tag:floral:p0`) and five pages in total.
#[derive(Default)]
pub struct FakeCatalog {
    calls: Mutex<Vec<CatalogCall>>,
    pub pages: Script<Page<Product>>,
    pub details: Script<Option<Product>>,
}

impl FakeCatalog {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<CatalogCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> CatalogCall {
        self.calls.lock().unwrap().last().cloned().expect("no catalog calls")
    }

    fn record(&self, call: CatalogCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl CatalogService for FakeCatalog {
    async fn list_products(
        &self,
        page: PageRequest,
        sort: SortKey,
        direction: SortDirection,
    ) -> Result<Page<Product>, DomainError> {
        self.record(CatalogCall::List {
            page: page.page,
            size: page.size,
            sort,
            direction,
        });
        let label = format!("list:{sort}:{direction}:p{}", page.page);
        self.pages.next(|| Ok(page_of(&[label.as_str()], 5))).await
    }

    async fn search_by_keyword(
        &self,
        keyword: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.record(CatalogCall::Keyword {
            keyword: keyword.to_string(),
            page: page.page,
            size: page.size,
        });
        let label = format!("keyword:{keyword}:p{}", page.page);
        self.pages.next(|| Ok(page_of(&[label.as_str()], 5))).await
    }

    async fn search_by_flavour_tag(
        &self,
        tag: &str,
        page: PageRequest,
    ) -> Result<Page<Product>, DomainError> {
        self.record(CatalogCall::Tag {
            tag: tag.to_string(),
            page: page.page,
            size: page.size,
        });
        let label = format!("tag:{tag}:p{}", page.page);
        self.pages.next(|| Ok(page_of(&[label.as_str()], 5))).await
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>, DomainError> {
        self.record(CatalogCall::Get(id.clone()));
        let id = id.clone();
        self.details
            .next(move || {
                let mut p = Product::new(id.clone());
                p.name = Some(format!("product-{id}"));
                Ok(Some(p))
            })
            .await
    }

    async fn top_rated(&self, by: TopRatedBy) -> Result<Vec<Product>, DomainError> {
        self.record(CatalogCall::Top(by));
        Ok((1..=10).map(|i| product(i, &format!("top-{i}"))).collect())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityCall {
    Profile { vector: FlavorVector, top_k: usize },
    Text { query: String, top_k: usize },
}

/// Unscripted profile searches return 20 hits (more than the usual top-k);
/// unscripted text searches return 3 hits named after the query.
#[derive(Default)]
pub struct FakeSimilarity {
    calls: Mutex<Vec<SimilarityCall>>,
    pub profile: Script<Vec<ScoredProduct>>,
    pub text: Script<Vec<ScoredProduct>>,
}

impl FakeSimilarity {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<SimilarityCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn scored_for_text(query: &str, n: usize) -> Vec<ScoredProduct> {
    (0..n)
        .map(|i| ScoredProduct {
            product: product(i as i64 + 1, &format!("{query} #{}", i + 1)),
            similarity: 0.9 - i as f64 * 0.1,
        })
        .collect()
}

pub fn scored_profiles(n: usize) -> Vec<ScoredProduct> {
    (0..n)
        .map(|i| {
            let step = i as f64 / n as f64;
            ScoredProduct {
                product: product_with_flavors(
                    i as i64 + 1,
                    &format!("match-{}", i + 1),
                    [1.0 - step, step, 0.5, 0.0, 1.0, 0.25],
                ),
                similarity: 1.0 - step / 2.0,
            }
        })
        .collect()
}

#[async_trait]
impl ProfileSimilarity for FakeSimilarity {
    async fn search_by_profile(
        &self,
        profile: &FlavorVector,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError> {
        self.calls.lock().unwrap().push(SimilarityCall::Profile {
            vector: *profile,
            top_k,
        });
        self.profile.next(|| Ok(scored_profiles(20))).await
    }
}

#[async_trait]
impl TextSimilarity for FakeSimilarity {
    async fn search_by_text(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<ScoredProduct>, DomainError> {
        self.calls.lock().unwrap().push(SimilarityCall::Text {
            query: query.to_string(),
            top_k,
        });
        let query = query.to_string();
        self.text.next(move || Ok(scored_for_text(&query, 3))).await
    }
}

/// Unscripted lookups return two recommendations named after the product.
#[derive(Default)]
pub struct FakeRecommender {
    calls: Mutex<Vec<ProductId>>,
    pub replies: Script<Vec<Recommendation>>,
}

impl FakeRecommender {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self) -> Vec<ProductId> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

pub fn recommendations_for(id: &ProductId) -> Vec<Recommendation> {
    (1..=2)
        .map(|rank| Recommendation {
            rank,
            product: product(100 + rank as i64, &format!("rec-{id}-{rank}")),
        })
        .collect()
}

#[async_trait]
impl RecommendationService for FakeRecommender {
    async fn recommend_for(&self, id: &ProductId) -> Result<Vec<Recommendation>, DomainError> {
        self.calls.lock().unwrap().push(id.clone());
        let id = id.clone();
        self.replies.next(move || Ok(recommendations_for(&id))).await
    }
}

pub struct Harness {
    pub catalog: Arc<FakeCatalog>,
    pub similarity: Arc<FakeSimilarity>,
    pub recommender: Arc<FakeRecommender>,
    pub browser: SakeBrowser,
}

pub fn setup() -> Harness {
    let catalog = FakeCatalog::new();
    let similarity = FakeSimilarity::new();
    let recommender = FakeRecommender::new();
    let services = Services {
        catalog: catalog.clone(),
        profiles: similarity.clone(),
        texts: similarity.clone(),
        recommender: recommender.clone(),
    };
    let browser = SakeBrowser::with_services(services, &BrowserConfig::default()).unwrap();
    Harness {
        catalog,
        similarity,
        recommender,
        browser,
    }
}
