//! Incremental catalog loader
//!
//! A [`PaginatedFeed`] owns the canonical, ever-growing list of items for one
//! catalog together with the next page cursor and a loading guard. Loads are
//! split in three steps so the guard still holds when the fetch itself runs on
//! a detached task:
//!
//! 1. [`PaginatedFeed::begin_load_next`] / [`PaginatedFeed::begin_refresh`]
//!    claim the guard and hand out a [`PageRequest`]
//! 2. [`PaginatedFeed::fetch`] turns the request into a `'static` future
//! 3. [`PaginatedFeed::complete`] commits the [`PageResponse`]
//!
//! Every request carries the feed generation. A refresh bumps the generation,
//! so responses issued before it are discarded instead of being appended on
//! top of the fresh list.

use async_trait::async_trait;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::CatalogClient;
use crate::error::CatalogError;
use crate::models::{CatalogItem, CatalogType, DetailRecord};

/// Page cursor of a freshly mounted feed
pub const FIRST_PAGE: u32 = 1;

/// Anything a feed can hold: keyed for dedup, titled for search
pub trait FeedItem: Clone + Send + Sync + 'static {
    fn key(&self) -> u64;
    fn title(&self) -> &str;
}

impl FeedItem for CatalogItem {
    fn key(&self) -> u64 {
        self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

impl FeedItem for DetailRecord {
    fn key(&self) -> u64 {
        self.item.id
    }

    fn title(&self) -> &str {
        &self.item.title
    }
}

/// Fetches one page of items
#[async_trait]
pub trait PageSource: Send + Sync + 'static {
    type Item: FeedItem;

    async fn fetch_page(&self, page: u32) -> Result<Vec<Self::Item>, CatalogError>;
}

/// Whether a response extends or replaces the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    Append,
    Replace,
}

/// Ticket for one in-flight page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub mode: FetchMode,
    generation: u64,
}

/// Result of a page fetch, tagged with the request that produced it
#[derive(Debug)]
pub struct PageResponse<T> {
    pub request: PageRequest,
    pub result: Result<Vec<T>, CatalogError>,
}

/// What a load did to the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Another load was in flight; nothing was fetched
    Skipped,
    /// New items were appended (duplicates dropped) and the cursor advanced
    Appended { added: usize },
    /// The list was replaced by a fresh first page
    Replaced { count: usize },
    /// The response belonged to an older generation and was ignored
    Discarded,
}

/// Paginated, deduplicated list of items for one catalog
pub struct PaginatedFeed<S: PageSource> {
    source: Arc<S>,
    items: Vec<S::Item>,
    keys: HashSet<u64>,
    page: u32,
    loading: bool,
    generation: u64,
}

impl<S: PageSource> PaginatedFeed<S> {
    pub fn new(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    pub fn from_shared(source: Arc<S>) -> Self {
        Self {
            source,
            items: Vec::new(),
            keys: HashSet::new(),
            page: FIRST_PAGE,
            loading: false,
            generation: 0,
        }
    }

    /// Canonical item list, in load order
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    /// Next page to fetch
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Claim the loading guard for the next page.
    ///
    /// Returns `None` while any load is in flight; the intent is dropped,
    /// not queued.
    pub fn begin_load_next(&mut self) -> Option<PageRequest> {
        if self.loading {
            debug!(page = self.page, "load already in flight, dropping request");
            return None;
        }

        self.loading = true;
        Some(PageRequest {
            page: self.page,
            mode: FetchMode::Append,
            generation: self.generation,
        })
    }

    /// Start a refresh from the first page.
    ///
    /// Ignores the loading guard. Any response issued before this call
    /// becomes stale and will be discarded.
    pub fn begin_refresh(&mut self) -> PageRequest {
        self.generation += 1;
        self.loading = true;
        PageRequest {
            page: FIRST_PAGE,
            mode: FetchMode::Replace,
            generation: self.generation,
        }
    }

    /// Build the fetch for a request. The future owns everything it needs.
    pub fn fetch(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = PageResponse<S::Item>> + Send + 'static {
        let source = Arc::clone(&self.source);
        async move {
            let result = source.fetch_page(request.page).await;
            PageResponse { request, result }
        }
    }

    /// Commit a response.
    ///
    /// On failure the list and cursor are untouched, the guard is released and
    /// the error is handed back.
    pub fn complete(
        &mut self,
        response: PageResponse<S::Item>,
    ) -> Result<LoadOutcome, CatalogError> {
        let PageResponse { request, result } = response;

        if request.generation != self.generation {
            debug!(
                page = request.page,
                stale = request.generation,
                current = self.generation,
                "discarding stale page"
            );
            return Ok(LoadOutcome::Discarded);
        }

        self.loading = false;

        let items = match result {
            Ok(items) => items,
            Err(err) => {
                warn!(page = request.page, error = %err, "page fetch failed");
                return Err(err);
            }
        };

        match request.mode {
            FetchMode::Append => {
                let added = self.append(items);
                self.page = request.page + 1;
                Ok(LoadOutcome::Appended { added })
            }
            FetchMode::Replace => {
                self.items.clear();
                self.keys.clear();
                let count = self.append(items);
                self.page = FIRST_PAGE + 1;
                Ok(LoadOutcome::Replaced { count })
            }
        }
    }

    /// Fetch and append the next page
    pub async fn load_next(&mut self) -> Result<LoadOutcome, CatalogError> {
        let Some(request) = self.begin_load_next() else {
            return Ok(LoadOutcome::Skipped);
        };
        let response = self.fetch(request).await;
        self.complete(response)
    }

    /// Fetch the first page and replace the list
    pub async fn refresh(&mut self) -> Result<LoadOutcome, CatalogError> {
        let request = self.begin_refresh();
        let response = self.fetch(request).await;
        self.complete(response)
    }

    /// Append items whose key is not already present. Returns how many were kept.
    fn append(&mut self, items: Vec<S::Item>) -> usize {
        let before = self.items.len();
        for item in items {
            if self.keys.insert(item.key()) {
                self.items.push(item);
            } else {
                debug!(key = item.key(), "dropping duplicate item");
            }
        }
        self.items.len() - before
    }
}

// =============================================================================
// Catalog-backed feeds
// =============================================================================

/// Popular list of one catalog type, fetched through a [`CatalogClient`]
#[derive(Clone)]
pub struct CatalogPages {
    client: Arc<dyn CatalogClient>,
    kind: CatalogType,
}

impl CatalogPages {
    pub fn new(client: Arc<dyn CatalogClient>, kind: CatalogType) -> Self {
        Self { client, kind }
    }

    pub fn kind(&self) -> CatalogType {
        self.kind
    }
}

#[async_trait]
impl PageSource for CatalogPages {
    type Item = CatalogItem;

    async fn fetch_page(&self, page: u32) -> Result<Vec<CatalogItem>, CatalogError> {
        self.client.fetch_page(self.kind, page).await
    }
}

/// Feed of popular movies or TV shows
pub type CatalogFeed = PaginatedFeed<CatalogPages>;

impl PaginatedFeed<CatalogPages> {
    pub fn catalog(client: Arc<dyn CatalogClient>, kind: CatalogType) -> Self {
        Self::new(CatalogPages::new(client, kind))
    }

    pub fn kind(&self) -> CatalogType {
        self.source.kind
    }
}
