use tracing::debug;

use super::{CatalogClient, CatalogError, Product, ProductPage, Query};

/// Controller-side fetch state. `Errored` is re-enterable: a retry simply
/// begins another load from the unchanged cursor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Errored(String),
}

/// Ticket for one in-flight page fetch. Carries the query and generation it
/// was issued under so a response that outlives its query can be recognized
/// and discarded.
#[derive(Debug, Clone)]
pub struct PageRequest {
    pub skip: usize,
    pub query: Query,
    generation: u64,
}

/// Incremental-loading controller: owns the paging cursor, the accumulated
/// (raw, unrefined) product list, and the loading/error/exhausted state for
/// the current [`Query`].
#[derive(Debug)]
pub struct Pager {
    query: Query,
    products: Vec<Product>,
    skip: usize,
    total: Option<usize>,
    has_more: bool,
    state: FetchState,
    generation: u64,
}

impl Pager {
    pub fn new(query: Query) -> Self {
        Self {
            query,
            products: Vec::new(),
            skip: 0,
            total: None,
            has_more: true,
            state: FetchState::Idle,
            generation: 0,
        }
    }

    /// Accumulated products in fetch order. May contain duplicates across
    /// overlapping pages; de-duplication is the view reducer's job.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn skip(&self) -> usize {
        self.skip
    }

    pub fn total(&self) -> Option<usize> {
        self.total
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state == FetchState::Loading
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Errored(message) => Some(message),
            _ => None,
        }
    }

    /// Drop all accumulated state and start over at skip 0 for `query`.
    /// Bumping the generation orphans any response still in flight.
    pub fn reset(&mut self, query: Query) {
        debug!(search = %query.search, category = %query.category, "pager reset");
        self.query = query;
        self.products.clear();
        self.skip = 0;
        self.total = None;
        self.has_more = true;
        self.state = FetchState::Idle;
        self.generation += 1;
    }

    /// Reset only if `query` addresses a different result set than the
    /// current one (normalized comparison; see [`Query::key`]).
    pub fn set_query(&mut self, query: Query) {
        if query.key() != self.query.key() {
            self.reset(query);
        }
    }

    /// True when the first page of the current query should be fetched
    /// without waiting for a scroll trigger.
    pub fn wants_load(&self) -> bool {
        self.products.is_empty() && self.has_more && !self.is_loading()
    }

    /// Begin a page load. Returns `None` without side effects when a load is
    /// already in flight or the current query is exhausted; this is the
    /// authoritative re-entrancy guard.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading() || !self.has_more {
            return None;
        }
        self.state = FetchState::Loading;
        Some(PageRequest {
            skip: self.skip,
            query: self.query.clone(),
            generation: self.generation,
        })
    }

    /// Apply the outcome of a load begun with [`Pager::begin_load`]. A result
    /// whose request predates the latest reset is discarded untouched.
    pub fn complete_load(&mut self, request: PageRequest, result: Result<ProductPage, CatalogError>) {
        if request.generation != self.generation {
            debug!(
                stale_skip = request.skip,
                stale_search = %request.query.search,
                "discarding response for superseded query"
            );
            return;
        }

        match result {
            Ok(page) => {
                // Advance by what actually arrived, not by the page size:
                // the final page is usually short.
                let received = page.products.len();
                self.products.extend(page.products);
                self.skip += received;
                self.total = Some(page.total);
                // An empty page closes the stream even if the reported
                // total disagrees.
                self.has_more = received > 0 && self.skip < page.total;
                self.state = FetchState::Idle;
                debug!(
                    skip = self.skip,
                    total = page.total,
                    has_more = self.has_more,
                    "page applied"
                );
            }
            Err(err) => {
                // Cursor and accumulation stay put; retrying re-requests the
                // same skip.
                self.state = FetchState::Errored(err.to_string());
            }
        }
    }

    /// Fetch and apply the next page. No-op when ineligible. Errors are
    /// absorbed into [`FetchState::Errored`]; they never propagate.
    pub async fn load_next_page(&mut self, client: &CatalogClient) {
        let Some(request) = self.begin_load() else {
            return;
        };
        let result = client.fetch_page(request.skip, &request.query).await;
        self.complete_load(request, result);
    }
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(Query::default())
    }
}
