//! Paginated stock catalog with search supersession.
//!
//! At most one provider request is in flight. A new search discards the
//! outstanding one instead of queueing behind it, and every merge drops
//! entries whose id is already listed.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;

use clipdeck_common::config::StockConfig;

use crate::error::{StockError, StockResult};
use crate::pexels::PexelsProvider;
use crate::provider::{SampleProvider, StockProvider};
use crate::video::{filtered_static_samples, Category, SearchRequest, StockPage, StockVideo};

/// What settling the outstanding request did to the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogUpdate {
    /// Nothing was in flight.
    Idle,
    /// A first page replaced the listing.
    Replaced { count: usize },
    /// A follow-up page was merged; `added` excludes duplicates.
    Appended { added: usize },
    /// The provider failed. The listing is unchanged and pagination stops.
    Failed { error: StockError },
}

struct Inflight {
    request: SearchRequest,
    append: bool,
    handle: JoinHandle<StockResult<StockPage>>,
}

/// Search state and results for the stock footage panel.
pub struct StockCatalog {
    provider: Arc<dyn StockProvider>,
    query: String,
    category: Category,
    videos: Vec<StockVideo>,
    page: u32,
    has_more: bool,
    last_error: Option<StockError>,
    inflight: Option<Inflight>,
}

impl StockCatalog {
    pub fn new(provider: Arc<dyn StockProvider>) -> Self {
        Self {
            provider,
            query: String::new(),
            category: Category::All,
            videos: Vec::new(),
            page: 0,
            has_more: true,
            last_error: None,
            inflight: None,
        }
    }

    /// Pexels when an API key is configured, the sample library otherwise.
    pub fn from_config(config: &StockConfig) -> Self {
        let provider: Arc<dyn StockProvider> = match PexelsProvider::from_config(config) {
            Ok(pexels) => Arc::new(pexels),
            Err(e) => {
                tracing::info!(reason = %e, "Pexels unavailable; using sample stock library");
                Arc::new(SampleProvider::new())
            }
        };
        tracing::info!(provider = provider.name(), "Stock catalog ready");
        Self::new(provider)
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Last page successfully merged (0 before the first result).
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.inflight.is_some()
    }

    pub fn last_error(&self) -> Option<&StockError> {
        self.last_error.as_ref()
    }

    /// Provider results merged so far.
    pub fn videos(&self) -> &[StockVideo] {
        &self.videos
    }

    /// What the panel shows: provider results, or the static samples
    /// matching the current filter while there are none.
    pub fn displayed(&self) -> Vec<StockVideo> {
        if self.videos.is_empty() {
            filtered_static_samples(self.category, &self.query)
        } else {
            self.videos.clone()
        }
    }

    /// Look up a displayed entry by id.
    pub fn find(&self, id: &str) -> Option<StockVideo> {
        self.displayed().into_iter().find(|v| v.id == id)
    }

    /// Start a fresh search, superseding any request still in flight.
    ///
    /// The request runs on the current Tokio runtime. Without one the search
    /// fails immediately: `last_error` is set and the static samples stay
    /// displayed. Returns whether a request was started.
    pub fn search(&mut self, query: impl Into<String>, category: Category) -> bool {
        self.cancel();
        self.query = query.into();
        self.category = category;
        self.videos.clear();
        self.page = 0;
        self.has_more = true;
        self.last_error = None;
        self.spawn(SearchRequest::new(self.query.clone(), category, 1), false)
    }

    /// Request the next page. Returns `false` when there is nothing more
    /// or a request is already outstanding.
    pub fn load_more(&mut self) -> bool {
        if !self.has_more || self.inflight.is_some() {
            return false;
        }
        let request = SearchRequest::new(self.query.clone(), self.category, self.page + 1);
        self.spawn(request, true)
    }

    /// Drop the outstanding request, if any. A provider call already running
    /// finishes in the background; its result is discarded.
    pub fn cancel(&mut self) {
        if let Some(inflight) = self.inflight.take() {
            tracing::debug!(
                query = %inflight.request.query,
                page = inflight.request.page,
                "Superseding in-flight stock search"
            );
            inflight.handle.abort();
        }
    }

    /// Wait for the outstanding request and merge its result.
    pub async fn settle(&mut self) -> CatalogUpdate {
        let Some(inflight) = self.inflight.take() else {
            return CatalogUpdate::Idle;
        };

        let result = match inflight.handle.await {
            Ok(result) => result,
            Err(e) => Err(StockError::Task {
                message: e.to_string(),
            }),
        };

        match result {
            Ok(page) => self.merge(inflight.request, inflight.append, page),
            Err(error) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %error,
                    "Stock search failed; showing sample clips"
                );
                self.has_more = false;
                self.last_error = Some(error.clone());
                CatalogUpdate::Failed { error }
            }
        }
    }

    fn spawn(&mut self, request: SearchRequest, append: bool) -> bool {
        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                let error = StockError::Task {
                    message: e.to_string(),
                };
                tracing::warn!(
                    provider = self.provider.name(),
                    error = %error,
                    "Stock search not started; showing sample clips"
                );
                self.has_more = false;
                self.last_error = Some(error);
                return false;
            }
        };
        let provider = Arc::clone(&self.provider);
        let task_request = request.clone();
        let handle = runtime.spawn_blocking(move || provider.search(&task_request));
        self.inflight = Some(Inflight {
            request,
            append,
            handle,
        });
        true
    }

    fn merge(&mut self, request: SearchRequest, append: bool, page: StockPage) -> CatalogUpdate {
        let StockPage { videos: page, received } = page;
        self.has_more = received >= self.provider.page_size();
        self.page = request.page;
        self.last_error = None;

        if !append {
            self.videos.clear();
        }
        let mut seen: HashSet<String> = self.videos.iter().map(|v| v.id.clone()).collect();
        let before = self.videos.len();
        self.videos
            .extend(page.into_iter().filter(|v| seen.insert(v.id.clone())));
        let added = self.videos.len() - before;

        tracing::info!(
            provider = self.provider.name(),
            page = request.page,
            received,
            added,
            has_more = self.has_more,
            "Stock videos loaded"
        );

        if append {
            CatalogUpdate::Appended { added }
        } else {
            CatalogUpdate::Replaced { count: added }
        }
    }
}
