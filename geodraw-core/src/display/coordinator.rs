// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Load Coordinator
//!
//! Owns the [`DisplayState`] of one display. Every [`load`] starts a new
//! generation that races the cache path against the fetch path:
//!
//! - The cache path shows a cached document provisionally.
//! - The fetch path replaces it with fresh content, confirms it ("not
//!   modified"), or records an error while keeping stale content visible.
//!
//! All state writes happen under one lock and are checked against the
//! generation and its cancellation token, so superseded or cancelled work
//! never reaches the display.
//!
//! [`load`]: LoadCoordinator::load

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use reqwest::Url;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

use super::arbiter::{PathOutcome, Resolution, Verdict};
use super::state::{DisplayState, LoadRequest, LoadStatus};
use crate::content::{ContentError, ContentProvider};
use crate::geo::{bounding_box_for, BoundingBox, BoundingBoxSuggester, ExtentSuggester, GeoDocument};

/// A document paired with the viewport it is shown with.
#[derive(Clone)]
struct Shown {
    document: Arc<GeoDocument>,
    bounding_box: Option<BoundingBox>,
}

impl Shown {
    fn new(document: Arc<GeoDocument>, suggester: &dyn BoundingBoxSuggester) -> Self {
        let bounding_box = bounding_box_for(&document, suggester);
        Self {
            document,
            bounding_box,
        }
    }
}

type Outcome = PathOutcome<Shown, Arc<ContentError>>;

/// Tokens of the live generation.
struct Active {
    generation: u64,
    token: CancellationToken,
    cache_token: CancellationToken,
}

struct Inner {
    generation: u64,
    active: Option<Active>,
    resolution: Resolution<Shown, Arc<ContentError>>,
    status: LoadStatus,
    url: Option<Url>,
    base_map: Option<Arc<GeoDocument>>,
    base_map_requested: bool,
    tx: watch::Sender<DisplayState>,
}

impl Inner {
    fn snapshot(&self) -> DisplayState {
        let shown = self.resolution.content();
        DisplayState {
            status: self.status,
            url: self.url.clone(),
            map_content: shown.map(|s| s.document.clone()),
            bounding_box: shown.and_then(|s| s.bounding_box),
            load_error: self.resolution.error().cloned(),
            base_map: self.base_map.clone(),
        }
    }

    fn publish(&self) {
        self.tx.send_replace(self.snapshot());
    }

    fn is_current(&self, request: &LoadRequest, token: &CancellationToken) -> bool {
        self.generation == request.generation && !token.is_cancelled()
    }
}

/// Drives loading for one display.
///
/// Spawns its work on the ambient Tokio runtime; [`load`](Self::load) and
/// [`did_appear`](Self::did_appear) must be called from within one.
/// Dropping the coordinator cancels all outstanding work.
pub struct LoadCoordinator<P> {
    provider: Arc<P>,
    suggester: Arc<dyn BoundingBoxSuggester>,
    inner: Arc<Mutex<Inner>>,
    root: CancellationToken,
    tracker: TaskTracker,
}

impl<P: ContentProvider + 'static> LoadCoordinator<P> {
    /// Create a coordinator using the extent of a document's positions when
    /// it declares no bounding box
    pub fn new(provider: Arc<P>) -> Self {
        Self::with_suggester(provider, Arc::new(ExtentSuggester))
    }

    /// Create a coordinator with a custom bounding box suggester
    pub fn with_suggester(provider: Arc<P>, suggester: Arc<dyn BoundingBoxSuggester>) -> Self {
        let (tx, _) = watch::channel(DisplayState::default());
        Self {
            provider,
            suggester,
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                active: None,
                resolution: Resolution::default(),
                status: LoadStatus::Idle,
                url: None,
                base_map: None,
                base_map_requested: false,
                tx,
            })),
            root: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Start loading `url`, superseding any earlier load.
    ///
    /// Returns `None` without touching the state when `url` is absent or
    /// unparsable, or after [`shutdown`](Self::shutdown).
    pub fn load(&self, url: Option<&str>) -> Option<LoadRequest> {
        let url = match Url::parse(url?) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "ignoring unparsable url");
                return None;
            }
        };
        if self.root.is_cancelled() {
            return None;
        }

        let (request, token, cache_token) = {
            let mut inner = lock(&self.inner);
            if let Some(previous) = inner.active.take() {
                debug!(generation = previous.generation, "cancelling superseded load");
                previous.token.cancel();
            }

            inner.generation += 1;
            let request = LoadRequest {
                url: url.clone(),
                generation: inner.generation,
            };
            let token = self.root.child_token();
            let cache_token = token.child_token();
            inner.active = Some(Active {
                generation: request.generation,
                token: token.clone(),
                cache_token: cache_token.clone(),
            });
            inner.resolution.begin();
            inner.status = LoadStatus::Loading;
            inner.url = Some(url);
            inner.publish();
            (request, token, cache_token)
        };

        debug!(url = %request.url, generation = request.generation, "load started");
        self.spawn_cache_path(request.clone(), cache_token);
        self.spawn_fetch_path(request.clone(), token);
        Some(request)
    }

    /// Load the shared base map into this display, once.
    ///
    /// Failures are logged and leave the base layer empty; a later call
    /// tries again.
    pub fn did_appear(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.base_map_requested || self.root.is_cancelled() {
                return;
            }
            inner.base_map_requested = true;
        }

        let provider = self.provider.clone();
        let inner = self.inner.clone();
        let token = self.root.clone();
        self.tracker.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                result = provider.continents() => result,
            };

            let mut inner = lock(&inner);
            if token.is_cancelled() {
                return;
            }
            match result {
                Ok(document) => {
                    inner.base_map = Some(document);
                    inner.publish();
                }
                Err(e) => {
                    warn!(error = %e, "failed to load base map");
                    inner.base_map_requested = false;
                }
            }
        });
    }

    fn spawn_cache_path(&self, request: LoadRequest, token: CancellationToken) {
        let provider = self.provider.clone();
        let suggester = self.suggester.clone();
        let inner = self.inner.clone();
        self.tracker.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                result = provider.cached_content(&request.url) => result,
            };

            // The cache is best-effort: failures count as a miss.
            let cached = result.unwrap_or_else(|e| {
                debug!(url = %request.url, error = %e, "cache lookup failed");
                None
            });
            let shown = cached.map(|doc| Shown::new(doc, suggester.as_ref()));
            apply(&inner, &request, &token, PathOutcome::Cached(shown));
        });
    }

    fn spawn_fetch_path(&self, request: LoadRequest, token: CancellationToken) {
        let provider = self.provider.clone();
        let suggester = self.suggester.clone();
        let inner = self.inner.clone();
        self.tracker.spawn(async move {
            let result = tokio::select! {
                biased;
                _ = token.cancelled() => return,
                result = provider.fetch_content(&request.url) => result,
            };

            let outcome = match result {
                Ok(fresh) => {
                    PathOutcome::Fetched(Ok(fresh.map(|doc| Shown::new(doc, suggester.as_ref()))))
                }
                Err(e) => PathOutcome::Fetched(Err(Arc::new(e))),
            };
            apply(&inner, &request, &token, outcome);
        });
    }

    /// Current state snapshot
    pub fn state(&self) -> DisplayState {
        lock(&self.inner).tx.borrow().clone()
    }

    /// Receive a snapshot after every state change
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        lock(&self.inner).tx.subscribe()
    }

    /// Generation of the most recent load request (0 before the first)
    pub fn generation(&self) -> u64 {
        lock(&self.inner).generation
    }

    /// Wait until all outstanding load work has finished
    pub async fn settle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Cancel all outstanding work; later loads are ignored
    pub fn shutdown(&self) {
        if !self.root.is_cancelled() {
            debug!("shutting down load coordinator");
            self.root.cancel();
        }
    }

    /// Get access to the provider
    pub fn provider(&self) -> &Arc<P> {
        &self.provider
    }
}

impl<P> Drop for LoadCoordinator<P> {
    fn drop(&mut self) {
        self.root.cancel();
    }
}

/// Apply one path's outcome if its generation is still live.
fn apply(
    inner: &Mutex<Inner>,
    request: &LoadRequest,
    token: &CancellationToken,
    outcome: Outcome,
) {
    let mut inner = lock(inner);
    if !inner.is_current(request, token) {
        debug!(
            url = %request.url,
            generation = request.generation,
            "discarding result of superseded load"
        );
        return;
    }

    let verdict = inner.resolution.apply(outcome);
    match verdict {
        Verdict::ShowProvisional => {
            debug!(url = %request.url, generation = request.generation, "showing cached content");
        }
        Verdict::ShowFresh => {
            info!(url = %request.url, generation = request.generation, "showing fresh content");
            if let Some(active) = &inner.active {
                active.cache_token.cancel();
            }
            inner.status = LoadStatus::Resolved;
        }
        Verdict::Confirm => {
            debug!(url = %request.url, "cached content is current");
            inner.status = LoadStatus::Resolved;
        }
        Verdict::Fail => {
            if let Some(e) = inner.resolution.error() {
                warn!(url = %request.url, error = %e, "failed to fetch content");
            }
            inner.status = LoadStatus::Failed;
        }
        Verdict::Ignore => return,
    }
    inner.publish();
}

fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}
