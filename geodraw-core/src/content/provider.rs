// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content provider - the façade displays load through
//!
//! The provider coordinates between:
//! - Cached content (served immediately when available)
//! - Remote content (revalidated against the cache timestamp)
//! - The shared base map

use std::future::Future;
use std::sync::Arc;

use reqwest::Url;
use tracing::debug;

use super::cache::ContentStore;
use super::config::ContentConfig;
use super::error::ContentError;
use super::fetcher::{ContentFetcher, FetchError, FetchOutcome};
use super::transport::{HttpTransport, ReqwestTransport};
use crate::geo::GeoDocument;

/// The three operations a display needs, each independently awaitable.
pub trait ContentProvider: Send + Sync {
    /// Cached document for `url`, if any.
    ///
    /// Absence is not an error. Providers without a cache keep the default.
    fn cached_content(
        &self,
        _url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send {
        async { Ok(None) }
    }

    /// Revalidate `url` against the network.
    ///
    /// Returns `None` when the cached copy is already current.
    fn fetch_content(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send;

    /// The shared base map.
    fn continents(&self) -> impl Future<Output = Result<Arc<GeoDocument>, ContentError>> + Send;
}

/// [`ContentProvider`] backed by a [`ContentStore`] and a [`ContentFetcher`]
pub struct GeoContentProvider<T = ReqwestTransport> {
    store: ContentStore,
    fetcher: ContentFetcher<T>,
}

impl GeoContentProvider<ReqwestTransport> {
    /// Create a provider talking HTTP via reqwest, with the bundled base map
    pub fn new(config: &ContentConfig) -> Result<Self, FetchError> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: HttpTransport> GeoContentProvider<T> {
    /// Create a provider over a custom transport, with the bundled base map
    pub fn with_transport(transport: T) -> Self {
        Self::with_parts(ContentStore::default(), transport)
    }

    /// Create a provider from an existing store and transport
    pub fn with_parts(store: ContentStore, transport: T) -> Self {
        Self {
            store,
            fetcher: ContentFetcher::new(transport),
        }
    }

    /// Get access to the store (for advanced operations)
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Get access to the fetcher
    pub fn fetcher(&self) -> &ContentFetcher<T> {
        &self.fetcher
    }
}

impl<T: HttpTransport> ContentProvider for GeoContentProvider<T> {
    fn cached_content(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send {
        let entry = self.store.get(url);
        debug!(%url, hit = entry.is_some(), "cache lookup");
        async move { Ok(entry.map(|e| e.document)) }
    }

    fn fetch_content(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send {
        async move {
            let known = self.store.fetched_at(url);
            match self.fetcher.fetch(url, known).await? {
                FetchOutcome::NotModified => Ok(None),
                FetchOutcome::Updated {
                    document,
                    fetched_at,
                } => {
                    self.store.put(url.clone(), document.clone(), fetched_at);
                    Ok(Some(document))
                }
            }
        }
    }

    fn continents(&self) -> impl Future<Output = Result<Arc<GeoDocument>, ContentError>> + Send {
        self.store.base_map()
    }
}
