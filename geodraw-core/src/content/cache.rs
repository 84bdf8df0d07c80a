// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-memory content store
//!
//! Holds one [`CacheEntry`] per source URL plus the lazily computed base
//! map. Entries are replaced wholesale on revalidation and never merged.
//! The store is not durable across restarts.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use chrono::{DateTime, Utc};
use reqwest::Url;
use tokio::sync::OnceCell;
use tracing::debug;

use super::basemap::{BaseMapSupplier, BundledCountries};
use super::error::ContentError;
use crate::geo::GeoDocument;

/// A cached document and the time it was last revalidated
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Source URL
    pub url: Url,
    /// Parsed document
    pub document: Arc<GeoDocument>,
    /// Revalidation timestamp
    pub fetched_at: DateTime<Utc>,
}

/// Shared store of fetched documents
pub struct ContentStore {
    entries: RwLock<HashMap<Url, CacheEntry>>,
    base_map: OnceCell<Arc<GeoDocument>>,
    supplier: Arc<dyn BaseMapSupplier>,
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::new(Arc::new(BundledCountries))
    }
}

impl ContentStore {
    /// Create an empty store using `supplier` for the base map
    pub fn new(supplier: Arc<dyn BaseMapSupplier>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            base_map: OnceCell::new(),
            supplier,
        }
    }

    /// Get the entry for `url` if it exists
    pub fn get(&self, url: &Url) -> Option<CacheEntry> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(url)
            .cloned()
    }

    /// Insert or replace the entry for `url`
    pub fn put(&self, url: Url, document: Arc<GeoDocument>, fetched_at: DateTime<Utc>) {
        let entry = CacheEntry {
            url: url.clone(),
            document,
            fetched_at,
        };
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url, entry);
    }

    /// Revalidation timestamp of the entry for `url`
    pub fn fetched_at(&self, url: &Url) -> Option<DateTime<Utc>> {
        self.get(url).map(|e| e.fetched_at)
    }

    /// Number of cached documents
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether no documents are cached
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The shared base map, computed on first access
    ///
    /// Concurrent first callers wait for a single computation and all get
    /// the same `Arc`. A failed computation is not cached, so a later call
    /// tries again.
    pub async fn base_map(&self) -> Result<Arc<GeoDocument>, ContentError> {
        self.base_map
            .get_or_try_init(|| async {
                debug!("computing base map");
                self.supplier.load_countries().map(Arc::new)
            })
            .await
            .cloned()
    }
}
