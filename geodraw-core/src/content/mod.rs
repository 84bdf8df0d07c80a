// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote content module
//!
//! Provides functionality for fetching, caching, and serving GeoJSON
//! documents:
//! - An in-memory store keyed by source URL
//! - Conditional revalidation with `If-Modified-Since`
//! - The shared base map of country outlines
//!
//! Bundled outlines serve as the base map unless another supplier is
//! injected.

mod basemap;
mod cache;
mod config;
mod error;
mod fetcher;
mod mock;
mod provider;
mod transport;

pub use basemap::{BaseMapSupplier, BundledCountries};
pub use cache::{CacheEntry, ContentStore};
pub use config::ContentConfig;
pub use error::ContentError;
pub use fetcher::{http_date, parse_http_date, ContentFetcher, FetchError, FetchOutcome};
pub use mock::{MockTransport, RecordedRequest};
pub use provider::{ContentProvider, GeoContentProvider};
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
