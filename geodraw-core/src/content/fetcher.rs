// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Content fetcher for conditional document retrieval
//!
//! This module provides HTTP-based document fetching with:
//! - `If-Modified-Since` revalidation against the cached timestamp
//! - GeoJSON parsing of fresh bodies
//!
//! The fetcher never touches the store and never retries; persisting an
//! [`FetchOutcome::Updated`] document is the caller's job.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use reqwest::Url;
use thiserror::Error;
use tracing::{debug, trace};

use super::transport::HttpTransport;
use crate::geo::{self, GeoDocument, ParseError};

/// Result of a successful revalidation.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    /// The server confirmed nothing changed since the known timestamp
    NotModified,
    /// New content was downloaded and parsed
    Updated {
        /// The parsed document
        document: Arc<GeoDocument>,
        /// Timestamp to revalidate against next time
        fetched_at: DateTime<Utc>,
    },
}

/// Fetches documents through an [`HttpTransport`]
pub struct ContentFetcher<T> {
    transport: T,
}

impl<T: HttpTransport> ContentFetcher<T> {
    /// Create a fetcher over the given transport
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetch `url`, revalidating against `known` when present.
    pub async fn fetch(
        &self,
        url: &Url,
        known: Option<DateTime<Utc>>,
    ) -> Result<FetchOutcome, FetchError> {
        let since = known.map(http_date);
        trace!(%url, if_modified_since = ?since, "fetching document");

        let response = self.transport.get(url, since.as_deref()).await?;

        if response.status == 304 {
            debug!(%url, "document not modified");
            return Ok(FetchOutcome::NotModified);
        }
        if !response.is_success() {
            return Err(FetchError::HttpError(response.status));
        }

        let document = geo::parse(&response.body)?;
        let fetched_at = response
            .header("last-modified")
            .and_then(parse_http_date)
            .unwrap_or_else(Utc::now);

        debug!(%url, features = document.features().len(), %fetched_at, "document updated");
        Ok(FetchOutcome::Updated {
            document: Arc::new(document),
            fetched_at,
        })
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Format a timestamp as an HTTP IMF-fixdate.
pub fn http_date(ts: DateTime<Utc>) -> String {
    ts.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date header value.
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Errors that can occur during content fetching
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP error with status code
    #[error("HTTP error: {0}")]
    HttpError(u16),

    /// Network/request error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest transport
    #[error("Connection error: {0}")]
    Connection(String),

    /// Content too large
    #[error("Content too large: {size} bytes (max {max})")]
    TooLarge {
        /// Actual size in bytes
        size: u64,
        /// Maximum allowed size in bytes
        max: u64,
    },

    /// Response body is not a valid document
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}
