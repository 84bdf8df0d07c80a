// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP transport abstraction
//!
//! The fetcher only needs a conditional GET. Keeping it behind a trait lets
//! tests script responses with [`MockTransport`](super::MockTransport)
//! instead of talking to a server.

use std::future::Future;
use std::sync::Arc;

use reqwest::{header, Client, Url};

use super::config::ContentConfig;
use super::fetcher::FetchError;

/// A buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code
    pub status: u16,
    /// Response body (empty for 304)
    pub body: Vec<u8>,
    /// Response headers as (name, value) pairs
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    /// A `200 OK` response with the given body.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::with_status(200, body)
    }

    /// A `304 Not Modified` response.
    pub fn not_modified() -> Self {
        Self::with_status(304, Vec::new())
    }

    /// A response with an arbitrary status.
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            headers: Vec::new(),
        }
    }

    /// Add a header.
    pub fn header_pair(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Look up a header value, ignoring case of the name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Conditional HTTP GET.
pub trait HttpTransport: Send + Sync {
    /// Perform a GET request, adding `If-Modified-Since` when given.
    ///
    /// Non-success statuses are returned as responses, not errors; only
    /// transport-level failures are errors.
    fn get(
        &self,
        url: &Url,
        if_modified_since: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send;
}

impl<T: HttpTransport> HttpTransport for Arc<T> {
    fn get(
        &self,
        url: &Url,
        if_modified_since: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
        (**self).get(url, if_modified_since)
    }
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    max_content_size: u64,
}

impl ReqwestTransport {
    /// Create a transport from config
    pub fn new(config: &ContentConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone());

        if let Some(proxy_url) = &config.proxy_url {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        Ok(Self {
            client: builder.build()?,
            max_content_size: config.max_content_size,
        })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(
        &self,
        url: &Url,
        if_modified_since: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
        let mut request = self.client.get(url.clone());
        if let Some(since) = if_modified_since {
            request = request.header(header::IF_MODIFIED_SINCE, since);
        }
        let max = self.max_content_size;

        async move {
            let response = request.send().await?;
            let status = response.status().as_u16();

            // Check content length before downloading
            if let Some(len) = response.content_length() {
                if len > max {
                    return Err(FetchError::TooLarge { size: len, max });
                }
            }

            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();

            let body = response.bytes().await?.to_vec();

            // Content-length may be missing or wrong
            if body.len() as u64 > max {
                return Err(FetchError::TooLarge {
                    size: body.len() as u64,
                    max,
                });
            }

            Ok(HttpResponse {
                status,
                body,
                headers,
            })
        }
    }
}
