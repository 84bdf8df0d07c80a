// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted transport for tests

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Url;
use tokio::sync::Notify;

use super::fetcher::FetchError;
use super::transport::{HttpResponse, HttpTransport};

/// A request observed by [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// Requested URL
    pub url: Url,
    /// Value of the `If-Modified-Since` header, if sent
    pub if_modified_since: Option<String>,
}

#[derive(Clone)]
enum Reply {
    Respond(HttpResponse),
    Fail(String),
}

#[derive(Clone)]
struct Scripted {
    reply: Reply,
    gate: Option<Arc<Notify>>,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<Url, VecDeque<Scripted>>,
    requests: Vec<RecordedRequest>,
}

/// In-memory [`HttpTransport`] with scripted replies per URL.
///
/// Replies queued for a URL are served in order; the last one is repeated
/// once the queue is down to a single reply. Unscripted URLs get a 404.
///
/// # Example
///
/// ```
/// use geodraw_core::content::{HttpResponse, MockTransport};
/// use reqwest::Url;
///
/// let url = Url::parse("https://example.com/a.geojson").unwrap();
/// let mock = MockTransport::new();
/// mock.respond(&url, HttpResponse::not_modified());
/// assert!(mock.requests().is_empty());
/// ```
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Create a transport with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `url`
    pub fn respond(&self, url: &Url, response: HttpResponse) {
        self.script(url, Reply::Respond(response), None);
    }

    /// Queue a response for `url` that is held back until `gate` is notified
    pub fn respond_gated(&self, url: &Url, response: HttpResponse, gate: Arc<Notify>) {
        self.script(url, Reply::Respond(response), Some(gate));
    }

    /// Queue a transport failure for `url`
    pub fn fail(&self, url: &Url, message: &str) {
        self.script(url, Reply::Fail(message.to_string()), None);
    }

    /// Queue a transport failure for `url` that is held back until `gate` is notified
    pub fn fail_gated(&self, url: &Url, message: &str, gate: Arc<Notify>) {
        self.script(url, Reply::Fail(message.to_string()), Some(gate));
    }

    /// All requests seen so far, in order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    fn script(&self, url: &Url, reply: Reply, gate: Option<Arc<Notify>>) {
        self.lock()
            .routes
            .entry(url.clone())
            .or_default()
            .push_back(Scripted { reply, gate });
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HttpTransport for MockTransport {
    fn get(
        &self,
        url: &Url,
        if_modified_since: Option<&str>,
    ) -> impl Future<Output = Result<HttpResponse, FetchError>> + Send {
        let scripted = {
            let mut state = self.lock();
            state.requests.push(RecordedRequest {
                url: url.clone(),
                if_modified_since: if_modified_since.map(str::to_string),
            });
            state.routes.get_mut(url).and_then(|queue| {
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
            })
        };

        async move {
            let Some(scripted) = scripted else {
                return Ok(HttpResponse::with_status(404, Vec::new()));
            };
            if let Some(gate) = scripted.gate {
                gate.notified().await;
            }
            match scripted.reply {
                Reply::Respond(response) => Ok(response),
                Reply::Fail(message) => Err(FetchError::Connection(message)),
            }
        }
    }
}
