// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shared fixtures for loading tests

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use geodraw_core::content::{ContentError, ContentProvider, FetchError};
use geodraw_core::{DisplayState, Feature, GeoDocument, Geometry, Position};
use reqwest::Url;
use tokio::sync::{watch, Notify};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn url(s: &str) -> Url {
    Url::parse(s).unwrap()
}

/// A document with one point per longitude.
pub fn doc(lons: &[f64]) -> Arc<GeoDocument> {
    let features = lons
        .iter()
        .map(|lon| {
            Feature::from_geometry(Geometry::Point {
                coordinates: Position::new(*lon, lon / 2.0),
            })
        })
        .collect();
    Arc::new(GeoDocument::new(features, None))
}

pub fn same(a: &Option<Arc<GeoDocument>>, b: &Arc<GeoDocument>) -> bool {
    a.as_ref().is_some_and(|a| Arc::ptr_eq(a, b))
}

/// Wait (bounded) until the display state satisfies `pred`.
pub async fn wait_until(
    rx: &mut watch::Receiver<DisplayState>,
    pred: impl FnMut(&DisplayState) -> bool,
) -> DisplayState {
    tokio::time::timeout(Duration::from_secs(5), rx.wait_for(pred))
        .await
        .expect("timed out waiting for display state")
        .expect("coordinator dropped")
        .clone()
}

#[derive(Clone)]
pub enum FetchReply {
    Fresh(Arc<GeoDocument>),
    NotModified,
    Fail(String),
}

#[derive(Clone)]
struct Route {
    cached: Option<Arc<GeoDocument>>,
    cache_error: Option<String>,
    cache_gate: Option<Arc<Notify>>,
    fetch: FetchReply,
    fetch_gate: Option<Arc<Notify>>,
}

impl Default for Route {
    fn default() -> Self {
        Self {
            cached: None,
            cache_error: None,
            cache_gate: None,
            fetch: FetchReply::Fail("no route".to_string()),
            fetch_gate: None,
        }
    }
}

/// Provider whose cache and fetch replies can each be held back.
#[derive(Default)]
pub struct GatedProvider {
    routes: Mutex<HashMap<Url, Route>>,
}

impl GatedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self, url: &Url, cached: Option<Arc<GeoDocument>>, fetch: FetchReply) {
        let mut routes = self.routes.lock().unwrap();
        let route = routes.entry(url.clone()).or_default();
        route.cached = cached;
        route.fetch = fetch;
    }

    /// Make the cache lookup for `url` fail with `message`.
    pub fn fail_cache(&self, url: &Url, message: &str) {
        self.routes
            .lock()
            .unwrap()
            .entry(url.clone())
            .or_default()
            .cache_error = Some(message.to_string());
    }

    pub fn gate_cache(&self, url: &Url) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.routes
            .lock()
            .unwrap()
            .entry(url.clone())
            .or_default()
            .cache_gate = Some(gate.clone());
        gate
    }

    pub fn gate_fetch(&self, url: &Url) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.routes
            .lock()
            .unwrap()
            .entry(url.clone())
            .or_default()
            .fetch_gate = Some(gate.clone());
        gate
    }

    fn lookup(&self, url: &Url) -> Route {
        self.routes
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_default()
    }
}

impl ContentProvider for GatedProvider {
    fn cached_content(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send {
        let route = self.lookup(url);
        async move {
            if let Some(gate) = route.cache_gate {
                gate.notified().await;
            }
            match route.cache_error {
                Some(message) => Err(ContentError::BaseMap(message)),
                None => Ok(route.cached),
            }
        }
    }

    fn fetch_content(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Option<Arc<GeoDocument>>, ContentError>> + Send {
        let route = self.lookup(url);
        async move {
            if let Some(gate) = route.fetch_gate {
                gate.notified().await;
            }
            match route.fetch {
                FetchReply::Fresh(doc) => Ok(Some(doc)),
                FetchReply::NotModified => Ok(None),
                FetchReply::Fail(message) => Err(FetchError::Connection(message).into()),
            }
        }
    }

    fn continents(&self) -> impl Future<Output = Result<Arc<GeoDocument>, ContentError>> + Send {
        async { Ok(doc(&[0.0])) }
    }
}
