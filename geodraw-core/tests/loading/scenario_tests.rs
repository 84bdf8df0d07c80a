// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! End-to-end loading through GeoContentProvider and a scripted transport

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use geodraw_core::content::{http_date, GeoContentProvider, HttpResponse, MockTransport};
use geodraw_core::{BoundingBox, LoadCoordinator, LoadStatus};

use super::support::{doc, init_tracing, same, url, wait_until};

const TRIANGLE: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {"type": "Feature", "properties": {},
         "geometry": {"type": "Polygon", "coordinates": [[[-4, 40], [3, 51], [8, 44], [-4, 40]]]}}
    ]
}"#;

const WITH_BBOX: &str = r#"{
    "type": "FeatureCollection",
    "bbox": [-20, 30, 20, 60],
    "features": [
        {"type": "Feature", "properties": {},
         "geometry": {"type": "Point", "coordinates": [0, 45]}}
    ]
}"#;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_empty_cache_fresh_document_without_bbox() {
    init_tracing();
    let u = url("https://x/a.geojson");
    let mock = MockTransport::new();
    mock.respond(&u, HttpResponse::ok(TRIANGLE));
    let provider = Arc::new(GeoContentProvider::with_transport(mock));
    let coordinator = LoadCoordinator::new(provider.clone());
    let mut rx = coordinator.subscribe();

    coordinator.load(Some("https://x/a.geojson")).unwrap();
    let state = wait_until(&mut rx, |s| s.status == LoadStatus::Resolved).await;

    assert_eq!(
        state.bounding_box,
        Some(BoundingBox::new(-4.0, 40.0, 8.0, 51.0))
    );
    assert_eq!(state.map_content.as_ref().unwrap().features().len(), 1);
    assert!(state.load_error.is_none());
    assert!(provider.store().get(&u).is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_explicit_bbox_is_used() {
    let u = url("https://x/b.geojson");
    let mock = MockTransport::new();
    mock.respond(&u, HttpResponse::ok(WITH_BBOX));
    let coordinator = LoadCoordinator::new(Arc::new(GeoContentProvider::with_transport(mock)));
    let mut rx = coordinator.subscribe();

    coordinator.load(Some(u.as_str())).unwrap();
    let state = wait_until(&mut rx, |s| s.status == LoadStatus::Resolved).await;

    assert_eq!(
        state.bounding_box,
        Some(BoundingBox::new(-20.0, 30.0, 20.0, 60.0))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_not_modified_shows_cached_entry() {
    init_tracing();
    let u = url("https://x/a.geojson");
    let stamped = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
    let cached = doc(&[5.0, 6.0]);
    let mock = Arc::new(MockTransport::new());
    mock.respond(&u, HttpResponse::not_modified());
    let provider = GeoContentProvider::with_transport(mock.clone());
    provider.store().put(u.clone(), cached.clone(), stamped);
    let coordinator = LoadCoordinator::new(Arc::new(provider));
    let mut rx = coordinator.subscribe();

    coordinator.load(Some(u.as_str())).unwrap();
    wait_until(&mut rx, |s| s.status == LoadStatus::Resolved).await;
    coordinator.settle().await;

    let state = coordinator.state();
    assert!(same(&state.map_content, &cached));
    assert!(state.load_error.is_none());
    assert_eq!(
        mock.requests()[0].if_modified_since,
        Some(http_date(stamped))
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_transport_failure_with_empty_cache() {
    init_tracing();
    let u = url("https://x/a.geojson");
    let mock = MockTransport::new();
    mock.fail(&u, "dns lookup failed");
    let coordinator = LoadCoordinator::new(Arc::new(GeoContentProvider::with_transport(mock)));
    let mut rx = coordinator.subscribe();

    coordinator.load(Some(u.as_str())).unwrap();
    let state = wait_until(&mut rx, |s| s.status == LoadStatus::Failed).await;

    assert!(state.map_content.is_none());
    assert!(state.bounding_box.is_none());
    let err = state.load_error.expect("transport error recorded");
    assert!(err.is_transport());
    assert!(err.to_string().contains("dns lookup failed"));

    let requests = coordinator.provider().fetcher().transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].url, u);
    assert!(requests[0].if_modified_since.is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_server_error_keeps_cached_content() {
    let u = url("https://x/a.geojson");
    let mock = MockTransport::new();
    mock.respond(&u, HttpResponse::ok(TRIANGLE));
    mock.respond(&u, HttpResponse::with_status(500, "oops"));
    let coordinator = LoadCoordinator::new(Arc::new(GeoContentProvider::with_transport(mock)));
    let mut rx = coordinator.subscribe();

    coordinator.load(Some(u.as_str())).unwrap();
    let first = wait_until(&mut rx, |s| s.status == LoadStatus::Resolved).await;
    let shown = first.map_content.unwrap();

    coordinator.load(Some(u.as_str())).unwrap();
    let state = wait_until(&mut rx, |s| s.status == LoadStatus::Failed).await;

    assert!(same(&state.map_content, &shown));
    assert!(state.load_error.unwrap().is_transport());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_malformed_document_is_a_parse_failure() {
    let u = url("https://x/a.geojson");
    let mock = MockTransport::new();
    mock.respond(&u, HttpResponse::ok(r#"{"type":"Nope"}"#));
    let coordinator = LoadCoordinator::new(Arc::new(GeoContentProvider::with_transport(mock)));
    let mut rx = coordinator.subscribe();

    coordinator.load(Some(u.as_str())).unwrap();
    let state = wait_until(&mut rx, |s| s.status == LoadStatus::Failed).await;

    assert!(state.map_content.is_none());
    assert!(state.load_error.unwrap().is_parse());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_two_displays_share_one_provider() {
    let a = url("https://x/a.geojson");
    let b = url("https://x/b.geojson");
    let mock = MockTransport::new();
    mock.respond(&a, HttpResponse::ok(TRIANGLE));
    mock.respond(&b, HttpResponse::ok(WITH_BBOX));
    let provider = Arc::new(GeoContentProvider::with_transport(mock));
    let first = LoadCoordinator::new(provider.clone());
    let second = LoadCoordinator::new(provider.clone());
    let (mut rx1, mut rx2) = (first.subscribe(), second.subscribe());

    first.load(Some(a.as_str())).unwrap();
    second.load(Some(b.as_str())).unwrap();
    first.did_appear();
    second.did_appear();
    let s1 = wait_until(&mut rx1, |s| s.status == LoadStatus::Resolved && s.base_map.is_some()).await;
    let s2 = wait_until(&mut rx2, |s| s.status == LoadStatus::Resolved && s.base_map.is_some()).await;

    assert_eq!(provider.store().len(), 2);
    assert!(same(&s1.map_content, &provider.store().get(&a).unwrap().document));
    assert!(same(&s2.map_content, &provider.store().get(&b).unwrap().document));
    assert!(same(&s1.base_map, s2.base_map.as_ref().unwrap()));
}
