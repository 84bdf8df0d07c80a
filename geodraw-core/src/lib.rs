// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Geodraw Core Library
//!
//! Cached, revalidating GeoJSON loading for map displays.
//! Projection and rendering live in the host; this crate decides which
//! document a display shows and when.

pub mod content;
pub mod display;
pub mod geo;

pub use content::{
    BaseMapSupplier, BundledCountries, CacheEntry, ContentConfig, ContentError, ContentFetcher,
    ContentProvider, ContentStore, FetchError, FetchOutcome, GeoContentProvider, HttpResponse,
    HttpTransport, MockTransport, ReqwestTransport,
};
pub use display::{DisplayState, LoadCoordinator, LoadRequest, LoadStatus};
pub use geo::{
    BoundingBox, BoundingBoxSuggester, ExtentSuggester, Feature, GeoDocument, Geometry,
    ParseError, Position,
};
