// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use std::sync::Arc;

use reqwest::Url;

use crate::content::ContentError;
use crate::geo::{BoundingBox, Feature, GeoDocument};

/// Load state of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// No load requested yet
    #[default]
    Idle,
    /// A load is in progress
    Loading,
    /// The network confirmed or replaced the shown content
    Resolved,
    /// The network fetch failed
    Failed,
}

/// A load generation token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// URL being loaded
    pub url: Url,
    /// Monotonically increasing generation
    pub generation: u64,
}

/// Snapshot of what a display shows.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    /// Current load status
    pub status: LoadStatus,
    /// URL of the most recent load request
    pub url: Option<Url>,
    /// The loaded document
    pub map_content: Option<Arc<GeoDocument>>,
    /// Viewport for the loaded document
    pub bounding_box: Option<BoundingBox>,
    /// Last unresolved fetch failure
    pub load_error: Option<Arc<ContentError>>,
    /// Shared country outlines, once loaded
    pub base_map: Option<Arc<GeoDocument>>,
}

impl DisplayState {
    /// Features to draw: base map first, then map content.
    pub fn contents(&self) -> impl Iterator<Item = &Feature> {
        self.base_map
            .iter()
            .chain(self.map_content.iter())
            .flat_map(|doc| doc.features())
    }
}
