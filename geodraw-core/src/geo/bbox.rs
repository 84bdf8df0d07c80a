// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounding box suggestion for documents without an explicit `bbox`

use super::document::{BoundingBox, GeoDocument, Position};

/// Suggests a viewport for a set of positions.
pub trait BoundingBoxSuggester: Send + Sync {
    /// Suggest a bounding box, or `None` when there is nothing to frame.
    fn suggest(&self, positions: &[Position]) -> Option<BoundingBox>;
}

/// Tight min/max extent of all positions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtentSuggester;

impl BoundingBoxSuggester for ExtentSuggester {
    fn suggest(&self, positions: &[Position]) -> Option<BoundingBox> {
        let (first, rest) = positions.split_first()?;
        let init = BoundingBox::new(first.lon, first.lat, first.lon, first.lat);
        Some(rest.iter().fold(init, |b, p| {
            BoundingBox::new(
                b.west.min(p.lon),
                b.south.min(p.lat),
                b.east.max(p.lon),
                b.north.max(p.lat),
            )
        }))
    }
}

/// The document's own bounding box, falling back to `suggester`.
pub fn bounding_box_for(
    document: &GeoDocument,
    suggester: &dyn BoundingBoxSuggester,
) -> Option<BoundingBox> {
    document
        .bbox()
        .or_else(|| suggester.suggest(&document.positions()))
}
