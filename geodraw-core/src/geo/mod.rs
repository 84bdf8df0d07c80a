// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Geographic documents
//!
//! GeoJSON parsing into immutable [`GeoDocument`]s and bounding box
//! suggestion for documents that do not declare their own extent.

mod bbox;
mod document;
mod parse;

pub use bbox::{bounding_box_for, BoundingBoxSuggester, ExtentSuggester};
pub use document::{BoundingBox, Feature, GeoDocument, Geometry, Position};
pub use parse::{parse, ParseError};
