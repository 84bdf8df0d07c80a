// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! GeoJSON document parser
//!
//! Accepts a `FeatureCollection`, a single `Feature` or a bare geometry and
//! normalizes all of them into a [`GeoDocument`] feature list.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use super::document::{BoundingBox, Feature, GeoDocument, Geometry};

#[derive(Deserialize)]
struct RawCollection {
    features: Vec<Feature>,
}

/// Parse raw bytes into a [`GeoDocument`].
///
/// # Example
/// ```
/// use geodraw_core::geo::parse;
///
/// let doc = parse(br#"{"type":"Point","coordinates":[13.4,52.5]}"#).unwrap();
/// assert_eq!(doc.features().len(), 1);
/// ```
pub fn parse(bytes: &[u8]) -> Result<GeoDocument, ParseError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or(ParseError::MissingType)?
        .to_string();

    let bbox = match value.get("bbox") {
        Some(raw) => Some(parse_bbox(raw)?),
        None => None,
    };

    let features = match kind.as_str() {
        "FeatureCollection" => serde_json::from_value::<RawCollection>(value)?.features,
        "Feature" => vec![serde_json::from_value::<Feature>(value)?],
        k if Geometry::TYPE_NAMES.iter().any(|t| *t == k) => {
            vec![Feature::from_geometry(serde_json::from_value::<Geometry>(
                value,
            )?)]
        }
        other => return Err(ParseError::UnsupportedType(other.to_string())),
    };

    Ok(GeoDocument::new(features, bbox))
}

/// Read a GeoJSON `bbox` member: `[w, s, e, n]` or `[w, s, z0, e, n, z1]`.
fn parse_bbox(raw: &Value) -> Result<BoundingBox, ParseError> {
    let values: Vec<f64> = serde_json::from_value(raw.clone())
        .map_err(|_| ParseError::InvalidBoundingBox("expected an array of numbers".into()))?;

    let bbox = match values.as_slice() {
        [w, s, e, n] => BoundingBox::new(*w, *s, *e, *n),
        [w, s, _, e, n, _] => BoundingBox::new(*w, *s, *e, *n),
        _ => {
            return Err(ParseError::InvalidBoundingBox(format!(
                "expected 4 or 6 values, got {}",
                values.len()
            )))
        }
    };

    if bbox.south > bbox.north {
        return Err(ParseError::InvalidBoundingBox(
            "south edge lies north of the north edge".into(),
        ));
    }
    Ok(bbox)
}

/// Errors that can occur while parsing a document
#[derive(Debug, Error)]
pub enum ParseError {
    /// Payload is not valid JSON, or a member has the wrong shape
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Root object has no `type` member
    #[error("Missing GeoJSON type")]
    MissingType,

    /// Root `type` is not a GeoJSON object type
    #[error("Unsupported GeoJSON type: {0}")]
    UnsupportedType(String),

    /// `bbox` member is malformed
    #[error("Invalid bounding box: {0}")]
    InvalidBoundingBox(String),
}
