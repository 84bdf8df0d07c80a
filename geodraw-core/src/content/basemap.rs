// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Base map suppliers
//!
//! The base map is the country-outline layer drawn beneath every display.
//! It is computed locally, once per store.

use super::error::ContentError;
use crate::geo::{self, GeoDocument};

/// Coarse outlines compiled into the binary
const BUNDLED_COUNTRIES: &[u8] = include_bytes!("../../data/countries.geojson");

/// Produces the base map document.
///
/// Implementations must be deterministic and free of side effects beyond
/// local computation.
pub trait BaseMapSupplier: Send + Sync {
    /// Load the country outlines.
    fn load_countries(&self) -> Result<GeoDocument, ContentError>;
}

impl<F> BaseMapSupplier for F
where
    F: Fn() -> Result<GeoDocument, ContentError> + Send + Sync,
{
    fn load_countries(&self) -> Result<GeoDocument, ContentError> {
        self()
    }
}

/// Bundled low-resolution outlines - the default supplier
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledCountries;

impl BaseMapSupplier for BundledCountries {
    fn load_countries(&self) -> Result<GeoDocument, ContentError> {
        Ok(geo::parse(BUNDLED_COUNTRIES)?)
    }
}
