// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

use super::fetcher::FetchError;
use crate::geo::ParseError;

/// Errors surfaced by the content provider
#[derive(Debug, Error)]
pub enum ContentError {
    /// Fetch error (network/remote)
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Document could not be parsed
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Base map supplier failed
    #[error("Base map error: {0}")]
    BaseMap(String),
}

impl ContentError {
    /// Whether this is a transport-level failure (network, HTTP status, size).
    pub fn is_transport(&self) -> bool {
        matches!(self, ContentError::Fetch(e) if !matches!(e, FetchError::Parse(_)))
    }

    /// Whether the failure came from malformed document bytes.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            ContentError::Parse(_) | ContentError::Fetch(FetchError::Parse(_))
        )
    }
}
