// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Display loading
//!
//! Per-display load state and the coordinator that races cached content
//! against revalidated network content.

mod arbiter;
mod coordinator;
mod state;

pub use arbiter::{arbitrate, resolve, PathOutcome, Resolution, Settled, Verdict};
pub use coordinator::LoadCoordinator;
pub use state::{DisplayState, LoadRequest, LoadStatus};
