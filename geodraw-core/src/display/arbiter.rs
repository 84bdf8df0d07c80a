// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cache/fetch arbitration
//!
//! Within one load generation the cache path and the fetch path report in
//! either order. Fresh network content always wins: a cached document is
//! only shown while nothing has been applied yet, and never after the fetch
//! path has applied its document.
//!
//! This module is free of concurrency so the precedence rule can be tested
//! by replaying arrival orders.

/// Result reported by one of the two load paths.
#[derive(Debug, Clone, PartialEq)]
pub enum PathOutcome<D, E> {
    /// Cache path finished; `None` is a miss
    Cached(Option<D>),
    /// Fetch path finished; `Ok(None)` means "not modified"
    Fetched(Result<Option<D>, E>),
}

/// What has been applied for the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Settled {
    /// Nothing yet
    #[default]
    Nothing,
    /// A cached document is shown
    Provisional,
    /// The fetched document is shown
    Fresh,
}

/// Decision for one arriving outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Show the cached document provisionally
    ShowProvisional,
    /// Show the fetched document and clear any error
    ShowFresh,
    /// Server confirmed the cache; clear any error, keep content
    Confirm,
    /// Record the fetch error, keep content
    Fail,
    /// Drop the outcome
    Ignore,
}

/// Decide what to do with `outcome` given what has been applied so far.
pub fn arbitrate<D, E>(settled: Settled, outcome: &PathOutcome<D, E>) -> Verdict {
    match outcome {
        PathOutcome::Cached(Some(_)) if settled == Settled::Nothing => Verdict::ShowProvisional,
        PathOutcome::Cached(_) => Verdict::Ignore,
        PathOutcome::Fetched(Ok(Some(_))) => Verdict::ShowFresh,
        PathOutcome::Fetched(Ok(None)) => Verdict::Confirm,
        PathOutcome::Fetched(Err(_)) => Verdict::Fail,
    }
}

/// Displayed content and error, folded from path outcomes.
///
/// Content and error survive [`begin`](Self::begin) so a new generation
/// keeps showing the previous content until something replaces it.
#[derive(Debug, Clone)]
pub struct Resolution<D, E> {
    settled: Settled,
    content: Option<D>,
    error: Option<E>,
}

impl<D, E> Default for Resolution<D, E> {
    fn default() -> Self {
        Self {
            settled: Settled::Nothing,
            content: None,
            error: None,
        }
    }
}

impl<D, E> Resolution<D, E> {
    /// Start a new generation.
    pub fn begin(&mut self) {
        self.settled = Settled::Nothing;
    }

    /// Fold one outcome in and report the verdict.
    pub fn apply(&mut self, outcome: PathOutcome<D, E>) -> Verdict {
        let verdict = arbitrate(self.settled, &outcome);
        match (verdict, outcome) {
            (Verdict::ShowProvisional, PathOutcome::Cached(Some(doc))) => {
                self.content = Some(doc);
                self.settled = Settled::Provisional;
            }
            (Verdict::ShowFresh, PathOutcome::Fetched(Ok(Some(doc)))) => {
                self.content = Some(doc);
                self.error = None;
                self.settled = Settled::Fresh;
            }
            (Verdict::Confirm, _) => self.error = None,
            (Verdict::Fail, PathOutcome::Fetched(Err(err))) => self.error = Some(err),
            _ => {}
        }
        verdict
    }

    /// What has been applied in the current generation.
    pub fn settled(&self) -> Settled {
        self.settled
    }

    /// Displayed content.
    pub fn content(&self) -> Option<&D> {
        self.content.as_ref()
    }

    /// Last unresolved fetch error.
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }
}

/// Replay one generation's outcomes in arrival order.
pub fn resolve<D, E>(outcomes: impl IntoIterator<Item = PathOutcome<D, E>>) -> Resolution<D, E> {
    let mut resolution = Resolution::default();
    for outcome in outcomes {
        resolution.apply(outcome);
    }
    resolution
}
