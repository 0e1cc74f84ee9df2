//! Remote data loader shared by every read path of the dashboard.
//!
//! The report table and both charts consume the same contract: validate
//! the query, issue exactly one fetch, classify the outcome into a
//! tri-state (plus a distinct empty state), and never let a stale
//! response overwrite a newer one.

mod query;

pub use query::{QueryError, ReportFilter, ReportQuery};

use chrono::NaiveDate;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::api::ApiError;

/// Result of a load as the presentation layer sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    /// No load has been started yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Validation, transport or backend failure. Carries the message
    /// exactly as it should be shown.
    Error(String),
    /// The backend answered with zero rows. Not an error and not data.
    Empty,
    /// Non-empty rows, replacing any previous result wholesale.
    Ready(T),
}

/// Map a fetch result onto the load contract. Backend-reported errors
/// surface verbatim; an empty collection is its own state.
pub fn classify<R>(result: Result<Vec<R>, ApiError>) -> LoadState<Vec<R>> {
    match result {
        Ok(rows) if rows.is_empty() => LoadState::Empty,
        Ok(rows) => LoadState::Ready(rows),
        Err(e) => LoadState::Error(e.to_string()),
    }
}

/// Identifies one fetch issued by a [`Loader`]. Only the most recently
/// issued ticket may commit its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

/// One loader per consuming view. Owns the view's [`LoadState`] and the
/// ticket counter implementing last-request-wins.
pub struct Loader<R> {
    seq: AtomicU64,
    state: Mutex<LoadState<Vec<R>>>,
}

impl<R: Clone> Default for Loader<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Clone> Loader<R> {
    pub fn new() -> Self {
        Self {
            seq: AtomicU64::new(0),
            state: Mutex::new(LoadState::Idle),
        }
    }

    pub fn state(&self) -> LoadState<Vec<R>> {
        self.lock().clone()
    }

    /// Issue a ticket for a new fetch and transition to `Loading`.
    /// Issuing a ticket invalidates every ticket issued before it.
    pub fn begin(&self) -> FetchTicket {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        *self.lock() = LoadState::Loading;
        FetchTicket(ticket)
    }

    /// Whether `ticket` is still the latest issued.
    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        self.seq.load(Ordering::SeqCst) == ticket.0
    }

    /// Commit the outcome of the fetch identified by `ticket`. Returns
    /// false (and leaves the state untouched) when a newer fetch has been
    /// issued in the meantime.
    pub fn complete(&self, ticket: FetchTicket, outcome: LoadState<Vec<R>>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        *self.lock() = outcome;
        true
    }

    /// One full load cycle: validate, fetch, classify, commit.
    ///
    /// A query that fails validation settles into `Error` without the
    /// fetch closure ever running, so no network side effect occurs.
    pub fn load_with<F>(&self, query: &ReportQuery, today: NaiveDate, fetch: F) -> LoadState<Vec<R>>
    where
        F: FnOnce(&ReportQuery) -> Result<Vec<R>, ApiError>,
    {
        let ticket = self.begin();

        if let Err(e) = query.validate(today) {
            self.complete(ticket, LoadState::Error(e.to_string()));
            return self.state();
        }

        let outcome = classify(fetch(query));
        self.complete(ticket, outcome);
        self.state()
    }

    fn lock(&self) -> MutexGuard<'_, LoadState<Vec<R>>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
