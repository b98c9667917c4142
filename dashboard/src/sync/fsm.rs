//! State machine for staged status updates
//!
//! Holds the displayed snapshot, an optional pending snapshot that differs
//! from it, and the last fetch error. Fetched data never replaces the
//! displayed snapshot on its own once something is on screen: it is staged
//! as pending until [`SyncFsm::apply_update`] is called.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::FetchError;
use crate::models::Snapshot;
use crate::sync::compare::snapshots_equal;

/// Observable phase of the synchronization state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    /// Nothing fetched yet
    Idle,

    /// A snapshot is displayed and nothing is in flight
    Displaying,

    /// A fetch is in flight
    Checking,

    /// A fetched snapshot differs from the displayed one and awaits apply
    UpdateAvailable,

    /// The last fetch failed
    Error,
}

/// Result of one completed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// First snapshot was loaded straight into the display
    Loaded,

    /// Fetched data equals what is displayed
    Unchanged,

    /// Fetched data differs and is staged as pending
    UpdateAvailable,

    /// The fetch failed; displayed data was kept
    Failed { message: String },

    /// The result arrived after teardown and was dropped
    Discarded,
}

/// What the presentation layer renders
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub phase: SyncPhase,
    pub stacks: Snapshot,
    pub error: Option<String>,
    pub update_available: bool,
    pub is_checking: bool,
    pub digest: Option<String>,
    pub displayed_at: Option<DateTime<Utc>>,
    pub last_checked_at: Option<DateTime<Utc>>,
}

/// Synchronization FSM
#[derive(Debug, Clone, Default)]
pub struct SyncFsm {
    displayed: Option<Snapshot>,
    pending: Option<Snapshot>,
    error: Option<String>,
    checking: bool,
    last_checked_at: Option<DateTime<Utc>>,
}

impl SyncFsm {
    /// Create a new FSM in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase, derived from the held data
    pub fn phase(&self) -> SyncPhase {
        if self.checking {
            SyncPhase::Checking
        } else if self.error.is_some() {
            SyncPhase::Error
        } else if self.pending.is_some() {
            SyncPhase::UpdateAvailable
        } else if self.displayed.is_some() {
            SyncPhase::Displaying
        } else {
            SyncPhase::Idle
        }
    }

    pub fn displayed(&self) -> Option<&Snapshot> {
        self.displayed.as_ref()
    }

    pub fn pending(&self) -> Option<&Snapshot> {
        self.pending.as_ref()
    }

    /// Get error message if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    pub fn update_available(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark a check as started
    ///
    /// Returns false when one is already in flight; the caller must then
    /// wait for that check instead of starting another.
    pub fn begin_check(&mut self) -> bool {
        if self.checking {
            return false;
        }
        self.checking = true;
        true
    }

    /// Fold the result of a fetch into the state
    pub fn complete_check(&mut self, result: Result<Snapshot, FetchError>) -> CheckOutcome {
        self.checking = false;
        self.last_checked_at = Some(Utc::now());

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => {
                let message = e.to_string();
                self.error = Some(message.clone());
                return CheckOutcome::Failed { message };
            }
        };

        self.error = None;

        let Some(displayed) = &self.displayed else {
            self.displayed = Some(snapshot);
            self.pending = None;
            return CheckOutcome::Loaded;
        };

        if snapshots_equal(displayed, &snapshot) {
            self.pending = None;
            CheckOutcome::Unchanged
        } else {
            self.pending = Some(snapshot);
            CheckOutcome::UpdateAvailable
        }
    }

    /// Forget an in-flight check without folding in a result
    pub fn abort_check(&mut self) {
        self.checking = false;
    }

    /// Move the pending snapshot into the display
    ///
    /// Returns false, and changes nothing, when no update is pending.
    pub fn apply_update(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.displayed = Some(pending);
                true
            }
            None => false,
        }
    }

    /// Snapshot of everything the presentation layer needs
    pub fn view(&self) -> DashboardView {
        DashboardView {
            phase: self.phase(),
            stacks: self.displayed.clone().unwrap_or_else(Snapshot::empty),
            error: self.error.clone(),
            update_available: self.update_available(),
            is_checking: self.checking,
            digest: self.displayed.as_ref().map(Snapshot::digest),
            displayed_at: self.displayed.as_ref().map(Snapshot::fetched_at),
            last_checked_at: self.last_checked_at,
        }
    }
}
