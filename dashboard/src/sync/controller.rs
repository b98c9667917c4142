//! Status synchronization controller

use std::sync::{Arc, Mutex, MutexGuard};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use crate::errors::FetchError;
use crate::models::Snapshot;
use crate::sync::fsm::{CheckOutcome, DashboardView, SyncFsm};
use crate::sync::source::StatusSource;

/// A fetch that has been started and not yet folded into the state
struct InFlight {
    outcome: Shared<BoxFuture<'static, CheckOutcome>>,
    abort: AbortHandle,
}

struct ControllerState {
    fsm: SyncFsm,
    in_flight: Option<InFlight>,
    closed: bool,
}

struct Inner {
    source: Arc<dyn StatusSource>,
    state: Mutex<ControllerState>,
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn complete(&self, result: Result<Snapshot, FetchError>) -> CheckOutcome {
        let mut state = self.lock();
        if state.closed {
            debug!("Controller closed, discarding fetch result");
            return CheckOutcome::Discarded;
        }

        state.in_flight = None;
        let outcome = state.fsm.complete_check(result);
        match &outcome {
            CheckOutcome::Loaded => info!(
                "Loaded {} stack statuses",
                state.fsm.displayed().map_or(0, |s| s.len())
            ),
            CheckOutcome::Unchanged => debug!("Stack statuses unchanged"),
            CheckOutcome::UpdateAvailable => info!("Stack status update available"),
            CheckOutcome::Failed { message } => error!("Failed to fetch stack statuses: {}", message),
            CheckOutcome::Discarded => {}
        }
        outcome
    }
}

/// Owns the displayed stack statuses and keeps them in sync with a source
///
/// All state transitions go through one mutex that is never held across an
/// await. At most one fetch is in flight at a time: a check requested while
/// another is running joins it and gets the same outcome.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

impl Controller {
    /// Create a new controller in idle state
    pub fn new(source: Arc<dyn StatusSource>) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                state: Mutex::new(ControllerState {
                    fsm: SyncFsm::new(),
                    in_flight: None,
                    closed: false,
                }),
            }),
        }
    }

    /// Fetch from the source and fold the result into the state
    ///
    /// The first successful fetch is displayed directly. Later ones are
    /// staged as pending when they differ from what is displayed.
    pub async fn check_for_update(&self) -> CheckOutcome {
        let outcome = {
            let mut state = self.inner.lock();
            if state.closed {
                return CheckOutcome::Discarded;
            }

            let joined = state.in_flight.as_ref().map(|f| f.outcome.clone());
            match joined {
                Some(outcome) => {
                    debug!("Check already in flight, joining it");
                    outcome
                }
                None => {
                    state.fsm.begin_check();
                    let in_flight = self.spawn_fetch();
                    let outcome = in_flight.outcome.clone();
                    state.in_flight = Some(in_flight);
                    outcome
                }
            }
        };

        outcome.await
    }

    // Caller must hold the state lock so the task cannot complete before
    // its handle is stored.
    fn spawn_fetch(&self) -> InFlight {
        let inner = self.inner.clone();
        let handle = tokio::spawn(async move {
            let result = inner.source.fetch_snapshot().await;
            inner.complete(result)
        });

        // A task that died before completing never touched the state.
        // Aborts only happen on shutdown, where `complete` discards.
        let inner = self.inner.clone();
        let abort = handle.abort_handle();
        let outcome = handle
            .map(move |joined| match joined {
                Ok(outcome) => outcome,
                Err(e) => inner.complete(Err(FetchError::Transport(format!(
                    "status fetch task failed: {}",
                    e
                )))),
            })
            .boxed()
            .shared();

        InFlight { outcome, abort }
    }

    /// Display the pending snapshot, if there is one
    pub fn apply_update(&self) -> bool {
        let mut state = self.inner.lock();
        let applied = state.fsm.apply_update();
        if applied {
            info!("Applied pending stack status update");
        } else {
            debug!("No pending update to apply");
        }
        applied
    }

    /// Current state for rendering
    pub fn view(&self) -> DashboardView {
        self.inner.lock().fsm.view()
    }

    pub fn is_checking(&self) -> bool {
        self.inner.lock().fsm.is_checking()
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }

    /// Tear the controller down
    ///
    /// The in-flight fetch, if any, is aborted and any result that still
    /// arrives is discarded. Later checks return
    /// [`CheckOutcome::Discarded`] without contacting the source.
    pub fn shutdown(&self) {
        let mut state = self.inner.lock();
        if state.closed {
            return;
        }
        state.closed = true;
        if let Some(in_flight) = state.in_flight.take() {
            warn!("Aborting in-flight status fetch on shutdown");
            in_flight.abort.abort();
            state.fsm.abort_check();
        }
        info!("Status controller shut down");
    }
}
