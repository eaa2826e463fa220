//! Single-flight access-token renewal
//!
//! When several requests hit an expired token at once, only one of them may
//! call the renewal endpoint. [`RefreshGate`] decides which:
//!
//! - The first caller of [`RefreshGate::acquire_or_wait`] becomes the
//!   [`RefreshLeader`] and performs the renewal.
//! - Every later caller, until the leader resolves, is queued as a
//!   [`PendingRequest`] and handed a [`RefreshWaiter`].
//! - [`RefreshLeader::resolve`] notifies every queued waiter in FIFO order
//!   with the same outcome and reopens the gate.
//!
//! The flag flip and the enqueue share one critical section, so two callers
//! can never both become leader. The mutex is never held across an `.await`.
//! A leader that is dropped without resolving (its future was cancelled)
//! rejects the queue with [`RefreshError::Abandoned`] and reopens the gate.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Why a renewal did not produce a token
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    #[error("token renewal rejected with status {status}")]
    Rejected { status: u16 },

    #[error("token renewal request failed: {0}")]
    Network(String),

    #[error("token renewal returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("token renewal abandoned before completing")]
    Abandoned,
}

/// Outcome fanned out to every waiter of one renewal cycle
pub type RefreshResult = Result<String, RefreshError>;

/// A request parked until the in-flight renewal completes
#[derive(Debug)]
pub struct PendingRequest<D> {
    /// What was parked (the client stores method and path here)
    pub descriptor: D,
    completion: oneshot::Sender<RefreshResult>,
}

#[derive(Debug)]
struct GateState<D> {
    refreshing: bool,
    pending: VecDeque<PendingRequest<D>>,
}

/// Single-flight coordinator for token renewal.
///
/// Cloning shares the same state.
#[derive(Debug)]
pub struct RefreshGate<D> {
    state: Arc<Mutex<GateState<D>>>,
}

impl<D> Clone for RefreshGate<D> {
    fn clone(&self) -> Self {
        Self { state: Arc::clone(&self.state) }
    }
}

impl<D> Default for RefreshGate<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of [`RefreshGate::acquire_or_wait`]
#[derive(Debug)]
pub enum RefreshTicket<D> {
    /// No renewal was in flight; the caller must perform it
    Leader(RefreshLeader<D>),
    /// A renewal is in flight; wait for its outcome
    Waiter(RefreshWaiter),
}

impl<D> RefreshGate<D> {
    /// Create an open gate with an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(GateState { refreshing: false, pending: VecDeque::new() })),
        }
    }

    /// Become the renewal leader, or queue `descriptor` behind the current one.
    ///
    /// The leader's own descriptor is not queued; the leader replays its
    /// request itself once it has a token.
    pub fn acquire_or_wait(&self, descriptor: D) -> RefreshTicket<D> {
        let mut state = self.state.lock();

        if !state.refreshing {
            state.refreshing = true;
            debug!("token renewal started");
            return RefreshTicket::Leader(RefreshLeader {
                state: Arc::clone(&self.state),
                resolved: false,
            });
        }

        let (completion, receiver) = oneshot::channel();
        state.pending.push_back(PendingRequest { descriptor, completion });
        debug!(queued = state.pending.len(), "request queued behind in-flight token renewal");

        RefreshTicket::Waiter(RefreshWaiter { receiver })
    }

    /// Run `refresh` once for all concurrent callers.
    ///
    /// The leader runs the closure and shares its result; everyone else
    /// waits for that result.
    pub async fn refresh_once<F, Fut>(&self, descriptor: D, refresh: F) -> RefreshResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RefreshResult>,
    {
        match self.acquire_or_wait(descriptor) {
            RefreshTicket::Leader(leader) => {
                let result = refresh().await;
                leader.resolve(result.clone());
                result
            }
            RefreshTicket::Waiter(waiter) => waiter.wait().await,
        }
    }

    /// Whether a renewal is currently in flight
    pub fn is_refreshing(&self) -> bool {
        self.state.lock().refreshing
    }

    /// Number of requests parked behind the in-flight renewal
    pub fn pending_len(&self) -> usize {
        self.state.lock().pending.len()
    }
}

/// Exclusive right to perform the current renewal.
///
/// Must be resolved with the renewal outcome; dropping it unresolved rejects
/// every waiter with [`RefreshError::Abandoned`].
#[derive(Debug)]
#[must_use = "dropping the leader abandons the renewal and rejects every waiter"]
pub struct RefreshLeader<D> {
    state: Arc<Mutex<GateState<D>>>,
    resolved: bool,
}

impl<D> RefreshLeader<D> {
    /// Publish the renewal outcome and reopen the gate.
    ///
    /// Returns the descriptors of the notified waiters, in the order they
    /// were notified (which is the order they were queued).
    pub fn resolve(mut self, result: RefreshResult) -> Vec<D> {
        self.resolved = true;
        settle(&self.state, &result)
    }
}

impl<D> Drop for RefreshLeader<D> {
    fn drop(&mut self) {
        if !self.resolved {
            let abandoned = settle(&self.state, &Err(RefreshError::Abandoned));
            warn!(waiters = abandoned.len(), "token renewal leader dropped before resolving");
        }
    }
}

/// Handle for a request parked behind the in-flight renewal
#[derive(Debug)]
pub struct RefreshWaiter {
    receiver: oneshot::Receiver<RefreshResult>,
}

impl RefreshWaiter {
    /// Wait for the leader's outcome
    pub async fn wait(self) -> RefreshResult {
        self.receiver.await.unwrap_or(Err(RefreshError::Abandoned))
    }
}

fn settle<D>(state: &Mutex<GateState<D>>, result: &RefreshResult) -> Vec<D> {
    // Reopen and take the queue in one step so no waiter can slip into a
    // queue that has already been drained.
    let drained = {
        let mut state = state.lock();
        state.refreshing = false;
        std::mem::take(&mut state.pending)
    };

    let mut notified = Vec::with_capacity(drained.len());
    for pending in drained {
        // A waiter whose request was cancelled has dropped its receiver.
        let _ = pending.completion.send(result.clone());
        notified.push(pending.descriptor);
    }
    notified
}
