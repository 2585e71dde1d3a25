//! Grammar fix feature coordinator.
//!
//! One [`GrammarFixFeature`] lives per editing session. It owns the correction
//! engine (if one could be configured) and publishes the latest
//! [`CorrectionResult`] through a `tokio::sync::watch` channel: subscribers see
//! the current value immediately and every later change, latest value wins.
//!
//! Requests are neither queued nor deduplicated. Two overlapping requests both
//! run, and whichever finishes last owns the published slot. Closing the
//! session aborts spawned requests and suppresses any further publication.

use crate::config::CorrectionConfig;
use crate::correction::engine::CorrectionEngine;
use crate::correction::result::CorrectionResult;
use crate::error::GrammarFixError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinSet;

const TRACING_TARGET: &str = "grammarfix::feature";

/// Published correction state. `None` means idle, pending or cleared.
pub type CorrectionState = Option<CorrectionResult>;

pub struct GrammarFixFeature {
    engine: Option<Arc<CorrectionEngine>>,
    state: Arc<watch::Sender<CorrectionState>>,
    closed: Arc<AtomicBool>,
    tasks: Mutex<JoinSet<()>>,
}

impl GrammarFixFeature {
    /// Create the feature from configuration.
    ///
    /// A missing key or an engine that cannot be built leaves the feature
    /// unavailable; it never fails.
    pub fn new(config: &CorrectionConfig) -> Self {
        let engine = match CorrectionEngine::create(config) {
            Ok(Some(engine)) => Some(engine),
            Ok(None) => {
                tracing::info!(
                    target: TRACING_TARGET,
                    "No API key configured, grammar fix unavailable"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    target: TRACING_TARGET,
                    error = %e,
                    "Failed to create correction engine, grammar fix unavailable"
                );
                None
            }
        };
        Self::with_engine(engine)
    }

    /// Create the feature around an already-built engine (or none).
    pub fn with_engine(engine: Option<CorrectionEngine>) -> Self {
        let (state, _) = watch::channel(None);
        Self {
            engine: engine.map(Arc::new),
            state: Arc::new(state),
            closed: Arc::new(AtomicBool::new(false)),
            tasks: Mutex::new(JoinSet::new()),
        }
    }

    /// Whether a correction engine was configured.
    pub fn is_available(&self) -> bool {
        self.engine.is_some()
    }

    /// Whether the session has been closed.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    /// Subscribe to the published state.
    pub fn subscribe(&self) -> watch::Receiver<CorrectionState> {
        self.state.subscribe()
    }

    /// Snapshot of the published state.
    pub fn current(&self) -> CorrectionState {
        self.state.borrow().clone()
    }

    /// Request correction of `text` and publish the outcome.
    ///
    /// When the feature is unavailable a failure is published immediately and
    /// no request is made.
    pub async fn request_correction(&self, text: &str) {
        let result = correct(self.engine.as_deref(), text).await;
        publish(&self.state, &self.closed, result);
    }

    /// Run [`request_correction`](Self::request_correction) in the background.
    ///
    /// The task is owned by the feature and aborted by [`close`](Self::close)
    /// or drop. Outside a Tokio runtime the request is dropped with an error
    /// log.
    pub fn spawn_correction(&self, text: impl Into<String>) {
        if self.is_closed() {
            tracing::debug!(target: TRACING_TARGET, "Session closed, ignoring request");
            return;
        }

        let handle = match tokio::runtime::Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET,
                    error = %e,
                    "No async runtime, cannot spawn correction"
                );
                return;
            }
        };

        let text = text.into();
        let engine = self.engine.clone();
        let state = Arc::clone(&self.state);
        let closed = Arc::clone(&self.closed);

        let mut tasks = self.lock_tasks();
        while tasks.try_join_next().is_some() {}
        tasks.spawn_on(
            async move {
                let result = correct(engine.as_deref(), &text).await;
                publish(&state, &closed, result);
            },
            &handle,
        );
    }

    /// Number of spawned requests that have not finished yet.
    pub fn in_flight(&self) -> usize {
        let mut tasks = self.lock_tasks();
        while tasks.try_join_next().is_some() {}
        tasks.len()
    }

    /// Reset the published state to `None`.
    pub fn clear_result(&self) {
        self.state.send_replace(None);
    }

    /// End the session: abort spawned requests and stop publishing.
    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut tasks = self.lock_tasks();
        let aborted = tasks.len();
        tasks.abort_all();
        tracing::debug!(target: TRACING_TARGET, aborted, "Session closed");
    }

    fn lock_tasks(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for GrammarFixFeature {
    fn drop(&mut self) {
        // JoinSet aborts its tasks on drop; the flag covers requests that
        // already passed their last await point.
        self.closed.store(true, Ordering::SeqCst);
    }
}

async fn correct(engine: Option<&CorrectionEngine>, text: &str) -> CorrectionResult {
    match engine {
        Some(engine) => engine.get_correction(text).await,
        None => CorrectionResult::failure(text, GrammarFixError::Unavailable.to_string()),
    }
}

fn publish(state: &watch::Sender<CorrectionState>, closed: &AtomicBool, result: CorrectionResult) {
    if closed.load(Ordering::SeqCst) {
        tracing::debug!(target: TRACING_TARGET, "Session closed, dropping result");
        return;
    }
    state.send_replace(Some(result));
}
