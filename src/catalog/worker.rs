//! Background execution of catalog requests.
//!
//! Each request runs on its own short-lived thread and posts a
//! [`FetchCompletion`] back over a channel. The UI thread drains the channel
//! without blocking, the same way it polls every other event source. Requests
//! are never cancelled; superseded completions are discarded by the browser
//! state machine via their request token.

use super::{execute, Catalog, FetchCompletion, FetchRequest};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};

/// Runs fetches off the UI thread.
pub struct FetchWorker {
    catalog: Arc<dyn Catalog>,
    tx: Sender<FetchCompletion>,
    rx: Receiver<FetchCompletion>,
}

impl FetchWorker {
    /// Worker executing requests against `catalog`.
    pub fn new(catalog: Arc<dyn Catalog>) -> Self {
        let (tx, rx) = channel();
        Self { catalog, tx, rx }
    }

    /// Start executing a request. Returns immediately.
    pub fn dispatch(&self, request: FetchRequest) {
        info!(
            token = request.token.get(),
            mode = %request.mode,
            offset = request.offset,
            "dispatching fetch"
        );

        let catalog = Arc::clone(&self.catalog);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = execute(catalog.as_ref(), &request);
            // The receiver is gone only when the app has shut down.
            let _ = tx.send(FetchCompletion { request, result });
        });
    }

    /// Drain all completions that have arrived. Non-blocking.
    pub fn poll(&self) -> Vec<FetchCompletion> {
        let completions: Vec<FetchCompletion> = self.rx.try_iter().collect();
        if !completions.is_empty() {
            debug!("received {} fetch completion(s)", completions.len());
        }
        completions
    }

    /// Block until one completion arrives or `timeout` elapses.
    pub fn wait(&self, timeout: Duration) -> Option<FetchCompletion> {
        match self.rx.recv_timeout(timeout) {
            Ok(completion) => Some(completion),
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => None,
        }
    }
}
