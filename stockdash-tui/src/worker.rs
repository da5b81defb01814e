//! Background fetch thread.
//!
//! The UI thread never touches the network. It sends [`WorkerCommand`]s and
//! drains [`WorkerResponse`]s once per frame. When several fetches are queued
//! only the newest one runs; the rest are already stale.

use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use stockdash_core::{load_quotes, DataError, QuoteSnapshot, QuoteSource, TimeRange};

/// One selection to load.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub request_id: u64,
    pub symbol: String,
    pub range: TimeRange,
}

/// Commands sent from the TUI to the worker.
#[derive(Debug)]
pub enum WorkerCommand {
    Fetch(FetchRequest),
    Shutdown,
}

/// Responses sent from the worker back to the TUI.
#[derive(Debug)]
pub enum WorkerResponse {
    Loaded {
        request_id: u64,
        snapshot: Box<QuoteSnapshot>,
    },
    Failed {
        request_id: u64,
        symbol: String,
        error: DataError,
    },
}

impl WorkerResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            WorkerResponse::Loaded { request_id, .. } | WorkerResponse::Failed { request_id, .. } => {
                *request_id
            }
        }
    }
}

/// Spawn the background worker thread.
pub fn spawn_worker(
    source: Arc<dyn QuoteSource>,
    rx: Receiver<WorkerCommand>,
    tx: Sender<WorkerResponse>,
) -> std::io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("stockdash-worker".into())
        .spawn(move || worker_loop(source.as_ref(), rx, tx))
}

fn worker_loop(source: &dyn QuoteSource, rx: Receiver<WorkerCommand>, tx: Sender<WorkerResponse>) {
    log::info!("worker started (source: {})", source.name());
    loop {
        let first = match rx.recv() {
            Ok(WorkerCommand::Fetch(req)) => req,
            Ok(WorkerCommand::Shutdown) | Err(_) => break,
        };
        let Some(req) = newest_pending(first, &rx) else {
            break;
        };
        handle_fetch(source, req, &tx);
    }
    log::info!("worker stopped");
}

/// Collapse everything already queued onto the newest fetch.
/// `None` means a shutdown arrived (or the UI went away) while draining.
fn newest_pending(first: FetchRequest, rx: &Receiver<WorkerCommand>) -> Option<FetchRequest> {
    let mut latest = first;
    loop {
        match rx.try_recv() {
            Ok(WorkerCommand::Fetch(next)) => {
                log::debug!(
                    "skipping fetch #{} ({}), superseded by #{}",
                    latest.request_id,
                    latest.symbol,
                    next.request_id
                );
                latest = next;
            }
            Ok(WorkerCommand::Shutdown) | Err(TryRecvError::Disconnected) => return None,
            Err(TryRecvError::Empty) => return Some(latest),
        }
    }
}

fn handle_fetch(source: &dyn QuoteSource, req: FetchRequest, tx: &Sender<WorkerResponse>) {
    log::debug!(
        "fetch #{}: {} {}",
        req.request_id,
        req.symbol,
        req.range.label()
    );
    let response = match load_quotes(source, &req.symbol, req.range) {
        Ok(snapshot) => WorkerResponse::Loaded {
            request_id: req.request_id,
            snapshot: Box::new(snapshot),
        },
        Err(error) => {
            log::warn!("[{}] fetch #{} failed: {error}", req.symbol, req.request_id);
            WorkerResponse::Failed {
                request_id: req.request_id,
                symbol: req.symbol,
                error,
            }
        }
    };
    // The UI may already be gone during shutdown.
    let _ = tx.send(response);
}
