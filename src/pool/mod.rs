//! Bounded-concurrency worker pool for the full check-and-clear pass.
//!
//! A producer thread drives the lazy candidate enumeration into a bounded
//! work queue; up to `concurrency` workers pull candidates, probe and clear
//! the override attribute, and emit one outcome record per candidate onto a
//! bounded result channel. Memory use is proportional to the queue capacity
//! and concurrency limit, never to the population size.

mod worker;

pub use worker::process_sequential;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, bounded, unbounded};
use tracing::{debug, info, warn};

use crate::attr::AttrAccessor;
use crate::error::{Result, SweepError};
use crate::outcome::OutcomeRecord;
use crate::scanner::CandidatePath;

pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;

/// Resolved execution parameters for one pool run.
///
/// `concurrency` is the final integer decided by the caller; the pool never
/// inspects the host's hardware itself.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub concurrency: usize,
    pub dry_run: bool,
    pub halt_on_error: bool,
    pub queue_capacity: usize,
}

impl PoolOptions {
    #[must_use]
    pub const fn new(concurrency: usize) -> Self {
        Self {
            concurrency,
            dry_run: false,
            halt_on_error: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    #[must_use]
    pub const fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[must_use]
    pub const fn halt_on_error(mut self, halt: bool) -> Self {
        self.halt_on_error = halt;
        self
    }

    #[must_use]
    pub const fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }
}

/// Cooperative cancellation signal shared between the caller and the pool.
///
/// Cancelling stops the dispatch of new candidates; queued and in-flight
/// work drains normally, so the outcome stream stays consistent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// The live stream of outcome records from a running pool.
///
/// Iteration blocks until the next record is available and ends when every
/// worker has finished. Records arrive in completion order, not enumeration
/// order; callers needing display order must re-sort themselves.
#[derive(Debug)]
pub struct OutcomeStream {
    receiver: Option<Receiver<OutcomeRecord>>,
    handles: Vec<JoinHandle<()>>,
}

impl Iterator for OutcomeStream {
    type Item = OutcomeRecord;

    fn next(&mut self) -> Option<Self::Item> {
        self.receiver.as_ref()?.recv().ok()
    }
}

impl OutcomeStream {
    /// Collect every remaining record and join the pool's threads.
    #[must_use]
    pub fn drain(mut self) -> Vec<OutcomeRecord> {
        self.by_ref().collect()
    }
}

impl Drop for OutcomeStream {
    fn drop(&mut self) {
        // Dropping the receiver fails any worker send, which unwinds the
        // workers and then the producer. The caller's cancel token is left
        // untouched so a fully drained run does not read as cancelled.
        self.receiver.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Distribute `candidates` across up to `options.concurrency` workers.
///
/// Every dispatched candidate yields exactly one [`OutcomeRecord`] on the
/// returned stream, including per-file failures. If no worker thread can be
/// spawned the pool degrades to strictly sequential processing with
/// identical outcome semantics.
///
/// # Errors
/// Returns a configuration error for a zero concurrency or queue capacity;
/// these are caller bugs, not runtime conditions.
pub fn process<I>(
    candidates: I,
    accessor: Arc<AttrAccessor>,
    options: &PoolOptions,
    cancel: CancelToken,
) -> Result<OutcomeStream>
where
    I: Iterator<Item = CandidatePath> + Send + 'static,
{
    if options.concurrency == 0 {
        return Err(SweepError::Config(
            "concurrency must be at least 1".to_string(),
        ));
    }
    if options.queue_capacity == 0 {
        return Err(SweepError::Config(
            "queue capacity must be at least 1".to_string(),
        ));
    }

    let (work_tx, work_rx) = bounded::<CandidatePath>(options.queue_capacity);
    let (out_tx, out_rx) = bounded::<OutcomeRecord>(options.queue_capacity);

    let mut handles = Vec::with_capacity(options.concurrency + 1);
    for id in 0..options.concurrency {
        let ctx = worker::WorkerContext {
            id,
            work_rx: work_rx.clone(),
            out_tx: out_tx.clone(),
            accessor: Arc::clone(&accessor),
            dry_run: options.dry_run,
            halt_on_error: options.halt_on_error,
            cancel: cancel.clone(),
        };
        let spawned = thread::Builder::new()
            .name(format!("sweep-worker-{id}"))
            .spawn(move || worker::worker_loop(ctx));
        match spawned {
            Ok(handle) => handles.push(handle),
            Err(e) => warn!(worker = id, error = %e, "failed to spawn worker"),
        }
    }
    drop(work_rx);
    drop(out_tx);

    if handles.is_empty() {
        drop(work_tx);
        info!("no worker threads available; processing sequentially");
        return Ok(sequential_stream(candidates, &accessor, options, &cancel));
    }

    // The producer owns the enumeration; candidates are parked in a slot so
    // they can be recovered if the spawn itself fails.
    let slot = Arc::new(Mutex::new(Some(candidates)));
    let producer_slot = Arc::clone(&slot);
    let producer_cancel = cancel.clone();
    let producer_tx = work_tx;
    let spawned = thread::Builder::new()
        .name("sweep-producer".to_string())
        .spawn(move || {
            let taken = producer_slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            let Some(iter) = taken else { return };
            let mut dispatched = 0u64;
            for candidate in iter {
                if producer_cancel.is_cancelled() {
                    debug!(dispatched, "dispatch stopped by cancellation");
                    return;
                }
                if producer_tx.send(candidate).is_err() {
                    return;
                }
                dispatched += 1;
            }
            debug!(dispatched, "enumeration exhausted");
        });

    match spawned {
        Ok(handle) => handles.push(handle),
        Err(e) => {
            warn!(error = %e, "failed to spawn producer; processing sequentially");
            // Workers exit as soon as the (now senderless) queue closes.
            for handle in handles.drain(..) {
                let _ = handle.join();
            }
            let taken = slot.lock().unwrap_or_else(PoisonError::into_inner).take();
            let Some(candidates) = taken else {
                return Err(SweepError::Pool(
                    "candidate enumeration lost during fallback".to_string(),
                ));
            };
            return Ok(sequential_stream(candidates, &accessor, options, &cancel));
        }
    }

    Ok(OutcomeStream {
        receiver: Some(out_rx),
        handles,
    })
}

/// Run the mandatory sequential fallback and wrap the records in a
/// pre-filled stream so callers see the same interface either way.
fn sequential_stream<I>(
    candidates: I,
    accessor: &AttrAccessor,
    options: &PoolOptions,
    cancel: &CancelToken,
) -> OutcomeStream
where
    I: Iterator<Item = CandidatePath>,
{
    let records = process_sequential(candidates, accessor, options, cancel);
    let (tx, rx) = unbounded();
    for record in records {
        // Receiver is alive and unbounded; send cannot fail here.
        let _ = tx.send(record);
    }
    drop(tx);
    OutcomeStream {
        receiver: Some(rx),
        handles: Vec::new(),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
