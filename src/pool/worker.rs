//! Per-worker processing loop and the shared per-candidate logic.

use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, warn};

use crate::attr::AttrAccessor;
use crate::outcome::OutcomeRecord;
use crate::pool::{CancelToken, PoolOptions};
use crate::scanner::CandidatePath;

pub(super) struct WorkerContext {
    pub id: usize,
    pub work_rx: Receiver<CandidatePath>,
    pub out_tx: Sender<OutcomeRecord>,
    pub accessor: Arc<AttrAccessor>,
    pub dry_run: bool,
    pub halt_on_error: bool,
    pub cancel: CancelToken,
}

/// Pull candidates until the queue closes, emitting one record each.
///
/// Cancellation is not checked here: it stops the producer, and whatever is
/// already queued counts as dispatched and is allowed to drain.
pub(super) fn worker_loop(ctx: WorkerContext) {
    debug!(worker = ctx.id, "worker starting");
    let mut processed = 0u64;
    while let Ok(candidate) = ctx.work_rx.recv() {
        let record = process_candidate(&ctx.accessor, &candidate, ctx.dry_run);
        if record.is_error() && ctx.halt_on_error {
            warn!(
                worker = ctx.id,
                path = %candidate.path.display(),
                "halting dispatch after per-file failure"
            );
            ctx.cancel.cancel();
        }
        processed += 1;
        if ctx.out_tx.send(record).is_err() {
            // Consumer went away; nothing left to report to.
            break;
        }
    }
    debug!(worker = ctx.id, processed, "worker shutting down");
}

/// Probe one candidate and, when the override is present, clear it.
///
/// Per-file failures become `Error` records, never panics or early returns;
/// this is the single place the probe/clear decision tree lives, shared by
/// the threaded workers and the sequential fallback.
fn process_candidate(
    accessor: &AttrAccessor,
    candidate: &CandidatePath,
    dry_run: bool,
) -> OutcomeRecord {
    match accessor.has_override(&candidate.path) {
        Ok(false) => OutcomeRecord::skipped(candidate),
        Ok(true) if dry_run => OutcomeRecord::would_clear(candidate),
        Ok(true) => match accessor.clear_override(&candidate.path) {
            Ok(_) => OutcomeRecord::cleared(candidate),
            Err(e) => OutcomeRecord::failed(candidate, true, &e),
        },
        Err(e) => OutcomeRecord::failed(candidate, false, &e),
    }
}

/// Strictly sequential processing with outcome semantics identical to the
/// threaded pool. This is the mandatory degradation path for hosts where
/// worker threads cannot be spawned.
pub fn process_sequential<I>(
    candidates: I,
    accessor: &AttrAccessor,
    options: &PoolOptions,
    cancel: &CancelToken,
) -> Vec<OutcomeRecord>
where
    I: Iterator<Item = CandidatePath>,
{
    let mut records = Vec::new();
    for candidate in candidates {
        if cancel.is_cancelled() {
            debug!(processed = records.len(), "sequential pass cancelled");
            break;
        }
        let record = process_candidate(accessor, &candidate, options.dry_run);
        let halt = record.is_error() && options.halt_on_error;
        records.push(record);
        if halt {
            break;
        }
    }
    records
}
