//! Worker pool sizing and construction
//!
//! Detection tasks are CPU-bound and never block on I/O, so the pool is
//! sized to the available cores unless configured otherwise. Each
//! orchestrator owns a dedicated Rayon pool; the global pool is left alone
//! so several independent runs can coexist in one process.

use crate::errors::{Result, SimcheckError};
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Default stack size per worker (8MB); deep DP tables live on the heap
const DEFAULT_STACK_SIZE: usize = 8 * 1024 * 1024;

/// Resolve a configured worker count (0 = auto)
pub fn resolve_workers(configured: usize) -> usize {
    if configured == 0 {
        num_cpus::get().max(1)
    } else {
        configured
    }
}

/// Build a dedicated worker pool
pub fn build_worker_pool(configured_workers: usize) -> Result<ThreadPool> {
    let workers = resolve_workers(configured_workers);

    ThreadPoolBuilder::new()
        .num_threads(workers)
        .stack_size(DEFAULT_STACK_SIZE)
        .thread_name(|i| format!("simcheck-worker-{}", i))
        .build()
        .map_err(|e| SimcheckError::ThreadPool(format!("Failed to build worker pool: {}", e)))
}
