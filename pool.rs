//! Bounded worker pool that runs one task per shard.
//!
//! Tasks run on a dedicated rayon pool of `workers` threads; shards beyond
//! that queue until a thread frees up. Results come back over a channel to
//! the calling thread, which hands them to a single consumer in completion
//! order. The first failure raises a cancel flag so queued tasks return
//! without doing work, and the error is returned to the caller.

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use tracing::{debug, error};

use crate::error::{Result, TopKError};
use crate::shard::Shard;

pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers < 1 {
            return Err(TopKError::invalid("worker count must be at least 1"));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("topk-worker-{i}"))
            .build()
            .map_err(|e| TopKError::PoolSetup(e.to_string()))?;
        Ok(Self { pool, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `task` once per shard and feed each result to `consume` as it
    /// arrives. Returns after every shard has been consumed, or on the first
    /// task error or panic.
    pub fn dispatch<T, E, F, C>(&self, shards: Vec<Shard>, task: F, mut consume: C) -> Result<()>
    where
        T: Send + 'static,
        E: Display + Send + 'static,
        F: Fn(&Shard) -> std::result::Result<T, E> + Send + Sync + 'static,
        C: FnMut(usize, T),
    {
        let total = shards.len();
        debug!(shards = total, workers = self.workers, "dispatching shards");

        let task = Arc::new(task);
        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel::<(usize, std::result::Result<T, String>)>();

        for shard in shards {
            let tx = tx.clone();
            let task = Arc::clone(&task);
            let cancelled = Arc::clone(&cancelled);
            self.pool.spawn(move || {
                if cancelled.load(Ordering::Acquire) {
                    return;
                }
                let outcome = panic::catch_unwind(AssertUnwindSafe(|| (*task)(&shard)))
                    .map_err(panic_reason)
                    .and_then(|r| r.map_err(|e| e.to_string()));
                // The receiver is gone once the run has failed.
                let _ = tx.send((shard.index, outcome));
            });
        }
        drop(tx);

        let mut received = 0;
        for (shard, outcome) in rx.iter() {
            match outcome {
                Ok(value) => {
                    received += 1;
                    consume(shard, value);
                    if received == total {
                        break;
                    }
                }
                Err(reason) => {
                    cancelled.store(true, Ordering::Release);
                    error!(shard, %reason, "shard failed, aborting run");
                    return Err(TopKError::Pool { shard, reason });
                }
            }
        }

        if received < total {
            return Err(TopKError::PoolSetup(format!(
                "{} of {total} shard tasks never reported",
                total - received
            )));
        }
        Ok(())
    }
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked".to_string()
    }
}
