/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! A fork-join pool running one task per partition.

use std::any::Any;
use std::num::NonZeroUsize;
use std::panic::{AssertUnwindSafe, catch_unwind};

use rayon::prelude::*;

use super::RankError;
use super::partition::{self, Partition};

/// A pool of worker threads executing the partitions of a round.
///
/// The pool owns its threads, which are joined when the pool is dropped; the
/// global Rayon pool is never used. Each call to [`execute`](Self::execute)
/// is a fork-join round: it returns only after every task has finished, so
/// when it returns all slots of the buffer have been written and can be read
/// by the caller.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    num_threads: NonZeroUsize,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_threads", &self.num_threads)
            .finish_non_exhaustive()
    }
}

/// Extracts the message of a panic payload.
fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

impl WorkerPool {
    /// Starts a pool with the given number of threads.
    pub fn new(num_threads: NonZeroUsize) -> Result<Self, RankError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads.get())
            .thread_name(|i| format!("pagerank-worker-{i}"))
            .build()
            .map_err(|e| RankError::ThreadPool {
                num_threads: num_threads.get(),
                message: e.to_string(),
            })?;
        log::info!("Using {} threads", pool.current_num_threads());
        Ok(Self { pool, num_threads })
    }

    /// Returns the number of threads, which is also the number of partitions
    /// of every round.
    pub fn num_threads(&self) -> NonZeroUsize {
        self.num_threads
    }

    /// Splits `buffer` into [`num_threads`](Self::num_threads) partitions and
    /// runs `task` on each of them in parallel.
    ///
    /// # Errors
    ///
    /// If a task returns an error, the error is returned; if a task panics,
    /// [`RankError::TaskFailed`] is returned. Tasks not yet started when a
    /// failure is detected are skipped, and in any case the contents of
    /// `buffer` must not be used after a failure.
    pub fn execute<F>(&self, buffer: &mut [f64], task: F) -> Result<(), RankError>
    where
        F: Fn(Partition<'_>) -> Result<(), RankError> + Sync,
    {
        let partitions = partition::split(buffer, self.num_threads);
        for p in &partitions {
            log::debug!("Partition {}: nodes {:?}", p.index(), p.range());
        }

        self.pool.install(|| {
            partitions.into_par_iter().try_for_each(|p| {
                let index = p.index();
                catch_unwind(AssertUnwindSafe(|| task(p))).unwrap_or_else(|payload| {
                    Err(RankError::TaskFailed {
                        partition: index,
                        message: panic_message(payload),
                    })
                })
            })
        })
    }
}
