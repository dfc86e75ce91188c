/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Ranking by damped power iteration.
//!
//! The [driver](PageRank) is built from smaller pieces that can be used on
//! their own: a pair of [rank buffers](vector::RankVector), the [update
//! kernel](kernel::update_range) computing the new rank of a range of nodes,
//! the [partitioning](partition) of nodes among threads, and the
//! [pool](pool::WorkerPool) executing the partitions of a round.

pub mod kernel;
pub mod pagerank;
pub mod partition;
pub mod pool;
pub mod vector;

pub use pagerank::{Execution, PageRank, preds};

use thiserror::Error;

/// Errors of a ranking computation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankError {
    /// The damping factor is not in the open interval (0 . . 1).
    #[error("The damping factor must be in (0 . . 1), got {0}")]
    InvalidAlpha(f64),
    /// The new rank of a node is infinite or NaN.
    #[error("The rank of node {node} is not finite")]
    NonFinite { node: usize },
    /// A partition task failed unexpectedly.
    #[error("The task computing partition {partition} failed: {message}")]
    TaskFailed { partition: usize, message: String },
    /// The worker threads could not be started.
    #[error("Could not start {num_threads} worker threads: {message}")]
    ThreadPool { num_threads: usize, message: String },
    /// The computation was interrupted.
    #[error("The computation was interrupted")]
    Interrupted,
    /// The iteration limit was reached before convergence.
    #[error("No convergence within {iterations} iterations (norm delta = {norm_delta})")]
    NotConverged { iterations: usize, norm_delta: f64 },
}
