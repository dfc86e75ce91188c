/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Damped power-iteration PageRank.
//!
//! # The formula
//!
//! If we denote with *n* the number of nodes, with *d*⁺(*j*) the outdegree of
//! node *j* and with α the damping factor, the rank vector is the fixed point
//! of
//!
//! > *xᵢ* = (1 − α) / *n* + α ∑ { *xⱼ* / *d*⁺(*j*) : *i* ∈ succ(*j*) }.
//!
//! Dangling nodes (nodes without successors) simply do not contribute: their
//! rank is not redistributed. A node listing *i* several times contributes
//! once to the rank of *i*, but every occurrence is counted in its outdegree,
//! so part of its rank is lost too. Thus, the entries of the rank vector sum
//! to one only if there are no dangling nodes and no duplicate arcs.
//!
//! # The power method
//!
//! We start from the uniform vector **x**⁽⁰⁾ = **1** / *n* and apply the
//! formula above to obtain **x**⁽*ᵗ* ⁺ ¹⁾ from **x**⁽*ᵗ*⁾ (Jacobi style: every
//! new value is computed from old values only). The computation stops after
//! the first round *t* in which
//!
//! > ‖**x**⁽*ᵗ*⁾ − **x**⁽*ᵗ* ⁻ ¹⁾‖₁ < ε,
//!
//! and **x**⁽*ᵗ*⁾, the vector computed in that round, is the result.
//!
//! # Parallelism
//!
//! In [parallel](Execution::Parallel) mode, each round splits nodes into as
//! many [contiguous partitions](super::partition) as threads and updates
//! them on a [pool](super::pool::WorkerPool) owned by the computation. Since
//! each node is updated using only old values, and each partition writes only
//! its own slots, the result is the same, bit by bit, as that of a sequential
//! computation, independently of the number of threads.
//!
//! # Stopping Criteria
//!
//! After each round, the driver evaluates an [`L1Norm`](preds::L1Norm)
//! predicate, which signals convergence. If [an iteration
//! limit](PageRank::max_iter) is set, a [`MaxIter`](preds::MaxIter) predicate
//! is evaluated before each round, and makes the computation fail with
//! [`RankError::NotConverged`] once the limit has been reached. In particular,
//! a limit of zero performs no round at all.

pub mod preds {
    //! Predicates implementing stopping conditions.
    //!
    //! The predicates evaluate to true if the computation should be stopped.
    //! You can combine them using the `and` and `or` methods provided by the
    //! [`Predicate`] trait.
    //!
    //! # Examples
    //! ```
    //! # fn main() -> Result<(), Box<dyn std::error::Error>> {
    //! use predicates::prelude::*;
    //! use pagerank_algo::rank::preds::{L1Norm, MaxIter, PredParams};
    //!
    //! let predicate = L1Norm::try_from(1E-6)?.or(MaxIter::from(100));
    //! assert!(predicate.eval(&PredParams { iteration: 100, norm_delta: 1.0 }));
    //! assert!(predicate.eval(&PredParams { iteration: 1, norm_delta: 1E-7 }));
    //! assert!(!predicate.eval(&PredParams { iteration: 1, norm_delta: 1E-6 }));
    //! #     Ok(())
    //! # }
    //! ```

    use anyhow::ensure;
    use predicates::{Predicate, reflection::PredicateReflection};
    use std::fmt::Display;

    /// This structure is passed to stopping predicates to provide the
    /// information that is needed to evaluate them.
    #[derive(Debug, Clone, Copy)]
    pub struct PredParams {
        /// The number of rounds completed.
        pub iteration: usize,
        /// The ℓ₁ distance between the last two approximations.
        pub norm_delta: f64,
    }

    /// Stops after at most the provided number of iterations.
    #[derive(Debug, Clone)]
    pub struct MaxIter {
        max_iter: usize,
    }

    impl MaxIter {
        pub const DEFAULT_MAX_ITER: usize = usize::MAX;

        /// Returns the maximum number of iterations.
        pub fn max_iter(&self) -> usize {
            self.max_iter
        }
    }

    impl From<usize> for MaxIter {
        fn from(max_iter: usize) -> Self {
            MaxIter { max_iter }
        }
    }

    impl Default for MaxIter {
        fn default() -> Self {
            Self::from(Self::DEFAULT_MAX_ITER)
        }
    }

    impl Display for MaxIter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(max iter: {})", self.max_iter))
        }
    }

    impl PredicateReflection for MaxIter {}

    impl Predicate<PredParams> for MaxIter {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.iteration >= self.max_iter
        }
    }

    /// Stops when the ℓ₁ norm of the difference between successive
    /// approximations falls strictly below a given threshold.
    #[derive(Debug, Clone)]
    pub struct L1Norm {
        threshold: f64,
    }

    impl L1Norm {
        pub const DEFAULT_THRESHOLD: f64 = 1E-6;

        /// Returns the threshold.
        pub fn threshold(&self) -> f64 {
            self.threshold
        }
    }

    impl TryFrom<Option<f64>> for L1Norm {
        type Error = anyhow::Error;
        fn try_from(threshold: Option<f64>) -> anyhow::Result<Self> {
            Ok(match threshold {
                Some(threshold) => {
                    ensure!(!threshold.is_nan(), "The threshold cannot be NaN");
                    ensure!(threshold > 0.0, "The threshold must be positive");
                    L1Norm { threshold }
                }
                None => Self::default(),
            })
        }
    }

    impl TryFrom<f64> for L1Norm {
        type Error = anyhow::Error;
        fn try_from(threshold: f64) -> anyhow::Result<Self> {
            Some(threshold).try_into()
        }
    }

    impl Default for L1Norm {
        fn default() -> Self {
            L1Norm {
                threshold: Self::DEFAULT_THRESHOLD,
            }
        }
    }

    impl Display for L1Norm {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_fmt(format_args!("(norm: {})", self.threshold))
        }
    }

    impl PredicateReflection for L1Norm {}
    impl Predicate<PredParams> for L1Norm {
        fn eval(&self, pred_params: &PredParams) -> bool {
            pred_params.norm_delta < self.threshold
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_l1_norm_is_strict() -> anyhow::Result<()> {
            let p = L1Norm::try_from(0.5)?;
            let params = |norm_delta| PredParams {
                iteration: 1,
                norm_delta,
            };
            assert!(p.eval(&params(0.25)));
            assert!(!p.eval(&params(0.5)));
            assert!(!p.eval(&params(f64::NAN)));
            Ok(())
        }

        #[test]
        fn test_l1_norm_validation() {
            assert!(L1Norm::try_from(0.0).is_err());
            assert!(L1Norm::try_from(-1E-3).is_err());
            assert!(L1Norm::try_from(f64::NAN).is_err());
            assert_eq!(
                L1Norm::try_from(None).unwrap().threshold(),
                L1Norm::DEFAULT_THRESHOLD
            );
        }

        #[test]
        fn test_max_iter() {
            let p = MaxIter::from(3);
            let params = |iteration| PredParams {
                iteration,
                norm_delta: 1.0,
            };
            assert!(!p.eval(&params(2)));
            assert!(p.eval(&params(3)));
            assert_eq!(p.to_string(), "(max iter: 3)");
        }
    }
}

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicBool, Ordering};

use dsi_progress_logger::{ProgressLog, no_logging};
use pagerank_graph::prelude::{AdjGraph, Predecessors};
use predicates::Predicate;

use super::RankError;
use super::kernel::update_range;
use super::pool::WorkerPool;
use super::vector::RankVector;
use preds::{L1Norm, MaxIter, PredParams};

/// How the rounds of a computation are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    /// All nodes are updated by the calling thread.
    #[default]
    Sequential,
    /// Nodes are split into as many partitions as threads, and updated by a
    /// pool of the given number of threads.
    Parallel(NonZeroUsize),
}

impl std::fmt::Display for Execution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Execution::Sequential => f.write_str("sequential"),
            Execution::Parallel(t) => write!(f, "parallel ({t} threads)"),
        }
    }
}

/// Computes PageRank using the power method.
///
/// The struct is configured via setters and then executed via
/// [`run`](Self::run). After completion the rank vector is available via the
/// [`rank`](Self::rank) method.
///
/// The incoming-edge representation of the graph is built by the first call
/// to [`run`](Self::run) and reused by subsequent calls.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use pagerank_algo::rank::{PageRank, preds::L1Norm};
/// use pagerank_graph::prelude::AdjGraph;
///
/// // 0 → 1, 0 → 2, 1 → 2, 2 → 0
/// let graph = AdjGraph::from_lists([vec![1, 2], vec![2], vec![0]])?;
///
/// let mut pr = PageRank::new(&graph);
/// pr.alpha(0.85)?.threshold(L1Norm::try_from(1E-9)?);
/// pr.run()?;
///
/// assert_eq!(pr.rank().len(), 3);
/// assert!(pr.rank()[2] > pr.rank()[1]);
/// assert!((pr.rank().iter().sum::<f64>() - 1.0).abs() < 1E-6);
/// #     Ok(())
/// # }
/// ```
pub struct PageRank<'a> {
    graph: &'a AdjGraph,
    alpha: f64,
    threshold: L1Norm,
    max_iter: Option<usize>,
    execution: Execution,
    interrupt: Option<&'a AtomicBool>,
    preds: Option<Predecessors>,

    rank: Box<[f64]>,
    norm_delta: f64,
    iteration: usize,
}

impl std::fmt::Debug for PageRank<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRank")
            .field("alpha", &self.alpha)
            .field("threshold", &self.threshold)
            .field("max_iter", &self.max_iter)
            .field("execution", &self.execution)
            .field("norm_delta", &self.norm_delta)
            .field("iteration", &self.iteration)
            .finish_non_exhaustive()
    }
}

impl<'a> PageRank<'a> {
    pub const DEFAULT_ALPHA: f64 = 0.85;

    /// Creates a new PageRank computation on the given graph.
    pub fn new(graph: &'a AdjGraph) -> Self {
        Self {
            graph,
            alpha: Self::DEFAULT_ALPHA,
            threshold: L1Norm::default(),
            max_iter: None,
            execution: Execution::default(),
            interrupt: None,
            preds: None,
            rank: Box::default(),
            norm_delta: f64::INFINITY,
            iteration: 0,
        }
    }

    /// Sets the damping factor α.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::InvalidAlpha`] if `alpha` is not in the open
    /// interval (0 . . 1).
    pub fn alpha(&mut self, alpha: f64) -> Result<&mut Self, RankError> {
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(RankError::InvalidAlpha(alpha));
        }
        self.alpha = alpha;
        Ok(self)
    }

    /// Sets the convergence threshold.
    pub fn threshold(&mut self, threshold: L1Norm) -> &mut Self {
        self.threshold = threshold;
        self
    }

    /// Sets the maximum number of rounds, or removes the limit if `None`.
    ///
    /// A computation reaching the limit without converging fails with
    /// [`RankError::NotConverged`]. With a limit of zero no round is
    /// performed, the rank vector is the uniform one and the
    /// [norm delta](Self::norm_delta) is infinite.
    pub fn max_iter(&mut self, max_iter: Option<usize>) -> &mut Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the [execution mode](Execution).
    pub fn execution(&mut self, execution: Execution) -> &mut Self {
        self.execution = execution;
        self
    }

    /// Sets a flag that, when raised, stops the computation with
    /// [`RankError::Interrupted`].
    ///
    /// The flag is checked before every round and at the start of every
    /// partition task.
    pub fn interrupt(&mut self, interrupt: Option<&'a AtomicBool>) -> &mut Self {
        self.interrupt = interrupt;
        self
    }

    /// Returns the rank vector.
    ///
    /// After a successful call to [`run`](Self::run), this contains the
    /// vector computed in the last round; the same holds if
    /// [`run`](Self::run) failed with [`RankError::NotConverged`].
    pub fn rank(&self) -> &[f64] {
        &self.rank
    }

    /// Returns the number of rounds performed by the last call to
    /// [`run`](Self::run).
    pub fn iterations(&self) -> usize {
        self.iteration
    }

    /// Returns the ℓ₁ distance between the last two approximations.
    pub fn norm_delta(&self) -> f64 {
        self.norm_delta
    }

    /// Runs the computation until convergence.
    pub fn run(&mut self) -> Result<(), RankError> {
        self.run_with_logging(no_logging![])
    }

    /// Runs the computation until convergence, logging progress.
    ///
    /// `pl` is used first while building the incoming-edge representation of
    /// the graph, and then to count rounds. Its options will be preserved,
    /// making thus possible to customize the logs.
    ///
    /// # Errors
    ///
    /// - [`RankError::ThreadPool`] if the worker threads cannot be started;
    /// - [`RankError::NonFinite`] or [`RankError::TaskFailed`] if updating a
    ///   node fails (the first failure aborts the computation);
    /// - [`RankError::Interrupted`] if the [interrupt flag](Self::interrupt)
    ///   is raised;
    /// - [`RankError::NotConverged`] if the [iteration limit](Self::max_iter)
    ///   is reached.
    pub fn run_with_logging(&mut self, pl: &mut impl ProgressLog) -> Result<(), RankError> {
        let n = self.graph.num_nodes();
        self.iteration = 0;
        self.norm_delta = 0.0;
        if n == 0 {
            self.rank = Box::default();
            return Ok(());
        }

        log::info!("Alpha: {}", self.alpha);
        log::info!("Execution: {}", self.execution);
        let max_iter = self.max_iter.map(MaxIter::from);
        match &max_iter {
            Some(max_iter) => log::info!("Stopping criterion: {} {}", self.threshold, max_iter),
            None => log::info!("Stopping criterion: {}", self.threshold),
        }

        let preds = match self.preds.take() {
            Some(preds) => preds,
            None => Predecessors::from_graph_with_logging(self.graph, pl),
        };
        log::info!("{} dangling nodes", preds.num_dangling());

        self.norm_delta = f64::INFINITY;
        let mut ranks = RankVector::uniform(n);
        let result = self.iterate(&preds, &mut ranks, max_iter.as_ref(), pl);
        self.preds = Some(preds);
        self.rank = ranks.into_current();
        result
    }

    fn iterate(
        &mut self,
        preds: &Predecessors,
        ranks: &mut RankVector,
        max_iter: Option<&MaxIter>,
        pl: &mut impl ProgressLog,
    ) -> Result<(), RankError> {
        let pool = match self.execution {
            Execution::Sequential => None,
            Execution::Parallel(num_threads) => Some(WorkerPool::new(num_threads)?),
        };

        pl.item_name("iteration");
        pl.expected_updates(self.max_iter);
        pl.start(format!("Computing PageRank (alpha={})...", self.alpha));

        let interrupt = self.interrupt;
        let interrupted = || interrupt.is_some_and(|i| i.load(Ordering::Relaxed));

        loop {
            if interrupted() {
                log::warn!("Interrupted after {} iterations", self.iteration);
                return Err(RankError::Interrupted);
            }

            let params = PredParams {
                iteration: self.iteration,
                norm_delta: self.norm_delta,
            };
            if max_iter.is_some_and(|m| m.eval(&params)) {
                pl.done();
                log::warn!(
                    "Stopped after {} iterations without converging",
                    self.iteration
                );
                return Err(RankError::NotConverged {
                    iterations: self.iteration,
                    norm_delta: self.norm_delta,
                });
            }

            let alpha = self.alpha;
            let (current, next) = ranks.split();
            match &pool {
                None => update_range(preds, alpha, current, 0, next)?,
                Some(pool) => pool.execute(next, |mut partition| {
                    if interrupted() {
                        return Err(RankError::Interrupted);
                    }
                    let start = partition.start();
                    update_range(preds, alpha, current, start, partition.slice_mut())
                })?,
            }

            self.norm_delta = ranks.norm_delta();
            ranks.swap();
            self.iteration += 1;

            log::info!(
                "Iteration {}: norm delta = {}",
                self.iteration,
                self.norm_delta
            );
            pl.update_and_display();

            let params = PredParams {
                iteration: self.iteration,
                norm_delta: self.norm_delta,
            };
            if self.threshold.eval(&params) {
                pl.done();
                log::info!("Converged after {} iterations", self.iteration);
                return Ok(());
            }
        }
    }
}
