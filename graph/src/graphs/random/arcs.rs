/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Seeded random graphs with a given number of distinct arcs.

use std::collections::HashSet;

use dsi_progress_logger::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

use crate::graphs::adj_graph::AdjGraph;

/// The requested random graph cannot exist.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenError {
    /// There are fewer than `num_arcs` possible arcs without loops.
    #[error("Cannot place {num_arcs} distinct arcs without loops on {num_nodes} nodes")]
    TooManyArcs { num_nodes: usize, num_arcs: usize },
}

/// Random directed graphs with a given number of arcs.
///
/// The graph has exactly `num_arcs` distinct arcs, none of which is a loop.
/// Arcs are drawn uniformly at random, rejecting loops and arcs already drawn,
/// using a [pseudorandom number generator](SmallRng) initialized with the
/// given seed; they are appended to the successor list of their source in the
/// order in which they are drawn, so successor lists are not sorted.
///
/// Rejection sampling makes generation slow when `num_arcs` gets close to
/// *n*(*n* − 1).
///
/// # Examples
///
/// ```
/// use pagerank_graph::prelude::*;
///
/// let g = RandomArcs::new(100, 300, 0).generate()?;
/// assert_eq!(g.num_nodes(), 100);
/// assert_eq!(g.num_arcs(), 300);
/// # Ok::<(), GenError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RandomArcs {
    num_nodes: usize,
    num_arcs: usize,
    seed: u64,
}

impl RandomArcs {
    /// Creates a new generator, given the number of nodes and arcs and a seed.
    pub fn new(num_nodes: usize, num_arcs: usize, seed: u64) -> Self {
        Self {
            num_nodes,
            num_arcs,
            seed,
        }
    }

    /// Generates the graph.
    pub fn generate(&self) -> Result<AdjGraph, GenError> {
        self.generate_with_logging(no_logging![])
    }

    /// Generates the graph, logging progress on `pl`.
    pub fn generate_with_logging(&self, pl: &mut impl ProgressLog) -> Result<AdjGraph, GenError> {
        let n = self.num_nodes;
        let max_arcs = (n as u128) * (n.saturating_sub(1) as u128);
        if self.num_arcs as u128 > max_arcs {
            return Err(GenError::TooManyArcs {
                num_nodes: n,
                num_arcs: self.num_arcs,
            });
        }

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut drawn = HashSet::with_capacity(self.num_arcs);
        let mut graph = AdjGraph::empty(n);

        pl.item_name("arc");
        pl.expected_updates(Some(self.num_arcs));
        pl.start(format!(
            "Generating {} random arcs on {} nodes...",
            self.num_arcs, n
        ));
        while drawn.len() < self.num_arcs {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u != v && drawn.insert((u, v)) {
                graph.push_arc(u, v);
                pl.light_update();
            }
        }
        pl.done();

        Ok(graph)
    }
}
