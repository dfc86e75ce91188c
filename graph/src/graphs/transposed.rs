/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Predecessor lists and outdegrees for the rank update.

use super::adj_graph::AdjGraph;
use dsi_progress_logger::prelude::*;

/// The incoming-arc view of an [`AdjGraph`], in compressed sparse-row form.
///
/// For each node *i*, [`predecessors`](Self::predecessors) returns the
/// _distinct_ nodes *j* such that *i* appears in the successor list of *j*, in
/// increasing order. A node listing *i* several times appears only once,
/// whereas [`outdegree`](Self::outdegree) returns the full length of the
/// successor list of a node, duplicates included. Loops are kept.
///
/// This is exactly the information needed to evaluate, for each node *i*,
///
/// > ∑ { *xⱼ* / *d*⁺(*j*) : *i* ∈ succ(*j*) }
///
/// with the terms in the order of a scan of all nodes *j* = 0, 1, …, *n* − 1.
///
/// The degree-cumulative function `dcf` has *n* + 1 entries: the
/// predecessors of *i* are `preds[dcf[i]..dcf[i + 1]]`.
///
/// # Examples
///
/// ```
/// use pagerank_graph::prelude::*;
///
/// let g = AdjGraph::from_lists([vec![1, 1, 2], vec![2], vec![]])?;
/// let t = Predecessors::from_graph(&g);
/// assert_eq!(t.predecessors(1), &[0]);
/// assert_eq!(t.predecessors(2), &[0, 1]);
/// assert_eq!(t.outdegree(0), 3);
/// assert!(t.is_dangling(2));
/// # Ok::<(), ArcError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predecessors {
    dcf: Box<[usize]>,
    preds: Box<[usize]>,
    outdegrees: Box<[usize]>,
}

impl Predecessors {
    /// Builds the predecessor lists of a graph.
    pub fn from_graph(graph: &AdjGraph) -> Self {
        Self::from_graph_with_logging(graph, no_logging![])
    }

    /// Builds the predecessor lists of a graph, logging progress on `pl`.
    ///
    /// The construction makes two passes on the graph: the first one counts
    /// the predecessors of each node, the second one fills the lists.
    pub fn from_graph_with_logging(graph: &AdjGraph, pl: &mut impl ProgressLog) -> Self {
        let n = graph.num_nodes();
        // The last source that listed a node, to skip duplicate arcs
        let mut last_source = vec![usize::MAX; n];
        let mut dcf = vec![0usize; n + 1];

        pl.item_name("node");
        pl.expected_updates(Some(2 * n));
        pl.start("Transposing the graph...");

        for (j, succ) in graph.iter() {
            for &i in succ {
                if last_source[i] != j {
                    last_source[i] = j;
                    dcf[i + 1] += 1;
                }
            }
            pl.light_update();
        }

        for i in 0..n {
            dcf[i + 1] += dcf[i];
        }

        last_source.fill(usize::MAX);
        let mut cursor = dcf[..n].to_vec();
        let mut preds = vec![0usize; dcf[n]].into_boxed_slice();
        // Sources are scanned in increasing order, so each list comes out sorted
        for (j, succ) in graph.iter() {
            for &i in succ {
                if last_source[i] != j {
                    last_source[i] = j;
                    preds[cursor[i]] = j;
                    cursor[i] += 1;
                }
            }
            pl.light_update();
        }
        pl.done();

        let outdegrees = graph.iter().map(|(_, succ)| succ.len()).collect();

        log::debug!(
            "{} distinct incoming arcs over {} nodes ({} arcs in the graph)",
            preds.len(),
            n,
            graph.num_arcs()
        );

        Self {
            dcf: dcf.into_boxed_slice(),
            preds,
            outdegrees,
        }
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.outdegrees.len()
    }

    /// Returns the number of distinct (source, target) pairs.
    #[inline(always)]
    pub fn num_pairs(&self) -> usize {
        self.preds.len()
    }

    /// Returns the distinct predecessors of `node` in increasing order.
    #[inline(always)]
    pub fn predecessors(&self, node: usize) -> &[usize] {
        &self.preds[self.dcf[node]..self.dcf[node + 1]]
    }

    /// Returns the outdegree of `node` in the original graph, counting
    /// duplicate arcs.
    #[inline(always)]
    pub fn outdegree(&self, node: usize) -> usize {
        self.outdegrees[node]
    }

    /// Returns true if `node` has no successors in the original graph.
    #[inline(always)]
    pub fn is_dangling(&self, node: usize) -> bool {
        self.outdegrees[node] == 0
    }

    /// Returns the number of dangling nodes.
    pub fn num_dangling(&self) -> usize {
        self.outdegrees.iter().filter(|&&d| d == 0).count()
    }
}
