/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graphs stored as one successor list per node.

use thiserror::Error;

/// An arc with an endpoint outside the graph.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Arc ({node}, {succ}) is out of range: the graph has {num_nodes} nodes")]
pub struct ArcError {
    /// The node whose successor list contains the arc.
    pub node: usize,
    /// The offending successor.
    pub succ: usize,
    /// The number of nodes of the graph.
    pub num_nodes: usize,
}

/// A directed graph based on a vector of successor lists.
///
/// Differently from most graph representations, successor lists are kept
/// exactly as they are provided: arcs appear in insertion order, and
/// duplicate arcs and loops are stored as given. In particular, the outdegree
/// of a node counts duplicate arcs.
///
/// Two graphs are equal if they have the same number of nodes and the same
/// successor lists, in the same order.
///
/// # Examples
///
/// ```
/// use pagerank_graph::graphs::adj_graph::AdjGraph;
///
/// let mut g = AdjGraph::empty(3);
/// g.push_arc(0, 2);
/// g.push_arc(0, 1);
/// g.push_arc(0, 2);
/// assert_eq!(g.successors(0), &[2, 1, 2]);
/// assert_eq!(g.outdegree(0), 3);
/// assert_eq!(g.num_arcs(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdjGraph {
    /// The number of arcs in the graph.
    num_arcs: u64,
    /// For each node, its list of successors.
    succ: Vec<Vec<usize>>,
}

impl AdjGraph {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new graph with `n` nodes and no arcs.
    pub fn empty(n: usize) -> Self {
        Self {
            num_arcs: 0,
            succ: Vec::from_iter((0..n).map(|_| Vec::new())),
        }
    }

    /// Creates a graph from a sequence of successor lists, one per node.
    ///
    /// The number of nodes is the number of lists; an error is returned if a
    /// successor is not smaller than the number of nodes.
    pub fn from_lists<I, S>(lists: I) -> Result<Self, ArcError>
    where
        I: IntoIterator<Item = S>,
        S: IntoIterator<Item = usize>,
    {
        let succ: Vec<Vec<usize>> = lists
            .into_iter()
            .map(|s| s.into_iter().collect())
            .collect();
        let num_nodes = succ.len();
        let mut num_arcs = 0;
        for (node, s) in succ.iter().enumerate() {
            if let Some(&bad) = s.iter().find(|&&v| v >= num_nodes) {
                return Err(ArcError {
                    node,
                    succ: bad,
                    num_nodes,
                });
            }
            num_arcs += s.len() as u64;
        }
        Ok(Self { num_arcs, succ })
    }

    /// Appends an arc to the successor list of `u`.
    ///
    /// # Panics
    ///
    /// This method will panic if one of the given nodes is greater or equal
    /// than the number of nodes in the graph. Use
    /// [`try_push_arc`](Self::try_push_arc) to get an error instead.
    pub fn push_arc(&mut self, u: usize, v: usize) {
        if let Err(e) = self.try_push_arc(u, v) {
            panic!("{e}");
        }
    }

    /// Appends an arc to the successor list of `u`, returning an error if one
    /// of the nodes does not exist.
    pub fn try_push_arc(&mut self, u: usize, v: usize) -> Result<(), ArcError> {
        let num_nodes = self.succ.len();
        if u.max(v) >= num_nodes {
            return Err(ArcError {
                node: u,
                succ: v,
                num_nodes,
            });
        }
        self.succ[u].push(v);
        self.num_arcs += 1;
        Ok(())
    }

    /// Appends a new node with the given successor list.
    ///
    /// This is used by loaders that know the final number of nodes in advance
    /// and have already checked the successors against it.
    pub(crate) fn push_node(&mut self, succ: Vec<usize>) {
        self.num_arcs += succ.len() as u64;
        self.succ.push(succ);
    }

    /// Returns the number of nodes.
    #[inline(always)]
    pub fn num_nodes(&self) -> usize {
        self.succ.len()
    }

    /// Returns the number of arcs, counting duplicates.
    #[inline(always)]
    pub fn num_arcs(&self) -> u64 {
        self.num_arcs
    }

    /// Returns the successors of `node`, in insertion order.
    #[inline(always)]
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.succ[node]
    }

    /// Returns the outdegree of `node`, counting duplicate arcs.
    #[inline(always)]
    pub fn outdegree(&self, node: usize) -> usize {
        self.succ[node].len()
    }

    /// Returns an iterator over the nodes and their successor lists.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (usize, &[usize])> + '_ {
        self.succ.iter().map(Vec::as_slice).enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        let g = AdjGraph::empty(4);
        assert_eq!(g.num_nodes(), 4);
        assert_eq!(g.num_arcs(), 0);
        assert!(g.iter().all(|(_, s)| s.is_empty()));
        assert_eq!(AdjGraph::new().num_nodes(), 0);
    }

    #[test]
    fn test_duplicates_and_loops_are_kept() {
        let mut g = AdjGraph::empty(2);
        g.push_arc(1, 1);
        g.push_arc(1, 0);
        g.push_arc(1, 1);
        assert_eq!(g.successors(1), &[1, 0, 1]);
        assert_eq!(g.outdegree(1), 3);
        assert_eq!(g.num_arcs(), 3);
    }

    #[test]
    fn test_from_lists() {
        let g = AdjGraph::from_lists([vec![2, 1], vec![], vec![0, 0]]).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_arcs(), 4);
        assert_eq!(g.successors(0), &[2, 1]);
        assert_eq!(g.successors(2), &[0, 0]);

        assert_eq!(
            AdjGraph::from_lists([vec![1], vec![2]]),
            Err(ArcError {
                node: 1,
                succ: 2,
                num_nodes: 2
            })
        );
    }

    #[test]
    fn test_try_push_arc() {
        let mut g = AdjGraph::empty(2);
        assert!(g.try_push_arc(0, 1).is_ok());
        assert!(g.try_push_arc(2, 0).is_err());
        assert!(g.try_push_arc(0, 2).is_err());
        assert_eq!(g.num_arcs(), 1);
    }

    #[test]
    #[should_panic]
    fn test_push_arc_out_of_range() {
        let mut g = AdjGraph::empty(2);
        g.push_arc(0, 2);
    }
}
