/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Graph representations.
//!
//! An [`AdjGraph`](adj_graph::AdjGraph) is the graph as it is read from disk:
//! one successor list per node. PageRank, however, needs to enumerate the
//! _predecessors_ of a node, which is what
//! [`Predecessors`](transposed::Predecessors) provides.

pub mod adj_graph;
pub mod random;
pub mod transposed;

pub mod prelude {
    pub use super::adj_graph::{AdjGraph, ArcError};
    pub use super::random::{GenError, RandomArcs};
    pub use super::transposed::Predecessors;
}
