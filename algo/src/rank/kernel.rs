/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The PageRank update rule.

use pagerank_graph::prelude::Predecessors;

use super::RankError;

/// Computes the next rank of the nodes `start..start + next.len()`.
///
/// The new rank of node *i* is
///
/// > (1 − α) / *n* + α ∑ { *xⱼ* / *d*⁺(*j*) : *i* ∈ succ(*j*) },
///
/// where **x** is `current`; it is written in `next[i - start]`. Since
/// predecessors are enumerated in increasing order, the terms of the sum are
/// added in the same order of a scan of all nodes testing whether *i* is
/// among their successors, and the result is the same, bit by bit. Dangling
/// nodes are never predecessors, so they contribute nothing.
///
/// Only `next` is written, so disjoint ranges can be updated concurrently.
///
/// # Errors
///
/// Returns [`RankError::NonFinite`] if a new rank is infinite or NaN, which
/// can happen only if `current` contains such values.
///
/// # Panics
///
/// Panics if the range is not contained in [0 . . *n*) or if `current` is
/// shorter than *n*.
pub fn update_range(
    preds: &Predecessors,
    alpha: f64,
    current: &[f64],
    start: usize,
    next: &mut [f64],
) -> Result<(), RankError> {
    let n = preds.num_nodes();
    let teleport = (1.0 - alpha) / n as f64;

    for (node, slot) in (start..).zip(next.iter_mut()) {
        let sigma: f64 = preds
            .predecessors(node)
            .iter()
            // Division rather than multiplication by the inverse outdegree
            .map(|&j| current[j] / preds.outdegree(j) as f64)
            .sum();
        let rank = teleport + alpha * sigma;
        if !rank.is_finite() {
            return Err(RankError::NonFinite { node });
        }
        *slot = rank;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagerank_graph::prelude::AdjGraph;

    #[test]
    fn test_single_update() {
        // 0 -> 1, 2; 1 -> 2; 2 -> 0
        let g = AdjGraph::from_lists([vec![1, 2], vec![2], vec![0]]).unwrap();
        let t = Predecessors::from_graph(&g);
        let current = [0.5, 0.25, 0.25];
        let mut next = [0.0; 3];
        update_range(&t, 0.5, &current, 0, &mut next).unwrap();
        let base = 0.5 / 3.0;
        assert_eq!(next[0], base + 0.5 * 0.25);
        assert_eq!(next[1], base + 0.5 * (0.5 / 2.0));
        assert_eq!(next[2], base + 0.5 * (0.5 / 2.0 + 0.25));
    }

    #[test]
    fn test_subrange() {
        let g = AdjGraph::from_lists([vec![1], vec![2], vec![3], vec![0]]).unwrap();
        let t = Predecessors::from_graph(&g);
        let current = [0.1, 0.2, 0.3, 0.4];
        let mut next = [0.0; 2];
        update_range(&t, 0.8, &current, 1, &mut next).unwrap();
        assert_eq!(next[0], (1.0 - 0.8) / 4.0 + 0.8 * 0.1);
        assert_eq!(next[1], (1.0 - 0.8) / 4.0 + 0.8 * 0.2);
    }

    #[test]
    fn test_non_finite() {
        let g = AdjGraph::from_lists([vec![1], vec![0]]).unwrap();
        let t = Predecessors::from_graph(&g);
        let current = [f64::NAN, 0.5];
        let mut next = [0.0; 2];
        assert_eq!(
            update_range(&t, 0.85, &current, 0, &mut next),
            Err(RankError::NonFinite { node: 1 })
        );
    }
}
