/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Splitting nodes among parallel tasks.
//!
//! Nodes [0 . . *n*) are split into *p* contiguous ranges, the *t*-th of which
//! is [⌊*tn*/*p*⌋ . . ⌊(*t* + 1)*n*/*p*⌋). Range sizes differ by at most one,
//! and when *p* > *n* some ranges are empty; in any case, every node belongs
//! to exactly one range.
//!
//! The [`split`] function carves the buffer of next ranks into such ranges
//! using [`split_at_mut`](slice::split_at_mut): each [`Partition`] owns an
//! exclusive view of its own nodes, so no two tasks can ever write the same
//! slot.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Returns the start of the `t`-th of `parts` ranges splitting `n` nodes.
#[inline(always)]
fn bound(n: usize, parts: usize, t: usize) -> usize {
    ((t as u128 * n as u128) / parts as u128) as usize
}

/// Returns the ranges splitting [0 . . `n`) into `parts` contiguous parts.
///
/// # Examples
///
/// ```
/// use pagerank_algo::rank::partition::ranges;
/// use std::num::NonZeroUsize;
///
/// let r: Vec<_> = ranges(10, NonZeroUsize::new(3).unwrap()).collect();
/// assert_eq!(r, [0..3, 3..6, 6..10]);
/// ```
pub fn ranges(n: usize, parts: NonZeroUsize) -> impl ExactSizeIterator<Item = Range<usize>> {
    let parts = parts.get();
    (0..parts).map(move |t| bound(n, parts, t)..bound(n, parts, t + 1))
}

/// A range of nodes assigned to a task, together with the exclusive view of
/// the slots of the rank buffer it must fill.
#[derive(Debug)]
pub struct Partition<'a> {
    index: usize,
    start: usize,
    slice: &'a mut [f64],
}

impl<'a> Partition<'a> {
    /// Returns the index of the partition.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the first node of the partition.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Returns the nodes of the partition.
    pub fn range(&self) -> Range<usize> {
        self.start..self.start + self.slice.len()
    }

    /// Returns the number of nodes of the partition.
    pub fn len(&self) -> usize {
        self.slice.len()
    }

    /// Returns true if the partition contains no nodes.
    pub fn is_empty(&self) -> bool {
        self.slice.is_empty()
    }

    /// Returns the slots of the partition; slot *k* is that of node
    /// [`start`](Self::start) + *k*.
    pub fn slice_mut(&mut self) -> &mut [f64] {
        self.slice
    }
}

/// Splits a buffer into `parts` partitions following [`ranges`].
pub fn split(buffer: &mut [f64], parts: NonZeroUsize) -> Vec<Partition<'_>> {
    let mut rest = buffer;
    ranges(rest.len(), parts)
        .enumerate()
        .map(|(index, range)| {
            let (slice, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
            rest = tail;
            Partition {
                index,
                start: range.start,
                slice,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nz(x: usize) -> NonZeroUsize {
        NonZeroUsize::new(x).unwrap()
    }

    #[test]
    fn test_ranges_cover_every_node_once() {
        for n in 0..40 {
            for parts in 1..50 {
                let r: Vec<_> = ranges(n, nz(parts)).collect();
                assert_eq!(r.len(), parts);
                assert_eq!(r[0].start, 0);
                assert_eq!(r[parts - 1].end, n);
                for w in r.windows(2) {
                    assert_eq!(w[0].end, w[1].start);
                }
                let min = r.iter().map(|x| x.len()).min().unwrap();
                let max = r.iter().map(|x| x.len()).max().unwrap();
                assert!(max - min <= 1, "n={n} parts={parts}");
            }
        }
    }

    #[test]
    fn test_more_parts_than_nodes() {
        let r: Vec<_> = ranges(3, nz(5)).collect();
        assert_eq!(r, [0..0, 0..1, 1..1, 1..2, 2..3]);
    }

    #[test]
    fn test_last_range_absorbs_remainder() {
        let r: Vec<_> = ranges(7, nz(2)).collect();
        assert_eq!(r, [0..3, 3..7]);
    }

    #[test]
    fn test_split() {
        let mut buffer = [0.0; 10];
        let mut parts = split(&mut buffer, nz(4));
        assert_eq!(parts.len(), 4);
        for p in parts.iter_mut() {
            let index = p.index() as f64;
            p.slice_mut().fill(index);
        }
        let layout: Vec<_> = parts.iter().map(|p| p.range()).collect();
        assert_eq!(layout, [0..2, 2..5, 5..7, 7..10]);
        drop(parts);
        assert_eq!(buffer, [0., 0., 1., 1., 1., 2., 2., 3., 3., 3.]);
    }

    #[test]
    fn test_split_empty() {
        let mut buffer: [f64; 0] = [];
        let parts = split(&mut buffer, nz(3));
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(Partition::is_empty));
    }
}
