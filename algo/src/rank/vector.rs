/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The two rank buffers of a power iteration.

/// The current and next approximations of a rank vector.
///
/// During a round, the current approximation is only read and the next one is
/// only written ([`split`](Self::split) hands out exactly these two views).
/// At the end of a round the buffers are [swapped](Self::swap), which makes
/// the values just computed current; since every round rewrites the whole
/// next buffer, this is equivalent to copying it over the current one.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVector {
    current: Box<[f64]>,
    next: Box<[f64]>,
}

impl RankVector {
    /// Creates a pair of buffers of length `n` filled with 1/*n*.
    pub fn uniform(n: usize) -> Self {
        let value = if n == 0 { 0.0 } else { 1.0 / n as f64 };
        Self {
            current: vec![value; n].into_boxed_slice(),
            next: vec![value; n].into_boxed_slice(),
        }
    }

    /// Returns the length of the buffers.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns true if the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Returns the current approximation.
    pub fn current(&self) -> &[f64] {
        &self.current
    }

    /// Returns the next approximation.
    pub fn next(&self) -> &[f64] {
        &self.next
    }

    /// Returns a shared view of the current approximation and an exclusive
    /// view of the next one.
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        (&self.current, &mut self.next)
    }

    /// Makes the next approximation current.
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// Returns the ℓ₁ distance between the current and the next
    /// approximation.
    ///
    /// Differences are summed in increasing index order, so the result does
    /// not depend on how the next approximation was computed.
    pub fn norm_delta(&self) -> f64 {
        self.current
            .iter()
            .zip(self.next.iter())
            .map(|(c, n)| (c - n).abs())
            .sum()
    }

    /// Consumes the buffers, returning the current approximation.
    pub fn into_current(self) -> Box<[f64]> {
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let v = RankVector::uniform(4);
        assert_eq!(v.len(), 4);
        assert_eq!(v.current(), &[0.25; 4]);
        assert_eq!(v.next(), &[0.25; 4]);
        assert_eq!(v.norm_delta(), 0.0);
        assert!(RankVector::uniform(0).is_empty());
    }

    #[test]
    fn test_split_and_swap() {
        let mut v = RankVector::uniform(2);
        let (current, next) = v.split();
        next[0] = current[0] + 0.25;
        next[1] = current[1] - 0.25;
        assert_eq!(v.norm_delta(), 0.5);
        v.swap();
        assert_eq!(v.current(), &[0.75, 0.25]);
        assert_eq!(v.next(), &[0.5, 0.5]);
        assert_eq!(v.into_current().as_ref(), &[0.75, 0.25]);
    }
}
