/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use pagerank_graph::formats::adj::{self, Field, FormatError};
use pagerank_graph::prelude::*;

/// Encodes a sequence of integers as the format does.
fn be_bytes(values: &[i32]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_be_bytes()).collect()
}

#[test]
fn test_roundtrip_keeps_order_duplicates_and_loops() -> Result<()> {
    let g = AdjGraph::from_lists([vec![3, 1, 3], vec![1], vec![], vec![0, 2, 1, 0]])?;
    let mut bytes = Vec::new();
    adj::store(&g, &mut bytes)?;
    assert_eq!(bytes.len(), 4 * (1 + 4 + 8));

    let h = adj::load(bytes.as_slice())?;
    assert_eq!(g, h);
    assert_eq!(h.successors(0), &[3, 1, 3]);
    assert_eq!(h.successors(3), &[0, 2, 1, 0]);
    assert_eq!(h.num_arcs(), 8);
    Ok(())
}

#[test]
fn test_roundtrip_random() -> Result<()> {
    for seed in 0..5 {
        let g = RandomArcs::new(200, 1000, seed).generate()?;
        let mut bytes = Vec::new();
        adj::store(&g, &mut bytes)?;
        assert_eq!(adj::load(bytes.as_slice())?, g);
    }
    Ok(())
}

#[test]
fn test_roundtrip_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("graph.bin");
    let g = RandomArcs::new(100, 400, 17).generate()?;
    adj::store_file(&g, &path)?;
    assert_eq!(std::fs::metadata(&path)?.len(), 4 * (1 + 100 + 400));
    assert_eq!(adj::load_file(&path)?, g);
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let g = adj::load(be_bytes(&[0]).as_slice())?;
    assert_eq!(g.num_nodes(), 0);
    let mut bytes = Vec::new();
    adj::store(&AdjGraph::new(), &mut bytes)?;
    assert_eq!(bytes, be_bytes(&[0]));
    Ok(())
}

#[test]
fn test_reads_java_stream() -> Result<()> {
    // 0 -> 1, 1 -> 2, 2 -> 0, as written by DataOutputStream
    let bytes = be_bytes(&[3, 1, 1, 1, 2, 1, 0]);
    let g = adj::load(bytes.as_slice())?;
    assert_eq!(g, AdjGraph::from_lists([vec![1], vec![2], vec![0]])?);
    Ok(())
}

#[test]
fn test_truncated() {
    let cases: [(&[u8], Field); 4] = [
        (&[], Field::NumNodes),
        (&[0, 0], Field::NumNodes),
        (&[0, 0, 0, 2, 0, 0, 0, 0], Field::Outdegree { node: 1 }),
        (
            &[0, 0, 0, 2, 0, 0, 0, 2, 0, 0, 0, 1],
            Field::Successor { node: 0, index: 1 },
        ),
    ];
    for (bytes, field) in cases {
        match adj::load(bytes) {
            Err(FormatError::Truncated { what }) => assert_eq!(what, field),
            other => panic!("expected truncation at {field}, got {other:?}"),
        }
    }
}

#[test]
fn test_negative_counts() {
    assert!(matches!(
        adj::load(be_bytes(&[-1]).as_slice()),
        Err(FormatError::NegativeNodeCount(-1))
    ));
    assert!(matches!(
        adj::load(be_bytes(&[2, 0, -3]).as_slice()),
        Err(FormatError::NegativeDegree { node: 1, degree: -3 })
    ));
}

#[test]
fn test_successor_out_of_range() {
    assert!(matches!(
        adj::load(be_bytes(&[2, 1, 2, 0]).as_slice()),
        Err(FormatError::SuccessorOutOfRange {
            node: 0,
            succ: 2,
            num_nodes: 2
        })
    ));
    assert!(matches!(
        adj::load(be_bytes(&[2, 0, 1, -1]).as_slice()),
        Err(FormatError::SuccessorOutOfRange {
            node: 1,
            succ: -1,
            num_nodes: 2
        })
    ));
}

#[test]
fn test_trailing_bytes_are_not_read() -> Result<()> {
    let bytes = be_bytes(&[1, 0, 42]);
    let mut reader = bytes.as_slice();
    let g = adj::load(&mut reader)?;
    assert_eq!(g.num_nodes(), 1);
    assert_eq!(reader, &42i32.to_be_bytes());
    Ok(())
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    assert!(matches!(
        adj::load_file(dir.path().join("missing.bin")),
        Err(FormatError::Io(_))
    ));
}
