/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Binary adjacency lists.
//!
//! A graph with *n* nodes is stored as a sequence of 32-bit signed big-endian
//! integers (the same layout produced by Java's `DataOutputStream.writeInt`):
//!
//! - the number of nodes *n*;
//! - for each node *i* = 0, 1, …, *n* − 1, in order, the outdegree *dᵢ* of
//!   *i* followed by its *dᵢ* successors.
//!
//! There is no header, trailer, checksum, or version tag. Successor lists are
//! stored as they are, so duplicate arcs and loops survive a round trip.
//!
//! Loading validates the input: a premature end of the stream, negative counts
//! and successors outside [0 . . *n*) are reported as a [`FormatError`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use dsi_progress_logger::prelude::*;
use thiserror::Error;

use crate::graphs::adj_graph::AdjGraph;

/// Upper bound on the capacity reserved for a successor list before reading
/// it, so that a corrupted outdegree cannot trigger a huge allocation.
const MAX_PREALLOC: usize = 1 << 16;

/// The field that was being read when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// The number of nodes at the start of the stream.
    NumNodes,
    /// The outdegree of a node.
    Outdegree { node: usize },
    /// The `index`-th successor of a node.
    Successor { node: usize, index: usize },
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::NumNodes => f.write_str("the number of nodes"),
            Field::Outdegree { node } => write!(f, "the outdegree of node {node}"),
            Field::Successor { node, index } => write!(f, "successor {index} of node {node}"),
        }
    }
}

/// Errors reading or writing binary adjacency lists.
#[derive(Error, Debug)]
pub enum FormatError {
    /// The stream ended prematurely.
    #[error("Unexpected end of input while reading {what}")]
    Truncated { what: Field },
    /// The number of nodes is negative.
    #[error("Negative number of nodes: {0}")]
    NegativeNodeCount(i32),
    /// The outdegree of a node is negative.
    #[error("Negative outdegree {degree} for node {node}")]
    NegativeDegree { node: usize, degree: i32 },
    /// A successor is outside [0 . . *n*).
    #[error("Successor {succ} of node {node} is out of range: the graph has {num_nodes} nodes")]
    SuccessorOutOfRange {
        node: usize,
        succ: i32,
        num_nodes: usize,
    },
    /// A value does not fit into a 32-bit signed integer.
    #[error("Value {0} does not fit into a 32-bit signed integer")]
    TooLarge(usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

fn read_i32(reader: &mut impl Read, what: Field) -> Result<i32, FormatError> {
    let mut buf = [0u8; 4];
    match reader.read_exact(&mut buf) {
        Ok(()) => Ok(i32::from_be_bytes(buf)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FormatError::Truncated { what }),
        Err(e) => Err(e.into()),
    }
}

fn write_i32(writer: &mut impl Write, value: usize) -> Result<(), FormatError> {
    let value = i32::try_from(value).map_err(|_| FormatError::TooLarge(value))?;
    writer.write_all(&value.to_be_bytes())?;
    Ok(())
}

/// Loads a graph from a reader.
///
/// The reader is read exactly up to the end of the last successor list; it
/// should be buffered, as it is read four bytes at a time.
pub fn load(reader: impl Read) -> Result<AdjGraph, FormatError> {
    load_with_logging(reader, no_logging![])
}

/// Loads a graph from a reader, logging progress on `pl`.
pub fn load_with_logging(
    mut reader: impl Read,
    pl: &mut impl ProgressLog,
) -> Result<AdjGraph, FormatError> {
    let num_nodes = read_i32(&mut reader, Field::NumNodes)?;
    let num_nodes =
        usize::try_from(num_nodes).map_err(|_| FormatError::NegativeNodeCount(num_nodes))?;

    pl.item_name("node");
    pl.expected_updates(Some(num_nodes));
    pl.start("Reading adjacency lists...");

    let mut graph = AdjGraph::new();
    for node in 0..num_nodes {
        let degree = read_i32(&mut reader, Field::Outdegree { node })?;
        let degree =
            usize::try_from(degree).map_err(|_| FormatError::NegativeDegree { node, degree })?;
        let mut succ = Vec::with_capacity(degree.min(MAX_PREALLOC));
        for index in 0..degree {
            let v = read_i32(&mut reader, Field::Successor { node, index })?;
            match usize::try_from(v) {
                Ok(v) if v < num_nodes => succ.push(v),
                _ => {
                    return Err(FormatError::SuccessorOutOfRange {
                        node,
                        succ: v,
                        num_nodes,
                    });
                }
            }
        }
        graph.push_node(succ);
        pl.light_update();
    }
    pl.done();

    Ok(graph)
}

/// Loads a graph from a file.
pub fn load_file(path: impl AsRef<Path>) -> Result<AdjGraph, FormatError> {
    load_file_with_logging(path, no_logging![])
}

/// Loads a graph from a file, logging progress on `pl`.
pub fn load_file_with_logging(
    path: impl AsRef<Path>,
    pl: &mut impl ProgressLog,
) -> Result<AdjGraph, FormatError> {
    let path = path.as_ref();
    log::info!("Loading adjacency lists from {}", path.display());
    let graph = load_with_logging(BufReader::new(File::open(path)?), pl)?;
    log::info!(
        "Loaded a graph with {} nodes and {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    );
    Ok(graph)
}

/// Stores a graph into a writer.
///
/// The writer should be buffered, as it is written four bytes at a time.
pub fn store(graph: &AdjGraph, mut writer: impl Write) -> Result<(), FormatError> {
    write_i32(&mut writer, graph.num_nodes())?;
    for (_, succ) in graph.iter() {
        write_i32(&mut writer, succ.len())?;
        for &v in succ {
            write_i32(&mut writer, v)?;
        }
    }
    Ok(())
}

/// Stores a graph into a file, overwriting it if it exists.
pub fn store_file(graph: &AdjGraph, path: impl AsRef<Path>) -> Result<(), FormatError> {
    let path = path.as_ref();
    log::info!(
        "Storing a graph with {} nodes and {} arcs at {}",
        graph.num_nodes(),
        graph.num_arcs(),
        path.display()
    );
    let mut writer = BufWriter::new(File::create(path)?);
    store(graph, &mut writer)?;
    writer.flush()?;
    Ok(())
}
