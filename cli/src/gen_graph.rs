/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{GlobalArgs, create_parent_dir};
use anyhow::{Context, Result};
use clap::Parser;
use dsi_progress_logger::{ProgressLog, progress_logger};
use pagerank_graph::prelude::*;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gen",
    about = "Generates a random graph without loops or duplicate arcs and stores it in binary adjacency-list format.",
    long_about = None
)]
pub struct CliArgs {
    /// The number of nodes.
    pub num_nodes: usize,

    /// The number of arcs.
    pub num_arcs: usize,

    /// Where to store the graph.
    pub output: PathBuf,

    #[arg(short, long, default_value_t = 0)]
    /// The seed of the pseudorandom number generator.
    pub seed: u64,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let graph =
        RandomArcs::new(args.num_nodes, args.num_arcs, args.seed).generate_with_logging(&mut pl)?;

    create_parent_dir(&args.output)?;
    adj::store_file(&graph, &args.output)
        .with_context(|| format!("Could not store the graph at {}", args.output.display()))?;
    log::info!(
        "Stored a graph with {} nodes and {} arcs at {}",
        graph.num_nodes(),
        graph.num_arcs(),
        args.output.display()
    );

    Ok(())
}
