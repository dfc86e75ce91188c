/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{GlobalArgs, num_threads_parser};
use anyhow::{Context, Result, ensure};
use clap::Parser;
use dsi_progress_logger::{ProgressLog, progress_logger};
use pagerank_algo::prelude::*;
use pagerank_graph::prelude::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(
    name = "bench",
    about = "Compares the running time of sequential and parallel PageRank.",
    long_about = None
)]
pub struct CliArgs {
    /// The graph, in binary adjacency-list format.
    pub input: PathBuf,

    /// The damping factor (must be in the open interval (0 . . 1)).
    pub damping: f64,

    /// The ℓ₁ convergence threshold (must be positive).
    pub threshold: f64,

    #[arg(long, value_delimiter = ',', default_values = ["2", "4", "8"], value_parser = num_threads_parser)]
    /// The numbers of threads of the parallel runs.
    pub threads: Vec<NonZeroUsize>,

    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u32).range(1..))]
    /// How many times each configuration is run; times are averaged.
    pub repeats: u32,

    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    /// Maximum number of iterations of each run (positive).
    pub max_iter: Option<usize>,
}

/// Runs a computation `repeats` times, returning the mean running time and
/// the last rank vector.
fn time_runs(
    graph: &AdjGraph,
    args: &CliArgs,
    threshold: &L1Norm,
    execution: Execution,
) -> Result<(Duration, Vec<f64>)> {
    let mut total = Duration::ZERO;
    let mut rank = Vec::new();
    for repeat in 0..args.repeats {
        let mut pr = PageRank::new(graph);
        pr.alpha(args.damping)?
            .threshold(threshold.clone())
            .max_iter(args.max_iter)
            .execution(execution);
        let start = Instant::now();
        pr.run()?;
        let elapsed = start.elapsed();
        log::info!(
            "{execution}, run {}: {} iterations in {} ms",
            repeat + 1,
            pr.iterations(),
            elapsed.as_millis()
        );
        total += elapsed;
        rank = pr.rank().to_vec();
    }
    Ok((total / args.repeats, rank))
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    let threshold = L1Norm::try_from(args.threshold).context("Invalid convergence threshold")?;

    let mut pl = progress_logger![];
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }
    let graph = adj::load_file_with_logging(&args.input, &mut pl)
        .with_context(|| format!("Could not load the graph from {}", args.input.display()))?;

    let (seq_time, seq_rank) = time_runs(&graph, &args, &threshold, Execution::Sequential)?;

    println!(
        "Graph: {} nodes, {} arcs",
        graph.num_nodes(),
        graph.num_arcs()
    );
    println!("Threads\tSequential (ms)\tParallel (ms)\tSpeedup");
    for &num_threads in &args.threads {
        let (par_time, par_rank) =
            time_runs(&graph, &args, &threshold, Execution::Parallel(num_threads))?;
        ensure!(
            par_rank == seq_rank,
            "The ranks computed with {num_threads} threads differ from the sequential ones"
        );
        println!(
            "{}\t{:.3}\t{:.3}\t{:.3}",
            num_threads,
            seq_time.as_secs_f64() * 1E3,
            par_time.as_secs_f64() * 1E3,
            seq_time.as_secs_f64() / par_time.as_secs_f64()
        );
    }

    Ok(())
}
