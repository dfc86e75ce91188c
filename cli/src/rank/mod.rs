/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use crate::{FloatVectorFormat, GlobalArgs};
use anyhow::{Context, Result};
use clap::Args;
use dsi_progress_logger::{ProgressLog, progress_logger};
use pagerank_algo::prelude::*;
use pagerank_graph::prelude::*;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{Duration, Instant};

pub mod par;
pub mod seq;

/// Options shared by the sequential and parallel commands.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    /// Maximum number of iterations (positive); reaching it without
    /// converging is an error.
    pub max_iter: Option<usize>,

    #[arg(short, long)]
    /// Where to store the rank vector, besides printing it.
    pub output: Option<std::path::PathBuf>,

    #[arg(long, value_enum, default_value_t = FloatVectorFormat::Ascii)]
    /// The output format for the rank vector.
    pub fmt: FloatVectorFormat,

    #[arg(long)]
    /// Decimal digits for text output formats.
    pub precision: Option<usize>,
}

/// Prints a rank vector followed by the computation time.
pub fn print_ranks(mut writer: impl Write, rank: &[f64], elapsed: Duration) -> Result<()> {
    let mut buf = zmij::Buffer::new();
    writeln!(writer, "Pageranks:")?;
    for (i, r) in rank.iter().enumerate() {
        writeln!(writer, "Page {i}: {}", buf.format(*r))?;
    }
    writeln!(writer, "Execution time: {} milliseconds", elapsed.as_millis())?;
    writer.flush()?;
    Ok(())
}

/// Loads the graph at `input`, computes its PageRank and prints it.
pub fn pagerank(
    global_args: GlobalArgs,
    input: &Path,
    damping: f64,
    threshold: f64,
    execution: Execution,
    args: RunArgs,
) -> Result<()> {
    let threshold = L1Norm::try_from(threshold).context("Invalid convergence threshold")?;

    let mut pl = progress_logger![];
    pl.display_memory(true);
    if let Some(log_interval) = global_args.log_interval {
        pl.log_interval(log_interval);
    }

    let graph = adj::load_file_with_logging(input, &mut pl)
        .with_context(|| format!("Could not load the graph from {}", input.display()))?;

    let mut pr = PageRank::new(&graph);
    pr.alpha(damping)?
        .threshold(threshold)
        .max_iter(args.max_iter)
        .execution(execution);

    let start = Instant::now();
    pr.run_with_logging(&mut pl)?;
    let elapsed = start.elapsed();

    log::info!(
        "Completed after {} iteration(s), norm delta = {}",
        pr.iterations(),
        pr.norm_delta()
    );

    print_ranks(BufWriter::new(std::io::stdout().lock()), pr.rank(), elapsed)?;

    if let Some(output) = &args.output {
        args.fmt.store(output, pr.rank(), args.precision)?;
    }

    Ok(())
}
