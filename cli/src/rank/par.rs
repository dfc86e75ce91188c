/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::RunArgs;
use crate::{GlobalArgs, num_threads_parser};
use anyhow::Result;
use clap::Parser;
use pagerank_algo::prelude::Execution;
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "par",
    about = "Computes PageRank on a fixed number of threads, each updating a contiguous range of nodes.",
    long_about = None
)]
pub struct CliArgs {
    /// The graph, in binary adjacency-list format.
    pub input: PathBuf,

    /// The damping factor (must be in the open interval (0 . . 1)).
    pub damping: f64,

    /// The ℓ₁ convergence threshold (must be positive).
    pub threshold: f64,

    #[arg(value_parser = num_threads_parser)]
    /// The number of threads to use.
    pub num_threads: NonZeroUsize,

    #[clap(flatten)]
    pub run: RunArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    super::pagerank(
        global_args,
        &args.input,
        args.damping,
        args.threshold,
        Execution::Parallel(args.num_threads),
        args.run,
    )
}
