/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::RunArgs;
use crate::GlobalArgs;
use anyhow::Result;
use clap::Parser;
use pagerank_algo::prelude::Execution;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "seq",
    about = "Computes PageRank on a single thread.",
    long_about = None
)]
pub struct CliArgs {
    /// The graph, in binary adjacency-list format.
    pub input: PathBuf,

    /// The damping factor (must be in the open interval (0 . . 1)).
    pub damping: f64,

    /// The ℓ₁ convergence threshold (must be positive).
    pub threshold: f64,

    #[clap(flatten)]
    pub run: RunArgs,
}

pub fn main(global_args: GlobalArgs, args: CliArgs) -> Result<()> {
    super::pagerank(
        global_args,
        &args.input,
        args.damping,
        args.threshold,
        Execution::Sequential,
        args.run,
    )
}
