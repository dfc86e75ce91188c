/*
 * SPDX-FileCopyrightText: 2026 Inria
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use clap::Parser;
use pagerank_algo::prelude::RankError;
use pagerank_cli::{Cli, SubCommands, cli_main};
use pagerank_graph::prelude::*;

#[test]
fn test_gen_seq_par() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("graph.bin").display().to_string();
    let seq = dir.path().join("seq.txt").display().to_string();
    let par = dir.path().join("out").join("par.txt").display().to_string();

    cli_main(["pagerank", "gen", "100", "400", &graph, "--seed", "3"])?;
    let g = adj::load_file(&graph)?;
    assert_eq!(g.num_nodes(), 100);
    assert_eq!(g.num_arcs(), 400);

    cli_main(["pagerank", "seq", &graph, "0.85", "1e-9", "-o", &seq])?;
    for threads in ["1", "3", "8", "200"] {
        cli_main(["pagerank", "par", &graph, "0.85", "1e-9", threads, "-o", &par])?;
        assert_eq!(std::fs::read_to_string(&seq)?, std::fs::read_to_string(&par)?);
    }

    let ranks: Vec<f64> = std::fs::read_to_string(&seq)?
        .lines()
        .map(str::parse)
        .collect::<Result<_, _>>()?;
    assert_eq!(ranks.len(), 100);
    assert!(ranks.iter().all(|&r| r >= (1.0 - 0.85) / 100.0));
    Ok(())
}

#[test]
fn test_json_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("cycle.bin");
    adj::store_file(
        &AdjGraph::from_lists([vec![1], vec![2], vec![0]])?,
        &graph,
    )?;
    let graph = graph.display().to_string();
    let json = dir.path().join("ranks.json").display().to_string();
    cli_main([
        "pagerank", "seq", &graph, "0.85", "1e-6", "-o", &json, "--fmt", "json",
    ])?;
    let ranks: Vec<f64> = serde_json::from_str(&std::fs::read_to_string(&json)?)?;
    assert_eq!(ranks.len(), 3);
    assert!(ranks.iter().all(|r| (r - 1.0 / 3.0).abs() < 1E-9));
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("empty.bin");
    adj::store_file(&AdjGraph::new(), &graph)?;
    let graph = graph.display().to_string();
    cli_main(["pagerank", "seq", &graph, "0.85", "1e-6"])?;
    cli_main(["pagerank", "par", &graph, "0.85", "1e-6", "4"])?;
    Ok(())
}

#[test]
fn test_not_converged() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("graph.bin").display().to_string();
    cli_main(["pagerank", "gen", "50", "200", &graph])?;
    let err = cli_main([
        "pagerank", "par", &graph, "0.85", "1e-12", "2", "--max-iter", "2",
    ])
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<RankError>(),
        Some(RankError::NotConverged { iterations: 2, .. })
    ));
    Ok(())
}

#[test]
fn test_bench() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("graph.bin").display().to_string();
    cli_main(["pagerank", "gen", "60", "240", &graph])?;
    cli_main([
        "pagerank", "bench", &graph, "0.85", "1e-8", "--threads", "2,3", "--repeats", "2",
    ])?;
    Ok(())
}

#[test]
fn test_invalid_inputs() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let graph = dir.path().join("graph.bin").display().to_string();
    let missing = dir.path().join("missing.bin").display().to_string();
    cli_main(["pagerank", "gen", "10", "20", &graph])?;

    assert!(cli_main(["pagerank", "seq", &missing, "0.85", "1e-6"]).is_err());
    assert!(cli_main(["pagerank", "seq", &graph, "1.5", "1e-6"]).is_err());
    assert!(cli_main(["pagerank", "seq", &graph, "0.85", "0"]).is_err());
    assert!(cli_main(["pagerank", "gen", "3", "7", &graph]).is_err());

    std::fs::write(&graph, [0, 0, 0, 2, 0, 0, 0, 1])?;
    let err = cli_main(["pagerank", "seq", &graph, "0.85", "1e-6"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<FormatError>(),
        Some(FormatError::Truncated { .. })
    ));
    Ok(())
}

#[test]
fn test_argument_errors() {
    assert!(Cli::try_parse_from(["pagerank", "seq", "g.bin", "0.85"]).is_err());
    assert!(Cli::try_parse_from(["pagerank", "seq", "g.bin", "x", "1e-6"]).is_err());
    assert!(Cli::try_parse_from(["pagerank", "par", "g.bin", "0.85", "1e-6"]).is_err());
    assert!(Cli::try_parse_from(["pagerank", "par", "g.bin", "0.85", "1e-6", "0"]).is_err());
    assert!(Cli::try_parse_from(["pagerank", "seq", "g.bin", "0.85", "1e-6", "4"]).is_err());
    for command in ["seq", "bench"] {
        assert!(
            Cli::try_parse_from(["pagerank", command, "g.bin", "0.85", "1e-6", "--max-iter", "0"])
                .is_err()
        );
    }

    let cli = Cli::try_parse_from([
        "pagerank", "par", "g.bin", "0.5", "1e-3", "4", "--max-iter", "10",
    ])
    .unwrap();
    match cli.command {
        SubCommands::Par(args) => {
            assert_eq!(args.num_threads.get(), 4);
            assert_eq!(args.damping, 0.5);
            assert_eq!(args.threshold, 1e-3);
            assert_eq!(args.run.max_iter, Some(10));
        }
        other => panic!("unexpected command {other:?}"),
    }
}
