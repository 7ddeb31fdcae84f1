//! FLUXION command-line runner
//!
//! Thin wrapper around `fluxion-core`: reads an edge-list description of a
//! network, solves maximum flow between two labelled vertices with wall-time
//! measurement, regenerates benchmark graphs, and fixes up raw benchmark
//! output into a readable table. All algorithmic logic lives in the core
//! crate; this binary only moves bytes in and out.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

mod generate;
mod reader;
mod report;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use log::info;
use serde::Serialize;

use fluxion_core::{Flow, FlowError, MaxFlowSolver};

const USAGE: &str = "usage: fluxion <command> [args]

commands:
  solve <file> [--source S] [--sink T] [--json]
      read a whitespace-separated edge list (source sink capacity per line)
      and print the maximum flow and elapsed seconds
  generate <vertices> <density> <min-cap> <max-cap> <file> [--seed N]
      write a random benchmark graph as an edge list
  fixout <in-file> <out-file>
      reformat raw benchmark timing output into a fixed-width table";

/// Errors surfaced by the command-line layer
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error("{path}:{line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Usage(String),
}

/// Machine-readable result of a `solve` run
#[derive(Debug, Serialize)]
struct SolveReport {
    max_flow: Flow,
    elapsed_seconds: f64,
    augmentations: usize,
}

fn main() -> ExitCode {
    env_logger::init();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("fluxion: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), CliError> {
    match args.first().map(String::as_str) {
        Some("solve") => solve(&args[1..]),
        Some("generate") => generate::run(&args[1..]),
        Some("fixout") => report::run(&args[1..]),
        _ => Err(CliError::Usage(USAGE.to_string())),
    }
}

fn solve(args: &[String]) -> Result<(), CliError> {
    let mut path: Option<PathBuf> = None;
    let mut source = "s".to_string();
    let mut sink = "t".to_string();
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--source" => source = expect_value(&mut iter, "--source")?,
            "--sink" => sink = expect_value(&mut iter, "--sink")?,
            "--json" => json = true,
            _ if path.is_none() => path = Some(PathBuf::from(arg)),
            other => {
                return Err(CliError::Usage(format!("unexpected argument: {other}")));
            }
        }
    }
    let path = path.ok_or_else(|| CliError::Usage("solve: missing graph file".to_string()))?;

    let records = reader::read_edge_list(&path)?;
    info!("read {} edge(s) from {}", records.len(), path.display());
    let mut network = reader::build_network(&records)?;

    let mut solver = MaxFlowSolver::new();
    let start = Instant::now();
    let max_flow = solver.max_flow(&mut network, &source, &sink)?;
    let elapsed_seconds = start.elapsed().as_secs_f64();

    if json {
        let report = SolveReport {
            max_flow,
            elapsed_seconds,
            augmentations: solver.metrics().augmentations,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{max_flow}");
        println!("{elapsed_seconds}");
    }
    Ok(())
}

fn expect_value(iter: &mut std::slice::Iter<'_, String>, flag: &str) -> Result<String, CliError> {
    iter.next()
        .cloned()
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a value")))
}
