//! Edge-list ingestion
//!
//! Parses the whitespace-separated text format the benchmark graphs use:
//! one `source sink capacity` triple per line. Every distinct label is
//! registered as a vertex in first-appearance order before any edge is
//! added, matching the construction contract of the core network.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use fluxion_core::{Capacity, FlowNetwork};

use crate::CliError;

/// One parsed line of an edge-list file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    pub source: String,
    pub sink: String,
    pub capacity: Capacity,
}

/// Reads and parses an edge-list file
pub fn read_edge_list(path: &Path) -> Result<Vec<EdgeRecord>, CliError> {
    let file = File::open(path)?;
    parse_edge_list(BufReader::new(file), &path.display().to_string())
}

/// Parses edge records from any line source
///
/// Blank lines are skipped; any other line must hold exactly three
/// whitespace-separated fields with an integral capacity. Errors carry the
/// one-based line number.
pub fn parse_edge_list<R: BufRead>(input: R, path: &str) -> Result<Vec<EdgeRecord>, CliError> {
    let mut records = Vec::new();
    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() != 3 {
            return Err(CliError::Parse {
                path: path.to_string(),
                line: index + 1,
                reason: format!("expected 3 fields, found {}", fields.len()),
            });
        }
        let capacity: Capacity = fields[2].parse().map_err(|_| CliError::Parse {
            path: path.to_string(),
            line: index + 1,
            reason: format!("capacity is not an integer: {}", fields[2]),
        })?;
        records.push(EdgeRecord {
            source: fields[0].to_string(),
            sink: fields[1].to_string(),
            capacity,
        });
    }
    Ok(records)
}

/// Builds a flow network from parsed records
///
/// Vertices are registered in first-appearance order, then edges are added
/// in file order, so the solver's path search scans them as written.
pub fn build_network(records: &[EdgeRecord]) -> Result<FlowNetwork<String>, CliError> {
    let mut network = FlowNetwork::new();
    for record in records {
        network.add_vertex(record.source.clone());
        network.add_vertex(record.sink.clone());
    }
    for record in records {
        network.add_edge(record.source.clone(), record.sink.clone(), record.capacity)?;
    }
    Ok(network)
}
