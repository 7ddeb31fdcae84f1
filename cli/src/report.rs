//! Benchmark report fix-up
//!
//! The benchmark harness emits its timings as repeating groups of three
//! raw lines (one per solver column) preceded by two header lines at the
//! top of the file. This module folds each group into one row of a
//! fixed-width table keyed by the capacity range of the run, ten ranges per
//! sweep. The solver names appear here as column labels only; this layer
//! has no algorithmic dependency on any of them.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::CliError;

const COLUMNS: [&str; 4] = [
    "Capacity Range",
    "Ford Fulkerson",
    "Scaling Ford Fulkerson",
    "Preflow Push",
];
const WIDTHS: [usize; 4] = [16, 18, 24, 16];

/// Number of capacity-range rows in one benchmark sweep
const ROWS_PER_SWEEP: u32 = 10;

pub fn run(args: &[String]) -> Result<(), CliError> {
    let [in_path, out_path] = args else {
        return Err(CliError::Usage(
            "fixout: expected <in-file> <out-file>".to_string(),
        ));
    };
    let input = BufReader::new(File::open(in_path)?);
    let output = BufWriter::new(File::create(out_path)?);
    fix_output(input, output, in_path)
}

/// Folds raw timing output into a fixed-width table
///
/// The first two input lines are skipped; thereafter every three lines
/// become one row. Each raw line's first whitespace-separated field is the
/// timing value in seconds.
pub fn fix_output<R: BufRead, W: Write>(
    input: R,
    mut output: W,
    path: &str,
) -> Result<(), CliError> {
    write_row(&mut output, &COLUMNS)?;

    let mut counter = 0u32;
    let mut row = 0u32;
    let mut cells: Vec<String> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if row == ROWS_PER_SWEEP {
            row = 0;
        }
        if counter <= 1 {
            counter += 1;
            continue;
        }

        let value = first_field(&line, path, index + 1)?;
        match counter {
            2 => {
                cells.push(format!("{}-100", 5 + 10 * row));
                cells.push(value);
                row += 1;
            }
            3 => cells.push(value),
            _ => {
                cells.push(value);
                let fields: Vec<&str> = cells.iter().map(String::as_str).collect();
                write_row(&mut output, &fields)?;
                cells.clear();
                counter = 1;
            }
        }
        counter += 1;
    }
    Ok(())
}

fn first_field(line: &str, path: &str, number: usize) -> Result<String, CliError> {
    let field = line.split_whitespace().next().ok_or_else(|| CliError::Parse {
        path: path.to_string(),
        line: number,
        reason: "expected a timing value".to_string(),
    })?;
    let value: f64 = field.parse().map_err(|_| CliError::Parse {
        path: path.to_string(),
        line: number,
        reason: format!("timing value is not a number: {field}"),
    })?;
    Ok(value.to_string())
}

fn write_row<W: Write>(output: &mut W, cells: &[&str]) -> Result<(), CliError> {
    let mut rendered = String::new();
    for (cell, width) in cells.iter().zip(WIDTHS) {
        // First column left-aligned, timing columns right-aligned.
        if rendered.is_empty() {
            rendered.push_str(&format!("{cell:<width$}"));
        } else {
            rendered.push_str(&format!("{cell:>width$}"));
        }
    }
    writeln!(output, "{}", rendered.trim_end())?;
    Ok(())
}
