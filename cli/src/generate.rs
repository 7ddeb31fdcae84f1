//! Random benchmark graph generation
//!
//! Emits edge lists for the timing sweeps: a symmetric random topology over
//! a source `s`, numbered interior vertices, and a sink `t`. Each unordered
//! vertex pair is included with the given percentage probability and both
//! directions are written, with a capacity drawn uniformly from the given
//! range. The generator is a seedable SplitMix64 so sweeps are repeatable.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use log::info;

use fluxion_core::Capacity;

use crate::CliError;

/// SplitMix64 generator (Sebastiano Vigna's public-domain mixer)
pub struct SplitMix64(u64);

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e3779b97f4a7c15);
        let mut x = self.0;
        x = (x ^ (x >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        x = (x ^ (x >> 27)).wrapping_mul(0x94d049bb133111eb);
        x ^ (x >> 31)
    }

    /// Uniform value in `[low, high]` (inclusive)
    pub fn range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        debug_assert!(low <= high);
        let width = high - low + 1;
        let reject_below = (u64::MAX - width + 1) % width;
        loop {
            let value = self.next_u64();
            if value >= reject_below {
                return low + value % width;
            }
        }
    }
}

pub fn run(args: &[String]) -> Result<(), CliError> {
    let (positional, seed) = split_seed(args)?;
    let [vertices, density, min_cap, max_cap, path] = positional.as_slice() else {
        return Err(CliError::Usage(
            "generate: expected <vertices> <density> <min-cap> <max-cap> <file> [--seed N]"
                .to_string(),
        ));
    };

    let vertices: usize = parse_arg(vertices, "vertices")?;
    let density: u64 = parse_arg(density, "density")?;
    let min_cap: u64 = parse_arg(min_cap, "min-cap")?;
    let max_cap: u64 = parse_arg(max_cap, "max-cap")?;
    if vertices < 2 {
        return Err(CliError::Usage(
            "generate: need at least a source and a sink".to_string(),
        ));
    }
    if min_cap > max_cap {
        return Err(CliError::Usage(
            "generate: min-cap must not exceed max-cap".to_string(),
        ));
    }

    let seed = match seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e3779b97f4a7c15),
    };

    let mut rng = SplitMix64::new(seed);
    let edges = build_edges(vertices, density, min_cap, max_cap, &mut rng);

    let mut output = BufWriter::new(File::create(path)?);
    for (u, v, capacity) in &edges {
        writeln!(output, "{u} {v} {capacity}")?;
    }
    info!(
        "wrote {} edge(s) over {} vertices to {} (seed {})",
        edges.len(),
        vertices,
        path,
        seed
    );
    Ok(())
}

/// Builds the symmetric random edge list
///
/// Vertex 0 is the source `s`, vertex `n - 1` the sink `t`, interior
/// vertices keep their numeric labels. Every unordered pair of distinct
/// vertices is kept with probability `density` percent, and a kept pair
/// contributes both directed edges with the same capacity.
pub fn build_edges(
    vertices: usize,
    density: u64,
    min_cap: u64,
    max_cap: u64,
    rng: &mut SplitMix64,
) -> Vec<(String, String, Capacity)> {
    let mut matrix = vec![vec![0u64; vertices]; vertices];
    for n in 0..vertices {
        for m in (n + 1)..vertices {
            let capacity = rng.range_inclusive(min_cap, max_cap);
            let keep = rng.range_inclusive(0, 99) < density;
            if keep {
                matrix[n][m] = capacity;
                matrix[m][n] = capacity;
            }
        }
    }

    let mut edges = Vec::new();
    for x in 0..vertices {
        for y in 0..vertices {
            if x == y || matrix[x][y] == 0 {
                continue;
            }
            edges.push((
                label(x, vertices),
                label(y, vertices),
                matrix[x][y] as Capacity,
            ));
        }
    }
    edges
}

fn label(index: usize, vertices: usize) -> String {
    if index == 0 {
        "s".to_string()
    } else if index == vertices - 1 {
        "t".to_string()
    } else {
        index.to_string()
    }
}

fn split_seed(args: &[String]) -> Result<(Vec<String>, Option<u64>), CliError> {
    let mut positional = Vec::new();
    let mut seed = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--seed" {
            let value = iter
                .next()
                .ok_or_else(|| CliError::Usage("--seed requires a value".to_string()))?;
            seed = Some(parse_arg(value, "seed")?);
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, seed))
}

fn parse_arg<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| {
        CliError::Usage(format!("generate: {name} is not a valid number: {value}"))
    })
}
