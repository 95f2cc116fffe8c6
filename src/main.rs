// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! tribvh - report which triangles of a batch intersect another triangle.

use std::{
    io::{self, BufReader},
    path::PathBuf,
};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tribvh::{
    Bvh, BvhConfig, TriTriIntersector, TriangleBatch, find_intersecting_brute_force,
    find_intersecting_with,
    io::{RandomBatchConfig, random_triangles, read_triangles, read_triangles_path},
};

#[derive(Parser, Debug)]
#[command(name = "tribvh", version, about)]
struct Cli {
    /// Read triangles from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Test every pair directly instead of building a BVH
    #[arg(long)]
    brute_force: bool,

    /// Tolerance of the intersection predicate
    #[arg(long, value_parser = positive_finite)]
    epsilon: Option<f64>,

    /// SAH cost charged per internal node
    #[arg(long, default_value_t = 2.0)]
    traversal_cost: f64,

    /// SAH cost per triangle of imbalance between split halves
    #[arg(long, default_value_t = 0.1)]
    balance_penalty: f64,

    /// -v for debug, -vv for trace (ignored when RUST_LOG is set)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a random batch in the input format
    Generate {
        /// Number of triangles
        #[arg(short = 'n', long, default_value_t = 1000)]
        count: usize,

        /// Seed for a reproducible batch
        #[arg(long)]
        seed: Option<u64>,

        /// Triangle centres lie in [-extent, extent]^3
        #[arg(long, default_value_t = 100.0, value_parser = non_negative_finite)]
        extent: f64,

        /// Vertices lie within [-size, size]^3 of their centre
        #[arg(long, default_value_t = 1.0, value_parser = non_negative_finite)]
        size: f64,
    },
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let v: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

fn positive_finite(s: &str) -> Result<f64, String> {
    match parse_finite(s)? {
        v if v > 0.0 => Ok(v),
        _ => Err(format!("{s} must be greater than zero")),
    }
}

fn non_negative_finite(s: &str) -> Result<f64, String> {
    match parse_finite(s)? {
        v if v >= 0.0 => Ok(v),
        _ => Err(format!("{s} must not be negative")),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Generate {
            count,
            seed,
            extent,
            size,
        }) => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let config = RandomBatchConfig { extent, size };
            let batch: TriangleBatch<f64> = random_triangles(count, &config, &mut rng);
            tribvh::io::write_triangles(&batch, io::stdout().lock())
                .context("failed to write batch")?;
        }
        None => check(&cli)?,
    }
    Ok(())
}

fn check(cli: &Cli) -> anyhow::Result<()> {
    let batch: TriangleBatch<f64> = match &cli.input {
        Some(path) => read_triangles_path(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => read_triangles(BufReader::new(io::stdin().lock()))
            .context("failed to read triangles from stdin")?,
    };
    info!(triangles = batch.len(), "batch loaded");

    if batch.is_empty() {
        return Ok(());
    }

    let predicate = match cli.epsilon {
        Some(eps) => TriTriIntersector::with_tolerance(eps),
        None => TriTriIntersector::default(),
    };

    let found = if cli.brute_force {
        debug!("brute-force search");
        find_intersecting_brute_force(batch.as_slice(), &predicate)
    } else {
        let config = BvhConfig {
            traversal_cost: cli.traversal_cost,
            balance_penalty: cli.balance_penalty,
        };
        let bvh = Bvh::build_with(batch.into_vec(), &config)?;
        find_intersecting_with(&bvh, &predicate)
    };
    info!(intersecting = found.len(), "search finished");

    tribvh::io::write_indices(&found, io::stdout().lock()).context("failed to write indices")?;
    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epsilon_must_be_positive_and_finite() {
        assert_eq!(positive_finite("1e-3"), Ok(1e-3));
        for bad in ["0", "-1e-8", "NaN", "inf", "-inf", "abc"] {
            assert!(positive_finite(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_extent_must_be_finite() {
        assert_eq!(non_negative_finite("0"), Ok(0.0));
        assert_eq!(non_negative_finite("250.5"), Ok(250.5));
        for bad in ["-1", "inf", "NaN"] {
            assert!(non_negative_finite(bad).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn test_flags_are_validated() {
        assert!(Cli::try_parse_from(["tribvh", "--epsilon", "-1e-8"]).is_err());
        assert!(Cli::try_parse_from(["tribvh", "--epsilon", "NaN"]).is_err());
        assert!(Cli::try_parse_from(["tribvh", "generate", "--extent", "inf"]).is_err());
        assert!(Cli::try_parse_from(["tribvh", "generate", "--size", "NaN"]).is_err());

        let cli = Cli::try_parse_from(["tribvh", "--epsilon", "1e-4", "--brute-force"]).unwrap();
        assert_eq!(cli.epsilon, Some(1e-4));
        assert!(cli.brute_force);
    }
}
