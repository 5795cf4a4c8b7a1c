use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::timing::SweepConfig;

#[derive(Parser, Debug)]
#[command(name = "mergelist")]
#[command(version, about = "Linked list merge sort checks and timing sweep", long_about = None)]
pub struct Cli {
    /// What to run; without one, the checks run followed by the default sweep
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Seed for shuffling inputs, random if omitted
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the pass/fail checks against the list
    Demo,
    /// Time merge sort over growing input sizes and log them as CSV
    Bench(BenchArgs),
}

#[derive(clap::Args, Debug, Clone, PartialEq, Eq)]
pub struct BenchArgs {
    /// CSV file receiving `seconds,size` records
    #[arg(short, long, value_name = "FILE", default_value = "merge_sort.csv")]
    pub output: PathBuf,

    /// Smallest input size
    #[arg(long, default_value_t = SweepConfig::DEFAULT_START)]
    pub start: usize,

    /// Input size to stop before
    #[arg(long, default_value_t = SweepConfig::DEFAULT_END)]
    pub end: usize,

    /// Size increment between samples
    #[arg(long, default_value_t = 1)]
    pub step: usize,
}

impl Default for BenchArgs {
    fn default() -> Self {
        let sweep = SweepConfig::default();
        Self {
            output: PathBuf::from("merge_sort.csv"),
            start: sweep.start,
            end: sweep.end,
            step: sweep.step,
        }
    }
}

impl BenchArgs {
    pub fn sweep(&self) -> SweepConfig {
        SweepConfig {
            start: self.start,
            end: self.end,
            step: self.step,
        }
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// the log filter used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
