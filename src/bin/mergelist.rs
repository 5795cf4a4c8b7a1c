use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{bail, Context, Result};
use mergelist::harness::checks;
use mergelist::harness::cli::{BenchArgs, Cli, Command};
use mergelist::harness::timing::{self, TimingLog};
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .init();

    let mut rng = cli.rng();
    match &cli.command {
        Some(Command::Demo) => run_demo(&mut rng),
        Some(Command::Bench(args)) => run_bench(args, &mut rng),
        None => {
            run_demo(&mut rng)?;
            run_bench(&BenchArgs::default(), &mut rng)
        }
    }
}

fn run_demo(rng: &mut StdRng) -> Result<()> {
    let report = checks::run_demo(rng).context("demonstration checks aborted")?;
    for outcome in &report.outcomes {
        println!("{outcome}");
    }
    println!("{}", report.sort_seconds);

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{failed} of {} checks failed", report.outcomes.len());
    }
    Ok(())
}

fn run_bench(args: &BenchArgs, rng: &mut StdRng) -> Result<()> {
    let sweep = args.sweep();
    sweep.validate()?;

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create timing log: {:?}", args.output))?;
    let mut log = TimingLog::new(BufWriter::new(file));
    let written = timing::run_sweep(&sweep, rng, &mut log)
        .with_context(|| format!("Failed to write timing log: {:?}", args.output))?;
    log.into_inner()?
        .flush()
        .with_context(|| format!("Failed to flush timing log: {:?}", args.output))?;

    info!(samples = written, output = ?args.output, "timing log written");
    Ok(())
}
