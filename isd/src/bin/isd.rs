use anyhow::Context;
use clap::Parser;
use gf2::BitVec;
use isd::io::{self, BitOrder};
use isd::{AlgorithmKind, Decoder, DecoderConfig, DecodingStep, Instance, SearchStats, StepParameters};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Searches for a low-weight error vector e with H·e = s.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Check matrix H, one row per line
    #[arg(long)]
    matrix: PathBuf,

    /// Syndrome s on its first non-empty line
    #[arg(long)]
    syndrome: PathBuf,

    /// Weight of the error vector
    #[arg(short, long)]
    weight: usize,

    /// isd, stern, mmt or fs-isd; overrides the configuration file
    #[arg(short, long)]
    algorithm: Option<AlgorithmKind>,

    /// TOML decoder configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Worker threads; 1 runs the sequential driver
    #[arg(short, long)]
    threads: Option<usize>,

    /// Seed of the permutation source
    #[arg(long)]
    seed: Option<u64>,

    /// Give up after this many permutations
    #[arg(long)]
    max_iterations: Option<u64>,

    /// Input and output lines list column 0 last
    #[arg(long)]
    reversed_bits: bool,

    /// Write the error vector here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,
}

impl Cli {
    fn decoder_config(&self) -> anyhow::Result<DecoderConfig> {
        let mut config = match &self.config {
            Some(path) => DecoderConfig::load(path)?,
            None => DecoderConfig::default(),
        };
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        config.threads = self.threads.or(config.threads);
        config.seed = self.seed.or(config.seed);
        config.max_iterations = self.max_iterations.or(config.max_iterations);
        Ok(config)
    }

    fn bit_order(&self) -> BitOrder {
        if self.reversed_bits {
            BitOrder::Reversed
        } else {
            BitOrder::Natural
        }
    }
}

#[derive(Serialize)]
struct Report<'a> {
    algorithm: &'static str,
    parameters: StepParameters,
    n: usize,
    k: usize,
    weight: usize,
    threads: usize,
    stats: Option<SearchStats>,
    duration_seconds: f64,
    error_vector: Option<&'a BitVec>,
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();
    let order = cli.bit_order();

    let check_matrix = io::read_check_matrix(&cli.matrix, order)
        .with_context(|| format!("loading check matrix {}", cli.matrix.display()))?;
    let syndrome = io::read_syndrome(&cli.syndrome, order)
        .with_context(|| format!("loading syndrome {}", cli.syndrome.display()))?;
    let instance = Instance::new(check_matrix, syndrome, cli.weight)?;

    let decoder = Decoder::new(cli.decoder_config()?)?;
    let algorithm = decoder.algorithm_for(&instance)?;
    let threads = decoder.config().thread_count();
    log::info!(
        "n={} k={} weight={} threads={threads} {}",
        instance.length(),
        instance.dimension(),
        instance.weight(),
        algorithm.parameters()
    );

    let started = Instant::now();
    let solution = if threads > 1 {
        decoder.decode_parallel(&instance)?
    } else {
        decoder.decode(&instance)?
    };
    let elapsed = started.elapsed();

    if let Some(path) = &cli.report {
        let report = Report {
            algorithm: algorithm.name(),
            parameters: algorithm.parameters(),
            n: instance.length(),
            k: instance.dimension(),
            weight: instance.weight(),
            threads,
            stats: solution.as_ref().map(|solution| solution.stats),
            duration_seconds: elapsed.as_secs_f64(),
            error_vector: solution.as_ref().map(|solution| &solution.error_vector),
        };
        let text = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, text).with_context(|| format!("writing report {}", path.display()))?;
    }

    let Some(solution) = solution else {
        log::warn!("no error vector found after {:.3}s", elapsed.as_secs_f64());
        return Ok(ExitCode::from(2));
    };
    let line = io::format_error_vector(&solution.error_vector, order);
    match &cli.output {
        Some(path) => {
            std::fs::write(path, format!("{line}\n")).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{line}"),
    }
    Ok(ExitCode::SUCCESS)
}
