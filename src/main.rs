use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use std::time::Instant;

use clap::Parser;
use clap::ValueEnum;
use primer::DensityScheme;
use primer::Error;
use primer::Sieve;
use primer::SieveConfig;
use primer::Strategy;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogOutputFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DensityArg {
    OddOnly,
    Wheel6,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Flat below the configured threshold, segmented above it.
    Auto,
    Flat,
    Segmented,
}

/// Find all primes up to a limit (inclusive).
#[derive(Debug, Parser)]
#[clap(name = "primer", version)]
struct Args {
    /// Find all primes up to this number (inclusive).
    limit: u64,

    /// Optional: write the primes to this file, one per line.
    output_file: Option<PathBuf>,

    /// Optional path to a configuration file. Environment variables
    /// prefixed with PRIMER_ override it.
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// Override the configured density scheme.
    #[clap(long, value_enum)]
    density: Option<DensityArg>,

    #[clap(long, value_enum, default_value = "auto")]
    strategy: StrategyArg,

    #[clap(short = 'o', long = "output-format", value_enum, default_value = "pretty")]
    output_format: LogOutputFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let pretty = matches!(args.output_format, LogOutputFormat::Pretty);
    primer::logging::setup_logging("warn,primer=info", pretty);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "sieve failed");
            eprintln!("Error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Error> {
    let mut config = SieveConfig::new(args.config.as_deref())?;
    if let Some(density) = args.density {
        config.density = match density {
            DensityArg::OddOnly => DensityScheme::OddOnly,
            DensityArg::Wheel6 => DensityScheme::Wheel6,
        };
    }
    let sieve = Sieve::new(config)?;

    let strategy = match args.strategy {
        StrategyArg::Auto => sieve.strategy(args.limit),
        StrategyArg::Flat => Strategy::Flat,
        StrategyArg::Segmented => Strategy::Segmented,
    };

    let start = Instant::now();
    let report = sieve.compute_with(strategy, args.limit, args.output_file.as_deref())?;
    let elapsed = start.elapsed();

    println!("Primes found: {}", report.count);
    println!("Time elapsed: {}", format_elapsed(elapsed));

    match (&args.output_file, &report.warning) {
        (_, Some(warning)) => eprintln!("Warning: {warning}"),
        (Some(path), None) => println!("Primes written to: {}", path.display()),
        (None, None) => {}
    }

    Ok(())
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 1e-3 {
        format!("{:.2} microseconds", secs * 1e6)
    } else if secs < 1.0 {
        format!("{:.3} milliseconds", secs * 1e3)
    } else {
        format!("{:.6} seconds", secs)
    }
}
