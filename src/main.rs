use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use gift_draw::config::Settings;
use gift_draw::core::{draw_forest, draw_forest_parallel, Matcher};
use gift_draw::services::{load_forest, write_table, InputFormat, OutputFormat};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

/// Draw gift-exchange recipients, keeping immediate family apart
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Configuration file, replaces config/default.toml and config/local.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Family file to draw from
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Format of the family file
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    /// Seed for a reproducible draw
    #[arg(long)]
    seed: Option<u64>,

    /// Attempts per family before giving up
    #[arg(long)]
    max_attempts: Option<usize>,

    /// Draw root families concurrently
    #[arg(long)]
    parallel: bool,

    /// How to print the results
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,

    /// Write results to this file instead of stdout
    #[arg(long)]
    out_file: Option<PathBuf>,
}

impl Cli {
    /// Flags win over configuration
    fn apply(self, settings: &mut Settings) {
        if let Some(input) = self.input {
            settings.input.path = input;
        }
        if let Some(format) = self.format {
            settings.input.format = format;
        }
        if let Some(seed) = self.seed {
            settings.matching.seed = Some(seed);
        }
        if let Some(max_attempts) = self.max_attempts {
            settings.matching.max_attempts = max_attempts;
        }
        if self.parallel {
            settings.matching.parallel = true;
        }
        if let Some(output) = self.output {
            settings.output.format = output;
        }
        if let Some(out_file) = self.out_file {
            settings.output.path = Some(out_file);
        }
    }
}

fn setup_logging(verbosity: u8, level: &str, format: &str) {
    use tracing_subscriber::EnvFilter;

    let level = match verbosity {
        0 => level.to_string(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    };

    let mut settings = match loaded {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let verbosity = cli.verbose;
    cli.apply(&mut settings);
    setup_logging(verbosity, &settings.logging.level, &settings.logging.format);

    info!("Configuration loaded successfully");

    let families = match load_forest(&settings.input.path, settings.input.format) {
        Ok(families) => families,
        Err(e) => {
            error!("Failed to load families: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let matcher = Matcher::new(settings.matching.max_attempts);
    let mut rng = match settings.matching.seed {
        Some(seed) => {
            info!("Using fixed seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let drawn = if settings.matching.parallel {
        draw_forest_parallel(&matcher, &families, &mut rng)
    } else {
        draw_forest(&matcher, &families, &mut rng)
    };

    let table = match drawn {
        Ok(table) => table,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = write_table(&table, settings.output.format, settings.output.path.as_deref()) {
        error!("Failed to write results: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
