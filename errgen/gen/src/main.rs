//! errgen code generator
//!
//! Generates message constants, error constructors and their tests from an
//! error catalog.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use errgen_gen::config::GeneratorConfig;
use errgen_gen::errors::GeneratorError;
use errgen_gen::generate::generate;
use tracing::{Level, debug};
use tracing_subscriber::EnvFilter;

/// errgen - generates a typed error API from a JSON error catalog
#[derive(Parser, Debug)]
#[command(name = "errgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Error catalog (JSON)
    schema: PathBuf,

    /// TOML configuration with per-target overrides and extra fixtures
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the `<file>.header` and `<file>.footer` resources,
    /// replacing the builtin ones
    #[arg(short, long)]
    resources: Option<PathBuf>,

    /// Output directory, overriding the catalog's `path`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, GeneratorError> {
    let resources = cli.resources.as_deref();

    let mut config = match (&cli.config, resources) {
        (Some(path), _) => GeneratorConfig::from_toml_file(path, resources)?,
        (None, Some(dir)) => GeneratorConfig::with_resources(dir),
        (None, None) => GeneratorConfig::default(),
    };
    if let Some(output) = &cli.output {
        config.output = Some(output.clone());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<Vec<PathBuf>, GeneratorError> {
    let config = load_config(cli)?;
    debug!(?config, "resolved configuration");
    generate(&cli.schema, &config)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(paths) => {
            for path in paths {
                println!("{} {}", "generated".green().bold(), path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            // Every variant's message already ends with its cause.
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
