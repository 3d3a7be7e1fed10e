use anyhow::{Context, Result};
use clap::Parser;
use srtfix::config::{Config, LineEnding};
use srtfix::pipeline::{self, ConvertConfig, Sink, Source};
use srtfix::subtitle::{Framerate, Time};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "srtfix")]
#[command(version, about = "Fix an SRT file's timings")]
#[command(long_about = "Apply a time shift and/or a framerate conversion to every subtitle in a SubRip (SRT) file.")]
struct Cli {
    /// Input file (omit or use '-' for stdin)
    #[arg(short, long, default_value = "-")]
    input: PathBuf,

    /// Output file (omit or use '-' for stdout)
    #[arg(short, long, default_value = "-")]
    output: PathBuf,

    /// Shift the subtitles, e.g. 2s, -1m30s, 500ms-, 0:00:01,500
    #[arg(short, long, allow_hyphen_values = true)]
    shift: Option<String>,

    /// Apply framerate conversion, e.g. 25/24 or 0.96
    #[arg(short, long)]
    framerate: Option<String>,

    /// Output line ending: crlf, lf
    #[arg(long)]
    line_ending: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

/// Validate the loaded configuration, then merge CLI flags over it.
fn prepare_convert_config(cli: &Cli, config: &Config) -> Result<ConvertConfig> {
    config
        .validate()
        .context("Configuration validation failed")?;
    build_convert_config(cli, config)
}

/// Merge CLI flags over the loaded configuration.
fn build_convert_config(cli: &Cli, config: &Config) -> Result<ConvertConfig> {
    let shift = cli
        .shift
        .as_deref()
        .or(config.shift.as_deref())
        .map(Time::parse)
        .transpose()
        .context("Invalid shift")?;

    let framerate = cli
        .framerate
        .as_deref()
        .or(config.framerate.as_deref())
        .map(Framerate::parse)
        .transpose()
        .context("Invalid framerate")?;

    let line_ending = match cli.line_ending {
        Some(ref value) => value
            .parse::<LineEnding>()
            .map_err(|e: String| anyhow::anyhow!(e))?,
        None => config.line_ending,
    };

    Ok(ConvertConfig {
        shift,
        framerate,
        line_ending,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    let convert_config = prepare_convert_config(&cli, &config)?;
    debug!("Conversion settings: {:?}", convert_config);

    let source = Source::from_arg(&cli.input);
    let sink = Sink::from_arg(&cli.output);

    let stats = pipeline::run(&source, &sink, &convert_config)
        .with_context(|| format!("Failed to convert {}", source))?;

    pipeline::log_summary(&stats);

    Ok(())
}
