use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use audio_features::config::AppConfig;
use audio_features::error::log_extraction_error;
use audio_features::fixtures::{read_wav, write_wav, SyntheticPattern, SyntheticSpec};
use audio_features::{FeatureExtractor, FeatureRecord};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(
    name = "feature_cli",
    about = "Extract track-level audio features from WAV files"
)]
struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract features from a WAV file and print a JSON report
    Extract {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
        /// JSON config overriding extraction parameters
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a synthetic WAV fixture
    Synth {
        #[arg(long, value_enum)]
        pattern: SyntheticPattern,
        #[arg(long)]
        output: PathBuf,
        #[arg(long, default_value_t = 440.0)]
        frequency: f64,
        #[arg(long, default_value_t = 1.0)]
        amplitude: f32,
        #[arg(long, default_value_t = 120.0)]
        bpm: f64,
        #[arg(long, default_value_t = 5.0)]
        duration: f64,
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,
        #[arg(long, default_value_t = 0)]
        seed: u64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands) -> Result<ExitCode> {
    match command {
        Commands::Extract {
            input,
            output,
            config,
        } => run_extract(&input, output, config),
        Commands::Synth {
            pattern,
            output,
            frequency,
            amplitude,
            bpm,
            duration,
            sample_rate,
            seed,
        } => {
            let spec = SyntheticSpec {
                pattern,
                frequency_hz: frequency,
                amplitude,
                bpm,
                seed,
            };
            run_synth(&spec, &output, duration, sample_rate)
        }
    }
}

fn run_extract(
    input: &Path,
    output_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let config = config_path
        .map(AppConfig::load_from_file)
        .unwrap_or_default();
    let extractor = FeatureExtractor::with_config(config.extraction);

    let audio = read_wav(input).context("could not analyze this file")?;
    let features = extractor
        .extract_samples(&audio.samples, audio.sample_rate)
        .inspect_err(|err| log_extraction_error(err, &input.display().to_string()))
        .context("could not analyze this file")?;

    let file = input.display().to_string();
    let report = FeatureReportPayload {
        file: &file,
        sample_rate: audio.sample_rate,
        sample_count: audio.samples.len(),
        features,
    };
    let json = if config.output.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };

    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(ExitCode::from(0))
}

fn run_synth(
    spec: &SyntheticSpec,
    output: &Path,
    duration: f64,
    sample_rate: u32,
) -> Result<ExitCode> {
    let audio = spec.render(sample_rate, duration);
    write_wav(output, &audio)?;
    tracing::info!(
        "Wrote {:?} fixture ({} samples @ {} Hz) to {}",
        spec.pattern,
        audio.samples.len(),
        sample_rate,
        output.display()
    );
    Ok(ExitCode::from(0))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureReportPayload<'a> {
    file: &'a str,
    sample_rate: u32,
    sample_count: usize,
    features: FeatureRecord,
}
