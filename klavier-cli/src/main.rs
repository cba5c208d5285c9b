use clap::Parser;
use klavier_core::bank::{BankBuilder, BankConfig};
use klavier_core::report::export_report;
use klavier_domain_synth::AdditiveSynth;
use klavier_infra_bank_fs::{FsSettings, WavSampleBank};
use klavier_ports::storage::SettingsPort;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Offline piano sample-bank generator: renders each note of the requested
/// MIDI range to a stereo float WAV named after the note.
#[derive(Parser, Debug)]
#[command(name = "klavier", version, about)]
struct Args {
    /// Lowest MIDI note to render (default from settings, 21 = A0)
    #[arg(long)]
    low: Option<u8>,

    /// Highest MIDI note to render (default from settings, 108 = C8)
    #[arg(long)]
    high: Option<u8>,

    /// Output sample rate in Hz
    #[arg(long)]
    sample_rate: Option<u32>,

    /// Note duration in seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Base seed for a reproducible bank
    #[arg(long)]
    seed: Option<u64>,

    /// Directory the bank is written to
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Re-render notes that already exist in the bank
    #[arg(long)]
    force: bool,

    /// Write bank_report.json next to the generated samples
    #[arg(long)]
    report: bool,

    /// Persist the effective settings for future runs
    #[arg(long)]
    save_settings: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let store = FsSettings::default();
    let mut settings = match store.load_settings() {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("failed to load settings, using defaults: {err}");
            Default::default()
        }
    };

    if let Some(low) = args.low {
        settings.low_note = low;
    }
    if let Some(high) = args.high {
        settings.high_note = high;
    }
    if let Some(sample_rate) = args.sample_rate {
        settings.sample_rate_hz = sample_rate;
    }
    if let Some(duration) = args.duration {
        settings.duration_seconds = duration;
    }
    if let Some(seed) = args.seed {
        settings.seed = Some(seed);
    }
    if let Some(out_dir) = args.out_dir.as_ref() {
        settings.output_dir = Some(out_dir.display().to_string());
    }

    if args.save_settings {
        if let Err(err) = store.save_settings(&settings) {
            log::warn!("failed to save settings: {err}");
        }
    }

    let out_dir = settings
        .output_dir
        .as_deref()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("sounds"));

    let mut config = BankConfig::from_settings(&settings);
    config.overwrite = args.force;

    let builder = BankBuilder::new(
        Arc::new(AdditiveSynth::default()),
        Box::new(WavSampleBank::new(out_dir.clone())),
        config,
    );

    let report = match builder.build() {
        Ok(report) => report,
        Err(err) => {
            log::error!("bank generation failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "bank {}: {} generated, {} skipped, {} failed",
        out_dir.display(),
        report.generated,
        report.skipped,
        report.failed.len()
    );
    if report.non_finite_samples > 0 || report.clipped_samples > 0 {
        println!(
            "sanitized samples: {} non-finite, {} clipped",
            report.non_finite_samples, report.clipped_samples
        );
    }

    if args.report {
        if let Err(err) = export_report(&out_dir, &report) {
            log::error!("failed to write bank report: {err}");
            return ExitCode::FAILURE;
        }
    }

    if report.failed.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
