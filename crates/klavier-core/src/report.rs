use crate::bank::BankConfig;
use klavier_ports::storage::StorageError;
use klavier_ports::synth::NoteDiagnostics;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize)]
pub struct FailedNote {
    pub midi_number: u8,
    pub error: String,
}

/// Aggregate outcome of one bank run, including the recovered-anomaly
/// counters the per-note diagnostics carry.
#[derive(Clone, Debug, Serialize)]
pub struct BankReport {
    pub low_note: u8,
    pub high_note: u8,
    pub sample_rate_hz: u32,
    pub duration_seconds: f64,
    pub generated: usize,
    pub skipped: usize,
    pub failed: Vec<FailedNote>,
    pub clamped_frequencies: usize,
    pub degenerate_signals: usize,
    pub non_finite_samples: usize,
    pub clipped_samples: usize,
}

impl BankReport {
    pub(crate) fn new(cfg: &BankConfig) -> Self {
        Self {
            low_note: cfg.low_note,
            high_note: cfg.high_note,
            sample_rate_hz: cfg.sample_rate_hz,
            duration_seconds: cfg.duration_seconds,
            generated: 0,
            skipped: 0,
            failed: Vec::new(),
            clamped_frequencies: 0,
            degenerate_signals: 0,
            non_finite_samples: 0,
            clipped_samples: 0,
        }
    }

    pub(crate) fn record_generated(&mut self, diagnostics: &NoteDiagnostics) {
        self.generated += 1;
        if diagnostics.clamped_frequency_hz.is_some() {
            self.clamped_frequencies += 1;
        }
        if diagnostics.degenerate_signal {
            self.degenerate_signals += 1;
        }
        self.non_finite_samples += diagnostics.non_finite_samples;
        self.clipped_samples += diagnostics.clipped_samples;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn record_failed(&mut self, midi_number: u8, error: String) {
        self.failed.push(FailedNote { midi_number, error });
    }
}

pub fn export_report(dir: &Path, report: &BankReport) -> Result<(), StorageError> {
    fs::create_dir_all(dir).map_err(|e| StorageError::Io(e.to_string()))?;
    let data =
        serde_json::to_vec_pretty(report).map_err(|e| StorageError::Serde(e.to_string()))?;
    fs::write(dir.join("bank_report.json"), data).map_err(|e| StorageError::Io(e.to_string()))
}
