use crate::report::BankReport;
use klavier_ports::storage::{SampleSinkPort, SettingsDto};
use klavier_ports::synth::{NoteRequest, NoteSynthPort};
use klavier_ports::types::{NoteName, Shared};
use parking_lot::Mutex;
use rayon::prelude::*;

#[derive(thiserror::Error, Debug)]
pub enum BankError {
    #[error("invalid note range {low}..={high}")]
    InvalidRange { low: u8, high: u8 },
}

#[derive(Clone, Copy, Debug)]
pub struct BankConfig {
    pub low_note: u8,
    pub high_note: u8,
    pub sample_rate_hz: u32,
    pub duration_seconds: f64,
    /// Base seed for reproducible banks; note `m` renders with
    /// `base.wrapping_add(m)` so notes stay decorrelated. `None` draws OS
    /// entropy per note.
    pub seed: Option<u64>,
    /// Re-render notes the sink already holds.
    pub overwrite: bool,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self::from_settings(&SettingsDto::default())
    }
}

impl BankConfig {
    pub fn from_settings(settings: &SettingsDto) -> Self {
        Self {
            low_note: settings.low_note,
            high_note: settings.high_note,
            sample_rate_hz: settings.sample_rate_hz,
            duration_seconds: settings.duration_seconds,
            seed: settings.seed,
            overwrite: false,
        }
    }
}

/// Renders a range of notes through the synth port into the sample sink,
/// one rayon task per note. Notes are independent, so the only shared state
/// is the report aggregate. A note that fails to render or store is
/// recorded and the rest of the bank continues.
pub struct BankBuilder {
    synth: Shared<dyn NoteSynthPort>,
    sink: Box<dyn SampleSinkPort>,
    config: BankConfig,
}

impl BankBuilder {
    pub fn new(
        synth: Shared<dyn NoteSynthPort>,
        sink: Box<dyn SampleSinkPort>,
        config: BankConfig,
    ) -> Self {
        Self {
            synth,
            sink,
            config,
        }
    }

    pub fn build(&self) -> Result<BankReport, BankError> {
        let cfg = self.config;
        if cfg.low_note > cfg.high_note || cfg.high_note > 127 {
            return Err(BankError::InvalidRange {
                low: cfg.low_note,
                high: cfg.high_note,
            });
        }

        let report = Mutex::new(BankReport::new(&cfg));
        (cfg.low_note..=cfg.high_note)
            .into_par_iter()
            .for_each(|midi| self.render_one(midi, &report));
        Ok(report.into_inner())
    }

    fn render_one(&self, midi: u8, report: &Mutex<BankReport>) {
        let cfg = &self.config;
        let name = NoteName::from_midi(midi);

        if !cfg.overwrite && self.sink.contains(name) {
            log::debug!("{name}: already in bank, skipping");
            report.lock().record_skipped();
            return;
        }

        let mut request = NoteRequest::new(midi);
        request.sample_rate_hz = cfg.sample_rate_hz;
        request.duration_seconds = cfg.duration_seconds;
        request.seed = cfg.seed.map(|base| base.wrapping_add(midi as u64));

        let rendered = match self.synth.render_note(&request) {
            Ok(rendered) => rendered,
            Err(err) => {
                log::error!("{name}: synthesis failed: {err}");
                report.lock().record_failed(midi, err.to_string());
                return;
            }
        };

        match self.sink.store(name, cfg.sample_rate_hz, &rendered.waveform) {
            Ok(()) => {
                log::info!("{name}: generated");
                report.lock().record_generated(&rendered.diagnostics);
            }
            Err(err) => {
                log::error!("{name}: store failed: {err}");
                report.lock().record_failed(midi, err.to_string());
            }
        }
    }
}
