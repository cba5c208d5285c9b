use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("filter design failed for note {note}: cutoff {cutoff_hz} Hz outside (0, {nyquist_hz}) Hz")]
    FilterDesign {
        note: u8,
        cutoff_hz: f64,
        nyquist_hz: f64,
    },
}

/// One offline note to render. Immutable input to the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteRequest {
    pub midi_number: u8,
    pub sample_rate_hz: u32,
    pub duration_seconds: f64,
    /// Seeds the per-call random source. `None` draws OS entropy; a fixed
    /// seed makes the rendered waveform byte-for-byte reproducible.
    pub seed: Option<u64>,
}

impl NoteRequest {
    pub fn new(midi_number: u8) -> Self {
        Self {
            midi_number,
            sample_rate_hz: 96_000,
            duration_seconds: 3.5,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn sample_count(&self) -> usize {
        (self.sample_rate_hz as f64 * self.duration_seconds).round() as usize
    }

    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz as f64 / 2.0
    }
}

/// Final output of a synthesis call. Postcondition: both channels have the
/// same length, and every sample is finite and within [-0.99, 0.99].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StereoWaveform {
    pub left: Vec<f32>,
    pub right: Vec<f32>,
}

impl StereoWaveform {
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Recovered anomalies observed while rendering one note. None of these is
/// fatal; they are surfaced so callers can report them in aggregate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDiagnostics {
    /// Set when the fundamental left the valid spectrum and was clamped.
    pub clamped_frequency_hz: Option<f64>,
    /// The waveform was all-zero before the hammer-model rescale.
    pub degenerate_signal: bool,
    pub non_finite_samples: usize,
    pub clipped_samples: usize,
}

#[derive(Clone, Debug)]
pub struct RenderedNote {
    pub waveform: StereoWaveform,
    pub diagnostics: NoteDiagnostics,
}

/// Offline, one note per call: no voices, no streaming, no shared state.
/// Implementations are reentrant and safe to drive from multiple threads.
pub trait NoteSynthPort: Send + Sync {
    fn render_note(&self, request: &NoteRequest) -> Result<RenderedNote, SynthError>;
}
