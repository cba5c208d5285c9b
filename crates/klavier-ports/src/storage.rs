use crate::synth::StereoWaveform;
use crate::types::NoteName;
use serde::{Deserialize, Serialize};

fn default_sample_rate_hz() -> u32 {
    96_000
}

fn default_duration_seconds() -> f64 {
    3.5
}

fn default_low_note() -> u8 {
    21
}

fn default_high_note() -> u8 {
    108
}

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(String),
    #[error("serialization error: {0}")]
    Serde(String),
    #[error("encode error: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsDto {
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,
    #[serde(default = "default_duration_seconds")]
    pub duration_seconds: f64,
    #[serde(default = "default_low_note")]
    pub low_note: u8,
    #[serde(default = "default_high_note")]
    pub high_note: u8,
    pub seed: Option<u64>,
    pub output_dir: Option<String>,
}

impl Default for SettingsDto {
    fn default() -> Self {
        Self {
            sample_rate_hz: 96_000,
            duration_seconds: 3.5,
            low_note: 21,
            high_note: 108,
            seed: None,
            output_dir: None,
        }
    }
}

pub trait SettingsPort: Send + Sync {
    fn load_settings(&self) -> Result<SettingsDto, StorageError>;
    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError>;
}

/// Persists rendered notes under their human-readable names. The sink owns
/// container format and layout; the synthesis core never touches files.
pub trait SampleSinkPort: Send + Sync {
    fn contains(&self, name: NoteName) -> bool;
    fn store(
        &self,
        name: NoteName,
        sample_rate_hz: u32,
        waveform: &StereoWaveform,
    ) -> Result<(), StorageError>;
}
