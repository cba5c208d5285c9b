use klavier_ports::storage::{SampleSinkPort, SettingsDto, SettingsPort, StorageError};
use klavier_ports::synth::StereoWaveform;
use klavier_ports::types::NoteName;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FsSettings {
    base_dir: PathBuf,
}

impl FsSettings {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn default_base_dir() -> Result<PathBuf, StorageError> {
        let base = dirs_next::config_dir()
            .ok_or_else(|| StorageError::Io("config dir not found".to_string()))?;
        Ok(base.join("Klavier"))
    }

    fn settings_path(&self) -> PathBuf {
        self.base_dir.join("settings.json")
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
        let data = fs::read(path).map_err(|e| StorageError::Io(e.to_string()))?;
        serde_json::from_slice(&data).map_err(|e| StorageError::Serde(e.to_string()))
    }

    fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| StorageError::Io(e.to_string()))?;
        }
        let data =
            serde_json::to_vec_pretty(value).map_err(|e| StorageError::Serde(e.to_string()))?;
        fs::write(path, data).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl Default for FsSettings {
    fn default() -> Self {
        let base_dir = Self::default_base_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self { base_dir }
    }
}

impl SettingsPort for FsSettings {
    fn load_settings(&self) -> Result<SettingsDto, StorageError> {
        let path = self.settings_path();
        if !path.exists() {
            return Ok(SettingsDto::default());
        }
        Self::read_json(&path)
    }

    fn save_settings(&self, s: &SettingsDto) -> Result<(), StorageError> {
        let path = self.settings_path();
        Self::write_json(&path, s)
    }
}

/// Sample bank on the filesystem: one stereo 32-bit float WAV per note,
/// named after the note (`A0.wav` .. `C8.wav`).
pub struct WavSampleBank {
    dir: PathBuf,
}

impl WavSampleBank {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn sample_path(&self, name: NoteName) -> PathBuf {
        self.dir.join(format!("{name}.wav"))
    }
}

impl SampleSinkPort for WavSampleBank {
    fn contains(&self, name: NoteName) -> bool {
        self.sample_path(name).exists()
    }

    fn store(
        &self,
        name: NoteName,
        sample_rate_hz: u32,
        waveform: &StereoWaveform,
    ) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::Io(e.to_string()))?;

        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: sample_rate_hz,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let path = self.sample_path(name);
        let mut writer = hound::WavWriter::create(&path, spec)
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        for (left, right) in waveform.left.iter().zip(&waveform.right) {
            writer
                .write_sample(*left)
                .map_err(|e| StorageError::Encode(e.to_string()))?;
            writer
                .write_sample(*right)
                .map_err(|e| StorageError::Encode(e.to_string()))?;
        }
        writer
            .finalize()
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        log::debug!("{name}: wrote {}", path.display());
        Ok(())
    }
}
