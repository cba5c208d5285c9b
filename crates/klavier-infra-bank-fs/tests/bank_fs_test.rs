use klavier_infra_bank_fs::{FsSettings, WavSampleBank};
use klavier_ports::storage::{SampleSinkPort, SettingsDto, SettingsPort};
use klavier_ports::synth::StereoWaveform;
use klavier_ports::types::NoteName;

#[test]
fn stored_note_round_trips_through_wav() {
    let dir = tempfile::tempdir().unwrap();
    let bank = WavSampleBank::new(dir.path().to_path_buf());
    let name = NoteName::from_midi(69);
    assert!(!bank.contains(name));

    let waveform = StereoWaveform {
        left: vec![0.1, -0.2, 0.3],
        right: vec![0.0, 0.5, -0.5],
    };
    bank.store(name, 44_100, &waveform).unwrap();
    assert!(bank.contains(name));

    let mut reader = hound::WavReader::open(dir.path().join("A4.wav")).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    assert_eq!(spec.bits_per_sample, 32);

    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, vec![0.1, 0.0, -0.2, 0.5, 0.3, -0.5]);
}

#[test]
fn settings_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSettings::new(dir.path().to_path_buf());

    let settings = SettingsDto {
        sample_rate_hz: 48_000,
        duration_seconds: 2.0,
        low_note: 36,
        high_note: 96,
        seed: Some(7),
        output_dir: Some("bank".to_string()),
    };
    store.save_settings(&settings).unwrap();

    let loaded = store.load_settings().unwrap();
    assert_eq!(loaded.sample_rate_hz, 48_000);
    assert_eq!(loaded.duration_seconds, 2.0);
    assert_eq!(loaded.low_note, 36);
    assert_eq!(loaded.high_note, 96);
    assert_eq!(loaded.seed, Some(7));
    assert_eq!(loaded.output_dir.as_deref(), Some("bank"));
}

#[test]
fn missing_settings_fall_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsSettings::new(dir.path().join("nope"));

    let settings = store.load_settings().unwrap();
    assert_eq!(settings.sample_rate_hz, 96_000);
    assert_eq!(settings.duration_seconds, 3.5);
    assert_eq!(settings.low_note, 21);
    assert_eq!(settings.high_note, 108);
    assert_eq!(settings.seed, None);
}
