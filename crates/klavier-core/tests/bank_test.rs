use klavier_core::bank::{BankBuilder, BankConfig, BankError};
use klavier_core::report::export_report;
use klavier_domain_synth::AdditiveSynth;
use klavier_ports::storage::{SampleSinkPort, StorageError};
use klavier_ports::synth::StereoWaveform;
use klavier_ports::types::NoteName;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Clone, Default)]
struct MemorySink {
    notes: Arc<Mutex<HashMap<String, StereoWaveform>>>,
}

impl SampleSinkPort for MemorySink {
    fn contains(&self, name: NoteName) -> bool {
        self.notes.lock().contains_key(&name.to_string())
    }

    fn store(
        &self,
        name: NoteName,
        _sample_rate_hz: u32,
        waveform: &StereoWaveform,
    ) -> Result<(), StorageError> {
        self.notes.lock().insert(name.to_string(), waveform.clone());
        Ok(())
    }
}

struct FailingSink;

impl SampleSinkPort for FailingSink {
    fn contains(&self, _name: NoteName) -> bool {
        false
    }

    fn store(
        &self,
        _name: NoteName,
        _sample_rate_hz: u32,
        _waveform: &StereoWaveform,
    ) -> Result<(), StorageError> {
        Err(StorageError::Io("disk full".to_string()))
    }
}

fn test_config() -> BankConfig {
    BankConfig {
        low_note: 60,
        high_note: 62,
        sample_rate_hz: 8_000,
        duration_seconds: 0.6,
        seed: Some(1),
        overwrite: false,
    }
}

fn builder(sink: MemorySink, config: BankConfig) -> BankBuilder {
    BankBuilder::new(Arc::new(AdditiveSynth::default()), Box::new(sink), config)
}

#[test]
fn renders_every_note_in_range() {
    let sink = MemorySink::default();
    let report = builder(sink.clone(), test_config()).build().unwrap();

    assert_eq!(report.generated, 3);
    assert_eq!(report.skipped, 0);
    assert!(report.failed.is_empty());

    let notes = sink.notes.lock();
    assert_eq!(notes.len(), 3);
    assert_eq!(notes["C4"].len(), 4_800);
    assert!(notes.contains_key("C#4"));
    assert!(notes.contains_key("D4"));
}

#[test]
fn existing_notes_are_skipped() {
    let sink = MemorySink::default();
    let stale = StereoWaveform {
        left: vec![0.0],
        right: vec![0.0],
    };
    sink.notes.lock().insert("C4".to_string(), stale.clone());

    let report = builder(sink.clone(), test_config()).build().unwrap();
    assert_eq!(report.generated, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(sink.notes.lock()["C4"], stale);
}

#[test]
fn overwrite_regenerates_existing_notes() {
    let sink = MemorySink::default();
    sink.notes.lock().insert(
        "C4".to_string(),
        StereoWaveform {
            left: vec![0.0],
            right: vec![0.0],
        },
    );

    let mut config = test_config();
    config.overwrite = true;
    let report = builder(sink.clone(), config).build().unwrap();

    assert_eq!(report.generated, 3);
    assert_eq!(report.skipped, 0);
    assert_eq!(sink.notes.lock()["C4"].len(), 4_800);
}

#[test]
fn seeded_banks_are_reproducible() {
    let first = MemorySink::default();
    builder(first.clone(), test_config()).build().unwrap();
    let second = MemorySink::default();
    builder(second.clone(), test_config()).build().unwrap();

    let first = first.notes.lock();
    let second = second.notes.lock();
    for (name, waveform) in first.iter() {
        assert_eq!(waveform, &second[name], "note {name} differs between runs");
    }
}

#[test]
fn invalid_ranges_are_rejected() {
    let mut config = test_config();
    config.low_note = 80;
    config.high_note = 60;
    let err = builder(MemorySink::default(), config).build().unwrap_err();
    assert!(matches!(err, BankError::InvalidRange { .. }));

    let mut config = test_config();
    config.high_note = 200;
    let err = builder(MemorySink::default(), config).build().unwrap_err();
    assert!(matches!(err, BankError::InvalidRange { .. }));
}

#[test]
fn sink_failures_are_recorded_per_note() {
    let builder = BankBuilder::new(
        Arc::new(AdditiveSynth::default()),
        Box::new(FailingSink),
        test_config(),
    );
    let report = builder.build().unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.failed.len(), 3);
    assert!(report.failed.iter().all(|f| f.error.contains("disk full")));
}

#[test]
fn report_exports_as_json() {
    let dir = tempfile::tempdir().unwrap();
    let report = builder(MemorySink::default(), test_config()).build().unwrap();
    export_report(dir.path(), &report).unwrap();

    let data = std::fs::read_to_string(dir.path().join("bank_report.json")).unwrap();
    assert!(data.contains("\"generated\": 3"));
    assert!(data.contains("\"low_note\": 60"));
}
