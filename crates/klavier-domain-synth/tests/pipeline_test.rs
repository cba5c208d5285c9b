use klavier_domain_synth::{synthesize_note, AdditiveSynth, SynthConfig};
use klavier_ports::synth::{NoteRequest, NoteSynthPort, SynthError};

fn request(midi: u8, sample_rate_hz: u32, duration_seconds: f64, seed: u64) -> NoteRequest {
    NoteRequest {
        midi_number: midi,
        sample_rate_hz,
        duration_seconds,
        seed: Some(seed),
    }
}

fn assert_bounded(samples: &[f32]) {
    for sample in samples {
        assert!(sample.is_finite(), "non-finite sample survived sanitization");
        assert!(sample.abs() <= 0.99, "sample {sample} out of bounds");
    }
}

#[test]
fn seeded_render_is_reproducible() {
    let cfg = SynthConfig::default();
    let req = request(69, 44_100, 1.0, 42);
    let first = synthesize_note(&req, &cfg).unwrap();
    let second = synthesize_note(&req, &cfg).unwrap();
    assert_eq!(first.waveform, second.waveform);
}

#[test]
fn different_seeds_give_different_waveforms() {
    let cfg = SynthConfig::default();
    let first = synthesize_note(&request(69, 22_050, 0.8, 1), &cfg).unwrap();
    let second = synthesize_note(&request(69, 22_050, 0.8, 2), &cfg).unwrap();
    assert_ne!(first.waveform, second.waveform);
}

#[test]
fn output_length_is_the_rounded_product() {
    let cfg = SynthConfig::default();

    // 44100 * 0.777 = 34265.7, rounds up
    let rendered = synthesize_note(&request(60, 44_100, 0.777, 1), &cfg).unwrap();
    assert_eq!(rendered.waveform.left.len(), 34_266);
    assert_eq!(rendered.waveform.right.len(), 34_266);

    let rendered = synthesize_note(&request(60, 8_000, 0.1, 1), &cfg).unwrap();
    assert_eq!(rendered.waveform.len(), 800);
}

#[test]
fn samples_stay_bounded_across_registers_rates_and_durations() {
    let cfg = SynthConfig::default();
    for &midi in &[0u8, 21, 59, 60, 69, 108, 127] {
        for &(sample_rate, duration) in &[(8_000u32, 0.1f64), (44_100, 1.0), (96_000, 0.35)] {
            let rendered = synthesize_note(&request(midi, sample_rate, duration, 7), &cfg)
                .unwrap_or_else(|err| panic!("note {midi} at {sample_rate} Hz failed: {err}"));
            let expected = (sample_rate as f64 * duration).round() as usize;
            assert_eq!(rendered.waveform.len(), expected);
            assert_bounded(&rendered.waveform.left);
            assert_bounded(&rendered.waveform.right);
        }
    }
}

#[test]
fn survives_extreme_rate_and_duration() {
    let cfg = SynthConfig::default();
    let rendered = synthesize_note(&request(69, 192_000, 10.0, 3), &cfg).unwrap();
    assert_eq!(rendered.waveform.len(), 1_920_000);
    assert_bounded(&rendered.waveform.left);
    assert_bounded(&rendered.waveform.right);
}

#[test]
fn extreme_notes_at_low_rate_clamp_and_stay_valid() {
    let cfg = SynthConfig::default();
    for &midi in &[0u8, 127] {
        let rendered = synthesize_note(&request(midi, 8_000, 0.5, 11), &cfg).unwrap();
        assert!(
            rendered.diagnostics.clamped_frequency_hz.is_some(),
            "note {midi} should clamp its fundamental"
        );
        assert_eq!(rendered.waveform.len(), 4_000);
        assert_bounded(&rendered.waveform.left);
        assert_bounded(&rendered.waveform.right);
    }
}

#[test]
fn channels_are_distinct() {
    let cfg = SynthConfig::default();
    let rendered = synthesize_note(&request(60, 44_100, 1.0, 42), &cfg).unwrap();
    let distance: f64 = rendered
        .waveform
        .left
        .iter()
        .zip(&rendered.waveform.right)
        .map(|(l, r)| ((l - r) as f64).powi(2))
        .sum();
    assert!(distance > 0.0, "stereo widening produced identical channels");
}

#[test]
fn short_duration_still_renders_full_length() {
    // Below the 505 ms attack/decay/release budget.
    let cfg = SynthConfig::default();
    let rendered = synthesize_note(&request(60, 44_100, 0.25, 5), &cfg).unwrap();
    assert_eq!(rendered.waveform.len(), 11_025);
    assert_bounded(&rendered.waveform.left);
    assert_bounded(&rendered.waveform.right);
}

#[test]
fn unseeded_request_renders() {
    let cfg = SynthConfig::default();
    let req = NoteRequest {
        midi_number: 60,
        sample_rate_hz: 22_050,
        duration_seconds: 0.6,
        seed: None,
    };
    let rendered = synthesize_note(&req, &cfg).unwrap();
    assert_eq!(rendered.waveform.len(), 13_230);
    assert_bounded(&rendered.waveform.left);
}

#[test]
fn zero_sample_rate_is_rejected() {
    let cfg = SynthConfig::default();
    let req = NoteRequest {
        midi_number: 60,
        sample_rate_hz: 0,
        duration_seconds: 1.0,
        seed: Some(1),
    };
    let err = synthesize_note(&req, &cfg).unwrap_err();
    assert!(matches!(err, SynthError::InvalidRequest(_)));
}

#[test]
fn bad_durations_are_rejected() {
    let cfg = SynthConfig::default();
    for duration in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let req = NoteRequest {
            midi_number: 60,
            sample_rate_hz: 44_100,
            duration_seconds: duration,
            seed: Some(1),
        };
        let err = synthesize_note(&req, &cfg).unwrap_err();
        assert!(matches!(err, SynthError::InvalidRequest(_)));
    }
}

#[test]
fn port_render_matches_free_function() {
    let synth = AdditiveSynth::default();
    let req = NoteRequest {
        midi_number: 72,
        sample_rate_hz: 22_050,
        duration_seconds: 0.8,
        seed: Some(9),
    };
    let via_port = synth.render_note(&req).unwrap();
    let direct = synthesize_note(&req, synth.config()).unwrap();
    assert_eq!(via_port.waveform, direct.waveform);
}
