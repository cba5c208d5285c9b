use crate::config::SynthConfig;

/// Four-segment amplitude envelope: cubic attack, exponential decay, linear
/// sustain ramp, exponential release. Segments are built independently,
/// concatenated, then forced to exactly `sample_count` samples. When the
/// requested duration is shorter than the attack/decay/release budget the
/// sustain segment collapses to zero length and the tail is truncated.
pub fn build_envelope(
    sample_count: usize,
    sample_rate_hz: u32,
    duration_seconds: f64,
    cfg: &SynthConfig,
) -> Vec<f64> {
    let sr = sample_rate_hz as f64;
    let mut env = Vec::with_capacity(sample_count);

    let attack_len = segment_len(sr, cfg.attack_seconds);
    env.extend(linspace(0.0, 1.0, attack_len).map(|v| v * v * v));

    let decay_len = segment_len(sr, cfg.decay_seconds);
    env.extend(linspace(0.0, cfg.decay_rate, decay_len).map(|v| (-v).exp() * cfg.decay_floor));

    let sustain_seconds = duration_seconds - cfg.envelope_budget_seconds();
    let sustain_len = if sustain_seconds > 0.0 {
        segment_len(sr, sustain_seconds)
    } else {
        0
    };
    env.extend(linspace(cfg.decay_floor, cfg.sustain_end, sustain_len));

    let release_len = segment_len(sr, cfg.release_seconds);
    env.extend(linspace(0.0, cfg.release_rate, release_len).map(|v| (-v).exp() * cfg.sustain_end));

    // Segment rounding can leave the envelope a few samples off; padding
    // repeats the release tail value rather than dropping to zero.
    let pad = env.last().copied().unwrap_or(0.0);
    env.resize(sample_count, pad);
    env
}

pub fn apply_envelope(wave: &mut [f64], envelope: &[f64]) {
    for (sample, gain) in wave.iter_mut().zip(envelope) {
        *sample *= gain;
    }
}

fn segment_len(sample_rate: f64, seconds: f64) -> usize {
    (sample_rate * seconds).round() as usize
}

fn linspace(start: f64, end: f64, len: usize) -> impl Iterator<Item = f64> {
    let step = if len > 1 {
        (end - start) / (len - 1) as f64
    } else {
        0.0
    };
    (0..len).map(move |i| start + step * i as f64)
}
