use crate::config::SynthConfig;
use rand::rngs::SmallRng;
use rand::Rng;

pub struct ResolvedFrequency {
    pub hz: f64,
    pub clamped: bool,
}

/// MIDI number to fundamental frequency, with a small random detune for a
/// natural spread between renders. Frequencies that leave the usable band
/// are clamped and reported; this is the only stage that silently corrects
/// out-of-range input.
pub fn resolve_frequency(
    midi_number: u8,
    nyquist_hz: f64,
    cfg: &SynthConfig,
    rng: &mut SmallRng,
) -> ResolvedFrequency {
    let jitter = rng.random_range(-cfg.detune_semitones..=cfg.detune_semitones);
    let raw = 440.0 * 2f64.powf((midi_number as f64 - 69.0 + jitter) / 12.0);

    let ceiling = nyquist_hz * 0.99;
    let floor = cfg.min_frequency_hz.min(ceiling);
    if raw >= floor && raw <= ceiling {
        return ResolvedFrequency {
            hz: raw,
            clamped: false,
        };
    }

    let hz = raw.clamp(floor, ceiling);
    log::warn!(
        "note {midi_number}: fundamental {raw:.1} Hz outside [{floor:.1}, {ceiling:.1}] Hz, clamped to {hz:.1} Hz"
    );
    ResolvedFrequency { hz, clamped: true }
}
