use crate::config::SynthConfig;

/// Note-dependent power-law nonlinearity approximating hammer impact
/// dynamics, followed by a rescale to the configured peak. Returns true when
/// the waveform was all-zero and the rescale had to be skipped.
pub fn apply_hammer(wave: &mut [f64], midi_number: u8, cfg: &SynthConfig) -> bool {
    let hardness =
        cfg.hammer_hardness_base + (midi_number as f64 - 60.0) / 60.0 * cfg.hammer_hardness_span;
    let exponent = 1.0 + hardness;
    for sample in wave.iter_mut() {
        *sample = sample.signum() * sample.abs().powf(exponent);
    }

    let peak = wave.iter().fold(0.0f64, |peak, s| peak.max(s.abs()));
    if peak <= 0.0 {
        log::debug!("note {midi_number}: silent waveform, skipping hammer rescale");
        return true;
    }

    let scale = cfg.peak_target / peak;
    for sample in wave.iter_mut() {
        *sample *= scale;
    }
    false
}
