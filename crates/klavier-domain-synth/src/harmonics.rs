use crate::config::SynthConfig;
use rand::rngs::SmallRng;
use rand::Rng;
use std::f64::consts::TAU;

/// Evenly spaced time values from 0 to the note duration, both endpoints
/// included.
pub fn time_axis(sample_count: usize, duration_seconds: f64) -> Vec<f64> {
    if sample_count < 2 {
        return vec![0.0; sample_count];
    }
    let step = duration_seconds / (sample_count - 1) as f64;
    (0..sample_count).map(|i| i as f64 * step).collect()
}

/// Raw mono waveform: a tapered fundamental, mistuned upper harmonics with
/// an inverse-power roll-off, and a few phase-offset inharmonic partials
/// standing in for sympathetic string coupling.
pub fn render_harmonics(
    t: &[f64],
    frequency_hz: f64,
    midi_number: u8,
    cfg: &SynthConfig,
    rng: &mut SmallRng,
) -> Vec<f64> {
    let m = midi_number as f64;

    // Brighter at the low end of the keyboard, darker at the top.
    let fundamental_amp = 1.0 - (m - 21.0) / 87.0 * cfg.fundamental_taper;
    let w0 = TAU * frequency_hz;
    let mut harmonic: Vec<f64> = t.iter().map(|&ti| fundamental_amp * (w0 * ti).sin()).collect();

    let register_damp = cfg.register_damping.powf(m / 12.0);
    for n in 2..=cfg.harmonic_count {
        // String stiffness pushes each partial slightly off its integer
        // multiple; the offset is redrawn per harmonic per call.
        let multiple = n as f64 + cfg.harmonic_jitter_std * standard_normal(rng);
        let amp = (n as f64).powf(-cfg.harmonic_rolloff)
            * register_damp
            * (1.0 - cfg.triad_ripple * (n % 3) as f64);
        let wn = TAU * frequency_hz * multiple;
        for (sample, &ti) in harmonic.iter_mut().zip(t) {
            *sample += amp * (wn * ti).sin();
        }
    }

    let mut inharmonic = vec![0.0f64; t.len()];
    for k in 1..=cfg.inharmonic_partials {
        let wk = TAU * frequency_hz * (1.0 + cfg.inharmonic_detune_step * k as f64);
        for (sample, &ti) in inharmonic.iter_mut().zip(t) {
            *sample += cfg.inharmonic_amp * (wk * ti + cfg.inharmonic_phase).sin();
        }
    }

    harmonic
        .iter()
        .zip(&inharmonic)
        .map(|(h, i)| cfg.harmonic_mix * h + cfg.inharmonic_mix * i)
        .collect()
}

// Box-Muller over two uniform draws.
fn standard_normal(rng: &mut SmallRng) -> f64 {
    let u1 = rng.random::<f64>().max(f64::MIN_POSITIVE);
    let u2 = rng.random::<f64>();
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}
