use crate::config::SynthConfig;
use klavier_ports::synth::StereoWaveform;

/// Derives left/right channels by mixing the mono signal with a circularly
/// rotated copy of itself. The two channels use different rotation amounts,
/// which is what creates the width illusion; the rotation wraps around
/// rather than zero-padding. Output narrows to f32 here, at the boundary.
pub fn widen_stereo(mono: &[f64], cfg: &SynthConfig) -> StereoWaveform {
    StereoWaveform {
        left: mix_rotated(mono, cfg.left_shift_samples, cfg),
        right: mix_rotated(mono, cfg.right_shift_samples, cfg),
    }
}

fn mix_rotated(mono: &[f64], shift: usize, cfg: &SynthConfig) -> Vec<f32> {
    let len = mono.len();
    if len == 0 {
        return Vec::new();
    }
    let shift = shift % len;
    (0..len)
        .map(|i| {
            let rotated = mono[(i + len - shift) % len];
            (cfg.dry_mix * mono[i] + cfg.shifted_mix * rotated) as f32
        })
        .collect()
}
