use klavier_ports::synth::StereoWaveform;

#[derive(Clone, Copy, Debug, Default)]
pub struct SanitizeCounts {
    pub non_finite: usize,
    pub clipped: usize,
}

/// Postcondition enforcement, always run last: non-finite samples become
/// zero, everything else is clipped to the ceiling. Downstream consumers
/// rely on bounded finite output no matter what the upstream stages did.
pub fn sanitize_waveform(waveform: &mut StereoWaveform, ceiling: f32) -> SanitizeCounts {
    let mut counts = SanitizeCounts::default();
    for channel in [&mut waveform.left, &mut waveform.right] {
        for sample in channel.iter_mut() {
            if !sample.is_finite() {
                *sample = 0.0;
                counts.non_finite += 1;
            } else if sample.abs() > ceiling {
                *sample = sample.clamp(-ceiling, ceiling);
                counts.clipped += 1;
            }
        }
    }
    counts
}
