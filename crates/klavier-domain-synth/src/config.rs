use std::f64::consts::FRAC_PI_4;

/// Every tunable the pipeline reads, gathered in one structure so alternate
/// voicings can be rendered without touching stage code. The defaults are the
/// shipped piano voicing; none of them is derived from the string model.
#[derive(Clone, Debug)]
pub struct SynthConfig {
    /// Effective hammer hardness at middle C.
    pub hammer_hardness_base: f64,
    /// Hardness gained per 60 semitones above middle C (and lost below).
    pub hammer_hardness_span: f64,
    /// Peak absolute amplitude after the hammer-model rescale.
    pub peak_target: f64,

    /// Highest harmonic index summed by the generator (fundamental excluded).
    pub harmonic_count: u32,
    /// Inverse-power roll-off exponent applied per harmonic index.
    pub harmonic_rolloff: f64,
    /// Per-octave damping of upper harmonics as the register rises.
    pub register_damping: f64,
    /// Extra attenuation applied to every third harmonic.
    pub triad_ripple: f64,
    /// Std-dev of the per-harmonic mistuning added to each multiple.
    pub harmonic_jitter_std: f64,
    /// How much fundamental amplitude fades from note 21 to note 108.
    pub fundamental_taper: f64,
    /// Half-width of the per-note random detune, in semitones.
    pub detune_semitones: f64,

    pub inharmonic_partials: u32,
    /// Frequency multiple step between successive inharmonic partials.
    pub inharmonic_detune_step: f64,
    pub inharmonic_amp: f64,
    pub inharmonic_phase: f64,
    pub harmonic_mix: f64,
    pub inharmonic_mix: f64,

    pub attack_seconds: f64,
    pub decay_seconds: f64,
    /// Exponent reached at the end of the decay segment, `exp(-rate)`.
    pub decay_rate: f64,
    /// Level the decay segment is scaled to; also where the sustain starts.
    pub decay_floor: f64,
    /// Level the sustain ramp ends at; also scales the release segment.
    pub sustain_end: f64,
    pub release_seconds: f64,
    pub release_rate: f64,

    /// Note number splitting the low and high spectral-shaping branches.
    pub register_split: u8,
    pub low_register_cutoff_hz: f64,
    pub low_register_gain: f64,
    pub high_cutoff_base_hz: f64,
    /// Cutoff lost per semitone above the register split.
    pub high_cutoff_slope_hz: f64,
    pub filter_order: u32,

    pub left_shift_samples: usize,
    pub right_shift_samples: usize,
    pub dry_mix: f64,
    pub shifted_mix: f64,

    /// Floor the clamped fundamental is raised to.
    pub min_frequency_hz: f64,
    /// Hard bound enforced on every output sample by the sanitizer.
    pub clip_ceiling: f32,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            hammer_hardness_base: 0.9,
            hammer_hardness_span: 0.2,
            peak_target: 0.9,

            harmonic_count: 15,
            harmonic_rolloff: 1.2,
            register_damping: 0.9,
            triad_ripple: 0.1,
            harmonic_jitter_std: 0.2,
            fundamental_taper: 0.3,
            detune_semitones: 0.02,

            inharmonic_partials: 3,
            inharmonic_detune_step: 0.03,
            inharmonic_amp: 0.05,
            inharmonic_phase: FRAC_PI_4,
            harmonic_mix: 0.8,
            inharmonic_mix: 0.2,

            attack_seconds: 0.005,
            decay_seconds: 0.2,
            decay_rate: 5.0,
            decay_floor: 0.7,
            sustain_end: 0.4,
            release_seconds: 0.3,
            release_rate: 8.0,

            register_split: 60,
            low_register_cutoff_hz: 5_000.0,
            low_register_gain: 1.2,
            high_cutoff_base_hz: 10_000.0,
            high_cutoff_slope_hz: 100.0,
            filter_order: 5,

            left_shift_samples: 500,
            right_shift_samples: 700,
            dry_mix: 0.9,
            shifted_mix: 0.1,

            min_frequency_hz: 20.0,
            clip_ceiling: 0.99,
        }
    }
}

impl SynthConfig {
    /// Seconds the attack, decay, and release segments claim together; the
    /// sustain ramp covers whatever the note duration leaves beyond this.
    pub fn envelope_budget_seconds(&self) -> f64 {
        self.attack_seconds + self.decay_seconds + self.release_seconds
    }
}
