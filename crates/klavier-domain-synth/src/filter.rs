use crate::config::SynthConfig;
use klavier_ports::synth::SynthError;
use std::f64::consts::{PI, TAU};

/// Low-pass cutoff selected for a note. Below the register split every note
/// shares one fixed cutoff; above it the cutoff falls linearly with pitch,
/// modeling high-frequency loss in short stiff strings. Both branches cap at
/// 99% of Nyquist. This policy is the contract; the filter realization below
/// is a design choice.
pub fn cutoff_hz(midi_number: u8, nyquist_hz: f64, cfg: &SynthConfig) -> f64 {
    let ceiling = nyquist_hz * 0.99;
    if midi_number < cfg.register_split {
        cfg.low_register_cutoff_hz.min(ceiling)
    } else {
        let above = (midi_number - cfg.register_split) as f64;
        (cfg.high_cutoff_base_hz - above * cfg.high_cutoff_slope_hz).min(ceiling)
    }
}

/// Register-dependent spectral shaping: low-pass the waveform at the policy
/// cutoff, then boost low-register notes.
pub fn shape_register(
    wave: &mut [f64],
    midi_number: u8,
    sample_rate_hz: u32,
    cfg: &SynthConfig,
) -> Result<(), SynthError> {
    let nyquist_hz = sample_rate_hz as f64 / 2.0;
    let cutoff = cutoff_hz(midi_number, nyquist_hz, cfg);
    let mut filter =
        ButterworthLowPass::design(cutoff, sample_rate_hz, cfg.filter_order, midi_number)?;
    filter.process(wave);

    if midi_number < cfg.register_split {
        for sample in wave.iter_mut() {
            *sample *= cfg.low_register_gain;
        }
    }
    Ok(())
}

/// Butterworth low-pass realized as cascaded biquad sections (one per
/// conjugate pole pair) plus a one-pole section for odd orders. Applied
/// causally, once, like any streaming IIR.
#[derive(Debug)]
pub struct ButterworthLowPass {
    one_pole: Option<OnePole>,
    biquads: Vec<Biquad>,
}

impl ButterworthLowPass {
    pub fn design(
        cutoff_hz: f64,
        sample_rate_hz: u32,
        order: u32,
        note: u8,
    ) -> Result<Self, SynthError> {
        let nyquist_hz = sample_rate_hz as f64 / 2.0;
        if order == 0 || !cutoff_hz.is_finite() || cutoff_hz <= 0.0 || cutoff_hz >= nyquist_hz {
            return Err(SynthError::FilterDesign {
                note,
                cutoff_hz,
                nyquist_hz,
            });
        }

        let sr = sample_rate_hz as f64;
        let mut biquads = Vec::with_capacity((order / 2) as usize);
        for k in 0..order / 2 {
            // Pole-pair Q values of the Butterworth prototype.
            let phi = (2.0 * k as f64 + 1.0) * PI / (2.0 * order as f64);
            let q = 1.0 / (2.0 * phi.sin());
            biquads.push(Biquad::lowpass(cutoff_hz, sr, q));
        }
        let one_pole = (order % 2 == 1).then(|| OnePole::lowpass(cutoff_hz, sr));

        Ok(Self { one_pole, biquads })
    }

    pub fn process(&mut self, wave: &mut [f64]) {
        for sample in wave.iter_mut() {
            let mut y = *sample;
            if let Some(one_pole) = self.one_pole.as_mut() {
                y = one_pole.process(y);
            }
            for biquad in self.biquads.iter_mut() {
                y = biquad.process(y);
            }
            *sample = y;
        }
    }
}

/// RBJ cookbook low-pass biquad, direct form I.
#[derive(Debug)]
struct Biquad {
    b0: f64,
    b1: f64,
    b2: f64,
    a1: f64,
    a2: f64,
    x1: f64,
    x2: f64,
    y1: f64,
    y2: f64,
}

impl Biquad {
    fn lowpass(cutoff_hz: f64, sample_rate_hz: f64, q: f64) -> Self {
        let omega = TAU * cutoff_hz / sample_rate_hz;
        let cos_omega = omega.cos();
        let alpha = omega.sin() / (2.0 * q);
        let a0 = 1.0 + alpha;

        Self {
            b0: ((1.0 - cos_omega) / 2.0) / a0,
            b1: (1.0 - cos_omega) / a0,
            b2: ((1.0 - cos_omega) / 2.0) / a0,
            a1: (-2.0 * cos_omega) / a0,
            a2: (1.0 - alpha) / a0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    fn process(&mut self, x: f64) -> f64 {
        let y = self.b0 * x + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;
        self.x2 = self.x1;
        self.x1 = x;
        self.y2 = self.y1;
        self.y1 = y;
        y
    }
}

#[derive(Debug)]
struct OnePole {
    coeff: f64,
    state: f64,
}

impl OnePole {
    fn lowpass(cutoff_hz: f64, sample_rate_hz: f64) -> Self {
        let a = (-TAU * cutoff_hz / sample_rate_hz).exp();
        Self {
            coeff: 1.0 - a,
            state: 0.0,
        }
    }

    fn process(&mut self, x: f64) -> f64 {
        self.state += self.coeff * (x - self.state);
        self.state
    }
}
