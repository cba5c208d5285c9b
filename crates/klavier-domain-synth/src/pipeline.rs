use crate::config::SynthConfig;
use crate::envelope::{apply_envelope, build_envelope};
use crate::filter::shape_register;
use crate::frequency::resolve_frequency;
use crate::hammer::apply_hammer;
use crate::harmonics::{render_harmonics, time_axis};
use crate::sanitize::sanitize_waveform;
use crate::stereo::widen_stereo;
use klavier_ports::synth::{
    NoteDiagnostics, NoteRequest, NoteSynthPort, RenderedNote, SynthError,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Renders one note through the fixed stage sequence: frequency resolution,
/// harmonic generation, hammer nonlinearity, envelope, spectral shaping,
/// stereo widening, sanitization. Pure and stateless; every buffer and the
/// random source live and die inside this call.
pub fn synthesize_note(
    request: &NoteRequest,
    cfg: &SynthConfig,
) -> Result<RenderedNote, SynthError> {
    validate_request(request)?;

    let mut rng = match request.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let resolved = resolve_frequency(request.midi_number, request.nyquist_hz(), cfg, &mut rng);

    let sample_count = request.sample_count();
    let t = time_axis(sample_count, request.duration_seconds);
    let mut mono = render_harmonics(&t, resolved.hz, request.midi_number, cfg, &mut rng);

    let degenerate_signal = apply_hammer(&mut mono, request.midi_number, cfg);

    let envelope = build_envelope(
        sample_count,
        request.sample_rate_hz,
        request.duration_seconds,
        cfg,
    );
    apply_envelope(&mut mono, &envelope);

    shape_register(&mut mono, request.midi_number, request.sample_rate_hz, cfg)?;

    let mut waveform = widen_stereo(&mono, cfg);
    let counts = sanitize_waveform(&mut waveform, cfg.clip_ceiling);
    if counts.non_finite > 0 || counts.clipped > 0 {
        log::warn!(
            "note {}: sanitized {} non-finite and {} out-of-range samples",
            request.midi_number,
            counts.non_finite,
            counts.clipped
        );
    }

    Ok(RenderedNote {
        waveform,
        diagnostics: NoteDiagnostics {
            clamped_frequency_hz: resolved.clamped.then_some(resolved.hz),
            degenerate_signal,
            non_finite_samples: counts.non_finite,
            clipped_samples: counts.clipped,
        },
    })
}

fn validate_request(request: &NoteRequest) -> Result<(), SynthError> {
    if request.sample_rate_hz == 0 {
        return Err(SynthError::InvalidRequest(
            "sample rate must be positive".to_string(),
        ));
    }
    if !request.duration_seconds.is_finite() || request.duration_seconds <= 0.0 {
        return Err(SynthError::InvalidRequest(format!(
            "duration {} s must be positive and finite",
            request.duration_seconds
        )));
    }
    Ok(())
}

/// The additive-synthesis engine behind [`NoteSynthPort`]: a voicing
/// configuration and nothing else, so a single instance can render notes
/// from any number of threads at once.
pub struct AdditiveSynth {
    config: SynthConfig,
}

impl AdditiveSynth {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SynthConfig {
        &self.config
    }
}

impl Default for AdditiveSynth {
    fn default() -> Self {
        Self::new(SynthConfig::default())
    }
}

impl NoteSynthPort for AdditiveSynth {
    fn render_note(&self, request: &NoteRequest) -> Result<RenderedNote, SynthError> {
        synthesize_note(request, &self.config)
    }
}
