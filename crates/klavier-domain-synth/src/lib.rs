pub mod config;
pub mod envelope;
pub mod filter;
pub mod frequency;
pub mod hammer;
pub mod harmonics;
pub mod pipeline;
pub mod sanitize;
pub mod stereo;

pub use config::SynthConfig;
pub use filter::cutoff_hz;
pub use pipeline::{synthesize_note, AdditiveSynth};
