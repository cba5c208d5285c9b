use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

const NOTE_LETTERS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Human-readable spelling of a MIDI note number, e.g. `A4` or `C#5`.
/// Octave numbering follows the MIDI convention: `octave = midi / 12 - 1`,
/// so note 21 is `A0` and note 108 is `C8`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteName(u8);

impl NoteName {
    pub fn from_midi(midi_number: u8) -> Self {
        Self(midi_number)
    }

    pub fn midi_number(self) -> u8 {
        self.0
    }

    pub fn letter(self) -> &'static str {
        NOTE_LETTERS[(self.0 % 12) as usize]
    }

    pub fn octave(self) -> i32 {
        (self.0 / 12) as i32 - 1
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter(), self.octave())
    }
}

pub type Shared<T> = Arc<T>;
