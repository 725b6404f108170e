//! Pitch classes and their equal-tempered frequencies
//!
//! Twelve pitch classes, each a fixed semitone offset from A4 = 440 Hz. A note
//! request is immutable and built fresh per keystroke; the frequency is the
//! only thing the synthesis path reads from it.

use std::fmt;

/// One of the twelve equal-tempered pitch classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    Cs,
    D,
    Ds,
    E,
    F,
    Fs,
    G,
    Gs,
    A,
    As,
    B,
}

/// Concert pitch reference: A4.
pub const A4_HZ: f32 = 440.0;

impl PitchClass {
    /// All twelve pitch classes in ascending order from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
    ];

    /// Semitone offset from A4 (C is 9 below, B is 2 above).
    pub fn semitones_from_a4(&self) -> i32 {
        match self {
            PitchClass::C => -9,
            PitchClass::Cs => -8,
            PitchClass::D => -7,
            PitchClass::Ds => -6,
            PitchClass::E => -5,
            PitchClass::F => -4,
            PitchClass::Fs => -3,
            PitchClass::G => -2,
            PitchClass::Gs => -1,
            PitchClass::A => 0,
            PitchClass::As => 1,
            PitchClass::B => 2,
        }
    }

    /// Equal-tempered frequency in Hz: `440 * 2^(semitones/12)`.
    pub fn frequency(&self) -> f32 {
        A4_HZ * 2f32.powf(self.semitones_from_a4() as f32 / 12.0)
    }

    /// Parse a pitch name; accidentals accept both spellings ("C#" or "Db").
    pub fn from_name(name: &str) -> Option<PitchClass> {
        match name {
            "C" => Some(PitchClass::C),
            "C#" | "Db" => Some(PitchClass::Cs),
            "D" => Some(PitchClass::D),
            "D#" | "Eb" => Some(PitchClass::Ds),
            "E" => Some(PitchClass::E),
            "F" => Some(PitchClass::F),
            "F#" | "Gb" => Some(PitchClass::Fs),
            "G" => Some(PitchClass::G),
            "G#" | "Ab" => Some(PitchClass::Gs),
            "A" => Some(PitchClass::A),
            "A#" | "Bb" => Some(PitchClass::As),
            "B" => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Display name with sharps, as shown in the live readout.
    pub fn name(&self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
        }
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
