// Shared pitch and rhythm model.
//
// All three generators emit the same event type: a Note carrying a semitone
// number, its equal-tempered frequency, a rhythmic figure, and the figure's
// duration at the run's tempo. Frequency and duration are derived at
// construction and never assigned independently — a Note is internally
// consistent by the only way one can be built.
//
// The duration ladder is anchored at the quarter note (figure index 4):
// one quarter = 60000 / tempo milliseconds, and each figure toward index 0
// doubles while each figure toward index 6 halves.

use crate::error::GenerateError;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The seven rhythmic figure classes, longest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Figure {
    Longa = 0,
    Breve = 1,
    Whole = 2,
    Half = 3,
    Quarter = 4,
    Eighth = 5,
    Sixteenth = 6,
}

impl Figure {
    pub const ALL: [Figure; 7] = [
        Figure::Longa,
        Figure::Breve,
        Figure::Whole,
        Figure::Half,
        Figure::Quarter,
        Figure::Eighth,
        Figure::Sixteenth,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Draw a figure uniformly. Every generator assigns figures this way,
    /// independently of pitch selection.
    pub fn random(rng: &mut impl Rng) -> Figure {
        Figure::ALL[rng.random_range(0..Figure::ALL.len())]
    }
}

/// Equal-tempered frequency of a semitone number, referenced to A4 = 440 Hz
/// at semitone 69. Accepts any integer, including values far outside
/// instrument range — callers that produce extreme pitches get extreme
/// frequencies, not errors.
pub fn frequency_of(pitch: i32) -> f64 {
    440.0 * 2f64.powf((pitch - 69) as f64 / 12.0)
}

/// Figure durations in milliseconds for one tempo. Built once per run,
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhythmTable {
    durations: [u32; 7],
}

impl RhythmTable {
    /// Build the duration ladder for a tempo in quarter notes per minute.
    /// A tempo of zero has no defined quarter duration and is rejected.
    pub fn new(tempo_bpm: u32) -> Result<RhythmTable, GenerateError> {
        if tempo_bpm == 0 {
            return Err(GenerateError::InvalidTempo(tempo_bpm));
        }

        let reference = 60000.0 / tempo_bpm as f64;
        let mut durations = [0u32; 7];
        for (i, slot) in durations.iter_mut().enumerate() {
            // Powers of two out from the quarter at index 4; fractional
            // milliseconds truncate.
            *slot = (reference * 2f64.powi(4 - i as i32)) as u32;
        }

        Ok(RhythmTable { durations })
    }

    pub fn duration_ms(&self, figure: Figure) -> u32 {
        self.durations[figure.index()]
    }

    /// The reference quarter-note duration.
    pub fn quarter_ms(&self) -> u32 {
        self.durations[Figure::Quarter.index()]
    }
}

/// One emitted melody event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Semitone number, MIDI-like. May exceed the 0–127 range for extreme
    /// octave parameters.
    pub pitch: i32,
    /// Derived from `pitch` at construction.
    pub frequency_hz: f64,
    pub figure: Figure,
    /// Derived from `figure` and the run's tempo at construction.
    pub duration_ms: u32,
}

impl Note {
    pub fn new(pitch: i32, figure: Figure, rhythm: &RhythmTable) -> Note {
        Note {
            pitch,
            frequency_hz: frequency_of(pitch),
            figure,
            duration_ms: rhythm.duration_ms(figure),
        }
    }
}

/// Compact note name for display (e.g. "C4", "F#3"). Pitches outside the
/// MIDI range display as "?".
pub fn pitch_name(pitch: i32) -> String {
    const NAMES: [&str; 12] = [
        "C", "C#", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
    ];
    if !(0..=127).contains(&pitch) {
        return "?".to_string();
    }
    let class = NAMES[(pitch % 12) as usize];
    let octave = pitch / 12 - 1;
    format!("{}{}", class, octave)
}
