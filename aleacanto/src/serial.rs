// Dodecaphonic (twelve-tone) series generation.
//
// A fresh prime row — an unbiased permutation of the 12 pitch classes — is
// expanded into the classical 12×12 matrix: row 0 is the prime row, column 0
// its interval inversion, and every other row a transposition of the prime.
// Melodies are then read off the matrix under the four serial operations:
// Prime (row, left to right), Retrograde (row, right to left), Inversion
// (column, top to bottom), and Retrograde-Inversion (column, bottom to top).
//
// The matrix is a write-once value: built in `ToneMatrix::from_row`, read
// through accessors, never mutated afterwards. Every row and every column of
// a well-formed matrix is itself a permutation of 0..=11.

use crate::error::GenerateError;
use crate::note::{Figure, Note, RhythmTable};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A twelve-tone row: a permutation of the pitch classes 0..=11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToneRow {
    classes: [u8; 12],
}

impl ToneRow {
    /// Draw a fresh row with a Fisher–Yates shuffle, scanning from the last
    /// index down and swapping with a uniformly chosen earlier-or-equal
    /// position.
    pub fn random(rng: &mut impl Rng) -> ToneRow {
        let mut classes: [u8; 12] = std::array::from_fn(|i| i as u8);
        for i in (1..12).rev() {
            let j = rng.random_range(0..=i);
            classes.swap(i, j);
        }
        ToneRow { classes }
    }

    pub fn classes(&self) -> [u8; 12] {
        self.classes
    }

    /// The interval inversion of the row: the first class is fixed, and
    /// every interval below the first class is mirrored above it (mod 12).
    pub fn inversion(&self) -> [u8; 12] {
        let mut inverted = [0u8; 12];
        inverted[0] = self.classes[0];
        for k in 1..12 {
            let mut interval = i32::from(self.classes[0]) - i32::from(self.classes[k]);
            if interval < 0 {
                interval += 12;
            }
            inverted[k] = ((i32::from(self.classes[0]) + interval) % 12) as u8;
        }
        inverted
    }
}

/// The 12×12 derivation matrix of a tone row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneMatrix {
    cells: [[u8; 12]; 12],
}

impl ToneMatrix {
    /// Build the full matrix from a prime row. Row 0 is the prime row;
    /// rows 1..12 are transpositions chosen so that column 0 spells the
    /// row's inversion.
    pub fn from_row(row: &ToneRow) -> ToneMatrix {
        let prime = row.classes();
        let inversion = row.inversion();

        let mut cells = [[0u8; 12]; 12];
        cells[0] = prime;
        for r in 1..12 {
            let offset = i32::from(inversion[r]) - i32::from(prime[0]);
            for (c, cell) in cells[r].iter_mut().enumerate() {
                *cell = ((i32::from(prime[c]) + offset + 12) % 12) as u8;
            }
        }

        ToneMatrix { cells }
    }

    pub fn at(&self, row: usize, col: usize) -> u8 {
        self.cells[row][col]
    }

    pub fn row(&self, index: usize) -> [u8; 12] {
        self.cells[index]
    }

    pub fn column(&self, index: usize) -> [u8; 12] {
        std::array::from_fn(|r| self.cells[r][index])
    }
}

/// The four classical serial operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transformation {
    Prime,
    Retrograde,
    Inversion,
    RetrogradeInversion,
}

impl Transformation {
    pub const ALL: [Transformation; 4] = [
        Transformation::Prime,
        Transformation::Retrograde,
        Transformation::Inversion,
        Transformation::RetrogradeInversion,
    ];

    pub fn random(rng: &mut impl Rng) -> Transformation {
        Transformation::ALL[rng.random_range(0..Transformation::ALL.len())]
    }
}

/// Read one 12-class series out of the matrix under a serial operation.
/// `index` selects the row (Prime/Retrograde) or column (the inversions).
pub fn series(
    matrix: &ToneMatrix,
    transformation: Transformation,
    index: usize,
) -> [u8; 12] {
    match transformation {
        Transformation::Prime => matrix.row(index),
        Transformation::Retrograde => {
            let mut classes = matrix.row(index);
            classes.reverse();
            classes
        }
        Transformation::Inversion => matrix.column(index),
        Transformation::RetrogradeInversion => {
            let mut classes = matrix.column(index);
            classes.reverse();
            classes
        }
    }
}

/// A generated dodecaphonic melody plus the matrix it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct SerialMelody {
    pub notes: Vec<Note>,
    pub matrix: ToneMatrix,
}

/// Generate `series_count` independent twelve-note blocks from one fresh
/// matrix: each block picks a uniform serial operation and a uniform
/// row/column index. Emits exactly `12 * series_count` notes; pitch classes
/// map to absolute pitch as `class + 12*(octave+1)`.
pub fn generate(
    series_count: usize,
    tempo: u32,
    octave: i32,
    rng: &mut impl Rng,
) -> Result<SerialMelody, GenerateError> {
    let rhythm = RhythmTable::new(tempo)?;

    let row = ToneRow::random(rng);
    let matrix = ToneMatrix::from_row(&row);

    let mut notes = Vec::with_capacity(series_count * 12);
    for _ in 0..series_count {
        let transformation = Transformation::random(rng);
        let index = rng.random_range(0..12);
        for class in series(&matrix, transformation, index) {
            let pitch = i32::from(class) + 12 * (octave + 1);
            notes.push(Note::new(pitch, Figure::random(rng), &rhythm));
        }
    }

    Ok(SerialMelody { notes, matrix })
}
