// Rule-constrained diatonic random walk.
//
// The melody moves over a fixed 15-degree scale (two octaves of C major,
// C3..C5) under local voice-leading rules:
// - it opens on a C or a G (tonic or dominant, either octave),
// - it always closes on middle C,
// - E and B resolve upward by step (leading-tone resolution),
// - after an F the walk resamples until the candidate is not a B, so the
//   F–B tritone never occurs melodically,
// - at either edge of the scale, movement is restricted back inward,
// - everywhere else the walk steps by a random interval of up to four
//   scale degrees in either direction.
//
// Out-of-range candidates clamp to the scale edges rather than wrapping or
// reflecting. That slightly favors the edge degrees; the bias is part of
// the walk's character and is kept.

use crate::error::GenerateError;
use crate::note::{Figure, Note, RhythmTable};
use rand::Rng;

/// Two octaves of C major, C3 through C5, as semitone numbers.
pub const SCALE: [i32; 15] = [
    48, 50, 52, 53, 55, 57, 59, 60, 62, 64, 65, 67, 69, 71, 72,
];

/// Scale indices a melody may open on: the C's and G's.
pub const START_INDICES: [usize; 5] = [0, 4, 7, 11, 14];

/// Scale index every melody closes on: middle C.
pub const TERMINAL_INDEX: usize = 7;

/// Degrees that must resolve upward by step: the E's and B's.
fn is_leading(index: usize) -> bool {
    matches!(index, 2 | 6 | 9 | 13)
}

/// Degrees that trigger rejection sampling: the F's.
fn is_blocked(index: usize) -> bool {
    matches!(index, 3 | 10)
}

/// Degrees forbidden directly after an F: the B's (tritone).
fn is_avoided(index: usize) -> bool {
    matches!(index, 6 | 13)
}

/// A step of up to four degrees with a random sign. Magnitude and sign are
/// drawn separately, so zero is twice as likely as each of ±1..=±4 — the
/// walk's step distribution, preserved as-is.
fn signed_step(rng: &mut impl Rng) -> i32 {
    let magnitude: i32 = rng.random_range(0..=4);
    if rng.random_bool(0.5) { magnitude } else { -magnitude }
}

/// Clamp a candidate scale index to the valid range. One-ended overshoots
/// land exactly on the edge degree.
fn clamp_index(raw: i32) -> usize {
    raw.clamp(0, SCALE.len() as i32 - 1) as usize
}

/// Generate a rule-constrained melody of `length` notes.
///
/// `length == 0` yields an empty melody. Each note gets an independent
/// uniformly random rhythmic figure.
pub fn generate(
    length: usize,
    tempo: u32,
    rng: &mut impl Rng,
) -> Result<Vec<Note>, GenerateError> {
    let rhythm = RhythmTable::new(tempo)?;

    let mut notes = Vec::with_capacity(length);
    let mut last = 0usize;

    for i in 0..length {
        last = if i == 0 && length > 1 {
            START_INDICES[rng.random_range(0..START_INDICES.len())]
        } else if length == 1 || i == length - 1 {
            TERMINAL_INDEX
        } else if is_leading(last) {
            // Deterministic: E steps to F, B steps to C.
            last + 1
        } else if is_blocked(last) {
            // Resample around the F until the candidate avoids the B's.
            loop {
                let candidate = clamp_index(last as i32 + signed_step(rng));
                if !is_avoided(candidate) {
                    break candidate;
                }
            }
        } else if last == 0 {
            // Left edge: rightward movement only.
            last + rng.random_range(0..=4)
        } else if last == SCALE.len() - 1 {
            // Right edge: leftward movement only.
            last - rng.random_range(0..=4)
        } else {
            clamp_index(last as i32 + signed_step(rng))
        };

        notes.push(Note::new(SCALE[last], Figure::random(rng), &rhythm));
    }

    Ok(notes)
}
