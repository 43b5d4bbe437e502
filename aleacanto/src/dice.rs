// Pink-noise melody generation by Gray-code dice resampling.
//
// The classic "Voss" trick: keep a handful of dice, and on each step re-roll
// only the dice whose binary counter bit just flipped. Low-order dice change
// every step, high-order dice change rarely, so consecutive sums stay
// correlated over long ranges — pink-ish variation instead of independent
// white noise. The number of dice grows with the log of the melody length.
//
// The generator returns the notes together with a per-step trace (faces,
// which dice were re-rolled, the face sum) so a presenter can render the
// diagnostic table; the trace carries no hidden state.

use crate::error::GenerateError;
use crate::note::{Figure, Note, RhythmTable};
use rand::Rng;

/// One step of the dice algorithm, recorded for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceStep {
    /// Step index, 0-based.
    pub index: usize,
    /// Current face of every die after this step's re-rolls.
    pub faces: Vec<u8>,
    /// Which dice were re-rolled this step. Bit `k` (LSB = 0) corresponds
    /// to die `faces.len() - 1 - k`, matching the counter-bit orientation.
    pub rerolled: u64,
    /// Sum of the current faces.
    pub sum: u32,
}

/// A generated pink-noise melody plus its dice trace.
#[derive(Debug, Clone, PartialEq)]
pub struct DiceMelody {
    pub notes: Vec<Note>,
    pub steps: Vec<DiceStep>,
}

/// Number of dice needed for a melody of `length` steps: a power-of-two
/// counter starts at 2 and doubles until it covers the length, one die per
/// doubling. One die minimum.
pub fn dice_count(length: usize) -> usize {
    let mut bound = 2usize;
    let mut count = 1usize;
    while bound < length {
        bound <<= 1;
        count += 1;
    }
    count
}

/// Generate a pink-noise melody of `length` notes in the given octave.
///
/// Pitches are the dice sums shifted into the target octave and folded into
/// the MIDI range: `(sum + 12*(octave+1)) mod 127`, with a Euclidean
/// remainder so strongly negative octaves still land in 0..127.
pub fn generate(
    length: usize,
    tempo: u32,
    octave: i32,
    rng: &mut impl Rng,
) -> Result<DiceMelody, GenerateError> {
    if length == 0 {
        return Err(GenerateError::InvalidLength);
    }
    let rhythm = RhythmTable::new(tempo)?;

    let dice_num = dice_count(length);
    let mut faces = vec![0u8; dice_num];
    let mut notes = Vec::with_capacity(length);
    let mut steps = Vec::with_capacity(length);

    for i in 0..length {
        let rerolled: u64 = if i == 0 {
            for face in faces.iter_mut() {
                *face = rng.random_range(1..=6);
            }
            (1u64 << dice_num) - 1
        } else {
            // Bits that flip between step i-1 and step i; always the lowest
            // trailing_zeros(i)+1 bits of the counter.
            let changed = ((i - 1) ^ i) as u64;
            let mut mask = 0u64;
            for bit in 0..dice_num as u64 {
                if changed & (1 << bit) != 0 {
                    faces[dice_num - 1 - bit as usize] = rng.random_range(1..=6);
                    mask |= 1 << bit;
                }
            }
            mask
        };

        let sum: u32 = faces.iter().map(|&f| u32::from(f)).sum();
        let pitch = (sum as i32 + 12 * (octave + 1)).rem_euclid(127);

        notes.push(Note::new(pitch, Figure::random(rng), &rhythm));
        steps.push(DiceStep {
            index: i,
            faces: faces.clone(),
            rerolled,
            sum,
        });
    }

    Ok(DiceMelody { notes, steps })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_dice_count_ladder() {
        // (length, dice) — one more die each time a power of two is passed.
        let cases = [
            (1, 1),
            (2, 1),
            (3, 2),
            (4, 2),
            (5, 3),
            (8, 3),
            (9, 4),
            (16, 4),
            (17, 5),
            (64, 6),
            (65, 7),
        ];
        for (length, expected) in cases {
            assert_eq!(dice_count(length), expected, "length {}", length);
        }
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate(0, 120, 4, &mut rng),
            Err(GenerateError::InvalidLength)
        );
    }

    #[test]
    fn test_zero_tempo_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            generate(8, 0, 4, &mut rng),
            Err(GenerateError::InvalidTempo(0))
        );
    }

    #[test]
    fn test_single_step_rolls_one_die() {
        let mut rng = StdRng::seed_from_u64(5);
        let melody = generate(1, 120, 4, &mut rng).unwrap();
        assert_eq!(melody.steps.len(), 1);
        assert_eq!(melody.steps[0].faces.len(), 1);
        assert_eq!(melody.steps[0].rerolled, 1);
    }

    #[test]
    fn test_reroll_counts_follow_gray_code() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let melody = generate(33, 120, 4, &mut rng).unwrap();
            let dice_num = dice_count(33) as u32;
            assert_eq!(melody.steps[0].rerolled.count_ones(), dice_num);
            for step in &melody.steps[1..] {
                let expected = (((step.index - 1) ^ step.index) as u64).count_ones();
                assert_eq!(
                    step.rerolled.count_ones(),
                    expected,
                    "seed {} step {}",
                    seed,
                    step.index
                );
            }
        }
    }

    #[test]
    fn test_unrerolled_dice_keep_their_faces() {
        let mut rng = StdRng::seed_from_u64(11);
        let melody = generate(32, 120, 4, &mut rng).unwrap();
        let dice_num = melody.steps[0].faces.len();
        for pair in melody.steps.windows(2) {
            for die in 0..dice_num {
                let bit = (dice_num - 1 - die) as u64;
                if pair[1].rerolled & (1 << bit) == 0 {
                    assert_eq!(
                        pair[1].faces[die], pair[0].faces[die],
                        "die {} changed without a re-roll at step {}",
                        die, pair[1].index
                    );
                }
            }
        }
    }

    #[test]
    fn test_faces_and_sums_consistent() {
        let mut rng = StdRng::seed_from_u64(23);
        let melody = generate(20, 90, 3, &mut rng).unwrap();
        for step in &melody.steps {
            assert!(step.faces.iter().all(|&f| (1..=6).contains(&f)));
            let total: u32 = step.faces.iter().map(|&f| u32::from(f)).sum();
            assert_eq!(step.sum, total);
        }
    }

    #[test]
    fn test_pitches_stay_in_midi_range() {
        for octave in [-6, -3, 0, 4, 9] {
            let mut rng = StdRng::seed_from_u64(41);
            let melody = generate(24, 120, octave, &mut rng).unwrap();
            for note in &melody.notes {
                assert!(
                    (0..127).contains(&note.pitch),
                    "octave {}: pitch {}",
                    octave,
                    note.pitch
                );
            }
        }
    }

    #[test]
    fn test_pitch_mapping() {
        let mut rng = StdRng::seed_from_u64(8);
        let melody = generate(10, 120, 4, &mut rng).unwrap();
        for (note, step) in melody.notes.iter().zip(melody.steps.iter()) {
            let expected = (step.sum as i32 + 12 * 5).rem_euclid(127);
            assert_eq!(note.pitch, expected);
        }
    }

    #[test]
    fn test_deterministic_per_seed() {
        let mut a = StdRng::seed_from_u64(77);
        let mut b = StdRng::seed_from_u64(77);
        assert_eq!(
            generate(16, 120, 4, &mut a).unwrap(),
            generate(16, 120, 4, &mut b).unwrap()
        );
    }
}
