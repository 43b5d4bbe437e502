// Plain-text table rendering for melodies and generator diagnostics.
//
// These are the presenter's view of the generators' output: a melody table
// (note name, semitone number, frequency, figure, duration), the dice-sum
// trace table (step counter in binary, die faces with re-rolls marked, face
// sum), and the 12×12 dodecaphonic matrix. All renderers are pure and
// return the finished text; printing is the caller's business.

use crate::dice::DiceStep;
use crate::note::{Note, pitch_name};
use crate::serial::ToneMatrix;

const MELODY_BORDER: &str = "+-------+------+----------+-----------+---------+\n";

/// Render a melody as a bordered table, one note per row.
pub fn melody_table(notes: &[Note]) -> String {
    let mut out = String::new();
    out.push_str(MELODY_BORDER);
    out.push_str(&format!(
        "| {:>5} | {:>4} | {:>8} | {:<9} | {:>7} |\n",
        "NOTE", "MIDI", "FREQ(HZ)", "FIGURE", "DUR(MS)"
    ));
    out.push_str(MELODY_BORDER);
    for note in notes {
        out.push_str(&format!(
            "| {:>5} | {:>4} | {:>8.2} | {:<9} | {:>7} |\n",
            pitch_name(note.pitch),
            note.pitch,
            note.frequency_hz,
            format!("{:?}", note.figure),
            note.duration_ms
        ));
    }
    out.push_str(MELODY_BORDER);
    out
}

/// Render the dice trace: the step counter in binary (one digit per die,
/// MSB first), the current die faces with re-rolled faces marked `*`, and
/// the face sum.
pub fn dice_table(steps: &[DiceStep]) -> String {
    let Some(first) = steps.first() else {
        return String::new();
    };
    let dice_num = first.faces.len();

    let mut rows = Vec::with_capacity(steps.len());
    for step in steps {
        let mut bits = String::with_capacity(dice_num);
        for k in (0..dice_num).rev() {
            bits.push(if step.index >> k & 1 == 1 { '1' } else { '0' });
        }

        let mut faces = String::with_capacity(3 * dice_num);
        for (die, &face) in step.faces.iter().enumerate() {
            let bit = (dice_num - 1 - die) as u64;
            let mark = if step.rerolled >> bit & 1 == 1 { '*' } else { ' ' };
            faces.push_str(&format!("{}{} ", face, mark));
        }

        rows.push(format!("|{}|{}|{:>3}|", bits, faces, step.sum));
    }

    let border = format!("+{}+\n", "-".repeat(rows[0].len() - 2));
    let mut out = String::new();
    out.push_str(&border);
    for row in rows {
        out.push_str(&row);
        out.push('\n');
    }
    out.push_str(&border);
    out
}

/// Render the dodecaphonic matrix as 12 rows of width-2 pitch classes.
pub fn matrix_table(matrix: &ToneMatrix) -> String {
    let mut out = String::new();
    for r in 0..12 {
        for c in 0..12 {
            out.push_str(&format!("{:>2} ", matrix.at(r, c)));
        }
        out.push('\n');
    }
    out
}
