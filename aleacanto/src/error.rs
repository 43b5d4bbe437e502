// Generation errors.
//
// All parameter validation happens at the entry of each generator; a failed
// call produces no partial output. Failures are local to one generation call
// and never cascade — each generator is independently invoked.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// The rhythm table needs a positive tempo to define the quarter-note
    /// duration.
    #[error("tempo must be at least 1 BPM, got {0}")]
    InvalidTempo(u32),

    /// The dice-sum generator derives its dice count from the melody length
    /// and needs at least one step.
    #[error("melody length must be at least 1 note")]
    InvalidLength,
}
