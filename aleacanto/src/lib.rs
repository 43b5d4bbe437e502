// Aleacanto — chance-music melody generation.
//
// Three independent strategies produce short monophonic melodies as lists of
// (pitch, duration) events from constrained randomness:
// - walk.rs: rule-constrained diatonic random walk over a fixed two-octave
//   major scale, with leading-tone resolution and tritone avoidance
// - dice.rs: "pink noise" dice sums — a Gray-code counter decides which dice
//   to re-roll each step, so consecutive sums stay correlated
// - serial.rs: dodecaphonic series read from a 12×12 matrix derived from a
//   random tone row (Prime / Retrograde / Inversion / Retrograde-Inversion)
//
// Shared infrastructure:
// - note.rs: equal-temperament pitch model and the tempo-derived rhythm table
// - error.rs: typed parameter-validation errors
// - table.rs: plain-text renderers for melodies and generator diagnostics
// - config.rs: run parameters for the generate binary, JSON-loadable
//
// All generators take an injected `rand::Rng`, so every run is reproducible
// given a seed. Generation is pure computation: no playback, no files.

pub mod config;
pub mod dice;
pub mod error;
pub mod note;
pub mod serial;
pub mod table;
pub mod walk;
