// Run parameters for the generate binary.
//
// Parameters arrive already validated in type (unsigned lengths, positive
// or negative octave); the generators themselves re-check only what their
// contracts require (tempo > 0, dice length >= 1). A JSON parameter file
// can supply a whole run configuration; individual CLI flags override it.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which generation strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Rule-constrained diatonic random walk.
    Walk,
    /// Pink-noise dice-sum melody.
    Dice,
    /// Dodecaphonic series from a twelve-tone matrix.
    Serial,
}

/// One run's worth of parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunParams {
    pub algorithm: Algorithm,
    /// Note count for the walk and dice generators.
    pub length: usize,
    /// Twelve-note block count for the serial generator.
    pub series: usize,
    /// Quarter notes per minute.
    pub tempo: u32,
    /// Target octave for the dice and serial generators.
    pub octave: i32,
    /// RNG seed; omitted means a fresh OS-seeded run.
    pub seed: Option<u64>,
}

impl Default for RunParams {
    fn default() -> Self {
        RunParams {
            algorithm: Algorithm::Walk,
            length: 16,
            series: 2,
            tempo: 90,
            octave: 4,
            seed: None,
        }
    }
}

impl RunParams {
    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let params = serde_json::from_str(&data)?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = RunParams::default();
        assert_eq!(params.algorithm, Algorithm::Walk);
        assert!(params.tempo > 0);
        assert!(params.seed.is_none());
    }

    #[test]
    fn test_parse_full_params() {
        let json = r#"{
            "algorithm": "serial",
            "series": 4,
            "tempo": 120,
            "octave": 3,
            "seed": 42
        }"#;
        let params: RunParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.algorithm, Algorithm::Serial);
        assert_eq!(params.series, 4);
        assert_eq!(params.tempo, 120);
        assert_eq!(params.octave, 3);
        assert_eq!(params.seed, Some(42));
        // Unspecified fields fall back to defaults.
        assert_eq!(params.length, RunParams::default().length);
    }

    #[test]
    fn test_parse_algorithm_names() {
        for (name, expected) in [
            ("walk", Algorithm::Walk),
            ("dice", Algorithm::Dice),
            ("serial", Algorithm::Serial),
        ] {
            let json = format!(r#"{{"algorithm": "{}"}}"#, name);
            let params: RunParams = serde_json::from_str(&json).unwrap();
            assert_eq!(params.algorithm, expected);
        }
    }

    #[test]
    fn test_unknown_algorithm_rejected() {
        assert!(serde_json::from_str::<RunParams>(r#"{"algorithm": "fugue"}"#).is_err());
    }

    #[test]
    fn test_round_trip() {
        let params = RunParams {
            algorithm: Algorithm::Dice,
            length: 32,
            series: 1,
            tempo: 140,
            octave: -2,
            seed: Some(7),
        };
        let json = serde_json::to_string(&params).unwrap();
        let back: RunParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
