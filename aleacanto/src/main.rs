// Aleacanto melody generator — CLI entry point.
//
// Generates one melody with the chosen strategy and prints it as a table,
// along with the strategy's diagnostics (the dice trace or the twelve-tone
// matrix). No playback: the tables are the output.
//
// Usage:
//   cargo run -p aleacanto -- [--algorithm walk|dice|serial] [--length N]
//     [--series N] [--tempo BPM] [--octave N] [--seed N] [--params FILE.json]
//
// Flags override values from the optional JSON parameter file.

use aleacanto::config::{Algorithm, RunParams};
use aleacanto::table::{dice_table, matrix_table, melody_table};
use aleacanto::{dice, serial, walk};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    // Start from the parameter file if given, then apply flag overrides.
    let mut params = match parse_flag::<String>(&args, "--params") {
        Some(path) => match RunParams::load(Path::new(&path)) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => RunParams::default(),
    };

    if let Some(name) = parse_flag::<String>(&args, "--algorithm") {
        params.algorithm = parse_algorithm(&name);
    }
    if let Some(length) = parse_flag(&args, "--length") {
        params.length = length;
    }
    if let Some(series) = parse_flag(&args, "--series") {
        params.series = series;
    }
    if let Some(tempo) = parse_flag(&args, "--tempo") {
        params.tempo = tempo;
    }
    if let Some(octave) = parse_flag(&args, "--octave") {
        params.octave = octave;
    }
    if let Some(seed) = parse_flag(&args, "--seed") {
        params.seed = Some(seed);
    }

    println!("=== Aleacanto Melody Generator ===");
    println!("Algorithm: {:?}", params.algorithm);
    println!("Tempo: {} BPM", params.tempo);
    match params.algorithm {
        Algorithm::Walk => println!("Length: {} notes", params.length),
        Algorithm::Dice => {
            println!("Length: {} notes", params.length);
            println!("Octave: {}", params.octave);
        }
        Algorithm::Serial => {
            println!("Series: {} blocks of 12", params.series);
            println!("Octave: {}", params.octave);
        }
    }
    if let Some(s) = params.seed {
        println!("Seed: {}", s);
    }
    println!();

    // A fresh RNG per run: seeded for reproducibility, OS-seeded otherwise.
    let mut rng = if let Some(s) = params.seed {
        StdRng::seed_from_u64(s)
    } else {
        StdRng::from_os_rng()
    };

    let result = match params.algorithm {
        Algorithm::Walk => {
            walk::generate(params.length, params.tempo, &mut rng).map(|notes| {
                println!("Generated melody:");
                print!("{}", melody_table(&notes));
            })
        }
        Algorithm::Dice => dice::generate(params.length, params.tempo, params.octave, &mut rng)
            .map(|melody| {
                println!("Dice trace:");
                print!("{}", dice_table(&melody.steps));
                println!();
                println!("Generated melody:");
                print!("{}", melody_table(&melody.notes));
            }),
        Algorithm::Serial => serial::generate(params.series, params.tempo, params.octave, &mut rng)
            .map(|melody| {
                println!("Twelve-tone matrix:");
                print!("{}", matrix_table(&melody.matrix));
                println!();
                println!("Generated melody:");
                print!("{}", melody_table(&melody.notes));
            }),
    };

    if let Err(e) = result {
        eprintln!("Generation failed: {}", e);
        std::process::exit(1);
    }
}

fn parse_algorithm(name: &str) -> Algorithm {
    match name.to_lowercase().as_str() {
        "walk" => Algorithm::Walk,
        "dice" => Algorithm::Dice,
        "serial" => Algorithm::Serial,
        _ => {
            eprintln!("Unknown algorithm '{}'. Using walk.", name);
            Algorithm::Walk
        }
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
