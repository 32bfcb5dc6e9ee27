// Stagefright Song Generator — CLI entry point.
//
// Generates a song from a simulation-state snapshot and writes it to JSON.
// The pipeline: constraint extraction → drums + harmony (parallel) → melody
// → title → assembly.
//
// Usage:
//   cargo run -p stagefright_music -- [output.json] [--state state.json]
//     [--genre GENRE] [--seed SEED] [--libraries DIR]
//
// Genres: rock, punk, metal, indie, pop, electronic
//
// Without --state, a built-in demo snapshot (a stressed mid-career band) is
// used; without --libraries, the built-in content sets are used.

use stagefright_music::genre::Genre;
use stagefright_music::library::{self, ContentLibraries};
use stagefright_music::song::generate_song;
use stagefright_music::state::{
    BandMember, BandState, Instrument, NarrativeEvent, NarrativeEventKind, PsychState,
    SimulationState,
};
use std::path::Path;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let output_path = args
        .get(1)
        .filter(|s| !s.starts_with("--"))
        .map(|s| s.as_str())
        .unwrap_or("song.json");
    let genre: Genre = parse_flag::<String>(&args, "--genre")
        .unwrap_or_else(|| "rock".to_string())
        .parse()
        .unwrap_or(Genre::Rock);
    let seed: Option<String> = parse_flag(&args, "--seed");
    let state_path: Option<String> = parse_flag(&args, "--state");
    let libraries_dir: Option<String> = parse_flag(&args, "--libraries");

    println!("=== Stagefright Song Generator ===");
    println!("Output: {output_path}");
    println!("Genre: {genre}");
    if let Some(s) = &seed {
        println!("Seed: {s}");
    }
    println!();

    // Load simulation state
    println!("[1/4] Loading simulation state...");
    let state = match &state_path {
        Some(path) => match load_state(path) {
            Ok(s) => {
                println!("  Loaded {path}.");
                s
            }
            Err(e) => {
                println!("  Failed to load {path}: {e}. Using demo state.");
                demo_state()
            }
        },
        None => {
            println!("  Using built-in demo state.");
            demo_state()
        }
    };
    println!(
        "  Band: {} ({} members, week {})",
        state.band.name,
        state.band.members.len(),
        state.week
    );

    // Load content libraries
    println!("[2/4] Loading content libraries...");
    let libraries = match &libraries_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            match ContentLibraries::load(
                &dir.join("drums.json"),
                &dir.join("progressions.json"),
                &dir.join("phrases.json"),
            ) {
                Ok(l) => {
                    println!(
                        "  Loaded {} drum families, {} progressions, {} phrases.",
                        l.drums.families.len(),
                        l.progressions.len(),
                        l.phrases.len()
                    );
                    l
                }
                Err(e) => {
                    println!("  Failed to load: {e}. Using built-in sets.");
                    builtin_libraries()
                }
            }
        }
        None => {
            println!("  Using built-in content sets.");
            builtin_libraries()
        }
    };

    // Generate
    println!("[3/4] Generating...");
    let song = generate_song(&state, genre, seed.as_deref(), &libraries);
    println!("  Title: {:?}", song.title);
    println!("  Seed: {}", song.seed);
    println!(
        "  Tempo: {:.0} BPM, mode {:?}, {} sections",
        song.summary.tempo,
        song.summary.mode,
        song.summary.structure.len()
    );
    println!(
        "  Progression: {} ({})",
        song.harmony.progression.name,
        song.harmony.progression.chords.join("-")
    );
    println!(
        "  Analysis: commercial {:.0}, originality {:.0}, quality {:.0}",
        song.analysis.commercial_viability, song.analysis.originality, song.analysis.quality
    );

    // Write output
    println!("[4/4] Writing {output_path}...");
    match serde_json::to_string_pretty(&song) {
        Ok(json) => match std::fs::write(output_path, json) {
            Ok(()) => println!("  Done."),
            Err(e) => {
                eprintln!("  Error writing {output_path}: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("  Error serializing song: {e}");
            std::process::exit(1);
        }
    }
}

fn load_state(path: &str) -> Result<SimulationState, Box<dyn std::error::Error>> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

fn builtin_libraries() -> ContentLibraries {
    ContentLibraries {
        drums: library::builtin_drum_library(),
        progressions: library::builtin_progressions(),
        phrases: library::builtin_phrases(),
    }
}

/// A stressed mid-career band for demo runs.
fn demo_state() -> SimulationState {
    SimulationState {
        week: 34,
        band: BandState {
            name: "Stage Fright".into(),
            members: vec![
                BandMember { name: "Riley".into(), instrument: Instrument::Vocalist, skill: 68.0 },
                BandMember { name: "Sam".into(), instrument: Instrument::Guitarist, skill: 74.0 },
                BandMember { name: "Alex".into(), instrument: Instrument::Bassist, skill: 55.0 },
                BandMember { name: "Charlie".into(), instrument: Instrument::Drummer, skill: 81.0 },
            ],
            confidence: 62.0,
            gigs_played: 140,
            albums_released: 2,
            ..Default::default()
        },
        psych: PsychState {
            stress: 58.0,
            depression: 35.0,
            burnout: 44.0,
            substance_use: 25.0,
            ..Default::default()
        },
        money: -1200.0,
        recent_events: vec![
            NarrativeEvent { kind: NarrativeEventKind::SoldOutShow, week: 31 },
            NarrativeEvent { kind: NarrativeEventKind::LabelDispute, week: 33 },
        ],
        ..Default::default()
    }
}

fn parse_flag<T: std::str::FromStr>(args: &[String], flag: &str) -> Option<T> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|v| v.parse().ok())
}
