// Content libraries: tagged, pre-authored content the engines select from.
//
// Three entry types, one per engine: drum pattern families (bucketed by
// tempo), chord progressions, and melody phrases. Entries are immutable —
// engines clone before customizing, never write into the library.
//
// Libraries are loaded from JSON by an external curation pipeline and handed
// in as plain values (`ContentLibraries`), owned by the caller and passed to
// each generation call. There is no static cache: test runs and concurrent
// callers never observe each other's state. An empty or failed load is not
// an error for the engines — each substitutes its built-in fallback set and
// logs a warning.
//
// See also: `select.rs` for the weighted selection the entries feed,
// `genre.rs` for the per-genre family-id lists that index into `DrumLibrary`.

use crate::genre::{Genre, MusicalMode};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Library files carry a schema version; loaders reject mismatches rather
/// than misinterpreting tags.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors at the library-loader boundary. Generation itself never returns
/// errors — engines fall back to built-in sets instead.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read library file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse library JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unsupported library schema version {found} (expected {expected})")]
    SchemaVersion { found: u32, expected: u32 },
}

// ---------------------------------------------------------------------------
// Drum patterns
// ---------------------------------------------------------------------------

/// A drum pattern over one 4/4 bar. Hit positions are in beats, [0, 4).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumPattern {
    pub kick: Vec<f64>,
    pub snare: Vec<f64>,
    pub hihat: Vec<f64>,
    /// Quiet snare hits added by skilled drummers; empty in library entries.
    #[serde(default)]
    pub ghost_snare: Vec<f64>,
    #[serde(default)]
    pub has_creative_fill: bool,
    #[serde(default)]
    pub fill_complexity: f64,
}

/// A pattern family: one groove authored at three tempo feels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrumFamily {
    pub id: String,
    pub slow: DrumPattern,
    pub medium: DrumPattern,
    pub fast: DrumPattern,
}

/// Tempo buckets for pattern lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TempoBucket {
    Slow,
    Medium,
    Fast,
}

impl TempoBucket {
    /// Bucket containing a tempo: slow [60, 90), medium [90, 130),
    /// fast [130, 180].
    pub fn from_tempo(tempo: f64) -> Self {
        if tempo < 90.0 {
            TempoBucket::Slow
        } else if tempo < 130.0 {
            TempoBucket::Medium
        } else {
            TempoBucket::Fast
        }
    }
}

/// All loaded drum families, indexed by family id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrumLibrary {
    pub families: Vec<DrumFamily>,
}

impl DrumLibrary {
    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Look up a family's pattern for a tempo bucket.
    pub fn pattern(&self, family_id: &str, bucket: TempoBucket) -> Option<&DrumPattern> {
        let family = self.families.iter().find(|f| f.id == family_id)?;
        Some(match bucket {
            TempoBucket::Slow => &family.slow,
            TempoBucket::Medium => &family.medium,
            TempoBucket::Fast => &family.fast,
        })
    }

    /// The medium pattern of the first family — the last-resort fallback
    /// when a family id is missing from the library.
    pub fn fallback_pattern(&self) -> Option<&DrumPattern> {
        self.families.first().map(|f| &f.medium)
    }
}

// ---------------------------------------------------------------------------
// Chord progressions
// ---------------------------------------------------------------------------

/// Psychological-resonance tags: fitness scores for simulated emotional
/// states, 0-1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PsychResonance {
    pub depression_weight: f64,
    pub corruption_level: f64,
}

/// A tagged chord progression. Chords are roman-numeral symbols relative to
/// the mode's tonic ("I", "vi", "bVII", "V7"...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressionEntry {
    pub id: String,
    pub name: String,
    pub chords: Vec<String>,
    pub mode: MusicalMode,
    /// Harmonic complexity, 0-1.
    pub complexity: f64,
    /// How worn the progression is, 0-1. High familiarity suits burnout and
    /// low confidence.
    pub familiarity: f64,
    pub catchiness: f64,
    /// Suitability under label pressure, 0-1.
    pub commercial_safety: f64,
    pub resonance: PsychResonance,
    pub harmonic_tension: f64,
    pub dissonance: f64,
    #[serde(default)]
    pub has_unusual_substitution: bool,
    /// Genres this progression suits; empty means any genre.
    #[serde(default)]
    pub genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Melody phrases
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhraseStyle {
    Stepwise,
    Arch,
    Arpeggiated,
}

/// Emotional-character tags, 0-1 per axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionalCharacter {
    pub melancholy: f64,
    pub brightness: f64,
    pub aggression: f64,
}

/// Phrase-function scores: how well the phrase opens, develops, or closes a
/// section, 0-1.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhraseFunction {
    pub opening: f64,
    pub development: f64,
    pub closing: f64,
}

/// A tagged melody phrase: scale degrees relative to the underlying chord
/// root (0 = root, 2 = third above, negative = below).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhraseEntry {
    pub id: String,
    pub degrees: Vec<i8>,
    /// Phrase length in bars: 1, 2, or 4.
    pub bars: u8,
    /// Minimum comfortable performer skill, 0-1.
    pub required_skill: f64,
    pub complexity: f64,
    pub style: PhraseStyle,
    pub character: EmotionalCharacter,
    pub hook_potential: f64,
    #[serde(default)]
    pub function: PhraseFunction,
}

// ---------------------------------------------------------------------------
// The injected repository
// ---------------------------------------------------------------------------

/// Everything the loader produced, owned by the caller and passed into each
/// generation call. Empty collections trigger the engines' built-in
/// fallback sets.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentLibraries {
    pub drums: DrumLibrary,
    pub progressions: Vec<ProgressionEntry>,
    pub phrases: Vec<PhraseEntry>,
}

/// On-disk wrapper: `{ "schema_version": 1, "entries": ... }`.
#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile<T> {
    schema_version: u32,
    entries: T,
}

fn parse_library<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, LibraryError> {
    let file: LibraryFile<T> = serde_json::from_str(json)?;
    if file.schema_version != SCHEMA_VERSION {
        return Err(LibraryError::SchemaVersion {
            found: file.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(file.entries)
}

impl ContentLibraries {
    /// Load all three libraries from JSON files. Callers that want partial
    /// loads (or in-memory content) can fill the struct directly.
    pub fn load(
        drums: &Path,
        progressions: &Path,
        phrases: &Path,
    ) -> Result<Self, LibraryError> {
        Ok(ContentLibraries {
            drums: DrumLibrary {
                families: parse_library(&std::fs::read_to_string(drums)?)?,
            },
            progressions: parse_library(&std::fs::read_to_string(progressions)?)?,
            phrases: parse_library(&std::fs::read_to_string(phrases)?)?,
        })
    }

    /// Parse a progression library from a JSON string.
    pub fn progressions_from_json(json: &str) -> Result<Vec<ProgressionEntry>, LibraryError> {
        parse_library(json)
    }

    /// Parse a phrase library from a JSON string.
    pub fn phrases_from_json(json: &str) -> Result<Vec<PhraseEntry>, LibraryError> {
        parse_library(json)
    }

    /// Parse a drum library from a JSON string.
    pub fn drums_from_json(json: &str) -> Result<DrumLibrary, LibraryError> {
        Ok(DrumLibrary { families: parse_library(json)? })
    }
}

// ---------------------------------------------------------------------------
// Built-in fallback sets
// ---------------------------------------------------------------------------

fn pattern(kick: &[f64], snare: &[f64], hihat: &[f64]) -> DrumPattern {
    DrumPattern {
        kick: kick.to_vec(),
        snare: snare.to_vec(),
        hihat: hihat.to_vec(),
        ghost_snare: Vec::new(),
        has_creative_fill: false,
        fill_complexity: 0.0,
    }
}

const EIGHTHS: [f64; 8] = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5];
const QUARTERS: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

fn family(id: &str, slow: DrumPattern, medium: DrumPattern, fast: DrumPattern) -> DrumFamily {
    DrumFamily { id: id.to_string(), slow, medium, fast }
}

/// Built-in drum families covering every genre's candidate list, used when
/// the loaded library is empty or a family id is missing.
pub fn builtin_drum_library() -> DrumLibrary {
    let sixteenth_hats: Vec<f64> = (0..16).map(|i| f64::from(i) * 0.25).collect();
    DrumLibrary {
        families: vec![
            family(
                "rock_backbeat",
                pattern(&[0.0, 2.0], &[1.0, 3.0], &QUARTERS),
                pattern(&[0.0, 2.0, 2.5], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.5, 2.0, 3.5], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "rock_driving",
                pattern(&[0.0, 1.5, 2.0], &[1.0, 3.0], &QUARTERS),
                pattern(&[0.0, 0.75, 2.0, 2.75], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 0.5, 2.0, 2.5], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "rock_halftime",
                pattern(&[0.0], &[2.0], &QUARTERS),
                pattern(&[0.0, 1.75], &[2.0], &EIGHTHS),
                pattern(&[0.0, 1.75, 2.5], &[2.0], &EIGHTHS),
            ),
            family(
                "punk_dbeat",
                pattern(&[0.0, 1.5], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.5, 2.0, 3.5], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 0.5, 1.5, 2.0, 2.5, 3.5], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "punk_blitz",
                pattern(&[0.0, 2.0], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.0, 2.0, 3.0], &[0.5, 1.5, 2.5, 3.5], &EIGHTHS),
                pattern(&[0.0, 1.0, 2.0, 3.0], &[0.5, 1.5, 2.5, 3.5], &sixteenth_hats),
            ),
            family(
                "metal_double_kick",
                pattern(&EIGHTHS, &[1.0, 3.0], &QUARTERS),
                pattern(&sixteenth_hats, &[1.0, 3.0], &QUARTERS),
                pattern(&sixteenth_hats, &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "metal_gallop",
                pattern(&[0.0, 0.75, 1.0, 2.0, 2.75, 3.0], &[1.0, 3.0], &QUARTERS),
                pattern(&[0.0, 0.5, 0.75, 2.0, 2.5, 2.75], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 0.25, 0.5, 2.0, 2.25, 2.5], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "metal_halftime",
                pattern(&[0.0, 1.5], &[2.0], &QUARTERS),
                pattern(&[0.0, 1.5, 3.5], &[2.0], &EIGHTHS),
                pattern(&[0.0, 0.5, 1.5, 3.5], &[2.0], &EIGHTHS),
            ),
            family(
                "indie_loose",
                pattern(&[0.0, 2.5], &[1.0, 3.0], &QUARTERS),
                pattern(&[0.0, 1.75, 2.5], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.25, 2.5, 3.25], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "indie_motorik",
                pattern(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.0, 2.0, 3.0], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.0, 2.0, 3.0], &[1.0, 2.5, 3.0], &EIGHTHS),
            ),
            family(
                "pop_four_floor",
                pattern(&QUARTERS, &[1.0, 3.0], &[0.5, 1.5, 2.5, 3.5]),
                pattern(&QUARTERS, &[1.0, 3.0], &[0.5, 1.5, 2.5, 3.5]),
                pattern(&QUARTERS, &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "pop_backbeat",
                pattern(&[0.0, 2.0], &[1.0, 3.0], &QUARTERS),
                pattern(&[0.0, 1.75, 2.0], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.5, 2.0, 3.0], &[1.0, 3.0], &EIGHTHS),
            ),
            family(
                "electronic_four_floor",
                pattern(&QUARTERS, &[1.0, 3.0], &[0.5, 1.5, 2.5, 3.5]),
                pattern(&QUARTERS, &[1.0, 3.0], &EIGHTHS),
                pattern(&QUARTERS, &[1.0, 3.0], &sixteenth_hats),
            ),
            family(
                "electronic_breakbeat",
                pattern(&[0.0, 1.75, 2.5], &[1.0, 3.0], &EIGHTHS),
                pattern(&[0.0, 1.75, 2.25, 3.5], &[1.0, 2.75, 3.0], &EIGHTHS),
                pattern(&[0.0, 0.75, 1.75, 2.25], &[1.0, 2.75], &sixteenth_hats),
            ),
            family(
                "electronic_halftime",
                pattern(&[0.0, 2.75], &[2.0], &QUARTERS),
                pattern(&[0.0, 1.25, 2.75], &[2.0], &EIGHTHS),
                pattern(&[0.0, 1.25, 2.75, 3.25], &[2.0], &EIGHTHS),
            ),
        ],
    }
}

struct ProgDef {
    id: &'static str,
    name: &'static str,
    chords: &'static [&'static str],
    mode: MusicalMode,
    complexity: f64,
    familiarity: f64,
    catchiness: f64,
    commercial_safety: f64,
    depression_weight: f64,
    corruption_level: f64,
    harmonic_tension: f64,
    dissonance: f64,
}

fn progression(def: ProgDef) -> ProgressionEntry {
    ProgressionEntry {
        id: def.id.to_string(),
        name: def.name.to_string(),
        chords: def.chords.iter().map(|c| (*c).to_string()).collect(),
        mode: def.mode,
        complexity: def.complexity,
        familiarity: def.familiarity,
        catchiness: def.catchiness,
        commercial_safety: def.commercial_safety,
        resonance: PsychResonance {
            depression_weight: def.depression_weight,
            corruption_level: def.corruption_level,
        },
        harmonic_tension: def.harmonic_tension,
        dissonance: def.dissonance,
        has_unusual_substitution: false,
        genres: Vec::new(),
    }
}

/// Built-in chord progressions. Every mode is represented across the full
/// familiarity/complexity range, and every psychological filter (depression,
/// corruption, burnout, low confidence, label pressure) has passing entries
/// at every genre's complexity ceiling — the fallback set can never filter
/// to empty under the structural widening step.
pub fn builtin_progressions() -> Vec<ProgressionEntry> {
    vec![
        progression(ProgDef {
            id: "maj_anthem",
            name: "Anthem",
            chords: &["I", "V", "vi", "IV"],
            mode: MusicalMode::Major,
            complexity: 0.2,
            familiarity: 0.95,
            catchiness: 0.9,
            commercial_safety: 0.95,
            depression_weight: 0.1,
            corruption_level: 0.05,
            harmonic_tension: 0.1,
            dissonance: 0.05,
        }),
        progression(ProgDef {
            id: "maj_doo_wop",
            name: "Doo-Wop",
            chords: &["I", "vi", "IV", "V"],
            mode: MusicalMode::Major,
            complexity: 0.25,
            familiarity: 0.9,
            catchiness: 0.85,
            commercial_safety: 0.9,
            depression_weight: 0.2,
            corruption_level: 0.05,
            harmonic_tension: 0.15,
            dissonance: 0.05,
        }),
        progression(ProgDef {
            id: "maj_crooked",
            name: "Crooked Cadence",
            chords: &["I", "bVII", "IV", "iv"],
            mode: MusicalMode::Major,
            complexity: 0.55,
            familiarity: 0.65,
            catchiness: 0.5,
            commercial_safety: 0.6,
            depression_weight: 0.45,
            corruption_level: 0.5,
            harmonic_tension: 0.5,
            dissonance: 0.35,
        }),
        progression(ProgDef {
            id: "min_lament",
            name: "Lament",
            chords: &["i", "bVI", "bIII", "bVII"],
            mode: MusicalMode::Minor,
            complexity: 0.3,
            familiarity: 0.85,
            catchiness: 0.7,
            commercial_safety: 0.75,
            depression_weight: 0.7,
            corruption_level: 0.2,
            harmonic_tension: 0.3,
            dissonance: 0.15,
        }),
        progression(ProgDef {
            id: "min_descent",
            name: "Descent",
            chords: &["i", "bVII", "bVI", "V"],
            mode: MusicalMode::Minor,
            complexity: 0.45,
            familiarity: 0.75,
            catchiness: 0.6,
            commercial_safety: 0.65,
            depression_weight: 0.8,
            corruption_level: 0.45,
            harmonic_tension: 0.55,
            dissonance: 0.3,
        }),
        progression(ProgDef {
            id: "min_spiral",
            name: "Spiral",
            chords: &["i", "iv", "bII", "V7"],
            mode: MusicalMode::Minor,
            complexity: 0.7,
            familiarity: 0.4,
            catchiness: 0.35,
            commercial_safety: 0.3,
            depression_weight: 0.85,
            corruption_level: 0.75,
            harmonic_tension: 0.8,
            dissonance: 0.6,
        }),
        progression(ProgDef {
            id: "dor_drift",
            name: "Drift",
            chords: &["i", "IV", "i", "bVII"],
            mode: MusicalMode::Dorian,
            complexity: 0.4,
            familiarity: 0.7,
            catchiness: 0.55,
            commercial_safety: 0.6,
            depression_weight: 0.5,
            corruption_level: 0.3,
            harmonic_tension: 0.35,
            dissonance: 0.2,
        }),
        progression(ProgDef {
            id: "dor_undertow",
            name: "Undertow",
            chords: &["i", "ii", "IV", "i"],
            mode: MusicalMode::Dorian,
            complexity: 0.6,
            familiarity: 0.6,
            catchiness: 0.45,
            commercial_safety: 0.6,
            depression_weight: 0.45,
            corruption_level: 0.5,
            harmonic_tension: 0.5,
            dissonance: 0.35,
        }),
        progression(ProgDef {
            id: "mix_swagger",
            name: "Swagger",
            chords: &["I", "bVII", "IV", "I"],
            mode: MusicalMode::Mixolydian,
            complexity: 0.35,
            familiarity: 0.8,
            catchiness: 0.7,
            commercial_safety: 0.7,
            depression_weight: 0.15,
            corruption_level: 0.25,
            harmonic_tension: 0.25,
            dissonance: 0.15,
        }),
        progression(ProgDef {
            id: "mix_strut",
            name: "Strut",
            chords: &["I", "v", "bVII", "IV"],
            mode: MusicalMode::Mixolydian,
            complexity: 0.5,
            familiarity: 0.65,
            catchiness: 0.6,
            commercial_safety: 0.65,
            depression_weight: 0.4,
            corruption_level: 0.45,
            harmonic_tension: 0.4,
            dissonance: 0.25,
        }),
    ]
}

struct PhraseDef {
    id: &'static str,
    degrees: &'static [i8],
    bars: u8,
    required_skill: f64,
    complexity: f64,
    style: PhraseStyle,
    melancholy: f64,
    brightness: f64,
    aggression: f64,
    hook_potential: f64,
    opening: f64,
    development: f64,
    closing: f64,
}

fn phrase(def: PhraseDef) -> PhraseEntry {
    PhraseEntry {
        id: def.id.to_string(),
        degrees: def.degrees.to_vec(),
        bars: def.bars,
        required_skill: def.required_skill,
        complexity: def.complexity,
        style: def.style,
        character: EmotionalCharacter {
            melancholy: def.melancholy,
            brightness: def.brightness,
            aggression: def.aggression,
        },
        hook_potential: def.hook_potential,
        function: PhraseFunction {
            opening: def.opening,
            development: def.development,
            closing: def.closing,
        },
    }
}

/// Built-in melody phrases. Every bar length (1, 2, 4) carries low-skill
/// stepwise options, melancholy options for depressive filters, and
/// low-complexity options for burnout — mirroring the guarantee the
/// progression fallback set makes.
pub fn builtin_phrases() -> Vec<PhraseEntry> {
    vec![
        phrase(PhraseDef {
            id: "step_home",
            degrees: &[0, 1, 2, 1, 0],
            bars: 1,
            required_skill: 0.1,
            complexity: 0.15,
            style: PhraseStyle::Stepwise,
            melancholy: 0.3,
            brightness: 0.5,
            aggression: 0.1,
            hook_potential: 0.5,
            opening: 0.7,
            development: 0.4,
            closing: 0.8,
        }),
        phrase(PhraseDef {
            id: "step_reach",
            degrees: &[0, 1, 2, 3, 2],
            bars: 1,
            required_skill: 0.2,
            complexity: 0.25,
            style: PhraseStyle::Stepwise,
            melancholy: 0.45,
            brightness: 0.4,
            aggression: 0.15,
            hook_potential: 0.45,
            opening: 0.6,
            development: 0.6,
            closing: 0.3,
        }),
        phrase(PhraseDef {
            id: "step_sigh",
            degrees: &[2, 1, 0, -1, 0],
            bars: 1,
            required_skill: 0.15,
            complexity: 0.2,
            style: PhraseStyle::Stepwise,
            melancholy: 0.7,
            brightness: 0.15,
            aggression: 0.05,
            hook_potential: 0.4,
            opening: 0.3,
            development: 0.5,
            closing: 0.75,
        }),
        phrase(PhraseDef {
            id: "arch_rise_fall",
            degrees: &[0, 2, 4, 2, 0, -1],
            bars: 2,
            required_skill: 0.3,
            complexity: 0.4,
            style: PhraseStyle::Arch,
            melancholy: 0.75,
            brightness: 0.2,
            aggression: 0.1,
            hook_potential: 0.55,
            opening: 0.5,
            development: 0.6,
            closing: 0.6,
        }),
        phrase(PhraseDef {
            id: "arch_lament",
            degrees: &[0, 1, 3, 5, 3, 1, 0, -2],
            bars: 2,
            required_skill: 0.45,
            complexity: 0.55,
            style: PhraseStyle::Arch,
            melancholy: 0.85,
            brightness: 0.1,
            aggression: 0.1,
            hook_potential: 0.5,
            opening: 0.4,
            development: 0.7,
            closing: 0.65,
        }),
        phrase(PhraseDef {
            id: "arp_climb",
            degrees: &[0, 2, 4, 7],
            bars: 1,
            required_skill: 0.55,
            complexity: 0.6,
            style: PhraseStyle::Arpeggiated,
            melancholy: 0.2,
            brightness: 0.7,
            aggression: 0.3,
            hook_potential: 0.6,
            opening: 0.7,
            development: 0.5,
            closing: 0.2,
        }),
        phrase(PhraseDef {
            id: "arp_cascade",
            degrees: &[7, 4, 2, 0, 2, 4],
            bars: 2,
            required_skill: 0.65,
            complexity: 0.7,
            style: PhraseStyle::Arpeggiated,
            melancholy: 0.5,
            brightness: 0.4,
            aggression: 0.25,
            hook_potential: 0.65,
            opening: 0.5,
            development: 0.65,
            closing: 0.45,
        }),
        phrase(PhraseDef {
            id: "step_drift",
            degrees: &[0, 1, 0, -1, -2, -1, 0, 1],
            bars: 2,
            required_skill: 0.25,
            complexity: 0.3,
            style: PhraseStyle::Stepwise,
            melancholy: 0.55,
            brightness: 0.3,
            aggression: 0.1,
            hook_potential: 0.4,
            opening: 0.5,
            development: 0.7,
            closing: 0.4,
        }),
        phrase(PhraseDef {
            id: "step_hook_long",
            degrees: &[0, 2, 1, 3, 2, 4, 3, 2, 1, 0, 1, 0],
            bars: 4,
            required_skill: 0.5,
            complexity: 0.65,
            style: PhraseStyle::Stepwise,
            melancholy: 0.4,
            brightness: 0.45,
            aggression: 0.2,
            hook_potential: 0.75,
            opening: 0.6,
            development: 0.7,
            closing: 0.5,
        }),
        phrase(PhraseDef {
            id: "arch_epic",
            degrees: &[0, 2, 3, 5, 7, 5, 3, 2, 0, -1, -2, 0],
            bars: 4,
            required_skill: 0.7,
            complexity: 0.8,
            style: PhraseStyle::Arch,
            melancholy: 0.8,
            brightness: 0.15,
            aggression: 0.2,
            hook_potential: 0.6,
            opening: 0.5,
            development: 0.75,
            closing: 0.7,
        }),
        phrase(PhraseDef {
            id: "step_plain_long",
            degrees: &[0, 0, 1, 1, 2, 2, 1, 1, 0, 0, -1, 0],
            bars: 4,
            required_skill: 0.2,
            complexity: 0.3,
            style: PhraseStyle::Stepwise,
            melancholy: 0.5,
            brightness: 0.3,
            aggression: 0.05,
            hook_potential: 0.35,
            opening: 0.55,
            development: 0.6,
            closing: 0.6,
        }),
        phrase(PhraseDef {
            id: "arp_glitter",
            degrees: &[0, 4, 7, 4, 9, 7],
            bars: 2,
            required_skill: 0.8,
            complexity: 0.85,
            style: PhraseStyle::Arpeggiated,
            melancholy: 0.15,
            brightness: 0.85,
            aggression: 0.35,
            hook_potential: 0.7,
            opening: 0.6,
            development: 0.55,
            closing: 0.3,
        }),
    ]
}
