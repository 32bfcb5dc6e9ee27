// Melody engine: phrase-option profiling, song-structure planning, and
// per-chord phrase selection over the harmony engine's progression.
//
// This stage has a hard data dependency on the harmony result and must run
// strictly after it. Selection mirrors the harmony engine's
// filter-then-roulette shape, with the same widening order: full filter,
// then the bar-length bucket, then the built-in fallback set under the
// bucket, then the whole built-in set.
//
// Per chord, the engine rolls a phrase length biased by performer skill,
// optionally reuses the section's previous phrase (cliché reuse under
// burnout), and otherwise selects a new phrase by weighted roulette. Chosen
// phrases are placed by transposing their scale degrees onto the current
// chord's root degree, and each section's assembled line is classified into
// a contour (arch, ascending, descending, stable).

use crate::constraints::Constraints;
use crate::harmony::HarmonyResult;
use crate::library::{self, PhraseEntry, PhraseStyle};
use crate::select::weighted_pick;
use crate::state::Instrument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagefright_prng::SeededRng;

/// Sections of the fixed song template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

/// Overall melodic shape of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contour {
    Arch,
    Ascending,
    Descending,
    Stable,
}

/// Derived phrase-selection profile for the performing member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhraseProfile {
    /// Probability of reusing the section's previous phrase per chord.
    pub cliche_reuse: f64,
    /// Performer skill mapped to 0-1; biases phrase length.
    pub phrase_complexity: f64,
    /// Skilled, un-burned-out performers reach rarer material.
    pub rare_motif_access: bool,
    pub preferred_style: PhraseStyle,
}

/// A phrase placed on a chord: the library phrase's degrees transposed onto
/// the chord's root degree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedPhrase {
    pub chord: String,
    pub phrase_id: String,
    pub degrees: Vec<i8>,
    pub bars: u8,
}

/// One section's melodic content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionMelody {
    pub section: SectionKind,
    pub phrases: Vec<PlacedPhrase>,
    pub contour: Contour,
}

/// The melody engine's artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MelodyResult {
    pub sections: Vec<SectionMelody>,
    pub song_structure: Vec<SectionKind>,
    pub characteristic_style: PhraseStyle,
    /// Metadata only — excluded from determinism comparisons.
    pub generated_at: DateTime<Utc>,
}

/// The fixed eight-section template.
pub fn song_structure() -> Vec<SectionKind> {
    use SectionKind::*;
    vec![Intro, Verse, Chorus, Verse, Chorus, Bridge, Chorus, Outro]
}

/// Generate a melody over the harmony result.
///
/// Total: always returns a melody, substituting the built-in phrase set
/// when the loaded library is empty or over-filtered.
pub fn generate_melody(
    harmony: &HarmonyResult,
    constraints: &Constraints,
    seed: &str,
    phrases: &[PhraseEntry],
) -> MelodyResult {
    let mut rng = SeededRng::new(seed);

    let builtin;
    let pool: &[PhraseEntry] = if phrases.is_empty() {
        log::warn!("phrase library is empty; using built-in fallback set");
        builtin = library::builtin_phrases();
        &builtin
    } else {
        phrases
    };

    let profile = phrase_profile(constraints, &mut rng);
    let structure = song_structure();
    let chords = &harmony.progression.chords;

    let mut sections = Vec::with_capacity(structure.len());
    for &section in &structure {
        sections.push(generate_section(
            section,
            section_chords(section, chords),
            pool,
            &profile,
            constraints,
            &mut rng,
        ));
    }

    MelodyResult {
        sections,
        song_structure: structure,
        characteristic_style: profile.preferred_style,
        generated_at: Utc::now(),
    }
}

/// Derive the phrase-selection profile from skill and psychology.
fn phrase_profile(constraints: &Constraints, rng: &mut SeededRng) -> PhraseProfile {
    let psych = &constraints.psych;
    let skill = constraints.band.member_skill(Instrument::Vocalist);

    let cliche_reuse = if psych.burnout > 50.0 { 0.7 } else { 0.2 };
    let phrase_complexity = skill / 100.0;
    let rare_motif_access = skill > 70.0 && psych.burnout < 30.0;

    let preferred_style = if psych.depression > 60.0 {
        PhraseStyle::Arch
    } else if rare_motif_access && rng.chance(0.5) {
        PhraseStyle::Arpeggiated
    } else {
        PhraseStyle::Stepwise
    };

    PhraseProfile {
        cliche_reuse,
        phrase_complexity,
        rare_motif_access,
        preferred_style,
    }
}

/// Chord slice for a section: intro uses the first two chords, bridge the
/// first three, outro the first one; everything else the full progression.
fn section_chords(section: SectionKind, chords: &[String]) -> &[String] {
    let take = match section {
        SectionKind::Intro => 2,
        SectionKind::Bridge => 3,
        SectionKind::Outro => 1,
        SectionKind::Verse | SectionKind::Chorus => chords.len(),
    };
    &chords[..take.min(chords.len())]
}

fn generate_section(
    section: SectionKind,
    chords: &[String],
    pool: &[PhraseEntry],
    profile: &PhraseProfile,
    constraints: &Constraints,
    rng: &mut SeededRng,
) -> SectionMelody {
    let skill = constraints.band.member_skill(Instrument::Vocalist);
    let mut phrases: Vec<PlacedPhrase> = Vec::with_capacity(chords.len());
    let mut previous: Option<PhraseEntry> = None;

    for chord in chords {
        // Cliché reuse: one roll per chord, consumed whether or not a
        // previous phrase exists.
        let reuse = rng.chance(profile.cliche_reuse);
        let entry = if let (true, Some(prev)) = (reuse, previous.as_ref()) {
            prev.clone()
        } else {
            let bars = roll_phrase_length(profile, rng);
            let candidates = gather_candidates(pool, bars, constraints, skill);
            weighted_pick(&candidates, rng, |p| {
                phrase_weight(p, section, constraints, skill)
            })
            .clone()
        };

        phrases.push(place_phrase(&entry, chord));
        previous = Some(entry);
    }

    let contour = classify_contour(&concat_degrees(&phrases));

    SectionMelody { section, phrases, contour }
}

/// Phrase length biased by performer complexity: high rolls on skilled
/// performers reach four bars, middling rolls two, everything else one.
fn roll_phrase_length(profile: &PhraseProfile, rng: &mut SeededRng) -> u8 {
    let roll = rng.next_f64();
    if roll > 0.6 && profile.phrase_complexity > 0.7 {
        4
    } else if roll > 0.4 {
        2
    } else {
        1
    }
}

/// The full phrase filter. All conditions must hold.
fn passes_full_filter(
    entry: &PhraseEntry,
    bars: u8,
    constraints: &Constraints,
    skill: f64,
) -> bool {
    entry.bars == bars
        && entry.required_skill <= 1.25 * (skill / 100.0)
        && (entry.style != PhraseStyle::Arch || constraints.psych.depression >= 60.0)
        && (constraints.psych.depression <= 60.0 || entry.character.melancholy >= 0.4)
        && (constraints.psych.burnout <= 60.0 || entry.complexity <= 0.7)
}

/// Filter with progressive widening, mirroring the harmony engine's order.
fn gather_candidates(
    pool: &[PhraseEntry],
    bars: u8,
    constraints: &Constraints,
    skill: f64,
) -> Vec<PhraseEntry> {
    let full: Vec<PhraseEntry> = pool
        .iter()
        .filter(|e| passes_full_filter(e, bars, constraints, skill))
        .cloned()
        .collect();
    if !full.is_empty() {
        return full;
    }

    log::warn!("no phrase passed the full filter; widening to the {bars}-bar bucket");
    let bucket: Vec<PhraseEntry> = pool.iter().filter(|e| e.bars == bars).cloned().collect();
    if !bucket.is_empty() {
        return bucket;
    }

    log::warn!("no {bars}-bar phrase in the library; falling back to built-in set");
    let builtin = library::builtin_phrases();
    let builtin_bucket: Vec<PhraseEntry> =
        builtin.iter().filter(|e| e.bars == bars).cloned().collect();
    if !builtin_bucket.is_empty() {
        return builtin_bucket;
    }

    builtin
}

/// Tag weights: melancholy match against depression, skill match against
/// the performer, hook potential, and a per-section phrase-function factor.
fn phrase_weight(
    entry: &PhraseEntry,
    section: SectionKind,
    constraints: &Constraints,
    skill: f64,
) -> f64 {
    let melancholy_target = constraints.psych.depression / 100.0;
    let melancholy_match = (1.0 - (entry.character.melancholy - melancholy_target).abs()).max(0.05);
    let skill_match = (1.0 - (entry.required_skill - skill / 100.0).abs()).max(0.05);
    let hook = 0.5 + entry.hook_potential;
    let function = match section {
        SectionKind::Intro => 0.5 + entry.function.opening,
        SectionKind::Bridge => 0.5 + entry.function.development,
        SectionKind::Outro => 0.5 + entry.function.closing,
        SectionKind::Verse | SectionKind::Chorus => 1.0,
    };
    melancholy_match * skill_match * hook * function
}

/// Transpose the phrase's degrees onto the chord's root degree.
fn place_phrase(entry: &PhraseEntry, chord: &str) -> PlacedPhrase {
    let root = chord_root_degree(chord);
    PlacedPhrase {
        chord: chord.to_string(),
        phrase_id: entry.id.clone(),
        degrees: entry.degrees.iter().map(|d| d + root).collect(),
        bars: entry.bars,
    }
}

/// Scale degree (0-6) of a roman-numeral chord symbol's root. Accidentals
/// and quality suffixes ("bVII", "V7", "iv") are ignored for degree lookup.
fn chord_root_degree(chord: &str) -> i8 {
    let numeral: String = chord
        .chars()
        .filter(|c| matches!(c, 'i' | 'I' | 'v' | 'V'))
        .collect();
    match numeral.to_ascii_uppercase().as_str() {
        "II" => 1,
        "III" => 2,
        "IV" => 3,
        "V" => 4,
        "VI" => 5,
        "VII" => 6,
        // "I" and anything unrecognized sit on the tonic.
        _ => 0,
    }
}

fn concat_degrees(phrases: &[PlacedPhrase]) -> Vec<i8> {
    phrases.iter().flat_map(|p| p.degrees.iter().copied()).collect()
}

/// Contour classification: arch when the line rises then ends below its
/// start, ascending/descending on a net change of more than one degree,
/// stable otherwise.
fn classify_contour(degrees: &[i8]) -> Contour {
    let (Some(&first), Some(&last)) = (degrees.first(), degrees.last()) else {
        return Contour::Stable;
    };
    let peak = degrees.iter().copied().max().unwrap_or(first);
    if peak > first && last < first {
        Contour::Arch
    } else if last - first > 1 {
        Contour::Ascending
    } else if first - last > 1 {
        Contour::Descending
    } else {
        Contour::Stable
    }
}
