// Harmony engine: mode selection, psychological candidate filtering,
// weighted roulette selection, and customization of the chosen progression.
//
// Filtering is strict-then-widening: the full psychological filter first,
// then mode-only, then the built-in fallback set under the mode filter, then
// the whole built-in set. The same widening order is used by the melody
// engine (melody.rs) — keep them consistent.
//
// Library entries are never mutated: customization clones the winner first.

use crate::constraints::Constraints;
use crate::genre::{Genre, MusicalMode};
use crate::library::{self, ProgressionEntry};
use crate::select::weighted_pick;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagefright_prng::SeededRng;

/// The harmony engine's artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarmonyResult {
    /// Customized clone of the selected library progression.
    pub progression: ProgressionEntry,
    pub mode: MusicalMode,
    pub genre: Genre,
    /// Metadata only — excluded from determinism comparisons.
    pub generated_at: DateTime<Utc>,
}

/// Generate a chord progression for the given constraints, genre, and seed.
///
/// Total: always returns a progression, substituting the built-in set when
/// the loaded library is empty or over-filtered.
pub fn generate_harmony(
    constraints: &Constraints,
    genre: Genre,
    seed: &str,
    progressions: &[ProgressionEntry],
) -> HarmonyResult {
    let mut rng = SeededRng::new(seed);

    let builtin;
    let pool: &[ProgressionEntry] = if progressions.is_empty() {
        log::warn!("progression library is empty; using built-in fallback set");
        builtin = library::builtin_progressions();
        &builtin
    } else {
        progressions
    };

    let mode = select_mode(constraints, genre, &mut rng);
    let candidates = gather_candidates(pool, mode, genre, constraints);

    let chosen = weighted_pick(&candidates, &mut rng, |entry| {
        progression_weight(entry, constraints)
    });

    let progression = customize(chosen, constraints);

    HarmonyResult {
        progression,
        mode,
        genre,
        generated_at: Utc::now(),
    }
}

/// Depression or paranoia force minor when the genre supports it; otherwise
/// the mode is uniform over the genre's supported set.
fn select_mode(constraints: &Constraints, genre: Genre, rng: &mut SeededRng) -> MusicalMode {
    let psych = &constraints.psych;
    if (psych.depression > 60.0 || psych.paranoia > 70.0) && genre.supports_minor() {
        return MusicalMode::Minor;
    }
    let modes = genre.profile().modes;
    modes[rng.next_index(modes.len())]
}

/// The full psychological filter. All conditions must hold.
fn passes_full_filter(
    entry: &ProgressionEntry,
    mode: MusicalMode,
    genre: Genre,
    constraints: &Constraints,
) -> bool {
    passes_mode_filter(entry, mode, genre)
        && entry.complexity <= genre.profile().max_complexity
        && (constraints.band.confidence >= 30.0 || entry.familiarity >= 0.7)
        && (constraints.industry.label_pressure <= 70.0 || entry.commercial_safety >= 0.6)
        && (constraints.psych.depression <= 60.0 || entry.resonance.depression_weight >= 0.4)
        && (constraints.psych.corruption <= 60.0 || entry.resonance.corruption_level >= 0.4)
        && (constraints.psych.burnout <= 60.0 || entry.familiarity >= 0.6)
}

/// The structural filter used when widening: mode match plus genre tag.
fn passes_mode_filter(entry: &ProgressionEntry, mode: MusicalMode, genre: Genre) -> bool {
    entry.mode == mode && (entry.genres.is_empty() || entry.genres.contains(&genre))
}

/// Filter with progressive widening. Returns owned clones so the fallback
/// steps can materialize the built-in set without lifetime gymnastics.
fn gather_candidates(
    pool: &[ProgressionEntry],
    mode: MusicalMode,
    genre: Genre,
    constraints: &Constraints,
) -> Vec<ProgressionEntry> {
    let full: Vec<ProgressionEntry> = pool
        .iter()
        .filter(|e| passes_full_filter(e, mode, genre, constraints))
        .cloned()
        .collect();
    if !full.is_empty() {
        return full;
    }

    log::warn!("no progression passed the full filter; widening to mode-only");
    let mode_only: Vec<ProgressionEntry> = pool
        .iter()
        .filter(|e| passes_mode_filter(e, mode, genre))
        .cloned()
        .collect();
    if !mode_only.is_empty() {
        return mode_only;
    }

    log::warn!("no progression in mode {mode:?}; falling back to built-in set");
    let builtin = library::builtin_progressions();
    let builtin_mode: Vec<ProgressionEntry> = builtin
        .iter()
        .filter(|e| e.mode == mode)
        .cloned()
        .collect();
    if !builtin_mode.is_empty() {
        return builtin_mode;
    }

    builtin
}

/// Multiplicative tag weights. Each triggered pressure scales the weight by
/// `0.5 + score`, keeping every weight positive while favoring entries
/// whose tags fit the current state.
fn progression_weight(entry: &ProgressionEntry, constraints: &Constraints) -> f64 {
    let mut weight = 1.0;
    if constraints.industry.label_pressure > 50.0 {
        weight *= 0.5 + entry.commercial_safety;
    }
    if constraints.psych.burnout > 60.0 {
        weight *= 0.5 + entry.familiarity;
    }
    if constraints.industry.label_pressure > 70.0 {
        weight *= 0.5 + entry.catchiness;
    }
    if constraints.psych.depression > 60.0 {
        weight *= 0.5 + entry.resonance.depression_weight;
    }
    if constraints.psych.corruption > 60.0 {
        weight *= 0.5 + entry.resonance.corruption_level;
    }
    weight
}

/// Clone the winner and apply psychological customization.
fn customize(entry: &ProgressionEntry, constraints: &Constraints) -> ProgressionEntry {
    let mut progression = entry.clone();
    if constraints.psych.paranoia > 75.0 {
        progression.harmonic_tension = (progression.harmonic_tension + 0.2).min(1.0);
        progression.dissonance = (progression.dissonance + 0.3).min(1.0);
    }
    if constraints.psych.addiction_risk > 60.0 {
        progression.has_unusual_substitution = true;
    }
    progression
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::extract_constraints;
    use crate::state::{LabelDeal, LabelKind, PsychState, SimulationState};

    fn state_with(psych: PsychState) -> SimulationState {
        SimulationState { psych, ..Default::default() }
    }

    fn harmony_for(psych: PsychState, genre: Genre, seed: &str) -> HarmonyResult {
        let constraints = extract_constraints(&state_with(psych));
        generate_harmony(&constraints, genre, seed, &library::builtin_progressions())
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let psych = PsychState { stress: 40.0, ..Default::default() };
        let a = harmony_for(psych.clone(), Genre::Indie, "h-seed");
        let b = harmony_for(psych, Genre::Indie, "h-seed");
        assert_eq!(a.progression, b.progression);
        assert_eq!(a.mode, b.mode);
    }

    #[test]
    fn depression_forces_minor() {
        for seed in 0..20 {
            let result = harmony_for(
                PsychState { depression: 85.0, ..Default::default() },
                Genre::Rock,
                &format!("minor-{seed}"),
            );
            assert_eq!(result.mode, MusicalMode::Minor);
        }
    }

    #[test]
    fn paranoia_forces_minor() {
        for seed in 0..20 {
            let result = harmony_for(
                PsychState { paranoia: 80.0, ..Default::default() },
                Genre::Pop,
                &format!("para-{seed}"),
            );
            assert_eq!(result.mode, MusicalMode::Minor);
        }
    }

    #[test]
    fn depressive_selection_respects_resonance() {
        // With depression 85, every surviving candidate carries
        // depression_weight >= 0.4.
        for seed in 0..30 {
            let result = harmony_for(
                PsychState { depression: 85.0, ..Default::default() },
                Genre::Rock,
                &format!("res-{seed}"),
            );
            assert!(
                result.progression.resonance.depression_weight >= 0.4,
                "{} has depression_weight {}",
                result.progression.id,
                result.progression.resonance.depression_weight
            );
        }
    }

    #[test]
    fn mood_shift_changes_minor_probability() {
        // Holding genre fixed, raising depression from 20 to 90 must raise
        // the fraction of seeds that land in minor.
        let count_minor = |depression: f64| {
            (0..200)
                .filter(|seed| {
                    harmony_for(
                        PsychState { depression, ..Default::default() },
                        Genre::Rock,
                        &format!("mood-{seed}"),
                    )
                    .mode == MusicalMode::Minor
                })
                .count()
        };
        let low = count_minor(20.0);
        let high = count_minor(90.0);
        assert_eq!(high, 200, "depression 90 should always force minor");
        assert!(low < high, "minor fraction should rise with depression ({low} vs {high})");
    }

    #[test]
    fn complexity_respects_genre_ceiling() {
        for seed in 0..30 {
            let result = harmony_for(PsychState::default(), Genre::Punk, &format!("cx-{seed}"));
            assert!(result.progression.complexity <= Genre::Punk.profile().max_complexity);
        }
    }

    #[test]
    fn label_pressure_prefers_safe_progressions() {
        let pressured = SimulationState {
            label: Some(LabelDeal { label: LabelKind::Major, pressure: 90.0 }),
            ..Default::default()
        };
        let constraints = extract_constraints(&pressured);
        let progressions = library::builtin_progressions();
        for seed in 0..30 {
            let result =
                generate_harmony(&constraints, Genre::Pop, &format!("lp-{seed}"), &progressions);
            assert!(
                result.progression.commercial_safety >= 0.6,
                "{} is not commercially safe under pressure",
                result.progression.id
            );
        }
    }

    #[test]
    fn paranoia_raises_tension_on_a_clone() {
        let progressions = library::builtin_progressions();
        let constraints = extract_constraints(&state_with(PsychState {
            paranoia: 90.0,
            ..Default::default()
        }));
        let result = generate_harmony(&constraints, Genre::Metal, "tense", &progressions);
        let original = progressions
            .iter()
            .find(|p| p.id == result.progression.id)
            .expect("winner comes from the library");
        assert!(result.progression.dissonance > original.dissonance);
        assert!(result.progression.dissonance <= 1.0);
        // The library entry itself is untouched.
        assert_eq!(original, library::builtin_progressions().iter().find(|p| p.id == original.id).unwrap());
    }

    #[test]
    fn addiction_risk_flags_substitution() {
        let result = harmony_for(
            PsychState { addiction_risk: 75.0, ..Default::default() },
            Genre::Rock,
            "subst",
        );
        assert!(result.progression.has_unusual_substitution);
    }

    #[test]
    fn empty_library_falls_back_to_builtin() {
        let constraints = extract_constraints(&SimulationState::default());
        let result = generate_harmony(&constraints, Genre::Rock, "fb", &[]);
        assert!(!result.progression.chords.is_empty());
    }

    #[test]
    fn overfiltered_library_widens_to_builtin() {
        // A library with a single high-complexity major progression cannot
        // satisfy a depressed minor request; the engine must widen to the
        // built-in set rather than fail.
        let lone = vec![ProgressionEntry {
            mode: MusicalMode::Major,
            complexity: 0.95,
            ..library::builtin_progressions()[0].clone()
        }];
        let constraints = extract_constraints(&state_with(PsychState {
            depression: 90.0,
            ..Default::default()
        }));
        let result = generate_harmony(&constraints, Genre::Rock, "widen", &lone);
        assert_eq!(result.mode, MusicalMode::Minor);
        assert_eq!(result.progression.mode, MusicalMode::Minor);
    }
}
