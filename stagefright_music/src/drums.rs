// Drum engine: tempo selection, pattern-family lookup, and the three
// mutation passes (skill, psychology, context).
//
// The pass order is part of the output contract — each pass consumes PRNG
// draws, so reordering them changes every downstream value for a given
// seed. Keep the order: tempo, family, skill, psychology, context.
//
// The engine never mutates library patterns: the selected pattern is cloned
// and all mutation happens on the clone. It also never fails — an
// unrecognized family id falls back to the library's first medium pattern,
// and an empty library falls back to the built-in set.

use crate::constraints::Constraints;
use crate::genre::Genre;
use crate::library::{self, DrumLibrary, DrumPattern, TempoBucket};
use crate::state::Instrument;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagefright_prng::SeededRng;

/// Ghost-snare candidate slots: the off-beat eighths of the bar.
const GHOST_SLOTS: [f64; 4] = [0.75, 1.75, 2.75, 3.75];

/// The drum engine's artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrumResult {
    pub pattern: DrumPattern,
    /// Which family the pattern came from.
    pub family_id: String,
    /// Beats per minute, always within [60, 180].
    pub tempo: f64,
    pub genre: Genre,
    /// Metadata only — excluded from determinism comparisons.
    pub generated_at: DateTime<Utc>,
}

/// Generate a drum pattern for the given constraints, genre, and seed.
///
/// Total: always returns a pattern.
pub fn generate_drums(
    constraints: &Constraints,
    genre: Genre,
    seed: &str,
    library: &DrumLibrary,
) -> DrumResult {
    let mut rng = SeededRng::new(seed);

    let builtin;
    let library = if library.is_empty() {
        log::warn!("drum library is empty; using built-in fallback set");
        builtin = library::builtin_drum_library();
        &builtin
    } else {
        library
    };

    let tempo = select_tempo(constraints, &mut rng);

    let families = genre.profile().drum_families;
    let family_id = families[rng.next_index(families.len())];
    let bucket = TempoBucket::from_tempo(tempo);
    let mut pattern = match library.pattern(family_id, bucket) {
        Some(p) => p.clone(),
        None => {
            log::warn!("family {family_id:?} missing from drum library; using fallback pattern");
            library
                .fallback_pattern()
                .cloned()
                .unwrap_or_else(default_backbeat)
        }
    };

    apply_skill(&mut pattern, constraints, &mut rng);
    apply_psychology(&mut pattern, constraints, &mut rng);
    apply_context(&mut pattern, constraints, &mut rng);

    DrumResult {
        pattern,
        family_id: family_id.to_string(),
        tempo,
        genre,
        generated_at: Utc::now(),
    }
}

/// Base 120 BPM, dragged down by depression, pushed up by substance use,
/// stretched either way by confidence extremes. Clamped to [60, 180].
fn select_tempo(constraints: &Constraints, rng: &mut SeededRng) -> f64 {
    let psych = &constraints.psych;
    let mut tempo = 120.0;
    tempo -= 0.2 * psych.depression;
    tempo += 0.1 * psych.substance_use;
    if constraints.band.confidence > 75.0 {
        tempo += rng.next_f64() * 20.0;
    }
    if constraints.band.confidence < 35.0 {
        tempo -= rng.next_f64() * 15.0;
    }
    tempo.clamp(60.0, 180.0)
}

/// Skill pass: sloppy timing for weak drummers, ghost notes and creative
/// fills for strong ones.
fn apply_skill(pattern: &mut DrumPattern, constraints: &Constraints, rng: &mut SeededRng) {
    let skill = constraints.band.member_skill(Instrument::Drummer);

    let jitter = (100.0 - skill) * 0.005;
    jitter_hits(&mut pattern.kick, jitter, rng);
    jitter_hits(&mut pattern.snare, jitter, rng);

    if skill > 60.0 {
        // 0% at skill 60 up to 30% at skill 100, per slot.
        let p = 0.3 * (skill - 60.0) / 40.0;
        for slot in GHOST_SLOTS {
            if rng.chance(p) {
                pattern.ghost_snare.push(slot);
            }
        }
    }

    if skill > 70.0 {
        pattern.has_creative_fill = true;
        pattern.fill_complexity = (skill - 70.0) / 30.0;
    }
}

/// Psychology pass: stress shakes the backbone, substance use stumbles a
/// kick, depression thins the hi-hats.
fn apply_psychology(pattern: &mut DrumPattern, constraints: &Constraints, rng: &mut SeededRng) {
    let psych = &constraints.psych;

    if psych.stress > 50.0 {
        let chaos = (psych.stress - 50.0) * 0.01;
        jitter_hits(&mut pattern.kick, chaos, rng);
        jitter_hits(&mut pattern.snare, chaos, rng);
    }

    if psych.substance_use > 40.0
        && rng.chance(psych.substance_use / 100.0)
        && !pattern.kick.is_empty()
    {
        let idx = rng.next_index(pattern.kick.len());
        let duplicated = pattern.kick[idx] + 0.1;
        pattern.kick.push(duplicated);
        pattern.kick.sort_by(|a, b| a.total_cmp(b));
    }

    if psych.depression > 60.0 {
        let keep = (pattern.hihat.len() as f64 * 0.7).floor() as usize;
        pattern.hihat.truncate(keep);
    }
}

/// Context pass: bad gear smears the kick slightly.
fn apply_context(pattern: &mut DrumPattern, constraints: &Constraints, rng: &mut SeededRng) {
    let smear = (100.0 - constraints.context.equipment_quality) * 0.002;
    jitter_hits(&mut pattern.kick, smear, rng);
}

/// Displace each hit by a centered offset of magnitude `amount`, keeping it
/// inside the bar. An `amount` of zero still consumes one draw per hit so
/// the stream layout does not depend on constraint values.
fn jitter_hits(hits: &mut [f64], amount: f64, rng: &mut SeededRng) {
    for hit in hits {
        *hit = (*hit + (rng.next_f64() - 0.5) * amount).clamp(0.0, 4.0);
    }
}

/// Absolute last resort when even the fallback library is empty.
fn default_backbeat() -> DrumPattern {
    DrumPattern {
        kick: vec![0.0, 2.0],
        snare: vec![1.0, 3.0],
        hihat: vec![0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5],
        ghost_snare: Vec::new(),
        has_creative_fill: false,
        fill_complexity: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::extract_constraints;
    use crate::state::{BandMember, BandState, PsychState, SimulationState};

    fn state_with(psych: PsychState, drummer_skill: f64) -> SimulationState {
        SimulationState {
            band: BandState {
                members: vec![BandMember {
                    name: "Sticks".into(),
                    instrument: Instrument::Drummer,
                    skill: drummer_skill,
                }],
                ..Default::default()
            },
            psych,
            ..Default::default()
        }
    }

    #[test]
    fn deterministic_for_fixed_inputs() {
        let constraints = extract_constraints(&state_with(PsychState::default(), 70.0));
        let library = library::builtin_drum_library();
        let a = generate_drums(&constraints, Genre::Rock, "seed-1", &library);
        let b = generate_drums(&constraints, Genre::Rock, "seed-1", &library);
        assert_eq!(a.pattern, b.pattern);
        assert_eq!(a.tempo, b.tempo);
        assert_eq!(a.family_id, b.family_id);
    }

    #[test]
    fn tempo_always_in_bounds() {
        let library = library::builtin_drum_library();
        let extremes = [
            PsychState { depression: 100.0, ..Default::default() },
            PsychState { substance_use: 100.0, ..Default::default() },
            PsychState { depression: 100.0, substance_use: 100.0, ..Default::default() },
            PsychState::default(),
        ];
        for (i, psych) in extremes.into_iter().enumerate() {
            for confidence in [0.0, 50.0, 100.0] {
                let mut state = state_with(psych.clone(), 50.0);
                state.band.confidence = confidence;
                let constraints = extract_constraints(&state);
                for seed in 0..20 {
                    let result = generate_drums(
                        &constraints,
                        Genre::Metal,
                        &format!("tempo-{i}-{seed}"),
                        &library,
                    );
                    assert!(
                        (60.0..=180.0).contains(&result.tempo),
                        "tempo {} out of bounds",
                        result.tempo
                    );
                }
            }
        }
    }

    #[test]
    fn skilled_calm_drummer_scenario() {
        // Drummer skill 90, low depression/stress, rock, seed "t1":
        // tempo must land in [110, 160] and the fill flag must be set.
        let state = state_with(
            PsychState { depression: 10.0, stress: 10.0, ..Default::default() },
            90.0,
        );
        let constraints = extract_constraints(&state);
        let library = library::builtin_drum_library();
        let result = generate_drums(&constraints, Genre::Rock, "t1", &library);
        assert!(
            (110.0..=160.0).contains(&result.tempo),
            "tempo {} outside scenario window",
            result.tempo
        );
        assert!(result.pattern.has_creative_fill);
        assert!((result.pattern.fill_complexity - (90.0 - 70.0) / 30.0).abs() < 1e-9);
    }

    #[test]
    fn weak_drummer_gets_no_embellishments() {
        let constraints = extract_constraints(&state_with(PsychState::default(), 40.0));
        let library = library::builtin_drum_library();
        let result = generate_drums(&constraints, Genre::Punk, "plain", &library);
        assert!(!result.pattern.has_creative_fill);
        assert!(result.pattern.ghost_snare.is_empty());
    }

    #[test]
    fn depression_thins_hihats() {
        let library = library::builtin_drum_library();
        let calm = extract_constraints(&state_with(PsychState::default(), 50.0));
        let sad = extract_constraints(&state_with(
            PsychState { depression: 80.0, ..Default::default() },
            50.0,
        ));
        // Same family/bucket comparison: depression also lowers tempo, so
        // pin substance use to put both runs in the same bucket.
        let calm_result = generate_drums(&calm, Genre::Pop, "hats", &library);
        let sad_result = generate_drums(&sad, Genre::Pop, "hats", &library);
        assert!(
            sad_result.pattern.hihat.len() < calm_result.pattern.hihat.len(),
            "depression should truncate hi-hats ({} vs {})",
            sad_result.pattern.hihat.len(),
            calm_result.pattern.hihat.len()
        );
    }

    #[test]
    fn substance_use_can_duplicate_kicks() {
        let library = library::builtin_drum_library();
        let sober = extract_constraints(&state_with(PsychState::default(), 50.0));
        let high = extract_constraints(&state_with(
            PsychState { substance_use: 95.0, ..Default::default() },
            50.0,
        ));
        let mut saw_extra_kick = false;
        for seed in 0..50 {
            let seed = format!("dup-{seed}");
            let sober_kicks = generate_drums(&sober, Genre::Rock, &seed, &library).pattern.kick.len();
            let high_kicks = generate_drums(&high, Genre::Rock, &seed, &library).pattern.kick.len();
            if high_kicks > sober_kicks {
                saw_extra_kick = true;
                break;
            }
        }
        assert!(saw_extra_kick, "heavy substance use never duplicated a kick in 50 seeds");
    }

    #[test]
    fn kick_hits_stay_sorted_after_duplication() {
        let constraints = extract_constraints(&state_with(
            PsychState { substance_use: 100.0, ..Default::default() },
            50.0,
        ));
        let library = library::builtin_drum_library();
        for seed in 0..20 {
            let result = generate_drums(&constraints, Genre::Rock, &format!("sort-{seed}"), &library);
            let kicks = &result.pattern.kick;
            assert!(
                kicks.windows(2).all(|w| w[0] <= w[1]),
                "kick hits out of order: {kicks:?}"
            );
        }
    }

    #[test]
    fn empty_library_uses_builtin_fallback() {
        let constraints = extract_constraints(&state_with(PsychState::default(), 50.0));
        let result = generate_drums(&constraints, Genre::Rock, "empty", &DrumLibrary::default());
        assert!(!result.pattern.kick.is_empty());
        assert!(!result.pattern.hihat.is_empty());
    }

    #[test]
    fn hits_stay_inside_the_bar() {
        let constraints = extract_constraints(&state_with(
            PsychState { stress: 100.0, ..Default::default() },
            0.0,
        ));
        let library = library::builtin_drum_library();
        for seed in 0..20 {
            let result = generate_drums(&constraints, Genre::Rock, &format!("bar-{seed}"), &library);
            for hit in result.pattern.kick.iter().chain(&result.pattern.snare) {
                assert!((0.0..=4.0).contains(hit), "hit {hit} escaped the bar");
            }
        }
    }
}
