// Orchestrator: sequences the pipeline and assembles the final Song record.
//
// The pipeline: derive the master seed (explicit override or
// "{band}-{week}-{genre}"), extract constraints once, run the drum and
// harmony engines in parallel (disjoint PRNG streams derived by sub-seed
// suffixing), run melody strictly after harmony, generate a title, and
// assemble the aggregate with a composition summary and three pure analysis
// scores.
//
// Analysis scores are weighted sums over the constraints and generated
// results — no further stochastic choices happen after the engines return.
//
// **Critical constraint: determinism.** The rayon join is safe because each
// engine owns its own PRNG and the join returns both results regardless of
// completion order; nothing observable depends on scheduling.

use crate::constraints::{Constraints, extract_constraints};
use crate::drums::{DrumResult, generate_drums};
use crate::genre::{Genre, MusicalMode};
use crate::harmony::{HarmonyResult, generate_harmony};
use crate::library::ContentLibraries;
use crate::melody::{MelodyResult, SectionKind, generate_melody};
use crate::state::SimulationState;
use crate::titles::generate_title;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stagefright_prng::SeededRng;

/// Tempo/mode/genre/structure digest for quick display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionSummary {
    pub tempo: f64,
    pub mode: MusicalMode,
    pub genre: Genre,
    pub structure: Vec<SectionKind>,
}

/// Pure derived scores over the constraints and results, 0-100 each.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisScores {
    pub commercial_viability: f64,
    pub originality: f64,
    pub quality: f64,
}

/// The final aggregate handed to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub genre: Genre,
    /// The master seed the song was generated from; replaying it with the
    /// same simulation state reproduces the song exactly.
    pub seed: String,
    pub constraints: Constraints,
    pub drums: DrumResult,
    pub harmony: HarmonyResult,
    pub melody: MelodyResult,
    pub summary: CompositionSummary,
    pub analysis: AnalysisScores,
    /// Metadata only — excluded from determinism comparisons.
    pub generated_at: DateTime<Utc>,
}

/// Run the full generation pipeline.
///
/// `seed` overrides the derived master seed; pass `None` to use
/// "{band}-{week}-{genre}". Total: always returns a song.
pub fn generate_song(
    state: &SimulationState,
    genre: Genre,
    seed: Option<&str>,
    libraries: &ContentLibraries,
) -> Song {
    let master_seed = match seed {
        Some(s) => s.to_string(),
        None => format!("{}-{}-{}", state.band.name, state.week, genre),
    };

    let constraints = extract_constraints(state);

    // Drum and harmony share no mutable state — each derives its own PRNG
    // from a distinct sub-seed — so this is the one legal parallel pair.
    let (drums, harmony) = rayon::join(
        || {
            generate_drums(
                &constraints,
                genre,
                &format!("{master_seed}-drums"),
                &libraries.drums,
            )
        },
        || {
            generate_harmony(
                &constraints,
                genre,
                &format!("{master_seed}-harmony"),
                &libraries.progressions,
            )
        },
    );

    // Melody depends on the chosen progression and must not start earlier.
    let melody = generate_melody(
        &harmony,
        &constraints,
        &format!("{master_seed}-melody"),
        &libraries.phrases,
    );

    let mut title_rng = SeededRng::new(&format!("{master_seed}-title"));
    let title = generate_title(&constraints.narrative.lyric_themes, &mut title_rng);

    let summary = CompositionSummary {
        tempo: drums.tempo,
        mode: harmony.mode,
        genre,
        structure: melody.song_structure.clone(),
    };
    let analysis = analyze(&constraints, &harmony);

    Song {
        title,
        genre,
        seed: master_seed,
        constraints,
        drums,
        harmony,
        melody,
        summary,
        analysis,
        generated_at: Utc::now(),
    }
}

/// Weighted-sum analysis over the constraints and the chosen progression.
fn analyze(constraints: &Constraints, harmony: &HarmonyResult) -> AnalysisScores {
    let progression = &harmony.progression;
    let band = &constraints.band;
    let psych = &constraints.psych;
    let industry = &constraints.industry;
    let context = &constraints.context;

    // How close the progression's complexity sits to what the fans expect.
    let fan_alignment =
        100.0 - 100.0 * (progression.complexity - industry.fan_expectations.complexity).abs();

    let commercial_viability = 35.0 * progression.catchiness
        + 25.0 * progression.commercial_safety
        + 0.2 * band.overall_skill
        + 0.2 * fan_alignment;

    let originality = 30.0 * (1.0 - progression.familiarity)
        + 25.0 * progression.complexity
        + 0.25 * psych.creative_potential
        + if progression.has_unusual_substitution { 10.0 } else { 0.0 }
        + 0.1 * (100.0 - industry.label_pressure);

    let quality = 0.35 * band.overall_skill
        + 0.2 * band.chemistry
        + 0.2 * psych.mental_health
        + 0.15 * context.equipment_quality
        + 0.1 * context.studio_quality;

    AnalysisScores {
        commercial_viability: commercial_viability.clamp(0.0, 100.0),
        originality: originality.clamp(0.0, 100.0),
        quality: quality.clamp(0.0, 100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library;
    use crate::state::{BandMember, BandState, Instrument};

    fn demo_state() -> SimulationState {
        SimulationState {
            week: 7,
            band: BandState {
                name: "Feedback Loop".into(),
                members: vec![
                    BandMember { name: "Jo".into(), instrument: Instrument::Vocalist, skill: 65.0 },
                    BandMember { name: "Max".into(), instrument: Instrument::Drummer, skill: 72.0 },
                ],
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn builtin_libraries() -> ContentLibraries {
        ContentLibraries {
            drums: library::builtin_drum_library(),
            progressions: library::builtin_progressions(),
            phrases: library::builtin_phrases(),
        }
    }

    #[test]
    fn derived_master_seed_formats_band_week_genre() {
        let libraries = builtin_libraries();
        let song = generate_song(&demo_state(), Genre::Indie, None, &libraries);
        assert_eq!(song.seed, "Feedback Loop-7-indie");
    }

    #[test]
    fn explicit_seed_overrides_derivation() {
        let libraries = builtin_libraries();
        let song = generate_song(&demo_state(), Genre::Indie, Some("override-1"), &libraries);
        assert_eq!(song.seed, "override-1");
    }

    #[test]
    fn summary_mirrors_results() {
        let libraries = builtin_libraries();
        let song = generate_song(&demo_state(), Genre::Rock, Some("sum"), &libraries);
        assert_eq!(song.summary.tempo, song.drums.tempo);
        assert_eq!(song.summary.mode, song.harmony.mode);
        assert_eq!(song.summary.structure, song.melody.song_structure);
        assert_eq!(song.summary.genre, Genre::Rock);
    }

    #[test]
    fn analysis_scores_in_range() {
        let libraries = builtin_libraries();
        for seed in 0..20 {
            let song = generate_song(&demo_state(), Genre::Pop, Some(&format!("an-{seed}")), &libraries);
            for score in [
                song.analysis.commercial_viability,
                song.analysis.originality,
                song.analysis.quality,
            ] {
                assert!((0.0..=100.0).contains(&score), "score {score} out of range");
            }
        }
    }

    #[test]
    fn analysis_is_pure_over_inputs() {
        let libraries = builtin_libraries();
        let a = generate_song(&demo_state(), Genre::Rock, Some("pure"), &libraries);
        let b = generate_song(&demo_state(), Genre::Rock, Some("pure"), &libraries);
        assert_eq!(a.analysis.commercial_viability, b.analysis.commercial_viability);
        assert_eq!(a.analysis.originality, b.analysis.originality);
        assert_eq!(a.analysis.quality, b.analysis.quality);
    }
}
