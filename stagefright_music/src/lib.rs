// Stagefright Song Generator
//
// A mood-responsive deterministic music generator for the band simulation.
// A snapshot of simulation state (band skill, psychology, industry pressure,
// performance context, recent narrative events) is reduced to an immutable
// constraint set, then three content engines filter and weight-select from
// tagged content libraries to produce a drum pattern, a chord progression,
// and a melody. The same state and seed always reproduce the same song;
// different psychological states with the same seed produce audibly
// different songs.
//
// Architecture:
// - state.rs: Simulation-state input schema (band roster, psych scalars,
//   label deal, venue context, narrative events)
// - constraints.rs: Pure SimulationState -> Constraints extraction
// - genre.rs: Genre and mode definitions with per-genre generation profiles
// - library.rs: Tagged content-entry schemas, the injected content
//   repository, JSON loading, and built-in fallback sets
// - select.rs: Weighted roulette selection shared by harmony and melody
// - drums.rs: Drum engine (tempo, pattern family, skill/psych/context passes)
// - harmony.rs: Harmony engine (mode, candidate filter, roulette, customization)
// - melody.rs: Melody engine (phrase profile, song structure, per-chord
//   phrase selection, contour classification)
// - titles.rs: Song-title generation from narrative lyric themes
// - song.rs: Orchestrator (sub-seed derivation, stage sequencing, Song
//   assembly, analysis scores)
//
// The generator is deterministic given a seed, supporting reproducible
// output. Drum and harmony run in parallel (disjoint PRNG streams); melody
// depends on harmony's output and runs strictly after it.

pub mod constraints;
pub mod drums;
pub mod genre;
pub mod harmony;
pub mod library;
pub mod melody;
pub mod select;
pub mod song;
pub mod state;
pub mod titles;
