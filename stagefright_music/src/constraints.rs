// Constraint extraction: the pure mapping from simulation state to the
// immutable parameter set the engines generate from.
//
// `extract_constraints` is total — every missing input field resolves to its
// documented default, every derived scalar is clamped to its documented
// range, and nothing here can fail or touch global state. The snapshot is
// produced once per generation call and never mutated afterwards.
//
// The fixed mapping tables (fan expectations per fanbase kind, lyric themes
// and tone deltas per narrative event kind) live at the bottom of this file.
//
// **Critical constraint: determinism.** The constraints are a pure function
// of the input state; the only non-derived field is the `extracted_at`
// timestamp, which is metadata and excluded from determinism comparisons.

use crate::genre::Genre;
use crate::state::{FanbaseKind, Instrument, NarrativeEventKind, SimulationState};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The immutable, derived generation parameters. Created once per call,
/// shared read-only by all three engines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constraints {
    pub band: BandConstraints,
    pub psych: PsychConstraints,
    pub industry: IndustryConstraints,
    pub context: ContextConstraints,
    pub narrative: NarrativeConstraints,
    /// Metadata only — excluded from determinism comparisons.
    pub extracted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BandConstraints {
    /// Mean skill across the roster; 50 for an empty roster.
    pub overall_skill: f64,
    /// Per-role skill; lookups for absent roles default to 50.
    pub member_skills: BTreeMap<Instrument, f64>,
    /// Mean pairwise chemistry; 50 with fewer than two members.
    pub chemistry: f64,
    pub confidence: f64,
    /// gigs + 5 * albums.
    pub experience: f64,
    /// min(100, gigs / 10).
    pub maturity: f64,
}

impl BandConstraints {
    /// Skill for a role, defaulting to 50 when the role is absent.
    pub fn member_skill(&self, instrument: Instrument) -> f64 {
        self.member_skills.get(&instrument).copied().unwrap_or(50.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychConstraints {
    pub stress: f64,
    pub depression: f64,
    pub burnout: f64,
    pub paranoia: f64,
    pub addiction_risk: f64,
    pub substance_use: f64,
    pub ego: f64,
    /// 100 - moral integrity.
    pub corruption: f64,
    /// max(0, 100 - avg(stress, depression, burnout)).
    pub mental_health: f64,
    /// max(0, 100 - (0.6 * burnout + 0.3 * corruption)).
    pub creative_potential: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryConstraints {
    /// Pressure from the active deal, 0 without one.
    pub label_pressure: f64,
    pub label: Option<crate::state::LabelKind>,
    pub fan_expectations: FanExpectations,
    /// max(0, |money| / 1000) when money is negative, else 0.
    pub financial_pressure: f64,
    /// (label_pressure / 100) * 0.8 with a deal, 0.3 without.
    pub commercial_threshold: f64,
}

/// What the primary fanbase wants to hear, 0-1 per axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FanExpectations {
    pub familiarity: f64,
    pub complexity: f64,
    pub catchiness: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextConstraints {
    pub venue: crate::state::VenueKind,
    pub audience: crate::state::AudienceKind,
    pub equipment_quality: f64,
    pub studio_quality: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeConstraints {
    /// Thematic keywords accumulated from recent events, sorted and deduped.
    pub lyric_themes: Vec<String>,
    pub unlocked_genres: Vec<Genre>,
    pub emotional_tone: EmotionalTone,
    /// min(week / 52, 1).
    pub narrative_weight: f64,
}

/// Accumulated emotional tone. Positivity is clamped to [-100, 100];
/// intensity and darkness to [0, 100].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EmotionalTone {
    pub positivity: f64,
    pub intensity: f64,
    pub darkness: f64,
}

/// Reduce a simulation snapshot to the immutable constraint set.
pub fn extract_constraints(state: &SimulationState) -> Constraints {
    Constraints {
        band: extract_band(state),
        psych: extract_psych(state),
        industry: extract_industry(state),
        context: extract_context(state),
        narrative: extract_narrative(state),
        extracted_at: Utc::now(),
    }
}

fn extract_band(state: &SimulationState) -> BandConstraints {
    let band = &state.band;

    let overall_skill = if band.members.is_empty() {
        50.0
    } else {
        let total: f64 = band.members.iter().map(|m| clamp_scalar(m.skill)).sum();
        total / band.members.len() as f64
    };

    let mut member_skills = BTreeMap::new();
    for member in &band.members {
        // First listed member wins when a role appears twice.
        member_skills
            .entry(member.instrument)
            .or_insert_with(|| clamp_scalar(member.skill));
    }

    let chemistry = if band.members.len() < 2 || band.pair_chemistry.is_empty() {
        50.0
    } else {
        let total: f64 = band.pair_chemistry.iter().map(|p| clamp_scalar(p.score)).sum();
        total / band.pair_chemistry.len() as f64
    };

    BandConstraints {
        overall_skill,
        member_skills,
        chemistry,
        confidence: clamp_scalar(band.confidence),
        experience: f64::from(band.gigs_played) + 5.0 * f64::from(band.albums_released),
        maturity: (f64::from(band.gigs_played) / 10.0).min(100.0),
    }
}

fn extract_psych(state: &SimulationState) -> PsychConstraints {
    let p = &state.psych;
    let stress = clamp_scalar(p.stress);
    let depression = clamp_scalar(p.depression);
    let burnout = clamp_scalar(p.burnout);
    let corruption = clamp_scalar(100.0 - clamp_scalar(p.moral_integrity));

    PsychConstraints {
        stress,
        depression,
        burnout,
        paranoia: clamp_scalar(p.paranoia),
        addiction_risk: clamp_scalar(p.addiction_risk),
        substance_use: clamp_scalar(p.substance_use),
        ego: clamp_scalar(p.ego),
        corruption,
        mental_health: (100.0 - (stress + depression + burnout) / 3.0).max(0.0),
        creative_potential: (100.0 - (0.6 * burnout + 0.3 * corruption)).max(0.0),
    }
}

fn extract_industry(state: &SimulationState) -> IndustryConstraints {
    let label_pressure = state
        .label
        .as_ref()
        .map(|deal| clamp_scalar(deal.pressure))
        .unwrap_or(0.0);

    let commercial_threshold = if state.label.is_some() {
        (label_pressure / 100.0) * 0.8
    } else {
        0.3
    };

    let financial_pressure = if state.money < 0.0 {
        (state.money.abs() / 1000.0).max(0.0)
    } else {
        0.0
    };

    IndustryConstraints {
        label_pressure,
        label: state.label.as_ref().map(|deal| deal.label),
        fan_expectations: fan_expectations(state.fanbase),
        financial_pressure,
        commercial_threshold,
    }
}

fn extract_context(state: &SimulationState) -> ContextConstraints {
    ContextConstraints {
        venue: state.venue,
        audience: state.audience,
        equipment_quality: clamp_scalar(state.equipment_quality.unwrap_or(50.0)),
        studio_quality: clamp_scalar(state.studio_quality.unwrap_or(50.0)),
    }
}

fn extract_narrative(state: &SimulationState) -> NarrativeConstraints {
    let mut themes = BTreeSet::new();
    let mut tone = EmotionalTone::default();

    for event in &state.recent_events {
        let effect = event_effect(event.kind);
        for theme in effect.themes {
            themes.insert((*theme).to_string());
        }
        tone.positivity = (tone.positivity + effect.positivity).clamp(-100.0, 100.0);
        tone.intensity = (tone.intensity + effect.intensity).clamp(0.0, 100.0);
        tone.darkness = (tone.darkness + effect.darkness).clamp(0.0, 100.0);
    }

    NarrativeConstraints {
        lyric_themes: themes.into_iter().collect(),
        unlocked_genres: state.unlocked_genres.clone(),
        emotional_tone: tone,
        narrative_weight: (f64::from(state.week) / 52.0).min(1.0),
    }
}

/// Clamp a 0-100 scalar into range.
fn clamp_scalar(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Fixed mapping tables
// ---------------------------------------------------------------------------

/// Fan-expectation weights keyed by primary fanbase type.
fn fan_expectations(fanbase: FanbaseKind) -> FanExpectations {
    match fanbase {
        FanbaseKind::Mainstream => FanExpectations { familiarity: 0.8, complexity: 0.3, catchiness: 0.9 },
        FanbaseKind::Underground => FanExpectations { familiarity: 0.3, complexity: 0.8, catchiness: 0.4 },
        FanbaseKind::Niche => FanExpectations { familiarity: 0.4, complexity: 0.9, catchiness: 0.3 },
        FanbaseKind::Crossover => FanExpectations { familiarity: 0.6, complexity: 0.5, catchiness: 0.7 },
        FanbaseKind::Mixed => FanExpectations { familiarity: 0.5, complexity: 0.5, catchiness: 0.5 },
    }
}

struct EventEffect {
    themes: &'static [&'static str],
    positivity: f64,
    intensity: f64,
    darkness: f64,
}

/// Lyric themes and tone deltas per narrative event kind.
fn event_effect(kind: NarrativeEventKind) -> EventEffect {
    use NarrativeEventKind::*;
    match kind {
        AddictionStruggle => EventEffect {
            themes: &["darkness", "escape", "degradation"],
            positivity: -15.0,
            intensity: 10.0,
            darkness: 20.0,
        },
        MemberQuit => EventEffect {
            themes: &["loss", "betrayal", "change"],
            positivity: -10.0,
            intensity: 5.0,
            darkness: 10.0,
        },
        BreakthroughGig => EventEffect {
            themes: &["triumph", "momentum", "crowds"],
            positivity: 20.0,
            intensity: 15.0,
            darkness: -5.0,
        },
        LabelSigning => EventEffect {
            themes: &["ambition", "compromise", "pressure"],
            positivity: 10.0,
            intensity: 5.0,
            darkness: 0.0,
        },
        LabelDispute => EventEffect {
            themes: &["betrayal", "control", "money"],
            positivity: -10.0,
            intensity: 10.0,
            darkness: 10.0,
        },
        CreativeBreakthrough => EventEffect {
            themes: &["vision", "freedom", "renewal"],
            positivity: 15.0,
            intensity: 10.0,
            darkness: -10.0,
        },
        HealthScare => EventEffect {
            themes: &["mortality", "fragility", "fear"],
            positivity: -20.0,
            intensity: 5.0,
            darkness: 15.0,
        },
        FinancialCrisis => EventEffect {
            themes: &["debt", "survival", "desperation"],
            positivity: -15.0,
            intensity: 10.0,
            darkness: 10.0,
        },
        SoldOutShow => EventEffect {
            themes: &["celebration", "connection", "validation"],
            positivity: 15.0,
            intensity: 20.0,
            darkness: -5.0,
        },
        CriticalPanning => EventEffect {
            themes: &["doubt", "rejection", "spite"],
            positivity: -10.0,
            intensity: 5.0,
            darkness: 10.0,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BandMember, BandState, LabelDeal, LabelKind, NarrativeEvent, PairChemistry, PsychState};

    fn member(name: &str, instrument: Instrument, skill: f64) -> BandMember {
        BandMember { name: name.into(), instrument, skill }
    }

    #[test]
    fn empty_roster_defaults() {
        let constraints = extract_constraints(&SimulationState::default());
        assert_eq!(constraints.band.overall_skill, 50.0);
        assert_eq!(constraints.band.chemistry, 50.0);
        assert_eq!(constraints.band.member_skill(Instrument::Drummer), 50.0);
    }

    #[test]
    fn band_aggregates() {
        let state = SimulationState {
            band: BandState {
                members: vec![
                    member("A", Instrument::Drummer, 90.0),
                    member("B", Instrument::Guitarist, 70.0),
                ],
                pair_chemistry: vec![PairChemistry { a: "A".into(), b: "B".into(), score: 64.0 }],
                confidence: 61.0,
                gigs_played: 120,
                albums_released: 2,
                ..Default::default()
            },
            ..Default::default()
        };
        let band = extract_constraints(&state).band;
        assert_eq!(band.overall_skill, 80.0);
        assert_eq!(band.chemistry, 64.0);
        assert_eq!(band.member_skill(Instrument::Drummer), 90.0);
        assert_eq!(band.member_skill(Instrument::Vocalist), 50.0);
        assert_eq!(band.experience, 130.0);
        assert_eq!(band.maturity, 12.0);
    }

    #[test]
    fn maturity_caps_at_100() {
        let state = SimulationState {
            band: BandState { gigs_played: 5000, ..Default::default() },
            ..Default::default()
        };
        assert_eq!(extract_constraints(&state).band.maturity, 100.0);
    }

    #[test]
    fn psych_derivations() {
        let state = SimulationState {
            psych: PsychState {
                stress: 60.0,
                depression: 30.0,
                burnout: 90.0,
                moral_integrity: 40.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let psych = extract_constraints(&state).psych;
        assert_eq!(psych.corruption, 60.0);
        assert_eq!(psych.mental_health, 40.0);
        // 100 - (0.6 * 90 + 0.3 * 60) = 28
        assert!((psych.creative_potential - 28.0).abs() < 1e-9);
    }

    #[test]
    fn mental_health_floors_at_zero() {
        let state = SimulationState {
            psych: PsychState { burnout: 100.0, moral_integrity: 0.0, ..Default::default() },
            ..Default::default()
        };
        let psych = extract_constraints(&state).psych;
        assert_eq!(psych.creative_potential, 10.0);
        let worse = SimulationState {
            psych: PsychState {
                burnout: 100.0,
                moral_integrity: 0.0,
                stress: 100.0,
                depression: 100.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(extract_constraints(&worse).psych.mental_health, 0.0);
    }

    #[test]
    fn industry_without_deal() {
        let industry = extract_constraints(&SimulationState::default()).industry;
        assert_eq!(industry.label_pressure, 0.0);
        assert_eq!(industry.commercial_threshold, 0.3);
        assert_eq!(industry.financial_pressure, 0.0);
    }

    #[test]
    fn industry_with_deal_and_debt() {
        let state = SimulationState {
            label: Some(LabelDeal { label: LabelKind::Major, pressure: 80.0 }),
            money: -2500.0,
            ..Default::default()
        };
        let industry = extract_constraints(&state).industry;
        assert_eq!(industry.label_pressure, 80.0);
        assert!((industry.commercial_threshold - 0.64).abs() < 1e-9);
        assert_eq!(industry.financial_pressure, 2.5);
    }

    #[test]
    fn fan_expectation_table() {
        let state = SimulationState { fanbase: FanbaseKind::Underground, ..Default::default() };
        let fans = extract_constraints(&state).industry.fan_expectations;
        assert_eq!(fans.familiarity, 0.3);
        assert_eq!(fans.complexity, 0.8);
    }

    #[test]
    fn narrative_accumulation() {
        let state = SimulationState {
            week: 26,
            recent_events: vec![
                NarrativeEvent { kind: NarrativeEventKind::AddictionStruggle, week: 24 },
                NarrativeEvent { kind: NarrativeEventKind::SoldOutShow, week: 25 },
            ],
            ..Default::default()
        };
        let narrative = extract_constraints(&state).narrative;
        assert!(narrative.lyric_themes.contains(&"darkness".to_string()));
        assert!(narrative.lyric_themes.contains(&"celebration".to_string()));
        // -15 + 15 positivity, 20 - 5 darkness, 10 + 20 intensity
        assert_eq!(narrative.emotional_tone.positivity, 0.0);
        assert_eq!(narrative.emotional_tone.darkness, 15.0);
        assert_eq!(narrative.emotional_tone.intensity, 30.0);
        assert_eq!(narrative.narrative_weight, 0.5);
    }

    #[test]
    fn tone_clamps() {
        let events = vec![
            NarrativeEvent { kind: NarrativeEventKind::HealthScare, week: 0 };
            20
        ];
        let state = SimulationState { recent_events: events, ..Default::default() };
        let tone = extract_constraints(&state).narrative.emotional_tone;
        assert_eq!(tone.positivity, -100.0);
        assert_eq!(tone.darkness, 100.0);
    }

    #[test]
    fn narrative_weight_caps_at_one() {
        let state = SimulationState { week: 520, ..Default::default() };
        assert_eq!(extract_constraints(&state).narrative.narrative_weight, 1.0);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let state = SimulationState {
            psych: PsychState { stress: 900.0, depression: -50.0, ..Default::default() },
            band: BandState { confidence: 200.0, ..Default::default() },
            ..Default::default()
        };
        let constraints = extract_constraints(&state);
        assert_eq!(constraints.psych.stress, 100.0);
        assert_eq!(constraints.psych.depression, 0.0);
        assert_eq!(constraints.band.confidence, 100.0);
    }
}
