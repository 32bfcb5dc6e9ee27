// Simulation-state input schema.
//
// `SimulationState` is the read-only snapshot the rest of the game hands to
// the generator: band roster and skills, psychology scalars, label/industry
// state, performance context, and recent narrative events. The generator
// never mutates it.
//
// Every field a caller might not have is optional here, with its documented
// default resolved once during constraint extraction (constraints.rs) — the
// engines never see a partially-present value. Serde defaults mirror the
// same values, so states deserialized from sparse JSON behave identically to
// states built in code with `..Default::default()`.

use crate::genre::Genre;
use serde::{Deserialize, Serialize};

/// A full snapshot of simulation state at generation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationState {
    /// Current simulation week (drives narrative weight and seed derivation).
    pub week: u32,
    pub band: BandState,
    pub psych: PsychState,
    /// Active label deal, if any.
    pub label: Option<LabelDeal>,
    pub fanbase: FanbaseKind,
    /// Band funds. Negative balances create financial pressure.
    pub money: f64,
    pub venue: VenueKind,
    pub audience: AudienceKind,
    /// Gear quality 0-100; defaults to 50 when unknown.
    pub equipment_quality: Option<f64>,
    /// Recording environment quality 0-100; defaults to 50 when unknown.
    pub studio_quality: Option<f64>,
    /// Narrative events from the recent past, oldest first.
    pub recent_events: Vec<NarrativeEvent>,
    /// Genres the band has unlocked through play.
    pub unlocked_genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Band
// ---------------------------------------------------------------------------

/// The band roster and its collective attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandState {
    pub name: String,
    pub members: Vec<BandMember>,
    /// Chemistry scores for member pairs. Pairs not listed are simply not
    /// part of the average.
    pub pair_chemistry: Vec<PairChemistry>,
    /// Collective confidence 0-100.
    pub confidence: f64,
    pub gigs_played: u32,
    pub albums_released: u32,
}

impl Default for BandState {
    fn default() -> Self {
        BandState {
            name: "Unnamed Band".to_string(),
            members: Vec::new(),
            pair_chemistry: Vec::new(),
            confidence: 50.0,
            gigs_played: 0,
            albums_released: 0,
        }
    }
}

/// One musician in the roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BandMember {
    pub name: String,
    pub instrument: Instrument,
    /// Skill 0-100.
    pub skill: f64,
}

impl Default for BandMember {
    fn default() -> Self {
        BandMember {
            name: String::new(),
            instrument: Instrument::Guitarist,
            skill: 50.0,
        }
    }
}

/// Roster roles. Skill lookups for an absent role default to 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Instrument {
    Vocalist,
    Guitarist,
    Bassist,
    Drummer,
    Keyboardist,
}

/// Chemistry between two named members, 0-100.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairChemistry {
    pub a: String,
    pub b: String,
    pub score: f64,
}

// ---------------------------------------------------------------------------
// Psychology
// ---------------------------------------------------------------------------

/// Raw psychology scalars, all 0-100.
///
/// Defaults are the neutral baseline: zero for every strain axis, 50 for
/// ego, full moral integrity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PsychState {
    pub stress: f64,
    pub depression: f64,
    pub burnout: f64,
    pub paranoia: f64,
    pub addiction_risk: f64,
    pub substance_use: f64,
    pub ego: f64,
    /// Inverted into the `corruption` constraint (100 - integrity).
    pub moral_integrity: f64,
}

impl Default for PsychState {
    fn default() -> Self {
        PsychState {
            stress: 0.0,
            depression: 0.0,
            burnout: 0.0,
            paranoia: 0.0,
            addiction_risk: 0.0,
            substance_use: 0.0,
            ego: 50.0,
            moral_integrity: 100.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Industry
// ---------------------------------------------------------------------------

/// An active record deal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDeal {
    pub label: LabelKind,
    /// How hard the label leans on the band, 0-100.
    pub pressure: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    Independent,
    Major,
}

/// The primary composition of the band's fanbase, keying the fixed
/// fan-expectation table in constraints.rs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FanbaseKind {
    Mainstream,
    Underground,
    Niche,
    Crossover,
    #[default]
    Mixed,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VenueKind {
    #[default]
    Generic,
    DiveBar,
    Club,
    Theater,
    Arena,
    Festival,
    Studio,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceKind {
    #[default]
    Mixed,
    Hometown,
    Industry,
    Hostile,
    Devoted,
}

// ---------------------------------------------------------------------------
// Narrative
// ---------------------------------------------------------------------------

/// A narrative event from the band's recent history. The constraint
/// extractor folds these into lyric themes and an emotional tone via a fixed
/// per-kind mapping table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeEvent {
    pub kind: NarrativeEventKind,
    /// Week the event occurred.
    pub week: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeEventKind {
    AddictionStruggle,
    MemberQuit,
    BreakthroughGig,
    LabelSigning,
    LabelDispute,
    CreativeBreakthrough,
    HealthScare,
    FinancialCrisis,
    SoldOutShow,
    CriticalPanning,
}
