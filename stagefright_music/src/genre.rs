// Genre and mode definitions for song generation.
//
// Each genre carries a fixed generation profile: the drum pattern families
// it draws from, the musical modes it supports, and a complexity ceiling for
// chord progressions. The profiles are static tables — content lives in the
// libraries (library.rs), these are just the per-genre constraints the
// engines consult.
//
// Used by drums.rs for pattern-family candidate lists, harmony.rs for mode
// selection and the complexity filter, and song.rs for seed derivation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The playable genres. Unrecognized genre strings parse to `Rock`, the
/// generator's universal fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Genre {
    Rock,
    Punk,
    Metal,
    Indie,
    Pop,
    Electronic,
}

impl Genre {
    pub const ALL: [Genre; 6] = [
        Genre::Rock,
        Genre::Punk,
        Genre::Metal,
        Genre::Indie,
        Genre::Pop,
        Genre::Electronic,
    ];

    /// The fixed generation profile for this genre.
    pub fn profile(self) -> &'static GenreProfile {
        static ROCK: GenreProfile = GenreProfile {
            drum_families: &["rock_backbeat", "rock_driving", "rock_halftime"],
            modes: &[MusicalMode::Major, MusicalMode::Minor, MusicalMode::Mixolydian],
            max_complexity: 0.7,
        };
        static PUNK: GenreProfile = GenreProfile {
            drum_families: &["punk_dbeat", "punk_blitz"],
            modes: &[MusicalMode::Major, MusicalMode::Minor],
            max_complexity: 0.5,
        };
        static METAL: GenreProfile = GenreProfile {
            drum_families: &["metal_double_kick", "metal_gallop", "metal_halftime"],
            modes: &[MusicalMode::Minor, MusicalMode::Dorian],
            max_complexity: 0.85,
        };
        static INDIE: GenreProfile = GenreProfile {
            drum_families: &["indie_loose", "indie_motorik"],
            modes: &[MusicalMode::Major, MusicalMode::Minor, MusicalMode::Dorian],
            max_complexity: 0.8,
        };
        static POP: GenreProfile = GenreProfile {
            drum_families: &["pop_four_floor", "pop_backbeat"],
            modes: &[MusicalMode::Major, MusicalMode::Minor],
            max_complexity: 0.6,
        };
        static ELECTRONIC: GenreProfile = GenreProfile {
            drum_families: &["electronic_four_floor", "electronic_breakbeat", "electronic_halftime"],
            modes: &[MusicalMode::Minor, MusicalMode::Major, MusicalMode::Dorian],
            max_complexity: 0.75,
        };
        match self {
            Genre::Rock => &ROCK,
            Genre::Punk => &PUNK,
            Genre::Metal => &METAL,
            Genre::Indie => &INDIE,
            Genre::Pop => &POP,
            Genre::Electronic => &ELECTRONIC,
        }
    }

    /// Whether this genre's mode set includes minor (consulted by the
    /// depression/paranoia mode override in the harmony engine).
    pub fn supports_minor(self) -> bool {
        self.profile().modes.contains(&MusicalMode::Minor)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Genre::Rock => "rock",
            Genre::Punk => "punk",
            Genre::Metal => "metal",
            Genre::Indie => "indie",
            Genre::Pop => "pop",
            Genre::Electronic => "electronic",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Genre {
    type Err = ();

    /// Never fails: unknown genres fall back to `Rock`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "punk" => Genre::Punk,
            "metal" => Genre::Metal,
            "indie" => Genre::Indie,
            "pop" => Genre::Pop,
            "electronic" => Genre::Electronic,
            _ => Genre::Rock,
        })
    }
}

/// Musical modes progressions are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MusicalMode {
    Major,
    Minor,
    Dorian,
    Mixolydian,
}

/// Per-genre generation constraints.
#[derive(Debug, Clone)]
pub struct GenreProfile {
    /// Drum pattern family ids this genre draws from, in fixed order.
    pub drum_families: &'static [&'static str],
    /// Modes this genre supports, in fixed order (uniform mode selection
    /// indexes into this slice).
    pub modes: &'static [MusicalMode],
    /// Progression complexity ceiling (0-1).
    pub max_complexity: f64,
}
