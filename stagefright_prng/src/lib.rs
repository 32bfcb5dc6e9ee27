// Deterministic, portable pseudo-random number generator.
//
// Implements a 31-bit linear congruential generator seeded from either a raw
// integer or a string (hashed with a polynomial rolling hash over UTF-16 code
// units). This is a hand-rolled implementation with zero external
// dependencies, chosen for portability and to guarantee identical output
// across all platforms.
//
// This crate is the single PRNG used across the entire Stagefright song
// generator: the drum, harmony, melody, and title stages each own one
// instance, seeded from a per-stage sub-seed string. By sharing one PRNG, we
// avoid depending on external RNG crates (like `rand`) and guarantee
// deterministic, reproducible output given the same seed.
//
// **Critical constraint: determinism.** Every method on `SeededRng` must
// produce identical output given the same prior state, regardless of
// platform, compiler version, or optimization level. The state advance is
// pure integer arithmetic; floats appear only when projecting state into
// [0, 1).

use serde::{Deserialize, Serialize};

/// LCG modulus: state stays in [0, 2^31).
const MODULUS: u64 = 1 << 31;

/// Substitute seed used when a string hashes to zero (e.g. the empty
/// string), so the generator never degenerates into a constant stream.
const ZERO_SEED_FALLBACK: u32 = 0x2F6_E2B1;

/// 31-bit LCG PRNG — the generator's sole source of randomness.
///
/// All random decisions across the song pipeline draw from instances of this
/// generator. Each engine owns its own `SeededRng`, seeded deterministically
/// from a sub-seed string, ensuring reproducible and mutually independent
/// output streams.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeededRng {
    state: u32,
    seed: u32,
}

impl SeededRng {
    /// Create a new PRNG seeded from a string.
    ///
    /// The string is folded to 32 bits with a polynomial rolling hash
    /// (`hash = hash * 31 + code_unit` over UTF-16 code units, wrapping),
    /// then the absolute value is taken. Two `SeededRng` instances created
    /// from the same string produce identical output sequences.
    pub fn new(seed: &str) -> Self {
        Self::from_raw(hash_seed(seed))
    }

    /// Create a new PRNG from a raw integer seed, bypassing string hashing.
    ///
    /// A zero seed is replaced with the same fallback constant as a
    /// zero-hashing string, so the stream is never constant.
    pub fn from_raw(seed: u32) -> Self {
        let seed = if seed == 0 { ZERO_SEED_FALLBACK } else { seed };
        Self { state: seed, seed }
    }

    /// Generate a uniform `f64` in [0, 1).
    ///
    /// Advances the LCG (`state = (1664525 * state + 1013904223) mod 2^31`)
    /// and projects the new state onto the unit interval.
    pub fn next_f64(&mut self) -> f64 {
        self.state = ((1_664_525u64 * u64::from(self.state) + 1_013_904_223) % MODULUS) as u32;
        f64::from(self.state) / MODULUS as f64
    }

    /// Generate a uniform random integer in `[min, max)`.
    ///
    /// Computed as `floor(next_f64() * (max - min)) + min`.
    /// Panics if `min >= max`.
    pub fn next_int(&mut self, min: i64, max: i64) -> i64 {
        assert!(min < max, "next_int: min must be less than max");
        (self.next_f64() * (max - min) as f64).floor() as i64 + min
    }

    /// Generate a uniform random index in `[0, len)`.
    ///
    /// Panics if `len == 0`.
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_int(0, len as i64) as usize
    }

    /// Return `true` with probability `p`, `false` otherwise.
    ///
    /// `p <= 0.0` always returns false, `p >= 1.0` always returns true.
    /// Exactly one value is consumed from the stream either way.
    pub fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Restore the generator to its initial seeded state.
    pub fn reset(&mut self) {
        self.state = self.seed;
    }
}

/// Fold a string to a nonzero 32-bit seed.
///
/// Polynomial rolling hash over UTF-16 code units with wrapping 32-bit
/// arithmetic, matching the historical seed format so existing seed strings
/// keep producing the same songs.
fn hash_seed(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for unit in seed.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    match hash.unsigned_abs() {
        0 => ZERO_SEED_FALLBACK,
        h => h,
    }
}
