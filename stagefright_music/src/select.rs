// Weighted roulette selection.
//
// The harmony and melody engines both filter their libraries down to a
// candidate set and then pick one entry by cumulative-weight walk: each
// candidate gets a base weight from its tags, scaled by a per-candidate
// random jitter, and a single draw over the cumulative sum selects the
// winner. The jitter keeps repeated generations from always converging on
// the single highest-tagged entry while preserving the tag ordering on
// average.
//
// **Critical constraint: determinism.** Weights are computed in candidate
// order (one jitter draw each, then one selection draw), so the PRNG stream
// consumption is a fixed function of the candidate count.

use stagefright_prng::SeededRng;

/// Floor for degenerate weights so a zero-tagged candidate stays selectable
/// and the cumulative total stays positive.
const MIN_WEIGHT: f64 = 1e-6;

/// Pick one candidate by weighted roulette.
///
/// `base_weight` maps a candidate to its tag-derived weight; each weight is
/// then scaled by a `0.7 + 0.3 * rng()` jitter term. The walk subtracts each
/// weight from a uniform draw over the total until it crosses zero; the last
/// candidate is the fallback for floating-point edge cases.
///
/// Panics if `candidates` is empty — upstream filtering guarantees a
/// non-empty set (the engines widen to their built-in fallback sets first).
pub fn weighted_pick<'a, T>(
    candidates: &'a [T],
    rng: &mut SeededRng,
    base_weight: impl Fn(&T) -> f64,
) -> &'a T {
    assert!(
        !candidates.is_empty(),
        "weighted_pick requires a non-empty candidate set"
    );

    let weights: Vec<f64> = candidates
        .iter()
        .map(|c| base_weight(c).max(MIN_WEIGHT) * (0.7 + 0.3 * rng.next_f64()))
        .collect();
    let total: f64 = weights.iter().sum();

    let mut draw = rng.next_f64() * total;
    for (candidate, weight) in candidates.iter().zip(&weights) {
        draw -= weight;
        if draw <= 0.0 {
            return candidate;
        }
    }
    // Floating-point edge: the draw outlasted the sum by an ulp.
    &candidates[candidates.len() - 1]
}
