//! Weighted random selection.
//!
//! Standard roulette-wheel sampling over cumulative weights: the
//! probability of drawing candidate `i` is `weight_i / total_weight`.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::CandidateWeight;

/// Draws one candidate proportionally to its weight.
///
/// # Degenerate cases
///
/// - An empty list is a caller bug and returns
///   [`EngineError::EmptyCandidateList`].
/// - A single candidate is returned immediately without consuming
///   randomness.
/// - A non-positive total weight cannot happen given the calculator's
///   positive floor, but is defended against with a uniform draw.
pub fn select<'a, R: Rng + ?Sized>(
    candidates: &'a [CandidateWeight],
    rng: &mut R,
) -> EngineResult<&'a CandidateWeight> {
    match candidates {
        [] => Err(EngineError::EmptyCandidateList),
        [only] => Ok(only),
        [.., last] => {
            let total_weight: f64 = candidates.iter().map(|c| c.weight).sum();

            if total_weight <= 0.0 {
                warn!(total_weight, "non-positive total weight, falling back to uniform draw");
                return candidates.choose(rng).ok_or(EngineError::EmptyCandidateList);
            }

            let draw = rng.gen_range(0.0..total_weight);
            let mut cumulative = 0.0;
            for candidate in candidates {
                cumulative += candidate.weight;
                if draw <= cumulative {
                    return Ok(candidate);
                }
            }

            // Floating-point accumulation can leave the draw a hair past the
            // last cumulative sum.
            Ok(last)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Person, WeekdayMask};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn candidate(id: i64, weight: f64) -> CandidateWeight {
        CandidateWeight {
            person: Person {
                id,
                mail: format!("user{id}@example.com"),
                weekdays: WeekdayMask::WORKDAYS,
                last_chosen: None,
            },
            weight,
            days_since_selection: None,
            recent_selections: 0,
            was_last_working_day_catcher: false,
            tie_break_bonus: 0.0,
        }
    }

    #[test]
    fn test_empty_input_is_error() {
        let mut rng = StdRng::seed_from_u64(42);
        let err = select(&[], &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::EmptyCandidateList));
    }

    #[test]
    fn test_single_candidate_always_selected() {
        let candidates = vec![candidate(1, 0.0)];
        let mut rng = StdRng::seed_from_u64(42);
        // Selected even with weight zero: the sole candidate wins with
        // probability 1 regardless of weight.
        let chosen = select(&candidates, &mut rng).unwrap();
        assert_eq!(chosen.person.id, 1);
    }

    #[test]
    fn test_deterministic_with_fixed_seed() {
        let candidates = vec![candidate(1, 100.0), candidate(2, 200.0), candidate(3, 50.0)];
        let first = {
            let mut rng = StdRng::seed_from_u64(7);
            select(&candidates, &mut rng).unwrap().person.id
        };
        let second = {
            let mut rng = StdRng::seed_from_u64(7);
            select(&candidates, &mut rng).unwrap().person.id
        };
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_weight_candidate_unreachable_among_positive() {
        // A zero-weight candidate between positive ones can never satisfy
        // draw <= cumulative strictly at its own slot except when the draw
        // lands exactly on the boundary, which has probability zero; verify
        // over many seeds that it is effectively never chosen.
        let candidates = vec![candidate(1, 100.0), candidate(2, 0.0), candidate(3, 100.0)];
        let mut hits = 0;
        for seed in 0..500 {
            let mut rng = StdRng::seed_from_u64(seed);
            if select(&candidates, &mut rng).unwrap().person.id == 2 {
                hits += 1;
            }
        }
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_distribution_tracks_weights() {
        let candidates = vec![candidate(1, 900.0), candidate(2, 100.0)];
        let mut rng = StdRng::seed_from_u64(123);
        let mut first = 0u32;
        let trials = 10_000;
        for _ in 0..trials {
            if select(&candidates, &mut rng).unwrap().person.id == 1 {
                first += 1;
            }
        }
        let share = f64::from(first) / f64::from(trials);
        // Expected 0.9; allow generous slack for sampling noise.
        assert!((0.87..=0.93).contains(&share), "share was {share}");
    }

    #[test]
    fn test_uniform_fallback_on_non_positive_total() {
        let candidates = vec![candidate(1, 0.0), candidate(2, 0.0)];
        let mut rng = StdRng::seed_from_u64(42);
        // Must not error; either candidate is acceptable.
        let chosen = select(&candidates, &mut rng).unwrap();
        assert!(chosen.person.id == 1 || chosen.person.id == 2);
    }
}
