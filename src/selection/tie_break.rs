//! Deterministic tie-breaking for equal-weight candidates.
//!
//! Floating-point sampling over tied weights would make the draw depend on
//! list order in an unprincipled way. This step groups candidates whose
//! weights are equal after rounding to two decimal places and adds a small,
//! strictly decreasing bonus within each group, ordered by how long ago
//! each member was last selected (never-selected counts as oldest) and then
//! by contact address. Group-to-group ordering is untouched, so no group
//! becomes statistically favored over another.

use std::collections::BTreeMap;

use crate::models::CandidateWeight;

/// Base numerator for the per-rank tie-break bonus: the member ranked `i`
/// within a tied group receives `0.1 / (i + 1)`.
pub const TIE_BREAK_BASE_BONUS: f64 = 0.1;

/// Applies tie-break bonuses to candidates with equal rounded weights.
///
/// Candidates keep their position in the list; only the `weight` and
/// `tie_break_bonus` fields of tied members change. Groups of size one pass
/// through unchanged.
pub fn apply_tie_breaking(mut candidates: Vec<CandidateWeight>) -> Vec<CandidateWeight> {
    // Group indices by weight in hundredths, deterministically ordered.
    let mut groups: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (index, candidate) in candidates.iter().enumerate() {
        let key = (candidate.weight * 100.0).round() as i64;
        groups.entry(key).or_default().push(index);
    }

    for indices in groups.values() {
        if indices.len() < 2 {
            continue;
        }

        let mut ordered = indices.clone();
        ordered.sort_by(|&a, &b| {
            let pa = &candidates[a].person;
            let pb = &candidates[b].person;
            // None sorts before any date, i.e. "never selected" is oldest.
            pa.last_chosen
                .cmp(&pb.last_chosen)
                .then_with(|| pa.mail.cmp(&pb.mail))
        });

        for (rank, &index) in ordered.iter().enumerate() {
            let bonus = TIE_BREAK_BASE_BONUS / (rank as f64 + 1.0);
            candidates[index].weight += bonus;
            candidates[index].tie_break_bonus = bonus;
        }
    }

    candidates
}
