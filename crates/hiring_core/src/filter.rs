//! crates/hiring_core/src/filter.rs
//!
//! Produces the visible candidate list: a conjunction of the active
//! predicates followed by a stable single-key sort.

use crate::domain::{Candidate, FilterState, ScoreMap, SortConfig, SortDirection, SortKey};
use crate::ledger::{SelectionLedger, ShortlistLedger};
use std::cmp::Ordering;

/// Filters and sorts `pool` into the list the reviewer sees.
pub fn apply(
    pool: &[Candidate],
    scores: &ScoreMap,
    filters: &FilterState,
    sort: &SortConfig,
    shortlist: &ShortlistLedger,
    selection: &SelectionLedger,
) -> Vec<Candidate> {
    let mut visible: Vec<Candidate> = pool
        .iter()
        .filter(|candidate| matches(candidate, filters, shortlist, selection))
        .cloned()
        .collect();
    sort_candidates(&mut visible, scores, sort);
    visible
}

/// True when `candidate` passes every active predicate.
pub fn matches(
    candidate: &Candidate,
    filters: &FilterState,
    shortlist: &ShortlistLedger,
    selection: &SelectionLedger,
) -> bool {
    // Name only; skills and companies are reachable through their own filters.
    if !filters.search.is_empty()
        && !candidate
            .name
            .to_lowercase()
            .contains(&filters.search.to_lowercase())
    {
        return false;
    }

    if !filters.locations.is_empty() && !filters.locations.contains(&candidate.location) {
        return false;
    }

    if !filters.work_availability.is_empty()
        && filters
            .work_availability
            .is_disjoint(&candidate.work_availability)
    {
        return false;
    }

    if candidate.role_count() < filters.min_experience {
        return false;
    }

    if let Some(max_salary) = filters.max_salary {
        if candidate.full_time_salary_or_zero() > max_salary {
            return false;
        }
    }

    if !filters.education_level.is_empty()
        && !filters
            .education_level
            .contains(&candidate.education.highest_level)
    {
        return false;
    }

    if !filters.skills.is_empty() {
        let wanted: Vec<String> = filters.skills.iter().map(|s| s.to_lowercase()).collect();
        let has_any = candidate
            .skills
            .iter()
            .any(|skill| wanted.contains(&skill.to_lowercase()));
        if !has_any {
            return false;
        }
    }

    if let Some(want) = filters.is_shortlisted {
        if shortlist.contains(&candidate.id) != want {
            return false;
        }
    }

    if let Some(want) = filters.is_selected {
        if selection.contains(&candidate.id) != want {
            return false;
        }
    }

    true
}

//=========================================================================================
// Sorting
//=========================================================================================

/// A typed sort value pulled from a candidate by its `SortKey`.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortValue<'a> {
    Text(&'a str),
    Number(i128),
}

fn sort_value<'a>(candidate: &'a Candidate, scores: &ScoreMap, key: SortKey) -> SortValue<'a> {
    match key {
        SortKey::TotalScore => SortValue::Number(
            scores
                .get(&candidate.id)
                .map_or(0, |score| i128::from(score.total_score)),
        ),
        SortKey::Id => SortValue::Text(&candidate.id),
        SortKey::Name => SortValue::Text(&candidate.name),
        SortKey::Email => SortValue::Text(&candidate.email),
        SortKey::Phone => SortValue::Text(&candidate.phone),
        SortKey::Location => SortValue::Text(&candidate.location),
        SortKey::SubmittedAt => SortValue::Number(i128::from(candidate.submitted_at.timestamp_millis())),
        SortKey::Experience => SortValue::Number(candidate.role_count() as i128),
        SortKey::Salary => SortValue::Number(i128::from(candidate.full_time_salary_or_zero())),
        SortKey::SkillCount => SortValue::Number(candidate.skills.len() as i128),
    }
}

/// Case-insensitive first, so "alice" sorts next to "Alice" rather than after "Zed".
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn compare_values(a: &SortValue<'_>, b: &SortValue<'_>) -> Ordering {
    match (a, b) {
        (SortValue::Text(a), SortValue::Text(b)) => compare_text(a, b),
        (SortValue::Number(a), SortValue::Number(b)) => a.cmp(b),
        // A key always yields the same variant for every candidate.
        (SortValue::Text(_), SortValue::Number(_)) => Ordering::Greater,
        (SortValue::Number(_), SortValue::Text(_)) => Ordering::Less,
    }
}

/// Stable sort: ties keep their relative input order in both directions.
pub fn sort_candidates(candidates: &mut [Candidate], scores: &ScoreMap, sort: &SortConfig) {
    candidates.sort_by(|a, b| {
        let ordering = compare_values(
            &sort_value(a, scores, sort.key),
            &sort_value(b, scores, sort.key),
        );
        match sort.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}
