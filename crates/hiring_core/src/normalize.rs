//! crates/hiring_core/src/normalize.rs
//!
//! Canonicalizes skill spellings and salary strings across a validated batch,
//! and derives the batch-level helpers the review surface needs
//! (email dedupe, filter facets).

use crate::domain::Candidate;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Synonym clusters. The first entry of each cluster is the canonical spelling.
const SKILL_GROUPS: &[&[&str]] = &[
    &["javascript", "js", "ecmascript"],
    &["typescript", "ts"],
    &["react", "reactjs", "react.js"],
    &["node", "nodejs", "node.js"],
    &["python", "py"],
    &["docker", "containerization"],
    &["aws", "amazon web services"],
    &["gcp", "google cloud platform"],
    &["azure", "microsoft azure"],
    &["mongodb", "mongo"],
    &["postgresql", "postgres", "psql"],
    &["mysql", "my sql"],
];

//=========================================================================================
// Skills
//=========================================================================================

/// Builds the variant → canonical map from the batch's own vocabulary.
/// A variant is only mapped when some candidate in the batch actually uses it.
fn skill_normalization_map(candidates: &[Candidate]) -> HashMap<String, &'static str> {
    let vocabulary: HashSet<String> = candidates
        .iter()
        .flat_map(|c| c.skills.iter())
        .map(|skill| skill.to_lowercase())
        .collect();

    let mut map = HashMap::new();
    for group in SKILL_GROUPS {
        let canonical = group[0];
        for variant in group.iter().copied() {
            if vocabulary.contains(variant) {
                map.insert(variant.to_string(), canonical);
            }
        }
    }
    map
}

/// Rewrites recognized skill variants to their canonical spelling.
/// Unrecognized skills pass through unchanged, case included.
pub fn normalize_skills(candidates: &[Candidate]) -> Vec<Candidate> {
    let map = skill_normalization_map(candidates);
    candidates
        .iter()
        .map(|candidate| Candidate {
            skills: candidate
                .skills
                .iter()
                .map(|skill| match map.get(&skill.to_lowercase()) {
                    Some(canonical) => (*canonical).to_string(),
                    None => skill.clone(),
                })
                .collect(),
            ..candidate.clone()
        })
        .collect()
}

//=========================================================================================
// Salaries
//=========================================================================================

/// Keeps only the digits and re-renders them with US grouping, so
/// `"USD 95000"` becomes `"$95,000"`. Unreadable or zero amounts become `"$0"`.
pub fn normalize_salary_string(salary: &str) -> String {
    let digits: String = salary.chars().filter(char::is_ascii_digit).collect();
    match digits.parse::<u64>() {
        Ok(amount) if amount > 0 => format!("${}", group_thousands(amount)),
        _ => "$0".to_string(),
    }
}

fn group_thousands(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Normalizes every present salary entry; missing entries stay missing.
pub fn normalize_salaries(candidates: &[Candidate]) -> Vec<Candidate> {
    candidates
        .iter()
        .map(|candidate| Candidate {
            salary_expectation: candidate
                .salary_expectation
                .map_present(normalize_salary_string),
            ..candidate.clone()
        })
        .collect()
}

//=========================================================================================
// Dedupe and Facets
//=========================================================================================

#[derive(Debug, Clone, Default)]
pub struct Deduplicated {
    pub unique: Vec<Candidate>,
    pub duplicates: Vec<Candidate>,
}

/// Splits a batch by email; the first candidate with a given email wins.
pub fn deduplicate(candidates: &[Candidate]) -> Deduplicated {
    let mut seen = HashSet::new();
    let mut result = Deduplicated::default();
    for candidate in candidates {
        if seen.insert(candidate.email.as_str()) {
            result.unique.push(candidate.clone());
        } else {
            result.duplicates.push(candidate.clone());
        }
    }
    result
}

/// Sorted distinct values a reviewer can filter on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub locations: Vec<String>,
    pub skills: Vec<String>,
    pub education_levels: Vec<String>,
    pub work_availability: Vec<String>,
    pub companies: Vec<String>,
    pub roles: Vec<String>,
}

pub fn extract_filter_options(candidates: &[Candidate]) -> FilterOptions {
    let mut locations = BTreeSet::new();
    let mut skills = BTreeSet::new();
    let mut education_levels = BTreeSet::new();
    let mut work_availability = BTreeSet::new();
    let mut companies = BTreeSet::new();
    let mut roles = BTreeSet::new();

    for candidate in candidates {
        locations.insert(candidate.location.clone());
        education_levels.insert(candidate.education.highest_level.clone());
        skills.extend(candidate.skills.iter().cloned());
        work_availability.extend(candidate.work_availability.iter().map(|k| k.as_str().to_string()));
        for experience in &candidate.work_experiences {
            companies.insert(experience.company.clone());
            roles.insert(experience.role_name.clone());
        }
    }

    FilterOptions {
        locations: locations.into_iter().collect(),
        skills: skills.into_iter().collect(),
        education_levels: education_levels.into_iter().collect(),
        work_availability: work_availability.into_iter().collect(),
        companies: companies.into_iter().collect(),
        roles: roles.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CandidateBuilder;

    #[test]
    fn maps_variants_present_in_the_batch() {
        let pool = vec![
            CandidateBuilder::new("a").skills(&["JS", "Rust", "ReactJS"]).build(),
            CandidateBuilder::new("b").skills(&["JavaScript", "postgres"]).build(),
        ];
        let normalized = normalize_skills(&pool);

        assert_eq!(normalized[0].skills, vec!["javascript", "Rust", "react"]);
        assert_eq!(normalized[1].skills, vec!["javascript", "postgresql"]);
    }

    #[test]
    fn distinct_database_products_are_not_folded_into_mysql() {
        let pool = vec![CandidateBuilder::new("a")
            .skills(&["My SQL", "MariaDB", "SQL"])
            .build()];
        assert_eq!(normalize_skills(&pool)[0].skills, vec!["mysql", "MariaDB", "SQL"]);
    }

    #[test]
    fn skill_normalization_is_idempotent() {
        let pool = vec![
            CandidateBuilder::new("a").skills(&["py", "Node.js", "Figma", "ts"]).build(),
            CandidateBuilder::new("b").skills(&["Amazon Web Services", "SQL"]).build(),
        ];
        let once = normalize_skills(&pool);
        let twice = normalize_skills(&once);
        assert_eq!(once, twice);
        assert_eq!(once[1].skills, vec!["aws", "SQL"]);
    }

    #[test]
    fn salary_strings_are_canonicalized() {
        assert_eq!(normalize_salary_string("$117,548"), "$117,548");
        assert_eq!(normalize_salary_string("95000"), "$95,000");
        assert_eq!(normalize_salary_string("USD 1234567"), "$1,234,567");
        assert_eq!(normalize_salary_string("$999"), "$999");
        assert_eq!(normalize_salary_string(""), "$0");
        assert_eq!(normalize_salary_string("negotiable"), "$0");
        assert_eq!(normalize_salary_string("$0"), "$0");
    }

    #[test]
    fn salary_normalization_is_idempotent_and_keeps_missing_entries() {
        let pool = vec![CandidateBuilder::new("a").salary("USD 80000").build()];
        let once = normalize_salaries(&pool);
        let twice = normalize_salaries(&once);
        assert_eq!(once, twice);
        assert_eq!(once[0].salary_expectation.full_time.as_deref(), Some("$80,000"));
        assert_eq!(once[0].salary_expectation.contract, None);
    }

    #[test]
    fn deduplicate_keeps_first_email() {
        let pool = vec![
            CandidateBuilder::new("a").email("same@example.com").build(),
            CandidateBuilder::new("b").email("other@example.com").build(),
            CandidateBuilder::new("c").email("same@example.com").build(),
        ];
        let result = deduplicate(&pool);
        let unique: Vec<&str> = result.unique.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(unique, vec!["a", "b"]);
        assert_eq!(result.duplicates[0].id, "c");
    }

    #[test]
    fn filter_options_are_sorted_and_distinct() {
        let pool = vec![
            CandidateBuilder::new("a").location("Berlin").skills(&["Rust", "Go"]).build(),
            CandidateBuilder::new("b").location("Austin").skills(&["Go"]).build(),
        ];
        let options = extract_filter_options(&pool);
        assert_eq!(options.locations, vec!["Austin", "Berlin"]);
        assert_eq!(options.skills, vec!["Go", "Rust"]);
        assert_eq!(options.work_availability, vec!["full-time"]);
    }
}
