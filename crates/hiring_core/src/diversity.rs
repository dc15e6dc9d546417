//! crates/hiring_core/src/diversity.rs
//!
//! Pool-level distributions and advisory bias analysis. Nothing here feeds
//! back into scoring or filtering.

use crate::domain::{Candidate, DiversityMetrics, RiskLevel, ScoreMap};
use serde::Serialize;
use std::collections::BTreeMap;

const DOMINANT_LOCATION_SHARE: f64 = 0.3;
const DOMINANT_SKILL_SHARE: f64 = 0.5;
const LOCATION_SCORE_SPREAD: f64 = 30.0;
const TOP_SCHOOL_SCORE_GAP: f64 = 20.0;
const MAX_RECOMMENDATIONS: usize = 5;

const CORE_TECH_SKILLS: [&str; 8] = [
    "javascript", "react", "python", "java", "node", "docker", "aws", "git",
];

//=========================================================================================
// Metrics
//=========================================================================================

/// Tallies location, education level and experience level over `candidates`.
/// Missing salaries count as zero and stay in the mean's denominator.
pub fn metrics(candidates: &[Candidate]) -> DiversityMetrics {
    let mut result = DiversityMetrics::default();
    let mut total_salary: u128 = 0;

    for candidate in candidates {
        *result
            .location_counts
            .entry(candidate.location.clone())
            .or_default() += 1;
        *result
            .education_level_counts
            .entry(candidate.education.highest_level.clone())
            .or_default() += 1;
        *result
            .experience_level_counts
            .entry(candidate.experience_level().label().to_string())
            .or_default() += 1;
        if candidate.attended_top_school() {
            result.top_school_count += 1;
        }
        total_salary += u128::from(candidate.full_time_salary_or_zero());
    }

    if !candidates.is_empty() {
        result.average_salary = (total_salary as f64 / candidates.len() as f64).round() as u64;
    }
    result
}

//=========================================================================================
// Bias Analysis
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBias {
    pub risk: RiskLevel,
    pub dominant_locations: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationBias {
    pub risk: RiskLevel,
    pub top_schools_percentage: f64,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillsBias {
    pub risk: RiskLevel,
    pub dominant_skills: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BiasAnalysis {
    pub overall_risk: RiskLevel,
    pub location: LocationBias,
    pub education: EducationBias,
    pub skills: SkillsBias,
    /// At most five, location first.
    pub recommendations: Vec<String>,
}

pub fn analyze_bias(candidates: &[Candidate], scores: &ScoreMap) -> BiasAnalysis {
    let location = location_bias(candidates, scores);
    let education = education_bias(candidates, scores);
    let skills = skills_bias(candidates);

    let codes = [location.risk, education.risk, skills.risk].map(|risk| f64::from(risk.code()));
    let overall_risk = RiskLevel::from_average(codes.iter().sum::<f64>() / codes.len() as f64);

    let recommendations = location
        .recommendations
        .iter()
        .chain(&education.recommendations)
        .chain(&skills.recommendations)
        .take(MAX_RECOMMENDATIONS)
        .cloned()
        .collect();

    BiasAnalysis {
        overall_risk,
        location,
        education,
        skills,
        recommendations,
    }
}

fn total_score_of(scores: &ScoreMap, candidate: &Candidate) -> f64 {
    scores
        .get(&candidate.id)
        .map_or(0.0, |score| f64::from(score.total_score))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn location_bias(candidates: &[Candidate], scores: &ScoreMap) -> LocationBias {
    let mut by_location: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for candidate in candidates {
        by_location
            .entry(candidate.location.as_str())
            .or_default()
            .push(total_score_of(scores, candidate));
    }

    let total = candidates.len() as f64;
    let dominant_locations: Vec<String> = by_location
        .iter()
        .filter(|(_, members)| members.len() as f64 / total > DOMINANT_LOCATION_SHARE)
        .map(|(location, _)| location.to_string())
        .collect();

    let mut recommendations = Vec::new();
    if !dominant_locations.is_empty() {
        recommendations.push(format!(
            "Consider more geographic diversity - {} dominate the pool",
            dominant_locations.join(", ")
        ));
    }

    let averages: Vec<f64> = by_location.values().filter_map(|s| mean(s)).collect();
    if let (Some(max), Some(min)) = (
        averages.iter().copied().reduce(f64::max),
        averages.iter().copied().reduce(f64::min),
    ) {
        if max - min > LOCATION_SCORE_SPREAD {
            recommendations.push(
                "Significant score variance by location detected - review scoring criteria"
                    .to_string(),
            );
        }
    }

    let risk = match dominant_locations.len() {
        0 => RiskLevel::Low,
        1 => RiskLevel::Medium,
        _ => RiskLevel::High,
    };

    LocationBias {
        risk,
        dominant_locations,
        recommendations,
    }
}

fn education_bias(candidates: &[Candidate], scores: &ScoreMap) -> EducationBias {
    let (top, other): (Vec<&Candidate>, Vec<&Candidate>) =
        candidates.iter().partition(|c| c.attended_top_school());

    let top_schools_percentage = if candidates.is_empty() {
        0.0
    } else {
        top.len() as f64 / candidates.len() as f64 * 100.0
    };

    let mut recommendations = Vec::new();
    if top_schools_percentage > 70.0 {
        recommendations
            .push("Consider candidates from a wider range of educational institutions".to_string());
    }

    let top_scores: Vec<f64> = top.iter().map(|c| total_score_of(scores, c)).collect();
    let other_scores: Vec<f64> = other.iter().map(|c| total_score_of(scores, c)).collect();
    if let (Some(top_avg), Some(other_avg)) = (mean(&top_scores), mean(&other_scores)) {
        if top_avg - other_avg > TOP_SCHOOL_SCORE_GAP {
            recommendations
                .push("Review if scoring criteria may favor prestigious school credentials".to_string());
        }
    }

    let risk = if top_schools_percentage > 80.0 {
        RiskLevel::High
    } else if top_schools_percentage > 60.0 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    };

    EducationBias {
        risk,
        top_schools_percentage,
        recommendations,
    }
}

fn skills_bias(candidates: &[Candidate]) -> SkillsBias {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for candidate in candidates {
        for skill in &candidate.skills {
            *counts.entry(skill.to_lowercase()).or_default() += 1;
        }
    }

    let total = candidates.len() as f64;
    let mut dominant: Vec<(String, usize)> = counts
        .into_iter()
        .filter(|(_, count)| *count as f64 / total > DOMINANT_SKILL_SHARE)
        .collect();
    dominant.sort_by(|a, b| b.1.cmp(&a.1));
    let dominant_skills: Vec<String> = dominant.into_iter().take(3).map(|(skill, _)| skill).collect();

    let mut recommendations = Vec::new();
    if dominant_skills.len() > 2 {
        recommendations.push(format!(
            "Skill pool may be too homogeneous - {} are over-represented",
            dominant_skills.join(", ")
        ));
    }

    let tech_only = candidates
        .iter()
        .filter(|c| {
            !c.skills.is_empty()
                && c.skills.iter().all(|skill| {
                    let skill = skill.to_lowercase();
                    CORE_TECH_SKILLS.iter().any(|tech| skill.contains(tech))
                })
        })
        .count();
    if total > 0.0 && tech_only as f64 / total > 0.8 {
        recommendations
            .push("Consider candidates with complementary soft skills and domain expertise".to_string());
    }

    let risk = match dominant_skills.len() {
        0 | 1 => RiskLevel::Low,
        2 => RiskLevel::Medium,
        _ => RiskLevel::High,
    };

    SkillsBias {
        risk,
        dominant_skills,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::score_pool;
    use crate::test_support::CandidateBuilder;

    #[test]
    fn metrics_tally_distributions() {
        let pool = vec![
            CandidateBuilder::new("a")
                .location("Austin")
                .roles(1)
                .salary("$60,000")
                .highest_level("Bachelor's Degree")
                .degree("Math", "Unknown", true, None)
                .build(),
            CandidateBuilder::new("b")
                .location("Austin")
                .roles(4)
                .salary("$90,001")
                .highest_level("Master's Degree")
                .build(),
            CandidateBuilder::new("c").location("Lagos").roles(7).build(),
        ];
        let m = metrics(&pool);

        assert_eq!(m.location_counts["Austin"], 2);
        assert_eq!(m.location_counts["Lagos"], 1);
        assert_eq!(m.education_level_counts["Unknown"], 1);
        assert_eq!(m.experience_level_counts["Junior"], 1);
        assert_eq!(m.experience_level_counts["Mid"], 1);
        assert_eq!(m.experience_level_counts["Senior"], 1);
        assert_eq!(m.top_school_count, 1);
        // (60000 + 90001 + 0) / 3, rounded
        assert_eq!(m.average_salary, 50_000);
    }

    #[test]
    fn average_salary_survives_figures_near_the_u64_limit() {
        let pool: Vec<Candidate> = ["a", "b"]
            .iter()
            .map(|id| {
                CandidateBuilder::new(id)
                    .salary("$10,000,000,000,000,000,000")
                    .build()
            })
            .collect();
        assert_eq!(metrics(&pool).average_salary, 10_000_000_000_000_000_000);
    }

    #[test]
    fn metrics_of_empty_set_are_zeroed() {
        assert_eq!(metrics(&[]), DiversityMetrics::default());
    }

    #[test]
    fn one_dominant_location_is_medium_two_are_high() {
        let pool: Vec<Candidate> = ["A", "A", "B", "C", "D"]
            .iter()
            .enumerate()
            .map(|(i, loc)| CandidateBuilder::new(&i.to_string()).location(loc).build())
            .collect();
        let analysis = analyze_bias(&pool, &score_pool(&pool));
        assert_eq!(analysis.location.dominant_locations, vec!["A"]);
        assert_eq!(analysis.location.risk, RiskLevel::Medium);

        let pool: Vec<Candidate> = ["A", "A", "B", "B", "C"]
            .iter()
            .enumerate()
            .map(|(i, loc)| CandidateBuilder::new(&i.to_string()).location(loc).build())
            .collect();
        let analysis = analyze_bias(&pool, &score_pool(&pool));
        assert_eq!(analysis.location.risk, RiskLevel::High);
    }

    #[test]
    fn homogeneous_pool_is_high_risk_overall() {
        let pool: Vec<Candidate> = (0..4)
            .map(|i| {
                CandidateBuilder::new(&i.to_string())
                    .location("Austin")
                    .degree("CS", "Unknown", true, Some(true))
                    .skills(&["React", "Node", "AWS"])
                    .build()
            })
            .collect();
        let analysis = analyze_bias(&pool, &score_pool(&pool));

        assert_eq!(analysis.location.risk, RiskLevel::Medium);
        assert_eq!(analysis.education.risk, RiskLevel::High);
        assert_eq!(analysis.education.top_schools_percentage, 100.0);
        assert_eq!(analysis.skills.risk, RiskLevel::High);
        assert_eq!(analysis.overall_risk, RiskLevel::High);
        assert!(analysis.recommendations.len() <= 5);
        assert!(analysis.recommendations[0].starts_with("Consider more geographic diversity"));
    }

    #[test]
    fn empty_pool_is_low_risk() {
        let analysis = analyze_bias(&[], &ScoreMap::new());
        assert_eq!(analysis.overall_risk, RiskLevel::Low);
        assert!(analysis.recommendations.is_empty());
    }
}
