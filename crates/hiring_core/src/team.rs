//! crates/hiring_core/src/team.rs
//!
//! Composition analysis of the selected team: skill coverage, experience mix,
//! spread, and the gaps worth filling with the remaining seats.

use crate::domain::{Candidate, ExperienceLevel};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const ESSENTIAL_SKILLS: [&str; 7] = ["javascript", "react", "node", "python", "sql", "aws", "git"];
const DESIRED_SKILLS: [&str; 5] = [
    "leadership",
    "project management",
    "ui/ux",
    "devops",
    "data analysis",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamSkills {
    /// Share of the essential skills covered by someone on the team, 0–100.
    pub coverage: f64,
    pub overlaps: Vec<String>,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceDistribution {
    pub junior: usize,
    pub mid: usize,
    pub senior: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamExperience {
    pub average_roles: f64,
    pub distribution: ExperienceDistribution,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamSpread {
    pub location_spread: usize,
    pub education_spread: usize,
    pub skill_spread: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamGaps {
    pub skill_gaps: Vec<String>,
    pub experience_gaps: Vec<String>,
    pub diversity_gaps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamComposition {
    pub current_size: usize,
    pub max_size: usize,
    pub skills: TeamSkills,
    pub experience: TeamExperience,
    pub diversity: TeamSpread,
    pub gaps: TeamGaps,
    pub overall_score: u32,
    pub recommendations: Vec<String>,
}

pub fn analyze_team(selected: &[Candidate], max_size: usize) -> TeamComposition {
    let skills = team_skills(selected);
    let experience = team_experience(selected);
    let diversity = team_spread(selected);
    let gaps = team_gaps(selected, &experience.distribution, &diversity);
    let overall_score = team_score(&skills, &experience.distribution, &diversity);
    let recommendations = recommendations(&gaps, selected.len(), max_size);

    TeamComposition {
        current_size: selected.len(),
        max_size,
        skills,
        experience,
        diversity,
        gaps,
        overall_score,
        recommendations,
    }
}

fn lowercase_skills(candidates: &[Candidate]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for candidate in candidates {
        for skill in &candidate.skills {
            *counts.entry(skill.to_lowercase()).or_insert(0) += 1;
        }
    }
    counts
}

fn team_skills(candidates: &[Candidate]) -> TeamSkills {
    let counts = lowercase_skills(candidates);
    let missing: Vec<String> = ESSENTIAL_SKILLS
        .iter()
        .filter(|skill| !counts.contains_key(**skill))
        .map(|skill| skill.to_string())
        .collect();
    let covered = ESSENTIAL_SKILLS.len() - missing.len();
    let coverage = covered as f64 / ESSENTIAL_SKILLS.len() as f64 * 100.0;

    let overlap_threshold = (candidates.len() as f64 * 0.6).ceil() as usize;
    let overlaps = counts
        .into_iter()
        .filter(|(_, count)| *count > overlap_threshold)
        .map(|(skill, _)| skill)
        .collect();

    TeamSkills {
        coverage,
        overlaps,
        missing,
    }
}

fn team_experience(candidates: &[Candidate]) -> TeamExperience {
    let mut distribution = ExperienceDistribution::default();
    for candidate in candidates {
        match candidate.experience_level() {
            ExperienceLevel::Junior => distribution.junior += 1,
            ExperienceLevel::Mid => distribution.mid += 1,
            ExperienceLevel::Senior => distribution.senior += 1,
        }
    }
    let average_roles = if candidates.is_empty() {
        0.0
    } else {
        candidates.iter().map(Candidate::role_count).sum::<usize>() as f64 / candidates.len() as f64
    };
    TeamExperience {
        average_roles,
        distribution,
    }
}

fn team_spread(candidates: &[Candidate]) -> TeamSpread {
    let locations: BTreeSet<&str> = candidates.iter().map(|c| c.location.as_str()).collect();
    let levels: BTreeSet<&str> = candidates
        .iter()
        .map(|c| c.education.highest_level.as_str())
        .collect();
    TeamSpread {
        location_spread: locations.len(),
        education_spread: levels.len(),
        skill_spread: lowercase_skills(candidates).len(),
    }
}

fn covers(skills: &BTreeMap<String, usize>, desired: &str) -> bool {
    let compact = desired.replace('/', "");
    skills
        .keys()
        .any(|skill| skill.contains(desired) || skill.replace('/', "").contains(&compact))
}

fn team_gaps(
    candidates: &[Candidate],
    distribution: &ExperienceDistribution,
    spread: &TeamSpread,
) -> TeamGaps {
    let skills = lowercase_skills(candidates);
    let size = candidates.len();
    let mut gaps = TeamGaps {
        skill_gaps: DESIRED_SKILLS
            .iter()
            .filter(|desired| !covers(&skills, desired))
            .map(|desired| desired.to_string())
            .collect(),
        ..TeamGaps::default()
    };

    if distribution.senior == 0 && size > 2 {
        gaps.experience_gaps.push("senior leadership".to_string());
    }
    if distribution.junior == 0 && size > 3 {
        gaps.experience_gaps.push("junior talent for mentoring".to_string());
    }
    if spread.location_spread < size.min(3) {
        gaps.diversity_gaps.push("geographic diversity".to_string());
    }
    if spread.education_spread < 2 && size > 2 {
        gaps.diversity_gaps
            .push("educational background diversity".to_string());
    }
    gaps
}

/// 0.4 skills + 0.3 experience mix + 0.3 spread.
fn team_score(skills: &TeamSkills, distribution: &ExperienceDistribution, spread: &TeamSpread) -> u32 {
    let overlap_penalty = if skills.overlaps.len() > 2 { 10.0 } else { 0.0 };
    let skills_score = (skills.coverage - overlap_penalty).clamp(0.0, 100.0);
    let experience_score = if distribution.senior > 0 && distribution.mid > 0 {
        100.0
    } else {
        70.0
    };
    let spread_score =
        ((spread.location_spread * 20 + spread.education_spread * 15) as f64).min(100.0);
    (skills_score * 0.4 + experience_score * 0.3 + spread_score * 0.3).round() as u32
}

fn recommendations(gaps: &TeamGaps, size: usize, max_size: usize) -> Vec<String> {
    let mut recommendations = Vec::new();
    if size < max_size {
        if !gaps.skill_gaps.is_empty() {
            let wanted: Vec<&str> = gaps.skill_gaps.iter().take(3).map(String::as_str).collect();
            recommendations.push(format!("Consider adding candidates with: {}", wanted.join(", ")));
        }
        if !gaps.experience_gaps.is_empty() {
            recommendations.push(format!("Team needs: {}", gaps.experience_gaps.join(", ")));
        }
        if !gaps.diversity_gaps.is_empty() {
            recommendations.push(format!("Improve: {}", gaps.diversity_gaps.join(", ")));
        }
    }
    if size == max_size {
        recommendations.push(
            "Team is at capacity - consider if current composition meets all requirements"
                .to_string(),
        );
    }
    recommendations.truncate(4);
    recommendations
}
