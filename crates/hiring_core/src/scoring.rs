//! crates/hiring_core/src/scoring.rs
//!
//! Five-factor candidate scoring. Experience, education, skill and salary
//! depend on the candidate alone; diversity is relative to the pool, so the
//! whole score map is rebuilt whenever pool membership changes.

use crate::domain::{Candidate, Education, Score, ScoreMap, WorkExperience};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

const SENIOR_MARKERS: [&str; 4] = ["senior", "lead", "manager", "director"];

const TECH_SKILLS: [&str; 7] = [
    "React",
    "Node.js",
    "Python",
    "JavaScript",
    "TypeScript",
    "Docker",
    "AWS",
];

/// Locations held by fewer than this share of the pool earn the diversity bonus.
const RARE_LOCATION_SHARE: f64 = 0.1;

//=========================================================================================
// Weights
//=========================================================================================

/// Weights of the five components in the total. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub experience: f64,
    pub education: f64,
    pub skill: f64,
    pub salary: f64,
    pub diversity: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            experience: 0.30,
            education: 0.25,
            skill: 0.20,
            salary: 0.15,
            diversity: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.experience + self.education + self.skill + self.salary + self.diversity
    }

    /// Weighted total of the five components, rounded to the nearest integer.
    pub fn total(
        &self,
        experience: u32,
        education: u32,
        skill: u32,
        salary: u32,
        diversity: u32,
    ) -> u32 {
        let weighted = f64::from(experience) * self.experience
            + f64::from(education) * self.education
            + f64::from(skill) * self.skill
            + f64::from(salary) * self.salary
            + f64::from(diversity) * self.diversity;
        (weighted.round() as u32).min(100)
    }
}

//=========================================================================================
// Component Scores
//=========================================================================================

/// 10 per role, 5 per distinct company, 15 per senior role; capped at 100.
pub fn experience_score(experiences: &[WorkExperience]) -> u32 {
    let roles = experiences.len() as u32;
    let companies = experiences
        .iter()
        .map(|e| e.company.as_str())
        .collect::<std::collections::HashSet<_>>()
        .len() as u32;
    let senior_roles = experiences
        .iter()
        .filter(|e| is_senior_role(&e.role_name))
        .count() as u32;
    (roles * 10 + companies * 5 + senior_roles * 15).min(100)
}

pub fn is_senior_role(role_name: &str) -> bool {
    let role = role_name.to_lowercase();
    SENIOR_MARKERS.iter().any(|marker| role.contains(marker))
}

pub fn education_score(education: &Education) -> u32 {
    let score: u32 = education
        .degrees
        .iter()
        .map(|degree| {
            let school = if degree.is_top25() {
                30
            } else if degree.is_top50 {
                20
            } else {
                10
            };
            school + gpa_bonus(&degree.gpa)
        })
        .sum();
    score.min(100)
}

fn gpa_bonus(gpa: &str) -> u32 {
    if gpa.contains("3.5-3.9") || gpa.contains("3.5–3.9") || gpa.contains("4.0") {
        15
    } else if gpa.contains("3.0-3.4") || gpa.contains("3.0–3.4") {
        10
    } else {
        0
    }
}

/// 5 per listed skill plus 10 per skill matching the reference tech list.
pub fn skill_score(skills: &[String]) -> u32 {
    let relevant = skills.iter().filter(|skill| is_tech_skill(skill)).count() as u32;
    (skills.len() as u32 * 5 + relevant * 10).min(100)
}

fn is_tech_skill(skill: &str) -> bool {
    let skill = skill.to_lowercase();
    TECH_SKILLS
        .iter()
        .any(|tech| skill.contains(&tech.to_lowercase()))
}

/// Banded against the full-time figure; a missing figure is neutral (50).
pub fn salary_score(full_time_salary: Option<u64>) -> u32 {
    match full_time_salary {
        None => 50,
        Some(amount) if amount < 50_000 => 100,
        Some(amount) if amount < 80_000 => 80,
        Some(amount) if amount < 120_000 => 60,
        Some(amount) if amount < 150_000 => 40,
        Some(_) => 20,
    }
}

/// +30 when the other candidates sharing this location make up less than 10%
/// of the pool, +20 when some degree is outside computing and engineering.
pub fn diversity_score(candidate: &Candidate, pool: &[Candidate]) -> u32 {
    let mut score = 0;

    let peers = pool
        .iter()
        .filter(|other| other.id != candidate.id && other.location == candidate.location)
        .count();
    if (peers as f64) < pool.len() as f64 * RARE_LOCATION_SHARE {
        score += 30;
    }

    let has_other_background = candidate.education.degrees.iter().any(|degree| {
        let subject = degree.subject.to_lowercase();
        !subject.contains("computer") && !subject.contains("engineering")
    });
    if has_other_background {
        score += 20;
    }

    score.min(100)
}

//=========================================================================================
// Total
//=========================================================================================

/// Scores one candidate against the pool it belongs to.
pub fn score(candidate: &Candidate, pool: &[Candidate]) -> Score {
    score_with(candidate, pool, &ScoreWeights::default(), Utc::now())
}

pub fn score_with(
    candidate: &Candidate,
    pool: &[Candidate],
    weights: &ScoreWeights,
    scored_at: DateTime<Utc>,
) -> Score {
    let experience_score = experience_score(&candidate.work_experiences);
    let education_score = education_score(&candidate.education);
    let skill_score = skill_score(&candidate.skills);
    let salary_score = salary_score(candidate.full_time_salary());
    let diversity_score = diversity_score(candidate, pool);

    Score {
        candidate_id: candidate.id.clone(),
        total_score: weights.total(
            experience_score,
            education_score,
            skill_score,
            salary_score,
            diversity_score,
        ),
        experience_score,
        education_score,
        skill_score,
        salary_score,
        diversity_score,
        scored_at,
    }
}

/// Rebuilds the full score map for a pool.
pub fn score_pool(pool: &[Candidate]) -> ScoreMap {
    let weights = ScoreWeights::default();
    let scored_at = Utc::now();
    let scores: ScoreMap = pool
        .iter()
        .map(|candidate| {
            (
                candidate.id.clone(),
                score_with(candidate, pool, &weights, scored_at),
            )
        })
        .collect();
    debug!(candidates = scores.len(), "Rebuilt score map");
    scores
}
