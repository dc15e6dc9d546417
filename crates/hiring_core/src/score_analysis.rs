//! crates/hiring_core/src/score_analysis.rs
//!
//! Reviewer-facing reading of a `Score`: letter grade, status band, the
//! weighted breakdown, and where the candidate sits in the pool.

use crate::domain::{Score, ScoreMap};
use crate::scoring::ScoreWeights;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_total(total: u32) -> Self {
        match total {
            95.. => Grade::APlus,
            90..=94 => Grade::A,
            85..=89 => Grade::BPlus,
            80..=84 => Grade::B,
            75..=79 => Grade::CPlus,
            70..=74 => Grade::C,
            60..=69 => Grade::D,
            _ => Grade::F,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreStatus {
    pub fn from_total(total: u32) -> Self {
        match total {
            80.. => ScoreStatus::Excellent,
            65..=79 => ScoreStatus::Good,
            50..=64 => ScoreStatus::Fair,
            _ => ScoreStatus::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Component {
    Experience,
    Education,
    Skills,
    Diversity,
    SalaryFit,
}

impl Component {
    pub fn label(self) -> &'static str {
        match self {
            Component::Experience => "Experience",
            Component::Education => "Education",
            Component::Skills => "Skills",
            Component::Diversity => "Diversity",
            Component::SalaryFit => "Salary Fit",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Component::Experience => "Work experience relevance and quality",
            Component::Education => "Educational background and achievements",
            Component::Skills => "Technical and soft skills alignment",
            Component::Diversity => "Contribution to team diversity",
            Component::SalaryFit => "Alignment with salary expectations",
        }
    }

    /// What to do about a component scoring under the weakness threshold.
    fn recommendation(self) -> Option<&'static str> {
        match self {
            Component::Experience => Some("Consider additional screening for relevant experience"),
            Component::Education => Some("Evaluate practical skills over educational credentials"),
            Component::Skills => Some("Conduct technical assessment or skills interview"),
            Component::SalaryFit => Some("Discuss salary expectations early in process"),
            Component::Diversity => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownItem {
    pub component: Component,
    pub label: &'static str,
    pub description: &'static str,
    pub score: u32,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreAnalysis {
    pub total_score: u32,
    pub grade: Grade,
    pub status: ScoreStatus,
    pub breakdown: Vec<BreakdownItem>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub recommendations: Vec<String>,
}

const STRENGTH_THRESHOLD: u32 = 75;
const WEAKNESS_THRESHOLD: u32 = 60;

pub fn breakdown(score: &Score, weights: &ScoreWeights) -> Vec<BreakdownItem> {
    [
        (Component::Experience, score.experience_score, weights.experience),
        (Component::Education, score.education_score, weights.education),
        (Component::Skills, score.skill_score, weights.skill),
        (Component::Diversity, score.diversity_score, weights.diversity),
        (Component::SalaryFit, score.salary_score, weights.salary),
    ]
    .into_iter()
    .map(|(component, score, weight)| BreakdownItem {
        component,
        label: component.label(),
        description: component.description(),
        score,
        weight,
    })
    .collect()
}

pub fn analyze(score: &Score) -> ScoreAnalysis {
    let breakdown = breakdown(score, &ScoreWeights::default());

    let mut ranked: Vec<&BreakdownItem> = breakdown.iter().collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    let strengths: Vec<String> = ranked
        .into_iter()
        .take(2)
        .filter(|item| item.score >= STRENGTH_THRESHOLD)
        .map(|item| format!("Strong {} ({}/100)", item.label.to_lowercase(), item.score))
        .collect();

    let weak: Vec<&BreakdownItem> = breakdown
        .iter()
        .filter(|item| item.score < WEAKNESS_THRESHOLD)
        .collect();
    let weaknesses = weak
        .iter()
        .map(|item| format!("{} needs improvement ({}/100)", item.label, item.score))
        .collect();

    let mut recommendations = Vec::new();
    if !strengths.is_empty() {
        recommendations.push("Consider highlighting top strengths during interviews".to_string());
    }
    recommendations.extend(
        weak.iter()
            .filter_map(|item| item.component.recommendation())
            .map(str::to_string),
    );

    ScoreAnalysis {
        total_score: score.total_score,
        grade: Grade::from_total(score.total_score),
        status: ScoreStatus::from_total(score.total_score),
        breakdown,
        strengths,
        weaknesses,
        recommendations,
    }
}

//=========================================================================================
// Pool Comparison
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComparison {
    pub total_score: u32,
    /// Share of the pool at or below this candidate's rank, 0–100.
    pub percentile: u32,
    pub above_average: bool,
    pub top_performer: bool,
}

/// Ranks `score` among every score in `pool`. Ties share the best rank.
pub fn compare(score: &Score, pool: &ScoreMap) -> ScoreComparison {
    let mut totals: Vec<u32> = pool.values().map(|s| s.total_score).collect();
    if totals.is_empty() {
        totals.push(score.total_score);
    }
    totals.sort_unstable_by(|a, b| b.cmp(a));

    let n = totals.len();
    let rank = totals
        .iter()
        .position(|total| *total == score.total_score)
        .unwrap_or_else(|| totals.iter().filter(|total| **total > score.total_score).count())
        + 1;
    let percentile = (((n + 1).saturating_sub(rank)) as f64 / n as f64 * 100.0).round() as u32;
    let average = totals.iter().map(|t| f64::from(*t)).sum::<f64>() / n as f64;

    ScoreComparison {
        total_score: score.total_score,
        percentile,
        above_average: f64::from(score.total_score) > average,
        top_performer: percentile >= 90,
    }
}
