//! crates/hiring_core/src/report.rs
//!
//! The end-of-review hiring report and the CSV export of a candidate list.

use crate::domain::{Candidate, Score, ScoreMap, SelectionEntry};
use crate::ledger::{SelectionLedger, ShortlistLedger};
use crate::ports::ExportError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

const TOP_CANDIDATES: usize = 10;
const TOP_SKILLS: usize = 10;
const TECH_SKILLS: [&str; 7] = ["javascript", "react", "python", "java", "node", "docker", "aws"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_applicants: usize,
    pub shortlisted_count: usize,
    pub selected_count: usize,
    pub average_score: u32,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    pub rank: usize,
    pub candidate: Candidate,
    pub score: Score,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedCandidate {
    pub candidate: Candidate,
    pub score: Option<Score>,
    pub selection: SelectionEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamDiversity {
    pub location_diversity: usize,
    pub education_diversity: usize,
    pub skills_diversity: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillCount {
    pub skill: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillsSummary {
    pub most_common_skills: Vec<SkillCount>,
    pub tech_skills_count: usize,
    pub average_skills_per_candidate: usize,
}

/// Statistics over the positive full-time salary figures only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SalarySummary {
    pub average: u64,
    pub median: u64,
    pub min: u64,
    pub max: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationSummary {
    pub locations: BTreeMap<String, usize>,
    pub unique_locations: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HiringReport {
    pub summary: ReportSummary,
    pub top_candidates: Vec<RankedCandidate>,
    pub selected_candidates: Vec<SelectedCandidate>,
    pub diversity: TeamDiversity,
    pub skills: SkillsSummary,
    pub salary: SalarySummary,
    pub locations: LocationSummary,
}

/// Builds the report for `pool`. The team-level sections describe the
/// selected candidates only.
pub fn hiring_report(
    pool: &[Candidate],
    scores: &ScoreMap,
    shortlist: &ShortlistLedger,
    selection: &SelectionLedger,
) -> HiringReport {
    let selected: Vec<SelectedCandidate> = pool
        .iter()
        .filter_map(|candidate| {
            selection.get(&candidate.id).map(|entry| SelectedCandidate {
                candidate: candidate.clone(),
                score: scores.get(&candidate.id).cloned(),
                selection: entry.clone(),
            })
        })
        .collect();
    let team: Vec<&Candidate> = selected.iter().map(|s| &s.candidate).collect();

    HiringReport {
        summary: ReportSummary {
            total_applicants: pool.len(),
            shortlisted_count: pool.iter().filter(|c| shortlist.contains(&c.id)).count(),
            selected_count: selected.len(),
            average_score: average_score(pool, scores),
            generated_at: Utc::now(),
        },
        top_candidates: top_candidates(pool, scores, TOP_CANDIDATES),
        diversity: team_diversity(&team),
        skills: skills_summary(&team),
        salary: salary_summary(&team),
        locations: location_summary(&team),
        selected_candidates: selected,
    }
}

fn average_score(pool: &[Candidate], scores: &ScoreMap) -> u32 {
    let totals: Vec<u32> = pool
        .iter()
        .filter_map(|c| scores.get(&c.id).map(|s| s.total_score))
        .collect();
    if totals.is_empty() {
        return 0;
    }
    (totals.iter().map(|t| f64::from(*t)).sum::<f64>() / totals.len() as f64).round() as u32
}

/// Highest totals first; ties keep pool order.
pub fn top_candidates(pool: &[Candidate], scores: &ScoreMap, count: usize) -> Vec<RankedCandidate> {
    let mut scored: Vec<(&Candidate, &Score)> = pool
        .iter()
        .filter_map(|c| scores.get(&c.id).map(|s| (c, s)))
        .collect();
    scored.sort_by(|a, b| b.1.total_score.cmp(&a.1.total_score));
    scored
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(index, (candidate, score))| RankedCandidate {
            rank: index + 1,
            candidate: candidate.clone(),
            score: score.clone(),
        })
        .collect()
}

fn team_diversity(team: &[&Candidate]) -> TeamDiversity {
    let locations: BTreeSet<&str> = team.iter().map(|c| c.location.as_str()).collect();
    let levels: BTreeSet<&str> = team
        .iter()
        .map(|c| c.education.highest_level.as_str())
        .collect();
    let skills: BTreeSet<String> = team
        .iter()
        .flat_map(|c| c.skills.iter().map(|s| s.to_lowercase()))
        .collect();

    let mut recommendations = Vec::new();
    if locations.len() < 3 {
        recommendations.push("Consider candidates from more diverse locations".to_string());
    }
    if levels.len() < 2 {
        recommendations
            .push("Consider candidates with different educational backgrounds".to_string());
    }
    let tech_heavy = !team.is_empty()
        && team.iter().all(|c| {
            c.skills.iter().any(|skill| {
                let skill = skill.to_lowercase();
                ["javascript", "react", "python", "java"]
                    .iter()
                    .any(|tech| skill.contains(tech))
            })
        });
    if tech_heavy {
        recommendations
            .push("Consider candidates with diverse skill sets beyond core tech".to_string());
    }

    TeamDiversity {
        location_diversity: locations.len(),
        education_diversity: levels.len(),
        skills_diversity: skills.len(),
        recommendations,
    }
}

fn skills_summary(team: &[&Candidate]) -> SkillsSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut total = 0;
    let mut tech = 0;
    for candidate in team {
        total += candidate.skills.len();
        for skill in &candidate.skills {
            *counts.entry(skill.as_str()).or_default() += 1;
            let lower = skill.to_lowercase();
            if TECH_SKILLS.iter().any(|t| lower.contains(t)) {
                tech += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    SkillsSummary {
        most_common_skills: ranked
            .into_iter()
            .take(TOP_SKILLS)
            .map(|(skill, count)| SkillCount {
                skill: skill.to_string(),
                count,
            })
            .collect(),
        tech_skills_count: tech,
        average_skills_per_candidate: if team.is_empty() {
            0
        } else {
            (total as f64 / team.len() as f64).round() as usize
        },
    }
}

fn salary_summary(team: &[&Candidate]) -> SalarySummary {
    let mut salaries: Vec<u64> = team
        .iter()
        .map(|c| c.full_time_salary_or_zero())
        .filter(|s| *s > 0)
        .collect();
    salaries.sort_unstable();

    match (salaries.first(), salaries.last()) {
        (Some(&min), Some(&max)) => SalarySummary {
            average: (salaries.iter().map(|s| u128::from(*s)).sum::<u128>() as f64
                / salaries.len() as f64)
                .round() as u64,
            median: salaries[salaries.len() / 2],
            min,
            max,
        },
        _ => SalarySummary::default(),
    }
}

fn location_summary(team: &[&Candidate]) -> LocationSummary {
    let mut locations = BTreeMap::new();
    for candidate in team {
        *locations.entry(candidate.location.clone()).or_default() += 1;
    }
    LocationSummary {
        unique_locations: locations.len(),
        locations,
    }
}

//=========================================================================================
// CSV Export
//=========================================================================================

const CSV_HEADERS: [&str; 18] = [
    "ID",
    "Name",
    "Email",
    "Phone",
    "Location",
    "Submitted At",
    "Work Availability",
    "Salary Expectation (Full-time)",
    "Total Experience",
    "Highest Education",
    "Skills Count",
    "Top Skills",
    "Total Score",
    "Experience Score",
    "Education Score",
    "Skill Score",
    "Shortlisted",
    "Selected",
];

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Renders `candidates` in the given order, one row each, with score and
/// ledger columns. Unscored candidates show zeros.
pub fn export_csv(
    candidates: &[Candidate],
    scores: &ScoreMap,
    shortlist: &ShortlistLedger,
    selection: &SelectionLedger,
) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADERS)?;

    for candidate in candidates {
        let score = scores.get(&candidate.id);
        let component = |f: fn(&Score) -> u32| score.map_or(0, f).to_string();
        let availability: Vec<&str> = candidate
            .work_availability
            .iter()
            .map(|kind| kind.as_str())
            .collect();
        let top_skills: Vec<&str> = candidate.skills.iter().take(3).map(String::as_str).collect();

        writer.write_record([
            candidate.id.clone(),
            candidate.name.clone(),
            candidate.email.clone(),
            candidate.phone.clone(),
            candidate.location.clone(),
            candidate.submitted_at.format("%Y-%m-%d").to_string(),
            availability.join("; "),
            candidate
                .salary_expectation
                .full_time
                .clone()
                .unwrap_or_default(),
            candidate.role_count().to_string(),
            candidate.education.highest_level.clone(),
            candidate.skills.len().to_string(),
            top_skills.join("; "),
            component(|s| s.total_score),
            component(|s| s.experience_score),
            component(|s| s.education_score),
            component(|s| s.skill_score),
            yes_no(shortlist.contains(&candidate.id)).to_string(),
            yes_no(selection.contains(&candidate.id)).to_string(),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Priority;
    use crate::scoring::score_pool;
    use crate::test_support::CandidateBuilder;

    fn pool() -> Vec<Candidate> {
        vec![
            CandidateBuilder::new("a")
                .name("Ana Lima")
                .location("Lisbon")
                .roles(6)
                .salary("$90,000")
                .skills(&["React", "Figma"])
                .build(),
            CandidateBuilder::new("b")
                .location("Austin")
                .roles(2)
                .salary("$60,000")
                .skills(&["Python"])
                .build(),
            CandidateBuilder::new("c")
                .location("Austin")
                .salary("$120,000")
                .build(),
            CandidateBuilder::new("d").location("Oslo").build(),
        ]
    }

    #[test]
    fn report_summarises_pool_and_team() {
        let pool = pool();
        let scores = score_pool(&pool);
        let mut shortlist = ShortlistLedger::default();
        shortlist.insert("b", "solid".into(), Priority::Medium);
        let mut selection = SelectionLedger::default();
        for id in ["a", "c", "d"] {
            selection
                .insert(id, "Engineer".into(), "fit".into(), None)
                .unwrap();
        }

        let report = hiring_report(&pool, &scores, &shortlist, &selection);

        assert_eq!(report.summary.total_applicants, 4);
        assert_eq!(report.summary.shortlisted_count, 1);
        assert_eq!(report.summary.selected_count, 3);
        assert_eq!(report.top_candidates.len(), 4);
        assert_eq!(report.top_candidates[0].rank, 1);
        assert!(report
            .top_candidates
            .windows(2)
            .all(|w| w[0].score.total_score >= w[1].score.total_score));

        // d has no salary figure and is left out of the salary statistics.
        assert_eq!(
            report.salary,
            SalarySummary {
                average: 105_000,
                median: 120_000,
                min: 90_000,
                max: 120_000,
            }
        );
        assert_eq!(report.locations.unique_locations, 3);
        assert_eq!(report.diversity.location_diversity, 3);
        assert_eq!(report.skills.tech_skills_count, 1);
    }

    #[test]
    fn empty_selection_has_zeroed_team_sections() {
        let pool = pool();
        let report = hiring_report(
            &pool,
            &score_pool(&pool),
            &ShortlistLedger::default(),
            &SelectionLedger::default(),
        );
        assert!(report.selected_candidates.is_empty());
        assert_eq!(report.salary, SalarySummary::default());
        assert_eq!(report.skills.average_skills_per_candidate, 0);
    }

    #[test]
    fn team_salary_statistics_survive_figures_near_the_u64_limit() {
        let pool: Vec<Candidate> = ["x", "y"]
            .iter()
            .map(|id| {
                CandidateBuilder::new(id)
                    .salary("$10,000,000,000,000,000,000")
                    .build()
            })
            .collect();
        let mut selection = SelectionLedger::default();
        for id in ["x", "y"] {
            selection
                .insert(id, "Engineer".into(), "fit".into(), None)
                .unwrap();
        }

        let report = hiring_report(
            &pool,
            &score_pool(&pool),
            &ShortlistLedger::default(),
            &selection,
        );
        assert_eq!(report.salary.average, 10_000_000_000_000_000_000);
        assert_eq!(report.salary.max, 10_000_000_000_000_000_000);
    }

    #[test]
    fn csv_has_header_and_one_row_per_candidate() {
        let pool = pool();
        let scores = score_pool(&pool);
        let mut selection = SelectionLedger::default();
        selection
            .insert("a", "Engineer".into(), "fit".into(), None)
            .unwrap();

        let csv = export_csv(&pool, &scores, &ShortlistLedger::default(), &selection).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("ID,Name,Email"));
        assert!(lines[1].starts_with("a,Ana Lima,a@example.com"));
        // The salary contains a comma and is quoted.
        assert!(lines[1].contains("\"$90,000\""));
        assert!(lines[1].ends_with(",No,Yes"));
        assert!(lines[4].ends_with(",No,No"));
    }
}
