//! crates/hiring_core/src/domain.rs
//!
//! Defines the core data structures for the candidate review engine.
//! These are the validated, fully-populated shapes; the lenient input shape
//! lives in `raw.rs`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Candidates are keyed by their string id throughout the engine.
pub type CandidateId = String;

/// The team-size cap enforced by the selection ledger.
pub const TEAM_SIZE_LIMIT: usize = 5;

//=========================================================================================
// Candidate
//=========================================================================================

/// The kinds of engagement a candidate can be available for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkAvailability {
    FullTime,
    PartTime,
    Contract,
    Internship,
}

impl WorkAvailability {
    pub const ALL: [WorkAvailability; 4] = [
        WorkAvailability::FullTime,
        WorkAvailability::PartTime,
        WorkAvailability::Contract,
        WorkAvailability::Internship,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            WorkAvailability::FullTime => "full-time",
            WorkAvailability::PartTime => "part-time",
            WorkAvailability::Contract => "contract",
            WorkAvailability::Internship => "internship",
        }
    }

    /// Parses the wire spelling (`"full-time"`, `"part-time"`, ...).
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Annual salary expectation per availability kind. Every entry is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryExpectation {
    #[serde(rename = "full-time", skip_serializing_if = "Option::is_none")]
    pub full_time: Option<String>,
    #[serde(rename = "part-time", skip_serializing_if = "Option::is_none")]
    pub part_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internship: Option<String>,
}

impl SalaryExpectation {
    pub fn get(&self, kind: WorkAvailability) -> Option<&str> {
        match kind {
            WorkAvailability::FullTime => self.full_time.as_deref(),
            WorkAvailability::PartTime => self.part_time.as_deref(),
            WorkAvailability::Contract => self.contract.as_deref(),
            WorkAvailability::Internship => self.internship.as_deref(),
        }
    }

    pub fn set(&mut self, kind: WorkAvailability, value: Option<String>) {
        let slot = match kind {
            WorkAvailability::FullTime => &mut self.full_time,
            WorkAvailability::PartTime => &mut self.part_time,
            WorkAvailability::Contract => &mut self.contract,
            WorkAvailability::Internship => &mut self.internship,
        };
        *slot = value;
    }

    /// Returns a copy with `f` applied to every present entry.
    pub fn map_present(&self, f: impl Fn(&str) -> String) -> Self {
        let mut mapped = Self::default();
        for kind in WorkAvailability::ALL {
            mapped.set(kind, self.get(kind).map(&f));
        }
        mapped
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub company: String,
    pub role_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Degree {
    pub degree: String,
    pub subject: String,
    pub school: String,
    /// GPA bucket text as submitted, e.g. `"GPA 3.5-3.9"`.
    pub gpa: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub original_school: String,
    pub is_top50: bool,
    pub is_top25: Option<bool>,
}

impl Degree {
    pub fn is_top25(&self) -> bool {
        self.is_top25.unwrap_or(false)
    }

    pub fn is_top_school(&self) -> bool {
        self.is_top50 || self.is_top25()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Education {
    pub highest_level: String,
    pub degrees: Vec<Degree>,
}

/// A validated applicant. Immutable once it enters the pool; every
/// normalization pass produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub submitted_at: DateTime<Utc>,
    pub work_availability: BTreeSet<WorkAvailability>,
    pub salary_expectation: SalaryExpectation,
    pub work_experiences: Vec<WorkExperience>,
    pub education: Education,
    pub skills: Vec<String>,
}

impl Candidate {
    pub fn role_count(&self) -> usize {
        self.work_experiences.len()
    }

    /// The parsed full-time salary figure. A missing, unreadable or `$0`
    /// figure is `None`.
    pub fn full_time_salary(&self) -> Option<u64> {
        self.salary_expectation
            .full_time
            .as_deref()
            .and_then(parse_salary_amount)
            .filter(|amount| *amount > 0)
    }

    /// Full-time salary with a missing figure counted as zero.
    pub fn full_time_salary_or_zero(&self) -> u64 {
        self.full_time_salary().unwrap_or(0)
    }

    pub fn attended_top_school(&self) -> bool {
        self.education.degrees.iter().any(Degree::is_top_school)
    }

    pub fn experience_level(&self) -> ExperienceLevel {
        ExperienceLevel::from_role_count(self.role_count())
    }
}

/// Reads the leading integer of a money string after dropping `$`, `,` and
/// surrounding whitespace. `"$45,000"` is 45000, `"80k"` is 80, `"n/a"` is `None`.
pub fn parse_salary_amount(value: &str) -> Option<u64> {
    let cleaned: String = value.chars().filter(|c| *c != '$' && *c != ',').collect();
    let digits: String = cleaned
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Three-bucket experience classification by role count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    Junior,
    Mid,
    Senior,
}

impl ExperienceLevel {
    /// junior ≤ 2 roles, mid 3–5, senior > 5.
    pub fn from_role_count(roles: usize) -> Self {
        match roles {
            0..=2 => ExperienceLevel::Junior,
            3..=5 => ExperienceLevel::Mid,
            _ => ExperienceLevel::Senior,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ExperienceLevel::Junior => "Junior",
            ExperienceLevel::Mid => "Mid",
            ExperienceLevel::Senior => "Senior",
        }
    }
}

//=========================================================================================
// Scores
//=========================================================================================

/// The five component scores and their weighted total, all in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub candidate_id: CandidateId,
    pub total_score: u32,
    pub experience_score: u32,
    pub education_score: u32,
    pub skill_score: u32,
    pub salary_score: u32,
    pub diversity_score: u32,
    pub scored_at: DateTime<Utc>,
}

/// Scores keyed by candidate id.
pub type ScoreMap = BTreeMap<CandidateId, Score>;

//=========================================================================================
// Reviewer Ledgers
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiversityFactor {
    Location,
    Education,
    Experience,
    Skills,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortlistEntry {
    pub candidate_id: CandidateId,
    pub shortlisted_at: DateTime<Utc>,
    pub reason: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionEntry {
    pub candidate_id: CandidateId,
    pub selected_at: DateTime<Utc>,
    pub position: String,
    pub reason: String,
    pub diversity_factor: Option<DiversityFactor>,
}

//=========================================================================================
// Filtering and Sorting
//=========================================================================================

/// The reviewer's active predicates. Empty sets and `None` impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    pub locations: BTreeSet<String>,
    pub work_availability: BTreeSet<WorkAvailability>,
    pub min_experience: usize,
    pub max_salary: Option<u64>,
    pub education_level: BTreeSet<String>,
    pub skills: BTreeSet<String>,
    pub is_shortlisted: Option<bool>,
    pub is_selected: Option<bool>,
}

/// A partial update merged over a `FilterState`. Absent fields keep their value.
///
/// `max_salary`, `is_shortlisted` and `is_selected` are doubly optional so a
/// caller can reset them to unset with an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterUpdate {
    pub search: Option<String>,
    pub locations: Option<BTreeSet<String>>,
    pub work_availability: Option<BTreeSet<WorkAvailability>>,
    pub min_experience: Option<usize>,
    #[serde(with = "double_option")]
    pub max_salary: Option<Option<u64>>,
    pub education_level: Option<BTreeSet<String>>,
    pub skills: Option<BTreeSet<String>>,
    #[serde(with = "double_option")]
    pub is_shortlisted: Option<Option<bool>>,
    #[serde(with = "double_option")]
    pub is_selected: Option<Option<bool>>,
}

impl FilterState {
    /// Merges `update` over `self`, field by field.
    pub fn merged(&self, update: FilterUpdate) -> FilterState {
        FilterState {
            search: update.search.unwrap_or_else(|| self.search.clone()),
            locations: update.locations.unwrap_or_else(|| self.locations.clone()),
            work_availability: update
                .work_availability
                .unwrap_or_else(|| self.work_availability.clone()),
            min_experience: update.min_experience.unwrap_or(self.min_experience),
            max_salary: update.max_salary.unwrap_or(self.max_salary),
            education_level: update
                .education_level
                .unwrap_or_else(|| self.education_level.clone()),
            skills: update.skills.unwrap_or_else(|| self.skills.clone()),
            is_shortlisted: update.is_shortlisted.unwrap_or(self.is_shortlisted),
            is_selected: update.is_selected.unwrap_or(self.is_selected),
        }
    }
}

/// Distinguishes a field that is absent (`None`) from one set to `null` (`Some(None)`).
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// The fields a visible list can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    TotalScore,
    Id,
    Name,
    Email,
    Phone,
    Location,
    SubmittedAt,
    Experience,
    Salary,
    SkillCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            key: SortKey::TotalScore,
            direction: SortDirection::Desc,
        }
    }
}

//=========================================================================================
// Pool Statistics
//=========================================================================================

/// Frequency tallies over a candidate set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiversityMetrics {
    pub location_counts: BTreeMap<String, usize>,
    pub education_level_counts: BTreeMap<String, usize>,
    pub experience_level_counts: BTreeMap<String, usize>,
    pub top_school_count: usize,
    pub average_salary: u64,
}

/// Advisory concentration risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn code(self) -> u8 {
        match self {
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
        }
    }

    /// Maps a mean risk code back to a level: ≥2.5 high, ≥1.5 medium, else low.
    pub fn from_average(average: f64) -> Self {
        if average >= 2.5 {
            RiskLevel::High
        } else if average >= 1.5 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_amount_reads_leading_integer() {
        assert_eq!(parse_salary_amount("$45,000"), Some(45_000));
        assert_eq!(parse_salary_amount(" 120000 "), Some(120_000));
        assert_eq!(parse_salary_amount("80k"), Some(80));
        assert_eq!(parse_salary_amount("negotiable"), None);
        assert_eq!(parse_salary_amount(""), None);
    }

    #[test]
    fn experience_level_buckets() {
        assert_eq!(ExperienceLevel::from_role_count(0), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_role_count(2), ExperienceLevel::Junior);
        assert_eq!(ExperienceLevel::from_role_count(3), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_role_count(5), ExperienceLevel::Mid);
        assert_eq!(ExperienceLevel::from_role_count(6), ExperienceLevel::Senior);
    }

    #[test]
    fn filter_update_merges_only_present_fields() {
        let base = FilterState {
            search: "ann".into(),
            min_experience: 2,
            max_salary: Some(100_000),
            ..FilterState::default()
        };
        let update: FilterUpdate =
            serde_json::from_str(r#"{"min_experience": 4, "max_salary": null}"#).unwrap();
        let merged = base.merged(update);

        assert_eq!(merged.search, "ann");
        assert_eq!(merged.min_experience, 4);
        assert_eq!(merged.max_salary, None);
    }

    #[test]
    fn risk_level_from_average() {
        assert_eq!(RiskLevel::from_average(3.0), RiskLevel::High);
        assert_eq!(RiskLevel::from_average(2.5), RiskLevel::High);
        assert_eq!(RiskLevel::from_average(2.0), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_average(4.0 / 3.0), RiskLevel::Low);
    }

    #[test]
    fn work_availability_round_trips_wire_spelling() {
        for kind in WorkAvailability::ALL {
            assert_eq!(WorkAvailability::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(WorkAvailability::parse("freelance"), None);
    }
}
