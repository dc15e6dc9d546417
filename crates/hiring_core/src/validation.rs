//! crates/hiring_core/src/validation.rs
//!
//! Converts an untyped record batch into validated `Candidate`s.
//!
//! Each record goes through three stages in isolation:
//! 1. a lenient parse into `RawApplicant` (every field optional),
//! 2. a defaulting step that fills in every missing field,
//! 3. a strict check that produces the typed `Candidate`.
//!
//! A record that fails any stage is reported with its index and does not
//! stop the rest of the batch.

use crate::domain::{
    Candidate, Degree, Education, SalaryExpectation, WorkAvailability, WorkExperience,
};
use crate::ports::LoadError;
use crate::raw::{RawApplicant, RawDegree};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;
use tracing::{info, warn};
use uuid::Uuid;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

const DEFAULT_DEGREE_START_YEAR: i32 = 2020;
const DEFAULT_DEGREE_END_YEAR: i32 = 2024;

//=========================================================================================
// Result Types
//=========================================================================================

/// One rejected record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    pub index: usize,
    pub message: String,
    pub raw_record: Value,
}

/// The outcome of validating a batch: accepted candidates in input order,
/// plus one error per rejected record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub candidates: Vec<Candidate>,
    pub errors: Vec<ValidationError>,
}

//=========================================================================================
// Validator
//=========================================================================================

/// Validates raw record batches. The clock is injectable so that a missing
/// `submitted_at` defaults to a known instant in tests.
#[derive(Debug, Clone)]
pub struct Validator {
    now: DateTime<Utc>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    pub fn with_clock(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    /// Validates every record independently. Output order follows input order.
    pub fn validate(&self, records: &[Value]) -> ValidationReport {
        let mut report = ValidationReport::default();
        let mut taken_ids: HashSet<String> = HashSet::new();

        for (index, record) in records.iter().enumerate() {
            match self.validate_record(record, index, &taken_ids) {
                Ok(candidate) => {
                    taken_ids.insert(candidate.id.clone());
                    report.candidates.push(candidate);
                }
                Err(message) => {
                    warn!(index, %message, "Rejected applicant record");
                    report.errors.push(ValidationError {
                        index,
                        message,
                        raw_record: record.clone(),
                    });
                }
            }
        }

        info!(
            accepted = report.candidates.len(),
            rejected = report.errors.len(),
            "Validated applicant batch"
        );
        report
    }

    fn validate_record(
        &self,
        record: &Value,
        index: usize,
        taken_ids: &HashSet<String>,
    ) -> Result<Candidate, String> {
        let raw = parse_lenient(record)?;
        let draft = apply_defaults(raw, index, self.now, taken_ids);
        into_candidate(draft, taken_ids)
    }
}

/// Validates a whole load. Fails only when the input is not an array;
/// per-record problems land in the report.
pub fn ingest(value: &Value) -> Result<ValidationReport, LoadError> {
    match value {
        Value::Array(records) => Ok(Validator::new().validate(records)),
        other => Err(LoadError::NotAnArray(json_kind(other))),
    }
}

/// Like `ingest`, starting from JSON text.
pub fn ingest_str(text: &str) -> Result<ValidationReport, LoadError> {
    let value: Value = serde_json::from_str(text)?;
    ingest(&value)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

//=========================================================================================
// Stage 1: Lenient Parse
//=========================================================================================

fn parse_lenient(record: &Value) -> Result<RawApplicant, String> {
    if !record.is_object() {
        return Err(format!("record must be an object, found {}", json_kind(record)));
    }
    serde_json::from_value(record.clone()).map_err(|e| e.to_string())
}

//=========================================================================================
// Stage 2: Defaulting
//=========================================================================================

/// A fully-populated applicant that has not passed the strict check yet.
struct ApplicantDraft {
    id: String,
    name: String,
    email: String,
    phone: String,
    location: String,
    submitted_at: DateTime<Utc>,
    work_availability: Vec<String>,
    salary: BTreeMap<String, String>,
    work_experiences: Vec<WorkExperience>,
    highest_level: String,
    degrees: Vec<DegreeDraft>,
    skills: Vec<String>,
}

struct DegreeDraft {
    degree: String,
    subject: String,
    school: String,
    gpa: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    original_school: String,
    is_top50: bool,
    is_top25: Option<bool>,
}

/// Empty strings count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn generate_id(taken_ids: &HashSet<String>) -> String {
    loop {
        let id = format!("applicant_{}", Uuid::new_v4().simple());
        if !taken_ids.contains(&id) {
            return id;
        }
    }
}

fn apply_defaults(
    raw: RawApplicant,
    index: usize,
    now: DateTime<Utc>,
    taken_ids: &HashSet<String>,
) -> ApplicantDraft {
    let work_availability = match raw.work_availability {
        Some(kinds) if !kinds.is_empty() => kinds,
        _ => vec![WorkAvailability::FullTime.as_str().to_string()],
    };
    let salary = raw.annual_salary_expectation.unwrap_or_else(|| {
        BTreeMap::from([(WorkAvailability::FullTime.as_str().to_string(), "$0".to_string())])
    });
    let work_experiences = raw
        .work_experiences
        .unwrap_or_default()
        .into_iter()
        .map(|exp| WorkExperience {
            company: present(exp.company).unwrap_or_else(|| "Unknown Company".to_string()),
            role_name: present(exp.role_name).unwrap_or_else(|| "Unknown Role".to_string()),
        })
        .collect();
    let education = raw.education.unwrap_or_default();

    ApplicantDraft {
        id: present(raw.id).unwrap_or_else(|| generate_id(taken_ids)),
        name: present(raw.name).unwrap_or_else(|| format!("Unknown Applicant {index}")),
        email: present(raw.email).unwrap_or_else(|| format!("unknown{index}@example.com")),
        phone: raw.phone.unwrap_or_default(),
        location: present(raw.location).unwrap_or_else(|| "Unknown".to_string()),
        submitted_at: timestamp_or(raw.submitted_at, index, now),
        work_availability,
        salary,
        work_experiences,
        highest_level: present(education.highest_level).unwrap_or_else(|| "Unknown".to_string()),
        degrees: education
            .degrees
            .unwrap_or_default()
            .into_iter()
            .map(|degree| default_degree(degree, index))
            .collect(),
        skills: raw.skills.unwrap_or_default(),
    }
}

fn default_degree(raw: RawDegree, index: usize) -> DegreeDraft {
    let school = present(raw.school);
    let is_top25 = raw.is_top25;
    DegreeDraft {
        degree: present(raw.degree).unwrap_or_else(|| "Unknown Degree".to_string()),
        subject: present(raw.subject).unwrap_or_else(|| "Unknown Subject".to_string()),
        original_school: present(raw.original_school)
            .or_else(|| school.clone())
            .unwrap_or_else(|| "Unknown School".to_string()),
        school: school.unwrap_or_else(|| "Unknown School".to_string()),
        gpa: present(raw.gpa).unwrap_or_else(|| "Unknown".to_string()),
        start_date: date_or(raw.start_date, index, "startDate", DEFAULT_DEGREE_START_YEAR),
        end_date: date_or(raw.end_date, index, "endDate", DEFAULT_DEGREE_END_YEAR),
        // A top-25 school is also a top-50 school.
        is_top50: raw.is_top50.unwrap_or(false) || is_top25 == Some(true),
        is_top25,
    }
}

/// Unreadable timestamps are treated like missing ones.
fn timestamp_or(value: Option<String>, index: usize, now: DateTime<Utc>) -> DateTime<Utc> {
    match present(value) {
        Some(text) => parse_timestamp(&text).unwrap_or_else(|| {
            warn!(index, value = %text, "Unreadable submitted_at, using the validation time");
            now
        }),
        None => now,
    }
}

/// Unreadable degree dates fall back to January 1st of `default_year`.
fn date_or(value: Option<String>, index: usize, field: &str, default_year: i32) -> NaiveDate {
    let fallback = || NaiveDate::from_ymd_opt(default_year, 1, 1).unwrap_or_default();
    match present(value) {
        Some(text) => parse_date(&text).unwrap_or_else(|| {
            warn!(index, field, value = %text, "Unreadable degree date, using the default");
            fallback()
        }),
        None => fallback(),
    }
}

//=========================================================================================
// Stage 3: Strict Check
//=========================================================================================

fn into_candidate(draft: ApplicantDraft, taken_ids: &HashSet<String>) -> Result<Candidate, String> {
    if taken_ids.contains(&draft.id) {
        return Err(format!("duplicate id '{}'", draft.id));
    }
    if draft.name.chars().count() < 2 {
        return Err(format!("name '{}' must be at least 2 characters", draft.name));
    }
    if !EMAIL_PATTERN.is_match(&draft.email) {
        return Err(format!("invalid email '{}'", draft.email));
    }
    let work_availability = draft
        .work_availability
        .iter()
        .map(|kind| {
            WorkAvailability::parse(kind).ok_or_else(|| format!("invalid work availability '{kind}'"))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;

    let mut salary_expectation = SalaryExpectation::default();
    for kind in WorkAvailability::ALL {
        salary_expectation.set(kind, draft.salary.get(kind.as_str()).cloned());
    }

    if let Some(position) = draft.skills.iter().position(String::is_empty) {
        return Err(format!("skills[{position}] must not be empty"));
    }

    let degrees = draft.degrees.into_iter().map(into_degree).collect();

    Ok(Candidate {
        id: draft.id,
        name: draft.name,
        email: draft.email,
        phone: draft.phone,
        location: draft.location,
        submitted_at: draft.submitted_at,
        work_availability,
        salary_expectation,
        work_experiences: draft.work_experiences,
        education: Education {
            highest_level: draft.highest_level,
            degrees,
        },
        skills: draft.skills,
    })
}

fn into_degree(draft: DegreeDraft) -> Degree {
    Degree {
        degree: draft.degree,
        subject: draft.subject,
        school: draft.school,
        gpa: draft.gpa,
        start_date: draft.start_date,
        end_date: draft.end_date,
        original_school: draft.original_school,
        is_top50: draft.is_top50,
        is_top25: draft.is_top25,
    }
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS[.f]` (taken as UTC) or a bare date.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    parse_date(value).and_then(|date| date.and_hms_opt(0, 0, 0)).map(|dt| dt.and_utc())
}

/// Accepts a full date, a year-month, a bare year, or an RFC 3339 timestamp.
fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.date_naive());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    value
        .parse::<i32>()
        .ok()
        .filter(|_| value.len() == 4)
        .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn validator() -> Validator {
        Validator::with_clock(Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap())
    }

    fn full_record() -> Value {
        json!({
            "id": "a-1",
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+1 555 0100",
            "location": "London",
            "submitted_at": "2025-01-28 09:02:16.000000",
            "work_availability": ["full-time", "contract"],
            "annual_salary_expectation": { "full-time": "$95,000" },
            "work_experiences": [{ "company": "Analytical", "roleName": "Senior Engineer" }],
            "education": {
                "highest_level": "Bachelor's Degree",
                "degrees": [{
                    "degree": "Bachelor's Degree",
                    "subject": "Mathematics",
                    "school": "Cambridge",
                    "gpa": "GPA 3.5-3.9",
                    "startDate": "2011",
                    "endDate": "2015",
                    "isTop50": true,
                    "isTop25": true
                }]
            },
            "skills": ["Python", "Docker"]
        })
    }

    #[test]
    fn accepts_a_complete_record() {
        let report = validator().validate(&[full_record()]);
        assert!(report.errors.is_empty());
        let candidate = &report.candidates[0];

        assert_eq!(candidate.id, "a-1");
        assert_eq!(candidate.role_count(), 1);
        assert_eq!(candidate.full_time_salary(), Some(95_000));
        assert_eq!(candidate.work_availability.len(), 2);
        let degree = &candidate.education.degrees[0];
        assert_eq!(degree.start_date, NaiveDate::from_ymd_opt(2011, 1, 1).unwrap());
        assert_eq!(degree.original_school, "Cambridge");
    }

    #[test]
    fn fills_defaults_for_an_empty_object() {
        let report = validator().validate(&[json!({})]);
        assert!(report.errors.is_empty());
        let candidate = &report.candidates[0];

        assert!(candidate.id.starts_with("applicant_"));
        assert_eq!(candidate.name, "Unknown Applicant 0");
        assert_eq!(candidate.email, "unknown0@example.com");
        assert_eq!(candidate.location, "Unknown");
        assert_eq!(candidate.education.highest_level, "Unknown");
        assert_eq!(
            candidate.work_availability,
            BTreeSet::from([WorkAvailability::FullTime])
        );
        assert_eq!(candidate.salary_expectation.full_time.as_deref(), Some("$0"));
        assert_eq!(candidate.submitted_at, Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap());
    }

    #[test]
    fn defaults_nested_work_and_degree_fields() {
        let record = json!({
            "name": "Grace Hopper",
            "work_experiences": [{ "company": "" }],
            "education": { "degrees": [{ "school": "Yale", "isTop25": true }] }
        });
        let report = validator().validate(&[record]);
        let candidate = &report.candidates[0];

        assert_eq!(candidate.work_experiences[0].company, "Unknown Company");
        assert_eq!(candidate.work_experiences[0].role_name, "Unknown Role");
        let degree = &candidate.education.degrees[0];
        assert_eq!(degree.original_school, "Yale");
        assert_eq!(degree.gpa, "Unknown");
        assert!(degree.is_top50, "top-25 implies top-50");
        assert_eq!(degree.end_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn unreadable_dates_fall_back_to_defaults() {
        let mut record = full_record();
        record["submitted_at"] = json!("28/01/2025");
        record["education"]["degrees"][0]["startDate"] = json!("Fall 2019");
        record["education"]["degrees"][0]["endDate"] = json!("soon");

        let report = validator().validate(&[record]);
        assert!(report.errors.is_empty());
        let candidate = &report.candidates[0];
        assert_eq!(candidate.submitted_at, Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap());
        let degree = &candidate.education.degrees[0];
        assert_eq!(degree.start_date, NaiveDate::from_ymd_opt(2020, 1, 1).unwrap());
        assert_eq!(degree.end_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(degree.school, "Cambridge");
    }

    #[test]
    fn collects_failures_without_aborting_the_batch() {
        let records = vec![
            full_record(),
            json!({ "name": 42 }),
            json!({ "email": "not-an-email" }),
            json!("just a string"),
            json!({ "work_availability": ["freelance"] }),
            json!({ "skills": ["Rust", ""] }),
            json!({ "name": "Linus" }),
        ];
        let report = validator().validate(&records);

        assert_eq!(report.candidates.len() + report.errors.len(), records.len());
        let rejected: Vec<usize> = report.errors.iter().map(|e| e.index).collect();
        assert_eq!(rejected, vec![1, 2, 3, 4, 5]);
        assert_eq!(report.candidates[1].name, "Linus");
        assert_eq!(report.errors[3].raw_record, records[4]);
    }

    #[test]
    fn rejects_duplicate_source_ids() {
        let report = validator().validate(&[full_record(), full_record()]);
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.errors[0].index, 1);
        assert!(report.errors[0].message.contains("duplicate id"));
    }

    #[test]
    fn generated_ids_are_unique_within_a_batch() {
        let records: Vec<Value> = (0..200).map(|_| json!({})).collect();
        let report = validator().validate(&records);
        let ids: HashSet<&str> = report.candidates.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn empty_availability_defaults_to_full_time() {
        let report = validator().validate(&[json!({ "work_availability": [] })]);
        assert!(report.candidates[0]
            .work_availability
            .contains(&WorkAvailability::FullTime));
    }

    #[test]
    fn ingest_distinguishes_load_level_failures() {
        assert!(matches!(ingest(&json!({"a": 1})), Err(LoadError::NotAnArray("an object"))));
        assert!(matches!(ingest_str("{not json"), Err(LoadError::NotJson(_))));
        let report = ingest_str("[{}, 7]").unwrap();
        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn timestamp_formats() {
        assert!(parse_timestamp("2025-01-28T09:02:16Z").is_some());
        assert!(parse_timestamp("2025-01-28 09:02:16.000000").is_some());
        assert!(parse_timestamp("2025-01-28").is_some());
        assert!(parse_timestamp("yesterday").is_none());
        assert_eq!(parse_date("2019-09"), NaiveDate::from_ymd_opt(2019, 9, 1));
        assert_eq!(parse_date("20"), None);
    }
}
