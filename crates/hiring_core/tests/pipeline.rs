//! End-to-end: raw JSON through validation, normalization, scoring, the
//! store and its derived views.

use chrono::{TimeZone, Utc};
use hiring_core::pipeline::prepare;
use hiring_core::score_analysis::{self, Grade};
use hiring_core::{
    CoreError, FilterUpdate, HiringStore, Priority, SortConfig, SortDirection, SortKey,
    Validator, TEAM_SIZE_LIMIT,
};
use serde_json::{json, Value};
use std::collections::BTreeSet;

fn scenario_records() -> Vec<Value> {
    json!([
        {
            "id": "A",
            "name": "Avery Quinn",
            "email": "avery@example.com",
            "location": "San Francisco",
            "submitted_at": "2025-01-10 09:30:00.000000",
            "work_availability": ["full-time"],
            "annual_salary_expectation": {"full-time": "$45,000"},
            "work_experiences": [
                {"company": "Acme", "roleName": "Engineer"},
                {"company": "Acme", "roleName": "Senior Engineer"},
                {"company": "Globex", "roleName": "Engineer"},
                {"company": "Globex", "roleName": "Engineer"},
                {"company": "Initech", "roleName": "Engineer"},
                {"company": "Hooli", "roleName": "Engineer"}
            ],
            "education": {
                "highest_level": "Bachelor's Degree",
                "degrees": [{
                    "degree": "Bachelor's Degree",
                    "subject": "Computer Science",
                    "school": "Top School",
                    "gpa": "GPA 3.5-3.9",
                    "startDate": "2012",
                    "endDate": "2016",
                    "isTop50": true,
                    "isTop25": true
                }]
            },
            "skills": ["React", "AWS", "Python", "Docker", "Go", "Rust", "SQL", "Git"]
        },
        {
            "id": "B",
            "name": "Blake Osei",
            "email": "blake@example.com",
            "location": "Accra",
            "submitted_at": "2025-01-11T10:00:00Z",
            "work_availability": ["part-time"],
            "annual_salary_expectation": {"full-time": "$160,000"},
            "work_experiences": [{"company": "Umbrella", "roleName": "Analyst"}],
            "education": {"highest_level": "Unknown", "degrees": []},
            "skills": ["Excel", "Writing"]
        },
        {
            "id": "C",
            "name": "Casey Park",
            "email": "casey@example.com",
            "location": "San Francisco",
            "submitted_at": "2025-01-12T10:00:00Z",
            "work_availability": ["full-time", "contract"],
            "annual_salary_expectation": {"full-time": "95000"},
            "work_experiences": [
                {"company": "Acme", "roleName": "Engineer"},
                {"company": "Globex", "roleName": "Engineer"},
                {"company": "Initech", "roleName": "Engineer"}
            ],
            "education": {"highest_level": "Master's Degree"},
            "skills": ["js", "JavaScript"]
        }
    ])
    .as_array()
    .cloned()
    .unwrap_or_default()
}

fn loaded_store(records: &[Value]) -> HiringStore {
    let validator = Validator::with_clock(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
    let report = validator.validate(records);
    assert!(report.errors.is_empty(), "{:?}", report.errors);
    let mut store = HiringStore::new();
    store.load_pool(prepare(&report.candidates)).unwrap();
    store
}

fn visible_ids(store: &HiringStore) -> Vec<String> {
    store.state().visible().iter().map(|c| c.id.clone()).collect()
}

#[test]
fn scenario_scores() {
    let store = loaded_store(&scenario_records());
    let state = store.state();

    let a = state.score("A").unwrap();
    assert_eq!(a.experience_score, 95);
    assert_eq!(a.salary_score, 100);
    // (30 + 15) for the top-25 degree with a 3.5-3.9 GPA.
    assert_eq!(a.education_score, 45);
    // A shares San Francisco with C and studied computing.
    assert_eq!(a.diversity_score, 0);

    let b = state.score("B").unwrap();
    assert_eq!(b.salary_score, 20);
    // B is alone in Accra.
    assert_eq!(b.diversity_score, 30);

    for score in state.scores().values() {
        assert!(score.total_score <= 100);
    }

    let analysis = score_analysis::analyze(a);
    assert_eq!(analysis.grade, Grade::from_total(a.total_score));
    assert_eq!(analysis.breakdown.len(), 5);
}

#[test]
fn scenario_filters() {
    let mut store = loaded_store(&scenario_records());

    store
        .set_filters(FilterUpdate {
            min_experience: Some(2),
            ..FilterUpdate::default()
        })
        .unwrap();
    let ids: BTreeSet<String> = visible_ids(&store).into_iter().collect();
    assert_eq!(ids, BTreeSet::from(["A".to_string(), "C".to_string()]));

    store
        .set_filters(FilterUpdate {
            min_experience: Some(0),
            locations: Some(BTreeSet::from(["San Francisco".to_string()])),
            ..FilterUpdate::default()
        })
        .unwrap();
    store
        .set_sort(SortConfig {
            key: SortKey::Id,
            direction: SortDirection::Asc,
        })
        .unwrap();
    assert_eq!(visible_ids(&store), vec!["A", "C"]);
    assert_eq!(store.state().metrics().location_counts.len(), 1);
}

#[test]
fn skills_and_salaries_are_normalized_on_load() {
    let store = loaded_store(&scenario_records());
    let c = store.state().candidate("C").unwrap();
    assert_eq!(c.skills, vec!["javascript", "javascript"]);
    assert_eq!(c.salary_expectation.full_time.as_deref(), Some("$95,000"));
}

#[test]
fn shortlist_round_trip_restores_ledger() {
    let mut store = loaded_store(&scenario_records());
    let before = store.state().shortlist().clone();

    store.shortlist("B", "writing samples", Priority::Medium).unwrap();
    store.unshortlist("B").unwrap();

    assert_eq!(store.state().shortlist(), &before);
    assert_eq!(store.state().actions().all().len(), 2);
}

#[test]
fn team_cap_is_enforced() {
    let records: Vec<Value> = (0..=TEAM_SIZE_LIMIT)
        .map(|i| {
            json!({
                "id": format!("p{i}"),
                "name": format!("Person {i}"),
                "email": format!("p{i}@example.com"),
                "skills": ["Rust"]
            })
        })
        .collect();
    let mut store = loaded_store(&records);

    for i in 0..TEAM_SIZE_LIMIT {
        store.select(&format!("p{i}"), "Engineer", "fit", None).unwrap();
    }
    let before = store.state().clone();

    let refused = store.select(&format!("p{TEAM_SIZE_LIMIT}"), "Engineer", "fit", None);
    assert!(matches!(refused, Err(CoreError::CapacityExceeded { .. })));
    assert_eq!(store.state(), &before);

    // Re-selecting a member of a full team is an update, not a new seat.
    assert!(store.select("p0", "Lead", "promoted", None).is_ok());
    assert_eq!(store.state().selection().len(), TEAM_SIZE_LIMIT);
}

#[test]
fn batch_counts_add_up_and_ids_are_unique() {
    let mut records = scenario_records();
    records.push(json!("not an object"));
    records.push(json!({"id": "A", "name": "Dup", "email": "dup@example.com"}));
    records.push(json!({"name": "No Id", "email": "noid@example.com"}));

    let report = Validator::new().validate(&records);
    assert_eq!(report.candidates.len() + report.errors.len(), records.len());
    assert_eq!(report.errors.len(), 2);

    let ids: BTreeSet<&str> = report.candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids.len(), report.candidates.len());
    assert!(report.candidates[3].id.starts_with("applicant_"));
}
