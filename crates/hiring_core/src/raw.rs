//! crates/hiring_core/src/raw.rs
//!
//! The lenient input shape. Source data is messy, so every field is optional
//! here and the field names follow the source JSON. `validation.rs` turns
//! these into fully-populated `Candidate`s.

use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkExperience {
    pub company: Option<String>,
    #[serde(rename = "roleName")]
    pub role_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDegree {
    pub degree: Option<String>,
    pub subject: Option<String>,
    pub school: Option<String>,
    pub gpa: Option<String>,
    #[serde(rename = "startDate")]
    pub start_date: Option<String>,
    #[serde(rename = "endDate")]
    pub end_date: Option<String>,
    #[serde(rename = "originalSchool")]
    pub original_school: Option<String>,
    #[serde(rename = "isTop50")]
    pub is_top50: Option<bool>,
    #[serde(rename = "isTop25")]
    pub is_top25: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEducation {
    pub highest_level: Option<String>,
    pub degrees: Option<Vec<RawDegree>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawApplicant {
    pub id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub submitted_at: Option<String>,
    pub work_availability: Option<Vec<String>>,
    pub annual_salary_expectation: Option<BTreeMap<String, String>>,
    pub work_experiences: Option<Vec<RawWorkExperience>>,
    pub education: Option<RawEducation>,
    pub skills: Option<Vec<String>>,
}
