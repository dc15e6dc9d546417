//! Builders shared by the unit tests.

use crate::domain::{
    Candidate, Degree, Education, SalaryExpectation, WorkAvailability, WorkExperience,
};
use chrono::{NaiveDate, TimeZone, Utc};
use std::collections::BTreeSet;

pub struct CandidateBuilder {
    candidate: Candidate,
}

impl CandidateBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            candidate: Candidate {
                id: id.to_string(),
                name: format!("Candidate {id}"),
                email: format!("{id}@example.com"),
                phone: String::new(),
                location: "Unknown".to_string(),
                submitted_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
                work_availability: BTreeSet::from([WorkAvailability::FullTime]),
                salary_expectation: SalaryExpectation::default(),
                work_experiences: Vec::new(),
                education: Education {
                    highest_level: "Unknown".to_string(),
                    degrees: Vec::new(),
                },
                skills: Vec::new(),
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.candidate.name = name.to_string();
        self
    }

    pub fn email(mut self, email: &str) -> Self {
        self.candidate.email = email.to_string();
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.candidate.location = location.to_string();
        self
    }

    pub fn availability(mut self, kinds: &[WorkAvailability]) -> Self {
        self.candidate.work_availability = kinds.iter().copied().collect();
        self
    }

    pub fn salary(mut self, full_time: &str) -> Self {
        self.candidate.salary_expectation.full_time = Some(full_time.to_string());
        self
    }

    pub fn role(mut self, company: &str, role_name: &str) -> Self {
        self.candidate.work_experiences.push(WorkExperience {
            company: company.to_string(),
            role_name: role_name.to_string(),
        });
        self
    }

    /// Adds `count` plain roles, each at its own company.
    pub fn roles(mut self, count: usize) -> Self {
        for i in 0..count {
            self = self.role(&format!("Company {i}"), "Engineer");
        }
        self
    }

    pub fn highest_level(mut self, level: &str) -> Self {
        self.candidate.education.highest_level = level.to_string();
        self
    }

    pub fn degree(mut self, subject: &str, gpa: &str, is_top50: bool, is_top25: Option<bool>) -> Self {
        self.candidate.education.degrees.push(Degree {
            degree: "Bachelor's Degree".to_string(),
            subject: subject.to_string(),
            school: "Some University".to_string(),
            gpa: gpa.to_string(),
            start_date: NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            original_school: "Some University".to_string(),
            is_top50,
            is_top25,
        });
        self
    }

    pub fn skills(mut self, skills: &[&str]) -> Self {
        self.candidate.skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn build(self) -> Candidate {
        self.candidate
    }
}
