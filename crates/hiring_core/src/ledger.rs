//! crates/hiring_core/src/ledger.rs
//!
//! Reviewer decisions: the shortlist (unbounded), the selected team (capped)
//! and an append-only log of every ledger change.

use crate::domain::{
    CandidateId, DiversityFactor, Priority, SelectionEntry, ShortlistEntry, TEAM_SIZE_LIMIT,
};
use crate::ports::{CoreError, CoreResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

//=========================================================================================
// Shortlist
//=========================================================================================

/// At most one entry per candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ShortlistLedger {
    entries: BTreeMap<CandidateId, ShortlistEntry>,
}

impl ShortlistLedger {
    pub fn contains(&self, candidate_id: &str) -> bool {
        self.entries.contains_key(candidate_id)
    }

    pub fn get(&self, candidate_id: &str) -> Option<&ShortlistEntry> {
        self.entries.get(candidate_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &ShortlistEntry> {
        self.entries.values()
    }

    /// Adds or replaces the entry for `candidate_id`.
    pub fn insert(&mut self, candidate_id: &str, reason: String, priority: Priority) {
        self.entries.insert(
            candidate_id.to_string(),
            ShortlistEntry {
                candidate_id: candidate_id.to_string(),
                shortlisted_at: Utc::now(),
                reason,
                priority,
            },
        );
    }

    pub fn remove(&mut self, candidate_id: &str) -> Option<ShortlistEntry> {
        self.entries.remove(candidate_id)
    }
}

//=========================================================================================
// Selection
//=========================================================================================

/// The chosen team. Never holds more than `limit` entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionLedger {
    entries: BTreeMap<CandidateId, SelectionEntry>,
    limit: usize,
}

impl Default for SelectionLedger {
    fn default() -> Self {
        Self::with_limit(TEAM_SIZE_LIMIT)
    }
}

impl SelectionLedger {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            limit,
        }
    }

    pub fn contains(&self, candidate_id: &str) -> bool {
        self.entries.contains_key(candidate_id)
    }

    pub fn get(&self, candidate_id: &str) -> Option<&SelectionEntry> {
        self.entries.get(candidate_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn ids(&self) -> impl Iterator<Item = &CandidateId> {
        self.entries.keys()
    }

    pub fn entries(&self) -> impl Iterator<Item = &SelectionEntry> {
        self.entries.values()
    }

    /// Adds or replaces the entry for `candidate_id`. A new member is refused
    /// once the team is full, and the ledger is left as it was.
    pub fn insert(
        &mut self,
        candidate_id: &str,
        position: String,
        reason: String,
        diversity_factor: Option<DiversityFactor>,
    ) -> CoreResult<()> {
        if !self.contains(candidate_id) && self.is_full() {
            return Err(CoreError::CapacityExceeded { limit: self.limit });
        }
        self.entries.insert(
            candidate_id.to_string(),
            SelectionEntry {
                candidate_id: candidate_id.to_string(),
                selected_at: Utc::now(),
                position,
                reason,
                diversity_factor,
            },
        );
        Ok(())
    }

    pub fn remove(&mut self, candidate_id: &str) -> Option<SelectionEntry> {
        self.entries.remove(candidate_id)
    }

    /// Empties the team, returning the ids that were on it.
    pub fn clear(&mut self) -> Vec<CandidateId> {
        let ids = self.entries.keys().cloned().collect();
        self.entries.clear();
        ids
    }
}

//=========================================================================================
// Action Log
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Shortlist,
    RemoveFromShortlist,
    Select,
    Unselect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateAction {
    pub candidate_id: CandidateId,
    pub action: ActionKind,
    pub at: DateTime<Utc>,
}

/// Append-only history of ledger changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionLog {
    actions: Vec<CandidateAction>,
}

impl ActionLog {
    pub fn record(&mut self, candidate_id: &str, action: ActionKind) {
        self.actions.push(CandidateAction {
            candidate_id: candidate_id.to_string(),
            action,
            at: Utc::now(),
        });
    }

    pub fn all(&self) -> &[CandidateAction] {
        &self.actions
    }

    pub fn for_candidate<'a>(
        &'a self,
        candidate_id: &'a str,
    ) -> impl Iterator<Item = &'a CandidateAction> + 'a {
        self.actions
            .iter()
            .filter(move |action| action.candidate_id == candidate_id)
    }
}
