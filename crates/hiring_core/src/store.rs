//! crates/hiring_core/src/store.rs
//!
//! Session state for one review. `HiringState::apply` is the only transition:
//! it takes the current value and an `Action` and returns the next value, with
//! the score map, visible list and metrics already consistent with it.
//! `HiringStore` wraps a state behind a command API.

use crate::diversity;
use crate::domain::{
    Candidate, CandidateId, DiversityFactor, DiversityMetrics, FilterState, FilterUpdate,
    Priority, Score, ScoreMap, SortConfig,
};
use crate::filter;
use crate::ledger::{ActionKind, ActionLog, SelectionLedger, ShortlistLedger};
use crate::ports::{CoreError, CoreResult};
use crate::scoring;
use serde::Serialize;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Replaces the pool and rebuilds every score. Ledger entries for ids that
    /// left the pool are dropped.
    LoadPool(Vec<Candidate>),
    UpdateFilters(FilterUpdate),
    SetSort(SortConfig),
    Shortlist {
        candidate_id: CandidateId,
        reason: String,
        priority: Priority,
    },
    Unshortlist {
        candidate_id: CandidateId,
    },
    Select {
        candidate_id: CandidateId,
        position: String,
        reason: String,
        diversity_factor: Option<DiversityFactor>,
    },
    Unselect {
        candidate_id: CandidateId,
    },
    ClearSelection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HiringState {
    pool: Vec<Candidate>,
    scores: ScoreMap,
    filters: FilterState,
    sort: SortConfig,
    shortlist: ShortlistLedger,
    selection: SelectionLedger,
    actions: ActionLog,
    visible: Vec<Candidate>,
    metrics: DiversityMetrics,
}

impl HiringState {
    /// Returns the state after `action`, or the reason it was refused.
    /// `self` is never modified.
    pub fn apply(&self, action: Action) -> CoreResult<HiringState> {
        let mut next = self.clone();
        match action {
            Action::LoadPool(pool) => {
                next.scores = scoring::score_pool(&pool);
                next.pool = pool;
                next.prune_ledgers();
                info!(candidates = next.pool.len(), "Loaded candidate pool");
            }
            Action::UpdateFilters(update) => {
                next.filters = next.filters.merged(update);
            }
            Action::SetSort(sort) => {
                next.sort = sort;
            }
            Action::Shortlist {
                candidate_id,
                reason,
                priority,
            } => {
                next.require_member(&candidate_id)?;
                next.shortlist.insert(&candidate_id, reason, priority);
                next.actions.record(&candidate_id, ActionKind::Shortlist);
                debug!(%candidate_id, "Shortlisted candidate");
            }
            Action::Unshortlist { candidate_id } => {
                next.require_member(&candidate_id)?;
                if next.shortlist.remove(&candidate_id).is_some() {
                    next.actions
                        .record(&candidate_id, ActionKind::RemoveFromShortlist);
                    debug!(%candidate_id, "Removed candidate from shortlist");
                }
            }
            Action::Select {
                candidate_id,
                position,
                reason,
                diversity_factor,
            } => {
                next.require_member(&candidate_id)?;
                if let Err(e) =
                    next.selection
                        .insert(&candidate_id, position, reason, diversity_factor)
                {
                    warn!(%candidate_id, error = %e, "Selection refused");
                    return Err(e);
                }
                next.actions.record(&candidate_id, ActionKind::Select);
                debug!(%candidate_id, team_size = next.selection.len(), "Selected candidate");
            }
            Action::Unselect { candidate_id } => {
                next.require_member(&candidate_id)?;
                if next.selection.remove(&candidate_id).is_some() {
                    next.actions.record(&candidate_id, ActionKind::Unselect);
                    debug!(%candidate_id, "Unselected candidate");
                }
            }
            Action::ClearSelection => {
                let cleared = next.selection.clear();
                for candidate_id in &cleared {
                    next.actions.record(candidate_id, ActionKind::Unselect);
                }
                debug!(cleared = cleared.len(), "Cleared selection");
            }
        }
        next.refresh_view();
        Ok(next)
    }

    fn require_member(&self, candidate_id: &str) -> CoreResult<()> {
        if self.candidate(candidate_id).is_some() {
            Ok(())
        } else {
            Err(CoreError::NotFound(candidate_id.to_string()))
        }
    }

    fn prune_ledgers(&mut self) {
        let stale: Vec<CandidateId> = self
            .shortlist
            .entries()
            .map(|e| e.candidate_id.clone())
            .chain(self.selection.ids().cloned())
            .filter(|id| self.candidate(id).is_none())
            .collect();
        for id in stale {
            self.shortlist.remove(&id);
            self.selection.remove(&id);
        }
    }

    fn refresh_view(&mut self) {
        self.visible = filter::apply(
            &self.pool,
            &self.scores,
            &self.filters,
            &self.sort,
            &self.shortlist,
            &self.selection,
        );
        self.metrics = diversity::metrics(&self.visible);
    }

    pub fn pool(&self) -> &[Candidate] {
        &self.pool
    }

    pub fn candidate(&self, candidate_id: &str) -> Option<&Candidate> {
        self.pool.iter().find(|c| c.id == candidate_id)
    }

    pub fn scores(&self) -> &ScoreMap {
        &self.scores
    }

    /// Unknown ids have no score rather than an error.
    pub fn score(&self, candidate_id: &str) -> Option<&Score> {
        self.scores.get(candidate_id)
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortConfig {
        self.sort
    }

    pub fn shortlist(&self) -> &ShortlistLedger {
        &self.shortlist
    }

    pub fn selection(&self) -> &SelectionLedger {
        &self.selection
    }

    pub fn actions(&self) -> &ActionLog {
        &self.actions
    }

    /// The filtered, sorted list.
    pub fn visible(&self) -> &[Candidate] {
        &self.visible
    }

    /// Metrics of the visible list.
    pub fn metrics(&self) -> &DiversityMetrics {
        &self.metrics
    }

    /// Selected candidates in pool order.
    pub fn selected_candidates(&self) -> Vec<Candidate> {
        self.pool
            .iter()
            .filter(|c| self.selection.contains(&c.id))
            .cloned()
            .collect()
    }
}

//=========================================================================================
// Command API
//=========================================================================================

/// Owns the current state and replaces it whole on every successful command.
#[derive(Debug, Clone, Default)]
pub struct HiringStore {
    state: HiringState,
}

impl HiringStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HiringState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> CoreResult<&HiringState> {
        self.state = self.state.apply(action)?;
        Ok(&self.state)
    }

    pub fn load_pool(&mut self, pool: Vec<Candidate>) -> CoreResult<&HiringState> {
        self.dispatch(Action::LoadPool(pool))
    }

    pub fn set_filters(&mut self, update: FilterUpdate) -> CoreResult<&HiringState> {
        self.dispatch(Action::UpdateFilters(update))
    }

    pub fn set_sort(&mut self, sort: SortConfig) -> CoreResult<&HiringState> {
        self.dispatch(Action::SetSort(sort))
    }

    pub fn shortlist(
        &mut self,
        candidate_id: &str,
        reason: &str,
        priority: Priority,
    ) -> CoreResult<&HiringState> {
        self.dispatch(Action::Shortlist {
            candidate_id: candidate_id.to_string(),
            reason: reason.to_string(),
            priority,
        })
    }

    pub fn unshortlist(&mut self, candidate_id: &str) -> CoreResult<&HiringState> {
        self.dispatch(Action::Unshortlist {
            candidate_id: candidate_id.to_string(),
        })
    }

    pub fn select(
        &mut self,
        candidate_id: &str,
        position: &str,
        reason: &str,
        diversity_factor: Option<DiversityFactor>,
    ) -> CoreResult<&HiringState> {
        self.dispatch(Action::Select {
            candidate_id: candidate_id.to_string(),
            position: position.to_string(),
            reason: reason.to_string(),
            diversity_factor,
        })
    }

    pub fn unselect(&mut self, candidate_id: &str) -> CoreResult<&HiringState> {
        self.dispatch(Action::Unselect {
            candidate_id: candidate_id.to_string(),
        })
    }

    pub fn clear_selection(&mut self) -> CoreResult<&HiringState> {
        self.dispatch(Action::ClearSelection)
    }
}
