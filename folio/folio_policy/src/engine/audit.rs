//! Policy auditing.
//!
//! Keeps a bounded trail of evaluations per viewer. Anonymous evaluations
//! share one trail.

use dashmap::DashMap;
use folio_core::id::{DocumentId, UserId};
use std::sync::Arc;

use crate::model::{Decision, Evaluation};

/// A policy audit.
///
/// Cloning shares the underlying trail.
#[derive(Clone)]
pub struct PolicyAudit {
    /// The audit entries, keyed by viewer (`None` = anonymous).
    entries: Arc<DashMap<Option<UserId>, Vec<Evaluation>>>,

    /// The maximum number of entries to keep per viewer.
    max_entries_per_viewer: usize,
}

impl PolicyAudit {
    /// Create a new policy audit keeping at most `max_entries_per_viewer`
    /// evaluations per viewer; the oldest are dropped first.
    pub fn new(max_entries_per_viewer: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            max_entries_per_viewer,
        }
    }

    /// Record an evaluation.
    pub fn record(&self, evaluation: Evaluation) {
        let mut viewer_entries = self.entries.entry(evaluation.viewer).or_default();
        viewer_entries.push(evaluation);

        if viewer_entries.len() > self.max_entries_per_viewer {
            let to_remove = viewer_entries.len() - self.max_entries_per_viewer;
            viewer_entries.drain(0..to_remove);
        }
    }

    /// Get evaluations for a viewer, oldest first.
    pub fn get_evaluations(&self, viewer: Option<UserId>) -> Vec<Evaluation> {
        self.entries
            .get(&viewer)
            .map(|entries| entries.value().clone())
            .unwrap_or_default()
    }

    /// Clear evaluations for a viewer.
    pub fn clear_evaluations(&self, viewer: Option<UserId>) {
        self.entries.remove(&viewer);
    }

    /// Get all evaluations.
    pub fn get_all_evaluations(&self) -> Vec<Evaluation> {
        self.entries
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }

    /// Get evaluations whose outcome was allow (`true`) or deny (`false`).
    pub fn get_evaluations_by_outcome(&self, allowed: bool) -> Vec<Evaluation> {
        self.filtered(|evaluation| evaluation.decision.is_allowed() == allowed)
    }

    /// Get evaluations with exactly this decision.
    pub fn get_evaluations_by_decision(&self, decision: &Decision) -> Vec<Evaluation> {
        self.filtered(|evaluation| &evaluation.decision == decision)
    }

    /// Get evaluations that targeted a document.
    pub fn get_evaluations_by_document(&self, document: &DocumentId) -> Vec<Evaluation> {
        self.filtered(|evaluation| evaluation.document.as_ref() == Some(document))
    }

    fn filtered<F>(&self, predicate: F) -> Vec<Evaluation>
    where
        F: Fn(&Evaluation) -> bool,
    {
        let mut evaluations = Vec::new();

        for entry in self.entries.iter() {
            for evaluation in entry.value() {
                if predicate(evaluation) {
                    evaluations.push(evaluation.clone());
                }
            }
        }

        evaluations
    }
}

impl Default for PolicyAudit {
    fn default() -> Self {
        Self::new(1000)
    }
}
