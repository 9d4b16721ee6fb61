//! Folio Runtime - application shell for the Folio wiki
//!
//! This crate wires the document store, the policy engine and the role
//! lifecycle hooks into the use cases a front end calls. Every use case
//! loads what it needs from one store snapshot, asks the engine, and only
//! then touches the store. Denials become [`Error::Denied`]; missing
//! records stay [`Error::Document`] / [`Error::User`] not-found errors.

pub mod collaborators;
pub mod config;
pub mod documents;
pub mod membership;

use std::sync::Arc;

use anyhow::Context;
use folio_core::error::{AccessDenied, Error, Result};
use folio_core::{CollaboratorLookup, Document, DocumentId, NoCollaborators, Viewer};
use folio_policy::{Action, Decision, PolicyAudit, PolicyEvaluator};
use folio_store::{DocumentStore, InMemoryStore};
use tracing::{debug, info};

pub use config::RuntimeConfig;
pub use membership::{MembershipOffer, PaymentSucceeded};

/// Runtime facade that provides a unified interface to the Folio wiki.
pub struct Runtime<S = InMemoryStore> {
    /// Backing store for users, documents and grants
    store: Arc<S>,

    /// Trail of policy evaluations
    audit: PolicyAudit,

    /// Loaded configuration
    config: RuntimeConfig,
}

impl Runtime<InMemoryStore> {
    /// Create a runtime over an empty in-memory store.
    pub fn new(config: RuntimeConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// Create a runtime from a configuration file, or defaults.
    pub fn from_config_path(config_path: Option<&str>) -> anyhow::Result<Self> {
        let config =
            RuntimeConfig::load(config_path).context("Failed to load runtime configuration")?;
        Ok(Self::new(config))
    }
}

impl<S> Runtime<S>
where
    S: DocumentStore,
{
    /// Create a runtime over an existing store.
    pub fn with_store(store: Arc<S>, config: RuntimeConfig) -> Self {
        info!(
            audit = config.audit.enabled,
            conceal_forbidden = config.access.conceal_forbidden,
            "Initializing Folio runtime"
        );

        Self {
            store,
            audit: PolicyAudit::new(config.audit.max_entries_per_viewer),
            config,
        }
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The evaluation trail.
    pub fn audit(&self) -> &PolicyAudit {
        &self.audit
    }

    /// The active configuration.
    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Ask whether `viewer` may perform `action`, without performing it.
    ///
    /// A deny is returned as a value. The only error is a missing target
    /// document.
    pub fn decide(
        &self,
        viewer: Viewer<'_>,
        action: Action,
        document: Option<&DocumentId>,
    ) -> Result<Decision> {
        let evaluation = match document {
            Some(id) => {
                let snapshot = self.store.snapshot(id)?;
                PolicyEvaluator::new(&snapshot).evaluate(viewer, action, Some(&snapshot.document))
            }
            None => PolicyEvaluator::new(NoCollaborators).evaluate(viewer, action, None),
        };
        let decision = evaluation.decision;

        if self.config.audit.enabled {
            self.audit.record(evaluation);
        }
        Ok(decision)
    }

    /// Evaluate `action`, record the result, and turn a deny into an error.
    fn authorize<C>(
        &self,
        viewer: Viewer<'_>,
        action: Action,
        target: Option<&Document>,
        collaborators: &C,
    ) -> Result<()>
    where
        C: CollaboratorLookup,
    {
        let evaluation = PolicyEvaluator::new(collaborators).evaluate(viewer, action, target);
        let decision = evaluation.decision;

        if self.config.audit.enabled {
            self.audit.record(evaluation);
        }

        match decision.reason() {
            None => Ok(()),
            Some(reason) => {
                debug!(viewer = %viewer, action = %action, %reason, "Request denied");
                Err(denied(viewer, action.as_str(), reason))
            }
        }
    }
}

/// Build the error reported for a denied request.
pub(crate) fn denied(viewer: Viewer<'_>, action: &str, reason: impl ToString) -> Error {
    AccessDenied {
        action: action.to_string(),
        viewer: viewer
            .id()
            .map_or_else(|| "anonymous".to_string(), |id| id.to_string()),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DocumentDraft, Role, User};
    use folio_policy::DenyReason;

    #[test]
    fn test_decide_returns_denies_as_values() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let owner = runtime
            .store()
            .insert_user(User::new("owner", "owner@example.com").with_role(Role::Premium))
            .unwrap();
        let document = runtime
            .create(Viewer::User(&owner), DocumentDraft::new("T", "B").private(true))
            .unwrap();

        let decision = runtime
            .decide(Viewer::Anonymous, Action::View, Some(&document.id))
            .unwrap();
        assert_eq!(decision, Decision::Deny(DenyReason::Anonymous));

        let decision = runtime
            .decide(Viewer::User(&owner), Action::Destroy, Some(&document.id))
            .unwrap();
        assert!(decision.is_allowed());

        let decision = runtime
            .decide(Viewer::User(&owner), Action::Edit, None)
            .unwrap();
        assert_eq!(decision, Decision::Deny(DenyReason::MissingTarget));

        assert!(runtime
            .decide(Viewer::User(&owner), Action::View, Some(&DocumentId::new()))
            .unwrap_err()
            .is_not_found());
    }
}
