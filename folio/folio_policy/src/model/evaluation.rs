//! Policy decision model.
//!
//! This module defines the outcome of a policy evaluation and the record
//! kept for auditing it.

use chrono::{DateTime, Utc};
use folio_core::id::{DocumentId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::Action;

/// Why a request was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The action requires an authenticated viewer.
    Anonymous,

    /// The viewer's role lacks the privacy tier the action needs.
    InsufficientRole,

    /// The viewer is neither owner, admin nor collaborator.
    NotPermitted,

    /// The action targets a document but none was supplied.
    MissingTarget,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Anonymous => "anonymous viewer",
            Self::InsufficientRole => "insufficient role",
            Self::NotPermitted => "not permitted",
            Self::MissingTarget => "missing target document",
        })
    }
}

/// The outcome of an authorization check. A deny is data, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// The action is allowed.
    Allow,

    /// The action is denied.
    Deny(DenyReason),
}

impl Decision {
    /// Whether the action is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// The deny reason, if denied.
    pub fn reason(&self) -> Option<DenyReason> {
        match self {
            Self::Allow => None,
            Self::Deny(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Deny(reason) => write!(f, "deny ({})", reason),
        }
    }
}

/// A recorded policy evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The viewer, `None` when anonymous.
    pub viewer: Option<UserId>,

    /// The attempted action.
    pub action: Action,

    /// The targeted document, if the action has one.
    pub document: Option<DocumentId>,

    /// The outcome.
    pub decision: Decision,

    /// When the evaluation was performed.
    pub timestamp: DateTime<Utc>,
}

impl Evaluation {
    /// Create a new evaluation record stamped with the current time.
    pub fn new(
        viewer: Option<UserId>,
        action: Action,
        document: Option<DocumentId>,
        decision: Decision,
    ) -> Self {
        Self {
            viewer,
            action,
            document,
            decision,
            timestamp: Utc::now(),
        }
    }

    /// Whether the evaluated action was allowed.
    pub fn is_allowed(&self) -> bool {
        self.decision.is_allowed()
    }
}
