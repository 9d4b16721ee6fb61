//! Actions a viewer can attempt.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An action subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a single document.
    View,

    /// Create a new document with the given privacy.
    Create {
        /// Whether the new document would be private.
        private: bool,
    },

    /// Modify an existing document.
    Edit,

    /// Delete a document.
    Destroy,

    /// List the public index.
    ListIndex,

    /// List the private index.
    ListPrivateIndex,

    /// Grant, revoke or list collaborators on a document.
    ManageCollaborators,
}

impl Action {
    /// Whether the action is about one existing document.
    pub fn targets_document(&self) -> bool {
        matches!(
            self,
            Self::View | Self::Edit | Self::Destroy | Self::ManageCollaborators
        )
    }

    /// Short verb used in logs and rejection messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create { private: false } => "create",
            Self::Create { private: true } => "create private",
            Self::Edit => "edit",
            Self::Destroy => "destroy",
            Self::ListIndex => "list index",
            Self::ListPrivateIndex => "list private index",
            Self::ManageCollaborators => "manage collaborators",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
