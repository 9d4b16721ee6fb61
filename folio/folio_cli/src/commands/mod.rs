//! Command implementations
//!
//! Every command answers one question against a seeded [`World`] and
//! reports either a result or a rejection. Every domain error (missing
//! records, policy denials, invalid input, conflicts) is an ordinary
//! outcome and goes to stdout; fixture and output failures are errors for
//! `main` to report.

pub mod documents;
pub mod membership;

use anyhow::Result;
use folio_core::error::{DocumentError, Error, UserError};
use folio_core::{User, Viewer};
use serde::Serialize;
use serde_json::json;

use crate::fixture::World;

/// How a command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The request was answered, or the action is allowed.
    Done,

    /// The request was rejected, or the action is denied.
    Rejected,
}

/// Everything a command needs: the world, who is asking, and the output
/// format.
pub struct Session<'w> {
    pub world: &'w World,
    pub viewer: Option<User>,
    pub json: bool,
}

impl Session<'_> {
    /// The viewer as the policy engine sees it.
    pub fn viewer(&self) -> Viewer<'_> {
        Viewer::from(self.viewer.as_ref())
    }

    /// Print a serializable value as JSON, or the given text.
    pub fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            println!("{}", text());
        }
        Ok(())
    }

    /// Report a rejected request.
    pub fn reject(&self, err: Error) -> Result<Outcome> {
        let kind = rejection_kind(&err);
        let message = err.to_string();
        self.emit(&json!({ "rejected": kind, "message": message }), || {
            format!("{kind}: {message}")
        })?;
        Ok(Outcome::Rejected)
    }

    /// Report a document title that is not in the fixture.
    pub fn unknown_title(&self, title: &str) -> Result<Outcome> {
        let message = format!("Document not found: {title}");
        self.emit(&json!({ "rejected": "not found", "message": message }), || {
            format!("not found: {message}")
        })?;
        Ok(Outcome::Rejected)
    }
}

/// Short label for the kind of rejection.
fn rejection_kind(err: &Error) -> &'static str {
    match err {
        Error::Document(DocumentError::NotFound(_))
        | Error::Document(DocumentError::GrantNotFound { .. })
        | Error::User(UserError::NotFound(_)) => "not found",
        Error::Denied(_) => "denied",
        Error::Document(DocumentError::Validation(_)) => "invalid",
        Error::Document(DocumentError::DuplicateGrant { .. }) | Error::User(UserError::Conflict(_)) => {
            "conflict"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::error::{AccessDenied, ValidationError};
    use folio_core::{DocumentId, UserId};

    #[test]
    fn test_rejection_kinds() {
        let missing: Error = DocumentError::NotFound(DocumentId::new()).into();
        assert_eq!(rejection_kind(&missing), "not found");

        let denied: Error = AccessDenied {
            action: "view".to_string(),
            viewer: "anonymous".to_string(),
            reason: "anonymous viewer".to_string(),
        }
        .into();
        assert_eq!(rejection_kind(&denied), "denied");

        let invalid: Error = ValidationError::EmptyBody.into();
        assert_eq!(rejection_kind(&invalid), "invalid");

        let conflict: Error = DocumentError::DuplicateGrant {
            document: DocumentId::new(),
            user: UserId::new(),
        }
        .into();
        assert_eq!(rejection_kind(&conflict), "conflict");

        let unknown_user: Error = UserError::NotFound(UserId::new()).into();
        assert_eq!(rejection_kind(&unknown_user), "not found");
    }
}
