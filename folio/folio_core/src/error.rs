//! Error types for the Folio wiki.
//!
//! The root [`Error`] wraps one enum per concern so callers can match on
//! the broad category first. Three categories matter to front ends and
//! must never be conflated:
//!
//! - a missing document or user ([`DocumentError::NotFound`], [`UserError::NotFound`]),
//! - a policy denial ([`AccessDenied`]),
//! - a write rejected by attribute validation ([`ValidationError`]).
//!
//! The policy engine itself never produces any of these; a deny is a value
//! there, and only the application shell lifts it into [`Error::Denied`].

use crate::id::{DocumentId, UserId};
use thiserror::Error;

/// Root error type for Folio.
#[derive(Debug, Error)]
pub enum Error {
    /// Document-related errors
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// User-related errors
    #[error("User error: {0}")]
    User(#[from] UserError),

    /// The policy engine denied the request
    #[error("{0}")]
    Denied(#[from] AccessDenied),
}

impl Error {
    /// Whether the target document or user does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Document(DocumentError::NotFound(_))
                | Self::Document(DocumentError::GrantNotFound { .. })
                | Self::User(UserError::NotFound(_))
        )
    }

    /// Whether the request was rejected by policy.
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied(_))
    }

    /// Whether the request carried invalid document attributes.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Document(DocumentError::Validation(_)))
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::Document(DocumentError::Validation(err))
    }
}

/// Errors related to documents and their collaborator grants.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Document with the given ID was not found
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    /// Document attributes failed validation
    #[error("Invalid document: {0}")]
    Validation(#[from] ValidationError),

    /// The user already collaborates on the document
    #[error("User {user} already collaborates on document {document}")]
    DuplicateGrant {
        /// Document the grant refers to
        document: DocumentId,

        /// User named in the grant
        user: UserId,
    },

    /// No grant exists for the (document, user) pair
    #[error("User {user} is not a collaborator on document {document}")]
    GrantNotFound {
        /// Document the grant refers to
        document: DocumentId,

        /// User named in the grant
        user: UserId,
    },
}

/// Errors related to user accounts.
#[derive(Debug, Error)]
pub enum UserError {
    /// User with the given ID was not found
    #[error("User not found: {0}")]
    NotFound(UserId),

    /// A user with the same identity already exists
    #[error("User conflict: {0}")]
    Conflict(String),
}

/// Attribute constraints violated on a document write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Title is empty or whitespace
    #[error("title can't be blank")]
    EmptyTitle,

    /// Title exceeds the maximum length
    #[error("title is too long ({len} characters, maximum is {max})")]
    TitleTooLong {
        /// Actual length in characters
        len: usize,

        /// Allowed maximum
        max: usize,
    },

    /// Body is empty or whitespace
    #[error("body can't be blank")]
    EmptyBody,

    /// Body exceeds the maximum length
    #[error("body is too long ({len} characters, maximum is {max})")]
    BodyTooLong {
        /// Actual length in characters
        len: usize,

        /// Allowed maximum
        max: usize,
    },

    /// The owner does not reference an existing user
    #[error("owner {0} does not exist")]
    UnknownOwner(UserId),
}

/// A policy denial lifted into an error by the application shell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Access denied: {viewer} may not {action}")]
pub struct AccessDenied {
    /// Human-readable action name, e.g. `edit`
    pub action: String,

    /// `anonymous` or the viewer's user id
    pub viewer: String,

    /// Why the engine denied the request
    pub reason: String,
}

/// Result type used throughout Folio.
pub type Result<T> = std::result::Result<T, Error>;
