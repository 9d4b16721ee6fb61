//! Wiki documents, write-side inputs and collaborator grants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::id::{DocumentId, UserId};

/// Maximum title length, in characters.
pub const TITLE_MAX_LEN: usize = 150;

/// Maximum body length, in characters.
pub const BODY_MAX_LEN: usize = 500;

/// A wiki document.
///
/// `owner_id` is fixed at creation. `private` is only meaningful while
/// the owner is premium or admin; a downgrade flips it back eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier.
    pub id: DocumentId,

    /// The owning user.
    pub owner_id: UserId,

    /// Title, 1..=150 characters.
    pub title: String,

    /// Body, 1..=500 characters.
    pub body: String,

    /// Whether the document is hidden from the public index.
    #[serde(default)]
    pub private: bool,

    /// Creation time.
    pub created_at: DateTime<Utc>,

    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Build a document from a validated draft.
    pub fn from_draft(owner_id: UserId, draft: DocumentDraft) -> Result<Self, ValidationError> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: DocumentId::new(),
            owner_id,
            title: draft.title,
            body: draft.body,
            private: draft.private,
            created_at: now,
            updated_at: now,
        })
    }

    /// Whether the given user owns this document.
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Apply validated changes and bump `updated_at`.
    ///
    /// Nothing is modified when validation fails.
    pub fn apply(&mut self, changes: DocumentChanges) -> Result<(), ValidationError> {
        changes.validate()?;
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(body) = changes.body {
            self.body = body;
        }
        if let Some(private) = changes.private {
            self.private = private;
        }
        self.touch();
        Ok(())
    }

    /// Bump the modification time.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Input for creating a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Title.
    pub title: String,

    /// Body.
    pub body: String,

    /// Requested privacy, public unless stated otherwise.
    #[serde(default)]
    pub private: bool,
}

impl DocumentDraft {
    /// A public draft.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            private: false,
        }
    }

    /// Builder-style privacy override.
    pub fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Check the title and body constraints.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        validate_body(&self.body)
    }
}

/// Partial update of a document. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentChanges {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,

    /// New body.
    #[serde(default)]
    pub body: Option<String>,

    /// New privacy flag.
    #[serde(default)]
    pub private: Option<bool>,
}

impl DocumentChanges {
    /// Whether applying these changes would make the document private.
    pub fn makes_private(&self) -> bool {
        self.private == Some(true)
    }

    /// Check the constraints of every field that is present.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(body) = &self.body {
            validate_body(body)?;
        }
        Ok(())
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let len = title.chars().count();
    if len > TITLE_MAX_LEN {
        return Err(ValidationError::TitleTooLong {
            len,
            max: TITLE_MAX_LEN,
        });
    }
    Ok(())
}

fn validate_body(body: &str) -> Result<(), ValidationError> {
    if body.trim().is_empty() {
        return Err(ValidationError::EmptyBody);
    }
    let len = body.chars().count();
    if len > BODY_MAX_LEN {
        return Err(ValidationError::BodyTooLong {
            len,
            max: BODY_MAX_LEN,
        });
    }
    Ok(())
}

/// An explicit invitation of a user to a document.
///
/// Unique per (document, user); removed together with the document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CollaboratorGrant {
    /// The shared document.
    pub document_id: DocumentId,

    /// The invited user.
    pub user_id: UserId,

    /// When the grant was created.
    pub granted_at: DateTime<Utc>,
}

impl CollaboratorGrant {
    /// Create a grant stamped with the current time.
    pub fn new(document_id: DocumentId, user_id: UserId) -> Self {
        Self {
            document_id,
            user_id,
            granted_at: Utc::now(),
        }
    }
}
