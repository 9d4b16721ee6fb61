//! Strongly-typed identifiers for Folio entities.
//!
//! Every persisted entity is addressed by a UUID wrapped in [`Id`], with a
//! phantom marker so that a [`UserId`] can never be passed where a
//! [`DocumentId`] is expected.
//!
//! # Examples
//!
//! ```
//! use folio_core::id::{DocumentId, UserId};
//! use std::str::FromStr;
//!
//! let user = UserId::new();
//! let document = DocumentId::new();
//! assert_ne!(user.to_string(), document.to_string());
//!
//! let raw = "550e8400-e29b-41d4-a716-446655440000";
//! let user = UserId::from_str(raw).unwrap();
//! assert_eq!(user.to_string(), raw);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;
use uuid::Uuid;

/// A type-safe identifier based on UUID.
///
/// The marker `T` only exists at the type level; two ids built from the
/// same UUID but different markers are different types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Id<T> {
    uuid: Uuid,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T> Id<T> {
    /// Create a new random identifier (UUID v4).
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Wrap a known UUID, e.g. one read back from storage.
    ///
    /// ```
    /// use folio_core::id::UserId;
    /// use uuid::Uuid;
    ///
    /// let uuid = Uuid::new_v4();
    /// assert_eq!(UserId::from_uuid(uuid).uuid(), uuid);
    /// ```
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self {
            uuid,
            _marker: PhantomData,
        }
    }

    /// The underlying UUID.
    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    /// First eight hex digits, handy in log lines.
    pub fn short(&self) -> String {
        self.uuid.simple().to_string()[..8].to_string()
    }
}

impl<T> Default for Id<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.uuid)
    }
}

impl<T> FromStr for Id<T> {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_uuid(Uuid::parse_str(s)?))
    }
}

/// Marker type for users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserMarker;
/// Identifier for a user account.
pub type UserId = Id<UserMarker>;

/// Marker type for wiki documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentMarker;
/// Identifier for a wiki document.
pub type DocumentId = Id<DocumentMarker>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_new() {
        let id1 = UserId::new();
        let id2 = UserId::new();
        assert_ne!(id1, id2, "Generated IDs should be unique");
    }

    #[test]
    fn test_id_from_str() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = DocumentId::from_str(uuid_str).unwrap();
        assert_eq!(id.to_string(), uuid_str);
        assert_eq!(id.short(), "550e8400");
    }

    #[test]
    fn test_id_from_str_rejects_garbage() {
        assert!(UserId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_same_uuid_different_kinds() {
        let same_uuid = Uuid::new_v4();
        let user_id = UserId::from_uuid(same_uuid);
        let document_id = DocumentId::from_uuid(same_uuid);

        // Comparable only through the raw UUID; `user_id == document_id`
        // does not type-check.
        assert_eq!(user_id.uuid(), document_id.uuid());
    }

    #[test]
    fn test_id_serde() {
        let id = DocumentId::new();
        let serialized = serde_json::to_string(&id).unwrap();
        assert_eq!(serialized, format!("\"{}\"", id));
        let deserialized: DocumentId = serde_json::from_str(&serialized).unwrap();
        assert_eq!(id, deserialized);
    }
}
