//! User accounts and the viewer abstraction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::id::UserId;
use crate::types::Role;

/// A registered user.
///
/// Credentials and confirmation state live with the identity provider;
/// Folio only needs the identity and the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Contact address.
    pub email: String,

    /// Account tier.
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Create a new standard user with a fresh id.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            role: Role::default(),
        }
    }

    /// Builder-style role override.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// The party a decision is made for.
///
/// Anonymous is a state of its own rather than "a user with no role":
/// every predicate checks presence before looking at the role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer<'a> {
    /// No authenticated identity.
    Anonymous,

    /// An authenticated user.
    User(&'a User),
}

impl<'a> Viewer<'a> {
    /// The authenticated user, if any.
    pub fn user(&self) -> Option<&'a User> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// The authenticated user's id, if any.
    pub fn id(&self) -> Option<UserId> {
        self.user().map(|user| user.id)
    }

    /// Whether no identity was supplied.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Self::Anonymous)
    }

    /// Whether the viewer is exactly the given user (identity, not role).
    pub fn is(&self, user_id: &UserId) -> bool {
        self.id().as_ref() == Some(user_id)
    }

    /// Whether the viewer is an authenticated admin.
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(|user| user.role.is_admin())
    }

    /// Whether the viewer is an authenticated premium or admin user.
    pub fn is_admin_or_premium(&self) -> bool {
        self.user().is_some_and(|user| user.role.is_admin_or_premium())
    }
}

impl<'a> From<&'a User> for Viewer<'a> {
    fn from(user: &'a User) -> Self {
        Self::User(user)
    }
}

impl<'a> From<Option<&'a User>> for Viewer<'a> {
    fn from(user: Option<&'a User>) -> Self {
        user.map_or(Self::Anonymous, Self::User)
    }
}

impl fmt::Display for Viewer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anonymous => f.write_str("anonymous"),
            Self::User(user) => write!(f, "{} ({})", user.id, user.role),
        }
    }
}
