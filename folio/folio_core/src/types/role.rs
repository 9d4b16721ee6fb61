//! Account roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The tier of a user account.
///
/// Ordered by privilege, so `Role::Standard < Role::Premium < Role::Admin`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Free tier. May only own public documents.
    #[default]
    Standard,

    /// Paid tier. May own private documents and invite collaborators.
    Premium,

    /// Operator. Bypasses ownership and privacy checks.
    Admin,
}

impl Role {
    /// Get the lowercase name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Premium => "premium",
            Self::Admin => "admin",
        }
    }

    /// Whether this is the free tier.
    pub fn is_standard(&self) -> bool {
        matches!(self, Self::Standard)
    }

    /// Whether this is the paid tier.
    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Premium)
    }

    /// Whether this is the operator role.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether the role carries the privacy capability.
    pub fn is_admin_or_premium(&self) -> bool {
        matches!(self, Self::Premium | Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" => Ok(Self::Standard),
            "premium" => Ok(Self::Premium),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
