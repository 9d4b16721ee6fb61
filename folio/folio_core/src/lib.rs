//! # Folio Core
//!
//! `folio_core` provides the building blocks shared by every Folio crate:
//! error types, identifiers, the role model, users, documents and
//! collaborator grants, plus the lookup trait the policy engine consumes.
//!
//! ## Visibility model
//!
//! 1. **Roles**: every user is `standard`, `premium` or `admin`. Premium
//!    and admin together form the tier allowed to keep documents private.
//!
//! 2. **Documents**: owned by exactly one user, public by default. A
//!    private document stays private only while its owner holds the
//!    privacy tier.
//!
//! 3. **Collaborator grants**: an explicit (document, user) invitation
//!    that opens a private document to that user.
//!
//! 4. **Viewers**: a decision is always made for a [`Viewer`], which is
//!    either an authenticated user or anonymous.
//!
//! ## Crate Structure
//!
//! - **error**: Error taxonomy (not found, denied, validation)
//! - **id**: Strongly-typed identifiers
//! - **traits**: Interfaces injected into the policy engine
//! - **types**: Data structures
//! - **utils**: Logging helpers

pub mod error;
pub mod id;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use id::{DocumentId, UserId};
pub use traits::{CollaboratorLookup, NoCollaborators};
pub use types::{
    CollaboratorGrant, Document, DocumentChanges, DocumentDraft, Role, User, Viewer,
};
pub use utils::LogLevel;
