//! # Folio Store
//!
//! `folio_store` holds the data the policy engine reasons over: users,
//! documents and collaborator grants. It also owns the role lifecycle
//! hooks, because they must run atomically with the role update that
//! triggers them.
//!
//! Reads used for authorization go through snapshots
//! ([`DocumentSnapshot`], [`CatalogSnapshot`]) taken at a single point in
//! time. Ordering of listings is not the store's concern; scope resolution
//! in `folio_policy` orders what it returns.

pub mod hooks;
mod in_memory;
pub mod snapshot;

pub use hooks::RoleChange;
pub use in_memory::InMemoryStore;
pub use snapshot::{CatalogSnapshot, DocumentSnapshot};

use std::collections::BTreeSet;

use folio_core::error::Result;
use folio_core::{
    CollaboratorGrant, Document, DocumentChanges, DocumentDraft, DocumentId, Role, User, UserId,
};

/// Trait for document visibility storage.
///
/// Every mutation is a single transaction. Role updates run the lifecycle
/// hooks before the transaction ends.
pub trait DocumentStore: Send + Sync {
    /// Get a document by id.
    ///
    /// # Errors
    ///
    /// `DocumentError::NotFound` if there is no such document.
    fn get(&self, id: &DocumentId) -> Result<Document>;

    /// All documents, in no particular order.
    fn list_all(&self) -> Result<Vec<Document>>;

    /// The users holding a grant on a document.
    fn collaborators_of(&self, id: &DocumentId) -> Result<BTreeSet<UserId>>;

    /// The grants on a document, with their creation times.
    fn grants_of(&self, id: &DocumentId) -> Result<Vec<CollaboratorGrant>>;

    /// A document and its collaborator set, read together.
    fn snapshot(&self, id: &DocumentId) -> Result<DocumentSnapshot>;

    /// Every document and every grant, read together.
    fn catalog(&self) -> Result<CatalogSnapshot>;

    /// Get a user by id.
    fn get_user(&self, id: &UserId) -> Result<User>;

    /// Register a user. Ids and email addresses are unique.
    fn insert_user(&self, user: User) -> Result<User>;

    /// Change a user's role, running the downgrade hook when the new
    /// role is standard.
    fn set_role(&self, id: &UserId, role: Role) -> Result<RoleChange>;

    /// Run the upgrade hook for a confirmed payment.
    fn upgrade(&self, id: &UserId) -> Result<RoleChange>;

    /// Create a document owned by `owner`.
    ///
    /// # Errors
    ///
    /// `ValidationError` for bad attributes or an unknown owner.
    fn insert_document(&self, owner: &UserId, draft: DocumentDraft) -> Result<Document>;

    /// Apply changes to a document.
    fn update_document(&self, id: &DocumentId, changes: DocumentChanges) -> Result<Document> {
        self.update_document_checked(id, changes, |_| Ok(()))
    }

    /// Apply changes to a document once `check` accepts its current state.
    ///
    /// `check` sees the document and its collaborators as they are when
    /// the write happens; nothing can change between the check and the
    /// write. An error from `check` leaves the document untouched.
    fn update_document_checked<F>(
        &self,
        id: &DocumentId,
        changes: DocumentChanges,
        check: F,
    ) -> Result<Document>
    where
        F: FnOnce(&DocumentSnapshot) -> Result<()>;

    /// Delete a document and every grant on it.
    fn remove_document(&self, id: &DocumentId) -> Result<Document>;

    /// Invite a user to a document.
    fn add_collaborator(&self, document: &DocumentId, user: &UserId) -> Result<CollaboratorGrant>;

    /// Withdraw an invitation.
    fn remove_collaborator(&self, document: &DocumentId, user: &UserId) -> Result<()>;
}
