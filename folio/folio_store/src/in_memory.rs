//! In-memory document store.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use folio_core::error::{DocumentError, Result, UserError, ValidationError};
use folio_core::{
    CollaboratorGrant, Document, DocumentChanges, DocumentDraft, DocumentId, Role, User, UserId,
};
use parking_lot::RwLock;
use tracing::{debug, info, warn};

use crate::hooks::{self, RoleChange};
use crate::snapshot::{CatalogSnapshot, DocumentSnapshot};
use crate::DocumentStore;

/// An in-memory document store.
///
/// All state sits behind one read-write lock, so every read sees a
/// consistent picture and every mutation is atomic. Cloning shares the
/// state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<StoreData>>,
}

#[derive(Default)]
struct StoreData {
    users: HashMap<UserId, User>,
    documents: HashMap<DocumentId, Document>,
    grants: BTreeMap<DocumentId, BTreeMap<UserId, CollaboratorGrant>>,
}

impl StoreData {
    fn document(&self, id: &DocumentId) -> Result<&Document> {
        Ok(self
            .documents
            .get(id)
            .ok_or(DocumentError::NotFound(*id))?)
    }

    fn user(&self, id: &UserId) -> Result<&User> {
        Ok(self.users.get(id).ok_or(UserError::NotFound(*id))?)
    }

    fn collaborators_of(&self, id: &DocumentId) -> BTreeSet<UserId> {
        self.grants
            .get(id)
            .map(|grants| grants.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Private documents of a standard owner are stored public.
    fn enforce_owner_tier(&self, document: &mut Document) {
        let owner_is_standard = self
            .users
            .get(&document.owner_id)
            .is_some_and(|owner| owner.role.is_standard());
        if document.private && owner_is_standard {
            warn!(
                document = %document.id,
                owner = %document.owner_id,
                "Owner is on the standard tier; storing document as public"
            );
            document.private = false;
        }
    }
}

impl InMemoryStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryStore {
    fn get(&self, id: &DocumentId) -> Result<Document> {
        Ok(self.data.read().document(id)?.clone())
    }

    fn list_all(&self) -> Result<Vec<Document>> {
        Ok(self.data.read().documents.values().cloned().collect())
    }

    fn collaborators_of(&self, id: &DocumentId) -> Result<BTreeSet<UserId>> {
        let data = self.data.read();
        data.document(id)?;
        Ok(data.collaborators_of(id))
    }

    fn grants_of(&self, id: &DocumentId) -> Result<Vec<CollaboratorGrant>> {
        let data = self.data.read();
        data.document(id)?;
        Ok(data
            .grants
            .get(id)
            .map(|grants| grants.values().cloned().collect())
            .unwrap_or_default())
    }

    fn snapshot(&self, id: &DocumentId) -> Result<DocumentSnapshot> {
        let data = self.data.read();
        Ok(DocumentSnapshot {
            document: data.document(id)?.clone(),
            collaborators: data.collaborators_of(id),
        })
    }

    fn catalog(&self) -> Result<CatalogSnapshot> {
        let data = self.data.read();
        Ok(CatalogSnapshot {
            documents: data.documents.values().cloned().collect(),
            grants: data
                .grants
                .iter()
                .map(|(document, grants)| (*document, grants.keys().copied().collect()))
                .collect(),
        })
    }

    fn get_user(&self, id: &UserId) -> Result<User> {
        Ok(self.data.read().user(id)?.clone())
    }

    fn insert_user(&self, mut user: User) -> Result<User> {
        let mut data = self.data.write();

        if data.users.contains_key(&user.id) {
            return Err(UserError::Conflict(format!("User {} already exists", user.id)).into());
        }
        if data.users.values().any(|u| u.email == user.email) {
            return Err(UserError::Conflict(format!("Email {} is already taken", user.email)).into());
        }

        // A new standard user owns nothing yet, but the hook runs on every
        // transition to standard, creation included.
        let role = user.role;
        let StoreData {
            users, documents, ..
        } = &mut *data;
        hooks::transition(&mut user, role, documents.values_mut());

        info!(user = %user.id, role = %user.role, "Registered user");
        users.insert(user.id, user.clone());
        Ok(user)
    }

    fn set_role(&self, id: &UserId, role: Role) -> Result<RoleChange> {
        let mut data = self.data.write();
        let StoreData {
            users, documents, ..
        } = &mut *data;

        let user = users.get_mut(id).ok_or(UserError::NotFound(*id))?;
        let change = hooks::transition(user, role, documents.values_mut());

        info!(
            user = %id,
            from = %change.from,
            to = %change.to,
            publicized = change.publicized.len(),
            "Changed role"
        );
        Ok(change)
    }

    fn upgrade(&self, id: &UserId) -> Result<RoleChange> {
        let mut data = self.data.write();
        let user = data.users.get_mut(id).ok_or(UserError::NotFound(*id))?;

        let from = user.role;
        if hooks::upgrade_hook(user) {
            info!(user = %id, "Upgraded user to premium");
        } else {
            debug!(user = %id, role = %from, "Upgrade skipped, user is not standard");
        }

        Ok(RoleChange {
            user_id: *id,
            from,
            to: user.role,
            publicized: Vec::new(),
        })
    }

    fn insert_document(&self, owner: &UserId, draft: DocumentDraft) -> Result<Document> {
        let mut data = self.data.write();

        if !data.users.contains_key(owner) {
            return Err(ValidationError::UnknownOwner(*owner).into());
        }

        let mut document = Document::from_draft(*owner, draft)?;
        data.enforce_owner_tier(&mut document);

        debug!(document = %document.id, owner = %owner, private = document.private, "Created document");
        data.documents.insert(document.id, document.clone());
        Ok(document)
    }

    fn update_document_checked<F>(
        &self,
        id: &DocumentId,
        changes: DocumentChanges,
        check: F,
    ) -> Result<Document>
    where
        F: FnOnce(&DocumentSnapshot) -> Result<()>,
    {
        let mut data = self.data.write();

        let snapshot = DocumentSnapshot {
            document: data.document(id)?.clone(),
            collaborators: data.collaborators_of(id),
        };
        check(&snapshot)?;

        let mut document = snapshot.document;
        document.apply(changes)?;
        data.enforce_owner_tier(&mut document);

        debug!(document = %id, private = document.private, "Updated document");
        data.documents.insert(*id, document.clone());
        Ok(document)
    }

    fn remove_document(&self, id: &DocumentId) -> Result<Document> {
        let mut data = self.data.write();

        let document = data
            .documents
            .remove(id)
            .ok_or(DocumentError::NotFound(*id))?;
        let grants = data.grants.remove(id).map_or(0, |grants| grants.len());

        debug!(document = %id, grants, "Removed document and its grants");
        Ok(document)
    }

    fn add_collaborator(&self, document: &DocumentId, user: &UserId) -> Result<CollaboratorGrant> {
        let mut data = self.data.write();
        data.document(document)?;
        data.user(user)?;

        let grants = data.grants.entry(*document).or_default();
        if grants.contains_key(user) {
            return Err(DocumentError::DuplicateGrant {
                document: *document,
                user: *user,
            }
            .into());
        }

        let grant = CollaboratorGrant::new(*document, *user);
        grants.insert(*user, grant.clone());

        debug!(document = %document, user = %user, "Granted collaborator access");
        Ok(grant)
    }

    fn remove_collaborator(&self, document: &DocumentId, user: &UserId) -> Result<()> {
        let mut data = self.data.write();
        data.document(document)?;

        let removed = data
            .grants
            .get_mut(document)
            .and_then(|grants| grants.remove(user));
        if removed.is_none() {
            return Err(DocumentError::GrantNotFound {
                document: *document,
                user: *user,
            }
            .into());
        }
        if data.grants.get(document).is_some_and(|grants| grants.is_empty()) {
            data.grants.remove(document);
        }

        debug!(document = %document, user = %user, "Revoked collaborator access");
        Ok(())
    }
}
