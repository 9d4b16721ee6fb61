//! Collaborator management use cases.
//!
//! Listing, granting and revoking are all gated by the same
//! `ManageCollaborators` decision on the target document.

use folio_core::error::Result;
use folio_core::{CollaboratorGrant, DocumentId, User, UserId, Viewer};
use folio_policy::Action;
use folio_store::DocumentStore;
use tracing::info;

use crate::Runtime;

impl<S> Runtime<S>
where
    S: DocumentStore,
{
    /// The users invited to a document, ordered by name.
    pub fn collaborators(&self, viewer: Viewer<'_>, document: &DocumentId) -> Result<Vec<User>> {
        let snapshot = self.store.snapshot(document)?;
        self.authorize(
            viewer,
            Action::ManageCollaborators,
            Some(&snapshot.document),
            &snapshot,
        )?;

        let mut users = snapshot
            .collaborators
            .iter()
            .map(|id| self.store.get_user(id))
            .collect::<Result<Vec<_>>>()?;
        users.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(users)
    }

    /// Invite `user` to a document.
    ///
    /// # Errors
    ///
    /// A conflict when the grant already exists.
    pub fn add_collaborator(
        &self,
        viewer: Viewer<'_>,
        document: &DocumentId,
        user: &UserId,
    ) -> Result<CollaboratorGrant> {
        let snapshot = self.store.snapshot(document)?;
        self.authorize(
            viewer,
            Action::ManageCollaborators,
            Some(&snapshot.document),
            &snapshot,
        )?;

        let grant = self.store.add_collaborator(document, user)?;
        info!(document = %document, user = %user, "Collaborator added");
        Ok(grant)
    }

    /// Withdraw an invitation.
    ///
    /// # Errors
    ///
    /// Not found when there is no such grant.
    pub fn remove_collaborator(
        &self,
        viewer: Viewer<'_>,
        document: &DocumentId,
        user: &UserId,
    ) -> Result<()> {
        let snapshot = self.store.snapshot(document)?;
        self.authorize(
            viewer,
            Action::ManageCollaborators,
            Some(&snapshot.document),
            &snapshot,
        )?;

        self.store.remove_collaborator(document, user)?;
        info!(document = %document, user = %user, "Collaborator removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Runtime, RuntimeConfig};
    use folio_core::error::{DocumentError, Error};
    use folio_core::{DocumentDraft, Role, User, Viewer};
    use folio_store::DocumentStore;

    fn user(runtime: &Runtime, name: &str, role: Role) -> User {
        runtime
            .store()
            .insert_user(User::new(name, format!("{name}@example.com")).with_role(role))
            .unwrap()
    }

    #[test]
    fn test_owner_manages_collaborators() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let owner = user(&runtime, "owner", Role::Premium);
        let bob = user(&runtime, "bob", Role::Standard);
        let alice = user(&runtime, "alice", Role::Standard);
        let document = runtime
            .create(Viewer::User(&owner), DocumentDraft::new("T", "B").private(true))
            .unwrap();

        runtime
            .add_collaborator(Viewer::User(&owner), &document.id, &bob.id)
            .unwrap();
        runtime
            .add_collaborator(Viewer::User(&owner), &document.id, &alice.id)
            .unwrap();

        let names: Vec<_> = runtime
            .collaborators(Viewer::User(&owner), &document.id)
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);

        // Invited users can read but not manage.
        assert!(runtime.show(Viewer::User(&bob), &document.id).is_ok());
        assert!(runtime
            .collaborators(Viewer::User(&bob), &document.id)
            .unwrap_err()
            .is_denied());

        runtime
            .remove_collaborator(Viewer::User(&owner), &document.id, &bob.id)
            .unwrap();
        assert!(runtime
            .show(Viewer::User(&bob), &document.id)
            .unwrap_err()
            .is_denied());
    }

    #[test]
    fn test_duplicate_and_missing_grants() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let admin = user(&runtime, "admin", Role::Admin);
        let owner = user(&runtime, "owner", Role::Premium);
        let guest = user(&runtime, "guest", Role::Standard);
        let document = runtime
            .create(Viewer::User(&owner), DocumentDraft::new("T", "B").private(true))
            .unwrap();

        runtime
            .add_collaborator(Viewer::User(&admin), &document.id, &guest.id)
            .unwrap();
        let err = runtime
            .add_collaborator(Viewer::User(&admin), &document.id, &guest.id)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Document(DocumentError::DuplicateGrant { .. })
        ));

        runtime
            .remove_collaborator(Viewer::User(&admin), &document.id, &guest.id)
            .unwrap();
        let err = runtime
            .remove_collaborator(Viewer::User(&admin), &document.id, &guest.id)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_standard_owner_cannot_manage_collaborators() {
        let runtime = Runtime::new(RuntimeConfig::default());
        let owner = user(&runtime, "owner", Role::Standard);
        let guest = user(&runtime, "guest", Role::Standard);
        let document = runtime
            .create(Viewer::User(&owner), DocumentDraft::new("T", "B"))
            .unwrap();

        let err = runtime
            .add_collaborator(Viewer::User(&owner), &document.id, &guest.id)
            .unwrap_err();
        assert!(err.is_denied());
        assert!(runtime
            .add_collaborator(Viewer::Anonymous, &document.id, &guest.id)
            .unwrap_err()
            .is_denied());
    }
}
