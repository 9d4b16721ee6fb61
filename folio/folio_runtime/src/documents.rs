//! Document use cases: show, list, create, update, destroy.

use folio_core::error::{DocumentError, Result};
use folio_core::{Document, DocumentChanges, DocumentDraft, DocumentId, NoCollaborators, Viewer};
use folio_policy::{visible_private_scope, visible_public_scope, Action, DenyReason};
use folio_store::DocumentStore;
use tracing::{debug, info};

use crate::{denied, Runtime};

impl<S> Runtime<S>
where
    S: DocumentStore,
{
    /// Fetch a document the viewer may read.
    ///
    /// # Errors
    ///
    /// Not found when the document does not exist. Denied when it exists
    /// but the viewer may not read it, unless `access.conceal_forbidden`
    /// is set and the document is private, in which case the denial is
    /// reported as not found too.
    pub fn show(&self, viewer: Viewer<'_>, id: &DocumentId) -> Result<Document> {
        let snapshot = self.store.snapshot(id)?;

        match self.authorize(viewer, Action::View, Some(&snapshot.document), &snapshot) {
            Ok(()) => Ok(snapshot.document),
            Err(err) if self.config.access.conceal_forbidden && snapshot.document.private => {
                debug!(document = %id, "Concealing forbidden document: {}", err);
                Err(DocumentError::NotFound(*id).into())
            }
            Err(err) => Err(err),
        }
    }

    /// The public index, ordered by title.
    pub fn index(&self, viewer: Viewer<'_>) -> Result<Vec<Document>> {
        self.authorize(viewer, Action::ListIndex, None, &NoCollaborators)?;

        let catalog = self.store.catalog()?;
        Ok(visible_public_scope(viewer, &catalog.documents)
            .into_iter()
            .cloned()
            .collect())
    }

    /// The private documents the viewer may list, ordered by title.
    pub fn private_index(&self, viewer: Viewer<'_>) -> Result<Vec<Document>> {
        self.authorize(viewer, Action::ListPrivateIndex, None, &NoCollaborators)?;

        let catalog = self.store.catalog()?;
        Ok(visible_private_scope(viewer, &catalog.documents, &catalog)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Create a document owned by the viewer.
    pub fn create(&self, viewer: Viewer<'_>, draft: DocumentDraft) -> Result<Document> {
        let action = Action::Create {
            private: draft.private,
        };
        self.authorize(viewer, action, None, &NoCollaborators)?;
        let Some(owner) = viewer.user() else {
            return Err(denied(viewer, action.as_str(), DenyReason::Anonymous));
        };

        let document = self.store.insert_document(&owner.id, draft)?;
        info!(document = %document.id, owner = %owner.id, private = document.private, "Document created");
        Ok(document)
    }

    /// Apply changes to a document the viewer may edit.
    ///
    /// Making a public document private additionally requires the right to
    /// create private documents. The checks run against the document as
    /// the store is about to write it.
    pub fn update(
        &self,
        viewer: Viewer<'_>,
        id: &DocumentId,
        changes: DocumentChanges,
    ) -> Result<Document> {
        let makes_private = changes.makes_private();
        let document = self.store.update_document_checked(id, changes, |snapshot| {
            self.authorize(viewer, Action::Edit, Some(&snapshot.document), snapshot)?;
            if makes_private && !snapshot.document.private {
                self.authorize(viewer, Action::Create { private: true }, None, &NoCollaborators)?;
            }
            Ok(())
        })?;
        info!(document = %id, private = document.private, "Document updated");
        Ok(document)
    }

    /// Delete a document the viewer may destroy, with all its grants.
    pub fn destroy(&self, viewer: Viewer<'_>, id: &DocumentId) -> Result<Document> {
        let snapshot = self.store.snapshot(id)?;
        self.authorize(viewer, Action::Destroy, Some(&snapshot.document), &snapshot)?;

        let document = self.store.remove_document(id)?;
        info!(document = %id, "Document destroyed");
        Ok(document)
    }
}
