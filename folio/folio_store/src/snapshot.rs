//! Point-in-time views handed to the policy engine.
//!
//! A decision must never mix a document read at one moment with a grant
//! set read at another, so the store hands out owned copies taken under a
//! single lock.

use std::collections::{BTreeMap, BTreeSet};

use folio_core::{CollaboratorLookup, Document, DocumentId, UserId};

/// One document together with its collaborator set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSnapshot {
    /// The document.
    pub document: Document,

    /// Users holding a grant on it.
    pub collaborators: BTreeSet<UserId>,
}

impl CollaboratorLookup for DocumentSnapshot {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        &self.document.id == document && self.collaborators.contains(user)
    }
}

/// Every document together with every grant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    /// All documents, in no particular order.
    pub documents: Vec<Document>,

    /// Grants indexed by document.
    pub grants: BTreeMap<DocumentId, BTreeSet<UserId>>,
}

impl CollaboratorLookup for CatalogSnapshot {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        self.grants.is_collaborator(document, user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{DocumentDraft, User};

    #[test]
    fn test_document_snapshot_is_scoped_to_its_document() {
        let owner = User::new("o", "o@example.com");
        let invited = UserId::new();
        let document = Document::from_draft(owner.id, DocumentDraft::new("T", "B")).unwrap();
        let snapshot = DocumentSnapshot {
            collaborators: [invited].into_iter().collect(),
            document,
        };

        let id = snapshot.document.id;
        assert!(snapshot.is_collaborator(&id, &invited));
        assert!(!snapshot.is_collaborator(&DocumentId::new(), &invited));
        assert!(!snapshot.is_collaborator(&id, &owner.id));
    }
}
