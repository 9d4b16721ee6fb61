//! Collaborator membership lookup.
//!
//! The policy engine asks one question about grants: is this user invited
//! to this document? Anything that can answer it can be handed to the
//! engine, from a plain map in a test to a snapshot taken by a store.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::id::{DocumentId, UserId};

/// Answers collaborator-membership questions for the policy engine.
///
/// Implementations must be side-effect free; the engine may call
/// `is_collaborator` any number of times while deciding.
pub trait CollaboratorLookup {
    /// Whether `user` holds a grant on `document`.
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool;
}

impl<T: CollaboratorLookup + ?Sized> CollaboratorLookup for &T {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        (**self).is_collaborator(document, user)
    }
}

/// A lookup that knows of no grants at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCollaborators;

impl CollaboratorLookup for NoCollaborators {
    fn is_collaborator(&self, _document: &DocumentId, _user: &UserId) -> bool {
        false
    }
}

impl<S: std::hash::BuildHasher> CollaboratorLookup for HashMap<DocumentId, HashSet<UserId>, S> {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        self.get(document).is_some_and(|users| users.contains(user))
    }
}

impl CollaboratorLookup for BTreeMap<DocumentId, BTreeSet<UserId>> {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        self.get(document).is_some_and(|users| users.contains(user))
    }
}

impl CollaboratorLookup for HashSet<(DocumentId, UserId)> {
    fn is_collaborator(&self, document: &DocumentId, user: &UserId) -> bool {
        self.contains(&(*document, *user))
    }
}
