//! Collection-level scope resolution.
//!
//! Decides which documents a viewer sees in the public and private
//! indexes. Results are ordered by title (byte-wise, so case-sensitive),
//! with creation time and then id breaking ties so the order never depends
//! on how the store happened to enumerate its documents.

use std::cmp::Ordering;

use folio_core::{CollaboratorLookup, Document, Viewer};

use crate::engine::rules;

/// Every public document, ordered by title.
///
/// The viewer is accepted for symmetry with [`visible_private_scope`] but
/// never consulted: the public index is the same for everyone.
pub fn visible_public_scope<'d, I>(_viewer: Viewer<'_>, documents: I) -> Vec<&'d Document>
where
    I: IntoIterator<Item = &'d Document>,
{
    let mut scope: Vec<&Document> = documents.into_iter().filter(|d| !d.private).collect();
    scope.sort_by(|a, b| index_order(a, b));
    scope
}

/// The private documents `viewer` may list, ordered by title.
///
/// Admins see every private document. Premium viewers see the private
/// documents they own or collaborate on. Anyone failing
/// [`can_list_private_index`](rules::can_list_private_index) gets an
/// empty list; callers are expected to check that first.
pub fn visible_private_scope<'d, I, C>(
    viewer: Viewer<'_>,
    documents: I,
    collaborators: &C,
) -> Vec<&'d Document>
where
    I: IntoIterator<Item = &'d Document>,
    C: CollaboratorLookup + ?Sized,
{
    let Some(user) = viewer.user() else {
        return Vec::new();
    };
    if !rules::can_list_private_index(viewer) {
        return Vec::new();
    }

    let mut scope: Vec<&Document> = documents
        .into_iter()
        .filter(|d| d.private)
        .filter(|d| {
            user.role.is_admin()
                || d.is_owned_by(&user.id)
                || collaborators.is_collaborator(&d.id, &user.id)
        })
        .collect();
    scope.sort_by(|a, b| index_order(a, b));
    scope
}

fn index_order(a: &Document, b: &Document) -> Ordering {
    a.title
        .cmp(&b.title)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}
