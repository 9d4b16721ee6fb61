//! Per-action authorization predicates.
//!
//! Every function here is total and pure: it reads its arguments and
//! returns a boolean. Presence of the viewer is always checked before the
//! role, and ownership is always decided by identity.

use folio_core::{CollaboratorLookup, Document, User, Viewer};

/// Whether `viewer` may read `document`.
///
/// Public documents are readable by anyone, including anonymous viewers.
/// A private document is readable by an admin, by its owner while the
/// owner holds the privacy tier, and by its collaborators.
pub fn can_view<C>(viewer: Viewer<'_>, document: &Document, collaborators: &C) -> bool
where
    C: CollaboratorLookup + ?Sized,
{
    if !document.private {
        return true;
    }
    match viewer.user() {
        None => false,
        Some(user) => has_private_access(user, document, collaborators),
    }
}

/// Whether `viewer` may create a document with the given privacy.
pub fn can_create(viewer: Viewer<'_>, intended_private: bool) -> bool {
    match viewer.user() {
        None => false,
        Some(user) => !intended_private || user.role.is_admin_or_premium(),
    }
}

/// Whether `viewer` may modify `document`.
///
/// Any authenticated viewer may edit a public document. Private documents
/// follow the same rule as [`can_view`].
pub fn can_edit<C>(viewer: Viewer<'_>, document: &Document, collaborators: &C) -> bool
where
    C: CollaboratorLookup + ?Sized,
{
    match viewer.user() {
        None => false,
        Some(_) if !document.private => true,
        Some(user) => has_private_access(user, document, collaborators),
    }
}

/// Whether `viewer` may delete `document`: its owner or an admin.
pub fn can_destroy(viewer: Viewer<'_>, document: &Document) -> bool {
    match viewer.user() {
        None => false,
        Some(user) => user.role.is_admin() || document.is_owned_by(&user.id),
    }
}

/// Whether `viewer` may open the private index.
pub fn can_list_private_index(viewer: Viewer<'_>) -> bool {
    viewer.is_admin_or_premium()
}

/// Whether `viewer` may open the public index. Always true; what the
/// index contains is decided by scope resolution.
pub fn can_list_index(_viewer: Viewer<'_>) -> bool {
    true
}

/// Whether `viewer` may grant, revoke or list collaborators on `document`.
///
/// Admins always may; otherwise only the owner, and only while the owner
/// holds the privacy tier.
pub fn can_manage_collaborators(viewer: Viewer<'_>, document: &Document) -> bool {
    match viewer.user() {
        None => false,
        Some(user) => {
            user.role.is_admin()
                || (document.is_owned_by(&user.id) && user.role.is_admin_or_premium())
        }
    }
}

fn has_private_access<C>(user: &User, document: &Document, collaborators: &C) -> bool
where
    C: CollaboratorLookup + ?Sized,
{
    user.role.is_admin()
        || (document.is_owned_by(&user.id) && user.role.is_admin_or_premium())
        || collaborators.is_collaborator(&document.id, &user.id)
}
