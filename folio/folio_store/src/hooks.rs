//! Role lifecycle hooks.
//!
//! Both hooks are plain functions over the records they touch. The store
//! runs them inside the same write critical section as the role update,
//! so no reader can observe a standard owner with a private document.

use folio_core::{Document, DocumentId, Role, User, UserId};

/// The observable effect of a role transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleChange {
    /// The affected user.
    pub user_id: UserId,

    /// Role before the transition.
    pub from: Role,

    /// Role after the transition.
    pub to: Role,

    /// Documents the downgrade hook made public.
    pub publicized: Vec<DocumentId>,
}

impl RoleChange {
    /// Whether the role actually changed.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Make every private document owned by `owner` public.
///
/// Returns the ids it flipped, in iteration order. Running it again on the
/// same documents flips nothing.
pub fn downgrade_hook<'d, I>(owner: &UserId, documents: I) -> Vec<DocumentId>
where
    I: IntoIterator<Item = &'d mut Document>,
{
    let mut publicized = Vec::new();
    for document in documents {
        if document.is_owned_by(owner) && document.private {
            document.private = false;
            document.touch();
            publicized.push(document.id);
        }
    }
    publicized
}

/// Promote a standard user to premium after a confirmed payment.
///
/// Returns `false` and leaves the user untouched when the user is not on
/// the standard tier. Documents are never modified.
pub fn upgrade_hook(user: &mut User) -> bool {
    if !user.role.is_standard() {
        return false;
    }
    user.role = Role::Premium;
    true
}

/// Set a role and, when the result is standard, run the downgrade hook.
///
/// The caller must hold whatever lock guards both `user` and `documents`.
pub fn transition<'d, I>(user: &mut User, role: Role, documents: I) -> RoleChange
where
    I: IntoIterator<Item = &'d mut Document>,
{
    let from = user.role;
    user.role = role;
    let publicized = if role.is_standard() {
        downgrade_hook(&user.id, documents)
    } else {
        Vec::new()
    };

    RoleChange {
        user_id: user.id,
        from,
        to: role,
        publicized,
    }
}
