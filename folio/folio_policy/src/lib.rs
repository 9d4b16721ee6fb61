//! # Folio Policy
//!
//! `folio_policy` is the authorization decision engine for Folio. Given a
//! viewer (possibly anonymous), a document and a way to look up
//! collaborator grants, it decides whether an action is permitted and
//! which documents a viewer may list.
//!
//! Key concepts:
//!
//! 1. **Predicates**: one pure function per action (`can_view`,
//!    `can_edit`, ...). They never fail; a deny is `false`.
//!
//! 2. **Evaluation**: [`PolicyEvaluator`] maps an [`Action`] to its
//!    predicate and explains a deny with a [`DenyReason`].
//!
//! 3. **Scope resolution**: [`visible_public_scope`] and
//!    [`visible_private_scope`] filter and order a document collection.
//!
//! 4. **Audit**: [`PolicyAudit`] keeps a bounded trail of evaluations for
//!    the application shell.

pub mod engine;
pub mod model;
pub mod scope;

// Re-export key types and functions for convenience
pub use engine::{
    can_create, can_destroy, can_edit, can_list_index, can_list_private_index,
    can_manage_collaborators, can_view, PolicyAudit, PolicyEvaluator,
};
pub use model::{Action, Decision, DenyReason, Evaluation};
pub use scope::{visible_private_scope, visible_public_scope};
