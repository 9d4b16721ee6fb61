//! Core data types for Folio.
//!
//! Roles, users (and the viewer a decision is made for), documents with
//! their write-side inputs, and collaborator grants.

pub mod document;
pub mod role;
pub mod user;

pub use document::{
    CollaboratorGrant, Document, DocumentChanges, DocumentDraft, BODY_MAX_LEN, TITLE_MAX_LEN,
};
pub use role::{ParseRoleError, Role};
pub use user::{User, Viewer};
