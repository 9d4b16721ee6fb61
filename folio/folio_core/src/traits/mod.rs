//! Interfaces the core consumes from its collaborators.
//!
//! - `CollaboratorLookup`: grant membership, injected into the policy engine

pub mod collaborators;

pub use collaborators::{CollaboratorLookup, NoCollaborators};
