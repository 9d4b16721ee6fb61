//! TOML fixtures describing users, documents and grants
//!
//! A fixture seeds an in-memory store so a single command can be answered
//! against it. Users are referred to by name and documents by title, both
//! of which must be unique within a fixture.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use folio_core::{DocumentDraft, DocumentId, Role, User, UserId};
use folio_runtime::Runtime;
use folio_store::DocumentStore;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur while loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse fixture: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown user: {0}")]
    UnknownUser(String),

    #[error("Duplicate user name: {0}")]
    DuplicateUser(String),

    #[error("Duplicate document title: {0}")]
    DuplicateTitle(String),

    #[error("Invalid fixture entry: {0}")]
    Invalid(#[from] folio_core::Error),
}

/// A user entry
#[derive(Debug, Clone, Deserialize)]
pub struct UserEntry {
    pub name: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub role: Role,
}

/// A document entry, owner and collaborators by user name
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentEntry {
    pub title: String,
    pub body: String,
    pub owner: String,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub collaborators: Vec<String>,
}

/// The fixture file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub users: Vec<UserEntry>,

    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
}

impl Fixture {
    /// Read and parse a fixture file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let content = fs::read_to_string(path).map_err(|source| FixtureError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse fixture text.
    pub fn parse(content: &str) -> Result<Self, FixtureError> {
        Ok(toml::from_str(content)?)
    }

    /// Seed `runtime`'s store, returning the name and title indexes.
    ///
    /// Entries bypass the policy engine, but not the store: documents are
    /// validated, and a private document of a standard owner is stored
    /// public.
    pub fn seed(self, runtime: Runtime) -> Result<World, FixtureError> {
        let store = runtime.store();
        let mut users = BTreeMap::new();
        let mut documents = BTreeMap::new();

        for entry in self.users {
            if users.contains_key(&entry.name) {
                return Err(FixtureError::DuplicateUser(entry.name));
            }
            let email = entry
                .email
                .unwrap_or_else(|| format!("{}@folio.local", entry.name));
            let user = store.insert_user(User::new(entry.name.clone(), email).with_role(entry.role))?;
            users.insert(entry.name, user.id);
        }

        let lookup = |name: &str| -> Result<UserId, FixtureError> {
            users
                .get(name)
                .copied()
                .ok_or_else(|| FixtureError::UnknownUser(name.to_string()))
        };

        for entry in self.documents {
            if documents.contains_key(&entry.title) {
                return Err(FixtureError::DuplicateTitle(entry.title));
            }
            let owner = lookup(&entry.owner)?;
            let draft = DocumentDraft::new(entry.title.clone(), entry.body).private(entry.private);
            let document = store.insert_document(&owner, draft)?;

            for name in &entry.collaborators {
                store.add_collaborator(&document.id, &lookup(name)?)?;
            }
            documents.insert(entry.title, document.id);
        }

        debug!(
            users = users.len(),
            documents = documents.len(),
            "Seeded store from fixture"
        );

        Ok(World {
            runtime,
            users,
            documents,
        })
    }
}

/// A seeded runtime plus the fixture's naming.
pub struct World {
    pub runtime: Runtime,
    users: BTreeMap<String, UserId>,
    documents: BTreeMap<String, DocumentId>,
}

impl World {
    /// The current record of a user, by name.
    pub fn user(&self, name: &str) -> Result<User, FixtureError> {
        let id = self
            .users
            .get(name)
            .ok_or_else(|| FixtureError::UnknownUser(name.to_string()))?;
        Ok(self.runtime.store().get_user(id)?)
    }

    /// A document id by title.
    pub fn document_id(&self, title: &str) -> Option<DocumentId> {
        self.documents.get(title).copied()
    }

    /// A user name by id, falling back to the short id.
    pub fn user_name(&self, id: &UserId) -> String {
        self.users
            .iter()
            .find(|(_, candidate)| *candidate == id)
            .map_or_else(|| id.short(), |(name, _)| name.clone())
    }
}
