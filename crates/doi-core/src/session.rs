//! A working set of declaration acts with persistence verbs: snapshot to
//! an object store, restore from one, and file-based export/import of the
//! wire document.

use crate::{
    entity::Ato,
    flatten::{WireDocument, flatten},
    load::{LoadError, load},
    store::{ObjectStore, StoreError, download, read_json},
};
use std::path::Path;
use thiserror::Error as ThisError;

/// Object-store key session snapshots live under.
pub const SESSION_KEY: &str = "doi.session";

///
/// SessionError
///

#[derive(Debug, ThisError)]
pub enum SessionError {
    #[error("act rejected by session: entity is not valid")]
    InvalidAct,

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

///
/// Session
///

#[derive(Debug, Default)]
pub struct Session {
    acts: Vec<Ato>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a finished act. Drafts are refused; keep editing them outside
    /// the session until they validate.
    pub fn add_act(&mut self, ato: Ato) -> Result<(), SessionError> {
        if !ato.is_valid() {
            return Err(SessionError::InvalidAct);
        }

        self.acts.push(ato);
        Ok(())
    }

    /// Admit an act without the validity gate. Import path only.
    pub fn push_act(&mut self, ato: Ato) {
        self.acts.push(ato);
    }

    pub fn remove_act(&mut self, index: usize) -> Option<Ato> {
        (index < self.acts.len()).then(|| self.acts.remove(index))
    }

    #[must_use]
    pub fn acts(&self) -> &[Ato] {
        &self.acts
    }

    pub fn acts_mut(&mut self) -> &mut [Ato] {
        &mut self.acts
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.acts.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    pub fn clear(&mut self) {
        self.acts.clear();
    }

    /// The full wire document: every act flattened, in session order.
    #[must_use]
    pub fn document(&self) -> WireDocument {
        WireDocument {
            declaracoes: self.acts.iter().flat_map(flatten).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.document())?)
    }

    /// Snapshot the session under [`SESSION_KEY`].
    pub fn save(&self, store: &mut impl ObjectStore) -> Result<(), StoreError> {
        store.save_object(SESSION_KEY, &self.document())
    }

    /// Replace the working set with the snapshot under [`SESSION_KEY`].
    ///
    /// All-or-nothing: on any error the current acts are left untouched.
    pub fn resume(&mut self, store: &impl ObjectStore) -> Result<(), SessionError> {
        let document: WireDocument = store.load_object(SESSION_KEY)?;
        self.acts = load(&document.declaracoes)?;

        Ok(())
    }

    /// Export the wire document to a JSON file.
    pub fn download(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        download(path, &self.document())
    }

    /// Replace the working set with a previously downloaded document.
    ///
    /// All-or-nothing, like [`resume`](Self::resume).
    pub fn upload(&mut self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        let document: WireDocument = read_json(path)?;
        self.acts = load(&document.declaracoes)?;

        Ok(())
    }
}

///
/// TESTS
///
