//! # JSON file store
//!
//! Keeps the whole blog database in one JSON file. Not safe for concurrent
//! writers: there is no lock, and the file is overwritten in place.

use std::fs;
use std::path::{Path, PathBuf};

use domains::{Document, DocumentStore, DomainError, Result};
use tracing::{debug, info};

use crate::format::to_canonical_vec;

pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn unreadable(&self, reason: impl ToString) -> DomainError {
        DomainError::DatabaseUnreadable {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }

    fn persist_failed(&self, source: std::io::Error) -> DomainError {
        DomainError::PersistFailed {
            path: self.path.clone(),
            source,
        }
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document> {
        let raw = fs::read_to_string(&self.path).map_err(|e| self.unreadable(e))?;
        let document: Document = serde_json::from_str(&raw).map_err(|e| self.unreadable(e))?;
        debug!(
            path = %self.path.display(),
            users = document.users.len(),
            posts = document.posts.len(),
            "loaded document"
        );
        Ok(document)
    }

    fn commit(&self, document: &Document) -> Result<()> {
        let bytes = to_canonical_vec(document)?;
        fs::write(&self.path, &bytes).map_err(|e| self.persist_failed(e))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "committed document");
        Ok(())
    }

    fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| self.persist_failed(e))?;
        }
        self.commit(&Document::default())?;
        info!(path = %self.path.display(), "initialized empty database");
        Ok(())
    }
}
