//! # Ports
//!
//! Storage backends implement [`DocumentStore`] to be usable by the services.

use crate::error::Result;
use crate::models::Document;

/// Whole-document persistence. Every call does blocking I/O and there is no
/// locking: two writers on the same backing file lose updates.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait DocumentStore: Send + Sync {
    /// Reads and parses the entire document.
    fn load(&self) -> Result<Document>;

    /// Replaces the persisted document with `document`.
    fn commit(&self, document: &Document) -> Result<()>;

    /// Wipes the store down to an empty `users`/`posts` document.
    fn initialize(&self) -> Result<()> {
        self.commit(&Document::default())
    }
}
