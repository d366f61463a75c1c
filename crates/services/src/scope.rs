//! # Request scope
//!
//! One `RequestScope` per inbound request. The document is loaded on first
//! use, cached for the rest of the request, and written back when the scope
//! ends, whether the request succeeded or not.
//!
//! Scopes are never shared between requests and nothing coordinates two
//! scopes over the same store: the later commit wins.

use domains::{Document, DocumentStore, DomainError, Result};
use tracing::{debug, error};

pub struct RequestScope<'s, S: DocumentStore + ?Sized> {
    store: &'s S,
    document: Option<Document>,
    /// Mutated since the last commit.
    dirty: bool,
}

impl<'s, S: DocumentStore + ?Sized> RequestScope<'s, S> {
    pub fn new(store: &'s S) -> Self {
        Self {
            store,
            document: None,
            dirty: false,
        }
    }

    /// Returns the request's document, loading it from the store on first call.
    pub fn acquire(&mut self) -> Result<&mut Document> {
        let document = match self.document.take() {
            Some(cached) => cached,
            None => self.store.load()?,
        };
        Ok(self.document.insert(document))
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn is_acquired(&self) -> bool {
        self.document.is_some()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Writes the cached document through to the store.
    /// Without an acquired document there is nothing to write.
    pub fn commit(&mut self) -> Result<()> {
        match &self.document {
            Some(document) => {
                self.store.commit(document)?;
                self.dirty = false;
            }
            None => debug!("commit skipped, no document acquired"),
        }
        Ok(())
    }

    /// Ends the request: an acquired document is committed unconditionally
    /// and released.
    pub fn teardown(mut self, error: Option<&DomainError>) -> Result<()> {
        self.release(error)
    }

    fn release(&mut self, error: Option<&DomainError>) -> Result<()> {
        if let Some(err) = error {
            debug!(error = %err, "request ended with error");
        }
        let Some(document) = self.document.take() else {
            return Ok(());
        };
        let dirty = std::mem::take(&mut self.dirty);
        debug!(dirty, "teardown commit");
        self.store.commit(&document)
    }
}

impl<S: DocumentStore + ?Sized> Drop for RequestScope<'_, S> {
    fn drop(&mut self) {
        if let Err(err) = self.release(None) {
            error!(error = %err, "teardown commit failed");
        }
    }
}
