//! # DomainError
//!
//! Every failure the blog core can surface to its caller. Nothing here is
//! retried; the presentation layer decides how each kind is rendered.

use std::path::PathBuf;

use thiserror::Error;

/// The primary error type for all domain and storage operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// The referenced post id is not in the `posts` table.
    #[error("Post id {id} doesn't exist.")]
    NotFound { id: i64 },

    /// The caller is not the author of the post.
    #[error("forbidden: post {id} belongs to another author")]
    Forbidden { id: i64 },

    /// Form input rejected (e.g. empty title).
    #[error("{0}")]
    Validation(String),

    /// The document file is missing or does not parse.
    #[error("database {path} is unreadable: {reason}")]
    DatabaseUnreadable { path: PathBuf, reason: String },

    /// A post references an `author_id` with no matching user.
    #[error("post {post_id} references unknown author {author_id}")]
    UnknownAuthor { post_id: i64, author_id: i64 },

    /// Writing the document back to disk failed.
    #[error("failed to write database {path}: {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An id table already holds `i64::MAX`.
    #[error("no ids left above {max}")]
    IdsExhausted { max: i64 },

    #[error("failed to serialize document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse classification of a [`DomainError`], stable across message changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Validation,
    DatabaseUnreadable,
    Lookup,
    Persist,
    IdsExhausted,
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::NotFound { .. } => ErrorKind::NotFound,
            DomainError::Forbidden { .. } => ErrorKind::Forbidden,
            DomainError::Validation(_) => ErrorKind::Validation,
            DomainError::DatabaseUnreadable { .. } => ErrorKind::DatabaseUnreadable,
            DomainError::UnknownAuthor { .. } => ErrorKind::Lookup,
            DomainError::IdsExhausted { .. } => ErrorKind::IdsExhausted,
            DomainError::PersistFailed { .. } | DomainError::Serialization(_) => {
                ErrorKind::Persist
            }
        }
    }

    /// HTTP status the presentation layer should answer with.
    ///
    /// Validation errors are normally re-rendered as a form message rather
    /// than returned as a status; 400 is used when a status is required.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::NotFound => 404,
            ErrorKind::Forbidden => 403,
            ErrorKind::Validation => 400,
            ErrorKind::DatabaseUnreadable
            | ErrorKind::Lookup
            | ErrorKind::Persist
            | ErrorKind::IdsExhausted => 500,
        }
    }
}

/// A specialized Result type for the blog core.
pub type Result<T> = std::result::Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_kind() {
        assert_eq!(DomainError::NotFound { id: 7 }.status_code(), 404);
        assert_eq!(DomainError::Forbidden { id: 7 }.status_code(), 403);
        assert_eq!(DomainError::Validation("x".into()).status_code(), 400);
        let unreadable = DomainError::DatabaseUnreadable {
            path: PathBuf::from("blog.json"),
            reason: "missing".into(),
        };
        assert_eq!(unreadable.kind(), ErrorKind::DatabaseUnreadable);
        assert_eq!(unreadable.status_code(), 500);
        let lookup = DomainError::UnknownAuthor { post_id: 2, author_id: 9 };
        assert_eq!(lookup.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn not_found_message_names_the_id() {
        assert_eq!(
            DomainError::NotFound { id: 42 }.to_string(),
            "Post id 42 doesn't exist."
        );
    }
}
