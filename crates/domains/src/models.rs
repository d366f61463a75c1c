//! # Domain Models
//!
//! The two tables of the blog document and the values derived from them.
//! Identifiers are plain integers assigned by [`allocate_id`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{DomainError, Result};
use crate::timestamp::Timestamp;

/// Keys a row carries beyond the ones this crate knows. Written back as-is.
pub type Extra = Map<String, Value>;

/// An account row. Created and authenticated by the auth collaborator;
/// the blog core only reads `id` and `username`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Password hash, opaque to this crate.
    pub password: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    /// Assigned once at creation, never updated.
    pub created: Timestamp,
    pub title: String,
    pub body: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// The whole database: the unit of load and commit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    /// Tables other than `users` and `posts`.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Document {
    pub fn find_post(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn find_post_mut(&mut self, id: i64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }
}

/// A listing row: the post joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub username: String,
}

/// Title and body as submitted by the create/update forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// The body may be empty; the title may not.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(DomainError::Validation("Title is required.".to_string()));
        }
        Ok(())
    }
}

/// The authenticated requester, as resolved by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub username: String,
}

impl From<&User> for Caller {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// Rows that carry an integer primary key.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for User {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Post {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Returns an id greater than every id in `table`.
///
/// The scan starts from a floor of 1, so an empty table yields 2. Ids freed
/// by deletes are never reused.
pub fn allocate_id<T: Identified>(table: &[T]) -> Result<i64> {
    let max = table.iter().map(Identified::id).fold(1, i64::max);
    max.checked_add(1).ok_or(DomainError::IdsExhausted { max })
}
