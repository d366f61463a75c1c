//! # Post operations
//!
//! List, fetch, create, update and delete over the request's document.
//! Every operation goes through the caller's [`RequestScope`]; mutations
//! commit immediately.

use std::collections::HashMap;

use domains::{
    allocate_id, Caller, DocumentStore, DomainError, Extra, Post, PostDraft, PostView, Result,
    Timestamp,
};
use tracing::{debug, info, warn};

use crate::scope::RequestScope;

/// Where the presentation layer sends the caller after a mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    RedirectToIndex,
}

impl Outcome {
    pub fn location(&self) -> &'static str {
        match self {
            Outcome::RedirectToIndex => "/",
        }
    }
}

/// All posts, most recent first, each joined with its author's username.
///
/// Equal timestamps keep their order in the document.
pub fn list<S: DocumentStore + ?Sized>(scope: &mut RequestScope<'_, S>) -> Result<Vec<PostView>> {
    let document = &*scope.acquire()?;
    let usernames: HashMap<i64, &str> = document
        .users
        .iter()
        .map(|u| (u.id, u.username.as_str()))
        .collect();

    let mut posts: Vec<&Post> = document.posts.iter().collect();
    posts.sort_by(|a, b| b.created.cmp(&a.created));
    debug!(count = posts.len(), "listing posts");

    posts
        .into_iter()
        .map(|post| {
            let username = usernames
                .get(&post.author_id)
                .ok_or(DomainError::UnknownAuthor {
                    post_id: post.id,
                    author_id: post.author_id,
                })?;
            Ok(PostView {
                post: post.clone(),
                username: (*username).to_string(),
            })
        })
        .collect()
}

/// Looks a post up by id, optionally requiring `caller` to be its author.
///
/// An anonymous caller never passes the author check.
pub fn fetch<S: DocumentStore + ?Sized>(
    scope: &mut RequestScope<'_, S>,
    caller: Option<&Caller>,
    id: i64,
    check_author: bool,
) -> Result<Post> {
    let document = scope.acquire()?;
    let post = document.find_post(id).ok_or(DomainError::NotFound { id })?;

    if check_author && caller.map(|c| c.id) != Some(post.author_id) {
        warn!(
            post_id = id,
            author_id = post.author_id,
            caller_id = ?caller.map(|c| c.id),
            "caller is not the author"
        );
        return Err(DomainError::Forbidden { id });
    }

    Ok(post.clone())
}

pub fn create<S: DocumentStore + ?Sized>(
    scope: &mut RequestScope<'_, S>,
    caller: &Caller,
    draft: &PostDraft,
) -> Result<Outcome> {
    draft.validate()?;

    let document = scope.acquire()?;
    let id = allocate_id(&document.posts)?;
    document.posts.push(Post {
        id,
        author_id: caller.id,
        created: Timestamp::now(),
        title: draft.title.clone(),
        body: draft.body.clone(),
        extra: Extra::new(),
    });
    scope.mark_dirty();
    scope.commit()?;

    info!(post_id = id, author_id = caller.id, "created post");
    Ok(Outcome::RedirectToIndex)
}

/// Overwrites title and body of a post the caller authored.
pub fn update<S: DocumentStore + ?Sized>(
    scope: &mut RequestScope<'_, S>,
    caller: &Caller,
    id: i64,
    draft: &PostDraft,
) -> Result<Outcome> {
    fetch(scope, Some(caller), id, true)?;
    draft.validate()?;

    if let Some(post) = scope.acquire()?.find_post_mut(id) {
        post.title = draft.title.clone();
        post.body = draft.body.clone();
    }
    scope.mark_dirty();
    scope.commit()?;

    info!(post_id = id, author_id = caller.id, "updated post");
    Ok(Outcome::RedirectToIndex)
}

/// Removes a post if it exists; an unknown id is silently ignored.
///
/// Any logged-in caller may delete any post: no author check is made here.
pub fn delete<S: DocumentStore + ?Sized>(
    scope: &mut RequestScope<'_, S>,
    caller: &Caller,
    id: i64,
) -> Result<Outcome> {
    let document = scope.acquire()?;
    match document.posts.iter().position(|p| p.id == id) {
        Some(index) => {
            let removed = document.posts.remove(index);
            scope.mark_dirty();
            scope.commit()?;
            info!(
                post_id = id,
                author_id = removed.author_id,
                caller_id = caller.id,
                "deleted post"
            );
        }
        None => debug!(post_id = id, "delete of unknown post ignored"),
    }
    Ok(Outcome::RedirectToIndex)
}
