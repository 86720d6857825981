//! Post domain model.
//!
//! # Responsibility
//! - Define the `posts` row shape plus its insert draft and update patch.
//!
//! # Invariants
//! - Every post references exactly one existing user at all times.
//! - `title` and `post_body` are non-empty; `post_body` length is unbounded.
//! - `published` defaults to false when omitted at creation.

use crate::model::user::UserId;
use crate::model::{require_non_empty, ConstraintViolation, Entity};
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier for a post row.
pub type PostId = i64;

/// Canonical `posts` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub post_id: PostId,
    pub title: String,
    pub post_body: String,
    pub published: bool,
    /// Owning user; enforced by the schema, a post cannot outlive it.
    pub user_id: UserId,
}

/// Insert draft for a new post. The identifier is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub post_body: String,
    /// Serde-omitted drafts and `NewPost::new` both start unpublished.
    #[serde(default)]
    pub published: bool,
    pub user_id: UserId,
}

impl NewPost {
    /// Creates an unpublished draft owned by `user_id`.
    pub fn new(title: impl Into<String>, post_body: impl Into<String>, user_id: UserId) -> Self {
        Self {
            title: title.into(),
            post_body: post_body.into(),
            published: false,
            user_id,
        }
    }

    /// Checks NOT NULL / non-empty column constraints before SQL runs.
    ///
    /// The `user_id` reference itself is checked by the storage engine.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        require_non_empty(Entity::Post, "title", &self.title)?;
        require_non_empty(Entity::Post, "post_body", &self.post_body)?;
        Ok(())
    }
}

/// Partial update for a post. `None` fields are left untouched.
///
/// Patching `user_id` re-parents the post; the new owner must exist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub post_body: Option<String>,
    pub published: Option<bool>,
    pub user_id: Option<UserId>,
}

impl PostPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.post_body.is_none()
            && self.published.is_none()
            && self.user_id.is_none()
    }

    /// Checks that no patched text column would become empty.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        if let Some(title) = &self.title {
            require_non_empty(Entity::Post, "title", title)?;
        }
        if let Some(post_body) = &self.post_body {
            require_non_empty(Entity::Post, "post_body", post_body)?;
        }
        Ok(())
    }
}
