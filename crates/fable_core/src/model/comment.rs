//! Comment domain model.
//!
//! # Responsibility
//! - Define the `comments` row shape plus its insert draft and update patch.
//!
//! # Invariants
//! - Every comment references exactly one existing post and one existing
//!   user (its author) at all times.
//! - `comment_body` is non-empty.

use crate::model::post::PostId;
use crate::model::user::UserId;
use crate::model::{require_non_empty, ConstraintViolation, Entity};
use serde::{Deserialize, Serialize};

/// Storage-assigned identifier for a comment row.
pub type CommentId = i64;

/// Canonical `comments` row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: CommentId,
    pub post_id: PostId,
    /// Comment author.
    pub user_id: UserId,
    pub comment_body: String,
}

/// Insert draft for a new comment. The identifier is assigned on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub comment_body: String,
}

impl NewComment {
    pub fn new(post_id: PostId, user_id: UserId, comment_body: impl Into<String>) -> Self {
        Self {
            post_id,
            user_id,
            comment_body: comment_body.into(),
        }
    }

    /// Checks NOT NULL / non-empty column constraints before SQL runs.
    ///
    /// Both foreign keys are checked by the storage engine.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        require_non_empty(Entity::Comment, "comment_body", &self.comment_body)
    }
}

/// Partial update for a comment. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentPatch {
    pub post_id: Option<PostId>,
    pub user_id: Option<UserId>,
    pub comment_body: Option<String>,
}

impl CommentPatch {
    /// Returns whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.post_id.is_none() && self.user_id.is_none() && self.comment_body.is_none()
    }

    /// Checks that no patched text column would become empty.
    pub fn validate(&self) -> Result<(), ConstraintViolation> {
        if let Some(comment_body) = &self.comment_body {
            require_non_empty(Entity::Comment, "comment_body", comment_body)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentPatch, NewComment};
    use crate::model::ConstraintViolation;

    #[test]
    fn draft_with_body_is_valid() {
        assert!(NewComment::new(1, 1, "nice").validate().is_ok());
    }

    #[test]
    fn empty_body_is_rejected() {
        let err = NewComment::new(1, 1, "").validate().unwrap_err();
        assert!(matches!(
            err,
            ConstraintViolation::EmptyField {
                field: "comment_body",
                ..
            }
        ));
    }

    #[test]
    fn empty_patch_reports_is_empty() {
        assert!(CommentPatch::default().is_empty());
    }
}
