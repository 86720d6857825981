//! Comment use-case service.
//!
//! # Responsibility
//! - Provide stable comment CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.

use crate::model::comment::{Comment, CommentId, CommentPatch, NewComment};
use crate::model::post::PostId;
use crate::model::user::UserId;
use crate::repo::comment_repo::{CommentListQuery, CommentRepository};
use crate::repo::StoreResult;
use log::info;

/// Use-case service wrapper for comment CRUD operations.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a comment by `user_id` under `post_id`.
    ///
    /// # Contract
    /// - Both the post and the author must exist.
    pub fn add_comment(
        &self,
        post_id: PostId,
        user_id: UserId,
        comment_body: impl Into<String>,
    ) -> StoreResult<CommentId> {
        let draft = NewComment::new(post_id, user_id, comment_body);
        let id = self.repo.create_comment(&draft)?;
        info!("event=comment_created module=service status=ok comment_id={id} post_id={post_id}");
        Ok(id)
    }

    /// Gets one comment by id.
    pub fn get_comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        self.repo.get_comment(id)
    }

    /// Applies a partial update to an existing comment.
    pub fn update_comment(&self, id: CommentId, patch: &CommentPatch) -> StoreResult<()> {
        self.repo.update_comment(id, patch)
    }

    /// Deletes a comment by id.
    pub fn delete_comment(&self, id: CommentId) -> StoreResult<()> {
        self.repo.delete_comment(id)?;
        info!("event=comment_deleted module=service status=ok comment_id={id}");
        Ok(())
    }

    /// Lists all comments under one post.
    pub fn comments_for_post(&self, post_id: PostId) -> StoreResult<Vec<Comment>> {
        self.repo.list_comments(&CommentListQuery {
            post_id: Some(post_id),
            ..CommentListQuery::default()
        })
    }

    /// Lists comments using filter and pagination options.
    pub fn list_comments(&self, query: &CommentListQuery) -> StoreResult<Vec<Comment>> {
        self.repo.list_comments(query)
    }
}
