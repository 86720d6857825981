//! Post use-case service.
//!
//! # Responsibility
//! - Provide stable post CRUD entry points plus publish/unpublish
//!   transitions.
//! - Delegate persistence to repository implementations.

use crate::model::post::{NewPost, Post, PostId, PostPatch};
use crate::model::user::UserId;
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::StoreResult;
use log::info;

/// Use-case service wrapper for post CRUD operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an unpublished draft post owned by `user_id`.
    ///
    /// # Contract
    /// - `published` starts false; use [`Self::publish_post`] to flip it.
    /// - The owning user must exist.
    pub fn compose_post(
        &self,
        title: impl Into<String>,
        post_body: impl Into<String>,
        user_id: UserId,
    ) -> StoreResult<PostId> {
        let draft = NewPost::new(title, post_body, user_id);
        let id = self.repo.create_post(&draft)?;
        info!("event=post_created module=service status=ok post_id={id} user_id={user_id}");
        Ok(id)
    }

    /// Creates a post from a fully specified draft.
    pub fn create_post(&self, draft: &NewPost) -> StoreResult<PostId> {
        self.repo.create_post(draft)
    }

    /// Gets one post by id.
    pub fn get_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        self.repo.get_post(id)
    }

    /// Applies a partial update to an existing post.
    pub fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<()> {
        self.repo.update_post(id, patch)
    }

    /// Marks a post as published.
    pub fn publish_post(&self, id: PostId) -> StoreResult<()> {
        self.set_published(id, true)
    }

    /// Returns a post to draft state.
    pub fn unpublish_post(&self, id: PostId) -> StoreResult<()> {
        self.set_published(id, false)
    }

    /// Deletes a post; rejected while comments still reference it.
    pub fn delete_post(&self, id: PostId) -> StoreResult<()> {
        self.repo.delete_post(id)?;
        info!("event=post_deleted module=service status=ok post_id={id}");
        Ok(())
    }

    /// Lists posts owned by one user, drafts included.
    pub fn posts_for_user(&self, user_id: UserId) -> StoreResult<Vec<Post>> {
        self.repo.list_posts(&PostListQuery {
            user_id: Some(user_id),
            ..PostListQuery::default()
        })
    }

    /// Lists posts using filter and pagination options.
    pub fn list_posts(&self, query: &PostListQuery) -> StoreResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    fn set_published(&self, id: PostId, published: bool) -> StoreResult<()> {
        self.repo.update_post(
            id,
            &PostPatch {
                published: Some(published),
                ..PostPatch::default()
            },
        )?;
        info!("event=post_published module=service status=ok post_id={id} published={published}");
        Ok(())
    }
}
