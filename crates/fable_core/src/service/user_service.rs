//! User use-case service.
//!
//! # Responsibility
//! - Provide stable user CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.

use crate::model::user::{NewUser, User, UserId, UserPatch};
use crate::repo::user_repo::{UserListQuery, UserRepository};
use crate::repo::StoreResult;
use log::info;

/// Use-case service wrapper for user CRUD operations.
pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new user and returns the assigned identifier.
    ///
    /// # Contract
    /// - `password_hash` is already-hashed credential material; this layer
    ///   never hashes or inspects it.
    pub fn register_user(
        &self,
        name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> StoreResult<UserId> {
        let draft = NewUser::new(name, email, password_hash);
        let id = self.repo.create_user(&draft)?;
        info!("event=user_created module=service status=ok user_id={id}");
        Ok(id)
    }

    /// Gets one user by id.
    pub fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        self.repo.get_user(id)
    }

    /// Applies a partial profile update to an existing user.
    ///
    /// Returns repository-level not-found or constraint errors unchanged.
    pub fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<()> {
        self.repo.update_user(id, patch)
    }

    /// Deletes a user; rejected while the user still owns posts or comments.
    pub fn delete_user(&self, id: UserId) -> StoreResult<()> {
        self.repo.delete_user(id)?;
        info!("event=user_deleted module=service status=ok user_id={id}");
        Ok(())
    }

    /// Lists users with pagination.
    pub fn list_users(&self, query: &UserListQuery) -> StoreResult<Vec<User>> {
        self.repo.list_users(query)
    }
}
