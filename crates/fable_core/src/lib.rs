//! Core storage layer for Fable.
//! This crate owns the relational schema and its referential invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::comment::{Comment, CommentId, CommentPatch, NewComment};
pub use model::post::{NewPost, Post, PostId, PostPatch};
pub use model::user::{NewUser, User, UserId, UserPatch};
pub use model::{ConstraintViolation, Entity};
pub use repo::comment_repo::{CommentListQuery, CommentRepository, SqliteCommentRepository};
pub use repo::post_repo::{PostListQuery, PostRepository, SqlitePostRepository};
pub use repo::user_repo::{SqliteUserRepository, UserListQuery, UserRepository};
pub use repo::{StoreError, StoreResult};
pub use service::comment_service::CommentService;
pub use service::post_service::PostService;
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
