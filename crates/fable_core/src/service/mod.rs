//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Provide stable entry points for callers outside the persistence
//!   boundary.
//! - Delegate storage to repository implementations.
//!
//! # Invariants
//! - Services never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

pub mod comment_service;
pub mod post_service;
pub mod user_service;
