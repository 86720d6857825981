//! Domain records for the users/posts/comments schema.
//!
//! # Responsibility
//! - Define canonical row shapes plus insert drafts and update patches.
//! - Own the constraint-violation vocabulary shared by all repositories.
//!
//! # Invariants
//! - Identifiers are storage-assigned integers, never chosen by callers.
//! - Required text fields are non-empty; drafts and patches validate this
//!   before any SQL runs.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod comment;
pub mod post;
pub mod user;

/// Entity names used in errors and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Post,
    Comment,
}

impl Entity {
    /// Stable lowercase name, matching table naming in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl Display for Entity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected write that would break a declared schema constraint.
///
/// Covers NOT NULL / empty required text, referential integrity on both
/// insert (missing parent) and delete (dependent rows remain), and any other
/// constraint the storage engine reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// A required text column would be stored empty.
    EmptyField {
        entity: Entity,
        field: &'static str,
    },
    /// A foreign key check failed: either a referenced row does not exist,
    /// or a delete would leave dependent rows behind.
    ForeignKey { entity: Entity },
    /// Any other declared constraint reported by the storage engine.
    Storage(String),
}

impl Display for ConstraintViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { entity, field } => {
                write!(f, "{entity} field `{field}` must not be empty")
            }
            Self::ForeignKey { entity } => {
                write!(f, "foreign key constraint failed for {entity}")
            }
            Self::Storage(message) => write!(f, "constraint violation: {message}"),
        }
    }
}

impl Error for ConstraintViolation {}

pub(crate) fn require_non_empty(
    entity: Entity,
    field: &'static str,
    value: &str,
) -> Result<(), ConstraintViolation> {
    if value.is_empty() {
        return Err(ConstraintViolation::EmptyField { entity, field });
    }
    Ok(())
}
