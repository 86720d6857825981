//! Repository contracts and shared persistence error taxonomy.
//!
//! # Responsibility
//! - Define `StoreError`, the single error surface for all CRUD operations.
//! - Map storage-engine constraint failures into domain terms.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths validate drafts/patches before SQL mutations.
//! - Repositories refuse connections where `foreign_keys` is OFF, since all
//!   referential checks depend on it.

use crate::db::DbError;
use crate::model::{ConstraintViolation, Entity};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod comment_repo;
pub mod post_repo;
pub mod user_repo;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surface for all store accessor operations.
#[derive(Debug)]
pub enum StoreError {
    /// A write was rejected because it would break a declared constraint.
    Constraint(ConstraintViolation),
    /// The operation targeted an identifier with no matching row.
    NotFound { entity: Entity, id: i64 },
    /// Storage-engine failure unrelated to declared constraints.
    Db(DbError),
    /// Persisted state that cannot be mapped back into a domain record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constraint(violation) => write!(f, "{violation}"),
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Constraint(violation) => Some(violation),
            Self::NotFound { .. } | Self::InvalidData(_) => None,
            Self::Db(err) => Some(err),
        }
    }
}

impl From<ConstraintViolation> for StoreError {
    fn from(value: ConstraintViolation) -> Self {
        Self::Constraint(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Maps a write-path SQLite failure into the domain taxonomy.
///
/// Constraint failures become [`StoreError::Constraint`]; `entity` names the
/// row being written so foreign-key reports stay readable. Everything else
/// is a plain database error.
pub(crate) fn constraint_or_db(entity: Entity, err: rusqlite::Error) -> StoreError {
    match err {
        rusqlite::Error::SqliteFailure(failure, ref message)
            if failure.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY {
                StoreError::Constraint(ConstraintViolation::ForeignKey { entity })
            } else {
                StoreError::Constraint(ConstraintViolation::Storage(
                    message
                        .clone()
                        .unwrap_or_else(|| "constraint failed".to_string()),
                ))
            }
        }
        other => StoreError::Db(DbError::Sqlite(other)),
    }
}

/// Rejects connections opened without `foreign_keys = ON`.
///
/// Repositories call this once at construction; a connection from
/// `db::open_db` always passes.
pub(crate) fn ensure_foreign_keys_enabled(conn: &Connection) -> StoreResult<()> {
    let enabled: i64 = conn.query_row("PRAGMA foreign_keys;", [], |row| row.get(0))?;
    if enabled != 1 {
        return Err(StoreError::Db(DbError::ForeignKeysDisabled));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{constraint_or_db, StoreError};
    use crate::model::{ConstraintViolation, Entity};

    #[test]
    fn foreign_key_failure_maps_to_constraint() {
        let failure = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
        };
        let err = rusqlite::Error::SqliteFailure(failure, None);

        let mapped = constraint_or_db(Entity::Post, err);
        assert!(matches!(
            mapped,
            StoreError::Constraint(ConstraintViolation::ForeignKey {
                entity: Entity::Post
            })
        ));
    }

    #[test]
    fn non_constraint_failure_maps_to_db() {
        let failure = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::DatabaseBusy,
            extended_code: rusqlite::ffi::SQLITE_BUSY,
        };
        let err = rusqlite::Error::SqliteFailure(failure, None);

        let mapped = constraint_or_db(Entity::User, err);
        assert!(matches!(mapped, StoreError::Db(_)));
    }
}
