//! User repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `users` table.
//! - Surface dependent-row delete rejections as constraint violations.
//!
//! # Invariants
//! - `user_id` is assigned by SQLite and returned from `create_user`.
//! - A user with posts or comments cannot be deleted; no cascade is
//!   declared anywhere in the schema.

use crate::model::user::{NewUser, User, UserId, UserPatch};
use crate::model::Entity;
use crate::repo::{constraint_or_db, ensure_foreign_keys_enabled, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const USER_SELECT_SQL: &str = "SELECT
    user_id,
    name,
    email,
    password_hash
FROM users";

/// Query options for listing users.
#[derive(Debug, Clone, Default)]
pub struct UserListQuery {
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for user CRUD operations.
pub trait UserRepository {
    /// Inserts one user and returns the assigned identifier.
    fn create_user(&self, draft: &NewUser) -> StoreResult<UserId>;
    /// Gets one user by id.
    fn get_user(&self, id: UserId) -> StoreResult<Option<User>>;
    /// Applies a partial update to an existing user.
    fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<()>;
    /// Deletes one user; rejected while posts or comments reference it.
    fn delete_user(&self, id: UserId) -> StoreResult<()>;
    /// Lists users ordered by id.
    fn list_users(&self, query: &UserListQuery) -> StoreResult<Vec<User>>;
}

/// SQLite-backed user repository.
#[derive(Debug)]
pub struct SqliteUserRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUserRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_foreign_keys_enabled(conn)?;
        Ok(Self { conn })
    }
}

impl UserRepository for SqliteUserRepository<'_> {
    fn create_user(&self, draft: &NewUser) -> StoreResult<UserId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO users (name, email, password_hash) VALUES (?1, ?2, ?3);",
                params![
                    draft.name.as_str(),
                    draft.email.as_str(),
                    draft.password_hash.as_str(),
                ],
            )
            .map_err(|err| constraint_or_db(Entity::User, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_user(&self, id: UserId) -> StoreResult<Option<User>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{USER_SELECT_SQL} WHERE user_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_user_row(row)?));
        }

        Ok(None)
    }

    fn update_user(&self, id: UserId, patch: &UserPatch) -> StoreResult<()> {
        patch.validate()?;

        if patch.is_empty() {
            // Nothing to write, but a missing id must still be reported.
            return match self.get_user(id)? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound {
                    entity: Entity::User,
                    id,
                }),
            };
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = &patch.name {
            assignments.push("name = ?");
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(email) = &patch.email {
            assignments.push("email = ?");
            bind_values.push(Value::Text(email.clone()));
        }
        if let Some(password_hash) = &patch.password_hash {
            assignments.push("password_hash = ?");
            bind_values.push(Value::Text(password_hash.clone()));
        }

        let sql = format!(
            "UPDATE users SET {} WHERE user_id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self
            .conn
            .execute(&sql, params_from_iter(bind_values))
            .map_err(|err| constraint_or_db(Entity::User, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::User,
                id,
            });
        }

        Ok(())
    }

    fn delete_user(&self, id: UserId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM users WHERE user_id = ?1;", [id])
            .map_err(|err| constraint_or_db(Entity::User, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::User,
                id,
            });
        }

        Ok(())
    }

    fn list_users(&self, query: &UserListQuery) -> StoreResult<Vec<User>> {
        let mut sql = format!("{USER_SELECT_SQL} ORDER BY user_id ASC");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut users = Vec::new();

        while let Some(row) = rows.next()? {
            users.push(parse_user_row(row)?);
        }

        Ok(users)
    }
}

fn parse_user_row(row: &Row<'_>) -> StoreResult<User> {
    Ok(User {
        user_id: row.get("user_id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        password_hash: row.get("password_hash")?,
    })
}
