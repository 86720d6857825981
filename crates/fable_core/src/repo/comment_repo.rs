//! Comment repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `comments` table.
//! - Enforce both parent references (post and author) on every write.
//!
//! # Invariants
//! - Inserts fail when the referenced post or user does not exist.
//! - Comments are leaf rows; deleting one never violates a constraint.

use crate::model::comment::{Comment, CommentId, CommentPatch, NewComment};
use crate::model::post::PostId;
use crate::model::user::UserId;
use crate::model::Entity;
use crate::repo::{constraint_or_db, ensure_foreign_keys_enabled, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const COMMENT_SELECT_SQL: &str = "SELECT
    comment_id,
    post_id,
    user_id,
    comment_body
FROM comments";

/// Query options for listing comments.
#[derive(Debug, Clone, Default)]
pub struct CommentListQuery {
    /// Restrict to comments under one post.
    pub post_id: Option<PostId>,
    /// Restrict to comments written by one user.
    pub user_id: Option<UserId>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for comment CRUD operations.
pub trait CommentRepository {
    /// Inserts one comment and returns the assigned identifier.
    fn create_comment(&self, draft: &NewComment) -> StoreResult<CommentId>;
    /// Gets one comment by id.
    fn get_comment(&self, id: CommentId) -> StoreResult<Option<Comment>>;
    /// Applies a partial update to an existing comment.
    fn update_comment(&self, id: CommentId, patch: &CommentPatch) -> StoreResult<()>;
    /// Deletes one comment.
    fn delete_comment(&self, id: CommentId) -> StoreResult<()>;
    /// Lists comments using post/author filters + pagination.
    fn list_comments(&self, query: &CommentListQuery) -> StoreResult<Vec<Comment>>;
}

/// SQLite-backed comment repository.
pub struct SqliteCommentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCommentRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_foreign_keys_enabled(conn)?;
        Ok(Self { conn })
    }
}

impl CommentRepository for SqliteCommentRepository<'_> {
    fn create_comment(&self, draft: &NewComment) -> StoreResult<CommentId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO comments (post_id, user_id, comment_body) VALUES (?1, ?2, ?3);",
                params![draft.post_id, draft.user_id, draft.comment_body.as_str()],
            )
            .map_err(|err| constraint_or_db(Entity::Comment, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_comment(&self, id: CommentId) -> StoreResult<Option<Comment>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{COMMENT_SELECT_SQL} WHERE comment_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_comment_row(row)?));
        }

        Ok(None)
    }

    fn update_comment(&self, id: CommentId, patch: &CommentPatch) -> StoreResult<()> {
        patch.validate()?;

        if patch.is_empty() {
            return match self.get_comment(id)? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound {
                    entity: Entity::Comment,
                    id,
                }),
            };
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(post_id) = patch.post_id {
            assignments.push("post_id = ?");
            bind_values.push(Value::Integer(post_id));
        }
        if let Some(user_id) = patch.user_id {
            assignments.push("user_id = ?");
            bind_values.push(Value::Integer(user_id));
        }
        if let Some(comment_body) = &patch.comment_body {
            assignments.push("comment_body = ?");
            bind_values.push(Value::Text(comment_body.clone()));
        }

        let sql = format!(
            "UPDATE comments SET {} WHERE comment_id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self
            .conn
            .execute(&sql, params_from_iter(bind_values))
            .map_err(|err| constraint_or_db(Entity::Comment, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Comment,
                id,
            });
        }

        Ok(())
    }

    fn delete_comment(&self, id: CommentId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM comments WHERE comment_id = ?1;", [id])
            .map_err(|err| constraint_or_db(Entity::Comment, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Comment,
                id,
            });
        }

        Ok(())
    }

    fn list_comments(&self, query: &CommentListQuery) -> StoreResult<Vec<Comment>> {
        let mut sql = format!("{COMMENT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(post_id) = query.post_id {
            sql.push_str(" AND post_id = ?");
            bind_values.push(Value::Integer(post_id));
        }
        if let Some(user_id) = query.user_id {
            sql.push_str(" AND user_id = ?");
            bind_values.push(Value::Integer(user_id));
        }

        sql.push_str(" ORDER BY comment_id ASC");

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
        let mut comments = Vec::new();

        while let Some(row) = rows.next()? {
            comments.push(parse_comment_row(row)?);
        }

        Ok(comments)
    }
}

fn parse_comment_row(row: &Row<'_>) -> StoreResult<Comment> {
    Ok(Comment {
        comment_id: row.get("comment_id")?,
        post_id: row.get("post_id")?,
        user_id: row.get("user_id")?,
        comment_body: row.get("comment_body")?,
    })
}
