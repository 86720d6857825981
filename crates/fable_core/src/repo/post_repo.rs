//! Post repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `posts` table.
//! - Enforce the owning-user reference on insert and re-parenting.
//!
//! # Invariants
//! - Inserts fail when the owning user does not exist.
//! - `published` is stored as 0/1 and defaults to 0.
//! - A post with comments cannot be deleted.

use crate::model::post::{NewPost, Post, PostId, PostPatch};
use crate::model::user::UserId;
use crate::model::Entity;
use crate::repo::{constraint_or_db, ensure_foreign_keys_enabled, StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const POST_SELECT_SQL: &str = "SELECT
    post_id,
    title,
    post_body,
    published,
    user_id
FROM posts";

/// Query options for listing posts.
#[derive(Debug, Clone, Default)]
pub struct PostListQuery {
    /// Restrict to posts owned by one user.
    pub user_id: Option<UserId>,
    /// Restrict to published posts only.
    pub published_only: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for post CRUD operations.
pub trait PostRepository {
    /// Inserts one post and returns the assigned identifier.
    fn create_post(&self, draft: &NewPost) -> StoreResult<PostId>;
    /// Gets one post by id.
    fn get_post(&self, id: PostId) -> StoreResult<Option<Post>>;
    /// Applies a partial update to an existing post.
    fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<()>;
    /// Deletes one post; rejected while comments reference it.
    fn delete_post(&self, id: PostId) -> StoreResult<()>;
    /// Lists posts using owner/published filters + pagination.
    fn list_posts(&self, query: &PostListQuery) -> StoreResult<Vec<Post>>;
}

/// SQLite-backed post repository.
pub struct SqlitePostRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePostRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_foreign_keys_enabled(conn)?;
        Ok(Self { conn })
    }
}

impl PostRepository for SqlitePostRepository<'_> {
    fn create_post(&self, draft: &NewPost) -> StoreResult<PostId> {
        draft.validate()?;

        self.conn
            .execute(
                "INSERT INTO posts (title, post_body, published, user_id)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    draft.title.as_str(),
                    draft.post_body.as_str(),
                    bool_to_int(draft.published),
                    draft.user_id,
                ],
            )
            .map_err(|err| constraint_or_db(Entity::Post, err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn get_post(&self, id: PostId) -> StoreResult<Option<Post>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{POST_SELECT_SQL} WHERE post_id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_post_row(row)?));
        }

        Ok(None)
    }

    fn update_post(&self, id: PostId, patch: &PostPatch) -> StoreResult<()> {
        patch.validate()?;

        if patch.is_empty() {
            return match self.get_post(id)? {
                Some(_) => Ok(()),
                None => Err(StoreError::NotFound {
                    entity: Entity::Post,
                    id,
                }),
            };
        }

        let mut assignments: Vec<&str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = &patch.title {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(post_body) = &patch.post_body {
            assignments.push("post_body = ?");
            bind_values.push(Value::Text(post_body.clone()));
        }
        if let Some(published) = patch.published {
            assignments.push("published = ?");
            bind_values.push(Value::Integer(bool_to_int(published)));
        }
        if let Some(user_id) = patch.user_id {
            assignments.push("user_id = ?");
            bind_values.push(Value::Integer(user_id));
        }

        let sql = format!(
            "UPDATE posts SET {} WHERE post_id = ?;",
            assignments.join(", ")
        );
        bind_values.push(Value::Integer(id));

        let changed = self
            .conn
            .execute(&sql, params_from_iter(bind_values))
            .map_err(|err| constraint_or_db(Entity::Post, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Post,
                id,
            });
        }

        Ok(())
    }

    fn delete_post(&self, id: PostId) -> StoreResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM posts WHERE post_id = ?1;", [id])
            .map_err(|err| constraint_or_db(Entity::Post, err))?;

        if changed == 0 {
            return Err(StoreError::NotFound {
                entity: Entity::Post,
                id,
            });
        }

        Ok(())
    }

    fn list_posts(&self, query: &PostListQuery) -> StoreResult<Vec<Post>> {
        let mut sql = format!("{POST_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(user_id) = query.user_id {
            sql.push_str(" AND user_id = ?");
            bind_values.push(Value::Integer(user_id));
        }
        if query.published_only {
            sql.push_str(" AND published = 1");
        }

        sql.push_str(" ORDER BY post_id ASC");

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
        let mut posts = Vec::new();

        while let Some(row) = rows.next()? {
            posts.push(parse_post_row(row)?);
        }

        Ok(posts)
    }
}

fn parse_post_row(row: &Row<'_>) -> StoreResult<Post> {
    let published = match row.get::<_, i64>("published")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid published value `{other}` in posts.published"
            )));
        }
    };

    Ok(Post {
        post_id: row.get("post_id")?,
        title: row.get("title")?,
        post_body: row.get("post_body")?,
        published,
        user_id: row.get("user_id")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
