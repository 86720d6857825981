use fable_core::db::open_db_in_memory;
use fable_core::{
    CommentRepository, ConstraintViolation, Entity, NewComment, NewPost, NewUser, PostListQuery,
    PostPatch, PostRepository, SqliteCommentRepository, SqlitePostRepository, SqliteUserRepository,
    StoreError, UserId, UserRepository,
};
use rusqlite::Connection;

fn seed_user(conn: &Connection, name: &str) -> UserId {
    let users = SqliteUserRepository::try_new(conn).unwrap();
    users
        .create_user(&NewUser::new(name, format!("{name}@x.com"), "h"))
        .unwrap()
}

#[test]
fn create_and_get_roundtrip_defaults_to_unpublished() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "ann");
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo
        .create_post(&NewPost::new("Hi", "body", user_id))
        .unwrap();

    let loaded = repo.get_post(id).unwrap().unwrap();
    assert_eq!(loaded.post_id, id);
    assert_eq!(loaded.title, "Hi");
    assert_eq!(loaded.post_body, "body");
    assert_eq!(loaded.user_id, user_id);
    assert!(!loaded.published);
}

#[test]
fn create_post_for_missing_user_fails_with_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let err = repo.create_post(&NewPost::new("Hi", "body", 42)).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Constraint(ConstraintViolation::ForeignKey {
            entity: Entity::Post
        })
    ));
}

#[test]
fn empty_title_fails_with_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "ann");
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let err = repo
        .create_post(&NewPost::new("", "body", user_id))
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Constraint(ConstraintViolation::EmptyField { field: "title", .. })
    ));
}

#[test]
fn patch_toggles_published_flag() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "ann");
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo
        .create_post(&NewPost::new("Hi", "body", user_id))
        .unwrap();

    repo.update_post(
        id,
        &PostPatch {
            published: Some(true),
            ..PostPatch::default()
        },
    )
    .unwrap();

    let loaded = repo.get_post(id).unwrap().unwrap();
    assert!(loaded.published);
    assert_eq!(loaded.title, "Hi");
}

#[test]
fn patch_reparenting_to_missing_user_fails_with_constraint_violation() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "ann");
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let id = repo
        .create_post(&NewPost::new("Hi", "body", user_id))
        .unwrap();

    let err = repo
        .update_post(
            id,
            &PostPatch {
                user_id: Some(42),
                ..PostPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::Constraint(ConstraintViolation::ForeignKey {
            entity: Entity::Post
        })
    ));
}

#[test]
fn update_missing_post_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let err = repo
        .update_post(
            42,
            &PostPatch {
                published: Some(true),
                ..PostPatch::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::NotFound {
            entity: Entity::Post,
            id: 42
        }
    ));
}

#[test]
fn delete_post_with_comments_fails_until_comments_are_removed() {
    let conn = open_db_in_memory().unwrap();
    let user_id = seed_user(&conn, "ann");
    let posts = SqlitePostRepository::try_new(&conn).unwrap();
    let comments = SqliteCommentRepository::try_new(&conn).unwrap();

    let post_id = posts
        .create_post(&NewPost::new("Hi", "body", user_id))
        .unwrap();
    let comment_id = comments
        .create_comment(&NewComment::new(post_id, user_id, "nice"))
        .unwrap();

    let err = posts.delete_post(post_id).unwrap_err();
    assert!(matches!(
        err,
        StoreError::Constraint(ConstraintViolation::ForeignKey {
            entity: Entity::Post
        })
    ));

    comments.delete_comment(comment_id).unwrap();
    posts.delete_post(post_id).unwrap();
    assert!(posts.get_post(post_id).unwrap().is_none());
}

#[test]
fn list_posts_filters_by_owner_and_published() {
    let conn = open_db_in_memory().unwrap();
    let ann = seed_user(&conn, "ann");
    let ben = seed_user(&conn, "ben");
    let repo = SqlitePostRepository::try_new(&conn).unwrap();

    let draft = repo
        .create_post(&NewPost::new("Draft", "body", ann))
        .unwrap();
    let mut published_draft = NewPost::new("Published", "body", ann);
    published_draft.published = true;
    let published = repo.create_post(&published_draft).unwrap();
    repo.create_post(&NewPost::new("Other", "body", ben)).unwrap();

    let anns_posts = repo
        .list_posts(&PostListQuery {
            user_id: Some(ann),
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(anns_posts.len(), 2);
    assert_eq!(anns_posts[0].post_id, draft);

    let anns_published = repo
        .list_posts(&PostListQuery {
            user_id: Some(ann),
            published_only: true,
            ..PostListQuery::default()
        })
        .unwrap();
    assert_eq!(anns_published.len(), 1);
    assert_eq!(anns_published[0].post_id, published);
}
