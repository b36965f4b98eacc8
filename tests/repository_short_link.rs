//! PostgreSQL repository tests. Each test gets a fresh database with the
//! migrations applied; run with `DATABASE_URL` set and `--ignored`.

use chrono::{Duration, DurationRound, Utc};
use shortlink::domain::entities::NewShortLink;
use shortlink::domain::repositories::{ShortLinkRepository, StoreError};
use shortlink::infrastructure::persistence::PgShortLinkRepository;
use sqlx::PgPool;
use std::sync::Arc;

fn new_link(code: &str, hash: &str, is_custom: bool) -> NewShortLink {
    NewShortLink {
        short_code: code.to_string(),
        original_url: "https://Example.com/?utm_source=x".to_string(),
        canonical_url: "https://example.com/".to_string(),
        canonical_hash: hash.to_string(),
        created_by: "tester".to_string(),
        is_custom,
        expired_at: None,
    }
}

fn constraint_of(err: StoreError) -> Option<String> {
    match err {
        StoreError::UniqueViolation { constraint } => constraint,
        StoreError::Database(e) => panic!("expected unique violation, got {e}"),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_create_short_link(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));

    let expired_at = (Utc::now() + Duration::days(7))
        .duration_trunc(Duration::seconds(1))
        .unwrap();
    let mut input = new_link("1icKQMxI", "0f115db062b7c0dd", false);
    input.expired_at = Some(expired_at);

    let link = repo.create(input).await.unwrap();

    assert!(link.id > 0);
    assert_eq!(link.short_code, "1icKQMxI");
    assert_eq!(link.original_url, "https://Example.com/?utm_source=x");
    assert_eq!(link.canonical_hash, "0f115db062b7c0dd");
    assert!(!link.is_custom);
    assert_eq!(link.expired_at, Some(expired_at));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_code_and_id(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    let created = repo.create(new_link("abc123", "h1", false)).await.unwrap();

    let by_code = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(by_code.id, created.id);

    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(by_id.short_code, "abc123");

    assert!(repo.find_by_code("missing").await.unwrap().is_none());
    assert!(repo.find_by_id(created.id + 1).await.unwrap().is_none());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_by_hash_skips_custom_links(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    repo.create(new_link("alias", "h1", true)).await.unwrap();

    assert!(repo.find_by_hash("h1").await.unwrap().is_none());

    repo.create(new_link("generated", "h1", false)).await.unwrap();
    let found = repo.find_by_hash("h1").await.unwrap().unwrap();
    assert_eq!(found.short_code, "generated");
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_is_unique_violation(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    repo.create(new_link("dup", "h1", false)).await.unwrap();

    let err = repo.create(new_link("dup", "h2", true)).await.unwrap_err();

    assert_eq!(
        constraint_of(err).as_deref(),
        Some("short_links_short_code_key")
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_hash_is_unique_violation(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool));
    repo.create(new_link("first", "h1", false)).await.unwrap();

    let err = repo.create(new_link("second", "h1", false)).await.unwrap_err();

    assert_eq!(
        constraint_of(err).as_deref(),
        Some("short_links_canonical_hash_key")
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_custom_links_share_hash(pool: PgPool) {
    let repo = PgShortLinkRepository::new(Arc::new(pool.clone()));
    repo.create(new_link("first", "h1", false)).await.unwrap();
    repo.create(new_link("alias-a", "h1", true)).await.unwrap();
    repo.create(new_link("alias-b", "h1", true)).await.unwrap();

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_links WHERE canonical_hash = $1")
        .bind("h1")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}
