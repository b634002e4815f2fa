use std::sync::Arc;

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::{Duration, Utc};
use retoken::{AccountId, BearerToken, Retoken, SqliteTokenRepository};

async fn setup_retoken() -> Retoken<SqliteTokenRepository> {
    let repository = Arc::new(
        SqliteTokenRepository::connect("sqlite::memory:")
            .await
            .unwrap(),
    );
    repository.migrate().await.unwrap();
    Retoken::new(repository)
}

fn make_token_expiring_at(exp: i64) -> BearerToken {
    let header = BASE64_URL_SAFE_NO_PAD.encode(br#"{"alg":"EdDSA","typ":"JWT"}"#);
    let payload = BASE64_URL_SAFE_NO_PAD.encode(serde_json::json!({ "exp": exp }).to_string());
    BearerToken::new(&format!("{header}.{payload}.sig"))
}

#[tokio::test]
async fn test_sqlite_token_reuse_lifecycle() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let retoken = setup_retoken().await;
    let account = AccountId::new("A");
    let token = make_token_expiring_at((Utc::now() + Duration::hours(1)).timestamp());

    // No record yet
    assert!(retoken.get_reusable_token(&account).await.is_none());

    // A successful login stored its token; the exact value comes back
    retoken.save_token(&account, &token).await.unwrap();
    assert_eq!(retoken.get_reusable_token(&account).await, Some(token));

    // The login service rejected the token; the record is gone
    retoken.invalidate_token(&account).await.unwrap();
    assert!(retoken.get_reusable_token(&account).await.is_none());
}

#[tokio::test]
async fn test_sqlite_expired_token_is_not_reused() {
    let retoken = setup_retoken().await;
    let account = AccountId::new("B");
    let expired = make_token_expiring_at((Utc::now() - Duration::seconds(10)).timestamp());

    retoken.save_token(&account, &expired).await.unwrap();

    // A record exists, but it is past its expiry
    assert!(retoken.get_reusable_token(&account).await.is_none());
}

#[tokio::test]
async fn test_sqlite_save_replaces_previous_token() {
    let retoken = setup_retoken().await;
    let account = AccountId::new("A");
    let first = make_token_expiring_at((Utc::now() + Duration::hours(1)).timestamp());
    let second = make_token_expiring_at((Utc::now() + Duration::hours(2)).timestamp());

    retoken.save_token(&account, &first).await.unwrap();
    retoken.save_token(&account, &second).await.unwrap();

    assert_eq!(retoken.get_reusable_token(&account).await, Some(second));
}

#[tokio::test]
async fn test_sqlite_malformed_stored_token_falls_back() {
    let retoken = setup_retoken().await;
    let account = AccountId::new("A");

    retoken
        .save_token(&account, &BearerToken::new("garbage-from-an-old-version"))
        .await
        .unwrap();

    assert!(retoken.get_reusable_token(&account).await.is_none());

    // A later successful login overwrites the malformed record
    let token = make_token_expiring_at((Utc::now() + Duration::hours(1)).timestamp());
    retoken.save_token(&account, &token).await.unwrap();
    assert_eq!(retoken.get_reusable_token(&account).await, Some(token));
}

#[tokio::test]
async fn test_sqlite_detached_writes() {
    let retoken = setup_retoken().await;
    let account = AccountId::new("A");
    let token = make_token_expiring_at((Utc::now() + Duration::hours(1)).timestamp());

    retoken
        .save_token_detached(&account, &token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(retoken.get_reusable_token(&account).await, Some(token));

    retoken
        .invalidate_token_detached(&account)
        .await
        .unwrap()
        .unwrap();
    assert!(retoken.get_reusable_token(&account).await.is_none());
}
