use std::sync::Arc;

use minbar_domain::member::UserProfile;
use minbar_domain::session::{Session, SessionRepository};
use minbar_infrastructure::persistence::{Database, SqliteSessionRepository};

#[tokio::test]
async fn session_repo_roundtrip_in_memory() {
    let db = Database::in_memory().await.expect("open in-memory db");
    let repo = SqliteSessionRepository::new(Arc::new(db.pool().clone()));

    // nothing persisted yet
    assert!(repo.load().await.expect("load").is_none());

    let mut session = Session::new("http://10.0.0.5:5000").expect("session");
    session
        .sign_in(
            "token_abc".to_string(),
            Some(UserProfile {
                id: "admin".to_string(),
                name: Some("Admin".to_string()),
                email: Some("admin@example.org".to_string()),
                phone: None,
            }),
        )
        .expect("sign in");

    repo.save(&session).await.expect("save session");

    let fetched = repo.load().await.expect("load").expect("should exist");
    assert_eq!(fetched.server_url(), "http://10.0.0.5:5000");
    assert_eq!(fetched.auth_token(), Some("token_abc"));
    assert_eq!(fetched.user().unwrap().id, "admin");

    // last writer wins: sign out and overwrite
    session.sign_out();
    repo.save(&session).await.expect("save signed-out");

    let fetched = repo.load().await.expect("load").expect("still exists");
    assert!(fetched.auth_token().is_none());
    assert!(fetched.user().is_none());
    assert_eq!(fetched.server_url(), "http://10.0.0.5:5000");

    repo.clear().await.expect("clear");
    assert!(repo.load().await.expect("load").is_none());
}

#[tokio::test]
async fn session_repo_survives_reopen_on_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let db_path = dir.path().join("minbar.db");
    let db_path = db_path.to_str().expect("utf8 path");

    {
        let db = Database::new(db_path).await.expect("open db");
        let repo = SqliteSessionRepository::new(Arc::new(db.pool().clone()));
        let session = Session::new("http://192.168.1.20:5000").expect("session");
        repo.save(&session).await.expect("save");
    }

    // a fresh pool over the same file sees the session, like a restarted app
    let db = Database::new(db_path).await.expect("reopen db");
    let repo = SqliteSessionRepository::new(Arc::new(db.pool().clone()));
    let fetched = repo.load().await.expect("load").expect("persisted");
    assert_eq!(fetched.server_url(), "http://192.168.1.20:5000");
    assert!(!fetched.is_signed_in());
}

#[tokio::test]
async fn session_repo_tolerates_corrupt_user_blob() {
    let db = Database::in_memory().await.expect("open in-memory db");

    sqlx::query(
        "INSERT INTO session (id, server_url, auth_token, user_json, updated_at)
         VALUES (1, 'http://10.0.0.5:5000', 'tok', 'not-json{', '2026-08-07T00:00:00Z')",
    )
    .execute(db.pool())
    .await
    .expect("seed corrupt row");

    let repo = SqliteSessionRepository::new(Arc::new(db.pool().clone()));
    let session = repo.load().await.expect("load").expect("row exists");

    // the unreadable profile degrades to no user; the token survives
    assert!(session.user().is_none());
    assert_eq!(session.auth_token(), Some("tok"));
}
