mod common;

use common::{new_api, register, PASSWORD};
use workshift::api::ApiError;

#[tokio::test]
async fn test_register_returns_profile() {
    let api = new_api().await;
    let user = api
        .register("ada", "Ada@Example.com", PASSWORD, "Ada Lovelace")
        .await
        .unwrap();

    assert_eq!(user.username, "ada");
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.display_name, "Ada Lovelace");
}

#[tokio::test]
async fn test_display_name_defaults_to_username() {
    let api = new_api().await;
    let user = api.register("grace", "grace@example.com", PASSWORD, "  ").await.unwrap();
    assert_eq!(user.display_name, "grace");
}

#[tokio::test]
async fn test_duplicate_username_and_email_conflict() {
    let api = new_api().await;
    register(&api, "ada").await;

    let err = api.register("ada", "other@example.com", PASSWORD, "").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
    assert_eq!(err.status_code(), 409);

    // Emails compare case-insensitively
    let err = api.register("ada2", "ADA@example.com", PASSWORD, "").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[tokio::test]
async fn test_register_validation() {
    let api = new_api().await;

    for (username, email, password) in [
        ("al", "al@example.com", PASSWORD),
        ("bad name", "bad@example.com", PASSWORD),
        ("carol", "not-an-email", PASSWORD),
        ("dave", "dave@example.com", "short"),
    ] {
        let err = api.register(username, email, password, "").await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)), "{} should be rejected", username);
        assert_eq!(err.status_code(), 400);
    }
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let api = new_api().await;
    let user = register(&api, "ada").await;

    let session = api.login("ada", PASSWORD).await.unwrap();
    assert_eq!(session.user.id, user.id);

    let second = api.login("ADA@example.com", PASSWORD).await.unwrap();
    assert_eq!(second.user.id, user.id);
    assert_ne!(session.token, second.token);
}

#[tokio::test]
async fn test_login_rejects_wrong_credentials() {
    let api = new_api().await;
    register(&api, "ada").await;

    let err = api.login("ada", "wrong-password").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert_eq!(err.status_code(), 401);

    let err = api.login("nobody", PASSWORD).await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
    assert!(api.current_user().await.is_none());
}

#[tokio::test]
async fn test_logout_ends_session() {
    let api = new_api().await;
    register(&api, "ada").await;
    api.login("ada", PASSWORD).await.unwrap();
    assert_eq!(api.current_user().await.unwrap().username, "ada");

    assert!(api.logout().await);
    assert!(!api.logout().await);
    assert!(api.current_user().await.is_none());

    let err = api.list_boards().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(_)));
}

#[tokio::test]
async fn test_operations_require_session() {
    let api = new_api().await;

    assert!(matches!(
        api.create_board("Board", None, None).await,
        Err(ApiError::Unauthorized(_))
    ));
    assert!(matches!(api.get_board(1).await, Err(ApiError::Unauthorized(_))));
    assert!(matches!(api.create_card(1, "Card").await, Err(ApiError::Unauthorized(_))));
}

#[tokio::test]
async fn test_snapshot_keeps_password_hash_not_password() {
    let api = new_api().await;
    register(&api, "ada").await;

    let snapshot = api.snapshot().await.unwrap();
    let hash = &snapshot.users[0].password_hash;
    assert!(hash.starts_with("sha256$"));
    assert!(!hash.contains(PASSWORD));
}

#[tokio::test]
async fn test_usernames_are_case_insensitive() {
    let api = new_api().await;
    let user = api.register("Ada", "ada@example.com", PASSWORD, "").await.unwrap();
    assert_eq!(user.username, "ada");

    let err = api.register("ADA", "other@example.com", PASSWORD, "").await.unwrap_err();
    assert!(matches!(err, ApiError::Conflict(_)));

    let session = api.login("aDa", PASSWORD).await.unwrap();
    assert_eq!(session.user.id, user.id);
}
