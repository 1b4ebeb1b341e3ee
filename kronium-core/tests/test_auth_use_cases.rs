//! Console sign-in and token refresh

mod common;

use common::*;
use kronium_core::application::auth::{LoginUseCase, RefreshTokenUseCase, ValidateTokenUseCase};
use kronium_core::domain::auth::{AuthError, Email, UserRole};
use kronium_core::infrastructure::auth::{JwtService, PasswordHasher};
use std::sync::Arc;

const SECRET: &str = "integration-test-secret-0123456789";

struct Harness {
    users: Arc<MockUserRepository>,
    hasher: Arc<PasswordHasher>,
    jwt: Arc<JwtService>,
    login: LoginUseCase,
}

async fn harness() -> Harness {
    let hasher = Arc::new(PasswordHasher::with_params(4096, 1, 1));
    let hash = hasher.hash("correct horse battery".to_string()).await.unwrap();

    let users = Arc::new(MockUserRepository::with_users(vec![
        user("admin@kronium.test", UserRole::Admin, Some(hash.clone())),
        user("manager@kronium.test", UserRole::Manager, Some(hash)),
        user("customer@kronium.test", UserRole::Customer, None),
    ]));
    let jwt = Arc::new(JwtService::new(SECRET.to_string(), 1, 24));
    let login = LoginUseCase::new(users.clone(), hasher.clone(), jwt.clone());

    Harness {
        users,
        hasher,
        jwt,
        login,
    }
}

fn email(raw: &str) -> Email {
    Email::new(raw.to_string()).unwrap()
}

#[tokio::test]
async fn test_admin_login_issues_tokens_for_an_admin_session() {
    let h = harness().await;

    let result = h
        .login
        .execute(email("admin@kronium.test"), "correct horse battery".to_string())
        .await
        .unwrap();

    let session = ValidateTokenUseCase::new(h.jwt.clone())
        .execute(&result.access_token)
        .unwrap();
    assert_eq!(session.user_id, result.session.user_id);
    assert_eq!(session.role, UserRole::Admin);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_email_look_the_same() {
    let h = harness().await;

    let wrong = h
        .login
        .execute(email("admin@kronium.test"), "nope".to_string())
        .await
        .unwrap_err();
    assert!(!h.hasher.dummy_hash_ready());
    let unknown = h
        .login
        .execute(email("ghost@kronium.test"), "nope".to_string())
        .await
        .unwrap_err();

    assert!(matches!(wrong, AuthError::InvalidCredentials));
    assert!(matches!(unknown, AuthError::InvalidCredentials));
    // The unknown email still went through Argon2
    assert!(h.hasher.dummy_hash_ready());
}

#[tokio::test]
async fn test_non_admin_is_denied_after_valid_password() {
    let h = harness().await;

    let err = h
        .login
        .execute(email("manager@kronium.test"), "correct horse battery".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::AccessDenied));
}

#[tokio::test]
async fn test_account_without_password_cannot_sign_in() {
    let h = harness().await;

    let err = h
        .login
        .execute(email("customer@kronium.test"), String::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert!(h.hasher.dummy_hash_ready());
}

#[tokio::test]
async fn test_refresh_rechecks_role() {
    let h = harness().await;
    let result = h
        .login
        .execute(email("admin@kronium.test"), "correct horse battery".to_string())
        .await
        .unwrap();

    let refresh = RefreshTokenUseCase::new(h.jwt.clone(), h.users.clone());
    assert!(refresh.execute(&result.refresh_token).await.is_ok());

    h.users
        .set_role(&result.session.user_id, UserRole::Customer);
    assert!(matches!(
        refresh.execute(&result.refresh_token).await,
        Err(AuthError::AccessDenied)
    ));

    // Access tokens are not refresh tokens
    assert!(refresh.execute(&result.access_token).await.is_err());
}
