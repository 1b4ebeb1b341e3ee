//! Authentication use cases

use std::str::FromStr;
use std::sync::Arc;

use crate::domain::auth::{
    entities::AdminSession,
    errors::AuthError,
    repositories::IUserRepository,
    value_objects::{Email, UserRole},
};
use crate::infrastructure::auth::{JwtService, PasswordHasher};

/// Tokens and session issued on a successful console sign-in
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub access_token: String,
    pub refresh_token: String,
    pub session: AdminSession,
}

/// Sign in to the console. Only admins are admitted.
pub struct LoginUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl LoginUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            jwt_service,
        }
    }

    #[tracing::instrument(skip(self, password), fields(email = %email))]
    pub async fn execute(&self, email: Email, password: String) -> Result<LoginResult, AuthError> {
        // Unknown accounts cost the same Argon2 work as a wrong password
        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            self.password_hasher.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        let Some(password_hash) = user.password_hash.clone() else {
            tracing::info!(user_id = %user.user_id, "Sign-in attempt for account without console credentials");
            self.password_hasher.verify_dummy(password).await?;
            return Err(AuthError::InvalidCredentials);
        };

        if !self.password_hasher.verify(password, password_hash).await? {
            return Err(AuthError::InvalidCredentials);
        }

        // Role check follows password verification
        let session = AdminSession::open(user.user_id, user.email.clone(), user.role)
            .ok_or_else(|| {
                tracing::warn!(user_id = %user.user_id, role = %user.role, "Non-admin sign-in refused");
                AuthError::AccessDenied
            })?;

        let access_token =
            self.jwt_service
                .generate_access_token(session.user_id, &session.email, session.role)?;
        let refresh_token = self.jwt_service.generate_refresh_token(session.user_id)?;

        tracing::info!(user_id = %session.user_id, "Admin signed in");

        Ok(LoginResult {
            access_token,
            refresh_token,
            session,
        })
    }
}

/// Turn an access token back into an admin session
pub struct ValidateTokenUseCase {
    jwt_service: Arc<JwtService>,
}

impl ValidateTokenUseCase {
    pub fn new(jwt_service: Arc<JwtService>) -> Self {
        Self { jwt_service }
    }

    pub fn execute(&self, token: &str) -> Result<AdminSession, AuthError> {
        let claims = self.jwt_service.validate_token(token)?;

        if !claims.is_access_token() {
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
        let email = Email::new(claims.email).map_err(|_| AuthError::InvalidToken)?;
        let role = UserRole::from_str(&claims.role).map_err(|_| AuthError::InvalidToken)?;

        AdminSession::open(user_id, email, role).ok_or(AuthError::AccessDenied)
    }
}

/// Issue a fresh access token from a refresh token
pub struct RefreshTokenUseCase {
    jwt_service: Arc<JwtService>,
    user_repository: Arc<dyn IUserRepository>,
}

impl RefreshTokenUseCase {
    pub fn new(jwt_service: Arc<JwtService>, user_repository: Arc<dyn IUserRepository>) -> Self {
        Self {
            jwt_service,
            user_repository,
        }
    }

    pub async fn execute(&self, refresh_token: &str) -> Result<String, AuthError> {
        let claims = self.jwt_service.validate_token(refresh_token)?;

        if !claims.is_refresh_token() {
            return Err(AuthError::InvalidToken);
        }

        let user_id = claims.user_id().map_err(|_| AuthError::InvalidToken)?;
        let user = self
            .user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| AuthError::UserIdNotFound {
                user_id: user_id.as_str(),
            })?;

        // Role is re-read from the store on every refresh
        if !user.is_admin() {
            return Err(AuthError::AccessDenied);
        }

        self.jwt_service
            .generate_access_token(user.user_id, &user.email, user.role)
    }
}
