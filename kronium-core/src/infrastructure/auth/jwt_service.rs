//! JWT service for token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

use crate::domain::auth::{
    errors::AuthError,
    value_objects::{AuthToken, Email, UserId, UserRole},
};

/// Signs and verifies HS256 session tokens
#[derive(Clone)]
pub struct JwtService {
    secret: Arc<String>,
    access_token_ttl_hours: u64,
    refresh_token_ttl_hours: u64,
}

impl JwtService {
    pub fn new(secret: String, access_token_ttl_hours: u64, refresh_token_ttl_hours: u64) -> Self {
        Self {
            secret: Arc::new(secret),
            access_token_ttl_hours,
            refresh_token_ttl_hours,
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl_seconds(&self) -> u64 {
        self.access_token_ttl_hours * 3600
    }

    pub fn generate_access_token(
        &self,
        user_id: UserId,
        email: &Email,
        role: UserRole,
    ) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.access_token_ttl_hours as i64);

        let claims = AuthToken::new_access(
            user_id,
            email,
            role,
            exp.timestamp() as usize,
            now.timestamp() as usize,
        );

        self.encode(&claims)
    }

    pub fn generate_refresh_token(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.refresh_token_ttl_hours as i64);

        let claims =
            AuthToken::new_refresh(user_id, exp.timestamp() as usize, now.timestamp() as usize);

        self.encode(&claims)
    }

    /// Validate signature and expiry and decode the claims
    pub fn validate_token(&self, token: &str) -> Result<AuthToken, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        decode::<AuthToken>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })
    }

    fn encode(&self, claims: &AuthToken) -> Result<String, AuthError> {
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());
        encode(&Header::default(), claims, &encoding_key).map_err(|e| {
            tracing::error!("Failed to encode {} token: {}", claims.typ, e);
            AuthError::InvalidToken
        })
    }
}
