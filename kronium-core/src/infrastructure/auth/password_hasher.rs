//! Password hashing service using Argon2id (OWASP-recommended)

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash as Argon2Hash, PasswordHasher as Argon2Hasher, PasswordVerifier, SaltString,
        rand_core::OsRng,
    },
};

use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::domain::auth::{errors::AuthError, value_objects::PasswordHash};

/// Password hashing service using Argon2id
#[derive(Clone)]
pub struct PasswordHasher {
    params: Params,
    /// Hash verified against when there is no stored hash, created on first use
    dummy_hash: Arc<OnceCell<PasswordHash>>,
}

impl PasswordHasher {
    /// OWASP minimum recommended memory cost: 19 MiB (19,456 KiB)
    const MEMORY_COST: u32 = 19_456;
    const TIME_COST: u32 = 2;
    const PARALLELISM: u32 = 1;
    const OUTPUT_LEN: usize = 32;
    const DUMMY_PASSWORD: &'static str = "kronium-no-such-account";

    pub fn new() -> Self {
        Self::with_params(Self::MEMORY_COST, Self::TIME_COST, Self::PARALLELISM)
    }

    /// Custom cost parameters. Out-of-range values fall back to the Argon2 defaults.
    pub fn with_params(memory_cost: u32, time_cost: u32, parallelism: u32) -> Self {
        let params = Params::new(memory_cost, time_cost, parallelism, Some(Self::OUTPUT_LEN))
            .unwrap_or_else(|e| {
                tracing::warn!("Invalid Argon2 parameters ({}), using defaults", e);
                Params::default()
            });

        Self {
            params,
            dummy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Hash on the blocking pool so Argon2 never stalls the runtime
    pub async fn hash(&self, password: String) -> Result<PasswordHash, AuthError> {
        let params = self.params.clone();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|e| {
            tracing::error!("Password hash task panicked: {}", e);
            AuthError::PasswordHashing
        })?
        .map(PasswordHash::from)
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            AuthError::PasswordHashing
        })
    }

    /// Verify on the blocking pool. A malformed stored hash never verifies.
    pub async fn verify(&self, password: String, hash: PasswordHash) -> Result<bool, AuthError> {
        tokio::task::spawn_blocking(move || {
            let Ok(parsed_hash) = Argon2Hash::new(hash.as_str()) else {
                tracing::error!("Stored password hash is not in PHC format");
                return false;
            };

            // Parameters are read back from the PHC string
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await
        .map_err(|e| {
            tracing::error!("Password verify task panicked: {}", e);
            AuthError::PasswordHashing
        })
    }
}

impl PasswordHasher {
    /// Spend the same Argon2 work as [`verify`](Self::verify) for an account with no usable hash.
    /// Never succeeds.
    pub async fn verify_dummy(&self, password: String) -> Result<(), AuthError> {
        let hash = self
            .dummy_hash
            .get_or_try_init(|| self.hash(Self::DUMMY_PASSWORD.to_string()))
            .await?
            .clone();
        self.verify(password, hash).await?;
        Ok(())
    }

    /// Whether the dummy hash has been created yet
    pub fn dummy_hash_ready(&self) -> bool {
        self.dummy_hash.initialized()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
