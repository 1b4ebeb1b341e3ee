//! Authentication value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// User ID value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Create a new UserId from UUID
    pub fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Generate a new random UserId
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Get as string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl From<Uuid> for UserId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<UserId> for Uuid {
    fn from(user_id: UserId) -> Self {
        user_id.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email value object with validation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Create a new Email with validation
    pub fn new(email: String) -> Result<Self, String> {
        let email = email.trim().to_lowercase();

        if email.is_empty() {
            return Err("Email cannot be empty".to_string());
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err("Invalid email format: missing @ symbol".to_string());
        };

        if domain.contains('@') {
            return Err("Invalid email format: multiple @ symbols".to_string());
        }

        if local.is_empty() {
            return Err("Invalid email format: empty local part".to_string());
        }

        if domain.is_empty() || !domain.contains('.') {
            return Err("Invalid email format: domain must contain a dot".to_string());
        }

        if email.len() > 255 {
            return Err("Email too long (max 255 characters)".to_string());
        }

        Ok(Email(email))
    }

    /// Get the inner string value
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get as owned string
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for Email {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Password hash value object (never exposes raw hash)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    /// Get the hash for verification (internal use only)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

// Intentionally not implementing Display or Serialize to prevent accidental exposure
impl From<String> for PasswordHash {
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

/// Role stored on every user row
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Books services through the customer app
    #[default]
    Customer,
    /// Full console access
    Admin,
    Manager,
    /// Field staff assigned to bookings
    Technician,
}

impl UserRole {
    pub fn all() -> Vec<UserRole> {
        vec![
            UserRole::Customer,
            UserRole::Admin,
            UserRole::Manager,
            UserRole::Technician,
        ]
    }

    /// Only admins may sign in to the console
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Admin => "admin",
            UserRole::Manager => "manager",
            UserRole::Technician => "technician",
        }
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "customer" => Ok(UserRole::Customer),
            "admin" => Ok(UserRole::Admin),
            "manager" => Ok(UserRole::Manager),
            "technician" => Ok(UserRole::Technician),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT authentication token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// Subject (user_id)
    pub sub: String,
    pub email: String,
    pub role: String,
    /// Expiration timestamp (Unix time)
    pub exp: usize,
    /// Issued at timestamp (Unix time)
    pub iat: usize,
    /// Token type: "access" or "refresh"
    pub typ: String,
}

impl AuthToken {
    pub fn new_access(user_id: UserId, email: &Email, role: UserRole, exp: usize, iat: usize) -> Self {
        Self {
            sub: user_id.as_str(),
            email: email.as_str().to_string(),
            role: role.to_string(),
            exp,
            iat,
            typ: "access".to_string(),
        }
    }

    /// Refresh tokens carry only the subject; role is re-read on refresh
    pub fn new_refresh(user_id: UserId, exp: usize, iat: usize) -> Self {
        Self {
            sub: user_id.as_str(),
            email: String::new(),
            role: String::new(),
            exp,
            iat,
            typ: "refresh".to_string(),
        }
    }

    pub fn user_id(&self) -> Result<UserId, String> {
        Uuid::parse_str(&self.sub)
            .map(UserId::from)
            .map_err(|e| format!("Invalid user ID in token: {}", e))
    }

    pub fn is_access_token(&self) -> bool {
        self.typ == "access"
    }

    pub fn is_refresh_token(&self) -> bool {
        self.typ == "refresh"
    }
}
