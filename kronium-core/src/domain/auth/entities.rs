//! Authentication domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::*;
use crate::domain::errors::{DomainError, optional_field, require_field};

/// A row of the `users` table
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Short human-facing id assigned by the customer app
    pub simple_id: Option<String>,
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub profile_image: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub favorite_services: Vec<Uuid>,
    /// Absent for accounts that have never been given console credentials
    pub password_hash: Option<PasswordHash>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new user from a validated form
    pub fn new(profile: NewUser, password_hash: PasswordHash) -> Self {
        let now = Utc::now();
        Self {
            user_id: UserId::generate(),
            simple_id: None,
            name: profile.name,
            email: profile.email,
            phone: profile.phone,
            profile_image: None,
            address: profile.address,
            role: profile.role,
            is_active: profile.is_active,
            favorite_services: Vec::new(),
            password_hash: Some(password_hash),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_role(&self, role: UserRole) -> bool {
        self.role == role
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Raw user-creation form as submitted by the console
#[derive(Debug, Clone, Default)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated user-creation input
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
}

impl UserForm {
    /// Validate the form before anything is written
    pub fn validate(self) -> Result<NewUser, DomainError> {
        let name = require_field("name", &self.name)?;
        let email = require_field("email", &self.email)?;
        let email = Email::new(email).map_err(|e| DomainError::validation("email", e))?;
        let phone = require_field("phone", &self.phone)?;

        let role = match optional_field(self.role) {
            Some(role) => role
                .parse::<UserRole>()
                .map_err(|e| DomainError::validation("role", e))?,
            None => UserRole::default(),
        };

        Ok(NewUser {
            name,
            email,
            phone,
            address: optional_field(self.address),
            role,
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Identity of the signed-in console operator.
///
/// Created when an admin signs in and carried explicitly into every
/// operation that needs to know who is acting. Dropped on sign-out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub user_id: UserId,
    pub email: Email,
    pub role: UserRole,
}

impl AdminSession {
    /// Open a session for a user, refusing anyone without the admin role
    pub fn open(user_id: UserId, email: Email, role: UserRole) -> Option<Self> {
        role.is_admin().then_some(Self {
            user_id,
            email,
            role,
        })
    }
}

/// Filter applied to the user list
#[derive(Debug, Clone, Default)]
pub struct UserQuery {
    /// Matched case-insensitively against name, email and phone
    pub search: Option<String>,
    pub role: Option<UserRole>,
}

impl UserQuery {
    pub fn matches(&self, user: &User) -> bool {
        if let Some(role) = self.role
            && user.role != role
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                user.name.to_lowercase().contains(&term)
                    || user.email.as_str().contains(&term)
                    || user.phone.contains(&term)
            }
            _ => true,
        }
    }
}
