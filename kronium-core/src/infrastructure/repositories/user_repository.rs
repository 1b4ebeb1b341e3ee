//! SQLx implementation of the user repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{corrupt_column, database_error};
use crate::domain::auth::{Email, IUserRepository, PasswordHash, User, UserId, UserRole};
use crate::domain::errors::DomainError;

const USER_COLUMNS: &str = r#"
    u.id, u.simple_id, u.name, u.email, u.phone, u.profile_image, u.address,
    u.role, u.is_active, u.favorite_services, u.password_hash, u.created_at, u.updated_at
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    simple_id: Option<String>,
    name: String,
    email: String,
    phone: String,
    profile_image: Option<String>,
    address: Option<String>,
    role: String,
    is_active: bool,
    favorite_services: Vec<Uuid>,
    password_hash: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = DomainError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(row.email).map_err(|e| corrupt_column("users", "email", e))?;
        let role = row
            .role
            .parse::<UserRole>()
            .map_err(|e| corrupt_column("users", "role", e))?;

        Ok(User {
            user_id: UserId::from(row.id),
            simple_id: row.simple_id,
            name: row.name,
            email,
            phone: row.phone,
            profile_image: row.profile_image,
            address: row.address,
            role,
            is_active: row.is_active,
            favorite_services: row.favorite_services,
            password_hash: row.password_hash.map(PasswordHash::from),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn into_users(rows: Vec<UserRow>) -> Result<Vec<User>, DomainError> {
    rows.into_iter().map(User::try_from).collect()
}

/// SQLx implementation of the user repository
pub struct SqlxUserRepository {
    pool: Arc<PgPool>,
}

impl SqlxUserRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IUserRepository for SqlxUserRepository {
    #[tracing::instrument(skip(self), fields(email = %email.as_str()))]
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("users", "finding user by email", e))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u WHERE u.id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("users", "finding user", e))?;

        row.map(User::try_from).transpose()
    }

    #[tracing::instrument(skip(self, user), fields(user_id = %user.user_id, email = %user.email.as_str()))]
    async fn create(&self, user: &User) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, simple_id, name, email, phone, profile_image, address,
                role, is_active, favorite_services, password_hash, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.simple_id)
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.phone)
        .bind(&user.profile_image)
        .bind(&user.address)
        .bind(user.role.as_str())
        .bind(user.is_active)
        .bind(&user.favorite_services)
        .bind(user.password_hash.as_ref().map(PasswordHash::as_str))
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error()
                && db_err.constraint() == Some("users_email_key")
            {
                tracing::warn!(email = %user.email.as_str(), "Email already registered");
                return DomainError::conflict(format!(
                    "A user with email {} already exists",
                    user.email.as_str()
                ));
            }
            database_error("users", "creating user", e)
        })?;

        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u ORDER BY u.created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("users", "listing users", e))?;

        into_users(rows)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users u ORDER BY u.created_at DESC LIMIT $1");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .bind(limit)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("users", "listing recent users", e))?;

        into_users(rows)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| database_error("users", "counting users", e))
    }

    #[tracing::instrument(skip(self))]
    async fn customers_with_bookings(&self) -> Result<Vec<User>, DomainError> {
        let sql = format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users u
            WHERE EXISTS (SELECT 1 FROM bookings b WHERE b.user_id = u.id)
            ORDER BY u.name ASC
            "#
        );
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("users", "listing customers with bookings", e))?;

        into_users(rows)
    }
}
