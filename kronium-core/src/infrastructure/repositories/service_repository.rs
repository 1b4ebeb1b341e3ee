//! SQLx implementation of the service catalogue repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::database_error;
use crate::domain::catalog::{IServiceRepository, Service, ServiceId};
use crate::domain::errors::DomainError;

const SERVICE_COLUMNS: &str = r#"
    id, title, description, price, category, image_url, image_path,
    is_active, features, duration, location, created_at, updated_at
"#;

#[derive(sqlx::FromRow)]
struct ServiceRow {
    id: Uuid,
    title: String,
    description: String,
    price: Decimal,
    category: String,
    image_url: Option<String>,
    image_path: Option<String>,
    is_active: bool,
    features: Vec<String>,
    duration: Option<String>,
    location: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Service {
            service_id: ServiceId::from(row.id),
            title: row.title,
            description: row.description,
            price: row.price,
            category: row.category,
            image_url: row.image_url,
            image_path: row.image_path,
            is_active: row.is_active,
            features: row.features,
            duration: row.duration,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

pub struct SqlxServiceRepository {
    pool: Arc<PgPool>,
}

impl SqlxServiceRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IServiceRepository for SqlxServiceRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Service>, DomainError> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services ORDER BY created_at DESC");
        let rows = sqlx::query_as::<_, ServiceRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("services", "listing services", e))?;

        Ok(rows.into_iter().map(Service::from).collect())
    }

    #[tracing::instrument(skip(self), fields(service_id = %service_id))]
    async fn find_by_id(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError> {
        let sql = format!("SELECT {SERVICE_COLUMNS} FROM services WHERE id = $1");
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(service_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("services", "finding service", e))?;

        Ok(row.map(Service::from))
    }

    #[tracing::instrument(skip(self, service), fields(service_id = %service.service_id))]
    async fn create(&self, service: &Service) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO services (
                id, title, description, price, category, image_url, image_path,
                is_active, features, duration, location, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
        )
        .bind(service.service_id.as_uuid())
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.price)
        .bind(&service.category)
        .bind(&service.image_url)
        .bind(&service.image_path)
        .bind(service.is_active)
        .bind(&service.features)
        .bind(&service.duration)
        .bind(&service.location)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| database_error("services", "creating service", e))?;

        Ok(())
    }

    #[tracing::instrument(skip(self, service), fields(service_id = %service.service_id))]
    async fn update(&self, service: &Service) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET title = $2, description = $3, price = $4, category = $5,
                image_url = $6, image_path = $7, is_active = $8, features = $9,
                duration = $10, location = $11, updated_at = $12
            WHERE id = $1
            "#,
        )
        .bind(service.service_id.as_uuid())
        .bind(&service.title)
        .bind(&service.description)
        .bind(service.price)
        .bind(&service.category)
        .bind(&service.image_url)
        .bind(&service.image_path)
        .bind(service.is_active)
        .bind(&service.features)
        .bind(&service.duration)
        .bind(&service.location)
        .bind(service.updated_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| database_error("services", "updating service", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Service", service.service_id));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(service_id = %service_id))]
    async fn set_active(
        &self,
        service_id: &ServiceId,
        is_active: bool,
    ) -> Result<Service, DomainError> {
        let sql = format!(
            "UPDATE services SET is_active = $2, updated_at = NOW() WHERE id = $1 RETURNING {SERVICE_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(service_id.as_uuid())
            .bind(is_active)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("services", "toggling service", e))?;

        row.map(Service::from)
            .ok_or_else(|| DomainError::not_found("Service", service_id))
    }

    #[tracing::instrument(skip(self), fields(service_id = %service_id))]
    async fn delete(&self, service_id: &ServiceId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(service_id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| database_error("services", "deleting service", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found("Service", service_id));
        }

        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM services")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| database_error("services", "counting services", e))
    }
}
