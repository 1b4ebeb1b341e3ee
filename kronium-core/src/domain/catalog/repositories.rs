//! Service repository trait

use async_trait::async_trait;

use super::entities::Service;
use super::value_objects::ServiceId;
use crate::domain::errors::DomainError;

#[async_trait]
pub trait IServiceRepository: Send + Sync {
    /// All services, newest first
    async fn list(&self) -> Result<Vec<Service>, DomainError>;

    async fn find_by_id(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError>;

    async fn create(&self, service: &Service) -> Result<(), DomainError>;

    /// Persist every editable field. `NotFound` if the row is gone.
    async fn update(&self, service: &Service) -> Result<(), DomainError>;

    /// Set `is_active` and return the stored row
    async fn set_active(&self, service_id: &ServiceId, is_active: bool)
    -> Result<Service, DomainError>;

    async fn delete(&self, service_id: &ServiceId) -> Result<(), DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;
}
