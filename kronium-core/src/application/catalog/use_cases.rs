//! Service catalog use cases

use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::catalog::{IServiceRepository, Service, ServiceForm, ServiceId, ServiceQuery};
use crate::domain::errors::DomainError;
use crate::domain::storage::{ObjectStorage, StoredObject, UploadPolicy, service_image_path};

pub struct ListServicesUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl ListServicesUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: ServiceQuery) -> Result<Vec<Service>, ApplicationError> {
        let services = self.service_repository.list().await?;
        Ok(services.into_iter().filter(|s| query.matches(s)).collect())
    }
}

pub struct GetServiceUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl GetServiceUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    pub async fn execute(&self, service_id: ServiceId) -> Result<Service, ApplicationError> {
        find_service(self.service_repository.as_ref(), service_id).await
    }
}

pub struct CreateServiceUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl CreateServiceUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    #[tracing::instrument(skip(self, form), fields(title = %form.title))]
    pub async fn execute(&self, form: ServiceForm) -> Result<Service, ApplicationError> {
        let service = Service::new(form.validate()?);
        self.service_repository.create(&service).await?;

        tracing::info!(service_id = %service.service_id, "Service created");
        Ok(service)
    }
}

pub struct UpdateServiceUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl UpdateServiceUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    #[tracing::instrument(skip(self, form), fields(service_id = %service_id))]
    pub async fn execute(
        &self,
        service_id: ServiceId,
        form: ServiceForm,
    ) -> Result<Service, ApplicationError> {
        let draft = form.validate()?;

        let mut service = find_service(self.service_repository.as_ref(), service_id).await?;
        service.apply(draft);
        self.service_repository.update(&service).await?;

        Ok(service)
    }
}

pub struct DeleteServiceUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl DeleteServiceUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    #[tracing::instrument(skip(self), fields(service_id = %service_id))]
    pub async fn execute(&self, service_id: ServiceId) -> Result<(), ApplicationError> {
        self.service_repository.delete(&service_id).await?;
        tracing::info!("Service deleted");
        Ok(())
    }
}

/// Flip a service between active and inactive
pub struct ToggleServiceActiveUseCase {
    service_repository: Arc<dyn IServiceRepository>,
}

impl ToggleServiceActiveUseCase {
    pub fn new(service_repository: Arc<dyn IServiceRepository>) -> Self {
        Self { service_repository }
    }

    #[tracing::instrument(skip(self), fields(service_id = %service_id))]
    pub async fn execute(&self, service_id: ServiceId) -> Result<Service, ApplicationError> {
        let service = find_service(self.service_repository.as_ref(), service_id).await?;
        let updated = self
            .service_repository
            .set_active(&service_id, !service.is_active)
            .await?;
        Ok(updated)
    }
}

/// Validate and store a service image
pub struct UploadServiceImageUseCase {
    storage: Arc<dyn ObjectStorage>,
    policy: UploadPolicy,
}

impl UploadServiceImageUseCase {
    pub fn new(storage: Arc<dyn ObjectStorage>, policy: UploadPolicy) -> Self {
        Self { storage, policy }
    }

    #[tracing::instrument(skip(self, body), fields(content_type = %content_type, size = body.len()))]
    pub async fn execute(
        &self,
        content_type: &str,
        body: Bytes,
    ) -> Result<StoredObject, ApplicationError> {
        let extension = self.policy.check(content_type, body.len())?;
        let path = service_image_path(Utc::now(), extension);

        let stored = self.storage.put(&path, body, content_type).await?;
        tracing::info!(path = %stored.path, "Service image uploaded");
        Ok(stored)
    }
}

async fn find_service(
    repository: &dyn IServiceRepository,
    service_id: ServiceId,
) -> Result<Service, ApplicationError> {
    repository
        .find_by_id(&service_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Service", service_id).into())
}
