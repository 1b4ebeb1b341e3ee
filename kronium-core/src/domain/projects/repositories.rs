//! Project repository trait

use async_trait::async_trait;

use super::entities::ProjectDetails;
use super::value_objects::{ProjectId, ProjectStatus};
use crate::domain::errors::DomainError;

#[async_trait]
pub trait IProjectRepository: Send + Sync {
    /// All projects joined with their owner, newest first
    async fn list(&self) -> Result<Vec<ProjectDetails>, DomainError>;

    async fn find_by_id(&self, project_id: &ProjectId)
    -> Result<Option<ProjectDetails>, DomainError>;

    /// Returns `false` when no row matched
    async fn update_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<bool, DomainError>;

    /// Returns `false` when no row matched
    async fn delete(&self, project_id: &ProjectId) -> Result<bool, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;
}
