//! Project management use cases

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::errors::DomainError;
use crate::domain::projects::{
    IProjectRepository, ProjectDetails, ProjectId, ProjectQuery, ProjectStatus,
    ProjectStatusCounts,
};

/// Filtered projects plus tallies over the unfiltered set
#[derive(Debug, Clone)]
pub struct ProjectList {
    pub projects: Vec<ProjectDetails>,
    pub counts: ProjectStatusCounts,
}

pub struct ListProjectsUseCase {
    project_repository: Arc<dyn IProjectRepository>,
}

impl ListProjectsUseCase {
    pub fn new(project_repository: Arc<dyn IProjectRepository>) -> Self {
        Self { project_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: ProjectQuery) -> Result<ProjectList, ApplicationError> {
        let all = self.project_repository.list().await?;
        let counts = ProjectStatusCounts::tally(&all);
        let projects = all.into_iter().filter(|p| query.matches(p)).collect();

        Ok(ProjectList { projects, counts })
    }
}

pub struct UpdateProjectStatusUseCase {
    project_repository: Arc<dyn IProjectRepository>,
}

impl UpdateProjectStatusUseCase {
    pub fn new(project_repository: Arc<dyn IProjectRepository>) -> Self {
        Self { project_repository }
    }

    #[tracing::instrument(skip(self), fields(project_id = %project_id, to = %status))]
    pub async fn execute(
        &self,
        project_id: ProjectId,
        status: ProjectStatus,
    ) -> Result<ProjectDetails, ApplicationError> {
        let mut details = self
            .project_repository
            .find_by_id(&project_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", project_id))?;

        if details.project.status == status {
            return Err(
                DomainError::conflict(format!("project is already '{}'", status)).into(),
            );
        }

        if !self
            .project_repository
            .update_status(&project_id, status)
            .await?
        {
            return Err(DomainError::not_found("Project", project_id).into());
        }

        details.project.status = status;
        details.project.updated_at = chrono::Utc::now();
        Ok(details)
    }
}

pub struct DeleteProjectUseCase {
    project_repository: Arc<dyn IProjectRepository>,
}

impl DeleteProjectUseCase {
    pub fn new(project_repository: Arc<dyn IProjectRepository>) -> Self {
        Self { project_repository }
    }

    #[tracing::instrument(skip(self), fields(project_id = %project_id))]
    pub async fn execute(&self, project_id: ProjectId) -> Result<(), ApplicationError> {
        if !self.project_repository.delete(&project_id).await? {
            return Err(DomainError::not_found("Project", project_id).into());
        }
        tracing::info!("Project deleted");
        Ok(())
    }
}
