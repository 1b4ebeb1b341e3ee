//! SQLx implementation of the project repository

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::{corrupt_column, database_error};
use crate::domain::auth::UserId;
use crate::domain::errors::DomainError;
use crate::domain::projects::{
    IProjectRepository, Project, ProjectDetails, ProjectId, ProjectOwner, ProjectStatus,
};

const PROJECT_SELECT: &str = r#"
    SELECT
        p.id, p.user_id, p.title, p.description, p.status, p.location, p.budget,
        p.start_date, p.end_date, p.created_at, p.updated_at,
        u.name AS owner_name, u.email AS owner_email
    FROM projects p
    LEFT JOIN users u ON u.id = p.user_id
"#;

#[derive(sqlx::FromRow)]
struct ProjectRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: String,
    status: String,
    location: String,
    budget: Option<Decimal>,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_name: Option<String>,
    owner_email: Option<String>,
}

impl TryFrom<ProjectRow> for ProjectDetails {
    type Error = DomainError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<ProjectStatus>()
            .map_err(|e| corrupt_column("projects", "status", e))?;

        let owner = match (row.owner_name, row.owner_email) {
            (Some(name), Some(email)) => Some(ProjectOwner { name, email }),
            _ => None,
        };

        Ok(ProjectDetails {
            project: Project {
                project_id: ProjectId::from(row.id),
                user_id: UserId::from(row.user_id),
                title: row.title,
                description: row.description,
                status,
                location: row.location,
                budget: row.budget,
                start_date: row.start_date,
                end_date: row.end_date,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            owner,
        })
    }
}

pub struct SqlxProjectRepository {
    pool: Arc<PgPool>,
}

impl SqlxProjectRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IProjectRepository for SqlxProjectRepository {
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<ProjectDetails>, DomainError> {
        let sql = format!("{PROJECT_SELECT} ORDER BY p.created_at DESC");
        let rows = sqlx::query_as::<_, ProjectRow>(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| database_error("projects", "listing projects", e))?;

        rows.into_iter().map(ProjectDetails::try_from).collect()
    }

    #[tracing::instrument(skip(self), fields(project_id = %project_id))]
    async fn find_by_id(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<ProjectDetails>, DomainError> {
        let sql = format!("{PROJECT_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, ProjectRow>(&sql)
            .bind(project_id.as_uuid())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| database_error("projects", "finding project", e))?;

        row.map(ProjectDetails::try_from).transpose()
    }

    #[tracing::instrument(skip(self), fields(project_id = %project_id, status = %status))]
    async fn update_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<bool, DomainError> {
        let result =
            sqlx::query("UPDATE projects SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(project_id.as_uuid())
                .bind(status.as_str())
                .execute(&*self.pool)
                .await
                .map_err(|e| database_error("projects", "updating project status", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self), fields(project_id = %project_id))]
    async fn delete(&self, project_id: &ProjectId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(project_id.as_uuid())
            .execute(&*self.pool)
            .await
            .map_err(|e| database_error("projects", "deleting project", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM projects")
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| database_error("projects", "counting projects", e))
    }
}
