//! Project entities

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

use super::value_objects::{ProjectId, ProjectStatus};
use crate::domain::auth::UserId;

/// A customer project (installation, construction or similar long-running job)
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub project_id: ProjectId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub location: String,
    pub budget: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Owner projection joined onto a project
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectOwner {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectDetails {
    pub project: Project,
    pub owner: Option<ProjectOwner>,
}

/// Filter applied to the project list
#[derive(Debug, Clone, Default)]
pub struct ProjectQuery {
    /// Matched case-insensitively against title, description, location and owner name
    pub search: Option<String>,
    pub status: Option<ProjectStatus>,
}

impl ProjectQuery {
    pub fn matches(&self, details: &ProjectDetails) -> bool {
        if let Some(status) = self.status
            && details.project.status != status
        {
            return false;
        }

        let Some(term) = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return true;
        };
        let term = term.to_lowercase();
        let project = &details.project;

        project.title.to_lowercase().contains(&term)
            || project.description.to_lowercase().contains(&term)
            || project.location.to_lowercase().contains(&term)
            || details
                .owner
                .as_ref()
                .is_some_and(|o| o.name.to_lowercase().contains(&term))
    }
}

/// Per-status tallies shown above the project list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStatusCounts {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub on_hold: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl ProjectStatusCounts {
    pub fn tally<'a>(projects: impl IntoIterator<Item = &'a ProjectDetails>) -> Self {
        projects
            .into_iter()
            .fold(Self::default(), |mut counts, details| {
                counts.total += 1;
                match details.project.status {
                    ProjectStatus::Pending => counts.pending += 1,
                    ProjectStatus::Active => counts.active += 1,
                    ProjectStatus::OnHold => counts.on_hold += 1,
                    ProjectStatus::Completed => counts.completed += 1,
                    ProjectStatus::Cancelled => counts.cancelled += 1,
                }
                counts
            })
    }
}
