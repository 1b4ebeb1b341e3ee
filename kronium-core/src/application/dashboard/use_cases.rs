//! Dashboard summary use case

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::auth::{IUserRepository, User};
use crate::domain::bookings::{BookingDetails, IBookingRepository};
use crate::domain::catalog::IServiceRepository;
use crate::domain::projects::IProjectRepository;

/// How many recent bookings and users the dashboard lists
pub const RECENT_LIMIT: i64 = 5;

/// Landing page figures
#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_users: i64,
    pub total_services: i64,
    pub total_bookings: i64,
    pub total_projects: i64,
    pub recent_bookings: Vec<BookingDetails>,
    pub recent_users: Vec<User>,
}

pub struct GetDashboardSummaryUseCase {
    user_repository: Arc<dyn IUserRepository>,
    service_repository: Arc<dyn IServiceRepository>,
    booking_repository: Arc<dyn IBookingRepository>,
    project_repository: Arc<dyn IProjectRepository>,
}

impl GetDashboardSummaryUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        service_repository: Arc<dyn IServiceRepository>,
        booking_repository: Arc<dyn IBookingRepository>,
        project_repository: Arc<dyn IProjectRepository>,
    ) -> Self {
        Self {
            user_repository,
            service_repository,
            booking_repository,
            project_repository,
        }
    }

    /// All reads run concurrently; the first failure fails the summary
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self) -> Result<DashboardSummary, ApplicationError> {
        let (
            total_users,
            total_services,
            total_bookings,
            total_projects,
            recent_bookings,
            recent_users,
        ) = tokio::try_join!(
            self.user_repository.count(),
            self.service_repository.count(),
            self.booking_repository.count(),
            self.project_repository.count(),
            self.booking_repository.recent(RECENT_LIMIT),
            self.user_repository.recent(RECENT_LIMIT),
        )?;

        Ok(DashboardSummary {
            total_users,
            total_services,
            total_bookings,
            total_projects,
            recent_bookings,
            recent_users,
        })
    }
}
