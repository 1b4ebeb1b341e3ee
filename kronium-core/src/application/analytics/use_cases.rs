//! Analytics use cases

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use super::analytics_service::AnalyticsService;
use super::sessions::{AnalyticsSessions, CommittedReport};
use crate::application::errors::ApplicationError;
use crate::config::AnalyticsConfig;
use crate::domain::analytics::{AnalyticsReport, TimeWindow};
use crate::domain::auth::AdminSession;
use crate::domain::errors::DomainError;

/// Result of one refresh
#[derive(Debug, Clone)]
pub struct AnalyticsRefresh {
    pub days: u32,
    pub sequence: u64,
    pub report: AnalyticsReport,
    /// A newer refresh was started before this one finished
    pub stale: bool,
}

pub struct RefreshAnalyticsUseCase {
    service: Arc<AnalyticsService>,
    sessions: Arc<AnalyticsSessions>,
    default_window_days: u32,
    allowed_window_days: Vec<u32>,
}

impl RefreshAnalyticsUseCase {
    pub fn new(
        service: Arc<AnalyticsService>,
        sessions: Arc<AnalyticsSessions>,
        config: &AnalyticsConfig,
    ) -> Self {
        Self {
            service,
            sessions,
            default_window_days: config.default_window_days,
            allowed_window_days: config.allowed_window_days.clone(),
        }
    }

    fn resolve_days(&self, days: Option<u32>) -> Result<u32, DomainError> {
        let days = days.unwrap_or(self.default_window_days);
        if !self.allowed_window_days.contains(&days) {
            return Err(DomainError::validation(
                "days",
                format!("must be one of {:?}", self.allowed_window_days),
            ));
        }
        Ok(days)
    }

    #[tracing::instrument(skip(self, session), fields(user_id = %session.user_id))]
    pub async fn execute(
        &self,
        session: &AdminSession,
        days: Option<u32>,
    ) -> Result<AnalyticsRefresh, ApplicationError> {
        let days = self.resolve_days(days)?;
        let window = TimeWindow::trailing_days(Utc::now(), days)?;
        let ticket = self.sessions.begin(session.user_id);

        let report = match self.service.report(window).await {
            Ok(report) => report,
            Err(e) => {
                warn!(sequence = ticket.sequence(), "Analytics refresh failed, keeping last-known report");
                return Err(e.into());
            }
        };

        let committed = self.sessions.commit(ticket, report.clone());
        if committed {
            info!(days, sequence = ticket.sequence(), "Analytics refreshed");
        } else {
            info!(
                days,
                sequence = ticket.sequence(),
                "Discarding superseded analytics refresh"
            );
        }

        Ok(AnalyticsRefresh {
            days,
            sequence: ticket.sequence(),
            report,
            stale: !committed,
        })
    }
}

pub struct GetLatestAnalyticsUseCase {
    sessions: Arc<AnalyticsSessions>,
}

impl GetLatestAnalyticsUseCase {
    pub fn new(sessions: Arc<AnalyticsSessions>) -> Self {
        Self { sessions }
    }

    pub fn execute(&self, session: &AdminSession) -> Result<CommittedReport, ApplicationError> {
        self.sessions.last_known(&session.user_id).ok_or_else(|| {
            DomainError::not_found("Analytics report", session.user_id.to_string()).into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::analytics::ReportOptions;
    use crate::domain::analytics::{BookingRecord, EntityTotals, IAnalyticsSource};
    use crate::domain::auth::{Email, UserId, UserRole};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct StubSource {
        fail: AtomicBool,
    }

    #[async_trait]
    impl IAnalyticsSource for StubSource {
        async fn entity_totals(&self) -> Result<EntityTotals, DomainError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(DomainError::database("connection refused"));
            }
            Ok(EntityTotals {
                users: 3,
                services: 2,
                bookings: 1,
            })
        }

        async fn bookings_in_window(
            &self,
            _window: &TimeWindow,
        ) -> Result<Vec<BookingRecord>, DomainError> {
            Ok(Vec::new())
        }

        async fn users_created_in_window(&self, _window: &TimeWindow) -> Result<i64, DomainError> {
            Ok(0)
        }
    }

    fn admin() -> AdminSession {
        AdminSession::open(
            UserId::generate(),
            Email::new("admin@kronium.test".to_string()).unwrap(),
            UserRole::Admin,
        )
        .unwrap()
    }

    fn fixture() -> (Arc<StubSource>, Arc<AnalyticsSessions>, RefreshAnalyticsUseCase) {
        let config = AnalyticsConfig::default();
        let source = Arc::new(StubSource {
            fail: AtomicBool::new(false),
        });
        let sessions = Arc::new(AnalyticsSessions::new());
        let service = Arc::new(AnalyticsService::new(
            source.clone(),
            ReportOptions::from(&config),
        ));
        let use_case = RefreshAnalyticsUseCase::new(service, sessions.clone(), &config);
        (source, sessions, use_case)
    }

    #[tokio::test]
    async fn test_refresh_defaults_to_thirty_days() {
        let (_, sessions, use_case) = fixture();
        let admin = admin();

        let refresh = use_case.execute(&admin, None).await.unwrap();
        assert_eq!(refresh.days, 30);
        assert!(!refresh.stale);
        assert_eq!(refresh.report.totals.users, 3);
        assert!(sessions.last_known(&admin.user_id).is_some());
    }

    #[tokio::test]
    async fn test_refresh_rejects_unoffered_window() {
        let (_, _, use_case) = fixture();
        let err = use_case.execute(&admin(), Some(14)).await.unwrap_err();
        assert!(matches!(
            err,
            ApplicationError::Domain(DomainError::Validation { ref field, .. }) if field == "days"
        ));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_report() {
        let (source, sessions, use_case) = fixture();
        let admin = admin();

        let first = use_case.execute(&admin, Some(7)).await.unwrap();
        source.fail.store(true, Ordering::SeqCst);
        let err = use_case.execute(&admin, Some(90)).await.unwrap_err();

        assert!(err.is_data_source_failure());
        let latest = GetLatestAnalyticsUseCase::new(sessions)
            .execute(&admin)
            .unwrap();
        assert_eq!(latest.sequence, first.sequence);
    }

    #[test]
    fn test_latest_without_refresh_is_not_found() {
        let latest = GetLatestAnalyticsUseCase::new(Arc::new(AnalyticsSessions::new()));
        assert!(matches!(
            latest.execute(&admin()),
            Err(ApplicationError::Domain(DomainError::NotFound { .. }))
        ));
    }
}
