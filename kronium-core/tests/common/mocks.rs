//! Mock repositories and sources

use async_trait::async_trait;
use kronium_core::domain::analytics::{BookingRecord, EntityTotals, IAnalyticsSource, TimeWindow};
use kronium_core::domain::auth::{Email, IUserRepository, User, UserId};
use kronium_core::domain::errors::DomainError;
use std::sync::Mutex;
use std::time::Duration;

/// User repository over a vector
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

impl MockUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
        }
    }

    pub fn set_role(&self, user_id: &UserId, role: kronium_core::domain::auth::UserRole) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.user_id == *user_id) {
            user.role = role;
        }
    }
}

#[async_trait]
impl IUserRepository for MockUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::conflict("duplicate email"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn recent(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut users = self.users.lock().unwrap().clone();
        users.truncate(limit as usize);
        Ok(users)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }

    async fn customers_with_bookings(&self) -> Result<Vec<User>, DomainError> {
        Ok(Vec::new())
    }
}

/// Analytics source whose booking reads take longer for short windows.
///
/// Lets a test start a slow refresh, then a fast one, and observe the slow
/// result arriving last.
pub struct DelayedAnalyticsSource {
    pub records: Vec<BookingRecord>,
    /// Windows no longer than this many days are served after `delay`
    pub slow_up_to_days: i64,
    pub delay: Duration,
}

#[async_trait]
impl IAnalyticsSource for DelayedAnalyticsSource {
    async fn entity_totals(&self) -> Result<EntityTotals, DomainError> {
        Ok(EntityTotals {
            users: 1,
            services: 1,
            bookings: self.records.len() as i64,
        })
    }

    async fn bookings_in_window(
        &self,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, DomainError> {
        if window.length().num_days() <= self.slow_up_to_days {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self
            .records
            .iter()
            .filter(|r| window.contains(r.created_at))
            .cloned()
            .collect())
    }

    async fn users_created_in_window(&self, _window: &TimeWindow) -> Result<i64, DomainError> {
        Ok(0)
    }
}
