//! In-memory backends for tests
//!
//! [`MemoryDatabase`] implements every repository trait over plain vectors,
//! joining bookings and projects with users and services the same way the
//! SQL queries do. Enabled with the `test-support` feature.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::analytics::{
    BookingRecord, EntityTotals, IAnalyticsSource, ServiceSnapshot, TimeWindow,
};
use crate::domain::auth::{Email, IUserRepository, User, UserId};
use crate::domain::bookings::{
    Booking, BookingCustomer, BookingDetails, BookingId, BookingService, BookingStatus,
    IBookingRepository,
};
use crate::domain::catalog::{IServiceRepository, Service, ServiceId};
use crate::domain::errors::DomainError;
use crate::domain::projects::{
    IProjectRepository, Project, ProjectDetails, ProjectId, ProjectOwner, ProjectStatus,
};
use crate::domain::storage::{ObjectStorage, StorageError, StoredObject};

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// All tables in process memory
#[derive(Default)]
pub struct MemoryDatabase {
    users: RwLock<Vec<User>>,
    services: RwLock<Vec<Service>>,
    bookings: RwLock<Vec<Booking>>,
    projects: RwLock<Vec<Project>>,
    failing: AtomicBool,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with a `DatabaseError`
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::database("simulated outage"));
        }
        Ok(())
    }

    pub fn insert_user(&self, user: User) {
        write(&self.users).push(user);
    }

    pub fn insert_service(&self, service: Service) {
        write(&self.services).push(service);
    }

    pub fn insert_booking(&self, booking: Booking) {
        write(&self.bookings).push(booking);
    }

    pub fn insert_project(&self, project: Project) {
        write(&self.projects).push(project);
    }

    pub fn booking_status(&self, booking_id: &BookingId) -> Option<BookingStatus> {
        read(&self.bookings)
            .iter()
            .find(|b| b.booking_id == *booking_id)
            .map(|b| b.status)
    }

    fn booking_details(&self, booking: &Booking) -> BookingDetails {
        let customer = read(&self.users)
            .iter()
            .find(|u| u.user_id == booking.user_id)
            .map(|u| BookingCustomer {
                name: u.name.clone(),
                email: u.email.as_str().to_string(),
                phone: u.phone.clone(),
            });
        let service = read(&self.services)
            .iter()
            .find(|s| s.service_id == booking.service_id)
            .map(|s| BookingService {
                title: s.title.clone(),
                price: s.price,
                category: s.category.clone(),
                location: s.location.clone(),
            });

        BookingDetails {
            booking: booking.clone(),
            customer,
            service,
        }
    }

    fn project_details(&self, project: &Project) -> ProjectDetails {
        let owner = read(&self.users)
            .iter()
            .find(|u| u.user_id == project.user_id)
            .map(|u| ProjectOwner {
                name: u.name.clone(),
                email: u.email.as_str().to_string(),
            });

        ProjectDetails {
            project: project.clone(),
            owner,
        }
    }

    fn newest_bookings(&self) -> Vec<Booking> {
        let mut bookings = read(&self.bookings).clone();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bookings
    }
}

#[async_trait]
impl IUserRepository for MemoryDatabase {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(read(&self.users).iter().find(|u| u.email == *email).cloned())
    }

    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError> {
        self.check()?;
        Ok(read(&self.users)
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), DomainError> {
        self.check()?;
        let mut users = write(&self.users);
        if users.iter().any(|u| u.email == user.email) {
            return Err(DomainError::conflict(format!(
                "A user with email {} already exists",
                user.email.as_str()
            )));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.check()?;
        let mut users = read(&self.users).clone();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<User>, DomainError> {
        let mut users = IUserRepository::list(self).await?;
        users.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(users)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(read(&self.users).len() as i64)
    }

    async fn customers_with_bookings(&self) -> Result<Vec<User>, DomainError> {
        self.check()?;
        let bookings = read(&self.bookings);
        let mut customers: Vec<User> = read(&self.users)
            .iter()
            .filter(|u| bookings.iter().any(|b| b.user_id == u.user_id))
            .cloned()
            .collect();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }
}

#[async_trait]
impl IServiceRepository for MemoryDatabase {
    async fn list(&self) -> Result<Vec<Service>, DomainError> {
        self.check()?;
        let mut services = read(&self.services).clone();
        services.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(services)
    }

    async fn find_by_id(&self, service_id: &ServiceId) -> Result<Option<Service>, DomainError> {
        self.check()?;
        Ok(read(&self.services)
            .iter()
            .find(|s| s.service_id == *service_id)
            .cloned())
    }

    async fn create(&self, service: &Service) -> Result<(), DomainError> {
        self.check()?;
        write(&self.services).push(service.clone());
        Ok(())
    }

    async fn update(&self, service: &Service) -> Result<(), DomainError> {
        self.check()?;
        let mut services = write(&self.services);
        let slot = services
            .iter_mut()
            .find(|s| s.service_id == service.service_id)
            .ok_or_else(|| DomainError::not_found("Service", service.service_id))?;
        *slot = service.clone();
        Ok(())
    }

    async fn set_active(
        &self,
        service_id: &ServiceId,
        is_active: bool,
    ) -> Result<Service, DomainError> {
        self.check()?;
        let mut services = write(&self.services);
        let slot = services
            .iter_mut()
            .find(|s| s.service_id == *service_id)
            .ok_or_else(|| DomainError::not_found("Service", service_id))?;
        slot.is_active = is_active;
        Ok(slot.clone())
    }

    async fn delete(&self, service_id: &ServiceId) -> Result<(), DomainError> {
        self.check()?;
        let mut services = write(&self.services);
        let before = services.len();
        services.retain(|s| s.service_id != *service_id);
        if services.len() == before {
            return Err(DomainError::not_found("Service", service_id));
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(read(&self.services).len() as i64)
    }
}

#[async_trait]
impl IBookingRepository for MemoryDatabase {
    async fn list(&self) -> Result<Vec<BookingDetails>, DomainError> {
        self.check()?;
        Ok(self
            .newest_bookings()
            .iter()
            .map(|b| self.booking_details(b))
            .collect())
    }

    async fn find_by_id(
        &self,
        booking_id: &BookingId,
    ) -> Result<Option<BookingDetails>, DomainError> {
        self.check()?;
        let booking = read(&self.bookings)
            .iter()
            .find(|b| b.booking_id == *booking_id)
            .cloned();
        Ok(booking.map(|b| self.booking_details(&b)))
    }

    async fn update_status(
        &self,
        booking_id: &BookingId,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut bookings = write(&self.bookings);
        match bookings
            .iter_mut()
            .find(|b| b.booking_id == *booking_id && b.status == from)
        {
            Some(booking) => {
                booking.status = to;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn recent(&self, limit: i64) -> Result<Vec<BookingDetails>, DomainError> {
        let mut bookings = IBookingRepository::list(self).await?;
        bookings.truncate(usize::try_from(limit).unwrap_or(0));
        Ok(bookings)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(read(&self.bookings).len() as i64)
    }
}

#[async_trait]
impl IProjectRepository for MemoryDatabase {
    async fn list(&self) -> Result<Vec<ProjectDetails>, DomainError> {
        self.check()?;
        let mut projects = read(&self.projects).clone();
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects.iter().map(|p| self.project_details(p)).collect())
    }

    async fn find_by_id(
        &self,
        project_id: &ProjectId,
    ) -> Result<Option<ProjectDetails>, DomainError> {
        self.check()?;
        let project = read(&self.projects)
            .iter()
            .find(|p| p.project_id == *project_id)
            .cloned();
        Ok(project.map(|p| self.project_details(&p)))
    }

    async fn update_status(
        &self,
        project_id: &ProjectId,
        status: ProjectStatus,
    ) -> Result<bool, DomainError> {
        self.check()?;
        let mut projects = write(&self.projects);
        match projects.iter_mut().find(|p| p.project_id == *project_id) {
            Some(project) => {
                project.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, project_id: &ProjectId) -> Result<bool, DomainError> {
        self.check()?;
        let mut projects = write(&self.projects);
        let before = projects.len();
        projects.retain(|p| p.project_id != *project_id);
        Ok(projects.len() < before)
    }

    async fn count(&self) -> Result<i64, DomainError> {
        self.check()?;
        Ok(read(&self.projects).len() as i64)
    }
}

#[async_trait]
impl IAnalyticsSource for MemoryDatabase {
    async fn entity_totals(&self) -> Result<EntityTotals, DomainError> {
        self.check()?;
        Ok(EntityTotals {
            users: read(&self.users).len() as i64,
            services: read(&self.services).len() as i64,
            bookings: read(&self.bookings).len() as i64,
        })
    }

    async fn bookings_in_window(
        &self,
        window: &TimeWindow,
    ) -> Result<Vec<BookingRecord>, DomainError> {
        self.check()?;
        let services = read(&self.services);
        let mut records: Vec<BookingRecord> = read(&self.bookings)
            .iter()
            .filter(|b| window.contains(b.created_at))
            .map(|b| BookingRecord {
                booking_id: b.booking_id,
                service_id: b.service_id,
                customer_id: b.user_id,
                created_at: b.created_at,
                amount: b.total_amount,
                status: b.status,
                service: services
                    .iter()
                    .find(|s| s.service_id == b.service_id)
                    .map(|s| ServiceSnapshot {
                        title: s.title.clone(),
                        price: s.price,
                        category: Some(s.category.clone()),
                    }),
            })
            .collect();
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(records)
    }

    async fn users_created_in_window(&self, window: &TimeWindow) -> Result<i64, DomainError> {
        self.check()?;
        Ok(read(&self.users)
            .iter()
            .filter(|u| window.contains(u.created_at))
            .count() as i64)
    }
}

/// Object storage that keeps uploads in a map
#[derive(Default)]
pub struct MemoryObjectStorage {
    objects: RwLock<HashMap<String, (Bytes, String)>>,
}

impl MemoryObjectStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &str) -> Option<(Bytes, String)> {
        read(&self.objects).get(path).cloned()
    }

    pub fn len(&self) -> usize {
        read(&self.objects).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStorage for MemoryObjectStorage {
    async fn put(
        &self,
        path: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<StoredObject, StorageError> {
        let mut objects = write(&self.objects);
        if objects.contains_key(path) {
            return Err(StorageError::UploadFailed {
                message: format!("object already exists: {}", path),
            });
        }
        objects.insert(path.to_string(), (body, content_type.to_string()));
        Ok(StoredObject {
            path: path.to_string(),
            url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.kronium.test/services/{}", path)
    }
}
