//! API request and response models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use kronium_core::application::analytics::{AnalyticsRefresh, CommittedReport};
use kronium_core::application::bookings::BookingList;
use kronium_core::application::dashboard::DashboardSummary;
use kronium_core::application::projects::ProjectList;
use kronium_core::application::users::CreatedUser;
use kronium_core::domain::analytics::{
    AnalyticsReport, CategoryCount, MonthlyBucket, ServiceRanking,
};
use kronium_core::domain::auth::{User, UserForm, UserQuery, UserRole};
use kronium_core::domain::bookings::{
    BookingDetails, BookingQuery, BookingStatus, BookingStatusCounts,
};
use kronium_core::domain::catalog::{Service, ServiceForm, ServiceQuery};
use kronium_core::domain::chat::{ChatMessage, ChatSession};
use kronium_core::domain::errors::DomainError;
use kronium_core::domain::projects::{
    ProjectDetails, ProjectQuery, ProjectStatus, ProjectStatusCounts,
};
use kronium_core::domain::storage::StoredObject;

/// Error response
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable error code
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,
    /// Human-readable error message
    #[schema(example = "Invalid price: 'abc' is not a number")]
    pub message: String,
    /// Additional error details; `field` names the offending input on validation failures
    pub details: Option<serde_json::Value>,
    /// Request ID for tracking
    pub request_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "healthy")]
    pub status: String,
    #[schema(example = "0.3.0")]
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

/// Treat blank query parameters as absent
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_filter<T: FromStr<Err = String>>(
    field: &str,
    value: Option<String>,
) -> Result<Option<T>, DomainError> {
    non_blank(value)
        .map(|raw| T::from_str(&raw).map_err(|e| DomainError::validation(field, e)))
        .transpose()
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserListQuery {
    /// Matches name, email or phone
    pub search: Option<String>,
    /// customer, admin, manager or technician
    pub role: Option<String>,
}

impl UserListQuery {
    pub fn into_query(self) -> Result<UserQuery, DomainError> {
        Ok(UserQuery {
            search: non_blank(self.search),
            role: parse_filter::<UserRole>("role", self.role)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub simple_id: Option<String>,
    #[schema(example = "Amina Okafor")]
    pub name: String,
    #[schema(example = "amina@kronium.test")]
    pub email: String,
    pub phone: String,
    pub profile_image: Option<String>,
    pub address: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub favorite_services: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.user_id.as_uuid(),
            simple_id: user.simple_id,
            name: user.name,
            email: user.email.into_string(),
            phone: user.phone,
            profile_image: user.profile_image,
            address: user.address,
            role: user.role,
            is_active: user.is_active,
            favorite_services: user.favorite_services,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[schema(example = "Amina Okafor")]
    pub name: String,
    #[schema(example = "amina@kronium.test")]
    pub email: String,
    #[schema(example = "+254700000000")]
    pub phone: String,
    pub address: Option<String>,
    /// Defaults to customer
    pub role: Option<String>,
    /// Defaults to true
    pub is_active: Option<bool>,
}

impl From<CreateUserRequest> for UserForm {
    fn from(request: CreateUserRequest) -> Self {
        UserForm {
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            role: request.role,
            is_active: request.is_active,
        }
    }
}

/// A new account and the temporary password it was created with.
///
/// The password is shown once and never stored in clear.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreatedUserResponse {
    pub user: UserResponse,
    pub temporary_password: String,
}

impl From<CreatedUser> for CreatedUserResponse {
    fn from(created: CreatedUser) -> Self {
        Self {
            user: created.user.into(),
            temporary_password: created.temporary_password,
        }
    }
}

// ---------------------------------------------------------------------------
// Services
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServiceListQuery {
    /// Matches title or description
    pub search: Option<String>,
    pub category: Option<String>,
}

impl From<ServiceListQuery> for ServiceQuery {
    fn from(query: ServiceListQuery) -> Self {
        ServiceQuery {
            search: non_blank(query.search),
            category: non_blank(query.category),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    #[schema(example = "Solar panel installation")]
    pub title: String,
    pub description: String,
    #[schema(value_type = String, example = "1500.00")]
    pub price: Decimal,
    #[schema(example = "Energy")]
    pub category: String,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub is_active: bool,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.service_id.as_uuid(),
            title: service.title,
            description: service.description,
            price: service.price,
            category: service.category,
            image_url: service.image_url,
            image_path: service.image_path,
            is_active: service.is_active,
            features: service.features,
            duration: service.duration,
            location: service.location,
            created_at: service.created_at,
            updated_at: service.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceListResponse {
    pub services: Vec<ServiceResponse>,
    pub total: usize,
}

/// Service form; used for both create and update
#[derive(Debug, Deserialize, ToSchema)]
pub struct ServiceRequest {
    pub title: String,
    pub description: String,
    /// Non-negative decimal, as typed
    #[schema(example = "1500.00")]
    pub price: String,
    pub category: String,
    /// Comma-separated list
    #[serde(default)]
    #[schema(example = "Site survey, Installation, 2 year warranty")]
    pub features: String,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub is_active: Option<bool>,
}

impl From<ServiceRequest> for ServiceForm {
    fn from(request: ServiceRequest) -> Self {
        ServiceForm {
            title: request.title,
            description: request.description,
            price: request.price,
            category: request.category,
            features: request.features,
            duration: request.duration,
            location: request.location,
            image_url: request.image_url,
            image_path: request.image_path,
            is_active: request.is_active,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImageUploadResponse {
    #[schema(example = "service-images/1736000000000-a1b2c3d4e5.png")]
    pub path: String,
    pub url: String,
}

impl From<StoredObject> for ImageUploadResponse {
    fn from(object: StoredObject) -> Self {
        Self {
            path: object.path,
            url: object.url,
        }
    }
}

// ---------------------------------------------------------------------------
// Bookings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BookingListQuery {
    /// Matches customer name or email, service title or location
    pub search: Option<String>,
    /// pending, confirmed, inProgress, completed or cancelled
    pub status: Option<String>,
}

impl BookingListQuery {
    pub fn into_query(self) -> Result<BookingQuery, DomainError> {
        Ok(BookingQuery {
            search: non_blank(self.search),
            status: parse_filter::<BookingStatus>("status", self.status)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingCustomerDto {
    pub name: String,
    pub email: String,
    pub phone: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingServiceDto {
    pub title: String,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category: String,
    pub location: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub status: BookingStatus,
    pub booking_date: DateTime<Utc>,
    pub notes: Option<String>,
    #[schema(value_type = Option<String>)]
    pub total_amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Absent when the customer row no longer exists
    pub customer: Option<BookingCustomerDto>,
    /// Absent when the service was deleted
    pub service: Option<BookingServiceDto>,
}

impl From<BookingDetails> for BookingResponse {
    fn from(details: BookingDetails) -> Self {
        let booking = details.booking;
        Self {
            id: booking.booking_id.as_uuid(),
            user_id: booking.user_id.as_uuid(),
            service_id: booking.service_id.as_uuid(),
            status: booking.status,
            booking_date: booking.booking_date,
            notes: booking.notes,
            total_amount: booking.total_amount,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
            customer: details.customer.map(|c| BookingCustomerDto {
                name: c.name,
                email: c.email,
                phone: c.phone,
            }),
            service: details.service.map(|s| BookingServiceDto {
                title: s.title,
                price: s.price,
                category: s.category,
                location: s.location,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingStatusCountsDto {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl From<BookingStatusCounts> for BookingStatusCountsDto {
    fn from(counts: BookingStatusCounts) -> Self {
        Self {
            total: counts.total,
            pending: counts.pending,
            confirmed: counts.confirmed,
            in_progress: counts.in_progress,
            completed: counts.completed,
            cancelled: counts.cancelled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
    /// Tallies over all bookings, ignoring the filter
    pub counts: BookingStatusCountsDto,
}

impl From<BookingList> for BookingListResponse {
    fn from(list: BookingList) -> Self {
        Self {
            bookings: list.bookings.into_iter().map(Into::into).collect(),
            counts: list.counts.into(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBookingStatusRequest {
    #[schema(example = "confirmed")]
    pub status: String,
}

impl UpdateBookingStatusRequest {
    pub fn status(&self) -> Result<BookingStatus, DomainError> {
        BookingStatus::from_str(&self.status).map_err(|e| DomainError::validation("status", e))
    }
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    /// Matches title, description, location or owner name
    pub search: Option<String>,
    /// pending, active, on-hold, completed or cancelled
    pub status: Option<String>,
}

impl ProjectListQuery {
    pub fn into_query(self) -> Result<ProjectQuery, DomainError> {
        Ok(ProjectQuery {
            search: non_blank(self.search),
            status: parse_filter::<ProjectStatus>("status", self.status)?,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectOwnerDto {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub status: ProjectStatus,
    pub location: String,
    #[schema(value_type = Option<String>)]
    pub budget: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub owner: Option<ProjectOwnerDto>,
}

impl From<ProjectDetails> for ProjectResponse {
    fn from(details: ProjectDetails) -> Self {
        let project = details.project;
        Self {
            id: project.project_id.as_uuid(),
            user_id: project.user_id.as_uuid(),
            title: project.title,
            description: project.description,
            status: project.status,
            location: project.location,
            budget: project.budget,
            start_date: project.start_date,
            end_date: project.end_date,
            created_at: project.created_at,
            updated_at: project.updated_at,
            owner: details.owner.map(|o| ProjectOwnerDto {
                name: o.name,
                email: o.email,
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectStatusCountsDto {
    pub total: usize,
    pub pending: usize,
    pub active: usize,
    pub on_hold: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl From<ProjectStatusCounts> for ProjectStatusCountsDto {
    fn from(counts: ProjectStatusCounts) -> Self {
        Self {
            total: counts.total,
            pending: counts.pending,
            active: counts.active,
            on_hold: counts.on_hold,
            completed: counts.completed,
            cancelled: counts.cancelled,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectResponse>,
    pub counts: ProjectStatusCountsDto,
}

impl From<ProjectList> for ProjectListResponse {
    fn from(list: ProjectList) -> Self {
        Self {
            projects: list.projects.into_iter().map(Into::into).collect(),
            counts: list.counts.into(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProjectStatusRequest {
    #[schema(example = "on-hold")]
    pub status: String,
}

impl UpdateProjectStatusRequest {
    pub fn status(&self) -> Result<ProjectStatus, DomainError> {
        ProjectStatus::from_str(&self.status).map_err(|e| DomainError::validation("status", e))
    }
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardTotalsDto {
    pub users: i64,
    pub services: i64,
    pub bookings: i64,
    pub projects: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DashboardResponse {
    pub totals: DashboardTotalsDto,
    pub recent_bookings: Vec<BookingResponse>,
    pub recent_users: Vec<UserResponse>,
}

impl From<DashboardSummary> for DashboardResponse {
    fn from(summary: DashboardSummary) -> Self {
        Self {
            totals: DashboardTotalsDto {
                users: summary.total_users,
                services: summary.total_services,
                bookings: summary.total_bookings,
                projects: summary.total_projects,
            },
            recent_bookings: summary.recent_bookings.into_iter().map(Into::into).collect(),
            recent_users: summary.recent_users.into_iter().map(Into::into).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    /// Trailing window in days; defaults to 30
    pub days: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsWindowDto {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub days: u32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsTotalsDto {
    pub users: i64,
    pub services: i64,
    pub bookings: i64,
    /// Revenue attributed to bookings inside the window
    #[schema(value_type = String, example = "4250.00")]
    pub revenue: Decimal,
    pub window_bookings: u64,
    pub window_users: i64,
}

/// Percentage change against the preceding window of equal length
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GrowthDto {
    pub users: f64,
    pub bookings: f64,
    pub revenue: f64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MonthlyBucketDto {
    /// First day of the month
    pub month: NaiveDate,
    #[schema(example = "Jan 2025")]
    pub label: String,
    pub count: u64,
}

impl From<&MonthlyBucket> for MonthlyBucketDto {
    fn from(bucket: &MonthlyBucket) -> Self {
        Self {
            month: bucket.month,
            label: bucket.label(),
            count: bucket.count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryCountDto {
    pub category: String,
    pub count: u64,
}

impl From<&CategoryCount> for CategoryCountDto {
    fn from(category: &CategoryCount) -> Self {
        Self {
            category: category.category.clone(),
            count: category.count,
        }
    }
}

/// Every category, largest first, and how many of them the chart shows
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryDistributionDto {
    pub items: Vec<CategoryCountDto>,
    pub display_limit: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ServiceRankingDto {
    pub service_id: Uuid,
    pub title: String,
    pub bookings: u64,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    /// Absent when the service has no bookings
    #[schema(value_type = Option<String>)]
    pub average_revenue: Option<Decimal>,
}

impl From<&ServiceRanking> for ServiceRankingDto {
    fn from(ranking: &ServiceRanking) -> Self {
        Self {
            service_id: ranking.service_id.as_uuid(),
            title: ranking.title.clone(),
            bookings: ranking.bookings,
            revenue: ranking.revenue,
            average_revenue: ranking.average_revenue(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsResponse {
    /// Refresh ticket this report was produced under
    pub sequence: u64,
    /// A newer refresh superseded this one; it was not kept as the latest report
    pub stale: bool,
    pub window: AnalyticsWindowDto,
    pub totals: AnalyticsTotalsDto,
    pub growth: GrowthDto,
    pub monthly: Vec<MonthlyBucketDto>,
    pub categories: CategoryDistributionDto,
    pub top_services: Vec<ServiceRankingDto>,
    pub generated_at: DateTime<Utc>,
}

impl AnalyticsResponse {
    fn build(
        report: &AnalyticsReport,
        days: u32,
        sequence: u64,
        stale: bool,
        category_display_limit: usize,
    ) -> Self {
        Self {
            sequence,
            stale,
            window: AnalyticsWindowDto {
                start: report.window.start,
                end: report.window.end,
                days,
            },
            totals: AnalyticsTotalsDto {
                users: report.totals.users,
                services: report.totals.services,
                bookings: report.totals.bookings,
                revenue: report.totals.revenue,
                window_bookings: report.totals.window_bookings,
                window_users: report.totals.window_users,
            },
            growth: GrowthDto {
                users: report.growth.users,
                bookings: report.growth.bookings,
                revenue: report.growth.revenue,
            },
            monthly: report.monthly.iter().map(Into::into).collect(),
            categories: CategoryDistributionDto {
                items: report.categories.iter().map(Into::into).collect(),
                display_limit: category_display_limit,
            },
            top_services: report.top_services.iter().map(Into::into).collect(),
            generated_at: report.generated_at,
        }
    }

    pub fn from_refresh(refresh: &AnalyticsRefresh, category_display_limit: usize) -> Self {
        Self::build(
            &refresh.report,
            refresh.days,
            refresh.sequence,
            refresh.stale,
            category_display_limit,
        )
    }

    pub fn from_committed(committed: &CommittedReport, category_display_limit: usize) -> Self {
        let days = u32::try_from(committed.report.window.length().num_days()).unwrap_or(0);
        Self::build(
            &committed.report,
            days,
            committed.sequence,
            false,
            category_display_limit,
        )
    }
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatSessionDto {
    pub customer_id: Uuid,
    pub customer_name: String,
    pub customer_email: String,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    /// Customer messages since the last admin reply
    pub unread_count: u32,
}

impl From<ChatSession> for ChatSessionDto {
    fn from(session: ChatSession) -> Self {
        Self {
            customer_id: session.customer_id.as_uuid(),
            customer_name: session.customer_name,
            customer_email: session.customer_email,
            last_message: session.last_message,
            last_message_at: session.last_message_at,
            unread_count: session.unread_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatSessionListResponse {
    pub sessions: Vec<ChatSessionDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessageDto {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub admin_id: Option<Uuid>,
    pub from_admin: bool,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<ChatMessage> for ChatMessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            customer_id: message.customer_id.as_uuid(),
            admin_id: message.admin_id.map(|id| id.as_uuid()),
            from_admin: message.is_admin(),
            body: message.body,
            created_at: message.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ChatMessagesResponse {
    pub messages: Vec<ChatMessageDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SendChatMessageRequest {
    #[schema(example = "Your technician is on the way.")]
    pub message: String,
}
