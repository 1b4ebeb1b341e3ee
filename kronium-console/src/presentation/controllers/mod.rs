//! Console API controllers

pub mod analytics;
pub mod bookings;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod projects;
pub mod services;
pub mod users;

use std::sync::Arc;

use kronium_core::Config;
use kronium_core::application::analytics::{
    AnalyticsService, AnalyticsSessions, GetLatestAnalyticsUseCase, RefreshAnalyticsUseCase,
    ReportOptions,
};
use kronium_core::application::auth::{LoginUseCase, RefreshTokenUseCase, ValidateTokenUseCase};
use kronium_core::application::bookings::{
    GetBookingUseCase, ListBookingsUseCase, UpdateBookingStatusUseCase,
};
use kronium_core::application::catalog::{
    CreateServiceUseCase, DeleteServiceUseCase, GetServiceUseCase, ListServicesUseCase,
    ToggleServiceActiveUseCase, UpdateServiceUseCase, UploadServiceImageUseCase,
};
use kronium_core::application::chat::{
    GetChatMessagesUseCase, ListChatSessionsUseCase, SendChatMessageUseCase,
};
use kronium_core::application::dashboard::GetDashboardSummaryUseCase;
use kronium_core::application::projects::{
    DeleteProjectUseCase, ListProjectsUseCase, UpdateProjectStatusUseCase,
};
use kronium_core::application::users::{CreateUserUseCase, GetUserUseCase, ListUsersUseCase};
use kronium_core::domain::analytics::IAnalyticsSource;
use kronium_core::domain::auth::IUserRepository;
use kronium_core::domain::bookings::IBookingRepository;
use kronium_core::domain::catalog::IServiceRepository;
use kronium_core::domain::chat::ChatStore;
use kronium_core::domain::projects::IProjectRepository;
use kronium_core::domain::storage::{ObjectStorage, UploadPolicy};
use kronium_core::infrastructure::auth::{JwtService, PasswordHasher, TemporaryPasswordGenerator};

use crate::presentation::auth::AuthState;
use crate::presentation::auth::controller::AuthAppState;

/// Data-source, storage and token services the console runs on
#[derive(Clone)]
pub struct ConsoleBackends {
    pub user_repository: Arc<dyn IUserRepository>,
    pub service_repository: Arc<dyn IServiceRepository>,
    pub booking_repository: Arc<dyn IBookingRepository>,
    pub project_repository: Arc<dyn IProjectRepository>,
    pub analytics_source: Arc<dyn IAnalyticsSource>,
    pub object_storage: Arc<dyn ObjectStorage>,
    pub chat_store: Arc<dyn ChatStore>,
    pub password_hasher: Arc<PasswordHasher>,
    pub jwt_service: Arc<JwtService>,
    pub analytics_sessions: Arc<AnalyticsSessions>,
}

#[derive(Clone)]
pub struct UserUseCases {
    pub list_users_use_case: Arc<ListUsersUseCase>,
    pub get_user_use_case: Arc<GetUserUseCase>,
    pub create_user_use_case: Arc<CreateUserUseCase>,
}

#[derive(Clone)]
pub struct CatalogUseCases {
    pub list_services_use_case: Arc<ListServicesUseCase>,
    pub get_service_use_case: Arc<GetServiceUseCase>,
    pub create_service_use_case: Arc<CreateServiceUseCase>,
    pub update_service_use_case: Arc<UpdateServiceUseCase>,
    pub delete_service_use_case: Arc<DeleteServiceUseCase>,
    pub toggle_service_active_use_case: Arc<ToggleServiceActiveUseCase>,
    pub upload_service_image_use_case: Arc<UploadServiceImageUseCase>,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct BookingUseCases {
    pub list_bookings_use_case: Arc<ListBookingsUseCase>,
    pub get_booking_use_case: Arc<GetBookingUseCase>,
    pub update_booking_status_use_case: Arc<UpdateBookingStatusUseCase>,
}

#[derive(Clone)]
pub struct ProjectUseCases {
    pub list_projects_use_case: Arc<ListProjectsUseCase>,
    pub update_project_status_use_case: Arc<UpdateProjectStatusUseCase>,
    pub delete_project_use_case: Arc<DeleteProjectUseCase>,
}

#[derive(Clone)]
pub struct AnalyticsUseCases {
    pub refresh_analytics_use_case: Arc<RefreshAnalyticsUseCase>,
    pub get_latest_analytics_use_case: Arc<GetLatestAnalyticsUseCase>,
    pub category_display_limit: usize,
}

#[derive(Clone)]
pub struct ChatUseCases {
    pub list_sessions_use_case: Arc<ListChatSessionsUseCase>,
    pub get_messages_use_case: Arc<GetChatMessagesUseCase>,
    pub send_message_use_case: Arc<SendChatMessageUseCase>,
}

/// Application state for console controllers
#[derive(Clone)]
pub struct ConsoleState {
    pub dashboard_use_case: Arc<GetDashboardSummaryUseCase>,
    pub users: UserUseCases,
    pub catalog: CatalogUseCases,
    pub bookings: BookingUseCases,
    pub projects: ProjectUseCases,
    pub analytics: AnalyticsUseCases,
    pub chat: ChatUseCases,
    pub auth_state: AuthState,
    pub auth: AuthAppState,
}

impl ConsoleState {
    /// Wire every console use case onto the given backends
    pub fn build(backends: ConsoleBackends, config: &Config) -> Self {
        let ConsoleBackends {
            user_repository,
            service_repository,
            booking_repository,
            project_repository,
            analytics_source,
            object_storage,
            chat_store,
            password_hasher,
            jwt_service,
            analytics_sessions,
        } = backends;

        let dashboard_use_case = Arc::new(GetDashboardSummaryUseCase::new(
            user_repository.clone(),
            service_repository.clone(),
            booking_repository.clone(),
            project_repository.clone(),
        ));

        let users = UserUseCases {
            list_users_use_case: Arc::new(ListUsersUseCase::new(user_repository.clone())),
            get_user_use_case: Arc::new(GetUserUseCase::new(user_repository.clone())),
            create_user_use_case: Arc::new(CreateUserUseCase::new(
                user_repository.clone(),
                password_hasher.clone(),
                TemporaryPasswordGenerator::new(config.auth.temporary_password_length),
            )),
        };

        let upload_policy = UploadPolicy::new(
            config.storage.allowed_content_types.clone(),
            config.storage.max_upload_bytes,
        );
        let catalog = CatalogUseCases {
            list_services_use_case: Arc::new(ListServicesUseCase::new(service_repository.clone())),
            get_service_use_case: Arc::new(GetServiceUseCase::new(service_repository.clone())),
            create_service_use_case: Arc::new(CreateServiceUseCase::new(
                service_repository.clone(),
            )),
            update_service_use_case: Arc::new(UpdateServiceUseCase::new(
                service_repository.clone(),
            )),
            delete_service_use_case: Arc::new(DeleteServiceUseCase::new(
                service_repository.clone(),
            )),
            toggle_service_active_use_case: Arc::new(ToggleServiceActiveUseCase::new(
                service_repository,
            )),
            upload_service_image_use_case: Arc::new(UploadServiceImageUseCase::new(
                object_storage,
                upload_policy,
            )),
            max_upload_bytes: config.storage.max_upload_bytes,
        };

        let bookings = BookingUseCases {
            list_bookings_use_case: Arc::new(ListBookingsUseCase::new(booking_repository.clone())),
            get_booking_use_case: Arc::new(GetBookingUseCase::new(booking_repository.clone())),
            update_booking_status_use_case: Arc::new(UpdateBookingStatusUseCase::new(
                booking_repository,
            )),
        };

        let projects = ProjectUseCases {
            list_projects_use_case: Arc::new(ListProjectsUseCase::new(project_repository.clone())),
            update_project_status_use_case: Arc::new(UpdateProjectStatusUseCase::new(
                project_repository.clone(),
            )),
            delete_project_use_case: Arc::new(DeleteProjectUseCase::new(project_repository)),
        };

        let analytics_service = Arc::new(AnalyticsService::new(
            analytics_source,
            ReportOptions::from(&config.analytics),
        ));
        let analytics = AnalyticsUseCases {
            refresh_analytics_use_case: Arc::new(RefreshAnalyticsUseCase::new(
                analytics_service,
                analytics_sessions.clone(),
                &config.analytics,
            )),
            get_latest_analytics_use_case: Arc::new(GetLatestAnalyticsUseCase::new(
                analytics_sessions.clone(),
            )),
            category_display_limit: config.analytics.category_display_limit,
        };

        let chat = ChatUseCases {
            list_sessions_use_case: Arc::new(ListChatSessionsUseCase::new(
                user_repository.clone(),
                chat_store.clone(),
            )),
            get_messages_use_case: Arc::new(GetChatMessagesUseCase::new(
                user_repository.clone(),
                chat_store.clone(),
            )),
            send_message_use_case: Arc::new(SendChatMessageUseCase::new(
                user_repository.clone(),
                chat_store,
            )),
        };

        let auth_state = AuthState {
            validate_token: Arc::new(ValidateTokenUseCase::new(jwt_service.clone())),
        };

        let auth = AuthAppState {
            login_use_case: Arc::new(LoginUseCase::new(
                user_repository.clone(),
                password_hasher,
                jwt_service.clone(),
            )),
            refresh_token_use_case: Arc::new(RefreshTokenUseCase::new(
                jwt_service.clone(),
                user_repository,
            )),
            analytics_sessions,
            access_token_ttl_seconds: jwt_service.access_token_ttl_seconds(),
            refresh_token_ttl_seconds: config.auth.refresh_token_ttl_hours * 3600,
            cookie_secure: config.auth.cookie_secure,
            cookie_path: config.auth.cookie_path.clone(),
        };

        Self {
            dashboard_use_case,
            users,
            catalog,
            bookings,
            projects,
            analytics,
            chat,
            auth_state,
            auth,
        }
    }
}
