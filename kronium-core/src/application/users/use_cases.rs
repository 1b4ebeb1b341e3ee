//! User management use cases

use std::sync::Arc;

use crate::application::errors::ApplicationError;
use crate::domain::auth::{IUserRepository, User, UserForm, UserId, UserQuery};
use crate::domain::errors::DomainError;
use crate::infrastructure::auth::{PasswordHasher, TemporaryPasswordGenerator};

/// List users matching a query, newest first
pub struct ListUsersUseCase {
    user_repository: Arc<dyn IUserRepository>,
}

impl ListUsersUseCase {
    pub fn new(user_repository: Arc<dyn IUserRepository>) -> Self {
        Self { user_repository }
    }

    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, query: UserQuery) -> Result<Vec<User>, ApplicationError> {
        let users = self.user_repository.list().await?;
        Ok(users.into_iter().filter(|u| query.matches(u)).collect())
    }
}

pub struct GetUserUseCase {
    user_repository: Arc<dyn IUserRepository>,
}

impl GetUserUseCase {
    pub fn new(user_repository: Arc<dyn IUserRepository>) -> Self {
        Self { user_repository }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<User, ApplicationError> {
        self.user_repository
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", user_id).into())
    }
}

/// A created user together with the one-time password to hand over
#[derive(Debug, Clone)]
pub struct CreatedUser {
    pub user: User,
    pub temporary_password: String,
}

/// Create a user with a generated temporary password
pub struct CreateUserUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    password_generator: TemporaryPasswordGenerator,
}

impl CreateUserUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        password_generator: TemporaryPasswordGenerator,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            password_generator,
        }
    }

    #[tracing::instrument(skip(self, form), fields(email = %form.email))]
    pub async fn execute(&self, form: UserForm) -> Result<CreatedUser, ApplicationError> {
        let profile = form.validate()?;

        if self
            .user_repository
            .find_by_email(&profile.email)
            .await?
            .is_some()
        {
            return Err(DomainError::conflict(format!(
                "A user with email {} already exists",
                profile.email
            ))
            .into());
        }

        let temporary_password = self.password_generator.generate();
        let password_hash = self.password_hasher.hash(temporary_password.clone()).await?;

        let user = User::new(profile, password_hash);
        self.user_repository.create(&user).await?;

        tracing::info!(user_id = %user.user_id, role = %user.role, "User created");

        Ok(CreatedUser {
            user,
            temporary_password,
        })
    }
}
