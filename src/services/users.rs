//! User profile management service

use crate::{
    error::{AppError, AppResult},
    models::{
        activity::NewActivity,
        user::{CreateUserProfile, Role, UpdateUserProfile, UserProfile},
    },
    repository::Repository,
    services::{activity::ActivityService, auth::AuthService},
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    activity: ActivityService,
}

impl UsersService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    pub async fn list(&self) -> AppResult<Vec<UserProfile>> {
        self.repository.users.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<UserProfile> {
        self.repository.users.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateUserProfile) -> AppResult<UserProfile> {
        if self.repository.users.username_exists(&data.username, None).await? {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let hash = AuthService::hash_password(&data.password);
        let user = self.repository.users.create(&data, hash).await?;

        self.activity.record(
            NewActivity::new("create", "user")
                .entity_id(user.id)
                .description(format!("Created user {}", user.username)),
        );
        Ok(user)
    }

    pub async fn update(&self, id: i32, data: UpdateUserProfile) -> AppResult<UserProfile> {
        // Verify user exists
        self.repository.users.get_by_id(id).await?;

        if let Some(ref username) = data.username {
            if self.repository.users.username_exists(username, Some(id)).await? {
                return Err(AppError::Conflict("Username already exists".to_string()));
            }
        }

        let hash = data.password.as_deref().map(AuthService::hash_password);
        self.repository.users.update(id, &data, hash).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.users.delete(id).await?;
        self.activity.record(NewActivity::new("delete", "user").entity_id(id));
        Ok(())
    }

    pub async fn update_role(&self, id: i32, role: Role) -> AppResult<UserProfile> {
        self.repository.users.update_role(id, role).await
    }
}
