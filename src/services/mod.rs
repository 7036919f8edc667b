//! Business logic services

pub mod activity;
pub mod auth;
pub mod branches;
pub mod equipment;
pub mod identity;
pub mod payments;
pub mod storage;
pub mod students;
pub mod trainings;
pub mod users;

use std::sync::Arc;

use crate::{
    config::{AuthConfig, StorageConfig},
    repository::Repository,
};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub students: students::StudentsService,
    pub branches: branches::BranchesService,
    pub equipment: equipment::EquipmentService,
    pub payments: payments::PaymentsService,
    pub trainings: trainings::TrainingsService,
    pub users: users::UsersService,
    pub activity: activity::ActivityService,
    pub storage: storage::StorageService,
}

impl Services {
    /// Create all services with the given repository and collaborators
    pub fn new(
        repository: Repository,
        auth_config: AuthConfig,
        storage_config: &StorageConfig,
        identity: Arc<dyn identity::IdentityProvider>,
    ) -> Self {
        let activity = activity::ActivityService::new(repository.clone());
        let payments = payments::PaymentsService::new(repository.clone(), activity.clone());

        Self {
            auth: auth::AuthService::new(repository.clone(), auth_config, identity, activity.clone()),
            students: students::StudentsService::new(
                repository.clone(),
                payments.clone(),
                activity.clone(),
            ),
            branches: branches::BranchesService::new(repository.clone(), activity.clone()),
            equipment: equipment::EquipmentService::new(
                repository.clone(),
                payments.clone(),
                activity.clone(),
            ),
            trainings: trainings::TrainingsService::new(repository.clone(), activity.clone()),
            users: users::UsersService::new(repository, activity.clone()),
            payments,
            activity,
            storage: storage::StorageService::new(storage_config),
        }
    }
}
