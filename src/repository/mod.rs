//! Repository layer for database operations

pub mod activity_logs;
pub mod branches;
pub mod equipment;
pub mod payments;
pub mod students;
pub mod trainings;
pub mod users;

use sqlx::{Pool, Postgres};

/// Main repository struct holding the database connection pool.
/// Built once at startup and injected everywhere; there is no global handle.
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub students: students::StudentsRepository,
    pub branches: branches::BranchesRepository,
    pub equipment: equipment::EquipmentRepository,
    pub payments: payments::PaymentsRepository,
    pub trainings: trainings::TrainingsRepository,
    pub users: users::UsersRepository,
    pub activity_logs: activity_logs::ActivityLogsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            students: students::StudentsRepository::new(pool.clone()),
            branches: branches::BranchesRepository::new(pool.clone()),
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            payments: payments::PaymentsRepository::new(pool.clone()),
            trainings: trainings::TrainingsRepository::new(pool.clone()),
            users: users::UsersRepository::new(pool.clone()),
            activity_logs: activity_logs::ActivityLogsRepository::new(pool.clone()),
            pool,
        }
    }
}
