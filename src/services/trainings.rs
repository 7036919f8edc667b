//! Training and attendance management service

use crate::{
    error::AppResult,
    models::{
        activity::NewActivity,
        training::{
            AttendanceRecord, CreateAttendance, CreateTraining, Training, TrainingQuery,
            UpdateTraining,
        },
    },
    repository::Repository,
    services::activity::ActivityService,
};

#[derive(Clone)]
pub struct TrainingsService {
    repository: Repository,
    activity: ActivityService,
}

impl TrainingsService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    pub async fn list(&self, query: &TrainingQuery) -> AppResult<Vec<Training>> {
        self.repository.trainings.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Training> {
        self.repository.trainings.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateTraining) -> AppResult<Training> {
        let training = self.repository.trainings.create(&data).await?;
        self.activity.record(
            NewActivity::new("create", "training")
                .entity_id(training.id)
                .description(format!("Created training {}", training.title)),
        );
        Ok(training)
    }

    pub async fn update(&self, id: i32, data: UpdateTraining) -> AppResult<Training> {
        self.repository.trainings.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.trainings.delete(id).await?;
        self.activity.record(NewActivity::new("delete", "training").entity_id(id));
        Ok(())
    }

    /// Attendance sheet for one training
    pub async fn list_attendance(&self, training_id: i32) -> AppResult<Vec<AttendanceRecord>> {
        // Verify training exists
        self.repository.trainings.get_by_id(training_id).await?;
        self.repository.trainings.list_attendance(training_id).await
    }

    /// Record one student's attendance; re-recording the pair overwrites
    pub async fn record_attendance(
        &self,
        training_id: i32,
        data: CreateAttendance,
    ) -> AppResult<AttendanceRecord> {
        self.repository.trainings.get_by_id(training_id).await?;
        self.repository.students.get_by_id(data.student_id).await?;
        self.repository.trainings.upsert_attendance(training_id, &data).await
    }

    pub async fn delete_attendance(&self, id: i32) -> AppResult<()> {
        self.repository.trainings.delete_attendance(id).await
    }
}
