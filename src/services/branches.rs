//! Sport branch management service

use crate::{
    error::AppResult,
    models::{
        activity::NewActivity,
        branch::{CreateBranch, SportBranch, UpdateBranch},
    },
    repository::Repository,
    services::activity::ActivityService,
};

#[derive(Clone)]
pub struct BranchesService {
    repository: Repository,
    activity: ActivityService,
}

impl BranchesService {
    pub fn new(repository: Repository, activity: ActivityService) -> Self {
        Self { repository, activity }
    }

    pub async fn list(&self) -> AppResult<Vec<SportBranch>> {
        self.repository.branches.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<SportBranch> {
        self.repository.branches.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateBranch) -> AppResult<SportBranch> {
        let branch = self.repository.branches.create(&data).await?;
        self.activity.record(
            NewActivity::new("create", "sport_branch")
                .entity_id(branch.id)
                .description(format!("Created branch {}", branch.name)),
        );
        Ok(branch)
    }

    pub async fn update(&self, id: i32, data: UpdateBranch) -> AppResult<SportBranch> {
        self.repository.branches.update(id, &data).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.branches.delete(id).await?;
        self.activity.record(NewActivity::new("delete", "sport_branch").entity_id(id));
        Ok(())
    }
}
