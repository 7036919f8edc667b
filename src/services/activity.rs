//! Best-effort activity log writer
//!
//! The audit trail must never affect the outcome of the operation that
//! produced it: `record` spawns the insert and swallows failures, logging
//! them at `warn` only.

use crate::{
    error::AppResult,
    models::activity::{ActivityLog, ActivityQuery, NewActivity},
    repository::Repository,
};

#[derive(Clone)]
pub struct ActivityService {
    repository: Repository,
}

impl ActivityService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Append an entry, fire-and-forget. Callers never learn whether the
    /// write succeeded.
    pub fn record(&self, entry: NewActivity) {
        let repository = self.repository.clone();
        tokio::spawn(async move {
            if let Err(e) = repository.activity_logs.append(&entry).await {
                tracing::warn!(
                    action = %entry.action,
                    entity_type = %entry.entity_type,
                    "Activity log append failed: {}",
                    e
                );
            }
        });
    }

    /// List log entries
    pub async fn list(&self, query: &ActivityQuery) -> AppResult<Vec<ActivityLog>> {
        self.repository.activity_logs.list(query).await
    }
}
