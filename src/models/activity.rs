//! Activity log model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Append-only audit trail entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ActivityLog {
    pub id: i64,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub description: Option<String>,
    pub user_type: Option<String>,
    pub user_role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One entry to append. Writers fire and forget; failures never surface.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<String>,
    pub description: Option<String>,
    pub user_type: Option<String>,
    pub user_role: Option<String>,
}

impl NewActivity {
    pub fn new(action: &str, entity_type: &str) -> Self {
        Self {
            action: action.to_string(),
            entity_type: entity_type.to_string(),
            entity_id: None,
            description: None,
            user_type: None,
            user_role: None,
        }
    }

    pub fn entity_id(mut self, id: impl ToString) -> Self {
        self.entity_id = Some(id.to_string());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn actor(mut self, user_type: &str, user_role: &str) -> Self {
        self.user_type = Some(user_type.to_string());
        self.user_role = Some(user_role.to_string());
        self
    }
}

/// Activity log list filter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivityQuery {
    pub entity_type: Option<String>,
    pub action: Option<String>,
    /// Newest-first cap, defaults to 100
    pub limit: Option<i64>,
}
