//! Projects and project membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
  #[default]
  Planning,
  InProgress,
  Completed,
  OnHold,
  Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectMemberRole {
  Manager,
  #[default]
  Member,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
  pub project_id:  Uuid,
  pub name:        String,
  pub description: Option<String>,
  pub status:      ProjectStatus,
  /// Client this project is delivered for, if any.
  pub client_id:   Option<Uuid>,
  pub created_by:  Uuid,
  pub due_date:    Option<DateTime<Utc>>,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMember {
  pub project_id: Uuid,
  pub user_id:    Uuid,
  pub role:       ProjectMemberRole,
  pub joined_at:  DateTime<Utc>,
}

/// Input to [`crate::store::DashboardStore::add_project`].
/// The creator is enrolled as a `Manager` member by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
  pub name:        String,
  pub description: Option<String>,
  #[serde(default)]
  pub status:      ProjectStatus,
  pub client_id:   Option<Uuid>,
  pub due_date:    Option<DateTime<Utc>>,
}

/// Partial update. `None` leaves a field untouched; the inner `Option`
/// of nullable fields distinguishes "set" from "clear".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectUpdate {
  pub name:        Option<String>,
  #[serde(default)]
  pub description: Option<Option<String>>,
  pub status:      Option<ProjectStatus>,
  #[serde(default)]
  pub client_id:   Option<Option<Uuid>>,
  #[serde(default)]
  pub due_date:    Option<Option<DateTime<Utc>>>,
}

impl ProjectUpdate {
  pub fn apply(self, project: &mut Project) {
    if let Some(name) = self.name {
      project.name = name;
    }
    if let Some(description) = self.description {
      project.description = description;
    }
    if let Some(status) = self.status {
      project.status = status;
    }
    if let Some(client_id) = self.client_id {
      project.client_id = client_id;
    }
    if let Some(due_date) = self.due_date {
      project.due_date = due_date;
    }
  }
}
