//! Kanban task cards, ordered per status column, and their comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::BoardItem;

/// Kanban column a task sits in.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  Todo,
  InProgress,
  InReview,
  Done,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
  Low,
  #[default]
  Medium,
  High,
  Urgent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub task_id:     Uuid,
  pub title:       String,
  pub description: Option<String>,
  pub status:      TaskStatus,
  pub priority:    TaskPriority,
  pub project_id:  Uuid,
  pub assigned_to: Option<Uuid>,
  pub created_by:  Uuid,
  pub due_date:    Option<DateTime<Utc>>,
  /// Ordinal within the status column; see [`crate::board`].
  pub position:    u32,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Task {
  /// Projection onto the ordered-board model.
  pub fn board_item(&self) -> BoardItem<TaskStatus> {
    BoardItem {
      id:       self.task_id,
      bucket:   self.status,
      position: self.position,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskComment {
  pub comment_id: Uuid,
  pub task_id:    Uuid,
  pub user_id:    Uuid,
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Input to [`crate::store::DashboardStore::add_task`].
/// `position` is assigned by the store: the current size of the status
/// column the task lands in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTask {
  pub title:       String,
  pub description: Option<String>,
  #[serde(default)]
  pub status:      TaskStatus,
  #[serde(default)]
  pub priority:    TaskPriority,
  pub project_id:  Uuid,
  pub assigned_to: Option<Uuid>,
  pub due_date:    Option<DateTime<Utc>>,
}

/// Partial update; does not touch `status`/`position`, which only change
/// through [`crate::board::apply_move`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
  pub title:       Option<String>,
  #[serde(default)]
  pub description: Option<Option<String>>,
  pub priority:    Option<TaskPriority>,
  #[serde(default)]
  pub assigned_to: Option<Option<Uuid>>,
  #[serde(default)]
  pub due_date:    Option<Option<DateTime<Utc>>>,
}

impl TaskUpdate {
  pub fn apply(self, task: &mut Task) {
    if let Some(title) = self.title {
      task.title = title;
    }
    if let Some(description) = self.description {
      task.description = description;
    }
    if let Some(priority) = self.priority {
      task.priority = priority;
    }
    if let Some(assigned_to) = self.assigned_to {
      task.assigned_to = assigned_to;
    }
    if let Some(due_date) = self.due_date {
      task.due_date = due_date;
    }
  }
}

/// Input to [`crate::store::DashboardStore::add_task_comment`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskComment {
  pub task_id: Uuid,
  pub content: String,
}
