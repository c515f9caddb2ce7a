//! Handlers for `/tasks` endpoints.
//!
//! `POST /tasks/move` is the kanban drag-and-drop entry point: it loads the
//! full board, runs the pure move computation, persists only the delta set,
//! and echoes that set back. An unknown id or a same-slot drop yields an
//! empty `changed` list and no writes.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use pauta_core::{
  board::{PositionDelta, apply_move},
  store::DashboardStore,
  task::{NewTask, NewTaskComment, Task, TaskComment, TaskStatus, TaskUpdate},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

// ─── List / CRUD ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// If set, restrict to one project's tasks.
  pub project_id: Option<Uuid>,
}

/// `GET /tasks[?project_id=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tasks = store
    .list_tasks(params.project_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(tasks))
}

/// JSON body accepted by `POST /tasks`.
#[derive(Debug, Deserialize)]
pub struct CreateTaskBody {
  #[serde(flatten)]
  pub task:       NewTask,
  pub created_by: Uuid,
}

/// `POST /tasks` — returns 201 + the stored [`Task`], positioned at the
/// tail of its status column.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateTaskBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let task = store
    .add_task(body.task, body.created_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(task)))
}

/// `GET /tasks/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Task>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let task = store
    .get_task(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("task {id} not found")))?;
  Ok(Json(task))
}

/// `PATCH /tasks/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<TaskUpdate>,
) -> Result<Json<Task>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let task = store
    .update_task(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(task))
}

/// `DELETE /tasks/:id` — the column is renumbered by the store.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_task(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Board moves ─────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /tasks/move`: where the card was dropped.
#[derive(Debug, Deserialize)]
pub struct MoveTaskBody {
  pub task_id: Uuid,
  pub status:  TaskStatus,
  pub index:   usize,
}

#[derive(Debug, Serialize)]
pub struct MoveResponse<B> {
  /// The write-set that was persisted; empty for a no-op drop.
  pub changed: Vec<PositionDelta<B>>,
}

/// `POST /tasks/move`
pub async fn move_one<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<MoveTaskBody>,
) -> Result<Json<MoveResponse<TaskStatus>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let tasks = store
    .list_tasks(None)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let items: Vec<_> = tasks.iter().map(Task::board_item).collect();

  let outcome = apply_move(&items, body.task_id, body.status, body.index);
  if !outcome.changed.is_empty() {
    store
      .apply_task_positions(outcome.changed.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(MoveResponse { changed: outcome.changed }))
}

// ─── Comments ────────────────────────────────────────────────────────────────

/// `GET /tasks/:id/comments`
pub async fn comments<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<TaskComment>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let comments = store
    .list_task_comments(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(comments))
}

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub content: String,
  pub user_id: Uuid,
}

/// `POST /tasks/:id/comments` — returns 201 + the stored comment.
pub async fn add_comment<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<CommentBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let comment = store
    .add_task_comment(
      NewTaskComment { task_id: id, content: body.content },
      body.user_id,
    )
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(comment)))
}
