//! Handlers for `/projects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/projects` | All projects, newest first |
//! | `POST`   | `/projects` | Body: [`CreateProjectBody`]; creator becomes manager |
//! | `GET`    | `/projects/:id` | |
//! | `PATCH`  | `/projects/:id` | Body: partial [`ProjectUpdate`] |
//! | `DELETE` | `/projects/:id` | Cascades to tasks and memberships |
//! | `GET`    | `/projects/:id/members` | |
//! | `POST`   | `/projects/:id/members` | Idempotent |
//! | `DELETE` | `/projects/:id/members/:user_id` | |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pauta_core::{
  project::{
    NewProject, Project, ProjectMember, ProjectMemberRole, ProjectUpdate,
  },
  store::DashboardStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

/// JSON body accepted by `POST /projects`.
#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
  #[serde(flatten)]
  pub project:    NewProject,
  pub created_by: Uuid,
}

/// `GET /projects`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Project>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let projects = store
    .list_projects()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(projects))
}

/// `POST /projects` — returns 201 + the stored [`Project`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateProjectBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let project = store
    .add_project(body.project, body.created_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(project)))
}

/// `GET /projects/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Project>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let project = store
    .get_project(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("project {id} not found")))?;
  Ok(Json(project))
}

/// `PATCH /projects/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<ProjectUpdate>,
) -> Result<Json<Project>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let project = store
    .update_project(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(project))
}

/// `DELETE /projects/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_project(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /projects/:id/members`
pub async fn members<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ProjectMember>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let members = store
    .list_project_members(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(members))
}

#[derive(Debug, Deserialize)]
pub struct AddMemberBody {
  pub user_id: Uuid,
  #[serde(default)]
  pub role:    ProjectMemberRole,
}

/// `POST /projects/:id/members`
pub async fn add_member<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<AddMemberBody>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .add_project_member(id, body.user_id, body.role)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /projects/:id/members/:user_id`
pub async fn remove_member<S>(
  State(store): State<Arc<S>>,
  Path((id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .remove_project_member(id, user_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
