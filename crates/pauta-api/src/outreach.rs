//! Handlers for `/outreach` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pauta_core::{
  outreach::{NewOutreach, Outreach, OutreachStats, OutreachUpdate},
  store::DashboardStore,
};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /outreach`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Outreach>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entries = store
    .list_outreach()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}

/// `GET /outreach/stats` — the per-member conversion funnel.
pub async fn stats<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<OutreachStats>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let stats = store
    .outreach_stats()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(stats))
}

/// `POST /outreach` — returns 201 + the stored entry.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewOutreach>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entry = store
    .add_outreach(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(entry)))
}

/// `GET /outreach/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Outreach>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entry = store
    .get_outreach(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("outreach {id} not found")))?;
  Ok(Json(entry))
}

/// `PATCH /outreach/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<OutreachUpdate>,
) -> Result<Json<Outreach>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let entry = store
    .update_outreach(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entry))
}

/// `DELETE /outreach/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_outreach(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
