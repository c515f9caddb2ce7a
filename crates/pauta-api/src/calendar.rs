//! Handlers for `/calendar` endpoints.
//!
//! The range listing merges three feeds, as the calendar page shows all of
//! them: events overlapping the window plus task and project deadlines
//! falling inside it.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pauta_core::{
  calendar::{
    CalendarEvent, CalendarRange, EventUpdate, EventWithAttendees, NewEvent,
  },
  store::DashboardStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct RangeParams {
  pub start: DateTime<Utc>,
  pub end:   DateTime<Utc>,
}

/// `GET /calendar/events?start=...&end=...`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<RangeParams>,
) -> Result<Json<CalendarRange>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let events = store
    .list_events(params.start, params.end)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let task_deadlines = store
    .task_deadlines(params.start, params.end)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let project_deadlines = store
    .project_deadlines(params.start, params.end)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  Ok(Json(CalendarRange { events, task_deadlines, project_deadlines }))
}

/// JSON body accepted by `POST /calendar/events`.
#[derive(Debug, Deserialize)]
pub struct CreateEventBody {
  #[serde(flatten)]
  pub event:      NewEvent,
  pub created_by: Uuid,
}

/// `POST /calendar/events` — returns 201 + the stored event with its
/// attendees (all `pending`).
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateEventBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let event = store
    .add_event(body.event, body.created_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(event)))
}

/// `GET /calendar/events/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<EventWithAttendees>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let event = store
    .get_event(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("event {id} not found")))?;
  Ok(Json(event))
}

/// `PATCH /calendar/events/:id`; attendees are not touched here.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<EventUpdate>,
) -> Result<Json<CalendarEvent>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let event = store
    .update_event(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(event))
}

/// `DELETE /calendar/events/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_event(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}
