//! Handlers for `/planner` endpoints.
//!
//! `POST /planner/notes` is an upsert keyed by
//! `(member, granularity, target_date, start_hour)`: writing to an occupied
//! key replaces content and range. `GET /planner/grid` serves the
//! materialised week view the grid renders from.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{Days, NaiveDate};
use pauta_core::{
  planner::{self, NewPlannerNote, PlannerNote, WeekView},
  store::DashboardStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct WeekParams {
  pub start: NaiveDate,
  pub end:   NaiveDate,
}

/// `GET /planner/notes?start=...&end=...`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<WeekParams>,
) -> Result<Json<Vec<PlannerNote>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let notes = store
    .list_notes(params.start, params.end)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(notes))
}

/// JSON body accepted by `POST /planner/notes`.
#[derive(Debug, Deserialize)]
pub struct UpsertNoteBody {
  #[serde(flatten)]
  pub note:       NewPlannerNote,
  pub created_by: Uuid,
}

/// `POST /planner/notes` — create or replace at the note's key.
///
/// The input is normalised first: inverted ranges are swapped, degenerate
/// ranges collapse to a single hour, day/week notes lose stray hours.
/// Contract violations (missing or out-of-range hours, empty content) are
/// a 400, never a write.
pub async fn upsert<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<UpsertNoteBody>,
) -> Result<Json<PlannerNote>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = body
    .note
    .normalized()
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;
  let note = store
    .upsert_note(input, body.created_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(note))
}

#[derive(Debug, Deserialize)]
pub struct ContentBody {
  pub content: String,
}

/// `PATCH /planner/notes/:id` — content-only edit; the range is untouched.
pub async fn update_content<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<ContentBody>,
) -> Result<Json<PlannerNote>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if body.content.trim().is_empty() {
    return Err(ApiError::BadRequest("note content must not be empty".into()));
  }
  let note = store
    .update_note_content(id, body.content)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(note))
}

/// `DELETE /planner/notes/:id` — idempotent.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_note(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct GridParams {
  pub member:     String,
  pub week_start: NaiveDate,
}

/// `GET /planner/grid?member=...&week_start=...`
///
/// Returns the computed [`WeekView`]: one cell per (day, hour) slot, with
/// hours consumed by a multi-hour note marked `covered` so the renderer
/// suppresses them.
pub async fn grid<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<GridParams>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let week_end = params.week_start + Days::new(6);
  let notes = store
    .list_notes(params.week_start, week_end)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let view: WeekView =
    planner::week_view(&notes, &params.member, params.week_start);
  Ok(Json(view))
}
