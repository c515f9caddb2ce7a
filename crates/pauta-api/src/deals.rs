//! Handlers for `/deals` endpoints.
//!
//! The pipeline board works exactly like the task kanban: `POST /deals/move`
//! runs the pure move computation over the full pipeline and persists the
//! delta set.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use pauta_core::{
  board::apply_move,
  deal::{Deal, DealStage, DealUpdate, NewDeal},
  store::DashboardStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{error::ApiError, tasks::MoveResponse};

/// `GET /deals`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<Deal>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deals = store
    .list_deals()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(deals))
}

/// JSON body accepted by `POST /deals`.
#[derive(Debug, Deserialize)]
pub struct CreateDealBody {
  #[serde(flatten)]
  pub deal:       NewDeal,
  pub created_by: Uuid,
}

/// `POST /deals` — returns 201 + the stored [`Deal`], positioned at the
/// tail of its stage.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateDealBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deal = store
    .add_deal(body.deal, body.created_by)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(deal)))
}

/// `GET /deals/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Deal>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deal = store
    .get_deal(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("deal {id} not found")))?;
  Ok(Json(deal))
}

/// `PATCH /deals/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<DealUpdate>,
) -> Result<Json<Deal>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deal = store
    .update_deal(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(deal))
}

/// `DELETE /deals/:id` — the stage is renumbered by the store.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_deal(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// JSON body accepted by `POST /deals/move`.
#[derive(Debug, Deserialize)]
pub struct MoveDealBody {
  pub deal_id: Uuid,
  pub stage:   DealStage,
  pub index:   usize,
}

/// `POST /deals/move`
pub async fn move_one<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<MoveDealBody>,
) -> Result<Json<MoveResponse<DealStage>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let deals = store
    .list_deals()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  let items: Vec<_> = deals.iter().map(Deal::board_item).collect();

  let outcome = apply_move(&items, body.deal_id, body.stage, body.index);
  if !outcome.changed.is_empty() {
    store
      .apply_deal_positions(outcome.changed.clone())
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
  }

  Ok(Json(MoveResponse { changed: outcome.changed }))
}
