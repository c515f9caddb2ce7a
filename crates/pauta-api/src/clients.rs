//! Handlers for `/clients` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use chrono::{DateTime, Utc};
use pauta_core::{
  client::{
    Client, ClientInteraction, ClientUpdate, InteractionType, NewClient,
    NewInteraction,
  },
  store::DashboardStore,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Substring filter over name, email and company.
  pub search: Option<String>,
}

/// `GET /clients[?search=...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Client>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let clients = store
    .list_clients(params.search.as_deref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(clients))
}

/// JSON body accepted by `POST /clients`.
#[derive(Debug, Deserialize)]
pub struct CreateClientBody {
  #[serde(flatten)]
  pub client:   NewClient,
  pub owner_id: Uuid,
}

/// `POST /clients` — returns 201 + the stored [`Client`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CreateClientBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let client = store
    .add_client(body.client, body.owner_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(client)))
}

/// `GET /clients/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Client>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let client = store
    .get_client(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("client {id} not found")))?;
  Ok(Json(client))
}

/// `PATCH /clients/:id`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(patch): Json<ClientUpdate>,
) -> Result<Json<Client>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let client = store
    .update_client(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(client))
}

/// `DELETE /clients/:id` — cascades to deals and interactions.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  store
    .delete_client(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(StatusCode::NO_CONTENT)
}

/// `GET /clients/:id/interactions`
pub async fn interactions<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Vec<ClientInteraction>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let log = store
    .list_interactions(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(log))
}

#[derive(Debug, Deserialize)]
pub struct InteractionBody {
  pub kind:        InteractionType,
  pub summary:     String,
  pub occurred_at: Option<DateTime<Utc>>,
  pub user_id:     Uuid,
}

/// `POST /clients/:id/interactions` — returns 201 + the stored interaction.
pub async fn add_interaction<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<Uuid>,
  Json(body): Json<InteractionBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let interaction = store
    .add_interaction(
      NewInteraction {
        client_id:   id,
        kind:        body.kind,
        summary:     body.summary,
        occurred_at: body.occurred_at,
      },
      body.user_id,
    )
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(interaction)))
}
