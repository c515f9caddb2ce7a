//! Handlers for `/users` endpoints.

use std::sync::Arc;

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use pauta_core::{
  store::DashboardStore,
  user::{NewUser, User},
};

use crate::error::ApiError;

/// `GET /users`
pub async fn list<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Vec<User>>, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let users = store
    .list_users()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(users))
}

/// `POST /users` — returns 201 + the stored [`User`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<NewUser>,
) -> Result<impl IntoResponse, ApiError>
where
  S: DashboardStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let user = store
    .add_user(body)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(user)))
}
