//! HTTP server for the Pauta dashboard.
//!
//! Mounts the JSON API from `pauta-api` under `/api`, guarded by the
//! shared-password session described in [`session`], and exposes the
//! login/logout endpoints beside it.

pub mod auth;
pub mod seed;
pub mod session;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router, middleware,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use pauta_core::store::DashboardStore;
use session::SessionVerifier;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` (with
/// `PAUTA_*` environment overrides).
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:               String,
  pub port:               u16,
  pub store_path:         PathBuf,
  /// PHC string produced by argon2 for the shared dashboard password;
  /// generate one with `pauta --hash-password`.
  pub auth_password_hash: String,
  /// Key for the HMAC signing the session cookie.
  pub session_secret:     String,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: DashboardStore> {
  pub store:    Arc<S>,
  pub config:   Arc<ServerConfig>,
  pub sessions: Arc<SessionVerifier>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full axum [`Router`]: auth endpoints plus the guarded API.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let api = pauta_api::api_router(state.store.clone()).layer(
    middleware::from_fn_with_state(state.clone(), session::require_session::<S>),
  );

  Router::new()
    .route("/auth/login", post(auth::login::<S>))
    .route("/auth/logout", post(auth::logout::<S>))
    .route("/auth/session", get(auth::session::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}
