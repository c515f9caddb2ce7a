//! Login, logout, and session-status handlers.

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::State,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
  AppState,
  session::{clear_session_cookie, is_authenticated, session_cookie},
};
use pauta_core::store::DashboardStore;

/// Verify the shared dashboard password against its argon2 PHC string.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
  let Ok(parsed) = PasswordHash::new(password_hash) else {
    return false;
  };
  Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  pub password: String,
}

/// `POST /auth/login` — exchange the shared password for a session cookie.
pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginBody>,
) -> Response
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !verify_password(&body.password, &state.config.auth_password_hash) {
    return (
      StatusCode::UNAUTHORIZED,
      Json(json!({ "error": "senha incorreta" })),
    )
      .into_response();
  }

  let token = state.sessions.issue();
  set_cookie(Json(json!({ "ok": true })).into_response(), &session_cookie(&token))
}

/// `POST /auth/logout`
pub async fn logout<S>(State(_state): State<AppState<S>>) -> Response
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  set_cookie(
    Json(json!({ "ok": true })).into_response(),
    &clear_session_cookie(),
  )
}

/// `GET /auth/session`
pub async fn session<S>(
  State(state): State<AppState<S>>,
  headers: axum::http::HeaderMap,
) -> Json<serde_json::Value>
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Json(json!({
    "authenticated": is_authenticated(&headers, &state.sessions)
  }))
}

fn set_cookie(mut response: Response, cookie: &str) -> Response {
  match HeaderValue::from_str(cookie) {
    Ok(value) => {
      response.headers_mut().insert(header::SET_COOKIE, value);
      response
    }
    Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
  }
}

#[cfg(test)]
mod tests {
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use rand_core::OsRng;

  use super::*;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  #[test]
  fn correct_password_verifies() {
    let phc = hash("pauta123");
    assert!(verify_password("pauta123", &phc));
  }

  #[test]
  fn wrong_password_is_rejected() {
    let phc = hash("pauta123");
    assert!(!verify_password("outra", &phc));
  }

  #[test]
  fn malformed_phc_string_is_rejected() {
    assert!(!verify_password("pauta123", "not-a-phc-string"));
  }
}
