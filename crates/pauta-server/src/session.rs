//! Shared-password session model.
//!
//! Access to the dashboard is granted by one shared password. A successful
//! login sets an HttpOnly cookie holding the hex-encoded HMAC-SHA256 of a
//! fixed claim under the server's session secret; every `/api` request is
//! checked against that signature in constant time. There is no per-user
//! identity in the session; attribution travels in request bodies.

use axum::{
  Json,
  body::Body,
  extract::{Request, State},
  http::{HeaderMap, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use crate::AppState;
use pauta_core::store::DashboardStore;

pub const COOKIE_NAME: &str = "pauta-auth";

/// Thirty days, matching the login cookie of the dashboard UI.
const COOKIE_MAX_AGE_SECS: u64 = 30 * 24 * 60 * 60;

/// The signed claim. The cookie proves possession of the session secret,
/// nothing more.
const SESSION_CLAIM: &[u8] = b"authenticated";

// ─── Verifier ────────────────────────────────────────────────────────────────

/// Issues and checks session tokens. Cheap to clone; holds only the keyed
/// MAC state.
#[derive(Clone)]
pub struct SessionVerifier {
  mac: Hmac<Sha256>,
}

impl SessionVerifier {
  pub fn new(secret: &str) -> Result<Self, hmac::digest::InvalidLength> {
    Ok(Self { mac: Hmac::new_from_slice(secret.as_bytes())? })
  }

  /// The token placed in the cookie: hex(HMAC(secret, claim)).
  pub fn issue(&self) -> String {
    let tag = self.mac.clone().chain_update(SESSION_CLAIM).finalize();
    hex::encode(tag.into_bytes())
  }

  /// Constant-time check of a presented token.
  pub fn verify(&self, token: &str) -> bool {
    let Ok(raw) = hex::decode(token) else {
      return false;
    };
    self.mac.clone().chain_update(SESSION_CLAIM).verify_slice(&raw).is_ok()
  }
}

// ─── Cookie plumbing ─────────────────────────────────────────────────────────

pub fn session_cookie(token: &str) -> String {
  format!(
    "{COOKIE_NAME}={token}; Path=/; HttpOnly; SameSite=Lax; \
     Max-Age={COOKIE_MAX_AGE_SECS}"
  )
}

pub fn clear_session_cookie() -> String {
  format!("{COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

/// Pull the session token out of the `Cookie` header, if present.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
  headers
    .get(header::COOKIE)?
    .to_str()
    .ok()?
    .split(';')
    .map(str::trim)
    .find_map(|pair| {
      pair.strip_prefix(COOKIE_NAME).and_then(|rest| rest.strip_prefix('='))
    })
}

/// Whether the request carries a valid session cookie.
pub fn is_authenticated(headers: &HeaderMap, verifier: &SessionVerifier) -> bool {
  token_from_headers(headers).is_some_and(|token| verifier.verify(token))
}

/// axum middleware guarding `/api`: reject anything without a valid cookie.
pub async fn require_session<S>(
  State(state): State<AppState<S>>,
  request: Request<Body>,
  next: Next,
) -> Response
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !is_authenticated(request.headers(), &state.sessions) {
    return (
      StatusCode::UNAUTHORIZED,
      Json(json!({ "error": "não autenticado" })),
    )
      .into_response();
  }
  next.run(request).await
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn verifier() -> SessionVerifier {
    SessionVerifier::new("um-segredo-qualquer").unwrap()
  }

  #[test]
  fn issued_token_verifies() {
    let v = verifier();
    let token = v.issue();
    assert!(v.verify(&token));
  }

  #[test]
  fn tampered_token_is_rejected() {
    let v = verifier();
    let mut token = v.issue();
    // Flip the last hex digit.
    let last = token.pop().unwrap();
    token.push(if last == '0' { '1' } else { '0' });
    assert!(!v.verify(&token));
  }

  #[test]
  fn token_from_another_secret_is_rejected() {
    let v = verifier();
    let other = SessionVerifier::new("outro-segredo").unwrap();
    assert!(!v.verify(&other.issue()));
  }

  #[test]
  fn garbage_token_is_rejected() {
    let v = verifier();
    assert!(!v.verify("not-hex-at-all"));
    assert!(!v.verify(""));
  }

  #[test]
  fn cookie_is_parsed_from_header() {
    let v = verifier();
    let token = v.issue();

    let mut headers = HeaderMap::new();
    headers.insert(
      header::COOKIE,
      HeaderValue::from_str(&format!("other=1; {COOKIE_NAME}={token}"))
        .unwrap(),
    );
    assert_eq!(token_from_headers(&headers), Some(token.as_str()));
    assert!(is_authenticated(&headers, &v));
  }

  #[test]
  fn missing_cookie_is_unauthenticated() {
    let v = verifier();
    let headers = HeaderMap::new();
    assert!(token_from_headers(&headers).is_none());
    assert!(!is_authenticated(&headers, &v));
  }
}
