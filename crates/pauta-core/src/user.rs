//! Users — team members referenced by tasks, projects, events and notes.
//!
//! Authentication does not live here: access is granted by the shared
//! dashboard password at the server layer. Users exist for attribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
  Admin,
  #[default]
  Member,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
  pub user_id:    Uuid,
  pub name:       String,
  pub email:      String,
  pub role:       UserRole,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

/// Input to [`crate::store::DashboardStore::add_user`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
  pub name:  String,
  pub email: String,
  #[serde(default)]
  pub role:  UserRole,
}
