//! Clients and the interaction log kept against them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
  #[default]
  Lead,
  Prospect,
  Active,
  Inactive,
}

/// How a client touchpoint happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
  Whatsapp,
  Email,
  Call,
  Meeting,
  Note,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
  pub client_id:  Uuid,
  pub name:       String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub company:    Option<String>,
  pub status:     ClientStatus,
  /// Where the lead came from, free text.
  pub source:     Option<String>,
  pub notes:      Option<String>,
  pub owner_id:   Option<Uuid>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInteraction {
  pub interaction_id: Uuid,
  pub client_id:      Uuid,
  pub user_id:        Uuid,
  pub kind:           InteractionType,
  pub summary:        String,
  pub occurred_at:    DateTime<Utc>,
  pub created_at:     DateTime<Utc>,
}

/// Input to [`crate::store::DashboardStore::add_client`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
  pub name:    String,
  pub email:   Option<String>,
  pub phone:   Option<String>,
  pub company: Option<String>,
  #[serde(default)]
  pub status:  ClientStatus,
  pub source:  Option<String>,
  pub notes:   Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientUpdate {
  pub name:    Option<String>,
  #[serde(default)]
  pub email:   Option<Option<String>>,
  #[serde(default)]
  pub phone:   Option<Option<String>>,
  #[serde(default)]
  pub company: Option<Option<String>>,
  pub status:  Option<ClientStatus>,
  #[serde(default)]
  pub source:  Option<Option<String>>,
  #[serde(default)]
  pub notes:   Option<Option<String>>,
  #[serde(default)]
  pub owner_id: Option<Option<Uuid>>,
}

impl ClientUpdate {
  pub fn apply(self, client: &mut Client) {
    if let Some(name) = self.name {
      client.name = name;
    }
    if let Some(email) = self.email {
      client.email = email;
    }
    if let Some(phone) = self.phone {
      client.phone = phone;
    }
    if let Some(company) = self.company {
      client.company = company;
    }
    if let Some(status) = self.status {
      client.status = status;
    }
    if let Some(source) = self.source {
      client.source = source;
    }
    if let Some(notes) = self.notes {
      client.notes = notes;
    }
    if let Some(owner_id) = self.owner_id {
      client.owner_id = owner_id;
    }
  }
}

/// Input to [`crate::store::DashboardStore::add_interaction`].
/// `occurred_at` defaults to the time of recording when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInteraction {
  pub client_id:   Uuid,
  pub kind:        InteractionType,
  pub summary:     String,
  pub occurred_at: Option<DateTime<Utc>>,
}
