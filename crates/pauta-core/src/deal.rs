//! Sales deals — pipeline cards ordered per stage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::BoardItem;

/// Pipeline stage a deal sits in.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum DealStage {
  #[default]
  Negotiating,
  Proposed,
  Won,
  Lost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
  pub deal_id:     Uuid,
  pub title:       String,
  /// Deal value in centavos; exact integer arithmetic, no floats.
  pub value_cents: Option<i64>,
  pub stage:       DealStage,
  pub client_id:   Uuid,
  pub created_by:  Uuid,
  pub notes:       Option<String>,
  /// Ordinal within the stage; see [`crate::board`].
  pub position:    u32,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl Deal {
  /// Projection onto the ordered-board model.
  pub fn board_item(&self) -> BoardItem<DealStage> {
    BoardItem {
      id:       self.deal_id,
      bucket:   self.stage,
      position: self.position,
    }
  }
}

/// Input to [`crate::store::DashboardStore::add_deal`].
/// `position` is assigned by the store: the current size of the stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDeal {
  pub title:       String,
  pub value_cents: Option<i64>,
  #[serde(default)]
  pub stage:       DealStage,
  pub client_id:   Uuid,
  pub notes:       Option<String>,
}

/// Partial update; does not touch `stage`/`position`, which only change
/// through [`crate::board::apply_move`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DealUpdate {
  pub title:       Option<String>,
  #[serde(default)]
  pub value_cents: Option<Option<i64>>,
  pub client_id:   Option<Uuid>,
  #[serde(default)]
  pub notes:       Option<Option<String>>,
}

impl DealUpdate {
  pub fn apply(self, deal: &mut Deal) {
    if let Some(title) = self.title {
      deal.title = title;
    }
    if let Some(value_cents) = self.value_cents {
      deal.value_cents = value_cents;
    }
    if let Some(client_id) = self.client_id {
      deal.client_id = client_id;
    }
    if let Some(notes) = self.notes {
      deal.notes = notes;
    }
  }
}
