//! Influencer outreach tracking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutreachStatus {
  #[default]
  Contacted,
  Responded,
  Negotiating,
  Converted,
  Rejected,
}

impl OutreachStatus {
  /// Whether the influencer ever answered: every status past the initial
  /// contact except an outright rejection.
  pub fn is_response(self) -> bool {
    matches!(self, Self::Responded | Self::Negotiating | Self::Converted)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
  #[default]
  Instagram,
  Tiktok,
  Youtube,
  Twitter,
  Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outreach {
  pub outreach_id:     Uuid,
  pub influencer_name: String,
  pub platform:        SocialPlatform,
  pub handle:          Option<String>,
  pub followers_count: Option<u32>,
  /// Team member who made contact.
  pub contacted_by:    String,
  pub status:          OutreachStatus,
  pub notes:           Option<String>,
  pub contact_date:    DateTime<Utc>,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

/// Input to [`crate::store::DashboardStore::add_outreach`].
/// `contact_date` defaults to now when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOutreach {
  pub influencer_name: String,
  #[serde(default)]
  pub platform:        SocialPlatform,
  pub handle:          Option<String>,
  pub followers_count: Option<u32>,
  pub contacted_by:    String,
  #[serde(default)]
  pub status:          OutreachStatus,
  pub notes:           Option<String>,
  pub contact_date:    Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutreachUpdate {
  pub influencer_name: Option<String>,
  pub platform:        Option<SocialPlatform>,
  #[serde(default)]
  pub handle:          Option<Option<String>>,
  #[serde(default)]
  pub followers_count: Option<Option<u32>>,
  pub contacted_by:    Option<String>,
  pub status:          Option<OutreachStatus>,
  #[serde(default)]
  pub notes:           Option<Option<String>>,
  pub contact_date:    Option<DateTime<Utc>>,
}

impl OutreachUpdate {
  pub fn apply(self, outreach: &mut Outreach) {
    if let Some(influencer_name) = self.influencer_name {
      outreach.influencer_name = influencer_name;
    }
    if let Some(platform) = self.platform {
      outreach.platform = platform;
    }
    if let Some(handle) = self.handle {
      outreach.handle = handle;
    }
    if let Some(followers_count) = self.followers_count {
      outreach.followers_count = followers_count;
    }
    if let Some(contacted_by) = self.contacted_by {
      outreach.contacted_by = contacted_by;
    }
    if let Some(status) = self.status {
      outreach.status = status;
    }
    if let Some(notes) = self.notes {
      outreach.notes = notes;
    }
    if let Some(contact_date) = self.contact_date {
      outreach.contact_date = contact_date;
    }
  }
}

/// Per-member conversion funnel, computed by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutreachStats {
  pub contacted_by: String,
  pub total:        u32,
  pub responded:    u32,
  pub converted:    u32,
  pub rejected:     u32,
}
