//! Calendar events, attendees, and the deadline feeds merged into the
//! calendar page alongside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{project::Project, task::Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  #[default]
  Meeting,
  Deadline,
  Reminder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendeeStatus {
  #[default]
  Pending,
  Accepted,
  Declined,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarEvent {
  pub event_id:    Uuid,
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  DateTime<Utc>,
  pub end_time:    DateTime<Utc>,
  pub all_day:     bool,
  pub kind:        EventKind,
  /// Display colour, free-form (e.g. a hex code).
  pub color:       Option<String>,
  pub project_id:  Option<Uuid>,
  pub created_by:  Uuid,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventAttendee {
  pub event_id: Uuid,
  pub user_id:  Uuid,
  pub status:   AttendeeStatus,
}

/// An event bundled with its attendee list — the calendar read model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventWithAttendees {
  pub event:     CalendarEvent,
  pub attendees: Vec<EventAttendee>,
}

/// Input to [`crate::store::DashboardStore::add_event`]. Attendees are
/// attached at creation with `Pending` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
  pub title:        String,
  pub description:  Option<String>,
  pub start_time:   DateTime<Utc>,
  pub end_time:     DateTime<Utc>,
  #[serde(default)]
  pub all_day:      bool,
  #[serde(default)]
  pub kind:         EventKind,
  pub color:        Option<String>,
  pub project_id:   Option<Uuid>,
  #[serde(default)]
  pub attendee_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventUpdate {
  pub title:       Option<String>,
  #[serde(default)]
  pub description: Option<Option<String>>,
  pub start_time:  Option<DateTime<Utc>>,
  pub end_time:    Option<DateTime<Utc>>,
  pub all_day:     Option<bool>,
  pub kind:        Option<EventKind>,
  #[serde(default)]
  pub color:       Option<Option<String>>,
  #[serde(default)]
  pub project_id:  Option<Option<Uuid>>,
}

impl EventUpdate {
  pub fn apply(self, event: &mut CalendarEvent) {
    if let Some(title) = self.title {
      event.title = title;
    }
    if let Some(description) = self.description {
      event.description = description;
    }
    if let Some(start_time) = self.start_time {
      event.start_time = start_time;
    }
    if let Some(end_time) = self.end_time {
      event.end_time = end_time;
    }
    if let Some(all_day) = self.all_day {
      event.all_day = all_day;
    }
    if let Some(kind) = self.kind {
      event.kind = kind;
    }
    if let Some(color) = self.color {
      event.color = color;
    }
    if let Some(project_id) = self.project_id {
      event.project_id = project_id;
    }
  }
}

/// Everything the calendar page shows for a time range: events plus task
/// and project deadlines falling inside it.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarRange {
  pub events:            Vec<EventWithAttendees>,
  pub task_deadlines:    Vec<Task>,
  pub project_deadlines: Vec<Project>,
}
