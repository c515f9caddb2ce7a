//! Conversions between domain types and their SQLite column encodings.
//!
//! Uuids and timestamps are stored as TEXT; closed enums are stored as
//! their serde string form, so the database values match the JSON the API
//! speaks. Each `Raw*` struct mirrors one table's column list (the
//! `*_COLUMNS` const beside it) and converts fallibly into its domain type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use pauta_core::{
  calendar::{CalendarEvent, EventAttendee},
  client::{Client, ClientInteraction},
  deal::Deal,
  outreach::Outreach,
  planner::PlannerNote,
  project::{Project, ProjectMember},
  task::{Task, TaskComment},
  user::User,
};

use crate::{Error, Result};

// ─── Scalar codecs ───────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(Error::Uuid)
}

pub fn decode_uuid_opt(s: Option<&str>) -> Result<Option<Uuid>> {
  s.map(decode_uuid).transpose()
}

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn decode_dt_opt(s: Option<&str>) -> Result<Option<DateTime<Utc>>> {
  s.map(decode_dt).transpose()
}

pub fn encode_date(d: NaiveDate) -> String { d.to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  s.parse().map_err(|e: chrono::ParseError| Error::DateParse(e.to_string()))
}

/// Store a closed enum as its serde string form (`"in_progress"`, …).
pub fn encode_enum<T: Serialize>(value: &T) -> Result<String> {
  match serde_json::to_value(value)? {
    serde_json::Value::String(s) => Ok(s),
    other => Err(Error::Json(serde::ser::Error::custom(format!(
      "expected string-encoded enum, got {other}"
    )))),
  }
}

pub fn decode_enum<T: DeserializeOwned>(
  column: &'static str,
  value: &str,
) -> Result<T> {
  serde_json::from_value(serde_json::Value::String(value.to_owned())).map_err(
    |_| Error::UnknownEnumValue { column, value: value.to_owned() },
  )
}

fn hour_from_i64(column: &'static str, v: Option<i64>) -> Result<Option<u8>> {
  v.map(|h| {
    u8::try_from(h).map_err(|_| Error::HourOutOfRange { column, value: h })
  })
  .transpose()
}

// ─── Users ───────────────────────────────────────────────────────────────────

pub const USER_COLUMNS: &str =
  "user_id, name, email, role, created_at, updated_at";

pub struct RawUser {
  pub user_id:    String,
  pub name:       String,
  pub email:      String,
  pub role:       String,
  pub created_at: String,
  pub updated_at: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      user_id:    row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      role:       row.get(3)?,
      created_at: row.get(4)?,
      updated_at: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      user_id:    decode_uuid(&self.user_id)?,
      name:       self.name,
      email:      self.email,
      role:       decode_enum("role", &self.role)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Clients ─────────────────────────────────────────────────────────────────

pub const CLIENT_COLUMNS: &str = "client_id, name, email, phone, company, \
   status, source, notes, owner_id, created_at, updated_at";

pub struct RawClient {
  pub client_id:  String,
  pub name:       String,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub company:    Option<String>,
  pub status:     String,
  pub source:     Option<String>,
  pub notes:      Option<String>,
  pub owner_id:   Option<String>,
  pub created_at: String,
  pub updated_at: String,
}

impl RawClient {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      client_id:  row.get(0)?,
      name:       row.get(1)?,
      email:      row.get(2)?,
      phone:      row.get(3)?,
      company:    row.get(4)?,
      status:     row.get(5)?,
      source:     row.get(6)?,
      notes:      row.get(7)?,
      owner_id:   row.get(8)?,
      created_at: row.get(9)?,
      updated_at: row.get(10)?,
    })
  }

  pub fn into_client(self) -> Result<Client> {
    Ok(Client {
      client_id:  decode_uuid(&self.client_id)?,
      name:       self.name,
      email:      self.email,
      phone:      self.phone,
      company:    self.company,
      status:     decode_enum("status", &self.status)?,
      source:     self.source,
      notes:      self.notes,
      owner_id:   decode_uuid_opt(self.owner_id.as_deref())?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Projects ────────────────────────────────────────────────────────────────

pub const PROJECT_COLUMNS: &str = "project_id, name, description, status, \
   client_id, created_by, due_date, created_at, updated_at";

pub struct RawProject {
  pub project_id:  String,
  pub name:        String,
  pub description: Option<String>,
  pub status:      String,
  pub client_id:   Option<String>,
  pub created_by:  String,
  pub due_date:    Option<String>,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawProject {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      project_id:  row.get(0)?,
      name:        row.get(1)?,
      description: row.get(2)?,
      status:      row.get(3)?,
      client_id:   row.get(4)?,
      created_by:  row.get(5)?,
      due_date:    row.get(6)?,
      created_at:  row.get(7)?,
      updated_at:  row.get(8)?,
    })
  }

  pub fn into_project(self) -> Result<Project> {
    Ok(Project {
      project_id:  decode_uuid(&self.project_id)?,
      name:        self.name,
      description: self.description,
      status:      decode_enum("status", &self.status)?,
      client_id:   decode_uuid_opt(self.client_id.as_deref())?,
      created_by:  decode_uuid(&self.created_by)?,
      due_date:    decode_dt_opt(self.due_date.as_deref())?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const MEMBER_COLUMNS: &str = "project_id, user_id, role, joined_at";

pub struct RawProjectMember {
  pub project_id: String,
  pub user_id:    String,
  pub role:       String,
  pub joined_at:  String,
}

impl RawProjectMember {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      project_id: row.get(0)?,
      user_id:    row.get(1)?,
      role:       row.get(2)?,
      joined_at:  row.get(3)?,
    })
  }

  pub fn into_member(self) -> Result<ProjectMember> {
    Ok(ProjectMember {
      project_id: decode_uuid(&self.project_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      role:       decode_enum("role", &self.role)?,
      joined_at:  decode_dt(&self.joined_at)?,
    })
  }
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

pub const TASK_COLUMNS: &str = "task_id, title, description, status, \
   priority, project_id, assigned_to, created_by, due_date, position, \
   created_at, updated_at";

pub struct RawTask {
  pub task_id:     String,
  pub title:       String,
  pub description: Option<String>,
  pub status:      String,
  pub priority:    String,
  pub project_id:  String,
  pub assigned_to: Option<String>,
  pub created_by:  String,
  pub due_date:    Option<String>,
  pub position:    i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawTask {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      task_id:     row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      status:      row.get(3)?,
      priority:    row.get(4)?,
      project_id:  row.get(5)?,
      assigned_to: row.get(6)?,
      created_by:  row.get(7)?,
      due_date:    row.get(8)?,
      position:    row.get(9)?,
      created_at:  row.get(10)?,
      updated_at:  row.get(11)?,
    })
  }

  pub fn into_task(self) -> Result<Task> {
    Ok(Task {
      task_id:     decode_uuid(&self.task_id)?,
      title:       self.title,
      description: self.description,
      status:      decode_enum("status", &self.status)?,
      priority:    decode_enum("priority", &self.priority)?,
      project_id:  decode_uuid(&self.project_id)?,
      assigned_to: decode_uuid_opt(self.assigned_to.as_deref())?,
      created_by:  decode_uuid(&self.created_by)?,
      due_date:    decode_dt_opt(self.due_date.as_deref())?,
      position:    self.position as u32,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const COMMENT_COLUMNS: &str =
  "comment_id, task_id, user_id, content, created_at";

pub struct RawTaskComment {
  pub comment_id: String,
  pub task_id:    String,
  pub user_id:    String,
  pub content:    String,
  pub created_at: String,
}

impl RawTaskComment {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      comment_id: row.get(0)?,
      task_id:    row.get(1)?,
      user_id:    row.get(2)?,
      content:    row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_comment(self) -> Result<TaskComment> {
    Ok(TaskComment {
      comment_id: decode_uuid(&self.comment_id)?,
      task_id:    decode_uuid(&self.task_id)?,
      user_id:    decode_uuid(&self.user_id)?,
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

// ─── Deals ───────────────────────────────────────────────────────────────────

pub const DEAL_COLUMNS: &str = "deal_id, title, value_cents, stage, \
   client_id, created_by, notes, position, created_at, updated_at";

pub struct RawDeal {
  pub deal_id:     String,
  pub title:       String,
  pub value_cents: Option<i64>,
  pub stage:       String,
  pub client_id:   String,
  pub created_by:  String,
  pub notes:       Option<String>,
  pub position:    i64,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawDeal {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      deal_id:     row.get(0)?,
      title:       row.get(1)?,
      value_cents: row.get(2)?,
      stage:       row.get(3)?,
      client_id:   row.get(4)?,
      created_by:  row.get(5)?,
      notes:       row.get(6)?,
      position:    row.get(7)?,
      created_at:  row.get(8)?,
      updated_at:  row.get(9)?,
    })
  }

  pub fn into_deal(self) -> Result<Deal> {
    Ok(Deal {
      deal_id:     decode_uuid(&self.deal_id)?,
      title:       self.title,
      value_cents: self.value_cents,
      stage:       decode_enum("stage", &self.stage)?,
      client_id:   decode_uuid(&self.client_id)?,
      created_by:  decode_uuid(&self.created_by)?,
      notes:       self.notes,
      position:    self.position as u32,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Client interactions ─────────────────────────────────────────────────────

pub const INTERACTION_COLUMNS: &str =
  "interaction_id, client_id, user_id, kind, summary, occurred_at, created_at";

pub struct RawInteraction {
  pub interaction_id: String,
  pub client_id:      String,
  pub user_id:        String,
  pub kind:           String,
  pub summary:        String,
  pub occurred_at:    String,
  pub created_at:     String,
}

impl RawInteraction {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      interaction_id: row.get(0)?,
      client_id:      row.get(1)?,
      user_id:        row.get(2)?,
      kind:           row.get(3)?,
      summary:        row.get(4)?,
      occurred_at:    row.get(5)?,
      created_at:     row.get(6)?,
    })
  }

  pub fn into_interaction(self) -> Result<ClientInteraction> {
    Ok(ClientInteraction {
      interaction_id: decode_uuid(&self.interaction_id)?,
      client_id:      decode_uuid(&self.client_id)?,
      user_id:        decode_uuid(&self.user_id)?,
      kind:           decode_enum("kind", &self.kind)?,
      summary:        self.summary,
      occurred_at:    decode_dt(&self.occurred_at)?,
      created_at:     decode_dt(&self.created_at)?,
    })
  }
}

// ─── Calendar ────────────────────────────────────────────────────────────────

pub const EVENT_COLUMNS: &str = "event_id, title, description, start_time, \
   end_time, all_day, kind, color, project_id, created_by, created_at, \
   updated_at";

pub struct RawEvent {
  pub event_id:    String,
  pub title:       String,
  pub description: Option<String>,
  pub start_time:  String,
  pub end_time:    String,
  pub all_day:     bool,
  pub kind:        String,
  pub color:       Option<String>,
  pub project_id:  Option<String>,
  pub created_by:  String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawEvent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id:    row.get(0)?,
      title:       row.get(1)?,
      description: row.get(2)?,
      start_time:  row.get(3)?,
      end_time:    row.get(4)?,
      all_day:     row.get(5)?,
      kind:        row.get(6)?,
      color:       row.get(7)?,
      project_id:  row.get(8)?,
      created_by:  row.get(9)?,
      created_at:  row.get(10)?,
      updated_at:  row.get(11)?,
    })
  }

  pub fn into_event(self) -> Result<CalendarEvent> {
    Ok(CalendarEvent {
      event_id:    decode_uuid(&self.event_id)?,
      title:       self.title,
      description: self.description,
      start_time:  decode_dt(&self.start_time)?,
      end_time:    decode_dt(&self.end_time)?,
      all_day:     self.all_day,
      kind:        decode_enum("kind", &self.kind)?,
      color:       self.color,
      project_id:  decode_uuid_opt(self.project_id.as_deref())?,
      created_by:  decode_uuid(&self.created_by)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub const ATTENDEE_COLUMNS: &str = "event_id, user_id, status";

pub struct RawAttendee {
  pub event_id: String,
  pub user_id:  String,
  pub status:   String,
}

impl RawAttendee {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      event_id: row.get(0)?,
      user_id:  row.get(1)?,
      status:   row.get(2)?,
    })
  }

  pub fn into_attendee(self) -> Result<EventAttendee> {
    Ok(EventAttendee {
      event_id: decode_uuid(&self.event_id)?,
      user_id:  decode_uuid(&self.user_id)?,
      status:   decode_enum("status", &self.status)?,
    })
  }
}

// ─── Outreach ────────────────────────────────────────────────────────────────

pub const OUTREACH_COLUMNS: &str = "outreach_id, influencer_name, platform, \
   handle, followers_count, contacted_by, status, notes, contact_date, \
   created_at, updated_at";

pub struct RawOutreach {
  pub outreach_id:     String,
  pub influencer_name: String,
  pub platform:        String,
  pub handle:          Option<String>,
  pub followers_count: Option<i64>,
  pub contacted_by:    String,
  pub status:          String,
  pub notes:           Option<String>,
  pub contact_date:    String,
  pub created_at:      String,
  pub updated_at:      String,
}

impl RawOutreach {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      outreach_id:     row.get(0)?,
      influencer_name: row.get(1)?,
      platform:        row.get(2)?,
      handle:          row.get(3)?,
      followers_count: row.get(4)?,
      contacted_by:    row.get(5)?,
      status:          row.get(6)?,
      notes:           row.get(7)?,
      contact_date:    row.get(8)?,
      created_at:      row.get(9)?,
      updated_at:      row.get(10)?,
    })
  }

  pub fn into_outreach(self) -> Result<Outreach> {
    Ok(Outreach {
      outreach_id:     decode_uuid(&self.outreach_id)?,
      influencer_name: self.influencer_name,
      platform:        decode_enum("platform", &self.platform)?,
      handle:          self.handle,
      followers_count: self.followers_count.map(|c| c as u32),
      contacted_by:    self.contacted_by,
      status:          decode_enum("status", &self.status)?,
      notes:           self.notes,
      contact_date:    decode_dt(&self.contact_date)?,
      created_at:      decode_dt(&self.created_at)?,
      updated_at:      decode_dt(&self.updated_at)?,
    })
  }
}

// ─── Planner notes ───────────────────────────────────────────────────────────

pub const NOTE_COLUMNS: &str = "note_id, member, granularity, target_date, \
   start_hour, end_hour, content, created_by, created_at, updated_at";

pub struct RawNote {
  pub note_id:     String,
  pub member:      String,
  pub granularity: String,
  pub target_date: String,
  pub start_hour:  Option<i64>,
  pub end_hour:    Option<i64>,
  pub content:     String,
  pub created_by:  String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawNote {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      note_id:     row.get(0)?,
      member:      row.get(1)?,
      granularity: row.get(2)?,
      target_date: row.get(3)?,
      start_hour:  row.get(4)?,
      end_hour:    row.get(5)?,
      content:     row.get(6)?,
      created_by:  row.get(7)?,
      created_at:  row.get(8)?,
      updated_at:  row.get(9)?,
    })
  }

  pub fn into_note(self) -> Result<PlannerNote> {
    Ok(PlannerNote {
      note_id:     decode_uuid(&self.note_id)?,
      member:      self.member,
      granularity: decode_enum("granularity", &self.granularity)?,
      target_date: decode_date(&self.target_date)?,
      start_hour:  hour_from_i64("start_hour", self.start_hour)?,
      end_hour:    hour_from_i64("end_hour", self.end_hour)?,
      content:     self.content,
      created_by:  decode_uuid(&self.created_by)?,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}
