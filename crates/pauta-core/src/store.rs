//! The `DashboardStore` trait.
//!
//! Implemented by storage backends (e.g. `pauta-store-sqlite`). Higher
//! layers (`pauta-api`, `pauta-server`) depend on this abstraction, not on
//! any concrete backend.
//!
//! Board and planner mutations are computed by the pure components in
//! [`crate::board`] and [`crate::planner`]; the store only applies their
//! results (`apply_task_positions`, `apply_deal_positions`, `upsert_note`).

use std::future::Future;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
  board::PositionDelta,
  calendar::{CalendarEvent, EventUpdate, EventWithAttendees, NewEvent},
  client::{Client, ClientInteraction, ClientUpdate, NewClient, NewInteraction},
  deal::{Deal, DealStage, DealUpdate, NewDeal},
  outreach::{NewOutreach, Outreach, OutreachStats, OutreachUpdate},
  planner::{NewPlannerNote, PlannerNote},
  project::{
    NewProject, Project, ProjectMember, ProjectMemberRole, ProjectUpdate,
  },
  task::{NewTask, NewTaskComment, Task, TaskComment, TaskStatus, TaskUpdate},
  user::{NewUser, User},
};

/// Abstraction over a Pauta storage backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DashboardStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Users ─────────────────────────────────────────────────────────────

  fn add_user(
    &self,
    input: NewUser,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  fn get_user(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  fn list_users(
    &self,
  ) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  // ── Projects ──────────────────────────────────────────────────────────

  /// Create a project and enroll `created_by` as its manager.
  fn add_project(
    &self,
    input: NewProject,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  fn get_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// All projects, newest first.
  fn list_projects(
    &self,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  fn update_project(
    &self,
    id: Uuid,
    patch: ProjectUpdate,
  ) -> impl Future<Output = Result<Project, Self::Error>> + Send + '_;

  /// Delete a project and, via cascade, its tasks and memberships.
  fn delete_project(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Idempotent: re-adding an existing member is a no-op.
  fn add_project_member(
    &self,
    project_id: Uuid,
    user_id: Uuid,
    role: ProjectMemberRole,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn remove_project_member(
    &self,
    project_id: Uuid,
    user_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn list_project_members(
    &self,
    project_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ProjectMember>, Self::Error>> + Send + '_;

  // ── Tasks ─────────────────────────────────────────────────────────────

  /// Create a task at the tail of its status column.
  fn add_task(
    &self,
    input: NewTask,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  fn get_task(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Task>, Self::Error>> + Send + '_;

  /// Tasks ordered by position then recency, optionally for one project.
  fn list_tasks(
    &self,
    project_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  fn update_task(
    &self,
    id: Uuid,
    patch: TaskUpdate,
  ) -> impl Future<Output = Result<Task, Self::Error>> + Send + '_;

  /// Delete a task and renumber the column it occupied.
  fn delete_task(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Apply the write-set produced by [`crate::board::apply_move`].
  fn apply_task_positions(
    &self,
    deltas: Vec<PositionDelta<TaskStatus>>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_task_comment(
    &self,
    input: NewTaskComment,
    user_id: Uuid,
  ) -> impl Future<Output = Result<TaskComment, Self::Error>> + Send + '_;

  /// Comments for a task, newest first.
  fn list_task_comments(
    &self,
    task_id: Uuid,
  ) -> impl Future<Output = Result<Vec<TaskComment>, Self::Error>> + Send + '_;

  // ── Clients ───────────────────────────────────────────────────────────

  fn add_client(
    &self,
    input: NewClient,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  fn get_client(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Client>, Self::Error>> + Send + '_;

  /// All clients, newest first; `search` filters over name, email and
  /// company with a case-insensitive substring match.
  fn list_clients<'a>(
    &'a self,
    search: Option<&'a str>,
  ) -> impl Future<Output = Result<Vec<Client>, Self::Error>> + Send + 'a;

  fn update_client(
    &self,
    id: Uuid,
    patch: ClientUpdate,
  ) -> impl Future<Output = Result<Client, Self::Error>> + Send + '_;

  fn delete_client(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn add_interaction(
    &self,
    input: NewInteraction,
    user_id: Uuid,
  ) -> impl Future<Output = Result<ClientInteraction, Self::Error>> + Send + '_;

  /// Interactions for a client, most recent occurrence first.
  fn list_interactions(
    &self,
    client_id: Uuid,
  ) -> impl Future<Output = Result<Vec<ClientInteraction>, Self::Error>> + Send + '_;

  // ── Deals ─────────────────────────────────────────────────────────────

  /// Create a deal at the tail of its stage.
  fn add_deal(
    &self,
    input: NewDeal,
    created_by: Uuid,
  ) -> impl Future<Output = Result<Deal, Self::Error>> + Send + '_;

  fn get_deal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Deal>, Self::Error>> + Send + '_;

  fn list_deals(
    &self,
  ) -> impl Future<Output = Result<Vec<Deal>, Self::Error>> + Send + '_;

  fn update_deal(
    &self,
    id: Uuid,
    patch: DealUpdate,
  ) -> impl Future<Output = Result<Deal, Self::Error>> + Send + '_;

  /// Delete a deal and renumber the stage it occupied.
  fn delete_deal(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Apply the write-set produced by [`crate::board::apply_move`].
  fn apply_deal_positions(
    &self,
    deltas: Vec<PositionDelta<DealStage>>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Calendar ──────────────────────────────────────────────────────────

  fn add_event(
    &self,
    input: NewEvent,
    created_by: Uuid,
  ) -> impl Future<Output = Result<EventWithAttendees, Self::Error>> + Send + '_;

  fn get_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<EventWithAttendees>, Self::Error>> + Send + '_;

  /// Events overlapping `[start, end]`, latest start first.
  fn list_events(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<EventWithAttendees>, Self::Error>> + Send + '_;

  fn update_event(
    &self,
    id: Uuid,
    patch: EventUpdate,
  ) -> impl Future<Output = Result<CalendarEvent, Self::Error>> + Send + '_;

  fn delete_event(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Tasks with a due date inside `[start, end]`.
  fn task_deadlines(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Task>, Self::Error>> + Send + '_;

  /// Projects with a due date inside `[start, end]`.
  fn project_deadlines(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> impl Future<Output = Result<Vec<Project>, Self::Error>> + Send + '_;

  // ── Outreach ──────────────────────────────────────────────────────────

  fn add_outreach(
    &self,
    input: NewOutreach,
  ) -> impl Future<Output = Result<Outreach, Self::Error>> + Send + '_;

  fn get_outreach(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Outreach>, Self::Error>> + Send + '_;

  fn list_outreach(
    &self,
  ) -> impl Future<Output = Result<Vec<Outreach>, Self::Error>> + Send + '_;

  fn update_outreach(
    &self,
    id: Uuid,
    patch: OutreachUpdate,
  ) -> impl Future<Output = Result<Outreach, Self::Error>> + Send + '_;

  fn delete_outreach(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Per-member conversion funnel over the whole outreach table.
  fn outreach_stats(
    &self,
  ) -> impl Future<Output = Result<Vec<OutreachStats>, Self::Error>> + Send + '_;

  // ── Planner ───────────────────────────────────────────────────────────

  /// Write a note at its `(member, granularity, target_date, start_hour)`
  /// key, replacing content and range if the key is occupied. The input is
  /// expected to be [normalised](crate::planner::NewPlannerNote::normalized).
  fn upsert_note(
    &self,
    input: NewPlannerNote,
    created_by: Uuid,
  ) -> impl Future<Output = Result<PlannerNote, Self::Error>> + Send + '_;

  /// Replace only the content of an existing note.
  fn update_note_content(
    &self,
    id: Uuid,
    content: String,
  ) -> impl Future<Output = Result<PlannerNote, Self::Error>> + Send + '_;

  /// Idempotent: deleting an absent id succeeds.
  fn delete_note(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Notes with `target_date` inside `[start, end]` — one planner week.
  fn list_notes(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> impl Future<Output = Result<Vec<PlannerNote>, Self::Error>> + Send + '_;
}
