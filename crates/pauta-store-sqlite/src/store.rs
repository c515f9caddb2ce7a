//! [`SqliteStore`] — the SQLite implementation of [`DashboardStore`].

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use pauta_core::{
  board::PositionDelta,
  calendar::{
    CalendarEvent, EventAttendee, EventUpdate, EventWithAttendees, NewEvent,
  },
  client::{Client, ClientInteraction, ClientUpdate, NewClient, NewInteraction},
  deal::{Deal, DealStage, DealUpdate, NewDeal},
  outreach::{NewOutreach, Outreach, OutreachStats, OutreachUpdate},
  planner::{NewPlannerNote, PlannerNote},
  project::{
    NewProject, Project, ProjectMember, ProjectMemberRole, ProjectUpdate,
  },
  store::DashboardStore,
  task::{NewTask, NewTaskComment, Task, TaskComment, TaskStatus, TaskUpdate},
  user::{NewUser, User},
};

use crate::{
  Error, Result,
  encode::{
    ATTENDEE_COLUMNS, CLIENT_COLUMNS, COMMENT_COLUMNS, DEAL_COLUMNS,
    EVENT_COLUMNS, INTERACTION_COLUMNS, MEMBER_COLUMNS, NOTE_COLUMNS,
    OUTREACH_COLUMNS, PROJECT_COLUMNS, RawAttendee, RawClient, RawDeal,
    RawEvent, RawInteraction, RawNote, RawOutreach, RawProject,
    RawProjectMember, RawTask, RawTaskComment, RawUser, TASK_COLUMNS,
    USER_COLUMNS, encode_date, encode_dt, encode_enum, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Pauta dashboard store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The single
/// connection serializes statements; cross-session write races resolve as
/// last-write-wins, which is the accepted policy for board moves.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Rewrite `position` to 0..n-1 in (position, created_at) order for one
/// bucket of `tasks` or `deals`. Run after a row leaves the bucket.
fn renumber_bucket(
  conn: &rusqlite::Connection,
  table: &str,
  id_column: &str,
  bucket_column: &str,
  bucket: &str,
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {id_column} FROM {table} WHERE {bucket_column} = ?1
     ORDER BY position, created_at"
  ))?;
  let ids = stmt
    .query_map(rusqlite::params![bucket], |row| row.get::<_, String>(0))?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  for (position, row_id) in ids.iter().enumerate() {
    conn.execute(
      &format!("UPDATE {table} SET position = ?1 WHERE {id_column} = ?2"),
      rusqlite::params![position as i64, row_id],
    )?;
  }
  Ok(())
}

// ─── DashboardStore impl ─────────────────────────────────────────────────────

impl DashboardStore for SqliteStore {
  type Error = Error;

  // ── Users ─────────────────────────────────────────────────────────────────

  async fn add_user(&self, input: NewUser) -> Result<User> {
    let user = User {
      user_id:    Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      role:       input.role,
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };

    let id_str   = encode_uuid(user.user_id);
    let name     = user.name.clone();
    let email    = user.email.clone();
    let role_str = encode_enum(&user.role)?;
    let at_str   = encode_dt(user.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (user_id, name, email, role, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
          rusqlite::params![id_str, name, email, role_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(user)
  }

  async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
              rusqlite::params![id_str],
              RawUser::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  // ── Projects ──────────────────────────────────────────────────────────────

  async fn add_project(
    &self,
    input: NewProject,
    created_by: Uuid,
  ) -> Result<Project> {
    let project = Project {
      project_id:  Uuid::new_v4(),
      name:        input.name,
      description: input.description,
      status:      input.status,
      client_id:   input.client_id,
      created_by,
      due_date:    input.due_date,
      created_at:  Utc::now(),
      updated_at:  Utc::now(),
    };

    let id_str      = encode_uuid(project.project_id);
    let name        = project.name.clone();
    let description = project.description.clone();
    let status_str  = encode_enum(&project.status)?;
    let client_str  = project.client_id.map(encode_uuid);
    let creator_str = encode_uuid(created_by);
    let due_str     = project.due_date.map(encode_dt);
    let at_str      = encode_dt(project.created_at);
    let role_str    = encode_enum(&ProjectMemberRole::Manager)?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO projects (
             project_id, name, description, status, client_id,
             created_by, due_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            id_str,
            name,
            description,
            status_str,
            client_str,
            creator_str,
            due_str,
            at_str,
          ],
        )?;
        // The creator manages what they create.
        tx.execute(
          "INSERT INTO project_members (project_id, user_id, role, joined_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, creator_str, role_str, at_str],
        )?;
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(project)
  }

  async fn get_project(&self, id: Uuid) -> Result<Option<Project>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawProject> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {PROJECT_COLUMNS} FROM projects WHERE project_id = ?1"
              ),
              rusqlite::params![id_str],
              RawProject::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProject::into_project).transpose()
  }

  async fn list_projects(&self) -> Result<Vec<Project>> {
    let raws: Vec<RawProject> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  async fn update_project(
    &self,
    id: Uuid,
    patch: ProjectUpdate,
  ) -> Result<Project> {
    let mut project =
      self.get_project(id).await?.ok_or(Error::ProjectNotFound(id))?;
    patch.apply(&mut project);
    project.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let name        = project.name.clone();
    let description = project.description.clone();
    let status_str  = encode_enum(&project.status)?;
    let client_str  = project.client_id.map(encode_uuid);
    let due_str     = project.due_date.map(encode_dt);
    let updated_str = encode_dt(project.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE projects
           SET name = ?1, description = ?2, status = ?3, client_id = ?4,
               due_date = ?5, updated_at = ?6
           WHERE project_id = ?7",
          rusqlite::params![
            name,
            description,
            status_str,
            client_str,
            due_str,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(project)
  }

  async fn delete_project(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM projects WHERE project_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_project_member(
    &self,
    project_id: Uuid,
    user_id: Uuid,
    role: ProjectMemberRole,
  ) -> Result<()> {
    let project_str = encode_uuid(project_id);
    let user_str    = encode_uuid(user_id);
    let role_str    = encode_enum(&role)?;
    let at_str      = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR IGNORE INTO project_members (project_id, user_id, role, joined_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![project_str, user_str, role_str, at_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn remove_project_member(
    &self,
    project_id: Uuid,
    user_id: Uuid,
  ) -> Result<()> {
    let project_str = encode_uuid(project_id);
    let user_str    = encode_uuid(user_id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM project_members WHERE project_id = ?1 AND user_id = ?2",
          rusqlite::params![project_str, user_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_project_members(
    &self,
    project_id: Uuid,
  ) -> Result<Vec<ProjectMember>> {
    let project_str = encode_uuid(project_id);
    let raws: Vec<RawProjectMember> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MEMBER_COLUMNS} FROM project_members
           WHERE project_id = ?1 ORDER BY joined_at"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![project_str], RawProjectMember::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProjectMember::into_member).collect()
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  async fn add_task(&self, input: NewTask, created_by: Uuid) -> Result<Task> {
    let task_id = Uuid::new_v4();
    let now = Utc::now();

    let id_str       = encode_uuid(task_id);
    let title        = input.title.clone();
    let description  = input.description.clone();
    let status_str   = encode_enum(&input.status)?;
    let priority_str = encode_enum(&input.priority)?;
    let project_str  = encode_uuid(input.project_id);
    let assignee_str = input.assigned_to.map(encode_uuid);
    let creator_str  = encode_uuid(created_by);
    let due_str      = input.due_date.map(encode_dt);
    let at_str       = encode_dt(now);

    // New tasks land at the tail of their status column.
    let position: i64 = self
      .conn
      .call(move |conn| {
        let count: i64 = conn.query_row(
          "SELECT COUNT(*) FROM tasks WHERE status = ?1",
          rusqlite::params![status_str],
          |row| row.get(0),
        )?;
        conn.execute(
          "INSERT INTO tasks (
             task_id, title, description, status, priority, project_id,
             assigned_to, created_by, due_date, position, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
          rusqlite::params![
            id_str,
            title,
            description,
            status_str,
            priority_str,
            project_str,
            assignee_str,
            creator_str,
            due_str,
            count,
            at_str,
          ],
        )?;
        Ok(count)
      })
      .await?;

    Ok(Task {
      task_id,
      title: input.title,
      description: input.description,
      status: input.status,
      priority: input.priority,
      project_id: input.project_id,
      assigned_to: input.assigned_to,
      created_by,
      due_date: input.due_date,
      position: position as u32,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_task(&self, id: Uuid) -> Result<Option<Task>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawTask> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE task_id = ?1"),
              rusqlite::params![id_str],
              RawTask::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawTask::into_task).transpose()
  }

  async fn list_tasks(&self, project_id: Option<Uuid>) -> Result<Vec<Task>> {
    let project_str = project_id.map(encode_uuid);
    let raws: Vec<RawTask> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(p) = project_str {
          let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks WHERE project_id = ?1
             ORDER BY position, created_at DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![p], RawTask::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY position, created_at DESC"
          ))?;
          stmt
            .query_map([], RawTask::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn update_task(&self, id: Uuid, patch: TaskUpdate) -> Result<Task> {
    let mut task = self.get_task(id).await?.ok_or(Error::TaskNotFound(id))?;
    patch.apply(&mut task);
    task.updated_at = Utc::now();

    let id_str       = encode_uuid(id);
    let title        = task.title.clone();
    let description  = task.description.clone();
    let priority_str = encode_enum(&task.priority)?;
    let assignee_str = task.assigned_to.map(encode_uuid);
    let due_str      = task.due_date.map(encode_dt);
    let updated_str  = encode_dt(task.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE tasks
           SET title = ?1, description = ?2, priority = ?3, assigned_to = ?4,
               due_date = ?5, updated_at = ?6
           WHERE task_id = ?7",
          rusqlite::params![
            title,
            description,
            priority_str,
            assignee_str,
            due_str,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(task)
  }

  async fn delete_task(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        let status: Option<String> = conn
          .query_row(
            "SELECT status FROM tasks WHERE task_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(status) = status else { return Ok(()) };

        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM tasks WHERE task_id = ?1",
          rusqlite::params![id_str],
        )?;
        renumber_bucket(&tx, "tasks", "task_id", "status", &status)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn apply_task_positions(
    &self,
    deltas: Vec<PositionDelta<TaskStatus>>,
  ) -> Result<()> {
    let updated_str = encode_dt(Utc::now());
    let rows: Vec<(String, String, i64)> = deltas
      .iter()
      .map(|d| {
        Ok((encode_uuid(d.id), encode_enum(&d.bucket)?, d.position as i64))
      })
      .collect::<Result<_>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (id, status, position) in &rows {
          tx.execute(
            "UPDATE tasks SET status = ?1, position = ?2, updated_at = ?3
             WHERE task_id = ?4",
            rusqlite::params![status, position, updated_str, id],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_task_comment(
    &self,
    input: NewTaskComment,
    user_id: Uuid,
  ) -> Result<TaskComment> {
    let comment = TaskComment {
      comment_id: Uuid::new_v4(),
      task_id:    input.task_id,
      user_id,
      content:    input.content,
      created_at: Utc::now(),
    };

    let id_str   = encode_uuid(comment.comment_id);
    let task_str = encode_uuid(comment.task_id);
    let user_str = encode_uuid(user_id);
    let content  = comment.content.clone();
    let at_str   = encode_dt(comment.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO task_comments (comment_id, task_id, user_id, content, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, task_str, user_str, content, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(comment)
  }

  async fn list_task_comments(&self, task_id: Uuid) -> Result<Vec<TaskComment>> {
    let task_str = encode_uuid(task_id);
    let raws: Vec<RawTaskComment> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {COMMENT_COLUMNS} FROM task_comments
           WHERE task_id = ?1 ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![task_str], RawTaskComment::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTaskComment::into_comment).collect()
  }

  // ── Clients ───────────────────────────────────────────────────────────────

  async fn add_client(&self, input: NewClient, owner_id: Uuid) -> Result<Client> {
    let client = Client {
      client_id:  Uuid::new_v4(),
      name:       input.name,
      email:      input.email,
      phone:      input.phone,
      company:    input.company,
      status:     input.status,
      source:     input.source,
      notes:      input.notes,
      owner_id:   Some(owner_id),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    };

    let id_str     = encode_uuid(client.client_id);
    let name       = client.name.clone();
    let email      = client.email.clone();
    let phone      = client.phone.clone();
    let company    = client.company.clone();
    let status_str = encode_enum(&client.status)?;
    let source     = client.source.clone();
    let notes      = client.notes.clone();
    let owner_str  = encode_uuid(owner_id);
    let at_str     = encode_dt(client.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO clients (
             client_id, name, email, phone, company, status, source, notes,
             owner_id, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            name,
            email,
            phone,
            company,
            status_str,
            source,
            notes,
            owner_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(client)
  }

  async fn get_client(&self, id: Uuid) -> Result<Option<Client>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawClient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {CLIENT_COLUMNS} FROM clients WHERE client_id = ?1"
              ),
              rusqlite::params![id_str],
              RawClient::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawClient::into_client).transpose()
  }

  async fn list_clients(&self, search: Option<&str>) -> Result<Vec<Client>> {
    let pattern = search.map(|s| format!("%{s}%"));
    let raws: Vec<RawClient> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(p) = pattern {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients
             WHERE name LIKE ?1 OR email LIKE ?1 OR company LIKE ?1
             ORDER BY created_at DESC"
          ))?;
          stmt
            .query_map(rusqlite::params![p], RawClient::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!(
            "SELECT {CLIENT_COLUMNS} FROM clients ORDER BY created_at DESC"
          ))?;
          stmt
            .query_map([], RawClient::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawClient::into_client).collect()
  }

  async fn update_client(&self, id: Uuid, patch: ClientUpdate) -> Result<Client> {
    let mut client =
      self.get_client(id).await?.ok_or(Error::ClientNotFound(id))?;
    patch.apply(&mut client);
    client.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let name        = client.name.clone();
    let email       = client.email.clone();
    let phone       = client.phone.clone();
    let company     = client.company.clone();
    let status_str  = encode_enum(&client.status)?;
    let source      = client.source.clone();
    let notes       = client.notes.clone();
    let owner_str   = client.owner_id.map(encode_uuid);
    let updated_str = encode_dt(client.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE clients
           SET name = ?1, email = ?2, phone = ?3, company = ?4, status = ?5,
               source = ?6, notes = ?7, owner_id = ?8, updated_at = ?9
           WHERE client_id = ?10",
          rusqlite::params![
            name,
            email,
            phone,
            company,
            status_str,
            source,
            notes,
            owner_str,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(client)
  }

  async fn delete_client(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM clients WHERE client_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn add_interaction(
    &self,
    input: NewInteraction,
    user_id: Uuid,
  ) -> Result<ClientInteraction> {
    let now = Utc::now();
    let interaction = ClientInteraction {
      interaction_id: Uuid::new_v4(),
      client_id:      input.client_id,
      user_id,
      kind:           input.kind,
      summary:        input.summary,
      occurred_at:    input.occurred_at.unwrap_or(now),
      created_at:     now,
    };

    let id_str       = encode_uuid(interaction.interaction_id);
    let client_str   = encode_uuid(interaction.client_id);
    let user_str     = encode_uuid(user_id);
    let kind_str     = encode_enum(&interaction.kind)?;
    let summary      = interaction.summary.clone();
    let occurred_str = encode_dt(interaction.occurred_at);
    let at_str       = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO client_interactions (
             interaction_id, client_id, user_id, kind, summary, occurred_at, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
          rusqlite::params![
            id_str,
            client_str,
            user_str,
            kind_str,
            summary,
            occurred_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(interaction)
  }

  async fn list_interactions(
    &self,
    client_id: Uuid,
  ) -> Result<Vec<ClientInteraction>> {
    let client_str = encode_uuid(client_id);
    let raws: Vec<RawInteraction> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {INTERACTION_COLUMNS} FROM client_interactions
           WHERE client_id = ?1 ORDER BY occurred_at DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![client_str], RawInteraction::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawInteraction::into_interaction).collect()
  }

  // ── Deals ─────────────────────────────────────────────────────────────────

  async fn add_deal(&self, input: NewDeal, created_by: Uuid) -> Result<Deal> {
    let deal_id = Uuid::new_v4();
    let now = Utc::now();

    let id_str      = encode_uuid(deal_id);
    let title       = input.title.clone();
    let value_cents = input.value_cents;
    let stage_str   = encode_enum(&input.stage)?;
    let client_str  = encode_uuid(input.client_id);
    let creator_str = encode_uuid(created_by);
    let notes       = input.notes.clone();
    let at_str      = encode_dt(now);

    // New deals land at the tail of their stage.
    let position: i64 = self
      .conn
      .call(move |conn| {
        let count: i64 = conn.query_row(
          "SELECT COUNT(*) FROM deals WHERE stage = ?1",
          rusqlite::params![stage_str],
          |row| row.get(0),
        )?;
        conn.execute(
          "INSERT INTO deals (
             deal_id, title, value_cents, stage, client_id, created_by,
             notes, position, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
          rusqlite::params![
            id_str,
            title,
            value_cents,
            stage_str,
            client_str,
            creator_str,
            notes,
            count,
            at_str,
          ],
        )?;
        Ok(count)
      })
      .await?;

    Ok(Deal {
      deal_id,
      title: input.title,
      value_cents: input.value_cents,
      stage: input.stage,
      client_id: input.client_id,
      created_by,
      notes: input.notes,
      position: position as u32,
      created_at: now,
      updated_at: now,
    })
  }

  async fn get_deal(&self, id: Uuid) -> Result<Option<Deal>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawDeal> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {DEAL_COLUMNS} FROM deals WHERE deal_id = ?1"),
              rusqlite::params![id_str],
              RawDeal::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawDeal::into_deal).transpose()
  }

  async fn list_deals(&self) -> Result<Vec<Deal>> {
    let raws: Vec<RawDeal> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {DEAL_COLUMNS} FROM deals ORDER BY position, created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], RawDeal::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawDeal::into_deal).collect()
  }

  async fn update_deal(&self, id: Uuid, patch: DealUpdate) -> Result<Deal> {
    let mut deal = self.get_deal(id).await?.ok_or(Error::DealNotFound(id))?;
    patch.apply(&mut deal);
    deal.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let title       = deal.title.clone();
    let value_cents = deal.value_cents;
    let client_str  = encode_uuid(deal.client_id);
    let notes       = deal.notes.clone();
    let updated_str = encode_dt(deal.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE deals
           SET title = ?1, value_cents = ?2, client_id = ?3, notes = ?4,
               updated_at = ?5
           WHERE deal_id = ?6",
          rusqlite::params![
            title,
            value_cents,
            client_str,
            notes,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(deal)
  }

  async fn delete_deal(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        let stage: Option<String> = conn
          .query_row(
            "SELECT stage FROM deals WHERE deal_id = ?1",
            rusqlite::params![id_str],
            |row| row.get(0),
          )
          .optional()?;
        let Some(stage) = stage else { return Ok(()) };

        let tx = conn.transaction()?;
        tx.execute(
          "DELETE FROM deals WHERE deal_id = ?1",
          rusqlite::params![id_str],
        )?;
        renumber_bucket(&tx, "deals", "deal_id", "stage", &stage)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn apply_deal_positions(
    &self,
    deltas: Vec<PositionDelta<DealStage>>,
  ) -> Result<()> {
    let updated_str = encode_dt(Utc::now());
    let rows: Vec<(String, String, i64)> = deltas
      .iter()
      .map(|d| {
        Ok((encode_uuid(d.id), encode_enum(&d.bucket)?, d.position as i64))
      })
      .collect::<Result<_>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        for (id, stage, position) in &rows {
          tx.execute(
            "UPDATE deals SET stage = ?1, position = ?2, updated_at = ?3
             WHERE deal_id = ?4",
            rusqlite::params![stage, position, updated_str, id],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Calendar ──────────────────────────────────────────────────────────────

  async fn add_event(
    &self,
    input: NewEvent,
    created_by: Uuid,
  ) -> Result<EventWithAttendees> {
    let now = Utc::now();
    let event = CalendarEvent {
      event_id:    Uuid::new_v4(),
      title:       input.title,
      description: input.description,
      start_time:  input.start_time,
      end_time:    input.end_time,
      all_day:     input.all_day,
      kind:        input.kind,
      color:       input.color,
      project_id:  input.project_id,
      created_by,
      created_at:  now,
      updated_at:  now,
    };
    let attendees: Vec<EventAttendee> = input
      .attendee_ids
      .iter()
      .map(|&user_id| EventAttendee {
        event_id: event.event_id,
        user_id,
        status: Default::default(),
      })
      .collect();

    let id_str        = encode_uuid(event.event_id);
    let title         = event.title.clone();
    let description   = event.description.clone();
    let start_str     = encode_dt(event.start_time);
    let end_str       = encode_dt(event.end_time);
    let all_day       = event.all_day;
    let kind_str      = encode_enum(&event.kind)?;
    let color         = event.color.clone();
    let project_str   = event.project_id.map(encode_uuid);
    let creator_str   = encode_uuid(created_by);
    let at_str        = encode_dt(now);
    let attendee_rows: Vec<(String, String)> = attendees
      .iter()
      .map(|a| Ok((encode_uuid(a.user_id), encode_enum(&a.status)?)))
      .collect::<Result<_>>()?;

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO calendar_events (
             event_id, title, description, start_time, end_time, all_day,
             kind, color, project_id, created_by, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
          rusqlite::params![
            id_str,
            title,
            description,
            start_str,
            end_str,
            all_day,
            kind_str,
            color,
            project_str,
            creator_str,
            at_str,
          ],
        )?;
        for (user_str, status_str) in &attendee_rows {
          tx.execute(
            "INSERT INTO event_attendees (event_id, user_id, status)
             VALUES (?1, ?2, ?3)",
            rusqlite::params![id_str, user_str, status_str],
          )?;
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(EventWithAttendees { event, attendees })
  }

  async fn get_event(&self, id: Uuid) -> Result<Option<EventWithAttendees>> {
    let id_str = encode_uuid(id);
    let raw: Option<(RawEvent, Vec<RawAttendee>)> = self
      .conn
      .call(move |conn| {
        let event = conn
          .query_row(
            &format!(
              "SELECT {EVENT_COLUMNS} FROM calendar_events WHERE event_id = ?1"
            ),
            rusqlite::params![id_str],
            RawEvent::from_row,
          )
          .optional()?;
        let Some(event) = event else { return Ok(None) };

        let mut stmt = conn.prepare(&format!(
          "SELECT {ATTENDEE_COLUMNS} FROM event_attendees WHERE event_id = ?1"
        ))?;
        let attendees = stmt
          .query_map(rusqlite::params![id_str], RawAttendee::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(Some((event, attendees)))
      })
      .await?;

    raw
      .map(|(event, attendees)| {
        Ok(EventWithAttendees {
          event:     event.into_event()?,
          attendees: attendees
            .into_iter()
            .map(RawAttendee::into_attendee)
            .collect::<Result<_>>()?,
        })
      })
      .transpose()
  }

  async fn list_events(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<EventWithAttendees>> {
    let start_str = encode_dt(start);
    let end_str   = encode_dt(end);

    let raws: Vec<(RawEvent, Vec<RawAttendee>)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {EVENT_COLUMNS} FROM calendar_events
           WHERE start_time <= ?1 AND end_time >= ?2
           ORDER BY start_time DESC"
        ))?;
        let events = stmt
          .query_map(rusqlite::params![end_str, start_str], RawEvent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut att_stmt = conn.prepare(&format!(
          "SELECT {ATTENDEE_COLUMNS} FROM event_attendees WHERE event_id = ?1"
        ))?;
        let mut out = Vec::with_capacity(events.len());
        for event in events {
          let attendees = att_stmt
            .query_map(
              rusqlite::params![event.event_id.clone()],
              RawAttendee::from_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          out.push((event, attendees));
        }
        Ok(out)
      })
      .await?;

    raws
      .into_iter()
      .map(|(event, attendees)| {
        Ok(EventWithAttendees {
          event:     event.into_event()?,
          attendees: attendees
            .into_iter()
            .map(RawAttendee::into_attendee)
            .collect::<Result<_>>()?,
        })
      })
      .collect()
  }

  async fn update_event(
    &self,
    id: Uuid,
    patch: EventUpdate,
  ) -> Result<CalendarEvent> {
    let mut event = self
      .get_event(id)
      .await?
      .ok_or(Error::EventNotFound(id))?
      .event;
    patch.apply(&mut event);
    event.updated_at = Utc::now();

    let id_str      = encode_uuid(id);
    let title       = event.title.clone();
    let description = event.description.clone();
    let start_str   = encode_dt(event.start_time);
    let end_str     = encode_dt(event.end_time);
    let all_day     = event.all_day;
    let kind_str    = encode_enum(&event.kind)?;
    let color       = event.color.clone();
    let project_str = event.project_id.map(encode_uuid);
    let updated_str = encode_dt(event.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE calendar_events
           SET title = ?1, description = ?2, start_time = ?3, end_time = ?4,
               all_day = ?5, kind = ?6, color = ?7, project_id = ?8,
               updated_at = ?9
           WHERE event_id = ?10",
          rusqlite::params![
            title,
            description,
            start_str,
            end_str,
            all_day,
            kind_str,
            color,
            project_str,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn delete_event(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM calendar_events WHERE event_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn task_deadlines(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<Task>> {
    let start_str = encode_dt(start);
    let end_str   = encode_dt(end);

    let raws: Vec<RawTask> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {TASK_COLUMNS} FROM tasks
           WHERE due_date IS NOT NULL AND due_date >= ?1 AND due_date <= ?2
           ORDER BY due_date"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![start_str, end_str], RawTask::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawTask::into_task).collect()
  }

  async fn project_deadlines(
    &self,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
  ) -> Result<Vec<Project>> {
    let start_str = encode_dt(start);
    let end_str   = encode_dt(end);

    let raws: Vec<RawProject> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PROJECT_COLUMNS} FROM projects
           WHERE due_date IS NOT NULL AND due_date >= ?1 AND due_date <= ?2
           ORDER BY due_date"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![start_str, end_str], RawProject::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawProject::into_project).collect()
  }

  // ── Outreach ──────────────────────────────────────────────────────────────

  async fn add_outreach(&self, input: NewOutreach) -> Result<Outreach> {
    let now = Utc::now();
    let outreach = Outreach {
      outreach_id:     Uuid::new_v4(),
      influencer_name: input.influencer_name,
      platform:        input.platform,
      handle:          input.handle,
      followers_count: input.followers_count,
      contacted_by:    input.contacted_by,
      status:          input.status,
      notes:           input.notes,
      contact_date:    input.contact_date.unwrap_or(now),
      created_at:      now,
      updated_at:      now,
    };

    let id_str       = encode_uuid(outreach.outreach_id);
    let name         = outreach.influencer_name.clone();
    let platform_str = encode_enum(&outreach.platform)?;
    let handle       = outreach.handle.clone();
    let followers    = outreach.followers_count.map(i64::from);
    let contacted_by = outreach.contacted_by.clone();
    let status_str   = encode_enum(&outreach.status)?;
    let notes        = outreach.notes.clone();
    let contact_str  = encode_dt(outreach.contact_date);
    let at_str       = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO influencer_outreach (
             outreach_id, influencer_name, platform, handle, followers_count,
             contacted_by, status, notes, contact_date, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
          rusqlite::params![
            id_str,
            name,
            platform_str,
            handle,
            followers,
            contacted_by,
            status_str,
            notes,
            contact_str,
            at_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(outreach)
  }

  async fn get_outreach(&self, id: Uuid) -> Result<Option<Outreach>> {
    let id_str = encode_uuid(id);
    let raw: Option<RawOutreach> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "SELECT {OUTREACH_COLUMNS} FROM influencer_outreach
                 WHERE outreach_id = ?1"
              ),
              rusqlite::params![id_str],
              RawOutreach::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawOutreach::into_outreach).transpose()
  }

  async fn list_outreach(&self) -> Result<Vec<Outreach>> {
    let raws: Vec<RawOutreach> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {OUTREACH_COLUMNS} FROM influencer_outreach
           ORDER BY created_at DESC"
        ))?;
        let rows = stmt
          .query_map([], RawOutreach::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOutreach::into_outreach).collect()
  }

  async fn update_outreach(
    &self,
    id: Uuid,
    patch: OutreachUpdate,
  ) -> Result<Outreach> {
    let mut outreach = self
      .get_outreach(id)
      .await?
      .ok_or(Error::OutreachNotFound(id))?;
    patch.apply(&mut outreach);
    outreach.updated_at = Utc::now();

    let id_str       = encode_uuid(id);
    let name         = outreach.influencer_name.clone();
    let platform_str = encode_enum(&outreach.platform)?;
    let handle       = outreach.handle.clone();
    let followers    = outreach.followers_count.map(i64::from);
    let contacted_by = outreach.contacted_by.clone();
    let status_str   = encode_enum(&outreach.status)?;
    let notes        = outreach.notes.clone();
    let contact_str  = encode_dt(outreach.contact_date);
    let updated_str  = encode_dt(outreach.updated_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "UPDATE influencer_outreach
           SET influencer_name = ?1, platform = ?2, handle = ?3,
               followers_count = ?4, contacted_by = ?5, status = ?6,
               notes = ?7, contact_date = ?8, updated_at = ?9
           WHERE outreach_id = ?10",
          rusqlite::params![
            name,
            platform_str,
            handle,
            followers,
            contacted_by,
            status_str,
            notes,
            contact_str,
            updated_str,
            id_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(outreach)
  }

  async fn delete_outreach(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM influencer_outreach WHERE outreach_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn outreach_stats(&self) -> Result<Vec<OutreachStats>> {
    let rows: Vec<(String, i64, i64, i64, i64)> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT contacted_by,
                  COUNT(*),
                  SUM(CASE WHEN status IN ('responded', 'negotiating', 'converted')
                      THEN 1 ELSE 0 END),
                  SUM(CASE WHEN status = 'converted' THEN 1 ELSE 0 END),
                  SUM(CASE WHEN status = 'rejected' THEN 1 ELSE 0 END)
           FROM influencer_outreach
           GROUP BY contacted_by
           ORDER BY contacted_by",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok((
              row.get(0)?,
              row.get(1)?,
              row.get(2)?,
              row.get(3)?,
              row.get(4)?,
            ))
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      rows
        .into_iter()
        .map(|(contacted_by, total, responded, converted, rejected)| {
          OutreachStats {
            contacted_by,
            total:     total as u32,
            responded: responded as u32,
            converted: converted as u32,
            rejected:  rejected as u32,
          }
        })
        .collect(),
    )
  }

  // ── Planner ───────────────────────────────────────────────────────────────

  async fn upsert_note(
    &self,
    input: NewPlannerNote,
    created_by: Uuid,
  ) -> Result<PlannerNote> {
    let now = Utc::now();
    let new_id_str  = encode_uuid(Uuid::new_v4());
    let member      = input.member.clone();
    let gran_str    = encode_enum(&input.granularity)?;
    let date_str    = encode_date(input.target_date);
    let start_hour  = input.start_hour.map(i64::from);
    let end_hour    = input.end_hour.map(i64::from);
    let content     = input.content.clone();
    let creator_str = encode_uuid(created_by);
    let now_str     = encode_dt(now);

    let raw: RawNote = self
      .conn
      .call(move |conn| {
        // `IS` instead of `=` so a NULL start_hour (day/week notes) still
        // hits the key.
        let existing: Option<String> = conn
          .query_row(
            "SELECT note_id FROM planner_notes
             WHERE member = ?1 AND granularity = ?2 AND target_date = ?3
               AND start_hour IS ?4",
            rusqlite::params![member, gran_str, date_str, start_hour],
            |row| row.get(0),
          )
          .optional()?;

        let note_id = match existing {
          Some(id) => {
            conn.execute(
              "UPDATE planner_notes
               SET content = ?1, end_hour = ?2, updated_at = ?3
               WHERE note_id = ?4",
              rusqlite::params![content, end_hour, now_str, id],
            )?;
            id
          }
          None => {
            conn.execute(
              "INSERT INTO planner_notes (
                 note_id, member, granularity, target_date, start_hour,
                 end_hour, content, created_by, created_at, updated_at
               ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)",
              rusqlite::params![
                new_id_str,
                member,
                gran_str,
                date_str,
                start_hour,
                end_hour,
                content,
                creator_str,
                now_str,
              ],
            )?;
            new_id_str
          }
        };

        let raw = conn.query_row(
          &format!(
            "SELECT {NOTE_COLUMNS} FROM planner_notes WHERE note_id = ?1"
          ),
          rusqlite::params![note_id],
          RawNote::from_row,
        )?;
        Ok(raw)
      })
      .await?;

    raw.into_note()
  }

  async fn update_note_content(
    &self,
    id: Uuid,
    content: String,
  ) -> Result<PlannerNote> {
    let id_str  = encode_uuid(id);
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawNote> = self
      .conn
      .call(move |conn| {
        let updated = conn.execute(
          "UPDATE planner_notes SET content = ?1, updated_at = ?2
           WHERE note_id = ?3",
          rusqlite::params![content, now_str, id_str],
        )?;
        if updated == 0 {
          return Ok(None);
        }
        let raw = conn.query_row(
          &format!(
            "SELECT {NOTE_COLUMNS} FROM planner_notes WHERE note_id = ?1"
          ),
          rusqlite::params![id_str],
          RawNote::from_row,
        )?;
        Ok(Some(raw))
      })
      .await?;

    raw.ok_or(Error::NoteNotFound(id))?.into_note()
  }

  async fn delete_note(&self, id: Uuid) -> Result<()> {
    let id_str = encode_uuid(id);
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "DELETE FROM planner_notes WHERE note_id = ?1",
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_notes(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<PlannerNote>> {
    let start_str = encode_date(start);
    let end_str   = encode_date(end);

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {NOTE_COLUMNS} FROM planner_notes
           WHERE target_date >= ?1 AND target_date <= ?2
           ORDER BY target_date, start_hour"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![start_str, end_str], RawNote::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }
}
