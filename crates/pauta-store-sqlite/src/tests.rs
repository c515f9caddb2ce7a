//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{TimeZone, Utc};
use uuid::Uuid;

use pauta_core::{
  board::{apply_move, insertion_position},
  calendar::{EventUpdate, NewEvent},
  client::{ClientUpdate, InteractionType, NewClient, NewInteraction},
  deal::{DealStage, NewDeal},
  outreach::{NewOutreach, OutreachStatus},
  planner::{Granularity, NewPlannerNote},
  project::{NewProject, ProjectMemberRole, ProjectUpdate},
  store::DashboardStore,
  task::{NewTask, NewTaskComment, TaskPriority, TaskStatus, TaskUpdate},
  user::{NewUser, User},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

async fn user(s: &SqliteStore, name: &str) -> User {
  s.add_user(NewUser {
    name:  name.into(),
    email: format!("{}@example.com", name.to_lowercase()),
    role:  Default::default(),
  })
  .await
  .unwrap()
}

fn new_project(name: &str) -> NewProject {
  NewProject {
    name:        name.into(),
    description: None,
    status:      Default::default(),
    client_id:   None,
    due_date:    None,
  }
}

fn new_task(project_id: Uuid, title: &str, status: TaskStatus) -> NewTask {
  NewTask {
    title: title.into(),
    description: None,
    status,
    priority: TaskPriority::Medium,
    project_id,
    assigned_to: None,
    due_date: None,
  }
}

fn new_client(name: &str) -> NewClient {
  NewClient {
    name:    name.into(),
    email:   Some(format!("{}@cliente.com.br", name.to_lowercase())),
    phone:   None,
    company: None,
    status:  Default::default(),
    source:  None,
    notes:   None,
  }
}

// ─── Users ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_and_get_user() {
  let s = store().await;
  let alice = user(&s, "Alice").await;

  let fetched = s.get_user(alice.user_id).await.unwrap().unwrap();
  assert_eq!(fetched.user_id, alice.user_id);
  assert_eq!(fetched.name, "Alice");
  assert_eq!(fetched.email, "alice@example.com");
}

#[tokio::test]
async fn get_user_missing_returns_none() {
  let s = store().await;
  assert!(s.get_user(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_users_sorted_by_name() {
  let s = store().await;
  user(&s, "Pedro").await;
  user(&s, "Luiz").await;

  let users = s.list_users().await.unwrap();
  let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
  assert_eq!(names, ["Luiz", "Pedro"]);
}

// ─── Projects ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_project_enrolls_creator_as_manager() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let project =
    s.add_project(new_project("Site novo"), creator.user_id).await.unwrap();

  let members = s.list_project_members(project.project_id).await.unwrap();
  assert_eq!(members.len(), 1);
  assert_eq!(members[0].user_id, creator.user_id);
  assert_eq!(members[0].role, ProjectMemberRole::Manager);
}

#[tokio::test]
async fn update_project_patch_sets_and_clears_fields() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let client = s.add_client(new_client("Acme"), creator.user_id).await.unwrap();

  let mut input = new_project("Campanha");
  input.client_id = Some(client.client_id);
  input.description = Some("primeira fase".into());
  let project = s.add_project(input, creator.user_id).await.unwrap();

  let updated = s
    .update_project(project.project_id, ProjectUpdate {
      name: Some("Campanha 2".into()),
      // Inner None clears the nullable column.
      client_id: Some(None),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.name, "Campanha 2");
  assert_eq!(updated.client_id, None);
  assert_eq!(updated.description.as_deref(), Some("primeira fase"));

  let fetched = s.get_project(project.project_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "Campanha 2");
  assert!(fetched.client_id.is_none());
}

#[tokio::test]
async fn delete_project_cascades_to_tasks() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("Descartável"), creator.user_id).await.unwrap();
  let task = s
    .add_task(
      new_task(project.project_id, "t", TaskStatus::Todo),
      creator.user_id,
    )
    .await
    .unwrap();

  s.delete_project(project.project_id).await.unwrap();
  assert!(s.get_project(project.project_id).await.unwrap().is_none());
  assert!(s.get_task(task.task_id).await.unwrap().is_none());
}

#[tokio::test]
async fn add_project_member_is_idempotent() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let other = user(&s, "Luiz").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();

  for _ in 0..2 {
    s.add_project_member(
      project.project_id,
      other.user_id,
      ProjectMemberRole::Member,
    )
    .await
    .unwrap();
  }
  assert_eq!(s.list_project_members(project.project_id).await.unwrap().len(), 2);

  s.remove_project_member(project.project_id, other.user_id).await.unwrap();
  assert_eq!(s.list_project_members(project.project_id).await.unwrap().len(), 1);
}

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn new_tasks_take_the_tail_of_their_column() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();

  let a = s
    .add_task(new_task(project.project_id, "a", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let b = s
    .add_task(new_task(project.project_id, "b", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let c = s
    .add_task(new_task(project.project_id, "c", TaskStatus::Done), creator.user_id)
    .await
    .unwrap();

  assert_eq!(a.position, 0);
  assert_eq!(b.position, 1);
  // First in its own column.
  assert_eq!(c.position, 0);

  let items: Vec<_> =
    s.list_tasks(None).await.unwrap().iter().map(|t| t.board_item()).collect();
  assert_eq!(insertion_position(&items, &TaskStatus::Todo), 2);
}

#[tokio::test]
async fn update_task_does_not_touch_position() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();
  let task = s
    .add_task(new_task(project.project_id, "a", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();

  let updated = s
    .update_task(task.task_id, TaskUpdate {
      title: Some("renomeada".into()),
      priority: Some(TaskPriority::Urgent),
      ..Default::default()
    })
    .await
    .unwrap();

  assert_eq!(updated.title, "renomeada");
  assert_eq!(updated.priority, TaskPriority::Urgent);
  assert_eq!(updated.status, TaskStatus::Todo);
  assert_eq!(updated.position, 0);
}

#[tokio::test]
async fn board_move_round_trips_through_the_store() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();

  let a = s
    .add_task(new_task(project.project_id, "a", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let b = s
    .add_task(new_task(project.project_id, "b", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let c = s
    .add_task(new_task(project.project_id, "c", TaskStatus::Done), creator.user_id)
    .await
    .unwrap();

  // Move `a` to the head of `done`; `c` shifts down, `b` renumbers to 0.
  let items: Vec<_> =
    s.list_tasks(None).await.unwrap().iter().map(|t| t.board_item()).collect();
  let outcome = apply_move(&items, a.task_id, TaskStatus::Done, 0);
  assert_eq!(outcome.changed.len(), 3);

  s.apply_task_positions(outcome.changed).await.unwrap();

  let a = s.get_task(a.task_id).await.unwrap().unwrap();
  let b = s.get_task(b.task_id).await.unwrap().unwrap();
  let c = s.get_task(c.task_id).await.unwrap().unwrap();
  assert_eq!((a.status, a.position), (TaskStatus::Done, 0));
  assert_eq!((b.status, b.position), (TaskStatus::Todo, 0));
  assert_eq!((c.status, c.position), (TaskStatus::Done, 1));
}

#[tokio::test]
async fn delete_task_renumbers_its_column() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();

  let a = s
    .add_task(new_task(project.project_id, "a", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let b = s
    .add_task(new_task(project.project_id, "b", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();
  let c = s
    .add_task(new_task(project.project_id, "c", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();

  s.delete_task(a.task_id).await.unwrap();

  let b = s.get_task(b.task_id).await.unwrap().unwrap();
  let c = s.get_task(c.task_id).await.unwrap().unwrap();
  assert_eq!(b.position, 0);
  assert_eq!(c.position, 1);

  // Deleting an unknown id is quietly accepted.
  s.delete_task(Uuid::new_v4()).await.unwrap();
}

#[tokio::test]
async fn task_comments_newest_first() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let project =
    s.add_project(new_project("P"), creator.user_id).await.unwrap();
  let task = s
    .add_task(new_task(project.project_id, "a", TaskStatus::Todo), creator.user_id)
    .await
    .unwrap();

  s.add_task_comment(
    NewTaskComment { task_id: task.task_id, content: "primeiro".into() },
    creator.user_id,
  )
  .await
  .unwrap();
  s.add_task_comment(
    NewTaskComment { task_id: task.task_id, content: "segundo".into() },
    creator.user_id,
  )
  .await
  .unwrap();

  let comments = s.list_task_comments(task.task_id).await.unwrap();
  assert_eq!(comments.len(), 2);
}

// ─── Clients ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn client_search_matches_name_email_company() {
  let s = store().await;
  let owner = user(&s, "Pedro").await;

  s.add_client(new_client("Padaria Sol"), owner.user_id).await.unwrap();
  let mut other = new_client("Mercado Lua");
  other.company = Some("Sol Holdings".into());
  s.add_client(other, owner.user_id).await.unwrap();
  s.add_client(new_client("Outra"), owner.user_id).await.unwrap();

  let hits = s.list_clients(Some("sol")).await.unwrap();
  assert_eq!(hits.len(), 2);

  let all = s.list_clients(None).await.unwrap();
  assert_eq!(all.len(), 3);
}

#[tokio::test]
async fn update_client_and_log_interactions() {
  let s = store().await;
  let owner = user(&s, "Pedro").await;
  let client = s.add_client(new_client("Acme"), owner.user_id).await.unwrap();

  let updated = s
    .update_client(client.client_id, ClientUpdate {
      status: Some(pauta_core::client::ClientStatus::Active),
      notes: Some(Some("fechou contrato".into())),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.status, pauta_core::client::ClientStatus::Active);

  s.add_interaction(
    NewInteraction {
      client_id:   client.client_id,
      kind:        InteractionType::Whatsapp,
      summary:     "follow-up".into(),
      occurred_at: None,
    },
    owner.user_id,
  )
  .await
  .unwrap();

  let log = s.list_interactions(client.client_id).await.unwrap();
  assert_eq!(log.len(), 1);
  assert_eq!(log[0].kind, InteractionType::Whatsapp);
}

// ─── Deals ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn deal_pipeline_positions_and_moves() {
  let s = store().await;
  let owner = user(&s, "Pedro").await;
  let client = s.add_client(new_client("Acme"), owner.user_id).await.unwrap();

  let new_deal = |title: &str| NewDeal {
    title:       title.into(),
    value_cents: Some(150_000),
    stage:       DealStage::Negotiating,
    client_id:   client.client_id,
    notes:       None,
  };

  let a = s.add_deal(new_deal("a"), owner.user_id).await.unwrap();
  let b = s.add_deal(new_deal("b"), owner.user_id).await.unwrap();
  assert_eq!(a.position, 0);
  assert_eq!(b.position, 1);

  let items: Vec<_> =
    s.list_deals().await.unwrap().iter().map(|d| d.board_item()).collect();
  let outcome = apply_move(&items, a.deal_id, DealStage::Won, 0);
  s.apply_deal_positions(outcome.changed).await.unwrap();

  let a = s.get_deal(a.deal_id).await.unwrap().unwrap();
  let b = s.get_deal(b.deal_id).await.unwrap().unwrap();
  assert_eq!((a.stage, a.position), (DealStage::Won, 0));
  assert_eq!((b.stage, b.position), (DealStage::Negotiating, 0));
}

#[tokio::test]
async fn delete_deal_renumbers_its_stage() {
  let s = store().await;
  let owner = user(&s, "Pedro").await;
  let client = s.add_client(new_client("Acme"), owner.user_id).await.unwrap();

  let mk = |title: &str| NewDeal {
    title:       title.into(),
    value_cents: None,
    stage:       DealStage::Proposed,
    client_id:   client.client_id,
    notes:       None,
  };
  let a = s.add_deal(mk("a"), owner.user_id).await.unwrap();
  let b = s.add_deal(mk("b"), owner.user_id).await.unwrap();

  s.delete_deal(a.deal_id).await.unwrap();
  let b = s.get_deal(b.deal_id).await.unwrap().unwrap();
  assert_eq!(b.position, 0);
}

// ─── Calendar ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn events_attendees_and_range_query() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;
  let luiz = user(&s, "Luiz").await;

  let event = s
    .add_event(
      NewEvent {
        title:        "Reunião semanal".into(),
        description:  None,
        start_time:   Utc.with_ymd_and_hms(2024, 3, 4, 14, 0, 0).unwrap(),
        end_time:     Utc.with_ymd_and_hms(2024, 3, 4, 15, 0, 0).unwrap(),
        all_day:      false,
        kind:         Default::default(),
        color:        Some("#2563eb".into()),
        project_id:   None,
        attendee_ids: vec![luiz.user_id],
      },
      creator.user_id,
    )
    .await
    .unwrap();
  assert_eq!(event.attendees.len(), 1);

  // Overlapping window finds it; a disjoint one does not.
  let hits = s
    .list_events(
      Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap(),
      Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap(),
    )
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].attendees.len(), 1);

  let misses = s
    .list_events(
      Utc.with_ymd_and_hms(2024, 3, 11, 0, 0, 0).unwrap(),
      Utc.with_ymd_and_hms(2024, 3, 17, 23, 59, 59).unwrap(),
    )
    .await
    .unwrap();
  assert!(misses.is_empty());

  let updated = s
    .update_event(event.event.event_id, EventUpdate {
      title: Some("Reunião remarcada".into()),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(updated.title, "Reunião remarcada");
}

#[tokio::test]
async fn deadline_feeds_respect_the_window() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let mut input = new_project("Com prazo");
  input.due_date = Some(Utc.with_ymd_and_hms(2024, 3, 6, 12, 0, 0).unwrap());
  let project = s.add_project(input, creator.user_id).await.unwrap();

  let mut task_input = new_task(project.project_id, "t", TaskStatus::Todo);
  task_input.due_date = Some(Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap());
  s.add_task(task_input, creator.user_id).await.unwrap();

  let start = Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap();
  let end   = Utc.with_ymd_and_hms(2024, 3, 10, 23, 59, 59).unwrap();

  assert_eq!(s.project_deadlines(start, end).await.unwrap().len(), 1);
  assert!(s.task_deadlines(start, end).await.unwrap().is_empty());
}

// ─── Outreach ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn outreach_stats_group_by_member() {
  let s = store().await;

  let mk = |name: &str, by: &str, status: OutreachStatus| NewOutreach {
    influencer_name: name.into(),
    platform:        Default::default(),
    handle:          None,
    followers_count: Some(10_000),
    contacted_by:    by.into(),
    status,
    notes:           None,
    contact_date:    None,
  };

  s.add_outreach(mk("A", "Pedro", OutreachStatus::Converted)).await.unwrap();
  s.add_outreach(mk("B", "Pedro", OutreachStatus::Negotiating)).await.unwrap();
  s.add_outreach(mk("C", "Pedro", OutreachStatus::Rejected)).await.unwrap();
  s.add_outreach(mk("D", "Luiz", OutreachStatus::Contacted)).await.unwrap();

  let stats = s.outreach_stats().await.unwrap();
  assert_eq!(stats.len(), 2);

  let pedro = stats.iter().find(|st| st.contacted_by == "Pedro").unwrap();
  assert_eq!(pedro.total, 3);
  // Negotiating and converted both count as a response.
  assert_eq!(pedro.responded, 2);
  assert_eq!(pedro.converted, 1);
  assert_eq!(pedro.rejected, 1);

  let luiz = stats.iter().find(|st| st.contacted_by == "Luiz").unwrap();
  assert_eq!(luiz.total, 1);
  assert_eq!(luiz.responded, 0);
}

// ─── Planner ─────────────────────────────────────────────────────────────────

fn hour_note(member: &str, date: &str, start: u8, end: Option<u8>) -> NewPlannerNote {
  NewPlannerNote {
    member:      member.into(),
    granularity: Granularity::Hour,
    target_date: date.parse().unwrap(),
    start_hour:  Some(start),
    end_hour:    end,
    content:     "gravação".into(),
  }
}

#[tokio::test]
async fn upsert_note_creates_then_replaces_at_same_key() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let first = s
    .upsert_note(hour_note("Pedro", "2024-03-04", 9, Some(11)), creator.user_id)
    .await
    .unwrap();
  assert_eq!(first.end_hour, Some(11));

  // Same key, new content, no range: the span is dropped, not merged.
  let mut replacement = hour_note("Pedro", "2024-03-04", 9, None);
  replacement.content = "edição".into();
  let second = s.upsert_note(replacement, creator.user_id).await.unwrap();

  assert_eq!(second.note_id, first.note_id);
  assert_eq!(second.content, "edição");
  assert_eq!(second.end_hour, None);

  let week = s
    .list_notes("2024-03-04".parse().unwrap(), "2024-03-10".parse().unwrap())
    .await
    .unwrap();
  assert_eq!(week.len(), 1);
}

#[tokio::test]
async fn day_note_upsert_hits_the_null_hour_key() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let day = NewPlannerNote {
    member:      "Pedro".into(),
    granularity: Granularity::Day,
    target_date: "2024-03-05".parse().unwrap(),
    start_hour:  None,
    end_hour:    None,
    content:     "externa".into(),
  };
  let first = s.upsert_note(day.clone(), creator.user_id).await.unwrap();

  let mut replacement = day;
  replacement.content = "externa adiada".into();
  let second = s.upsert_note(replacement, creator.user_id).await.unwrap();

  assert_eq!(second.note_id, first.note_id);
  assert_eq!(second.content, "externa adiada");
}

#[tokio::test]
async fn same_start_hour_different_member_or_day_coexist() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  s.upsert_note(hour_note("Pedro", "2024-03-04", 9, None), creator.user_id)
    .await
    .unwrap();
  s.upsert_note(hour_note("Luiz", "2024-03-04", 9, None), creator.user_id)
    .await
    .unwrap();
  s.upsert_note(hour_note("Pedro", "2024-03-05", 9, None), creator.user_id)
    .await
    .unwrap();

  let week = s
    .list_notes("2024-03-04".parse().unwrap(), "2024-03-10".parse().unwrap())
    .await
    .unwrap();
  assert_eq!(week.len(), 3);
}

#[tokio::test]
async fn update_note_content_only() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let note = s
    .upsert_note(hour_note("Pedro", "2024-03-04", 9, Some(10)), creator.user_id)
    .await
    .unwrap();

  let updated =
    s.update_note_content(note.note_id, "roteiro".into()).await.unwrap();
  assert_eq!(updated.content, "roteiro");
  // The range is untouched by a content-only edit.
  assert_eq!(updated.end_hour, Some(10));

  let err = s
    .update_note_content(Uuid::new_v4(), "x".into())
    .await
    .unwrap_err();
  assert!(matches!(err, crate::Error::NoteNotFound(_)));
}

#[tokio::test]
async fn delete_note_is_idempotent() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  let note = s
    .upsert_note(hour_note("Pedro", "2024-03-04", 9, None), creator.user_id)
    .await
    .unwrap();

  s.delete_note(note.note_id).await.unwrap();
  s.delete_note(note.note_id).await.unwrap();

  let week = s
    .list_notes("2024-03-04".parse().unwrap(), "2024-03-10".parse().unwrap())
    .await
    .unwrap();
  assert!(week.is_empty());
}

#[tokio::test]
async fn list_notes_is_bounded_by_the_week() {
  let s = store().await;
  let creator = user(&s, "Pedro").await;

  s.upsert_note(hour_note("Pedro", "2024-03-04", 9, None), creator.user_id)
    .await
    .unwrap();
  s.upsert_note(hour_note("Pedro", "2024-03-11", 9, None), creator.user_id)
    .await
    .unwrap();

  let week = s
    .list_notes("2024-03-04".parse().unwrap(), "2024-03-10".parse().unwrap())
    .await
    .unwrap();
  assert_eq!(week.len(), 1);
  assert_eq!(week[0].target_date, "2024-03-04".parse().unwrap());
}
