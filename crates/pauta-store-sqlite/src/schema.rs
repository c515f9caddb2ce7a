//! SQL schema for the Pauta SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS users (
    user_id    TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT NOT NULL UNIQUE,
    role       TEXT NOT NULL DEFAULT 'member',  -- 'admin' | 'member'
    created_at TEXT NOT NULL,                   -- ISO 8601 UTC
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS clients (
    client_id  TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    email      TEXT,
    phone      TEXT,
    company    TEXT,
    status     TEXT NOT NULL DEFAULT 'lead',
    source     TEXT,
    notes      TEXT,
    owner_id   TEXT REFERENCES users(user_id) ON DELETE SET NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS projects (
    project_id  TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'planning',
    client_id   TEXT REFERENCES clients(client_id) ON DELETE SET NULL,
    created_by  TEXT NOT NULL REFERENCES users(user_id),
    due_date    TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS project_members (
    project_id TEXT NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    user_id    TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    role       TEXT NOT NULL DEFAULT 'member',  -- 'manager' | 'member'
    joined_at  TEXT NOT NULL,
    PRIMARY KEY (project_id, user_id)
);

-- position is the per-status-column ordinal; contiguous 0..n-1 per column.
CREATE TABLE IF NOT EXISTS tasks (
    task_id     TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    status      TEXT NOT NULL DEFAULT 'todo',
    priority    TEXT NOT NULL DEFAULT 'medium',
    project_id  TEXT NOT NULL REFERENCES projects(project_id) ON DELETE CASCADE,
    assigned_to TEXT REFERENCES users(user_id) ON DELETE SET NULL,
    created_by  TEXT NOT NULL REFERENCES users(user_id),
    due_date    TEXT,
    position    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS task_comments (
    comment_id TEXT PRIMARY KEY,
    task_id    TEXT NOT NULL REFERENCES tasks(task_id) ON DELETE CASCADE,
    user_id    TEXT NOT NULL REFERENCES users(user_id),
    content    TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- position is the per-stage ordinal, same model as tasks.
CREATE TABLE IF NOT EXISTS deals (
    deal_id     TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    value_cents INTEGER,
    stage       TEXT NOT NULL DEFAULT 'negotiating',
    client_id   TEXT NOT NULL REFERENCES clients(client_id) ON DELETE CASCADE,
    created_by  TEXT NOT NULL REFERENCES users(user_id),
    notes       TEXT,
    position    INTEGER NOT NULL DEFAULT 0,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS client_interactions (
    interaction_id TEXT PRIMARY KEY,
    client_id      TEXT NOT NULL REFERENCES clients(client_id) ON DELETE CASCADE,
    user_id        TEXT NOT NULL REFERENCES users(user_id),
    kind           TEXT NOT NULL,
    summary        TEXT NOT NULL,
    occurred_at    TEXT NOT NULL,
    created_at     TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS calendar_events (
    event_id    TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    start_time  TEXT NOT NULL,
    end_time    TEXT NOT NULL,
    all_day     INTEGER NOT NULL DEFAULT 0,
    kind        TEXT NOT NULL DEFAULT 'meeting',
    color       TEXT,
    project_id  TEXT REFERENCES projects(project_id) ON DELETE SET NULL,
    created_by  TEXT NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS event_attendees (
    event_id TEXT NOT NULL REFERENCES calendar_events(event_id) ON DELETE CASCADE,
    user_id  TEXT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
    status   TEXT NOT NULL DEFAULT 'pending',
    PRIMARY KEY (event_id, user_id)
);

CREATE TABLE IF NOT EXISTS influencer_outreach (
    outreach_id     TEXT PRIMARY KEY,
    influencer_name TEXT NOT NULL,
    platform        TEXT NOT NULL DEFAULT 'instagram',
    handle          TEXT,
    followers_count INTEGER,
    contacted_by    TEXT NOT NULL,
    status          TEXT NOT NULL DEFAULT 'contacted',
    notes           TEXT,
    contact_date    TEXT NOT NULL,
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);

-- The (member, granularity, target_date, start_hour) tuple is the upsert
-- key. SQLite treats NULL start_hour values as distinct here, so the
-- day/week half of the key is enforced by the store's write path, not by
-- this constraint.
CREATE TABLE IF NOT EXISTS planner_notes (
    note_id     TEXT PRIMARY KEY,
    member      TEXT NOT NULL,
    granularity TEXT NOT NULL,  -- 'hour' | 'day' | 'week'
    target_date TEXT NOT NULL,  -- ISO 8601 calendar date
    start_hour  INTEGER,
    end_hour    INTEGER,
    content     TEXT NOT NULL,
    created_by  TEXT NOT NULL REFERENCES users(user_id),
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (member, granularity, target_date, start_hour)
);

CREATE INDEX IF NOT EXISTS tasks_project_idx   ON tasks(project_id);
CREATE INDEX IF NOT EXISTS tasks_status_idx    ON tasks(status, position);
CREATE INDEX IF NOT EXISTS deals_stage_idx     ON deals(stage, position);
CREATE INDEX IF NOT EXISTS comments_task_idx   ON task_comments(task_id);
CREATE INDEX IF NOT EXISTS interactions_client_idx ON client_interactions(client_id);
CREATE INDEX IF NOT EXISTS events_start_idx    ON calendar_events(start_time);
CREATE INDEX IF NOT EXISTS notes_date_idx      ON planner_notes(target_date);

PRAGMA user_version = 1;
";
