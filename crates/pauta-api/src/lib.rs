//! JSON REST API for the Pauta dashboard.
//!
//! Exposes an axum [`Router`] backed by any
//! [`pauta_core::store::DashboardStore`]. Auth, TLS, and transport concerns
//! are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", pauta_api::api_router(store.clone()))
//! ```

pub mod calendar;
pub mod clients;
pub mod deals;
pub mod error;
pub mod outreach;
pub mod planner;
pub mod projects;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use axum::{
  Router,
  routing::{delete, get, patch, post},
};
use pauta_core::store::DashboardStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: DashboardStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Users
    .route("/users", get(users::list::<S>).post(users::create::<S>))
    // Projects
    .route("/projects", get(projects::list::<S>).post(projects::create::<S>))
    .route(
      "/projects/{id}",
      get(projects::get_one::<S>)
        .patch(projects::update::<S>)
        .delete(projects::delete_one::<S>),
    )
    .route(
      "/projects/{id}/members",
      get(projects::members::<S>).post(projects::add_member::<S>),
    )
    .route(
      "/projects/{id}/members/{user_id}",
      delete(projects::remove_member::<S>),
    )
    // Tasks
    .route("/tasks", get(tasks::list::<S>).post(tasks::create::<S>))
    .route("/tasks/move", post(tasks::move_one::<S>))
    .route(
      "/tasks/{id}",
      get(tasks::get_one::<S>)
        .patch(tasks::update::<S>)
        .delete(tasks::delete_one::<S>),
    )
    .route(
      "/tasks/{id}/comments",
      get(tasks::comments::<S>).post(tasks::add_comment::<S>),
    )
    // Clients
    .route("/clients", get(clients::list::<S>).post(clients::create::<S>))
    .route(
      "/clients/{id}",
      get(clients::get_one::<S>)
        .patch(clients::update::<S>)
        .delete(clients::delete_one::<S>),
    )
    .route(
      "/clients/{id}/interactions",
      get(clients::interactions::<S>).post(clients::add_interaction::<S>),
    )
    // Deals
    .route("/deals", get(deals::list::<S>).post(deals::create::<S>))
    .route("/deals/move", post(deals::move_one::<S>))
    .route(
      "/deals/{id}",
      get(deals::get_one::<S>)
        .patch(deals::update::<S>)
        .delete(deals::delete_one::<S>),
    )
    // Calendar
    .route(
      "/calendar/events",
      get(calendar::list::<S>).post(calendar::create::<S>),
    )
    .route(
      "/calendar/events/{id}",
      get(calendar::get_one::<S>)
        .patch(calendar::update::<S>)
        .delete(calendar::delete_one::<S>),
    )
    // Outreach
    .route("/outreach", get(outreach::list::<S>).post(outreach::create::<S>))
    .route("/outreach/stats", get(outreach::stats::<S>))
    .route(
      "/outreach/{id}",
      get(outreach::get_one::<S>)
        .patch(outreach::update::<S>)
        .delete(outreach::delete_one::<S>),
    )
    // Planner
    .route(
      "/planner/notes",
      get(planner::list::<S>).post(planner::upsert::<S>),
    )
    .route(
      "/planner/notes/{id}",
      patch(planner::update_content::<S>).delete(planner::delete_one::<S>),
    )
    .route("/planner/grid", get(planner::grid::<S>))
    .with_state(store)
}
