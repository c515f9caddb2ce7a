//! Core types and trait definitions for the Pauta operations dashboard.
//!
//! Everything here is plain data and pure computation: no HTTP, no
//! database. All other crates depend on this one.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod board;
pub mod calendar;
pub mod client;
pub mod deal;
pub mod error;
pub mod outreach;
pub mod planner;
pub mod project;
pub mod store;
pub mod task;
pub mod user;

pub use error::{Error, Result};
