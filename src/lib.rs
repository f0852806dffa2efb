//! Owner-scoped task management.
//!
//! The crate ships two front ends over the same task model:
//!
//! - `taskdesk-api`: an HTTP API authenticated with bearer tokens, backed by
//!   `PostgreSQL` or an in-memory store ([`api`], [`application`],
//!   [`infrastructure`])
//! - `taskdesk-cli`: a single-user interactive shell that keeps tasks in
//!   memory for the lifetime of the process ([`cli`])
//!
//! # Modules
//!
//! - [`domain`]: task entity and value objects
//! - [`infrastructure`]: repository trait, storage backends, configuration
//! - [`application`]: owner-scoped task commands
//! - [`auth`]: bearer token verification
//! - [`api`]: axum handlers, DTOs and router
//! - [`cli`]: command parsing, in-memory store and REPL
//! - [`telemetry`]: tracing subscriber setup

pub mod api;
pub mod application;
pub mod auth;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
