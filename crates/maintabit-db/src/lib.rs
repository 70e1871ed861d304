//! MaintaBIT Database — SurrealDB connection management and repository
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Implementations of the `maintabit-core` repository traits
//! - The startup seed pass ([`seed`])

mod connection;
mod error;
pub mod repository;
mod schema;
pub mod seed;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use schema::run_migrations;
