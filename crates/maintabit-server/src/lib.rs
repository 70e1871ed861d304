//! MaintaBIT Server — HTTP API for complaint intake, tracking and
//! student/admin authentication.

pub mod api;
pub mod config;
pub mod error;
pub mod extractors;
pub mod mailer;
pub mod state;
pub mod sweep;

use std::sync::Arc;

use anyhow::{Context, Result};
use maintabit_db::repository::SurrealOptionRepository;
use maintabit_db::{seed, DbManager};

use crate::config::Config;
use crate::mailer::ServerMailer;
use crate::state::{account_repositories, AppState};

pub use api::create_router;

/// Connect to the database, run the startup seed pass and assemble the
/// shared state.
pub async fn bootstrap(config: &Config, mailer: ServerMailer) -> Result<Arc<AppState>> {
    let db = DbManager::connect(&config.db)
        .await
        .context("failed to connect to SurrealDB")?;

    let client = db.client().clone();
    let (students, admins) = account_repositories(&client, config.auth.pepper.as_deref());
    seed::run_seed(
        &SurrealOptionRepository::new(client),
        &students,
        &admins,
        config.seed_default_accounts,
    )
    .await
    .context("startup seeding failed")?;

    Ok(Arc::new(AppState::new(config, db, mailer)))
}
