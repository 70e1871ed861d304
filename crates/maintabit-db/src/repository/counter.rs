//! SurrealDB implementation of [`CounterRepository`].
//!
//! The increment is one `UPSERT` statement, so the read of the old value
//! and the write of the new one happen inside a single storage
//! transaction. Engines with optimistic concurrency may abort one of two
//! racing transactions; the aborted statement never committed, so it is
//! safe to re-issue.

use std::time::Duration;

use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::repository::CounterRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::{debug, warn};

use crate::error::DbError;

/// Attempts before a conflicting increment is reported as a failure.
const MAX_ATTEMPTS: u32 = 16;

#[derive(Debug, SurrealValue)]
struct CounterRow {
    seq: u64,
}

/// SurrealDB implementation of the per-department counter store.
#[derive(Clone)]
pub struct SurrealCounterRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealCounterRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    async fn try_increment(&self, key: &str) -> Result<u64, DbError> {
        let result = self
            .db
            .query(
                "UPSERT type::record('counter', $key) \
                 SET seq = (seq ?? 0) + 1 RETURN AFTER",
            )
            .bind(("key", key.to_string()))
            .await?;

        let mut result = result.check()?;

        let rows: Vec<CounterRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(|row| row.seq)
            .ok_or_else(|| DbError::NotFound {
                entity: "counter".into(),
                id: key.to_string(),
            })
    }
}

impl<C: Connection> CounterRepository for SurrealCounterRepository<C> {
    async fn increment(&self, key: &str) -> MaintabitResult<u64> {
        let mut attempt = 1;
        loop {
            match self.try_increment(key).await {
                Ok(seq) => {
                    debug!(key, seq, "Counter incremented");
                    return Ok(seq);
                }
                Err(e) if e.is_retryable_conflict() && attempt < MAX_ATTEMPTS => {
                    debug!(key, attempt, "Counter increment conflicted, retrying");
                    attempt += 1;
                    tokio::time::sleep(Duration::from_millis(u64::from(attempt))).await;
                }
                Err(e) => {
                    warn!(key, attempt, error = %e, "Counter increment failed");
                    return Err(MaintabitError::from(e));
                }
            }
        }
    }

    async fn current(&self, key: &str) -> MaintabitResult<Option<u64>> {
        let mut result = self
            .db
            .query("SELECT seq FROM type::record('counter', $key)")
            .bind(("key", key.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<CounterRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(|row| row.seq))
    }
}
