//! SurrealDB implementation of [`OtpRepository`].
//!
//! Codes are keyed by email, so issuing is a plain upsert that replaces
//! any pending code. Consumption is a single conditional `DELETE`: the
//! comparison and the removal commit together, so a code can succeed at
//! most once.

use chrono::{DateTime, Utc};
use maintabit_core::error::MaintabitResult;
use maintabit_core::models::otp::{IssueOneTimeCode, OneTimeCode};
use maintabit_core::repository::OtpRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::debug;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct OtpRow {
    email: String,
    code: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl From<OtpRow> for OneTimeCode {
    fn from(row: OtpRow) -> Self {
        OneTimeCode {
            email: row.email,
            code: row.code,
            expires_at: row.expires_at,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, SurrealValue)]
struct EmailRow {
    #[allow(dead_code)]
    email: String,
}

/// SurrealDB implementation of the one-time code store.
#[derive(Clone)]
pub struct SurrealOtpRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOtpRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OtpRepository for SurrealOtpRepository<C> {
    async fn issue(&self, input: IssueOneTimeCode) -> MaintabitResult<OneTimeCode> {
        let result = self
            .db
            .query(
                "UPSERT type::record('otp', $email) SET \
                 email = $email, code = $code, \
                 expires_at = $expires_at, created_at = time::now() \
                 RETURN AFTER",
            )
            .bind(("email", input.email.clone()))
            .bind(("code", input.code))
            .bind(("expires_at", input.expires_at))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<OtpRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "otp".into(),
            id: input.email,
        })?;
        Ok(row.into())
    }

    async fn consume(&self, email: &str, code: &str, now: DateTime<Utc>) -> MaintabitResult<bool> {
        let result = self
            .db
            .query(
                "DELETE type::record('otp', $email) \
                 WHERE code = $code AND expires_at > $now \
                 RETURN BEFORE",
            )
            .bind(("email", email.to_string()))
            .bind(("code", code.to_string()))
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<EmailRow> = result.take(0).map_err(DbError::from)?;
        let consumed = !rows.is_empty();
        debug!(email, consumed, "One-time code checked");
        Ok(consumed)
    }

    async fn get(&self, email: &str) -> MaintabitResult<Option<OneTimeCode>> {
        let mut result = self
            .db
            .query("SELECT * FROM type::record('otp', $email)")
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OtpRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.into_iter().next().map(OneTimeCode::from))
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> MaintabitResult<u64> {
        let result = self
            .db
            .query("DELETE otp WHERE expires_at <= $now RETURN BEFORE")
            .bind(("now", now))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<EmailRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.len() as u64)
    }
}
