//! SurrealDB implementations of [`FeedbackRepository`] and
//! [`ContactRepository`].

use chrono::{DateTime, Utc};
use maintabit_core::error::MaintabitResult;
use maintabit_core::models::contact::{ContactMessage, CreateContactMessage};
use maintabit_core::models::feedback::{CreateFeedback, Feedback};
use maintabit_core::repository::{ContactRepository, FeedbackRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct FeedbackRow {
    record_id: String,
    complaint_id: String,
    feedback: String,
    resolution: String,
    rating: u8,
    created_at: DateTime<Utc>,
}

impl FeedbackRow {
    fn try_into_feedback(self) -> Result<Feedback, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(Feedback {
            id,
            complaint_id: self.complaint_id,
            feedback: self.feedback,
            resolution: self.resolution,
            rating: self.rating,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct ContactRow {
    record_id: String,
    name: String,
    email: String,
    subject: String,
    message: String,
    user_id: String,
    submitted_at: DateTime<Utc>,
}

impl ContactRow {
    fn try_into_message(self) -> Result<ContactMessage, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        Ok(ContactMessage {
            id,
            name: self.name,
            email: self.email,
            subject: self.subject,
            message: self.message,
            user_id: self.user_id,
            submitted_at: self.submitted_at,
        })
    }
}

/// SurrealDB implementation of the Feedback repository.
#[derive(Clone)]
pub struct SurrealFeedbackRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealFeedbackRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> FeedbackRepository for SurrealFeedbackRepository<C> {
    async fn create(&self, input: CreateFeedback) -> MaintabitResult<Feedback> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('feedback', $id) SET \
                 complaint_id = $complaint_id, feedback = $feedback, \
                 resolution = $resolution, rating = $rating; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('feedback', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("complaint_id", input.complaint_id))
            .bind(("feedback", input.feedback))
            .bind(("resolution", input.resolution))
            .bind(("rating", input.rating))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<FeedbackRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "feedback".into(),
            id: id_str,
        })?;
        Ok(row.try_into_feedback()?)
    }

    async fn list_by_complaint(&self, complaint_id: &str) -> MaintabitResult<Vec<Feedback>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM feedback \
                 WHERE complaint_id = $complaint_id ORDER BY created_at ASC",
            )
            .bind(("complaint_id", complaint_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<FeedbackRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(FeedbackRow::try_into_feedback)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(items)
    }
}

/// SurrealDB implementation of the contact-message store.
#[derive(Clone)]
pub struct SurrealContactRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealContactRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ContactRepository for SurrealContactRepository<C> {
    async fn create(&self, input: CreateContactMessage) -> MaintabitResult<ContactMessage> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('contact_message', $id) SET \
                 name = $name, email = $email, subject = $subject, \
                 message = $message, user_id = $user_id; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('contact_message', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("subject", input.subject))
            .bind(("message", input.message))
            .bind(("user_id", input.user_id))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ContactRow> = result.take(1).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "contact_message".into(),
            id: id_str,
        })?;
        Ok(row.try_into_message()?)
    }
}
