//! SurrealDB implementation of [`ComplaintRepository`].

use chrono::{DateTime, Utc};
use maintabit_core::error::MaintabitResult;
use maintabit_core::models::complaint::{Complaint, ComplaintStatus, CreateComplaint, Priority};
use maintabit_core::repository::{ComplaintRepository, PaginatedResult, Pagination};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

/// DB-side row struct that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
struct ComplaintRow {
    record_id: String,
    tracking_id: String,
    email: String,
    department: String,
    category: String,
    sub_category: String,
    sub_other: Option<String>,
    description: String,
    priority: String,
    file_path: Option<String>,
    status: String,
    submitted_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl ComplaintRow {
    fn try_into_complaint(self) -> Result<Complaint, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(DbError::Decode)?;
        let status = self
            .status
            .parse::<ComplaintStatus>()
            .map_err(DbError::Decode)?;
        Ok(Complaint {
            id,
            tracking_id: self.tracking_id,
            email: self.email,
            department: self.department,
            category: self.category,
            sub_category: self.sub_category,
            sub_other: self.sub_other,
            description: self.description,
            priority,
            file_path: self.file_path,
            status,
            submitted_at: self.submitted_at,
            updated_at: self.updated_at,
            resolved_at: self.resolved_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

const SELECT_COMPLAINT: &str = "SELECT meta::id(id) AS record_id, * FROM";

fn first_complaint(rows: Vec<ComplaintRow>, id: String) -> Result<Complaint, DbError> {
    rows.into_iter()
        .next()
        .ok_or(DbError::NotFound {
            entity: "complaint".into(),
            id,
        })?
        .try_into_complaint()
}

/// SurrealDB implementation of the Complaint repository.
#[derive(Clone)]
pub struct SurrealComplaintRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealComplaintRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> ComplaintRepository for SurrealComplaintRepository<C> {
    async fn create(&self, input: CreateComplaint) -> MaintabitResult<Complaint> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('complaint', $id) SET \
                 tracking_id = $tracking_id, \
                 email = $email, department = $department, \
                 category = $category, sub_category = $sub_category, \
                 sub_other = $sub_other, description = $description, \
                 priority = $priority, file_path = $file_path, \
                 status = 'pending'; \
                 {SELECT_COMPLAINT} type::record('complaint', $id)"
            ))
            .bind(("id", id_str.clone()))
            .bind(("tracking_id", input.tracking_id))
            .bind(("email", input.email))
            .bind(("department", input.department))
            .bind(("category", input.category))
            .bind(("sub_category", input.sub_category))
            .bind(("sub_other", input.sub_other))
            .bind(("description", input.description))
            .bind(("priority", input.priority.as_str().to_string()))
            .bind(("file_path", input.file_path))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write(e, "complaint"))?;

        let rows: Vec<ComplaintRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_complaint(rows, id_str)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MaintabitResult<Complaint> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(format!("{SELECT_COMPLAINT} type::record('complaint', $id)"))
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ComplaintRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_complaint(rows, id_str)?)
    }

    async fn get_by_tracking_id(&self, tracking_id: &str) -> MaintabitResult<Complaint> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_COMPLAINT} complaint WHERE tracking_id = $tracking_id"
            ))
            .bind(("tracking_id", tracking_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ComplaintRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_complaint(rows, format!("tracking_id={tracking_id}"))?)
    }

    async fn list(&self, pagination: Pagination) -> MaintabitResult<PaginatedResult<Complaint>> {
        let mut count_result = self
            .db
            .query("SELECT count() AS total FROM complaint GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut result = self
            .db
            .query(format!(
                "{SELECT_COMPLAINT} complaint \
                 ORDER BY submitted_at ASC \
                 LIMIT $limit START $offset"
            ))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ComplaintRow> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(ComplaintRow::try_into_complaint)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }

    async fn list_by_email(&self, email: &str) -> MaintabitResult<Vec<Complaint>> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_COMPLAINT} complaint WHERE email = $email \
                 ORDER BY submitted_at DESC"
            ))
            .bind(("email", email.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<ComplaintRow> = result.take(0).map_err(DbError::from)?;
        let complaints = rows
            .into_iter()
            .map(ComplaintRow::try_into_complaint)
            .collect::<Result<Vec<_>, DbError>>()?;
        Ok(complaints)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
        now: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> MaintabitResult<Complaint> {
        let id_str = id.to_string();

        let mut sets = vec!["status = $status", "updated_at = $now"];
        if resolved_at.is_some() {
            sets.push("resolved_at = $resolved_at");
        }

        let query = format!(
            "UPDATE type::record('complaint', $id) SET {}; \
             {SELECT_COMPLAINT} type::record('complaint', $id)",
            sets.join(", ")
        );

        let mut builder = self
            .db
            .query(&query)
            .bind(("id", id_str.clone()))
            .bind(("status", status.as_str().to_string()))
            .bind(("now", now));
        if let Some(resolved_at) = resolved_at {
            builder = builder.bind(("resolved_at", resolved_at));
        }

        let result = builder.await.map_err(DbError::from)?;
        let mut result = result.check().map_err(DbError::from)?;

        let rows: Vec<ComplaintRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_complaint(rows, id_str)?)
    }
}
