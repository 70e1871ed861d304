//! Complaint intake, lookup and status changes.

use chrono::{DateTime, Utc};
use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::complaint::{Complaint, ComplaintStatus, CreateComplaint, Priority};
use maintabit_core::notify::{EmailMessage, Mailer};
use maintabit_core::repository::{
    ComplaintRepository, CounterRepository, OptionRepository, PaginatedResult, Pagination,
};
use maintabit_core::validation::validate_email;
use tracing::{info, warn};
use uuid::Uuid;

use crate::attachment::{Attachment, AttachmentStore};
use crate::config::DeskConfig;
use crate::issuer::TrackingIdIssuer;
use crate::templates;

/// Sub-category value that switches to the free-text `sub_other`.
pub const OTHER_SUB_CATEGORY: &str = "other";

const MISSING_FIELDS: &str = "All required fields must be filled";

/// Raw submission as received from the form.
#[derive(Debug, Clone, Default)]
pub struct SubmitComplaint {
    pub email: Option<String>,
    pub department: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub sub_other: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub attachment: Option<Attachment>,
}

#[derive(Debug)]
pub struct SubmitOutcome {
    pub complaint: Complaint,
    /// Acknowledgement shown to the submitter.
    pub message: String,
}

fn required(value: &Option<String>) -> MaintabitResult<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or_else(|| MaintabitError::validation(MISSING_FIELDS))
}

fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Complaint desk service.
///
/// Generic over repository and mailer implementations so that the desk
/// has no dependency on the database crate.
pub struct ComplaintService<C, O, K, M>
where
    C: ComplaintRepository,
    O: OptionRepository,
    K: CounterRepository,
    M: Mailer,
{
    complaints: C,
    issuer: TrackingIdIssuer<O, K>,
    attachments: AttachmentStore,
    mailer: M,
    config: DeskConfig,
}

impl<C, O, K, M> ComplaintService<C, O, K, M>
where
    C: ComplaintRepository,
    O: OptionRepository,
    K: CounterRepository,
    M: Mailer,
{
    pub fn new(
        complaints: C,
        issuer: TrackingIdIssuer<O, K>,
        mailer: M,
        config: DeskConfig,
    ) -> Self {
        let attachments = AttachmentStore::new(&config.upload_dir, config.max_upload_bytes);
        Self {
            complaints,
            issuer,
            attachments,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Validate, issue a tracking ID, store the attachment, persist and
    /// confirm by email.
    ///
    /// Nothing is stored and no sequence number is consumed when
    /// validation fails. A failed confirmation email does not fail the
    /// submission.
    pub async fn submit(&self, input: SubmitComplaint) -> MaintabitResult<SubmitOutcome> {
        let email = required(&input.email)?;
        let department = required(&input.department)?;
        let category = required(&input.category)?;
        let chosen_sub_category = required(&input.sub_category)?;
        let description = required(&input.description)?;
        validate_email(&email)?;

        let priority = match optional(input.priority) {
            Some(raw) => raw
                .parse::<Priority>()
                .map_err(|_| MaintabitError::validation("Invalid priority"))?,
            None => Priority::default(),
        };

        let sub_other = optional(input.sub_other);
        let sub_category = if chosen_sub_category.eq_ignore_ascii_case(OTHER_SUB_CATEGORY) {
            sub_other.clone().ok_or_else(|| {
                MaintabitError::validation("Please describe the sub-category")
            })?
        } else {
            chosen_sub_category
        };

        if let Some(attachment) = &input.attachment {
            attachment.validate(self.config.max_upload_bytes)?;
        }

        let tracking_id = self.issuer.issue(&department).await?.to_string();

        let file_path = match &input.attachment {
            Some(attachment) => Some(self.attachments.store(attachment).await?),
            None => None,
        };

        let complaint = self
            .complaints
            .create(CreateComplaint {
                tracking_id,
                email,
                department,
                category,
                sub_category,
                sub_other,
                description,
                priority,
                file_path,
            })
            .await?;

        info!(
            complaint_id = %complaint.id,
            tracking_id = %complaint.tracking_id,
            priority = %complaint.priority,
            "Complaint submitted"
        );

        self.notify(
            templates::submission_confirmation(&complaint, &self.config),
            &complaint,
        )
        .await;

        let message = format!(
            "Complaint submitted successfully with priority: {}",
            complaint.priority.label()
        );
        Ok(SubmitOutcome { complaint, message })
    }

    pub async fn get_by_id(&self, id: Uuid) -> MaintabitResult<Complaint> {
        self.complaints.get_by_id(id).await
    }

    pub async fn get_by_tracking_id(&self, tracking_id: &str) -> MaintabitResult<Complaint> {
        self.complaints.get_by_tracking_id(tracking_id.trim()).await
    }

    /// Every complaint, oldest first.
    pub async fn list_all(
        &self,
        pagination: Pagination,
    ) -> MaintabitResult<PaginatedResult<Complaint>> {
        self.complaints.list(pagination).await
    }

    /// A submitter's complaints, newest first.
    pub async fn list_by_email(&self, email: Option<&str>) -> MaintabitResult<Vec<Complaint>> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| MaintabitError::validation("Email is required"))?;
        self.complaints.list_by_email(email).await
    }

    /// Move a complaint to `status`. Moving to `resolved` stamps
    /// `resolved_at` and emails the submitter.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: Option<&str>,
        now: DateTime<Utc>,
    ) -> MaintabitResult<Complaint> {
        let raw = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| MaintabitError::validation("Status is required"))?;
        let status = raw
            .parse::<ComplaintStatus>()
            .map_err(MaintabitError::validation)?;

        let resolved_at = (status == ComplaintStatus::Resolved).then_some(now);
        let complaint = self
            .complaints
            .update_status(id, status, now, resolved_at)
            .await?;

        info!(complaint_id = %complaint.id, status = %complaint.status, "Complaint status updated");

        if status == ComplaintStatus::Resolved {
            self.notify(
                templates::resolution_notice(&complaint, &self.config),
                &complaint,
            )
            .await;
        }

        Ok(complaint)
    }

    /// Best-effort delivery; failures are logged only.
    async fn notify(&self, message: EmailMessage, complaint: &Complaint) {
        if let Err(e) = self.mailer.send(message).await {
            warn!(
                complaint_id = %complaint.id,
                tracking_id = %complaint.tracking_id,
                error = %e,
                "Failed to send complaint email"
            );
        }
    }
}
