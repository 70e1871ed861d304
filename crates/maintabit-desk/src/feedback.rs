//! Post-resolution feedback intake.

use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::feedback::{CreateFeedback, Feedback, MAX_RATING};
use maintabit_core::repository::FeedbackRepository;
use tracing::info;

/// Feedback form as received; every field is required.
#[derive(Debug, Clone, Default)]
pub struct SubmitFeedback {
    pub complaint_id: Option<String>,
    pub feedback: Option<String>,
    pub resolution: Option<String>,
    pub rating: Option<i64>,
}

pub struct FeedbackService<F: FeedbackRepository> {
    feedback: F,
}

impl<F: FeedbackRepository> FeedbackService<F> {
    pub fn new(feedback: F) -> Self {
        Self { feedback }
    }

    pub async fn submit(&self, input: SubmitFeedback) -> MaintabitResult<Feedback> {
        let missing = || MaintabitError::validation("All fields are required");
        let text = |v: Option<String>| {
            v.map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .ok_or_else(missing)
        };

        let complaint_id = text(input.complaint_id)?;
        let feedback = text(input.feedback)?;
        let resolution = text(input.resolution)?;
        let rating = input.rating.ok_or_else(missing)?;

        let rating = u8::try_from(rating)
            .ok()
            .filter(|r| *r <= MAX_RATING)
            .ok_or_else(|| {
                MaintabitError::validation(format!("Rating must be between 0 and {MAX_RATING}"))
            })?;

        let stored = self
            .feedback
            .create(CreateFeedback {
                complaint_id,
                feedback,
                resolution,
                rating,
            })
            .await?;
        info!(feedback_id = %stored.id, complaint_id = %stored.complaint_id, "Feedback stored");
        Ok(stored)
    }

    pub async fn list_for_complaint(&self, complaint_id: &str) -> MaintabitResult<Vec<Feedback>> {
        self.feedback.list_by_complaint(complaint_id).await
    }
}
