//! Contact-form intake.

use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::contact::{ContactMessage, CreateContactMessage};
use maintabit_core::repository::ContactRepository;
use maintabit_core::validation::validate_email;
use tracing::info;

/// Sender recorded when the form is submitted without an account.
pub const ANONYMOUS: &str = "anonymous";

#[derive(Debug, Clone, Default)]
pub struct SubmitContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub subject: Option<String>,
    pub message: Option<String>,
    pub user_id: Option<String>,
}

pub struct ContactService<K: ContactRepository> {
    messages: K,
}

impl<K: ContactRepository> ContactService<K> {
    pub fn new(messages: K) -> Self {
        Self { messages }
    }

    pub async fn submit(&self, input: SubmitContact) -> MaintabitResult<ContactMessage> {
        let text = |v: Option<String>| {
            v.map(|s| s.trim().to_owned())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| MaintabitError::validation("All fields are required"))
        };

        let name = text(input.name)?;
        let email = text(input.email)?;
        let subject = text(input.subject)?;
        let message = text(input.message)?;
        validate_email(&email)?;

        let user_id = input
            .user_id
            .map(|u| u.trim().to_owned())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| ANONYMOUS.to_string());

        let stored = self
            .messages
            .create(CreateContactMessage {
                name,
                email,
                subject,
                message,
                user_id,
            })
            .await?;
        info!(message_id = %stored.id, "Contact message stored");
        Ok(stored)
    }
}
