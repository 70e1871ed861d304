//! Outbound notification seam.
//!
//! Services hand fully rendered messages to a [`Mailer`]; transport is the
//! binary's concern.

use std::sync::Arc;

use crate::error::MaintabitResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

pub trait Mailer: Send + Sync {
    fn send(&self, message: EmailMessage) -> impl Future<Output = MaintabitResult<()>> + Send;
}

impl<M: Mailer> Mailer for Arc<M> {
    fn send(&self, message: EmailMessage) -> impl Future<Output = MaintabitResult<()>> + Send {
        (**self).send(message)
    }
}
