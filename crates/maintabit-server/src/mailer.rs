//! Outbound email transports.

use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::notify::{EmailMessage, Mailer};
use serde::Serialize;

/// Writes messages to the log instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> MaintabitResult<()> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.text,
            "Email not delivered (no relay configured)"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
}

/// Posts each message as JSON to an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    from: String,
}

impl HttpMailer {
    pub fn new(endpoint: impl Into<String>, from: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            from: from.into(),
        }
    }
}

impl Mailer for HttpMailer {
    async fn send(&self, message: EmailMessage) -> MaintabitResult<()> {
        let payload = RelayPayload {
            from: &self.from,
            to: &message.to,
            subject: &message.subject,
            text: &message.text,
            html: message.html.as_deref(),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MaintabitError::Notification(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MaintabitError::Notification(format!(
                "mail relay responded with {status}"
            )));
        }

        tracing::debug!(to = %message.to, subject = %message.subject, "Email handed to relay");
        Ok(())
    }
}

/// The transport chosen at startup.
#[derive(Debug, Clone)]
pub enum ServerMailer {
    Log(LogMailer),
    Relay(HttpMailer),
}

impl ServerMailer {
    pub fn from_config(relay_url: Option<&str>, from: &str) -> Self {
        match relay_url {
            Some(url) => ServerMailer::Relay(HttpMailer::new(url, from)),
            None => ServerMailer::Log(LogMailer),
        }
    }
}

impl Mailer for ServerMailer {
    async fn send(&self, message: EmailMessage) -> MaintabitResult<()> {
        match self {
            ServerMailer::Log(mailer) => mailer.send(message).await,
            ServerMailer::Relay(mailer) => mailer.send(message).await,
        }
    }
}
