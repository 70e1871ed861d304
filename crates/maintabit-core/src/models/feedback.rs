//! Post-resolution feedback model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Highest accepted rating.
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    /// Tracking ID (or id) of the complaint the feedback refers to.
    pub complaint_id: String,
    pub feedback: String,
    pub resolution: String,
    pub rating: u8,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedback {
    pub complaint_id: String,
    pub feedback: String,
    pub resolution: String,
    pub rating: u8,
}
