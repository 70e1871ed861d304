//! One-time login code model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A pending one-time code. At most one exists per email; issuing a new
/// one replaces the previous.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone)]
pub struct IssueOneTimeCode {
    pub email: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}
