//! Complaint domain model.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Urgent,
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    /// Upper-case form used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            other => Err(format!("invalid priority: {other}")),
        }
    }
}

/// Workflow status of a complaint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    #[default]
    Pending,
    InProgress,
    Escalated,
    Reopened,
    Resolved,
}

impl ComplaintStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintStatus::Pending => "pending",
            ComplaintStatus::InProgress => "in-progress",
            ComplaintStatus::Escalated => "escalated",
            ComplaintStatus::Reopened => "reopened",
            ComplaintStatus::Resolved => "resolved",
        }
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComplaintStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(ComplaintStatus::Pending),
            "in-progress" | "in_progress" => Ok(ComplaintStatus::InProgress),
            "escalated" => Ok(ComplaintStatus::Escalated),
            "reopened" => Ok(ComplaintStatus::Reopened),
            "resolved" => Ok(ComplaintStatus::Resolved),
            other => Err(format!("invalid status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: Uuid,
    /// `4649` + department code + per-department sequence. Assigned once.
    pub tracking_id: String,
    pub email: String,
    pub department: String,
    pub category: String,
    /// Effective sub-category (the free-text override when `other` was
    /// chosen).
    pub sub_category: String,
    pub sub_other: Option<String>,
    pub description: String,
    pub priority: Priority,
    pub file_path: Option<String>,
    pub status: ComplaintStatus,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct CreateComplaint {
    pub tracking_id: String,
    pub email: String,
    pub department: String,
    pub category: String,
    pub sub_category: String,
    pub sub_other: Option<String>,
    pub description: String,
    pub priority: Priority,
    pub file_path: Option<String>,
}
