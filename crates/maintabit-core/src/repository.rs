//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Services are generic over these
//! traits so that no service crate depends on the database crate.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::MaintabitResult;
use crate::models::{
    account::{Admin, CreateAdmin, CreateStudent, Student},
    complaint::{Complaint, ComplaintStatus, CreateComplaint},
    contact::{ContactMessage, CreateContactMessage},
    feedback::{CreateFeedback, Feedback},
    option::{DirectoryOption, OptionFilter, OptionKind},
    otp::{IssueOneTimeCode, OneTimeCode},
};

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 50,
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

// ---------------------------------------------------------------------------
// Complaints
// ---------------------------------------------------------------------------

pub trait ComplaintRepository: Send + Sync {
    /// Persist a new complaint with status `pending`.
    fn create(&self, input: CreateComplaint)
    -> impl Future<Output = MaintabitResult<Complaint>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MaintabitResult<Complaint>> + Send;
    fn get_by_tracking_id(
        &self,
        tracking_id: &str,
    ) -> impl Future<Output = MaintabitResult<Complaint>> + Send;
    /// Oldest first.
    fn list(
        &self,
        pagination: Pagination,
    ) -> impl Future<Output = MaintabitResult<PaginatedResult<Complaint>>> + Send;
    /// Newest first.
    fn list_by_email(
        &self,
        email: &str,
    ) -> impl Future<Output = MaintabitResult<Vec<Complaint>>> + Send;
    /// Set the status and `updated_at`. `resolved_at` is set when
    /// `resolved_at` is `Some`.
    fn update_status(
        &self,
        id: Uuid,
        status: ComplaintStatus,
        now: DateTime<Utc>,
        resolved_at: Option<DateTime<Utc>>,
    ) -> impl Future<Output = MaintabitResult<Complaint>> + Send;
}

// ---------------------------------------------------------------------------
// Per-department counters
// ---------------------------------------------------------------------------

pub trait CounterRepository: Send + Sync {
    /// Atomically increment the counter at `key` and return the new value.
    ///
    /// A missing counter is created at 0 and incremented to 1. Two
    /// concurrent calls for the same key never observe the same value.
    fn increment(&self, key: &str) -> impl Future<Output = MaintabitResult<u64>> + Send;
    /// Current value without mutation, `None` if never incremented.
    fn current(&self, key: &str) -> impl Future<Output = MaintabitResult<Option<u64>>> + Send;
}

// ---------------------------------------------------------------------------
// Directory options
// ---------------------------------------------------------------------------

pub trait OptionRepository: Send + Sync {
    fn create(
        &self,
        kind: OptionKind,
    ) -> impl Future<Output = MaintabitResult<DirectoryOption>> + Send;
    fn get_by_id(&self, id: Uuid)
    -> impl Future<Output = MaintabitResult<DirectoryOption>> + Send;
    fn list(
        &self,
        filter: OptionFilter,
    ) -> impl Future<Output = MaintabitResult<Vec<DirectoryOption>>> + Send;
    /// Overwrite the payload and active flag of an existing option.
    fn replace(
        &self,
        id: Uuid,
        kind: OptionKind,
        is_active: bool,
    ) -> impl Future<Output = MaintabitResult<DirectoryOption>> + Send;
    fn delete(&self, id: Uuid) -> impl Future<Output = MaintabitResult<()>> + Send;
    /// Case-insensitive lookup of a department option by display name.
    /// Active entries carrying a code are preferred.
    fn find_department(
        &self,
        name: &str,
    ) -> impl Future<Output = MaintabitResult<Option<DirectoryOption>>> + Send;
    fn count(&self) -> impl Future<Output = MaintabitResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

pub trait StudentRepository: Send + Sync {
    fn create(&self, input: CreateStudent)
    -> impl Future<Output = MaintabitResult<Student>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MaintabitResult<Student>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = MaintabitResult<Student>> + Send;
}

pub trait AdminRepository: Send + Sync {
    fn create(&self, input: CreateAdmin) -> impl Future<Output = MaintabitResult<Admin>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = MaintabitResult<Admin>> + Send;
    fn get_by_email(&self, email: &str) -> impl Future<Output = MaintabitResult<Admin>> + Send;
}

// ---------------------------------------------------------------------------
// One-time codes
// ---------------------------------------------------------------------------

pub trait OtpRepository: Send + Sync {
    /// Store a code for an email, replacing any pending one.
    fn issue(
        &self,
        input: IssueOneTimeCode,
    ) -> impl Future<Output = MaintabitResult<OneTimeCode>> + Send;
    /// Atomically delete the pending code for `email` iff it equals `code`
    /// and has not expired at `now`. Returns whether a code was consumed.
    fn consume(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> impl Future<Output = MaintabitResult<bool>> + Send;
    fn get(&self, email: &str)
    -> impl Future<Output = MaintabitResult<Option<OneTimeCode>>> + Send;
    /// Remove every code expired at `now`. Returns the number removed.
    fn purge_expired(&self, now: DateTime<Utc>)
    -> impl Future<Output = MaintabitResult<u64>> + Send;
}

// ---------------------------------------------------------------------------
// Feedback & contact
// ---------------------------------------------------------------------------

pub trait FeedbackRepository: Send + Sync {
    fn create(&self, input: CreateFeedback)
    -> impl Future<Output = MaintabitResult<Feedback>> + Send;
    fn list_by_complaint(
        &self,
        complaint_id: &str,
    ) -> impl Future<Output = MaintabitResult<Vec<Feedback>>> + Send;
}

pub trait ContactRepository: Send + Sync {
    fn create(
        &self,
        input: CreateContactMessage,
    ) -> impl Future<Output = MaintabitResult<ContactMessage>> + Send;
}
