//! MaintaBIT Desk — complaint intake and triage.
//!
//! This crate provides:
//! - Tracking-ID issuing ([`TrackingIdIssuer`])
//! - Complaint submission, lookup and status changes ([`ComplaintService`])
//! - The administrator-managed option directory ([`OptionService`])
//! - Feedback and contact-form intake
//! - Attachment validation and storage
//! - Notification email templates

pub mod attachment;
pub mod complaint;
pub mod config;
pub mod contact;
pub mod directory;
pub mod feedback;
pub mod issuer;
pub mod templates;

pub use complaint::{ComplaintService, SubmitComplaint, SubmitOutcome};
pub use config::DeskConfig;
pub use contact::ContactService;
pub use directory::OptionService;
pub use feedback::FeedbackService;
pub use issuer::TrackingIdIssuer;
