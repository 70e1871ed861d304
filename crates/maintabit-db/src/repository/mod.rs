//! SurrealDB repository implementations.

mod account;
mod complaint;
mod counter;
mod feedback;
mod option;
mod otp;

pub use account::{SurrealAdminRepository, SurrealStudentRepository, hash_password};
pub use complaint::SurrealComplaintRepository;
pub use counter::SurrealCounterRepository;
pub use feedback::{SurrealContactRepository, SurrealFeedbackRepository};
pub use option::SurrealOptionRepository;
pub use otp::SurrealOtpRepository;
