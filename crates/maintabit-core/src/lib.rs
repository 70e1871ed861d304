//! MaintaBIT Core — domain models, repository traits, department-code
//! resolution and tracking-ID composition shared by every other crate.

pub mod department;
pub mod error;
pub mod models;
pub mod notify;
pub mod repository;
pub mod validation;

pub use error::{MaintabitError, MaintabitResult};
