//! Domain models for MaintaBIT.
//!
//! These are the core types shared across all crates. Wire names are
//! camelCase to match the web client.

pub mod account;
pub mod complaint;
pub mod contact;
pub mod feedback;
pub mod option;
pub mod otp;
