//! MaintaBIT Auth — password verification, one-time login codes and
//! session token issuance/validation.

pub mod config;
pub mod error;
pub mod otp;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthService, LoginChallenge, SessionOutput};
pub use token::SessionClaims;
