//! Authentication service — signup, the two-step student login and the
//! one-step admin login.

use chrono::{DateTime, Duration, Utc};
use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::account::{Admin, CreateAdmin, CreateStudent, Role, Student};
use maintabit_core::models::otp::IssueOneTimeCode;
use maintabit_core::notify::Mailer;
use maintabit_core::repository::{AdminRepository, OtpRepository, StudentRepository};
use maintabit_core::validation::{require, validate_email};
use tracing::{error, info, warn};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::otp;
use crate::password;
use crate::token::{self, SessionClaims};

/// Outcome of the first student login step. The code itself is only
/// ever sent by email.
#[derive(Debug)]
pub struct LoginChallenge {
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

/// A freshly minted session.
#[derive(Debug)]
pub struct SessionOutput {
    /// Signed JWT session token.
    pub token: String,
    pub role: Role,
    /// Token lifetime in seconds.
    pub expires_in: u64,
}

/// Authentication service.
///
/// Generic over repository and mailer implementations so that the auth
/// layer has no dependency on the database crate.
pub struct AuthService<S, A, O, M>
where
    S: StudentRepository,
    A: AdminRepository,
    O: OtpRepository,
    M: Mailer,
{
    students: S,
    admins: A,
    otps: O,
    mailer: M,
    config: AuthConfig,
}

impl<S, A, O, M> AuthService<S, A, O, M>
where
    S: StudentRepository,
    A: AdminRepository,
    O: OtpRepository,
    M: Mailer,
{
    pub fn new(students: S, admins: A, otps: O, mailer: M, config: AuthConfig) -> Self {
        Self {
            students,
            admins,
            otps,
            mailer,
            config,
        }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a student account.
    pub async fn signup_student(&self, input: CreateStudent) -> MaintabitResult<Student> {
        let name = require("Name", Some(input.name.as_str()))?.to_string();
        let email = require("Email", Some(input.email.as_str()))?.to_string();
        require("Password", Some(input.password.as_str()))?;
        validate_email(&email)?;

        let student = self
            .students
            .create(CreateStudent {
                name,
                email,
                password: input.password,
            })
            .await?;
        info!(student_id = %student.id, "Student account created");
        Ok(student)
    }

    /// Register an administrator account.
    pub async fn signup_admin(&self, input: CreateAdmin) -> MaintabitResult<Admin> {
        let email = require("Email", Some(input.email.as_str()))?.to_string();
        require("Password", Some(input.password.as_str()))?;
        validate_email(&email)?;

        let admin = self
            .admins
            .create(CreateAdmin {
                email,
                password: input.password,
            })
            .await?;
        info!(admin_id = %admin.id, "Admin account created");
        Ok(admin)
    }

    /// First student login step: check the password, then issue and
    /// email a one-time code. Any pending code for the email is replaced.
    ///
    /// Unknown accounts and wrong passwords leave the code store
    /// untouched.
    pub async fn request_student_login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> MaintabitResult<LoginChallenge> {
        let email = email.trim();
        let student = match self.students.get_by_email(email).await {
            Ok(s) => s,
            Err(MaintabitError::NotFound { .. }) => {
                return Err(AuthError::AccountNotFound {
                    role: "Student",
                    email: email.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        password::check_password(password, &student.password_hash, self.config.pepper.as_deref())
            .inspect_err(|_| warn!(student_id = %student.id, "Student login rejected"))?;

        let code = otp::generate_code();
        let expires_at = now + Duration::seconds(self.config.otp_lifetime_secs as i64);

        // A pending code is only replaced once its successor was delivered.
        let message = otp::code_email(&student.email, &code, self.config.otp_lifetime_secs);
        if let Err(e) = self.mailer.send(message).await {
            error!(student_id = %student.id, error = %e, "Failed to deliver login code");
            return Err(e);
        }

        self.otps
            .issue(IssueOneTimeCode {
                email: student.email.clone(),
                code,
                expires_at,
            })
            .await?;

        info!(student_id = %student.id, "Login code issued");
        Ok(LoginChallenge {
            email: student.email,
            expires_at,
        })
    }

    /// Second student login step: exchange a pending code for a session.
    ///
    /// The code is consumed atomically; every failure mode collapses into
    /// [`AuthError::InvalidOtp`].
    pub async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        now: DateTime<Utc>,
    ) -> MaintabitResult<SessionOutput> {
        let email = email.trim();
        let code = code.trim();
        if email.is_empty() || code.is_empty() {
            return Err(AuthError::InvalidOtp.into());
        }

        if !self.otps.consume(email, code, now).await? {
            warn!(email, "Login code rejected");
            return Err(AuthError::InvalidOtp.into());
        }

        let student = match self.students.get_by_email(email).await {
            Ok(s) => s,
            Err(MaintabitError::NotFound { .. }) => return Err(AuthError::InvalidOtp.into()),
            Err(e) => return Err(e),
        };

        let token = token::issue_session_token(
            student.id,
            &student.email,
            Role::Student,
            now,
            &self.config,
        )?;
        info!(student_id = %student.id, "Student session issued");
        Ok(self.session(token, Role::Student))
    }

    /// One-step administrator login.
    pub async fn admin_login(
        &self,
        email: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> MaintabitResult<SessionOutput> {
        let email = email.trim();
        let admin = match self.admins.get_by_email(email).await {
            Ok(a) => a,
            Err(MaintabitError::NotFound { .. }) => {
                return Err(AuthError::AccountNotFound {
                    role: "Admin",
                    email: email.to_string(),
                }
                .into());
            }
            Err(e) => return Err(e),
        };

        password::check_password(password, &admin.password_hash, self.config.pepper.as_deref())
            .inspect_err(|_| warn!(admin_id = %admin.id, "Admin login rejected"))?;

        let token =
            token::issue_session_token(admin.id, &admin.email, Role::Admin, now, &self.config)?;
        info!(admin_id = %admin.id, "Admin session issued");
        Ok(self.session(token, Role::Admin))
    }

    /// Verify a bearer token presented on a request.
    pub fn validate_token(&self, raw: &str) -> MaintabitResult<SessionClaims> {
        Ok(token::validate_session_token(raw, &self.config)?)
    }

    /// Drop every code that expired at `now`.
    pub async fn purge_expired_codes(&self, now: DateTime<Utc>) -> MaintabitResult<u64> {
        let purged = self.otps.purge_expired(now).await?;
        if purged > 0 {
            info!(purged, "Expired login codes purged");
        }
        Ok(purged)
    }

    fn session(&self, token: String, role: Role) -> SessionOutput {
        SessionOutput {
            token,
            role,
            expires_in: self.config.session_token_lifetime_secs,
        }
    }
}
