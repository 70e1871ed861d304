use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use maintabit_auth::AuthConfig;
use maintabit_db::DbConfig;
use maintabit_desk::DeskConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to
    pub bind_address: SocketAddr,

    pub db: DbConfig,
    pub auth: AuthConfig,
    pub desk: DeskConfig,

    /// HTTP mail relay endpoint. Messages are only logged when unset.
    pub mail_relay_url: Option<String>,

    /// Sender address handed to the relay
    pub mail_from: String,

    /// How often expired login codes are swept
    pub otp_sweep_interval: Duration,

    /// Create the default admin and student accounts at startup
    pub seed_default_accounts: bool,
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// PEM blocks in env files are commonly written on one line with `\n`.
fn pem_var(name: &str) -> Result<String> {
    let raw = std::env::var(name).with_context(|| format!("{name} environment variable required"))?;
    Ok(raw.replace("\\n", "\n"))
}

fn flag(name: &str) -> bool {
    matches!(
        optional_var(name).as_deref().map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let bind_address = var_or("BIND_ADDRESS", "0.0.0.0:5000")
            .parse()
            .context("BIND_ADDRESS must be host:port")?;

        let db_defaults = DbConfig::default();
        let db = DbConfig {
            url: var_or("DATABASE_URL", &db_defaults.url),
            namespace: var_or("DATABASE_NS", &db_defaults.namespace),
            database: var_or("DATABASE_DB", &db_defaults.database),
            username: var_or("DATABASE_USER", &db_defaults.username),
            password: var_or("DATABASE_PASS", &db_defaults.password),
        };

        let auth_defaults = AuthConfig::default();
        let auth = AuthConfig {
            jwt_private_key_pem: pem_var("JWT_PRIVATE_KEY_PEM")?,
            jwt_public_key_pem: pem_var("JWT_PUBLIC_KEY_PEM")?,
            jwt_issuer: var_or("JWT_ISSUER", &auth_defaults.jwt_issuer),
            pepper: optional_var("PASSWORD_PEPPER"),
            ..auth_defaults
        };

        let desk_defaults = DeskConfig::default();
        let desk = DeskConfig {
            upload_dir: optional_var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(desk_defaults.upload_dir),
            public_base_url: var_or("PUBLIC_BASE_URL", &desk_defaults.public_base_url),
            ..desk_defaults
        };

        let otp_sweep_interval = Duration::from_secs(
            var_or("OTP_SWEEP_INTERVAL_SECS", "60")
                .parse()
                .context("OTP_SWEEP_INTERVAL_SECS must be a number of seconds")?,
        );
        if otp_sweep_interval.is_zero() {
            anyhow::bail!("OTP_SWEEP_INTERVAL_SECS must be greater than zero");
        }

        Ok(Config {
            bind_address,
            db,
            auth,
            desk,
            mail_relay_url: optional_var("MAIL_RELAY_URL"),
            mail_from: var_or("MAIL_FROM", "no-reply@maintabit.local"),
            otp_sweep_interval,
            seed_default_accounts: flag("SEED_DEFAULT_ACCOUNTS"),
        })
    }
}
