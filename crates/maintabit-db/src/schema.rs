//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Complaints
-- =======================================================================
DEFINE TABLE complaint SCHEMAFULL;
DEFINE FIELD tracking_id ON TABLE complaint TYPE string;
DEFINE FIELD email ON TABLE complaint TYPE string;
DEFINE FIELD department ON TABLE complaint TYPE string;
DEFINE FIELD category ON TABLE complaint TYPE string;
DEFINE FIELD sub_category ON TABLE complaint TYPE string;
DEFINE FIELD sub_other ON TABLE complaint TYPE option<string>;
DEFINE FIELD description ON TABLE complaint TYPE string;
DEFINE FIELD priority ON TABLE complaint TYPE string \
    ASSERT $value IN ['urgent', 'high', 'medium', 'low'];
DEFINE FIELD file_path ON TABLE complaint TYPE option<string>;
DEFINE FIELD status ON TABLE complaint TYPE string \
    ASSERT $value IN ['pending', 'in-progress', 'escalated', \
    'reopened', 'resolved'];
DEFINE FIELD submitted_at ON TABLE complaint TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE complaint TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD resolved_at ON TABLE complaint TYPE option<datetime>;
DEFINE INDEX idx_complaint_tracking_id ON TABLE complaint \
    COLUMNS tracking_id UNIQUE;
DEFINE INDEX idx_complaint_email ON TABLE complaint COLUMNS email;

-- =======================================================================
-- Per-department counters (record id = counter key)
-- =======================================================================
DEFINE TABLE counter SCHEMAFULL;
DEFINE FIELD seq ON TABLE counter TYPE int DEFAULT 0 \
    ASSERT $value >= 0;

-- =======================================================================
-- Directory options (categories, departments, sub-categories)
-- =======================================================================
DEFINE TABLE dynamic_option SCHEMAFULL;
DEFINE FIELD option_type ON TABLE dynamic_option TYPE string \
    ASSERT $value IN ['category', 'facilityType', 'department', \
    'subCategory', 'other'];
DEFINE FIELD option_value ON TABLE dynamic_option TYPE string;
DEFINE FIELD code ON TABLE dynamic_option TYPE option<string>;
DEFINE FIELD parent_category ON TABLE dynamic_option TYPE option<string>;
DEFINE FIELD is_active ON TABLE dynamic_option TYPE bool DEFAULT true;
DEFINE FIELD created_at ON TABLE dynamic_option TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_option_type_value_parent ON TABLE dynamic_option \
    COLUMNS option_type, option_value, parent_category UNIQUE;

-- =======================================================================
-- Accounts
-- =======================================================================
DEFINE TABLE student SCHEMAFULL;
DEFINE FIELD name ON TABLE student TYPE string;
DEFINE FIELD email ON TABLE student TYPE string;
DEFINE FIELD password_hash ON TABLE student TYPE string;
DEFINE FIELD created_at ON TABLE student TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE student TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_student_email ON TABLE student COLUMNS email UNIQUE;

DEFINE TABLE admin SCHEMAFULL;
DEFINE FIELD email ON TABLE admin TYPE string;
DEFINE FIELD password_hash ON TABLE admin TYPE string;
DEFINE FIELD created_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE admin TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_admin_email ON TABLE admin COLUMNS email UNIQUE;

-- =======================================================================
-- One-time login codes (record id = email)
-- =======================================================================
DEFINE TABLE otp SCHEMAFULL;
DEFINE FIELD email ON TABLE otp TYPE string;
DEFINE FIELD code ON TABLE otp TYPE string;
DEFINE FIELD expires_at ON TABLE otp TYPE datetime;
DEFINE FIELD created_at ON TABLE otp TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_otp_expires_at ON TABLE otp COLUMNS expires_at;

-- =======================================================================
-- Feedback & contact
-- =======================================================================
DEFINE TABLE feedback SCHEMAFULL;
DEFINE FIELD complaint_id ON TABLE feedback TYPE string;
DEFINE FIELD feedback ON TABLE feedback TYPE string;
DEFINE FIELD resolution ON TABLE feedback TYPE string;
DEFINE FIELD rating ON TABLE feedback TYPE int \
    ASSERT $value >= 0 AND $value <= 5;
DEFINE FIELD created_at ON TABLE feedback TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_feedback_complaint ON TABLE feedback \
    COLUMNS complaint_id;

DEFINE TABLE contact_message SCHEMAFULL;
DEFINE FIELD name ON TABLE contact_message TYPE string;
DEFINE FIELD email ON TABLE contact_message TYPE string;
DEFINE FIELD subject ON TABLE contact_message TYPE string;
DEFINE FIELD message ON TABLE contact_message TYPE string;
DEFINE FIELD user_id ON TABLE contact_message TYPE string;
DEFINE FIELD submitted_at ON TABLE contact_message TYPE datetime \
    DEFAULT time::now();
";

/// Apply all pending migrations.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(version = migration.version, "Migration applied");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_is_schemafull() {
        for line in SCHEMA_V1.lines().filter(|l| l.starts_with("DEFINE TABLE")) {
            assert!(line.ends_with("SCHEMAFULL;"), "not schemafull: {line}");
        }
    }

    #[test]
    fn migrations_are_ordered() {
        for window in MIGRATIONS.windows(2) {
            assert!(
                window[0].version < window[1].version,
                "Migrations must be in ascending version order"
            );
        }
    }
}
