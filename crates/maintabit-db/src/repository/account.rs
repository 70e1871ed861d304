//! SurrealDB implementations of [`StudentRepository`] and
//! [`AdminRepository`].
//!
//! Password hashing uses Argon2id with OWASP-recommended parameters
//! (memory: 19 MiB, iterations: 2, parallelism: 1). Salt is randomly
//! generated per hash. An optional pepper (server-side secret) can be
//! provided at construction time.

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHasher};
use chrono::{DateTime, Utc};
use maintabit_core::error::MaintabitResult;
use maintabit_core::models::account::{Admin, CreateAdmin, CreateStudent, Student};
use maintabit_core::repository::{AdminRepository, StudentRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct StudentRow {
    record_id: String,
    name: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl StudentRow {
    fn try_into_student(self) -> Result<Student, DbError> {
        Ok(Student {
            id: parse_id(&self.record_id)?,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct AdminRow {
    record_id: String,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AdminRow {
    fn try_into_admin(self) -> Result<Admin, DbError> {
        Ok(Admin {
            id: parse_id(&self.record_id)?,
            email: self.email,
            password_hash: self.password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn parse_id(raw: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(raw).map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))
}

fn missing(entity: &str, id: String) -> DbError {
    DbError::NotFound {
        entity: entity.into(),
        id,
    }
}

/// Hash a password with Argon2id using OWASP-recommended parameters.
///
/// If a pepper is provided, it is prepended to the password before
/// hashing. The salt is randomly generated for each call.
pub fn hash_password(password: &str, pepper: Option<&str>) -> Result<String, DbError> {
    // OWASP ASVS recommended: m=19456 (19 MiB), t=2, p=1
    let params = argon2::Params::new(19456, 2, 1, None)
        .map_err(|e| DbError::Hash(format!("argon2 params error: {e}")))?;
    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

    let peppered: String;
    let input = match pepper {
        Some(p) => {
            peppered = format!("{p}{password}");
            peppered.as_bytes()
        }
        None => password.as_bytes(),
    };

    let salt = SaltString::generate(&mut argon2::password_hash::rand_core::OsRng);
    let hash = argon2
        .hash_password(input, &salt)
        .map_err(|e| DbError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

// ---------------------------------------------------------------------------
// Students
// ---------------------------------------------------------------------------

/// SurrealDB implementation of the Student repository.
#[derive(Clone)]
pub struct SurrealStudentRepository<C: Connection> {
    db: Surreal<C>,
    pepper: Option<String>,
}

impl<C: Connection> SurrealStudentRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    async fn select_one(
        &self,
        condition: &str,
        key: &str,
        value: String,
    ) -> Result<Option<Student>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM student WHERE {condition}"
            ))
            .bind((key.to_string(), value))
            .await?;

        let rows: Vec<StudentRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(StudentRow::try_into_student)
            .transpose()
    }
}

impl<C: Connection> StudentRepository for SurrealStudentRepository<C> {
    async fn create(&self, input: CreateStudent) -> MaintabitResult<Student> {
        let id_str = Uuid::new_v4().to_string();
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('student', $id) SET \
                 name = $name, email = $email, \
                 password_hash = $password_hash; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('student', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("name", input.name))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write(e, "student"))?;

        let rows: Vec<StudentRow> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| missing("student", id_str))?;
        Ok(row.try_into_student()?)
    }

    async fn get_by_id(&self, id: Uuid) -> MaintabitResult<Student> {
        let id_str = id.to_string();
        let student = self
            .select_one("id = type::record('student', $id)", "id", id_str.clone())
            .await?
            .ok_or_else(|| missing("student", id_str))?;
        Ok(student)
    }

    async fn get_by_email(&self, email: &str) -> MaintabitResult<Student> {
        let student = self
            .select_one("email = $email", "email", email.to_string())
            .await?
            .ok_or_else(|| missing("student", format!("email={email}")))?;
        Ok(student)
    }
}

// ---------------------------------------------------------------------------
// Administrators
// ---------------------------------------------------------------------------

/// SurrealDB implementation of the Admin repository.
#[derive(Clone)]
pub struct SurrealAdminRepository<C: Connection> {
    db: Surreal<C>,
    pepper: Option<String>,
}

impl<C: Connection> SurrealAdminRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db, pepper: None }
    }

    pub fn with_pepper(db: Surreal<C>, pepper: String) -> Self {
        Self {
            db,
            pepper: Some(pepper),
        }
    }

    async fn select_one(
        &self,
        condition: &str,
        key: &str,
        value: String,
    ) -> Result<Option<Admin>, DbError> {
        let mut result = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM admin WHERE {condition}"
            ))
            .bind((key.to_string(), value))
            .await?;

        let rows: Vec<AdminRow> = result.take(0)?;
        rows.into_iter()
            .next()
            .map(AdminRow::try_into_admin)
            .transpose()
    }
}

impl<C: Connection> AdminRepository for SurrealAdminRepository<C> {
    async fn create(&self, input: CreateAdmin) -> MaintabitResult<Admin> {
        let id_str = Uuid::new_v4().to_string();
        let password_hash = hash_password(&input.password, self.pepper.as_deref())?;

        let result = self
            .db
            .query(
                "CREATE type::record('admin', $id) SET \
                 email = $email, password_hash = $password_hash; \
                 SELECT meta::id(id) AS record_id, * \
                 FROM type::record('admin', $id)",
            )
            .bind(("id", id_str.clone()))
            .bind(("email", input.email))
            .bind(("password_hash", password_hash))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write(e, "admin"))?;

        let rows: Vec<AdminRow> = result.take(1).map_err(DbError::from)?;
        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| missing("admin", id_str))?;
        Ok(row.try_into_admin()?)
    }

    async fn get_by_id(&self, id: Uuid) -> MaintabitResult<Admin> {
        let id_str = id.to_string();
        let admin = self
            .select_one("id = type::record('admin', $id)", "id", id_str.clone())
            .await?
            .ok_or_else(|| missing("admin", id_str))?;
        Ok(admin)
    }

    async fn get_by_email(&self, email: &str) -> MaintabitResult<Admin> {
        let admin = self
            .select_one("email = $email", "email", email.to_string())
            .await?
            .ok_or_else(|| missing("admin", format!("email={email}")))?;
        Ok(admin)
    }
}
