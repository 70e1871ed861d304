//! Integration tests for account, one-time code, feedback and contact
//! repositories using in-memory SurrealDB.

use chrono::{Duration, Utc};
use maintabit_core::MaintabitError;
use maintabit_core::models::account::{CreateAdmin, CreateStudent};
use maintabit_core::models::contact::CreateContactMessage;
use maintabit_core::models::feedback::CreateFeedback;
use maintabit_core::models::otp::IssueOneTimeCode;
use maintabit_core::repository::{
    AdminRepository, ContactRepository, FeedbackRepository, OtpRepository, StudentRepository,
};
use maintabit_db::repository::{
    SurrealAdminRepository, SurrealContactRepository, SurrealFeedbackRepository,
    SurrealOtpRepository, SurrealStudentRepository,
};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    maintabit_db::run_migrations(&db).await.unwrap();
    db
}

fn code_for(email: &str, code: &str, ttl: Duration) -> IssueOneTimeCode {
    IssueOneTimeCode {
        email: email.into(),
        code: code.into(),
        expires_at: Utc::now() + ttl,
    }
}

// -----------------------------------------------------------------------
// Accounts
// -----------------------------------------------------------------------

#[tokio::test]
async fn student_password_is_hashed_on_create() {
    let repo = SurrealStudentRepository::new(setup().await);

    let student = repo
        .create(CreateStudent {
            name: "Asha".into(),
            email: "asha@college.com".into(),
            password: "hunter22".into(),
        })
        .await
        .unwrap();
    assert!(student.password_hash.starts_with("$argon2id$"));

    let by_email = repo.get_by_email("asha@college.com").await.unwrap();
    assert_eq!(by_email.id, student.id);
    let by_id = repo.get_by_id(student.id).await.unwrap();
    assert_eq!(by_id.name, "Asha");
}

#[tokio::test]
async fn duplicate_student_email_is_rejected() {
    let repo = SurrealStudentRepository::new(setup().await);
    let input = CreateStudent {
        name: "Asha".into(),
        email: "asha@college.com".into(),
        password: "hunter22".into(),
    };
    repo.create(input.clone()).await.unwrap();
    let err = repo.create(input).await.unwrap_err();
    assert!(matches!(err, MaintabitError::AlreadyExists { .. }));
}

#[tokio::test]
async fn unknown_admin_is_not_found() {
    let repo = SurrealAdminRepository::new(setup().await);
    repo.create(CreateAdmin {
        email: "admin@college.com".into(),
        password: "admin123".into(),
    })
    .await
    .unwrap();

    let err = repo.get_by_email("nobody@college.com").await.unwrap_err();
    assert!(matches!(err, MaintabitError::NotFound { .. }));
}

// -----------------------------------------------------------------------
// One-time codes
// -----------------------------------------------------------------------

#[tokio::test]
async fn code_is_consumed_exactly_once() {
    let repo = SurrealOtpRepository::new(setup().await);
    repo.issue(code_for("asha@college.com", "123456", Duration::minutes(5)))
        .await
        .unwrap();

    let now = Utc::now();
    assert!(repo.consume("asha@college.com", "123456", now).await.unwrap());
    assert!(!repo.consume("asha@college.com", "123456", now).await.unwrap());
    assert!(repo.get("asha@college.com").await.unwrap().is_none());
}

#[tokio::test]
async fn wrong_code_leaves_pending_code_intact() {
    let repo = SurrealOtpRepository::new(setup().await);
    repo.issue(code_for("asha@college.com", "123456", Duration::minutes(5)))
        .await
        .unwrap();

    let now = Utc::now();
    assert!(!repo.consume("asha@college.com", "654321", now).await.unwrap());
    assert!(repo.consume("asha@college.com", "123456", now).await.unwrap());
}

#[tokio::test]
async fn reissue_supersedes_previous_code() {
    let repo = SurrealOtpRepository::new(setup().await);
    repo.issue(code_for("asha@college.com", "111111", Duration::minutes(5)))
        .await
        .unwrap();
    repo.issue(code_for("asha@college.com", "222222", Duration::minutes(5)))
        .await
        .unwrap();

    let now = Utc::now();
    assert!(!repo.consume("asha@college.com", "111111", now).await.unwrap());
    assert!(repo.consume("asha@college.com", "222222", now).await.unwrap());
}

#[tokio::test]
async fn expired_code_is_rejected_and_purged() {
    let repo = SurrealOtpRepository::new(setup().await);
    repo.issue(code_for("asha@college.com", "123456", Duration::minutes(5)))
        .await
        .unwrap();
    repo.issue(code_for("ravi@college.com", "654321", Duration::minutes(30)))
        .await
        .unwrap();

    let later = Utc::now() + Duration::minutes(6);
    assert!(!repo.consume("asha@college.com", "123456", later).await.unwrap());

    assert_eq!(repo.purge_expired(later).await.unwrap(), 1);
    assert!(repo.get("asha@college.com").await.unwrap().is_none());
    let pending = repo.get("ravi@college.com").await.unwrap().unwrap();
    assert!(!pending.is_expired(later));
}

// -----------------------------------------------------------------------
// Feedback & contact
// -----------------------------------------------------------------------

#[tokio::test]
async fn feedback_is_listed_per_complaint() {
    let repo = SurrealFeedbackRepository::new(setup().await);
    for (complaint_id, rating) in [("4649245107", 4), ("4649245107", 5), ("4649191101", 2)] {
        repo.create(CreateFeedback {
            complaint_id: complaint_id.into(),
            feedback: "Fixed quickly".into(),
            resolution: "Fan replaced".into(),
            rating,
        })
        .await
        .unwrap();
    }

    let items = repo.list_by_complaint("4649245107").await.unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|f| f.complaint_id == "4649245107"));
}

#[tokio::test]
async fn contact_message_is_stored() {
    let repo = SurrealContactRepository::new(setup().await);
    let stored = repo
        .create(CreateContactMessage {
            name: "Asha".into(),
            email: "asha@college.com".into(),
            subject: "Library hours".into(),
            message: "Please extend library hours during exams.".into(),
            user_id: "anonymous".into(),
        })
        .await
        .unwrap();
    assert_eq!(stored.user_id, "anonymous");
    assert_eq!(stored.subject, "Library hours");
}
