//! Integration tests for the counter and complaint repositories using
//! in-memory SurrealDB.

use std::collections::HashSet;

use chrono::{Duration, Utc};
use maintabit_core::MaintabitError;
use maintabit_core::models::complaint::{ComplaintStatus, CreateComplaint, Priority};
use maintabit_core::repository::{ComplaintRepository, CounterRepository, Pagination};
use maintabit_db::repository::{SurrealComplaintRepository, SurrealCounterRepository};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;

async fn setup() -> Surreal<surrealdb::engine::local::Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    maintabit_db::run_migrations(&db).await.unwrap();
    db
}

fn complaint(tracking_id: &str, email: &str) -> CreateComplaint {
    CreateComplaint {
        tracking_id: tracking_id.into(),
        email: email.into(),
        department: "Computer Engineering".into(),
        category: "facility".into(),
        sub_category: "Fan".into(),
        sub_other: None,
        description: "Ceiling fan in lab 3 is broken".into(),
        priority: Priority::High,
        file_path: None,
    }
}

// -----------------------------------------------------------------------
// Counter tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn missing_counter_starts_at_one() {
    let repo = SurrealCounterRepository::new(setup().await);

    assert_eq!(repo.current("complaint_24510").await.unwrap(), None);
    assert_eq!(repo.increment("complaint_24510").await.unwrap(), 1);
    assert_eq!(repo.current("complaint_24510").await.unwrap(), Some(1));
}

#[tokio::test]
async fn increment_continues_from_stored_value() {
    let db = setup().await;
    db.query("CREATE type::record('counter', 'complaint_24510') SET seq = 6")
        .await
        .unwrap()
        .check()
        .unwrap();

    let repo = SurrealCounterRepository::new(db);
    assert_eq!(repo.increment("complaint_24510").await.unwrap(), 7);
}

#[tokio::test]
async fn counters_are_independent_per_key() {
    let repo = SurrealCounterRepository::new(setup().await);

    repo.increment("complaint_24510").await.unwrap();
    repo.increment("complaint_24510").await.unwrap();
    assert_eq!(repo.increment("complaint_19110").await.unwrap(), 1);
    assert_eq!(repo.current("complaint_24510").await.unwrap(), Some(2));
}

#[tokio::test]
async fn concurrent_increments_never_collide() {
    let db = setup().await;
    db.query("CREATE type::record('counter', 'complaint_24510') SET seq = 2")
        .await
        .unwrap()
        .check()
        .unwrap();
    let repo = SurrealCounterRepository::new(db);

    let mut handles = Vec::new();
    for _ in 0..20 {
        let repo = repo.clone();
        handles.push(tokio::spawn(async move {
            repo.increment("complaint_24510").await.unwrap()
        }));
    }

    let mut seen = HashSet::new();
    for handle in handles {
        assert!(seen.insert(handle.await.unwrap()), "duplicate sequence");
    }
    let expected: HashSet<u64> = (3..=22).collect();
    assert_eq!(seen, expected);
    assert_eq!(repo.current("complaint_24510").await.unwrap(), Some(22));
}

// -----------------------------------------------------------------------
// Complaint tests
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_and_lookup_complaint() {
    let repo = SurrealComplaintRepository::new(setup().await);

    let created = repo
        .create(complaint("4649245107", "asha@college.com"))
        .await
        .unwrap();
    assert_eq!(created.status, ComplaintStatus::Pending);
    assert_eq!(created.priority, Priority::High);
    assert!(created.resolved_at.is_none());

    let by_id = repo.get_by_id(created.id).await.unwrap();
    assert_eq!(by_id.tracking_id, "4649245107");

    let by_tracking = repo.get_by_tracking_id("4649245107").await.unwrap();
    assert_eq!(by_tracking.id, created.id);
}

#[tokio::test]
async fn duplicate_tracking_id_is_rejected() {
    let repo = SurrealComplaintRepository::new(setup().await);

    repo.create(complaint("4649245101", "a@college.com"))
        .await
        .unwrap();
    let err = repo
        .create(complaint("4649245101", "b@college.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, MaintabitError::AlreadyExists { .. }));
}

#[tokio::test]
async fn unknown_tracking_id_is_not_found() {
    let repo = SurrealComplaintRepository::new(setup().await);
    let err = repo.get_by_tracking_id("0000").await.unwrap_err();
    assert!(matches!(err, MaintabitError::NotFound { .. }));
}

#[tokio::test]
async fn list_by_email_is_newest_first() {
    let repo = SurrealComplaintRepository::new(setup().await);

    repo.create(complaint("4649245101", "asha@college.com"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    repo.create(complaint("4649245102", "asha@college.com"))
        .await
        .unwrap();
    repo.create(complaint("4649245103", "ravi@college.com"))
        .await
        .unwrap();

    let mine = repo.list_by_email("asha@college.com").await.unwrap();
    let ids: Vec<_> = mine.iter().map(|c| c.tracking_id.as_str()).collect();
    assert_eq!(ids, ["4649245102", "4649245101"]);

    let page = repo.list(Pagination::default()).await.unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 3);
}

#[tokio::test]
async fn update_status_sets_resolution_time() {
    let repo = SurrealComplaintRepository::new(setup().await);
    let created = repo
        .create(complaint("4649245107", "asha@college.com"))
        .await
        .unwrap();

    let now = Utc::now() + Duration::seconds(1);
    let progressed = repo
        .update_status(created.id, ComplaintStatus::InProgress, now, None)
        .await
        .unwrap();
    assert_eq!(progressed.status, ComplaintStatus::InProgress);
    assert!(progressed.resolved_at.is_none());

    let resolved = repo
        .update_status(created.id, ComplaintStatus::Resolved, now, Some(now))
        .await
        .unwrap();
    assert_eq!(resolved.status, ComplaintStatus::Resolved);
    assert!(resolved.resolved_at.is_some());
    assert!(resolved.updated_at >= created.updated_at);
}

#[tokio::test]
async fn update_status_of_missing_complaint_is_not_found() {
    let repo = SurrealComplaintRepository::new(setup().await);
    let err = repo
        .update_status(
            uuid::Uuid::new_v4(),
            ComplaintStatus::Resolved,
            Utc::now(),
            None,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MaintabitError::NotFound { .. }));
}
