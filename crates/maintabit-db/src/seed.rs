//! Startup seeding: default directory options, department-code
//! reconciliation and the default accounts.
//!
//! Every step is idempotent; running the seed twice leaves the store as
//! it was after the first run.

use maintabit_core::department::fallback_code;
use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::account::{CreateAdmin, CreateStudent};
use maintabit_core::models::option::{OptionFilter, OptionKind, OptionType};
use maintabit_core::repository::{AdminRepository, OptionRepository, StudentRepository};
use tracing::{info, warn};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@college.com";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_STUDENT_NAME: &str = "Test Student";
pub const DEFAULT_STUDENT_EMAIL: &str = "student@college.com";
pub const DEFAULT_STUDENT_PASSWORD: &str = "student123";

const CATEGORIES: &[&str] = &["facility", "request", "hostel"];

const DEPARTMENTS: &[(&str, Option<&str>)] = &[
    ("Computer Science", Some("24510")),
    ("Electrical Engineering", Some("29310")),
    ("Mechanical Engineering", Some("61210")),
    ("Civil Engineering", Some("19110")),
    ("Information Technology", None),
];

const SUB_CATEGORIES: &[(&str, &str)] = &[
    ("facility", "washroom"),
    ("facility", "Water-Cooler"),
    ("facility", "Garbage"),
    ("facility", "tap"),
    ("facility", "Fan"),
    ("facility", "Lights"),
    ("request", "wheelchair"),
    ("request", "mat"),
    ("request", "Table-Cloth"),
    ("request", "Sound-System"),
    ("request", "Seminar-Hall"),
    ("hostel", "electricity"),
    ("hostel", "cleaning"),
    ("hostel", "water"),
];

/// Option kinds inserted into an empty directory.
pub fn default_options() -> Vec<OptionKind> {
    let categories = CATEGORIES.iter().map(|value| OptionKind::Category {
        value: (*value).into(),
    });
    let departments = DEPARTMENTS.iter().map(|(value, code)| OptionKind::Department {
        value: (*value).into(),
        code: code.map(Into::into),
    });
    let sub_categories = SUB_CATEGORIES
        .iter()
        .map(|(parent, value)| OptionKind::SubCategory {
            value: (*value).into(),
            parent_category: (*parent).into(),
        });
    categories.chain(departments).chain(sub_categories).collect()
}

/// Populate the directory when it holds no options at all. Returns the
/// number of options inserted.
pub async fn seed_options<O: OptionRepository>(options: &O) -> MaintabitResult<usize> {
    if options.count().await? > 0 {
        info!("Directory already populated, skipping option seed");
        return Ok(0);
    }

    let defaults = default_options();
    let total = defaults.len();
    for kind in defaults {
        options.create(kind).await?;
    }
    info!(count = total, "Seeded directory options");
    Ok(total)
}

/// Bring the code of every department listed in the fallback table in
/// line with that table. Returns the number of options updated.
pub async fn reconcile_department_codes<O: OptionRepository>(
    options: &O,
) -> MaintabitResult<usize> {
    let departments = options
        .list(OptionFilter {
            option_type: Some(OptionType::Department),
            parent_category: None,
        })
        .await?;

    let mut updated = 0;
    for dept in departments {
        let Some(desired) = fallback_code(dept.kind.value()) else {
            continue;
        };
        if dept.kind.code() == Some(desired) {
            continue;
        }
        let kind = OptionKind::Department {
            value: dept.kind.value().to_string(),
            code: Some(desired.to_string()),
        };
        options.replace(dept.id, kind, dept.is_active).await?;
        info!(department = dept.kind.value(), code = desired, "Department code updated");
        updated += 1;
    }
    Ok(updated)
}

/// Create the default administrator and student when missing.
pub async fn seed_default_accounts<S, A>(students: &S, admins: &A) -> MaintabitResult<()>
where
    S: StudentRepository,
    A: AdminRepository,
{
    match admins.get_by_email(DEFAULT_ADMIN_EMAIL).await {
        Ok(_) => info!(email = DEFAULT_ADMIN_EMAIL, "Admin account already exists"),
        Err(MaintabitError::NotFound { .. }) => {
            admins
                .create(CreateAdmin {
                    email: DEFAULT_ADMIN_EMAIL.into(),
                    password: DEFAULT_ADMIN_PASSWORD.into(),
                })
                .await?;
            warn!(email = DEFAULT_ADMIN_EMAIL, "Default admin account created");
        }
        Err(e) => return Err(e),
    }

    match students.get_by_email(DEFAULT_STUDENT_EMAIL).await {
        Ok(_) => info!(email = DEFAULT_STUDENT_EMAIL, "Student account already exists"),
        Err(MaintabitError::NotFound { .. }) => {
            students
                .create(CreateStudent {
                    name: DEFAULT_STUDENT_NAME.into(),
                    email: DEFAULT_STUDENT_EMAIL.into(),
                    password: DEFAULT_STUDENT_PASSWORD.into(),
                })
                .await?;
            warn!(email = DEFAULT_STUDENT_EMAIL, "Default student account created");
        }
        Err(e) => return Err(e),
    }

    Ok(())
}

/// The full startup seed pass.
pub async fn run_seed<O, S, A>(
    options: &O,
    students: &S,
    admins: &A,
    with_default_accounts: bool,
) -> MaintabitResult<()>
where
    O: OptionRepository,
    S: StudentRepository,
    A: AdminRepository,
{
    seed_options(options).await?;
    reconcile_department_codes(options).await?;
    if with_default_accounts {
        seed_default_accounts(students, admins).await?;
    }
    Ok(())
}
