use std::sync::Arc;

use maintabit_auth::AuthService;
use maintabit_db::repository::{
    SurrealAdminRepository, SurrealComplaintRepository, SurrealContactRepository,
    SurrealCounterRepository, SurrealFeedbackRepository, SurrealOptionRepository,
    SurrealOtpRepository, SurrealStudentRepository,
};
use maintabit_db::DbManager;
use maintabit_desk::{
    ComplaintService, ContactService, FeedbackService, OptionService, TrackingIdIssuer,
};
use surrealdb::Surreal;
use surrealdb::engine::any::Any;

use crate::config::Config;
use crate::mailer::ServerMailer;

pub type Auth = AuthService<
    SurrealStudentRepository<Any>,
    SurrealAdminRepository<Any>,
    SurrealOtpRepository<Any>,
    Arc<ServerMailer>,
>;

pub type Desk = ComplaintService<
    SurrealComplaintRepository<Any>,
    SurrealOptionRepository<Any>,
    SurrealCounterRepository<Any>,
    Arc<ServerMailer>,
>;

/// Student and admin repositories hashing with the configured pepper.
pub fn account_repositories(
    client: &Surreal<Any>,
    pepper: Option<&str>,
) -> (SurrealStudentRepository<Any>, SurrealAdminRepository<Any>) {
    match pepper {
        Some(pepper) => (
            SurrealStudentRepository::with_pepper(client.clone(), pepper.to_string()),
            SurrealAdminRepository::with_pepper(client.clone(), pepper.to_string()),
        ),
        None => (
            SurrealStudentRepository::new(client.clone()),
            SurrealAdminRepository::new(client.clone()),
        ),
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub db: DbManager,
    pub auth: Auth,
    pub desk: Desk,
    pub options: OptionService<SurrealOptionRepository<Any>>,
    pub feedback: FeedbackService<SurrealFeedbackRepository<Any>>,
    pub contact: ContactService<SurrealContactRepository<Any>>,
}

impl AppState {
    pub fn new(config: &Config, db: DbManager, mailer: ServerMailer) -> Self {
        let client = db.client().clone();
        let mailer = Arc::new(mailer);

        let (students, admins) = account_repositories(&client, config.auth.pepper.as_deref());

        let auth = AuthService::new(
            students,
            admins,
            SurrealOtpRepository::new(client.clone()),
            mailer.clone(),
            config.auth.clone(),
        );

        let desk = ComplaintService::new(
            SurrealComplaintRepository::new(client.clone()),
            TrackingIdIssuer::new(
                SurrealOptionRepository::new(client.clone()),
                SurrealCounterRepository::new(client.clone()),
            ),
            mailer,
            config.desk.clone(),
        );

        Self {
            auth,
            desk,
            options: OptionService::new(SurrealOptionRepository::new(client.clone())),
            feedback: FeedbackService::new(SurrealFeedbackRepository::new(client.clone())),
            contact: ContactService::new(SurrealContactRepository::new(client)),
            db,
        }
    }
}
