pub mod auth;
pub mod complaints;
pub mod contact;
pub mod feedback;
pub mod health;
pub mod options;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::state::AppState;

/// Multipart framing on top of the attachment itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn create_router(state: Arc<AppState>) -> Router {
    let upload_limit = state.desk.config().max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let uploads = ServeDir::new(&state.desk.config().upload_dir);

    Router::new()
        // Health
        .route("/health", get(health::health_check))

        // Authentication
        .route("/api/auth/student/signup", post(auth::signup_student))
        .route("/api/auth/student/login", post(auth::login_student))
        .route("/api/auth/student/verify-otp", post(auth::verify_otp))
        .route("/api/auth/admin/signup", post(auth::signup_admin))
        .route("/api/auth/admin/login", post(auth::login_admin))

        // Complaints
        .route(
            "/api/submit_complaint",
            post(complaints::submit_complaint).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/complaints", get(complaints::list_complaints))
        .route("/api/complaints-by-email", get(complaints::complaints_by_email))
        .route("/api/complaints/id/:id", get(complaints::get_complaint_by_id))
        .route("/api/complaints/:id/status", put(complaints::update_status))
        .route("/api/complaints/:id/feedback", get(feedback::list_feedback))
        .route("/api/complaints/:id", get(complaints::get_complaint_by_tracking_id))

        // Directory options
        .route(
            "/api/dynamic-options",
            get(options::list_options).post(options::create_option),
        )
        .route(
            "/api/dynamic-options/:id",
            put(options::update_option).delete(options::delete_option),
        )

        // Feedback & contact
        .route("/api/submit_feedback", post(feedback::submit_feedback))
        .route("/api/contact", post(contact::submit_contact))

        // Stored attachments
        .nest_service("/uploads", uploads)

        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
