//! Notification emails sent by the complaint desk.

use maintabit_core::models::complaint::{Complaint, Priority};
use maintabit_core::notify::EmailMessage;

use crate::config::DeskConfig;

fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::Urgent => "#dc3545",
        Priority::High => "#fd7e14",
        Priority::Medium => "#ffc107",
        Priority::Low => "#28a745",
    }
}

fn button(href: &str, label: &str, color: &str) -> String {
    format!(
        "<p><a href=\"{href}\" style=\"background-color: {color}; color: white; \
         padding: 10px 20px; text-decoration: none; border-radius: 5px; \
         display: inline-block;\">{label}</a></p>"
    )
}

/// Sent to the submitter once a complaint is stored.
pub fn submission_confirmation(complaint: &Complaint, config: &DeskConfig) -> EmailMessage {
    let track_url = config.client_url("track-complaint");
    let priority = complaint.priority.label();

    let text = format!(
        "Hello,\n\n\
         Your complaint has been submitted successfully!\n\n\
         Tracking ID: {tracking}\n\
         Department: {department}\n\
         Category: {category}\n\
         Sub-Category: {sub_category}\n\
         Priority: {priority}\n\n\
         You can track your complaint status using this tracking ID at:\n\
         {track_url}\n\n\
         Thank you for submitting your complaint.\n",
        tracking = complaint.tracking_id,
        department = complaint.department,
        category = complaint.category,
        sub_category = complaint.sub_category,
    );

    let html = format!(
        "<p>Hello,</p>\
         <p>Your complaint has been submitted successfully!</p>\
         <div style=\"background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin: 15px 0;\">\
         <p><strong>Tracking ID:</strong> <span style=\"color: #007bff; font-weight: bold;\">{tracking}</span></p>\
         <p><strong>Department:</strong> {department}</p>\
         <p><strong>Category:</strong> {category}</p>\
         <p><strong>Sub-Category:</strong> {sub_category}</p>\
         <p><strong>Priority:</strong> <span style=\"color: {color}; font-weight: bold;\">{priority}</span></p>\
         </div>\
         <p>You can track your complaint status using this tracking ID at:</p>\
         {track_button}\
         <p>Thank you for submitting your complaint.</p>",
        tracking = complaint.tracking_id,
        department = complaint.department,
        category = complaint.category,
        sub_category = complaint.sub_category,
        color = priority_color(complaint.priority),
        track_button = button(&track_url, "Track Complaint Status", "#007bff"),
    );

    EmailMessage {
        to: complaint.email.clone(),
        subject: "Complaint Submitted Successfully".into(),
        text,
        html: Some(html),
    }
}

/// Sent to the submitter when a complaint moves to `resolved`.
pub fn resolution_notice(complaint: &Complaint, config: &DeskConfig) -> EmailMessage {
    let feedback_url = config.client_url("feedback");
    let track_url = config.client_url("track-complaint");
    let priority = complaint.priority.label();
    let submitted = complaint.submitted_at.format("%Y-%m-%d %H:%M UTC");
    let resolved = complaint
        .resolved_at
        .unwrap_or(complaint.updated_at)
        .format("%Y-%m-%d %H:%M UTC");

    let text = format!(
        "Hello,\n\n\
         Your complaint (Tracking ID: {tracking}) has been marked as RESOLVED.\n\n\
         Department: {department}\n\
         Category: {category}\n\
         Sub-Category: {sub_category}\n\
         Priority: {priority}\n\n\
         We would love to hear your feedback! Please fill out our feedback form:\n\
         {feedback_url}\n\n\
         You can also track your complaint status anytime at:\n\
         {track_url}\n\n\
         Thank you for your patience.\n",
        tracking = complaint.tracking_id,
        department = complaint.department,
        category = complaint.category,
        sub_category = complaint.sub_category,
    );

    let html = format!(
        "<p>Hello,</p>\
         <p>Your complaint (<strong>Tracking ID: {tracking}</strong>) has been marked as <strong>RESOLVED</strong>.</p>\
         <div style=\"background-color: #f8f9fa; padding: 15px; border-radius: 5px; margin: 15px 0;\"><ul>\
         <li><strong>Department:</strong> {department}</li>\
         <li><strong>Category:</strong> {category}</li>\
         <li><strong>Sub-Category:</strong> {sub_category}</li>\
         <li><strong>Priority:</strong> {priority}</li>\
         <li><strong>Submitted At:</strong> {submitted}</li>\
         <li><strong>Resolved At:</strong> {resolved}</li>\
         </ul></div>\
         <p>We would love to hear your feedback! Please fill out our feedback form:</p>\
         {feedback_button}\
         <p>You can also track your complaint status anytime at:</p>\
         {track_button}\
         <p>Thank you for your patience.</p>",
        tracking = complaint.tracking_id,
        department = complaint.department,
        category = complaint.category,
        sub_category = complaint.sub_category,
        feedback_button = button(&feedback_url, "Submit Feedback", "#28a745"),
        track_button = button(&track_url, "Track Complaint Status", "#007bff"),
    );

    EmailMessage {
        to: complaint.email.clone(),
        subject: "Your complaint has been resolved".into(),
        text,
        html: Some(html),
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use maintabit_core::models::complaint::ComplaintStatus;
    use uuid::Uuid;

    use super::*;

    fn complaint() -> Complaint {
        Complaint {
            id: Uuid::new_v4(),
            tracking_id: "4649245107".into(),
            email: "asha@college.com".into(),
            department: "Computer Engineering".into(),
            category: "facility".into(),
            sub_category: "Fan".into(),
            sub_other: None,
            description: "Fan broken".into(),
            priority: Priority::Urgent,
            file_path: None,
            status: ComplaintStatus::Pending,
            submitted_at: Utc::now(),
            updated_at: Utc::now(),
            resolved_at: None,
        }
    }

    #[test]
    fn confirmation_carries_tracking_id_and_link() {
        let config = DeskConfig {
            public_base_url: "https://maintabit.example/".into(),
            ..Default::default()
        };
        let message = submission_confirmation(&complaint(), &config);
        assert_eq!(message.to, "asha@college.com");
        assert!(message.text.contains("Tracking ID: 4649245107"));
        assert!(message.text.contains("Priority: URGENT"));
        assert!(
            message
                .text
                .contains("https://maintabit.example/track-complaint")
        );
        assert!(message.html.unwrap().contains("#dc3545"));
    }

    #[test]
    fn resolution_links_feedback_form() {
        let message = resolution_notice(&complaint(), &DeskConfig::default());
        assert_eq!(message.subject, "Your complaint has been resolved");
        assert!(message.text.contains("http://localhost:3000/feedback"));
        assert!(message.text.contains("RESOLVED"));
    }
}
