//! One-time login code generation and the message that delivers it.

use maintabit_core::notify::EmailMessage;
use rand::Rng;

/// Smallest and largest code; every code has exactly six digits.
const CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;

/// Draw a six-digit code uniformly from `100000..=999999`.
pub fn generate_code() -> String {
    rand::rng().random_range(CODE_RANGE).to_string()
}

/// Render the email carrying `code` to `email`.
pub fn code_email(email: &str, code: &str, lifetime_secs: u64) -> EmailMessage {
    let minutes = (lifetime_secs / 60).max(1);
    EmailMessage {
        to: email.to_string(),
        subject: "Your OTP Code".into(),
        text: format!("Your OTP code is {code}. It will expire in {minutes} minutes."),
        html: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_ascii_digits() {
        for _ in 0..1_000 {
            let code = generate_code();
            assert_eq!(code.len(), 6, "{code}");
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn email_states_code_and_lifetime() {
        let message = code_email("asha@college.com", "482913", 300);
        assert_eq!(message.to, "asha@college.com");
        assert_eq!(
            message.text,
            "Your OTP code is 482913. It will expire in 5 minutes."
        );
    }
}
