//! Transactional email bodies for account flows.

use crate::ports::EmailMessage;

pub(super) fn welcome_email(
    to: &str,
    display_name: Option<&str>,
    verification_link: &str,
) -> EmailMessage {
    let greeting = display_name.unwrap_or("there");
    EmailMessage {
        to: to.to_string(),
        subject: "Welcome! Please verify your email".to_string(),
        html_body: format!(
            "<h2>Hi {greeting},</h2>\
             <p>Thanks for signing up. Please confirm your email address to \
             activate your account:</p>\
             <p><a href=\"{verification_link}\">Verify my email</a></p>\
             <p>If you did not create this account, you can ignore this \
             message.</p>"
        ),
    }
}

pub(super) fn password_reset_email(to: &str, reset_link: &str) -> EmailMessage {
    EmailMessage {
        to: to.to_string(),
        subject: "Reset your password".to_string(),
        html_body: format!(
            "<h2>Password reset requested</h2>\
             <p>Follow this link to choose a new password:</p>\
             <p><a href=\"{reset_link}\">Reset my password</a></p>\
             <p>The link expires after a short time. If you did not request \
             a reset, no action is needed.</p>"
        ),
    }
}
