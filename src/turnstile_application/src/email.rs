use askama::Template;
use thiserror::Error;
use turnstile_core::{MailNotification, User};

pub const VERIFICATION_EMAIL_SUBJECT: &str = "Verify Your Email Address";

#[derive(Template)]
#[template(path = "verification_email.html")]
struct VerificationEmailTemplate<'a> {
    name: &'a str,
    link: &'a str,
    description: &'a str,
    button_label: &'a str,
}

#[derive(Debug, Error)]
pub enum EmailBuildError {
    #[error("User email is not defined")]
    MissingRecipient,
    #[error("Failed to render email template: {0}")]
    Template(String),
}

/// Composes the verification email for a freshly issued token.
#[derive(Debug, Clone)]
pub struct VerificationEmails {
    base_url: String,
}

impl VerificationEmails {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn verification_link(&self, token: &str) -> String {
        format!("{}/api/auth/verify-email?token={}", self.base_url, token)
    }

    pub fn notification(
        &self,
        user: &User,
        token: &str,
    ) -> Result<MailNotification, EmailBuildError> {
        let to = user
            .email
            .clone()
            .ok_or(EmailBuildError::MissingRecipient)?;
        let link = self.verification_link(token);

        let html = VerificationEmailTemplate {
            name: &user.name,
            link: &link,
            description: "Thank you for signing up! To complete your registration, \
                          please click the button below to verify your email address.",
            button_label: "Verify Email",
        }
        .render()
        .map_err(|e| EmailBuildError::Template(e.to_string()))?;

        Ok(MailNotification {
            to,
            subject: VERIFICATION_EMAIL_SUBJECT.to_string(),
            text: format!(
                "Hello {},\n\nPlease verify your email by clicking the link: {}",
                user.name, link
            ),
            html: Some(html),
        })
    }
}
