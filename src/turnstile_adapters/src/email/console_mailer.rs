use turnstile_core::{MailNotification, Mailer, MailerError};

/// Development mailer that writes notifications to the log instead of a
/// transport.
#[derive(Debug, Clone, Default)]
pub struct ConsoleMailer;

impl ConsoleMailer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl Mailer for ConsoleMailer {
    async fn send(&self, notification: MailNotification) -> Result<(), MailerError> {
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            body = %notification.text,
            "email would be sent"
        );
        Ok(())
    }
}
