use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// One outbound email.
#[derive(Debug, Clone, PartialEq)]
pub struct MailNotification {
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: Option<String>,
}

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail transport failed: {0}")]
    Transport(String),
}

/// Port trait for outbound email delivery.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, notification: MailNotification) -> Result<(), MailerError>;
}

#[async_trait]
impl<M: Mailer + ?Sized> Mailer for Arc<M> {
    async fn send(&self, notification: MailNotification) -> Result<(), MailerError> {
        (**self).send(notification).await
    }
}
