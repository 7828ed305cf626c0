use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::RwLock;
use turnstile_core::{MailNotification, Mailer, MailerError};

/// Test mailer that records every notification and can be switched into a
/// failing mode to exercise delivery-error paths.
#[derive(Clone, Default)]
pub struct MockMailer {
    sent: Arc<RwLock<Vec<MailNotification>>>,
    failing: Arc<AtomicBool>,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<MailNotification> {
        self.sent.read().await.clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl Mailer for MockMailer {
    async fn send(&self, notification: MailNotification) -> Result<(), MailerError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailerError::Transport(
                "simulated delivery failure".to_string(),
            ));
        }
        self.sent.write().await.push(notification);
        Ok(())
    }
}
