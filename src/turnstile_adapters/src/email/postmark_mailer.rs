use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use turnstile_core::{MailNotification, Mailer, MailerError};

const MESSAGE_STREAM: &str = "outbound";
const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Mailer backed by the Postmark HTTP API.
#[derive(Clone)]
pub struct PostmarkMailer {
    http_client: Client,
    base_url: String,
    sender: String,
    authorization_token: Secret<String>,
}

impl PostmarkMailer {
    pub fn new(
        base_url: String,
        sender: String,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }
}

#[async_trait::async_trait]
impl Mailer for PostmarkMailer {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send(&self, notification: MailNotification) -> Result<(), MailerError> {
        let base = Url::parse(&self.base_url).map_err(transport)?;
        let url = base.join("/email").map_err(transport)?;

        let request_body = SendEmailRequest {
            from: &self.sender,
            to: &notification.to,
            subject: &notification.subject,
            text_body: &notification.text,
            html_body: notification.html.as_deref(),
            message_stream: MESSAGE_STREAM,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        Ok(())
    }
}

fn transport(error: impl std::fmt::Display) -> MailerError {
    MailerError::Transport(error.to_string())
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html_body: Option<&'a str>,
    text_body: &'a str,
    message_stream: &'a str,
}
