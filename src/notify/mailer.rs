//! The `sendEmail(to, subject, html)` boundary and its HTTP implementation.

use crate::errors::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One outgoing email with a self-contained HTML body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html: String,
}

impl EmailMessage {
    pub fn new(to: impl Into<String>, subject: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            subject: subject.into(),
            html: html.into(),
        }
    }
}

/// Sends email. Implementations report delivery failure as an error and never retry.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_email(&self, message: &EmailMessage) -> Result<()>;
}

/// Relays email through an HTTP endpoint that wraps the SMTP provider.
///
/// The endpoint receives `{"to", "subject", "html"}` as JSON; any non-2xx
/// response is a failure.
pub struct HttpMailer {
    relay_url: String,
    client: reqwest::Client,
}

impl HttpMailer {
    #[must_use]
    pub fn new(relay_url: String) -> Self {
        Self {
            relay_url,
            client: reqwest::Client::new(),
        }
    }

    #[must_use]
    pub fn relay_url(&self) -> &str {
        &self.relay_url
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    #[instrument(skip(self, message), fields(to = %message.to, subject = %message.subject))]
    async fn send_email(&self, message: &EmailMessage) -> Result<()> {
        debug!("Relaying email via {}", self.relay_url);
        let response = self
            .client
            .post(&self.relay_url)
            .header("User-Agent", format!("staffing-desk/{}", env!("CARGO_PKG_VERSION")))
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Notification {
                message: format!("mail relay returned {status}: {body}"),
            });
        }
        Ok(())
    }
}
