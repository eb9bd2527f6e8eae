//! services/api/src/adapters/mailer.rs
//!
//! Outbound email adapters. The real one talks to an HTTP email provider;
//! the disabled one is installed when no mail configuration is present so
//! the rest of the service never has to care.

use async_trait::async_trait;
use serde_json::json;
use tracing::{error, info, warn};

use crate::config::MailConfig;
use techpro_core::ports::Mailer;

//=========================================================================================
// HTTP provider adapter
//=========================================================================================

/// Sends mail through the provider's HTTP API. A failed send is logged and
/// reported as `false`; it never becomes a request error.
pub struct HttpMailer {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailer {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> bool {
        let payload = json!({
            "from": {
                "name": self.config.from_name,
                "address": self.config.from_address,
            },
            "to": to,
            "subject": subject,
            "html": html_body,
        });

        let result = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                info!("Verification email sent to: {}", to);
                true
            }
            Ok(resp) => {
                error!("Mail provider returned {} for {}", resp.status(), to);
                false
            }
            Err(e) => {
                error!("Failed to send email to {}: {}", to, e);
                false
            }
        }
    }
}

//=========================================================================================
// Disabled adapter
//=========================================================================================

/// Installed when the mail settings are absent.
pub struct DisabledMailer;

#[async_trait]
impl Mailer for DisabledMailer {
    async fn send(&self, to: &str, _subject: &str, _html_body: &str) -> bool {
        warn!("Email service not configured. Skipping email send to {}.", to);
        false
    }
}
