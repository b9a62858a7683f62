use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{Mailer, OutboundEmail, SendReceipt};
use crate::error::{Error, Result};

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

/// Mailer backed by the Resend HTTP API.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| Error::Config(format!("failed to build mail client: {e}")))?;

        Ok(Self { client, api_key })
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<SendReceipt> {
        let response = self
            .client
            .post(RESEND_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": email.from,
                "to": [email.to],
                "reply_to": email.reply_to,
                "subject": email.subject,
                "html": email.html,
            }))
            .send()
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Mail(format!("resend returned {status}: {body}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| Error::Mail(e.to_string()))?;
        let id = body
            .get("id")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Ok(SendReceipt { id })
    }
}
