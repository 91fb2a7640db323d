//! SMS delivery via the Twilio Messages API.

use reqwest::Client;
use serde_json::Value;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

#[derive(Clone)]
pub struct SmsService {
    account_sid: String,
    auth_token: String,
    from: String,
    client: Client,
}

impl SmsService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            account_sid: config.twilio_account_sid.clone(),
            auth_token: config.twilio_auth_token.clone(),
            from: config.twilio_from_number.clone(),
            client: Client::new(),
        }
    }

    /// Send one SMS. `to_e164` must already be normalized (`+1...`).
    pub async fn send(&self, to_e164: &str, body: &str) -> Result<String> {
        let url = format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.account_sid
        );

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&[
                ("To", to_e164),
                ("From", self.from.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(|e| AppError::delivery(format!("Twilio request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(AppError::delivery(format!(
                "Twilio returned {status}: {error_body}"
            )));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| AppError::delivery(format!("parse Twilio response: {e}")))?;

        let sid = payload["sid"].as_str().unwrap_or_default().to_string();
        tracing::info!("SMS sent to {to_e164} | SID: {sid}");
        Ok(sid)
    }
}
