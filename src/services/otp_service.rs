//! OTP issuance and verification.
//!
//! Issuance generates a random 6-digit passcode, emails it to the recipient
//! and hands back a stateless signed token (see `otp_token`). Verification
//! is a pure function of the token, the resubmitted passcode and the clock;
//! an unexpired token verifies repeatedly (no single-use tracking).

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;

use crate::errors::{AppError, Result};
use crate::services::notifier::Notifier;
use crate::services::otp_token::{issue_token, verify_token};

#[derive(Clone)]
pub struct OtpService {
    notifier: Arc<dyn Notifier>,
    secret: String,
    ttl_ms: i64,
}

impl OtpService {
    pub fn new(notifier: Arc<dyn Notifier>, secret: String, ttl_ms: i64) -> Self {
        Self {
            notifier,
            secret,
            ttl_ms,
        }
    }

    // Generate 6-digit OTP
    pub fn generate_passcode() -> String {
        let mut rng = rand::thread_rng();
        format!("{:06}", rng.gen_range(0..1_000_000))
    }

    /// Conservative `local@domain.tld` shape check.
    pub fn is_valid_recipient(email: &str) -> bool {
        if email.is_empty() || email.chars().any(char::is_whitespace) {
            return false;
        }
        let mut parts = email.splitn(3, '@');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(local), Some(domain), None) => {
                !local.is_empty()
                    && domain.contains('.')
                    && !domain.starts_with('.')
                    && !domain.ends_with('.')
            }
            _ => false,
        }
    }

    /// Issue an OTP to `email`.
    ///
    /// Exactly one delivery attempt is made; if it fails the caller gets
    /// `DeliveryFailed` and no token, so a token never exists for a passcode
    /// the recipient never received.
    pub async fn send_otp(&self, email: &str) -> Result<String> {
        if !Self::is_valid_recipient(email) {
            return Err(AppError::InvalidRecipient);
        }

        let passcode = Self::generate_passcode();
        let html = format!("<p>Your OTP: <strong>{passcode}</strong></p>");

        self.notifier.send_email(email, "Your OTP", &html).await?;

        let token = issue_token(
            &passcode,
            Utc::now().timestamp_millis(),
            self.ttl_ms,
            &self.secret,
        );
        tracing::info!("OTP issued for {email}");
        Ok(token)
    }

    pub fn verify_otp(&self, token: &str, passcode: &str) -> Result<()> {
        verify_token(token, passcode, Utc::now().timestamp_millis(), &self.secret)?;
        Ok(())
    }
}
