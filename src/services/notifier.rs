//! Outbound notification seam.
//!
//! The OTP issuer and the reminder job only see this trait; the live
//! implementation delegates to the SMTP and Twilio transports.

use async_trait::async_trait;

use crate::errors::Result;
use crate::services::email_service::EmailService;
use crate::services::sms_service::SmsService;

#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver an HTML email. Returns a transport delivery id.
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<String>;

    /// Deliver an SMS to an E.164 number. Returns the provider message id.
    async fn send_sms(&self, to_e164: &str, body: &str) -> Result<String>;
}

pub struct LiveNotifier {
    email: EmailService,
    sms: SmsService,
}

impl LiveNotifier {
    pub fn new(email: EmailService, sms: SmsService) -> Self {
        Self { email, sms }
    }
}

#[async_trait]
impl Notifier for LiveNotifier {
    async fn send_email(&self, to: &str, subject: &str, html_body: &str) -> Result<String> {
        self.email.send(to, subject, html_body).await
    }

    async fn send_sms(&self, to_e164: &str, body: &str) -> Result<String> {
        self.sms.send(to_e164, body).await
    }
}
