//! SMTP delivery for OTP emails.

use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use crate::config::AppConfig;
use crate::errors::{AppError, Result};

#[derive(Clone)]
pub struct EmailService {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl EmailService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
            .map_err(|e| AppError::configuration(format!("create SMTP transport: {e}")))?
            .port(config.smtp_port)
            .credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ))
            .build();

        let from = config
            .smtp_from
            .parse::<Mailbox>()
            .map_err(|e| AppError::configuration(format!("parse SMTP_FROM: {e}")))?;

        Ok(Self { transport, from })
    }

    pub async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<String> {
        let to_mailbox = to
            .parse::<Mailbox>()
            .map_err(|_| AppError::InvalidRecipient)?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| AppError::delivery(format!("build email message: {e}")))?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| AppError::delivery(format!("send SMTP email: {e}")))?;

        tracing::info!("Email sent to {to}: {}", response.code());
        Ok(response.code().to_string())
    }
}
