use std::sync::Arc;

use mongodb::Database;

use crate::config::AppConfig;
use crate::errors::Result;
use crate::services::email_service::EmailService;
use crate::services::notifier::{LiveNotifier, Notifier};
use crate::services::otp_service::OtpService;
use crate::services::sms_service::SmsService;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub notifier: Arc<dyn Notifier>,
    pub otp_service: OtpService,
}

impl AppState {
    pub fn new(db: Database, config: &AppConfig) -> Result<Self> {
        let email_service = EmailService::new(config)?;
        let sms_service = SmsService::new(config);
        let notifier: Arc<dyn Notifier> = Arc::new(LiveNotifier::new(email_service, sms_service));

        let otp_service = OtpService::new(
            notifier.clone(),
            config.otp_secret.clone(),
            config.otp_ttl_ms,
        );

        Ok(AppState {
            db,
            notifier,
            otp_service,
        })
    }
}
