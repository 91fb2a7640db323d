// config.rs
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_name: String,
    pub port: u16,
    pub host: String,

    // Stateless OTP token signing
    pub otp_secret: String,
    pub otp_ttl_ms: i64,

    // Outbound email (SMTP)
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub smtp_from: String,

    // Outbound SMS (Twilio)
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub twilio_from_number: String,

    // Reminder job
    pub reminder_interval_secs: u64,
    pub reminder_portal_url: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            database_url: env::var("DATABASE_URL")
                .expect("DATABASE_URL must be set"),
            database_name: env::var("DATABASE_NAME")
                .unwrap_or_else(|_| "dispatchdb".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .expect("PORT must be a number"),
            host: env::var("HOST")
                .unwrap_or_else(|_| "0.0.0.0".to_string()),

            otp_secret: env::var("OTP_SECRET")
                .expect("OTP_SECRET must be set"),
            otp_ttl_ms: env::var("OTP_TTL_MS")
                .unwrap_or_else(|_| "600000".to_string())
                .parse()
                .expect("OTP_TTL_MS must be a number"),

            smtp_host: env::var("SMTP_HOST")
                .expect("SMTP_HOST must be set"),
            smtp_port: env::var("SMTP_PORT")
                .unwrap_or_else(|_| "465".to_string())
                .parse()
                .expect("SMTP_PORT must be a number"),
            smtp_username: env::var("SMTP_USERNAME")
                .expect("SMTP_USERNAME must be set"),
            smtp_password: env::var("SMTP_PASSWORD")
                .expect("SMTP_PASSWORD must be set"),
            smtp_from: env::var("SMTP_FROM")
                .expect("SMTP_FROM must be set"),

            twilio_account_sid: env::var("TWILIO_ACCOUNT_SID")
                .expect("TWILIO_ACCOUNT_SID must be set"),
            twilio_auth_token: env::var("TWILIO_AUTH_TOKEN")
                .expect("TWILIO_AUTH_TOKEN must be set"),
            twilio_from_number: env::var("TWILIO_FROM_NUMBER")
                .expect("TWILIO_FROM_NUMBER must be set"),

            reminder_interval_secs: env::var("REMINDER_INTERVAL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .expect("REMINDER_INTERVAL_SECS must be a number"),
            reminder_portal_url: env::var("REMINDER_PORTAL_URL")
                .unwrap_or_else(|_| "https://dispatch.example.com/".to_string()),
        }
    }
}
