pub mod email_service;
pub mod notifier;
pub mod otp_service;
pub mod otp_token;
pub mod phone;
pub mod reminder_service;
pub mod sms_service;
