//! US/Canada phone number normalization.

use crate::errors::{AppError, Result};

const US_COUNTRY_CODE: char = '1';

/// Normalize a phone-like string to US/Canada E.164.
///
/// Accepted shapes all map to the same output:
/// `7807776451`, `17807776451`, `+17807776451`, `(780) 777-6451`
/// all normalize to `+17807776451`.
pub fn normalize_us_phone(raw: &str) -> Result<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    // Missing country code, assume US
    if digits.len() == 10 {
        digits.insert(0, US_COUNTRY_CODE);
    }

    if digits.len() != 11 || !digits.starts_with(US_COUNTRY_CODE) {
        return Err(AppError::InvalidPhoneNumber(raw.to_string()));
    }

    Ok(format!("+{digits}"))
}
