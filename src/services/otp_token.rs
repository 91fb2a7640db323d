//! Stateless OTP token codec.
//!
//! A token embeds an expiry and an HMAC-SHA256 signature so it can be
//! verified later without storing any server-side state.
//! Format: `<expiryMs>.<hex-hmac>` where the signature is computed over
//! `{passcode}|{expiry}` with a shared secret.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Missing token or otp")]
    MissingInput,

    #[error("Invalid token format")]
    Malformed,

    #[error("Token expired")]
    Expired,

    #[error("Invalid signature")]
    InvalidSignature,
}

fn sign(passcode: &str, expiry_ms: i64, secret: &str) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC can take a key of any size");
    mac.update(format!("{passcode}|{expiry_ms}").as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Issue a self-contained token for `passcode` expiring `ttl_ms` from `now_ms`.
pub fn issue_token(passcode: &str, now_ms: i64, ttl_ms: i64, secret: &str) -> String {
    let expiry = now_ms + ttl_ms;
    let sig = hex::encode(sign(passcode, expiry, secret));
    format!("{expiry}.{sig}")
}

/// Verify a `(token, passcode)` pair against the shared secret.
///
/// The signature comparison runs in constant time over the raw HMAC bytes;
/// lengths must match before the comparison is attempted.
pub fn verify_token(
    token: &str,
    passcode: &str,
    now_ms: i64,
    secret: &str,
) -> Result<(), TokenError> {
    if token.is_empty() || passcode.is_empty() {
        return Err(TokenError::MissingInput);
    }

    let mut parts = token.splitn(3, '.');
    let (Some(expiry_part), Some(sig_part), None) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(TokenError::Malformed);
    };

    let expiry: i64 = expiry_part.parse().map_err(|_| TokenError::Malformed)?;
    if now_ms > expiry {
        return Err(TokenError::Expired);
    }

    let expected = sign(passcode, expiry, secret);
    let provided = hex::decode(sig_part).map_err(|_| TokenError::InvalidSignature)?;
    if provided.len() != expected.len() {
        return Err(TokenError::InvalidSignature);
    }

    if bool::from(expected.as_slice().ct_eq(&provided)) {
        Ok(())
    } else {
        Err(TokenError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-otp-secret";
    const NOW: i64 = 1_700_000_000_000;
    const TTL: i64 = 600_000;

    #[test]
    fn issue_then_verify_roundtrip() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        assert!(verify_token(&token, "123456", NOW, SECRET).is_ok());
        // Any time up to the embedded expiry still verifies.
        assert!(verify_token(&token, "123456", NOW + TTL, SECRET).is_ok());
    }

    #[test]
    fn token_format_is_expiry_dot_hex() {
        let token = issue_token("000042", NOW, TTL, SECRET);
        let (expiry, sig) = token.split_once('.').expect("two parts");
        assert_eq!(expiry.parse::<i64>().unwrap(), NOW + TTL);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn wrong_passcode_is_rejected() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        assert_eq!(
            verify_token(&token, "654321", NOW, SECRET),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        assert_eq!(
            verify_token(&token, "123456", NOW, "other-secret"),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn mutating_any_signature_character_fails() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        let (expiry, sig) = token.split_once('.').unwrap();
        for i in 0..sig.len() {
            let mut chars: Vec<char> = sig.chars().collect();
            chars[i] = if chars[i] == '0' { '1' } else { '0' };
            let tampered: String = chars.into_iter().collect();
            assert_eq!(
                verify_token(&format!("{expiry}.{tampered}"), "123456", NOW, SECRET),
                Err(TokenError::InvalidSignature),
                "tampered byte {i} should invalidate the token"
            );
        }
    }

    #[test]
    fn mutated_expiry_fails_signature_check() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        let (expiry, sig) = token.split_once('.').unwrap();
        let bumped: i64 = expiry.parse::<i64>().unwrap() + 1;
        assert_eq!(
            verify_token(&format!("{bumped}.{sig}"), "123456", NOW, SECRET),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn expired_token_is_rejected_even_with_valid_signature() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        assert_eq!(
            verify_token(&token, "123456", NOW + TTL + 1, SECRET),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn missing_input() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        assert_eq!(verify_token("", "123456", NOW, SECRET), Err(TokenError::MissingInput));
        assert_eq!(verify_token(&token, "", NOW, SECRET), Err(TokenError::MissingInput));
    }

    #[test]
    fn malformed_tokens() {
        assert_eq!(
            verify_token("no-dot-here", "123456", NOW, SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify_token("1.2.3", "123456", NOW, SECRET),
            Err(TokenError::Malformed)
        );
        assert_eq!(
            verify_token("notanumber.abcdef", "123456", NOW, SECRET),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn truncated_signature_fails_before_comparison() {
        let token = issue_token("123456", NOW, TTL, SECRET);
        let (expiry, sig) = token.split_once('.').unwrap();
        let short = &sig[..sig.len() - 2];
        assert_eq!(
            verify_token(&format!("{expiry}.{short}"), "123456", NOW, SECRET),
            Err(TokenError::InvalidSignature)
        );
        // Odd-length hex cannot decode at all.
        let odd = &sig[..sig.len() - 1];
        assert_eq!(
            verify_token(&format!("{expiry}.{odd}"), "123456", NOW, SECRET),
            Err(TokenError::InvalidSignature)
        );
    }
}
