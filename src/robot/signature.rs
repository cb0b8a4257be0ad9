//! Request signing for the robot webhook.
//!
//! The robot accepts a request when its URL carries the millisecond
//! `timestamp` used for signing and `sign = pct(base64(HMAC-SHA256(secret,
//! "<timestamp>\n<secret>")))`. Timestamps older than roughly an hour are
//! rejected remotely.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use sha2::Sha256;
use tracing::error;
use url::Url;

use crate::core::config::RobotConfig;
use crate::errors::RobotError;

/// Characters left untouched in query values; everything else is `%XX` escaped.
///
/// Same rules as the remote's reference `quote_plus` encoder, so base64's
/// `+`, `/` and `=` become `%2B`, `%2F` and `%3D`.
pub const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Compute the URL-ready signature for `timestamp` (milliseconds since epoch).
#[must_use]
pub fn sign(secret: &str, timestamp: i64) -> String {
    let string_to_sign = format!("{timestamp}\n{secret}");
    let mut mac = match Hmac::<Sha256>::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(e) => {
            error!("Failed to create HMAC: {}", e);
            return String::new();
        }
    };
    mac.update(string_to_sign.as_bytes());
    let encoded = STANDARD.encode(mac.finalize().into_bytes());
    utf8_percent_encode(&encoded, QUERY_VALUE).to_string()
}

/// Wall-clock time in milliseconds, the unit the robot expects in `timestamp`.
#[must_use]
pub fn current_timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Build the full webhook URL for one request signed at `timestamp`.
///
/// # Errors
///
/// Returns [`RobotError::Config`] if the configured base URL does not parse.
pub fn signed_url(config: &RobotConfig, timestamp: i64) -> Result<Url, RobotError> {
    let mut url = Url::parse(&config.base_url)
        .map_err(|e| RobotError::Config(format!("base_url '{}': {e}", config.base_url)))?;

    let signed = format!(
        "access_token={}&timestamp={timestamp}&sign={}",
        utf8_percent_encode(&config.access_token, QUERY_VALUE),
        sign(&config.secret, timestamp),
    );
    // set_query keeps existing %XX escapes, so the signature is not encoded twice.
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{signed}"),
        _ => signed,
    };
    url.set_query(Some(&query));

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_hmac(secret: &str, message: &str) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    #[test]
    fn test_sign_is_deterministic() {
        assert_eq!(sign("S", 1_700_000_000_000), sign("S", 1_700_000_000_000));
        assert_ne!(sign("S", 1_700_000_000_000), sign("S", 1_700_000_000_001));
    }

    #[test]
    fn test_sign_decodes_to_raw_hmac() {
        let signature = sign("S", 1_700_000_000_000);
        let decoded = percent_encoding::percent_decode_str(&signature)
            .decode_utf8()
            .unwrap();
        let digest = STANDARD.decode(decoded.as_bytes()).unwrap();

        assert_eq!(digest, raw_hmac("S", "1700000000000\nS"));
    }

    #[test]
    fn test_sign_known_vectors() {
        assert_eq!(
            sign("S", 1_700_000_000_000),
            "1MQOO0c3gn9bi6PFoJOVxNJxZSKlorSUJa0EKM6BEbs%3D"
        );
        assert_eq!(
            sign("k", 1_700_000_000_001),
            "%2Fqi3Lg27O6cwohMnnKhKRDlSOGDGhriPxprTSPxuuXs%3D"
        );
    }

    #[test]
    fn test_sign_escapes_base64_specials() {
        for ts in 1_700_000_000_000..1_700_000_000_050 {
            let signature = sign("SEC0123456789abcdef", ts);
            assert!(!signature.contains('+'));
            assert!(!signature.contains('/'));
            assert!(!signature.contains('='));
        }
    }

    #[test]
    fn test_signed_url_carries_all_parameters() {
        let config = RobotConfig::new("T", "S");
        let url = signed_url(&config, 1_700_000_000_000).unwrap();

        assert_eq!(url.host_str(), Some("oapi.dingtalk.com"));
        assert_eq!(url.path(), "/robot/send");

        let query = url.query().unwrap();
        assert!(query.starts_with("access_token=T&timestamp=1700000000000&sign="));
        assert!(query.ends_with(&sign("S", 1_700_000_000_000)));
    }

    #[test]
    fn test_signed_url_rejects_invalid_base() {
        let config = RobotConfig::new("T", "S").with_base_url("not a url");
        assert!(matches!(
            signed_url(&config, 0),
            Err(RobotError::Config(_))
        ));
    }
}
