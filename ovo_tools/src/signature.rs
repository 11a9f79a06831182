use chrono::Utc;
use hmac::{Hmac, Mac};
use ovo_common::Secret;
use sha2::Sha256;

use crate::OvoApiError;

type HmacSha256 = Hmac<Sha256>;

/// Hex-encoded HMAC-SHA256 of `data`, keyed by `secret`.
pub fn calculate_hmac(secret: &str, data: &[u8]) -> Result<String, OvoApiError> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| OvoApiError::Initialization(e.to_string()))?;
    mac.update(data);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// The nonce sent in the `random` header: the current UTC time as `YYYYMMDDHHMMSS`.
pub fn timestamp_nonce() -> String {
    Utc::now().format("%Y%m%d%H%M%S").to_string()
}

/// The identity headers of one client instance.
///
/// The signature is computed once, over `app_id + random`, and is reused for every request made by the client that
/// owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSignature {
    app_id: String,
    random: String,
    hmac: String,
}

impl RequestSignature {
    pub fn new(app_id: &str, random: &str, secret: &Secret<String>) -> Result<Self, OvoApiError> {
        let data = format!("{app_id}{random}");
        let hmac = calculate_hmac(secret.reveal(), data.as_bytes())?;
        Ok(Self { app_id: app_id.to_string(), random: random.to_string(), hmac })
    }

    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    pub fn random(&self) -> &str {
        &self.random
    }

    pub fn hmac(&self) -> &str {
        &self.hmac
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const KNOWN_HMAC: &str = "63ac4a9d301bf16c0272363b917c19af2120eed565c8451fa52aff1dc0123cb6";

    #[test]
    fn known_vector() {
        let sig = RequestSignature::new("01234", "POKOKNYA_INI_RANDOM", &Secret::from("56789")).unwrap();
        assert_eq!(sig.hmac(), KNOWN_HMAC);
        assert_eq!(sig.app_id(), "01234");
        assert_eq!(sig.random(), "POKOKNYA_INI_RANDOM");
    }

    #[test]
    fn signature_is_deterministic() {
        let secret = Secret::from("56789");
        let a = RequestSignature::new("01234", "POKOKNYA_INI_RANDOM", &secret).unwrap();
        let b = RequestSignature::new("01234", "POKOKNYA_INI_RANDOM", &secret).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn every_input_changes_the_digest() {
        let secret = Secret::from("56789");
        let changed_app = RequestSignature::new("01235", "POKOKNYA_INI_RANDOM", &secret).unwrap();
        let changed_nonce = RequestSignature::new("01234", "POKOKNYA_INI_RANDOn", &secret).unwrap();
        let changed_secret = RequestSignature::new("01234", "POKOKNYA_INI_RANDOM", &Secret::from("56788")).unwrap();
        for sig in [changed_app, changed_nonce, changed_secret] {
            assert_ne!(sig.hmac(), KNOWN_HMAC);
        }
    }

    #[test]
    fn nonce_is_a_timestamp() {
        let nonce = timestamp_nonce();
        assert_eq!(nonce.len(), 14);
        assert!(nonce.chars().all(|c| c.is_ascii_digit()));
    }
}
