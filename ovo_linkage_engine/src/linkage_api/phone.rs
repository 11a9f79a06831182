use once_cell::sync::Lazy;
use regex::Regex;

use crate::LinkageError;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(0|\+)[0-9]{5,16}$").expect("Invalid phone regex"));

/// Converts a phone number to the local format used as the linkage key.
///
/// The number must start with `0` or `+`, followed by 5 to 16 digits. A leading `+` is dropped and an Indonesian
/// country code (`62`) is replaced with `0`, so `+62818223456` becomes `0818223456`.
pub fn normalize_phone(phone: &str) -> Result<String, LinkageError> {
    let phone = phone.trim();
    if !PHONE_PATTERN.is_match(phone) {
        return Err(LinkageError::InvalidPhone(phone.to_string()));
    }
    let phone = phone.trim_start_matches('+');
    let local = match phone.strip_prefix("62") {
        Some(rest) => format!("0{rest}"),
        None => phone.to_string(),
    };
    Ok(local)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn local_numbers_are_unchanged() {
        assert_eq!(normalize_phone("0818223456").unwrap(), "0818223456");
        assert_eq!(normalize_phone(" 08080808 ").unwrap(), "08080808");
    }

    #[test]
    fn country_code_is_replaced() {
        assert_eq!(normalize_phone("+62818223456").unwrap(), "0818223456");
        let once = normalize_phone("+62818223456").unwrap();
        assert_eq!(normalize_phone(&once).unwrap(), once);
    }

    #[test]
    fn other_international_numbers_lose_the_plus() {
        assert_eq!(normalize_phone("+4479460000").unwrap(), "4479460000");
    }

    #[test]
    fn invalid_numbers() {
        for phone in ["818223456", "", "0", "01234", "+", "08-1822-3456", "0818a23456", "+12345678901234567"] {
            assert!(matches!(normalize_phone(phone), Err(LinkageError::InvalidPhone(_))), "{phone} should be invalid");
        }
        assert!(normalize_phone("012345").is_ok());
    }
}
