//! Locale-keyed, user-facing messages.
//!
//! Errors raised by the provider client and the linkage engine carry a stable keyword (e.g. `ovo_id_used`). A boundary
//! that renders errors to end users resolves the keyword against a [`MessageCatalog`] owned by that boundary. The
//! catalog is a plain value: there is no process-wide table to mutate.
use std::{collections::HashMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned for any keyword/locale pair that has no entry in the catalog.
pub const UNKNOWN_SERVICE_ERROR: &str = "unknown service error";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    En,
    Id,
}

impl Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Locale::En => write!(f, "en"),
            Locale::Id => write!(f, "id"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Unsupported locale: {0}")]
pub struct LocaleParseError(String);

impl FromStr for Locale {
    type Err = LocaleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            "id" | "id-id" => Ok(Self::Id),
            s => Err(LocaleParseError(s.to_string())),
        }
    }
}

#[rustfmt::skip]
const DEFAULT_MESSAGES: &[(&str, &str, &str)] = &[
    ("ovo_id_invalid",
        "Invalid OVO ID. Please use a valid phone number.",
        "OVO ID tidak valid. Gunakan nomor telepon yang valid."),
    ("ovo_already_verified",
        "This OVO ID has already been verified.",
        "OVO ID ini sudah terverifikasi."),
    ("ovo_change_verified",
        "A verified OVO ID cannot be changed.",
        "OVO ID yang sudah terverifikasi tidak dapat diubah."),
    ("ovo_id_used",
        "This OVO ID is already linked to another account.",
        "OVO ID ini sudah terhubung dengan akun lain."),
    ("ovo_unknown_info",
        "OVO linkage information is not available.",
        "Informasi OVO tidak tersedia."),
    ("ovo_not_authenticated",
        "This account has not been linked to OVO yet.",
        "Akun ini belum terhubung dengan OVO."),
    ("ovo_not_verified",
        "This OVO ID has not been verified yet.",
        "OVO ID ini belum terverifikasi."),
    ("ovo_retry_verification",
        "OVO verification is not complete. Please retry the verification in the OVO app.",
        "Verifikasi OVO belum selesai. Silakan ulangi verifikasi melalui aplikasi OVO."),
    ("ovo_unavailable_service",
        "The OVO service is currently unavailable. Please try again later.",
        "Layanan OVO sedang tidak tersedia. Silakan coba beberapa saat lagi."),
    ("ovo_unidentified_request",
        "Unidentified OVO request.",
        "Permintaan OVO tidak dikenali."),
    ("ovo_points_rejected",
        "OVO did not accept the points request.",
        "Permintaan poin OVO ditolak."),
    ("ovo_unknown_error",
        "Something went wrong while processing your OVO request. Please try again later.",
        "Terjadi kesalahan saat memproses permintaan OVO Anda. Silakan coba beberapa saat lagi."),
];

/// Maps `(keyword, locale)` to a human-readable message.
#[derive(Debug, Clone)]
pub struct MessageCatalog {
    entries: HashMap<(String, Locale), String>,
}

impl Default for MessageCatalog {
    /// The built-in English and Indonesian messages.
    fn default() -> Self {
        DEFAULT_MESSAGES.iter().fold(Self::empty(), |catalog, (keyword, en, id)| {
            catalog.with_message(keyword, Locale::En, en).with_message(keyword, Locale::Id, id)
        })
    }
}

impl MessageCatalog {
    pub fn empty() -> Self {
        Self { entries: HashMap::new() }
    }

    /// Adds or replaces the message for `keyword` in `locale`.
    pub fn with_message(mut self, keyword: &str, locale: Locale, message: &str) -> Self {
        self.entries.insert((keyword.to_string(), locale), message.to_string());
        self
    }

    pub fn lookup(&self, keyword: &str, locale: Locale) -> String {
        self.entries
            .get(&(keyword.to_string(), locale))
            .cloned()
            .unwrap_or_else(|| UNKNOWN_SERVICE_ERROR.to_string())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_catalog_has_both_locales() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.lookup("ovo_id_used", Locale::En), "This OVO ID is already linked to another account.");
        assert_eq!(catalog.lookup("ovo_id_used", Locale::Id), "OVO ID ini sudah terhubung dengan akun lain.");
        for locale in [Locale::En, Locale::Id] {
            assert_ne!(catalog.lookup("ovo_unknown_error", locale), UNKNOWN_SERVICE_ERROR);
        }
    }

    #[test]
    fn missing_entries_fall_back_to_generic_message() {
        let catalog = MessageCatalog::default();
        assert_eq!(catalog.lookup("no_such_keyword", Locale::En), UNKNOWN_SERVICE_ERROR);
        let catalog = MessageCatalog::empty().with_message("ovo_id_used", Locale::En, "taken");
        assert_eq!(catalog.lookup("ovo_id_used", Locale::En), "taken");
        assert_eq!(catalog.lookup("ovo_id_used", Locale::Id), UNKNOWN_SERVICE_ERROR);
    }

    #[test]
    fn parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("id-ID".parse::<Locale>().unwrap(), Locale::Id);
        assert!("fr".parse::<Locale>().is_err());
    }
}
