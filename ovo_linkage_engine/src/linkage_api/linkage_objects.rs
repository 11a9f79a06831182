use std::fmt::Display;

use log::*;
use ovo_common::{env_or_default, parse_boolean_flag, Locale};
use ovo_tools::Params;
use serde::{Deserialize, Serialize};

/// A customer's request to link their account to the OVO wallet registered to `phone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkageRequest {
    pub customer_id: i64,
    pub phone: String,
    /// Origin tag for the linkage. Defaults to the provider client's app id when not given.
    pub source: Option<String>,
}

impl LinkageRequest {
    pub fn new<S: Into<String>>(customer_id: i64, phone: S) -> Self {
        Self { customer_id, phone: phone.into(), source: None }
    }

    pub fn with_source<S: Into<String>>(mut self, source: S) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Display for LinkageRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer #{} ({})", self.customer_id, self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageConfig {
    /// Normalise and validate the phone number before anything else happens.
    pub validate_phone: bool,
    /// Locale used when rendering errors for end users.
    pub locale: Locale,
}

impl Default for LinkageConfig {
    fn default() -> Self {
        Self { validate_phone: true, locale: Locale::default() }
    }
}

impl LinkageConfig {
    pub fn from_env_or_default() -> Self {
        let validate_phone = parse_boolean_flag(std::env::var("OVO_VALIDATE_PHONE").ok(), true);
        if !validate_phone {
            warn!("🔗️ Phone number validation is DISABLED. Phone numbers will be stored exactly as supplied.");
        }
        let locale = env_or_default("OVO_LOCALE", Locale::default());
        Self { validate_phone, locale }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_phone_validation(mut self, validate_phone: bool) -> Self {
        self.validate_phone = validate_phone;
        self
    }
}

/// The state of an in-flight authentication challenge. It only lives for the duration of one workflow call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthenticationAttempt {
    pub customer_id: i64,
    pub phone: String,
    pub auth_id: String,
    pub auth_status: i64,
}

/// A request to award points for an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRequest {
    pub customer_id: i64,
    pub order_id: i64,
    pub so_number: String,
    /// Free-form classification of the request, e.g. `purchase` or `refund`. Stored with the history entry.
    pub kind: String,
    /// Form parameters passed through to the provider's points calculation.
    pub params: Params,
}

impl PointsRequest {
    pub fn new<S: Into<String>>(customer_id: i64, order_id: i64, so_number: S, kind: S) -> Self {
        Self { customer_id, order_id, so_number: so_number.into(), kind: kind.into(), params: Params::new() }
    }

    pub fn with_param<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}
