use std::{env, time::Duration};

use log::*;
use ovo_common::{env_or_default, Secret};

const DEFAULT_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct OvoConfig {
    /// Provider base URL, without a trailing slash. Operation paths are appended to it.
    pub base_url: String,
    /// The API secret that keys the request HMAC.
    pub api_key: Secret<String>,
    pub app_id: String,
    pub merchant_id: String,
    /// Timeout for a complete provider call. A timeout is reported as an unavailable service.
    pub timeout: Duration,
}

impl Default for OvoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: Secret::default(),
            app_id: String::default(),
            merchant_id: String::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl OvoConfig {
    pub fn new(base_url: &str, api_key: &str, app_id: &str, merchant_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: Secret::from(api_key),
            app_id: app_id.to_string(),
            merchant_id: merchant_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn new_from_env_or_default() -> Self {
        let base_url = env::var("OVO_BASE_URL").unwrap_or_else(|_| {
            warn!("OVO_BASE_URL not set, using (probably useless) default {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let api_key = env::var("OVO_API_KEY").unwrap_or_else(|_| {
            warn!("OVO_API_KEY not set, using (probably useless) default");
            "00000000000000".to_string()
        });
        let app_id = env::var("OVO_APP_ID").unwrap_or_else(|_| {
            warn!("OVO_APP_ID not set, using ovo_linkage as default");
            "ovo_linkage".to_string()
        });
        let merchant_id = env::var("OVO_MERCHANT_ID").unwrap_or_else(|_| {
            warn!("OVO_MERCHANT_ID not set. Authentication requests will be rejected by the provider");
            String::default()
        });
        let timeout = Duration::from_secs(env_or_default("OVO_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS));
        Self::new(&base_url, &api_key, &app_id, &merchant_id).with_timeout(timeout)
    }
}
