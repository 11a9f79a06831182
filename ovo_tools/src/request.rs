use std::collections::BTreeMap;

use log::trace;
use reqwest::{
    header::{HeaderMap, HeaderValue, CONTENT_TYPE},
    Method,
};
use url::form_urlencoded;

use crate::{find_operation, timestamp_nonce, OvoApiError, OvoConfig, RequestSignature};

pub const APP_ID_HEADER: &str = "app-id";
pub const RANDOM_HEADER: &str = "random";
pub const HMAC_HEADER: &str = "hmac";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Form parameters for mutating operations. Keys are encoded in sorted order.
pub type Params = BTreeMap<String, String>;

/// A fully-qualified, signed request, ready to be handed to a transport.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub operation: &'static str,
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SignedRequestBuilder {
    base_url: String,
    signature: RequestSignature,
    identity_headers: HeaderMap,
}

impl SignedRequestBuilder {
    /// Creates a builder with a fresh timestamp nonce.
    pub fn new(config: &OvoConfig) -> Result<Self, OvoApiError> {
        Self::with_nonce(config, &timestamp_nonce())
    }

    pub fn with_nonce(config: &OvoConfig, nonce: &str) -> Result<Self, OvoApiError> {
        let signature = RequestSignature::new(&config.app_id, nonce, &config.api_key)?;
        let mut identity_headers = HeaderMap::with_capacity(3);
        for (name, value) in
            [(APP_ID_HEADER, signature.app_id()), (RANDOM_HEADER, signature.random()), (HMAC_HEADER, signature.hmac())]
        {
            let value = HeaderValue::from_str(value)
                .map_err(|e| OvoApiError::Initialization(format!("Invalid {name} header. {e}")))?;
            identity_headers.insert(name, value);
        }
        Ok(Self { base_url: config.base_url.clone(), signature, identity_headers })
    }

    pub fn signature(&self) -> &RequestSignature {
        &self.signature
    }

    pub fn url(&self, operation: &str, params: &[&str]) -> Result<String, OvoApiError> {
        let path = find_operation(operation)?.resolve_path(params)?;
        Ok(format!("{}{path}", self.base_url))
    }

    /// Builds the signed request for `operation`.
    ///
    /// Mutating verbs always carry a form-encoded body (possibly empty) and the matching content type. `form` is
    /// ignored for `GET` operations.
    pub fn build(
        &self,
        operation: &str,
        params: &[&str],
        form: Option<&Params>,
    ) -> Result<SignedRequest, OvoApiError> {
        let op = find_operation(operation)?;
        let url = format!("{}{}", self.base_url, op.resolve_path(params)?);
        let mut headers = self.identity_headers.clone();
        let body = if op.verb.is_mutating() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE));
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            if let Some(form) = form {
                serializer.extend_pairs(form.iter());
            }
            Some(serializer.finish())
        } else {
            None
        };
        trace!("📡️ Built {} request for {}: {url}", op.verb.method(), op.name);
        Ok(SignedRequest { operation: op.name, method: op.verb.method(), url, headers, body })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn builder() -> SignedRequestBuilder {
        let config = OvoConfig::new("http://testing.com", "56789", "01234", "merchant");
        SignedRequestBuilder::with_nonce(&config, "POKOKNYA_INI_RANDOM").unwrap()
    }

    #[test]
    fn identity_headers_on_every_request() {
        let req = builder().build("customer_profile", &["8000"], None).unwrap();
        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url, "http://testing.com/customers/8000");
        assert_eq!(req.headers.get(APP_ID_HEADER).unwrap(), "01234");
        assert_eq!(req.headers.get(RANDOM_HEADER).unwrap(), "POKOKNYA_INI_RANDOM");
        assert_eq!(
            req.headers.get(HMAC_HEADER).unwrap(),
            "63ac4a9d301bf16c0272363b917c19af2120eed565c8451fa52aff1dc0123cb6"
        );
        assert!(req.headers.get(CONTENT_TYPE).is_none());
        assert!(req.body.is_none());
    }

    #[test]
    fn mutating_verbs_are_form_encoded() {
        let b = builder();
        let mut form = Params::new();
        form.insert("phone".into(), "0818 223456".into());
        form.insert("merchant_id".into(), "m&1".into());
        let req = b.build("customer_authentication", &[], Some(&form)).unwrap();
        assert_eq!(req.method, Method::POST);
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        assert_eq!(req.body.as_deref(), Some("merchant_id=m%261&phone=0818+223456"));

        let req = b.build("calculate_points", &["8000"], None).unwrap();
        assert_eq!(req.method, Method::PUT);
        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        assert_eq!(req.body.as_deref(), Some(""));
    }

    #[test]
    fn builder_failures_propagate() {
        let b = builder();
        assert!(matches!(b.build("nope", &[], None), Err(OvoApiError::UnknownOperation(_))));
        assert!(matches!(
            b.build("customer_profile", &[], None),
            Err(OvoApiError::ParameterCountMismatch { expected: 1, supplied: 0, .. })
        ));
        assert!(matches!(b.url("customer_authentication_status", &["1", "2"]), Err(_)));
    }

    #[test]
    fn nonce_is_fixed_for_the_builder_lifetime() {
        let config = OvoConfig::new("http://testing.com", "secret", "app", "merchant");
        let b = SignedRequestBuilder::new(&config).unwrap();
        let first = b.build("customer_profile", &["1"], None).unwrap();
        let second = b.build("customer_authentication", &[], None).unwrap();
        assert_eq!(first.headers.get(RANDOM_HEADER), second.headers.get(RANDOM_HEADER));
        assert_eq!(first.headers.get(HMAC_HEADER), second.headers.get(HMAC_HEADER));
    }
}
