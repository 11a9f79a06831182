//! # OVO provider client
//!
//! A thin, signed HTTP client for the OVO wallet provider.
//!
//! * [`SignedRequestBuilder`] resolves a named provider operation to its URL, substitutes the path parameters and
//!   attaches the `app-id`, `random` and `hmac` identity headers.
//! * [`OvoApi`] exposes one method per provider capability. Each method returns the raw response body; use
//!   [`decode_response`] to turn it into the canonical [`OvoResponse`] envelope.
//! * [`OvoTransport`] is the seam to the network. [`ReqwestTransport`] is the production implementation.
mod api;
mod config;
mod data_objects;
mod error;
mod operations;
mod request;
mod signature;
mod transport;

#[cfg(any(feature = "test_utils", test))]
pub mod test_utils;

pub use api::OvoApi;
pub use config::OvoConfig;
pub use data_objects::{codes, decode_response, OvoResponse, ResponseData};
pub use error::OvoApiError;
pub use operations::{find_operation, Operation, Verb, OPERATIONS};
pub use request::{Params, SignedRequest, SignedRequestBuilder, APP_ID_HEADER, FORM_CONTENT_TYPE, HMAC_HEADER, RANDOM_HEADER};
pub use signature::{calculate_hmac, timestamp_nonce, RequestSignature};
pub use transport::{OvoTransport, ReqwestTransport, TransportResponse};
