use std::{future::Future, time::Duration};

use log::*;
use reqwest::{header::HeaderMap, Client};

use crate::{OvoApiError, SignedRequest};

#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends a signed request to the provider.
///
/// Implementations report connection failures and timeouts as [`OvoApiError::TransportError`], and failures to read
/// the response body as [`OvoApiError::DecodeError`]. Any HTTP status, including 5xx, is a successful send; status
/// interpretation belongs to [`crate::OvoApi`].
pub trait OvoTransport: Send + Sync {
    fn send(&self, request: SignedRequest) -> impl Future<Output = Result<TransportResponse, OvoApiError>> + Send;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self, OvoApiError> {
        let client =
            Client::builder().timeout(timeout).build().map_err(|e| OvoApiError::Initialization(e.to_string()))?;
        Ok(Self { client })
    }
}

impl OvoTransport for ReqwestTransport {
    async fn send(&self, request: SignedRequest) -> Result<TransportResponse, OvoApiError> {
        let SignedRequest { operation, method, url, headers, body } = request;
        let mut req = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            req = req.body(body);
        }
        let response = req.send().await.map_err(|e| {
            warn!("📡️ {operation}: cannot reach server. {e}");
            OvoApiError::TransportError(format!("cannot reach server. {e}"))
        })?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                OvoApiError::TransportError(format!("timed out reading response. {e}"))
            } else {
                OvoApiError::DecodeError(format!("cannot read response. {e}"))
            }
        })?;
        trace!("📡️ {operation}: HTTP {status}, {} bytes", body.len());
        Ok(TransportResponse { status, headers, body: body.to_vec() })
    }
}
