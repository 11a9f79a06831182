//! A scripted in-memory transport for exercising [`crate::OvoApi`] without a network.
use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};

use log::trace;
use reqwest::header::HeaderMap;
use serde_json::Value;

use crate::{OvoApiError, OvoTransport, SignedRequest, TransportResponse};

/// Replies are handed out in the order they were pushed. Every request is recorded, whether or not a reply was
/// scripted for it. A request with no scripted reply fails with a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    replies: Mutex<VecDeque<Result<TransportResponse, OvoApiError>>>,
    requests: Mutex<Vec<SignedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_reply(status, body.to_string().into_bytes());
    }

    pub fn push_status(&self, status: u16) {
        self.push_reply(status, Vec::new());
    }

    pub fn push_reply(&self, status: u16, body: Vec<u8>) {
        let reply = TransportResponse { status, headers: HeaderMap::new(), body };
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(Ok(reply));
    }

    pub fn push_error(&self, error: OvoApiError) {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<SignedRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn pending_replies(&self) -> usize {
        self.replies.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl OvoTransport for MockTransport {
    async fn send(&self, request: SignedRequest) -> Result<TransportResponse, OvoApiError> {
        trace!("🧪️ Mock transport received {} {}", request.method, request.url);
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.replies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(OvoApiError::TransportError("no scripted reply".to_string())))
    }
}
