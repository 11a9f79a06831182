use std::{fmt::Debug, sync::Arc};

use log::*;

use crate::{
    OvoApiError,
    OvoConfig,
    OvoTransport,
    Params,
    ReqwestTransport,
    RequestSignature,
    SignedRequestBuilder,
};

/// The OVO provider operations.
///
/// Every operation returns the raw response body. Pass it to [`crate::decode_response`] to obtain the envelope.
///
/// The request signature is fixed when the client is constructed and shared by all clones, so one instance may be
/// used concurrently. Replacing a client issues a new nonce; requests still in flight from the old instance keep the
/// old signature.
pub struct OvoApi<T = ReqwestTransport> {
    config: OvoConfig,
    builder: SignedRequestBuilder,
    transport: Arc<T>,
}

impl<T> Clone for OvoApi<T> {
    fn clone(&self) -> Self {
        Self { config: self.config.clone(), builder: self.builder.clone(), transport: Arc::clone(&self.transport) }
    }
}

impl<T> Debug for OvoApi<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OvoApi ({}, app-id: {})", self.config.base_url, self.config.app_id)
    }
}

impl OvoApi<ReqwestTransport> {
    pub fn new(config: OvoConfig) -> Result<Self, OvoApiError> {
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::new_with_transport(config, Arc::new(transport))
    }
}

impl<T> OvoApi<T> {
    pub fn config(&self) -> &OvoConfig {
        &self.config
    }

    pub fn signature(&self) -> &RequestSignature {
        self.builder.signature()
    }
}

impl<T: OvoTransport> OvoApi<T> {
    pub fn new_with_transport(config: OvoConfig, transport: Arc<T>) -> Result<Self, OvoApiError> {
        let builder = SignedRequestBuilder::new(&config)?;
        Ok(Self { config, builder, transport })
    }

    /// Like [`Self::new_with_transport`], but with an explicit nonce instead of the current timestamp.
    pub fn new_with_nonce(config: OvoConfig, nonce: &str, transport: Arc<T>) -> Result<Self, OvoApiError> {
        let builder = SignedRequestBuilder::with_nonce(&config, nonce)?;
        Ok(Self { config, builder, transport })
    }

    /// Builds, signs and sends the request for `operation`, returning the response body.
    ///
    /// A status of 500 or above is reported as [`OvoApiError::TransportError`].
    pub async fn execute(
        &self,
        operation: &str,
        path_params: &[&str],
        form: Option<&Params>,
    ) -> Result<Vec<u8>, OvoApiError> {
        let request = self.builder.build(operation, path_params, form)?;
        debug!("📡️ Calling {operation}: {} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        if response.status >= 500 {
            warn!("📡️ {operation} failed with HTTP {}", response.status);
            return Err(OvoApiError::TransportError(format!("{operation} returned HTTP {}", response.status)));
        }
        trace!("📡️ {operation} returned HTTP {}", response.status);
        Ok(response.body)
    }

    pub async fn get_customer_profile(&self, customer_id: &str) -> Result<Vec<u8>, OvoApiError> {
        self.execute("customer_profile", &[customer_id], None).await
    }

    pub async fn get_customer_profile_qr(
        &self,
        merchant_id: &str,
        store_id: &str,
        terminal_id: &str,
    ) -> Result<Vec<u8>, OvoApiError> {
        self.execute("customer_profile_qr", &[merchant_id, store_id, terminal_id], None).await
    }

    pub async fn calculate_points(&self, customer_id: &str, params: &Params) -> Result<Vec<u8>, OvoApiError> {
        self.execute("calculate_points", &[customer_id], Some(params)).await
    }

    /// Creates a push-to-pay / scan-to-pay transaction.
    pub async fn create_transaction(&self, customer_id: &str, params: &Params) -> Result<Vec<u8>, OvoApiError> {
        self.execute("pushtopay_transaction", &[customer_id], Some(params)).await
    }

    pub async fn check_transaction_status(
        &self,
        customer_id: &str,
        transaction_id: &str,
    ) -> Result<Vec<u8>, OvoApiError> {
        self.execute("pushtopay_transaction_status", &[customer_id, transaction_id], None).await
    }

    pub async fn void_transaction(
        &self,
        customer_id: &str,
        transaction_id: &str,
        params: &Params,
    ) -> Result<Vec<u8>, OvoApiError> {
        self.execute("pushtopay_void_transaction", &[customer_id, transaction_id], Some(params)).await
    }

    pub async fn create_customer_linkage(&self, customer_id: &str, params: &Params) -> Result<Vec<u8>, OvoApiError> {
        self.execute("customer_linkage", &[customer_id], Some(params)).await
    }

    /// Starts a customer authentication. The provider pushes a notification to the customer's device, which opens
    /// the "Input Security Code" screen.
    pub async fn customer_authentication(&self, params: &Params) -> Result<Vec<u8>, OvoApiError> {
        self.execute("customer_authentication", &[], Some(params)).await
    }

    pub async fn check_customer_authentication_status(
        &self,
        authentication_id: &str,
    ) -> Result<Vec<u8>, OvoApiError> {
        self.execute("customer_authentication_status", &[authentication_id], None).await
    }
}
