//! The linkage workflow.
//!
//! A linkage attempt passes through these gates, stopping at the first one that fails:
//!
//! 1. The phone number is normalised to local format (unless [`LinkageConfig::validate_phone`] is off).
//! 2. The customer's existing linkage, if any, is loaded.
//! 3. A verified linkage is final. Re-linking the same phone is [`LinkageError::AlreadyVerified`], a different phone is
//!    [`LinkageError::CannotChangeVerifiedIdentity`].
//! 4. A phone already used by another customer is [`LinkageError::PhoneAlreadyLinked`].
//! 5. OVO is asked to send the customer an authentication challenge.
//! 6. The pending linkage is written to the store.
//!
//! The pre-check in step 4 is racy. The store's uniqueness constraint on the phone number settles concurrent attempts,
//! and the loser sees [`LinkageError::PhoneAlreadyLinked`] from step 6.
use std::fmt::Debug;

use log::*;
use ovo_common::MessageCatalog;
use ovo_tools::{codes, decode_response, OvoApi, OvoApiError, OvoTransport, Params, ReqwestTransport};

use crate::{
    db_types::{LinkageRecord, LinkageUpdate, NewLinkage},
    linkage_api::{
        errors::LinkageError,
        linkage_objects::{AuthenticationAttempt, LinkageConfig, LinkageRequest},
        phone::normalize_phone,
    },
    LinkageStore,
    LinkageStoreError,
};

pub struct LinkageApi<B, T = ReqwestTransport> {
    db: B,
    ovo: OvoApi<T>,
    config: LinkageConfig,
    messages: MessageCatalog,
}

impl<B: Clone, T> Clone for LinkageApi<B, T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            ovo: self.ovo.clone(),
            config: self.config.clone(),
            messages: self.messages.clone(),
        }
    }
}

impl<B: Debug, T> Debug for LinkageApi<B, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LinkageApi ({:?}, {})", self.db, self.ovo.config().base_url)
    }
}

impl<B, T> LinkageApi<B, T> {
    pub fn new(db: B, ovo: OvoApi<T>, config: LinkageConfig) -> Self {
        Self { db, ovo, config, messages: MessageCatalog::default() }
    }

    /// Replaces the built-in message catalog.
    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    pub fn db(&self) -> &B {
        &self.db
    }

    pub fn ovo(&self) -> &OvoApi<T> {
        &self.ovo
    }

    pub fn config(&self) -> &LinkageConfig {
        &self.config
    }

    /// The end-user message for `err` in the configured locale.
    pub fn message_for(&self, err: &LinkageError) -> String {
        err.localized_message(&self.messages, self.config.locale)
    }

    fn normalize(&self, phone: &str) -> Result<String, LinkageError> {
        if self.config.validate_phone {
            normalize_phone(phone)
        } else {
            Ok(phone.trim().to_string())
        }
    }
}

impl<B, T> LinkageApi<B, T>
where
    B: LinkageStore,
    T: OvoTransport,
{
    /// Validates a linkage request, sends the customer an OVO authentication challenge and stores the pending
    /// linkage.
    ///
    /// On success the stored linkage is unverified and carries the id of the new challenge. Call [`Self::reconcile`]
    /// once the customer has responded to the challenge.
    pub async fn validate_and_authenticate(&self, request: LinkageRequest) -> Result<LinkageRecord, LinkageError> {
        let customer_id = request.customer_id;
        let phone = self.normalize(&request.phone)?;
        trace!("🔗️ Linkage requested for customer #{customer_id} with phone {phone}");

        let existing = self.db.fetch_linkage_by_customer_id(customer_id).await?;
        if let Some(record) = existing.as_ref().filter(|r| r.verified) {
            if record.phone == phone {
                debug!("🔗️ Customer #{customer_id} is already linked to {phone}");
                return Err(LinkageError::AlreadyVerified);
            }
            info!("🔗️ Customer #{customer_id} tried to replace verified phone {} with {phone}", record.phone);
            return Err(LinkageError::CannotChangeVerifiedIdentity(customer_id));
        }

        if let Some(other) = self.db.fetch_linkage_by_phone(&phone).await? {
            if other.customer_id != customer_id {
                info!("🔗️ Phone {phone} is already linked to customer #{}", other.customer_id);
                return Err(LinkageError::PhoneAlreadyLinked);
            }
            if other.verified {
                return Err(LinkageError::AlreadyVerified);
            }
        }

        let attempt = self.start_authentication(customer_id, &phone).await?;

        match existing {
            Some(record) => {
                let mut update = LinkageUpdate::default().with_auth_id(attempt.auth_id).with_verified(false);
                if record.phone != attempt.phone {
                    update = update.with_phone(attempt.phone);
                }
                if let Err(e) = self.db.update_linkage(customer_id, update).await {
                    return Err(self.classify_relink_failure(customer_id, &phone, e).await);
                }
                let record = self
                    .db
                    .fetch_linkage_by_customer_id(customer_id)
                    .await?
                    .ok_or(LinkageError::UnknownLinkage(customer_id))?;
                info!("🔗️ Pending linkage for customer #{customer_id} updated. Waiting for authentication.");
                Ok(record)
            },
            None => {
                let source = request.source.unwrap_or_else(|| self.ovo.config().app_id.clone());
                let linkage = NewLinkage { customer_id, phone: attempt.phone, auth_id: attempt.auth_id, source };
                let record = self.db.insert_linkage(linkage).await?;
                info!("🔗️ Pending linkage for customer #{customer_id} created. Waiting for authentication.");
                Ok(record)
            },
        }
    }

    /// A relink can lose a race against a reconciliation that verified the linkage in the meantime. In that case the
    /// failure is reported the same way the verification gate would have reported it.
    async fn classify_relink_failure(&self, customer_id: i64, phone: &str, err: LinkageStoreError) -> LinkageError {
        match self.db.fetch_linkage_by_customer_id(customer_id).await {
            Ok(Some(record)) if record.verified && record.phone == phone => {
                debug!("🔗️ Linkage for customer #{customer_id} was verified while relinking");
                LinkageError::AlreadyVerified
            },
            Ok(Some(record)) if record.verified => {
                info!("🔗️ Linkage for customer #{customer_id} was verified to {} while relinking", record.phone);
                LinkageError::CannotChangeVerifiedIdentity(customer_id)
            },
            _ => err.into(),
        }
    }

    /// Asks OVO to send an authentication challenge to the wallet registered to `phone`.
    ///
    /// OVO must answer `201 Created` with the "sending authentication" code. Any other answer is reported as
    /// [`LinkageError::RemoteAuthRejected`] with OVO's code and message.
    pub async fn start_authentication(
        &self,
        customer_id: i64,
        phone: &str,
    ) -> Result<AuthenticationAttempt, LinkageError> {
        let mut params = Params::new();
        params.insert("merchant_id".into(), self.ovo.config().merchant_id.clone());
        params.insert("phone".into(), phone.to_string());
        let body = self.ovo.customer_authentication(&params).await?;
        let response = decode_response(&body)?;
        if response.status != codes::STATUS_CREATED || response.code != codes::SENDING_AUTHENTICATION {
            warn!(
                "🔗️ OVO rejected the authentication for customer #{customer_id}. HTTP {}, code {}: {}",
                response.status, response.code, response.message
            );
            return Err(LinkageError::RemoteAuthRejected { code: response.code, message: response.message });
        }
        let auth_id = response.data.authentication_id;
        if auth_id.is_empty() {
            error!("🔗️ OVO accepted the authentication for customer #{customer_id} but did not supply an id");
            return Err(OvoApiError::DecodeError("Authentication response is missing authentication_id".into()).into());
        }
        debug!("🔗️ Authentication {auth_id} sent to customer #{customer_id}");
        Ok(AuthenticationAttempt {
            customer_id,
            phone: phone.to_string(),
            auth_id,
            auth_status: response.code,
        })
    }

    /// Checks the status of the customer's pending authentication with OVO, and marks the linkage as verified if the
    /// customer has completed it.
    ///
    /// A verified linkage is returned as-is without contacting OVO. If the customer has not authenticated (yet), the
    /// result is [`LinkageError::RetryVerification`]. Unrecognised answers leave the linkage untouched.
    pub async fn reconcile(&self, customer_id: i64) -> Result<LinkageRecord, LinkageError> {
        let record = self
            .db
            .fetch_linkage_by_customer_id(customer_id)
            .await?
            .ok_or(LinkageError::UnknownLinkage(customer_id))?;
        if record.verified {
            trace!("🔗️ Linkage for customer #{customer_id} is already verified");
            return Ok(record);
        }
        let body = self.ovo.check_customer_authentication_status(&record.auth_id).await?;
        let response = decode_response(&body)?;
        match (response.status, response.code) {
            (codes::STATUS_OK, codes::AUTHENTICATED) => {
                let wallet_id = response.data.loyalty_id;
                if wallet_id.is_empty() {
                    error!("🔗️ OVO authenticated customer #{customer_id} but did not supply a loyalty id");
                    return Err(OvoApiError::DecodeError("Authenticated response is missing loyalty_id".into()).into());
                }
                let update = LinkageUpdate::default().with_wallet_id(wallet_id).with_verified(true);
                self.db.update_linkage(customer_id, update).await?;
                let record = self
                    .db
                    .fetch_linkage_by_customer_id(customer_id)
                    .await?
                    .ok_or(LinkageError::UnknownLinkage(customer_id))?;
                info!("🔗️ Linkage for customer #{customer_id} verified. OVO id: {:?}", record.wallet_id);
                Ok(record)
            },
            (_, codes::UNAUTHENTICATED | codes::AUTH_ID_NOT_FOUND | codes::CUSTOMER_NOT_FOUND) => {
                debug!("🔗️ Customer #{customer_id} has not authenticated yet. Code {}", response.code);
                Err(LinkageError::RetryVerification)
            },
            (status, code) => {
                warn!(
                    "🔗️ Unexpected authentication status for customer #{customer_id}. HTTP {status}, code {code}: {}. \
                     Linkage left unchanged.",
                    response.message
                );
                Ok(record)
            },
        }
    }

    /// The customer's linkage, as currently stored. OVO is not contacted.
    pub async fn linkage(&self, customer_id: i64) -> Result<Option<LinkageRecord>, LinkageError> {
        let record = self.db.fetch_linkage_by_customer_id(customer_id).await?;
        Ok(record)
    }

    /// The OVO id of the customer, if the customer's linkage is verified.
    pub async fn is_linkage_verified(&self, customer_id: i64) -> Result<Option<String>, LinkageError> {
        let record = self.db.fetch_linkage_by_customer_id(customer_id).await?;
        Ok(record.filter(|r| r.verified).map(|r| r.wallet_id.unwrap_or_default()))
    }

    /// The OVO id linked to `phone`, if a verified linkage uses it.
    pub async fn is_phone_verified(&self, phone: &str) -> Result<Option<String>, LinkageError> {
        let phone = self.normalize(phone)?;
        let record = self.db.fetch_verified_linkage_by_phone(&phone).await?;
        Ok(record.map(|r| r.wallet_id.unwrap_or_default()))
    }
}
