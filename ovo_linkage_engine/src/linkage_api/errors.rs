use ovo_common::{Locale, MessageCatalog};
use ovo_tools::OvoApiError;
use thiserror::Error;

use crate::LinkageStoreError;

#[derive(Debug, Clone, Error)]
pub enum LinkageError {
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("The linkage is already verified")]
    AlreadyVerified,
    #[error("Customer #{0} has a verified linkage to another phone number")]
    CannotChangeVerifiedIdentity(i64),
    #[error("The phone number is already linked to another customer")]
    PhoneAlreadyLinked,
    #[error("OVO rejected the authentication request. Code {code}: {message}")]
    RemoteAuthRejected { code: i64, message: String },
    #[error("The customer has not completed the OVO authentication yet")]
    RetryVerification,
    #[error("No linkage exists for customer #{0}")]
    UnknownLinkage(i64),
    #[error("Customer #{0} does not have a verified linkage")]
    LinkageNotVerified(i64),
    #[error("OVO rejected the points request. Code {code}: {message}")]
    PointsRejected { code: i64, message: String },
    #[error("Storage error: {0}")]
    StorageError(String),
    #[error(transparent)]
    Provider(#[from] OvoApiError),
}

impl From<LinkageStoreError> for LinkageError {
    fn from(e: LinkageStoreError) -> Self {
        match e {
            LinkageStoreError::PhoneAlreadyLinked => LinkageError::PhoneAlreadyLinked,
            LinkageStoreError::DatabaseError(s) => LinkageError::StorageError(s),
        }
    }
}

impl LinkageError {
    /// The message-catalog keyword for this error.
    pub fn keyword(&self) -> &'static str {
        match self {
            LinkageError::InvalidPhone(_) => "ovo_id_invalid",
            LinkageError::AlreadyVerified => "ovo_already_verified",
            LinkageError::CannotChangeVerifiedIdentity(_) => "ovo_change_verified",
            LinkageError::PhoneAlreadyLinked => "ovo_id_used",
            LinkageError::RemoteAuthRejected { .. } => "ovo_not_authenticated",
            LinkageError::RetryVerification => "ovo_retry_verification",
            LinkageError::UnknownLinkage(_) => "ovo_unknown_info",
            LinkageError::LinkageNotVerified(_) => "ovo_not_verified",
            LinkageError::PointsRejected { .. } => "ovo_points_rejected",
            LinkageError::StorageError(_) => "ovo_unknown_error",
            LinkageError::Provider(e) => e.keyword(),
        }
    }

    /// Renders the error for an end user. Provider rejections carry the provider's own message; everything else is
    /// looked up in the catalog.
    pub fn localized_message(&self, catalog: &MessageCatalog, locale: Locale) -> String {
        match self {
            LinkageError::RemoteAuthRejected { message, .. } | LinkageError::PointsRejected { message, .. }
                if !message.is_empty() =>
            {
                message.clone()
            },
            _ => catalog.lookup(self.keyword(), locale),
        }
    }
}

#[cfg(test)]
mod test {
    use ovo_common::UNKNOWN_SERVICE_ERROR;

    use super::*;

    #[test]
    fn store_errors_are_reclassified() {
        let err = LinkageError::from(LinkageStoreError::PhoneAlreadyLinked);
        assert!(matches!(err, LinkageError::PhoneAlreadyLinked));
        let err = LinkageError::from(LinkageStoreError::DatabaseError("disk full".into()));
        assert!(matches!(err, LinkageError::StorageError(s) if s == "disk full"));
    }

    #[test]
    fn provider_errors_keep_their_keyword() {
        let err = LinkageError::from(OvoApiError::TransportError("timeout".into()));
        assert_eq!(err.keyword(), "ovo_unavailable_service");
        let err = LinkageError::from(OvoApiError::UnknownOperation("foo".into()));
        assert_eq!(err.keyword(), "ovo_unidentified_request");
    }

    #[test]
    fn every_keyword_is_in_the_default_catalog() {
        let catalog = MessageCatalog::default();
        let errors = [
            LinkageError::InvalidPhone("1".into()),
            LinkageError::AlreadyVerified,
            LinkageError::CannotChangeVerifiedIdentity(1),
            LinkageError::PhoneAlreadyLinked,
            LinkageError::RemoteAuthRejected { code: 4, message: String::new() },
            LinkageError::RetryVerification,
            LinkageError::UnknownLinkage(1),
            LinkageError::LinkageNotVerified(1),
            LinkageError::PointsRejected { code: 17, message: String::new() },
            LinkageError::StorageError("disk full".into()),
            LinkageError::Provider(OvoApiError::Initialization("bad key".into())),
            LinkageError::Provider(OvoApiError::UnknownOperation("foo".into())),
            LinkageError::Provider(OvoApiError::ParameterCountMismatch {
                operation: "customer_profile".into(),
                expected: 1,
                supplied: 0,
            }),
            LinkageError::Provider(OvoApiError::TransportError("timeout".into())),
            LinkageError::Provider(OvoApiError::DecodeError("eof".into())),
        ];
        for err in &errors {
            for locale in [Locale::En, Locale::Id] {
                let msg = err.localized_message(&catalog, locale);
                assert_ne!(msg, UNKNOWN_SERVICE_ERROR, "{} has no {locale} message", err.keyword());
            }
        }
    }

    #[test]
    fn localized_messages() {
        let catalog = MessageCatalog::default();
        let msg = LinkageError::InvalidPhone("123".into()).localized_message(&catalog, Locale::En);
        assert_eq!(msg, catalog.lookup("ovo_id_invalid", Locale::En));
        assert_ne!(msg, UNKNOWN_SERVICE_ERROR);

        let err = LinkageError::RemoteAuthRejected { code: 4, message: "Customer not found".into() };
        assert_eq!(err.localized_message(&catalog, Locale::Id), "Customer not found");

        let err = LinkageError::StorageError("boom".into());
        assert_eq!(err.localized_message(&MessageCatalog::empty(), Locale::En), UNKNOWN_SERVICE_ERROR);
    }
}
