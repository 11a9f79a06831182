use std::future::Future;

use thiserror::Error;

use crate::db_types::{LinkageRecord, LinkageUpdate, NewLinkage};

/// Persistence for linkage records, keyed by customer id, with a uniqueness constraint on the phone number.
///
/// Lookups return `Ok(None)` when no row matches; an `Err` always means the store itself failed.
pub trait LinkageStore: Send + Sync {
    fn fetch_linkage_by_customer_id(
        &self,
        customer_id: i64,
    ) -> impl Future<Output = Result<Option<LinkageRecord>, LinkageStoreError>> + Send;

    /// Fetches the linkage (verified or not) that uses the given phone number.
    fn fetch_linkage_by_phone(
        &self,
        phone: &str,
    ) -> impl Future<Output = Result<Option<LinkageRecord>, LinkageStoreError>> + Send;

    /// Fetches the linkage that uses the given phone number, but only if it is verified.
    fn fetch_verified_linkage_by_phone(
        &self,
        phone: &str,
    ) -> impl Future<Output = Result<Option<LinkageRecord>, LinkageStoreError>> + Send;

    /// Inserts a new, unverified linkage and returns the stored record.
    ///
    /// A uniqueness violation is reported as [`LinkageStoreError::PhoneAlreadyLinked`].
    fn insert_linkage(
        &self,
        linkage: NewLinkage,
    ) -> impl Future<Output = Result<LinkageRecord, LinkageStoreError>> + Send;

    /// Writes the fields set in `update` to the linkage of `customer_id`. An update that sets `verified` to `false` only
    /// applies to a linkage that is not verified.
    ///
    /// Both a uniqueness violation and an update that affects no rows are reported as
    /// [`LinkageStoreError::PhoneAlreadyLinked`]: either way the caller lost a race for the linkage.
    fn update_linkage(
        &self,
        customer_id: i64,
        update: LinkageUpdate,
    ) -> impl Future<Output = Result<(), LinkageStoreError>> + Send;
}

#[derive(Debug, Clone, Error)]
pub enum LinkageStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The phone number is already linked to another customer")]
    PhoneAlreadyLinked,
}

impl From<sqlx::Error> for LinkageStoreError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(de) if de.is_unique_violation() => LinkageStoreError::PhoneAlreadyLinked,
            _ => LinkageStoreError::DatabaseError(e.to_string()),
        }
    }
}
