//! OVO Linkage Engine
//!
//! Ties a local customer record to an OVO wallet identity.
//!
//! The library is divided into two main sections:
//! 1. Storage ([`mod@db`] backends and the [`LinkageStore`] / [`PointHistoryStore`] traits they implement). SQLite is
//!    the supported backend. The record types live in [`db_types`].
//! 2. The public API:
//!    * [`LinkageApi`] validates a linkage request, starts the provider's authentication challenge, persists the
//!      pending linkage and later reconciles it against the provider's authentication status.
//!    * [`PointsApi`] awards points to verified linkages and keeps a history of every attempt.
//!    * [`start_background_linkage`] runs a linkage followed by a delayed reconciliation as a supervised task.
//!
//! Correctness under concurrent linkage attempts relies on the store's uniqueness constraint on the phone number, not
//! on in-process locking. The pre-checks in [`LinkageApi::validate_and_authenticate`] give early, friendly errors;
//! the store has the final word.
pub mod db;
pub mod db_types;
mod linkage_api;
mod traits;

#[cfg(feature = "sqlite")]
pub use db::sqlite::SqliteDatabase;
pub use linkage_api::{
    background::start_background_linkage,
    errors::LinkageError,
    linkage_flow_api::LinkageApi,
    linkage_objects::{AuthenticationAttempt, LinkageConfig, LinkageRequest, PointsRequest},
    phone::normalize_phone,
    points_api::PointsApi,
};
pub use traits::{LinkageStore, LinkageStoreError, PointHistoryStore};
