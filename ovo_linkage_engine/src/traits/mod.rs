//! The storage contracts the linkage engine is written against.
//!
//! * [`LinkageStore`] reads and writes linkage records.
//! * [`PointHistoryStore`] keeps the ledger of points requests.
mod linkage_store;
mod point_history;

pub use linkage_store::{LinkageStore, LinkageStoreError};
pub use point_history::PointHistoryStore;
