//! Database backends for the linkage engine.
#[cfg(feature = "sqlite")]
pub mod sqlite;
