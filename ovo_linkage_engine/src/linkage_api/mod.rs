//! # OVO linkage engine public API
//!
//! * [`linkage_flow_api`] runs the linkage workflow: phone validation, conflict checks, the provider's authentication
//!   challenge and persistence, followed later by reconciliation against the provider's authentication status.
//! * [`points_api`] awards points to verified linkages.
//! * [`background`] runs a linkage and its delayed reconciliation as a supervised task.
//!
//! Every API is created from a storage backend and an [`ovo_tools::OvoApi`] client:
//!
//! ```rust,ignore
//! use ovo_linkage_engine::{LinkageApi, LinkageConfig, LinkageRequest, SqliteDatabase};
//! use ovo_tools::{OvoApi, OvoConfig};
//! let db = SqliteDatabase::new_with_url("sqlite://data/ovo_linkage.db", 5).await?;
//! let ovo = OvoApi::new(OvoConfig::new_from_env_or_default())?;
//! let api = LinkageApi::new(db, ovo, LinkageConfig::from_env_or_default());
//! let pending = api.validate_and_authenticate(LinkageRequest::new(42, "+62818223456")).await?;
//! // ... once the customer has entered the security code in the OVO app
//! let linkage = api.reconcile(42).await?;
//! ```
pub mod background;
pub mod errors;
pub mod linkage_flow_api;
pub mod linkage_objects;
pub mod phone;
pub mod points_api;
