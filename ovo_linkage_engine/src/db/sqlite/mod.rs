//! # SQLite backend
//!
//! The low-level queries live in [`linkages`] and [`points`] as plain functions that accept a
//! `&mut SqliteConnection`. Callers can obtain a connection from a pool, or open a transaction, and call through to the
//! functions without any other changes. [`SqliteDatabase`] wires them up to the storage traits.
use std::{env, fmt::Debug};

use log::*;
use sqlx::{migrate, sqlite::SqlitePoolOptions, SqlitePool};

use crate::{
    db_types::{LinkageRecord, LinkageUpdate, NewLinkage, NewPointHistory, PointHistoryEntry},
    LinkageStore,
    LinkageStoreError,
    PointHistoryStore,
};

pub mod linkages;
pub mod points;

const SQLITE_DB_URL: &str = "sqlite://data/ovo_linkage.db";

pub fn db_url() -> String {
    let result = env::var("OVO_DATABASE_URL").unwrap_or_else(|_| {
        info!("OVO_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, LinkageStoreError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SqliteDatabase ({})", self.url)
    }
}

impl SqliteDatabase {
    /// Connects to the database at `OVO_DATABASE_URL`.
    pub async fn new(max_connections: u32) -> Result<Self, LinkageStoreError> {
        Self::new_with_url(&db_url(), max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, LinkageStoreError> {
        let pool = new_pool(url, max_connections).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    /// Brings the schema up to date using the embedded migrations.
    pub async fn migrate(&self) -> Result<(), LinkageStoreError> {
        migrate!("./src/db/sqlite/migrations")
            .run(&self.pool)
            .await
            .map_err(|e| LinkageStoreError::DatabaseError(format!("Migration failed. {e}")))?;
        info!("🗃️ Migrations complete");
        Ok(())
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&mut self) -> Result<(), LinkageStoreError> {
        self.pool.close().await;
        Ok(())
    }
}

impl LinkageStore for SqliteDatabase {
    async fn fetch_linkage_by_customer_id(&self, customer_id: i64) -> Result<Option<LinkageRecord>, LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        linkages::fetch_by_customer_id(customer_id, &mut conn).await
    }

    async fn fetch_linkage_by_phone(&self, phone: &str) -> Result<Option<LinkageRecord>, LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        linkages::fetch_by_phone(phone, false, &mut conn).await
    }

    async fn fetch_verified_linkage_by_phone(&self, phone: &str) -> Result<Option<LinkageRecord>, LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        linkages::fetch_by_phone(phone, true, &mut conn).await
    }

    async fn insert_linkage(&self, linkage: NewLinkage) -> Result<LinkageRecord, LinkageStoreError> {
        let mut tx = self.pool.begin().await?;
        let customer_id = linkage.customer_id;
        linkages::insert(linkage, &mut *tx).await?;
        let record = linkages::fetch_by_customer_id(customer_id, &mut *tx).await?.ok_or_else(|| {
            error!("🗃️ Linkage for customer #{customer_id} was not found straight after inserting it");
            LinkageStoreError::DatabaseError(format!("Linkage for customer #{customer_id} vanished after insert"))
        })?;
        tx.commit().await?;
        Ok(record)
    }

    async fn update_linkage(&self, customer_id: i64, update: LinkageUpdate) -> Result<(), LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        linkages::update(customer_id, update, &mut conn).await
    }
}

impl PointHistoryStore for SqliteDatabase {
    async fn insert_point_history(&self, entry: NewPointHistory) -> Result<i64, LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        points::insert(entry, &mut conn).await
    }

    async fn fetch_point_history(&self, customer_id: i64) -> Result<Vec<PointHistoryEntry>, LinkageStoreError> {
        let mut conn = self.pool.acquire().await?;
        points::fetch_for_customer(customer_id, &mut conn).await
    }
}
