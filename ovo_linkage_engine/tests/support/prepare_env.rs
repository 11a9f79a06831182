use std::sync::Arc;

use log::*;
use ovo_linkage_engine::{LinkageApi, LinkageConfig, PointsApi, SqliteDatabase};
use ovo_tools::{test_utils::MockTransport, OvoApi, OvoConfig};
use serde_json::json;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub const TEST_NONCE: &str = "20241019000000";

pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    debug!("🚀️ Logging initialised");
    create_database(url).await;
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.migrate().await.expect("Error running DB migrations");
    db
}

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/ovo_test_store_{}.db", dir.display(), rand::random::<u64>())
}

pub async fn create_database(url: &str) {
    if let Err(e) = Sqlite::drop_database(url).await {
        trace!("🚀️ Nothing to drop at {url}: {e:?}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    info!("🚀️ Created Sqlite database {url}");
}

pub async fn tear_down(mut db: SqliteDatabase) {
    if let Err(e) = db.close().await {
        error!("🚀️ Failed to close database: {e}");
    }
    let _ = Sqlite::drop_database(db.url()).await;
}

pub fn ovo_client(transport: Arc<MockTransport>) -> OvoApi<MockTransport> {
    let config = OvoConfig::new("http://ovo.test", "56789", "01234", "merchant-1");
    OvoApi::new_with_nonce(config, TEST_NONCE, transport).expect("Error creating OVO client")
}

/// A fresh database, a scripted transport and a linkage API wired to both.
pub async fn linkage_env() -> (LinkageApi<SqliteDatabase, MockTransport>, Arc<MockTransport>) {
    let db = prepare_test_env(&random_db_path()).await;
    let transport = Arc::new(MockTransport::new());
    let api = LinkageApi::new(db, ovo_client(Arc::clone(&transport)), LinkageConfig::default());
    (api, transport)
}

pub fn points_api(db: SqliteDatabase, transport: &Arc<MockTransport>) -> PointsApi<SqliteDatabase, MockTransport> {
    PointsApi::new(db, ovo_client(Arc::clone(transport)))
}

pub fn push_auth_started(transport: &MockTransport, auth_id: &str) {
    transport.push_json(
        201,
        json!({"status": 201, "code": 1, "message": "Sending authentication", "data": {"authentication_id": auth_id}}),
    );
}

pub fn push_authenticated(transport: &MockTransport, loyalty_id: &str) {
    transport
        .push_json(200, json!({"status": 200, "code": 1, "message": "Authenticated", "data": {"loyalty_id": loyalty_id}}));
}

pub fn push_auth_status(transport: &MockTransport, status: u16, code: i64, message: &str) {
    transport.push_json(status, json!({"status": status, "code": code, "message": message, "data": []}));
}
