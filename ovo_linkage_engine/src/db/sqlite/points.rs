use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewPointHistory, PointHistoryEntry},
    LinkageStoreError,
};

pub async fn insert(entry: NewPointHistory, conn: &mut SqliteConnection) -> Result<i64, LinkageStoreError> {
    let result = sqlx::query(
        r#"
            INSERT INTO ovo_points (customer_id, order_id, so_number, type, payload, fg_failed)
            VALUES ($1, $2, $3, $4, $5, $6);
        "#,
    )
    .bind(entry.customer_id)
    .bind(entry.order_id)
    .bind(&entry.so_number)
    .bind(&entry.kind)
    .bind(&entry.payload)
    .bind(entry.failed)
    .execute(conn)
    .await?;
    let id = result.last_insert_rowid();
    trace!("🗃️ Points history #{id} recorded for order {} (failed: {})", entry.so_number, entry.failed);
    Ok(id)
}

pub async fn fetch_for_customer(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<PointHistoryEntry>, LinkageStoreError> {
    let entries = sqlx::query_as::<_, PointHistoryEntry>(
        r#"
            SELECT id, customer_id, order_id, so_number, type, payload, fg_failed, created_at
            FROM ovo_points
            WHERE customer_id = $1
            ORDER BY id ASC;
        "#,
    )
    .bind(customer_id)
    .fetch_all(conn)
    .await?;
    Ok(entries)
}
