use log::{debug, trace};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{
    db_types::{LinkageRecord, LinkageUpdate, NewLinkage},
    LinkageStoreError,
};

const LINKAGE_COLUMNS: &str =
    "customer_id, ovo_id, ovo_phone, ovo_auth_id, fg_verified, source, created_at, updated_at";

/// Inserts a new, unverified linkage. This is not atomic on its own; embed it in a transaction (passing `&mut *tx`)
/// if the inserted row needs to be read back consistently.
pub async fn insert(linkage: NewLinkage, conn: &mut SqliteConnection) -> Result<(), LinkageStoreError> {
    let result = sqlx::query(
        r#"
            INSERT INTO customer_ovo (
                customer_id,
                ovo_phone,
                ovo_auth_id,
                source,
                fg_verified
            ) VALUES ($1, $2, $3, $4, FALSE);
        "#,
    )
    .bind(linkage.customer_id)
    .bind(&linkage.phone)
    .bind(&linkage.auth_id)
    .bind(&linkage.source)
    .execute(conn)
    .await?;
    debug!("🗃️ Linkage for customer #{} inserted ({} row)", linkage.customer_id, result.rows_affected());
    Ok(())
}

pub async fn fetch_by_customer_id(
    customer_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<LinkageRecord>, LinkageStoreError> {
    let sql = format!("SELECT {LINKAGE_COLUMNS} FROM customer_ovo WHERE customer_id = $1");
    let record = sqlx::query_as::<_, LinkageRecord>(&sql).bind(customer_id).fetch_optional(conn).await?;
    trace!("🗃️ Linkage for customer #{customer_id}: {record:?}");
    Ok(record)
}

/// Fetches the linkage that uses `phone`. If `verified_only` is set, unverified linkages are ignored.
pub async fn fetch_by_phone(
    phone: &str,
    verified_only: bool,
    conn: &mut SqliteConnection,
) -> Result<Option<LinkageRecord>, LinkageStoreError> {
    let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT {LINKAGE_COLUMNS} FROM customer_ovo WHERE ovo_phone = "));
    builder.push_bind(phone);
    if verified_only {
        builder.push(" AND fg_verified = TRUE");
    }
    builder.push(" LIMIT 1");
    let record = builder.build_query_as::<LinkageRecord>().fetch_optional(conn).await?;
    trace!("🗃️ Linkage for phone {phone} (verified only: {verified_only}): {record:?}");
    Ok(record)
}

/// Applies the fields set in `update` to the linkage of `customer_id`. `updated_at` is always refreshed.
///
/// An update that clears the verified flag only applies to a linkage that is still unverified.
///
/// An update that touches no rows means the linkage was not there to update. This is reported as
/// [`LinkageStoreError::PhoneAlreadyLinked`] since the caller has lost a race for it.
pub async fn update(
    customer_id: i64,
    update: LinkageUpdate,
    conn: &mut SqliteConnection,
) -> Result<(), LinkageStoreError> {
    let pending_only = update.verified == Some(false);
    let mut builder = QueryBuilder::<Sqlite>::new("UPDATE customer_ovo SET ");
    let mut set_clause = builder.separated(", ");
    if let Some(wallet_id) = update.wallet_id {
        set_clause.push("ovo_id = ");
        set_clause.push_bind_unseparated(wallet_id);
    }
    if let Some(phone) = update.phone {
        set_clause.push("ovo_phone = ");
        set_clause.push_bind_unseparated(phone);
    }
    if let Some(auth_id) = update.auth_id {
        set_clause.push("ovo_auth_id = ");
        set_clause.push_bind_unseparated(auth_id);
    }
    if let Some(verified) = update.verified {
        set_clause.push("fg_verified = ");
        set_clause.push_bind_unseparated(verified);
    }
    set_clause.push("updated_at = CURRENT_TIMESTAMP");
    builder.push(" WHERE customer_id = ");
    builder.push_bind(customer_id);
    if pending_only {
        builder.push(" AND fg_verified = FALSE");
    }
    let result = builder.build().execute(conn).await?;
    if result.rows_affected() == 0 {
        debug!("🗃️ Update of linkage for customer #{customer_id} affected no rows");
        return Err(LinkageStoreError::PhoneAlreadyLinked);
    }
    trace!("🗃️ Linkage for customer #{customer_id} updated");
    Ok(())
}
