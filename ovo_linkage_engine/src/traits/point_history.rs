use std::future::Future;

use crate::{
    db_types::{NewPointHistory, PointHistoryEntry},
    LinkageStoreError,
};

pub trait PointHistoryStore: Send + Sync {
    /// Records a points request and returns the id of the new history entry.
    fn insert_point_history(
        &self,
        entry: NewPointHistory,
    ) -> impl Future<Output = Result<i64, LinkageStoreError>> + Send;

    /// All points requests for the customer, oldest first.
    fn fetch_point_history(
        &self,
        customer_id: i64,
    ) -> impl Future<Output = Result<Vec<PointHistoryEntry>, LinkageStoreError>> + Send;
}
