use std::fmt::Debug;

use log::*;
use ovo_tools::{codes, decode_response, OvoApi, OvoResponse, OvoTransport, ReqwestTransport};

use crate::{
    db_types::{NewPointHistory, PointHistoryEntry},
    linkage_api::{errors::LinkageError, linkage_objects::PointsRequest},
    LinkageStore,
    PointHistoryStore,
};

/// Awards OVO points for orders placed by customers with a verified linkage.
///
/// Every attempt that reaches OVO is written to the points history, whether it succeeds or not.
pub struct PointsApi<B, T = ReqwestTransport> {
    db: B,
    ovo: OvoApi<T>,
}

impl<B: Clone, T> Clone for PointsApi<B, T> {
    fn clone(&self) -> Self {
        Self { db: self.db.clone(), ovo: self.ovo.clone() }
    }
}

impl<B: Debug, T> Debug for PointsApi<B, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PointsApi ({:?})", self.db)
    }
}

impl<B, T> PointsApi<B, T> {
    pub fn new(db: B, ovo: OvoApi<T>) -> Self {
        Self { db, ovo }
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, T> PointsApi<B, T>
where
    B: LinkageStore + PointHistoryStore,
    T: OvoTransport,
{
    /// Asks OVO to calculate and award points for the order in `request`.
    ///
    /// The customer must have a verified linkage, otherwise the result is [`LinkageError::LinkageNotVerified`] and
    /// nothing is recorded. Any answer other than `200 OK` is [`LinkageError::PointsRejected`].
    pub async fn award_points(&self, request: PointsRequest) -> Result<OvoResponse, LinkageError> {
        let customer_id = request.customer_id;
        let wallet_id = self
            .db
            .fetch_linkage_by_customer_id(customer_id)
            .await?
            .filter(|r| r.verified)
            .and_then(|r| r.wallet_id)
            .filter(|id| !id.is_empty())
            .ok_or(LinkageError::LinkageNotVerified(customer_id))?;
        let payload = serde_json::to_string(&request.params)
            .map_err(|e| LinkageError::StorageError(format!("Could not serialize points request. {e}")))?;

        let outcome = match self.ovo.calculate_points(&wallet_id, &request.params).await {
            Ok(body) => decode_response(&body).map_err(LinkageError::from),
            Err(e) => Err(e.into()),
        }
        .and_then(|response| {
            if response.status == codes::STATUS_OK {
                Ok(response)
            } else {
                Err(LinkageError::PointsRejected { code: response.code, message: response.message })
            }
        });

        let entry = NewPointHistory {
            customer_id,
            order_id: request.order_id,
            so_number: request.so_number.clone(),
            kind: request.kind,
            payload,
            failed: outcome.is_err(),
        };
        let id = self.db.insert_point_history(entry).await.map_err(|e| {
            error!("💰️ Could not record points history for order {}. {e}", request.so_number);
            LinkageError::from(e)
        })?;
        match &outcome {
            Ok(_) => info!("💰️ Points awarded to customer #{customer_id} for order {} (#{id})", request.so_number),
            Err(e) => warn!("💰️ Points for order {} were not awarded (#{id}). {e}", request.so_number),
        }
        outcome
    }

    /// The history of points requests for the customer, oldest first.
    pub async fn history(&self, customer_id: i64) -> Result<Vec<PointHistoryEntry>, LinkageError> {
        let entries = self.db.fetch_point_history(customer_id).await?;
        Ok(entries)
    }
}
