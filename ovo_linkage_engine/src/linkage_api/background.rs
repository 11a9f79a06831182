use std::time::Duration;

use log::*;
use ovo_tools::OvoTransport;
use tokio::task::JoinHandle;

use crate::{
    db_types::LinkageRecord,
    linkage_api::{errors::LinkageError, linkage_flow_api::LinkageApi, linkage_objects::LinkageRequest},
    LinkageStore,
};

/// Runs a linkage in the background: waits `start_delay`, starts the linkage, waits `verify_delay` to give the
/// customer time to respond to the OVO challenge, then reconciles.
///
/// The outcome is logged and also returned through the handle. Dropping the handle detaches the task.
pub fn start_background_linkage<B, T>(
    api: LinkageApi<B, T>,
    request: LinkageRequest,
    start_delay: Duration,
    verify_delay: Duration,
) -> JoinHandle<Result<LinkageRecord, LinkageError>>
where
    B: LinkageStore + 'static,
    T: OvoTransport + 'static,
{
    tokio::spawn(async move {
        let customer_id = request.customer_id;
        info!("⏳️ Background linkage for {request} started");
        tokio::time::sleep(start_delay).await;
        if let Err(e) = api.validate_and_authenticate(request).await {
            warn!("⏳️ Background linkage for customer #{customer_id} failed. {e}");
            return Err(e);
        }
        tokio::time::sleep(verify_delay).await;
        match api.reconcile(customer_id).await {
            Ok(record) => {
                info!("⏳️ Background linkage for customer #{customer_id} finished. Verified: {}", record.verified);
                Ok(record)
            },
            Err(e) => {
                warn!("⏳️ Background verification for customer #{customer_id} failed. {e}");
                Err(e)
            },
        }
    })
}
