//! Background worker applying click-count increments.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, info, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Consumes click events and applies one relative increment per event.
///
/// Up to `concurrency` increments run at once, each bounded by
/// `store_timeout`. Failures and timeouts are logged and counted; they never
/// reach the request that produced the event. Returns once every sender is
/// dropped and all in-flight increments have finished.
pub async fn run_click_worker<L>(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_repository: Arc<L>,
    concurrency: usize,
    store_timeout: Duration,
) where
    L: LinkRepository + ?Sized + 'static,
{
    let concurrency = concurrency.max(1);
    let permits = Arc::new(Semaphore::new(concurrency));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = link_repository.clone();

        tokio::spawn(async move {
            let increment = repository.increment_clicks(&event.slug);
            match tokio::time::timeout(store_timeout, increment).await {
                Ok(Ok(())) => debug!(slug = %event.slug, "Click recorded"),
                Err(_) => {
                    metrics::counter!("click_increment_failures_total", "reason" => "timeout")
                        .increment(1);
                    warn!(slug = %event.slug, timeout = ?store_timeout, "Click increment timed out");
                }
                Ok(Err(e)) => {
                    metrics::counter!("click_increment_failures_total", "reason" => "store")
                        .increment(1);
                    warn!(slug = %event.slug, error = %e, "Failed to record click");
                }
            }
            drop(repository);
            drop(permit);
        });
    }

    // Wait for in-flight increments before reporting shutdown.
    let _ = permits.acquire_many(concurrency as u32).await;
    info!("Click worker stopped");
}
