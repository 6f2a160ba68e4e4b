//! Room-session orchestration: join, then bridge events into the worker.

use crate::bridge::RoomEventBridge;
use crate::client::{AffiliationAdmin, DiscoveryService, RoomClient};
use crate::config::BotConfig;
use crate::error::{Error, Result};
use crate::queue::join_queue;
use crate::worker::AffiliationWorker;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Join the configured room and process its join events until `cancel`
/// fires or the session is lost.
///
/// Setup is strictly two-phase: [`RoomClient::join`] resolves only once
/// the room is fully entered, and the join stream is consumed only
/// after that resolution. A join notification therefore cannot race a
/// half-initialized subscription.
pub async fn run_in_room<C, D, A>(
    client: &C,
    disco: D,
    admin: A,
    config: BotConfig,
    cancel: CancellationToken,
) -> Result<()>
where
    C: RoomClient,
    D: DiscoveryService + 'static,
    A: AffiliationAdmin + 'static,
{
    let mut handle = client.join(&config.room, &config.nickname).await?;
    info!(room = %config.room, nickname = %config.nickname, "joined room");

    let (tx, rx) = join_queue(config.queue_capacity, config.overflow);
    let bridge = RoomEventBridge::new(tx);
    let worker = AffiliationWorker::new(rx, disco, admin, &config, cancel.clone());
    let worker_task = tokio::spawn(worker.run());

    // Producer loop: this is the event-delivery path, so it only ever
    // suspends for an enqueue attempt under the overflow policy.
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            member = handle.next_join() => match member {
                Some(member) => {
                    bridge.handle_join(&member).await;
                }
                // Stream over, session lost. Close the queue and let
                // the worker drain what was already accepted; it then
                // reports the loss itself.
                None => break,
            },
        }
    }

    // Dropping the bridge closes the queue, which ends the worker once
    // it has drained.
    drop(bridge);
    worker_task.await.map_err(|_| Error::WorkerAborted)?
}
