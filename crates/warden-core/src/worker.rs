//! The affiliation worker: single consumer of the join queue.

use crate::client::{AffiliationAdmin, DiscoveryService};
use crate::config::BotConfig;
use crate::decision::is_published_contact;
use crate::error::{Error, Result};
use crate::extract::{contact_form, relevant_addresses};
use crate::queue::JoinReceiver;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use warden_xmpp::{Affiliation, Jid};

/// Long-lived consumer loop over the join queue.
///
/// Processes one address at a time, strictly in queue order: strip the
/// address to its domain, fetch that domain's disco#info (fresh, never
/// cached), extract the published contact addresses, and grant the
/// configured affiliation when the joiner is among them.
///
/// Per-item failures are logged and contained; nothing a single queue
/// item does can take the loop down.
pub struct AffiliationWorker<D, A> {
    queue: JoinReceiver,
    disco: D,
    admin: A,
    room: Jid,
    granted_affiliation: Affiliation,
    grant_reason: String,
    cancel: CancellationToken,
}

impl<D, A> AffiliationWorker<D, A>
where
    D: DiscoveryService,
    A: AffiliationAdmin,
{
    /// Create a worker consuming `queue` for the room in `config`.
    pub fn new(
        queue: JoinReceiver,
        disco: D,
        admin: A,
        config: &BotConfig,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            queue,
            disco,
            admin,
            room: config.room.clone(),
            granted_affiliation: config.granted_affiliation,
            grant_reason: config.grant_reason.clone(),
            cancel,
        }
    }

    /// Run until cancelled.
    ///
    /// Returns `Ok(())` on a requested shutdown and
    /// [`Error::SessionLost`] if the queue closes underneath the loop
    /// without one.
    pub async fn run(mut self) -> Result<()> {
        loop {
            let address = tokio::select! {
                _ = self.cancel.cancelled() => return Ok(()),
                item = self.queue.dequeue() => match item {
                    Some(address) => address,
                    None if self.cancel.is_cancelled() => return Ok(()),
                    None => return Err(Error::SessionLost),
                },
            };
            self.process(address).await;
        }
    }

    /// Handle one dequeued address. Infallible by design: every failure
    /// mode ends this item only.
    async fn process(&self, address: Jid) {
        debug!(%address, "checking whether address should have member affiliation");

        let domain = address.to_domain();
        let info = match self.disco.query_info(&domain, true).await {
            Ok(info) => info,
            Err(error) => {
                warn!(%address, %domain, %error, "discovery lookup failed, skipping");
                return;
            }
        };

        let Some(form) = contact_form(&info) else {
            debug!(%domain, "no contact info published, not granting anything");
            return;
        };

        let contacts: Vec<Jid> = relevant_addresses(form).collect();
        debug!(%domain, ?contacts, "found contact addresses");

        if !is_published_contact(&address, &contacts) {
            info!(%address, ?contacts, "not a published contact, not granting affiliation");
            return;
        }

        info!(
            %address,
            %domain,
            affiliation = %self.granted_affiliation,
            "address is a relevant contact for its domain, granting affiliation"
        );
        if let Err(error) = self
            .admin
            .set_affiliation(&self.room, &address, self.granted_affiliation, &self.grant_reason)
            .await
        {
            warn!(%address, %error, "affiliation change failed");
        }
    }
}
