//! Filters join notifications into the queue.

use crate::queue::{EnqueueOutcome, JoinSender};
use tracing::debug;
use warden_xmpp::{Affiliation, Member};

/// Owns the producer side of the join queue and decides which join
/// notifications become work items.
///
/// Members that already hold an affiliation were vetted or privileged
/// some other way and are skipped outright; only `none`-affiliated
/// joiners are candidates for automated trust.
pub struct RoomEventBridge {
    queue: JoinSender,
}

impl RoomEventBridge {
    /// Create a bridge feeding `queue`.
    pub fn new(queue: JoinSender) -> Self {
        Self { queue }
    }

    /// Handle one join notification.
    ///
    /// Returns `None` when the member was filtered out, otherwise the
    /// enqueue outcome. Never suspends longer than an enqueue attempt
    /// under the queue's overflow policy.
    pub async fn handle_join(&self, member: &Member) -> Option<EnqueueOutcome> {
        debug!(nickname = %member.nickname, "new member");
        if member.affiliation != Affiliation::None {
            debug!(
                nickname = %member.nickname,
                affiliation = %member.affiliation,
                "member already has an affiliation, ignoring"
            );
            return None;
        }
        Some(self.queue.enqueue(member.bare.to_bare()).await)
    }
}
