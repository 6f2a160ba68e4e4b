//! Collaborator interfaces the pipeline is generic over.
//!
//! The pipeline never touches the wire. An embedder supplies the room
//! session, the service-discovery client and the affiliation admin
//! surface through these traits; tests supply in-memory doubles.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;
use warden_xmpp::{Affiliation, DiscoInfo, Jid, Member};

/// Errors from a service-discovery lookup.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The query did not complete in time.
    #[error("discovery query timed out")]
    Timeout,

    /// The queried domain could not be reached.
    #[error("domain unreachable: {0}")]
    Unreachable(String),

    /// The domain answered with a protocol-level error.
    #[error("discovery protocol error: {0}")]
    Protocol(String),
}

/// Errors from an affiliation change submission.
#[derive(Debug, Clone, Error)]
pub enum AdminError {
    /// The room refused the change (insufficient privileges).
    #[error("affiliation change denied: {0}")]
    Denied(String),

    /// The submission failed in transit.
    #[error("affiliation change failed: {0}")]
    Transport(String),
}

/// Errors from establishing or holding a room session.
#[derive(Debug, Clone, Error)]
pub enum RoomError {
    /// The join was rejected or never confirmed.
    #[error("could not join room: {0}")]
    JoinFailed(String),

    /// The session dropped after entry.
    #[error("room connection lost: {0}")]
    ConnectionLost(String),
}

/// A service-discovery client (disco#info queries).
#[async_trait]
pub trait DiscoveryService: Send + Sync {
    /// Query `target` for its disco#info document.
    ///
    /// With `require_fresh` set, any caching layer below must be
    /// bypassed and the answer fetched from the entity itself. The
    /// pipeline always requires freshness: trust decisions must reflect
    /// currently published contact data.
    async fn query_info(&self, target: &Jid, require_fresh: bool)
        -> Result<DiscoInfo, LookupError>;
}

/// The room-management surface for affiliation changes.
#[async_trait]
pub trait AffiliationAdmin: Send + Sync {
    /// Ask the room to assign `affiliation` to `target`.
    async fn set_affiliation(
        &self,
        room: &Jid,
        target: &Jid,
        affiliation: Affiliation,
        reason: &str,
    ) -> Result<(), AdminError>;
}

/// A chat client able to join multi-user-chat rooms.
#[async_trait]
pub trait RoomClient: Send + Sync {
    /// Join `room` under `nickname`.
    ///
    /// Resolves only once the room is fully entered. Join notifications
    /// observed through the returned handle are guaranteed to be wired
    /// up from that point on; there is no window in which a join can be
    /// delivered before a subscriber exists.
    async fn join(&self, room: &Jid, nickname: &str) -> Result<RoomHandle, RoomError>;
}

/// A live room session, held by the pipeline after entry.
///
/// The handle owns the receiving end of the join-notification stream.
/// The stream ends (yields `None`) when the session is lost.
pub struct RoomHandle {
    room: Jid,
    joins: mpsc::Receiver<Member>,
}

impl RoomHandle {
    /// Create a handle from the room address and the join stream.
    pub fn new(room: Jid, joins: mpsc::Receiver<Member>) -> Self {
        Self { room, joins }
    }

    /// The address of the joined room.
    pub fn room(&self) -> &Jid {
        &self.room
    }

    /// Wait for the next join notification.
    ///
    /// Returns `None` once the session is lost and no further
    /// notifications can arrive.
    pub async fn next_join(&mut self) -> Option<Member> {
        self.joins.recv().await
    }
}
