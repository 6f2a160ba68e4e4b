//! Warden core - the join-event processing pipeline.
//!
//! Warden watches a multi-user-chat room and grants the `member`
//! affiliation to joining participants whose bare address is published
//! as an authoritative contact address for their own domain. The
//! pipeline:
//!
//! ```text
//! join notification -> RoomEventBridge (filter) -> JoinQueue (bounded FIFO)
//!     -> AffiliationWorker -> disco#info lookup -> address extraction
//!     -> trust decision -> (conditional) affiliation change
//! ```
//!
//! One producer (the room's event delivery path) and one consumer (the
//! worker loop) share nothing but the queue. Items are processed
//! strictly in arrival order, one at a time; every per-item failure is
//! logged and contained so the worker outlives bad lookups, unparsable
//! contact entries and rejected affiliation changes.
//!
//! The underlying protocol session is not implemented here: the
//! pipeline is generic over the [`client::RoomClient`],
//! [`client::DiscoveryService`] and [`client::AffiliationAdmin`]
//! collaborator traits, which an embedder backs with a real XMPP client
//! (and tests back with in-memory doubles).

pub mod bridge;
pub mod client;
pub mod config;
pub mod decision;
pub mod error;
pub mod extract;
pub mod queue;
pub mod run;
pub mod worker;

pub use bridge::RoomEventBridge;
pub use client::{AffiliationAdmin, DiscoveryService, RoomClient, RoomHandle};
pub use config::BotConfig;
pub use error::{Error, Result};
pub use queue::{join_queue, OverflowPolicy, DEFAULT_QUEUE_CAPACITY};
pub use run::run_in_room;
pub use worker::AffiliationWorker;
