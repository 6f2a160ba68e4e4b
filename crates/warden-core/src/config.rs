//! Bot configuration.

use std::time::Duration;

use crate::error::ConfigError;
use crate::queue::{OverflowPolicy, DEFAULT_QUEUE_CAPACITY};
use warden_xmpp::{Affiliation, Jid};

/// The reason string attached to automated affiliation grants.
pub const DEFAULT_GRANT_REASON: &str = "is relevant contact for an XMPP domain";

/// Configuration for one room session.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Address of the room to watch.
    pub room: Jid,

    /// Nickname to join under.
    pub nickname: String,

    /// Capacity of the join queue.
    pub queue_capacity: usize,

    /// What the producer does when the join queue is full.
    pub overflow: OverflowPolicy,

    /// Affiliation granted to verified domain contacts.
    pub granted_affiliation: Affiliation,

    /// Reason attached to the affiliation change.
    pub grant_reason: String,
}

impl BotConfig {
    /// Config with defaults for everything but room and nickname.
    pub fn new(room: Jid, nickname: impl Into<String>) -> Self {
        Self {
            room,
            nickname: nickname.into(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            overflow: OverflowPolicy::default(),
            granted_affiliation: Affiliation::Member,
            grant_reason: DEFAULT_GRANT_REASON.to_string(),
        }
    }

    /// Read configuration from `WARDEN_*` environment variables.
    ///
    /// `WARDEN_ROOM` and `WARDEN_NICKNAME` are required. Optional:
    /// `WARDEN_QUEUE_CAPACITY`, `WARDEN_ENQUEUE_TIMEOUT_MS` (switches
    /// the overflow policy to bounded backpressure), `WARDEN_GRANT_REASON`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let room = parse_var("WARDEN_ROOM", require_var("WARDEN_ROOM")?)?;
        let nickname = require_var("WARDEN_NICKNAME")?;
        let mut config = Self::new(room, nickname);

        if let Some(value) = optional_var("WARDEN_QUEUE_CAPACITY") {
            config.queue_capacity = parse_var("WARDEN_QUEUE_CAPACITY", value)?;
        }
        if let Some(value) = optional_var("WARDEN_ENQUEUE_TIMEOUT_MS") {
            let millis: u64 = parse_var("WARDEN_ENQUEUE_TIMEOUT_MS", value)?;
            config.overflow = OverflowPolicy::Backpressure {
                timeout: Duration::from_millis(millis),
            };
        }
        if let Some(value) = optional_var("WARDEN_GRANT_REASON") {
            config.grant_reason = value;
        }
        Ok(config)
    }
}

fn require_var(var: &'static str) -> Result<String, ConfigError> {
    optional_var(var).ok_or(ConfigError::MissingVar(var))
}

fn optional_var(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

fn parse_var<T>(var: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err: T::Err| ConfigError::InvalidVar {
        var,
        value,
        message: err.to_string(),
    })
}
