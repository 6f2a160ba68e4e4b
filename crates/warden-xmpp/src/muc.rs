//! Multi-user-chat room concepts (XEP-0045).

use crate::jid::Jid;
use serde::{Deserialize, Serialize};

/// A room-scoped trust level, assigned by the room server to a bare JID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affiliation {
    /// No standing in the room.
    None,
    /// Registered member.
    Member,
    /// Room administrator.
    Admin,
    /// Room owner.
    Owner,
    /// Banned.
    Outcast,
}

impl Affiliation {
    /// Wire name of the affiliation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Affiliation::None => "none",
            Affiliation::Member => "member",
            Affiliation::Admin => "admin",
            Affiliation::Owner => "owner",
            Affiliation::Outcast => "outcast",
        }
    }
}

impl std::fmt::Display for Affiliation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Affiliation {
    type Err = UnknownAffiliation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Affiliation::None),
            "member" => Ok(Affiliation::Member),
            "admin" => Ok(Affiliation::Admin),
            "owner" => Ok(Affiliation::Owner),
            "outcast" => Ok(Affiliation::Outcast),
            _ => Err(UnknownAffiliation(s.to_string())),
        }
    }
}

/// Error for unrecognized affiliation names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown affiliation: {0:?}")]
pub struct UnknownAffiliation(pub String);

/// Snapshot of a room occupant as seen at join time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Room-scoped display name.
    pub nickname: String,
    /// Stable bare address, as resolved by the room.
    pub bare: Jid,
    /// Affiliation the room currently assigns to that address.
    pub affiliation: Affiliation,
}

impl Member {
    /// Create a member snapshot.
    pub fn new(nickname: impl Into<String>, bare: Jid, affiliation: Affiliation) -> Self {
        Self {
            nickname: nickname.into(),
            bare,
            affiliation,
        }
    }
}
