//! In-memory collaborator doubles for pipeline tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;
use warden_core::client::{
    AdminError, AffiliationAdmin, DiscoveryService, LookupError, RoomClient, RoomError, RoomHandle,
};
use warden_xmpp::{Affiliation, DiscoInfo, Jid, Member};

pub fn jid(s: &str) -> Jid {
    s.parse().unwrap()
}

/// Discovery double serving canned per-domain results and recording
/// the order of queries.
#[derive(Clone, Default)]
pub struct StaticDisco {
    results: Arc<Mutex<HashMap<Jid, Result<DiscoInfo, LookupError>>>>,
    queries: Arc<Mutex<Vec<Jid>>>,
}

impl StaticDisco {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `info` for queries against `domain`.
    pub fn publish(self, domain: &str, info: DiscoInfo) -> Self {
        self.results.lock().unwrap().insert(jid(domain), Ok(info));
        self
    }

    /// Fail queries against `domain`.
    pub fn failing(self, domain: &str) -> Self {
        self.results
            .lock()
            .unwrap()
            .insert(jid(domain), Err(LookupError::Unreachable(domain.to_string())));
        self
    }

    /// Domains queried so far, in order.
    pub fn queries(&self) -> Vec<Jid> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl DiscoveryService for StaticDisco {
    async fn query_info(
        &self,
        target: &Jid,
        require_fresh: bool,
    ) -> Result<DiscoInfo, LookupError> {
        assert!(require_fresh, "trust lookups must bypass caches");
        self.queries.lock().unwrap().push(target.clone());
        match self.results.lock().unwrap().get(target) {
            Some(Ok(info)) => Ok(info.clone()),
            Some(Err(err)) => Err(err.clone()),
            None => Err(LookupError::Unreachable(target.to_string())),
        }
    }
}

/// One recorded affiliation change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grant {
    pub room: Jid,
    pub target: Jid,
    pub affiliation: Affiliation,
    pub reason: String,
}

/// Admin double recording every submission; optionally rejects them all.
#[derive(Clone, Default)]
pub struct RecordingAdmin {
    grants: Arc<Mutex<Vec<Grant>>>,
    reject: bool,
}

impl RecordingAdmin {
    pub fn new() -> Self {
        Self::default()
    }

    /// An admin whose submissions all fail.
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    /// Submissions attempted so far, in order.
    pub fn grants(&self) -> Vec<Grant> {
        self.grants.lock().unwrap().clone()
    }
}

#[async_trait]
impl AffiliationAdmin for RecordingAdmin {
    async fn set_affiliation(
        &self,
        room: &Jid,
        target: &Jid,
        affiliation: Affiliation,
        reason: &str,
    ) -> Result<(), AdminError> {
        self.grants.lock().unwrap().push(Grant {
            room: room.clone(),
            target: target.clone(),
            affiliation,
            reason: reason.to_string(),
        });
        if self.reject {
            return Err(AdminError::Denied("double says no".to_string()));
        }
        Ok(())
    }
}

/// Room double: entry is confirmed immediately, then the scripted
/// members are delivered as join notifications.
///
/// By default the stream closes after the script (the session "drops"),
/// which lets tests run the pipeline to completion deterministically.
/// With [`ScriptedRoom::hold_open`] the session stays up afterwards.
#[derive(Default)]
pub struct ScriptedRoom {
    members: Mutex<Vec<Member>>,
    hold_open: bool,
    keepalive: Mutex<Option<mpsc::Sender<Member>>>,
}

impl ScriptedRoom {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: Mutex::new(members),
            ..Self::default()
        }
    }

    pub fn hold_open(members: Vec<Member>) -> Self {
        Self {
            members: Mutex::new(members),
            hold_open: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl RoomClient for ScriptedRoom {
    async fn join(&self, room: &Jid, _nickname: &str) -> Result<RoomHandle, RoomError> {
        let members = std::mem::take(&mut *self.members.lock().unwrap());
        let (tx, rx) = mpsc::channel(members.len().max(1));
        if self.hold_open {
            *self.keepalive.lock().unwrap() = Some(tx.clone());
        }
        tokio::spawn(async move {
            for member in members {
                if tx.send(member).await.is_err() {
                    break;
                }
            }
        });
        Ok(RoomHandle::new(room.clone(), rx))
    }
}
