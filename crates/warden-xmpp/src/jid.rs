//! JID (Jabber ID) parsing and manipulation.
//!
//! A JID is `[localpart@]domain[/resource]`. The bare form (no resource)
//! identifies an entity; the full form identifies one of its sessions.
//! Parsing follows the structural rules of RFC 7622 without the Unicode
//! preparation profiles: parts must be non-empty, at most 1023 bytes,
//! and free of the separator characters that would make the string
//! ambiguous.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum length of each JID part in bytes.
const MAX_PART_LEN: usize = 1023;

/// Errors from JID parsing or construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JidError {
    /// The domain part is missing or empty.
    #[error("empty domain in JID")]
    EmptyDomain,

    /// A localpart was given but is empty (`@domain`).
    #[error("empty localpart in JID")]
    EmptyLocalpart,

    /// A resource separator was given but the resource is empty (`domain/`).
    #[error("empty resource in JID")]
    EmptyResource,

    /// A part exceeds the 1023-byte limit.
    #[error("JID part too long: {0} bytes")]
    PartTooLong(usize),

    /// A part contains a character that is not allowed there.
    #[error("invalid character {1:?} in JID {0}")]
    InvalidCharacter(&'static str, char),
}

/// An XMPP address.
///
/// Equality is field-wise: two JIDs are equal iff localpart, domain and
/// resource all match. Domain comparison is done on the lowercased form
/// produced at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Jid {
    localpart: Option<String>,
    domain: String,
    resource: Option<String>,
}

impl Jid {
    /// Construct a JID from validated parts.
    pub fn new(
        localpart: Option<&str>,
        domain: &str,
        resource: Option<&str>,
    ) -> Result<Self, JidError> {
        if domain.is_empty() {
            return Err(JidError::EmptyDomain);
        }
        check_len(domain)?;
        if let Some(c) = domain.chars().find(|c| "@/ \t\n".contains(*c)) {
            return Err(JidError::InvalidCharacter("domain", c));
        }

        let localpart = match localpart {
            Some("") => return Err(JidError::EmptyLocalpart),
            Some(l) => {
                check_len(l)?;
                if let Some(c) = l.chars().find(|c| "\"&'/:<>@ \t\n".contains(*c)) {
                    return Err(JidError::InvalidCharacter("localpart", c));
                }
                Some(l.to_string())
            }
            None => None,
        };

        let resource = match resource {
            Some("") => return Err(JidError::EmptyResource),
            Some(r) => {
                check_len(r)?;
                Some(r.to_string())
            }
            None => None,
        };

        Ok(Self {
            localpart,
            domain: domain.to_ascii_lowercase(),
            resource,
        })
    }

    /// Construct a bare domain JID (no localpart, no resource).
    pub fn domain(domain: &str) -> Result<Self, JidError> {
        Self::new(None, domain, None)
    }

    /// The localpart, if any.
    pub fn localpart(&self) -> Option<&str> {
        self.localpart.as_deref()
    }

    /// The domain part.
    pub fn domainpart(&self) -> &str {
        &self.domain
    }

    /// The resource, if any.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Whether this JID has no resource.
    pub fn is_bare(&self) -> bool {
        self.resource.is_none()
    }

    /// The bare form: localpart and domain, resource stripped.
    pub fn to_bare(&self) -> Jid {
        Jid {
            localpart: self.localpart.clone(),
            domain: self.domain.clone(),
            resource: None,
        }
    }

    /// The domain identity: localpart and resource both stripped.
    ///
    /// This is the address a service-discovery query for the entity's
    /// home server is sent to.
    pub fn to_domain(&self) -> Jid {
        Jid {
            localpart: None,
            domain: self.domain.clone(),
            resource: None,
        }
    }
}

fn check_len(part: &str) -> Result<(), JidError> {
    if part.len() > MAX_PART_LEN {
        return Err(JidError::PartTooLong(part.len()));
    }
    Ok(())
}

impl std::str::FromStr for Jid {
    type Err = JidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Resource is everything after the first '/', localpart is
        // everything before the first '@' of the remainder.
        let (head, resource) = match s.split_once('/') {
            Some((head, resource)) => (head, Some(resource)),
            None => (s, None),
        };
        let (localpart, domain) = match head.split_once('@') {
            Some((localpart, domain)) => (Some(localpart), domain),
            None => (None, head),
        };
        Jid::new(localpart, domain, resource)
    }
}

impl std::fmt::Display for Jid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(localpart) = &self.localpart {
            write!(f, "{}@", localpart)?;
        }
        write!(f, "{}", self.domain)?;
        if let Some(resource) = &self.resource {
            write!(f, "/{}", resource)?;
        }
        Ok(())
    }
}
