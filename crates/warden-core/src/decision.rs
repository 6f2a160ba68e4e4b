//! The trust decision.

use warden_xmpp::Jid;

/// Whether `candidate` is one of the addresses a domain published as
/// its authoritative contacts.
///
/// Exact full-JID equality only: no domain-only matching, no wildcards,
/// no case folding beyond what [`Jid`] itself canonicalizes.
pub fn is_published_contact(candidate: &Jid, contacts: &[Jid]) -> bool {
    contacts.iter().any(|contact| contact == candidate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jid(s: &str) -> Jid {
        s.parse().unwrap()
    }

    #[test]
    fn published_contact_is_granted() {
        let contacts = vec![jid("admin@example.com"), jid("abuse@example.com")];
        assert!(is_published_contact(&jid("admin@example.com"), &contacts));
    }

    #[test]
    fn outsider_is_denied() {
        let contacts = vec![jid("admin@example.com")];
        assert!(!is_published_contact(&jid("random@evil.example"), &contacts));
    }

    #[test]
    fn same_domain_is_not_enough() {
        let contacts = vec![jid("admin@example.com")];
        assert!(!is_published_contact(&jid("guest@example.com"), &contacts));
    }

    #[test]
    fn empty_contact_set_denies_everyone() {
        assert!(!is_published_contact(&jid("admin@example.com"), &[]));
    }
}
