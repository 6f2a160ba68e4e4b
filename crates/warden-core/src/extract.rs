//! Contact-address extraction from discovery results.
//!
//! A domain that wants its operators reachable publishes a server-info
//! form (XEP-0157) in its disco#info answer. Of that form, only the
//! three address fields for administrative roles are examined; values
//! must be `xmpp:` URIs whose path is a valid JID. Anything else is
//! skipped with a debug log, never an error.

use tracing::debug;
use warden_xmpp::{parse_xmpp_uri, DataForm, DiscoInfo, Jid, SERVER_INFO_FORM_TYPE};

/// The contact-role fields worth examining.
pub const RELEVANT_FIELDS: [&str; 3] =
    ["abuse-addresses", "admin-addresses", "security-addresses"];

/// Find the server-info contact form in a disco result.
///
/// If a domain publishes several forms of the contact type (unusual but
/// not forbidden), the first one in the order the domain listed them
/// wins.
pub fn contact_form(info: &DiscoInfo) -> Option<&DataForm> {
    info.extensions
        .iter()
        .find(|ext| ext.form_type() == Some(SERVER_INFO_FORM_TYPE))
}

/// Extract the valid contact addresses from a server-info form.
///
/// Lazy and restartable: each call walks the form afresh, yielding
/// addresses in field order then value order. Duplicates are preserved;
/// the decision step is a membership test, so they cost nothing.
pub fn relevant_addresses(form: &DataForm) -> impl Iterator<Item = Jid> + '_ {
    form.fields
        .iter()
        .filter(|field| RELEVANT_FIELDS.contains(&field.var.as_str()))
        .flat_map(|field| field.values.iter())
        .filter_map(|value| {
            if value.trim().is_empty() {
                return None;
            }
            match parse_xmpp_uri(value) {
                Ok(jid) => Some(jid),
                Err(err) => {
                    debug!(%value, error = %err, "ignoring unusable contact entry");
                    None
                }
            }
        })
}
