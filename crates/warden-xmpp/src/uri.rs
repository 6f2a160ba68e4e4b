//! `xmpp:` URI parsing (RFC 5122, the subset used in contact forms).
//!
//! Contact forms publish addresses as URIs like `xmpp:abuse@example.com`.
//! Only the scheme and path matter here: the scheme must be `xmpp`
//! (compared case-insensitively, as generic URI parsers normalize it),
//! and the path must parse as a JID. Query and fragment components are
//! ignored; an authority component (`xmpp://...`) addresses an account
//! rather than an entity and leaves the path, which is what gets parsed.

use crate::jid::{Jid, JidError};
use thiserror::Error;

/// Errors from `xmpp:` URI parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// The value has no `scheme:` prefix at all.
    #[error("not a URI: {0:?}")]
    NoScheme(String),

    /// The scheme is present but is not `xmpp`.
    #[error("unsupported URI scheme: {0:?}")]
    WrongScheme(String),

    /// The path component is not a valid JID.
    #[error("invalid address in URI: {0}")]
    BadAddress(#[from] JidError),
}

/// Parse an `xmpp:` URI into the JID it addresses.
pub fn parse_xmpp_uri(value: &str) -> Result<Jid, UriError> {
    let (scheme, rest) = value
        .split_once(':')
        .ok_or_else(|| UriError::NoScheme(value.to_string()))?;
    if scheme.is_empty() || !is_scheme(scheme) {
        return Err(UriError::NoScheme(value.to_string()));
    }
    if !scheme.eq_ignore_ascii_case("xmpp") {
        return Err(UriError::WrongScheme(scheme.to_string()));
    }

    // Drop fragment, then query.
    let rest = rest.split('#').next().unwrap_or("");
    let rest = rest.split('?').next().unwrap_or("");

    // An authority (`//user@host`) is not the addressed entity; the
    // path after it is. `xmpp://account@host` has an empty path and
    // therefore no address.
    let path = match rest.strip_prefix("//") {
        Some(after_authority) => after_authority
            .split_once('/')
            .map(|(_, path)| path)
            .unwrap_or(""),
        None => rest,
    };

    Ok(path.parse()?)
}

/// RFC 3986 scheme shape: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ).
fn is_scheme(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_uri() {
        let jid = parse_xmpp_uri("xmpp:admin@example.com").unwrap();
        assert_eq!(jid, "admin@example.com".parse().unwrap());
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(parse_xmpp_uri("XMPP:admin@example.com").is_ok());
    }

    #[test]
    fn rejects_plain_text() {
        assert!(matches!(
            parse_xmpp_uri("not a uri"),
            Err(UriError::NoScheme(_))
        ));
    }

    #[test]
    fn rejects_wrong_scheme() {
        assert!(matches!(
            parse_xmpp_uri("https://example.com/contact"),
            Err(UriError::WrongScheme(_))
        ));
        assert!(matches!(
            parse_xmpp_uri("mailto:admin@example.com"),
            Err(UriError::WrongScheme(_))
        ));
    }

    #[test]
    fn ignores_query_and_fragment() {
        let jid = parse_xmpp_uri("xmpp:admin@example.com?message;subject=hi").unwrap();
        assert_eq!(jid, "admin@example.com".parse().unwrap());
        let jid = parse_xmpp_uri("xmpp:admin@example.com#frag").unwrap();
        assert_eq!(jid, "admin@example.com".parse().unwrap());
    }

    #[test]
    fn authority_form_has_no_entity_path() {
        // xmpp://account@host addresses an account for login, not an
        // entity; with no path there is no address to extract.
        assert!(parse_xmpp_uri("xmpp://admin@example.com").is_err());
    }

    #[test]
    fn rejects_empty_path() {
        assert!(parse_xmpp_uri("xmpp:").is_err());
    }

    #[test]
    fn rejects_malformed_address() {
        assert!(matches!(
            parse_xmpp_uri("xmpp:@example.com"),
            Err(UriError::BadAddress(_))
        ));
    }
}
