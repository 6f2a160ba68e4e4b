//! XMPP foundation types for Warden.
//!
//! This crate holds the pure data model the bot operates on: JIDs
//! (network addresses), `xmpp:` URI parsing, the service-discovery
//! result shape (disco info with data-form extensions, XEP-0030/0004),
//! and the multi-user-chat room concepts (affiliations and member
//! snapshots, XEP-0045).
//!
//! Everything here is synchronous and side-effect free; the async
//! pipeline lives in `warden-core`.

pub mod disco;
pub mod jid;
pub mod muc;
pub mod uri;

pub use disco::{DataForm, DiscoInfo, FormField, SERVER_INFO_FORM_TYPE};
pub use jid::{Jid, JidError};
pub use muc::{Affiliation, Member};
pub use uri::{parse_xmpp_uri, UriError};
