#![doc = include_str!("../README.md")]

pub mod error;
pub mod header;
pub mod imf;
pub mod mime;
pub mod text;

pub use error::InvalidAddressError;
pub use header::{FieldType, Header};
pub use imf::mailbox_header::MailboxHeader;
pub use imf::mailbox_set::{AddressInput, MailboxSet, NameAddress};
pub use mime::charset::EmailCharset;
pub use mime::encoded_word::{EncoderConfig, MimePhraseEncoder, PhraseEncoder, Scheme};

/// Builds a mailbox header named `name` from `addresses`.
pub fn mailbox_header(
    name: &str,
    addresses: impl Into<AddressInput>,
) -> Result<MailboxHeader, InvalidAddressError> {
    MailboxHeader::with_addresses(name, addresses)
}
