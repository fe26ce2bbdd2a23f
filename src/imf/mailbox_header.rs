use std::fmt;

use crate::error::InvalidAddressError;
use crate::header::{FieldType, Header, StructuredHeader};
use crate::imf::grammar::Grammar;
use crate::imf::mailbox_set::{normalize, AddressInput, MailboxSet};
use crate::imf::render::{join_mailboxes, render_mailboxes};
use crate::mime::charset::EmailCharset;
use crate::mime::encoded_word::PhraseEncoder;

/// A header field carrying a list of mailboxes, such as `From` or `Cc`.
///
/// ```
/// use eml_mailbox_header::imf::mailbox_header::MailboxHeader;
///
/// let mut from = MailboxHeader::with_addresses(
///     "From",
///     [("a@x.tld", "Al A")],
/// ).unwrap();
/// assert_eq!(from.field_body(), "Al A <a@x.tld>");
/// ```
///
/// The rendered body is cached until the mailboxes, the charset or the
/// encoder change.
pub struct MailboxHeader {
    base: StructuredHeader,
    mailboxes: MailboxSet,
}

impl MailboxHeader {
    /// An empty header named `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: StructuredHeader::new(name),
            mailboxes: MailboxSet::new(),
        }
    }

    /// A header named `name` holding `addresses`.
    pub fn with_addresses(
        name: impl Into<String>,
        addresses: impl Into<AddressInput>,
    ) -> Result<Self, InvalidAddressError> {
        let mut header = Self::new(name);
        header.set_name_addresses(addresses)?;
        Ok(header)
    }

    pub fn with_charset(mut self, charset: EmailCharset) -> Self {
        self.set_charset(charset);
        self
    }

    pub fn with_encoder(mut self, encoder: Box<dyn PhraseEncoder>) -> Self {
        self.set_encoder(encoder);
        self
    }

    /// Replaces every mailbox with `addresses`.
    ///
    /// On error the header is left untouched.
    pub fn set_name_addresses(
        &mut self,
        addresses: impl Into<AddressInput>,
    ) -> Result<(), InvalidAddressError> {
        let mailboxes = normalize(self.base.grammar(), addresses.into())?;
        self.replace(mailboxes);
        Ok(())
    }

    /// Replaces every mailbox with the given addresses, none of them named.
    pub fn set_addresses<I, S>(&mut self, addresses: I) -> Result<(), InvalidAddressError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let input: AddressInput = addresses.into_iter().map(Into::<String>::into).collect();
        self.set_name_addresses(input.without_names())
    }

    /// Mailboxes in insertion order.
    pub fn name_addresses(&self) -> &MailboxSet {
        &self.mailboxes
    }

    pub fn addresses(&self) -> Vec<&str> {
        self.mailboxes.keys().map(String::as_str).collect()
    }

    /// One rendered `mailbox` per entry, not joined.
    pub fn name_address_strings(&self) -> Vec<String> {
        render_mailboxes(
            self.mailboxes
                .iter()
                .map(|(address, name)| (address.as_str(), name.as_deref())),
            self.base.name(),
            self.base.charset(),
            self.base.encoder(),
        )
    }

    /// Removes the given addresses; unknown ones are ignored.
    pub fn remove_addresses<I, S>(&mut self, addresses: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for address in addresses {
            self.mailboxes.shift_remove(address.as_ref());
        }
        self.base.invalidate();
    }

    /// The unfolded field body: every mailbox joined with `", "`.
    pub fn field_body(&mut self) -> &str {
        let Self { base, mailboxes } = self;
        base.cached_or_else(|base| {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                field = base.name(),
                mailboxes = mailboxes.len(),
                "rendering field body"
            );
            join_mailboxes(&render_mailboxes(
                mailboxes
                    .iter()
                    .map(|(address, name)| (address.as_str(), name.as_deref())),
                base.name(),
                base.charset(),
                base.encoder(),
            ))
        })
    }

    pub fn field_name(&self) -> &str {
        self.base.name()
    }

    pub fn charset(&self) -> &EmailCharset {
        self.base.charset()
    }

    pub fn set_charset(&mut self, charset: EmailCharset) {
        self.base.set_charset(charset)
    }

    pub fn encoder(&self) -> &dyn PhraseEncoder {
        self.base.encoder()
    }

    pub fn set_encoder(&mut self, encoder: Box<dyn PhraseEncoder>) {
        self.base.set_encoder(encoder)
    }

    /// Swaps the grammar used to validate addresses from now on. Mailboxes
    /// already stored are not checked again.
    pub fn set_grammar(&mut self, grammar: Box<dyn Grammar>) {
        self.base.set_grammar(grammar)
    }

    fn replace(&mut self, mailboxes: MailboxSet) {
        self.mailboxes = mailboxes;
        self.base.invalidate();
    }
}

impl Header for MailboxHeader {
    fn field_name(&self) -> &str {
        MailboxHeader::field_name(self)
    }

    fn field_type(&self) -> FieldType {
        FieldType::Mailbox
    }

    fn field_body(&mut self) -> &str {
        MailboxHeader::field_body(self)
    }
}

impl fmt::Debug for MailboxHeader {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("MailboxHeader")
            .field("base", &self.base)
            .field("mailboxes", &self.mailboxes)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imf::mailbox_set::NameAddress;
    use pretty_assertions::assert_eq;

    fn pairs(h: &MailboxHeader) -> Vec<(&str, Option<&str>)> {
        h.name_addresses()
            .iter()
            .map(|(a, n)| (a.as_str(), n.as_deref()))
            .collect()
    }

    #[test]
    fn test_construct_empty() {
        let mut h = MailboxHeader::new("To");
        assert_eq!(h.field_name(), "To");
        assert!(h.addresses().is_empty());
        assert!(h.name_address_strings().is_empty());
        assert_eq!(h.field_body(), "");
        assert_eq!(Header::field_type(&h), FieldType::Mailbox);
    }

    #[test]
    fn test_construct_with_addresses() {
        let mut h = MailboxHeader::with_addresses(
            "From",
            vec![
                NameAddress::named("a@x.tld", "Al A"),
                NameAddress::from("b@x.tld"),
            ],
        )
        .unwrap();
        assert_eq!(h.name_address_strings(), vec!["Al A <a@x.tld>", "b@x.tld"]);
        assert_eq!(h.field_body(), "Al A <a@x.tld>, b@x.tld");
    }

    #[test]
    fn test_construct_rejects_invalid() {
        assert_eq!(
            MailboxHeader::with_addresses("From", "nope").unwrap_err(),
            InvalidAddressError::new("nope")
        );
    }

    #[test]
    fn test_set_addresses_drops_names() {
        let mut h = MailboxHeader::with_addresses("Cc", [("a@x.tld", "A")]).unwrap();
        h.set_addresses(["a@x.tld", "b@x.tld"]).unwrap();
        assert_eq!(pairs(&h), vec![("a@x.tld", None), ("b@x.tld", None)]);
        assert_eq!(h.field_body(), "a@x.tld, b@x.tld");
    }

    #[test]
    fn test_failed_set_keeps_state_and_cache() {
        let mut h = MailboxHeader::with_addresses("To", [("a@x.tld", "One")]).unwrap();
        assert_eq!(h.field_body(), "One <a@x.tld>");

        let err = h.set_addresses(vec!["b@x.tld", "not valid"]).unwrap_err();
        assert_eq!(err.address, "not valid");
        assert_eq!(pairs(&h), vec![("a@x.tld", Some("One"))]);
        assert_eq!(h.base.cached_value(), Some("One <a@x.tld>"));
    }

    #[test]
    fn test_remove_invalidates_unconditionally() {
        let mut h = MailboxHeader::with_addresses("To", "a@x.tld").unwrap();
        h.field_body();
        assert!(h.base.cached_value().is_some());

        h.remove_addresses(["z@nowhere.tld"]);
        assert_eq!(h.base.cached_value(), None);
        assert_eq!(h.addresses(), vec!["a@x.tld"]);
        assert_eq!(h.field_body(), "a@x.tld");
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut h = MailboxHeader::new("Bcc");
        h.set_addresses(["c@x.tld", "a@x.tld", "b@x.tld"]).unwrap();
        h.remove_addresses(vec![String::from("a@x.tld")]);
        assert_eq!(h.addresses(), vec!["c@x.tld", "b@x.tld"]);
    }

    #[test]
    fn test_first_encoded_name_accounts_for_field_name() {
        let name = "é".repeat(12);
        let mut h = MailboxHeader::with_addresses(
            "X-A-Rather-Long-Field-Name",
            [("a@x.tld", name.as_str()), ("b@x.tld", name.as_str())],
        )
        .unwrap();
        let strings = h.name_address_strings();
        // the first name is split earlier than the second one
        assert_ne!(
            strings[0].trim_end_matches(" <a@x.tld>"),
            strings[1].trim_end_matches(" <b@x.tld>")
        );
        assert_eq!(h.field_body(), strings.join(", "));
    }

    #[test]
    fn test_charset_applies_to_names() {
        let mut h = MailboxHeader::with_addresses("From", [("a@x.tld", "Jérôme")])
            .unwrap()
            .with_charset(EmailCharset::ISO_8859_1);
        assert_eq!(h.field_body(), "=?ISO-8859-1?Q?J=E9r=F4me?= <a@x.tld>");

        h.set_charset(EmailCharset::UTF_8);
        assert_eq!(h.field_body(), "=?UTF-8?Q?J=C3=A9r=C3=B4me?= <a@x.tld>");
    }
}
