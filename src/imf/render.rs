use crate::mime::charset::EmailCharset;
use crate::mime::encoded_word::PhraseEncoder;

/// Name-addr
///
/// ```abnf
///    mailbox         =   name-addr / addr-spec
///    name-addr       =   [display-name] angle-addr
/// ```
///
/// Entries with a display name render as `name-addr`, the others as a bare
/// `addr-spec`. Only the first entry is encoded knowing that the field name
/// (`field_name: `) shares its line.
pub fn render_mailboxes<'a, I>(
    entries: I,
    field_name: &str,
    charset: &EmailCharset,
    encoder: &dyn PhraseEncoder,
) -> Vec<String>
where
    I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
{
    let prefix = field_name.len() + ": ".len();

    entries
        .into_iter()
        .enumerate()
        .map(|(i, (address, name))| match name {
            None => address.to_string(),
            Some(name) => {
                let offset = if i == 0 { prefix } else { 0 };
                format!(
                    "{} <{}>",
                    encoder.encode_phrase(name, charset, offset),
                    address
                )
            }
        })
        .collect()
}

/// Mailbox list
///
/// ```abnf
///    mailbox-list    =   (mailbox *("," mailbox)) / obs-mbox-list
/// ```
pub fn join_mailboxes(mailboxes: &[String]) -> String {
    mailboxes.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mime::encoded_word::MimePhraseEncoder;
    use pretty_assertions::assert_eq;

    /// Echoes the offset it was called with.
    struct Offsets;
    impl PhraseEncoder for Offsets {
        fn encode_phrase(&self, phrase: &str, _: &EmailCharset, line_offset: usize) -> String {
            format!("{phrase}@{line_offset}")
        }
    }

    #[test]
    fn test_render_mailboxes() {
        let rendered = render_mailboxes(
            [("a@x.tld", Some("Al A")), ("b@x.tld", None)],
            "From",
            &EmailCharset::UTF_8,
            &MimePhraseEncoder::default(),
        );
        assert_eq!(rendered, vec!["Al A <a@x.tld>", "b@x.tld"]);
        assert_eq!(join_mailboxes(&rendered), "Al A <a@x.tld>, b@x.tld");
    }

    #[test]
    fn test_only_first_entry_is_offset() {
        let rendered = render_mailboxes(
            [
                ("a@x.tld", Some("A")),
                ("b@x.tld", Some("B")),
                ("c@x.tld", Some("C")),
            ],
            "Reply-To",
            &EmailCharset::UTF_8,
            &Offsets,
        );
        assert_eq!(
            rendered,
            vec!["A@10 <a@x.tld>", "B@0 <b@x.tld>", "C@0 <c@x.tld>"]
        );
    }

    #[test]
    fn test_unnamed_first_entry_takes_the_offset() {
        // the offset goes to the first rendered mailbox, named or not
        let rendered = render_mailboxes(
            [("a@x.tld", None), ("b@x.tld", Some("B"))],
            "To",
            &EmailCharset::UTF_8,
            &Offsets,
        );
        assert_eq!(rendered, vec!["a@x.tld", "B@0 <b@x.tld>"]);
    }

    #[test]
    fn test_empty() {
        let rendered = render_mailboxes(
            std::iter::empty(),
            "Cc",
            &EmailCharset::UTF_8,
            &MimePhraseEncoder::default(),
        );
        assert!(rendered.is_empty());
        assert_eq!(join_mailboxes(&rendered), "");
    }
}
