//! Display-name encoding: bare phrase, quoted-string or RFC 2047 encoded words.

use base64::{engine::general_purpose, Engine as _};
use encoding_rs::Encoding;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while, take_while1},
    character::complete::one_of,
    character::{is_alphanumeric, is_hex_digit},
    combinator::{map, map_res, verify},
    multi::{many0, many1},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::imf::grammar::{Grammar, Production, Rfc2822Grammar};
use crate::mime::charset::EmailCharset;
use crate::text::ascii;
use crate::text::quoted::quote;
use crate::text::words::is_text;

/// Turns a raw display name into something that can sit in front of an
/// `angle-addr`.
pub trait PhraseEncoder {
    /// `line_offset` is the number of columns already taken on the line the
    /// phrase starts on (the `Name: ` prefix for the first mailbox of a field).
    fn encode_phrase(&self, phrase: &str, charset: &EmailCharset, line_offset: usize) -> String;
}

/// Transfer encoding used inside an encoded word.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Scheme {
    /// RFC 2047 section 4.2, quoted-printable like
    #[default]
    Q,
    /// RFC 2047 section 4.1, base64
    B,
}

impl Scheme {
    pub fn letter(&self) -> char {
        match self {
            Scheme::Q => 'Q',
            Scheme::B => 'B',
        }
    }

    fn encoded_len(&self, raw: &[u8]) -> usize {
        match self {
            Scheme::Q => raw.iter().map(|&c| q_encoded_len(c)).sum(),
            Scheme::B => raw.len().div_ceil(3) * 4,
        }
    }

    fn encode(&self, raw: &[u8]) -> String {
        match self {
            Scheme::Q => raw.iter().fold(String::with_capacity(raw.len()), |mut acc, &c| {
                push_q_byte(&mut acc, c);
                acc
            }),
            Scheme::B => general_purpose::STANDARD.encode(raw),
        }
    }
}

/// RFC 2047 section 5 (3): characters that may appear unencoded in a Q
/// encoded word that replaces a `phrase`.
fn is_q_phrase_safe(c: u8) -> bool {
    is_alphanumeric(c)
        || c == ascii::EXCLAMATION
        || c == ascii::ASTERISK
        || c == ascii::PLUS
        || c == ascii::MINUS
        || c == ascii::SLASH
}

fn q_encoded_len(c: u8) -> usize {
    if is_q_phrase_safe(c) || c == ascii::SP {
        1
    } else {
        3
    }
}

fn push_q_byte(out: &mut String, c: u8) {
    if is_q_phrase_safe(c) {
        out.push(c as char);
    } else if c == ascii::SP {
        out.push('_');
    } else {
        out.push_str(&format!("={c:02X}"));
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    pub scheme: Scheme,
    /// Upper bound on the length of a single encoded word, delimiters
    /// included. RFC 2047 sets it to 75.
    pub max_word_len: usize,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::Q,
            max_word_len: 75,
        }
    }
}

/// Default `PhraseEncoder`.
///
/// - text that already is an RFC 2822 `phrase` is kept verbatim;
/// - other printable US-ASCII text is turned into a quoted-string;
/// - anything else becomes a run of encoded words separated by a single space,
///   each no longer than `max_word_len`, the first one shortened by the line
///   offset. A character is never split across two words.
///
/// Text that the requested charset cannot represent is encoded as UTF-8 and
/// labelled accordingly.
#[derive(Debug, Default, Clone)]
pub struct MimePhraseEncoder {
    config: EncoderConfig,
}

impl MimePhraseEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    fn encode_words(&self, text: &str, charset: &EmailCharset, line_offset: usize) -> String {
        let charset = match charset.encode(text) {
            Some(_) => charset.clone(),
            None => EmailCharset::UTF_8,
        };
        let scheme = self.config.scheme;
        let label = charset.as_str();
        // =?label?X??=
        let overhead = label.len() + 7;
        let rest_budget = self.config.max_word_len.saturating_sub(overhead);
        let mut budget = rest_budget.saturating_sub(line_offset);

        let mut chunks: Vec<Vec<u8>> = vec![];
        let mut current: Vec<u8> = vec![];
        let mut buf = [0u8; 4];
        for c in text.chars() {
            let piece = charset
                .encode(c.encode_utf8(&mut buf))
                .map(|b| b.into_owned())
                .unwrap_or_default();
            let mut candidate = current.clone();
            candidate.extend_from_slice(&piece);
            if !current.is_empty() && scheme.encoded_len(&candidate) > budget {
                chunks.push(std::mem::take(&mut current));
                budget = rest_budget;
                current = piece;
            } else {
                current = candidate;
            }
        }
        if !current.is_empty() {
            chunks.push(current);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(charset = label, words = chunks.len(), "encoded phrase");
        chunks
            .iter()
            .map(|raw| format!("=?{}?{}?{}?=", label, scheme.letter(), scheme.encode(raw)))
            .collect::<Vec<String>>()
            .join(" ")
    }
}

impl PhraseEncoder for MimePhraseEncoder {
    fn encode_phrase(&self, phrase: &str, charset: &EmailCharset, line_offset: usize) -> String {
        if !phrase.bytes().all(is_text) {
            self.encode_words(phrase, charset, line_offset)
        } else if Rfc2822Grammar.matches(Production::Phrase, phrase.as_bytes()) {
            phrase.to_string()
        } else {
            quote(phrase)
        }
    }
}

enum Token<'a> {
    Encoded(String),
    Space(&'a [u8]),
    Text(&'a [u8]),
}

/// Decodes the encoded words found in `input`, dropping the whitespace that
/// separates two adjacent encoded words (RFC 2047 section 6.2). Everything
/// else is kept as-is.
pub fn decode_phrase(input: &str) -> String {
    let tokens = match many0(alt((
        map(encoded_word, Token::Encoded),
        map(take_while1(is_wsp), Token::Space),
        map(take_while1(|c: u8| !is_wsp(c)), Token::Text),
    )))(input.as_bytes())
    {
        Ok((_, tokens)) => tokens,
        Err(_) => return input.to_string(),
    };

    let mut out = String::with_capacity(input.len());
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Encoded(s) => out.push_str(s),
            Token::Space(s) => {
                let between_words = matches!(tokens.get(i.wrapping_sub(1)), Some(Token::Encoded(_)))
                    && matches!(tokens.get(i + 1), Some(Token::Encoded(_)));
                if !between_words {
                    out.push_str(&String::from_utf8_lossy(s));
                }
            }
            Token::Text(s) => out.push_str(&String::from_utf8_lossy(s)),
        }
    }
    out
}

fn is_wsp(c: u8) -> bool {
    c == ascii::SP || c == ascii::HT
}

/// ```abnf
/// encoded-word = "=?" charset "?" encoding "?" encoded-text "?="
/// ```
fn encoded_word(input: &[u8]) -> IResult<&[u8], String> {
    let (rest, (_, charset, _, bytes, _)) = tuple((
        tag("=?"),
        take_while1(is_charset_char),
        tag("?"),
        alt((
            preceded(tuple((one_of("Qq"), tag("?"))), ptext),
            preceded(tuple((one_of("Bb"), tag("?"))), btext),
        )),
        tag("?="),
    ))(input)?;

    let enc = Encoding::for_label(charset).unwrap_or(encoding_rs::WINDOWS_1252);
    Ok((rest, enc.decode_without_bom_handling(&bytes).0.into_owned()))
}

fn is_charset_char(c: u8) -> bool {
    c > ascii::SP && c < ascii::DEL && c != ascii::QUESTION
}

fn ptext(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    map(
        many0(alt((
            map(take_while1(is_safe_char2), |b: &[u8]| b.to_vec()),
            map(tag("_"), |_| vec![ascii::SP]),
            many1(hex_octet),
        ))),
        |chunks| chunks.concat(),
    )(input)
}

/// RFC2047 section 4.2
/// 8-bit values which correspond to printable ASCII characters other
/// than "=", "?", and "_" (underscore), MAY be represented as those
/// characters.
fn is_safe_char2(c: u8) -> bool {
    c > ascii::SP && c < ascii::DEL && c != ascii::UNDERSCORE && c != ascii::QUESTION && c != ascii::EQ
}

fn hex_octet(input: &[u8]) -> IResult<&[u8], u8> {
    map_res(
        preceded(tag("="), verify(take(2usize), |h: &[u8]| h.iter().all(|c| is_hex_digit(*c)))),
        |h: &[u8]| u8::from_str_radix(&String::from_utf8_lossy(h), 16),
    )(input)
}

fn btext(input: &[u8]) -> IResult<&[u8], Vec<u8>> {
    map_res(
        terminated(take_while(is_bchar), take_while(|c: u8| c == ascii::EQ)),
        |b: &[u8]| general_purpose::STANDARD_NO_PAD.decode(b),
    )(input)
}

fn is_bchar(c: u8) -> bool {
    is_alphanumeric(c) || c == ascii::PLUS || c == ascii::SLASH
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encode(phrase: &str) -> String {
        MimePhraseEncoder::default().encode_phrase(phrase, &EmailCharset::UTF_8, 0)
    }

    #[test]
    fn test_phrase_is_kept() {
        assert_eq!(encode("Al A"), "Al A");
        assert_eq!(encode("Who?"), "Who?");
        assert_eq!(encode(r#""Already Quoted""#), r#""Already Quoted""#);
    }

    #[test]
    fn test_specials_are_quoted() {
        assert_eq!(encode("Smith, John"), r#""Smith, John""#);
        assert_eq!(encode("J. Doe"), r#""J. Doe""#);
        assert_eq!(encode(r#"Giant; "Big" Box"#), r#""Giant; \"Big\" Box""#);
        assert_eq!(encode(""), r#""""#);
    }

    #[test]
    fn test_non_ascii_is_encoded() {
        assert_eq!(encode("John Smîth"), "=?UTF-8?Q?John_Sm=C3=AEth?=");
        assert_eq!(encode("Jérôme"), "=?UTF-8?Q?J=C3=A9r=C3=B4me?=");
        assert_eq!(encode("line\r\nbreak"), "=?UTF-8?Q?line=0D=0Abreak?=");
    }

    #[test]
    fn test_folded_phrase_is_encoded() {
        // a valid folded phrase still carries CRLF, which must not reach the body
        assert_eq!(encode("Al\r\n A"), "=?UTF-8?Q?Al=0D=0A_A?=");
        assert_eq!(decode_phrase(&encode("Al\r\n A")), "Al\r\n A");
    }

    #[test]
    fn test_declared_charset() {
        let enc = MimePhraseEncoder::default();
        assert_eq!(
            enc.encode_phrase("Accusé de réception", &EmailCharset::ISO_8859_1, 0),
            "=?ISO-8859-1?Q?Accus=E9_de_r=E9ception?="
        );
        // not representable in latin1: falls back to UTF-8
        assert_eq!(
            enc.encode_phrase("Łukasz", &EmailCharset::ISO_8859_1, 0),
            "=?UTF-8?Q?=C5=81ukasz?="
        );
    }

    #[test]
    fn test_base64() {
        let enc = MimePhraseEncoder::new(EncoderConfig {
            scheme: Scheme::B,
            ..Default::default()
        });
        assert_eq!(
            enc.encode_phrase("Jérôme", &EmailCharset::UTF_8, 0),
            "=?UTF-8?B?SsOpcsO0bWU=?="
        );
    }

    #[test]
    fn test_word_length_is_bounded() {
        let name = "é".repeat(40);
        let encoded = encode(&name);
        let words: Vec<&str> = encoded.split(' ').collect();
        assert!(words.len() > 1);
        for w in &words {
            assert!(w.len() <= 75, "{w}");
            assert!(w.starts_with("=?UTF-8?Q?") && w.ends_with("?="));
        }
        assert_eq!(decode_phrase(&encoded), name);
    }

    #[test]
    fn test_line_offset_shortens_first_word() {
        let enc = MimePhraseEncoder::default();
        let name = "é".repeat(40);
        let fresh = enc.encode_phrase(&name, &EmailCharset::UTF_8, 0);
        let shifted = enc.encode_phrase(&name, &EmailCharset::UTF_8, 30);

        let first_fresh = fresh.split(' ').next().unwrap();
        let first_shifted = shifted.split(' ').next().unwrap();
        assert!(first_shifted.len() + 30 <= 75, "{first_shifted}");
        assert!(first_shifted.len() < first_fresh.len());
        assert_eq!(decode_phrase(&shifted), name);
        for w in shifted.split(' ').skip(1) {
            assert!(w.len() <= 75);
        }
    }

    #[test]
    fn test_decode_phrase() {
        assert_eq!(
            decode_phrase("=?iso8859-1?Q?Accus=E9_de_r=E9ception_(affich=E9)?="),
            "Accusé de réception (affiché)"
        );
        assert_eq!(
            decode_phrase("=?ISO-8859-1?B?SWYgeW91IGNhbiByZWFkIHRoaXMgeW8=?="),
            "If you can read this yo"
        );
        assert_eq!(
            decode_phrase("=?UTF-8?Q?John?= =?UTF-8?Q?_Sm=C3=AEth?= and co"),
            "John Smîth and co"
        );
        assert_eq!(decode_phrase("plain text"), "plain text");
    }

    #[test]
    fn test_decode_rejects_signed_hex() {
        assert_eq!(decode_phrase("=?UTF-8?Q?a=+1?="), "=?UTF-8?Q?a=+1?=");
        assert_eq!(decode_phrase("=?UTF-8?Q?a=2B1?="), "a+1");
    }

    #[test]
    fn test_round_trip() {
        for name in ["Zoë Ångström", "山田 太郎", "Ελένη", "tab\there é"] {
            for scheme in [Scheme::Q, Scheme::B] {
                let enc = MimePhraseEncoder::new(EncoderConfig {
                    scheme,
                    ..Default::default()
                });
                let encoded = enc.encode_phrase(name, &EmailCharset::UTF_8, 10);
                assert_eq!(decode_phrase(&encoded), name, "{encoded}");
            }
        }
    }
}
