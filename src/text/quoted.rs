use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_while1},
    combinator::{opt, recognize, verify},
    multi::many0,
    sequence::{pair, preceded, tuple},
    IResult,
};

use crate::text::ascii;
use crate::text::whitespace::{cfws, fws, is_obs_no_ws_ctl};
use crate::text::words::is_vchar;

/// Quoted pair
///
/// ```abnf
///    quoted-pair     =   ("\" (VCHAR / WSP)) / obs-qp
///    obs-qp          =   "\" (%d0 / obs-NO-WS-CTL / LF / CR)
/// ```
pub fn quoted_pair(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(preceded(
        tag(&[ascii::BACKSLASH]),
        verify(take(1usize), |b: &[u8]| is_quotable(b[0])),
    ))(input)
}

fn is_quotable(c: u8) -> bool {
    is_vchar(c)
        || c == ascii::SP
        || c == ascii::HT
        || c == ascii::NULL
        || c == ascii::CR
        || c == ascii::LF
        || is_obs_no_ws_ctl(c)
}

/// Allowed characters in quote
///
/// ```abnf
///   qtext           =   %d33 /             ; Printable US-ASCII
///                       %d35-91 /          ;  characters not including
///                       %d93-126 /         ;  "\" or the quote character
///                       obs-qtext
/// ```
fn is_restr_qtext(c: u8) -> bool {
    c == ascii::EXCLAMATION
        || (ascii::NUM..=ascii::LEFT_BRACKET).contains(&c)
        || (ascii::RIGHT_BRACKET..=ascii::TILDE).contains(&c)
}

fn is_qtext(c: u8) -> bool {
    is_restr_qtext(c) || is_obs_no_ws_ctl(c)
}

/// Quoted pair content
///
/// ```abnf
///   qcontent        =   qtext / quoted-pair
/// ```
fn qcontent(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((take_while1(is_qtext), quoted_pair))(input)
}

/// Quoted string, recognised verbatim
///
/// ```abnf
/// quoted-string   =   [CFWS]
///                     DQUOTE *([FWS] qcontent) [FWS] DQUOTE
///                     [CFWS]
/// ```
pub fn quoted_string(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(tuple((
        opt(cfws),
        tag(&[ascii::DQUOTE]),
        many0(pair(opt(fws), qcontent)),
        opt(fws),
        tag(&[ascii::DQUOTE]),
        opt(cfws),
    )))(input)
}

/// Wraps `text` in double quotes, escaping `\` and `"` with a backslash.
///
/// The caller is responsible for `text` only containing characters that may
/// appear in a quoted-string once escaped (see `words::is_text`).
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        if c == '\\' || c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}
