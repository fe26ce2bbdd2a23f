use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    combinator::{opt, peek, recognize},
    multi::many0,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::text::ascii;
use crate::text::misc_token::word;
use crate::text::quoted::{quoted_pair, quoted_string};
use crate::text::whitespace::{cfws, fws, is_obs_no_ws_ctl};
use crate::text::words::{atom, dot_atom};

/// AddrSpec
///
/// ```abnf
///    addr-spec       =   local-part "@" domain
/// ```
pub fn addr_spec(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(tuple((local_part, tag(&[ascii::AT]), domain)))(input)
}

/// Local part
///
/// `dot-atom` is tried first; when it stops short of the `@` (for example on
/// `a..b`) the obsolete form gets its chance.
///
/// ```abnf
///    local-part      =   dot-atom / quoted-string / obs-local-part
/// ```
pub fn local_part(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        terminated(dot_atom, peek_at),
        terminated(quoted_string, peek_at),
        obs_local_part,
    ))(input)
}

fn peek_at(input: &[u8]) -> IResult<&[u8], &[u8]> {
    peek(tag(&[ascii::AT]))(input)
}

/// Obsolete local part
///
/// ```abnf
///    obs-local-part  =   word *("." word)
/// ```
fn obs_local_part(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(word, many0(preceded(tag(&[ascii::PERIOD]), word))))(input)
}

/// Domain
///
/// ```abnf
///    domain          =   dot-atom / domain-literal / obs-domain
/// ```
pub fn domain(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((obs_domain, domain_literal))(input)
}

/// Obsolete domain
///
/// Every `dot-atom` is also an `obs-domain`, so only the latter is tried.
///
/// ```abnf
///    obs-domain      =   atom *("." atom)
/// ```
fn obs_domain(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(atom, many0(preceded(tag(&[ascii::PERIOD]), atom))))(input)
}

/// Domain literal
///
/// ```abnf
///    domain-literal  =   [CFWS] "[" *([FWS] dcontent) [FWS] "]" [CFWS]
///    dcontent        =   dtext / quoted-pair
/// ```
fn domain_literal(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(delimited(
        pair(opt(cfws), tag(&[ascii::LEFT_BRACKET])),
        pair(
            many0(pair(
                opt(fws),
                alt((take_while1(is_dtext), quoted_pair)),
            )),
            opt(fws),
        ),
        pair(tag(&[ascii::RIGHT_BRACKET]), opt(cfws)),
    ))(input)
}

fn is_strict_dtext(c: u8) -> bool {
    (0x21..=0x5A).contains(&c) || (0x5E..=0x7E).contains(&c)
}

/// Is domain text
///
/// ```abnf
///   dtext           =   %d33-90 /          ; Printable US-ASCII
///                       %d94-126 /         ;  characters not including
///                       obs-dtext          ;  "[", "]", or "\"
/// ```
pub fn is_dtext(c: u8) -> bool {
    is_strict_dtext(c) || is_obs_no_ws_ctl(c)
}
