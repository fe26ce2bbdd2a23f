use crate::text::ascii;
use crate::text::whitespace::cfws;
use nom::{
    bytes::complete::{tag, take_while1},
    character::is_alphanumeric,
    combinator::{opt, recognize},
    multi::many0,
    sequence::{delimited, pair},
    IResult,
};

/// ASCII printable characters
pub fn is_vchar(c: u8) -> bool {
    (ascii::EXCLAMATION..=ascii::TILDE).contains(&c)
}

/// Characters allowed in unstructured text, once escaped
///
/// ```abnf
///   text            =   %d1-9 /            ; Characters excluding CR and LF
///                       %d11 /
///                       %d12 /
///                       %d14-127 /
///                       obs-text
/// ```
pub fn is_text(c: u8) -> bool {
    (ascii::SOH..=ascii::DEL).contains(&c) && c != ascii::CR && c != ascii::LF
}

/// Atom allowed characters
///
/// authorized: !#$%&'*+-/=?^_`{|}~
pub fn is_atext(c: u8) -> bool {
    is_alphanumeric(c)
        || c == ascii::EXCLAMATION
        || c == ascii::NUM
        || c == ascii::DOLLAR
        || c == ascii::PERCENT
        || c == ascii::AMPERSAND
        || c == ascii::SQUOTE
        || c == ascii::ASTERISK
        || c == ascii::PLUS
        || c == ascii::MINUS
        || c == ascii::SLASH
        || c == ascii::EQ
        || c == ascii::QUESTION
        || c == ascii::CARRET
        || c == ascii::UNDERSCORE
        || c == ascii::GRAVE
        || c == ascii::LEFT_CURLY
        || c == ascii::PIPE
        || c == ascii::RIGHT_CURLY
        || c == ascii::TILDE
}

/// Atom
///
/// `[CFWS] 1*atext [CFWS]`
pub fn atom(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(delimited(opt(cfws), take_while1(is_atext), opt(cfws)))(input)
}

/// dot-atom-text
///
/// `1*atext *("." 1*atext)`
pub fn dot_atom_text(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(pair(
        take_while1(is_atext),
        many0(pair(tag(&[ascii::PERIOD]), take_while1(is_atext))),
    ))(input)
}

/// dot-atom
///
/// `[CFWS] dot-atom-text [CFWS]`
pub fn dot_atom(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(delimited(opt(cfws), dot_atom_text, opt(cfws)))(input)
}
