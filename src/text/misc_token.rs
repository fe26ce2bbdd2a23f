use nom::{
    branch::alt,
    combinator::recognize,
    multi::many1,
    IResult,
};

use crate::text::{quoted::quoted_string, words::atom};

/// Word
///
/// ```abnf
///    word            =   atom / quoted-string
/// ```
pub fn word(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((quoted_string, atom))(input)
}

/// Phrase, strict syntax
///
/// ```abnf
///    phrase          =   1*word / obs-phrase
/// ```
///
/// `obs-phrase` (which admits naked periods) is deliberately left out: a
/// display name matched by this production can be written out as-is without
/// producing obsolete syntax.
pub fn phrase(input: &[u8]) -> IResult<&[u8], &[u8]> {
    recognize(many1(word))(input)
}
