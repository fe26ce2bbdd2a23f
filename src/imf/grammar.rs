//! Grammar provider: hands out recognisers for the RFC 2822 productions that
//! structured headers validate their input against.

use nom::{combinator::all_consuming, IResult};
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownProduction;
use crate::imf::mailbox::{addr_spec, domain, local_part};
use crate::text::{
    misc_token::{phrase, word},
    quoted::quoted_string,
    words::{atom, dot_atom},
};

/// A recogniser for one production: on success it returns the rest of the
/// input and the matched slice.
pub type Pattern = fn(&[u8]) -> IResult<&[u8], &[u8]>;

/// Named productions of the RFC 2822 grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    AddrSpec,
    LocalPart,
    Domain,
    Phrase,
    Word,
    Atom,
    DotAtom,
    QuotedString,
}

impl Production {
    pub fn as_str(&self) -> &'static str {
        match self {
            Production::AddrSpec => "addr-spec",
            Production::LocalPart => "local-part",
            Production::Domain => "domain",
            Production::Phrase => "phrase",
            Production::Word => "word",
            Production::Atom => "atom",
            Production::DotAtom => "dot-atom",
            Production::QuotedString => "quoted-string",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Production {
    type Err = UnknownProduction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "addr-spec" => Ok(Production::AddrSpec),
            "local-part" => Ok(Production::LocalPart),
            "domain" => Ok(Production::Domain),
            "phrase" => Ok(Production::Phrase),
            "word" => Ok(Production::Word),
            "atom" => Ok(Production::Atom),
            "dot-atom" => Ok(Production::DotAtom),
            "quoted-string" => Ok(Production::QuotedString),
            _ => Err(UnknownProduction(s.to_string())),
        }
    }
}

/// Supplies the formal pattern of a production.
pub trait Grammar {
    fn pattern(&self, production: Production) -> Pattern;

    /// Whether the whole of `input` (anchored at both ends) matches `production`.
    fn matches(&self, production: Production, input: &[u8]) -> bool {
        all_consuming(self.pattern(production))(input).is_ok()
    }
}

/// The RFC 2822 grammar, obsolete forms included for parsing where the RFC
/// requires them.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rfc2822Grammar;

impl Grammar for Rfc2822Grammar {
    fn pattern(&self, production: Production) -> Pattern {
        match production {
            Production::AddrSpec => addr_spec,
            Production::LocalPart => local_part,
            Production::Domain => domain,
            Production::Phrase => phrase,
            Production::Word => word,
            Production::Atom => atom,
            Production::DotAtom => dot_atom,
            Production::QuotedString => quoted_string,
        }
    }
}
