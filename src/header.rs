//! State shared by every structured header field: its name, charset, phrase
//! encoder, grammar and the cached field body.

use std::fmt;

use crate::imf::grammar::{Grammar, Rfc2822Grammar};
use crate::mime::charset::EmailCharset;
use crate::mime::encoded_word::{MimePhraseEncoder, PhraseEncoder};

/// Kind of model a structured header carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// A list of mailboxes (From, To, Cc, Bcc, Reply-To, ...)
    Mailbox,
}

/// Last rendered field body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CachedBody {
    #[default]
    Stale,
    Fresh(String),
}

impl CachedBody {
    pub fn get(&self) -> Option<&str> {
        match self {
            CachedBody::Stale => None,
            CachedBody::Fresh(v) => Some(v),
        }
    }
}

/// A header field as seen by the message assembly layer, which prefixes the
/// body with `field_name()` and folds it.
pub trait Header {
    fn field_name(&self) -> &str;
    fn field_type(&self) -> FieldType;
    fn field_body(&mut self) -> &str;
}

pub struct StructuredHeader {
    name: String,
    charset: EmailCharset,
    encoder: Box<dyn PhraseEncoder>,
    grammar: Box<dyn Grammar>,
    cache: CachedBody,
}

impl StructuredHeader {
    /// Creates the base of a header named `name`, with the RFC 2822 grammar,
    /// UTF-8 and the default phrase encoder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            charset: EmailCharset::default(),
            encoder: Box::new(MimePhraseEncoder::default()),
            grammar: Box::new(Rfc2822Grammar),
            cache: CachedBody::Stale,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn charset(&self) -> &EmailCharset {
        &self.charset
    }

    /// Only a change of charset drops the cached body.
    pub fn set_charset(&mut self, charset: EmailCharset) {
        if charset != self.charset {
            self.charset = charset;
            self.invalidate();
        }
    }

    pub fn encoder(&self) -> &dyn PhraseEncoder {
        self.encoder.as_ref()
    }

    pub fn set_encoder(&mut self, encoder: Box<dyn PhraseEncoder>) {
        self.encoder = encoder;
        self.invalidate();
    }

    pub fn grammar(&self) -> &dyn Grammar {
        self.grammar.as_ref()
    }

    pub fn set_grammar(&mut self, grammar: Box<dyn Grammar>) {
        self.grammar = grammar;
        self.invalidate();
    }

    pub fn cached_value(&self) -> Option<&str> {
        self.cache.get()
    }

    pub fn set_cached_value(&mut self, value: String) {
        self.cache = CachedBody::Fresh(value);
    }

    pub fn invalidate(&mut self) {
        #[cfg(feature = "tracing")]
        {
            if let CachedBody::Fresh(_) = self.cache {
                tracing::trace!(field = %self.name, "field body invalidated");
            }
        }
        self.cache = CachedBody::Stale;
    }

    /// Returns the cached body, computing it with `render` if it is stale.
    pub fn cached_or_else(&mut self, render: impl FnOnce(&Self) -> String) -> &str {
        if let CachedBody::Stale = self.cache {
            let value = render(self);
            self.cache = CachedBody::Fresh(value);
        }
        match &self.cache {
            CachedBody::Fresh(v) => v,
            CachedBody::Stale => "",
        }
    }
}

impl fmt::Debug for StructuredHeader {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("StructuredHeader")
            .field("name", &self.name)
            .field("charset", &self.charset)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
