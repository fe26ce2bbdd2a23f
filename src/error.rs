use thiserror::Error;

/// An address was rejected by the `addr-spec` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Address in mailbox given [{address}] does not comply with RFC 2822, 3.6.2.")]
pub struct InvalidAddressError {
    pub address: String,
}

impl InvalidAddressError {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }
}

/// A grammar production was looked up by a name the grammar does not define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown grammar production `{0}`")]
pub struct UnknownProduction(pub String);
