use indexmap::IndexMap;

use crate::error::InvalidAddressError;
use crate::imf::grammar::Grammar;
use crate::imf::validate::validate_address;

/// Address to optional display name, in insertion order.
///
/// Re-inserting an address replaces its name but keeps its position.
pub type MailboxSet = IndexMap<String, Option<String>>;

/// One mailbox as given by a caller, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameAddress {
    pub address: String,
    pub name: Option<String>,
}

impl NameAddress {
    pub fn new(address: impl Into<String>, name: Option<String>) -> Self {
        Self {
            address: address.into(),
            name,
        }
    }

    pub fn named(address: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(address, Some(name.into()))
    }
}

impl From<&str> for NameAddress {
    fn from(address: &str) -> Self {
        Self::new(address, None)
    }
}

impl From<String> for NameAddress {
    fn from(address: String) -> Self {
        Self::new(address, None)
    }
}

impl From<&String> for NameAddress {
    fn from(address: &String) -> Self {
        Self::new(address.as_str(), None)
    }
}

/// `(address, display name)`
impl<A: Into<String>, N: Into<String>> From<(A, N)> for NameAddress {
    fn from((address, name): (A, N)) -> Self {
        Self::named(address, name)
    }
}

/// An ordered sequence of mailboxes, some of them named.
///
/// Built from a single address, a list of addresses, a list of
/// `(address, name)` pairs, or any mix through `NameAddress`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressInput(pub Vec<NameAddress>);

impl AddressInput {
    /// Drops every display name, keeping the order.
    pub fn without_names(self) -> Self {
        AddressInput(
            self.0
                .into_iter()
                .map(|na| NameAddress::new(na.address, None))
                .collect(),
        )
    }
}

impl From<&str> for AddressInput {
    fn from(address: &str) -> Self {
        AddressInput(vec![address.into()])
    }
}

impl From<String> for AddressInput {
    fn from(address: String) -> Self {
        AddressInput(vec![address.into()])
    }
}

impl From<NameAddress> for AddressInput {
    fn from(mailbox: NameAddress) -> Self {
        AddressInput(vec![mailbox])
    }
}

impl<T: Into<NameAddress>> From<Vec<T>> for AddressInput {
    fn from(v: Vec<T>) -> Self {
        v.into_iter().collect()
    }
}

impl<T: Into<NameAddress>, const N: usize> From<[T; N]> for AddressInput {
    fn from(v: [T; N]) -> Self {
        v.into_iter().collect()
    }
}

impl<T: Into<NameAddress>> FromIterator<T> for AddressInput {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        AddressInput(iter.into_iter().map(Into::into).collect())
    }
}

/// Validates every address of `input` and builds the canonical mailbox set.
///
/// The first invalid address aborts the whole operation; nothing of the
/// partially built set is returned.
pub fn normalize(grammar: &dyn Grammar, input: AddressInput) -> Result<MailboxSet, InvalidAddressError> {
    input
        .0
        .into_iter()
        .try_fold(MailboxSet::new(), |mut set, mailbox| {
            validate_address(grammar, &mailbox.address)?;
            set.insert(mailbox.address, mailbox.name);
            Ok(set)
        })
}
