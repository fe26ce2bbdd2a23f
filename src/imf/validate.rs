use crate::error::InvalidAddressError;
use crate::imf::grammar::{Grammar, Production};

/// Checks that the whole of `address` is an RFC 2822 `addr-spec`.
pub fn validate_address(grammar: &dyn Grammar, address: &str) -> Result<(), InvalidAddressError> {
    if grammar.matches(Production::AddrSpec, address.as_bytes()) {
        Ok(())
    } else {
        #[cfg(feature = "tracing")]
        tracing::debug!(address, "rejected address");
        Err(InvalidAddressError::new(address))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imf::grammar::Rfc2822Grammar;

    #[test]
    fn test_validate_address() {
        assert_eq!(validate_address(&Rfc2822Grammar, "a@x.tld"), Ok(()));
        assert_eq!(
            validate_address(&Rfc2822Grammar, "not an address"),
            Err(InvalidAddressError::new("not an address"))
        );
        // partial matches are not enough
        assert!(validate_address(&Rfc2822Grammar, "a@x.tld junk").is_err());
    }

    #[test]
    fn test_error_message() {
        let err = validate_address(&Rfc2822Grammar, "nope").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Address in mailbox given [nope] does not comply with RFC 2822, 3.6.2."
        );
    }
}
