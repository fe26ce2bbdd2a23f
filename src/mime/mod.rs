/// Charsets known to MIME
pub mod charset;

/// Display-name encoding (RFC2047)
pub mod encoded_word;
