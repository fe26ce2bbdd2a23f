/// Build and validate IMF (Internet Message Format) mailbox fields (RFC2822, RFC5322)

pub mod grammar;
pub mod mailbox;
pub mod mailbox_header;
pub mod mailbox_set;
pub mod render;
pub mod validate;
