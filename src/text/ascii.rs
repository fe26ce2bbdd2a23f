//! Named US-ASCII byte values used by the grammar.

// C0 controls
pub const NULL: u8 = 0x00;
pub const SOH: u8 = 0x01;
pub const BS: u8 = 0x08;
pub const HT: u8 = 0x09;
pub const LF: u8 = 0x0A;
pub const VT: u8 = 0x0B;
pub const FF: u8 = 0x0C;
pub const CR: u8 = 0x0D;
pub const SO: u8 = 0x0E;
pub const US: u8 = 0x1F;
pub const DEL: u8 = 0x7F;

// Printable
pub const SP: u8 = 0x20;
pub const EXCLAMATION: u8 = 0x21;
pub const DQUOTE: u8 = 0x22;
pub const NUM: u8 = 0x23;
pub const DOLLAR: u8 = 0x24;
pub const PERCENT: u8 = 0x25;
pub const AMPERSAND: u8 = 0x26;
pub const SQUOTE: u8 = 0x27;
pub const LEFT_PAR: u8 = 0x28;
pub const RIGHT_PAR: u8 = 0x29;
pub const ASTERISK: u8 = 0x2A;
pub const PLUS: u8 = 0x2B;
pub const MINUS: u8 = 0x2D;
pub const PERIOD: u8 = 0x2E;
pub const SLASH: u8 = 0x2F;
pub const EQ: u8 = 0x3D;
pub const QUESTION: u8 = 0x3F;
pub const AT: u8 = 0x40;
pub const LEFT_BRACKET: u8 = 0x5B;
pub const BACKSLASH: u8 = 0x5C;
pub const RIGHT_BRACKET: u8 = 0x5D;
pub const CARRET: u8 = 0x5E;
pub const UNDERSCORE: u8 = 0x5F;
pub const GRAVE: u8 = 0x60;
pub const LEFT_CURLY: u8 = 0x7B;
pub const PIPE: u8 = 0x7C;
pub const RIGHT_CURLY: u8 = 0x7D;
pub const TILDE: u8 = 0x7E;

// GROUP OF CHARACTERS
pub const CRLF: &[u8] = &[CR, LF];
