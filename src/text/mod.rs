pub mod ascii;
pub mod misc_token;
pub mod quoted;
pub mod whitespace;
pub mod words;
