use encoding_rs::Encoding;
use std::borrow::Cow;
use std::fmt;

/// Specific implementation of charset
///
/// We keep our own charset list to follow IANA's one.
/// encoding_rs implements a different standard that does not know US_ASCII.
/// using encoding_rs datastructures directly would lead to a loss of information.
/// https://www.iana.org/assignments/character-sets/character-sets.xhtml
#[allow(non_camel_case_types)]
#[derive(Debug, PartialEq, Eq, Default, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EmailCharset {
    US_ASCII,
    ISO_8859_1,
    ISO_8859_2,
    ISO_8859_3,
    ISO_8859_4,
    ISO_8859_5,
    ISO_8859_6,
    ISO_8859_7,
    ISO_8859_8,
    ISO_8859_9,
    ISO_8859_10,
    Shift_JIS,
    EUC_JP,
    ISO_2022_KR,
    EUC_KR,
    ISO_2022_JP,
    ISO_2022_JP_2,
    ISO_8859_6_E,
    ISO_8859_6_I,
    ISO_8859_8_E,
    ISO_8859_8_I,
    GB2312,
    Big5,
    KOI8_R,
    #[default]
    UTF_8,
    Unknown(String),
}

impl<'a> From<&'a str> for EmailCharset {
    fn from(s: &'a str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "us-ascii" | "ascii" => EmailCharset::US_ASCII,
            "iso-8859-1" => EmailCharset::ISO_8859_1,
            "iso-8859-2" => EmailCharset::ISO_8859_2,
            "iso-8859-3" => EmailCharset::ISO_8859_3,
            "iso-8859-4" => EmailCharset::ISO_8859_4,
            "iso-8859-5" => EmailCharset::ISO_8859_5,
            "iso-8859-6" => EmailCharset::ISO_8859_6,
            "iso-8859-7" => EmailCharset::ISO_8859_7,
            "iso-8859-8" => EmailCharset::ISO_8859_8,
            "iso-8859-9" => EmailCharset::ISO_8859_9,
            "iso-8859-10" => EmailCharset::ISO_8859_10,
            "shift_jis" => EmailCharset::Shift_JIS,
            "euc-jp" => EmailCharset::EUC_JP,
            "iso-2022-kr" => EmailCharset::ISO_2022_KR,
            "euc-kr" => EmailCharset::EUC_KR,
            "iso-2022-jp" => EmailCharset::ISO_2022_JP,
            "iso-2022-jp-2" => EmailCharset::ISO_2022_JP_2,
            "iso-8859-6-e" => EmailCharset::ISO_8859_6_E,
            "iso-8859-6-i" => EmailCharset::ISO_8859_6_I,
            "iso-8859-8-e" => EmailCharset::ISO_8859_8_E,
            "iso-8859-8-i" => EmailCharset::ISO_8859_8_I,
            "gb2312" => EmailCharset::GB2312,
            "big5" => EmailCharset::Big5,
            "koi8-r" => EmailCharset::KOI8_R,
            "utf-8" | "utf8" => EmailCharset::UTF_8,
            _ => EmailCharset::Unknown(s.to_string()),
        }
    }
}

impl EmailCharset {
    pub fn as_str(&self) -> &str {
        use EmailCharset::*;

        match self {
            US_ASCII => "US-ASCII",
            ISO_8859_1 => "ISO-8859-1",
            ISO_8859_2 => "ISO-8859-2",
            ISO_8859_3 => "ISO-8859-3",
            ISO_8859_4 => "ISO-8859-4",
            ISO_8859_5 => "ISO-8859-5",
            ISO_8859_6 => "ISO-8859-6",
            ISO_8859_7 => "ISO-8859-7",
            ISO_8859_8 => "ISO-8859-8",
            ISO_8859_9 => "ISO-8859-9",
            ISO_8859_10 => "ISO-8859-10",
            Shift_JIS => "Shift_JIS",
            EUC_JP => "EUC-JP",
            ISO_2022_KR => "ISO-2022-KR",
            EUC_KR => "EUC-KR",
            ISO_2022_JP => "ISO-2022-JP",
            ISO_2022_JP_2 => "ISO-2022-JP-2",
            ISO_8859_6_E => "ISO-8859-6-E",
            ISO_8859_6_I => "ISO-8859-6-I",
            ISO_8859_8_E => "ISO-8859-8-E",
            ISO_8859_8_I => "ISO-8859-8-I",
            GB2312 => "GB2312",
            Big5 => "Big5",
            KOI8_R => "KOI8-R",
            UTF_8 => "UTF-8",
            Unknown(label) => label,
        }
    }

    /// Encodes `text` into this charset, or `None` if it cannot be represented
    /// exactly (or if the charset has no known encoder).
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            EmailCharset::US_ASCII => text.is_ascii().then_some(Cow::Borrowed(text.as_bytes())),
            // encoding_rs aliases latin1 to windows-1252, which differs on 0x80-0x9F
            EmailCharset::ISO_8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned),
            EmailCharset::UTF_8 => Some(Cow::Borrowed(text.as_bytes())),
            EmailCharset::ISO_2022_KR | EmailCharset::ISO_2022_JP_2 | EmailCharset::Unknown(_) => {
                None
            }
            other => {
                let enc = Encoding::for_label(other.as_str().as_bytes())?;
                let (bytes, _, had_errors) = enc.encode(text);
                (!had_errors).then_some(bytes)
            }
        }
    }
}

impl fmt::Display for EmailCharset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
