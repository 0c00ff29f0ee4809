//! # String Encodings
//!
//! Text values are converted to bytes with a [`StringEncoding`] before they
//! reach the digest accumulator. The hasher carries a default encoding
//! (UTF-16LE unless configured otherwise) and individual members may
//! override it through their type policy.
//!
//! Encodings that cannot represent a scalar value substitute `?` (0x3F),
//! so the output is always a deterministic function of the input text.

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Byte encoding applied to textual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StringEncoding {
    /// UTF-8.
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-16, little-endian code units, no byte order mark.
    #[default]
    #[serde(rename = "utf-16le")]
    Utf16Le,
    /// UTF-16, big-endian code units, no byte order mark.
    #[serde(rename = "utf-16be")]
    Utf16Be,
    /// UTF-32, little-endian, no byte order mark.
    #[serde(rename = "utf-32le")]
    Utf32Le,
    /// UTF-32, big-endian, no byte order mark.
    #[serde(rename = "utf-32be")]
    Utf32Be,
    /// 7-bit ASCII; other scalars become `?`.
    Ascii,
    /// ISO-8859-1; scalars above U+00FF become `?`.
    Latin1,
}

const REPLACEMENT: u8 = b'?';

impl StringEncoding {
    /// All supported encodings.
    pub const ALL: [StringEncoding; 7] = [
        Self::Utf8,
        Self::Utf16Le,
        Self::Utf16Be,
        Self::Utf32Le,
        Self::Utf32Be,
        Self::Ascii,
        Self::Latin1,
    ];

    /// Returns the encoding identifier string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Utf32Le => "utf-32le",
            Self::Utf32Be => "utf-32be",
            Self::Ascii => "ascii",
            Self::Latin1 => "latin1",
        }
    }

    /// Append the encoded form of `text` to `out`.
    pub fn encode_into(&self, text: &str, out: &mut Vec<u8>) {
        match self {
            Self::Utf8 => out.extend_from_slice(text.as_bytes()),
            Self::Utf16Le => {
                out.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_le_bytes());
                }
            }
            Self::Utf16Be => {
                out.reserve(text.len() * 2);
                for unit in text.encode_utf16() {
                    out.extend_from_slice(&unit.to_be_bytes());
                }
            }
            Self::Utf32Le => {
                out.reserve(text.len() * 4);
                for c in text.chars() {
                    out.extend_from_slice(&u32::from(c).to_le_bytes());
                }
            }
            Self::Utf32Be => {
                out.reserve(text.len() * 4);
                for c in text.chars() {
                    out.extend_from_slice(&u32::from(c).to_be_bytes());
                }
            }
            Self::Ascii => out.extend(text.chars().map(|c| {
                if c.is_ascii() {
                    c as u8
                } else {
                    REPLACEMENT
                }
            })),
            Self::Latin1 => out.extend(
                text.chars()
                    .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT)),
            ),
        }
    }

    /// Encode `text` into a fresh buffer.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut out = Vec::new();
        self.encode_into(text, &mut out);
        out
    }
}

impl std::fmt::Display for StringEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StringEncoding {
    type Err = ConfigurationError;

    /// Parse an encoding name, case-insensitively. Common aliases
    /// (`utf8`, `unicode`, `iso-8859-1`, ...) are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "utf-16le" | "utf16le" | "utf-16" | "unicode" => Ok(Self::Utf16Le),
            "utf-16be" | "utf16be" => Ok(Self::Utf16Be),
            "utf-32le" | "utf32le" | "utf-32" => Ok(Self::Utf32Le),
            "utf-32be" | "utf32be" => Ok(Self::Utf32Be),
            "ascii" | "us-ascii" => Ok(Self::Ascii),
            "latin1" | "latin-1" | "iso-8859-1" => Ok(Self::Latin1),
            _ => Err(ConfigurationError::UnknownEncoding(s.to_string())),
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// UTF-8 output is the string's own bytes.
        #[test]
        fn utf8_is_identity(text in "\\PC{0,40}") {
            prop_assert_eq!(StringEncoding::Utf8.encode(&text), text.as_bytes());
        }

        /// UTF-16 emits two bytes per code unit, in either byte order.
        #[test]
        fn utf16_length_and_byte_order(text in "\\PC{0,40}") {
            let le = StringEncoding::Utf16Le.encode(&text);
            let be = StringEncoding::Utf16Be.encode(&text);
            prop_assert_eq!(le.len(), 2 * text.encode_utf16().count());
            for (l, b) in le.chunks(2).zip(be.chunks(2)) {
                prop_assert_eq!(l[0], b[1]);
                prop_assert_eq!(l[1], b[0]);
            }
        }

        /// Single-byte and UTF-32 encodings emit a fixed width per char.
        #[test]
        fn fixed_width_encodings(text in "\\PC{0,40}") {
            let chars = text.chars().count();
            prop_assert_eq!(StringEncoding::Ascii.encode(&text).len(), chars);
            prop_assert_eq!(StringEncoding::Latin1.encode(&text).len(), chars);
            prop_assert_eq!(StringEncoding::Utf32Le.encode(&text).len(), 4 * chars);
        }
    }
}
