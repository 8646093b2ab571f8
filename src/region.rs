//! Optional view over raw region bytes.
//!
//! Region strings are conventionally pipe-delimited, e.g.
//! `中国|0|广东省|深圳市|电信`. The searcher itself never decodes them.

use std::fmt;

/// Pipe-delimited region fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    raw: String,
}

impl Region {
    /// Wrap region bytes, replacing invalid UTF-8 sequences.
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            raw: String::from_utf8_lossy(bytes).into_owned(),
        }
    }

    /// The individual fields, in file order.
    pub fn fields(&self) -> Vec<&str> {
        self.raw.split('|').collect()
    }

    /// Field at `index`, with the `0` placeholder mapped to `None`.
    pub fn field(&self, index: usize) -> Option<&str> {
        self.raw
            .split('|')
            .nth(index)
            .filter(|f| !f.is_empty() && *f != "0")
    }

    /// The whole region string, unchanged.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
