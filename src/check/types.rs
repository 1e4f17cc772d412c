//! Core types shared by checks, the scanner and reporters.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a check, rendered as `S` followed by three digits.
///
/// Ordering follows the numeric part, which is the same as the ordering of
/// the rendered strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CheckCode(pub(crate) u16);

impl CheckCode {
    /// Create a code from its numeric part. Returns `None` above 999.
    pub const fn new(number: u16) -> Option<Self> {
        if number > 999 {
            None
        } else {
            Some(CheckCode(number))
        }
    }

    pub fn number(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for CheckCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{:03}", self.0)
    }
}

/// Error returned when a string is not a valid check code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid check code {0:?}, expected 'S' followed by three digits")]
pub struct CodeParseError(pub String);

impl FromStr for CheckCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('S')
            .or_else(|| trimmed.strip_prefix('s'))
            .ok_or_else(|| CodeParseError(s.to_string()))?;

        if digits.len() != 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CodeParseError(s.to_string()));
        }

        let number: u16 = digits.parse().map_err(|_| CodeParseError(s.to_string()))?;
        Ok(CheckCode(number))
    }
}

impl Serialize for CheckCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CheckCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Result of evaluating one check against one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub matched: bool,
    /// Rendered message; empty when the check passed.
    pub message: String,
}

impl CheckOutcome {
    pub fn pass() -> Self {
        Self {
            matched: false,
            message: String::new(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            matched: true,
            message: message.into(),
        }
    }
}

/// A single reported style violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    /// 1-based line number.
    pub line: usize,
    pub code: CheckCode,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Line {}: {} {}",
            self.file, self.line, self.code, self.message
        )
    }
}
