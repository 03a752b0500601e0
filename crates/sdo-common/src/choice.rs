//! Either an enumeration member or the raw string a caller handed in.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::Enumerated;
use crate::error::InvalidValueError;

/// A request field that accepts an enumeration member or a raw value string.
///
/// Raw strings are carried verbatim so they can still be formatted into a
/// URL; they are only checked when [`Choice::resolve`] is called.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Choice<E> {
    Known(E),
    Raw(String),
}

impl<E: Enumerated> Choice<E> {
    /// The string placed into URLs.
    pub fn as_str(&self) -> &str {
        match self {
            Choice::Known(member) => member.value(),
            Choice::Raw(raw) => raw,
        }
    }

    /// Map onto a public member of `E`.
    pub fn resolve(&self) -> Result<E, InvalidValueError> {
        match self {
            Choice::Known(member) => Ok(*member),
            Choice::Raw(raw) => {
                E::parse_value(raw).ok_or_else(|| InvalidValueError::new(E::KIND, raw.as_str()))
            }
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Choice::Known(_))
    }
}

impl<E: Enumerated> fmt::Display for Choice<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<E> From<&str> for Choice<E> {
    fn from(raw: &str) -> Self {
        Choice::Raw(raw.to_string())
    }
}

impl<E> From<String> for Choice<E> {
    fn from(raw: String) -> Self {
        Choice::Raw(raw)
    }
}
