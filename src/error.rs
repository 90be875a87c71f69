use std::fmt::Display;

#[cfg(feature = "json_dump")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which stage rejected a value.
///
/// All of these surface as [`Status::UnsupportedProperty`]; the reason is
/// kept for diagnostics only.
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// The property name is not in the registry.
    UnknownProperty,

    /// The property exists but may not be written.
    ReadOnly,

    /// The value matched none of the property's grammars, or the matched
    /// conversion could not produce a canonical value.
    InvalidFormat,

    /// The value is neither a decimal integer nor a single ASCII letter, so
    /// it can't be looked up in an enumerated code table.
    InvalidRangeValue,
}

impl Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Reason::UnknownProperty => "unknown property",
            Reason::ReadOnly => "property is read-only",
            Reason::InvalidFormat => "value format is invalid",
            Reason::InvalidRangeValue => "value is not an integer or a letter",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported {key}: {reason}")]
    Unsupported { key: String, reason: Reason },

    #[error("value of {key} is out of range: {value:?}")]
    OutOfRange { key: String, value: String },
}

use Error::*;

impl Error {
    pub(crate) fn unsupported(key: &str, reason: Reason) -> Self {
        Unsupported {
            key: key.to_owned(),
            reason,
        }
    }

    pub(crate) fn out_of_range(key: &str, value: &str) -> Self {
        OutOfRange {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }

    /// The same error, reported against `key`.
    pub(crate) fn with_key(self, key: &str) -> Self {
        match self {
            Unsupported { reason, .. } => Error::unsupported(key, reason),
            OutOfRange { value, .. } => OutOfRange {
                key: key.to_owned(),
                value,
            },
        }
    }

    /// The externally visible status of this error.
    pub fn status(&self) -> Status {
        match self {
            Unsupported { .. } => Status::UnsupportedProperty,
            OutOfRange { .. } => Status::OutOfRange,
        }
    }

    /// The rejecting stage, `None` for [`Error::OutOfRange`].
    pub fn reason(&self) -> Option<Reason> {
        match self {
            Unsupported { reason, .. } => Some(*reason),
            OutOfRange { .. } => None,
        }
    }
}

/// Coarse result classification, for callers that deal in status codes.
///
/// Unknown keys, read-only keys and grammar mismatches all collapse into
/// [`Status::UnsupportedProperty`].
#[cfg_attr(feature = "json_dump", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Success,
    UnsupportedProperty,
    OutOfRange,
}

impl Status {
    pub const fn code(self) -> i32 {
        match self {
            Status::Success => 0,
            Status::UnsupportedProperty => 1,
            Status::OutOfRange => 2,
        }
    }

    pub const fn is_success(self) -> bool {
        matches!(self, Status::Success)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Status::Success => "success",
            Status::UnsupportedProperty => "unsupported property",
            Status::OutOfRange => "out of range",
        };
        f.write_str(s)
    }
}

impl<T> From<&crate::Result<T>> for Status {
    fn from(res: &crate::Result<T>) -> Self {
        match res {
            Ok(_) => Status::Success,
            Err(e) => e.status(),
        }
    }
}
