//! Stable, machine-readable error codes for configuration diagnostics.
//!
//! Codes serialize as `snake_case` strings and never change meaning once
//! published; callers can match on them instead of parsing messages.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The spec version is not supported by this build.
    UnsupportedVersion,
    /// A threshold or weight lies outside its permitted range.
    OutOfRange,
    /// A count or length that must be positive is zero.
    InvalidValue,
    /// A runtime guard is misconfigured or was exceeded.
    LimitExceeded,
    /// A field is not part of the schema.
    UnknownField,
    /// Catch-all for custom rules.
    ValidationFailed,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::OutOfRange => "out_of_range",
            Self::InvalidValue => "invalid_value",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
            Self::ValidationFailed => "validation_failed",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_snake_case() {
        let json = serde_json::to_value(ErrorCode::OutOfRange).unwrap();
        assert_eq!(json, "out_of_range");
        assert_eq!(ErrorCode::OutOfRange.to_string(), "out_of_range");
    }
}
