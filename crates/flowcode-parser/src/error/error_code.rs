//! Error codes for the Flowcode diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E1xx` - Parser errors
//! - `E2xx` - Repair-pass findings

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Parser Errors (E1xx)
    // =========================================================================
    /// Nesting too deep.
    ///
    /// Blocks are nested deeper than the configured maximum depth.
    E100,

    // =========================================================================
    // Repair Findings (E2xx)
    // =========================================================================
    /// Missing semicolon.
    ///
    /// A simple statement line does not end with `;`.
    E200,

    /// Assignment in condition.
    ///
    /// An `if` or `while` condition uses `=` where `==` was probably meant.
    E201,

    /// Unclosed block.
    ///
    /// The source opens more `{` than it closes.
    E202,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "nesting too deep",
            ErrorCode::E200 => "missing semicolon",
            ErrorCode::E201 => "assignment in condition",
            ErrorCode::E202 => "unclosed block",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E202.to_string(), "E202");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E100.description(), "nesting too deep");
        assert_eq!(ErrorCode::E201.description(), "assignment in condition");
    }
}
