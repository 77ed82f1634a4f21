//! Diagnostics reported by the Flowcode parser and repair pass.
//!
//! The error system is built around [`Diagnostic`], a single error or warning
//! with an optional [`ErrorCode`], labelled source spans and help text.
//! Fatal parser failures are returned as a [`ParseError`] wrapping one or more
//! diagnostics; the repair pass returns its findings as warnings.
//!
//! # Example
//!
//! ```
//! # use flowcode_parser::error::{Diagnostic, ErrorCode};
//! # use flowcode_parser::Span;
//! let diag = Diagnostic::warning("missing semicolon")
//!     .with_code(ErrorCode::E200)
//!     .with_label(Span::new(14..23), "statement is not terminated")
//!     .with_help("add `;` at the end of the line");
//!
//! assert_eq!(diag.to_string(), "warning[E200]: missing semicolon");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
