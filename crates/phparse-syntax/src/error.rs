//! Error handling types shared by the phparse scanner, parser and CLI.
//!
//! Lexical errors travel through the token stream as
//! [`TokenKind::Error`](crate::TokenKind::Error) items; the parser turns those,
//! and its own grammar errors, into [`Error`] values carrying the source
//! location where they were raised.
//!
//! # Examples
//!
//! ```rust
//! use phparse_syntax::error::{Error, Result};
//! use phparse_syntax::Position;
//!
//! fn check_tag(s: &str) -> Result<()> {
//!     if s.starts_with("<?php") {
//!         Ok(())
//!     } else {
//!         Err(Error::new("missing open tag"))
//!     }
//! }
//!
//! let pos = Position { offset: 12, line: 2, file: "index.php" };
//! let located = Error::at("found \";\", expected statement", &pos);
//! assert_eq!(located.to_string(), "found \";\", expected statement at line 2");
//! assert!(check_tag("hello").is_err());
//! ```

use std::fmt;

use serde::Serialize;

use crate::token::Position;

/// An error raised while scanning or parsing PHP source.
///
/// # Fields
///
/// - `msg`: Human-readable error description
/// - `line`: Optional 1-based line number in the source
/// - `offset`: Optional byte offset in the source
///
/// The CLI derives a column from `offset` when it renders the error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Error {
    /// Human-readable error message
    pub msg: String,

    /// Optional line number in source file (1-based)
    pub line: Option<usize>,

    /// Optional byte offset in source file
    pub offset: Option<usize>,
}

impl Error {
    /// Creates a new error with the given message and no location.
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            line: None,
            offset: None,
        }
    }

    /// Creates a new error located at `pos`.
    ///
    /// ```rust
    /// use phparse_syntax::{Error, Position};
    ///
    /// let pos = Position { offset: 0, line: 5, file: "" };
    /// let error = Error::at("unterminated string", &pos);
    /// assert_eq!(error.line, Some(5));
    /// ```
    pub fn at(msg: impl Into<String>, pos: &Position<'_>) -> Self {
        Self {
            msg: msg.into(),
            line: Some(pos.line),
            offset: Some(pos.offset),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(l) = self.line {
            write!(f, "{} at line {}", self.msg, l)
        } else {
            write!(f, "{}", self.msg)
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for phparse operations.
pub type Result<T> = std::result::Result<T, Error>;
