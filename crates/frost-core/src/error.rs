// Dweve Frost - Nix Flake Documentation Extractor
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Error types for Nix parsing.

use crate::span::SourcePos;
use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unexpected character or token.
    Syntax,
    /// Input ended in the middle of a construct.
    UnexpectedEof,
    /// String or indented string without a closing delimiter.
    UnterminatedString,
    /// Block comment without `*/`.
    UnterminatedComment,
    /// Integer or float literal that does not fit its type.
    InvalidNumber,
    /// Security limit exceeded.
    Security,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "SyntaxError"),
            Self::UnexpectedEof => write!(f, "UnexpectedEof"),
            Self::UnterminatedString => write!(f, "UnterminatedString"),
            Self::UnterminatedComment => write!(f, "UnterminatedComment"),
            Self::InvalidNumber => write!(f, "InvalidNumber"),
            Self::Security => write!(f, "SecurityError"),
        }
    }
}

/// An error that occurred while parsing Nix source.
#[derive(Debug, Clone, Error)]
#[error("{kind} at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Line number (1-based).
    pub line: usize,
    /// Column number (1-based).
    pub column: usize,
}

impl ParseError {
    /// Create a new error at `pos`.
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, pos: SourcePos) -> Self {
        Self {
            kind,
            message: message.into(),
            line: pos.line(),
            column: pos.column(),
        }
    }

    pub fn syntax(message: impl Into<String>, pos: SourcePos) -> Self {
        Self::new(ParseErrorKind::Syntax, message, pos)
    }

    pub fn eof(message: impl Into<String>, pos: SourcePos) -> Self {
        Self::new(ParseErrorKind::UnexpectedEof, message, pos)
    }

    pub fn unterminated_string(pos: SourcePos) -> Self {
        Self::new(ParseErrorKind::UnterminatedString, "unterminated string", pos)
    }

    pub fn unterminated_comment(pos: SourcePos) -> Self {
        Self::new(
            ParseErrorKind::UnterminatedComment,
            "unterminated block comment",
            pos,
        )
    }

    pub fn invalid_number(literal: &str, pos: SourcePos) -> Self {
        Self::new(
            ParseErrorKind::InvalidNumber,
            format!("invalid number literal '{}'", literal),
            pos,
        )
    }

    pub fn security(message: impl Into<String>, pos: SourcePos) -> Self {
        Self::new(ParseErrorKind::Security, message, pos)
    }

    /// Position the error points at.
    pub fn pos(&self) -> SourcePos {
        SourcePos::new(self.line, self.column)
    }
}

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ParseError::syntax("expected ';'", SourcePos::new(4, 12));
        let msg = err.to_string();
        assert!(msg.contains("SyntaxError"));
        assert!(msg.contains("line 4, column 12"));
        assert!(msg.contains("expected ';'"));
    }

    #[test]
    fn test_error_constructors() {
        let pos = SourcePos::new(1, 1);
        assert_eq!(ParseError::eof("x", pos).kind, ParseErrorKind::UnexpectedEof);
        assert_eq!(
            ParseError::unterminated_string(pos).kind,
            ParseErrorKind::UnterminatedString
        );
        assert_eq!(
            ParseError::unterminated_comment(pos).kind,
            ParseErrorKind::UnterminatedComment
        );
        assert_eq!(
            ParseError::invalid_number("99999999999999999999", pos).kind,
            ParseErrorKind::InvalidNumber
        );
        assert_eq!(ParseError::security("deep", pos).kind, ParseErrorKind::Security);
    }

    #[test]
    fn test_error_pos_roundtrip() {
        let err = ParseError::syntax("boom", SourcePos::new(7, 3));
        assert_eq!(err.pos(), SourcePos::new(7, 3));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(ParseError::syntax("test", SourcePos::start()));
    }
}
