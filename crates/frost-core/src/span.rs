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

//! Source position and span tracking for Nix syntax trees.
//!
//! Every node produced by the parser carries a [`Span`]. Positions are
//! 1-based. Columns count bytes of UTF-8 source, matching the positions
//! reported by `builtins.unsafeGetAttrPos`.
//!
//! # Examples
//!
//! ```
//! use frost_core::{SourcePos, Span};
//!
//! let span = Span::new(SourcePos::new(3, 5), SourcePos::new(3, 12));
//! assert!(span.contains(SourcePos::new(3, 7)));
//! assert!(!span.contains(SourcePos::new(4, 1)));
//! ```

use std::cmp::Ordering;
use std::fmt;

/// A position in source code (line and column).
///
/// Line and column numbers are 1-indexed. `SourcePos::default()` is the
/// zero position and never appears in a parsed tree.
///
/// Positions order lexicographically: first by line, then by column.
///
/// ```
/// use frost_core::SourcePos;
///
/// assert!(SourcePos::new(2, 1) > SourcePos::new(1, 80));
/// assert!(SourcePos::new(2, 3) < SourcePos::new(2, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SourcePos {
    line: usize,
    column: usize,
}

impl SourcePos {
    /// Creates a new source position.
    #[inline]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Creates a position at the start of the file (line 1, column 1).
    #[inline]
    pub const fn start() -> Self {
        Self { line: 1, column: 1 }
    }

    /// Returns the line number.
    #[inline]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the column number.
    #[inline]
    pub const fn column(&self) -> usize {
        self.column
    }

    /// Advances the position by one column.
    #[inline]
    pub fn advance_col(&mut self) {
        self.column += 1;
    }

    /// Advances the position by `width` columns.
    #[inline]
    pub fn advance_cols(&mut self, width: usize) {
        self.column += width;
    }

    /// Moves to the next line (increments line, resets column to 1).
    #[inline]
    pub fn next_line(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl Ord for SourcePos {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then(self.column.cmp(&other.column))
    }
}

impl PartialOrd for SourcePos {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// A span in source code (start and end positions).
///
/// Spans are half-open intervals [start, end) for layout purposes, but
/// [`Span::contains`] treats the end as inclusive so that a position
/// reported at the very end of a name still falls inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: SourcePos,
    end: SourcePos,
}

impl Span {
    /// Creates a new span from start and end positions.
    #[inline]
    pub const fn new(start: SourcePos, end: SourcePos) -> Self {
        Self { start, end }
    }

    /// Creates a zero-width span at a single position.
    #[inline]
    pub const fn point(pos: SourcePos) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Gets the start position (inclusive).
    #[inline]
    pub const fn start(&self) -> SourcePos {
        self.start
    }

    /// Gets the end position (exclusive).
    #[inline]
    pub const fn end(&self) -> SourcePos {
        self.end
    }

    /// Checks if this span is on a single line.
    #[inline]
    pub const fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// Returns `true` if `pos` lies within `[start, end]`.
    ///
    /// The comparison is lexicographic on (line, column), so a position on
    /// an intermediate line of a multi-line span is inside regardless of
    /// its column.
    #[inline]
    pub fn contains(&self, pos: SourcePos) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Combines two spans into a larger span covering both.
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_line() {
            write!(
                f,
                "{}:{}-{}",
                self.start.line, self.start.column, self.end.column
            )
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_pos_start() {
        let pos = SourcePos::start();
        assert_eq!(pos.line(), 1);
        assert_eq!(pos.column(), 1);
    }

    #[test]
    fn test_source_pos_navigation() {
        let mut pos = SourcePos::new(5, 10);
        pos.advance_col();
        assert_eq!(pos, SourcePos::new(5, 11));
        pos.next_line();
        assert_eq!(pos, SourcePos::new(6, 1));
    }

    #[test]
    fn test_source_pos_ordering_is_lexicographic() {
        assert!(SourcePos::new(1, 50) < SourcePos::new(2, 1));
        assert!(SourcePos::new(2, 1) < SourcePos::new(2, 2));
        assert_eq!(
            SourcePos::new(4, 4).cmp(&SourcePos::new(4, 4)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_span_contains_single_line() {
        let span = Span::new(SourcePos::new(3, 5), SourcePos::new(3, 10));
        assert!(span.contains(SourcePos::new(3, 5)));
        assert!(span.contains(SourcePos::new(3, 10)));
        assert!(!span.contains(SourcePos::new(3, 4)));
        assert!(!span.contains(SourcePos::new(3, 11)));
    }

    #[test]
    fn test_span_contains_multi_line() {
        // Middle lines are inside even with a column outside both bounds.
        let span = Span::new(SourcePos::new(2, 20), SourcePos::new(4, 3));
        assert!(span.contains(SourcePos::new(3, 1)));
        assert!(span.contains(SourcePos::new(3, 99)));
        assert!(span.contains(SourcePos::new(2, 30)));
        assert!(!span.contains(SourcePos::new(2, 19)));
        assert!(!span.contains(SourcePos::new(4, 4)));
    }

    #[test]
    fn test_span_merge() {
        let a = Span::new(SourcePos::new(1, 5), SourcePos::new(2, 10));
        let b = Span::new(SourcePos::new(3, 1), SourcePos::new(4, 5));
        let merged = a.merge(b);
        assert_eq!(merged.start(), SourcePos::new(1, 5));
        assert_eq!(merged.end(), SourcePos::new(4, 5));
        assert_eq!(a.merge(a), a);
    }

    #[test]
    fn test_span_display() {
        let single = Span::new(SourcePos::new(5, 10), SourcePos::new(5, 20));
        assert_eq!(format!("{}", single), "5:10-20");

        let multi = Span::new(SourcePos::new(5, 10), SourcePos::new(7, 5));
        assert_eq!(format!("{}", multi), "line 5, column 10-line 7, column 5");
    }
}
