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

//! Source comments and comment-marker stripping.

use crate::span::Span;

/// How a comment was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `# text`
    Line,
    /// `/* text */`
    Block,
}

/// A comment with its markers already removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub span: Span,
    pub style: CommentStyle,
}

impl Comment {
    /// Build a comment from its raw source text, markers included.
    pub fn from_source(raw: &str, span: Span) -> Self {
        if raw.starts_with("/*") {
            Self {
                text: strip_block_comment(raw),
                span,
                style: CommentStyle::Block,
            }
        } else {
            Self {
                text: strip_line_comment(raw),
                span,
                style: CommentStyle::Line,
            }
        }
    }
}

/// Join comment texts with newlines, in order.
///
/// ```
/// use frost_core::{join_comments, Comment, Span};
///
/// let comments = vec![
///     Comment::from_source("# first", Span::default()),
///     Comment::from_source("# second", Span::default()),
/// ];
/// assert_eq!(join_comments(&comments), "first\nsecond");
/// ```
pub fn join_comments(comments: &[Comment]) -> String {
    comments
        .iter()
        .map(|comment| comment.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// `#`-markers and a single following space are removed; the rest of the
/// line keeps its indentation so code samples survive.
fn strip_line_comment(raw: &str) -> String {
    let body = raw.trim_start_matches('#');
    let body = body.strip_prefix(' ').unwrap_or(body);
    body.trim_end().to_string()
}

fn strip_block_comment(raw: &str) -> String {
    let inner = raw.strip_prefix("/*").unwrap_or(raw);
    let inner = inner.strip_suffix("*/").unwrap_or(inner);
    // `/** doc */` style
    let inner = inner.strip_prefix('*').unwrap_or(inner);

    let mut lines: Vec<&str> = inner.lines().map(str::trim_end).collect();
    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }

    let gutter = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .all(|line| line.trim_start().starts_with('*'));

    if gutter {
        return lines
            .iter()
            .map(|line| {
                let rest = line.trim_start().trim_start_matches('*');
                rest.strip_prefix(' ').unwrap_or(rest)
            })
            .collect::<Vec<_>>()
            .join("\n");
    }

    let indent = lines
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|line| {
            if line.len() >= indent && line.is_char_boundary(indent) {
                &line[indent..]
            } else {
                line.trim_start()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> String {
        Comment::from_source(raw, Span::default()).text
    }

    #[test]
    fn test_line_comment() {
        assert_eq!(text("# hello"), "hello");
        assert_eq!(text("#hello"), "hello");
        assert_eq!(text("## heading  "), "heading");
        assert_eq!(text("#   indented"), "  indented");
        assert_eq!(text("#"), "");
    }

    #[test]
    fn test_line_comment_style() {
        let comment = Comment::from_source("# x", Span::default());
        assert_eq!(comment.style, CommentStyle::Line);
    }

    #[test]
    fn test_block_comment_single_line() {
        assert_eq!(text("/* hello */"), "hello");
        assert_eq!(
            Comment::from_source("/* x */", Span::default()).style,
            CommentStyle::Block
        );
    }

    #[test]
    fn test_block_comment_with_gutter() {
        let raw = "/**\n * Adds two numbers.\n *\n * Example: add 1 2\n */";
        assert_eq!(text(raw), "Adds two numbers.\n\nExample: add 1 2");
    }

    #[test]
    fn test_block_comment_common_indent() {
        let raw = "/*\n    Summary line.\n\n      code sample\n  */";
        assert_eq!(text(raw), "Summary line.\n\n  code sample");
    }

    #[test]
    fn test_join_empty() {
        assert_eq!(join_comments(&[]), "");
    }
}
