// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The error types surfaced by the compiler and the match engine.

use std::fmt;

/// Location information attached to a compile-time syntax error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number within the pattern source.
    pub line: u32,
    /// 0-based offset within `line`, in code units.
    pub offset: u32,
    /// Up to 16 code units preceding the error.
    pub before: String,
    /// Up to 16 code units following the error.
    pub after: String,
}

impl ParseError {
    pub(crate) fn at(source: &[u16], pos: usize) -> ParseError {
        let mut line = 1u32;
        let mut line_start = 0usize;
        for (i, &u) in source[..pos.min(source.len())].iter().enumerate() {
            if u == '\n' as u16 {
                line += 1;
                line_start = i + 1;
            }
        }
        let ctx = |range: std::ops::Range<usize>| -> String {
            String::from_utf16_lossy(&source[range.start.min(source.len())..range.end.min(source.len())])
        };
        let before_start = pos.saturating_sub(16);
        let after_end = (pos + 16).min(source.len());
        ParseError {
            line,
            offset: (pos - line_start) as u32,
            before: ctx(before_start..pos),
            after: ctx(pos..after_end),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, offset {}: ...{}<HERE>{}...",
            self.line, self.offset, self.before, self.after
        )
    }
}

/// Every error this crate can produce, spanning the three bands described in
/// the design: compile-time, runtime matching, and programmer errors.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("internal error: {0}")]
    Internal(String),

    #[error("syntax error in pattern ({0})")]
    RuleSyntax(ParseError),

    #[error("operation requires a successful prior match")]
    InvalidState,

    #[error("bad escape sequence ({0})")]
    BadEscapeSequence(ParseError),

    #[error("invalid Unicode property expression ({0})")]
    PropertySyntax(ParseError),

    #[error("unimplemented regex feature: {0}")]
    Unimplemented(&'static str),

    #[error("mismatched parenthesis ({0})")]
    MismatchedParen(ParseError),

    #[error("number too big in pattern ({0})")]
    NumberTooBig(ParseError),

    #[error("bad interval in pattern ({0})")]
    BadInterval(ParseError),

    #[error("quantifier maximum is less than its minimum ({0})")]
    MaxLtMin(ParseError),

    #[error("backreference to a nonexistent group ({0})")]
    InvalidBackRef(ParseError),

    #[error("invalid flag bits: {0:#x}")]
    InvalidFlag(u32),

    #[error("lookbehind subexpression has no bounded maximum length ({0})")]
    LookBehindLimit(ParseError),

    #[error("a set may not contain a multi-codepoint string ({0})")]
    SetContainsString(ParseError),

    #[error("missing closing bracket for character class ({0})")]
    MissingCloseBracket(ParseError),

    #[error("invalid range in character class ({0})")]
    InvalidRange(ParseError),

    #[error("backtrack stack exceeded its configured capacity")]
    StackOverflow,

    #[error("match exceeded its configured time budget")]
    TimeOut,

    #[error("match was aborted by the caller's callback")]
    StoppedByCaller,

    #[error("compiled pattern exceeded its configured size limit")]
    PatternTooBig,

    #[error("no capture group named {0:?}")]
    InvalidCaptureGroupName(String),
}

pub type Result<T> = std::result::Result<T, Error>;
</content>
