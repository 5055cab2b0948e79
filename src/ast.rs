// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The parse tree the lexer/parser front end produces and the compiler's
//! emit pass consumes. Fixed here because the distilled spec left the
//! front end's recursive-descent details unspecified but named the
//! opcodes it must ultimately emit (§4.2.1 of the expanded spec).

use crate::sets::UnicodeSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnchorKind {
    StartOfText,   // \A
    EndOfText,     // \z
    EndOfTextOrNl, // \Z (not currently surfaced by the lexer, reserved)
    Caret,         // ^
    Dollar,        // $
    PrevMatchEnd,  // \G
}

/// The handful of escapes whose behavior isn't just "match this set" and so
/// don't fit `Ast::Class`: a grapheme cluster (`\X`) and a platform-neutral
/// newline sequence (`\R`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shorthand {
    Grapheme,
    NewlineSeq,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LookKind {
    Ahead,
    AheadNeg,
    Behind,
    BehindNeg,
}

#[derive(Clone, Debug)]
pub enum Ast {
    Empty,
    Literal(char),
    /// A resolved character class, already unioned from escapes/ranges.
    Class(UnicodeSet),
    AnyChar,
    Concat(Vec<Ast>),
    Alternate(Vec<Ast>),
    Group {
        capture: Option<u32>,
        name: Option<String>,
        atomic: bool,
        body: Box<Ast>,
    },
    Repeat {
        body: Box<Ast>,
        min: u32,
        max: Option<u32>, // None == unbounded
        greedy: bool,
    },
    Anchor(AnchorKind),
    WordBoundary {
        negated: bool,
        unicode: bool,
    },
    Backref {
        group: u32,
    },
    Lookaround {
        kind: LookKind,
        body: Box<Ast>,
    },
    Shorthand(Shorthand),
}
</content>
