// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `CompiledPattern`: the immutable, shareable result of compiling a
//! pattern. Plays the role the teacher's `Program` struct played (a
//! finished, cloneable compiled-regex value the matcher executes), but the
//! instruction array is now a packed [`crate::stack::Stack64`] rather than
//! a `Vec<Inst>`, and engine selection is gone: there is exactly one
//! backtracking virtual machine.

use std::collections::HashMap;
use std::sync::Arc;

use crate::flags::Flags;
use crate::sets::UnicodeSet;
use crate::stack::Stack64;

/// A hint about what the first matched character can be, used by `find` to
/// skip candidate start positions cheaply instead of attempting a full
/// match at every offset.
#[derive(Clone, Debug)]
pub enum StartType {
    /// Nothing useful is known; try every offset.
    NoInfo,
    /// The match can only begin with this literal character.
    Char(char),
    /// The match can only begin with this literal run of characters.
    String(Vec<u16>),
    /// The match can only begin with a character in this set (by index
    /// into `CompiledPattern::sets`).
    Set(usize),
    /// The pattern is anchored to the very start of the input (`\A`, or
    /// `^` without `MULTILINE`).
    StartOfText,
    /// The pattern is anchored to a line start (`^` with `MULTILINE`).
    LineStart,
}

/// An immutable compiled pattern. Safe to share across threads: nothing
/// about matching a pattern mutates this value, matcher-side state (the
/// frame stack, current position, and so on) lives entirely in
/// [`crate::engine`] and [`crate::matcher::Matcher`].
#[derive(Debug)]
pub struct CompiledPattern {
    pub source: String,
    pub flags: Flags,
    pub code: Stack64,
    /// Literal UTF-16 code units referenced by `String`/`StringI` opcodes
    /// and loop-optimization opcodes, packed end to end; each reference
    /// names an offset and a length within this pool.
    pub literals: Vec<u16>,
    pub sets: Vec<UnicodeSet>,
    /// `group_map[i] = (start_slot, end_slot)` for capture group `i`,
    /// where group 0 is the whole match.
    pub group_map: Vec<(usize, usize)>,
    pub named_capture_map: HashMap<String, u32>,
    /// Number of `u64` slots in one backtracking frame (the unit
    /// `STATE_SAVE`/`BACKTRACK` copy onto/off of the frame stack).
    pub frame_size: usize,
    /// Size of the per-match scratch data area; equal to `frame_size` in
    /// this implementation, since captures, loop counters and lookaround
    /// bookkeeping all live inside the frame rather than in a side array.
    pub data_size: usize,
    pub start_type: StartType,
    pub min_match_len: usize,
}

impl CompiledPattern {
    pub fn num_captures(&self) -> usize {
        self.group_map.len()
    }
}

/// A cheaply-cloneable handle to a compiled pattern, the thing callers
/// actually hold (mirrors the teacher's `Program` being wrapped in `Regex`).
pub type SharedPattern = Arc<CompiledPattern>;
</content>
