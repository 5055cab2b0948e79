// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The backtracking virtual machine: a dispatch loop over the opcode
//! stream a [`CompiledPattern`] carries, plus the outer scan loop that
//! walks candidate start positions using the pattern's [`StartType`].
//!
//! This plays the role of the teacher's `backtrack`/`exec` pair (the
//! bounded-backtracking `Backtrack` engine plus the `Exec` dispatcher
//! that picks an engine and drives it to a match), collapsed into one
//! engine since this design has no NFA-simulation alternative to pick
//! between.

use std::time::Instant;

use crate::error::Error;
use crate::opcode::{self, op_type, op_value, OpCode};
use crate::program::{CompiledPattern, StartType};
use crate::sets::{fold_case, fold_eq};
use crate::stack::Stack64;
use crate::text::{decode_units, FoldingCursor, Utf16Text};

/// Sentinel written into a capture slot that has never been set. Distinct
/// from any real offset (offsets are bounded by `text.len()`, far below
/// `u64::MAX`), so an unset backreference can be told apart from a capture
/// that matched the empty string.
pub const NOT_SET: u64 = u64::MAX;

/// How many instructions the engine executes between checks of the
/// deadline and caller callback. Checking every instruction would make
/// the budget itself the bottleneck; checking too rarely makes a timeout
/// take too long to land.
const CHECK_INTERVAL: u64 = 4096;

/// A match-time budget: an optional wall-clock deadline and an optional
/// callback the caller can use to cancel a long-running match early.
pub struct Budget<'cb> {
    pub deadline: Option<Instant>,
    pub callback: Option<&'cb mut dyn FnMut(u64) -> bool>,
    steps: u64,
}

impl<'cb> Budget<'cb> {
    pub fn unlimited() -> Budget<'cb> {
        Budget {
            deadline: None,
            callback: None,
            steps: 0,
        }
    }

    pub fn with_deadline(deadline: Instant) -> Budget<'cb> {
        Budget {
            deadline: Some(deadline),
            callback: None,
            steps: 0,
        }
    }

    fn tick(&mut self) -> Result<(), Error> {
        self.steps += 1;
        if self.steps % CHECK_INTERVAL != 0 {
            return Ok(());
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(Error::TimeOut);
            }
        }
        if let Some(cb) = self.callback.as_deref_mut() {
            if !cb(self.steps) {
                return Err(Error::StoppedByCaller);
            }
        }
        Ok(())
    }
}

/// The text and region a single match attempt runs against.
pub struct MatchContext<'t> {
    pub text: &'t Utf16Text,
    pub region_start: usize,
    pub region_end: usize,
    /// Position `\G` anchors to: the start of the current match attempt.
    pub anchor_start: usize,
}

/// The outcome of a successful match: one `(start, end)` code-unit span per
/// capture group, indexed from 0 (the whole match).
#[derive(Clone, Debug)]
pub struct MatchResult {
    pub captures: Vec<Option<(usize, usize)>>,
}

impl MatchResult {
    pub fn start(&self) -> usize {
        self.captures[0].expect("group 0 always matches").0
    }

    pub fn end(&self) -> usize {
        self.captures[0].expect("group 0 always matches").1
    }

    pub fn group(&self, i: usize) -> Option<(usize, usize)> {
        self.captures.get(i).copied().flatten()
    }
}

/// Scan `text` for the next match at or after `from`, restricted to
/// `[region_start, region_end)`, using `pattern.start_type` to skip
/// positions that cannot possibly begin a match.
///
/// `anchor_start` is what `\G` tests against; it is held fixed across every
/// candidate position this scan tries. A caller repeating `find` to walk
/// successive matches over the same text passes the end of the previous
/// match here, matching the convention `find`'s own unit tests and
/// `matcher::Matcher` both rely on.
pub fn find(
    pattern: &CompiledPattern,
    text: &Utf16Text,
    from: usize,
    region_start: usize,
    region_end: usize,
    anchor_start: usize,
    stack_limit: usize,
    budget: &mut Budget,
) -> Result<Option<MatchResult>, Error> {
    let mut pos = from.max(region_start);
    loop {
        if pos > region_end {
            return Ok(None);
        }
        match &pattern.start_type {
            StartType::NoInfo => {}
            StartType::StartOfText => {
                if pos != region_start {
                    return Ok(None);
                }
            }
            StartType::LineStart => {
                if pos != region_start {
                    let at_line_start = match text.char_before(pos) {
                        Some((c, _)) => text.is_line_break(c, pattern.flags.unix_lines()),
                        None => true,
                    };
                    if !at_line_start {
                        let (_, w) = text.char_at(pos).unwrap_or(('\0', 1));
                        pos += w;
                        continue;
                    }
                }
            }
            StartType::Char(c) => match crate::literals::find_char(text, pos, region_end, *c) {
                Some(p) => pos = p,
                None => return Ok(None),
            },
            StartType::String(units) => {
                match crate::literals::find_units(text, pos, region_end, units) {
                    Some(p) => pos = p,
                    None => return Ok(None),
                }
            }
            StartType::Set(idx) => {
                match crate::literals::find_set(text, pos, region_end, &pattern.sets[*idx]) {
                    Some(p) => pos = p,
                    None => return Ok(None),
                }
            }
        }
        if pattern.min_match_len > 0 && pos + pattern.min_match_len > region_end {
            return Ok(None);
        }
        let ctx = MatchContext {
            text,
            region_start,
            region_end,
            anchor_start,
        };
        match try_match(pattern, &ctx, pos, stack_limit, budget)? {
            Some(result) => return Ok(Some(result)),
            None => {
                if matches!(pattern.start_type, StartType::StartOfText) {
                    return Ok(None);
                }
                let (_, w) = text.char_at(pos).unwrap_or(('\0', 1));
                pos += w.max(1);
            }
        }
    }
}

/// Attempt a single match anchored exactly at `start`; no scanning.
pub fn try_match(
    pattern: &CompiledPattern,
    ctx: &MatchContext,
    start: usize,
    stack_limit: usize,
    budget: &mut Budget,
) -> Result<Option<MatchResult>, Error> {
    let frame_size = pattern.frame_size;
    let mut current = vec![0u64; frame_size];
    for &(s, e) in &pattern.group_map {
        current[s] = NOT_SET;
        current[e] = NOT_SET;
    }

    let mut stack = Stack64::new();
    stack.set_max_capacity(stack_limit);

    let mut pos = start;
    let mut pc: usize = 0;

    macro_rules! fail {
        () => {{
            if !backtrack(&mut stack, &mut current, &mut pos, &mut pc, frame_size)? {
                return Ok(None);
            }
            continue;
        }};
    }

    loop {
        budget.tick()?;
        let word = pattern.code.get(pc);
        match op_type(word) {
            OpCode::End => return Ok(Some(build_result(pattern, &current))),
            OpCode::Fail => fail!(),
            OpCode::Nop => pc += 1,
            OpCode::Jmp | OpCode::JmpX => pc = op_value(word) as usize,
            OpCode::StateSave => {
                push_frame(&mut stack, &current, pos, op_value(word) as usize, frame_size)?;
                pc += 1;
            }
            OpCode::Backtrack => fail!(),
            OpCode::JmpSav | OpCode::JmpSavX => {
                push_frame(&mut stack, &current, pos, pc + 1, frame_size)?;
                pc = op_value(word) as usize;
            }

            OpCode::OneChar => {
                let target = decode_char_operand(word)?;
                match ctx.text.char_at(pos) {
                    Some((c, w)) if c == target => {
                        pos += w;
                        pc += 1;
                    }
                    _ => fail!(),
                }
            }
            OpCode::OneCharI => {
                let target = decode_char_operand(word)?;
                match fold_match(ctx.text, pos, &fold_case(target)) {
                    Some(new_pos) => {
                        pos = new_pos;
                        pc += 1;
                    }
                    None => fail!(),
                }
            }
            OpCode::String => {
                let offset = op_value(word) as usize;
                let len = opcode::unpack_i32(pattern.code.get(pc + 1)) as usize;
                let lit = &pattern.literals[offset..offset + len];
                let hay = ctx.text.units();
                if pos + len <= hay.len() && hay[pos..pos + len] == *lit {
                    pos += len;
                    pc += 2;
                } else {
                    fail!()
                }
            }
            OpCode::StringI => {
                let offset = op_value(word) as usize;
                let len = opcode::unpack_i32(pattern.code.get(pc + 1)) as usize;
                let lit = &pattern.literals[offset..offset + len];
                let folded = fold_seq(&decode_units(lit));
                match fold_match(ctx.text, pos, &folded) {
                    Some(new_pos) => {
                        pos = new_pos;
                        pc += 2;
                    }
                    None => fail!(),
                }
            }
            OpCode::DotAny => match dot_any_at(pattern, ctx.text, pos) {
                Some(w) => {
                    pos += w;
                    pc += 1;
                }
                None => fail!(),
            },
            OpCode::DotAnyAll => match ctx.text.char_at(pos) {
                Some((_, w)) => {
                    pos += w;
                    pc += 1;
                }
                None => fail!(),
            },
            OpCode::DotAnyUnix => match ctx.text.char_at(pos) {
                Some((c, w)) if c != '\n' => {
                    pos += w;
                    pc += 1;
                }
                _ => fail!(),
            },
            OpCode::SetRef => {
                let (idx, negated) = opcode::op_set_ref(word);
                match ctx.text.char_at(pos) {
                    Some((c, w)) if pattern.sets[idx].contains(c) != negated => {
                        pos += w;
                        pc += 1;
                    }
                    _ => fail!(),
                }
            }
            OpCode::StaticSetRef | OpCode::StatSetRefN => {
                let idx = op_value(word);
                let negated = op_type(word) == OpCode::StatSetRefN;
                let set = static_set(idx)?;
                match ctx.text.char_at(pos) {
                    Some((c, w)) if set.contains(c) != negated => {
                        pos += w;
                        pc += 1;
                    }
                    _ => fail!(),
                }
            }
            OpCode::BackslashD => match ctx.text.char_at(pos) {
                Some((c, w)) if crate::sets::builtin::digit().contains(c) => {
                    pos += w;
                    pc += 1;
                }
                _ => fail!(),
            },
            OpCode::BackslashH => match ctx.text.char_at(pos) {
                Some((c, w)) if crate::sets::builtin::horiz_space().contains(c) => {
                    pos += w;
                    pc += 1;
                }
                _ => fail!(),
            },
            OpCode::BackslashV => match ctx.text.char_at(pos) {
                Some((c, w)) if crate::sets::builtin::vert_space().contains(c) => {
                    pos += w;
                    pc += 1;
                }
                _ => fail!(),
            },
            OpCode::BackslashR => match newline_seq_width(ctx.text, pos) {
                Some(w) => {
                    pos += w;
                    pc += 1;
                }
                None => fail!(),
            },
            OpCode::BackslashX => match grapheme_cluster_width(ctx.text, pos) {
                Some(w) => {
                    pos += w;
                    pc += 1;
                }
                None => fail!(),
            },

            OpCode::BackslashB | OpCode::BackslashBu => {
                let negated = op_value(word) != 0;
                let unicode = op_type(word) == OpCode::BackslashBu;
                let boundary = is_word_boundary(ctx.text, pos, unicode);
                if boundary != negated {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::BackslashG => {
                if pos == ctx.anchor_start {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::BackslashZ => {
                if pos == ctx.region_end {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::Caret => {
                if pos == ctx.region_start {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::CaretM => {
                if at_multiline_start(ctx, pos, false) {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::CaretMUnix => {
                if at_multiline_start(ctx, pos, true) {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::Dollar => {
                if at_end_with_terminator(ctx, pos, false) {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::DollarD => {
                if at_end_with_terminator(ctx, pos, true) {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::DollarM => {
                if at_multiline_end(ctx, pos, false) {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::DollarMd => {
                if at_multiline_end(ctx, pos, true) {
                    pc += 1;
                } else {
                    fail!()
                }
            }

            OpCode::StartCapture => {
                let g = op_value(word) as usize;
                current[pattern.group_map[g].0] = pos as u64;
                pc += 1;
            }
            OpCode::EndCapture => {
                let g = op_value(word) as usize;
                current[pattern.group_map[g].1] = pos as u64;
                pc += 1;
            }

            OpCode::CtrInit | OpCode::CtrInitNg => {
                let ctr_slot = op_value(word) as usize;
                current[ctr_slot] = 0;
                pc += 1;
            }
            OpCode::StoInpLoc => {
                let slot = op_value(word) as usize;
                current[slot] = pos as u64;
                pc += 1;
            }
            OpCode::CtrLoop | OpCode::CtrLoopNg => {
                let greedy = op_type(word) == OpCode::CtrLoop;
                let body_start = op_value(word) as usize;
                let min = opcode::unpack_i32(pattern.code.get(pc + 1)) as i64;
                let max_raw = opcode::unpack_i32(pattern.code.get(pc + 2));
                let max = if max_raw < 0 { None } else { Some(max_raw as i64) };
                let ctr_slot = pattern.code.get(pc + 3) as usize;
                let fallthrough = pc + 4;

                let counter = current[ctr_slot] as i64 + 1;
                let last_pos = current[ctr_slot + 1] as usize;
                let zero_progress = pos == last_pos;
                current[ctr_slot] = counter as u64;

                if counter < min {
                    if zero_progress {
                        fail!();
                    }
                    pc = body_start;
                } else {
                    let at_max = max.map_or(false, |m| counter >= m);
                    if zero_progress || at_max {
                        pc = fallthrough;
                    } else if greedy {
                        push_frame(&mut stack, &current, pos, fallthrough, frame_size)?;
                        pc = body_start;
                    } else {
                        push_frame(&mut stack, &current, pos, body_start, frame_size)?;
                        pc = fallthrough;
                    }
                }
            }

            OpCode::StoSp => {
                let slot = op_value(word) as usize;
                current[slot] = stack.size() as u64;
                pc += 1;
            }
            OpCode::LdSp => {
                let slot = op_value(word) as usize;
                stack.truncate_to(current[slot] as usize);
                pc += 1;
            }

            OpCode::BackRef => {
                let g = op_value(word) as usize;
                let (s_slot, e_slot) = pattern.group_map[g];
                let (s, e) = (current[s_slot], current[e_slot]);
                if s == NOT_SET || e == NOT_SET {
                    pc += 1;
                } else {
                    let (s, e) = (s as usize, e as usize);
                    let len = e - s;
                    let hay = ctx.text.units();
                    if pos + len <= hay.len() && hay[pos..pos + len] == hay[s..e] {
                        pos += len;
                        pc += 1;
                    } else {
                        fail!()
                    }
                }
            }
            OpCode::BackRefI => {
                let g = op_value(word) as usize;
                let (s_slot, e_slot) = pattern.group_map[g];
                let (s, e) = (current[s_slot], current[e_slot]);
                if s == NOT_SET || e == NOT_SET {
                    pc += 1;
                } else {
                    let (s, e) = (s as usize, e as usize);
                    let folded = fold_seq(&decode_units(&ctx.text.units()[s..e]));
                    match fold_match(ctx.text, pos, &folded) {
                        Some(new_pos) => {
                            pos = new_pos;
                            pc += 1;
                        }
                        None => fail!(),
                    }
                }
            }

            OpCode::LaStart => {
                let la_slot = op_value(word) as usize;
                current[la_slot] = pos as u64;
                current[la_slot + 1] = stack.size() as u64;
                pc += 1;
            }
            OpCode::LaEnd => {
                let la_slot = op_value(word) as usize;
                pos = current[la_slot] as usize;
                stack.truncate_to(current[la_slot + 1] as usize);
                pc += 1;
            }

            OpCode::LbStart => {
                let lb_slot = op_value(word) as usize;
                let min_len = opcode::unpack_i32(pattern.code.get(pc + 1)) as usize;
                let max_len = opcode::unpack_i32(pattern.code.get(pc + 2)) as usize;
                let target = pos;
                let available = pos.saturating_sub(ctx.region_start);
                let try_len = max_len.min(available);
                if try_len < min_len {
                    fail!();
                }
                current[lb_slot] = target as u64;
                current[lb_slot + 1] = try_len as u64;
                pos = target - try_len;
                pc += 3;
            }
            OpCode::LbEnd => {
                let lb_slot = op_value(word) as usize;
                if pos == current[lb_slot] as usize {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::LbCont => {
                let lb_slot = op_value(word) as usize;
                let min_len = opcode::unpack_i32(pattern.code.get(pc + 1)) as usize;
                let body_start = pattern.code.get(pc + 2) as usize;
                let try_len = current[lb_slot + 1] as usize;
                if try_len <= min_len {
                    fail!();
                }
                let new_try_len = try_len - 1;
                current[lb_slot + 1] = new_try_len as u64;
                push_frame(&mut stack, &current, pos, pc, frame_size)?;
                let target = current[lb_slot] as usize;
                pos = target - new_try_len;
                pc = body_start;
            }
            OpCode::LbnEnd => {
                let lb_slot = op_value(word) as usize;
                if pos == current[lb_slot] as usize {
                    pc += 1;
                } else {
                    fail!()
                }
            }
            OpCode::LbnCont => {
                let lb_slot = op_value(word) as usize;
                let min_len = opcode::unpack_i32(pattern.code.get(pc + 1)) as usize;
                let body_start = pattern.code.get(pc + 2) as usize;
                let try_len = current[lb_slot + 1] as usize;
                if try_len <= min_len {
                    pc += 3;
                } else {
                    let new_try_len = try_len - 1;
                    current[lb_slot + 1] = new_try_len as u64;
                    push_frame(&mut stack, &current, pos, pc, frame_size)?;
                    let target = current[lb_slot] as usize;
                    pos = target - new_try_len;
                    pc = body_start;
                }
            }

            OpCode::LoopDotI => {
                let loop_slot = op_value(word) as usize;
                let min = opcode::unpack_i32(pattern.code.get(pc + 1)) as u64;
                let fallthrough = pc + 2;
                let count = current[loop_slot];
                match dot_any_at(pattern, ctx.text, pos) {
                    Some(w) => {
                        if count >= min {
                            push_frame(&mut stack, &current, pos, fallthrough, frame_size)?;
                        }
                        pos += w;
                        current[loop_slot] = count + 1;
                    }
                    None => {
                        if count >= min {
                            pc = fallthrough;
                        } else {
                            fail!()
                        }
                    }
                }
            }
            OpCode::LoopSrI => {
                let loop_slot = op_value(word) as usize;
                let min = opcode::unpack_i32(pattern.code.get(pc + 1)) as u64;
                let set_idx = pattern.code.get(pc + 2) as usize;
                let fallthrough = pc + 3;
                let count = current[loop_slot];
                let matched = ctx
                    .text
                    .char_at(pos)
                    .filter(|&(c, _)| pattern.sets[set_idx].contains(c));
                match matched {
                    Some((_, w)) => {
                        if count >= min {
                            push_frame(&mut stack, &current, pos, fallthrough, frame_size)?;
                        }
                        pos += w;
                        current[loop_slot] = count + 1;
                    }
                    None => {
                        if count >= min {
                            pc = fallthrough;
                        } else {
                            fail!()
                        }
                    }
                }
            }
            OpCode::LoopC => {
                let loop_slot = op_value(word) as usize;
                let min = opcode::unpack_i32(pattern.code.get(pc + 1)) as u64;
                let target = char::from_u32(pattern.code.get(pc + 2) as u32)
                    .ok_or_else(|| Error::Internal("bad LoopC operand".into()))?;
                let fallthrough = pc + 3;
                let count = current[loop_slot];
                let case_insensitive = pattern.flags.case_insensitive();
                let matched = ctx.text.char_at(pos).filter(|&(c, _)| {
                    if case_insensitive {
                        fold_eq(c, target)
                    } else {
                        c == target
                    }
                });
                match matched {
                    Some((_, w)) => {
                        if count >= min {
                            push_frame(&mut stack, &current, pos, fallthrough, frame_size)?;
                        }
                        pos += w;
                        current[loop_slot] = count + 1;
                    }
                    None => {
                        if count >= min {
                            pc = fallthrough;
                        } else {
                            fail!()
                        }
                    }
                }
            }
        }
    }
}

fn decode_char_operand(word: u64) -> Result<char, Error> {
    char::from_u32(op_value(word) as u32).ok_or_else(|| Error::Internal("bad char operand".into()))
}

fn static_set(idx: i32) -> Result<&'static crate::sets::UnicodeSet, Error> {
    match idx {
        0 => Ok(crate::sets::builtin::word()),
        1 => Ok(crate::sets::builtin::space()),
        2 => Ok(crate::sets::builtin::alpha()),
        3 => Ok(crate::sets::builtin::alnum()),
        _ => Err(Error::Internal(format!("unknown static set index {idx}"))),
    }
}

fn dot_any_at(pattern: &CompiledPattern, text: &Utf16Text, pos: usize) -> Option<usize> {
    let (c, w) = text.char_at(pos)?;
    if pattern.flags.dotall() {
        return Some(w);
    }
    if text.is_line_break(c, pattern.flags.unix_lines()) {
        None
    } else {
        Some(w)
    }
}

fn newline_seq_width(text: &Utf16Text, pos: usize) -> Option<usize> {
    let (c, w) = text.char_at(pos)?;
    if c == '\r' {
        if let Some((c2, w2)) = text.char_at(pos + w) {
            if c2 == '\n' {
                return Some(w + w2);
            }
        }
        return Some(w);
    }
    if matches!(
        c,
        '\n' | '\u{0B}' | '\u{0C}' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    ) {
        Some(w)
    } else {
        None
    }
}

/// Grapheme clusters are almost never longer than this many code units;
/// capping the lookahead window avoids decoding the whole remaining input
/// just to find one cluster boundary.
const GRAPHEME_SCAN_WINDOW: usize = 64;

fn grapheme_cluster_width(text: &Utf16Text, pos: usize) -> Option<usize> {
    if pos >= text.len() {
        return None;
    }
    let window_end = (pos + GRAPHEME_SCAN_WINDOW).min(text.len());
    let s = text.to_string_range(pos, window_end);
    let char_count = crate::sets::grapheme_len_at(&s, 0);
    let mut width = 0;
    let mut idx = pos;
    for _ in 0..char_count {
        let (_, w) = text.char_at(idx)?;
        width += w;
        idx += w;
    }
    Some(width)
}

fn word_char(c: char, unicode: bool) -> bool {
    if unicode {
        crate::sets::builtin::word().contains(c)
    } else {
        c.is_ascii_alphanumeric() || c == '_'
    }
}

fn is_word_boundary(text: &Utf16Text, pos: usize, unicode: bool) -> bool {
    let before = text.char_before(pos).map(|(c, _)| word_char(c, unicode)).unwrap_or(false);
    let after = text.char_at(pos).map(|(c, _)| word_char(c, unicode)).unwrap_or(false);
    before != after
}

fn at_multiline_start(ctx: &MatchContext, pos: usize, unix: bool) -> bool {
    if pos == ctx.region_start {
        return true;
    }
    matches!(ctx.text.char_before(pos), Some((c, _)) if ctx.text.is_line_break(c, unix))
}

fn at_end_with_terminator(ctx: &MatchContext, pos: usize, unix: bool) -> bool {
    if pos == ctx.region_end {
        return true;
    }
    if let Some((c, w)) = ctx.text.char_at(pos) {
        if pos + w == ctx.region_end && ctx.text.is_line_break(c, unix) {
            return true;
        }
    }
    false
}

fn at_multiline_end(ctx: &MatchContext, pos: usize, unix: bool) -> bool {
    if pos == ctx.region_end {
        return true;
    }
    matches!(ctx.text.char_at(pos), Some((c, _)) if ctx.text.is_line_break(c, unix))
}

/// Compare the folded expansion of `text` starting at `pos` against an
/// already-folded `pattern` sequence, one folded code point at a time.
/// Returns the end position in `text` if the whole pattern matched.
fn fold_match(text: &Utf16Text, pos: usize, pattern: &[char]) -> Option<usize> {
    let mut cursor = FoldingCursor::new(text, pos);
    for &want in pattern {
        match cursor.advance() {
            Some(c) if c == want => continue,
            _ => return None,
        }
    }
    if cursor.in_expansion() {
        return None;
    }
    Some(cursor.pos())
}

fn fold_seq(chars: &[char]) -> Vec<char> {
    chars.iter().flat_map(|&c| fold_case(c)).collect()
}

fn push_frame(
    stack: &mut Stack64,
    current: &[u64],
    pos: usize,
    resume_pc: usize,
    frame_size: usize,
) -> Result<(), Error> {
    stack.push(pos as u64)?;
    stack.push(resume_pc as u64)?;
    for &slot in &current[2..frame_size] {
        stack.push(slot)?;
    }
    Ok(())
}

fn backtrack(
    stack: &mut Stack64,
    current: &mut [u64],
    pos: &mut usize,
    pc: &mut usize,
    frame_size: usize,
) -> Result<bool, Error> {
    if stack.size() < frame_size {
        return Ok(false);
    }
    let view = stack.pop_frame(frame_size)?;
    let words = stack.view(view)?;
    *pos = words[0] as usize;
    *pc = words[1] as usize;
    current[2..frame_size].copy_from_slice(&words[2..frame_size]);
    Ok(true)
}

fn build_result(pattern: &CompiledPattern, current: &[u64]) -> MatchResult {
    let mut captures = Vec::with_capacity(pattern.group_map.len());
    for &(s_slot, e_slot) in &pattern.group_map {
        let (s, e) = (current[s_slot], current[e_slot]);
        if s == NOT_SET || e == NOT_SET {
            captures.push(None);
        } else {
            captures.push(Some((s as usize, e as usize)));
        }
    }
    MatchResult { captures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile;
    use crate::flags::Flags;
    use crate::parser::parse;

    fn run(pattern_src: &str, input: &str, flags: Flags) -> Option<MatchResult> {
        let parsed = parse(pattern_src, flags).unwrap();
        let pattern = compile(pattern_src, &parsed.ast, parsed.flags, parsed.group_count, parsed.named_groups, 1 << 20).unwrap();
        let text = Utf16Text::from_str(input);
        let mut budget = Budget::unlimited();
        find(&pattern, &text, 0, 0, text.len(), 0, 1 << 16, &mut budget).unwrap()
    }

    #[test]
    fn matches_simple_literal() {
        let m = run("abc", "xxabcyy", Flags::default()).unwrap();
        assert_eq!((m.start(), m.end()), (2, 5));
    }

    #[test]
    fn matches_greedy_star() {
        let m = run("a.*b", "a123b456b", Flags::default()).unwrap();
        assert_eq!((m.start(), m.end()), (0, 9));
    }

    #[test]
    fn captures_groups() {
        let m = run(r"(\w+)@(\w+)", "foo@bar", Flags::default()).unwrap();
        assert_eq!(m.group(1), Some((0, 3)));
        assert_eq!(m.group(2), Some((4, 7)));
    }

    #[test]
    fn case_insensitive_literal() {
        let flags = Flags::new(crate::flags::CASE_INSENSITIVE).unwrap();
        let m = run("abc", "XXABCYY", flags).unwrap();
        assert_eq!((m.start(), m.end()), (2, 5));
    }

    #[test]
    fn case_insensitive_sharp_s_expands() {
        let flags = Flags::new(crate::flags::CASE_INSENSITIVE).unwrap();
        let m = run("stra\u{00DF}e", "STRASSE", flags).unwrap();
        assert_eq!((m.start(), m.end()), (0, 7));
    }

    #[test]
    fn backreference_matches_prior_capture() {
        let m = run(r"(\w+)\s\1", "echo echo", Flags::default()).unwrap();
        assert_eq!((m.start(), m.end()), (0, 9));
    }

    #[test]
    fn negative_lookahead_rejects_follow() {
        assert!(run(r"foo(?!bar)", "foobar", Flags::default()).is_none());
        assert!(run(r"foo(?!bar)", "foobaz", Flags::default()).is_some());
    }

    #[test]
    fn positive_lookbehind_requires_prefix() {
        assert!(run(r"(?<=foo)bar", "foobar", Flags::default()).is_some());
        assert!(run(r"(?<=foo)bar", "xxxbar", Flags::default()).is_none());
    }

    #[test]
    fn negative_lookbehind_rejects_prefix() {
        assert!(run(r"(?<!foo)bar", "foobar", Flags::default()).is_none());
        assert!(run(r"(?<!foo)bar", "xxxbar", Flags::default()).is_some());
    }

    #[test]
    fn atomic_group_does_not_give_back() {
        assert!(run(r"(?>a+)a", "aaa", Flags::default()).is_none());
    }

    #[test]
    fn word_boundary_matches_edges() {
        let m = run(r"\bfoo\b", "  foo  ", Flags::default()).unwrap();
        assert_eq!((m.start(), m.end()), (2, 5));
    }

    #[test]
    fn start_anchor_rejects_mid_string() {
        assert!(run(r"^abc", "xabc", Flags::default()).is_none());
        assert!(run(r"^abc", "abc", Flags::default()).is_some());
    }
}
