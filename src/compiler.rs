// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Turns an [`Ast`] plus [`Flags`] into a [`CompiledPattern`]: a single
//! linear emit pass over the tree, picking fused opcodes for the common
//! unbounded-greedy-atom loop shape, and a general `CTR_INIT`/`CTR_LOOP`
//! pair otherwise. Generalizes the teacher's own `compile` module (which
//! built a flat `Vec<Inst>` the same way) to the packed opcode stream and
//! the richer instruction set lookaround and atomic groups need.

use std::collections::HashMap;

use crate::ast::{AnchorKind, Ast, LookKind};
use crate::error::Error;
use crate::flags::Flags;
use crate::opcode::{self, build_op, build_set_ref, patch_operand, InstrIdx, OpCode};
use crate::program::{CompiledPattern, StartType};
use crate::sets::{builtin, case_fold_set, UnicodeSet};
use crate::stack::Stack64;

pub fn compile(
    source: &str,
    ast: &Ast,
    flags: Flags,
    group_count: u32,
    named_groups: HashMap<String, u32>,
    size_limit: usize,
) -> Result<CompiledPattern, Error> {
    check_lookbehind_bounds(ast)?;

    let mut code = Stack64::new();
    code.set_max_capacity(size_limit);
    let mut c = Compiler {
        code,
        literals: Vec::new(),
        sets: Vec::new(),
        flags,
        next_slot: 2 + 2 * (group_count as usize + 1),
    };

    c.emit_op(OpCode::StartCapture, 0)?;
    c.emit_node(ast)?;
    c.emit_op(OpCode::EndCapture, 0)?;
    c.emit_op(OpCode::End, 0)?;

    let mut group_map = Vec::with_capacity(group_count as usize + 1);
    for g in 0..=group_count as usize {
        group_map.push((2 + 2 * g, 2 + 2 * g + 1));
    }

    let (min_len, _) = len_bounds(ast);
    let start_type = compute_start_type(ast, flags, &mut c.sets);

    Ok(CompiledPattern {
        source: source.to_string(),
        flags,
        code: c.code,
        literals: c.literals,
        sets: c.sets,
        group_map,
        named_capture_map: named_groups,
        frame_size: c.next_slot,
        data_size: c.next_slot,
        start_type,
        min_match_len: min_len,
    })
}

struct Compiler {
    code: Stack64,
    literals: Vec<u16>,
    sets: Vec<UnicodeSet>,
    flags: Flags,
    next_slot: usize,
}

impl Compiler {
    fn emit_word(&mut self, w: u64) -> Result<InstrIdx, Error> {
        self.code.push(w).map_err(|_| Error::PatternTooBig)?;
        Ok(self.code.size() - 1)
    }

    fn emit_op(&mut self, op: OpCode, operand: i32) -> Result<InstrIdx, Error> {
        self.emit_word(build_op(op, operand))
    }

    fn emit_set_ref(&mut self, op: OpCode, set_idx: usize, negated: bool) -> Result<InstrIdx, Error> {
        self.emit_word(build_set_ref(op, set_idx, negated))
    }

    fn patch(&mut self, idx: InstrIdx, operand: i32) {
        let w = self.code.get(idx);
        self.code.set(idx, patch_operand(w, operand));
    }

    fn alloc_slots(&mut self, n: usize) -> usize {
        let base = self.next_slot;
        self.next_slot += n;
        base
    }

    fn push_set(&mut self, set: UnicodeSet) -> usize {
        self.sets.push(set);
        self.sets.len() - 1
    }

    fn push_literal(&mut self, units: &[u16]) -> (usize, usize) {
        let offset = self.literals.len();
        self.literals.extend_from_slice(units);
        (offset, units.len())
    }

    fn class_set(&mut self, set: &UnicodeSet) -> UnicodeSet {
        if self.flags.case_insensitive() {
            case_fold_set(set)
        } else {
            set.clone()
        }
    }

    fn emit_node(&mut self, ast: &Ast) -> Result<(), Error> {
        match ast {
            Ast::Empty => Ok(()),
            Ast::Literal(c) => {
                let op = if self.flags.case_insensitive() {
                    OpCode::OneCharI
                } else {
                    OpCode::OneChar
                };
                self.emit_op(op, *c as i32)?;
                Ok(())
            }
            Ast::Class(set) => self.emit_class(set),
            Ast::AnyChar => {
                let op = if self.flags.dotall() {
                    OpCode::DotAnyAll
                } else if self.flags.unix_lines() {
                    OpCode::DotAnyUnix
                } else {
                    OpCode::DotAny
                };
                self.emit_op(op, 0)?;
                Ok(())
            }
            Ast::Concat(items) => {
                let mut i = 0;
                while i < items.len() {
                    if matches!(items[i], Ast::Literal(_)) {
                        let mut run = Vec::new();
                        let mut j = i;
                        while let Some(Ast::Literal(c)) = items.get(j) {
                            run.push(*c);
                            j += 1;
                        }
                        if run.len() >= 2 {
                            self.emit_literal_run(&run)?;
                        } else {
                            self.emit_node(&items[i])?;
                        }
                        i = j;
                    } else {
                        self.emit_node(&items[i])?;
                        i += 1;
                    }
                }
                Ok(())
            }
            Ast::Alternate(branches) => self.emit_alternate(branches),
            Ast::Group {
                capture,
                name: _,
                atomic,
                body,
            } => self.emit_group(*capture, *atomic, body),
            Ast::Repeat {
                body,
                min,
                max,
                greedy,
            } => self.emit_repeat(body, *min, *max, *greedy),
            Ast::Anchor(kind) => self.emit_anchor(*kind),
            Ast::WordBoundary { negated, unicode } => {
                let op = if *unicode { OpCode::BackslashBu } else { OpCode::BackslashB };
                self.emit_op(op, if *negated { 1 } else { 0 })?;
                Ok(())
            }
            Ast::Backref { group } => {
                let op = if self.flags.case_insensitive() {
                    OpCode::BackRefI
                } else {
                    OpCode::BackRef
                };
                self.emit_op(op, *group as i32)?;
                Ok(())
            }
            Ast::Lookaround { kind, body } => self.emit_lookaround(*kind, body),
            Ast::Shorthand(crate::ast::Shorthand::Grapheme) => {
                self.emit_op(OpCode::BackslashX, 0)?;
                Ok(())
            }
            Ast::Shorthand(crate::ast::Shorthand::NewlineSeq) => {
                self.emit_op(OpCode::BackslashR, 0)?;
                Ok(())
            }
        }
    }

    /// Picks a dedicated shorthand opcode (`\d`/`\h`/`\v` have their own,
    /// the rest of the commonly-referenced builtins go through
    /// `STATIC_SETREF`) when the class matches a builtin exactly, falling
    /// back to a generic `SETREF` against the dynamic set table otherwise.
    fn emit_class(&mut self, set: &UnicodeSet) -> Result<(), Error> {
        let folded = self.class_set(set);
        if !self.flags.case_insensitive() {
            if let Some(op) = dedicated_shorthand_op(&folded) {
                self.emit_op(op, 0)?;
                return Ok(());
            }
            if let Some((idx, negated)) = static_set_index(&folded) {
                let op = if negated { OpCode::StatSetRefN } else { OpCode::StaticSetRef };
                self.emit_op(op, idx)?;
                return Ok(());
            }
        }
        let idx = self.push_set(folded);
        self.emit_set_ref(OpCode::SetRef, idx, false)?;
        Ok(())
    }

    /// Fold a run of two or more adjacent literal characters into one
    /// `String`/`StringI` against the literal pool, instead of one
    /// `OneChar`/`OneCharI` per character.
    fn emit_literal_run(&mut self, chars: &[char]) -> Result<(), Error> {
        let mut units = Vec::with_capacity(chars.len());
        let mut buf = [0u16; 2];
        for c in chars {
            units.extend_from_slice(c.encode_utf16(&mut buf));
        }
        let (offset, len) = self.push_literal(&units);
        let op = if self.flags.case_insensitive() {
            OpCode::StringI
        } else {
            OpCode::String
        };
        self.emit_op(op, offset as i32)?;
        self.emit_word(len as u64)?;
        Ok(())
    }

    fn emit_alternate(&mut self, branches: &[Ast]) -> Result<(), Error> {
        let mut jmp_to_end = Vec::new();
        for (i, branch) in branches.iter().enumerate() {
            if i + 1 < branches.len() {
                let save_idx = self.emit_op(OpCode::StateSave, 0)?;
                self.emit_node(branch)?;
                let jmp_idx = self.emit_op(OpCode::Jmp, 0)?;
                jmp_to_end.push(jmp_idx);
                let next_branch_start = self.code.size();
                self.patch(save_idx, next_branch_start as i32);
            } else {
                self.emit_node(branch)?;
            }
        }
        let end = self.code.size();
        for idx in jmp_to_end {
            self.patch(idx, end as i32);
        }
        Ok(())
    }

    fn emit_group(&mut self, capture: Option<u32>, atomic: bool, body: &Ast) -> Result<(), Error> {
        let sp_slot = if atomic { Some(self.alloc_slots(1)) } else { None };
        if let Some(slot) = sp_slot {
            self.emit_op(OpCode::StoSp, slot as i32)?;
        }
        if let Some(g) = capture {
            self.emit_op(OpCode::StartCapture, g as i32)?;
        }
        self.emit_node(body)?;
        if let Some(g) = capture {
            self.emit_op(OpCode::EndCapture, g as i32)?;
        }
        if let Some(slot) = sp_slot {
            self.emit_op(OpCode::LdSp, slot as i32)?;
        }
        Ok(())
    }

    fn is_simple_atom(ast: &Ast) -> bool {
        matches!(ast, Ast::AnyChar | Ast::Class(_) | Ast::Literal(_))
    }

    fn emit_repeat(
        &mut self,
        body: &Ast,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    ) -> Result<(), Error> {
        if max.is_none() && greedy && Self::is_simple_atom(body) {
            self.emit_fused_loop(body, min)
        } else {
            self.emit_general_loop(body, min, max, greedy)
        }
    }

    fn emit_fused_loop(&mut self, body: &Ast, min: u32) -> Result<(), Error> {
        let loop_slot = self.alloc_slots(1);
        match body {
            Ast::AnyChar => {
                self.emit_op(OpCode::LoopDotI, loop_slot as i32)?;
                self.emit_word(opcode::pack_i32(min as i32))?;
            }
            Ast::Class(set) => {
                let folded = self.class_set(set);
                let idx = self.push_set(folded);
                self.emit_op(OpCode::LoopSrI, loop_slot as i32)?;
                self.emit_word(opcode::pack_i32(min as i32))?;
                self.emit_word(idx as u64)?;
            }
            Ast::Literal(ch) => {
                self.emit_op(OpCode::LoopC, loop_slot as i32)?;
                self.emit_word(opcode::pack_i32(min as i32))?;
                self.emit_word(*ch as u64)?;
            }
            _ => unreachable!("emit_fused_loop only called for simple atoms"),
        }
        Ok(())
    }

    fn emit_general_loop(
        &mut self,
        body: &Ast,
        min: u32,
        max: Option<u32>,
        greedy: bool,
    ) -> Result<(), Error> {
        let ctr_slot = self.alloc_slots(2);
        self.emit_op(
            if greedy { OpCode::CtrInit } else { OpCode::CtrInitNg },
            ctr_slot as i32,
        )?;
        let body_start = self.code.size();
        self.emit_op(OpCode::StoInpLoc, (ctr_slot + 1) as i32)?;
        self.emit_node(body)?;
        let max_i32 = max.map(|m| m as i32).unwrap_or(-1);
        self.emit_op(
            if greedy { OpCode::CtrLoop } else { OpCode::CtrLoopNg },
            body_start as i32,
        )?;
        self.emit_word(opcode::pack_i32(min as i32))?;
        self.emit_word(opcode::pack_i32(max_i32))?;
        self.emit_word(ctr_slot as u64)?;
        Ok(())
    }

    fn emit_anchor(&mut self, kind: AnchorKind) -> Result<(), Error> {
        match kind {
            AnchorKind::StartOfText => {
                self.emit_op(OpCode::Caret, 0)?;
            }
            AnchorKind::EndOfText => {
                self.emit_op(OpCode::BackslashZ, 0)?;
            }
            AnchorKind::EndOfTextOrNl => {
                self.emit_op(OpCode::Dollar, 0)?;
            }
            AnchorKind::Caret => {
                let op = if self.flags.multiline() {
                    if self.flags.unix_lines() {
                        OpCode::CaretMUnix
                    } else {
                        OpCode::CaretM
                    }
                } else {
                    OpCode::Caret
                };
                self.emit_op(op, 0)?;
            }
            AnchorKind::Dollar => {
                let op = match (self.flags.multiline(), self.flags.unix_lines()) {
                    (false, false) => OpCode::Dollar,
                    (false, true) => OpCode::DollarD,
                    (true, false) => OpCode::DollarM,
                    (true, true) => OpCode::DollarMd,
                };
                self.emit_op(op, 0)?;
            }
            AnchorKind::PrevMatchEnd => {
                self.emit_op(OpCode::BackslashG, 0)?;
            }
        }
        Ok(())
    }

    fn emit_lookaround(&mut self, kind: LookKind, body: &Ast) -> Result<(), Error> {
        match kind {
            LookKind::Ahead => {
                let la_slot = self.alloc_slots(2);
                self.emit_op(OpCode::LaStart, la_slot as i32)?;
                self.emit_node(body)?;
                self.emit_op(OpCode::LaEnd, la_slot as i32)?;
            }
            LookKind::AheadNeg => {
                let pre_slot = self.alloc_slots(1);
                self.emit_op(OpCode::StoSp, pre_slot as i32)?;
                let save_idx = self.emit_op(OpCode::StateSave, 0)?;
                let la_slot = self.alloc_slots(2);
                self.emit_op(OpCode::LaStart, la_slot as i32)?;
                self.emit_node(body)?;
                self.emit_op(OpCode::LaEnd, la_slot as i32)?;
                self.emit_op(OpCode::LdSp, pre_slot as i32)?;
                self.emit_op(OpCode::Backtrack, 0)?;
                let after = self.code.size();
                self.patch(save_idx, after as i32);
            }
            LookKind::Behind => {
                let (min_len, max_len) = len_bounds(body);
                let max_len = max_len.ok_or_else(|| unbounded_lookbehind_error())?;
                let lb_slot = self.alloc_slots(3);
                self.emit_op(OpCode::LbStart, lb_slot as i32)?;
                self.emit_word(opcode::pack_i32(min_len as i32))?;
                self.emit_word(opcode::pack_i32(max_len as i32))?;
                let body_start = self.code.size();
                let save_idx = self.emit_op(OpCode::StateSave, 0)?;
                self.emit_node(body)?;
                self.emit_op(OpCode::LbEnd, lb_slot as i32)?;
                // On success, LbEnd must skip the LbCont retry block below —
                // without this jump, success falls straight into LbCont,
                // which immediately fails a fixed-length lookbehind since
                // try_len already equals min_len on the first pass.
                let skip_idx = self.emit_op(OpCode::Jmp, 0)?;
                let retry_label = self.code.size();
                self.patch(save_idx, retry_label as i32);
                self.emit_op(OpCode::LbCont, lb_slot as i32)?;
                self.emit_word(opcode::pack_i32(min_len as i32))?;
                self.emit_word(body_start as u64)?;
                let after = self.code.size();
                self.patch(skip_idx, after as i32);
            }
            LookKind::BehindNeg => {
                let (min_len, max_len) = len_bounds(body);
                let max_len = max_len.ok_or_else(|| unbounded_lookbehind_error())?;
                let pre_slot = self.alloc_slots(1);
                self.emit_op(OpCode::StoSp, pre_slot as i32)?;
                let lb_slot = self.alloc_slots(3);
                self.emit_op(OpCode::LbStart, lb_slot as i32)?;
                self.emit_word(opcode::pack_i32(min_len as i32))?;
                self.emit_word(opcode::pack_i32(max_len as i32))?;
                let body_start = self.code.size();
                let save_idx = self.emit_op(OpCode::StateSave, 0)?;
                self.emit_node(body)?;
                // LbnEnd checks pos==target itself; on a match it falls
                // through into the LdSp/Backtrack bail block right below,
                // on a non-match it backtracks like LbEnd does. Neither
                // case needs its own operand patched.
                self.emit_op(OpCode::LbnEnd, lb_slot as i32)?;
                self.emit_op(OpCode::LdSp, pre_slot as i32)?;
                self.emit_op(OpCode::Backtrack, 0)?;
                let retry_label = self.code.size();
                self.patch(save_idx, retry_label as i32);
                self.emit_op(OpCode::LbnCont, lb_slot as i32)?;
                self.emit_word(opcode::pack_i32(min_len as i32))?;
                self.emit_word(body_start as u64)?;
            }
        }
        Ok(())
    }
}

fn dedicated_shorthand_op(set: &UnicodeSet) -> Option<OpCode> {
    if *set == *builtin::digit() {
        Some(OpCode::BackslashD)
    } else if *set == *builtin::horiz_space() {
        Some(OpCode::BackslashH)
    } else if *set == *builtin::vert_space() {
        Some(OpCode::BackslashV)
    } else {
        None
    }
}

fn static_set_index(set: &UnicodeSet) -> Option<(i32, bool)> {
    let candidates: [(&UnicodeSet, i32); 4] = [
        (builtin::word(), 0),
        (builtin::space(), 1),
        (builtin::alpha(), 2),
        (builtin::alnum(), 3),
    ];
    for (b, idx) in candidates {
        if set == b {
            return Some((idx, false));
        }
        if *set == b.complement() {
            return Some((idx, true));
        }
    }
    None
}

fn unbounded_lookbehind_error() -> Error {
    Error::LookBehindLimit(crate::error::ParseError {
        line: 0,
        offset: 0,
        before: String::new(),
        after: String::new(),
    })
}

/// `(min, max)` matched length in code points; `max` is `None` when
/// unbounded. Used for `minMatchLen` and to size lookbehind spans.
fn len_bounds(ast: &Ast) -> (usize, Option<usize>) {
    match ast {
        Ast::Empty => (0, Some(0)),
        Ast::Literal(_) | Ast::Class(_) | Ast::AnyChar => (1, Some(1)),
        Ast::Concat(items) => items.iter().fold((0, Some(0)), |(amin, amax), item| {
            let (bmin, bmax) = len_bounds(item);
            (
                amin + bmin,
                match (amax, bmax) {
                    (Some(a), Some(b)) => Some(a + b),
                    _ => None,
                },
            )
        }),
        Ast::Alternate(branches) => {
            let mut min = usize::MAX;
            let mut max = Some(0usize);
            for b in branches {
                let (bmin, bmax) = len_bounds(b);
                min = min.min(bmin);
                max = match (max, bmax) {
                    (Some(a), Some(b)) => Some(a.max(b)),
                    _ => None,
                };
            }
            (if min == usize::MAX { 0 } else { min }, max)
        }
        Ast::Group { body, .. } => len_bounds(body),
        Ast::Repeat { body, min, max, .. } => {
            let (bmin, bmax) = len_bounds(body);
            (
                bmin * (*min as usize),
                match (bmax, max) {
                    (Some(b), Some(m)) => Some(b * (*m as usize)),
                    _ => None,
                },
            )
        }
        Ast::Anchor(_) | Ast::WordBoundary { .. } | Ast::Lookaround { .. } => (0, Some(0)),
        Ast::Backref { .. } => (0, None),
        Ast::Shorthand(crate::ast::Shorthand::Grapheme) => (1, None),
        Ast::Shorthand(crate::ast::Shorthand::NewlineSeq) => (1, Some(2)),
    }
}

fn check_lookbehind_bounds(ast: &Ast) -> Result<(), Error> {
    match ast {
        Ast::Lookaround {
            kind: LookKind::Behind | LookKind::BehindNeg,
            body,
        } => {
            if len_bounds(body).1.is_none() {
                return Err(unbounded_lookbehind_error());
            }
            check_lookbehind_bounds(body)
        }
        Ast::Concat(items) | Ast::Alternate(items) => {
            for i in items {
                check_lookbehind_bounds(i)?;
            }
            Ok(())
        }
        Ast::Group { body, .. } | Ast::Repeat { body, .. } | Ast::Lookaround { body, .. } => {
            check_lookbehind_bounds(body)
        }
        _ => Ok(()),
    }
}

/// Compute the `StartType` hint by looking at the mandatory prefix of the
/// pattern tree: a fixed anchor, a run of literal characters, or a single
/// character class.
fn compute_start_type(ast: &Ast, flags: Flags, sets: &mut Vec<UnicodeSet>) -> StartType {
    fn first_mandatory(ast: &Ast) -> Option<&Ast> {
        match ast {
            Ast::Concat(items) => items.iter().find_map(first_mandatory),
            Ast::Group { body, .. } => first_mandatory(body),
            Ast::Repeat { body, min, .. } if *min > 0 => first_mandatory(body),
            other => Some(other),
        }
    }

    if flags.case_insensitive() || flags.literal() {
        return StartType::NoInfo;
    }

    match first_mandatory(ast) {
        Some(Ast::Anchor(AnchorKind::StartOfText)) => StartType::StartOfText,
        Some(Ast::Anchor(AnchorKind::Caret)) if flags.multiline() => StartType::LineStart,
        Some(Ast::Anchor(AnchorKind::Caret)) => StartType::StartOfText,
        Some(Ast::Literal(c)) => StartType::Char(*c),
        Some(Ast::Class(set)) if set.ranges().len() <= 8 => {
            sets.push(set.clone());
            StartType::Set(sets.len() - 1)
        }
        _ => match literal_prefix(ast) {
            Some(units) if units.len() >= 2 => StartType::String(units),
            _ => StartType::NoInfo,
        },
    }
}

fn literal_prefix(ast: &Ast) -> Option<Vec<u16>> {
    let mut out = Vec::new();
    fn walk(ast: &Ast, out: &mut Vec<u16>) -> bool {
        match ast {
            Ast::Literal(c) => {
                let mut buf = [0u16; 2];
                out.extend_from_slice(c.encode_utf16(&mut buf));
                true
            }
            Ast::Concat(items) => {
                for i in items {
                    if !walk(i, out) {
                        return false;
                    }
                }
                true
            }
            Ast::Group { body, .. } => walk(body, out),
            _ => false,
        }
    }
    if walk(ast, &mut out) {
        Some(out)
    } else if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opcode::{op_type, OpCode as Op};
    use crate::parser::parse;

    fn compile_str(s: &str, flags: Flags) -> CompiledPattern {
        let parsed = parse(s, flags).unwrap();
        compile(s, &parsed.ast, parsed.flags, parsed.group_count, parsed.named_groups, 1 << 20).unwrap()
    }

    #[test]
    fn simple_literal_compiles() {
        let p = compile_str("abc", Flags::default());
        assert!(p.code.size() > 0);
        assert_eq!(op_type(p.code.get(0)), Op::StartCapture);
    }

    #[test]
    fn group_map_has_whole_match_and_groups() {
        let p = compile_str("(a)(b)", Flags::default());
        assert_eq!(p.group_map.len(), 3);
    }

    #[test]
    fn unbounded_lookbehind_is_rejected() {
        let source = "(?<=a*)b";
        let parsed = parse(source, Flags::default()).unwrap();
        let err = compile(source, &parsed.ast, parsed.flags, parsed.group_count, parsed.named_groups, 1 << 20);
        assert!(matches!(err, Err(Error::LookBehindLimit(_))));
    }

    #[test]
    fn fused_loop_used_for_unbounded_greedy_dot() {
        let p = compile_str("a.*b", Flags::default());
        let has_loop_dot = (0..p.code.size()).any(|i| op_type(p.code.get(i)) == Op::LoopDotI);
        assert!(has_loop_dot);
    }

    #[test]
    fn min_match_len_counts_mandatory_atoms() {
        let p = compile_str("ab(c)?", Flags::default());
        assert_eq!(p.min_match_len, 2);
    }

    #[test]
    fn literal_run_fuses_into_string_op() {
        let p = compile_str("hello world", Flags::default());
        let has_string = (0..p.code.size()).any(|i| op_type(p.code.get(i)) == Op::String);
        assert!(has_string);
    }

    #[test]
    fn start_type_picks_leading_literal() {
        let p = compile_str("hello", Flags::default());
        assert!(matches!(p.start_type, StartType::String(_)));
    }
}
</content>
