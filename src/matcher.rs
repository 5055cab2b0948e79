// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The public-facing façade binding a compiled pattern to one input string:
//! `Pattern::compile` plus a `Matcher` exposing `matches`/`lookingAt`/`find`/
//! `region`/`group`/`split`/`replaceAll`-style operations over it.
//!
//! This is the thin layer over [`crate::engine`] that the teacher's own
//! crate would have named `re.rs`; the retrieved slice of the teacher did
//! not carry that file, so this one is grounded directly in the ICU
//! `RegexMatcher` contract the rest of this crate implements, using the
//! same `Result<T, Error>`-propagating style as every other module here.

use std::sync::Arc;

use log::{debug, trace};

use crate::config::{CompileOptions, MatcherOptions};
use crate::engine::{self, Budget, MatchContext, MatchResult};
use crate::error::Error;
use crate::parser;
use crate::program::CompiledPattern;
use crate::text::Utf16Text;

/// An immutable, shareable compiled pattern. Cheap to clone: it's an
/// `Arc` handle, exactly as the teacher's `Regex` wraps an `Arc<Program>`.
#[derive(Clone, Debug)]
pub struct Pattern {
    compiled: Arc<CompiledPattern>,
}

impl Pattern {
    /// Parse and compile `source` under `opts`.
    pub fn compile(source: &str, opts: CompileOptions) -> Result<Pattern, Error> {
        let parsed = parser::parse(source, opts.flags)?;
        let compiled = crate::compiler::compile(
            source,
            &parsed.ast,
            parsed.flags,
            parsed.group_count,
            parsed.named_groups,
            opts.size_limit,
        )?;
        debug!(
            "compiled pattern {:?}: {} code words, {} groups",
            source,
            compiled.code.size(),
            compiled.num_captures()
        );
        Ok(Pattern {
            compiled: Arc::new(compiled),
        })
    }

    pub fn source(&self) -> &str {
        &self.compiled.source
    }

    /// Number of capture groups, including group 0 (the whole match).
    pub fn group_count(&self) -> usize {
        self.compiled.num_captures()
    }

    pub fn group_index(&self, name: &str) -> Option<u32> {
        self.compiled.named_capture_map.get(name).copied()
    }

    /// Bind this pattern to `input`, ready to match.
    pub fn matcher(&self, input: &str) -> Matcher {
        Matcher::new(self.compiled.clone(), input, MatcherOptions::default())
    }

    pub fn matcher_with_options(&self, input: &str, opts: MatcherOptions) -> Matcher {
        Matcher::new(self.compiled.clone(), input, opts)
    }
}

/// The outcome of a completed match attempt: capture-group spans in
/// code-unit offsets, group 0 being the whole match.
#[derive(Clone, Debug)]
struct CurrentMatch {
    result: MatchResult,
    /// True if this match came from an empty-span `find()` — the next
    /// `find()` must advance at least one code point to avoid looping.
    zero_length: bool,
}

/// Binds one [`Pattern`] to one input string. Mutable operations
/// (`find`, `reset`, `region`) update the matcher's notion of "current
/// match"; accessors (`group`, `start`, `end`) read it back.
pub struct Matcher {
    pattern: Arc<CompiledPattern>,
    text: Utf16Text,
    opts: MatcherOptions,
    region_start: usize,
    region_end: usize,
    /// Where the next `find()` should resume scanning from.
    search_from: usize,
    current: Option<CurrentMatch>,
}

impl Matcher {
    fn new(pattern: Arc<CompiledPattern>, input: &str, opts: MatcherOptions) -> Matcher {
        let text = Utf16Text::from_str(input);
        let len = text.len();
        Matcher {
            pattern,
            text,
            opts,
            region_start: 0,
            region_end: len,
            search_from: 0,
            current: None,
        }
    }

    /// Rebind this matcher to a new input, clearing any current match and
    /// resetting the region to the whole string.
    pub fn reset(&mut self, input: &str) {
        self.text = Utf16Text::from_str(input);
        self.region_start = 0;
        self.region_end = self.text.len();
        self.search_from = 0;
        self.current = None;
    }

    /// Restrict subsequent `matches`/`lookingAt`/`find` calls to
    /// `[start, end)`. Clears any current match.
    pub fn region(&mut self, start: usize, end: usize) -> Result<(), Error> {
        if start > end || end > self.text.len() {
            return Err(Error::Internal(format!(
                "region [{start}, {end}) out of bounds for input of length {}",
                self.text.len()
            )));
        }
        self.region_start = start;
        self.region_end = end;
        self.search_from = start;
        self.current = None;
        Ok(())
    }

    fn budget(&mut self) -> Budget<'static> {
        match self.opts.time_limit {
            Some(d) => Budget::with_deadline(std::time::Instant::now() + d),
            None => Budget::unlimited(),
        }
    }

    /// True iff the engine, anchored at `region_start`, consumes the whole
    /// region.
    pub fn matches(&mut self) -> Result<bool, Error> {
        let ctx = MatchContext {
            text: &self.text,
            region_start: self.region_start,
            region_end: self.region_end,
            anchor_start: self.region_start,
        };
        let mut budget = self.budget();
        let outcome = engine::try_match(
            &self.pattern,
            &ctx,
            self.region_start,
            self.opts.stack_limit,
            &mut budget,
        )?;
        match outcome {
            Some(result) if result.end() == self.region_end => {
                trace!("matches(): full-region match at [{}, {})", result.start(), result.end());
                self.current = Some(CurrentMatch {
                    zero_length: result.start() == result.end(),
                    result,
                });
                Ok(true)
            }
            _ => {
                self.current = None;
                Ok(false)
            }
        }
    }

    /// True iff the engine, anchored at `region_start`, finds a match —
    /// the match need not consume the whole region.
    pub fn looking_at(&mut self) -> Result<bool, Error> {
        let ctx = MatchContext {
            text: &self.text,
            region_start: self.region_start,
            region_end: self.region_end,
            anchor_start: self.region_start,
        };
        let mut budget = self.budget();
        let outcome = engine::try_match(
            &self.pattern,
            &ctx,
            self.region_start,
            self.opts.stack_limit,
            &mut budget,
        )?;
        match outcome {
            Some(result) => {
                self.current = Some(CurrentMatch {
                    zero_length: result.start() == result.end(),
                    result,
                });
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    /// Advance past the previous match (by one code point if it was
    /// zero-length) and search for the next match within the region.
    /// `\G` anchors to the end of the previous match, or to `region_start`
    /// for the first `find()` after a `reset`/`region`.
    pub fn find(&mut self) -> Result<bool, Error> {
        let (from, anchor) = match &self.current {
            Some(m) if m.zero_length => {
                let (_, w) = self.text.char_at(m.result.end()).unwrap_or(('\0', 1));
                (m.result.end() + w, m.result.end())
            }
            Some(m) => (m.result.end(), m.result.end()),
            None => (self.search_from, self.region_start),
        };
        let mut budget = self.budget();
        let outcome = engine::find(
            &self.pattern,
            &self.text,
            from,
            self.region_start,
            self.region_end,
            anchor,
            self.opts.stack_limit,
            &mut budget,
        )?;
        match outcome {
            Some(result) => {
                trace!("find(): match at [{}, {})", result.start(), result.end());
                self.current = Some(CurrentMatch {
                    zero_length: result.start() == result.end(),
                    result,
                });
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    /// Find the next match starting no earlier than `from`, ignoring any
    /// previous match position. Used by `split`/`replaceAll` to drive
    /// their own scan independent of `find`'s "advance past last match"
    /// bookkeeping.
    fn find_from(&mut self, from: usize) -> Result<bool, Error> {
        let mut budget = self.budget();
        let outcome = engine::find(
            &self.pattern,
            &self.text,
            from,
            self.region_start,
            self.region_end,
            from,
            self.opts.stack_limit,
            &mut budget,
        )?;
        match outcome {
            Some(result) => {
                self.current = Some(CurrentMatch {
                    zero_length: result.start() == result.end(),
                    result,
                });
                Ok(true)
            }
            None => {
                self.current = None;
                Ok(false)
            }
        }
    }

    fn current(&self) -> Result<&MatchResult, Error> {
        self.current.as_ref().map(|m| &m.result).ok_or(Error::InvalidState)
    }

    pub fn start(&self, group: usize) -> Result<Option<usize>, Error> {
        let m = self.current()?;
        Ok(m.group(group).map(|(s, _)| s))
    }

    pub fn end(&self, group: usize) -> Result<Option<usize>, Error> {
        let m = self.current()?;
        Ok(m.group(group).map(|(_, e)| e))
    }

    /// The substring captured by `group`, or `None` if that group did not
    /// participate in the match.
    pub fn group(&self, group: usize) -> Result<Option<String>, Error> {
        let m = self.current()?;
        Ok(m.group(group).map(|(s, e)| self.text.to_string_range(s, e)))
    }

    pub fn group_by_name(&self, name: &str) -> Result<Option<String>, Error> {
        let idx = *self
            .pattern
            .named_capture_map
            .get(name)
            .ok_or_else(|| Error::InvalidCaptureGroupName(name.to_string()))?;
        self.group(idx as usize)
    }

    pub fn group_count(&self) -> usize {
        self.pattern.num_captures()
    }

    /// Split `input` on matches of this pattern, writing at most `cap`
    /// fields. Captured groups of the delimiter are spliced in between
    /// fields. If there are more delimiter matches than `cap` allows, the
    /// final field absorbs the remainder of the input, delimiters
    /// included.
    pub fn split(&mut self, input: &str, cap: usize) -> Result<Vec<String>, Error> {
        self.reset(input);
        let mut fields = Vec::new();
        if cap == 0 {
            return Ok(fields);
        }
        let mut field_start = 0usize;
        let mut from = 0usize;
        loop {
            if fields.len() + 1 >= cap {
                break;
            }
            if !self.find_from(from)? {
                break;
            }
            let m = self.current()?.clone();
            if m.start() == m.end() && m.start() == field_start {
                // Zero-length match right at the start of the current
                // field would produce a spurious empty leading field;
                // ICU's splitter skips it and resumes one code point on.
                let (_, w) = self.text.char_at(m.end()).unwrap_or(('\0', 1));
                from = m.end() + w;
                continue;
            }
            fields.push(self.text.to_string_range(field_start, m.start()));
            for g in 1..self.pattern.num_captures() {
                if fields.len() + 1 >= cap {
                    break;
                }
                if let Some((s, e)) = m.group(g) {
                    fields.push(self.text.to_string_range(s, e));
                }
            }
            field_start = m.end();
            let (_, w) = self.text.char_at(m.end()).unwrap_or(('\0', 1));
            from = if m.start() == m.end() { m.end() + w } else { m.end() };
        }
        fields.push(self.text.to_string_range(field_start, self.text.len()));
        Ok(fields)
    }

    /// Replace every match of this pattern in `input` with `replacement`,
    /// expanding `$n` / `${name}` references against each match's capture
    /// groups.
    pub fn replace_all(&mut self, input: &str, replacement: &str) -> Result<String, Error> {
        self.replace(input, replacement, false)
    }

    /// Replace only the first match of this pattern in `input`.
    pub fn replace_first(&mut self, input: &str, replacement: &str) -> Result<String, Error> {
        self.replace(input, replacement, true)
    }

    fn replace(&mut self, input: &str, replacement: &str, first_only: bool) -> Result<String, Error> {
        self.reset(input);
        let template = parse_replacement_template(replacement)?;
        let mut out = String::new();
        let mut last_end = 0usize;
        let mut from = 0usize;
        loop {
            if !self.find_from(from)? {
                break;
            }
            let m = self.current()?.clone();
            out.push_str(&self.text.to_string_range(last_end, m.start()));
            expand_template(&template, &m, &self.text, &self.pattern.named_capture_map, &mut out)?;
            last_end = m.end();
            if first_only {
                break;
            }
            let (_, w) = self.text.char_at(m.end()).unwrap_or(('\0', 1));
            from = if m.start() == m.end() { m.end() + w } else { m.end() };
        }
        out.push_str(&self.text.to_string_range(last_end, self.text.len()));
        Ok(out)
    }
}

/// One piece of a parsed replacement template: either literal text or a
/// reference to a capture group (by number or by name).
#[derive(Debug, PartialEq)]
enum TemplatePart {
    Literal(String),
    Group(usize),
    NamedGroup(String),
}

fn parse_replacement_template(template: &str) -> Result<Vec<TemplatePart>, Error> {
    let chars: Vec<char> = template.chars().collect();
    let mut parts = Vec::new();
    let mut literal = String::new();
    let mut i = 0;
    while i < chars.len() {
        match chars[i] {
            '\\' if i + 1 < chars.len() => {
                literal.push(chars[i + 1]);
                i += 2;
            }
            '$' if i + 1 < chars.len() && chars[i + 1] == '{' => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let close = chars[i + 2..]
                    .iter()
                    .position(|&c| c == '}')
                    .map(|p| p + i + 2)
                    .ok_or_else(|| Error::Internal("unterminated ${...} in replacement".to_string()))?;
                let name: String = chars[i + 2..close].iter().collect();
                parts.push(TemplatePart::NamedGroup(name));
                i = close + 1;
            }
            '$' if i + 1 < chars.len() && chars[i + 1].is_ascii_digit() => {
                if !literal.is_empty() {
                    parts.push(TemplatePart::Literal(std::mem::take(&mut literal)));
                }
                let mut j = i + 1;
                while j < chars.len() && chars[j].is_ascii_digit() {
                    j += 1;
                }
                let n: usize = chars[i + 1..j].iter().collect::<String>().parse().unwrap();
                parts.push(TemplatePart::Group(n));
                i = j;
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }
    if !literal.is_empty() {
        parts.push(TemplatePart::Literal(literal));
    }
    Ok(parts)
}

fn expand_template(
    template: &[TemplatePart],
    m: &MatchResult,
    text: &Utf16Text,
    named: &std::collections::HashMap<String, u32>,
    out: &mut String,
) -> Result<(), Error> {
    for part in template {
        match part {
            TemplatePart::Literal(s) => out.push_str(s),
            TemplatePart::Group(n) => {
                if let Some((s, e)) = m.group(*n) {
                    out.push_str(&text.to_string_range(s, e));
                }
            }
            TemplatePart::NamedGroup(name) => {
                let idx = *named
                    .get(name)
                    .ok_or_else(|| Error::InvalidCaptureGroupName(name.clone()))?;
                if let Some((s, e)) = m.group(idx as usize) {
                    out.push_str(&text.to_string_range(s, e));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::{self, Flags};

    fn compile(source: &str) -> Pattern {
        Pattern::compile(source, CompileOptions::default()).unwrap()
    }

    #[test]
    fn matches_requires_full_region() {
        let p = compile("abc");
        let mut m = p.matcher("abc");
        assert!(m.matches().unwrap());
        let mut m2 = p.matcher("abcd");
        assert!(!m2.matches().unwrap());
    }

    #[test]
    fn looking_at_allows_trailing_text() {
        let p = compile("abc");
        let mut m = p.matcher("abcd");
        assert!(m.looking_at().unwrap());
        assert_eq!(m.end(0).unwrap(), Some(3));
    }

    #[test]
    fn find_walks_successive_matches() {
        let p = compile("[0-9]+");
        let mut m = p.matcher("a12 b345");
        assert!(m.find().unwrap());
        assert_eq!(m.group(0).unwrap().as_deref(), Some("12"));
        assert!(m.find().unwrap());
        assert_eq!(m.group(0).unwrap().as_deref(), Some("345"));
        assert!(!m.find().unwrap());
    }

    #[test]
    fn group_reports_capture_text() {
        let p = compile("(a+)(b+)");
        let mut m = p.matcher("aaabb");
        assert!(m.find().unwrap());
        assert_eq!(m.group(1).unwrap().as_deref(), Some("aaa"));
        assert_eq!(m.group(2).unwrap().as_deref(), Some("bb"));
    }

    #[test]
    fn named_group_lookup() {
        let p = compile("(?<year>[0-9]{4})");
        let mut m = p.matcher("in 2024 now");
        assert!(m.find().unwrap());
        assert_eq!(m.group_by_name("year").unwrap().as_deref(), Some("2024"));
    }

    #[test]
    fn region_restricts_search() {
        let p = compile("[0-9]+");
        let mut m = p.matcher("111 222 333");
        m.region(4, 7).unwrap();
        assert!(m.find().unwrap());
        assert_eq!(m.group(0).unwrap().as_deref(), Some("222"));
        assert!(!m.find().unwrap());
    }

    #[test]
    fn split_produces_fields_between_delimiters() {
        let p = compile(",");
        let mut m = p.matcher("");
        let fields = m.split("a,b,c", 10).unwrap();
        assert_eq!(fields, vec!["a", "b", "c"]);
    }

    #[test]
    fn split_respects_cap() {
        let p = compile(",");
        let mut m = p.matcher("");
        let fields = m.split("a,b,c,d", 2).unwrap();
        assert_eq!(fields, vec!["a", "b,c,d"]);
    }

    #[test]
    fn replace_all_expands_group_refs() {
        let p = compile("([a-z]+)=([0-9]+)");
        let mut m = p.matcher("");
        let out = m.replace_all("x=1, y=2", "$2:$1").unwrap();
        assert_eq!(out, "1:x, 2:y");
    }

    #[test]
    fn replace_first_only_touches_leading_match() {
        let p = compile("[0-9]+");
        let mut m = p.matcher("");
        let out = m.replace_first("1 2 3", "N").unwrap();
        assert_eq!(out, "N 2 3");
    }

    #[test]
    fn group_accessor_before_any_match_is_invalid_state() {
        let p = compile("a");
        let m = p.matcher("abc");
        assert!(matches!(m.group(0), Err(Error::InvalidState)));
    }

    #[test]
    fn case_insensitive_pattern_via_options() {
        let flags = Flags::new(flags::CASE_INSENSITIVE).unwrap();
        let p = Pattern::compile("hello", CompileOptions { flags, ..CompileOptions::default() }).unwrap();
        let mut m = p.matcher("HELLO");
        assert!(m.matches().unwrap());
    }
}
