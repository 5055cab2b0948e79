// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scans a [`Utf16Text`] for the next position worth handing to the match
//! engine, using the [`StartType`] hint the compiler derived from the
//! pattern's mandatory prefix. Plays the role of the teacher's own
//! `AlternateLiterals`/`Literals` prefix matcher (`find_at`, the literal
//! fast path ahead of the NFA), generalized from scanning UTF-8 bytes with
//! `aho-corasick`/`memchr` to scanning UTF-16 code units.
//!
//! `aho-corasick` and `memchr` are built for byte haystacks; re-encoding a
//! `Utf16Text` to bytes just to feed them back in would cost more than it
//! saves for the single-needle cases `StartType` produces (one character,
//! one short string, or one small set) so this module scans code units
//! directly instead. The dependency is dropped entirely.

use crate::sets::UnicodeSet;
use crate::text::Utf16Text;

/// Find the next position at or after `from` (and before `region_end`)
/// where `c` occurs, or `None` if it doesn't occur in range.
pub fn find_char(text: &Utf16Text, from: usize, region_end: usize, c: char) -> Option<usize> {
    let mut buf = [0u16; 2];
    let needle = c.encode_utf16(&mut buf);
    find_units(text, from, region_end, needle)
}

/// Find the next occurrence of the exact code-unit sequence `needle`
/// starting at or after `from`, ending no later than `region_end`.
pub fn find_units(
    text: &Utf16Text,
    from: usize,
    region_end: usize,
    needle: &[u16],
) -> Option<usize> {
    if needle.is_empty() {
        return Some(from);
    }
    let hay = text.units();
    let last_start = region_end.checked_sub(needle.len())?;
    if from > last_start {
        return None;
    }
    (from..=last_start).find(|&i| hay[i..i + needle.len()] == *needle)
}

/// Find the next code point at or after `from` (before `region_end`) that
/// belongs to `set`.
pub fn find_set(
    text: &Utf16Text,
    from: usize,
    region_end: usize,
    set: &UnicodeSet,
) -> Option<usize> {
    let mut pos = from;
    while pos < region_end {
        let (c, w) = text.char_at(pos)?;
        if set.contains(c) {
            return Some(pos);
        }
        pos += w;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_char_locates_ascii() {
        let t = Utf16Text::from_str("the quick fox");
        assert_eq!(find_char(&t, 0, t.len(), 'q'), Some(4));
    }

    #[test]
    fn find_char_absent_returns_none() {
        let t = Utf16Text::from_str("abc");
        assert_eq!(find_char(&t, 0, t.len(), 'z'), None);
    }

    #[test]
    fn find_units_matches_whole_needle() {
        let t = Utf16Text::from_str("hello world");
        let needle: Vec<u16> = "world".encode_utf16().collect();
        assert_eq!(find_units(&t, 0, t.len(), &needle), Some(6));
    }

    #[test]
    fn find_units_respects_region_end() {
        let t = Utf16Text::from_str("hello world");
        let needle: Vec<u16> = "world".encode_utf16().collect();
        assert_eq!(find_units(&t, 0, 8, &needle), None);
    }

    #[test]
    fn find_set_skips_non_matching_prefix() {
        let t = Utf16Text::from_str("   42");
        let digits = crate::sets::builtin::digit();
        assert_eq!(find_set(&t, 0, t.len(), digits), Some(3));
    }
}
