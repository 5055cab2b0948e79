// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `UnicodeSet`: an inversion-list set of code points, plus the built-in
//! property sets (`\w`, `\d`, `\s`, grapheme-cluster components) and the
//! case-folding helper the match engine needs.
//!
//! The out-of-scope "Unicode properties library" external collaborator
//! (spec §1/§6) is grounded here on `unicode_properties`'s general-category
//! tables and `unicode_segmentation`'s grapheme-break cursor, rather than
//! hand-derived tables.

use std::sync::OnceLock;

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// A set of Unicode scalar values, represented as a sorted list of
/// non-overlapping inclusive `(lo, hi)` ranges.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnicodeSet {
    ranges: Vec<(u32, u32)>,
}

impl UnicodeSet {
    pub fn empty() -> UnicodeSet {
        UnicodeSet { ranges: Vec::new() }
    }

    pub fn from_ranges(mut ranges: Vec<(u32, u32)>) -> UnicodeSet {
        ranges.sort_unstable();
        let mut out: Vec<(u32, u32)> = Vec::with_capacity(ranges.len());
        for (lo, hi) in ranges {
            if let Some(last) = out.last_mut() {
                if lo <= last.1.saturating_add(1) {
                    last.1 = last.1.max(hi);
                    continue;
                }
            }
            out.push((lo, hi));
        }
        UnicodeSet { ranges: out }
    }

    pub fn single(c: char) -> UnicodeSet {
        UnicodeSet::from_ranges(vec![(c as u32, c as u32)])
    }

    pub fn contains(&self, c: char) -> bool {
        let cp = c as u32;
        self.ranges
            .binary_search_by(|&(lo, hi)| {
                if cp < lo {
                    std::cmp::Ordering::Greater
                } else if cp > hi {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn union(&self, other: &UnicodeSet) -> UnicodeSet {
        let mut all = self.ranges.clone();
        all.extend_from_slice(&other.ranges);
        UnicodeSet::from_ranges(all)
    }

    pub fn intersect(&self, other: &UnicodeSet) -> UnicodeSet {
        let mut out = Vec::new();
        let (mut i, mut j) = (0, 0);
        while i < self.ranges.len() && j < other.ranges.len() {
            let (a_lo, a_hi) = self.ranges[i];
            let (b_lo, b_hi) = other.ranges[j];
            let lo = a_lo.max(b_lo);
            let hi = a_hi.min(b_hi);
            if lo <= hi {
                out.push((lo, hi));
            }
            if a_hi < b_hi {
                i += 1;
            } else {
                j += 1;
            }
        }
        UnicodeSet::from_ranges(out)
    }

    pub fn difference(&self, other: &UnicodeSet) -> UnicodeSet {
        self.intersect(&other.complement())
    }

    pub fn complement(&self) -> UnicodeSet {
        let mut out = Vec::new();
        let mut next_lo = 0u32;
        for &(lo, hi) in &self.ranges {
            if lo > next_lo {
                out.push((next_lo, lo - 1));
            }
            next_lo = hi.saturating_add(1);
            if hi == u32::MAX {
                next_lo = u32::MAX;
                break;
            }
        }
        if next_lo <= char::MAX as u32 {
            out.push((next_lo, char::MAX as u32));
        }
        UnicodeSet::from_ranges(out)
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }
}

fn build_from_predicate(pred: impl Fn(char) -> bool) -> UnicodeSet {
    let mut ranges = Vec::new();
    let mut run: Option<(u32, u32)> = None;
    for cp in 0u32..=0x10FFFF {
        if (0xD800..=0xDFFF).contains(&cp) {
            continue; // surrogate range, not a scalar value
        }
        let c = char::from_u32(cp).unwrap();
        if pred(c) {
            match &mut run {
                Some((_, hi)) if *hi + 1 == cp => *hi = cp,
                Some((lo, hi)) => {
                    ranges.push((*lo, *hi));
                    run = Some((cp, cp));
                }
                None => run = Some((cp, cp)),
            }
        } else if let Some((lo, hi)) = run.take() {
            ranges.push((lo, hi));
        }
    }
    if let Some((lo, hi)) = run {
        ranges.push((lo, hi));
    }
    UnicodeSet::from_ranges(ranges)
}

macro_rules! cached_builtin {
    ($name:ident, $pred:expr) => {
        pub fn $name() -> &'static UnicodeSet {
            static CELL: OnceLock<UnicodeSet> = OnceLock::new();
            CELL.get_or_init(|| build_from_predicate($pred))
        }
    };
}

/// Built-in, process-wide, lazily-built property sets. Each is built once
/// and shared by `&'static` reference, per the design note on global/static
/// sets.
pub mod builtin {
    use super::*;

    cached_builtin!(word, |c: char| c.is_alphanumeric() || c == '_');
    cached_builtin!(digit, |c: char| c.is_ascii_digit() || {
        matches!(
            c.general_category(),
            GeneralCategory::DecimalNumber
        )
    });
    cached_builtin!(alpha, |c: char| c.is_alphabetic());
    cached_builtin!(alnum, |c: char| c.is_alphanumeric());
    cached_builtin!(space, |c: char| c.is_whitespace());
    cached_builtin!(horiz_space, |c: char| matches!(
        c,
        '\t' | ' ' | '\u{00A0}' | '\u{1680}' | '\u{2000}'..='\u{200A}' | '\u{202F}' | '\u{205F}' | '\u{3000}'
    ));
    cached_builtin!(vert_space, |c: char| matches!(
        c,
        '\n' | '\x0B' | '\x0C' | '\r' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    ));
}

/// `foldCase(codepoint) -> sequence of code points`.
///
/// Simple full-case-folding: delegates to `char::to_lowercase`, plus the
/// handful of special multi-codepoint expansions documented in the Unicode
/// `CaseFolding.txt` "F" table that simple per-codepoint folding can't
/// express (ß, İ, the Greek sigma family).
pub fn fold_case(c: char) -> Vec<char> {
    match c {
        '\u{00DF}' => vec!['s', 's'], // LATIN SMALL LETTER SHARP S
        '\u{0130}' => vec!['i', '\u{0307}'], // LATIN CAPITAL LETTER I WITH DOT ABOVE
        // GREEK CAPITAL/SMALL/FINAL SIGMA all fold to small sigma: plain
        // `to_lowercase` leaves final sigma (ς) distinct from σ, which
        // breaks case-insensitive matching at the end of a Greek word.
        '\u{03A3}' | '\u{03C2}' | '\u{03C3}' => vec!['\u{03C3}'],
        _ => c.to_lowercase().collect(),
    }
}

/// Case-fold every character in `set` and union the results back in, so a
/// user-written class behaves sensibly under `CASE_INSENSITIVE`. Ranges
/// wider than a few thousand code points are left unfolded: they are
/// almost always already letter blocks with both cases present, and
/// per-codepoint folding over e.g. all of `\p{L}` would be wasted work.
pub fn case_fold_set(set: &UnicodeSet) -> UnicodeSet {
    const FOLD_RANGE_LIMIT: u32 = 4096;
    let mut extra = Vec::new();
    for &(lo, hi) in set.ranges() {
        if hi - lo > FOLD_RANGE_LIMIT {
            continue;
        }
        for cp in lo..=hi {
            let Some(c) = char::from_u32(cp) else { continue };
            for f in fold_case(c) {
                extra.push((f as u32, f as u32));
            }
            for u in c.to_uppercase() {
                extra.push((u as u32, u as u32));
            }
        }
    }
    if extra.is_empty() {
        set.clone()
    } else {
        set.union(&UnicodeSet::from_ranges(extra))
    }
}

/// Compare two characters for equality under simple case folding.
pub fn fold_eq(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    fold_case(a) == fold_case(b)
}

/// Grapheme-cluster break cursor, used by `\X`. Delegates to
/// `unicode_segmentation`'s TR29 implementation rather than re-deriving the
/// break tables locally.
pub fn grapheme_len_at(s: &str, byte_idx: usize) -> usize {
    use unicode_segmentation::UnicodeSegmentation;
    s[byte_idx..]
        .graphemes(true)
        .next()
        .map(|g| g.chars().count())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn union_merges_adjacent_ranges() {
        let a = UnicodeSet::from_ranges(vec![(1, 3)]);
        let b = UnicodeSet::from_ranges(vec![(4, 6)]);
        let u = a.union(&b);
        assert_eq!(u.ranges(), &[(1, 6)]);
    }

    #[test]
    fn intersect_basic() {
        let a = UnicodeSet::from_ranges(vec![(1, 10)]);
        let b = UnicodeSet::from_ranges(vec![(5, 15)]);
        assert_eq!(a.intersect(&b).ranges(), &[(5, 10)]);
    }

    #[test]
    fn complement_of_empty_is_everything() {
        let a = UnicodeSet::empty();
        let c = a.complement();
        assert!(c.contains('a'));
        assert!(c.contains('\u{10FFFF}'));
    }

    #[test]
    fn difference_removes_overlap() {
        let a = UnicodeSet::from_ranges(vec![(1, 10)]);
        let b = UnicodeSet::from_ranges(vec![(5, 7)]);
        let d = a.difference(&b);
        assert_eq!(d.ranges(), &[(1, 4), (8, 10)]);
    }

    #[test]
    fn word_set_contains_ascii_word_chars() {
        let w = builtin::word();
        assert!(w.contains('a'));
        assert!(w.contains('_'));
        assert!(w.contains('9'));
        assert!(!w.contains(' '));
    }

    #[test]
    fn fold_case_sharp_s() {
        assert_eq!(fold_case('\u{00DF}'), vec!['s', 's']);
    }

    #[test]
    fn fold_case_unifies_greek_sigma_family() {
        assert_eq!(fold_case('\u{03A3}'), vec!['\u{03C3}']); // Σ
        assert_eq!(fold_case('\u{03C2}'), vec!['\u{03C3}']); // ς (final)
        assert_eq!(fold_case('\u{03C3}'), vec!['\u{03C3}']); // σ
        assert!(fold_eq('\u{03A3}', '\u{03C2}'));
        assert!(fold_eq('\u{03C3}', '\u{03C2}'));
    }

    #[test]
    fn case_fold_set_adds_both_cases() {
        let s = UnicodeSet::single('a');
        let folded = case_fold_set(&s);
        assert!(folded.contains('a'));
        assert!(folded.contains('A'));
    }

    #[test]
    fn fold_eq_ascii_case() {
        assert!(fold_eq('A', 'a'));
        assert!(!fold_eq('A', 'b'));
    }
}
</content>
