// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use icu_regex::{CompileOptions, Error, Flags};

fn compile_err(src: &str) -> Error {
    icu_regex::Pattern::compile(src, CompileOptions::default()).unwrap_err()
}

#[test]
fn mismatched_parenthesis_is_reported() {
    assert!(matches!(compile_err("(a"), Error::MismatchedParen(_)));
    assert!(matches!(compile_err("a)"), Error::MismatchedParen(_)));
}

#[test]
fn mismatched_parenthesis_points_at_the_unclosed_open_paren() {
    match compile_err("(") {
        Error::MismatchedParen(e) => assert_eq!(e.offset, 0),
        other => panic!("expected MismatchedParen, got {other:?}"),
    }
}

#[test]
fn quantifier_with_max_less_than_min_is_rejected() {
    assert!(matches!(compile_err("a{3,1}"), Error::MaxLtMin(_)));
}

#[test]
fn backreference_to_nonexistent_group_is_rejected() {
    assert!(matches!(compile_err(r"\2(a)"), Error::InvalidBackRef(_)));
}

#[test]
fn unknown_property_name_is_rejected() {
    assert!(matches!(compile_err(r"\p{NotAProperty}"), Error::PropertySyntax(_)));
}

#[test]
fn unclosed_character_class_is_rejected() {
    assert!(matches!(compile_err("[abc"), Error::MissingCloseBracket(_)));
}

#[test]
fn canonical_equivalence_flag_is_unimplemented() {
    let err = Flags::new(icu_regex::CASE_INSENSITIVE | 128).unwrap_err();
    assert!(matches!(err, Error::Unimplemented(_)));
}

#[test]
fn unbounded_lookbehind_is_rejected_at_compile_time() {
    assert!(matches!(compile_err(r"(?<=a+)b"), Error::LookBehindLimit(_)));
}

#[test]
fn group_access_without_a_match_is_invalid_state() {
    let p = icu_regex::Pattern::compile("a", CompileOptions::default()).unwrap();
    let m = p.matcher("xyz");
    assert!(matches!(m.group(0), Err(Error::InvalidState)));
}

#[test]
fn unknown_group_name_is_rejected() {
    let p = icu_regex::Pattern::compile(r"(?<year>\d+)", CompileOptions::default()).unwrap();
    let mut m = p.matcher("2024");
    assert!(m.find().unwrap());
    assert!(matches!(m.group_by_name("month"), Err(Error::InvalidCaptureGroupName(_))));
}

#[test]
fn oversized_pattern_is_rejected() {
    let flags = Flags::default();
    let huge = "a".repeat(1 << 20);
    let err = icu_regex::Pattern::compile(
        &huge,
        CompileOptions { flags, size_limit: 64 },
    )
    .unwrap_err();
    assert!(matches!(err, Error::PatternTooBig));
}
