// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use icu_regex::{CompileOptions, Flags, Pattern, CASE_INSENSITIVE, DOTALL, MULTILINE, UNIX_LINES};

fn compile_with(src: &str, bits: u32) -> Pattern {
    let flags = Flags::new(bits).unwrap();
    Pattern::compile(src, CompileOptions { flags, ..CompileOptions::default() }).unwrap()
}

#[test]
fn case_insensitive_matches_either_case() {
    let p = compile_with("hello", CASE_INSENSITIVE);
    assert!(p.matcher("HELLO").matches().unwrap());
    assert!(p.matcher("HeLLo").matches().unwrap());
}

#[test]
fn case_insensitive_folds_sharp_s_to_ss() {
    let p = compile_with("stra\u{00DF}e", CASE_INSENSITIVE);
    assert!(p.matcher("STRASSE").matches().unwrap());
}

#[test]
fn dotall_lets_dot_cross_newlines() {
    let without = Pattern::compile("a.b", CompileOptions::default()).unwrap();
    assert!(!without.matcher("a\nb").matches().unwrap());

    let with = compile_with("a.b", DOTALL);
    assert!(with.matcher("a\nb").matches().unwrap());
}

#[test]
fn multiline_makes_caret_dollar_match_line_boundaries() {
    let p = compile_with("^b", MULTILINE);
    let mut m = p.matcher("a\nb\nc");
    assert!(m.find().unwrap());
    assert_eq!(m.start(0).unwrap(), Some(2));
}

#[test]
fn unix_lines_restricts_line_breaks_to_lf() {
    let p = compile_with("^b", MULTILINE | UNIX_LINES);
    let mut m = p.matcher("a\rb");
    // \r alone is not a line terminator under UNIX_LINES, so "b" after it
    // is not at a line start.
    assert!(!m.find().unwrap());
}

#[test]
fn invalid_flag_bits_are_rejected() {
    assert!(Flags::new(1 << 30).is_err());
}

#[test]
fn literal_flag_disables_metacharacters() {
    let p = compile_with(r"a.b", icu_regex::LITERAL);
    assert!(!p.matcher("axb").matches().unwrap());
    assert!(p.matcher("a.b").matches().unwrap());
}
