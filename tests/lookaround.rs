// Copyright 2014-2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use icu_regex::{CompileOptions, Pattern};

fn pattern(src: &str) -> Pattern {
    Pattern::compile(src, CompileOptions::default()).unwrap()
}

#[test]
fn positive_lookahead_requires_follow_without_consuming() {
    let p = pattern(r"foo(?=bar)");
    let mut m = p.matcher("foobar");
    assert!(m.find().unwrap());
    assert_eq!(m.group(0).unwrap().as_deref(), Some("foo"));
    let mut no = p.matcher("foobaz");
    assert!(!no.find().unwrap());
}

#[test]
fn negative_lookahead_rejects_follow() {
    let p = pattern(r"foo(?!bar)");
    let mut yes = p.matcher("foobaz");
    assert!(yes.find().unwrap());
    let mut no = p.matcher("foobar");
    assert!(!no.find().unwrap());
}

#[test]
fn positive_lookbehind_requires_prefix() {
    let p = pattern(r"(?<=foo)bar");
    let mut yes = p.matcher("foobar");
    assert!(yes.find().unwrap());
    assert_eq!(yes.group(0).unwrap().as_deref(), Some("bar"));
    let mut no = p.matcher("xxxbar");
    assert!(!no.find().unwrap());
}

#[test]
fn negative_lookbehind_rejects_prefix() {
    let p = pattern(r"(?<!foo)bar");
    let mut no = p.matcher("foobar");
    assert!(!no.find().unwrap());
    let mut yes = p.matcher("xxxbar");
    assert!(yes.find().unwrap());
}

#[test]
fn bounded_lookbehind_tries_shorter_spans() {
    // (?<=a{1,3}) should accept any run of 1-3 'a's immediately before 'b'.
    let p = pattern(r"(?<=a{1,3})b");
    let mut m = p.matcher("aab");
    assert!(m.find().unwrap());
}

#[test]
fn atomic_group_does_not_give_back() {
    // (?>a+)a never matches since the atomic group commits to consuming
    // every 'a' and cannot backtrack off one for the trailing literal.
    let p = pattern(r"(?>a+)a");
    let mut m = p.matcher("aaa");
    assert!(!m.find().unwrap());
}

#[test]
fn atomic_group_cannot_surrender_a_digit_to_the_tail() {
    // Without atomicity, (\d+)3 on "123" would backtrack the group down to
    // "12" and match the trailing "3". The atomic group commits to "123"
    // and has nothing left to give back, so the whole pattern fails.
    let p = pattern(r"(?>\d+)3");
    let mut m = p.matcher("123");
    assert!(!m.find().unwrap());

    let greedy = pattern(r"(\d+)3");
    let mut g = greedy.matcher("123");
    assert!(g.find().unwrap());
    assert_eq!(g.group(0).unwrap().as_deref(), Some("123"));
}
